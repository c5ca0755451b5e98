//! 解析统计信息模块

use crate::record::types::LogType;
use serde::Serialize;

/// 单类日志的解析统计
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// 成功解析的行数
    pub matched: usize,
    /// 格式不匹配而跳过的行数
    pub skipped: usize,
    /// 格式匹配但时间戳或字段异常的行数
    pub malformed: usize,
    /// 日志文件是否缺失
    pub source_missing: bool,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 处理过的总行数
    pub fn total_lines(&self) -> usize {
        self.matched + self.skipped + self.malformed
    }

    /// 计算成功率
    pub fn success_rate(&self) -> f64 {
        let total = self.total_lines();
        if total > 0 {
            self.matched as f64 / total as f64 * 100.0
        } else {
            0.0
        }
    }

    /// 合并其他统计信息
    pub fn merge(&mut self, other: &ParseStats) {
        self.matched += other.matched;
        self.skipped += other.skipped;
        self.malformed += other.malformed;
        self.source_missing |= other.source_missing;
    }
}

impl std::fmt::Display for ParseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.source_missing {
            return write!(f, "文件缺失");
        }
        write!(
            f,
            "成功: {}, 跳过: {}, 异常: {}, 成功率: {:.1}%",
            self.matched,
            self.skipped,
            self.malformed,
            self.success_rate()
        )
    }
}

/// 三类日志的解析统计汇总
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    pub access: ParseStats,
    pub application: ParseStats,
    pub error: ParseStats,
}

impl ParseSummary {
    pub fn get(&self, log_type: LogType) -> &ParseStats {
        match log_type {
            LogType::Access => &self.access,
            LogType::Application => &self.application,
            LogType::Error => &self.error,
        }
    }

    pub fn get_mut(&mut self, log_type: LogType) -> &mut ParseStats {
        match log_type {
            LogType::Access => &mut self.access,
            LogType::Application => &mut self.application,
            LogType::Error => &mut self.error,
        }
    }

    /// 三类合计
    pub fn total(&self) -> ParseStats {
        let mut total = ParseStats::new();
        for log_type in LogType::ALL {
            total.merge(self.get(log_type));
        }
        total
    }
}

impl std::fmt::Display for ParseSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "access [{}], application [{}], error [{}]",
            self.access, self.application, self.error
        )
    }
}
