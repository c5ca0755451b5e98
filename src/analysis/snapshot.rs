use crate::analysis::counter::{Counter, SampleMap};
use crate::record::types::{AccessRecord, AppRecord};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// 安全事件类型：高危文件拦截
pub const HIGH_RISK_BLOCKED: &str = "高危文件拦截";

/// 用户行为中的请求计数键
pub const ACTION_REQUESTS: &str = "requests";

/// 按类别分组的解析结果，是聚合的输入
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CategorizedRecords {
    pub access: Vec<AccessRecord>,
    pub application: Vec<AppRecord>,
    pub error: Vec<AppRecord>,
}

impl CategorizedRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// 三类记录总数
    pub fn len(&self) -> usize {
        self.access.len() + self.application.len() + self.error.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 一次安全事件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityEvent {
    pub timestamp: NaiveDateTime,
    pub user: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub extension: String,
}

/// 一次分析的完整统计结果
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AnalysisSnapshot {
    /// 小时（0-23）→ 记录数，覆盖所有类别
    pub time_distribution: Counter<u32>,
    /// 请求方法 → 次数
    pub request_types: Counter<String>,
    /// 状态码 → 次数
    pub status_codes: Counter<u16>,
    /// 客户端 IP → 请求次数
    pub ip_activities: Counter<String>,
    /// 日志级别 → 次数（仅应用日志与错误日志）
    pub log_levels: Counter<String>,
    /// 上下文中 `path=` 的值 → 次数
    pub handlers: Counter<String>,
    /// 用户 → 行为 → 次数
    pub user_actions: BTreeMap<String, Counter<String>>,
    /// 协议 → 次数
    pub protocols: Counter<String>,
    /// 下载文件扩展名 → 次数
    pub file_types: Counter<String>,
    /// 应用日志正文中的用户名 → 次数
    pub users: Counter<String>,
    /// 下载文件名 → 次数
    pub download_stats: Counter<String>,
    /// 所有访问的响应时间（毫秒），保持文件顺序
    pub response_times: Vec<f64>,
    /// 接口路径（去掉查询串）→ 响应时间序列，按首次出现顺序
    pub interface_response_times: SampleMap<String>,
    /// 安全事件，保持文件顺序
    pub security_events: Vec<SecurityEvent>,
}

impl AnalysisSnapshot {
    /// 是否没有任何统计数据
    pub fn is_empty(&self) -> bool {
        self.time_distribution.is_empty()
            && self.response_times.is_empty()
            && self.security_events.is_empty()
    }
}
