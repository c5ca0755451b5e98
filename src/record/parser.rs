//! 日志行解析器
//!
//! 三类日志各有一个 [`LineParser`]，行格式来自配置（[`PatternConfig`]），
//! 格式变化时只需要修改配置。解析结果分三种：
//!
//! - `Ok(Some(record))`：匹配成功；
//! - `Ok(None)`：行格式不匹配（截断的行、轮转边界上的残行等），直接跳过；
//! - `Err(e)`：行格式匹配但时间戳或字段取值异常，调用方跳过该行后继续。
//!
//! ```rust
//! use peakcloud_log_analysis::config::PatternConfig;
//! use peakcloud_log_analysis::record::parser::LineParsers;
//!
//! let parsers = LineParsers::from_config(&PatternConfig::default())?;
//! let line = r#"[2025-01-01 10:00:00] [10.0.0.1] [abc123] "GET /download/file.pdf" 200 12.50ms "Mozilla/5.0""#;
//! let record = parsers.access.parse(line)?;
//! assert!(record.is_some());
//! # Ok::<(), peakcloud_log_analysis::error::AnalysisError>(())
//! ```

use crate::config::PatternConfig;
use crate::error::{AnalysisError, Result};
use crate::record::types::{
    AccessRecord, AppRecord, DEFAULT_PROTOCOL, LogRecord, LogType,
};
use chrono::NaiveDateTime;
use regex::{Captures, Regex};

/// 访问日志正则必需的命名捕获组
pub const ACCESS_GROUPS: [&str; 7] = [
    "timestamp",
    "client_ip",
    "request_id",
    "request",
    "status",
    "response_time",
    "user_agent",
];

/// 应用日志与错误日志正则必需的命名捕获组
pub const APP_GROUPS: [&str; 7] = [
    "timestamp",
    "level",
    "module",
    "client_ip",
    "request_id",
    "message",
    "context",
];

/// 单一类别的行解析器
#[derive(Debug, Clone)]
pub struct LineParser {
    log_type: LogType,
    regex: Regex,
    timestamp_format: String,
}

impl LineParser {
    /// 编译行格式并检查必需的捕获组
    pub fn new(
        log_type: LogType,
        pattern: &str,
        timestamp_format: &str,
    ) -> Result<Self> {
        let regex = Regex::new(pattern)?;

        let required: &[&str] = match log_type {
            LogType::Access => &ACCESS_GROUPS,
            LogType::Application | LogType::Error => &APP_GROUPS,
        };
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| !regex.capture_names().flatten().any(|n| n == *name))
            .collect();
        if !missing.is_empty() {
            return Err(AnalysisError::config_error(format!(
                "{log_type} 日志格式缺少捕获组: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            log_type,
            regex,
            timestamp_format: timestamp_format.to_string(),
        })
    }

    pub fn log_type(&self) -> LogType {
        self.log_type
    }

    /// 解析单行日志
    pub fn parse(&self, line: &str) -> Result<Option<LogRecord>> {
        let line = line.trim_end_matches(['\r', '\n']);

        let Some(caps) = self.regex.captures(line) else {
            tracing::trace!(log_type = %self.log_type, "行格式不匹配: {line}");
            return Ok(None);
        };

        let timestamp = self.parse_timestamp(group(&caps, "timestamp"))?;

        let record = match self.log_type {
            LogType::Access => {
                LogRecord::Access(Self::access_fields(&caps, timestamp)?)
            }
            LogType::Application => LogRecord::Application(
                Self::app_fields(&caps, timestamp, LogType::Application),
            ),
            LogType::Error => LogRecord::Error(Self::app_fields(
                &caps,
                timestamp,
                LogType::Error,
            )),
        };
        Ok(Some(record))
    }

    fn parse_timestamp(&self, value: &str) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value, &self.timestamp_format)
            .map_err(|e| AnalysisError::timestamp_error(value, e))
    }

    fn access_fields(
        caps: &Captures,
        timestamp: NaiveDateTime,
    ) -> Result<AccessRecord> {
        let request = group(caps, "request");
        let mut parts = request.split_whitespace();
        let http_method = parts
            .next()
            .ok_or_else(|| AnalysisError::field_error("request", request))?
            .to_string();
        let path = parts.next().unwrap_or("").to_string();

        let status = group(caps, "status");
        let status_code = status
            .trim()
            .parse::<u16>()
            .map_err(|_| AnalysisError::field_error("status", status))?;

        let response_time = group(caps, "response_time");
        let response_time_ms =
            response_time.trim().parse::<f64>().map_err(|_| {
                AnalysisError::field_error("response_time", response_time)
            })?;

        let context = caps.name("context").map(|m| m.as_str().to_string());

        Ok(AccessRecord {
            timestamp,
            client_ip: group(caps, "client_ip").to_string(),
            request_id: group(caps, "request_id").to_string(),
            http_method,
            path,
            status_code,
            response_time_ms,
            user_agent: group(caps, "user_agent").to_string(),
            protocol: DEFAULT_PROTOCOL.to_string(),
            context,
        })
    }

    fn app_fields(
        caps: &Captures,
        timestamp: NaiveDateTime,
        log_type: LogType,
    ) -> AppRecord {
        AppRecord {
            timestamp,
            log_type,
            log_level: group(caps, "level").trim().to_string(),
            module: group(caps, "module").trim().to_string(),
            client_ip: group(caps, "client_ip").to_string(),
            request_id: group(caps, "request_id").to_string(),
            message: group(caps, "message").to_string(),
            context: group(caps, "context").to_string(),
        }
    }
}

/// 取命名捕获组，未参与匹配时为空串
fn group<'h>(caps: &Captures<'h>, name: &str) -> &'h str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// 三类日志的解析器集合
#[derive(Debug, Clone)]
pub struct LineParsers {
    pub access: LineParser,
    pub application: LineParser,
    pub error: LineParser,
}

impl LineParsers {
    /// 按配置编译三类解析器
    pub fn from_config(config: &PatternConfig) -> Result<Self> {
        let build = |log_type: LogType| {
            LineParser::new(
                log_type,
                config.pattern_for(log_type),
                &config.timestamp_format,
            )
        };
        Ok(Self {
            access: build(LogType::Access)?,
            application: build(LogType::Application)?,
            error: build(LogType::Error)?,
        })
    }

    /// 取对应类别的解析器
    pub fn for_type(&self, log_type: LogType) -> &LineParser {
        match log_type {
            LogType::Access => &self.access,
            LogType::Application => &self.application,
            LogType::Error => &self.error,
        }
    }
}
