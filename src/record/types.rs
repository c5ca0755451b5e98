use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// 访问日志中固定的协议字段
pub const DEFAULT_PROTOCOL: &str = "HTTP/1.1";

/// 日志类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    /// 访问日志
    Access,
    /// 应用日志
    Application,
    /// 错误日志
    Error,
}

impl LogType {
    /// 按处理顺序排列的全部类别
    pub const ALL: [LogType; 3] =
        [LogType::Access, LogType::Application, LogType::Error];

    /// 类别名称
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Access => "access",
            LogType::Application => "application",
            LogType::Error => "error",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单条访问日志
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessRecord {
    /// 请求时间
    pub timestamp: NaiveDateTime,
    /// 客户端 IP
    pub client_ip: String,
    /// 请求 ID
    pub request_id: String,
    /// 请求方法
    pub http_method: String,
    /// 请求路径（可能带查询串，缺失时为空）
    pub path: String,
    /// 状态码
    pub status_code: u16,
    /// 响应时间（毫秒）
    pub response_time_ms: f64,
    /// User-Agent
    pub user_agent: String,
    /// 协议
    pub protocol: String,
    /// 行尾的上下文字段，默认格式不一定带有
    pub context: Option<String>,
}

/// 单条应用日志或错误日志
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppRecord {
    /// 记录时间
    pub timestamp: NaiveDateTime,
    /// 所属类别（application 或 error）
    pub log_type: LogType,
    /// 日志级别
    pub log_level: String,
    /// 模块名
    pub module: String,
    /// 客户端 IP
    pub client_ip: String,
    /// 请求 ID
    pub request_id: String,
    /// 日志正文
    pub message: String,
    /// 上下文（空格分隔的 key=value）
    pub context: String,
}

/// 解析后的日志记录
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRecord {
    Access(AccessRecord),
    Application(AppRecord),
    Error(AppRecord),
}

impl LogRecord {
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            LogRecord::Access(r) => r.timestamp,
            LogRecord::Application(r) | LogRecord::Error(r) => r.timestamp,
        }
    }

    pub fn log_type(&self) -> LogType {
        match self {
            LogRecord::Access(_) => LogType::Access,
            LogRecord::Application(_) => LogType::Application,
            LogRecord::Error(_) => LogType::Error,
        }
    }

    /// 日志级别，访问日志没有级别
    pub fn log_level(&self) -> Option<&str> {
        match self {
            LogRecord::Access(_) => None,
            LogRecord::Application(r) | LogRecord::Error(r) => {
                Some(&r.log_level)
            }
        }
    }

    pub fn context(&self) -> Option<&str> {
        match self {
            LogRecord::Access(r) => r.context.as_deref(),
            LogRecord::Application(r) | LogRecord::Error(r) => {
                Some(&r.context)
            }
        }
    }
}
