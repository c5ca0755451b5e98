//! 错误类型定义
//!
//! 这个模块定义了库中使用的所有错误类型，使用 thiserror 提供丰富的错误信息。
//!
//! 逐行的解析问题（时间戳或字段异常）由调用方吸收并跳过该行，
//! 只有报告写入失败才会作为致命错误返回给调用者。

use std::path::PathBuf;

/// 日志分析的结果类型
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// 日志分析错误类型
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// 正则表达式错误
    #[error("正则表达式错误: {0}")]
    Regex(#[from] regex::Error),

    /// 时间戳格式错误
    #[error("时间戳格式错误: {value}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// 字段取值错误（状态码、响应时间、请求行等）
    #[error("字段格式错误: {field} = {value:?}")]
    Field { field: &'static str, value: String },

    /// 报告写入错误
    #[error("报告写入失败 ({}): {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 配置文件解析错误
    #[error("配置文件解析错误: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// 配置文件序列化错误
    #[error("配置文件序列化错误: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON 序列化错误
    #[error("JSON序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 日志错误（仅在启用 logging feature 时可用）
    #[cfg(feature = "logging")]
    #[error("日志错误: {0}")]
    Log(#[from] crate::logging::LogError),

    /// 其他错误
    #[error("未知错误: {0}")]
    Other(String),
}

impl AnalysisError {
    /// 创建一个时间戳格式错误
    pub fn timestamp_error<S: Into<String>>(
        value: S,
        source: chrono::ParseError,
    ) -> Self {
        Self::Timestamp { value: value.into(), source }
    }

    /// 创建一个字段格式错误
    pub fn field_error<S: Into<String>>(field: &'static str, value: S) -> Self {
        Self::Field { field, value: value.into() }
    }

    /// 创建一个报告写入错误
    pub fn render_error<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        let path = path.into();
        tracing::error!("报告写入失败: {} ({})", path.display(), source);
        Self::Render { path, source }
    }

    /// 创建一个配置错误
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        tracing::error!("配置错误: {}", message);
        Self::Config(message)
    }

    /// 创建一个其他类型错误
    pub fn other<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        tracing::error!("未知错误: {}", message);
        Self::Other(message)
    }

    /// 检查是否为 IO 错误
    pub fn is_io_error(&self) -> bool {
        matches!(self, AnalysisError::Io(_))
    }

    /// 检查是否为单行数据错误（时间戳或字段），这类错误只需跳过该行
    pub fn is_line_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::Timestamp { .. } | AnalysisError::Field { .. }
        )
    }

    /// 检查是否为时间戳错误
    pub fn is_timestamp_error(&self) -> bool {
        matches!(self, AnalysisError::Timestamp { .. })
    }

    /// 检查是否为报告写入错误
    pub fn is_render_error(&self) -> bool {
        matches!(self, AnalysisError::Render { .. })
    }

    /// 检查是否为配置错误
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::Config(_)
                | AnalysisError::TomlDe(_)
                | AnalysisError::TomlSer(_)
        )
    }

    /// 检查是否为其他错误
    pub fn is_other_error(&self) -> bool {
        matches!(self, AnalysisError::Other(_))
    }
}
