//! 日志初始化和配置模块
//!
//! 这个模块提供了统一的日志初始化功能，使用 tracing 库。
//! 输出到控制台（可关闭）和日志目录下按天滚动的文件。

use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// 日志文件名前缀
const LOG_FILE_PREFIX: &str = "log-analysis";

/// 日志配置结构体
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别
    pub level: Level,
    /// 日志文件目录
    pub log_dir: PathBuf,
    /// 是否输出到控制台
    pub enable_stdout: bool,
}

impl LogConfig {
    /// 创建新的日志配置，使用默认值
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置日志级别
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// 设置日志目录
    pub fn log_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// 设置是否输出到控制台
    pub fn enable_stdout(mut self, enable: bool) -> Self {
        self.enable_stdout = enable;
        self
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_dir: PathBuf::from("logs"),
            enable_stdout: true,
        }
    }
}

impl TryFrom<&crate::config::LogConfig> for LogConfig {
    type Error = LogError;

    fn try_from(config: &crate::config::LogConfig) -> LogResult<Self> {
        let level = Level::from_str(&config.level).map_err(|_| {
            LogError::Config(format!("无效的日志级别: {}", config.level))
        })?;
        Ok(Self {
            level,
            log_dir: PathBuf::from(&config.log_dir),
            enable_stdout: config.enable_stdout,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),
    #[error("日志配置错误: {0}")]
    Config(String),
}

/// 日志初始化结果
pub type LogResult<T> = Result<T, LogError>;

/// 初始化日志系统
///
/// - 输出到控制台（`enable_stdout`）和 `log_dir` 目录
/// - 日志文件按天滚动
/// - 环境变量 `RUST_LOG` 优先于配置的级别
///
/// 重复初始化不会报错。
///
/// # Examples
///
/// ```no_run
/// use peakcloud_log_analysis::logging::{init_logging, LogConfig};
/// use tracing::Level;
///
/// let config = LogConfig::new().level(Level::DEBUG).log_dir("logs");
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> LogResult<()> {
    std::fs::create_dir_all(&config.log_dir)?;

    // 创建环境过滤器，默认使用配置的级别
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    // 控制台输出层
    let console_layer = config.enable_stdout.then(|| {
        fmt::layer()
            .with_timer(SystemTime)
            .with_target(true)
            .with_ansi(true)
    });

    // 文件输出层，按天滚动
    let file_appender =
        tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(SystemTime)
        .with_target(true)
        .with_ansi(false); // 文件中不使用颜色

    let subscriber = Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer);

    // 初始化失败说明已经初始化过了
    if subscriber.try_init().is_ok() {
        // 保留 guard，防止后台写线程退出
        std::mem::forget(guard);
        tracing::info!(
            "日志系统初始化完成 - 级别 {}，目录 {}",
            config.level,
            config.log_dir.display()
        );
    }
    Ok(())
}

/// 使用默认配置初始化日志系统
pub fn init_default_logging() -> LogResult<()> {
    init_logging(LogConfig::default())
}
