//! 配置管理模块
//!
//! 提供统一的配置文件读取和管理功能。各个配置段都带有默认值，
//! 配置文件中只需写出需要覆盖的项。

use crate::error::{AnalysisError, Result};
use crate::record::parser::LineParsers;
use crate::record::types::LogType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 访问日志默认格式
pub const DEFAULT_ACCESS_PATTERN: &str = r#"^\[(?P<timestamp>.*?)\] \[(?P<client_ip>.*?)\] \[(?P<request_id>.*?)\] "(?P<request>.*?)" (?P<status>\d+) (?P<response_time>.*?)ms "(?P<user_agent>.*?)"(?: \[(?P<context>.*?)\])?"#;

/// 应用日志与错误日志默认格式
pub const DEFAULT_APP_PATTERN: &str = r"^\[(?P<timestamp>.*?)\] \[(?P<level>\w+)\s*\] \[(?P<module>\w+)\s*\] \[(?P<client_ip>.*?)\] \[(?P<request_id>.*?)\] (?P<message>.*?) \[(?P<context>.*?)\]";

/// 默认时间戳格式
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 图表页面默认加载的 Plotly.js 地址（需要访问外网）
pub const DEFAULT_CHART_SCRIPT_SRC: &str =
    "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// 主配置结构体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 日志配置
    pub log: LogConfig,
    /// 日志文件来源
    pub sources: SourceConfig,
    /// 行格式配置
    pub patterns: PatternConfig,
    /// 报告配置
    pub report: ReportConfig,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// 是否启用控制台输出
    pub enable_stdout: bool,
    /// 日志输出目录
    pub log_dir: String,
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 待分析的日志文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// 日志文件所在目录
    pub log_dir: String,
    /// 访问日志文件名
    pub access: String,
    /// 应用日志文件名
    pub application: String,
    /// 错误日志文件名
    pub error: String,
}

/// 行格式配置，正则中需要带有约定的命名捕获组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// 访问日志正则
    pub access: String,
    /// 应用日志正则
    pub application: String,
    /// 错误日志正则
    pub error: String,
    /// 时间戳格式（chrono 格式串）
    pub timestamp_format: String,
}

/// 报告配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 活跃用户排行数量
    pub top_users: usize,
    /// 下载排行数量
    pub top_downloads: usize,
    /// 热门接口排行数量
    pub top_handlers: usize,
    /// 报告中展示的安全事件条数
    pub security_events_shown: usize,
    /// 安全事件文件名的最大展示长度（字符）
    pub filename_display_width: usize,
    /// 报告输出目录
    pub output_dir: String,
    /// 汇总报告文件名
    pub report_file: String,
    /// 图表页面文件名
    pub chart_file: String,
    /// 图表页面加载的 Plotly.js 地址；内网部署时改为本地路径，如 `plotly.min.js`
    pub chart_script_src: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enable_stdout: true,
            log_dir: "logs".to_string(),
            level: "info".to_string(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            log_dir: "log".to_string(),
            access: "access.log".to_string(),
            application: "application.log".to_string(),
            error: "error.log".to_string(),
        }
    }
}

impl SourceConfig {
    /// 某类日志的完整路径
    pub fn path_for(&self, log_type: LogType) -> PathBuf {
        let name = match log_type {
            LogType::Access => &self.access,
            LogType::Application => &self.application,
            LogType::Error => &self.error,
        };
        Path::new(&self.log_dir).join(name)
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            access: DEFAULT_ACCESS_PATTERN.to_string(),
            application: DEFAULT_APP_PATTERN.to_string(),
            error: DEFAULT_APP_PATTERN.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl PatternConfig {
    /// 某类日志的正则
    pub fn pattern_for(&self, log_type: LogType) -> &str {
        match log_type {
            LogType::Access => &self.access,
            LogType::Application => &self.application,
            LogType::Error => &self.error,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_users: 10,
            top_downloads: 5,
            top_handlers: 5,
            security_events_shown: 5,
            filename_display_width: 20,
            output_dir: "web".to_string(),
            report_file: "report.html".to_string(),
            chart_file: "full_analysis.html".to_string(),
            chart_script_src: DEFAULT_CHART_SCRIPT_SRC.to_string(),
        }
    }
}

impl Config {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// 加载配置文件，文件不存在时使用默认配置
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(
                "配置文件不存在，使用默认配置: {}",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        // 验证日志级别
        match self.log.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(AnalysisError::config_error(format!(
                    "无效的日志级别: {}",
                    self.log.level
                )));
            }
        }

        // 验证文件名
        for (key, value) in [
            ("sources.access", &self.sources.access),
            ("sources.application", &self.sources.application),
            ("sources.error", &self.sources.error),
            ("report.report_file", &self.report.report_file),
            ("report.chart_file", &self.report.chart_file),
            ("report.chart_script_src", &self.report.chart_script_src),
        ] {
            if value.trim().is_empty() {
                return Err(AnalysisError::config_error(format!(
                    "{key} 不能为空"
                )));
            }
        }

        if self.report.report_file == self.report.chart_file {
            return Err(AnalysisError::config_error(
                "report.report_file 与 report.chart_file 不能相同",
            ));
        }

        // 验证排行数量
        for (key, value) in [
            ("report.top_users", self.report.top_users),
            ("report.top_downloads", self.report.top_downloads),
            ("report.top_handlers", self.report.top_handlers),
        ] {
            if value == 0 {
                return Err(AnalysisError::config_error(format!(
                    "{key} 不能为0"
                )));
            }
        }

        if self.patterns.timestamp_format.trim().is_empty() {
            return Err(AnalysisError::config_error("时间戳格式不能为空"));
        }

        // 验证行格式：能编译且带有必需的捕获组
        LineParsers::from_config(&self.patterns)?;

        Ok(())
    }
}

impl FromStr for Config {
    type Err = AnalysisError;

    fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}
