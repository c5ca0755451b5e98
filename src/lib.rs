//! 峰云共享日志分析库
//!
//! 解析访问日志、应用日志和错误日志，聚合多维度统计，
//! 生成报告数据、图表数据以及两个 HTML 报告页面。
//!
//! 处理流程是单向的：
//!
//! ```text
//! 原始日志行 → record::parser → CategorizedRecords → analysis::aggregate
//!            → AnalysisSnapshot → report::assemble / build_charts → HTML
//! ```

// 核心模块 - 始终可用
pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod record;
pub mod report;

// 日志初始化 - 需要 logging 功能
#[cfg(feature = "logging")]
pub mod logging;

/// 常用类型
pub mod prelude {
    pub use crate::analysis::{AnalysisSnapshot, CategorizedRecords, aggregate};
    pub use crate::analyzer::{AnalysisOutput, LogAnalyzer, ParseStats};
    pub use crate::config::Config;
    pub use crate::error::{AnalysisError, Result};
    pub use crate::record::{LogRecord, LogType};
    pub use crate::report::{ArtifactWriter, ReportData, assemble, build_charts};
}
