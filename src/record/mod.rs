//! 日志记录模块
//!
//! 提供日志记录的类型定义、行解析器以及上下文字段和正文的提取工具

pub mod context;
pub mod parser;
pub mod types;
pub mod utils;

// 重新导出核心类型
pub use context::ContextFields;
pub use parser::{LineParser, LineParsers};
pub use types::{AccessRecord, AppRecord, LogRecord, LogType};
