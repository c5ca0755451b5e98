//! 统计分析模块
//!
//! 将解析后的记录聚合为多维度的统计快照

pub mod aggregator;
pub mod counter;
pub mod snapshot;

pub use aggregator::{Aggregator, aggregate};
pub use counter::{Counter, SampleMap};
pub use snapshot::{AnalysisSnapshot, CategorizedRecords, SecurityEvent};
