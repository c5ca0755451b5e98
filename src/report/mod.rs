//! 报告模块
//!
//! 把统计快照整理为报告数据、图表数据，并渲染、写出 HTML 页面

pub mod assembler;
pub mod chart;
pub mod html;
pub mod writer;

pub use assembler::{InterfaceLatency, RankedEntry, ReportData, assemble};
pub use chart::{ChartKind, ChartPayload, ChartSeries, build_charts};
pub use html::{render_chart_page, render_report_page};
pub use writer::{ArtifactPaths, ArtifactWriter};
