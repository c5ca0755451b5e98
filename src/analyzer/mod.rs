//! 日志分析入口
//!
//! [`LogAnalyzer`] 串起整个流程：逐行解析三类日志、聚合统计、组装报告数据和图表数据。
//! 一个实例只对应一次分析，[`LogAnalyzer::analyze`] 会消耗实例本身。
//!
//! ## 错误处理
//!
//! - 行格式不匹配：跳过，计入 `skipped`；
//! - 时间戳或字段异常：跳过该行，计入 `malformed`，继续处理后续行；
//! - 日志文件缺失：按空输入处理并记录警告；
//! - 报告写入失败：作为错误返回给调用方。
//!
//! ```rust,no_run
//! use peakcloud_log_analysis::analyzer::LogAnalyzer;
//! use peakcloud_log_analysis::config::Config;
//! use peakcloud_log_analysis::report::ArtifactWriter;
//!
//! let config = Config::load_or_default("analysis.toml")?;
//! let mut analyzer = LogAnalyzer::new(&config)?;
//! analyzer.feed_sources(&config.sources);
//! let output = analyzer.analyze();
//! output.write_artifacts(&ArtifactWriter::from_config(&config.report))?;
//! # Ok::<(), peakcloud_log_analysis::error::AnalysisError>(())
//! ```

pub mod source;
pub mod stats;

pub use stats::{ParseStats, ParseSummary};

use crate::analysis::aggregator::aggregate;
use crate::analysis::snapshot::{AnalysisSnapshot, CategorizedRecords};
use crate::config::{Config, ReportConfig, SourceConfig};
use crate::error::Result;
use crate::record::parser::LineParsers;
use crate::record::types::{LogRecord, LogType};
use crate::report::assembler::{ReportData, assemble};
use crate::report::chart::{ChartPayload, build_charts};
use crate::report::html;
use crate::report::writer::{ArtifactPaths, ArtifactWriter};
use chrono::NaiveDateTime;
use std::io;
use std::path::Path;

/// 单次日志分析
#[derive(Debug)]
pub struct LogAnalyzer {
    parsers: LineParsers,
    report_config: ReportConfig,
    records: CategorizedRecords,
    summary: ParseSummary,
}

impl LogAnalyzer {
    /// 按配置创建分析器
    ///
    /// # Errors
    /// 行格式无法编译或缺少必需的捕获组时返回配置错误
    pub fn new(config: &Config) -> Result<Self> {
        let parsers = LineParsers::from_config(&config.patterns)?;
        Ok(Self::with_parsers(parsers, config.report.clone()))
    }

    /// 使用已编译的解析器创建分析器
    pub fn with_parsers(parsers: LineParsers, report_config: ReportConfig) -> Self {
        Self {
            parsers,
            report_config,
            records: CategorizedRecords::new(),
            summary: ParseSummary::default(),
        }
    }

    /// 解析一行日志
    pub fn feed_line(&mut self, log_type: LogType, line: &str) {
        let result = self.parsers.for_type(log_type).parse(line);
        let stats = self.summary.get_mut(log_type);
        match result {
            Ok(Some(record)) => {
                stats.matched += 1;
                match record {
                    LogRecord::Access(r) => self.records.access.push(r),
                    LogRecord::Application(r) => {
                        self.records.application.push(r)
                    }
                    LogRecord::Error(r) => self.records.error.push(r),
                }
            }
            Ok(None) => stats.skipped += 1,
            Err(e) => {
                stats.malformed += 1;
                tracing::debug!(log_type = %log_type, error = %e, "跳过异常日志行");
            }
        }
    }

    /// 解析一组日志行
    pub fn feed_lines<I, S>(&mut self, log_type: LogType, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.feed_line(log_type, line.as_ref());
        }
        tracing::debug!(
            log_type = %log_type,
            "解析完成: {}",
            self.summary.get(log_type)
        );
    }

    /// 读取并解析一个日志文件；文件缺失或读取失败不会中断分析
    pub fn feed_file<P: AsRef<Path>>(&mut self, log_type: LogType, path: P) {
        let path = path.as_ref();
        tracing::debug!(log_type = %log_type, "开始读取日志文件: {}", path.display());

        match source::for_each_line(path, |line| self.feed_line(log_type, line)) {
            Ok(lines) => {
                tracing::debug!(
                    log_type = %log_type,
                    "日志文件 {} 共 {} 行: {}",
                    path.display(),
                    lines,
                    self.summary.get(log_type)
                );
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.summary.get_mut(log_type).source_missing = true;
                tracing::warn!(
                    log_type = %log_type,
                    "日志文件不存在，按空日志处理: {}",
                    path.display()
                );
            }
            Err(e) => {
                tracing::warn!(
                    log_type = %log_type,
                    "读取日志文件失败，已读取的行仍参与分析: {} ({})",
                    path.display(),
                    e
                );
            }
        }
    }

    /// 读取配置中的三个日志文件
    pub fn feed_sources(&mut self, sources: &SourceConfig) {
        for log_type in LogType::ALL {
            self.feed_file(log_type, sources.path_for(log_type));
        }
    }

    /// 目前已解析的记录
    pub fn records(&self) -> &CategorizedRecords {
        &self.records
    }

    /// 目前的解析统计
    pub fn summary(&self) -> &ParseSummary {
        &self.summary
    }

    /// 聚合并组装报告，消耗分析器
    pub fn analyze(self) -> AnalysisOutput {
        if self.records.is_empty() {
            tracing::warn!("没有解析到任何日志数据，报告内容为空");
        }

        let snapshot = aggregate(&self.records);
        let report = assemble(&snapshot, &self.report_config);
        let charts = build_charts(&snapshot, &self.report_config);

        tracing::info!(
            total_requests = report.total_requests,
            security_events = report.security_events.len(),
            "日志分析完成: {}",
            self.summary
        );

        AnalysisOutput {
            snapshot,
            report,
            charts,
            summary: self.summary,
            report_config: self.report_config,
        }
    }
}

/// 一次分析的全部结果
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub snapshot: AnalysisSnapshot,
    pub report: ReportData,
    pub charts: ChartPayload,
    pub summary: ParseSummary,
    report_config: ReportConfig,
}

impl AnalysisOutput {
    /// 渲染汇总报告页面
    pub fn render_report_page(&self, generated_at: NaiveDateTime) -> String {
        html::render_report_page(&self.report, &self.report_config, generated_at)
    }

    /// 渲染图表页面
    pub fn render_chart_page(&self) -> Result<String> {
        html::render_chart_page(&self.charts, &self.report_config)
    }

    /// 渲染并写出两个页面，生成时间取本地当前时间
    pub fn write_artifacts(&self, writer: &ArtifactWriter) -> Result<ArtifactPaths> {
        self.write_artifacts_at(writer, chrono::Local::now().naive_local())
    }

    /// 渲染并写出两个页面；全部渲染成功后才开始写文件
    pub fn write_artifacts_at(
        &self,
        writer: &ArtifactWriter,
        generated_at: NaiveDateTime,
    ) -> Result<ArtifactPaths> {
        let chart_html = self.render_chart_page()?;
        let report_html = self.render_report_page(generated_at);
        writer.write(&report_html, &chart_html)
    }
}

/// 按配置完成一次完整分析并写出报告
///
/// # Errors
/// 配置无效或报告写入失败时返回错误；日志文件缺失不算错误
pub fn run(config: &Config) -> Result<ArtifactPaths> {
    let mut analyzer = LogAnalyzer::new(config)?;
    analyzer.feed_sources(&config.sources);
    let output = analyzer.analyze();
    output.write_artifacts(&ArtifactWriter::from_config(&config.report))
}
