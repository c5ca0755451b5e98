//! 图表数据
//!
//! 图表页面是 3×3 的网格，共 9 个图表，顺序与页面布局一致。

use crate::analysis::counter::Counter;
use crate::analysis::snapshot::AnalysisSnapshot;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::report::assembler::{RankedEntry, rank};
use serde::Serialize;
use std::fmt::Display;
use std::hash::Hash;

/// 图表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Heatmap,
    Pie,
    Bar,
}

/// 单个图表的数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartSeries {
    fn new(id: &'static str, title: &'static str, kind: ChartKind) -> Self {
        Self { id, title, kind, labels: Vec::new(), values: Vec::new() }
    }

    fn from_counter<K>(mut self, counter: &Counter<K>) -> Self
    where
        K: Eq + Hash + Clone + Display,
    {
        for (k, n) in counter.iter() {
            self.labels.push(k.to_string());
            self.values.push(n);
        }
        self
    }

    fn from_ranked(mut self, entries: Vec<RankedEntry>) -> Self {
        for entry in entries {
            self.labels.push(entry.key);
            self.values.push(entry.count);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 图表页面所需的全部数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub title: &'static str,
    pub charts: Vec<ChartSeries>,
}

impl ChartPayload {
    /// 所有图表都没有数据
    pub fn is_empty(&self) -> bool {
        self.charts.iter().all(ChartSeries::is_empty)
    }

    pub fn get(&self, id: &str) -> Option<&ChartSeries> {
        self.charts.iter().find(|c| c.id == id)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// 由快照生成图表数据
pub fn build_charts(
    snapshot: &AnalysisSnapshot,
    config: &ReportConfig,
) -> ChartPayload {
    // 热力图按小时升序
    let mut hours: Vec<(u32, u64)> = snapshot
        .time_distribution
        .iter()
        .map(|(h, n)| (*h, n))
        .collect();
    hours.sort_by_key(|(h, _)| *h);
    let mut hourly =
        ChartSeries::new("hourly", "每小时请求量热力图", ChartKind::Heatmap);
    for (h, n) in hours {
        hourly.labels.push(h.to_string());
        hourly.values.push(n);
    }

    let security_by_ext: Counter<String> = snapshot
        .security_events
        .iter()
        .map(|e| e.extension.clone())
        .collect();

    let charts = vec![
        hourly,
        ChartSeries::new("status_codes", "状态码分布", ChartKind::Pie)
            .from_counter(&snapshot.status_codes),
        ChartSeries::new("methods", "请求方法分布", ChartKind::Bar)
            .from_counter(&snapshot.request_types),
        ChartSeries::new("log_levels", "日志级别分布", ChartKind::Bar)
            .from_counter(&snapshot.log_levels),
        ChartSeries::new("top_users", "TOP 10活跃用户", ChartKind::Bar)
            .from_ranked(rank(&snapshot.users, Some(config.top_users))),
        ChartSeries::new("protocols", "协议类型分布", ChartKind::Pie)
            .from_counter(&snapshot.protocols),
        ChartSeries::new("security_events", "安全事件统计", ChartKind::Bar)
            .from_counter(&security_by_ext),
        ChartSeries::new("file_types", "文件类型分布", ChartKind::Pie)
            .from_counter(&snapshot.file_types),
        ChartSeries::new("downloads", "下载统计", ChartKind::Bar).from_ranked(
            rank(&snapshot.download_stats, Some(config.top_downloads)),
        ),
    ];

    ChartPayload { title: "综合日志分析可视化", charts }
}
