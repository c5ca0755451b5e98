//! 报告数据组装
//!
//! 把统计快照整理成可直接展示的结构（表格、汇总数字），
//! 不做解析也不做 IO，渲染目标可以是 HTML、JSON 接口或图表。

use crate::analysis::counter::Counter;
use crate::analysis::snapshot::{AnalysisSnapshot, SecurityEvent};
use crate::config::ReportConfig;
use serde::Serialize;
use std::fmt::Display;

/// 排行中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub key: String,
    pub count: u64,
}

/// 单个接口的响应时间统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceLatency {
    pub path: String,
    pub calls: usize,
    pub average_ms: f64,
    pub max_ms: f64,
}

/// 报告数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub total_requests: u64,
    pub average_response_time_ms: f64,
    pub max_response_time_ms: f64,
    pub min_response_time_ms: f64,
    pub top_users: Vec<RankedEntry>,
    pub top_downloads: Vec<RankedEntry>,
    pub top_handlers: Vec<RankedEntry>,
    pub file_types: Vec<RankedEntry>,
    pub security_events: Vec<SecurityEvent>,
    pub interface_latencies: Vec<InterfaceLatency>,
    /// 报告中展示的安全事件条数
    pub security_events_shown: usize,
}

impl ReportData {
    /// 平均响应时间，形如 `12.50ms`
    pub fn average_response_time_display(&self) -> String {
        format_ms(self.average_response_time_ms)
    }

    pub fn max_response_time_display(&self) -> String {
        format_ms(self.max_response_time_ms)
    }

    pub fn min_response_time_display(&self) -> String {
        format_ms(self.min_response_time_ms)
    }

    /// 报告中展示的安全事件（前 N 条）
    pub fn displayed_security_events(&self) -> &[SecurityEvent] {
        let n = self.security_events_shown.min(self.security_events.len());
        &self.security_events[..n]
    }
}

/// 毫秒数保留两位小数
pub fn format_ms(value: f64) -> String {
    format!("{value:.2}ms")
}

/// 由快照组装报告数据
pub fn assemble(snapshot: &AnalysisSnapshot, config: &ReportConfig) -> ReportData {
    let (average, max, min) = response_time_summary(&snapshot.response_times);

    ReportData {
        total_requests: snapshot.time_distribution.total(),
        average_response_time_ms: average,
        max_response_time_ms: max,
        min_response_time_ms: min,
        top_users: rank(&snapshot.users, Some(config.top_users)),
        top_downloads: rank(&snapshot.download_stats, Some(config.top_downloads)),
        top_handlers: rank(&snapshot.handlers, Some(config.top_handlers)),
        file_types: rank(&snapshot.file_types, None),
        security_events: snapshot.security_events.clone(),
        interface_latencies: interface_latencies(snapshot),
        security_events_shown: config.security_events_shown,
    }
}

/// 计数降序排行，`limit` 为 `None` 时不截断
pub fn rank<K>(counter: &Counter<K>, limit: Option<usize>) -> Vec<RankedEntry>
where
    K: Eq + std::hash::Hash + Clone + Display,
{
    let ranked = match limit {
        Some(n) => counter.top(n),
        None => counter.ranked(),
    };
    ranked
        .into_iter()
        .map(|(key, count)| RankedEntry { key: key.to_string(), count })
        .collect()
}

/// 平均、最大、最小响应时间；没有数据时全部为 0
fn response_time_summary(times: &[f64]) -> (f64, f64, f64) {
    if times.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let sum: f64 = times.iter().sum();
    let max = times.iter().copied().fold(f64::MIN, f64::max);
    let min = times.iter().copied().fold(f64::MAX, f64::min);
    (sum / times.len() as f64, max, min)
}

fn interface_latencies(snapshot: &AnalysisSnapshot) -> Vec<InterfaceLatency> {
    let mut rows: Vec<InterfaceLatency> = snapshot
        .interface_response_times
        .iter()
        .filter(|(_, times)| !times.is_empty())
        .map(|(path, times)| {
            let (average_ms, max_ms, _) = response_time_summary(times);
            InterfaceLatency {
                path: path.clone(),
                calls: times.len(),
                average_ms,
                max_ms,
            }
        })
        .collect();
    // 平均值相同的接口保持首次出现顺序
    rows.sort_by(|a, b| b.average_ms.total_cmp(&a.average_ms));
    rows
}
