//! 统计聚合
//!
//! 每次分析创建一个新的 [`Aggregator`]，它独占本次运行的全部累加状态，
//! 结束时通过 [`Aggregator::finish`] 交出快照。各项计数互相独立、
//! 与记录到达顺序无关；响应时间和安全事件两个序列保持到达顺序。

use crate::analysis::snapshot::{
    ACTION_REQUESTS, AnalysisSnapshot, CategorizedRecords, HIGH_RISK_BLOCKED,
    SecurityEvent,
};
use crate::record::context::ContextFields;
use crate::record::types::{AccessRecord, AppRecord, LogRecord, LogType};
use crate::record::utils;
use chrono::Timelike;

/// 错误级别
const ERROR_LEVEL: &str = "ERROR";

/// 单次运行的统计累加器
#[derive(Debug, Default)]
pub struct Aggregator {
    snapshot: AnalysisSnapshot,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一条记录
    pub fn ingest(&mut self, record: &LogRecord) {
        match record {
            LogRecord::Access(r) => self.ingest_access(r),
            LogRecord::Application(r) | LogRecord::Error(r) => {
                self.ingest_app(r)
            }
        }
    }

    /// 累加一条访问日志
    pub fn ingest_access(&mut self, record: &AccessRecord) {
        let s = &mut self.snapshot;
        s.time_distribution.increment(record.timestamp.hour());
        s.request_types.increment(record.http_method.clone());
        s.status_codes.increment(record.status_code);
        s.ip_activities.increment(record.client_ip.clone());
        s.protocols.increment(record.protocol.clone());

        s.response_times.push(record.response_time_ms);
        s.interface_response_times.push(
            utils::strip_query(&record.path).to_string(),
            record.response_time_ms,
        );

        if let Some(context) = record.context.as_deref() {
            let fields = ContextFields::parse(context);
            if let Some(user) = fields.get("user") {
                s.user_actions
                    .entry(user.to_string())
                    .or_default()
                    .increment(ACTION_REQUESTS.to_string());
            }
            self.count_handler(&fields);
        }

        if utils::is_download_path(&record.path) {
            let filename =
                utils::file_name_of(utils::strip_query(&record.path));
            let s = &mut self.snapshot;
            s.file_types.increment(utils::extension_of(filename));
            s.download_stats.increment(filename.to_string());
        }
    }

    /// 累加一条应用日志或错误日志
    pub fn ingest_app(&mut self, record: &AppRecord) {
        let s = &mut self.snapshot;
        s.time_distribution.increment(record.timestamp.hour());
        s.log_levels.increment(record.log_level.clone());

        // 用户名只从应用日志正文中统计
        if record.log_type == LogType::Application {
            if let Some(user) = utils::extract_username(&record.message) {
                s.users.increment(user.to_string());
            }
        }

        let fields = ContextFields::parse(&record.context);
        self.count_handler(&fields);

        if let Some(event) = Self::security_event(record) {
            tracing::debug!(
                user = %event.user,
                filename = %event.filename,
                "发现高危文件拦截事件"
            );
            self.snapshot.security_events.push(event);
        }
    }

    /// 按类别顺序（访问、应用、错误）累加全部记录
    pub fn ingest_all(&mut self, records: &CategorizedRecords) {
        for record in &records.access {
            self.ingest_access(record);
        }
        for record in records.application.iter().chain(&records.error) {
            self.ingest_app(record);
        }
    }

    /// 结束累加，交出快照
    pub fn finish(self) -> AnalysisSnapshot {
        self.snapshot
    }

    fn count_handler(&mut self, fields: &ContextFields<'_>) {
        if let Some(path) = fields.get("path") {
            self.snapshot.handlers.increment(path.to_string());
        }
    }

    fn security_event(record: &AppRecord) -> Option<SecurityEvent> {
        if record.log_level != ERROR_LEVEL
            || !record.message.contains(utils::HIGH_RISK_MARKER)
        {
            return None;
        }
        let filename = utils::extract_upload_failure(&record.message)?;
        let user = utils::extract_username(&record.message)?;
        Some(SecurityEvent {
            timestamp: record.timestamp,
            user: user.to_string(),
            filename: filename.to_string(),
            event_type: HIGH_RISK_BLOCKED.to_string(),
            extension: utils::extension_of(filename),
        })
    }
}

/// 对一组分类记录做完整聚合
pub fn aggregate(records: &CategorizedRecords) -> AnalysisSnapshot {
    let mut aggregator = Aggregator::new();
    aggregator.ingest_all(records);
    let snapshot = aggregator.finish();
    tracing::debug!(
        access = records.access.len(),
        application = records.application.len(),
        error = records.error.len(),
        "聚合完成"
    );
    snapshot
}
