//! 统计聚合的单元测试

#[cfg(test)]
mod aggregator_tests {
    use peakcloud_log_analysis::analysis::{
        AnalysisSnapshot, CategorizedRecords, aggregate,
    };
    use peakcloud_log_analysis::config::PatternConfig;
    use peakcloud_log_analysis::record::parser::LineParsers;
    use peakcloud_log_analysis::record::types::LogRecord;

    const ACCESS_LINES: &[&str] = &[
        r#"[2025-01-01 10:00:00] [10.0.0.1] [a1] "GET /download/file.pdf" 200 12.50ms "Mozilla/5.0""#,
        r#"[2025-01-01 10:30:00] [10.0.0.2] [a2] "GET /download/photo.JPG?token=1" 200 30ms "Mozilla/5.0" [user=alice path=/download]"#,
        r#"[2025-01-01 11:05:00] [10.0.0.1] [a3] "POST /upload" 500 120.25ms "curl/8" [user=bob path=/upload]"#,
        r#"[2025-01-01 23:59:59] [10.0.0.3] [a4] "GET /list?page=2" 404 1ms "curl/8""#,
    ];

    const APP_LINES: &[&str] = &[
        "[2025-01-01 09:00:00] [INFO ] [auth] [10.0.0.1] [b1] 用户 alice 登录成功 [path=/login method=POST]",
        "[2025-01-01 09:10:00] [INFO ] [files] [10.0.0.2] [b2] 用户 bob 下载文件 [path=/download]",
        "[2025-01-01 10:10:00] [WARNING] [auth] [10.0.0.2] [b3] 用户 alice 密码错误 [path=/login]",
        "[2025-01-01 10:20:00] [DEBUG] [files] [10.0.0.2] [b4] 缓存命中 [cache=hit]",
    ];

    const ERROR_LINES: &[&str] = &[
        "[2025-01-01 11:00:00] [ERROR] [upload] [10.0.0.2] [r9] 用户 ALICE 上传文件 virus.exe 失败: 高危文件类型 [path=/upload]",
        "[2025-01-01 11:30:00] [ERROR] [upload] [10.0.0.3] [r10] 用户 bob 上传文件 run.BAT 失败: 高危文件类型 [path=/upload]",
        "[2025-01-01 12:00:00] [ERROR] [storage] [10.0.0.3] [r11] 磁盘空间不足 [path=/upload]",
    ];

    fn parse_all(parsers: &LineParsers) -> CategorizedRecords {
        let mut records = CategorizedRecords::new();
        for line in ACCESS_LINES {
            if let Some(LogRecord::Access(r)) = parsers.access.parse(line).unwrap() {
                records.access.push(r);
            }
        }
        for line in APP_LINES {
            if let Some(LogRecord::Application(r)) =
                parsers.application.parse(line).unwrap()
            {
                records.application.push(r);
            }
        }
        for line in ERROR_LINES {
            if let Some(LogRecord::Error(r)) = parsers.error.parse(line).unwrap() {
                records.error.push(r);
            }
        }
        records
    }

    fn records() -> CategorizedRecords {
        let parsers = LineParsers::from_config(&PatternConfig::default()).unwrap();
        let records = parse_all(&parsers);
        assert_eq!(records.access.len(), 4);
        assert_eq!(records.application.len(), 4);
        assert_eq!(records.error.len(), 3);
        records
    }

    fn assert_counters_eq(a: &AnalysisSnapshot, b: &AnalysisSnapshot) {
        assert_eq!(a.time_distribution, b.time_distribution);
        assert_eq!(a.request_types, b.request_types);
        assert_eq!(a.status_codes, b.status_codes);
        assert_eq!(a.ip_activities, b.ip_activities);
        assert_eq!(a.log_levels, b.log_levels);
        assert_eq!(a.handlers, b.handlers);
        assert_eq!(a.user_actions, b.user_actions);
        assert_eq!(a.protocols, b.protocols);
        assert_eq!(a.file_types, b.file_types);
        assert_eq!(a.users, b.users);
        assert_eq!(a.download_stats, b.download_stats);
    }

    #[test]
    fn test_total_equals_record_count() {
        let records = records();
        let snapshot = aggregate(&records);
        assert_eq!(snapshot.time_distribution.total(), records.len() as u64);
        assert_eq!(snapshot.time_distribution.get(&10), 4);
        assert_eq!(snapshot.time_distribution.get(&11), 3);
        assert_eq!(snapshot.time_distribution.get(&23), 1);
    }

    #[test]
    fn test_access_dimensions() {
        let snapshot = aggregate(&records());
        assert_eq!(snapshot.request_types.get("GET"), 3);
        assert_eq!(snapshot.request_types.get("POST"), 1);
        assert_eq!(snapshot.status_codes.get(&200), 2);
        assert_eq!(snapshot.status_codes.get(&500), 1);
        assert_eq!(snapshot.status_codes.get(&404), 1);
        assert_eq!(snapshot.ip_activities.get("10.0.0.1"), 2);
        assert_eq!(snapshot.protocols.get("HTTP/1.1"), 4);
        assert_eq!(snapshot.protocols.len(), 1);
    }

    #[test]
    fn test_response_times_keep_arrival_order() {
        let snapshot = aggregate(&records());
        assert_eq!(snapshot.response_times, vec![12.5, 30.0, 120.25, 1.0]);
        // 接口路径不含查询参数
        let times = &snapshot.interface_response_times;
        assert_eq!(times.get("/list"), Some(&[1.0][..]));
        assert_eq!(times.get("/download/photo.JPG"), Some(&[30.0][..]));
        // 接口按首次出现顺序排列
        let paths: Vec<&str> = times.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/download/file.pdf", "/download/photo.JPG", "/upload", "/list"]
        );
    }

    #[test]
    fn test_downloads_and_file_types() {
        let snapshot = aggregate(&records());
        assert_eq!(snapshot.download_stats.get("file.pdf"), 1);
        assert_eq!(snapshot.download_stats.get("photo.JPG"), 1);
        assert_eq!(snapshot.download_stats.len(), 2);
        assert_eq!(snapshot.file_types.get("pdf"), 1);
        assert_eq!(snapshot.file_types.get("jpg"), 1);
    }

    #[test]
    fn test_users_only_from_application_log() {
        let snapshot = aggregate(&records());
        assert_eq!(snapshot.users.get("alice"), 2);
        assert_eq!(snapshot.users.get("bob"), 1);
        // 错误日志里的用户名不计入
        assert!(!snapshot.users.contains_key("ALICE"));
        assert_eq!(snapshot.users.total(), 3);
    }

    #[test]
    fn test_user_actions_from_access_context() {
        let snapshot = aggregate(&records());
        assert_eq!(snapshot.user_actions.len(), 2);
        assert_eq!(snapshot.user_actions["alice"].get("requests"), 1);
        assert_eq!(snapshot.user_actions["bob"].get("requests"), 1);
    }

    #[test]
    fn test_handlers_from_every_context() {
        let snapshot = aggregate(&records());
        assert_eq!(snapshot.handlers.get("/upload"), 4);
        assert_eq!(snapshot.handlers.get("/download"), 2);
        assert_eq!(snapshot.handlers.get("/login"), 2);
        assert!(!snapshot.handlers.contains_key("hit"));
    }

    #[test]
    fn test_log_levels_only_from_app_and_error() {
        let snapshot = aggregate(&records());
        assert_eq!(snapshot.log_levels.get("INFO"), 2);
        assert_eq!(snapshot.log_levels.get("WARNING"), 1);
        assert_eq!(snapshot.log_levels.get("DEBUG"), 1);
        assert_eq!(snapshot.log_levels.get("ERROR"), 3);
        assert_eq!(snapshot.log_levels.total(), 7);
    }

    #[test]
    fn test_security_events() {
        let snapshot = aggregate(&records());
        assert_eq!(snapshot.security_events.len(), 2);

        let first = &snapshot.security_events[0];
        assert_eq!(first.timestamp.to_string(), "2025-01-01 11:00:00");
        assert_eq!(first.user, "ALICE");
        assert_eq!(first.filename, "virus.exe");
        assert_eq!(first.event_type, "高危文件拦截");
        assert_eq!(first.extension, "exe");

        let second = &snapshot.security_events[1];
        assert_eq!(second.user, "bob");
        assert_eq!(second.extension, "bat");
    }

    #[test]
    fn test_counts_independent_of_order() {
        let records = records();
        let forward = aggregate(&records);

        let mut reversed = records.clone();
        reversed.access.reverse();
        reversed.application.reverse();
        reversed.error.reverse();
        let backward = aggregate(&reversed);

        assert_counters_eq(&forward, &backward);
        assert_eq!(forward.security_events.len(), backward.security_events.len());
    }

    #[test]
    fn test_each_run_starts_empty() {
        let records = records();
        let first = aggregate(&records);
        let second = aggregate(&records);
        assert_eq!(first, second);

        let empty = aggregate(&CategorizedRecords::new());
        assert!(empty.is_empty());
        assert_eq!(empty.time_distribution.total(), 0);
        assert!(empty.response_times.is_empty());
    }
}
