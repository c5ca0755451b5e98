//! 分析入口的集成测试

#[cfg(test)]
mod analyzer_tests {
    use chrono::NaiveDate;
    use peakcloud_log_analysis::analyzer::{LogAnalyzer, run};
    use peakcloud_log_analysis::config::Config;
    use peakcloud_log_analysis::record::types::LogType;
    use peakcloud_log_analysis::report::ArtifactWriter;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const ACCESS_LOG: &str = concat!(
        r#"[2025-01-01 10:00:00] [10.0.0.1] [abc123] "GET /download/file.pdf" 200 12.50ms "Mozilla/5.0""#,
        "\n",
        "this line is noise\n",
        r#"[2025-01-01 10:05:00] [10.0.0.1] [abc124] "GET /download/file.pdf" 200 7.50ms "Mozilla/5.0""#,
        "\r\n",
        r#"[2025-99-01 10:05:00] [10.0.0.1] [abc125] "GET /x" 200 1ms "ua""#,
        "\n",
    );

    const APP_LOG: &str = "[2025-01-01 09:00:00] [INFO ] [auth] [10.0.0.1] [b1] 用户 alice 登录成功 [path=/login]\n";

    const ERROR_LOG: &str = "[2025-01-01 11:00:00] [ERROR] [upload] [10.0.0.2] [r9] 用户 ALICE 上传文件 virus.exe 失败: 高危文件类型 [path=/upload]\n";

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.sources.log_dir = dir.join("log").to_string_lossy().into_owned();
        config.report.output_dir = dir.join("web").to_string_lossy().into_owned();
        config
    }

    fn write_sources(config: &Config) {
        fs::create_dir_all(&config.sources.log_dir).unwrap();
        fs::write(config.sources.path_for(LogType::Access), ACCESS_LOG).unwrap();
        fs::write(config.sources.path_for(LogType::Application), APP_LOG).unwrap();
        fs::write(config.sources.path_for(LogType::Error), ERROR_LOG).unwrap();
    }

    #[test]
    fn test_feed_lines_counts() {
        let mut analyzer = LogAnalyzer::new(&Config::default()).unwrap();
        analyzer.feed_lines(LogType::Access, ACCESS_LOG.lines());

        let stats = analyzer.summary().get(LogType::Access);
        assert_eq!(stats.matched, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.total_lines(), 4);
        assert_eq!(analyzer.records().access.len(), 2);
        assert!(analyzer.records().application.is_empty());
    }

    #[test]
    fn test_scenario_single_download() {
        let mut analyzer = LogAnalyzer::new(&Config::default()).unwrap();
        analyzer.feed_line(
            LogType::Access,
            r#"[2025-01-01 10:00:00] [10.0.0.1] [abc123] "GET /download/file.pdf" 200 12.50ms "Mozilla/5.0""#,
        );
        let output = analyzer.analyze();

        assert_eq!(output.report.total_requests, 1);
        assert_eq!(output.report.average_response_time_display(), "12.50ms");
        assert_eq!(output.snapshot.download_stats.get("file.pdf"), 1);
        assert_eq!(output.snapshot.file_types.get("pdf"), 1);
        assert_eq!(output.report.top_downloads[0].key, "file.pdf");
    }

    #[test]
    fn test_missing_sources_are_empty_input() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(tmp.path());

        let mut analyzer = LogAnalyzer::new(&config).unwrap();
        analyzer.feed_sources(&config.sources);
        for log_type in LogType::ALL {
            assert!(analyzer.summary().get(log_type).source_missing);
        }

        let output = analyzer.analyze();
        assert_eq!(output.report.total_requests, 0);
        assert_eq!(output.report.min_response_time_display(), "0.00ms");
    }

    #[test]
    fn test_feed_sources_reads_all_three_logs() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(tmp.path());
        write_sources(&config);

        let mut analyzer = LogAnalyzer::new(&config).unwrap();
        analyzer.feed_sources(&config.sources);
        assert_eq!(analyzer.summary().total().matched, 4);
        assert_eq!(analyzer.summary().total().malformed, 1);

        let output = analyzer.analyze();
        assert_eq!(output.report.total_requests, 4);
        assert_eq!(output.report.top_users[0].key, "alice");
        assert_eq!(output.report.security_events.len(), 1);
        assert_eq!(output.report.security_events[0].user, "ALICE");
        assert_eq!(output.report.average_response_time_display(), "10.00ms");
    }

    #[test]
    fn test_write_artifacts() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(tmp.path());
        write_sources(&config);

        let mut analyzer = LogAnalyzer::new(&config).unwrap();
        analyzer.feed_sources(&config.sources);
        let output = analyzer.analyze();

        let generated_at = NaiveDate::from_ymd_opt(2025, 2, 3)
            .unwrap()
            .and_hms_opt(4, 5, 6)
            .unwrap();
        let writer = ArtifactWriter::from_config(&config.report);
        let paths = output.write_artifacts_at(&writer, generated_at).unwrap();

        assert_eq!(paths.report, writer.report_path());
        assert_eq!(paths.chart, writer.chart_path());

        let report = fs::read_to_string(&paths.report).unwrap();
        assert!(report.contains("生成时间: 2025-02-03 04:05:06"));
        assert!(report.contains("file.pdf"));
        assert!(report.contains("virus.exe"));

        let chart = fs::read_to_string(&paths.chart).unwrap();
        assert!(chart.contains("plotly"));
        assert!(chart.contains("\"security_events\""));
    }

    #[test]
    fn test_empty_run_still_writes_both_pages() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(tmp.path());

        let paths = run(&config).unwrap();
        assert!(paths.report.exists());
        assert!(paths.chart.exists());
        let report = fs::read_to_string(&paths.report).unwrap();
        assert!(report.contains("0.00ms"));
    }

    #[test]
    fn test_write_failure_is_render_error() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_in(tmp.path());
        // 输出目录位置被普通文件占用
        let blocker = tmp.path().join("blocked");
        fs::write(&blocker, "x").unwrap();
        config.report.output_dir = blocker.to_string_lossy().into_owned();

        let err = run(&config).unwrap_err();
        assert!(err.is_render_error());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut config = Config::default();
        config.patterns.access = r"^(?P<timestamp>\S+)".to_string();
        let err = LogAnalyzer::new(&config).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_hostile_login_name_keeps_chart_page_intact() {
        let mut analyzer = LogAnalyzer::new(&Config::default()).unwrap();
        analyzer.feed_line(
            LogType::Application,
            "[2025-01-01 09:00:00] [WARNING] [auth] [10.0.0.9] [b7] 用户 <!--<script> 登录失败 [path=/login]",
        );
        let output = analyzer.analyze();
        assert_eq!(output.snapshot.users.get("<!--<script>"), 1);

        let page = output.render_chart_page().unwrap();
        let open = r#"<script id="chart-data" type="application/json">"#;
        let start = page.find(open).unwrap() + open.len();
        let end = start + page[start..].find("</script>").unwrap();
        let data = &page[start..end];
        assert!(!data.contains("<!--"));
        assert!(!data.contains("<script"));
        // 绘图脚本没有被数据块吞掉
        assert!(page[end..].contains("Plotly.newPlot"));
    }
}
