//! 错误处理系统的单元测试

#[cfg(test)]
mod error_tests {
    use peakcloud_log_analysis::error::{AnalysisError, Result};
    use std::error::Error;
    use std::io;

    #[test]
    fn test_io_error_from() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: AnalysisError = io_err.into();

        assert!(err.is_io_error());
        assert!(!err.is_line_error());
        assert!(!err.is_render_error());
        assert!(!err.is_config_error());
        assert!(!err.is_other_error());
    }

    #[test]
    fn test_regex_error_from() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: AnalysisError = regex_err.into();

        let display_str = format!("{}", err);
        assert!(display_str.contains("正则表达式错误"));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_toml_error_is_config_error() {
        let toml_err = toml::from_str::<toml::Table>("a = ").unwrap_err();
        let err: AnalysisError = toml_err.into();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("配置文件解析错误"));
    }

    #[test]
    fn test_timestamp_error_keeps_source() {
        let source = chrono::NaiveDateTime::parse_from_str("bad", "%Y-%m-%d %H:%M:%S")
            .unwrap_err();
        let err = AnalysisError::timestamp_error("bad", source);

        assert!(err.is_timestamp_error());
        assert!(err.is_line_error());
        assert!(err.source().is_some());
        assert!(err.to_string().contains("时间戳格式错误"));
    }

    #[test]
    fn test_render_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = AnalysisError::render_error("web/report.html", io_err);

        assert!(err.is_render_error());
        assert!(!err.is_io_error());
        let display = err.to_string();
        assert!(display.contains("web/report.html"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_other_error() {
        let err = AnalysisError::other("something odd");
        assert!(err.is_other_error());
        assert_eq!(err.to_string(), "未知错误: something odd");
    }

    #[test]
    fn test_result_question_mark() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.toml")?)
        }
        let err = read_missing().unwrap_err();
        assert!(err.is_io_error());
    }
}
