//! 从日志正文和路径中提取信息的工具函数

use lazy_static::lazy_static;
use regex::Regex;

/// 正文中用户名前的标记
pub const USER_TOKEN: &str = "用户";

/// 高危文件拦截消息的标记
pub const HIGH_RISK_MARKER: &str = "高危文件类型";

/// 没有扩展名时使用的键
pub const UNKNOWN_EXTENSION: &str = "unknown";

lazy_static! {
    static ref USER_RE: Regex = Regex::new(r"用户 (.*?) ").unwrap();
    static ref UPLOAD_FAILED_RE: Regex =
        Regex::new(r"上传文件 (.*?) 失败").unwrap();
}

/// 从正文中提取用户名：`用户` 之后、下一个空格之前的内容。
///
/// 规则与日志措辞绑定，正文措辞变化时会少计，这里不做放宽。
#[must_use]
pub fn extract_username(message: &str) -> Option<&str> {
    if !message.contains(USER_TOKEN) {
        return None;
    }
    USER_RE
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 从 `上传文件 <文件名> 失败` 中提取文件名
#[must_use]
pub fn extract_upload_failure(message: &str) -> Option<&str> {
    UPLOAD_FAILED_RE
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 去掉路径中的查询串
#[must_use]
pub fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(head, _)| head)
}

/// 路径最后一段（文件名）
#[must_use]
pub fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// 文件扩展名，统一转为小写；没有 `.` 或扩展名为空时返回 `unknown`
#[must_use]
pub fn extension_of(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
        _ => UNKNOWN_EXTENSION.to_string(),
    }
}

/// 是否为下载请求路径
#[must_use]
pub fn is_download_path(path: &str) -> bool {
    path.contains("download")
}
