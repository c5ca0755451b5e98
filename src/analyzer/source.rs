//! 日志文件读取
//!
//! 按行读取文件字节，无效 UTF-8 以替换字符修复后继续，不中断读取。

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// 逐行读取文件，把去掉换行符后的每一行交给 `cb`，返回读取的行数。
///
/// # Errors
/// 文件打开或读取失败时返回 `io::Error`；读取中途失败时，
/// 之前的行已经交给了 `cb`。
pub fn for_each_line<P, C>(path: P, mut cb: C) -> io::Result<usize>
where
    P: AsRef<Path>,
    C: FnMut(&str),
{
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut count = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        count += 1;
        let line = line_bytes_to_str(&buf, count);
        cb(line.trim_end_matches(['\r', '\n']));
    }
    Ok(count)
}

/// 字节转字符串，有效 UTF-8 时不分配
fn line_bytes_to_str(line_bytes: &[u8], line_num: usize) -> Cow<'_, str> {
    match std::str::from_utf8(line_bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(e) => {
            tracing::warn!(line = line_num, error = %e, "发现无效 UTF-8 字节序列");
            String::from_utf8_lossy(line_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_lines_without_newlines() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "first\r\nsecond\nlast-without-newline").unwrap();

        let mut lines = Vec::new();
        let n = for_each_line(tmp.path(), |l| lines.push(l.to_string())).unwrap();
        assert_eq!(n, 3);
        assert_eq!(lines, vec!["first", "second", "last-without-newline"]);
    }

    #[test]
    fn test_invalid_utf8_is_repaired() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(b"ok\n\xff\xfebad\n").unwrap();

        let mut lines = Vec::new();
        for_each_line(tmp.path(), |l| lines.push(l.to_string())).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("bad"));
        assert!(lines[1].contains('\u{FFFD}'));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = for_each_line("definitely/not/here.log", |_| {}).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
