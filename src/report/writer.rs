//! 报告文件写入
//!
//! 每个文件先写入同目录下的临时文件，完整写入并刷新后再原子替换目标文件，
//! 写入失败时目标路径上不会留下不完整的内容。

use crate::config::ReportConfig;
use crate::error::{AnalysisError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 页面文件权限
#[cfg(unix)]
const PAGE_MODE: u32 = 0o644;

/// 写入后的报告文件路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub report: PathBuf,
    pub chart: PathBuf,
}

/// 报告文件写入器
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
    report_file: String,
    chart_file: String,
}

impl ArtifactWriter {
    pub fn new<P: Into<PathBuf>>(
        output_dir: P,
        report_file: &str,
        chart_file: &str,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            report_file: report_file.to_string(),
            chart_file: chart_file.to_string(),
        }
    }

    /// 使用报告配置中的目录和文件名
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(&config.output_dir, &config.report_file, &config.chart_file)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.chart_file)
    }

    /// 写入图表页面和汇总页面
    ///
    /// 两个页面都完整写入临时文件后才开始替换目标文件，写入阶段失败时
    /// 两个旧页面都保持不变。替换是两次独立的重命名，只有第二次重命名
    /// 本身失败时才会出现新图表页面配旧汇总页面的情况。
    ///
    /// # Errors
    /// 创建目录、写入或替换文件失败时返回 `AnalysisError::Render`
    pub fn write(&self, report_html: &str, chart_html: &str) -> Result<ArtifactPaths> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| AnalysisError::render_error(&self.output_dir, e))?;

        let chart = self.chart_path();
        let report = self.report_path();
        let staged_chart = stage(&chart, chart_html)?;
        let staged_report = stage(&report, report_html)?;
        commit(staged_chart, &chart)?;
        commit(staged_report, &report)?;

        tracing::info!(
            "分析报告已生成: {}, {}",
            report.display(),
            chart.display()
        );
        Ok(ArtifactPaths { report, chart })
    }
}

/// 先写临时文件再替换目标文件
pub fn write_atomic(target: &Path, content: &str) -> Result<()> {
    let staged = stage(target, content)?;
    commit(staged, target)
}

/// 在目标目录下写好临时文件；未提交的临时文件在丢弃时自动删除
fn stage(target: &Path, content: &str) -> Result<NamedTempFile> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| AnalysisError::render_error(target, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| AnalysisError::render_error(target, e))?;

    // 临时文件默认只有属主可读，页面需要能被 Web 服务读取
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(PAGE_MODE))
            .map_err(|e| AnalysisError::render_error(target, e))?;
    }

    Ok(tmp)
}

fn commit(staged: NamedTempFile, target: &Path) -> Result<()> {
    staged
        .persist(target)
        .map_err(|e| AnalysisError::render_error(target, e.error))?;
    tracing::debug!("已写入: {}", target.display());
    Ok(())
}
