//! HTML 报告渲染
//!
//! 生成两个页面：图表页面（图表数据以 JSON 内嵌，由 Plotly.js 在浏览器端绘制）
//! 和汇总报告页面（统计卡片 + 表格 + 内嵌图表页面）。渲染是纯函数，不做 IO。

use crate::config::ReportConfig;
use crate::report::assembler::{RankedEntry, ReportData};
use crate::report::chart::ChartPayload;
use chrono::NaiveDateTime;
use std::fmt::Write;

const PAGE_STYLE: &str = r#"
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 20px;
            background-color: #111827;
            color: #e5e7eb;
        }
        h1 { color: #ffffff; text-align: center; margin-bottom: 30px; font-size: 2.5rem; }
        h2 {
            color: #a3a3a3;
            margin-top: 20px;
            margin-bottom: 15px;
            font-size: 1.8rem;
            border-bottom: 1px solid #2d3748;
            padding-bottom: 10px;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin-bottom: 30px;
            background-color: #1f2937;
            border-radius: 8px;
            overflow: hidden;
            box-shadow: 0 4px 6px rgba(0, 0, 0, 0.3);
        }
        th, td { padding: 15px; text-align: left; border-bottom: 1px solid #2d3748; }
        th { background-color: #1e293b; color: #cbd5e1; }
        tr:hover { background-color: #2d3748; }
        iframe {
            width: 100%;
            height: 1000px;
            border: none;
            border-radius: 8px;
            box-shadow: 0 4px 6px rgba(0, 0, 0, 0.3);
        }
        .container { max-width: 1200px; margin: 0 auto; padding: 20px; }
        .header { text-align: center; margin-bottom: 40px; }
        .footer { text-align: center; margin-top: 40px; color: #6b7280; font-size: 14px; }
        .stats-grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 20px; margin-bottom: 30px; }
        .stat-card { background-color: #1f2937; padding: 20px; border-radius: 8px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.3); }
        .stat-title { font-size: 1.2rem; color: #a3a3a3; margin-bottom: 10px; }
        .stat-value { font-size: 2rem; color: #ffffff; font-weight: bold; }
        .home-button {
            display: inline-block;
            background-color: #3b82f6;
            color: #ffffff;
            padding: 10px 20px;
            border-radius: 8px;
            text-decoration: none;
            font-size: 16px;
            margin-bottom: 20px;
        }
        .home-button:hover { background-color: #2563eb; }
"#;

const CHART_SCRIPT: &str = r#"
        const payload = JSON.parse(document.getElementById('chart-data').textContent);
        const grid = document.getElementById('grid');
        const layoutBase = {
            template: 'plotly_dark',
            plot_bgcolor: '#111827',
            paper_bgcolor: '#111827',
            font: { color: 'white', family: 'Arial, sans-serif' },
            margin: { l: 40, r: 40, t: 60, b: 40 },
            showlegend: false,
            height: 380
        };
        payload.charts.forEach(function (chart) {
            const cell = document.createElement('div');
            cell.className = 'cell';
            grid.appendChild(cell);
            let trace;
            if (chart.kind === 'heatmap') {
                trace = { type: 'heatmap', x: chart.labels, y: ['Count'], z: [chart.values], colorscale: 'Viridis', showscale: false };
            } else if (chart.kind === 'pie') {
                trace = { type: 'pie', labels: chart.labels, values: chart.values };
            } else {
                trace = { type: 'bar', x: chart.labels, y: chart.values };
            }
            const layout = Object.assign({}, layoutBase, { title: { text: chart.title } });
            Plotly.newPlot(cell, [trace], layout, { responsive: true });
        });
"#;

/// 转义 HTML 特殊字符
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 超过 `width` 个字符的文本截断并追加 `...`
pub fn truncate_display(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let mut s: String = text.chars().take(width).collect();
        s.push_str("...");
        s
    } else {
        text.to_string()
    }
}

fn ranked_table(out: &mut String, key_header: &str, count_header: &str, rows: &[RankedEntry]) {
    let _ = write!(
        out,
        "<table><tr><th>{}</th><th>{}</th></tr>",
        escape_html(key_header),
        escape_html(count_header)
    );
    for row in rows {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(&row.key),
            row.count
        );
    }
    out.push_str("</table>");
}

fn stat_card(out: &mut String, title: &str, value: &str) {
    let _ = write!(
        out,
        r#"<div class="stat-card"><div class="stat-title">{}</div><div class="stat-value">{}</div></div>"#,
        escape_html(title),
        escape_html(value)
    );
}

/// 渲染汇总报告页面
pub fn render_report_page(
    report: &ReportData,
    config: &ReportConfig,
    generated_at: NaiveDateTime,
) -> String {
    let mut body = String::new();

    body.push_str(r#"<div class="stats-grid">"#);
    stat_card(&mut body, "总请求量", &report.total_requests.to_string());
    stat_card(&mut body, "平均响应时间", &report.average_response_time_display());
    stat_card(&mut body, "最大响应时间", &report.max_response_time_display());
    stat_card(&mut body, "最小响应时间", &report.min_response_time_display());
    body.push_str("</div>");

    let _ = write!(body, "<h2>TOP {}活跃用户</h2>", config.top_users);
    ranked_table(&mut body, "用户", "请求次数", &report.top_users);

    body.push_str("<h2>安全事件统计</h2>");
    body.push_str(
        "<table><tr><th>时间</th><th>用户</th><th>事件类型</th><th>文件名称</th></tr>",
    );
    for event in report.displayed_security_events() {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            event.timestamp.format("%Y-%m-%d %H:%M"),
            escape_html(&event.user),
            escape_html(&event.event_type),
            escape_html(&truncate_display(
                &event.filename,
                config.filename_display_width
            ))
        );
    }
    body.push_str("</table>");

    body.push_str("<h2>热门接口统计</h2>");
    ranked_table(&mut body, "接口路径", "调用次数", &report.top_handlers);

    body.push_str("<h2>文件类型统计</h2>");
    ranked_table(&mut body, "文件类型", "下载次数", &report.file_types);

    let _ = write!(body, "<h2>下载统计 (前{}文件)</h2>", config.top_downloads);
    ranked_table(&mut body, "文件名", "下载次数", &report.top_downloads);

    body.push_str("<h2>接口响应时间</h2>");
    body.push_str(
        "<table><tr><th>接口路径</th><th>调用次数</th><th>平均响应时间</th><th>最大响应时间</th></tr>",
    );
    for row in &report.interface_latencies {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{:.2}ms</td><td>{:.2}ms</td></tr>",
            escape_html(&row.path),
            row.calls,
            row.average_ms,
            row.max_ms
        );
    }
    body.push_str("</table>");

    let _ = write!(
        body,
        r#"<h2>完整分析图表</h2><iframe src="{}"></iframe>"#,
        escape_html(&config.chart_file)
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>综合日志分析报告 | 峰云共享</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>综合日志分析报告</h1>
            <a href="/" class="home-button">返回主页</a>
        </div>
        {body}
        <div class="footer">
            <p>生成时间: {generated}</p>
        </div>
    </div>
</body>
</html>
"#,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// 把 JSON 中的 `<`、`>`、`&` 换成 `\uXXXX` 转义，内嵌到 `<script>` 中时
/// 数据里的 `</script>`、`<!--` 都不会改变脚本块的边界
pub fn escape_json_for_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(c),
        }
    }
    out
}

/// 渲染图表页面
///
/// Plotly.js 从 `config.chart_script_src` 加载；默认指向 CDN，离线环境需要
/// 把脚本放到报告目录并修改该配置。
pub fn render_chart_page(
    charts: &ChartPayload,
    config: &ReportConfig,
) -> crate::error::Result<String> {
    let data = escape_json_for_script(&charts.to_json()?);
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <script src="{script_src}"></script>
    <style>
        body {{ margin: 0; padding: 20px; background-color: #111827; color: #ffffff; font-family: Arial, sans-serif; }}
        h1 {{ text-align: center; }}
        #grid {{ display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <div id="grid"></div>
    <script id="chart-data" type="application/json">{data}</script>
    <script>{CHART_SCRIPT}</script>
</body>
</html>
"#,
        title = escape_html(charts.title),
        script_src = escape_html(&config.chart_script_src),
    ))
}
