//! Page shell shared by every view.

use super::Tab;
use crate::widgets::escape;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f9fafb;color:#111827}\
header{background:#1f2937;color:#fff;padding:12px 24px}\
header h1{margin:0;font-size:20px}\
nav{display:flex;gap:4px;padding:0 24px;background:#374151}\
nav a{color:#d1d5db;padding:10px 14px;text-decoration:none}\
nav a.active{color:#fbbf24;font-weight:bold;border-bottom:2px solid #fbbf24}\
main{padding:16px 24px;max-width:1100px}\
.banner{background:#fef3c7;border:1px solid #f59e0b;padding:10px 14px;margin-bottom:16px}\
.notice{background:#eff6ff;border:1px solid #93c5fd;padding:10px 14px;margin:12px 0}\
.cards{display:flex;gap:12px;flex-wrap:wrap;margin-bottom:16px}\
.card{background:#fff;border:1px solid #e5e7eb;padding:12px 16px;min-width:160px}\
.card .label{color:#6b7280;font-size:12px}.card .value{font-size:22px;font-weight:bold}\
.chart{background:#fff;border:1px solid #e5e7eb;padding:8px 12px;margin-bottom:16px}\
.chart h3{margin:4px 0}.empty{color:#6b7280}\
table{border-collapse:collapse;background:#fff;margin-bottom:16px}\
th,td{border:1px solid #e5e7eb;padding:4px 10px;text-align:right}\
th:first-child,td:first-child{text-align:left}\
caption{text-align:left;font-weight:bold;padding:4px 0}\
form.controls{margin-bottom:12px}";

/// Wrap a view body in the dashboard page.
pub fn page(active: Tab, banner: Option<&str>, body: &str) -> String {
    let nav: String = Tab::all()
        .iter()
        .map(|tab| {
            let class = if *tab == active { " class=\"active\"" } else { "" };
            format!("<a href=\"{}\"{}>{}</a>", tab.path(), class, tab.name())
        })
        .collect();

    let banner = banner
        .map(|text| format!("<div class=\"banner\">{}</div>", escape(text)))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{} - Business Insight</title><style>{STYLE}</style></head>\
         <body><header><h1>Business Insight Dashboard</h1></header>\
         <nav>{nav}</nav><main>{banner}{body}</main></body></html>",
        active.name()
    )
}
