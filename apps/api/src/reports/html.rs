//! Renders assembled report data into a self-contained HTML page for printing.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::Value;

use crate::assessment::report::{ReportData, ReportField, ReportSection};

const KNOWN_COLORS: &[&str] = &["red", "yellow", "green", "blue", "gray"];

const STYLE: &str = r#"
@page { size: A4; margin: 20px; }
* { box-sizing: border-box; -webkit-print-color-adjust: exact; print-color-adjust: exact; }
body { font-family: 'Inter', 'Helvetica Neue', Arial, sans-serif; color: #111827; background: #f9fafb; margin: 0; padding: 32px; }
.report { max-width: 56rem; margin: 0 auto; background: #fff; border-radius: 8px; padding: 32px; }
.header { text-align: center; padding-bottom: 24px; margin-bottom: 32px; border-bottom: 2px solid #e5e7eb; }
.header h1 { font-size: 1.875rem; margin: 0 0 8px; }
.header p { margin: 4px 0; color: #4b5563; }
.header .generated { font-size: 0.875rem; color: #6b7280; }
.section { margin-bottom: 32px; page-break-inside: avoid; }
.section h2 { font-size: 1.25rem; color: #1f2937; padding-bottom: 8px; border-bottom: 2px solid #e5e7eb; }
.fields { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
.field { border: 1px solid #e5e7eb; border-radius: 8px; padding: 16px; }
.field-head { display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px; }
.field-label { font-weight: 500; color: #374151; }
.field-value { font-size: 1.5rem; font-weight: 700; }
.field-unit { font-size: 0.875rem; font-weight: 400; color: #6b7280; margin-left: 4px; }
.badge { padding: 2px 8px; border-radius: 9999px; font-size: 0.75rem; font-weight: 500; }
.badge-red { color: #dc2626; background: #fef2f2; }
.badge-yellow { color: #ca8a04; background: #fefce8; }
.badge-green { color: #16a34a; background: #f0fdf4; }
.badge-blue { color: #2563eb; background: #eff6ff; }
.badge-gray { color: #4b5563; background: #f9fafb; }
.footer { margin-top: 48px; padding-top: 24px; border-top: 1px solid #e5e7eb; text-align: center; font-size: 0.875rem; color: #6b7280; }
"#;

pub fn render_report_html(report: &ReportData) -> String {
    let title = encode_text(&report.assessment_name);
    let sections: String = report.sections.iter().map(render_section).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} - Report</title>
<style>{STYLE}</style>
</head>
<body>
<div class="report">
<div class="header">
<h1>{title}</h1>
<p>Session ID: {session}</p>
<p class="generated">Generated on: {generated}</p>
</div>
<div class="report-content">
{sections}</div>
<div class="footer"><p>Assessment Management System - Confidential Report</p></div>
</div>
</body>
</html>
"#,
        session = encode_text(&report.session_id),
        generated = report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

fn render_section(section: &ReportSection) -> String {
    let fields: String = section.fields.iter().map(render_field).collect();
    format!(
        "<div class=\"section\" id=\"{id}\">\n<h2>{title}</h2>\n<div class=\"fields\">\n{fields}</div>\n</div>\n",
        id = encode_double_quoted_attribute(&section.id),
        title = encode_text(&section.title),
    )
}

fn render_field(field: &ReportField) -> String {
    let badge = field
        .classification
        .as_ref()
        .map(|c| {
            format!(
                "<span class=\"badge {}\">{}</span>",
                badge_class(&c.color),
                encode_text(&c.label)
            )
        })
        .unwrap_or_default();

    let unit = if field.unit.is_empty() {
        String::new()
    } else {
        format!("<span class=\"field-unit\">{}</span>", encode_text(&field.unit))
    };

    format!(
        "<div class=\"field\">\n<div class=\"field-head\"><span class=\"field-label\">{label}</span>{badge}</div>\n<div class=\"field-value\">{value}{unit}</div>\n</div>\n",
        label = encode_text(&field.label),
        value = encode_text(&display_value(&field.value)),
    )
}

fn badge_class(color: &str) -> String {
    let color = if KNOWN_COLORS.contains(&color) { color } else { "gray" };
    format!("badge-{color}")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
