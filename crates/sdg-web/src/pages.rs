//! Server-rendered HTML pages.
//!
//! Charts arrive as finished SVG documents and are inlined as-is. Every other
//! piece of text is escaped before it reaches the markup.

use axum::http::StatusCode;
use sdg_data::Category;
use sdg_graphs::{ChartBundle, ChartKind, RenderedCharts};
use std::fmt::Write;

const STYLE: &str = "\
body{font-family:sans-serif;margin:0 auto;max-width:960px;padding:1rem;color:#222}\
header{border-bottom:1px solid #ddd;margin-bottom:1rem}\
form{display:grid;gap:.5rem;grid-template-columns:10rem 1fr;align-items:center}\
section.chart{margin:1.5rem 0}\
section.chart svg{max-width:100%;height:auto}\
.notice{background:#fff6e0;border:1px solid #f0c36d;padding:1rem}\
.error{background:#fde8e8;border:1px solid #e0a0a0;padding:1rem}";

/// Escapes `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn layout(title: &str, body: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><h1><a href=\"/\">{title}</a></h1></header>\n{body}\n</body>\n</html>\n"
    )
}

fn indicator_options(categories: &[Category], present: &[&str]) -> String {
    let mut html = String::new();
    let mut listed = Vec::new();

    for category in categories {
        let _ = write!(html, "<optgroup label=\"{}\">", escape_html(category.title));
        for entry in &category.indicators {
            listed.push(entry.code);
            let disabled = if present.contains(&entry.code) {
                ""
            } else {
                " disabled"
            };
            let _ = write!(
                html,
                "<option value=\"{code}\"{disabled}>{label}</option>",
                code = escape_html(entry.code),
                label = escape_html(entry.label),
            );
        }
        html.push_str("</optgroup>");
    }

    let others: Vec<&str> = present
        .iter()
        .copied()
        .filter(|code| !listed.contains(code))
        .collect();
    if !others.is_empty() {
        html.push_str("<optgroup label=\"Other indicators\">");
        for code in others {
            let code = escape_html(code);
            let _ = write!(html, "<option value=\"{code}\">{code}</option>");
        }
        html.push_str("</optgroup>");
    }

    html
}

fn datalist(id: &str, values: &[&str]) -> String {
    let mut html = format!("<datalist id=\"{id}\">");
    for value in values {
        let _ = write!(html, "<option value=\"{}\">", escape_html(value));
    }
    html.push_str("</datalist>");
    html
}

/// Values offered as suggestions in the index form.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormChoices<'a> {
    /// Indicator codes with rows in the table.
    pub present: &'a [&'a str],
    /// Entities with at least one value.
    pub entities: &'a [&'a str],
    /// Periods with at least one value, chronological.
    pub periods: &'a [&'a str],
}

/// Landing page with the indicator selection form.
///
/// Catalog indicators without rows in `choices.present` are listed but
/// disabled. Known entities and periods are offered as suggestions.
pub fn index_page(title: &str, categories: &[Category], choices: &FormChoices<'_>) -> String {
    let options = indicator_options(categories, choices.present);
    let entity_list = datalist("entity-options", choices.entities);
    let period_list = datalist("period-options", choices.periods);
    let body = format!(
        "<main>\n<p>Pick an SDG 08 indicator to chart it across Pacific Island countries \
         and territories.</p>\n\
         <form method=\"post\" action=\"/visualize\">\n\
         <label for=\"indicator\">Indicator</label>\n\
         <select id=\"indicator\" name=\"indicator\" required>{options}</select>\n\
         <label for=\"entities\">Countries</label>\n\
         <input id=\"entities\" name=\"entities\" list=\"entity-options\" \
         placeholder=\"all, or e.g. Fiji,Tonga\">\n\
         <label for=\"periods\">Periods</label>\n\
         <input id=\"periods\" name=\"periods\" list=\"period-options\" \
         placeholder=\"all, or e.g. 2019,2020\">\n\
         <span></span><button type=\"submit\">Visualize</button>\n\
         </form>\n{entity_list}\n{period_list}\n</main>"
    );
    layout(title, &body)
}

fn chart_section(heading: &str, svg: &str) -> String {
    format!(
        "<section class=\"chart\">\n<h3>{}</h3>\n{svg}\n</section>\n",
        escape_html(heading)
    )
}

const fn panel_heading(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Bar => "Total by country",
        ChartKind::Box => "Distribution by country",
        ChartKind::Line => "Trend over time",
        ChartKind::Heatmap => "Mean by country and period",
    }
}

/// Dashboard with every chart panel for one indicator.
///
/// `category` is the catalog category title, shown above the caption.
pub fn dashboard_page(
    title: &str,
    category: Option<&str>,
    caption: &str,
    bundle: &ChartBundle,
    charts: &RenderedCharts,
) -> String {
    let mut body = String::from("<main>\n");
    if let Some(category) = category {
        let _ = writeln!(body, "<p class=\"category\">{}</p>", escape_html(category));
    }
    let _ = writeln!(
        body,
        "<h2>{}</h2>\n<p>{} observations across {} countries and territories.</p>",
        escape_html(caption),
        bundle.rows,
        bundle.totals.len()
    );

    for (kind, svg) in charts.panels() {
        body.push_str(&chart_section(panel_heading(kind), svg));
    }
    body.push_str("</main>");

    layout(title, &body)
}

/// Page shown when the selection matched no rows.
pub fn no_data_page(title: &str, caption: &str) -> String {
    let body = format!(
        "<main>\n<h2>{}</h2>\n<div class=\"notice\">No data for this selection.</div>\n\
         <p><a href=\"/\">Choose another indicator</a></p>\n</main>",
        escape_html(caption)
    );
    layout(title, &body)
}

/// Page shown when a request fails.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<main>\n<div class=\"error\"><strong>{}</strong><p>{}</p></div>\n\
         <p><a href=\"/\">Back</a></p>\n</main>",
        status,
        escape_html(message)
    );
    layout("Error", &body)
}
