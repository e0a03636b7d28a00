//! Terminal chart drawing for resolved render plans.
//!
//! Draws the four supported variants with unicode bars and sparklines.
//! The data payload follows the backend's dataset shape (labels plus one
//! or more datasets); anything missing degrades to an empty drawing, never
//! an error -- chart semantics are not validated client-side.

use serde::Deserialize;
use serde_json::Value;

use advisorly_types::chart::{ChartKind, RenderPlan};

/// Maximum bar width in terminal cells.
const MAX_BAR_WIDTH: usize = 40;

/// Sparkline glyphs from lowest to highest.
const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Default, Deserialize)]
struct ChartData {
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    datasets: Vec<Dataset>,
}

#[derive(Debug, Default, Deserialize)]
struct Dataset {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    data: Vec<f64>,
}

/// Render a resolved plan as terminal text.
pub fn render_plan(plan: &RenderPlan) -> String {
    let data: ChartData = serde_json::from_value(plan.data.clone()).unwrap_or_default();
    let legend = plan
        .options
        .pointer("/plugins/legend/display")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    let title = plan
        .options
        .pointer("/plugins/title/display")
        .and_then(Value::as_bool)
        .unwrap_or(true)
        .then(|| plan.title())
        .flatten();

    let mut out = String::new();
    if let Some(title) = title {
        out.push_str(&format!("  {title}\n"));
    }

    match plan.kind {
        ChartKind::Bar => render_bars(&mut out, &data, legend),
        ChartKind::Line => render_sparklines(&mut out, &data, legend),
        ChartKind::Pie | ChartKind::Doughnut => render_shares(&mut out, &data, legend),
    }

    out
}

/// Horizontal bars, one per label, scaled to the largest value.
fn render_bars(out: &mut String, data: &ChartData, legend: bool) {
    for dataset in &data.datasets {
        if legend {
            if let Some(label) = &dataset.label {
                out.push_str(&format!("  [{label}]\n"));
            }
        }
        let max = dataset.data.iter().cloned().fold(0.0_f64, f64::max);
        let width = label_column_width(&data.labels);
        for (label, value) in data.labels.iter().zip(&dataset.data) {
            let bar_len = scaled_width(*value, max);
            out.push_str(&format!(
                "  {label:<width$}  {} {}\n",
                "█".repeat(bar_len),
                format_balance(*value),
            ));
        }
    }
}

/// One sparkline row per dataset, with the value range beneath.
fn render_sparklines(out: &mut String, data: &ChartData, legend: bool) {
    for dataset in &data.datasets {
        if dataset.data.is_empty() {
            continue;
        }
        if legend {
            if let Some(label) = &dataset.label {
                out.push_str(&format!("  [{label}]\n"));
            }
        }
        let min = dataset.data.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = dataset.data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        let mut line = String::from("  ");
        for value in &dataset.data {
            let level = if span <= f64::EPSILON {
                SPARKS.len() / 2
            } else {
                (((value - min) / span) * (SPARKS.len() - 1) as f64).round() as usize
            };
            line.push(SPARKS[level.min(SPARKS.len() - 1)]);
        }
        out.push_str(&line);
        out.push('\n');

        let first = data.labels.first().map(String::as_str).unwrap_or("");
        let last = data.labels.last().map(String::as_str).unwrap_or("");
        out.push_str(&format!(
            "  {first} .. {last}  ({} .. {})\n",
            format_balance(min),
            format_balance(max),
        ));
    }
}

/// Proportional shares with percentages, for pie and doughnut variants.
fn render_shares(out: &mut String, data: &ChartData, legend: bool) {
    for dataset in &data.datasets {
        if legend {
            if let Some(label) = &dataset.label {
                out.push_str(&format!("  [{label}]\n"));
            }
        }
        let total: f64 = dataset.data.iter().sum();
        if total <= 0.0 {
            continue;
        }
        let width = label_column_width(&data.labels);
        for (label, value) in data.labels.iter().zip(&dataset.data) {
            let share = value / total;
            let bar_len = (share * MAX_BAR_WIDTH as f64).round() as usize;
            out.push_str(&format!(
                "  {label:<width$}  {} {} ({:.1}%)\n",
                "█".repeat(bar_len),
                format_balance(*value),
                share * 100.0,
            ));
        }
    }
}

fn label_column_width(labels: &[String]) -> usize {
    labels.iter().map(|l| l.chars().count()).max().unwrap_or(0)
}

fn scaled_width(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * MAX_BAR_WIDTH as f64).round() as usize
}

/// Format a value with thousands separators; two decimals when fractional.
pub fn format_balance(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        group_thousands(&format!("{value:.0}"))
    } else {
        group_thousands(&format!("{value:.2}"))
    }
}

fn group_thousands(raw: &str) -> String {
    let (number, fraction) = match raw.split_once('.') {
        Some((n, f)) => (n, Some(f)),
        None => (raw, None),
    };
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
