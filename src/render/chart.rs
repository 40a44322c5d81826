//! Plotly chart specifications.
//!
//! Charts are built server-side as Plotly `data`/`layout` JSON and drawn by
//! Plotly.js in the browser.

use super::{Block, Section};
use crate::types::{EnrichedSeries, NormalizedPoint};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

const MA20_COLOR: &str = "#2196f3";
const MA50_COLOR: &str = "#ff9800";
const BAND_LINE_COLOR: &str = "rgba(173, 181, 189, 0.6)";
const BAND_FILL_COLOR: &str = "rgba(173, 181, 189, 0.12)";
const COMPARISON_COLORS: [&str; 2] = ["#26a69a", "#ffd54f"];

/// A chart handed to the display surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub data: Value,
    pub layout: Value,
}

impl ChartSpec {
    /// Number of traces in the chart.
    pub fn trace_count(&self) -> usize {
        self.data.as_array().map_or(0, Vec::len)
    }

    /// Trace names in draw order.
    pub fn trace_names(&self) -> Vec<String> {
        self.data
            .as_array()
            .map(|traces| {
                traces
                    .iter()
                    .filter_map(|t| t["name"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn timestamp_label(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

fn layout(title: &str, height: u32) -> Value {
    json!({
        "title": { "text": title },
        "template": "plotly_dark",
        "height": height,
        "margin": { "l": 50, "r": 20, "t": 50, "b": 40 },
        "xaxis": { "rangeslider": { "visible": false } },
        "legend": { "orientation": "h", "y": -0.15 },
        "paper_bgcolor": "#131722",
        "plot_bgcolor": "#131722",
    })
}

fn line_trace(name: &str, x: &[String], y: Vec<f64>, color: &str) -> Value {
    json!({
        "type": "scatter",
        "mode": "lines",
        "name": name,
        "x": x,
        "y": y,
        "line": { "color": color, "width": 1.5 },
    })
}

/// Build the candlestick chart with moving averages and Bollinger band.
pub fn candlestick_chart(series: &EnrichedSeries, title: &str) -> ChartSpec {
    let points = &series.points;
    let x: Vec<String> = points.iter().map(|p| timestamp_label(p.bar.time)).collect();

    let candles = json!({
        "type": "candlestick",
        "name": title,
        "x": x,
        "open": points.iter().map(|p| p.bar.open).collect::<Vec<_>>(),
        "high": points.iter().map(|p| p.bar.high).collect::<Vec<_>>(),
        "low": points.iter().map(|p| p.bar.low).collect::<Vec<_>>(),
        "close": points.iter().map(|p| p.bar.close).collect::<Vec<_>>(),
        "increasing": { "line": { "color": "#00c853" } },
        "decreasing": { "line": { "color": "#ff5252" } },
    });

    let ma20 = line_trace("MA 20", &x, points.iter().map(|p| p.ma20).collect(), MA20_COLOR);
    let ma50 = line_trace("MA 50", &x, points.iter().map(|p| p.ma50).collect(), MA50_COLOR);

    let upper = json!({
        "type": "scatter",
        "mode": "lines",
        "name": "BB Upper",
        "x": x,
        "y": points.iter().map(|p| p.bb_upper).collect::<Vec<_>>(),
        "line": { "color": BAND_LINE_COLOR, "width": 1 },
    });

    // Lower band fills back to the upper band trace drawn just before it
    let lower = json!({
        "type": "scatter",
        "mode": "lines",
        "name": "BB Lower",
        "x": x,
        "y": points.iter().map(|p| p.bb_lower).collect::<Vec<_>>(),
        "line": { "color": BAND_LINE_COLOR, "width": 1 },
        "fill": "tonexty",
        "fillcolor": BAND_FILL_COLOR,
    });

    ChartSpec {
        title: title.to_string(),
        data: json!([candles, ma20, ma50, upper, lower]),
        layout: layout(title, 560),
    }
}

/// Add the composite price chart, or a "no data" notice for an empty series.
pub fn render_chart(series: &EnrichedSeries, title: &str, section: &mut Section) {
    if series.is_empty() {
        section.warning(format!("No data available for {}", title));
        return;
    }

    section.push(Block::Chart(candlestick_chart(series, title)));
}

/// Add an overlay of rebased series; skipped when every series is empty.
pub fn render_normalized_chart(
    series: &[(&str, Vec<NormalizedPoint>)],
    title: &str,
    section: &mut Section,
) {
    if series.iter().all(|(_, points)| points.is_empty()) {
        section.warning(format!("No data available for {}", title));
        return;
    }

    let traces: Vec<Value> = series
        .iter()
        .enumerate()
        .map(|(i, (name, points))| {
            let x: Vec<String> = points.iter().map(|p| timestamp_label(p.time)).collect();
            let color = COMPARISON_COLORS[i % COMPARISON_COLORS.len()];
            line_trace(name, &x, points.iter().map(|p| p.value).collect(), color)
        })
        .collect();

    let mut layout = layout(title, 480);
    layout["yaxis"] = json!({ "title": { "text": "Rebased (first bar = 100)" } });

    section.push(Block::Chart(ChartSpec {
        title: title.to_string(),
        data: Value::Array(traces),
        layout,
    }));
}
