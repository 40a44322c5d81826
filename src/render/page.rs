//! HTML page assembly.

use super::{Block, ChartSpec, Section};
use crate::dashboard::Dashboard;
use crate::types::{AnalysisSummary, Interval, RsiZone, Tab, TrendDirection};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

/// Escape text for HTML element and attribute content.
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

/// Serialize JSON for inline `<script>` use.
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn zone_class(zone: RsiZone) -> &'static str {
    match zone {
        RsiZone::Overbought => "bearish",
        RsiZone::Oversold => "bullish",
        RsiZone::Neutral => "neutral",
    }
}

fn trend_class(trend: TrendDirection) -> &'static str {
    match trend {
        TrendDirection::Bullish => "bullish",
        TrendDirection::Bearish => "bearish",
    }
}

fn render_chart_block(spec: &ChartSpec, id: &str) -> String {
    format!(
        r#"<div class="chart" id="{id}" aria-label="{title}"></div>
<script>Plotly.newPlot("{id}", {data}, {layout}, {{responsive: true, displaylogo: false}});</script>"#,
        id = id,
        title = escape_html(&spec.title),
        data = script_json(&spec.data),
        layout = script_json(&spec.layout),
    )
}

fn render_analysis_block(summary: &AnalysisSummary) -> String {
    let s = &summary.snapshot;
    format!(
        r#"<div class="analysis">
<h3>{label} analysis</h3>
<div class="row"><span class="label">RSI (14)</span><span class="value">{rsi:.2}</span><span class="tag {rsi_class}">{rsi_label}</span></div>
<div class="row"><span class="label">MACD</span><span class="value">{macd:.4} / {signal:.4}</span><span class="tag {macd_class}">{macd_label}</span></div>
<div class="row"><span class="label">MA 20 / MA 50</span><span class="value">{ma20:.2} / {ma50:.2}</span><span class="tag {ma_class}">{ma_label}</span></div>
</div>"#,
        label = escape_html(&summary.label),
        rsi = s.rsi,
        rsi_class = zone_class(summary.rsi_zone),
        rsi_label = summary.rsi_zone.label(),
        macd = s.macd,
        signal = s.macd_signal,
        macd_class = trend_class(summary.macd_trend),
        macd_label = summary.macd_trend.label(),
        ma20 = s.ma20,
        ma50 = s.ma50,
        ma_class = trend_class(summary.ma_trend),
        ma_label = summary.ma_trend.label(),
    )
}

/// Render a section's blocks; `prefix` keeps chart element ids unique.
pub fn render_section(section: &Section, prefix: &str) -> String {
    let mut html = String::new();
    let mut charts = 0;

    for block in &section.blocks {
        let fragment = match block {
            Block::Notice { level, text } => format!(
                r#"<div class="notice {}">{}</div>"#,
                level.css_class(),
                escape_html(text)
            ),
            Block::Chart(spec) => {
                charts += 1;
                render_chart_block(spec, &format!("chart-{}-{}", prefix, charts))
            }
            Block::Analysis(summary) => render_analysis_block(summary),
            Block::Metric {
                label,
                value,
                caption,
            } => format!(
                r#"<div class="metric"><div class="label">{}</div><div class="metric-value">{}</div><div class="caption">{}</div></div>"#,
                escape_html(label),
                escape_html(value),
                escape_html(caption)
            ),
        };
        html.push_str(&fragment);
        html.push('\n');
    }

    html
}

fn render_interval_selector(current: Interval, tab: Tab) -> String {
    let options: String = Interval::ALL
        .iter()
        .map(|interval| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                interval.as_str(),
                if *interval == current { " selected" } else { "" },
                interval.label()
            )
        })
        .collect();

    format!(
        r#"<form class="controls" method="get" action="/">
<label for="interval">Interval</label>
<select id="interval" name="interval" onchange="this.form.submit()">{options}</select>
<input type="hidden" name="tab" value="{tab}">
<noscript><button type="submit">Apply</button></noscript>
</form>"#,
        options = options,
        tab = tab.slug(),
    )
}

fn render_tabs(dashboard: &Dashboard) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            format!(
                r#"<a class="tab{active}" data-tab="{slug}" href="/?interval={interval}&amp;tab={slug}">{label}</a>"#,
                active = if *tab == dashboard.active_tab { " active" } else { "" },
                slug = tab.slug(),
                interval = dashboard.interval.as_str(),
                label = escape_html(tab.label()),
            )
        })
        .collect()
}

fn render_panels(dashboard: &Dashboard) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            format!(
                r#"<section class="panel" id="panel-{slug}"{hidden}>
{body}</section>
"#,
                slug = tab.slug(),
                hidden = if *tab == dashboard.active_tab { "" } else { " hidden" },
                body = render_section(dashboard.section(*tab), tab.slug()),
            )
        })
        .collect()
}

/// Render the complete dashboard page.
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Tandem Market Dashboard</title>
    <script src="{plotly}"></script>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #131722;
            color: #d1d4dc;
            min-height: 100vh;
        }}
        .header {{
            padding: 12px 24px;
            background: #1e222d;
            border-bottom: 1px solid #2a2e39;
            display: flex;
            align-items: center;
            gap: 24px;
            flex-wrap: wrap;
        }}
        .header h1 {{ font-size: 18px; color: #00c853; font-weight: 600; }}
        .controls {{ display: flex; gap: 8px; align-items: center; font-size: 14px; }}
        select, button {{
            background: #2a2e39;
            border: 1px solid #363c4e;
            color: #d1d4dc;
            padding: 6px 10px;
            border-radius: 4px;
        }}
        .updated {{ color: #787b86; font-size: 12px; margin-left: auto; }}
        .tabs {{ display: flex; gap: 4px; padding: 12px 24px 0; border-bottom: 1px solid #2a2e39; }}
        .tab {{
            padding: 8px 16px;
            color: #787b86;
            text-decoration: none;
            border-bottom: 2px solid transparent;
        }}
        .tab.active {{ color: #d1d4dc; border-bottom-color: #00c853; }}
        .banner, .panel {{ padding: 16px 24px; }}
        .notice {{ padding: 10px 14px; border-radius: 4px; margin-bottom: 12px; font-size: 14px; }}
        .notice-info {{ background: rgba(33, 150, 243, 0.15); border-left: 3px solid #2196f3; }}
        .notice-warning {{ background: rgba(255, 152, 0, 0.15); border-left: 3px solid #ff9800; }}
        .notice-error {{ background: rgba(255, 82, 82, 0.15); border-left: 3px solid #ff5252; }}
        .chart {{ width: 100%; margin-bottom: 16px; }}
        .analysis, .metric {{
            background: #1e222d;
            border-radius: 8px;
            padding: 12px 16px;
            margin-bottom: 12px;
            max-width: 560px;
        }}
        .analysis h3 {{ font-size: 15px; margin-bottom: 8px; }}
        .row {{ display: flex; gap: 12px; align-items: center; margin: 6px 0; font-size: 14px; }}
        .row .label {{ color: #787b86; width: 120px; }}
        .row .value {{ flex: 1; }}
        .tag {{ padding: 2px 8px; border-radius: 10px; font-size: 12px; font-weight: 600; }}
        .bullish {{ background: rgba(0, 200, 83, 0.2); color: #00c853; }}
        .bearish {{ background: rgba(255, 82, 82, 0.2); color: #ff5252; }}
        .neutral {{ background: rgba(120, 123, 134, 0.2); color: #d1d4dc; }}
        .metric .label, .metric .caption {{ color: #787b86; font-size: 13px; }}
        .metric-value {{ font-size: 28px; font-weight: 600; margin: 4px 0; }}
    </style>
</head>
<body>
    <div class="header">
        <h1>Tandem</h1>
        {selector}
        <span class="updated">Updated {updated}</span>
    </div>
    <div class="banner">{banner}</div>
    <nav class="tabs">{tabs}</nav>
{panels}
    <script>
        document.querySelectorAll('.tab').forEach(function (link) {{
            link.addEventListener('click', function (event) {{
                event.preventDefault();
                var slug = link.dataset.tab;
                document.querySelectorAll('.tab').forEach(function (t) {{ t.classList.toggle('active', t === link); }});
                document.querySelectorAll('.panel').forEach(function (panel) {{
                    panel.hidden = panel.id !== 'panel-' + slug;
                    if (!panel.hidden) {{
                        panel.querySelectorAll('.chart').forEach(function (c) {{ Plotly.Plots.resize(c); }});
                    }}
                }});
                document.querySelector('input[name="tab"]').value = slug;
                history.replaceState(null, '', link.href);
            }});
        }});
    </script>
</body>
</html>"##,
        plotly = PLOTLY_CDN,
        selector = render_interval_selector(dashboard.interval, dashboard.active_tab),
        updated = dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        banner = render_section(&dashboard.banner, "banner"),
        tabs = render_tabs(dashboard),
        panels = render_panels(dashboard),
    )
}
