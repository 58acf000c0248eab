// Chart option builders - declarative configuration for the rendering engine
use crate::domain::chart_data::{Comparison, CompositionSlice, TimeSeriesPayload};
use crate::domain::growth::{GrowthResult, format_growth};
use serde_json::{Value, json};

const TREND_COLOR: &str = "#3498db";
const CURRENT_BAR_COLOR: &str = "#e67e22";
const PRIOR_BAR_COLOR: &str = "#95a5a6";

/// Line chart of the real-time load. Empty payloads give an empty axis.
pub fn trend_option(payload: &TimeSeriesPayload) -> Value {
    json!({
        "tooltip": {
            "trigger": "axis",
            "axisPointer": { "type": "cross" }
        },
        "grid": {
            "left": "3%",
            "right": "4%",
            "bottom": "3%",
            "containLabel": true
        },
        "xAxis": {
            "type": "category",
            "boundaryGap": false,
            "data": payload.time,
            "axisLine": { "lineStyle": { "color": "#999" } }
        },
        "yAxis": {
            "type": "value",
            "name": "功率 (kW)",
            "axisLine": { "show": false },
            "axisTick": { "show": false },
            "splitLine": { "lineStyle": { "type": "dashed" } }
        },
        "series": [{
            "name": "实时负荷",
            "type": "line",
            "smooth": true,
            "symbol": "none",
            "sampling": "lttb",
            "itemStyle": { "color": TREND_COLOR },
            "areaStyle": {
                "color": {
                    "type": "linear",
                    "x": 0, "y": 0, "x2": 0, "y2": 1,
                    "colorStops": [
                        { "offset": 0, "color": "rgba(52, 152, 219, 0.5)" },
                        { "offset": 1, "color": "rgba(52, 152, 219, 0.05)" }
                    ]
                }
            },
            "data": payload.value
        }]
    })
}

/// Ring chart; percentages are left to the engine's `{d}` formatter.
pub fn composition_option(slices: &[CompositionSlice]) -> Value {
    let data: Vec<Value> = slices
        .iter()
        .map(|s| {
            json!({
                "value": s.value,
                "name": s.name,
                "itemStyle": { "color": s.color }
            })
        })
        .collect();

    json!({
        "tooltip": {
            "trigger": "item",
            "formatter": "{b}: {c} ({d}%)"
        },
        "legend": {
            "bottom": "0%",
            "left": "center"
        },
        "series": [{
            "name": "能耗分布",
            "type": "pie",
            "radius": ["45%", "70%"],
            "avoidLabelOverlap": false,
            "itemStyle": {
                "borderRadius": 5,
                "borderColor": "#fff",
                "borderWidth": 2
            },
            "label": { "show": false, "position": "center" },
            "emphasis": {
                "label": { "show": true, "fontSize": "18", "fontWeight": "bold" }
            },
            "labelLine": { "show": false },
            "data": data
        }]
    })
}

pub fn growth_label(growth: &GrowthResult) -> String {
    format!(
        "period-over-period: {}% | year-over-year: {}%",
        format_growth(growth.period_growth_pct),
        format_growth(growth.year_growth_pct)
    )
}

fn current_bar_tooltip(comparison: &Comparison, growth: &GrowthResult) -> String {
    format!(
        "{}: {}<br/>vs {}: {}%<br/>vs {}: {}%",
        comparison.labels[0],
        comparison.current,
        comparison.labels[1],
        format_growth(growth.period_growth_pct),
        comparison.labels[2],
        format_growth(growth.year_growth_pct)
    )
}

/// Bar chart with the current period emphasized and annotated with both growth rates.
pub fn comparison_option(comparison: &Comparison, growth: &GrowthResult) -> Value {
    let data: Vec<Value> = comparison
        .values()
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            if idx == 0 {
                json!({
                    "value": value,
                    "itemStyle": { "color": CURRENT_BAR_COLOR },
                    "tooltip": { "formatter": current_bar_tooltip(comparison, growth) }
                })
            } else {
                json!({
                    "value": value,
                    "itemStyle": { "color": PRIOR_BAR_COLOR }
                })
            }
        })
        .collect();

    json!({
        "tooltip": { "trigger": "item" },
        "grid": {
            "left": "3%",
            "right": "4%",
            "bottom": "3%",
            "containLabel": true
        },
        "xAxis": {
            "type": "category",
            "data": comparison.labels
        },
        "yAxis": {
            "type": "value",
            "name": "用电量 (kWh)",
            "splitLine": { "lineStyle": { "type": "dashed" } }
        },
        "series": [{
            "name": "用电对比",
            "type": "bar",
            "barWidth": "40%",
            "data": data,
            "markPoint": {
                "symbol": "pin",
                "data": [{
                    "coord": [0, comparison.current],
                    "value": comparison.current,
                    "label": { "formatter": growth_label(growth) }
                }]
            }
        }]
    })
}
