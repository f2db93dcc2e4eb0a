//! Layered Vega-Lite v5 specs for chart tables.
//!
//! Risk charts draw exposure bars with a red limit line on top. Stacked PnL
//! charts colour their bars by `PnL type` and draw any overlay series as
//! black stroke points. The shared x channel is the date.

use crate::chart::{Chart, ChartData, DATE_FIELD, Encoding, LIMIT_FIELD, PNL_FIELD};
use crate::export::ExportError;
use serde_json::{Value, json};

/// Vega-Lite schema the specs target.
pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

impl Chart {
    /// Compile the chart to a Vega-Lite v5 spec.
    pub fn to_vega_lite(&self) -> Result<Value, ExportError> {
        let encoding = &self.encoding;
        let layers = match &self.data {
            ChartData::RiskLimit { bars } => vec![
                json!({
                    "data": { "values": serde_json::to_value(bars)? },
                    "mark": { "type": "bar" },
                    "encoding": {
                        "y": y_channel(encoding),
                        "tooltip": serde_json::to_value(&encoding.tooltip)?,
                    },
                    "params": [zoom()],
                }),
                json!({
                    "data": { "values": serde_json::to_value(bars)? },
                    "mark": { "type": "line", "color": "red" },
                    "encoding": {
                        "y": { "field": LIMIT_FIELD, "type": "quantitative" },
                    },
                }),
            ],
            ChartData::Points(series) => vec![points_layer(
                serde_json::to_value(&series.points)?,
                Some(serde_json::to_value(&encoding.tooltip)?),
            )],
            ChartData::Stacked { bars, overlay } => {
                let mut layers = vec![json!({
                    "data": { "values": serde_json::to_value(bars)? },
                    "mark": { "type": "bar" },
                    "encoding": {
                        "y": y_channel(encoding),
                        "color": color_channel(encoding),
                        "tooltip": serde_json::to_value(&encoding.tooltip)?,
                    },
                    "params": [zoom()],
                })];
                if let Some(series) = overlay {
                    layers.push(points_layer(serde_json::to_value(&series.points)?, None));
                }
                layers
            }
        };

        Ok(json!({
            "$schema": VEGA_LITE_SCHEMA,
            "title": self.title,
            "encoding": { "x": x_channel(encoding) },
            "layer": layers,
        }))
    }
}

fn x_channel(encoding: &Encoding) -> Value {
    let mut axis = json!({ "format": "%Y-%m-%d", "labelAngle": -90 });
    if let Some(title) = &encoding.x_title {
        axis["title"] = json!(title);
    }
    json!({ "field": DATE_FIELD, "type": "temporal", "axis": axis })
}

fn y_channel(encoding: &Encoding) -> Value {
    json!({
        "field": encoding.y,
        "type": "quantitative",
        "axis": { "title": encoding.y_title },
    })
}

fn color_channel(encoding: &Encoding) -> Value {
    match &encoding.color {
        Some(field) => json!({
            "field": field,
            "type": "nominal",
            "legend": { "orient": "bottom" },
            "scale": { "scheme": "dark2" },
        }),
        None => Value::Null,
    }
}

fn points_layer(values: Value, tooltip: Option<Value>) -> Value {
    let mut layer = json!({
        "data": { "values": values },
        "mark": { "type": "point", "shape": "stroke", "size": 50, "color": "black", "opacity": 0.5 },
        "encoding": {
            "y": { "field": PNL_FIELD, "type": "quantitative" },
        },
    });
    if let Some(tooltip) = tooltip {
        layer["encoding"]["tooltip"] = tooltip;
    }
    layer
}

fn zoom() -> Value {
    json!({ "name": "zoom", "select": "interval", "bind": "scales" })
}
