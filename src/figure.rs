// Chart descriptors handed to the dashboard frontend. Field names follow the
// plotly.js figure schema so the serialized JSON can be passed straight to
// `Plotly.newPlot`.

use serde::Serialize;
use serde_json::Value;

/// A single chart: traces plus layout, and animation frames for animated charts.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Frame>,
}

impl Figure {
    pub fn new(data: Vec<Trace>, layout: Layout) -> Self {
        Self {
            data,
            layout,
            frames: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Bar(BarTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Values {
    Years(Vec<i32>),
    Numbers(Vec<f64>),
    Labels(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Lines,
    Markers,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    pub x: Values,
    pub y: Values,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl ScatterTrace {
    /// A named line through (year, value) points.
    pub fn line(name: &str, years: Vec<i32>, values: Vec<f64>) -> Self {
        Self {
            x: Values::Years(years),
            y: Values::Numbers(values),
            mode: Mode::Lines,
            name: Some(name.to_string()),
            legendgroup: None,
            hovertext: None,
            ids: None,
            marker: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BarTrace {
    pub x: Values,
    pub y: Values,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub size: Vec<f64>,
    pub sizemode: SizeMode,
    pub sizeref: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMode {
    Area,
}

/// One animation step. `traces[i]` is the index in the figure's `data` that
/// `data[i]` updates.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub name: String,
    pub data: Vec<Trace>,
    pub traces: Vec<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    pub title: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sliders: Vec<Slider>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub updatemenus: Vec<Value>,
}

impl Layout {
    pub fn new(title: &str, xaxis: Axis, yaxis: Axis) -> Self {
        Self {
            title: title.to_string(),
            xaxis,
            yaxis,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Log,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Axis {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autotick: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick0: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtick: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<AxisType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

impl Axis {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Fixed tick spacing starting at `tick0`.
    pub fn with_ticks(mut self, tick0: f64, dtick: f64) -> Self {
        self.autotick = Some(false);
        self.tick0 = Some(tick0);
        self.dtick = Some(dtick);
        self
    }

    /// Fixed range in data units; log axes store the range as log10 of the bounds.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(match self.axis_type {
            Some(AxisType::Log) => [min.log10(), max.log10()],
            _ => [min, max],
        });
        self
    }

    pub fn log(mut self) -> Self {
        self.axis_type = Some(AxisType::Log);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Slider {
    pub active: usize,
    pub currentvalue: Value,
    pub steps: Vec<SliderStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SliderStep {
    pub label: String,
    pub method: String,
    pub args: Value,
}
