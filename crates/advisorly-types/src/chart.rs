//! Chart descriptor and rendering types for Advisorly.
//!
//! A chart descriptor arrives attached to an assistant turn (or from the
//! chart-generation endpoint) and names a chart type, an opaque data payload,
//! and optional rendering options. The dispatcher in `advisorly-core` maps a
//! descriptor onto a concrete [`ChartKind`] with merged options.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// The chart variants the client knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Doughnut,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Line => write!(f, "line"),
            ChartKind::Pie => write!(f, "pie"),
            ChartKind::Doughnut => write!(f, "doughnut"),
        }
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            "doughnut" => Ok(ChartKind::Doughnut),
            other => Err(format!("invalid chart kind: '{other}'")),
        }
    }
}

/// Structured chart payload attached to an assistant turn.
///
/// `data` is passed through opaquely to the renderer; the client never
/// validates its semantics. `chart_type` is matched case-insensitively,
/// and its absence means "no chart to render" rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    #[serde(rename = "chartType", default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

/// A resolved descriptor: the concrete variant to draw plus fully merged
/// options. Produced only by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub kind: ChartKind,
    pub data: serde_json::Value,
    pub options: serde_json::Value,
}

impl RenderPlan {
    /// The merged title text, if the options carry one.
    pub fn title(&self) -> Option<&str> {
        self.options
            .pointer("/plugins/title/text")
            .and_then(serde_json::Value::as_str)
    }
}

/// Request body for the remote chart-generation operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRequest {
    pub data_type: String,
    pub filters: serde_json::Value,
    pub chart_type: String,
}
