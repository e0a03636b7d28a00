//! Chart dispatch: descriptor -> render plan.
//!
//! Pure, type-directed mapping from a [`ChartDescriptor`] to the renderer
//! variant plus merged options. No drawing happens here; a [`RenderPlan`]
//! is handed to whatever renderer the caller uses.

use serde_json::{Value, json};

use advisorly_types::chart::{ChartDescriptor, ChartKind, RenderPlan};
use advisorly_types::error::ChartError;

/// Fallback title text when the descriptor does not name one.
const DEFAULT_TITLE: &str = "Chart";

/// Resolve a descriptor to a render plan.
///
/// - `Ok(None)`: the descriptor carries no chart type -- nothing to render.
/// - `Ok(Some(plan))`: a recognized type (matched case-insensitively) with
///   merged options.
/// - `Err(UnsupportedType)`: an unrecognized type, carrying the original
///   non-normalized string for diagnostic display.
pub fn resolve(descriptor: &ChartDescriptor) -> Result<Option<RenderPlan>, ChartError> {
    let Some(chart_type) = descriptor.chart_type.as_deref() else {
        return Ok(None);
    };

    let kind: ChartKind = chart_type
        .parse()
        .map_err(|_| ChartError::UnsupportedType(chart_type.to_string()))?;

    Ok(Some(RenderPlan {
        kind,
        data: descriptor.data.clone(),
        options: merged_options(descriptor.options.as_ref()),
    }))
}

/// Merge descriptor options over the fixed defaults.
///
/// Defaults: responsive sizing, aspect ratio kept, legend visible at top,
/// title visible with the descriptor's `plugins.title.text` (else "Chart").
/// The descriptor's top-level option keys then shallow-overlay the defaults;
/// an absent `options` leaves them untouched.
fn merged_options(options: Option<&Value>) -> Value {
    let title_text = options
        .and_then(|o| o.pointer("/plugins/title/text"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_TITLE);

    let mut merged = json!({
        "responsive": true,
        "maintainAspectRatio": true,
        "plugins": {
            "legend": {
                "display": true,
                "position": "top",
            },
            "title": {
                "display": true,
                "text": title_text,
            },
        },
    });

    if let (Some(base), Some(Value::Object(overrides))) = (merged.as_object_mut(), options) {
        for (key, value) in overrides {
            base.insert(key.clone(), value.clone());
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(chart_type: Option<&str>, options: Option<Value>) -> ChartDescriptor {
        ChartDescriptor {
            chart_type: chart_type.map(str::to_string),
            data: json!({"labels": ["Checking", "Savings"], "datasets": []}),
            options,
        }
    }

    #[test]
    fn test_bar_with_empty_options_gets_default_title() {
        let plan = resolve(&descriptor(Some("Bar"), Some(json!({}))))
            .unwrap()
            .unwrap();
        assert_eq!(plan.kind, ChartKind::Bar);
        assert_eq!(plan.title(), Some("Chart"));
    }

    #[test]
    fn test_doughnut_keeps_declared_title() {
        let options = json!({"plugins": {"title": {"text": "Revenue"}}});
        let plan = resolve(&descriptor(Some("doughnut"), Some(options)))
            .unwrap()
            .unwrap();
        assert_eq!(plan.kind, ChartKind::Doughnut);
        assert_eq!(plan.title(), Some("Revenue"));
    }

    #[test]
    fn test_unsupported_type_carries_original_string() {
        let err = resolve(&descriptor(Some("scatter"), None)).unwrap_err();
        assert_eq!(err, ChartError::UnsupportedType("scatter".to_string()));

        // Case is preserved in the diagnostic even though matching folds it.
        let err = resolve(&descriptor(Some("Radar"), None)).unwrap_err();
        assert_eq!(err, ChartError::UnsupportedType("Radar".to_string()));
    }

    #[test]
    fn test_missing_type_means_no_chart() {
        assert_eq!(resolve(&descriptor(None, None)).unwrap(), None);
    }

    #[test]
    fn test_type_matching_is_case_insensitive() {
        for raw in ["LINE", "Line", "line"] {
            let plan = resolve(&descriptor(Some(raw), None)).unwrap().unwrap();
            assert_eq!(plan.kind, ChartKind::Line);
        }
    }

    #[test]
    fn test_absent_options_leave_defaults_standing() {
        let plan = resolve(&descriptor(Some("pie"), None)).unwrap().unwrap();
        assert_eq!(plan.options["responsive"], json!(true));
        assert_eq!(plan.options["maintainAspectRatio"], json!(true));
        assert_eq!(plan.options["plugins"]["legend"]["display"], json!(true));
        assert_eq!(plan.options["plugins"]["legend"]["position"], json!("top"));
        assert_eq!(plan.options["plugins"]["title"]["display"], json!(true));
        assert_eq!(plan.options["plugins"]["title"]["text"], json!("Chart"));
    }

    #[test]
    fn test_overlay_is_shallow() {
        // A top-level key from the descriptor replaces the default wholesale.
        let options = json!({
            "responsive": false,
            "scales": {"y": {"beginAtZero": true}},
        });
        let plan = resolve(&descriptor(Some("bar"), Some(options)))
            .unwrap()
            .unwrap();
        assert_eq!(plan.options["responsive"], json!(false));
        assert_eq!(plan.options["scales"]["y"]["beginAtZero"], json!(true));
        // Untouched defaults remain.
        assert_eq!(plan.options["plugins"]["legend"]["position"], json!("top"));
    }

    #[test]
    fn test_data_passes_through_opaquely() {
        let payload = json!({"labels": ["Jan"], "datasets": [{"data": [1.5]}]});
        let descriptor = ChartDescriptor {
            chart_type: Some("line".to_string()),
            data: payload.clone(),
            options: None,
        };
        let plan = resolve(&descriptor).unwrap().unwrap();
        assert_eq!(plan.data, payload);
    }
}
