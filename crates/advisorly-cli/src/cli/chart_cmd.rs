//! Chart generation CLI command.
//!
//! Asks the backend to build a chart descriptor for a data type, then
//! resolves and draws it in the terminal -- the same dispatch path an
//! assistant-attached chart takes in the chat loop.

use anyhow::{Context, Result, bail};
use console::style;

use advisorly_core::api::AdvisorApi;
use advisorly_core::chart::resolve;
use advisorly_types::chart::ChartRequest;
use advisorly_types::error::ChartError;

use crate::state::AppState;

use super::chat::chart::render_plan;

/// Generate and render a chart.
pub async fn generate_chart(
    state: &AppState,
    data_type: &str,
    chart_type: &str,
    filters: &[String],
    json: bool,
) -> Result<()> {
    let request = ChartRequest {
        data_type: data_type.to_string(),
        filters: parse_filters(filters)?,
        chart_type: chart_type.to_string(),
    };

    let descriptor = state
        .conversation
        .api()
        .generate_chart(&request)
        .await
        .context("Failed to generate chart")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
        return Ok(());
    }

    match resolve(&descriptor) {
        Ok(Some(plan)) => {
            println!();
            print!("{}", render_plan(&plan));
            println!();
        }
        Ok(None) => {
            println!();
            println!("  {}", style("The backend returned no chart.").dim());
            println!();
        }
        Err(ChartError::UnsupportedType(chart_type)) => {
            println!();
            println!(
                "  {}",
                style(format!("Unsupported chart type: {chart_type}")).red()
            );
            println!();
        }
    }

    Ok(())
}

/// Parse `key=value` filter arguments into a JSON object.
fn parse_filters(filters: &[String]) -> Result<serde_json::Value> {
    let mut map = serde_json::Map::new();
    for filter in filters {
        let Some((key, value)) = filter.split_once('=') else {
            bail!("Invalid filter '{filter}': expected KEY=VALUE");
        };
        map.insert(
            key.trim().to_string(),
            serde_json::Value::String(value.trim().to_string()),
        );
    }
    Ok(serde_json::Value::Object(map))
}
