//! Drop-zone classification command.

use std::path::Path;

use panelgrid_core::drag_drop::{DropAction, DropZone, Point, Rect, Size, classify_drop_zone_with, preview_rect};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::load_settings;

#[derive(Serialize)]
struct Classification {
    zone: DropZone,
    action: String,
    edge_band: i32,
    center_band: i32,
    preview: Option<Rect>,
}

/// Classify command handler
pub fn cmd_classify(
    config_path: Option<&Path>,
    width: i32,
    height: i32,
    x: i32,
    y: i32,
    format: OutputFormat,
) -> Result<(), CliError> {
    if width <= 0 || height <= 0 {
        return Err(CliError::InvalidArgument(format!(
            "group size must be positive, got {width}x{height}"
        )));
    }

    let settings = load_settings(config_path)?;
    let metrics = settings.drop_zones;
    let size = Size::new(width, height);
    let zone = classify_drop_zone_with(&metrics, size, Point::new(x, y));

    let result = Classification {
        zone,
        action: describe_action(zone.action()),
        edge_band: metrics.edge(size),
        center_band: metrics.center(size),
        preview: preview_rect(size, zone),
    };

    match format {
        OutputFormat::Text => {
            println!("Zone:   {}", result.zone);
            println!("Action: {}", result.action);
            println!("Bands:  edge {}px, center {}px", result.edge_band, result.center_band);
            if let Some(rect) = result.preview {
                println!(
                    "Preview: {}x{} at ({}, {})",
                    rect.width, rect.height, rect.x, rect.y
                );
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CliError::Serialize(format!("Failed to serialize: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

fn describe_action(action: DropAction) -> String {
    match action {
        DropAction::Ignore => "ignore".to_string(),
        DropAction::AddTab => "add tab".to_string(),
        DropAction::Split(zone) => format!("split {zone}"),
    }
}
