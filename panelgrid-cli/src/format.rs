//! Output formatting for layout runs.

use std::fmt;

use panelgrid_core::layout::{ContentId, GroupId, LayoutEvent, LayoutSnapshot, WindowId};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// A layout event with content handles replaced by script names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord {
    PanelDetached {
        panel: String,
        window: WindowId,
    },
    PanelMoveCompleted {
        panel: String,
        source_group: Option<GroupId>,
        target_group: GroupId,
    },
    PanelPinToggled {
        panel: String,
        pinned: bool,
    },
    LayoutReset,
}

impl EventRecord {
    /// Converts `event`, naming content through `name_of`.
    pub fn from_event(event: &LayoutEvent, name_of: impl Fn(ContentId) -> String) -> Self {
        match event {
            LayoutEvent::PanelDetached {
                content, window, ..
            } => Self::PanelDetached {
                panel: name_of(*content),
                window: *window,
            },
            LayoutEvent::PanelMoveCompleted {
                content,
                source_group,
                target_group,
            } => Self::PanelMoveCompleted {
                panel: name_of(*content),
                source_group: *source_group,
                target_group: *target_group,
            },
            LayoutEvent::PanelPinToggled { content, pinned } => Self::PanelPinToggled {
                panel: name_of(*content),
                pinned: *pinned,
            },
            LayoutEvent::LayoutReset => Self::LayoutReset,
        }
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PanelDetached { panel, .. } => write!(f, "detached {panel:?}"),
            Self::PanelMoveCompleted {
                panel,
                source_group,
                ..
            } => {
                let from = if source_group.is_some() { "group" } else { "window" };
                write!(f, "moved {panel:?} from {from}")
            }
            Self::PanelPinToggled { panel, pinned } => {
                let verb = if *pinned { "pinned" } else { "unpinned" };
                write!(f, "{verb} {panel:?}")
            }
            Self::LayoutReset => f.write_str("layout reset"),
        }
    }
}

#[derive(Serialize)]
struct RunReport<'a> {
    layout: &'a LayoutSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<&'a [EventRecord]>,
}

/// Renders the final layout and, when given, the recorded events.
pub fn render_run(
    snapshot: &LayoutSnapshot,
    events: Option<&[EventRecord]>,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => {
            let mut out = snapshot.to_string();
            if let Some(events) = events {
                out.push_str("Events:\n");
                for event in events {
                    out.push_str("  ");
                    out.push_str(&event.to_string());
                    out.push('\n');
                }
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let report = RunReport {
                layout: snapshot,
                events,
            };
            let mut json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::Serialize(format!("Failed to serialize layout: {e}")))?;
            json.push('\n');
            Ok(json)
        }
    }
}
