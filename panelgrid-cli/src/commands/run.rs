//! Layout script runner.
//!
//! Drives a fresh `PanelTree` from a script. Panels are named by their
//! titles; `main` names the Main Group wherever a target group is expected.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use panelgrid_core::config::LayoutSettings;
use panelgrid_core::drag_drop::{Point, Size};
use panelgrid_core::layout::{
    ContentId, DragSession, DropOutcome, GroupHit, GroupId, LayoutError, LayoutEvent, PanelTree,
    Subscription,
};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::format::{EventRecord, render_run};
use crate::script::{Command, ScriptLine, parse_line};
use crate::util::{load_settings, read_script};

/// Name that addresses the Main Group in target positions.
const MAIN_GROUP: &str = "main";

/// Flags of the run command
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub events: bool,
    pub keep_going: bool,
}

/// Run command handler
pub fn cmd_run(
    config_path: Option<&Path>,
    script: &Path,
    options: RunOptions,
) -> Result<(), CliError> {
    let settings = load_settings(config_path)?;
    let source = read_script(script)?;

    let mut runner = ScriptRunner::new(settings);
    let failures = runner.run(&source, options.keep_going)?;

    let events = options.events.then(|| runner.event_records());
    let output = render_run(&runner.tree().snapshot(), events.as_deref(), options.format)?;
    print!("{output}");

    match failures.first() {
        None => Ok(()),
        Some(first) => Err(CliError::Failures {
            count: failures.len(),
            code: first.exit_code(),
        }),
    }
}

/// Executes script lines against one layout.
pub struct ScriptRunner {
    tree: PanelTree,
    settings: LayoutSettings,
    names: HashMap<String, ContentId>,
    events: Rc<RefCell<Vec<LayoutEvent>>>,
    _subscription: Subscription,
}

impl ScriptRunner {
    /// Creates a runner over an empty layout built from `settings`.
    pub fn new(settings: LayoutSettings) -> Self {
        let tree = PanelTree::with_root_orientation(settings.layout.root_orientation);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let subscription = tree.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        Self {
            tree,
            settings,
            names: HashMap::new(),
            events,
            _subscription: subscription,
        }
    }

    /// Runs every line of `source`.
    ///
    /// Stops at the first failing line unless `keep_going` is set, in which
    /// case failures are reported on stderr and returned.
    pub fn run(&mut self, source: &str, keep_going: bool) -> Result<Vec<CliError>, CliError> {
        let mut failures = Vec::new();
        for (index, text) in source.lines().enumerate() {
            let result = parse_line(index + 1, text).and_then(|line| match line {
                Some(line) => self.execute(&line),
                None => Ok(()),
            });
            if let Err(e) = result {
                if !keep_going {
                    return Err(e);
                }
                eprintln!("Error: {e}");
                failures.push(e);
            }
        }
        Ok(failures)
    }

    /// Applies one command to the layout.
    pub fn execute(&mut self, line: &ScriptLine) -> Result<(), CliError> {
        let number = line.number;
        let layout = |source: LayoutError| CliError::Layout {
            line: number,
            source,
        };
        tracing::debug!(line = number, command = ?line.command, "executing");

        match &line.command {
            Command::Add { name, zone, anchor } => {
                let anchor = anchor
                    .as_deref()
                    .map(|a| self.resolve_group(number, a))
                    .transpose()?;
                let content = *self
                    .names
                    .entry(name.clone())
                    .or_insert_with(ContentId::new);
                let zone = zone.unwrap_or(self.settings.layout.default_zone);
                self.tree
                    .add_panel(content, name.clone(), zone, anchor)
                    .map_err(layout)?;
            }
            Command::Remove { name } => {
                let content = self.resolve_content(number, name)?;
                self.tree.remove_panel(content).map_err(layout)?;
            }
            Command::Detach { name } => {
                let content = self.resolve_content(number, name)?;
                self.tree.detach_panel(content).map_err(layout)?;
            }
            Command::Close { name } => {
                let content = self.resolve_content(number, name)?;
                let window = self
                    .tree
                    .window_of(content)
                    .ok_or_else(|| CliError::Script {
                        line: number,
                        message: format!("{name:?} is not in a detached window"),
                    })?;
                self.tree.close_window(window).map_err(layout)?;
            }
            Command::Move {
                name,
                target,
                index,
            } => {
                let content = self.resolve_content(number, name)?;
                let group = self.resolve_group(number, target)?;
                self.tree
                    .reattach_from_drag(content, group, *index)
                    .map_err(layout)?;
            }
            Command::Split { name, target, zone } => {
                let content = self.resolve_content(number, name)?;
                let group = self.resolve_group(number, target)?;
                self.tree
                    .move_to_split(content, group, *zone)
                    .map_err(layout)?;
            }
            Command::Drag {
                name,
                target,
                size,
                point,
            } => {
                let content = self.resolve_content(number, name)?;
                let group = self.resolve_group(number, target)?;
                let outcome = self
                    .drag(content, group, *size, *point)
                    .map_err(layout)?;
                tracing::info!(line = number, panel = %name, ?outcome, "drop finished");
            }
            Command::Pin { name } => {
                let content = self.resolve_content(number, name)?;
                self.tree.set_pinned(content, true).map_err(layout)?;
            }
            Command::Unpin { name } => {
                let content = self.resolve_content(number, name)?;
                self.tree.set_pinned(content, false).map_err(layout)?;
            }
            Command::Focus { name } => {
                let content = self.resolve_content(number, name)?;
                self.tree.focus_panel(content).map_err(layout)?;
            }
            Command::ClearUnpinned => {
                let removed = self.tree.clear_unpinned();
                tracing::info!(line = number, removed = removed.len(), "cleared unpinned panels");
            }
            Command::Reset => {
                let reset = self.tree.restore_default_layout();
                tracing::info!(
                    line = number,
                    panels = reset.panels.len(),
                    windows = reset.windows.len(),
                    "layout reset"
                );
            }
        }
        Ok(())
    }

    /// Simulates a pointer drag released at `point` inside `group`.
    fn drag(
        &mut self,
        content: ContentId,
        group: GroupId,
        size: Size,
        point: Point,
    ) -> Result<DropOutcome, LayoutError> {
        let oracle = move |local: Point| Some(GroupHit::new(group, size, local));
        DragSession::begin(&self.tree, content)?
            .with_metrics(self.settings.drop_zones)
            .drop_at(&mut self.tree, &oracle, point)
    }

    fn resolve_content(&self, line: usize, name: &str) -> Result<ContentId, CliError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| CliError::UnknownPanel {
                line,
                name: name.to_string(),
            })
    }

    /// Resolves `main` or the group currently hosting the named panel.
    fn resolve_group(&self, line: usize, name: &str) -> Result<GroupId, CliError> {
        if name == MAIN_GROUP && !self.names.contains_key(name) {
            return Ok(self.tree.main_group().id());
        }
        let content = self.resolve_content(line, name)?;
        self.tree
            .group_of(content)
            .ok_or(CliError::Layout {
                line,
                source: LayoutError::ContentNotFound(content),
            })
    }

    fn name_of(&self, content: ContentId) -> String {
        self.names
            .iter()
            .find(|(_, id)| **id == content)
            .map_or_else(|| content.to_string(), |(name, _)| name.clone())
    }

    /// Events fired so far, named by panel.
    pub fn event_records(&self) -> Vec<EventRecord> {
        self.events
            .borrow()
            .iter()
            .map(|event| EventRecord::from_event(event, |content| self.name_of(content)))
            .collect()
    }

    /// The layout being driven.
    pub(crate) const fn tree(&self) -> &PanelTree {
        &self.tree
    }
}
