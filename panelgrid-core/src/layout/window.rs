//! Detached window registry
//!
//! A detached window hosts exactly one panel's content outside the split
//! tree. Windows are tracked in a flat registry kept in creation order.

use serde::{Deserialize, Serialize};

use super::error::{LayoutError, LayoutResult};
use super::types::{ContentId, WindowId};

/// A standalone window holding one panel's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetachedWindow {
    /// Window identifier.
    pub id: WindowId,
    /// Content shown in the window.
    pub content: ContentId,
    /// Window title (the former tab title).
    pub title: String,
}

/// Flat registry of detached windows.
#[derive(Debug, Clone, Default)]
pub struct WindowRegistry {
    windows: Vec<DetachedWindow>,
}

impl WindowRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new window for `content` and returns its ID.
    pub fn open(&mut self, content: ContentId, title: impl Into<String>) -> WindowId {
        let window = DetachedWindow {
            id: WindowId::new(),
            content,
            title: title.into(),
        };
        let id = window.id;
        self.windows.push(window);
        id
    }

    /// Removes a window from the registry.
    ///
    /// # Errors
    ///
    /// Returns `WindowNotFound` if the window is not registered.
    pub fn close(&mut self, id: WindowId) -> LayoutResult<DetachedWindow> {
        let index = self
            .windows
            .iter()
            .position(|w| w.id == id)
            .ok_or(LayoutError::WindowNotFound(id))?;
        Ok(self.windows.remove(index))
    }

    /// Removes every window and returns them in creation order.
    pub fn close_all(&mut self) -> Vec<DetachedWindow> {
        std::mem::take(&mut self.windows)
    }

    /// Returns a window by ID.
    #[must_use]
    pub fn get(&self, id: WindowId) -> Option<&DetachedWindow> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Returns the window showing `content`.
    #[must_use]
    pub fn find_content(&self, content: ContentId) -> Option<&DetachedWindow> {
        self.windows.iter().find(|w| w.content == content)
    }

    /// Returns all windows in creation order.
    #[must_use]
    pub fn windows(&self) -> &[DetachedWindow] {
        &self.windows
    }

    /// Returns the number of open windows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Returns true if no window is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
