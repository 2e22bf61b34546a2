//! Drop-surface state machine.
//!
//! Drag tracking is a single boolean toggled by enter/leave/drop events
//! with no debouncing. The surface holds at most one selected image; a new
//! selection replaces the previous one and removal clears it.

use serde::{Deserialize, Serialize};

use crate::ImageRef;

/// Drag events delivered by the hosting view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropEvent {
    DragEnter,
    DragLeave,
    /// A drop landed on the surface. The drag flag clears; the dropped
    /// bytes go through the [`ImageStore`](crate::ImageStore) separately.
    Drop,
}

/// State of the upload drop surface.
#[derive(Debug, Clone, Default)]
pub struct DropSurface {
    dragging: bool,
    selected: Option<ImageRef>,
}

impl DropSurface {
    /// Creates an idle surface: not dragging, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a drag is hovering over the surface.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The currently selected image, if any.
    pub fn selected(&self) -> Option<&ImageRef> {
        self.selected.as_ref()
    }

    /// Applies a drag event.
    pub fn apply(&mut self, event: DropEvent) {
        match event {
            DropEvent::DragEnter => self.dragging = true,
            DropEvent::DragLeave | DropEvent::Drop => self.dragging = false,
        }
    }

    /// Attaches an accepted image, replacing any previous selection.
    pub fn attach(&mut self, image: ImageRef) {
        self.selected = Some(image);
    }

    /// Removes the selected image, returning it if one was present.
    pub fn clear(&mut self) -> Option<ImageRef> {
        self.selected.take()
    }
}
