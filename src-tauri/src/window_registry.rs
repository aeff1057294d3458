use std::collections::BTreeMap;

use serde::Deserialize;

use crate::geometry::{self, Position, Rect, Size};

pub const DEFAULT_CHILD_OFFSET: Position = Position::new(50, 50);
pub const DEFAULT_CHILD_SIZE: Size = Size::new(1024, 768);
pub const CHILD_WINDOW_LABEL_PREFIX: &str = "child-";

/// Window options a menu entry or the renderer may pass when opening a child.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildWindowOptions {
    pub offset: Option<Position>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub resizable: Option<bool>,
}

impl ChildWindowOptions {
    pub const fn sized(width: u32, height: u32) -> Self {
        Self {
            offset: None,
            width: Some(width),
            height: Some(height),
            resizable: None,
        }
    }

    pub const fn with_offset(mut self, offset: Position) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn resolved_offset(&self) -> Position {
        self.offset.unwrap_or(DEFAULT_CHILD_OFFSET)
    }

    pub fn resolved_size(&self) -> Size {
        Size::new(
            self.width.unwrap_or(DEFAULT_CHILD_SIZE.width),
            self.height.unwrap_or(DEFAULT_CHILD_SIZE.height),
        )
    }

    pub fn resolved_resizable(&self) -> bool {
        self.resizable.unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRequest {
    pub route: String,
    pub title: String,
    pub options: ChildWindowOptions,
}

impl WindowRequest {
    pub fn new(route: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            title: title.into(),
            options: ChildWindowOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ChildWindowOptions) -> Self {
        self.options = options;
        self
    }
}

/// A live child window as the registry knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildWindow {
    pub id: String,
    pub route: String,
    pub title: String,
    pub offset: Position,
    pub size: Size,
    pub resizable: bool,
}

/// A child window that has an id but has not been created by the host yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChild {
    pub window: ChildWindow,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reposition {
    pub window_id: String,
    pub position: Position,
}

/// Bookkeeping for the child windows glued to the primary window.
///
/// Every method only plans; applying the returned [`Reposition`]s is the
/// caller's job, so no windowing call happens while the registry is borrowed.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    children: BTreeMap<String, ChildWindow>,
    next_id: u64,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn contains(&self, window_id: &str) -> bool {
        self.children.contains_key(window_id)
    }

    /// Allocates a fresh id and computes where the new child should appear.
    ///
    /// The child is only tracked once [`WindowRegistry::register`] is called,
    /// so a failed window creation leaves the registry untouched.
    pub fn prepare_open(
        &mut self,
        request: &WindowRequest,
        primary: Option<Rect>,
    ) -> PendingChild {
        self.next_id += 1;
        let window = ChildWindow {
            id: format!("{CHILD_WINDOW_LABEL_PREFIX}{}", self.next_id),
            route: request.route.clone(),
            title: request.title.clone(),
            offset: request.options.resolved_offset(),
            size: request.options.resolved_size(),
            resizable: request.options.resolved_resizable(),
        };
        let position = primary.map(|bounds| bounds.position().offset_by(window.offset));

        PendingChild { window, position }
    }

    pub fn register(&mut self, window: ChildWindow) {
        self.children.insert(window.id.clone(), window);
    }

    pub fn remove(&mut self, window_id: &str) -> Option<ChildWindow> {
        self.children.remove(window_id)
    }

    /// Keeps the registry's idea of a child's size in sync with the window.
    pub fn record_child_size(&mut self, window_id: &str, size: Size) -> bool {
        match self.children.get_mut(window_id) {
            Some(child) => {
                child.size = size;
                true
            }
            None => false,
        }
    }

    pub fn on_primary_moved(&self, bounds: Rect) -> Vec<Reposition> {
        self.children
            .values()
            .map(|child| {
                let target =
                    Rect::from_parts(bounds.position().offset_by(child.offset), child.size);
                Reposition {
                    window_id: child.id.clone(),
                    position: geometry::clamp(target, bounds),
                }
            })
            .collect()
    }

    /// Offsets are translated with the primary window, never rescaled.
    pub fn on_primary_resized(&self, bounds: Rect) -> Vec<Reposition> {
        self.on_primary_moved(bounds)
    }

    pub fn on_child_moved(
        &self,
        window_id: &str,
        child_bounds: Rect,
        primary: Rect,
    ) -> Option<Reposition> {
        if !self.children.contains_key(window_id) {
            return None;
        }

        geometry::correction(child_bounds, primary).map(|position| Reposition {
            window_id: window_id.to_string(),
            position,
        })
    }

    /// Forgets every child and returns them so the caller can close them.
    pub fn close_all(&mut self) -> Vec<ChildWindow> {
        std::mem::take(&mut self.children).into_values().collect()
    }
}

pub fn is_child_window_label(label: &str) -> bool {
    label
        .strip_prefix(CHILD_WINDOW_LABEL_PREFIX)
        .is_some_and(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
}
