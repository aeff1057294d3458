use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset_by(self, offset: Position) -> Self {
        Self {
            x: self.x.saturating_add(offset.x),
            y: self.y.saturating_add(offset.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Outer bounds of a window in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Position, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn with_position(&self, position: Position) -> Self {
        Self::from_parts(position, self.size())
    }

    fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

fn clamp_axis(child_start: i32, child_len: u32, parent_start: i32, parent_len: u32) -> i32 {
    let child_end = i64::from(child_start) + i64::from(child_len);
    let parent_end = i64::from(parent_start) + i64::from(parent_len);

    let mut start = i64::from(child_start);
    if child_end > parent_end {
        start = parent_end - i64::from(child_len);
    }
    // The leading edge wins when the child is larger than the parent.
    if start < i64::from(parent_start) {
        start = i64::from(parent_start);
    }

    start.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Nearest top-left position that keeps `child` fully inside `parent`.
///
/// A child flush with any parent edge counts as inside. When the child is
/// wider (or taller) than the parent it is aligned with the parent's left
/// (or top) edge.
pub fn clamp(child: Rect, parent: Rect) -> Position {
    Position::new(
        clamp_axis(child.x, child.width, parent.x, parent.width),
        clamp_axis(child.y, child.height, parent.y, parent.height),
    )
}

/// Same as [`clamp`], but `None` when the child needs no correction.
pub fn correction(child: Rect, parent: Rect) -> Option<Position> {
    let corrected = clamp(child, parent);
    if corrected == child.position() {
        None
    } else {
        Some(corrected)
    }
}
