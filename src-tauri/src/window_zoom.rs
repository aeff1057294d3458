use std::collections::BTreeMap;

/// One zoom step is half a zoom level; a level scales the page by 1.2.
const ZOOM_STEP_LEVEL: f64 = 0.5;
const ZOOM_LEVEL_SCALE: f64 = 1.2;
const MIN_ZOOM_STEPS: i32 = -15;
const MAX_ZOOM_STEPS: i32 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomChange {
    Reset,
    In,
    Out,
}

/// Per-window zoom steps, keyed by window label. Webviews cannot report their
/// zoom factor, so the shell keeps track of what it applied.
#[derive(Debug, Default)]
pub struct ZoomLevels {
    steps: BTreeMap<String, i32>,
}

impl ZoomLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the change for `label` and returns the zoom factor to apply.
    pub fn apply(&mut self, label: &str, change: ZoomChange) -> f64 {
        let current = self.steps.get(label).copied().unwrap_or(0);
        let next = match change {
            ZoomChange::Reset => 0,
            ZoomChange::In => (current + 1).min(MAX_ZOOM_STEPS),
            ZoomChange::Out => (current - 1).max(MIN_ZOOM_STEPS),
        };

        if next == 0 {
            self.steps.remove(label);
        } else {
            self.steps.insert(label.to_string(), next);
        }
        zoom_factor(next)
    }

    pub fn forget(&mut self, label: &str) {
        self.steps.remove(label);
    }
}

fn zoom_factor(steps: i32) -> f64 {
    ZOOM_LEVEL_SCALE.powf(f64::from(steps) * ZOOM_STEP_LEVEL)
}
