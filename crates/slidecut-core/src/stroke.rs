//! Pointer state machine that records freehand erase strokes.
//!
//! Pointer coordinates are in pixels relative to the displayed crop's top-left
//! corner. Points are stored as percentages of the displayed size so a stroke
//! stays valid at any zoom and maps directly onto the composited output.

use crate::composite::{ErasePath, ErasePoint};

#[derive(Debug, Clone, Default, PartialEq)]
enum StrokeState {
    #[default]
    Idle,
    Drawing(Vec<ErasePoint>),
}

/// Records one stroke at a time: `idle -> drawing -> idle`.
#[derive(Debug, Clone, Default)]
pub struct StrokeRecorder {
    state: StrokeState,
}

fn to_percent(value: f64, extent: f64) -> f64 {
    (value.clamp(0.0, extent) / extent) * 100.0
}

fn usable(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing(_))
    }

    /// Points recorded so far for the stroke in progress.
    pub fn current_points(&self) -> &[ErasePoint] {
        match &self.state {
            StrokeState::Drawing(points) => points,
            StrokeState::Idle => &[],
        }
    }

    /// Start a stroke. Any stroke in progress is discarded.
    ///
    /// Returns false, and stays idle, when the surface has no usable size.
    pub fn pointer_down(&mut self, x: f64, y: f64, width: f64, height: f64) -> bool {
        if !usable(width, height) {
            self.state = StrokeState::Idle;
            return false;
        }
        let point = ErasePoint::new(to_percent(x, width), to_percent(y, height));
        self.state = StrokeState::Drawing(vec![point]);
        true
    }

    /// Extend the stroke in progress. Points outside the surface are pulled
    /// back onto its edge. Ignored while idle.
    pub fn pointer_move(&mut self, x: f64, y: f64, width: f64, height: f64) -> bool {
        match &mut self.state {
            StrokeState::Drawing(points) if usable(width, height) => {
                points.push(ErasePoint::new(to_percent(x, width), to_percent(y, height)));
                true
            }
            _ => false,
        }
    }

    /// Finish the stroke. Returns the path when it has at least two points.
    ///
    /// Leaving the surface ends a stroke the same way.
    pub fn pointer_up(&mut self) -> Option<ErasePath> {
        match std::mem::take(&mut self.state) {
            StrokeState::Drawing(points) => {
                let path = ErasePath::new(points);
                path.is_drawable().then_some(path)
            }
            StrokeState::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = StrokeState::Idle;
    }
}
