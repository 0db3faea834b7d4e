//! Host-facing editing façade.
//!
//! The editor forwards to the pure operations in [`crate::edit`] and [`crate::snap`] and tells
//! the host when to record an undo checkpoint and when to repaint. Only `move_shape` and `snap`
//! ask for a checkpoint; the remaining operations only ask for a repaint.

use crate::edit::{self, Anchor, DEFAULT_MOVE_STEP, Direction, FlipAxis};
use crate::hit::{self, DEFAULT_PICK_TOLERANCE_PIXELS, Pick};
use crate::shapes::{Shape, Side};
use crate::snap::{self, GridLevel};
use crate::transform::ViewContext;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Callbacks the host application provides.
pub trait EditorHost {
    /// Capture the current state for undo. Called before the shape is touched.
    fn checkpoint(&mut self);

    /// Geometry changed; schedule a redraw.
    fn request_repaint(&mut self);
}

/// A host that ignores every request, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl EditorHost for NoopHost {
    fn checkpoint(&mut self) {}

    fn request_repaint(&mut self) {}
}

impl<H: EditorHost + ?Sized> EditorHost for &mut H {
    fn checkpoint(&mut self) {
        (**self).checkpoint();
    }

    fn request_repaint(&mut self) {
        (**self).request_repaint();
    }
}

fn default_move_step() -> f64 {
    DEFAULT_MOVE_STEP
}

fn default_pick_tolerance() -> f64 {
    DEFAULT_PICK_TOLERANCE_PIXELS
}

/// Tunable editor behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettings {
    /// Nudge distance in feet.
    #[serde(default = "default_move_step")]
    pub move_step: f64,
    /// Body pick radius in screen pixels.
    #[serde(default = "default_pick_tolerance")]
    pub pick_tolerance_pixels: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            move_step: DEFAULT_MOVE_STEP,
            pick_tolerance_pixels: DEFAULT_PICK_TOLERANCE_PIXELS,
        }
    }
}

/// Applies edits to caller-owned shapes and notifies the host.
#[derive(Debug)]
pub struct Editor<H: EditorHost> {
    host: H,
    pub settings: EditorSettings,
}

impl<H: EditorHost> Editor<H> {
    /// Create an editor with default settings.
    pub fn new(host: H) -> Self {
        Self::with_settings(host, EditorSettings::default())
    }

    pub fn with_settings(host: H, settings: EditorSettings) -> Self {
        Self { host, settings }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Give the host back.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Resolve a pointer (world feet) to a handle or shape body.
    pub fn pick(&self, point: Point, shapes: &[Shape], view: &ViewContext) -> Option<Pick> {
        hit::pick(point, shapes, view, self.settings.pick_tolerance_pixels)
    }

    /// Nudge a shape by the configured step. Clears its snap flags.
    pub fn move_shape(&mut self, shape: &mut Shape, direction: Direction) {
        self.host.checkpoint();
        edit::move_shape(shape, direction, self.settings.move_step);
        self.host.request_repaint();
    }

    /// Snap one side of a shape to the grid.
    pub fn snap(&mut self, shape: &mut Shape, direction: Direction, grid: GridLevel) -> Side {
        self.host.checkpoint();
        let side = snap::snap_shape(shape, direction, grid);
        self.host.request_repaint();
        side
    }

    pub fn change_length(&mut self, shape: &mut Shape, length: f64, anchor: Anchor) -> bool {
        let changed = edit::change_length(shape, length, anchor);
        self.repaint_if(changed)
    }

    pub fn make_horizontal(&mut self, shape: &mut Shape, anchor: Anchor) -> bool {
        let changed = edit::make_horizontal(shape, anchor);
        self.repaint_if(changed)
    }

    pub fn make_vertical(&mut self, shape: &mut Shape, anchor: Anchor) -> bool {
        let changed = edit::make_vertical(shape, anchor);
        self.repaint_if(changed)
    }

    pub fn rotate(&mut self, shape: &mut Shape, angle: f64) {
        edit::rotate(shape, angle);
        self.host.request_repaint();
    }

    pub fn flip(&mut self, shape: &mut Shape, axis: FlipAxis) -> bool {
        let changed = edit::flip(shape, axis);
        self.repaint_if(changed)
    }

    fn repaint_if(&mut self, changed: bool) -> bool {
        if changed {
            self.host.request_repaint();
        }
        changed
    }
}
