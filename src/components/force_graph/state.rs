//! Per-canvas scene state and the node palette.

use log::debug;

use super::interaction::DragController;
use super::layout::{ForceLayout, LayoutConfig};
use super::model::GraphModel;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Fill color for the node at `index`.
pub fn node_color(index: usize) -> &'static str {
	COLORS[index % COLORS.len()]
}

/// Everything the canvas needs between frames: the graph it shows, the
/// simulation laying it out and the drag in progress.
pub struct ForceGraphState {
	/// Graph being shown.
	pub model: GraphModel,
	/// `None` while the graph is empty.
	pub layout: Option<ForceLayout>,
	/// Drag in progress.
	pub drag: DragController,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	config: LayoutConfig,
}

impl ForceGraphState {
	/// Scene for `model` on a `width` by `height` canvas.
	pub fn new(model: &GraphModel, config: LayoutConfig, width: f64, height: f64) -> Self {
		let mut state = Self {
			model: GraphModel::new(),
			layout: None,
			drag: DragController::new(),
			width,
			height,
			config,
		};
		state.reload(model);
		state
	}

	/// Tear down the current scene and seed a new simulation for `model`.
	pub fn reload(&mut self, model: &GraphModel) {
		self.drag.reset();
		self.model = model.clone();
		self.layout = ForceLayout::new(&self.model, self.config.clone(), self.center());
		debug!(
			"scene reloaded at revision {} ({} nodes)",
			self.model.revision(),
			self.model.node_count()
		);
	}

	/// Middle of the canvas.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Id of the topmost node under `(x, y)`.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<String> {
		self.layout
			.as_ref()
			.and_then(|layout| layout.node_at(x, y))
			.map(str::to_string)
	}

	/// Start dragging whatever node is under the pointer. Returns whether one was hit.
	pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
		let Some(id) = self.node_at_position(x, y) else {
			return false;
		};
		match self.layout.as_mut() {
			Some(layout) => self.drag.drag_start(layout, &id, x, y),
			None => false,
		}
	}

	/// Move the dragged node, if any.
	pub fn drag_to(&mut self, x: f64, y: f64) {
		if let Some(layout) = self.layout.as_mut() {
			self.drag.drag_move(layout, x, y);
		}
	}

	/// Release the dragged node, if any.
	pub fn end_drag(&mut self) {
		if let Some(layout) = self.layout.as_mut() {
			self.drag.drag_end(layout);
		}
	}

	/// One animation frame. Returns whether the layout moved.
	pub fn tick(&mut self) -> bool {
		self.layout.as_mut().is_some_and(ForceLayout::step)
	}

	/// Recenter the layout on a resized canvas.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		let (cx, cy) = self.center();
		if let Some(layout) = self.layout.as_mut() {
			layout.set_center(cx, cy);
			layout.restart();
		}
	}
}
