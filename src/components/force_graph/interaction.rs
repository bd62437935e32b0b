//! Pointer drags turned into temporary pins on the layout.

use log::debug;

use super::layout::ForceLayout;

#[derive(Clone, Debug, PartialEq)]
struct ActiveDrag {
	node: String,
	/// Whether this gesture raised the alpha target and must lower it again.
	reheated: bool,
}

/// Single-pointer drag state machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragController {
	active: Option<ActiveDrag>,
}

impl DragController {
	/// Controller with no gesture.
	pub fn new() -> Self {
		Self::default()
	}

	/// Begin dragging `id` at the pointer position. Unknown nodes are ignored.
	pub fn drag_start(&mut self, layout: &mut ForceLayout, id: &str, x: f64, y: f64) -> bool {
		if self.active.is_some() {
			self.drag_end(layout);
		}
		if layout.position(id).is_none() {
			return false;
		}

		let reheat = layout.config().reheat_target;
		let reheated = layout.alpha_target() < reheat;
		if reheated {
			layout.set_alpha_target(reheat);
			debug!("layout reheated for drag of '{id}'");
		}
		layout.restart();
		layout.pin(id, x, y);
		self.active = Some(ActiveDrag {
			node: id.to_string(),
			reheated,
		});
		true
	}

	/// Move the held node to the pointer. No-op without an active drag.
	pub fn drag_move(&mut self, layout: &mut ForceLayout, x: f64, y: f64) {
		if let Some(drag) = &self.active {
			layout.pin(&drag.node, x, y);
		}
	}

	/// Let go of the held node and let alpha cool back down.
	pub fn drag_end(&mut self, layout: &mut ForceLayout) {
		let Some(drag) = self.active.take() else {
			return;
		};
		layout.release(&drag.node);
		if drag.reheated {
			layout.set_alpha_target(0.0);
		}
	}

	/// Whether a gesture is active.
	pub fn is_dragging(&self) -> bool {
		self.active.is_some()
	}

	/// Node held by the current gesture.
	pub fn dragged(&self) -> Option<&str> {
		self.active.as_ref().map(|d| d.node.as_str())
	}

	/// Forget the gesture without touching any layout (the layout was replaced).
	pub fn reset(&mut self) {
		self.active = None;
	}
}
