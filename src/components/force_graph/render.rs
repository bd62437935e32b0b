use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, node_color};

const BACKGROUND: &str = "#fafafa";
const LINK_COLOR: &str = "#999";
const LABEL_COLOR: &str = "#333";
const ARROW_SIZE: f64 = 8.0;
const SELF_LOOP_MIN: f64 = 6.0;

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	if state.layout.is_none() {
		return;
	}
	draw_links(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(layout) = state.layout.as_ref() else {
		return;
	};
	ctx.set_stroke_style_str(LINK_COLOR);
	ctx.set_fill_style_str(LINK_COLOR);
	ctx.set_line_width(1.5);
	ctx.set_font("11px sans-serif");
	ctx.set_text_align("center");

	for segment in layout.links(&state.model) {
		let link = state.model.links().get(segment.index);
		if link.is_some_and(|l| l.source == l.target) {
			let (x, y) = segment.from;
			let (cx, cy, r) = self_loop(x, y, segment.target_radius);
			ctx.begin_path();
			let _ = ctx.arc(cx, cy, r, 0.0, 2.0 * PI);
			ctx.stroke();
			if let Some(link) = link {
				let _ = ctx.fill_text(&link.relationship, cx, cy - r - 4.0);
			}
			continue;
		}

		let ((x1, y1), (x2, y2)) = (segment.from, segment.to);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let (tip_x, tip_y) = (x2 - ux * segment.target_radius, y2 - uy * segment.target_radius);

		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		ctx.stroke();

		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if let Some(link) = link {
			let _ = ctx.fill_text(&link.relationship, (x1 + x2) / 2.0, (y1 + y2) / 2.0);
		}
	}
}

/// Circle `(cx, cy, r)` drawn for a link from a node of `radius` at `(x, y)` to itself.
/// It sits on top of the node and crosses its outline.
fn self_loop(x: f64, y: f64, radius: f64) -> (f64, f64, f64) {
	let r = (radius * 0.75).max(SELF_LOOP_MIN);
	(x, y - radius - r * 0.5, r)
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(layout) = state.layout.as_ref() else {
		return;
	};
	let dragged = state.drag.dragged();
	ctx.set_font("14px sans-serif");
	ctx.set_text_align("center");

	for node in layout.nodes() {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node_color(node.index));
		ctx.fill();

		if dragged == Some(node.id) {
			ctx.set_stroke_style_str("#000");
			ctx.set_line_width(2.0);
			ctx.stroke();
		}

		if let Some(info) = state.model.nodes().get(node.index) {
			ctx.set_fill_style_str(LABEL_COLOR);
			let _ = ctx.fill_text(&info.label, node.x, node.y + node.radius + 14.0);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn self_loop_crosses_node_outline() {
		for radius in [0.0, 11.0, 40.0] {
			let (cx, cy, r) = self_loop(100.0, 100.0, radius);
			let d = ((cx - 100.0).powi(2) + (cy - 100.0).powi(2)).sqrt();
			assert!(cy < 100.0, "loop drawn below the node");
			assert!(d > radius && d < radius + r, "radius {radius}: d={d} r={r}");
		}
	}
}
