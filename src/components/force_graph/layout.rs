//! Force-directed relaxation of node positions.
//!
//! One [`tick`](ForceLayout::tick) applies, in this order: pin overrides, link
//! springs, many-body repulsion, centering, collision, then velocity
//! integration. Alpha cools geometrically toward its target so the layout
//! comes to rest; a drag raises the target to keep the rest of the graph
//! moving while a node is held.

use std::collections::HashMap;
use std::f64::consts::PI;

use log::debug;

use super::model::GraphModel;

/// Below this squared distance repulsion stops growing.
const DISTANCE_MIN2: f64 = 1.0;
const COLLIDE_STRENGTH: f64 = 1.0;
const INITIAL_RADIUS: f64 = 10.0;

/// Tunables of the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Rest length of every link spring.
	pub link_distance: f64,
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Alpha below which the layout counts as settled.
	pub alpha_min: f64,
	/// Per-tick step of alpha toward its target.
	pub alpha_decay: f64,
	/// Alpha target held while a node is dragged.
	pub reheat_target: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			link_distance: 80.0,
			charge_strength: -300.0,
			velocity_decay: 0.4,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			reheat_target: 0.3,
		}
	}
}

/// Who owns a node's position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PinState {
	/// The simulation moves the node.
	#[default]
	Free,
	/// Held at a fixed point by a drag.
	Pinned {
		/// Pinned x.
		x: f64,
		/// Pinned y.
		y: f64,
	},
	/// Just let go; becomes `Free` with zero velocity on the next tick.
	Released,
}

#[derive(Clone, Debug)]
struct SimNode {
	id: String,
	radius: f64,
	x: f64,
	y: f64,
	vx: f64,
	vy: f64,
	pin: PinState,
}

#[derive(Clone, Debug)]
struct SimLink {
	source: usize,
	target: usize,
	strength: f64,
	bias: f64,
}

/// A node as drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePosition<'a> {
	/// Index into the model's node list.
	pub index: usize,
	/// Node identifier.
	pub id: &'a str,
	/// Current x.
	pub x: f64,
	/// Current y.
	pub y: f64,
	/// Visual radius.
	pub radius: f64,
}

/// A link as drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkSegment {
	/// Index into the model's link list.
	pub index: usize,
	/// Source position.
	pub from: (f64, f64),
	/// Target position.
	pub to: (f64, f64),
	/// Target node radius, for arrowhead placement.
	pub target_radius: f64,
}

/// Numerical Recipes LCG; keeps coincident-node nudges reproducible.
#[derive(Clone, Debug)]
struct Lcg(u64);

impl Lcg {
	fn next(&mut self) -> f64 {
		const M: u64 = 4_294_967_296;
		self.0 = (1_664_525 * self.0 + 1_013_904_223) % M;
		self.0 as f64 / M as f64
	}

	fn jiggle(&mut self) -> f64 {
		(self.next() - 0.5) * 1e-6
	}
}

/// Owns every node's position and velocity while a graph is on screen.
#[derive(Clone, Debug)]
pub struct ForceLayout {
	config: LayoutConfig,
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	/// `None` marks a self-loop that exerts no force.
	link_slots: Vec<Option<usize>>,
	index: HashMap<String, usize>,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	running: bool,
	ticks: u64,
	rng: Lcg,
}

impl ForceLayout {
	/// Seed a fresh simulation for `model`. Returns `None` for an empty graph.
	pub fn new(model: &GraphModel, config: LayoutConfig, center: (f64, f64)) -> Option<Self> {
		if model.is_empty() {
			return None;
		}

		let golden = PI * (3.0 - 5f64.sqrt());
		let nodes: Vec<SimNode> = model
			.nodes()
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let angle = i as f64 * golden;
				SimNode {
					id: node.id.clone(),
					radius: node.size.max(0.0),
					x: center.0 + radius * angle.cos(),
					y: center.1 + radius * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					pin: PinState::Free,
				}
			})
			.collect();
		let index: HashMap<String, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();

		let mut degree = vec![0usize; nodes.len()];
		let mut resolved = Vec::with_capacity(model.link_count());
		for link in model.links() {
			let ends = index.get(&link.source).zip(index.get(&link.target));
			if let Some((&s, &t)) = ends {
				degree[s] += 1;
				degree[t] += 1;
			}
			resolved.push(ends.map(|(&s, &t)| (s, t)));
		}

		let mut links = Vec::new();
		let mut link_slots = Vec::with_capacity(resolved.len());
		for ends in resolved {
			match ends {
				Some((s, t)) if s != t => {
					let (ds, dt) = (degree[s] as f64, degree[t] as f64);
					link_slots.push(Some(links.len()));
					links.push(SimLink {
						source: s,
						target: t,
						strength: 1.0 / ds.min(dt),
						bias: ds / (ds + dt),
					});
				}
				_ => link_slots.push(None),
			}
		}

		debug!(
			"layout seeded: {} nodes, {} springs",
			nodes.len(),
			links.len()
		);
		Some(Self {
			config,
			nodes,
			links,
			link_slots,
			index,
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
			ticks: 0,
			rng: Lcg(1),
		})
	}

	/// Tick once if the layout has not settled. Returns whether a tick ran.
	pub fn step(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.tick();
		if self.alpha < self.config.alpha_min {
			self.running = false;
			debug!("layout settled after {} ticks", self.ticks);
		}
		true
	}

	/// Advance the simulation by exactly one tick, regardless of alpha.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
		self.apply_pins();
		self.apply_links();
		self.apply_charge();
		self.apply_centering();
		self.apply_collision();
		self.integrate();
		self.ticks += 1;
	}

	/// Resume ticking after the layout settled.
	pub fn restart(&mut self) {
		if !self.running {
			debug!("layout restarted at alpha {:.4}", self.alpha);
		}
		self.running = true;
	}

	fn apply_pins(&mut self) {
		for node in &mut self.nodes {
			match node.pin {
				PinState::Pinned { x, y } => {
					node.x = x;
					node.y = y;
					node.vx = 0.0;
					node.vy = 0.0;
				}
				PinState::Released => {
					node.pin = PinState::Free;
					node.vx = 0.0;
					node.vy = 0.0;
				}
				PinState::Free => {}
			}
		}
	}

	fn apply_links(&mut self) {
		let (alpha, distance) = (self.alpha, self.config.link_distance);
		for link in &self.links {
			let (s, t) = (&self.nodes[link.source], &self.nodes[link.target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let mut y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 {
				x = self.rng.jiggle();
			}
			if y == 0.0 {
				y = self.rng.jiggle();
			}
			let l = (x * x + y * y).sqrt();
			let k = (l - distance) / l * alpha * link.strength;
			let (x, y) = (x * k, y * k);

			let b = link.bias;
			let target = &mut self.nodes[link.target];
			target.vx -= x * b;
			target.vy -= y * b;
			let source = &mut self.nodes[link.source];
			source.vx += x * (1.0 - b);
			source.vy += y * (1.0 - b);
		}
	}

	fn apply_charge(&mut self) {
		let strength = self.config.charge_strength * self.alpha;
		let n = self.nodes.len();
		for i in 0..n {
			let (mut dvx, mut dvy) = (0.0, 0.0);
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut x = self.nodes[j].x - self.nodes[i].x;
				let mut y = self.nodes[j].y - self.nodes[i].y;
				if x == 0.0 {
					x = self.rng.jiggle();
				}
				if y == 0.0 {
					y = self.rng.jiggle();
				}
				let mut l = x * x + y * y;
				if l < DISTANCE_MIN2 {
					l = (DISTANCE_MIN2 * l).sqrt();
				}
				let w = strength / l;
				dvx += x * w;
				dvy += y * w;
			}
			self.nodes[i].vx += dvx;
			self.nodes[i].vy += dvy;
		}
	}

	fn apply_centering(&mut self) {
		let n = self.nodes.len() as f64;
		let (sx, sy) = self
			.nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let (dx, dy) = (self.center.0 - sx / n, self.center.1 - sy / n);
		for node in &mut self.nodes {
			node.x += dx;
			node.y += dy;
		}
	}

	fn apply_collision(&mut self) {
		let n = self.nodes.len();
		for i in 0..n {
			let xi = self.nodes[i].x + self.nodes[i].vx;
			let yi = self.nodes[i].y + self.nodes[i].vy;
			let ri = self.nodes[i].radius;
			let ri2 = ri * ri;
			for j in (i + 1)..n {
				let rj = self.nodes[j].radius;
				let r = ri + rj;
				let mut x = xi - self.nodes[j].x - self.nodes[j].vx;
				let mut y = yi - self.nodes[j].y - self.nodes[j].vy;
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = self.rng.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.rng.jiggle();
					l += y * y;
				}
				let d = l.sqrt();
				let k = (r - d) / d * COLLIDE_STRENGTH;
				let (x, y) = (x * k, y * k);
				let rj2 = rj * rj;
				let ratio = rj2 / (ri2 + rj2);

				self.nodes[i].vx += x * ratio;
				self.nodes[i].vy += y * ratio;
				self.nodes[j].vx -= x * (1.0 - ratio);
				self.nodes[j].vy -= y * (1.0 - ratio);
			}
		}
	}

	fn integrate(&mut self) {
		let keep = 1.0 - self.config.velocity_decay;
		for node in &mut self.nodes {
			if let PinState::Pinned { x, y } = node.pin {
				node.x = x;
				node.y = y;
				node.vx = 0.0;
				node.vy = 0.0;
			} else {
				node.vx *= keep;
				node.vy *= keep;
				node.x += node.vx;
				node.y += node.vy;
			}
		}
	}

	/// Hold `id` at `(x, y)`. Returns false for an unknown node.
	pub fn pin(&mut self, id: &str, x: f64, y: f64) -> bool {
		let Some(&i) = self.index.get(id) else {
			return false;
		};
		let node = &mut self.nodes[i];
		node.pin = PinState::Pinned { x, y };
		node.x = x;
		node.y = y;
		true
	}

	/// Let go of `id`; it rejoins the simulation on the next tick.
	pub fn release(&mut self, id: &str) -> bool {
		let Some(&i) = self.index.get(id) else {
			return false;
		};
		let node = &mut self.nodes[i];
		if matches!(node.pin, PinState::Pinned { .. }) {
			node.pin = PinState::Released;
		}
		true
	}

	/// Pin state of `id`.
	pub fn pin_state(&self, id: &str) -> Option<PinState> {
		self.index.get(id).map(|&i| self.nodes[i].pin)
	}

	/// Current position of `id`.
	pub fn position(&self, id: &str) -> Option<(f64, f64)> {
		self.index.get(id).map(|&i| (self.nodes[i].x, self.nodes[i].y))
	}

	/// Every node, in model order (later ones drawn on top).
	pub fn nodes(&self) -> impl Iterator<Item = NodePosition<'_>> {
		self.nodes.iter().enumerate().map(|(index, n)| NodePosition {
			index,
			id: &n.id,
			x: n.x,
			y: n.y,
			radius: n.radius,
		})
	}

	/// Every link of the model, including self-loops, in model order.
	pub fn links<'a>(&'a self, model: &'a GraphModel) -> impl Iterator<Item = LinkSegment> + 'a {
		model.links().iter().enumerate().filter_map(move |(index, link)| {
			let s = &self.nodes[*self.index.get(&link.source)?];
			let t = &self.nodes[*self.index.get(&link.target)?];
			Some(LinkSegment {
				index,
				from: (s.x, s.y),
				to: (t.x, t.y),
				target_radius: t.radius,
			})
		})
	}

	/// Topmost node whose disc contains `(x, y)`.
	pub fn node_at(&self, x: f64, y: f64) -> Option<&str> {
		self.nodes
			.iter()
			.rev()
			.find(|n| {
				let (dx, dy) = (n.x - x, n.y - y);
				(dx * dx + dy * dy).sqrt() <= n.radius.max(1.0)
			})
			.map(|n| n.id.as_str())
	}

	/// Point the centering force pulls toward.
	pub fn set_center(&mut self, x: f64, y: f64) {
		self.center = (x, y);
	}

	/// Current centering point.
	pub fn center(&self) -> (f64, f64) {
		self.center
	}

	/// Current temperature.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Value alpha decays toward.
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Change what alpha decays toward.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Tunables in use.
	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// Whether [`ForceLayout::step`] still ticks.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Ticks run so far.
	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	/// Number of simulated nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of links that pull on their endpoints (self-loops excluded).
	pub fn spring_count(&self) -> usize {
		self.link_slots.iter().flatten().count()
	}
}
