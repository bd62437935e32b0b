//! Query results flattened into titles, sections and arrow chains.
//!
//! Pure: nothing here touches the network, the DOM or any state.

use std::fmt;

use super::result::{NeighborResult, PathResult, QueryResult, RelationshipResult};

/// One piece of a chain line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
	/// An entity name, shown in bold.
	Entity(String),
	/// Printed as `--[label]-->`.
	Arrow(String),
}

/// `A --[rel]--> B --[rel]--> C`, optionally prefixed by a label such as `Path 1`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainLine {
	/// Prefix such as `Path 2`.
	pub label: Option<String>,
	/// Alternating entities and arrows.
	pub segments: Vec<Segment>,
}

impl ChainLine {
	fn edge(source: &str, relationship: &str, target: &str) -> Self {
		Self {
			label: None,
			segments: vec![
				Segment::Entity(source.to_string()),
				Segment::Arrow(relationship.to_string()),
				Segment::Entity(target.to_string()),
			],
		}
	}

	/// Number of relationship arrows.
	pub fn arrow_count(&self) -> usize {
		self.segments
			.iter()
			.filter(|s| matches!(s, Segment::Arrow(_)))
			.count()
	}

	/// The chain without its label.
	pub fn chain(&self) -> String {
		self.segments
			.iter()
			.map(|segment| match segment {
				Segment::Entity(name) => name.clone(),
				Segment::Arrow(rel) => format!("--[{rel}]-->"),
			})
			.collect::<Vec<_>>()
			.join(" ")
	}
}

impl fmt::Display for ChainLine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.label {
			Some(label) => write!(f, "{label}: {}", self.chain()),
			None => f.write_str(&self.chain()),
		}
	}
}

/// A group of lines under an optional heading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultSection {
	/// Heading such as `Outgoing Relationships:`.
	pub heading: Option<String>,
	/// Lines in display order.
	pub lines: Vec<ChainLine>,
}

/// Display structure shared by every query mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultView {
	/// Heading of the whole result.
	pub title: String,
	/// Count line such as `Paths Found: 2`.
	pub summary: Option<String>,
	/// Listed lines, grouped.
	pub sections: Vec<ResultSection>,
	/// Set instead of sections when there is nothing to list.
	pub empty_text: Option<String>,
}

impl ResultView {
	/// Every line of every section.
	pub fn lines(&self) -> impl Iterator<Item = &ChainLine> {
		self.sections.iter().flat_map(|s| s.lines.iter())
	}
}

/// Lay out `result` for display.
pub fn render(result: &QueryResult) -> ResultView {
	match result {
		QueryResult::Neighbors(r) => render_neighbors(r),
		QueryResult::Path(r) => render_paths(r),
		QueryResult::Relationship(r) => render_relationships(r),
	}
}

fn render_neighbors(result: &NeighborResult) -> ResultView {
	let entity = &result.entity;
	let mut view = ResultView {
		title: format!("Neighbors of: {entity}"),
		..ResultView::default()
	};
	let outgoing = &result.neighbors.outgoing;
	let incoming = &result.neighbors.incoming;

	if !outgoing.is_empty() {
		view.sections.push(ResultSection {
			heading: Some("Outgoing Relationships:".into()),
			lines: outgoing
				.iter()
				.map(|e| ChainLine::edge(entity, &e.relationship, &e.target))
				.collect(),
		});
	}
	if !incoming.is_empty() {
		view.sections.push(ResultSection {
			heading: Some("Incoming Relationships:".into()),
			lines: incoming
				.iter()
				.map(|e| ChainLine::edge(&e.source, &e.relationship, entity))
				.collect(),
		});
	}
	if outgoing.is_empty() && incoming.is_empty() {
		view.empty_text = Some("No relationships found for this entity".into());
	}
	view
}

fn render_paths(result: &PathResult) -> ResultView {
	let mut view = ResultView {
		title: format!("Paths from {} to {}", result.source, result.target),
		summary: Some(format!("Paths Found: {}", result.paths_found)),
		..ResultView::default()
	};
	if result.paths_found == 0 || result.paths.is_empty() {
		view.empty_text = Some("No paths found between these entities".into());
		return view;
	}

	let lines = result
		.paths
		.iter()
		.enumerate()
		.map(|(i, path)| {
			let mut segments = Vec::with_capacity(path.len() * 2);
			for (j, step) in path.iter().enumerate() {
				segments.push(Segment::Entity(step.entity.clone()));
				if j + 1 < path.len() {
					let rel = step.relationship.clone().unwrap_or_else(|| "unknown".into());
					segments.push(Segment::Arrow(rel));
				}
			}
			ChainLine {
				label: Some(format!("Path {}", i + 1)),
				segments,
			}
		})
		.collect();
	view.sections.push(ResultSection {
		heading: None,
		lines,
	});
	view
}

fn render_relationships(result: &RelationshipResult) -> ResultView {
	let mut view = ResultView {
		title: format!("Relationships of type: {}", result.relationship),
		summary: Some(format!("Count: {}", result.count)),
		..ResultView::default()
	};
	if result.count == 0 || result.results.is_empty() {
		view.empty_text = Some("No relationships of this type found".into());
		return view;
	}
	view.sections.push(ResultSection {
		heading: None,
		lines: result
			.results
			.iter()
			.map(|t| ChainLine::edge(&t.source, &t.relationship, &t.target))
			.collect(),
	});
	view
}
