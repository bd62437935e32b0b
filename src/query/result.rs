use serde::{Deserialize, Serialize};

use super::QueryMode;

/// `--[relationship]--> target`, as seen from the queried entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEdge {
	/// Relationship label.
	pub relationship: String,
	/// Entity the edge points at.
	pub target: String,
}

/// `source --[relationship]-->`, pointing at the queried entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingEdge {
	/// Entity the edge starts from.
	pub source: String,
	/// Relationship label.
	pub relationship: String,
}

/// Edges around the queried entity, split by direction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
	/// Edges leaving the entity.
	#[serde(default)]
	pub outgoing: Vec<OutgoingEdge>,
	/// Edges arriving at the entity.
	#[serde(default)]
	pub incoming: Vec<IncomingEdge>,
}

/// Reply to a neighbors query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborResult {
	/// The entity as the user typed it.
	pub entity: String,
	/// Its incident edges.
	#[serde(default)]
	pub neighbors: Neighbors,
}

/// One hop of a path. The last step of a path has no relationship.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
	/// Entity at this hop.
	pub entity: String,
	/// Label of the edge to the next hop.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub relationship: Option<String>,
}

/// Reply to a path query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
	/// Source as typed.
	pub source: String,
	/// Target as typed.
	pub target: String,
	/// Paths the backend found; it may return fewer in `paths`.
	pub paths_found: usize,
	/// At most ten paths, in the order found.
	#[serde(default)]
	pub paths: Vec<Vec<PathStep>>,
}

/// One `source --[relationship]--> target` edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
	/// Start of the edge.
	pub source: String,
	/// Relationship label.
	pub relationship: String,
	/// End of the edge.
	pub target: String,
}

/// Reply to a relationship search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipResult {
	/// Label searched for.
	pub relationship: String,
	/// Number of matching edges.
	pub count: usize,
	/// The matching edges.
	#[serde(default)]
	pub results: Vec<Triple>,
}

/// The answer to one query, shaped by the mode that asked it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryResult {
	/// Edges around one entity.
	Neighbors(NeighborResult),
	/// Directed walks between two entities.
	Path(PathResult),
	/// Edges sharing one label.
	Relationship(RelationshipResult),
}

impl QueryResult {
	/// Mode that produces this kind of result.
	pub fn mode(&self) -> QueryMode {
		match self {
			Self::Neighbors(_) => QueryMode::Neighbors,
			Self::Path(_) => QueryMode::Path,
			Self::Relationship(_) => QueryMode::Relationship,
		}
	}
}
