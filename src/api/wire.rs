//! Request and reply bodies of the graph backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which edges a neighbor query returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	/// Incoming edges only.
	In,
	/// Outgoing edges only.
	Out,
	/// Both directions.
	#[default]
	Both,
}

/// Body of `POST add-relationship`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AddRelationshipRequest {
	/// Source entity.
	pub entity1: String,
	/// Relationship label.
	pub relationship: String,
	/// Target entity.
	pub entity2: String,
}

/// Body of `POST remove-relationship`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RemoveRelationshipRequest {
	/// Source entity.
	pub entity1: String,
	/// Target entity.
	pub entity2: String,
}

/// Body of `POST query-neighbors`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NeighborsRequest {
	/// Entity to look around.
	pub entity: String,
	/// Which edges to return.
	pub direction: Direction,
}

/// Body of `POST find-path`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathRequest {
	/// Where paths start.
	pub source: String,
	/// Where paths end.
	pub target: String,
}

/// Body of `POST search-relationship`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RelationshipRequest {
	/// Label to search for, matched ignoring case.
	pub relationship: String,
}

/// The `status`/`message` pair every JSON reply carries.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Envelope {
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub message: Option<String>,
}

impl Envelope {
	pub fn is_success(&self) -> bool {
		self.status.as_deref() == Some("success")
	}
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct CommandReply {
	#[serde(default)]
	pub message: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct StatsReply {
	pub stats: GraphStats,
}

/// Counts shown in the header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
	/// Number of entities.
	pub total_entities: usize,
	/// Number of edges.
	pub total_relationships: usize,
	/// Times each label was added.
	#[serde(default)]
	pub relationship_types: BTreeMap<String, u64>,
}

impl GraphStats {
	/// Relationship labels joined for display, `-` when there are none.
	pub fn relationship_type_list(&self) -> String {
		if self.relationship_types.is_empty() {
			return "-".to_string();
		}
		self.relationship_types
			.keys()
			.map(String::as_str)
			.collect::<Vec<_>>()
			.join(", ")
	}
}

/// A CSV row the backend refused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
	/// 1-based data row.
	pub row: usize,
	/// Why it was refused.
	pub error: String,
}

/// Outcome of a CSV import.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UploadReport {
	/// `success` or `error`.
	#[serde(default)]
	pub status: Option<String>,
	/// Rows turned into relationships.
	#[serde(default)]
	pub added_count: usize,
	/// Data rows read.
	#[serde(default)]
	pub total_count: usize,
	/// Rows that were skipped.
	#[serde(default)]
	pub errors: Vec<RowError>,
	/// Set when the whole file was rejected.
	#[serde(default)]
	pub message: Option<String>,
}

impl UploadReport {
	/// The backend calls an import successful if anything was added.
	pub fn is_success(&self) -> bool {
		self.status.as_deref() == Some("success") || self.added_count > 0
	}

	/// `Added N relationships`, plus the skipped row count if any.
	pub fn summary(&self) -> String {
		let mut text = format!("Added {} relationships", self.added_count);
		if !self.errors.is_empty() {
			text.push_str(&format!(" ({} rows skipped)", self.errors.len()));
		}
		text
	}
}
