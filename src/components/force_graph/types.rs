//! Graph data as the backend sends it.

use serde::{Deserialize, Deserializer, Serialize};

/// Node identifiers arrive as integers from `GET data`; strings are accepted too.
fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum RawId {
		Int(i64),
		Str(String),
	}

	Ok(match RawId::deserialize(deserializer)? {
		RawId::Int(n) => n.to_string(),
		RawId::Str(s) => s,
	})
}

fn default_size() -> f64 {
	10.0
}

/// A node as listed by `GET data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Backend id, normalized to a string.
	#[serde(deserialize_with = "id_from_any")]
	pub id: String,
	/// Entity name.
	pub label: String,
	/// Visual radius; also the collision radius.
	#[serde(default = "default_size")]
	pub size: f64,
}

/// A directed, labeled edge between two node ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
	/// Id of the start node.
	#[serde(deserialize_with = "id_from_any")]
	pub source: String,
	/// Id of the end node.
	#[serde(deserialize_with = "id_from_any")]
	pub target: String,
	/// Relationship label.
	#[serde(default)]
	pub relationship: String,
}

/// Raw body of `GET data`. Collections are optional so that a missing one can
/// be reported instead of silently defaulting to empty.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphPayload {
	/// Every node.
	pub nodes: Option<Vec<GraphNode>>,
	/// Every edge.
	pub links: Option<Vec<GraphLink>>,
	/// Only set on error replies.
	#[serde(default)]
	pub status: Option<String>,
	/// Error text from the backend.
	#[serde(default)]
	pub message: Option<String>,
}
