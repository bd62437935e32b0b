//! The graph currently shown, exactly as the backend last described it.

use std::collections::HashMap;

use log::{info, warn};

use super::types::{GraphLink, GraphNode, GraphPayload};
use crate::error::{ClientError, Result};

/// Nodes and links of the rendered graph.
///
/// There is no incremental mutation: every change is a full [`load`](Self::load),
/// which validates the whole snapshot before replacing anything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphModel {
	nodes: Vec<GraphNode>,
	links: Vec<GraphLink>,
	index: HashMap<String, usize>,
	revision: u64,
}

impl GraphModel {
	/// Empty model at revision 0.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the whole graph. On error the previous graph is left untouched.
	pub fn load(&mut self, nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> Result<()> {
		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			if index.insert(node.id.clone(), i).is_some() {
				return Err(ClientError::malformed(format!(
					"duplicate node id '{}'",
					node.id
				)));
			}
		}
		for link in &links {
			for end in [&link.source, &link.target] {
				if !index.contains_key(end) {
					return Err(ClientError::malformed(format!(
						"link '{}' references unknown node '{}'",
						link.relationship, end
					)));
				}
			}
		}

		self.nodes = nodes;
		self.links = links;
		self.index = index;
		self.revision += 1;
		info!(
			"graph loaded: {} nodes, {} links (revision {})",
			self.nodes.len(),
			self.links.len(),
			self.revision
		);
		Ok(())
	}

	/// Load from a `GET data` body.
	pub fn load_payload(&mut self, payload: GraphPayload) -> Result<()> {
		if let Some(status) = payload.status.as_deref() {
			if status != "success" && (payload.nodes.is_none() || payload.links.is_none()) {
				return Err(ClientError::Service(
					payload
						.message
						.unwrap_or_else(|| "Failed to load graph".to_string()),
				));
			}
		}
		let (Some(nodes), Some(links)) = (payload.nodes, payload.links) else {
			warn!("graph payload without nodes/links collections");
			return Err(ClientError::malformed("missing nodes or links collection"));
		};
		self.load(nodes, links)
	}

	/// Drop every node and link.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.links.clear();
		self.index.clear();
		self.revision += 1;
		info!("graph cleared (revision {})", self.revision);
	}

	/// Whether there are no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of links.
	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	/// Nodes in backend order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Links in backend order.
	pub fn links(&self) -> &[GraphLink] {
		&self.links
	}

	/// Node with identifier `id`.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// Position of `id` in [`nodes`](Self::nodes).
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Bumped on every successful load or clear.
	pub fn revision(&self) -> u64 {
		self.revision
	}
}
