//! In-memory stand-in for the graph service, answering the same JSON the
//! HTTP backend does.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use knowledge_graph_canvas::api::{ApiRequest, Endpoint, RawResponse, RequestBody, Transport};
use knowledge_graph_canvas::error::Result;
use serde_json::{Value, json};

const PATH_CUTOFF: usize = 5;
const MAX_PATHS: usize = 10;

#[derive(Default)]
struct Dataset {
	nodes: Vec<String>,
	/// Outgoing edges per node, in insertion order.
	out: Vec<Vec<(usize, String)>>,
	relationship_count: BTreeMap<String, i64>,
}

impl Dataset {
	fn find(&self, name: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n == name)
	}

	fn find_ci(&self, name: &str) -> Option<usize> {
		let name = name.to_lowercase();
		self.nodes.iter().position(|n| n.to_lowercase() == name)
	}

	fn intern(&mut self, name: &str) -> usize {
		self.find(name).unwrap_or_else(|| {
			self.nodes.push(name.to_string());
			self.out.push(Vec::new());
			self.nodes.len() - 1
		})
	}

	fn edges(&self) -> impl Iterator<Item = (usize, usize, &str)> {
		self.out
			.iter()
			.enumerate()
			.flat_map(|(s, targets)| targets.iter().map(move |(t, r)| (s, *t, r.as_str())))
	}

	fn add(&mut self, entity1: &str, relationship: &str, entity2: &str) -> std::result::Result<String, String> {
		let (e1, rel, e2) = (entity1.trim(), relationship.trim(), entity2.trim());
		if e1.is_empty() || rel.is_empty() || e2.is_empty() {
			return Err("All fields (Entity 1, Relationship, Entity 2) are required".into());
		}
		let (s, t) = (self.intern(e1), self.intern(e2));
		match self.out[s].iter_mut().find(|(target, _)| *target == t) {
			Some(edge) => edge.1 = rel.to_string(),
			None => self.out[s].push((t, rel.to_string())),
		}
		*self.relationship_count.entry(rel.to_string()).or_default() += 1;
		Ok(format!("Relationship added: {e1} --[{rel}]--> {e2}"))
	}

	fn in_degree(&self, node: usize) -> usize {
		self.edges().filter(|(_, t, _)| *t == node).count()
	}

	fn stats(&self) -> Value {
		json!({
			"total_entities": self.nodes.len(),
			"total_relationships": self.edges().count(),
			"relationship_types": self.relationship_count,
		})
	}

	fn simple_paths(&self, at: usize, target: usize, trail: &mut Vec<usize>, found: &mut Vec<Vec<usize>>) {
		if trail.len() > PATH_CUTOFF {
			return;
		}
		for (next, _) in &self.out[at] {
			if trail.contains(next) {
				continue;
			}
			trail.push(*next);
			if *next == target {
				found.push(trail.clone());
			} else {
				self.simple_paths(*next, target, trail, found);
			}
			trail.pop();
		}
	}

	fn relationship(&self, s: usize, t: usize) -> &str {
		self.out[s]
			.iter()
			.find(|(target, _)| *target == t)
			.map_or("unknown", |(_, r)| r.as_str())
	}
}

/// A [`Transport`] backed by an in-process dataset. Records every request.
#[derive(Default)]
pub struct InMemoryBackend {
	data: RefCell<Dataset>,
	pub sent: RefCell<Vec<Endpoint>>,
}

fn reply(status: u16, body: Value) -> RawResponse {
	RawResponse {
		status,
		body: body.to_string(),
	}
}

fn error(status: u16, message: &str) -> RawResponse {
	reply(status, json!({"status": "error", "message": message}))
}

fn field<'a>(body: &'a Value, name: &str) -> &'a str {
	body.get(name).and_then(Value::as_str).unwrap_or_default()
}

impl InMemoryBackend {
	/// A backend seeded with `(entity1, relationship, entity2)` triples.
	pub fn seeded(triples: &[(&str, &str, &str)]) -> Self {
		let backend = Self::default();
		{
			let mut data = backend.data.borrow_mut();
			for (e1, rel, e2) in triples {
				data.add(e1, rel, e2).expect("valid triple");
			}
		}
		backend
	}

	/// Whether any request reached this backend.
	pub fn was_called(&self) -> bool {
		!self.sent.borrow().is_empty()
	}

	fn handle(&self, endpoint: Endpoint, body: RequestBody) -> RawResponse {
		let json = match &body {
			RequestBody::Json(value) => value.clone(),
			_ => Value::Null,
		};
		match endpoint {
			Endpoint::AddRelationship => {
				let mut data = self.data.borrow_mut();
				match data.add(field(&json, "entity1"), field(&json, "relationship"), field(&json, "entity2")) {
					Ok(message) => reply(200, json!({"status": "success", "message": message, "graph_stats": data.stats()})),
					Err(message) => error(400, &message),
				}
			}
			Endpoint::RemoveRelationship => self.remove(field(&json, "entity1"), field(&json, "entity2")),
			Endpoint::UploadCsv => match body {
				RequestBody::File(upload) => self.upload(&String::from_utf8_lossy(&upload.bytes)),
				_ => error(400, "No file provided"),
			},
			Endpoint::QueryNeighbors => self.neighbors(field(&json, "entity").trim()),
			Endpoint::FindPath => self.paths(field(&json, "source").trim(), field(&json, "target").trim()),
			Endpoint::SearchRelationship => self.search(field(&json, "relationship")),
			Endpoint::Stats => reply(200, json!({"status": "success", "stats": self.data.borrow().stats()})),
			Endpoint::Data => self.graph_data(),
			Endpoint::Export => self.export(),
			Endpoint::Clear => {
				*self.data.borrow_mut() = Dataset::default();
				reply(200, json!({"status": "success", "message": "Graph cleared"}))
			}
		}
	}

	fn remove(&self, entity1: &str, entity2: &str) -> RawResponse {
		let mut data = self.data.borrow_mut();
		let found = data.find(entity1).zip(data.find(entity2)).and_then(|(s, t)| {
			let at = data.out[s].iter().position(|(target, _)| *target == t)?;
			Some(data.out[s].remove(at).1)
		});
		let Some(relationship) = found else {
			return error(404, &format!("No relationship found between {entity1} and {entity2}"));
		};
		let remaining = data.relationship_count.get_mut(&relationship).map(|count| {
			*count -= 1;
			*count
		});
		if remaining == Some(0) {
			data.relationship_count.remove(&relationship);
		}
		reply(
			200,
			json!({"status": "success", "message": format!("Relationship removed: {entity1} --[{relationship}]--> {entity2}")}),
		)
	}

	fn upload(&self, text: &str) -> RawResponse {
		let mut lines = text.lines().filter(|l| !l.trim().is_empty());
		let header: Vec<&str> = lines.next().unwrap_or_default().split(',').map(str::trim).collect();
		let column = |name: &str| header.iter().position(|h| *h == name);
		let (Some(c1), Some(cr), Some(c2)) = (column("entity1"), column("relationship"), column("entity2")) else {
			return error(400, "CSV must contain columns: entity1, relationship, entity2");
		};

		let mut data = self.data.borrow_mut();
		let (mut added, mut total, mut errors) = (0, 0, Vec::new());
		for (idx, line) in lines.enumerate() {
			total += 1;
			let cells: Vec<&str> = line.split(',').collect();
			let cell = |i: usize| cells.get(i).copied().unwrap_or_default();
			match data.add(cell(c1), cell(cr), cell(c2)) {
				Ok(_) => added += 1,
				Err(message) => errors.push(json!({"row": idx + 1, "error": message})),
			}
		}
		reply(
			200,
			json!({
				"status": if added > 0 { "success" } else { "error" },
				"added_count": added,
				"total_count": total,
				"errors": errors,
			}),
		)
	}

	fn neighbors(&self, entity: &str) -> RawResponse {
		let data = self.data.borrow();
		let Some(node) = data.find_ci(entity) else {
			return error(404, &format!("Entity '{entity}' not found in graph"));
		};
		let outgoing: Vec<Value> = data.out[node]
			.iter()
			.map(|(t, r)| json!({"target": data.nodes[*t], "relationship": r}))
			.collect();
		let incoming: Vec<Value> = data
			.edges()
			.filter(|(_, t, _)| *t == node)
			.map(|(s, _, r)| json!({"source": data.nodes[s], "relationship": r}))
			.collect();
		reply(
			200,
			json!({
				"status": "success",
				"entity": entity,
				"neighbors": {"outgoing": outgoing, "incoming": incoming},
			}),
		)
	}

	fn paths(&self, source: &str, target: &str) -> RawResponse {
		let data = self.data.borrow();
		let (Some(s), Some(t)) = (data.find_ci(source), data.find_ci(target)) else {
			return error(404, "Source or target entity not found");
		};
		let mut found = Vec::new();
		if s != t {
			data.simple_paths(s, t, &mut vec![s], &mut found);
		}
		let formatted: Vec<Value> = found
			.iter()
			.take(MAX_PATHS)
			.map(|path| {
				let mut steps: Vec<Value> = path
					.windows(2)
					.map(|w| json!({"entity": data.nodes[w[0]], "relationship": data.relationship(w[0], w[1])}))
					.collect();
				steps.push(json!({"entity": data.nodes[t]}));
				Value::Array(steps)
			})
			.collect();
		reply(
			200,
			json!({
				"status": "success",
				"source": source,
				"target": target,
				"paths_found": found.len(),
				"paths": formatted,
			}),
		)
	}

	fn search(&self, relationship: &str) -> RawResponse {
		let data = self.data.borrow();
		let wanted = relationship.to_lowercase();
		let results: Vec<Value> = data
			.edges()
			.filter(|(_, _, r)| r.to_lowercase() == wanted)
			.map(|(s, t, r)| json!({"source": data.nodes[s], "target": data.nodes[t], "relationship": r}))
			.collect();
		reply(
			200,
			json!({
				"status": "success",
				"relationship": relationship,
				"count": results.len(),
				"results": results,
			}),
		)
	}

	fn graph_data(&self) -> RawResponse {
		let data = self.data.borrow();
		let nodes: Vec<Value> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, label)| json!({"id": i, "label": label, "size": data.in_degree(i) + data.out[i].len() + 10}))
			.collect();
		let links: Vec<Value> = data
			.edges()
			.map(|(s, t, r)| json!({"source": s, "target": t, "relationship": r}))
			.collect();
		reply(200, json!({"nodes": nodes, "links": links}))
	}

	fn export(&self) -> RawResponse {
		let data = self.data.borrow();
		let edges: Vec<Value> = data
			.edges()
			.map(|(s, t, r)| json!({"source": data.nodes[s], "target": data.nodes[t], "relationship": r}))
			.collect();
		let document = json!({"nodes": data.nodes, "edges": edges, "stats": data.stats()});
		RawResponse {
			status: 200,
			body: serde_json::to_string_pretty(&document).unwrap_or_default(),
		}
	}
}

impl Transport for InMemoryBackend {
	async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
		self.sent.borrow_mut().push(request.endpoint);
		Ok(self.handle(request.endpoint, request.body))
	}
}

/// The sample catalogue used across the integration tests.
pub const CATALOGUE: &[(&str, &str, &str)] = &[
	("Laptop", "belongs_to", "Electronics"),
	("Laptop", "sold_by", "Amazon"),
	("iPhone", "belongs_to", "Electronics"),
	("Customer1", "purchases_from", "Amazon"),
	("Seller1", "partner_of", "Amazon"),
];
