use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::transport::{ApiRequest, CsvUpload, Endpoint, RawResponse, RequestBody, Transport};
use super::wire::{
	AddRelationshipRequest, CommandReply, Envelope, GraphStats, NeighborsRequest, PathRequest,
	RelationshipRequest, RemoveRelationshipRequest, StatsReply, UploadReport,
};
use crate::components::force_graph::GraphPayload;
use crate::error::{ClientError, Result};
use crate::query::{NeighborResult, PathResult, RelationshipResult};

/// Typed access to every backend operation.
#[derive(Clone, Debug)]
pub struct GraphClient<T> {
	transport: T,
}

impl<T: Transport> GraphClient<T> {
	/// Client sending every request through `transport`.
	pub fn new(transport: T) -> Self {
		Self { transport }
	}

	/// The underlying transport.
	pub fn transport(&self) -> &T {
		&self.transport
	}

	async fn post<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<RawResponse> {
		let value = serde_json::to_value(body).map_err(ClientError::transport)?;
		self.transport
			.send(ApiRequest {
				endpoint,
				body: RequestBody::Json(value),
			})
			.await
	}

	async fn get(&self, endpoint: Endpoint) -> Result<RawResponse> {
		self.transport.send(ApiRequest::get(endpoint)).await
	}

	/// Returns the backend's confirmation message.
	pub async fn add_relationship(
		&self,
		entity1: &str,
		relationship: &str,
		entity2: &str,
	) -> Result<String> {
		let request = AddRelationshipRequest {
			entity1: entity1.trim().to_string(),
			relationship: relationship.trim().to_string(),
			entity2: entity2.trim().to_string(),
		};
		if request.entity1.is_empty() || request.relationship.is_empty() || request.entity2.is_empty()
		{
			return Err(ClientError::validation("All fields are required"));
		}
		let response = self.post(Endpoint::AddRelationship, &request).await?;
		decode::<CommandReply>(response, "Failed to add relationship").map(|r| r.message)
	}

	/// Remove the edge `entity1 -> entity2`. Returns the backend's confirmation message.
	pub async fn remove_relationship(&self, entity1: &str, entity2: &str) -> Result<String> {
		let request = RemoveRelationshipRequest {
			entity1: entity1.trim().to_string(),
			entity2: entity2.trim().to_string(),
		};
		if request.entity1.is_empty() || request.entity2.is_empty() {
			return Err(ClientError::validation("Both entities are required"));
		}
		let response = self.post(Endpoint::RemoveRelationship, &request).await?;
		decode::<CommandReply>(response, "Failed to remove relationship").map(|r| r.message)
	}

	/// Import an `entity1,relationship,entity2` CSV. Fails only if nothing was added.
	pub async fn upload_csv(&self, upload: Option<CsvUpload>) -> Result<UploadReport> {
		let Some(upload) = upload else {
			return Err(ClientError::validation("Please select a file"));
		};
		let response = self
			.transport
			.send(ApiRequest {
				endpoint: Endpoint::UploadCsv,
				body: RequestBody::File(upload),
			})
			.await?;
		let report: UploadReport = parse(&response)?;
		if report.is_success() {
			Ok(report)
		} else {
			Err(ClientError::Service(
				report.message.unwrap_or_else(|| "Upload failed".to_string()),
			))
		}
	}

	/// Edges around one entity.
	pub async fn query_neighbors(&self, request: &NeighborsRequest) -> Result<NeighborResult> {
		let response = self.post(Endpoint::QueryNeighbors, request).await?;
		decode(response, "Query failed")
	}

	/// Simple directed paths between two entities.
	pub async fn find_path(&self, request: &PathRequest) -> Result<PathResult> {
		let response = self.post(Endpoint::FindPath, request).await?;
		decode(response, "Query failed")
	}

	/// Every edge carrying one label.
	pub async fn search_relationship(
		&self,
		request: &RelationshipRequest,
	) -> Result<RelationshipResult> {
		let response = self.post(Endpoint::SearchRelationship, request).await?;
		decode(response, "Query failed")
	}

	/// Entity, edge and label counts.
	pub async fn stats(&self) -> Result<GraphStats> {
		let response = self.get(Endpoint::Stats).await?;
		decode::<StatsReply>(response, "Failed to load statistics").map(|r| r.stats)
	}

	/// Raw `GET data` body; validation happens when it is loaded into a model.
	pub async fn graph_payload(&self) -> Result<GraphPayload> {
		let response = self.get(Endpoint::Data).await?;
		parse(&response)
	}

	/// The exported graph document, untouched.
	pub async fn export(&self) -> Result<String> {
		let response = self.get(Endpoint::Export).await?;
		if response.is_success() {
			return Ok(response.body);
		}
		let envelope: Envelope = parse(&response)?;
		Err(ClientError::Service(
			envelope.message.unwrap_or_else(|| "Export failed".to_string()),
		))
	}

	/// Drop the whole graph on the backend.
	pub async fn clear(&self) -> Result<()> {
		let response = self
			.transport
			.send(ApiRequest {
				endpoint: Endpoint::Clear,
				body: RequestBody::Empty,
			})
			.await?;
		decode::<CommandReply>(response, "Failed to clear graph").map(|_| ())
	}
}

/// Parse a reply body, blaming the service for unreadable error replies.
fn parse<R: DeserializeOwned>(response: &RawResponse) -> Result<R> {
	serde_json::from_str(&response.body).map_err(|err| {
		if response.is_success() {
			ClientError::transport(format!("unexpected response: {err}"))
		} else {
			ClientError::Service(format!("Request failed with HTTP {}", response.status))
		}
	})
}

/// Check the `status` envelope, then parse the full reply.
fn decode<R: DeserializeOwned>(response: RawResponse, fallback: &str) -> Result<R> {
	let envelope: Envelope = parse(&response)?;
	if !envelope.is_success() {
		let message = envelope.message.unwrap_or_else(|| fallback.to_string());
		warn!("backend rejected request: {message}");
		return Err(ClientError::Service(message));
	}
	debug!("reply {} ({} bytes)", response.status, response.body.len());
	parse(&response)
}
