use std::fmt;
use std::str::FromStr;

use log::{debug, info};

use super::result::QueryResult;
use crate::api::{Direction, GraphClient, NeighborsRequest, PathRequest, RelationshipRequest, Transport};
use crate::error::{ClientError, Result};

const ENTITY_REQUIRED: &str = "Please enter an entity name";
const TARGET_REQUIRED: &str = "Please enter a target entity";

/// The three kinds of question a user can ask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum QueryMode {
	/// Edges around one entity.
	#[default]
	Neighbors,
	/// Paths from a source to a target.
	Path,
	/// Edges with one label.
	Relationship,
}

impl QueryMode {
	/// Every mode, in picker order.
	pub const ALL: [QueryMode; 3] = [Self::Neighbors, Self::Path, Self::Relationship];

	/// Value used by the mode picker.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Neighbors => "neighbors",
			Self::Path => "path",
			Self::Relationship => "relationship",
		}
	}

	/// Label for the mode picker.
	pub fn label(self) -> &'static str {
		match self {
			Self::Neighbors => "Find Neighbors",
			Self::Path => "Find Path",
			Self::Relationship => "Search by Relationship",
		}
	}

	/// Whether the target-entity field is shown.
	pub fn needs_target(self) -> bool {
		self == Self::Path
	}
}

impl fmt::Display for QueryMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for QueryMode {
	type Err = ClientError;

	fn from_str(s: &str) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|mode| mode.as_str() == s)
			.ok_or_else(|| ClientError::validation(format!("unknown query type '{s}'")))
	}
}

/// What the user typed into the query form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryInputs {
	/// Entity name, source entity, or relationship label depending on the mode.
	pub entity: String,
	/// Target entity; only read in path mode.
	pub target: String,
}

impl QueryInputs {
	/// Inputs as typed; trimming happens in [`QueryRequest::build`].
	pub fn new(entity: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			entity: entity.into(),
			target: target.into(),
		}
	}
}

/// A validated query, ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryRequest {
	/// `query-neighbors`
	Neighbors(NeighborsRequest),
	/// `find-path`
	Path(PathRequest),
	/// `search-relationship`
	Relationship(RelationshipRequest),
}

impl QueryRequest {
	/// Validate `inputs` for `mode`. Failing here means nothing is sent.
	pub fn build(mode: QueryMode, inputs: &QueryInputs) -> Result<Self> {
		let entity = inputs.entity.trim();
		if entity.is_empty() {
			return Err(ClientError::validation(ENTITY_REQUIRED));
		}
		Ok(match mode {
			QueryMode::Neighbors => Self::Neighbors(NeighborsRequest {
				entity: entity.to_string(),
				direction: Direction::Both,
			}),
			QueryMode::Path => {
				let target = inputs.target.trim();
				if target.is_empty() {
					return Err(ClientError::validation(TARGET_REQUIRED));
				}
				Self::Path(PathRequest {
					source: entity.to_string(),
					target: target.to_string(),
				})
			}
			QueryMode::Relationship => Self::Relationship(RelationshipRequest {
				relationship: entity.to_string(),
			}),
		})
	}

	/// Mode this request answers.
	pub fn mode(&self) -> QueryMode {
		match self {
			Self::Neighbors(_) => QueryMode::Neighbors,
			Self::Path(_) => QueryMode::Path,
			Self::Relationship(_) => QueryMode::Relationship,
		}
	}
}

/// Turns a mode and its inputs into a typed result. Never retries.
#[derive(Clone, Debug)]
pub struct QueryDispatcher<T> {
	client: GraphClient<T>,
}

impl<T: Transport> QueryDispatcher<T> {
	/// Dispatcher over `client`.
	pub fn new(client: GraphClient<T>) -> Self {
		Self { client }
	}

	/// The client queries go through.
	pub fn client(&self) -> &GraphClient<T> {
		&self.client
	}

	/// Validate, then send. Validation errors never reach the transport.
	pub async fn dispatch(&self, mode: QueryMode, inputs: &QueryInputs) -> Result<QueryResult> {
		let request = QueryRequest::build(mode, inputs)?;
		self.send(request).await
	}

	/// Send an already validated request.
	pub async fn send(&self, request: QueryRequest) -> Result<QueryResult> {
		debug!("dispatching {} query", request.mode());
		let result = match request {
			QueryRequest::Neighbors(req) => {
				QueryResult::Neighbors(self.client.query_neighbors(&req).await?)
			}
			QueryRequest::Path(req) => QueryResult::Path(self.client.find_path(&req).await?),
			QueryRequest::Relationship(req) => {
				QueryResult::Relationship(self.client.search_relationship(&req).await?)
			}
		};
		info!("{} query completed", result.mode());
		Ok(result)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mode_round_trips_through_select_values() {
		for mode in QueryMode::ALL {
			assert_eq!(mode.as_str().parse::<QueryMode>().unwrap(), mode);
		}
		assert!("shortest".parse::<QueryMode>().is_err());
	}

	#[test]
	fn neighbors_requires_entity() {
		let err = QueryRequest::build(QueryMode::Neighbors, &QueryInputs::new("   ", "")).unwrap_err();
		assert_eq!(err, ClientError::Validation(ENTITY_REQUIRED.into()));
	}

	#[test]
	fn path_requires_target_with_its_own_message() {
		let err = QueryRequest::build(QueryMode::Path, &QueryInputs::new("Customer1", " ")).unwrap_err();
		assert_eq!(err, ClientError::Validation(TARGET_REQUIRED.into()));
		let err = QueryRequest::build(QueryMode::Path, &QueryInputs::new("", "Amazon")).unwrap_err();
		assert_eq!(err, ClientError::Validation(ENTITY_REQUIRED.into()));
	}

	#[test]
	fn relationship_reuses_entity_message() {
		let err = QueryRequest::build(QueryMode::Relationship, &QueryInputs::default()).unwrap_err();
		assert_eq!(err, ClientError::Validation(ENTITY_REQUIRED.into()));
	}

	#[test]
	fn requests_are_trimmed() {
		let request =
			QueryRequest::build(QueryMode::Path, &QueryInputs::new(" Customer1 ", " Amazon")).unwrap();
		assert_eq!(
			request,
			QueryRequest::Path(PathRequest {
				source: "Customer1".into(),
				target: "Amazon".into(),
			})
		);
		let request = QueryRequest::build(QueryMode::Neighbors, &QueryInputs::new("Laptop", "ignored")).unwrap();
		assert_eq!(
			request,
			QueryRequest::Neighbors(NeighborsRequest {
				entity: "Laptop".into(),
				direction: Direction::Both,
			})
		);
	}
}
