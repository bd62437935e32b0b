//! How requests reach the backend.

use log::debug;
use reqwest::multipart::{Form, Part};

use crate::error::Result;

/// Every backend operation the client uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// `POST add-relationship`
	AddRelationship,
	/// `POST remove-relationship`
	RemoveRelationship,
	/// `POST upload-csv`
	UploadCsv,
	/// `POST query-neighbors`
	QueryNeighbors,
	/// `POST find-path`
	FindPath,
	/// `POST search-relationship`
	SearchRelationship,
	/// `GET stats`
	Stats,
	/// `GET data`
	Data,
	/// `GET export`
	Export,
	/// `POST clear`
	Clear,
}

/// HTTP verb of an [`Endpoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	/// GET
	Get,
	/// POST
	Post,
}

impl Endpoint {
	/// Path relative to the API base.
	pub fn path(self) -> &'static str {
		match self {
			Self::AddRelationship => "add-relationship",
			Self::RemoveRelationship => "remove-relationship",
			Self::UploadCsv => "upload-csv",
			Self::QueryNeighbors => "query-neighbors",
			Self::FindPath => "find-path",
			Self::SearchRelationship => "search-relationship",
			Self::Stats => "stats",
			Self::Data => "data",
			Self::Export => "export",
			Self::Clear => "clear",
		}
	}

	/// Verb the backend expects.
	pub fn method(self) -> Method {
		match self {
			Self::Stats | Self::Data | Self::Export => Method::Get,
			_ => Method::Post,
		}
	}
}

/// A file picked for import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvUpload {
	/// Name sent with the multipart part.
	pub file_name: String,
	/// File contents.
	pub bytes: Vec<u8>,
}

/// What goes in the request body.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
	/// Nothing.
	Empty,
	/// A JSON document.
	Json(serde_json::Value),
	/// A multipart form with one `file` part.
	File(CsvUpload),
}

/// One call to the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// Operation called.
	pub endpoint: Endpoint,
	/// Its payload.
	pub body: RequestBody,
}

impl ApiRequest {
	/// A request without a body.
	pub fn get(endpoint: Endpoint) -> Self {
		Self {
			endpoint,
			body: RequestBody::Empty,
		}
	}
}

/// Status code and body of a reply, whatever the status.
///
/// The backend puts JSON error bodies on 4xx/5xx replies, so those are not
/// transport failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Body text, unparsed.
	pub body: String,
}

impl RawResponse {
	/// 2xx status.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Sends one request and hands back the raw reply.
#[allow(async_fn_in_trait)]
pub trait Transport {
	/// Fails only when no reply was received at all.
	async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// [`Transport`] over HTTP; uses the browser's fetch on wasm32.
#[derive(Clone, Debug)]
pub struct HttpTransport {
	http: reqwest::Client,
	base_url: String,
}

impl HttpTransport {
	/// `base_url` must be absolute, e.g. `http://localhost:5000/api/graph`.
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			base_url: base_url.into().trim_end_matches('/').to_string(),
		}
	}

	/// Full URL of `endpoint`.
	pub fn url(&self, endpoint: Endpoint) -> String {
		format!("{}/{}", self.base_url, endpoint.path())
	}
}

impl Transport for HttpTransport {
	async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
		let url = self.url(request.endpoint);
		let builder = match request.endpoint.method() {
			Method::Get => self.http.get(&url),
			Method::Post => self.http.post(&url),
		};
		let builder = match request.body {
			RequestBody::Empty => builder,
			RequestBody::Json(value) => builder.json(&value),
			RequestBody::File(upload) => {
				let part = Part::bytes(upload.bytes)
					.file_name(upload.file_name)
					.mime_str("text/csv")?;
				builder.multipart(Form::new().part("file", part))
			}
		};

		debug!("{:?} {}", request.endpoint.method(), url);
		let response = builder.send().await?;
		let status = response.status().as_u16();
		let body = response.text().await?;
		Ok(RawResponse { status, body })
	}
}
