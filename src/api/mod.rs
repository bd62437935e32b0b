//! Client side of the graph backend's request/response contract.

mod client;
pub mod transport;
pub mod wire;

pub use client::GraphClient;
pub use transport::{ApiRequest, CsvUpload, Endpoint, HttpTransport, RawResponse, RequestBody, Transport};
pub use wire::{Direction, GraphStats, NeighborsRequest, PathRequest, RelationshipRequest, UploadReport};
