//! Query dispatch and result rendering.

mod dispatcher;
pub mod render;
mod result;

pub use dispatcher::{QueryDispatcher, QueryInputs, QueryMode, QueryRequest};
pub use render::{ChainLine, ResultSection, ResultView, Segment, render};
pub use result::{
	IncomingEdge, NeighborResult, Neighbors, OutgoingEdge, PathResult, PathStep, QueryResult,
	RelationshipResult, Triple,
};
