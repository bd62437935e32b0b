//! Force-directed graph canvas: the graph model, the layout engine, drag
//! handling and the Leptos component drawing them.

mod component;
pub mod interaction;
pub mod layout;
pub mod model;
mod render;
pub mod state;
pub mod types;

pub use component::ForceGraphCanvas;
pub use interaction::DragController;
pub use layout::{ForceLayout, LayoutConfig, LinkSegment, NodePosition, PinState};
pub use model::GraphModel;
pub use state::ForceGraphState;
pub use types::{GraphLink, GraphNode, GraphPayload};
