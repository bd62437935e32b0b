//! State owned by one running client: the graph on screen, the query result
//! on display and the latest statistics.

use log::{debug, warn};

use crate::api::GraphStats;
use crate::components::force_graph::{GraphModel, GraphPayload};
use crate::error::Result;
use crate::query::QueryResult;

/// Issued when a query is sent; identifies its response when it comes back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// The displayed query result, protected against out-of-order replies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultsBoard {
	issued: u64,
	shown: Option<(Ticket, QueryResult)>,
}

impl ResultsBoard {
	/// Ticket for a query about to be sent.
	pub fn begin(&mut self) -> Ticket {
		self.issued += 1;
		Ticket(self.issued)
	}

	/// Show `result` unless a newer query's result is already on display.
	pub fn complete(&mut self, ticket: Ticket, result: QueryResult) -> bool {
		if let Some((shown, _)) = &self.shown {
			if *shown > ticket {
				debug!("dropping stale {} result ({ticket:?} < {shown:?})", result.mode());
				return false;
			}
		}
		self.shown = Some((ticket, result));
		true
	}

	/// Whether no query was started after `ticket`.
	pub fn is_latest(&self, ticket: Ticket) -> bool {
		ticket.0 == self.issued
	}

	/// Result on display.
	pub fn current(&self) -> Option<&QueryResult> {
		self.shown.as_ref().map(|(_, r)| r)
	}

	/// Forget the displayed result.
	pub fn clear(&mut self) {
		self.shown = None;
	}
}

/// Lifecycle: created empty at startup, graph replaced wholesale on every
/// reload, everything dropped on clear.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
	/// Graph on the canvas.
	pub graph: GraphModel,
	/// Query result on the results tab.
	pub results: ResultsBoard,
	/// Latest statistics, once loaded.
	pub stats: Option<GraphStats>,
	refreshes: u64,
	graph_from: Option<Ticket>,
	stats_from: Option<Ticket>,
}

fn is_stale(applied: Option<Ticket>, ticket: Ticket) -> bool {
	applied.is_some_and(|applied| applied > ticket)
}

impl AppState {
	/// Empty state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the graph. A bad payload leaves the current graph on screen.
	pub fn apply_graph_payload(&mut self, payload: GraphPayload) -> Result<()> {
		self.graph.load_payload(payload).inspect_err(|err| {
			warn!("keeping previous graph: {err}");
		})
	}

	/// Start reloading graph and statistics; replies carry the returned ticket.
	pub fn begin_refresh(&mut self) -> Ticket {
		self.refreshes += 1;
		Ticket(self.refreshes)
	}

	/// Load the graph fetched under `ticket`, unless a later refresh already
	/// loaded one. Returns whether the graph was replaced.
	pub fn apply_refreshed_graph(&mut self, ticket: Ticket, payload: GraphPayload) -> Result<bool> {
		if is_stale(self.graph_from, ticket) {
			debug!("dropping stale graph snapshot {ticket:?}");
			return Ok(false);
		}
		self.apply_graph_payload(payload)?;
		self.graph_from = Some(ticket);
		Ok(true)
	}

	/// Same as [`AppState::apply_refreshed_graph`] for statistics.
	pub fn apply_refreshed_stats(&mut self, ticket: Ticket, stats: GraphStats) -> bool {
		if is_stale(self.stats_from, ticket) {
			debug!("dropping stale statistics {ticket:?}");
			return false;
		}
		self.stats = Some(stats);
		self.stats_from = Some(ticket);
		true
	}

	/// Drop graph, result and statistics.
	pub fn clear(&mut self) {
		self.graph.clear();
		self.results.clear();
		self.stats = None;
	}
}
