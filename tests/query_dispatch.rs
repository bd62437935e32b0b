mod common;

use common::{CATALOGUE, InMemoryBackend};
use futures::executor::block_on;
use knowledge_graph_canvas::api::GraphClient;
use knowledge_graph_canvas::app_state::AppState;
use knowledge_graph_canvas::error::ClientError;
use knowledge_graph_canvas::query::{QueryDispatcher, QueryInputs, QueryMode, QueryResult, render};

fn dispatcher(triples: &[(&str, &str, &str)]) -> QueryDispatcher<InMemoryBackend> {
	QueryDispatcher::new(GraphClient::new(InMemoryBackend::seeded(triples)))
}

#[test]
fn laptop_neighbors() {
	let dispatcher = dispatcher(CATALOGUE);
	let result = block_on(dispatcher.dispatch(QueryMode::Neighbors, &QueryInputs::new("laptop", ""))).unwrap();

	let QueryResult::Neighbors(neighbors) = &result else {
		panic!("expected a neighbors result, got {result:?}");
	};
	assert_eq!(neighbors.neighbors.outgoing.len(), 2);
	assert!(neighbors.neighbors.incoming.is_empty());

	let view = render(&result);
	assert_eq!(view.title, "Neighbors of: laptop");
	assert_eq!(view.sections.len(), 1);
	assert_eq!(view.sections[0].heading.as_deref(), Some("Outgoing Relationships:"));
	let lines: Vec<String> = view.lines().map(ToString::to_string).collect();
	assert_eq!(
		lines,
		[
			"laptop --[belongs_to]--> Electronics",
			"laptop --[sold_by]--> Amazon",
		]
	);
}

#[test]
fn incoming_edges_are_listed_for_hub() {
	let dispatcher = dispatcher(CATALOGUE);
	let result = block_on(dispatcher.dispatch(QueryMode::Neighbors, &QueryInputs::new("Amazon", ""))).unwrap();
	let view = render(&result);
	assert_eq!(view.sections.len(), 1);
	assert_eq!(view.sections[0].heading.as_deref(), Some("Incoming Relationships:"));
	assert_eq!(view.lines().count(), 3);
}

#[test]
fn repeated_neighbor_queries_agree() {
	let dispatcher = dispatcher(CATALOGUE);
	let inputs = QueryInputs::new("Electronics", "");
	let first = block_on(dispatcher.dispatch(QueryMode::Neighbors, &inputs)).unwrap();
	let second = block_on(dispatcher.dispatch(QueryMode::Neighbors, &inputs)).unwrap();
	assert_eq!(first, second);
}

#[test]
fn unknown_entity_reports_backend_message() {
	let dispatcher = dispatcher(CATALOGUE);
	let err = block_on(dispatcher.dispatch(QueryMode::Neighbors, &QueryInputs::new("Toaster", ""))).unwrap_err();
	assert_eq!(err, ClientError::Service("Entity 'Toaster' not found in graph".into()));
	assert_eq!(err.to_string(), "Entity 'Toaster' not found in graph");
}

#[test]
fn direct_path_between_customer_and_store() {
	let dispatcher = dispatcher(CATALOGUE);
	let result =
		block_on(dispatcher.dispatch(QueryMode::Path, &QueryInputs::new("Customer1", "Amazon"))).unwrap();
	let view = render(&result);
	assert_eq!(view.title, "Paths from Customer1 to Amazon");
	assert_eq!(view.summary.as_deref(), Some("Paths Found: 1"));
	let lines: Vec<String> = view.lines().map(ToString::to_string).collect();
	assert_eq!(lines, ["Path 1: Customer1 --[purchases_from]--> Amazon"]);
}

#[test]
fn multi_hop_paths_keep_every_arrow() {
	let mut triples = CATALOGUE.to_vec();
	triples.push(("Amazon", "manages", "Flipkart"));
	triples.push(("Customer1", "follows", "Seller1"));
	let dispatcher = dispatcher(&triples);
	let result =
		block_on(dispatcher.dispatch(QueryMode::Path, &QueryInputs::new("customer1", "FLIPKART"))).unwrap();

	let QueryResult::Path(paths) = &result else {
		panic!("expected a path result, got {result:?}");
	};
	assert_eq!(paths.paths_found, 2);
	let view = render(&result);
	let lines: Vec<_> = view.lines().collect();
	assert_eq!(lines.len(), 2);
	assert_eq!(
		lines[0].to_string(),
		"Path 1: Customer1 --[purchases_from]--> Amazon --[manages]--> Flipkart"
	);
	assert_eq!(lines[0].arrow_count(), 2);
	assert_eq!(
		lines[1].to_string(),
		"Path 2: Customer1 --[follows]--> Seller1 --[partner_of]--> Amazon --[manages]--> Flipkart"
	);
	assert_eq!(lines[1].arrow_count(), 3);
}

#[test]
fn unreachable_target_shows_empty_text() {
	let dispatcher = dispatcher(CATALOGUE);
	let result =
		block_on(dispatcher.dispatch(QueryMode::Path, &QueryInputs::new("Amazon", "Laptop"))).unwrap();
	let view = render(&result);
	assert_eq!(view.summary.as_deref(), Some("Paths Found: 0"));
	assert_eq!(view.empty_text.as_deref(), Some("No paths found between these entities"));
	assert_eq!(view.lines().count(), 0);
}

#[test]
fn relationship_search_in_graph_order() {
	let dispatcher = dispatcher(CATALOGUE);
	let result = block_on(
		dispatcher.dispatch(QueryMode::Relationship, &QueryInputs::new("BELONGS_TO", "")),
	)
	.unwrap();
	let view = render(&result);
	assert_eq!(view.summary.as_deref(), Some("Count: 2"));
	let lines: Vec<String> = view.lines().map(|line| line.chain()).collect();
	assert_eq!(
		lines,
		[
			"Laptop --[belongs_to]--> Electronics",
			"iPhone --[belongs_to]--> Electronics",
		]
	);
}

#[test]
fn invalid_input_never_reaches_backend() {
	let dispatcher = dispatcher(CATALOGUE);
	for (mode, inputs) in [
		(QueryMode::Neighbors, QueryInputs::new("  ", "")),
		(QueryMode::Path, QueryInputs::new("Customer1", "")),
		(QueryMode::Relationship, QueryInputs::default()),
	] {
		let err = block_on(dispatcher.dispatch(mode, &inputs)).unwrap_err();
		assert!(matches!(err, ClientError::Validation(_)), "{mode}: {err:?}");
	}
	assert!(!dispatcher.client().transport().was_called());
}

#[test]
fn newer_query_wins_over_slower_one() {
	let dispatcher = dispatcher(CATALOGUE);
	let mut state = AppState::new();

	let slow = state.results.begin();
	let fast = state.results.begin();
	let fast_result =
		block_on(dispatcher.dispatch(QueryMode::Relationship, &QueryInputs::new("sold_by", ""))).unwrap();
	let slow_result =
		block_on(dispatcher.dispatch(QueryMode::Neighbors, &QueryInputs::new("Laptop", ""))).unwrap();

	assert!(state.results.complete(fast, fast_result.clone()));
	assert!(!state.results.complete(slow, slow_result));
	assert_eq!(state.results.current(), Some(&fast_result));
}

#[test]
fn failed_query_keeps_previous_result() {
	let dispatcher = dispatcher(CATALOGUE);
	let mut state = AppState::new();

	let first = state.results.begin();
	let shown = block_on(dispatcher.dispatch(QueryMode::Neighbors, &QueryInputs::new("Laptop", ""))).unwrap();
	assert!(state.results.complete(first, shown.clone()));

	let second = state.results.begin();
	let err = block_on(dispatcher.dispatch(QueryMode::Neighbors, &QueryInputs::new("Toaster", ""))).unwrap_err();
	assert!(matches!(err, ClientError::Service(_)));
	assert!(state.results.is_latest(second));
	assert_eq!(state.results.current(), Some(&shown));
}
