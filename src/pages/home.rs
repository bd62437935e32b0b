use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlAnchorElement, HtmlInputElement};

use crate::api::{CsvUpload, GraphClient, HttpTransport, Transport};
use crate::app_state::AppState;
use crate::autofill;
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::{ResultsPanel, StatusLine};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::query::{QueryDispatcher, QueryInputs, QueryMode, QueryRequest};
use crate::status::{StatusBoard, StatusKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
	Visualization,
	Results,
}

const CLEAR_PROMPT: &str = "Are you sure you want to clear the entire graph? This cannot be undone.";
const NO_FILE: &str = "No file chosen";

fn post_status(slot: RwSignal<StatusBoard>, kind: StatusKind, text: String, timeout: Duration) {
	let expiry = slot.try_update(|board| board.show(kind, text, timeout)).flatten();
	if let Some(expiry) = expiry {
		set_timeout(
			move || {
				slot.update(|board| {
					board.expire(expiry);
				})
			},
			expiry.after,
		);
	}
}

/// Reload the graph snapshot and statistics after anything changed.
///
/// Replies overtaken by a later refresh are dropped.
async fn refresh<T: Transport>(client: GraphClient<T>, app: RwSignal<AppState>) {
	let Some(ticket) = app.try_update(AppState::begin_refresh) else {
		return;
	};
	match client.graph_payload().await {
		// a rejected payload is logged by the state and the old graph stays
		Ok(payload) => app.update(|s| {
			let _ = s.apply_refreshed_graph(ticket, payload);
		}),
		Err(err) => warn!("Error loading graph data: {err}"),
	}
	match client.stats().await {
		Ok(stats) => app.update(|s| {
			s.apply_refreshed_stats(ticket, stats);
		}),
		Err(err) => warn!("Error updating stats: {err}"),
	}
}

async fn read_selected_file(input: Option<HtmlInputElement>) -> Result<Option<CsvUpload>, ClientError> {
	let Some(file) = input.and_then(|i| i.files()).and_then(|files| files.get(0)) else {
		return Ok(None);
	};
	let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
		.await
		.map_err(|err| ClientError::transport(format!("{err:?}")))?;
	Ok(Some(CsvUpload {
		file_name: file.name(),
		bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
	}))
}

fn download_json(file_name: &str, text: &str) -> Result<(), JsValue> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let options = web_sys::BlobPropertyBag::new();
	options.set_type("application/json");
	let parts = js_sys::Array::of1(&JsValue::from_str(text));
	let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = web_sys::Url::create_object_url_with_blob(&blob)?;

	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();
	web_sys::Url::revoke_object_url(&url)
}

/// The knowledge graph explorer: editing forms, queries, statistics and the canvas.
#[component]
pub fn Home() -> impl IntoView {
	let config = ClientConfig::default();
	let origin = web_sys::window()
		.and_then(|w| w.location().origin().ok())
		.unwrap_or_default();
	let client = GraphClient::new(HttpTransport::new(config.api_url(&origin)));
	let dispatcher = QueryDispatcher::new(client.clone());
	let timeout = config.status_timeout;
	let layout_config = config.layout.clone();

	let app = RwSignal::new(AppState::new());
	let graph = Memo::new(move |_| app.with(|s| s.graph.clone()));
	let shown = Signal::derive(move || app.with(|s| s.results.current().cloned()));
	let tab = RwSignal::new(Tab::Visualization);

	let (entity1, relationship, entity2) = (
		RwSignal::new(String::new()),
		RwSignal::new(String::new()),
		RwSignal::new(String::new()),
	);
	let (remove1, remove2) = (RwSignal::new(String::new()), RwSignal::new(String::new()));
	let query_mode = RwSignal::new(QueryMode::default());
	let (query_entity, query_target) = (RwSignal::new(String::new()), RwSignal::new(String::new()));
	let file_ref = NodeRef::<leptos::html::Input>::new();
	let file_name = RwSignal::new(NO_FILE.to_string());
	let (add_status, upload_status, query_status) = (
		RwSignal::new(StatusBoard::default()),
		RwSignal::new(StatusBoard::default()),
		RwSignal::new(StatusBoard::default()),
	);

	spawn_local(refresh(client.clone(), app));

	let add_client = client.clone();
	let add = move || {
		let client = add_client.clone();
		let (e1, rel, e2) = (
			entity1.get_untracked(),
			relationship.get_untracked(),
			entity2.get_untracked(),
		);
		spawn_local(async move {
			match client.add_relationship(&e1, &rel, &e2).await {
				Ok(message) => {
					post_status(add_status, StatusKind::Success, message, timeout);
					entity1.set(String::new());
					relationship.set(String::new());
					entity2.set(String::new());
					refresh(client, app).await;
				}
				Err(err) => post_status(add_status, StatusKind::Error, err.to_string(), timeout),
			}
		});
	};
	let (add_click, add_key1, add_key2) = (add.clone(), add.clone(), add);

	let remove_client = client.clone();
	let on_remove = move |_| {
		let client = remove_client.clone();
		let (e1, e2) = (remove1.get_untracked(), remove2.get_untracked());
		spawn_local(async move {
			match client.remove_relationship(&e1, &e2).await {
				Ok(message) => {
					post_status(add_status, StatusKind::Success, message, timeout);
					remove1.set(String::new());
					remove2.set(String::new());
					refresh(client, app).await;
				}
				Err(err) => post_status(add_status, StatusKind::Error, err.to_string(), timeout),
			}
		});
	};

	let upload_client = client.clone();
	let on_upload = move |_| {
		let client = upload_client.clone();
		let input = file_ref.get_untracked();
		spawn_local(async move {
			let upload = match read_selected_file(input.clone()).await {
				Ok(upload) => upload,
				Err(err) => {
					post_status(upload_status, StatusKind::Error, err.to_string(), timeout);
					return;
				}
			};
			if upload.is_some() {
				post_status(upload_status, StatusKind::Info, "Uploading...".into(), timeout);
			}
			match client.upload_csv(upload).await {
				Ok(report) => {
					post_status(upload_status, StatusKind::Success, report.summary(), timeout);
					if let Some(input) = input {
						input.set_value("");
					}
					file_name.set(NO_FILE.to_string());
					refresh(client, app).await;
				}
				Err(err) => post_status(upload_status, StatusKind::Error, err.to_string(), timeout),
			}
		});
	};
	let on_file_change = move |_| {
		let name = file_ref
			.get_untracked()
			.and_then(|i| i.files())
			.and_then(|files| files.get(0))
			.map(|file| file.name())
			.unwrap_or_else(|| NO_FILE.to_string());
		file_name.set(name);
	};

	let run_query = move || {
		let dispatcher = dispatcher.clone();
		let inputs = QueryInputs::new(query_entity.get_untracked(), query_target.get_untracked());
		let request = match QueryRequest::build(query_mode.get_untracked(), &inputs) {
			Ok(request) => request,
			Err(err) => {
				post_status(query_status, StatusKind::Error, err.to_string(), timeout);
				return;
			}
		};
		let Some(ticket) = app.try_update(|s| s.results.begin()) else {
			return;
		};
		post_status(query_status, StatusKind::Info, "Querying...".into(), timeout);
		spawn_local(async move {
			match dispatcher.send(request).await {
				Ok(result) => {
					let displayed = app
						.try_update(|s| s.results.complete(ticket, result))
						.unwrap_or(false);
					if displayed {
						post_status(query_status, StatusKind::Success, "Query completed".into(), timeout);
						set_timeout(move || tab.set(Tab::Results), Duration::from_millis(100));
					}
				}
				// an overtaken query has no say in the status line
				Err(err) => {
					if app.with_untracked(|s| s.results.is_latest(ticket)) {
						post_status(query_status, StatusKind::Error, err.to_string(), timeout);
					}
				}
			}
		});
	};
	let (query_click, query_key) = (run_query.clone(), run_query);

	let export_client = client.clone();
	let on_export = move |_| {
		let client = export_client.clone();
		spawn_local(async move {
			let outcome = match client.export().await {
				Ok(text) => download_json("knowledge_graph.json", &text)
					.map_err(|err| ClientError::transport(format!("{err:?}"))),
				Err(err) => Err(err),
			};
			match outcome {
				Ok(()) => post_status(
					add_status,
					StatusKind::Success,
					"Graph exported successfully".into(),
					timeout,
				),
				Err(err) => post_status(add_status, StatusKind::Error, err.to_string(), timeout),
			}
		});
	};

	let clear_client = client;
	let on_clear = move |_| {
		let confirmed = web_sys::window()
			.and_then(|w| w.confirm_with_message(CLEAR_PROMPT).ok())
			.unwrap_or(false);
		if !confirmed {
			return;
		}
		let client = clear_client.clone();
		spawn_local(async move {
			match client.clear().await {
				Ok(()) => {
					post_status(add_status, StatusKind::Success, "Graph cleared".into(), timeout);
					app.update(AppState::clear);
					refresh(client, app).await;
				}
				Err(err) => post_status(add_status, StatusKind::Error, err.to_string(), timeout),
			}
		});
	};

	let on_entity1 = move |ev| {
		let value = event_target_value(&ev);
		if let Some(example) = autofill::suggest_for_entity(&value) {
			relationship.set(example.relationship.to_string());
			entity2.set(example.entity2.to_string());
		}
		entity1.set(value);
	};
	let on_relationship = move |ev| {
		let value = event_target_value(&ev);
		if let Some(target) = entity1.with_untracked(|e1| autofill::suggest_target(e1, &value)) {
			entity2.set(target.to_string());
		}
		relationship.set(value);
	};

	let stat = move |f: fn(&AppState) -> String| move || app.with(f);

	view! {
		<div class="container">
			<header>
				<h1>"Knowledge Graph"</h1>
				<div class="stats">
					<span>"Entities: " {stat(|s| s.stats.as_ref().map_or(0, |st| st.total_entities).to_string())}</span>
					<span>"Relationships: " {stat(|s| s.stats.as_ref().map_or(0, |st| st.total_relationships).to_string())}</span>
					<span>"Types: " {stat(|s| s.stats.as_ref().map_or_else(|| "-".to_string(), |st| st.relationship_type_list()))}</span>
				</div>
			</header>

			<aside class="sidebar">
				<section class="card">
					<h3>"Add Relationship"</h3>
					<input type="text" placeholder="Entity 1"
						prop:value=move || entity1.get()
						on:input=on_entity1
						on:keypress=move |ev| if ev.key() == "Enter" { add_key1() }
					/>
					<input type="text" placeholder="Relationship"
						prop:value=move || relationship.get()
						on:input=on_relationship
					/>
					<input type="text" placeholder="Entity 2"
						prop:value=move || entity2.get()
						on:input=move |ev| entity2.set(event_target_value(&ev))
						on:keypress=move |ev| if ev.key() == "Enter" { add_key2() }
					/>
					<button class="btn" on:click=move |_| add_click()>"Add"</button>

					<h4>"Remove Relationship"</h4>
					<input type="text" placeholder="Entity 1"
						prop:value=move || remove1.get()
						on:input=move |ev| remove1.set(event_target_value(&ev))
					/>
					<input type="text" placeholder="Entity 2"
						prop:value=move || remove2.get()
						on:input=move |ev| remove2.set(event_target_value(&ev))
					/>
					<button class="btn" on:click=on_remove>"Remove"</button>
					<StatusLine board=add_status />
				</section>

				<section class="card">
					<h3>"Import CSV"</h3>
					<input type="file" accept=".csv,.txt" node_ref=file_ref on:change=on_file_change />
					<span class="file-name">{move || file_name.get()}</span>
					<button class="btn" on:click=on_upload>"Upload"</button>
					<StatusLine board=upload_status />
				</section>

				<section class="card">
					<h3>"Query"</h3>
					<select on:change=move |ev| {
						if let Ok(mode) = event_target_value(&ev).parse::<QueryMode>() {
							query_mode.set(mode);
						}
					}>
						{QueryMode::ALL
							.into_iter()
							.map(|mode| view! {
								<option value=mode.as_str() selected=move || query_mode.get() == mode>
									{mode.label()}
								</option>
							})
							.collect_view()}
					</select>
					<input type="text" placeholder="Entity name"
						prop:value=move || query_entity.get()
						on:input=move |ev| query_entity.set(event_target_value(&ev))
						on:keypress=move |ev| if ev.key() == "Enter" { query_key() }
					/>
					<Show when=move || query_mode.get().needs_target()>
						<input type="text" placeholder="Target entity"
							prop:value=move || query_target.get()
							on:input=move |ev| query_target.set(event_target_value(&ev))
						/>
					</Show>
					<button class="btn" on:click=move |_| query_click()>"Run Query"</button>
					<StatusLine board=query_status />
				</section>

				<section class="card">
					<button class="btn" on:click=on_export>"Export JSON"</button>
					<button class="btn btn-danger" on:click=on_clear>"Clear Graph"</button>
				</section>
			</aside>

			<main>
				<nav class="tabs">
					<button
						class="tab-btn"
						class:active=move || tab.get() == Tab::Visualization
						on:click=move |_| tab.set(Tab::Visualization)
					>
						"Visualization"
					</button>
					<button
						class="tab-btn"
						class:active=move || tab.get() == Tab::Results
						on:click=move |_| tab.set(Tab::Results)
					>
						"Results"
					</button>
				</nav>
				<div
					class="tab-content"
					style:display=move || if tab.get() == Tab::Visualization { "block" } else { "none" }
				>
					<ForceGraphCanvas graph=graph config=layout_config />
				</div>
				<div
					class="tab-content"
					style:display=move || if tab.get() == Tab::Results { "block" } else { "none" }
				>
					<ResultsPanel result=shown />
				</div>
			</main>
		</div>
	}
}
