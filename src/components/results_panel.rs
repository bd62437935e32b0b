use leptos::prelude::*;

use crate::query::{ChainLine, QueryResult, ResultSection, ResultView, Segment, render};

/// Renders the query result on display, or a hint before the first query.
#[component]
pub fn ResultsPanel(#[prop(into)] result: Signal<Option<QueryResult>>) -> impl IntoView {
	move || match result.get() {
		Some(result) => result_view(render(&result)).into_any(),
		None => view! { <p class="placeholder">"Run a query to see results here"</p> }.into_any(),
	}
}

fn result_view(result: ResultView) -> impl IntoView {
	let ResultView {
		title,
		summary,
		sections,
		empty_text,
	} = result;

	view! {
		<div class="result-item">
			<div class="result-title">{title}</div>
			<div class="result-content">
				{summary.map(|s| view! { <p><strong>{s}</strong></p> })}
				{sections.into_iter().map(section_view).collect_view()}
				{empty_text.map(|t| view! { <p><em>{t}</em></p> })}
			</div>
		</div>
	}
}

fn section_view(section: ResultSection) -> impl IntoView {
	view! {
		{section.heading.map(|h| view! { <h4>{h}</h4> })}
		<ul>{section.lines.into_iter().map(line_view).collect_view()}</ul>
	}
}

fn line_view(line: ChainLine) -> impl IntoView {
	let class = if line.label.is_some() { "path-item" } else { "edge-item" };
	let label = line.label.map(|l| format!("{l}: "));
	let last = line.segments.len().saturating_sub(1);
	let segments = line
		.segments
		.into_iter()
		.enumerate()
		.map(|(i, segment)| {
			let gap = if i < last { " " } else { "" };
			match segment {
				Segment::Entity(name) => view! { <strong>{name}</strong>{gap} }.into_any(),
				Segment::Arrow(rel) => format!("--[{rel}]-->{gap}").into_any(),
			}
		})
		.collect_view();

	view! { <li class=class>{label}{segments}</li> }
}
