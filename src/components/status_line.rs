use leptos::prelude::*;

use crate::status::StatusBoard;

/// Shows whatever message `board` currently holds, nothing otherwise.
#[component]
pub fn StatusLine(board: RwSignal<StatusBoard>) -> impl IntoView {
	move || {
		board
			.with(|b| b.current().cloned())
			.map(|message| view! { <div class=message.kind.css_class()>{message.text}</div> })
	}
}
