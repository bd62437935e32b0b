//! Short feedback messages shown next to each form.

use std::time::Duration;

/// Tone of a status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
	/// Progress such as "Querying..."; stays until replaced.
	Info,
	/// Expires after the status timeout.
	Success,
	/// Expires after the status timeout.
	Error,
}

impl StatusKind {
	/// Classes of the message `<div>`.
	pub fn css_class(self) -> &'static str {
		match self {
			Self::Info => "status-message status-info",
			Self::Success => "status-message status-success",
			Self::Error => "status-message status-error",
		}
	}
}

/// A message on display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
	/// Its tone.
	pub kind: StatusKind,
	/// Its text.
	pub text: String,
}

/// Handle for clearing one particular message once its time is up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusExpiry {
	/// Delay before expiring.
	pub after: Duration,
	serial: u64,
}

/// The message currently shown in one status slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusBoard {
	current: Option<StatusMessage>,
	serial: u64,
}

impl StatusBoard {
	/// Show a message. Returns when to expire it, or `None` for info messages.
	pub fn show(&mut self, kind: StatusKind, text: impl Into<String>, timeout: Duration) -> Option<StatusExpiry> {
		self.serial += 1;
		self.current = Some(StatusMessage {
			kind,
			text: text.into(),
		});
		(kind != StatusKind::Info).then_some(StatusExpiry {
			after: timeout,
			serial: self.serial,
		})
	}

	/// Clear the message `expiry` belongs to, unless it was replaced since.
	pub fn expire(&mut self, expiry: StatusExpiry) -> bool {
		if expiry.serial != self.serial {
			return false;
		}
		self.current = None;
		true
	}

	/// Message on display, if any.
	pub fn current(&self) -> Option<&StatusMessage> {
		self.current.as_ref()
	}
}
