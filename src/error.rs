//! Error kinds surfaced by the client.

use thiserror::Error;

/// Everything that can go wrong between a user action and a rendered result.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClientError {
	/// Required user input is missing. Never reaches the network.
	#[error("{0}")]
	Validation(String),
	/// The backend could not be reached or answered with something unreadable.
	#[error("Error: {0}")]
	Transport(String),
	/// The backend answered with a non-success status; the message is its own.
	#[error("{0}")]
	Service(String),
	/// The graph payload is missing collections or references unknown nodes.
	#[error("Malformed graph: {0}")]
	MalformedGraph(String),
}

impl ClientError {
	/// Shorthand for a [`ClientError::Validation`].
	pub fn validation(message: impl Into<String>) -> Self {
		Self::Validation(message.into())
	}

	/// Shorthand for a [`ClientError::Transport`].
	pub fn transport(message: impl ToString) -> Self {
		Self::Transport(message.to_string())
	}

	/// Shorthand for a [`ClientError::MalformedGraph`].
	pub fn malformed(message: impl Into<String>) -> Self {
		Self::MalformedGraph(message.into())
	}
}

impl From<reqwest::Error> for ClientError {
	fn from(err: reqwest::Error) -> Self {
		Self::transport(err)
	}
}

/// Result alias used across the crate.
pub type Result<T, E = ClientError> = std::result::Result<T, E>;
