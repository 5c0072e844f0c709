//! Error type shared by the server and all adapters.
//!
//! Every failure is eventually turned into a JSON envelope of the form
//! `{ "error": ..., "details": ... }` by the `IntoResponse` implementation.
//! Internal error objects never leave the process, only their message.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

pub type ScResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Write attempted without a valid session
	Unauthorized,
	/// Request body could not be parsed
	BadRequest(String),
	/// Request body exceeds the size limit
	PayloadTooLarge(String),
	/// Request did not finish within its time budget
	Timeout,
	NotFound,
	/// Storage failure while serving a read
	ReadFailure(String),
	/// Storage failure while applying a write batch
	WriteFailure(String),
	/// Raw storage failure as reported by an adapter
	DbError(String),
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Internal(err.to_string())
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::BadRequest(msg) => write!(f, "bad request: {}", msg),
			Error::PayloadTooLarge(msg) => write!(f, "payload too large: {}", msg),
			Error::Timeout => write!(f, "request timed out"),
			Error::NotFound => write!(f, "not found"),
			Error::ReadFailure(msg) => write!(f, "read failure: {}", msg),
			Error::WriteFailure(msg) => write!(f, "write failure: {}", msg),
			Error::DbError(msg) => write!(f, "database error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl Error {
	/// Message surfaced in the `details` field of the error envelope
	pub fn details(&self) -> String {
		match self {
			Error::Unauthorized | Error::NotFound | Error::Timeout => String::new(),
			Error::BadRequest(msg)
			| Error::PayloadTooLarge(msg)
			| Error::ReadFailure(msg)
			| Error::WriteFailure(msg)
			| Error::DbError(msg)
			| Error::ConfigError(msg)
			| Error::Internal(msg) => msg.clone(),
			Error::Io(err) => err.to_string(),
		}
	}

	pub fn status(&self) -> StatusCode {
		match self {
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::BadRequest(_) => StatusCode::BAD_REQUEST,
			Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
			Error::Timeout => StatusCode::REQUEST_TIMEOUT,
			Error::NotFound => StatusCode::NOT_FOUND,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

#[derive(Serialize)]
struct ErrorBody {
	error: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	details: Option<String>,
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		let body = match &self {
			Error::Unauthorized => ErrorBody { error: "Please login", details: None },
			Error::NotFound => ErrorBody { error: "Not found", details: None },
			Error::Timeout => ErrorBody { error: "Request timed out", details: None },
			Error::PayloadTooLarge(_) => {
				ErrorBody { error: "Request body too large", details: Some(self.details()) }
			}
			Error::BadRequest(_) => {
				ErrorBody { error: "Invalid request body", details: Some(self.details()) }
			}
			Error::ReadFailure(_) => {
				ErrorBody { error: "Failed to get settings", details: Some(self.details()) }
			}
			Error::WriteFailure(_) => {
				ErrorBody { error: "Database operation failed", details: Some(self.details()) }
			}
			Error::DbError(_) => {
				ErrorBody { error: "Database error", details: Some(self.details()) }
			}
			Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) => {
				ErrorBody { error: "Internal server error", details: Some(self.details()) }
			}
		};
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
