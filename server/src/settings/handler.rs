//! Settings management handlers

use axum::{
	Json,
	body::Bytes,
	extract::{
		Query, State,
		rejection::{BytesRejection, QueryRejection},
	},
	http::StatusCode,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{core::Auth, prelude::*};

/// Response of a successful save
#[derive(Debug, Serialize)]
pub struct SaveSettingsResponse {
	pub message: &'static str,
	pub results: Vec<Setting>,
}

/// GET /settings - Flat key/value object, optionally limited to one group
pub async fn get_settings(
	State(app): State<App>,
	query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ScResult<Json<Map<String, Value>>> {
	let Query(params) = query.map_err(|err| Error::BadRequest(err.body_text()))?;
	// First `group` wins, an empty one means no filter
	let group = params
		.iter()
		.find(|(name, _)| name == "group")
		.map(|(_, group)| group.as_str())
		.filter(|group| !group.is_empty());
	let settings = app.settings.get_settings(group).await?;

	Ok(Json(settings))
}

/// POST /settings - Save a JSON object of key/value pairs
///
/// Anonymous callers are rejected before the body is read.
pub async fn post_settings(
	State(app): State<App>,
	Auth(auth): Auth,
	body: Result<Bytes, BytesRejection>,
) -> ScResult<Json<SaveSettingsResponse>> {
	let body = body.map_err(|err| {
		if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
			Error::PayloadTooLarge(err.body_text())
		} else {
			Error::BadRequest(err.body_text())
		}
	})?;
	let payload = parse_payload(&body)?;

	let results = app.settings.save_settings(Some(&auth), &payload).await?;

	Ok(Json(SaveSettingsResponse { message: "Settings saved", results }))
}

fn parse_payload(body: &[u8]) -> ScResult<Map<String, Value>> {
	match serde_json::from_slice::<Value>(body) {
		Ok(Value::Object(payload)) => Ok(payload),
		Ok(other) => {
			Err(Error::BadRequest(format!("expected a JSON object, got {}", json_type(&other))))
		}
		Err(err) => Err(Error::BadRequest(err.to_string())),
	}
}

fn json_type(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}


// vim: ts=4
