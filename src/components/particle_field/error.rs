//! Error taxonomy for the particle field.
//!
//! Nothing here is fatal. Callers recover locally: a missing surface skips the
//! frame, an unsupported capability degrades to a static frame or fallback
//! element, and an invalid configuration renders nothing.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures the widget can encounter while setting up or running.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FieldError {
	/// The drawing surface (canvas or 2D context) is not attached yet.
	#[error("drawing surface unavailable")]
	SurfaceUnavailable,
	/// The host lacks a browser API the widget needs.
	#[error("unsupported capability: {0}")]
	Unsupported(&'static str),
	/// Configuration could not be parsed or describes nothing to render.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
	/// The frame scheduler refused to schedule a callback.
	#[error("frame scheduling failed: {0}")]
	Scheduler(String),
	/// A seed image could not be loaded or read back.
	#[error("seed image unavailable: {0}")]
	Image(String),
}

impl From<serde_json::Error> for FieldError {
	fn from(err: serde_json::Error) -> Self {
		FieldError::InvalidConfig(err.to_string())
	}
}

/// Readable text for an exception thrown by a browser API.
pub(crate) fn describe_js(err: &JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
