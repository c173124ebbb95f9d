//! Slim blocking client for the Gravatar Avatar, QR code and Profile APIs.
//!
//! Requests are plain option structs: pick a hash (or an email address to hash), set the
//! options you care about, and either ask for the URL or let the library fetch it. Anything
//! left unset stays out of the query string.
//!
//! ```no_run
//! use gravatar_client::{ AvatarRequest, Rating };
//!
//! # fn main() -> Result<(), gravatar_client::Error> {
//! let url = AvatarRequest::from_email("someone@example.com")?
//! 	.set_size(256)?
//! 	.set_rating(Rating::PG)
//! 	.request_url()?;
//! # Ok(())
//! # }
//! ```
//!
//! No async functionality.
//! Responses are read off a raw socket (Rustls for HTTPS), with a small chunked-body reader
//! in place of a full HTTP stack.
//! No timeouts unless you ask for one, no retries, no caching.

#![deny(clippy::all, missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;

#[macro_use] extern crate log;
#[macro_use] extern crate lazy_static;

#[macro_use] mod macros;
mod error;
mod stream;
pub mod utils;
pub mod client;
mod avatar;
mod profile;

pub use error::*;
pub use avatar::*;
pub use profile::*;
pub use utils::{ Hasher, InputValidator, ResourceReader };



/// Parsed HTTP status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
	/// Protocol version, e.g. `HTTP/1.1`.
	pub version: String,
	/// Status code.
	pub code: u16,
	/// Reason phrase (may be empty).
	pub reason: String,
}

/// General response info.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralInfo {
	/// HTTP Status Line.
	pub status: StatusLine,
	/// Response headers, keyed by lower-cased name.
	pub headers: HashMap<String, String>,
}

impl GeneralInfo {
	/// Case-insensitive header lookup.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.get(&name.to_ascii_lowercase())
			.map(|v| v.as_str())
	}

	/// Parsed `Content-Length`, if present and numeric.
	pub fn content_length(&self) -> Option<u64> {
		self.header("Content-Length")
			.and_then(|len| len.trim().parse::<u64>().ok())
	}

	/// Whether `Transfer-Encoding` lists `chunked`.
	pub fn is_chunked(&self) -> bool {
		has_token(self.header("Transfer-Encoding"), "chunked")
	}

	/// Whether `Content-Encoding` lists `gzip`.
	pub fn is_gzipped(&self) -> bool {
		has_token(self.header("Content-Encoding"), "gzip")
	}
}

fn has_token(header: Option<&str>, token: &str) -> bool {
	header.is_some_and(|value| {
		value
			.split(',')
			.map(|s| s.trim())
			.any(|s| s.eq_ignore_ascii_case(token))
	})
}
