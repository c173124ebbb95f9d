use std::{
	io::BufRead,
	sync::atomic::{ AtomicU64, Ordering },
};

use crate::{
	avatar::query,
	client::{ self, ClientResponse },
	error::Error,
	utils::ResourceReader,
};
use super::model::{ Profile, ApiError };



/// Profile endpoint of the Gravatar REST API.
pub const PROFILES_BASE_URL: &str = "https://api.gravatar.com/v3/profiles/";

lazy_static! {
	static ref DEFAULT_HANDLER: ProfileRequestHandler = ProfileRequestHandler::new();
}

/// Performs profile lookups and counts them.
///
/// Every call is a fresh blocking round trip. The counters are atomics, so a handler can be
/// shared between threads, but they are only a tally: nothing is rate limited or cached.
#[derive(Debug)]
pub struct ProfileRequestHandler {
	base_url: String,
	authenticated: AtomicU64,
	unauthenticated: AtomicU64,
}

impl Default for ProfileRequestHandler {
	fn default() -> ProfileRequestHandler {
		ProfileRequestHandler::new()
	}
}

impl ProfileRequestHandler {
	/// Handler for the public Gravatar API.
	pub fn new() -> ProfileRequestHandler {
		ProfileRequestHandler {
			base_url: PROFILES_BASE_URL.to_string(),
			authenticated: AtomicU64::new(0),
			unauthenticated: AtomicU64::new(0),
		}
	}

	/// Handler for a different endpoint; `hash_or_id` is appended to `base_url`.
	pub fn with_base_url(base_url: &str) -> Result<ProfileRequestHandler, Error> {
		Ok(ProfileRequestHandler {
			base_url: query::base_url(base_url)?,
			..ProfileRequestHandler::new()
		})
	}

	/// Process-wide handler used by [`ProfileRequest::profile`](struct.ProfileRequest.html#method.profile).
	pub fn shared() -> &'static ProfileRequestHandler {
		&DEFAULT_HANDLER
	}

	/// Lookup URL for a hash or profile slug. The id always stays a single path segment.
	pub fn request_url(&self, hash_or_id: &str) -> Result<String, Error> {
		let hash_or_id = hash_or_id.trim();

		ensure!(!hash_or_id.is_empty(), "hash or id cannot be empty");
		ensure!(!query::is_dot_segment(hash_or_id), "'{}' is not a profile id", hash_or_id);

		Ok(format!("{}{}", self.base_url, query::encode_segment(hash_or_id)))
	}

	/// Fetches a profile, authenticating when a token is given.
	pub fn get_profile(&self, token: Option<&[u8]>, hash_or_id: &str) -> Result<Profile, Error> {
		let url = self.request_url(hash_or_id)?;
		let mut req = client::get(&url)?.set_header("Accept", "application/json");

		if let Some(token) = token {
			let token = std::str::from_utf8(token)
				.map_err(|_| Error::InvalidArgument("bearer token is not valid UTF-8".to_string()))?;

			req = req.set_bearer_token(token.trim());
			self.authenticated.fetch_add(1, Ordering::Relaxed);
		} else {
			self.unauthenticated.fetch_add(1, Ordering::Relaxed);
		}

		profile_from_response(&req.send()?)
	}

	/// Reads a raw HTTP response (status line, headers, chunked JSON body) into a profile.
	pub fn parse_response<R: BufRead>(&self, stream: R) -> Result<Profile, Error> {
		let mut reader = ResourceReader::from(stream);
		let mut line = String::new();

		reader.get_mut().read_line(&mut line)?;

		let code = line
			.split_whitespace()
			.nth(1)
			.and_then(|code| code.parse::<u16>().ok())
			.ok_or(Error::NoStatusLineInResponse)?;

		let body = reader.skip_headers()?.read_chunked_body()?;

		profile_from_body(code, body.as_bytes())
	}

	/// Authenticated requests attempted so far.
	pub fn authenticated_requests(&self) -> u64 {
		self.authenticated.load(Ordering::Relaxed)
	}

	/// Unauthenticated requests attempted so far.
	pub fn unauthenticated_requests(&self) -> u64 {
		self.unauthenticated.load(Ordering::Relaxed)
	}
}



// -----------------------------------------------------------------------------------------------------------
// Helper functions

fn profile_from_response(resp: &ClientResponse) -> Result<Profile, Error> {
	profile_from_body(resp.status_code(), &resp.body)
}

fn profile_from_body(code: u16, body: &[u8]) -> Result<Profile, Error> {
	if (200..300).contains(&code) {
		return Ok(serde_json::from_slice(body)?);
	}

	let message = match serde_json::from_slice::<ApiError>(body) {
		Ok(err) => {
			warn!("Profile API returned {} ({}): {}", code, err.code.as_deref().unwrap_or("no code"), err.error);

			err.error
		},
		Err(_) => {
			warn!("Profile API returned {} with no error body", code);

			format!("HTTP {}", code)
		},
	};

	Err(Error::Client(format!("API error: {}", message)))
}
