use std::{
	env, fmt,
	hash::{ Hash, Hasher },
	sync::Arc,
};

use crate::error::Error;



/// Conventional environment variable holding a Gravatar API key.
pub const GRAVATAR_API_KEY_ENV_VAR: &str = "GRAVATAR_API_KEY";

type Supplier = dyn Fn() -> Option<Vec<u8>> + Send + Sync;

/// Supplies the bearer token for authenticated profile requests.
///
/// The token is fetched each time a request is made and never stored. Two providers are
/// equal when they name the same source.
#[derive(Clone)]
pub struct TokenProvider {
	source: String,
	supplier: Arc<Supplier>,
}

impl TokenProvider {
	/// Provider backed by `supplier`, described by `source` (used for equality and logging).
	pub fn new<F>(source: &str, supplier: F) -> Result<TokenProvider, Error>
	where
		F: Fn() -> Option<Vec<u8>> + Send + Sync + 'static,
	{
		ensure!(!source.trim().is_empty(), "token source cannot be empty");

		Ok(TokenProvider {
			source: source.to_string(),
			supplier: Arc::new(supplier),
		})
	}

	/// Provider reading the environment variable `var` at request time.
	pub fn from_env(var: &str) -> Result<TokenProvider, Error> {
		ensure!(!var.trim().is_empty(), "environment variable name cannot be empty");

		let name = var.to_string();

		TokenProvider::new(&format!("env:{}", var), move || {
			env::var(&name)
				.ok()
				.filter(|token| !token.trim().is_empty())
				.map(String::into_bytes)
		})
	}

	/// Provider for a fixed token.
	pub fn from_static(source: &str, token: &[u8]) -> Result<TokenProvider, Error> {
		let token = token.to_vec();

		TokenProvider::new(source, move || Some(token.clone()))
	}

	/// Where the token comes from.
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Fetches the token, failing with `NullInput` when the supplier has none.
	pub fn token(&self) -> Result<Vec<u8>, Error> {
		(self.supplier)().ok_or(Error::NullInput("bearer token"))
	}
}

impl PartialEq for TokenProvider {
	fn eq(&self, other: &TokenProvider) -> bool {
		self.source == other.source
	}
}

impl Eq for TokenProvider {}

impl Hash for TokenProvider {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.source.hash(state);
	}
}

impl fmt::Debug for TokenProvider {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("TokenProvider")
			.field("source", &self.source)
			.finish()
	}
}
