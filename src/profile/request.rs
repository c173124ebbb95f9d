use std::{
	fs::File,
	io::{ BufWriter, Write },
	path::Path,
};

use crate::{
	avatar::query,
	error::Error,
	utils,
};
use super::{
	model::Profile,
	handler::ProfileRequestHandler,
	token::TokenProvider,
};



/// Lookup of a single profile by hash or profile slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileRequest {
	hash_or_id: String,
	token_provider: Option<TokenProvider>,
}

impl ProfileRequest {
	/// Request for a SHA-256 hash or a profile slug.
	pub fn from_hash_or_id(hash_or_id: &str) -> Result<ProfileRequest, Error> {
		let hash_or_id = hash_or_id.trim();

		ensure!(!hash_or_id.is_empty(), "hash or id cannot be empty");
		ensure!(!query::is_dot_segment(hash_or_id), "'{}' is not a profile id", hash_or_id);

		Ok(ProfileRequest {
			hash_or_id: hash_or_id.to_string(),
			token_provider: None,
		})
	}

	/// Request for the SHA-256 hash of `email` (trimmed and lower-cased first).
	pub fn from_email(email: &str) -> Result<ProfileRequest, Error> {
		Ok(ProfileRequest {
			hash_or_id: utils::email_to_profile_hash(email)?,
			token_provider: None,
		})
	}

	/// Authenticate with tokens from `provider`.
	pub fn set_token_provider(mut self, provider: TokenProvider) -> ProfileRequest {
		self.token_provider = Some(provider);

		self
	}

	/// The hash or slug being looked up.
	pub fn hash_or_id(&self) -> &str {
		&self.hash_or_id
	}

	/// Token provider, if authenticating.
	pub fn token_provider(&self) -> Option<&TokenProvider> {
		self.token_provider.as_ref()
	}

	/// Fetches the profile through the shared handler.
	pub fn profile(&self) -> Result<Profile, Error> {
		self.profile_with(ProfileRequestHandler::shared())
	}

	/// Fetches the profile through `handler`.
	pub fn profile_with(&self, handler: &ProfileRequestHandler) -> Result<Profile, Error> {
		let token = match &self.token_provider {
			Some(provider) => Some(provider.token()?),
			None => None,
		};

		handler.get_profile(token.as_deref(), &self.hash_or_id)
	}

	/// Fetches the profile and writes it to `path` as pretty-printed JSON.
	pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
		self.write_to_file_with(ProfileRequestHandler::shared(), path)
	}

	/// Like [`write_to_file`](#method.write_to_file), through `handler`.
	pub fn write_to_file_with<P: AsRef<Path>>(&self, handler: &ProfileRequestHandler, path: P) -> Result<(), Error> {
		let path = path.as_ref();

		utils::ensure_writable_target(path)?;

		let profile = self.profile_with(handler)?;
		let mut writer = BufWriter::new(File::create(path)?);

		serde_json::to_writer_pretty(&mut writer, &profile)?;
		writer.flush()?;

		info!("Saved profile {} to {}", self.hash_or_id, path.display());

		Ok(())
	}
}
