use std::path::Path;

use regex::Regex;
use url::{ Url, Host };

use crate::{
	client,
	error::Error,
};



lazy_static! {
	static ref EMAIL_ADDRESS: Regex = Regex::new(
		r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?$"
	).expect("email address pattern");
}

/// Extensions Gravatar accepts for a default image URL.
const IMAGE_EXTENSIONS: [&str; 5] = [ "jpg", "jpeg", "gif", "png", "heic" ];

/// Characters never allowed in a file name we write to.
const INVALID_FILENAME_CHARS: [char; 10] = [ '<', '>', ':', '"', '/', '\\', '|', '?', '*', '\'' ];

/// Classifies an input string as an email address and/or an acceptable default image URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputValidator {
	input: String,
}

impl InputValidator {
	/// Wraps `input`, which must not be blank.
	#[allow(clippy::should_implement_trait)]
	pub fn from(input: &str) -> Result<InputValidator, Error> {
		ensure!(!input.trim().is_empty(), "input cannot be empty");

		Ok(InputValidator {
			input: input.to_string(),
		})
	}

	/// Whether the input (ignoring surrounding whitespace) looks like `local@domain.tld`.
	pub fn is_valid_email_address(&self) -> bool {
		EMAIL_ADDRESS.is_match(self.input.trim())
	}

	/// Whether the input is a URL Gravatar will accept as a default image.
	///
	/// The URL must be http(s), name a public DNS host (no `localhost`, no IP literal),
	/// carry no query string and end in an image extension.
	pub fn is_valid_image_url(&self) -> bool {
		let url = match Url::parse(self.input.trim()) {
			Ok(url) => url,
			Err(_) => return false,
		};

		if url.scheme() != "http" && url.scheme() != "https" {
			return false;
		}

		match url.host() {
			Some(Host::Domain(domain)) => {
				if domain.eq_ignore_ascii_case("localhost") || !domain.contains('.') {
					return false;
				}
			},
			_ => return false,
		}

		if url.query().is_some() {
			return false;
		}

		url.path()
			.rsplit('/')
			.next()
			.and_then(|segment| segment.rsplit_once('.'))
			.is_some_and(|(_, ext)| IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
	}

	/// Fetches the input URL and checks that an image actually comes back.
	pub fn is_retrievable_image(&self) -> bool {
		let resp = match client::get(self.input.trim()).and_then(|req| req.send()) {
			Ok(resp) => resp,
			Err(e) => {
				debug!("Default image {} not retrievable: {}", self.input, e);

				return false;
			},
		};

		if !resp.is_success() {
			return false;
		}

		let is_image = resp
			.header("Content-Type")
			.is_some_and(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"));

		is_image && decodes(&resp.body)
	}

	/// The wrapped input.
	pub fn input(&self) -> &str {
		&self.input
	}
}



#[cfg(feature = "image")]
fn decodes(body: &[u8]) -> bool {
	image::load_from_memory(body).is_ok()
}

#[cfg(not(feature = "image"))]
fn decodes(_: &[u8]) -> bool {
	true
}

/// Whether `filename` is safe to create: not empty, no control characters, none of `<>:"/\|?*'`.
pub fn is_valid_filename(filename: &str) -> Result<bool, Error> {
	ensure!(!filename.is_empty(), "filename cannot be empty");

	Ok(!filename.chars().any(|c| c.is_control() || INVALID_FILENAME_CHARS.contains(&c)))
}

/// Rejects directories and paths whose file name is not a valid filename.
pub(crate) fn ensure_writable_target(path: &Path) -> Result<(), Error> {
	ensure!(!path.is_dir(), "{} is a directory", path.display());

	let name = path
		.file_name()
		.and_then(|name| name.to_str())
		.ok_or_else(|| Error::InvalidArgument(format!("{} has no usable file name", path.display())))?;

	ensure!(is_valid_filename(name)?, "'{}' is not a valid filename", name);

	Ok(())
}
