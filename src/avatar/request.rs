use std::ops::RangeInclusive;
#[cfg(feature = "image")]
use std::path::Path;

#[cfg(feature = "image")]
use image::{ DynamicImage, ImageFormat };

use crate::{
	client,
	error::Error,
	utils::{ self, InputValidator },
};
use super::{
	options::{ Rating, DefaultImage, DefaultImageType, Protocol, UrlParameter },
	query::{ self, QueryString },
};



const IMAGE_SIZE_RANGE: RangeInclusive<u32> = 1..=2048;

/// Value Gravatar expects for `forcedefault`.
const FORCE_DEFAULT: &str = "y";

/// Options for a single avatar image.
///
/// Options that were never set stay out of the URL, so Gravatar's own defaults apply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvatarRequest {
	hash: String,
	size: Option<u32>,
	rating: Option<Rating>,
	default_image: Option<DefaultImage>,
	force_default: bool,
	protocol: Protocol,
	append_jpg_suffix: bool,
	use_full_url_parameters: bool,
	base_url: Option<String>,
}

impl AvatarRequest {
	/// Request for the MD5 hash of `email` (trimmed and lower-cased first).
	pub fn from_email(email: &str) -> Result<AvatarRequest, Error> {
		Ok(AvatarRequest::new(utils::email_to_avatar_hash(email)?))
	}

	/// Request for an already computed hash.
	pub fn from_hash(hash: &str) -> Result<AvatarRequest, Error> {
		let hash = hash.trim();

		ensure!(!hash.is_empty(), "hash cannot be empty");
		ensure!(!query::is_dot_segment(hash), "'{}' is not a hash", hash);

		Ok(AvatarRequest::new(hash.to_string()))
	}

	fn new(hash: String) -> AvatarRequest {
		AvatarRequest {
			hash,
			size: None,
			rating: None,
			default_image: None,
			force_default: false,
			protocol: Protocol::Https,
			append_jpg_suffix: false,
			use_full_url_parameters: false,
			base_url: None,
		}
	}

	/// Edge length in pixels, 1 through 2048.
	pub fn set_size(mut self, size: u32) -> Result<AvatarRequest, Error> {
		ensure!(IMAGE_SIZE_RANGE.contains(&size), "avatar size {} is outside {:?}", size, IMAGE_SIZE_RANGE);

		self.size = Some(size);

		Ok(self)
	}

	/// Highest rating to show.
	pub fn set_rating(mut self, rating: Rating) -> AvatarRequest {
		self.rating = Some(rating);

		self
	}

	/// Built-in default image. Replaces any default image URL.
	pub fn set_default_image_type(mut self, kind: DefaultImageType) -> AvatarRequest {
		self.default_image = Some(DefaultImage::Type(kind));

		self
	}

	/// Default image URL. Replaces any built-in default image type.
	///
	/// The URL must pass [`InputValidator::is_valid_image_url`]. Whether it actually serves an
	/// image is only checked when the avatar is fetched.
	///
	/// [`InputValidator::is_valid_image_url`]: struct.InputValidator.html#method.is_valid_image_url
	pub fn set_default_image_url(mut self, url: &str) -> Result<AvatarRequest, Error> {
		let validator = InputValidator::from(url)?;

		if !validator.is_valid_image_url() {
			warn!("Rejected default image URL {}", url);

			return Err(Error::InvalidArgument(format!("'{}' is not an acceptable default image URL", url)));
		}

		self.default_image = Some(DefaultImage::Url(url.trim().to_string()));

		Ok(self)
	}

	/// Always serve the default image, even if the hash has an avatar.
	pub fn set_force_default(mut self, force: bool) -> AvatarRequest {
		self.force_default = force;

		self
	}

	/// http or https (default).
	pub fn set_protocol(mut self, protocol: Protocol) -> AvatarRequest {
		self.protocol = protocol;

		self
	}

	/// Append `.jpg` to the hash in the path.
	pub fn set_append_jpg_suffix(mut self, append: bool) -> AvatarRequest {
		self.append_jpg_suffix = append;

		self
	}

	/// Spell parameter keys in full (`size`) instead of by letter (`s`).
	pub fn set_use_full_url_parameters(mut self, full: bool) -> AvatarRequest {
		self.use_full_url_parameters = full;

		self
	}

	/// Serve from another host (a mirror, or a local server) instead of `www.gravatar.com/avatar/`.
	/// Takes precedence over the protocol.
	pub fn set_base_url(mut self, url: &str) -> Result<AvatarRequest, Error> {
		self.base_url = Some(query::base_url(url)?);

		Ok(self)
	}

	/// The hash this request is for.
	pub fn hash(&self) -> &str {
		&self.hash
	}

	/// Requested size, if set.
	pub fn size(&self) -> Option<u32> {
		self.size
	}

	/// Requested rating, if set.
	pub fn rating(&self) -> Option<Rating> {
		self.rating
	}

	/// Default image, if set.
	pub fn default_image(&self) -> Option<&DefaultImage> {
		self.default_image.as_ref()
	}

	/// Whether the default image is forced.
	pub fn force_default(&self) -> bool {
		self.force_default
	}

	/// Scheme of the request URL.
	pub fn protocol(&self) -> Protocol {
		self.protocol
	}

	/// Whether `.jpg` is appended to the hash.
	pub fn append_jpg_suffix(&self) -> bool {
		self.append_jpg_suffix
	}

	/// Whether parameter keys are spelled in full.
	pub fn use_full_url_parameters(&self) -> bool {
		self.use_full_url_parameters
	}

	/// Base URL override, if set.
	pub fn base_url(&self) -> Option<&str> {
		self.base_url.as_deref()
	}

	/// Full request URL. Parameters come in the order size, rating, default, forcedefault.
	pub fn request_url(&self) -> Result<String, Error> {
		let full = self.use_full_url_parameters;

		let base = self.base_url.as_deref().unwrap_or_else(|| self.protocol.avatar_base_url());

		let mut path = String::from(base);
		path.push_str(&query::encode_segment(&self.hash));

		if self.append_jpg_suffix {
			path.push_str(".jpg");
		}

		let mut query = QueryString::new(path);

		query
			.push_opt(UrlParameter::Size.key(full), self.size.map(|s| s.to_string()))
			.push_opt(UrlParameter::Rating.key(full), self.rating.map(Rating::as_param))
			.push_opt(UrlParameter::Default.key(full), self.default_image.as_ref().map(DefaultImage::as_param));

		if self.force_default {
			if self.default_image.is_none() {
				return Err(Error::NullInput("default image (required when forcing the default)"));
			}

			query.push(UrlParameter::ForceDefault.key(full), FORCE_DEFAULT);
		}

		let url = query.finish();

		debug!("Built avatar URL {}", url);

		Ok(url)
	}

	/// Downloads the raw image bytes.
	///
	/// A default image URL is checked for retrievability first; if it does not serve an
	/// image this fails with a client error.
	pub fn fetch_bytes(&self) -> Result<Vec<u8>, Error> {
		if let Some(DefaultImage::Url(url)) = &self.default_image {
			ensure_retrievable(url)?;
		}

		fetch_image_bytes(&self.request_url()?)
	}

	/// Downloads and decodes the avatar.
	#[cfg(feature = "image")]
	pub fn fetch_image(&self) -> Result<DynamicImage, Error> {
		Ok(image::load_from_memory(&self.fetch_bytes()?)?)
	}

	/// Downloads the avatar and writes it to `path` in `format` (a file extension such as `png`).
	#[cfg(feature = "image")]
	pub fn save_to<P: AsRef<Path>>(&self, path: P, format: &str) -> Result<(), Error> {
		let path = path.as_ref();
		let format = image_format(format)?;

		utils::ensure_writable_target(path)?;

		save_image(&self.fetch_image()?, path, format)
	}
}



// -----------------------------------------------------------------------------------------------------------
// Helper functions

/// Fails with a client error unless `url` serves an image.
pub(crate) fn ensure_retrievable(url: &str) -> Result<(), Error> {
	if !InputValidator::from(url)?.is_retrievable_image() {
		warn!("Default image {} is not a retrievable image", url);

		return Err(Error::Client(format!("Default image URL does not point to a retrievable image: {}", url)));
	}

	Ok(())
}

/// GETs an image URL and returns the body of a successful response.
pub(crate) fn fetch_image_bytes(url: &str) -> Result<Vec<u8>, Error> {
	let resp = client::get(url)?.send()?;

	if !resp.is_success() {
		return Err(Error::Client(format!("Image request failed: {} {}", resp.status_code(), resp.info.status.reason)));
	}

	Ok(resp.body)
}

/// Image format for a name such as `png` or `JPG`.
#[cfg(feature = "image")]
pub(crate) fn image_format(format: &str) -> Result<ImageFormat, Error> {
	ensure!(!format.trim().is_empty(), "image format cannot be empty");

	let format_name = format.trim().to_ascii_lowercase();

	ImageFormat::from_extension(&format_name)
		.filter(|f| f.can_write())
		.ok_or_else(|| Error::InvalidArgument(format!("unsupported image format '{}'", format)))
}

#[cfg(feature = "image")]
pub(crate) fn save_image(image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<(), Error> {
	image
		.save_with_format(path, format)
		.map_err(|e| Error::Client(format!("Failed to write image to {}: {}", path.display(), e)))?;

	info!("Saved image to {}", path.display());

	Ok(())
}
