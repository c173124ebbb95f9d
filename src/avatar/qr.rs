use std::ops::RangeInclusive;
#[cfg(feature = "image")]
use std::path::Path;

#[cfg(feature = "image")]
use image::{ DynamicImage, ImageFormat };

use crate::{
	error::Error,
	utils,
};
use super::{
	options::{ QrImageType, QrImageVersion },
	query::{ self, QueryString },
	request::fetch_image_bytes,
};
#[cfg(feature = "image")]
use super::request::save_image;



const BASE_URL: &str = "https://gravatar.com/";

const IMAGE_SIZE_RANGE: RangeInclusive<u32> = 80..=1024;

/// Options for a QR code linking to a Gravatar profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QrCodeRequest {
	hash: String,
	size: Option<u32>,
	image_type: Option<QrImageType>,
	version: Option<QrImageVersion>,
	base_url: String,
}

impl QrCodeRequest {
	/// Request for the SHA-256 hash of `email` (trimmed and lower-cased first).
	pub fn from_email(email: &str) -> Result<QrCodeRequest, Error> {
		Ok(QrCodeRequest::new(utils::email_to_profile_hash(email)?))
	}

	/// Request for an already computed hash or profile slug.
	pub fn from_hash(hash: &str) -> Result<QrCodeRequest, Error> {
		let hash = hash.trim();

		ensure!(!hash.is_empty(), "hash cannot be empty");

		Ok(QrCodeRequest::new(hash.to_string()))
	}

	fn new(hash: String) -> QrCodeRequest {
		QrCodeRequest {
			hash,
			size: None,
			image_type: None,
			version: None,
			base_url: BASE_URL.to_string(),
		}
	}

	/// Edge length in pixels, 80 through 1024.
	pub fn set_size(mut self, size: u32) -> Result<QrCodeRequest, Error> {
		ensure!(IMAGE_SIZE_RANGE.contains(&size), "QR code size {} is outside {:?}", size, IMAGE_SIZE_RANGE);

		self.size = Some(size);

		Ok(self)
	}

	/// Image shown in the middle of the code.
	pub fn set_image_type(mut self, image_type: QrImageType) -> QrCodeRequest {
		self.image_type = Some(image_type);

		self
	}

	/// Rendering version.
	pub fn set_version(mut self, version: QrImageVersion) -> QrCodeRequest {
		self.version = Some(version);

		self
	}

	/// Serve from another host instead of `gravatar.com`.
	pub fn set_base_url(mut self, url: &str) -> Result<QrCodeRequest, Error> {
		self.base_url = query::base_url(url)?;

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

	/// Requested image type, if set.
	pub fn image_type(&self) -> Option<QrImageType> {
		self.image_type
	}

	/// Requested version, if set.
	pub fn version(&self) -> Option<QrImageVersion> {
		self.version
	}

	/// Base URL the `<hash>.qr` path is appended to.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Full request URL. Parameters come in the order size, type, version.
	pub fn request_url(&self) -> String {
		let mut query = QueryString::new(format!("{}{}.qr", self.base_url, query::encode_segment(&self.hash)));

		query
			.push_opt("size", self.size.map(|s| s.to_string()))
			.push_opt("type", self.image_type.map(QrImageType::as_param))
			.push_opt("version", self.version.map(QrImageVersion::as_param));

		query.finish()
	}

	/// Downloads the raw PNG bytes.
	pub fn fetch_bytes(&self) -> Result<Vec<u8>, Error> {
		fetch_image_bytes(&self.request_url())
	}

	/// Downloads and decodes the QR code.
	#[cfg(feature = "image")]
	pub fn fetch_image(&self) -> Result<DynamicImage, Error> {
		Ok(image::load_from_memory(&self.fetch_bytes()?)?)
	}

	/// Downloads the QR code and writes it to `path` as PNG. Refuses to overwrite.
	#[cfg(feature = "image")]
	pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
		let path = path.as_ref();

		utils::ensure_writable_target(path)?;
		ensure!(!path.exists(), "{} already exists", path.display());

		save_image(&self.fetch_image()?, path, ImageFormat::Png)
	}
}
