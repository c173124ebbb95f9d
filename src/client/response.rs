use std::io::BufRead;
#[cfg(feature = "compress")]
use std::io::Read;

use serde::de::DeserializeOwned;

#[cfg(feature = "compress")]
use flate2::read::GzDecoder;

use crate::{
	utils::ResourceReader,
	error::Error,
	GeneralInfo,
};



/// Status, headers and reassembled body of a response.
#[derive(Debug)]
pub struct ClientResponse {
	/// Status line and headers.
	pub info: GeneralInfo,
	/// Body with transfer (and, with `compress`, content) encoding removed.
	pub body: Vec<u8>,
}

impl ClientResponse {
	/// Reads a full response off `stream`, skipping any interim 1xx responses.
	pub(crate) fn new<R: BufRead>(stream: R) -> Result<ClientResponse, Error> {
		let mut reader = ResourceReader::from(stream);
		let mut info = reader.read_head()?;

		while (100..200).contains(&info.status.code) {
			trace!("Skipping interim {} response", info.status.code);

			info = reader.read_head()?;
		}

		let body = reader.read_body(&info)?;

		#[cfg(feature = "compress")]
		let body = if info.is_gzipped() {
			let mut inflated = vec![];

			GzDecoder::new(&body[..]).read_to_end(&mut inflated)?;
			info.headers.remove("content-encoding");

			inflated
		} else {
			body
		};

		// Remove hop-by-hop.
		info.headers.remove("transfer-encoding");

		debug!("{} {} ({} byte body)", info.status.code, info.status.reason, body.len());

		Ok(ClientResponse {
			info,
			body,
		})
	}

	/// HTTP status code.
	pub fn status_code(&self) -> u16 {
		self.info.status.code
	}

	/// Whether the status code is 2xx.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status_code())
	}

	/// Case-insensitive header lookup.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.info.header(name)
	}

	/// Body as text, replacing invalid UTF-8.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Body deserialized from JSON.
	pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
		Ok(serde_json::from_slice(&self.body)?)
	}
}
