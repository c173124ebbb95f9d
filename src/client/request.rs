use std::{
	collections::HashMap,
	time::Duration,
	io::{ BufReader, Write },
};

use url::{ Url, Position };

use crate::{
	stream::Stream,
	error::Error,
};
use super::response::ClientResponse;



/// Client request (wraps standard HTTP GET request).
#[derive(Debug, Clone)]
pub struct ClientRequest {
	url: Url,
	headers: HashMap<String, String>,

	max_redirects: usize,
	redirects: Vec<Url>,

	timeout: Option<Duration>,
}

impl ClientRequest {
	/// Create a new GET Request for `url`.
	pub(crate) fn new(url: &str) -> Result<ClientRequest, Error> {
		let url = parse_url(url)?;

		Ok(ClientRequest {
			url,
			headers: HashMap::new(),

			max_redirects: 5,
			redirects: vec![],

			timeout: None,
		})
	}

	/// Sets/replaces individual header for request.
	pub fn set_header<S: Into<String>>(mut self, key: S, value: S) -> ClientRequest {
		self.headers.insert(key.into(), value.into());

		self
	}

	/// Sends `Authorization: Bearer <token>`.
	pub fn set_bearer_token(self, token: &str) -> ClientRequest {
		self.set_header("Authorization".to_string(), format!("Bearer {}", token))
	}

	/// Sets connect, read and write timeouts. There are none by default.
	pub fn set_timeout(mut self, timeout: Duration) -> ClientRequest {
		self.timeout = Some(timeout);

		self
	}

	/// Sets max redirects.
	pub fn set_max_redirects(mut self, redirects: usize) -> ClientRequest {
		self.max_redirects = redirects;

		self
	}

	/// The URL this request will hit.
	pub fn url(&self) -> &str {
		self.url.as_str()
	}

	/// Sends request, following redirects.
	pub fn send(mut self) -> Result<ClientResponse, Error> {
		loop {
			let resp = self.send_once()?;
			let code = resp.status_code();

			if !(300..=308).contains(&code) || code == 304 {
				return Ok(resp);
			}

			if self.redirects.len() == self.max_redirects {
				return Err(Error::MaxRedirectsHit);
			}

			let location = resp.header("Location").ok_or(Error::NoLocationHeader)?;
			let next = self.url
				.join(location.trim())
				.map_err(|e| Error::Client(format!("Bad redirect location '{}': {}", location, e)))?;

			debug!("Following {} redirect to {}", code, next);

			let previous = std::mem::replace(&mut self.url, next);
			self.redirects.push(previous);
		}
	}

	fn send_once(&self) -> Result<ClientResponse, Error> {
		let https = self.url.scheme() == "https";
		let host = self.url.host_str().ok_or_else(|| Error::InvalidArgument(format!("{} has no host", self.url)))?;
		let port = self.url.port_or_known_default().unwrap_or(if https { 443 } else { 80 });

		let head = gen_head(self)?;

		debug!("GET {}", self.url);

		let mut stream = Stream::open(host, port, https, self.timeout)?;

		stream.write_all(&head)?;
		stream.flush()?;

		ClientResponse::new(BufReader::new(stream))
	}
}



// -----------------------------------------------------------------------------------------------------------
// Helper functions

/// Parses URL passed by creation of Request. Only http and https are supported.
fn parse_url(url: &str) -> Result<Url, Error> {
	let url = Url::parse(url.trim())
		.map_err(|e| Error::InvalidArgument(format!("'{}' is not a valid URL: {}", url, e)))?;

	ensure!(url.scheme() == "http" || url.scheme() == "https", "unsupported scheme '{}'", url.scheme());
	ensure!(url.host_str().is_some(), "'{}' has no host", url);

	Ok(url)
}

/// Generate request head byte vector.
fn gen_head(request: &ClientRequest) -> Result<Vec<u8>, Error> {
	let mut head = vec![];
	let url = &request.url;

	let resource = &url[Position::BeforePath..Position::AfterQuery];
	let host = &url[Position::BeforeHost..Position::AfterPort];

	writeln!(head, "GET {} HTTP/1.1\r\nHost: {}\r", resource, host)?;

	if !has_header(&request.headers, "User-Agent") {
		writeln!(head, "User-Agent: {}/{}\r", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))?;
	}

	if !has_header(&request.headers, "Accept") {
		writeln!(head, "Accept: */*\r")?;
	}

	#[cfg(feature = "compress")]
	{
		if !has_header(&request.headers, "Accept-Encoding") {
			writeln!(head, "Accept-Encoding: gzip\r")?;
		}
	}

	// Write custom headers prior to necessary headers (based on provided info).
	for (k, v) in &request.headers {
		check_header(k, v)?;

		writeln!(head, "{}: {}\r", k, v)?;
	}

	writeln!(head, "Connection: close\r")?;
	writeln!(head, "\r")?;

	Ok(head)
}

/// Rejects names and values that would break out of their header line.
fn check_header(key: &str, value: &str) -> Result<(), Error> {
	ensure!(!key.trim().is_empty(), "header name cannot be empty");
	ensure!(!key.contains(|c: char| c == ':' || c.is_whitespace() || c.is_control()), "invalid header name '{}'", key.escape_debug());
	ensure!(!value.contains(|c: char| c == '\r' || c == '\n' || c == '\0'), "header '{}' has a line break in its value", key);

	Ok(())
}

fn has_header(headers: &HashMap<String, String>, name: &str) -> bool {
	headers.keys().any(|k| k.eq_ignore_ascii_case(name))
}
