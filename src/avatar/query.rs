use percent_encoding::{ utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC };
use url::Url;

use crate::error::Error;



/// Everything except RFC 3986 unreserved characters gets encoded.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~');

/// Percent-encodes `segment` so it stays one path segment (`/`, `?`, `#` and spaces included).
pub(crate) fn encode_segment(segment: &str) -> String {
	utf8_percent_encode(segment, UNRESERVED).to_string()
}

/// Whether `segment` would be read as `.` or `..` once in a path.
pub(crate) fn is_dot_segment(segment: &str) -> bool {
	segment == "." || segment == ".."
}

/// Checks an http(s) base URL that identifiers get appended to, and makes it end in `/`.
pub(crate) fn base_url(url: &str) -> Result<String, Error> {
	let parsed = Url::parse(url.trim())
		.map_err(|e| Error::InvalidArgument(format!("'{}' is not a valid URL: {}", url, e)))?;

	ensure!(parsed.scheme() == "http" || parsed.scheme() == "https", "unsupported scheme '{}'", parsed.scheme());
	ensure!(parsed.host_str().is_some(), "'{}' has no host", url);
	ensure!(parsed.query().is_none() && parsed.fragment().is_none(), "base URL '{}' cannot carry a query or fragment", url);

	let mut base = url.trim().to_string();

	if !base.ends_with('/') {
		base.push('/');
	}

	Ok(base)
}

/// Appends `key=value` pairs to a URL, `?` before the first and `&` before the rest.
pub(crate) struct QueryString {
	url: String,
	params: usize,
}

impl QueryString {
	pub(crate) fn new(url: String) -> QueryString {
		QueryString {
			url,
			params: 0,
		}
	}

	/// Adds one parameter, percent-encoding its value.
	pub(crate) fn push(&mut self, key: &str, value: &str) -> &mut QueryString {
		self.url.push(if self.params == 0 { '?' } else { '&' });
		self.url.push_str(key);
		self.url.push('=');
		self.url.extend(utf8_percent_encode(value, UNRESERVED));

		self.params += 1;

		self
	}

	/// Adds a parameter only when a value is present.
	pub(crate) fn push_opt<V: AsRef<str>>(&mut self, key: &str, value: Option<V>) -> &mut QueryString {
		if let Some(value) = value {
			self.push(key, value.as_ref());
		}

		self
	}

	pub(crate) fn finish(self) -> String {
		self.url
	}
}
