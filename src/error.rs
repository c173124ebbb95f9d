use std::{
	fmt, error,
	io::{
		ErrorKind,
		Error as IoError,
	},
};



/// Represents errors that can (and probably will) occur throughout this library.
#[derive(Debug)]
pub enum Error {
	/// Input has the wrong shape or is out of range. Raised by factories and setters.
	InvalidArgument(String),
	/// A required value is absent.
	NullInput(&'static str),
	/// Digest algorithm name not recognized.
	UnsupportedAlgorithm(String),
	/// Chunk size line is not a hexadecimal number.
	NumberFormat(String),
	/// The API reported an error, or a response could not be interpreted.
	Client(String),
	/// Throws if a requested URL is using HTTPS, and the tls feature is not enabled.
	TLSNotEnabled,
	/// Occurs when host cannot be resolved or connected to.
	ConnectionFailed(String),
	/// Response does not contain a status line.
	NoStatusLineInResponse,
	/// The set number of max redirects (default 5) has been reached.
	MaxRedirectsHit,
	/// Redirect location header missing.
	NoLocationHeader,
	/// Response body is not the JSON we expected.
	Json(serde_json::Error),
	/// Response body could not be decoded (or encoded) as an image.
	#[cfg(feature = "image")]
	Image(image::ImageError),
	/// Any generic IO error.
	Io(IoError),
}

impl Error {
	/// True for failures that happened while performing network I/O or decoding a response.
	pub fn is_client_error(&self) -> bool {
		!matches!(
			self,
			Error::InvalidArgument(_) | Error::NullInput(_) | Error::UnsupportedAlgorithm(_) | Error::NumberFormat(_)
		)
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
			Error::NullInput(what) => write!(f, "Required value missing: {}", what),
			Error::UnsupportedAlgorithm(name) => write!(f, "{} MessageDigest not available", name),
			Error::NumberFormat(token) => write!(f, "Chunk size is not a hexadecimal number: '{}'", token),
			Error::Client(msg) => write!(f, "{}", msg),
			Error::TLSNotEnabled => write!(f, "Attempting to connect to secure URL without tls feature enabled"),
			Error::ConnectionFailed(msg) => write!(f, "{}", msg),
			Error::NoStatusLineInResponse => write!(f, "Response does not contain a status line"),
			Error::MaxRedirectsHit => write!(f, "Your request hit maximum number of redirects. You can increase this limit by using .set_max_redirects(usize)"),
			Error::NoLocationHeader => write!(f, "Redirect location header missing"),
			Error::Json(err) => write!(f, "Malformed JSON: {}", err),
			#[cfg(feature = "image")]
			Error::Image(err) => write!(f, "Image error: {}", err),
			Error::Io(ioe) => write!(f, "Network error: {}", ioe),
		}
	}
}

impl error::Error for Error {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			Error::Json(err) => Some(err),
			#[cfg(feature = "image")]
			Error::Image(err) => Some(err),
			_ => None,
		}
	}
}

impl From<IoError> for Error {
	fn from(err: IoError) -> Error {
		Error::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Error {
		Error::Json(err)
	}
}

#[cfg(feature = "image")]
impl From<image::ImageError> for Error {
	fn from(err: image::ImageError) -> Error {
		Error::Image(err)
	}
}

impl From<Error> for IoError {
	fn from(err: Error) -> IoError {
		match err {
			Error::InvalidArgument(_) | Error::NullInput(_) => IoError::new(ErrorKind::InvalidInput, err),
			Error::NumberFormat(_) => IoError::new(ErrorKind::InvalidData, err),
			Error::Io(ioe) => ioe,
			_ => IoError::new(ErrorKind::Other, err),
		}
	}
}
