//! Minimal blocking HTTP/1.1 GET client used by every Gravatar request.

use crate::error::Error;

mod request;
mod response;

pub use request::ClientRequest;
pub use response::ClientResponse;



/// Create a GET Request.
pub fn get(url: &str) -> Result<ClientRequest, Error> {
	ClientRequest::new(url)
}
