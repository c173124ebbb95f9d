mod options;
pub(crate) mod query;
mod request;
mod qr;

pub use options::*;
pub use request::AvatarRequest;
pub use qr::QrCodeRequest;
