mod model;
mod token;
mod handler;
mod request;
#[cfg(test)] mod tests;

pub use model::*;
pub use token::{ TokenProvider, GRAVATAR_API_KEY_ENV_VAR };
pub use handler::{ ProfileRequestHandler, PROFILES_BASE_URL };
pub use request::ProfileRequest;
