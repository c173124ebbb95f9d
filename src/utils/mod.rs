//! Hashing, input validation and the raw response reader.

mod hasher;
mod reader;
mod validator;

pub use hasher::{ Algorithm, Hasher, hash, email_to_avatar_hash, email_to_profile_hash };
pub use reader::ResourceReader;
pub use validator::{ InputValidator, is_valid_filename };
pub(crate) use validator::ensure_writable_target;
