use std::{
	fmt,
	str::FromStr,
};

use md5::Md5;
use sha1::Sha1;
use sha2::{ Digest, Sha256, Sha384, Sha512 };

use crate::error::Error;
use super::validator::InputValidator;



/// Digest algorithms a [`Hasher`](struct.Hasher.html) can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
	/// MD5, used for legacy avatar hashes.
	Md5,
	/// SHA-1.
	Sha1,
	/// SHA-256, used by the profile and QR code APIs.
	Sha256,
	/// SHA-384.
	Sha384,
	/// SHA-512.
	Sha512,
}

impl FromStr for Algorithm {
	type Err = Error;

	/// Accepts names such as `MD5`, `sha1`, `SHA-256` or `SHA256`.
	fn from_str(name: &str) -> Result<Algorithm, Error> {
		let normalized: String = name
			.trim()
			.chars()
			.filter(|&c| c != '-' && c != '_')
			.collect::<String>()
			.to_ascii_uppercase();

		match normalized.as_str() {
			"MD5" => Ok(Algorithm::Md5),
			"SHA1" => Ok(Algorithm::Sha1),
			"SHA256" => Ok(Algorithm::Sha256),
			"SHA384" => Ok(Algorithm::Sha384),
			"SHA512" => Ok(Algorithm::Sha512),
			_ => Err(Error::UnsupportedAlgorithm(name.to_string())),
		}
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let name = match self {
			Algorithm::Md5 => "MD5",
			Algorithm::Sha1 => "SHA-1",
			Algorithm::Sha256 => "SHA-256",
			Algorithm::Sha384 => "SHA-384",
			Algorithm::Sha512 => "SHA-512",
		};

		write!(f, "{}", name)
	}
}

/// Hashes strings into lower-case hex digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hasher {
	algorithm: Algorithm,
}

impl Hasher {
	/// Hasher for a named algorithm.
	pub fn from_algorithm(name: &str) -> Result<Hasher, Error> {
		ensure!(!name.trim().is_empty(), "algorithm name cannot be empty");

		Ok(Hasher {
			algorithm: name.parse()?,
		})
	}

	/// MD5 hasher.
	pub fn md5() -> Hasher {
		Hasher { algorithm: Algorithm::Md5 }
	}

	/// SHA-256 hasher.
	pub fn sha256() -> Hasher {
		Hasher { algorithm: Algorithm::Sha256 }
	}

	/// The algorithm this hasher digests with.
	pub fn algorithm(&self) -> Algorithm {
		self.algorithm
	}

	/// Digests the UTF-8 bytes of `input`, one zero-padded hex pair per byte.
	pub fn hash(&self, input: &str) -> String {
		let bytes = input.as_bytes();

		match self.algorithm {
			Algorithm::Md5 => hex::encode(Md5::digest(bytes)),
			Algorithm::Sha1 => hex::encode(Sha1::digest(bytes)),
			Algorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
			Algorithm::Sha384 => hex::encode(Sha384::digest(bytes)),
			Algorithm::Sha512 => hex::encode(Sha512::digest(bytes)),
		}
	}
}

/// Hashes `input` with the algorithm called `algorithm`.
pub fn hash(algorithm: &str, input: &str) -> Result<String, Error> {
	Ok(Hasher::from_algorithm(algorithm)?.hash(input))
}

/// Gravatar avatar hash (MD5) of an email address.
pub fn email_to_avatar_hash(email: &str) -> Result<String, Error> {
	Ok(Hasher::md5().hash(&normalize_email(email)?))
}

/// Profile and QR code identifier (SHA-256) of an email address.
pub fn email_to_profile_hash(email: &str) -> Result<String, Error> {
	Ok(Hasher::sha256().hash(&normalize_email(email)?))
}

/// Trims and lower-cases a valid email address.
pub(crate) fn normalize_email(email: &str) -> Result<String, Error> {
	let validator = InputValidator::from(email)?;

	ensure!(validator.is_valid_email_address(), "'{}' is not a valid email address", email);

	Ok(email.trim().to_lowercase())
}
