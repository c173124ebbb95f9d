use std::{
	collections::hash_map::DefaultHasher,
	fs,
	hash::{ Hash, Hasher },
	io::{ Cursor, Result as IoResult },
};

use tempdir::TempDir;

use crate::{
	client::tests::serve,
	Error,
};
use super::{
	Link, Profile, ProfileRequest, ProfileRequestHandler, TokenProvider,
	PROFILES_BASE_URL,
};



const HASH: &str = "31c5543c1734d25c7206f5fd591525d0295bec6fe84ff82f946a34fe970a1e66";

const FULL_PROFILE: &str = r#"{
	"hash": "31c5543c1734d25c7206f5fd591525d0295bec6fe84ff82f946a34fe970a1e66",
	"display_name": "Alex Morgan",
	"profile_url": "https://gravatar.com/example",
	"avatar_url": "https://0.gravatar.com/avatar/31c5543c",
	"avatar_alt_text": "Alex Morgan's avatar",
	"location": "New York, USA",
	"description": "Photographer",
	"job_title": "Editor",
	"company": "ACME",
	"verified_accounts": [
		{ "service_type": "github", "service_label": "GitHub", "service_icon": "https://gravatar.com/icons/github.svg", "url": "https://github.com/example", "is_hidden": false }
	],
	"pronunciation": "Al-ex",
	"pronouns": "they/them",
	"timezone": "America/New_York",
	"languages": [ { "code": "en", "name": "English", "is_primary": true, "order": 1 } ],
	"first_name": "Alex",
	"last_name": "Morgan",
	"is_organization": false,
	"links": [ { "label": "Blog", "url": "https://example.com" } ],
	"interests": [ { "id": 7, "name": "photography" } ],
	"payments": {
		"links": [ { "label": "Tip jar", "url": "https://example.com/tip" } ],
		"crypto_wallets": [ { "label": "BTC", "address": "bc1qexample" } ]
	},
	"contact_info": { "email": "alex@example.com", "calendar": null },
	"gallery": [ { "url": "https://example.com/1.jpg", "alt_text": "Sunset" } ],
	"number_verified_accounts": 1,
	"last_profile_edit": "2024-07-18T22:32:12Z",
	"registration_date": "2021-10-01T19:30:58Z",
	"section_visibility": { "hidden_contact_info": false }
}"#;

const MINIMAL_PROFILE: &str = r#"{ "hash": "abc", "profile_url": "https://gravatar.com/abc" }"#;

fn hash_of<T: Hash>(value: &T) -> u64 {
	let mut hasher = DefaultHasher::new();
	value.hash(&mut hasher);

	hasher.finish()
}

fn ok_response(body: &str) -> String {
	format!("HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}", body.len(), body)
}

fn chunked_response(status: &str, body: &str) -> String {
	format!(
		"HTTP/1.1 {}\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\n\r\n{:x}\r\n{}\r\n0\r\n\r\n",
		status, body.len(), body,
	)
}

#[test]
fn test_deserialize_full_profile() -> IoResult<()> {
	let profile: Profile = serde_json::from_str(FULL_PROFILE)?;

	assert_eq!(profile.hash, HASH);
	assert_eq!(profile.display_name.as_deref(), Some("Alex Morgan"));
	assert_eq!(profile.verified_accounts[0].service_label, "GitHub");
	assert_eq!(profile.languages[0].code, "en");
	assert!(profile.languages[0].is_primary);
	assert_eq!(profile.interests[0].id, 7);
	assert_eq!(profile.payments.as_ref().map(|p| p.crypto_wallets.len()), Some(1));
	assert_eq!(profile.contact_info.as_ref().and_then(|c| c.email.as_deref()), Some("alex@example.com"));
	assert_eq!(profile.contact_info.as_ref().and_then(|c| c.calendar.as_deref()), None);
	assert_eq!(profile.gallery[0].alt_text.as_deref(), Some("Sunset"));
	assert_eq!(profile.number_verified_accounts, 1);

	Ok(())
}

#[test]
fn test_deserialize_minimal_profile() -> IoResult<()> {
	let profile: Profile = serde_json::from_str(MINIMAL_PROFILE)?;

	assert_eq!(profile.hash, "abc");
	assert_eq!(profile.display_name, None);
	assert!(profile.links.is_empty());
	assert!(!profile.is_organization);
	assert_eq!(profile.payments, None);

	let again: Profile = serde_json::from_str(&serde_json::to_string(&profile)?)?;
	assert_eq!(again, profile);

	Ok(())
}

#[test]
fn test_parse_chunked_response() -> IoResult<()> {
	let raw = chunked_response("200 OK", FULL_PROFILE);
	let profile = ProfileRequestHandler::new().parse_response(Cursor::new(raw))?;

	assert_eq!(profile.hash, HASH);
	assert_eq!(profile.company.as_deref(), Some("ACME"));

	Ok(())
}

#[test]
fn test_parse_error_response() {
	let raw = chunked_response("404 Not Found", r#"{"error":"Profile not found","code":"not_found"}"#);

	match ProfileRequestHandler::new().parse_response(Cursor::new(raw)) {
		Err(err) => {
			assert!(err.is_client_error());
			assert_eq!(err.to_string(), "API error: Profile not found");
		},
		Ok(profile) => panic!("expected an error, got {:?}", profile),
	}

	let raw = chunked_response("500 Internal Server Error", "oops");
	let err = ProfileRequestHandler::new().parse_response(Cursor::new(raw)).unwrap_err();

	assert_eq!(err.to_string(), "API error: HTTP 500");
	assert!(matches!(ProfileRequestHandler::new().parse_response(Cursor::new("")), Err(Error::NoStatusLineInResponse)));
}

#[test]
fn test_request_url() -> IoResult<()> {
	let handler = ProfileRequestHandler::new();

	assert_eq!(handler.request_url(HASH)?, format!("{}{}", PROFILES_BASE_URL, HASH));
	assert_eq!(handler.request_url(" someone ")?, "https://api.gravatar.com/v3/profiles/someone");
	assert!(matches!(handler.request_url("  "), Err(Error::InvalidArgument(_))));

	let handler = ProfileRequestHandler::with_base_url("http://localhost:8080/profiles")?;
	assert_eq!(handler.request_url("abc")?, "http://localhost:8080/profiles/abc");

	Ok(())
}

#[test]
fn test_get_profile_counts_requests() -> IoResult<()> {
	let (base, heads) = serve(vec![
		ok_response(MINIMAL_PROFILE),
		ok_response(MINIMAL_PROFILE),
		ok_response(MINIMAL_PROFILE),
	])?;

	let handler = ProfileRequestHandler::with_base_url(&format!("{}/v3/profiles/", base))?;

	handler.get_profile(None, "abc")?;
	handler.get_profile(Some(&b"token-1"[..]), "abc")?;
	handler.get_profile(Some(&b"token-2"[..]), "abc")?;

	assert_eq!(handler.unauthenticated_requests(), 1);
	assert_eq!(handler.authenticated_requests(), 2);

	let first = heads.recv().map_err(|e| Error::Client(e.to_string()))?;
	assert!(first.starts_with("GET /v3/profiles/abc HTTP/1.1\r\n"));
	assert!(first.contains("Accept: application/json\r\n"));
	assert!(!first.contains("Authorization"));

	let second = heads.recv().map_err(|e| Error::Client(e.to_string()))?;
	assert!(second.contains("Authorization: Bearer token-1\r\n"));

	Ok(())
}

#[test]
fn test_get_profile_not_found() -> IoResult<()> {
	let body = r#"{"error":"Profile not found","code":"not_found"}"#;
	let (base, _) = serve(vec![
		format!("HTTP/1.1 404 Not Found\r\nContent-Length: {}\r\n\r\n{}", body.len(), body),
	])?;

	let handler = ProfileRequestHandler::with_base_url(&base)?;
	let err = ProfileRequest::from_hash_or_id("missing")?
		.profile_with(&handler)
		.unwrap_err();

	assert!(matches!(err, Error::Client(_)));
	assert_eq!(err.to_string(), "API error: Profile not found");
	assert_eq!(handler.unauthenticated_requests(), 1);

	Ok(())
}

#[test]
fn test_token_provider() -> IoResult<()> {
	let provider = TokenProvider::from_static("static", b"abc")?;

	assert_eq!(provider.token()?, b"abc".to_vec());
	assert_eq!(provider.source(), "static");

	let same_source = TokenProvider::new("static", || None)?;

	assert_eq!(provider, same_source);
	assert_eq!(hash_of(&provider), hash_of(&same_source));
	assert!(matches!(same_source.token(), Err(Error::NullInput(_))));

	let env = TokenProvider::from_env("GRAVATAR_CLIENT_TEST_TOKEN_NEVER_SET")?;

	assert_eq!(env.source(), "env:GRAVATAR_CLIENT_TEST_TOKEN_NEVER_SET");
	assert!(matches!(env.token(), Err(Error::NullInput(_))));
	assert!(matches!(TokenProvider::new(" ", || None), Err(Error::InvalidArgument(_))));

	Ok(())
}

#[test]
fn test_missing_token_stops_request() -> IoResult<()> {
	let handler = ProfileRequestHandler::with_base_url("http://127.0.0.1:9/")?;
	let req = ProfileRequest::from_hash_or_id(HASH)?
		.set_token_provider(TokenProvider::new("empty", || None)?);

	assert!(matches!(req.profile_with(&handler), Err(Error::NullInput(_))));
	assert_eq!(handler.authenticated_requests(), 0);
	assert_eq!(handler.unauthenticated_requests(), 0);

	Ok(())
}

#[test]
fn test_profile_request_equality() -> IoResult<()> {
	let a = ProfileRequest::from_email("Someone@Example.com")?;
	let b = ProfileRequest::from_hash_or_id(&crate::utils::email_to_profile_hash("someone@example.com")?)?;

	assert_eq!(a, b);
	assert_eq!(hash_of(&a), hash_of(&b));

	let c = b.clone().set_token_provider(TokenProvider::from_static("static", b"abc")?);

	assert_ne!(b, c);
	assert_eq!(c.token_provider().map(TokenProvider::source), Some("static"));
	assert!(matches!(ProfileRequest::from_hash_or_id(""), Err(Error::InvalidArgument(_))));

	Ok(())
}

#[test]
fn test_write_to_file() -> IoResult<()> {
	let (base, _) = serve(vec![ ok_response(FULL_PROFILE) ])?;
	let handler = ProfileRequestHandler::with_base_url(&base)?;
	let dir = TempDir::new("profile_output")?;
	let path = dir.path().join("profile.json");

	ProfileRequest::from_hash_or_id(HASH)?.write_to_file_with(&handler, &path)?;

	let written: Profile = serde_json::from_str(&fs::read_to_string(&path)?)?;
	assert_eq!(written, serde_json::from_str::<Profile>(FULL_PROFILE)?);

	Ok(())
}

#[test]
fn test_write_to_directory_fails() -> IoResult<()> {
	let dir = TempDir::new("profile_output")?;
	let handler = ProfileRequestHandler::with_base_url("http://127.0.0.1:9/")?;
	let result = ProfileRequest::from_hash_or_id(HASH)?.write_to_file_with(&handler, dir.path());

	assert!(matches!(result, Err(Error::InvalidArgument(_))));
	assert_eq!(handler.unauthenticated_requests(), 0);

	Ok(())
}

#[test]
fn test_request_url_keeps_id_in_one_segment() -> IoResult<()> {
	let handler = ProfileRequestHandler::new();

	assert_eq!(handler.request_url("a/b?c d")?, "https://api.gravatar.com/v3/profiles/a%2Fb%3Fc%20d");
	assert_eq!(handler.request_url("abc?fields=x#frag")?, "https://api.gravatar.com/v3/profiles/abc%3Ffields%3Dx%23frag");
	assert_eq!(handler.request_url("../../v2/other")?, "https://api.gravatar.com/v3/profiles/..%2F..%2Fv2%2Fother");
	assert_eq!(handler.request_url("john doe")?, "https://api.gravatar.com/v3/profiles/john%20doe");
	assert!(matches!(handler.request_url(".."), Err(Error::InvalidArgument(_))));
	assert!(matches!(ProfileRequest::from_hash_or_id(" . "), Err(Error::InvalidArgument(_))));
	assert!(matches!(ProfileRequestHandler::with_base_url("not a url"), Err(Error::InvalidArgument(_))));

	Ok(())
}

#[test]
fn test_encoded_id_reaches_server() -> IoResult<()> {
	let (base, heads) = serve(vec![ ok_response(MINIMAL_PROFILE) ])?;
	let handler = ProfileRequestHandler::with_base_url(&base)?;

	ProfileRequest::from_hash_or_id("john doe?x")?.profile_with(&handler)?;

	let head = heads.recv().map_err(|e| Error::Client(e.to_string()))?;
	assert!(head.starts_with("GET /john%20doe%3Fx HTTP/1.1\r\n"));

	Ok(())
}

#[test]
fn test_token_with_line_break_is_rejected() -> IoResult<()> {
	let (base, heads) = serve(vec![ ok_response(MINIMAL_PROFILE) ])?;
	let handler = ProfileRequestHandler::with_base_url(&base)?;
	let req = ProfileRequest::from_hash_or_id("abc")?
		.set_token_provider(TokenProvider::from_static("static", b"tok\r\nX-Injected: yes")?);

	assert!(matches!(req.profile_with(&handler), Err(Error::InvalidArgument(_))));

	// The rejected request never reached the server.
	handler.get_profile(None, "abc")?;

	let head = heads.recv().map_err(|e| Error::Client(e.to_string()))?;
	assert!(!head.contains("X-Injected"));
	assert!(!head.contains("Authorization"));

	Ok(())
}

#[test]
fn test_link_accepts_value_key() -> IoResult<()> {
	let link: Link = serde_json::from_str(r#"{ "label": "Blog", "value": "https://example.com" }"#)?;

	assert_eq!(link.url, "https://example.com");
	assert_eq!(serde_json::to_value(&link)?["url"], "https://example.com");

	Ok(())
}
