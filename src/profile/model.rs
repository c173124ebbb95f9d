use serde::{ Deserialize, Serialize };



/// A Gravatar profile as returned by the Profile API.
///
/// Everything except `hash` and `profile_url` may be missing. Missing text fields are
/// `None`, missing lists are empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Profile {
	/// SHA-256 hash of the primary email address.
	pub hash: String,
	/// Public display name.
	#[serde(default)]
	pub display_name: Option<String>,
	/// Full URL of the profile page.
	pub profile_url: String,
	/// URL of the avatar image.
	#[serde(default)]
	pub avatar_url: Option<String>,
	/// Alt text for the avatar image.
	#[serde(default)]
	pub avatar_alt_text: Option<String>,
	/// Free-form location.
	#[serde(default)]
	pub location: Option<String>,
	/// About-me text.
	#[serde(default)]
	pub description: Option<String>,
	/// Job title.
	#[serde(default)]
	pub job_title: Option<String>,
	/// Employer.
	#[serde(default)]
	pub company: Option<String>,
	/// Linked accounts on other services.
	#[serde(default)]
	pub verified_accounts: Vec<VerifiedAccount>,
	/// How to pronounce the name.
	#[serde(default)]
	pub pronunciation: Option<String>,
	/// Preferred pronouns.
	#[serde(default)]
	pub pronouns: Option<String>,
	/// IANA timezone name.
	#[serde(default)]
	pub timezone: Option<String>,
	/// Spoken languages.
	#[serde(default)]
	pub languages: Vec<Language>,
	/// Given name (authenticated requests only).
	#[serde(default)]
	pub first_name: Option<String>,
	/// Family name (authenticated requests only).
	#[serde(default)]
	pub last_name: Option<String>,
	/// Whether the profile belongs to an organization.
	#[serde(default)]
	pub is_organization: bool,
	/// Links shown on the profile.
	#[serde(default)]
	pub links: Vec<Link>,
	/// Interests.
	#[serde(default)]
	pub interests: Vec<Interest>,
	/// Payment links and crypto wallets.
	#[serde(default)]
	pub payments: Option<Payments>,
	/// Contact details.
	#[serde(default)]
	pub contact_info: Option<ContactInfo>,
	/// Photo gallery.
	#[serde(default)]
	pub gallery: Vec<GalleryImage>,
	/// Number of verified accounts.
	#[serde(default)]
	pub number_verified_accounts: u32,
	/// RFC 3339 time of the last edit.
	#[serde(default)]
	pub last_profile_edit: Option<String>,
	/// RFC 3339 time the account was registered.
	#[serde(default)]
	pub registration_date: Option<String>,
}

/// Account on another service linked to the profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerifiedAccount {
	/// Service identifier, e.g. `github`.
	pub service_type: String,
	/// Human readable service name.
	#[serde(default)]
	pub service_label: String,
	/// Service icon URL.
	#[serde(default)]
	pub service_icon: String,
	/// Account URL.
	pub url: String,
	/// Whether the account is hidden on the profile page.
	#[serde(default)]
	pub is_hidden: bool,
}

/// Spoken language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
	/// ISO 639-1 code.
	pub code: String,
	/// Language name.
	pub name: String,
	/// Whether this is the primary language.
	#[serde(default)]
	pub is_primary: bool,
	/// Display order.
	#[serde(default)]
	pub order: i32,
}

/// Labelled URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
	/// Label shown for the link.
	pub label: String,
	/// The URL itself. Older payloads call it `value`.
	#[serde(alias = "value")]
	pub url: String,
}

/// Interest listed on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interest {
	/// Interest identifier.
	pub id: i64,
	/// Interest name.
	pub name: String,
}

/// Payment links and crypto wallets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Payments {
	/// Payment links.
	#[serde(default)]
	pub links: Vec<Link>,
	/// Crypto wallet addresses.
	#[serde(default)]
	pub crypto_wallets: Vec<CryptoWallet>,
}

/// Crypto wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CryptoWallet {
	/// Wallet label, e.g. `BTC`.
	pub label: String,
	/// Wallet address.
	pub address: String,
}

/// Contact details. Each entry is optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContactInfo {
	/// Home phone.
	#[serde(default)]
	pub home_phone: Option<String>,
	/// Work phone.
	#[serde(default)]
	pub work_phone: Option<String>,
	/// Cell phone.
	#[serde(default)]
	pub cell_phone: Option<String>,
	/// Contact email address.
	#[serde(default)]
	pub email: Option<String>,
	/// Contact form URL.
	#[serde(default)]
	pub contact_form: Option<String>,
	/// Calendar URL.
	#[serde(default)]
	pub calendar: Option<String>,
}

/// Gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GalleryImage {
	/// Image URL.
	pub url: String,
	/// Alt text.
	#[serde(default)]
	pub alt_text: Option<String>,
}

/// Error body the API sends with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiError {
	pub(crate) error: String,
	#[serde(default)]
	pub(crate) code: Option<String>,
}
