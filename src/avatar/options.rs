/// Highest audience rating an avatar may carry and still be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
	/// Suitable for all audiences.
	G,
	/// May contain rude gestures, provocatively dressed individuals, mild violence.
	PG,
	/// May contain harsh profanity, intense violence, nudity or hard drug use.
	R,
	/// May contain hardcore sexual imagery or extremely disturbing violence.
	X,
}

impl Rating {
	/// Value sent in the query string.
	pub fn as_param(self) -> &'static str {
		match self {
			Rating::G => "g",
			Rating::PG => "pg",
			Rating::R => "r",
			Rating::X => "x",
		}
	}
}

/// Built-in images Gravatar serves when a hash has no avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultImageType {
	/// Respond with a 404 instead of an image.
	NotFound,
	/// Simple cartoon-style silhouetted outline.
	MysteryPerson,
	/// Geometric pattern based on the hash.
	IdentIcon,
	/// Generated monster.
	MonsterId,
	/// Generated face.
	Wavatar,
	/// 8-bit arcade-style pixelated face.
	Retro,
	/// Generated robot.
	RoboHash,
	/// Transparent PNG.
	Blank,
}

impl DefaultImageType {
	/// Value sent in the query string.
	pub fn as_param(self) -> &'static str {
		match self {
			DefaultImageType::NotFound => "404",
			DefaultImageType::MysteryPerson => "mp",
			DefaultImageType::IdentIcon => "identicon",
			DefaultImageType::MonsterId => "monsterid",
			DefaultImageType::Wavatar => "wavatar",
			DefaultImageType::Retro => "retro",
			DefaultImageType::RoboHash => "robohash",
			DefaultImageType::Blank => "blank",
		}
	}
}

/// What to show when the hash has no avatar. Either a built-in image or a URL of our own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefaultImage {
	/// One of Gravatar's built-in images.
	Type(DefaultImageType),
	/// A publicly reachable image URL.
	Url(String),
}

impl DefaultImage {
	/// Value sent in the query string, before percent-encoding.
	pub fn as_param(&self) -> &str {
		match self {
			DefaultImage::Type(kind) => kind.as_param(),
			DefaultImage::Url(url) => url,
		}
	}
}

/// Scheme used for avatar URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
	/// Plain http.
	Http,
	/// https.
	Https,
}

impl Protocol {
	/// Base URL avatar hashes are appended to.
	pub fn avatar_base_url(self) -> &'static str {
		match self {
			Protocol::Http => "http://www.gravatar.com/avatar/",
			Protocol::Https => "https://www.gravatar.com/avatar/",
		}
	}
}

/// Style of a QR code image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QrImageType {
	/// No image in the middle of the code.
	Blank,
	/// Gravatar's default image.
	Default,
	/// The user's avatar.
	User,
	/// The Gravatar logo.
	Gravatar,
}

impl QrImageType {
	/// Value sent in the query string.
	pub fn as_param(self) -> &'static str {
		match self {
			QrImageType::Blank => "blank",
			QrImageType::Default => "default",
			QrImageType::User => "user",
			QrImageType::Gravatar => "gravatar",
		}
	}
}

/// QR code rendering version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QrImageVersion {
	/// Unspecified version.
	Blank,
	/// Version 1: square dots.
	One,
	/// Version 3: rounded dots.
	Three,
}

impl QrImageVersion {
	/// Value sent in the query string.
	pub fn as_param(self) -> &'static str {
		match self {
			QrImageVersion::Blank => "blank",
			QrImageVersion::One => "1",
			QrImageVersion::Three => "3",
		}
	}
}

/// Avatar query parameters, spelled either in full or by their first letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlParameter {
	/// `size` / `s`.
	Size,
	/// `rating` / `r`.
	Rating,
	/// `default` / `d`.
	Default,
	/// `forcedefault` / `f`.
	ForceDefault,
}

impl UrlParameter {
	/// Key for this parameter.
	pub fn key(self, full: bool) -> &'static str {
		let name = match self {
			UrlParameter::Size => "size",
			UrlParameter::Rating => "rating",
			UrlParameter::Default => "default",
			UrlParameter::ForceDefault => "forcedefault",
		};

		if full {
			name
		} else {
			&name[..1]
		}
	}
}
