/// Dispatches one expression over every variant of a single-field transport enum.
///
/// Example:
/// ```ignore
/// dispatch!(self, Stream, (Http, #[cfg(feature = "tls")] Https), s => s.read(buf))
/// ```
/// Becomes:
/// ```ignore
/// match self {
///		Stream::Http(s) => s.read(buf),
///		#[cfg(feature = "tls")] Stream::Https(s) => s.read(buf),
///	}
/// ```
macro_rules! dispatch {
	($value:expr, $name:ident, ($($(#[cfg($cfg:ident = $val:tt)])? $op:ident),*), $s:ident => $body:expr) => {
		match $value {
			$($(#[cfg($cfg = $val)])? $name::$op($s) => $body,)*
		}
	};
}

/// Checks a precondition, returning `Error::InvalidArgument` when it does not hold.
///
/// Example:
/// ```ignore
/// ensure!(SIZE_RANGE.contains(&size), "size {} is out of range", size);
/// ```
macro_rules! ensure {
	($cond:expr, $($arg:tt)+) => {
		if !($cond) {
			return Err($crate::error::Error::InvalidArgument(format!($($arg)+)));
		}
	};
}
