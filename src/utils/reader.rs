use std::{
	collections::HashMap,
	io::{ BufRead, Read },
};

use crate::{
	error::Error,
	GeneralInfo, StatusLine,
};



/// Longest status, header or chunk-size line we will buffer.
const MAX_LINE: u64 = 8 * 1024;

/// Reads an HTTP response off a line-oriented stream.
///
/// Headers are either skipped or collected, and a chunked body is reassembled into one
/// piece. A truncated stream is not an error: whatever arrived before EOF is returned.
/// Only a chunk-size line that is not hexadecimal fails.
#[derive(Debug)]
pub struct ResourceReader<R> {
	reader: R,
}

/// Wraps a buffered reader positioned at the start of a response (or of its headers).
impl<R: BufRead> From<R> for ResourceReader<R> {
	fn from(reader: R) -> ResourceReader<R> {
		ResourceReader { reader }
	}
}

impl<R: BufRead> ResourceReader<R> {
	/// Discards lines up to and including the first blank line, or up to EOF.
	pub fn skip_headers(&mut self) -> Result<&mut ResourceReader<R>, Error> {
		self.header_block(|line| trace!("Skipping header: {}", line))?;

		Ok(self)
	}

	/// Reads and decodes a chunked body, replacing invalid UTF-8.
	pub fn read_chunked_body(&mut self) -> Result<String, Error> {
		let body = self.read_chunked_bytes()?;

		Ok(String::from_utf8_lossy(&body).into_owned())
	}

	/// Reads a chunked body until the zero-size chunk, an empty size line, or EOF.
	pub fn read_chunked_bytes(&mut self) -> Result<Vec<u8>, Error> {
		let mut body = vec![];

		while let Some(line) = self.read_line()? {
			// Chunk extensions follow a ';' and are ignored.
			let token = line.split(';').next().unwrap_or("").trim();

			if token.is_empty() {
				break;
			}

			let size = usize::from_str_radix(token, 16)
				.map_err(|_| Error::NumberFormat(token.to_string()))?;

			trace!("Reading chunk of {} bytes", size);

			if size == 0 {
				// Trailer section is shaped like a header block.
				self.header_block(|line| trace!("Skipping trailer: {}", line))?;

				break;
			}

			let read = (&mut self.reader).take(size as u64).read_to_end(&mut body)?;

			if read < size {
				debug!("Stream ended {} bytes into a {} byte chunk", read, size);

				break;
			}

			// CRLF between chunks.
			self.read_line()?;
		}

		Ok(body)
	}

	/// Reads the status line and collects the header block.
	pub fn read_head(&mut self) -> Result<GeneralInfo, Error> {
		let line = self.read_line()?.ok_or(Error::NoStatusLineInResponse)?;
		let status = parse_status_line(&line)?;
		let mut headers = HashMap::new();

		self.header_block(|line| {
			if let Some((name, value)) = parse_header(line) {
				headers.insert(name, value);
			}
		})?;

		Ok(GeneralInfo {
			status,
			headers,
		})
	}

	/// Reads the body that follows `info`, honouring chunking and `Content-Length`.
	pub fn read_body(&mut self, info: &GeneralInfo) -> Result<Vec<u8>, Error> {
		let code = info.status.code;

		if (100..200).contains(&code) || code == 204 || code == 304 {
			return Ok(vec![]);
		}

		if info.is_chunked() {
			return self.read_chunked_bytes();
		}

		let mut body = vec![];

		if let Some(length) = info.content_length() {
			(&mut self.reader).take(length).read_to_end(&mut body)?;
		} else {
			self.reader.read_to_end(&mut body)?;
		}

		Ok(body)
	}

	/// Mutable access to the underlying reader.
	pub fn get_mut(&mut self) -> &mut R {
		&mut self.reader
	}

	/// Gives back the underlying reader, positioned after whatever was consumed.
	pub fn into_inner(self) -> R {
		self.reader
	}

	fn header_block<F: FnMut(&str)>(&mut self, mut sink: F) -> Result<(), Error> {
		while let Some(line) = self.read_line()? {
			if line.is_empty() {
				break;
			}

			sink(&line);
		}

		Ok(())
	}

	/// Next line without its line ending, or `None` at EOF.
	fn read_line(&mut self) -> Result<Option<String>, Error> {
		let mut buf = vec![];

		let n = (&mut self.reader).take(MAX_LINE).read_until(b'\n', &mut buf)?;

		if n == 0 {
			return Ok(None);
		}

		if buf.ends_with(b"\r\n") {
			buf.truncate(buf.len() - 2);
		} else if buf.ends_with(b"\n") {
			buf.truncate(buf.len() - 1);
		}

		Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
	}
}



// -----------------------------------------------------------------------------------------------------------
// Helper functions

fn parse_status_line(line: &str) -> Result<StatusLine, Error> {
	let mut split = line.trim().splitn(3, ' ');

	let version = split.next().filter(|v| v.starts_with("HTTP/")).ok_or(Error::NoStatusLineInResponse)?;
	let code = split
		.next()
		.and_then(|code| code.parse::<u16>().ok())
		.ok_or(Error::NoStatusLineInResponse)?;
	let reason = split.next().unwrap_or("").trim();

	Ok(StatusLine {
		version: version.to_string(),
		code,
		reason: reason.to_string(),
	})
}

fn parse_header(line: &str) -> Option<(String, String)> {
	let idx = line.find(':')?;
	let name = line[..idx].trim();

	if name.is_empty() {
		return None;
	}

	Some((name.to_ascii_lowercase(), line[idx + 1..].trim().to_string()))
}
