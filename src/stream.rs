use std::{
	net::{ TcpStream, ToSocketAddrs, SocketAddr },
	time::Duration,
	io::{
		Read, Write,
		Result as IoResult,
		Error as IoError,
		ErrorKind,
	},
};
#[cfg(feature = "tls")]
use std::sync::Arc;

#[cfg(feature = "tls")]
use rustls::{ ClientConfig, ClientSession, StreamOwned };
#[cfg(feature = "tls")]
use webpki::DNSNameRef;
#[cfg(feature = "tls")]
use webpki_roots::TLS_SERVER_ROOTS;

use crate::error::Error;



#[cfg(feature = "tls")]
lazy_static! {
	static ref TLS_CONFIG: Arc<ClientConfig> = {
		let mut config = ClientConfig::new();

		config.root_store
			.add_server_trust_anchors(&TLS_SERVER_ROOTS);

		Arc::new(config)
	};
}

/// Raw connection to a Gravatar host.
pub(crate) enum Stream {
	Http(TcpStream),
	// Boxing for size variation.
	#[cfg(feature = "tls")]
	Https(Box<StreamOwned<ClientSession, TcpStream>>),
}

impl Read for Stream {
	fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
		let res = dispatch!(self, Stream, (Http, #[cfg(feature = "tls")] Https), s => s.read(buf));

		match res {
			Err(ref e) if is_close_notify(e) => Ok(0),
			res => res,
		}
	}
}

impl Write for Stream {
	fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
		dispatch!(self, Stream, (Http, #[cfg(feature = "tls")] Https), s => s.write(buf))
	}

	fn flush(&mut self) -> IoResult<()> {
		dispatch!(self, Stream, (Http, #[cfg(feature = "tls")] Https), s => s.flush())
	}
}

impl Stream {
	/// Opens a plain or TLS connection to `host:port`.
	pub(crate) fn open(host: &str, port: u16, https: bool, timeout: Option<Duration>) -> Result<Stream, Error> {
		let tcp = connect(host, port, timeout)?;

		if https {
			return open_tls(host, tcp);
		}

		Ok(Stream::Http(tcp))
	}
}



#[cfg(feature = "tls")]
fn open_tls(host: &str, tcp: TcpStream) -> Result<Stream, Error> {
	let name = DNSNameRef::try_from_ascii_str(host)
		.map_err(|_| Error::ConnectionFailed(format!("{} is not a valid DNS name", host)))?;

	let session = ClientSession::new(&TLS_CONFIG, name);

	Ok(Stream::Https(Box::new(StreamOwned::new(session, tcp))))
}

#[cfg(not(feature = "tls"))]
fn open_tls(_: &str, _: TcpStream) -> Result<Stream, Error> {
	Err(Error::TLSNotEnabled)
}



fn connect(host: &str, port: u16, timeout: Option<Duration>) -> Result<TcpStream, Error> {
	let ips: Vec<SocketAddr> = (host, port).to_socket_addrs()
		.map_err(|e| Error::ConnectionFailed(format!("{}", e)))?
		.collect();

	if ips.is_empty() {
		return Err(Error::ConnectionFailed(format!("No ip address for {}", host)));
	}

	let sock_addr = ips[0];

	let tcp = if let Some(timeout) = timeout {
		let tcp = TcpStream::connect_timeout(&sock_addr, timeout)?;

		tcp.set_read_timeout(Some(timeout))?;
		tcp.set_write_timeout(Some(timeout))?;

		tcp
	} else {
		TcpStream::connect(sock_addr)?
	};

	Ok(tcp)
}

fn is_close_notify(err: &IoError) -> bool {
	if err.kind() != ErrorKind::ConnectionAborted {
		return false;
	}

	if let Some(msg) = err.get_ref() {
		return msg.to_string().contains("CloseNotify");
	}

	false
}
