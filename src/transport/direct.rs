// MIT License - Copyright (c) 2026 Peter Wright

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, error};

use crate::config::{Endpoint, ProjectorConfig};
use crate::error::{ProjectorError, Result};
use crate::transport::{Response, Transport};

/// `set_read_timeout` and `connect_timeout` reject a zero duration.
const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// An open command session with the projector.
///
/// The socket is closed by [`Connection::close`] or, failing that, on drop.
pub struct Connection {
    stream: Option<TcpStream>,
    endpoint: Endpoint,
}

impl Connection {
    /// Connect to `endpoint` and arm the receive timeout.
    pub fn open(endpoint: &Endpoint, timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        debug!("Connecting to projector at {}", endpoint);

        let connect_error = |source: std::io::Error| {
            error!("TCP connect to {} failed: {}", endpoint, source);
            ProjectorError::Connection {
                address: endpoint.to_string(),
                source,
            }
        };

        let addrs = (endpoint.host.as_str(), endpoint.port)
            .to_socket_addrs()
            .map_err(connect_error)?;

        let mut last_err = None;
        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, connect_timeout.max(MIN_TIMEOUT)) {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    debug!("Connect attempt to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        let stream = match stream {
            Some(s) => s,
            None => {
                let source = last_err.unwrap_or_else(|| {
                    std::io::Error::new(ErrorKind::NotFound, "host resolved to no addresses")
                });
                return Err(connect_error(source));
            }
        };

        stream.set_read_timeout(Some(timeout.max(MIN_TIMEOUT)))?;
        debug!("TCP socket connected");

        Ok(Self {
            stream: Some(stream),
            endpoint: endpoint.clone(),
        })
    }

    /// Write a command as UTF-8 text.
    pub fn send(&mut self, command: &str) -> Result<()> {
        let stream = self.stream_mut()?;
        stream.write_all(command.as_bytes()).map_err(|e| {
            error!("Failed to write command: {}", e);
            ProjectorError::Io(e)
        })?;
        debug!("Sent command: {}", command);
        Ok(())
    }

    /// Read one reply of at most `max_bytes` bytes.
    ///
    /// Returns [`Response::NoResponse`] when `max_bytes` is zero, when the
    /// timeout elapses, or when the projector hangs up without replying.
    pub fn receive(&mut self, max_bytes: usize) -> Result<Response> {
        if max_bytes == 0 {
            return Ok(Response::NoResponse);
        }

        let stream = self.stream_mut()?;
        let mut buf = vec![0u8; max_bytes];
        loop {
            match stream.read(&mut buf) {
                Ok(0) => {
                    debug!("Connection closed by projector without a reply");
                    return Ok(Response::NoResponse);
                }
                Ok(n) => {
                    let text = String::from_utf8_lossy(&buf[..n]).into_owned();
                    debug!("Received response: {}", text);
                    return Ok(Response::Text(text));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    debug!("No response within timeout");
                    return Ok(Response::NoResponse);
                }
                Err(e) => {
                    error!("Failed to read response: {}", e);
                    return Err(ProjectorError::Io(e));
                }
            }
        }
    }

    /// Close the socket. Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            // The peer may already have gone away.
            let _ = stream.shutdown(Shutdown::Both);
            debug!("Connection to {} closed", self.endpoint);
        }
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn stream_mut(&mut self) -> Result<&mut TcpStream> {
        self.stream
            .as_mut()
            .ok_or_else(|| ProjectorError::Io(std::io::Error::from(ErrorKind::NotConnected)))
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}

/// Direct TCP transport: one connection per transaction.
#[derive(Debug, Clone)]
pub struct DirectTcpTransport {
    endpoint: Endpoint,
    timeout: Duration,
    connect_timeout: Duration,
}

impl DirectTcpTransport {
    pub fn new(config: &ProjectorConfig) -> Self {
        Self {
            endpoint: config.endpoint(),
            timeout: config.timeout(),
            connect_timeout: config.connect_timeout(),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Open a connection to the configured endpoint.
    pub fn open(&self) -> Result<Connection> {
        Connection::open(&self.endpoint, self.timeout, self.connect_timeout)
    }
}

impl Transport for DirectTcpTransport {
    fn transact(&self, command: &str, max_response_bytes: usize) -> Result<Response> {
        let mut connection = self.open()?;
        connection.send(command)?;
        let response = connection.receive(max_response_bytes)?;
        connection.close();
        Ok(response)
    }
}
