//! Response sinks.
//!
//! Handlers write into a [`ResponseSink`]. Benchmarks use [`MockTransport`],
//! which accepts and discards everything so that measured time is spent in
//! the router. Tests use [`RecordingTransport`] to observe what a handler
//! wrote.

use http::{HeaderMap, StatusCode};

/// Destination for a handler's response.
///
/// Writes cannot fail and report the full length as written.
pub trait ResponseSink {
    /// Returns the response headers. Header changes are not retained.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Writes body bytes, returning the number accepted.
    fn write(&mut self, bytes: &[u8]) -> usize;

    /// Writes a string body, returning the number of bytes accepted.
    fn write_str(&mut self, s: &str) -> usize {
        self.write(s.as_bytes())
    }

    /// Sets the response status.
    fn write_status(&mut self, status: StatusCode);
}

/// A sink that discards all output.
///
/// Holds an empty header map that is cleared on every access, so handlers
/// that insert headers never grow it across iterations.
#[derive(Debug, Default)]
pub struct MockTransport {
    headers: HeaderMap,
}

impl MockTransport {
    /// Creates a new mock transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseSink for MockTransport {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.headers.clear();
        &mut self.headers
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) -> usize {
        bytes.len()
    }

    #[inline]
    fn write_status(&mut self, _status: StatusCode) {}
}

/// A sink that keeps everything written to it.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    headers: HeaderMap,
    body: Vec<u8>,
    status: Option<StatusCode>,
    writes: usize,
}

impl RecordingTransport {
    /// Creates an empty recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the accumulated body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the accumulated body as UTF-8, lossily.
    #[must_use]
    pub fn body_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns the last status written, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns the number of body writes.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Returns the headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.headers.clear();
        self.body.clear();
        self.status = None;
        self.writes = 0;
    }
}

impl ResponseSink for RecordingTransport {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        self.writes += 1;
        self.body.extend_from_slice(bytes);
        bytes.len()
    }

    fn write_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }
}
