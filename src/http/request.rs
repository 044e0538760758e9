/// Renders the one-shot `GET` sent on every connection.
///
/// Host and path are validated as printable ASCII before a run starts, so the
/// bytes are exactly the characters given.
#[must_use]
pub fn build_request(host: &str, path: &str) -> Vec<u8> {
    format!("GET {path} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n\r\n").into_bytes()
}

/// Accumulates response bytes until the header block is terminated.
#[derive(Debug, Default)]
pub struct ResponseHead {
    buffer: Vec<u8>,
    bytes_read: u64,
    complete: bool,
}

impl ResponseHead {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            bytes_read: 0,
            complete: false,
        }
    }

    /// Appends a chunk and reports whether the header terminator has been seen.
    pub fn push(&mut self, chunk: &[u8]) -> bool {
        let previous_len = self.buffer.len();
        self.buffer.extend_from_slice(chunk);
        self.bytes_read = self
            .bytes_read
            .saturating_add(u64::try_from(chunk.len()).unwrap_or(u64::MAX));
        if !self.complete {
            // A terminator may straddle the previous chunk boundary.
            let from = previous_len.saturating_sub(3);
            let tail = self.buffer.get(from..).unwrap_or_default();
            self.complete = has_header_terminator(tail);
        }
        self.complete
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub const fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// First line of the buffer, decoded lossily. Empty when nothing arrived.
    ///
    /// A bare `\r` ends the line as well as `\n`, along with the other
    /// Unicode line boundaries.
    #[must_use]
    pub fn status_line(&self) -> String {
        String::from_utf8_lossy(&self.buffer)
            .split(LINE_BOUNDARIES)
            .next()
            .unwrap_or_default()
            .to_owned()
    }
}

const LINE_BOUNDARIES: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// `true` when the bytes contain `\r\n\r\n` or a bare `\n\n`.
#[must_use]
pub fn has_header_terminator(bytes: &[u8]) -> bool {
    bytes.windows(4).any(|window| window == b"\r\n\r\n")
        || bytes.windows(2).any(|window| window == b"\n\n")
}
