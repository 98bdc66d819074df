/// Result of pushing one byte into a [`LineBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Push {
    /// Byte accumulated (or dropped because the line already overflowed).
    Pending,
    /// Newline seen; carries the completed line without the `\n`.
    Line(CompletedLine),
}

/// A finished line of debugger output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedLine {
    pub bytes: Vec<u8>,
    /// The line was longer than the buffer bound. Its content is discarded
    /// and it must be treated as plain text.
    pub overflowed: bool,
}

/// Fixed-capacity line accumulator.
///
/// Overflow policy: once `limit` bytes are held, the next non-newline byte
/// clears the buffer and marks the line overflowed. Everything up to the
/// following newline is then ignored and that newline yields an empty,
/// overflowed line. The line after starts clean.
#[derive(Debug)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    limit: usize,
    overflowed: bool,
}

impl LineBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(limit),
            limit,
            overflowed: false,
        }
    }

    pub fn push(&mut self, byte: u8) -> Push {
        if byte == b'\n' {
            let line = CompletedLine {
                bytes: std::mem::take(&mut self.bytes),
                overflowed: self.overflowed,
            };
            self.bytes.reserve(self.limit);
            self.overflowed = false;
            return Push::Line(line);
        }

        if self.overflowed {
            return Push::Pending;
        }

        if self.bytes.len() == self.limit {
            tracing::debug!(limit = self.limit, "debugger output line overflowed");
            self.bytes.clear();
            self.overflowed = true;
            return Push::Pending;
        }

        self.bytes.push(byte);
        Push::Pending
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }
}
