//! Call-stack snapshots attached to stack and code nodes.
//!
//! Capturing only records instruction pointers; symbol resolution happens
//! once, the first time a stack is rendered.

use std::fmt;

use once_cell::sync::OnceCell;

/// Maximum number of frames kept per capture.
pub const MAX_DEPTH: usize = 32;

const UNKNOWN: &str = "<unknown>";

/// A single resolved call frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    function: String,
    file: String,
    line: u32,
}

impl Frame {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
        }
    }

    /// Demangled function name without the trailing hash.
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    fn resolve(ip: usize) -> Self {
        let mut frame = Frame::new(UNKNOWN, UNKNOWN, 0);
        let mut named = false;
        backtrace::resolve(ip as *mut std::ffi::c_void, |symbol| {
            // Inlined frames are reported innermost first; keep the first name.
            if named {
                return;
            }
            if let Some(name) = symbol.name() {
                frame.function = format!("{name:#}");
                named = true;
            }
            if let Some(path) = symbol.filename() {
                frame.file = path.display().to_string();
            }
            if let Some(line) = symbol.lineno() {
                frame.line = line;
            }
        });
        frame
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.file, self.line, self.function)
    }
}

/// Immutable snapshot of the call stack at the point an error node was built.
pub struct Stack {
    ips: Vec<usize>,
    frames: OnceCell<Vec<Frame>>,
}

impl Stack {
    /// Capture the current call stack.
    ///
    /// The frame of `capture` itself is always dropped; `skip` additional
    /// frames above it are dropped as well, so a constructor that calls
    /// `capture(1)` records its own caller as the top frame. When the
    /// capture frame cannot be located nothing is dropped.
    #[inline(never)]
    pub fn capture(skip: usize) -> Self {
        let anchor = Stack::capture as usize;
        let mut raw: Vec<(usize, usize)> = Vec::with_capacity(MAX_DEPTH);
        let limit = MAX_DEPTH + skip + 8;

        backtrace::trace(|frame| {
            raw.push((frame.ip() as usize, frame.symbol_address() as usize));
            raw.len() < limit
        });

        let start = raw
            .iter()
            .position(|&(_, symbol)| symbol == anchor)
            .map(|pos| pos + 1 + skip)
            .unwrap_or(0);

        let ips = raw
            .into_iter()
            .skip(start)
            .take(MAX_DEPTH)
            // Kept frames hold return addresses; step back into the call.
            .map(|(ip, _)| ip.saturating_sub(1))
            .collect();

        Self {
            ips,
            frames: OnceCell::new(),
        }
    }

    /// Build a stack from already resolved frames.
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self {
            ips: Vec::new(),
            frames: OnceCell::with_value(frames),
        }
    }

    /// Resolved frames, innermost first.
    pub fn frames(&self) -> &[Frame] {
        self.frames
            .get_or_init(|| self.ips.iter().map(|&ip| Frame::resolve(ip)).collect())
    }

    /// Number of captured frames.
    pub fn len(&self) -> usize {
        match self.frames.get() {
            Some(frames) => frames.len(),
            None => self.ips.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The frame closest to the capture point.
    pub fn top(&self) -> Option<&Frame> {
        self.frames().first()
    }

    pub(crate) fn write_verbose<W: fmt::Write>(&self, out: &mut W, skip: usize) -> fmt::Result {
        for frame in self.frames().iter().skip(skip) {
            write!(out, "\n{}\n\t{}:{}", frame.function, frame.file, frame.line)?;
        }
        Ok(())
    }

    pub(crate) fn write_compact<W: fmt::Write>(&self, out: &mut W, skip: usize) -> fmt::Result {
        if let Some(frame) = self.frames().get(skip) {
            write!(out, " [{frame}]")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.frames()).finish()
    }
}
