/// Structured event recognised in one line of debugger output.
///
/// Identifiers and line numbers of breakpoint events are kept exactly as
/// gdb printed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    BreakpointSet {
        id: String,
        file: String,
        line: String,
    },
    BreakpointCleared {
        id: String,
    },
    FrameStopped {
        file: String,
        line: u32,
    },
    SourceDirsNotice {
        dirs: String,
    },
}

/// Classification of a completed line, in match priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Event(Event),
    /// The line just before the last reported source line in a listing.
    Anchor,
    Plain,
}
