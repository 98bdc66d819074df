use regex::bytes::Regex;

use crate::protocol::event::{Event, LineKind};

const BREAKPOINT_SET: &str =
    r"Breakpoint ([0-9]+) at 0x[0-9A-Fa-f]+: file ([^,]+), line ([0-9]+)\.";
const BREAKPOINT_CLEARED: &str = r"Deleted breakpoint ([0-9]+)";
const FRAME_STOPPED: &str = r"\x1a\x1a([^:]*):([0-9]+)";
const SOURCE_DIRS: &str = r"Source directories searched: (.*)";

/// Compiled gdb output patterns.
///
/// Built once per output filter; failure to compile is a startup error.
#[derive(Debug, Clone)]
pub struct Patterns {
    breakpoint_set: Regex,
    breakpoint_cleared: Regex,
    frame_stopped: Regex,
    source_dirs: Regex,
}

impl Patterns {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            breakpoint_set: Regex::new(BREAKPOINT_SET)?,
            breakpoint_cleared: Regex::new(BREAKPOINT_CLEARED)?,
            frame_stopped: Regex::new(FRAME_STOPPED)?,
            source_dirs: Regex::new(SOURCE_DIRS)?,
        })
    }

    /// Classify one completed line (without its newline or trailing `\r`).
    ///
    /// `last_line` is the source line of the most recent frame stop.
    pub fn classify(&self, line: &[u8], last_line: Option<u32>) -> LineKind {
        if let Some(caps) = self.breakpoint_set.captures(line) {
            return LineKind::Event(Event::BreakpointSet {
                id: text(&caps[1]),
                file: text(&caps[2]),
                line: text(&caps[3]),
            });
        }

        if let Some(caps) = self.breakpoint_cleared.captures(line) {
            return LineKind::Event(Event::BreakpointCleared { id: text(&caps[1]) });
        }

        if let Some(caps) = self.frame_stopped.captures(line) {
            // Digits too large for a line number can't be a real frame.
            if let Ok(number) = text(&caps[2]).parse::<u32>() {
                return LineKind::Event(Event::FrameStopped {
                    file: text(&caps[1]),
                    line: number,
                });
            }
        }

        if is_anchor(line, last_line) {
            return LineKind::Anchor;
        }

        if let Some(caps) = self.source_dirs.captures(line) {
            return LineKind::Event(Event::SourceDirsNotice {
                dirs: text(&caps[1]),
            });
        }

        LineKind::Plain
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// The line just before the current source line in a listing.
///
/// gdb prints listings as `<number>\t<source>`, so this is normally the line
/// numbered `last_line - 1`. The number must match exactly and be followed
/// by whitespace or end of line. A stop on line 1 has no line before it;
/// the echoed `list 1,N` command stands in for it.
fn is_anchor(line: &[u8], last_line: Option<u32>) -> bool {
    match last_line {
        None | Some(0) => false,
        Some(1) => echoes_first_listing(line),
        Some(n) => leading_number(line) == Some(n - 1),
    }
}

fn echoes_first_listing(line: &[u8]) -> bool {
    let line = line.trim_ascii_end();
    let digits = line.iter().rev().take_while(|b| b.is_ascii_digit()).count();
    digits > 0 && line[..line.len() - digits].ends_with(b"list 1,")
}

fn leading_number(line: &[u8]) -> Option<u32> {
    let digits = line.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    match line.get(digits) {
        None | Some(b' ') | Some(b'\t') => {}
        Some(_) => return None,
    }
    std::str::from_utf8(&line[..digits]).ok()?.parse().ok()
}
