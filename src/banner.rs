use std::io::{self, Write};

const TITLE: &str = "\x1b[36;1m*****\x1b[37;1m vimgdb \x1b[36;1m*****\x1b[22;0m";
const BULLET: &str = "\x1b[32;1m* \x1b[33;1m";
const RESET: &str = "\x1b[22;0m";

/// Short usage notes printed before gdb starts.
///
/// Lines end in `\r\n` because the terminal is already in raw mode.
pub fn write_banner<W: Write>(out: &mut W, server: &str) -> io::Result<()> {
    write!(out, "\r{}\r\n\r\n", TITLE)?;
    let notes = [
        "Use this just like gdb.".to_string(),
        format!("Connected to the Vim server '{}'; pick another with --server=SERVER.", server),
        "The Vim server must already be running (gvim --serverlist lists them).".to_string(),
        "Every time a frame is shown the surrounding source is listed and the current line highlighted."
            .to_string(),
    ];
    for note in notes {
        write!(out, "\r{}{}{}\r\n", BULLET, note, RESET)?;
    }
    write!(out, "\r\n")?;
    out.flush()
}
