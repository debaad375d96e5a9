//! Writing finished lines to the log

use std::io::{self, Write};

/// Writes `line` followed by a newline to stdout
///
/// Lines are handed over as-is; the agent scraping stdout does the rest.
pub fn emit(line: &str) {
    println!("{}", line);
}

/// Writes `line` followed by a newline to `writer`
pub fn emit_to<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
    writeln!(writer, "{}", line)
}
