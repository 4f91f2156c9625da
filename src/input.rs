//! Purchase input

use std::io::{self, BufRead, Write};

/// Prompt shown before reading a purchase line.
pub const PROMPT: &str = "Please enter all the items purchased separated by a comma";

/// Split a purchase line into item names.
///
/// All whitespace is removed first, then the remainder is split on commas.
/// Empty pieces are discarded.
pub fn tokenize(line: &str) -> Vec<String> {
    let compact: String = line.split_whitespace().collect();

    compact
        .split(',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prompt for and read a single purchase line.
///
/// Returns an empty string at end of input.
///
/// # Errors
///
/// Returns an error if writing the prompt or reading the line fails.
pub fn read_purchases(mut input: impl BufRead, mut output: impl Write) -> io::Result<String> {
    writeln!(output, "{PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    writeln!(output)?;

    Ok(line)
}
