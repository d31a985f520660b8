//! Stdin prompting for the interactive session.

use std::io::{self, BufRead, Write};

/// Print `prompt`, read one line from stdin, and return it trimmed.
pub fn ask(prompt: &str) -> io::Result<String> {
    print!("{prompt} ");
    let _ = io::stdout().flush();

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    ask_with_reader(&mut reader)
}

/// Testable inner implementation that accepts any `BufRead`.
fn ask_with_reader<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace_and_newline() {
        let mut input = "  /tmp/source.key  \n".as_bytes();
        assert_eq!(ask_with_reader(&mut input).unwrap(), "/tmp/source.key");
    }

    #[test]
    fn empty_line_yields_empty_string() {
        let mut input = "\n".as_bytes();
        assert_eq!(ask_with_reader(&mut input).unwrap(), "");
    }

    #[test]
    fn end_of_input_yields_empty_string() {
        let mut input = "".as_bytes();
        assert_eq!(ask_with_reader(&mut input).unwrap(), "");
    }
}
