use std::io::{self, BufRead, Write};

/// Line-oriented prompt/response over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` without a newline and read one answer.
    ///
    /// Returns `None` at end of input. The line terminator is stripped.
    ///
    /// # Errors
    /// Returns an error if writing the prompt or reading the answer fails.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        self.print(message)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Like [`Console::prompt`], treating end of input as an empty answer.
    ///
    /// # Errors
    /// Returns an error if writing the prompt or reading the answer fails.
    pub fn ask(&mut self, message: &str) -> io::Result<String> {
        Ok(self.prompt(message)?.unwrap_or_default())
    }

    /// Write `text` as-is and flush.
    ///
    /// # Errors
    /// Returns an error if the output cannot be written.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    /// Write `line` followed by a newline.
    ///
    /// # Errors
    /// Returns an error if the output cannot be written.
    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")?;
        self.output.flush()
    }

    pub const fn writer(&mut self) -> &mut W {
        &mut self.output
    }

    pub const fn output(&self) -> &W {
        &self.output
    }
}

/// `y`, `Y` or `1`.
pub fn is_affirmative(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y") || answer == "1"
}
