//! The external query engine: a long-lived command interpreter that takes one
//! textual command per call and answers with a textual result blob.
//!
//! The interpreter has no framing of its own, so every command is followed by
//! a marker command that prints a sentinel line. Everything printed before the
//! sentinel is the command's output.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::Context as _;

/// Text-in, text-out command interpreter.
pub trait QueryEngine {
    /// Submit one command and block until its output is complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be delivered or the engine
    /// stops answering.
    fn execute(&mut self, command: &str) -> anyhow::Result<String>;
}

impl<E: QueryEngine + ?Sized> QueryEngine for &mut E {
    fn execute(&mut self, command: &str) -> anyhow::Result<String> {
        (**self).execute(command)
    }
}

/// Placeholder in the marker command template replaced by the sentinel.
const MARKER_PLACEHOLDER: &str = "{marker}";

/// A single interpreter process kept open for the whole run.
pub struct ShellSession {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    marker_command: String,
    submitted: u64,
    alive: bool,
}

impl ShellSession {
    /// Start the interpreter and confirm it answers.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned or does not echo
    /// the first sentinel back.
    pub fn open(program: &str, args: &[String], marker_command: &str) -> anyhow::Result<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("start query engine `{program}`"))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow::anyhow!("query engine stdin not captured"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("query engine stdout not captured"))?;

        let mut session = Self {
            child,
            stdin: Some(stdin),
            stdout: BufReader::new(stdout),
            marker_command: marker_command.to_string(),
            submitted: 0,
            alive: true,
        };

        session
            .execute("")
            .with_context(|| format!("query engine `{program}` did not answer"))?;
        tracing::debug!(program, "query engine session started");
        Ok(session)
    }

    fn next_marker(&mut self) -> String {
        self.submitted += 1;
        format!(
            "__ADCONNECT_END_{}_{}__",
            std::process::id(),
            self.submitted
        )
    }
}

/// Collapse a command onto one line; the interpreter reads line by line.
fn single_line(command: &str) -> String {
    command
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl QueryEngine for ShellSession {
    fn execute(&mut self, command: &str) -> anyhow::Result<String> {
        if !self.alive {
            anyhow::bail!("query engine session is closed");
        }

        let marker = self.next_marker();
        let marker_line = self.marker_command.replace(MARKER_PLACEHOLDER, &marker);
        let command = single_line(command);

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("query engine stdin closed"))?;
        let mut payload = String::new();
        if !command.is_empty() {
            payload.push_str(&command);
            payload.push('\n');
        }
        payload.push_str(&marker_line);
        payload.push('\n');
        if let Err(e) = stdin
            .write_all(payload.as_bytes())
            .and_then(|()| stdin.flush())
        {
            self.alive = false;
            return Err(e).context("send command to query engine");
        }

        let mut lines = Vec::new();
        let mut buf = String::new();
        loop {
            buf.clear();
            let read = self
                .stdout
                .read_line(&mut buf)
                .context("read query engine output")?;
            if read == 0 {
                self.alive = false;
                anyhow::bail!("query engine exited before finishing the command");
            }
            let line = buf.trim_end_matches(['\r', '\n']);
            // Output without a trailing newline shares its last line with the marker.
            if let Some(rest) = line.trim_end().strip_suffix(marker.as_str()) {
                if !rest.trim().is_empty() {
                    lines.push(rest.to_string());
                }
                break;
            }
            lines.push(line.to_string());
        }

        Ok(lines.join("\n"))
    }
}

impl Drop for ShellSession {
    fn drop(&mut self) {
        // Closing stdin lets the interpreter reach EOF and exit on its own.
        drop(self.stdin.take());
        if let Err(e) = self.child.wait() {
            tracing::warn!("failed to reap query engine: {e}");
        }
        tracing::debug!("query engine session closed");
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::literal_string_with_formatting_args
)]
mod tests {
    use super::*;

    #[test]
    fn single_line_joins_and_trims() {
        assert_eq!(single_line("a\n  b  \n\nc"), "a b c");
        assert_eq!(single_line(""), "");
    }

    #[cfg(unix)]
    fn sh_session() -> ShellSession {
        ShellSession::open("sh", &[], "echo '{marker}'").expect("open sh session")
    }

    #[cfg(unix)]
    #[test]
    fn execute_returns_output_before_marker() {
        let mut s = sh_session();
        let out = s.execute("printf 'IT4201\\nFI0012\\n'").unwrap();
        assert_eq!(out, "IT4201\nFI0012");
    }

    #[cfg(unix)]
    #[test]
    fn output_without_trailing_newline_is_kept() {
        let mut s = sh_session();
        assert_eq!(s.execute("printf 'IT4201'").unwrap(), "IT4201");
        assert_eq!(s.execute("printf 'a\\nb'").unwrap(), "a\nb");
        // the session is still in step afterwards
        assert_eq!(s.execute("echo next").unwrap(), "next");
    }

    #[cfg(unix)]
    #[test]
    fn session_state_persists_between_commands() {
        let mut s = sh_session();
        s.execute("X=hello").unwrap();
        assert_eq!(s.execute("echo $X").unwrap(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn empty_output_is_empty_string() {
        let mut s = sh_session();
        assert_eq!(s.execute("true").unwrap(), "");
    }

    #[cfg(unix)]
    #[test]
    fn engine_exit_marks_session_dead() {
        let mut s = sh_session();
        assert!(s.execute("exit 0").is_err());
        let err = s.execute("echo again").unwrap_err();
        assert!(err.to_string().contains("closed"), "got: {err}");
    }

    #[test]
    fn missing_program_fails_to_open() {
        let result = ShellSession::open("nonexistent_engine_xyz", &[], "echo '{marker}'");
        assert!(result.is_err());
    }
}
