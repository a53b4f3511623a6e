
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::record::Record;

/// Width of the separator rule under the header and after the data row.
const RULE_WIDTH: usize = 75;

const HEADER: &str = "Date & Time\t PC Name \t PC Description";

/// Append-only audit trail of every machine connected to.
///
/// Entries are never read back, edited, or removed.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry block, creating the file if needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or written.
    pub fn append(&self, record: &Record) -> anyhow::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open history file {}", self.path.display()))?;
        file.write_all(format_entry(record).as_bytes())
            .with_context(|| format!("append history entry to {}", self.path.display()))?;
        file.flush().context("flush history file")?;
        Ok(())
    }
}

/// Render one entry: two blank lines, header, rule, data row, rule.
pub fn format_entry(record: &Record) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    format!(
        "\n\n\t{HEADER}\n\t{rule}\n\t{}\t{}\t{}\n\t{rule}",
        record.timestamp(),
        record.name(),
        record.description()
    )
}
