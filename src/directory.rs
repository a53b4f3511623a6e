//! Directory search adapter: turns a keyword into two engine queries and
//! pairs the two result streams into [`Record`]s.

use crate::classify::{self, QueryMode};
use crate::config::QueryTemplates;
use crate::engine::QueryEngine;
use crate::record::Record;

/// Escape a value for interpolation into a single-quoted filter string.
///
/// Single quotes are doubled and double quotes dropped so the value cannot
/// terminate either level of quoting in the search filter.
fn escape_filter_value(value: &str) -> String {
    value.replace('\'', "''").replace('"', "")
}

/// Escape a value for a double-quoted interpreter string.
fn escape_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '`' | '"' | '$') {
            out.push('`');
        }
        out.push(c);
    }
    out
}

#[allow(clippy::literal_string_with_formatting_args)]
fn render_search(template: &str, mode: QueryMode, keyword: &str) -> String {
    template
        .replace("{field}", mode.field())
        .replace("{keyword}", &escape_filter_value(keyword))
}

/// Non-blank, trimmed lines of an engine result blob.
fn result_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Pair name lines with description lines by position.
///
/// Names drive the pairing: a name without a description line gets the
/// unknown description, and surplus description lines are dropped.
pub fn pair_results(names: &str, descriptions: &str) -> Vec<Record> {
    let mut descriptions = result_lines(descriptions);
    result_lines(names)
        .map(|name| Record::capture(name, descriptions.next().map(str::to_string)))
        .collect()
}

/// Search and update access to the directory through a query engine.
pub struct Directory<E> {
    engine: E,
    queries: QueryTemplates,
}

impl<E: QueryEngine> Directory<E> {
    pub const fn new(engine: E, queries: QueryTemplates) -> Self {
        Self { engine, queries }
    }

    /// Query selecting name values for `keyword` in `mode`.
    pub fn name_query(&self, keyword: &str, mode: QueryMode) -> String {
        render_search(&self.queries.names, mode, keyword)
    }

    /// Query selecting cleaned-up description values for `keyword` in `mode`.
    pub fn description_query(&self, keyword: &str, mode: QueryMode) -> String {
        render_search(&self.queries.descriptions, mode, keyword)
    }

    /// Command setting the description of `name`.
    #[allow(clippy::literal_string_with_formatting_args)]
    pub fn update_query(&self, name: &str, description: &str) -> String {
        self.queries
            .update
            .replace("{name}", &escape_quoted(name))
            .replace("{description}", &escape_quoted(description))
    }

    /// Classify `keyword`, run both queries, and pair the results.
    ///
    /// `progress` is called once before each query is submitted.
    ///
    /// # Errors
    /// Returns an error if the engine fails either query.
    pub fn search(
        &mut self,
        keyword: &str,
        mut progress: impl FnMut(),
    ) -> anyhow::Result<Vec<Record>> {
        let mode = classify::classify(keyword);
        let name_query = self.name_query(keyword, mode);
        let description_query = self.description_query(keyword, mode);
        tracing::debug!(keyword, ?mode, "searching directory");

        progress();
        tracing::debug!(query = %name_query, "submitting name query");
        let names = self.engine.execute(&name_query)?;
        progress();
        tracing::debug!(query = %description_query, "submitting description query");
        let descriptions = self.engine.execute(&description_query)?;

        let records = pair_results(&names, &descriptions);
        tracing::debug!(count = records.len(), "directory search finished");
        Ok(records)
    }

    /// Overwrite the description of the directory entry `name`.
    ///
    /// # Errors
    /// Returns an error if the engine rejects the command.
    pub fn set_description(&mut self, name: &str, description: &str) -> anyhow::Result<()> {
        let command = self.update_query(name, description);
        tracing::debug!(query = %command, "submitting description update");
        self.engine.execute(&command)?;
        Ok(())
    }
}
