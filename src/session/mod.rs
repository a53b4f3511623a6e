//! The search-select-connect-annotate loop.
//!
//! Each state consumes itself and yields the next one; nothing is carried
//! between rounds except what has been appended to the history log.


use std::io::{BufRead, Write};

use crate::annotate;
use crate::config::PortalConfig;
use crate::console::{Console, is_affirmative};
use crate::directory::Directory;
use crate::engine::QueryEngine;
use crate::history::HistoryLog;
use crate::launcher::Launcher;
use crate::record::Record;
use crate::select::{self, Selection};

/// Where the loop is between two inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    AwaitingKeyword,
    Searching(String),
    Presenting(Vec<Record>),
    Connecting(Record),
    Annotating(Record),
    Halted,
}

/// Keyword answers that end the run.
fn is_halt(keyword: &str) -> bool {
    keyword.trim().is_empty() || keyword == "n"
}

pub struct Session<E, L, R, W> {
    directory: Directory<E>,
    launcher: L,
    history: HistoryLog,
    console: Console<R, W>,
    portal_url: String,
}

impl<E, L, R, W> Session<E, L, R, W>
where
    E: QueryEngine,
    L: Launcher,
    R: BufRead,
    W: Write,
{
    pub fn new(
        directory: Directory<E>,
        launcher: L,
        history: HistoryLog,
        console: Console<R, W>,
    ) -> Self {
        Self {
            directory,
            launcher,
            history,
            console,
            portal_url: PortalConfig::default().url,
        }
    }

    #[must_use]
    pub fn with_portal_url(mut self, url: impl Into<String>) -> Self {
        self.portal_url = url.into();
        self
    }

    pub const fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Drive the loop until the technician stops.
    ///
    /// # Errors
    /// Returns an error if the console fails or the query engine cannot
    /// answer a search.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut state = State::AwaitingKeyword;
        while state != State::Halted {
            state = self.step(state)?;
        }
        tracing::debug!("session halted");
        Ok(())
    }

    /// Perform one transition.
    ///
    /// # Errors
    /// See [`Session::run`].
    pub fn step(&mut self, state: State) -> anyhow::Result<State> {
        match state {
            State::AwaitingKeyword => self.await_keyword(),
            State::Searching(keyword) => self.search(&keyword),
            State::Presenting(candidates) => self.present(candidates),
            State::Connecting(record) => self.connect(record),
            State::Annotating(record) => self.annotate(&record),
            State::Halted => Ok(State::Halted),
        }
    }

    fn await_keyword(&mut self) -> anyhow::Result<State> {
        let Some(keyword) = self.console.prompt("\nEnter keyword: ")? else {
            return Ok(State::Halted);
        };
        if is_halt(&keyword) {
            return Ok(State::Halted);
        }
        Ok(State::Searching(keyword))
    }

    fn search(&mut self, keyword: &str) -> anyhow::Result<State> {
        let console = &mut self.console;
        console.print("Searching Active Directory.")?;
        let mut dot_error = None;
        let records = self.directory.search(keyword, || {
            if dot_error.is_none()
                && let Err(e) = console.print(".")
            {
                dot_error = Some(e);
            }
        })?;
        if let Some(e) = dot_error {
            return Err(e.into());
        }
        console.print("\n\n")?;

        if records.is_empty() {
            console.say("No results found!")?;
            return Ok(State::AwaitingKeyword);
        }
        Ok(State::Presenting(records))
    }

    fn present(&mut self, candidates: Vec<Record>) -> anyhow::Result<State> {
        select::render(&candidates, self.console.writer())?;
        let answer = self.console.ask(select::prompt_for(candidates.len()))?;

        let Selection::Chosen(record) = select::resolve(candidates, &answer) else {
            return Ok(State::AwaitingKeyword);
        };

        // Logged before connecting; a failed launch still leaves the entry.
        match self.history.append(&record) {
            Ok(()) => {
                self.console
                    .say(&format!("{} added to history log.", record.name()))?;
            }
            Err(e) => {
                tracing::warn!("history write failed: {e:#}");
                self.console
                    .say("Error. Could not write history to the history file.")?;
                self.console.say(&format!("{e:#}"))?;
            }
        }
        Ok(State::Connecting(record))
    }

    fn connect(&mut self, record: Record) -> anyhow::Result<State> {
        self.console.print("Connecting now..")?;
        let launched = self.launcher.connect(record.name());
        self.console.print(".\n")?;
        if let Err(e) = launched {
            tracing::warn!("remote launch failed: {e:#}");
            self.console
                .say(&format!("Could not start the remote session: {e:#}"))?;
        }
        Ok(State::Annotating(record))
    }

    fn annotate(&mut self, record: &Record) -> anyhow::Result<State> {
        if is_affirmative(&self.console.ask("Change PC Description? ")?) {
            self.update_description(record)?;
        }

        if is_affirmative(&self.console.ask("Open Track-it to create ticket? ")?) {
            if let Err(e) = self.launcher.open_url(&self.portal_url) {
                tracing::warn!("portal open failed: {e:#}");
                self.console
                    .say(&format!("Could not open the ticket portal: {e:#}"))?;
            }
        } else {
            self.console
                .say("Write a summary of support details for Track-it.\n")?;
            // Read so the technician can type notes; nothing stores them.
            let _summary = self.console.ask("")?;
        }
        Ok(State::AwaitingKeyword)
    }

    fn update_description(&mut self, record: &Record) -> anyhow::Result<()> {
        let full_name = self.console.ask("Enter user's full name: ")?;
        let job_title = self.console.ask("Enter user's job title: ")?;

        let Some(description) = annotate::compose_description(&full_name, &job_title) else {
            self.console.say("Description unchanged.")?;
            return Ok(());
        };
        if !annotate::differs_from(&description, record.description()) {
            self.console.say("Description unchanged.")?;
            return Ok(());
        }

        match self.directory.set_description(record.name(), &description) {
            Ok(()) => self.console.say(&format!(
                "{} description changed to \"{description}\"",
                record.name()
            ))?,
            Err(e) => {
                tracing::warn!("description update failed: {e:#}");
                self.console
                    .say(&format!("Could not change the description: {e:#}"))?;
            }
        }
        Ok(())
    }
}
