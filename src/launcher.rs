//! Fire-and-forget actions handed to the host: the remote-control client
//! and the ticketing portal.

use std::process::{Command, Stdio};

use anyhow::Context as _;

use crate::config::RemoteConfig;

/// Placeholder in the remote-control arguments replaced by the target.
const TARGET_PLACEHOLDER: &str = "{name}";

pub trait Launcher {
    /// Open a remote-support session to `target`. Does not wait for it.
    ///
    /// # Errors
    /// Returns an error if the client cannot be started.
    fn connect(&mut self, target: &str) -> anyhow::Result<()>;

    /// Open `url` with the host's default handler.
    ///
    /// # Errors
    /// Returns an error if no handler could be started.
    fn open_url(&mut self, url: &str) -> anyhow::Result<()>;
}

impl<L: Launcher + ?Sized> Launcher for &mut L {
    fn connect(&mut self, target: &str) -> anyhow::Result<()> {
        (**self).connect(target)
    }

    fn open_url(&mut self, url: &str) -> anyhow::Result<()> {
        (**self).open_url(url)
    }
}

/// Spawns the configured remote-control executable and uses the OS URL
/// handler for the portal.
#[derive(Debug, Clone)]
pub struct SystemLauncher {
    program: String,
    args: Vec<String>,
}

impl SystemLauncher {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }

    /// Arguments for `target` with every `{name}` substituted.
    pub fn args_for(&self, target: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.replace(TARGET_PLACEHOLDER, target))
            .collect()
    }
}

impl Launcher for SystemLauncher {
    fn connect(&mut self, target: &str) -> anyhow::Result<()> {
        let args = self.args_for(target);
        tracing::debug!(program = %self.program, ?args, "launching remote session");
        Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("start remote client `{}`", self.program))?;
        Ok(())
    }

    fn open_url(&mut self, url: &str) -> anyhow::Result<()> {
        tracing::debug!(url, "opening portal");
        open::that(url).with_context(|| format!("open {url}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::literal_string_with_formatting_args)]
mod tests {
    use super::*;

    fn launcher(program: &str, args: &[&str]) -> SystemLauncher {
        SystemLauncher::new(&RemoteConfig {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        })
    }

    #[test]
    fn default_args_target_machine() {
        let l = SystemLauncher::new(&RemoteConfig::default());
        assert_eq!(l.args_for("IT4201"), ["-c:", "-h:", "-m:IT4201", "-a:1", "-x"]);
    }

    #[test]
    fn every_placeholder_is_replaced() {
        let l = launcher("vnc", &["{name}", "--title={name}", "plain"]);
        assert_eq!(l.args_for("FI0012"), ["FI0012", "--title=FI0012", "plain"]);
    }

    #[cfg(unix)]
    #[test]
    fn connect_spawns_program() {
        let mut l = launcher("true", &["{name}"]);
        l.connect("IT4201").unwrap();
    }

    #[test]
    fn connect_reports_missing_program() {
        let mut l = launcher("nonexistent_remote_client_xyz", &[]);
        let err = l.connect("IT4201").unwrap_err();
        assert!(format!("{err:#}").contains("start remote client"), "{err:#}");
    }
}
