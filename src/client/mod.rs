pub mod command;
pub mod invoker;
pub mod status;

use crate::catalog::Catalog;
use anyhow::anyhow;
use self::command::MappingError;
use self::invoker::{ExecutionOutcome, Invoker};
use self::status::ConnectionStatus;
use serde::Serialize;
use std::time::Duration;

/// A requested administrative action, decoded from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Login,
    Disconnect,
    Connect { region: String },
}

impl Intent {
    /// Decode the wire `type`/`region` pair into an intent.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnsupportedIntent`] for an action type
    /// this service does not offer
    pub fn from_request(kind: &str, region: Option<&str>) -> Result<Self, MappingError> {
        match kind {
            "login" => Ok(Self::Login),
            "disconnect" => Ok(Self::Disconnect),
            "connect" => Ok(Self::Connect {
                region: region.unwrap_or_default().to_string(),
            }),
            other => Err(MappingError::UnsupportedIntent(other.to_string())),
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Disconnect => "disconnect",
            Self::Connect { .. } => "connect",
        }
    }
}

/// Uniform value returned to callers, exactly one variant is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionResult {
    Output(String),
    Error(String),
}

/// Orchestrates single request/response exchanges with the external
/// VPN client. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct Client<I> {
    program: String,
    catalog: Catalog,
    timeout: Duration,
    invoker: I,
}

impl<I: Invoker> Client<I> {
    #[must_use]
    pub fn new(
        program: impl Into<String>,
        catalog: Catalog,
        timeout: Duration,
        invoker: I,
    ) -> Self {
        Self {
            program: program.into(),
            catalog,
            timeout,
            invoker,
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Dispatch one action: map the intent to a command, run it, and
    /// classify the outcome. A mapping error short-circuits before any
    /// process is launched.
    pub async fn dispatch(&self, intent: &Intent, token: Option<&str>) -> ActionResult {
        let command = match command::build(&self.program, intent, token, &self.catalog) {
            Ok(command) => command,
            Err(err) => return ActionResult::Error(err.to_string()),
        };

        match self.invoker.run(&command, self.timeout).await {
            Ok(outcome) => classify(outcome),
            Err(err) => ActionResult::Error(err.to_string()),
        }
    }

    /// Read-only query path: run the status subcommand and parse its
    /// output. Shares the classification contract of [`Self::dispatch`].
    ///
    /// # Errors
    ///
    /// Returns an error if the client could not be run or reported one
    /// on stderr
    pub async fn status(&self) -> anyhow::Result<ConnectionStatus> {
        let command = command::CommandLine::status(&self.program);
        let outcome = self.invoker.run(&command, self.timeout).await?;

        match classify(outcome) {
            ActionResult::Output(stdout) => Ok(status::parse(&stdout)),
            ActionResult::Error(stderr) => Err(anyhow!(stderr)),
        }
    }
}

/// Outcome classification. The external tool writes warnings to stderr
/// even when it exits cleanly, and the operator policy treats any
/// stderr output as an error signal regardless of the exit status.
fn classify(outcome: ExecutionOutcome) -> ActionResult {
    if outcome.stderr.is_empty() {
        ActionResult::Output(outcome.stdout)
    } else {
        ActionResult::Error(outcome.stderr)
    }
}
