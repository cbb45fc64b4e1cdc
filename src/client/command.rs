use super::Intent;
use crate::catalog::Catalog;
use std::fmt;

/// Program name plus literal arguments. Each token is passed to the OS
/// as a discrete argument, nothing here is ever handed to a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    #[must_use]
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The status query issued on the read-only path.
    #[must_use]
    pub fn status(program: &str) -> Self {
        Self::new(program).arg("status")
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Client misuse detected before any process is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The requested region is not in the catalog.
    UnknownRegion(String),
    /// Login was requested without a token.
    MissingCredential,
    /// The wire request carried an action type this service does not offer.
    UnsupportedIntent(String),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRegion(region) => write!(f, "unknown region: {region}"),
            Self::MissingCredential => write!(f, "login requires a token, none was provided"),
            Self::UnsupportedIntent(kind) => write!(f, "unsupported action type: {kind}"),
        }
    }
}

impl std::error::Error for MappingError {}

/// Map a validated intent to exactly one client invocation.
///
/// The region is checked against the catalog before it reaches the
/// command boundary, and every value travels as its own argument token.
///
/// # Errors
///
/// Returns a [`MappingError`] for an unknown region or a missing token;
/// no command is produced in that case
pub fn build(
    program: &str,
    intent: &Intent,
    token: Option<&str>,
    catalog: &Catalog,
) -> Result<CommandLine, MappingError> {
    match intent {
        Intent::Login => {
            let token = token
                .filter(|t| !t.is_empty())
                .ok_or(MappingError::MissingCredential)?;
            Ok(CommandLine::new(program)
                .arg("login")
                .arg("--token")
                .arg(token))
        }
        Intent::Disconnect => Ok(CommandLine::new(program).arg("disconnect")),
        Intent::Connect { region } => {
            if !catalog.contains(region) {
                return Err(MappingError::UnknownRegion(region.clone()));
            }
            Ok(CommandLine::new(program).arg("connect").arg(region.as_str()))
        }
    }
}
