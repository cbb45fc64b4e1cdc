use crate::{catalog::Catalog, cli::actions::Action};
use anyhow::{Context, Result};
use clap::ArgMatches;
use std::{net::IpAddr, path::Path};

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if the listen address is invalid or the region
/// catalog file cannot be loaded
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    // Extract client program with default
    let client = matches
        .get_one::<String>("client")
        .cloned()
        .unwrap_or_else(|| String::from("nordvpn"));

    // Extract and validate listen address
    let listen = matches
        .get_one::<String>("listen")
        .map(|addr| {
            addr.parse::<IpAddr>()
                .with_context(|| format!("Invalid IP address: {addr}"))
        })
        .transpose()?;

    // Extract port with default
    let port = matches.get_one::<u16>("port").copied().unwrap_or(9301);

    // Extract invocation timeout with default
    let timeout = matches.get_one::<u64>("timeout").copied().unwrap_or(30);

    // The login credential is sourced here and passed down explicitly,
    // the core never reads it from the environment itself
    let token = matches
        .get_one::<String>("token")
        .cloned()
        .filter(|t| !t.is_empty());

    // Region catalog: file override or the built-in list
    let catalog = match matches.get_one::<String>("regions") {
        Some(path) => Catalog::from_file(Path::new(path))
            .with_context(|| format!("Failed to load region catalog from {path}"))?,
        None => Catalog::builtin(),
    };

    Ok(Action::Serve {
        client,
        listen,
        port,
        timeout,
        token,
        catalog,
    })
}
