mod run;

use crate::catalog::Catalog;
use std::net::IpAddr;

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Serve {
        client: String,
        listen: Option<IpAddr>,
        port: u16,
        timeout: u64,
        token: Option<String>,
        catalog: Catalog,
    },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails to execute
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
