use super::Action;
use std::time::Duration;

/// Execute the action's business logic by delegating to the appropriate module
pub async fn execute(action: Action) -> anyhow::Result<()> {
    match action {
        Action::Serve {
            client,
            listen,
            port,
            timeout,
            token,
            catalog,
        } => {
            crate::server::start(
                client,
                catalog,
                listen,
                port,
                Duration::from_secs(timeout),
                token,
            )
            .await
        }
    }
}
