use super::Action;
use crate::probe::ConnectionOutcome;

/// Execute the action's business logic by delegating to the appropriate module
pub async fn execute(action: Action) -> anyhow::Result<ConnectionOutcome> {
    match action {
        Action::Check {
            driver,
            params,
            tls,
            timeout,
            write_env,
            format,
        } => crate::check::run(driver, params, tls, timeout, write_env, format).await,
    }
}
