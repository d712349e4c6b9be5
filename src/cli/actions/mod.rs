mod run;

use crate::{
    check::OutputFormat,
    probe::{ConnectionOutcome, ConnectionParameters, Driver},
    tls::TlsConfig,
};
use std::{path::PathBuf, time::Duration};

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Check {
        driver: Driver,
        params: ConnectionParameters,
        tls: TlsConfig,
        timeout: Option<Duration>,
        write_env: Option<PathBuf>,
        format: OutputFormat,
    },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails to execute; a failed probe is
    /// not an error, it is reported through the outcome
    pub async fn execute(self) -> anyhow::Result<ConnectionOutcome> {
        run::execute(self).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn check(params: ConnectionParameters) -> Action {
        Action::Check {
            driver: Driver::Postgres,
            params,
            tls: TlsConfig::default(),
            timeout: None,
            write_env: None,
            format: OutputFormat::Json,
        }
    }

    #[test]
    fn test_action_debug_hides_password() {
        let action = check(ConnectionParameters::new(
            "localhost",
            5432,
            "oms",
            "postgres",
            "admin",
        ));

        let debug_str = format!("{action:?}");
        assert!(debug_str.contains("Check"));
        assert!(!debug_str.contains("admin"));
    }

    #[tokio::test]
    async fn test_execute_invalid_params_fails_without_network() {
        let action = check(ConnectionParameters::new("", 5432, "oms", "postgres", "admin"));
        let outcome = action.execute().await.unwrap();
        assert!(!outcome.succeeded);
        assert!(outcome.diagnostic.unwrap().contains("host"));
    }
}
