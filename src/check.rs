use crate::{
    envfile,
    probe::{
        ConnectionOutcome, ConnectionParameters, ConnectionProbe, Connector, Driver,
        MySqlConnector, PostgresConnector,
    },
    tls::TlsConfig,
};
use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, str::FromStr, time::Duration};
use tokio::time;
use tracing::{debug, info};

/// How the result of a check is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

/// One line of output per check
#[derive(Serialize, Deserialize, Debug, Default)]
struct Report {
    time: String,
    driver: String,
    target: String,
    succeeded: bool,
    runtime_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic: Option<String>,
}

impl Report {
    fn text(&self) -> String {
        let target = format!("{}://{}", self.driver, self.target);
        match &self.diagnostic {
            Some(diagnostic) if !self.succeeded => {
                format!("{} - connection to {target} failed: {diagnostic}", self.time)
            }
            _ => format!(
                "{} - connection to {target} succeeded in {}ms",
                self.time, self.runtime_ms
            ),
        }
    }
}

/// Probe the database once, print the report and export the parameters
/// when asked to
///
/// # Errors
///
/// Returns an error if the report cannot be serialized or the env file
/// cannot be written; a failed probe is returned as an outcome
pub async fn run(
    driver: Driver,
    params: ConnectionParameters,
    tls: TlsConfig,
    timeout: Option<Duration>,
    write_env: Option<PathBuf>,
    format: OutputFormat,
) -> Result<ConnectionOutcome> {
    let now = Utc::now();
    info!(
        %driver,
        descriptor = %params.conninfo_redacted(),
        tls = tls.mode.is_enabled(),
        tls_mode = ?tls.mode,
        "checking connection"
    );

    let outcome = match driver {
        Driver::Postgres => {
            probe_with(ConnectionProbe::new(PostgresConnector::new(tls)), &params, timeout).await
        }
        Driver::MySql => {
            probe_with(ConnectionProbe::new(MySqlConnector::new(tls)), &params, timeout).await
        }
    };

    let runtime = Utc::now().signed_duration_since(now);
    let report = Report {
        time: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        driver: driver.to_string(),
        target: params.to_string(),
        succeeded: outcome.succeeded,
        runtime_ms: runtime.num_milliseconds(),
        diagnostic: outcome.diagnostic.clone(),
    };

    match format {
        OutputFormat::Text if report.succeeded => println!("{}", report.text()),
        OutputFormat::Text => eprintln!("{}", report.text()),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&report)?);
            if let Some(diagnostic) = &report.diagnostic {
                eprintln!("{diagnostic}");
            }
        }
    }

    if outcome.succeeded
        && let Some(path) = write_env
    {
        envfile::write(&path, &params)?;
        info!(path = %path.display(), "env file written");
    }

    Ok(outcome)
}

/// Run one probe, bounded by `timeout` when given
///
/// On expiry the probe future is dropped, which drops any open connection.
pub async fn probe_with<C: Connector>(
    probe: ConnectionProbe<C>,
    params: &ConnectionParameters,
    timeout: Option<Duration>,
) -> ConnectionOutcome {
    let Some(limit) = timeout else {
        return probe.probe(params).await;
    };

    if let Ok(outcome) = time::timeout(limit, probe.probe(params)).await {
        outcome
    } else {
        debug!(timeout = ?limit, "probe timed out");
        ConnectionOutcome::failure(format!(
            "connection attempt timed out after {}s",
            limit.as_secs_f64()
        ))
    }
}
