use crate::{
    check::OutputFormat,
    cli::actions::Action,
    probe::{ConnectionParameters, Driver},
    tls::{TlsConfig, TlsMode},
};
use anyhow::{Context, Result, anyhow, bail};
use clap::ArgMatches;
use std::{path::PathBuf, time::Duration};

const DEFAULT_HOST: &str = "localhost";

/// Build connection parameters either from the DSN or the individual flags
fn extract_target(matches: &ArgMatches) -> Result<(Driver, ConnectionParameters, TlsConfig)> {
    if let Some(dsn_str) = matches.get_one::<String>("dsn") {
        let dsn = dsn::parse(dsn_str).context("Failed to parse DSN")?;
        let driver = dsn.driver.parse::<Driver>().map_err(|e| anyhow!(e))?;

        let has_host = [&dsn.host, &dsn.socket]
            .into_iter()
            .any(|v| v.as_deref().is_some_and(|v| !v.is_empty()));
        if !has_host {
            bail!(
                "DSN has no host or socket, expected {driver}://user:password@tcp(host:port)/database or unix(/path/to/socket)"
            );
        }

        let params = ConnectionParameters::from_dsn(&dsn, driver.default_port());
        let tls = TlsConfig::from_dsn(&dsn).map_err(|e| anyhow!(e))?;
        return Ok((driver, params, tls));
    }

    let driver = matches
        .get_one::<String>("driver")
        .map(|d| d.parse::<Driver>().map_err(|e| anyhow!(e)))
        .transpose()?
        .unwrap_or_default();

    let params = ConnectionParameters::new(
        string_or(matches, "host", DEFAULT_HOST),
        matches
            .get_one::<u16>("port")
            .copied()
            .unwrap_or_else(|| driver.default_port()),
        string_or(matches, "database", driver.default_database()),
        string_or(matches, "user", driver.default_user()),
        string_or(matches, "password", ""),
    );

    Ok((driver, params, TlsConfig::default()))
}

fn string_or(matches: &ArgMatches, id: &str, default: &str) -> String {
    matches
        .get_one::<String>(id)
        .map_or_else(|| default.to_string(), Clone::clone)
}

/// Command line TLS flags override whatever the DSN carried
fn apply_tls_flags(matches: &ArgMatches, mut tls: TlsConfig) -> Result<TlsConfig> {
    if let Some(mode) = matches.get_one::<String>("tls-mode") {
        tls.mode = mode.parse::<TlsMode>().map_err(|e| anyhow!(e))?;
    }

    if let Some(ca) = matches.get_one::<String>("tls-ca") {
        tls.ca = Some(PathBuf::from(ca));
    }

    if let Some(cert) = matches.get_one::<String>("tls-cert") {
        tls.cert = Some(PathBuf::from(cert));
    }

    if let Some(key) = matches.get_one::<String>("tls-key") {
        tls.key = Some(PathBuf::from(key));
    }

    Ok(tls)
}

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if the DSN is invalid, has no host, names an unsupported
/// driver or carries an unknown TLS mode
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    let (driver, params, tls) = extract_target(matches)?;
    let tls = apply_tls_flags(matches, tls)?;

    let timeout = matches
        .get_one::<u64>("timeout")
        .copied()
        .map(Duration::from_secs);

    let write_env = matches.get_one::<String>("write-env").map(PathBuf::from);

    let format = matches
        .get_one::<String>("format")
        .map(|f| f.parse::<OutputFormat>().map_err(|e| anyhow!(e)))
        .transpose()?
        .unwrap_or_default();

    Ok(Action::Check {
        driver,
        params,
        tls,
        timeout,
        write_env,
        format,
    })
}
