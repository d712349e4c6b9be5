use dsn::DSN;
use std::{path::PathBuf, str::FromStr};

/// TLS configuration for database connections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsConfig {
    pub mode: TlsMode,
    pub ca: Option<PathBuf>,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
}

/// TLS/SSL mode for database connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// No TLS encryption
    #[default]
    Disable,
    /// TLS required, but no certificate verification
    Require,
    /// Verify server certificate against CA
    VerifyCA,
    /// Verify certificate and hostname
    VerifyFull,
}

impl FromStr for TlsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disable" | "disabled" => Ok(Self::Disable),
            "require" | "required" => Ok(Self::Require),
            "verify-ca" | "verify_ca" => Ok(Self::VerifyCA),
            "verify-full" | "verify_identity" => Ok(Self::VerifyFull),
            _ => Err(format!("Invalid TLS mode: {s}")),
        }
    }
}

impl TlsMode {
    /// Check if TLS is enabled
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disable)
    }
}

impl TlsConfig {
    /// Extract TLS configuration from DSN query parameters
    ///
    /// Supports both PostgreSQL-style and MySQL-style parameter names:
    /// - sslmode, ssl-mode: disable|require|verify-ca|verify-full
    /// - sslrootcert, sslca, ssl-ca: Path to CA certificate
    /// - sslcert, ssl-cert: Path to client certificate
    /// - sslkey, ssl-key: Path to client private key
    ///
    /// # Errors
    ///
    /// Returns an error if the mode parameter is present but not recognized
    pub fn from_dsn(dsn: &DSN) -> Result<Self, String> {
        let mode = dsn
            .params
            .get("sslmode")
            .or_else(|| dsn.params.get("ssl-mode"))
            .map(|m| m.parse::<TlsMode>())
            .transpose()?
            .unwrap_or_default();

        let ca = dsn
            .params
            .get("sslrootcert")
            .or_else(|| dsn.params.get("sslca"))
            .or_else(|| dsn.params.get("ssl-ca"))
            .map(PathBuf::from);

        let cert = dsn
            .params
            .get("sslcert")
            .or_else(|| dsn.params.get("ssl-cert"))
            .map(PathBuf::from);

        let key = dsn
            .params
            .get("sslkey")
            .or_else(|| dsn.params.get("ssl-key"))
            .map(PathBuf::from);

        Ok(Self {
            mode,
            ca,
            cert,
            key,
        })
    }
}
