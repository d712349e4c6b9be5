use super::ProbeError;
use dsn::DSN;
use std::fmt;

const REDACTED: &str = "********";

/// Connection parameters for a single probe
///
/// Fields are fixed at construction. `Debug` and `Display` never expose the
/// password.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParameters {
    host: String,
    port: u16,
    database: String,
    user: String,
    password: String,
}

impl ConnectionParameters {
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Build parameters from a parsed DSN, filling gaps with `default_port`
    /// and empty strings
    ///
    /// A DSN that points at a unix socket uses the socket path as host.
    #[must_use]
    pub fn from_dsn(dsn: &DSN, default_port: u16) -> Self {
        let host = dsn
            .host
            .clone()
            .or_else(|| dsn.socket.clone())
            .unwrap_or_default();

        Self::new(
            host,
            dsn.port.unwrap_or(default_port),
            dsn.database.clone().unwrap_or_default(),
            dsn.username.clone().unwrap_or_default(),
            dsn.password.clone().unwrap_or_default(),
        )
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Host is a unix socket path rather than a network name
    #[must_use]
    pub fn is_socket(&self) -> bool {
        self.host.starts_with('/')
    }

    /// Reject parameters that can never produce a connection
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::InvalidParameters` naming the first offending field
    pub fn validate(&self) -> Result<(), ProbeError> {
        let required = [
            ("host", &self.host),
            ("database name", &self.database),
            ("user", &self.user),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ProbeError::InvalidParameters(format!(
                    "{field} must not be empty"
                )));
            }
        }

        if self.port == 0 {
            return Err(ProbeError::InvalidParameters(
                "port must be between 1 and 65535".to_string(),
            ));
        }

        Ok(())
    }

    /// Keyword/value connection descriptor:
    /// `host=… port=… dbname=… user=… password=…`
    ///
    /// Values containing spaces or quotes are single quoted. The result
    /// carries the password in clear, for callers that hand it to a
    /// libpq style client; use [`Self::conninfo_redacted`] for anything
    /// that gets logged or printed.
    ///
    /// ```
    /// use dbprobe::probe::ConnectionParameters;
    ///
    /// let params = ConnectionParameters::new("localhost", 5432, "oms", "postgres", "admin");
    /// assert_eq!(
    ///     params.conninfo(),
    ///     "host=localhost port=5432 dbname=oms user=postgres password=admin"
    /// );
    /// ```
    #[must_use]
    pub fn conninfo(&self) -> String {
        self.render_conninfo(&self.password)
    }

    /// Same as [`Self::conninfo`] with the password masked
    #[must_use]
    pub fn conninfo_redacted(&self) -> String {
        self.render_conninfo(REDACTED)
    }

    fn render_conninfo(&self, password: &str) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            quote_conninfo_value(&self.host),
            self.port,
            quote_conninfo_value(&self.database),
            quote_conninfo_value(&self.user),
            quote_conninfo_value(password),
        )
    }
}

impl fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParameters")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Display for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

fn quote_conninfo_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '\\');

    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}
