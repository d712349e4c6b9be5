use super::{ConnectionParameters, Connector};
use crate::tls::{TlsConfig, TlsMode};
use sqlx::{
    ConnectOptions, Connection, PgConnection,
    postgres::{PgConnectOptions, PgSslMode},
};

/// `PostgreSQL` connector backed by a single `sqlx` connection
#[derive(Debug, Clone, Default)]
pub struct PostgresConnector {
    tls: TlsConfig,
}

impl PostgresConnector {
    #[must_use]
    pub const fn new(tls: TlsConfig) -> Self {
        Self { tls }
    }

    /// Translate probe parameters and TLS settings into driver options
    #[must_use]
    pub fn options(&self, params: &ConnectionParameters) -> PgConnectOptions {
        let mut options = PgConnectOptions::new()
            .username(params.user())
            .password(params.password())
            .database(params.database())
            .port(params.port())
            .application_name(env!("CARGO_PKG_NAME"));

        options = if params.is_socket() {
            options.socket(params.host())
        } else {
            options.host(params.host())
        };

        // Apply TLS configuration
        options = match self.tls.mode {
            TlsMode::Disable => options.ssl_mode(PgSslMode::Disable),
            TlsMode::Require => options.ssl_mode(PgSslMode::Require),
            TlsMode::VerifyCA => options.ssl_mode(PgSslMode::VerifyCa),
            TlsMode::VerifyFull => options.ssl_mode(PgSslMode::VerifyFull),
        };

        if let Some(ca_path) = &self.tls.ca {
            options = options.ssl_root_cert(ca_path);
        }

        // Apply client certificate if provided
        if let (Some(cert_path), Some(key_path)) = (&self.tls.cert, &self.tls.key) {
            options = options.ssl_client_cert(cert_path).ssl_client_key(key_path);
        }

        options
    }
}

impl Connector for PostgresConnector {
    type Connection = PgConnection;
    type Error = sqlx::Error;

    async fn connect(&self, params: &ConnectionParameters) -> Result<PgConnection, sqlx::Error> {
        let options = self.options(params);
        options.connect().await
    }

    async fn ping(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        conn.ping().await
    }

    async fn close(&self, conn: PgConnection) -> Result<(), sqlx::Error> {
        conn.close().await
    }
}
