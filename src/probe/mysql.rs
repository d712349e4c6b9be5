use super::{ConnectionParameters, Connector};
use crate::tls::{TlsConfig, TlsMode};
use sqlx::{
    ConnectOptions, Connection, MySqlConnection,
    mysql::{MySqlConnectOptions, MySqlSslMode},
};

/// `MySQL`/`MariaDB` connector backed by a single `sqlx` connection
#[derive(Debug, Clone, Default)]
pub struct MySqlConnector {
    tls: TlsConfig,
}

impl MySqlConnector {
    #[must_use]
    pub const fn new(tls: TlsConfig) -> Self {
        Self { tls }
    }

    #[must_use]
    pub fn options(&self, params: &ConnectionParameters) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .username(params.user())
            .password(params.password())
            .database(params.database());

        options = if params.is_socket() {
            options.socket(params.host())
        } else {
            options.host(params.host()).port(params.port())
        };

        options = match self.tls.mode {
            TlsMode::Disable => options.ssl_mode(MySqlSslMode::Disabled),
            TlsMode::Require => options.ssl_mode(MySqlSslMode::Required),
            TlsMode::VerifyCA => options.ssl_mode(MySqlSslMode::VerifyCa),
            TlsMode::VerifyFull => options.ssl_mode(MySqlSslMode::VerifyIdentity),
        };

        if let Some(ca_path) = &self.tls.ca {
            options = options.ssl_ca(ca_path);
        }

        if let (Some(cert_path), Some(key_path)) = (&self.tls.cert, &self.tls.key) {
            options = options.ssl_client_cert(cert_path).ssl_client_key(key_path);
        }

        options
    }
}

impl Connector for MySqlConnector {
    type Connection = MySqlConnection;
    type Error = sqlx::Error;

    async fn connect(&self, params: &ConnectionParameters) -> Result<MySqlConnection, sqlx::Error> {
        let options = self.options(params);
        options.connect().await
    }

    async fn ping(&self, conn: &mut MySqlConnection) -> Result<(), sqlx::Error> {
        conn.ping().await
    }

    async fn close(&self, conn: MySqlConnection) -> Result<(), sqlx::Error> {
        conn.close().await
    }
}
