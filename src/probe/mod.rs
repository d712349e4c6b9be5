//! Connection probe: open, validate and release one database connection
//!
//! A probe never returns an error past its boundary. Every call produces a
//! [`ConnectionOutcome`], and any connection it opened is closed before the
//! call returns, or dropped (which closes the socket) if the call is
//! cancelled midway.
//!
//! # Module Organization
//!
//! - `params` - Connection parameters and descriptor rendering
//! - `outcome` - Outcome value, error taxonomy and probe states
//! - `driver` - Supported database engines
//! - `postgres` / `mysql` - `sqlx` backed connectors

pub mod driver;
pub mod mysql;
pub mod outcome;
pub mod params;
pub mod postgres;

pub use driver::Driver;
pub use mysql::MySqlConnector;
pub use outcome::{ConnectionOutcome, ProbeError, ProbeState};
pub use params::ConnectionParameters;
pub use postgres::PostgresConnector;

use std::fmt::Display;
use std::future::Future;
use tracing::{debug, trace, warn};

/// Driver seam used by [`ConnectionProbe`]
pub trait Connector {
    type Connection: Send;
    type Error: Display + Send;

    /// Open a new connection described by `params`
    fn connect(
        &self,
        params: &ConnectionParameters,
    ) -> impl Future<Output = Result<Self::Connection, Self::Error>> + Send;

    /// Cheap liveness check on an open connection, no SQL involved
    fn ping(
        &self,
        conn: &mut Self::Connection,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Orderly close; consumes the connection
    fn close(&self, conn: Self::Connection) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Runs connect-validate-release cycles through a [`Connector`]
#[derive(Debug, Clone, Default)]
pub struct ConnectionProbe<C> {
    connector: C,
}

impl<C: Connector> ConnectionProbe<C> {
    #[must_use]
    pub const fn new(connector: C) -> Self {
        Self { connector }
    }

    #[must_use]
    pub const fn connector(&self) -> &C {
        &self.connector
    }

    /// Perform a single probe
    ///
    /// Parameters are validated first; invalid ones fail without touching
    /// the network. There is no retry and no timeout here, callers wanting a
    /// deadline wrap the returned future.
    pub async fn probe(&self, params: &ConnectionParameters) -> ConnectionOutcome {
        let outcome = ConnectionOutcome::from(self.run(params).await);
        debug!(
            params = %params,
            succeeded = outcome.succeeded,
            diagnostic = outcome.diagnostic.as_deref().unwrap_or_default(),
            "probe finished"
        );
        outcome
    }

    async fn run(&self, params: &ConnectionParameters) -> Result<(), ProbeError> {
        let mut state = ProbeState::NotConnected;

        if let Err(err) = params.validate() {
            advance(&mut state, ProbeState::Closed);
            return Err(err);
        }

        trace!(descriptor = %params.conninfo_redacted(), "connecting");
        let conn = match self.connector.connect(params).await {
            Ok(conn) => conn,
            Err(err) => {
                advance(&mut state, ProbeState::Closed);
                return Err(ProbeError::ConnectionFailed(err.to_string()));
            }
        };
        advance(&mut state, ProbeState::Connected);

        let mut session = Session::open(&self.connector, conn);
        let validated = session.validate().await;
        let released = session.release().await;
        advance(&mut state, ProbeState::Closed);

        validated.map_err(|err| ProbeError::ConnectionFailed(err.to_string()))?;

        if let Err(err) = released {
            warn!(error = %err, "connection did not close cleanly");
        }

        Ok(())
    }
}

fn advance(state: &mut ProbeState, next: ProbeState) {
    debug_assert!(
        state.can_advance_to(next),
        "invalid probe transition {state:?} -> {next:?}"
    );
    trace!(from = ?state, to = ?next, "probe state");
    *state = next;
}

/// Owns an open connection until it is released
///
/// Dropping an unreleased session drops the connection, which closes the
/// underlying socket without the protocol goodbye.
struct Session<'a, C: Connector> {
    connector: &'a C,
    conn: Option<C::Connection>,
}

impl<'a, C: Connector> Session<'a, C> {
    fn open(connector: &'a C, conn: C::Connection) -> Self {
        Self {
            connector,
            conn: Some(conn),
        }
    }

    async fn validate(&mut self) -> Result<(), C::Error> {
        match self.conn.as_mut() {
            Some(conn) => self.connector.ping(conn).await,
            None => Ok(()),
        }
    }

    async fn release(mut self) -> Result<(), C::Error> {
        match self.conn.take() {
            Some(conn) => self.connector.close(conn).await,
            None => Ok(()),
        }
    }
}

impl<C: Connector> Drop for Session<'_, C> {
    fn drop(&mut self) {
        if self.conn.take().is_some() {
            warn!("probe interrupted, dropping open connection");
        }
    }
}
