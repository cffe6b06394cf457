//! Connection management for PostgreSQL
//!
//! A [`Session`] owns the client handle together with the task driving the
//! underlying socket. It is a scoped resource: [`with_session`] guarantees
//! the session is closed whether the body succeeds or fails.

use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, trace};

use crate::config::ConnectionConfig;
use crate::error::{ConnectionError, PgMockError, Result};

/// Run once per session; dates and times are parsed from ISO output
const SESSION_SETUP: &str = "SET DateStyle TO 'ISO'";

/// Build driver configuration from connection settings
pub fn build_pg_config(config: &ConnectionConfig) -> tokio_postgres::Config {
    let mut pg_config = tokio_postgres::Config::new();
    pg_config
        .host(&config.host)
        .port(config.port)
        .dbname(&config.database)
        .user(&config.user)
        .password(&config.password)
        .options(config.session_options())
        .application_name(&config.application_name);

    if let Some(timeout) = config.timeout() {
        pg_config.connect_timeout(timeout);
    }

    pg_config
}

/// An open database session
pub struct Session {
    /// Client used to issue statements
    client: Client,

    /// Task driving the connection until the client is dropped
    driver: JoinHandle<std::result::Result<(), tokio_postgres::Error>>,
}

impl Session {
    /// Connect to the configured server
    ///
    /// # Arguments
    /// * `config` - Connection configuration
    ///
    /// # Returns
    /// * `Result<Self>` - Open session or connection error
    pub async fn open(config: &ConnectionConfig) -> Result<Self> {
        debug!("Connecting to {}", config.sanitized_endpoint());
        trace!("Session options: {}", config.session_options());

        let pg_config = build_pg_config(config);
        let (client, connection) = pg_config.connect(NoTls).await.map_err(connect_error)?;

        let driver = tokio::spawn(connection);
        debug!("Connected");

        let session = Self { client, driver };
        if let Err(e) = session.client.batch_execute(SESSION_SETUP).await {
            session.close().await;
            return Err(e.into());
        }
        Ok(session)
    }

    /// Get the client handle
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Close the session
    ///
    /// Dropping the client sends Terminate; the driver task then finishes
    /// and the socket is closed.
    pub async fn close(self) {
        let Session { client, driver } = self;
        drop(client);

        match driver.await {
            Ok(Ok(())) => debug!("Connection closed"),
            Ok(Err(e)) => debug!("Connection closed with error: {}", e),
            Err(e) => debug!("Connection task failed: {}", e),
        }
    }
}

/// Run `body` against a freshly opened session and always close it afterwards
///
/// The body's result is returned unchanged once the session is closed.
/// The body may borrow the session but must own everything else it uses.
pub async fn with_session<T, F>(config: &ConnectionConfig, body: F) -> Result<T>
where
    F: for<'s> FnOnce(&'s Session) -> BoxFuture<'s, Result<T>>,
{
    let session = Session::open(config).await?;
    let result = body(&session).await;
    session.close().await;
    result
}

/// Classify a failed connect attempt
fn connect_error(err: tokio_postgres::Error) -> PgMockError {
    if err.as_db_error().is_some() {
        // Authentication and startup errors reported by the server
        return PgMockError::Postgres(err);
    }

    let message = err.to_string();
    if message.contains("timeout") || message.contains("timed out") {
        ConnectionError::Timeout.into()
    } else {
        ConnectionError::ConnectFailed(message).into()
    }
}
