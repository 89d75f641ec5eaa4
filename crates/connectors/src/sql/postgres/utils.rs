//! Client setup honoring the URL's `sslmode`.

use crate::sql::base::error::ConnectorError;
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::{
    Client, Config, NoTls, Socket,
    config::SslMode,
    tls::{MakeTlsConnect, TlsConnect},
};
use tracing::{error, warn};

/// Connects and spawns the connection task. `sslmode=prefer` falls back to a
/// plain connection when the TLS attempt fails.
pub(crate) async fn connect_client(url: &str) -> Result<Client, ConnectorError> {
    let config = url
        .parse::<Config>()
        .map_err(|e| ConnectorError::InvalidUrl(e.to_string()))?;

    match config.get_ssl_mode() {
        SslMode::Disable => spawn_connection(&config, NoTls).await,
        SslMode::Prefer => {
            let attempt = match native_tls() {
                Ok(tls) => spawn_connection(&config, tls).await,
                Err(e) => Err(e),
            };
            match attempt {
                Ok(client) => Ok(client),
                Err(error) => {
                    warn!(%error, "Postgres TLS handshake failed, retrying without TLS");
                    spawn_connection(&config, NoTls).await
                }
            }
        }
        _ => spawn_connection(&config, native_tls()?).await,
    }
}

fn native_tls() -> Result<MakeTlsConnector, ConnectorError> {
    Ok(MakeTlsConnector::new(TlsConnector::builder().build()?))
}

async fn spawn_connection<T>(config: &Config, tls: T) -> Result<Client, ConnectorError>
where
    T: MakeTlsConnect<Socket> + Send + 'static,
    T::Stream: Send + 'static,
    T::TlsConnect: Send,
    <T::TlsConnect as TlsConnect<Socket>>::Future: Send,
{
    let (client, connection) = config.connect(tls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok(client)
}
