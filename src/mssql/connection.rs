use crate::error::{Error, Result};
use regex::Regex;
use tiberius::{Client, Config};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

/// An open SQL Server session.
///
/// Dropping the connection closes the socket; [`MssqlConnection::close`] also
/// ends the session cleanly.
pub struct MssqlConnection {
    client: Client<Compat<TcpStream>>,
    address: String,
}

impl MssqlConnection {
    /// Connects using an ADO.NET style connection string
    /// (`server=tcp:host,1433;database=app;user=sa;password=...`).
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let config = Config::from_ado_string(connection_string).map_err(|e| {
            Error::connection(format!(
                "Invalid connection string {}: {}",
                redact_password(connection_string),
                e
            ))
        })?;
        let address = config.get_addr();
        tracing::debug!(%address, "connecting to SQL Server");

        let tcp = TcpStream::connect(&address)
            .await
            .map_err(|e| Error::connection(format!("Failed to connect to {address}: {e}")))?;
        tcp.set_nodelay(true)
            .map_err(|e| Error::connection(format!("Failed to configure socket: {e}")))?;

        let client = Client::connect(config, tcp.compat_write())
            .await
            .map_err(|e| Error::connection(format!("Failed to connect to {address}: {e}")))?;

        tracing::debug!(%address, "connected to SQL Server");
        Ok(Self { client, address })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn client(&mut self) -> &mut Client<Compat<TcpStream>> {
        &mut self.client
    }

    pub async fn close(self) -> Result<()> {
        let address = self.address;
        self.client
            .close()
            .await
            .map_err(|e| Error::connection(format!("Failed to close connection to {address}: {e}")))?;
        tracing::debug!(%address, "connection closed");
        Ok(())
    }
}

impl std::fmt::Debug for MssqlConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MssqlConnection")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Masks `password=` / `pwd=` values in a connection string.
pub fn redact_password(connection_string: &str) -> String {
    match Regex::new(r"(?i)\b(password|pwd)\s*=\s*[^;]*") {
        Ok(re) => re.replace_all(connection_string, "$1=***").into_owned(),
        Err(_) => "<connection string>".to_string(),
    }
}
