use serde::Deserialize;

/// Configuration options for the product catalog server.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path (or `file:` URL) of the SQLite database.
    pub database_url: String,
    /// Interface the HTTP server binds to.
    pub address: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Origin allowed to issue cross-origin requests (the browser client).
    pub cors_allowed_origin: String,
}
