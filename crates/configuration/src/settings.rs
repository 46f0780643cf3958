use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub providers: ProviderConfig,
    /// The immutable index symbol table: identifier, display name, and the
    /// upstream provider ticker. Loaded once at startup and passed by
    /// reference into whatever component needs it; never mutated.
    pub indices: Vec<IndexEntry>,
}

impl Config {
    pub fn index_by_id(&self, id: &str) -> Option<&IndexEntry> {
        self.indices.iter().find(|entry| entry.id == id)
    }
}

/// Listen address for the HTTP surface.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Base URLs for the upstream data providers. Overridable so tests and
/// local mirrors can point the clients elsewhere.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub mfapi_base_url: String,
    pub yahoo_base_url: String,
}

/// One row of the index symbol table.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexEntry {
    /// Stable identifier used in API requests (e.g. "nifty50").
    pub id: String,
    /// Human-readable display name (e.g. "Nifty 50").
    pub name: String,
    /// Provider ticker symbol (e.g. "^NSEI").
    pub symbol: String,
}
