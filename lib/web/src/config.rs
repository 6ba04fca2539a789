use catalogue_offerings::OfferingStore;

/// Holds the configuration for a catalogue web server.
pub struct ServerConfig {
    /// The offering store backing the server.
    pub catalogue: OfferingStore,
    /// The IP address or DNS name that the socket binds to.
    pub bind: String,
    /// Whether CORS is enabled.
    pub cors: bool,
}
