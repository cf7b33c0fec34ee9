//! Client configuration.

/// Default server address, matching the server's default port on this
/// machine.
pub const DEFAULT_SERVER: &str = "127.0.0.1:9090";

/// Runtime configuration for the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `host:port` of the keyrelay server.  The host may be a name; it is
    /// resolved when connecting.
    pub server: String,

    /// Prompt printed before each line is read.
    pub prompt: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            prompt: "> ".to_string(),
        }
    }
}
