use thiserror::Error;

/// All fatal failure modes of the translation engine.
///
/// A failed control-channel write is deliberately not represented here: it is
/// a routing signal consumed by the dispatcher's spawn fallback, never an
/// error surfaced to callers.
#[derive(Debug, Error)]
pub enum HirakuError {
    /// The inbound URI is not syntactically valid.
    #[error("invalid URI: {0}")]
    InvalidUri(url::ParseError),

    /// The inbound URI scheme is not `mpv`.
    #[error("unsupported protocol: {scheme}")]
    UnsupportedScheme { scheme: String },

    /// The inbound URI path names a verb other than `/open`.
    #[error("unsupported method: {path}")]
    UnsupportedMethod { path: String },

    /// The inbound URI carries no usable query string.
    #[error("empty or malformed query")]
    EmptyQuery,

    /// No configured player matches the requested name.
    #[error("unsupported player: {player}")]
    UnsupportedPlayer { player: String },

    /// The `url` query parameter is missing or does not parse as a URL.
    #[error("invalid target URL {raw:?}: {source}")]
    InvalidTargetUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },

    /// The target URL scheme is not in the player's allowlist.
    #[error("unsupported scheme '{scheme}' for player '{player}'; is it missing from the configuration?")]
    UnsupportedTargetScheme { player: String, scheme: String },

    /// An IPC payload was requested for a player that does not use IPC.
    #[error("player '{player}' does not use IPC")]
    IpcNotSupported { player: String },

    /// The user configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// The player process could not be started. Last resort, no fallback.
    #[error("failed to launch '{executable}': {source}")]
    Launch {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
