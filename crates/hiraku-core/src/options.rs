use std::collections::HashMap;

use url::Url;

use crate::error::HirakuError;
use crate::registry::PlayerRegistry;

/// Player assumed when the URI names none.
pub const DEFAULT_PLAYER: &str = "mpv";

/// The translated request decoded from one `mpv://` URI. Built once per
/// invocation and discarded; never persisted.
#[derive(Debug, Clone)]
pub struct Options {
    /// Registry key, case preserved as supplied (lookups lowercase it).
    pub player: String,
    /// The media URL to open. Kept structured so the scheme allowlist can be
    /// enforced.
    pub target_url: Url,
    /// Raw space-separated CLI flags supplied by the caller.
    pub flags: String,
    pub enqueue: bool,
    pub fullscreen: bool,
    pub pip: bool,
    pub new_window: bool,
    /// Copied from the resolved profile at parse time.
    pub needs_ipc: bool,
}

impl Options {
    /// Translate a raw `mpv://` URI, validating it against the registry.
    ///
    /// The grammar is
    /// `mpv:///open?url=<encoded>&flags=<encoded>&player=<name>&enqueue=1&fullscreen=1&pip=1&new_window=1`
    /// with `url` mandatory. Boolean parameters are true only for the
    /// literal value `"1"`.
    pub fn parse(raw: &str, registry: &PlayerRegistry) -> Result<Self, HirakuError> {
        let uri = Url::parse(raw).map_err(HirakuError::InvalidUri)?;

        if uri.scheme() != "mpv" {
            return Err(HirakuError::UnsupportedScheme {
                scheme: uri.scheme().to_string(),
            });
        }

        if uri.path() != "/open" {
            return Err(HirakuError::UnsupportedMethod {
                path: uri.path().to_string(),
            });
        }

        if uri.query().map_or(0, str::len) < 2 {
            return Err(HirakuError::EmptyQuery);
        }

        let query: HashMap<String, String> = uri.query_pairs().into_owned().collect();

        let player = query
            .get("player")
            .cloned()
            .unwrap_or_else(|| DEFAULT_PLAYER.to_string());

        let profile = registry
            .resolve(&player)
            .ok_or_else(|| HirakuError::UnsupportedPlayer {
                player: player.clone(),
            })?;

        let flags = query.get("flags").cloned().unwrap_or_default();

        let raw_target = query.get("url").map(String::as_str).unwrap_or_default();
        let target_url =
            Url::parse(raw_target).map_err(|source| HirakuError::InvalidTargetUrl {
                raw: raw_target.to_string(),
                source,
            })?;

        // The admission gate: a profile only opens schemes it allowlists.
        if !profile.supports_scheme(target_url.scheme()) {
            return Err(HirakuError::UnsupportedTargetScheme {
                player: profile.name.clone(),
                scheme: target_url.scheme().to_string(),
            });
        }

        Ok(Self {
            enqueue: flag_set(&query, "enqueue"),
            fullscreen: flag_set(&query, "fullscreen"),
            pip: flag_set(&query, "pip"),
            new_window: flag_set(&query, "new_window"),
            needs_ipc: profile.needs_ipc,
            player,
            target_url,
            flags,
        })
    }
}

/// Boolean query values decode to true only for the literal `"1"`.
fn flag_set(query: &HashMap<String, String>, key: &str) -> bool {
    query.get(key).map(String::as_str) == Some("1")
}
