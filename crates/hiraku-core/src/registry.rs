use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Embedded built-in player table.
const EMBEDDED_PLAYERS: &str = include_str!("../data/players.toml");

/// Schemes assigned to a profile that declares none. A profile with an empty
/// scheme list could never open anything, so loading falls open to this set
/// instead of rejecting the profile.
pub const DEFAULT_SCHEMES: &[&str] = &["http", "https"];

fn default_socket() -> PathBuf {
    PathBuf::from("/tmp/mpvsocket")
}

/// Configuration for one controllable player: executable, flag templates for
/// the well-known toggles, scheme allowlist and control-channel address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Display name; registry lookups use the lowercased form.
    pub name: String,
    /// Executable path, or bare name resolved via the OS search path.
    pub executable: String,
    /// Flag template for fullscreen playback.
    #[serde(default)]
    pub fullscreen: String,
    /// Flag template for picture-in-picture mode.
    #[serde(default)]
    pub pip: String,
    /// Flag template for enqueuing without IPC.
    #[serde(default)]
    pub enqueue: String,
    /// Flag template for forcing a new window.
    #[serde(default)]
    pub new_window: String,
    /// Whether enqueue requests go through the control socket.
    #[serde(default)]
    pub needs_ipc: bool,
    /// URL schemes this player may open. Empty is replaced by
    /// [`DEFAULT_SCHEMES`] at load time.
    #[serde(default)]
    pub supported_schemes: Vec<String>,
    /// Rewrite templates for caller-supplied flags, keyed by the literal
    /// token. A `"*"` key is hoisted into `wildcard_template` at load time.
    #[serde(default)]
    pub flag_overrides: HashMap<String, String>,
    /// Template applied to every flag token, superseding `flag_overrides`
    /// for the whole invocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard_template: Option<String>,
    /// Control-channel socket path.
    #[serde(default = "default_socket")]
    pub ipc_socket: PathBuf,
}

impl PlayerProfile {
    /// Whether this player is allowed to open the given URL scheme.
    pub fn supports_scheme(&self, scheme: &str) -> bool {
        self.supported_schemes.iter().any(|s| s == scheme)
    }

    /// Whether any flag rewriting is configured. When false, raw flags pass
    /// through verbatim.
    pub fn has_overrides(&self) -> bool {
        self.wildcard_template.is_some() || !self.flag_overrides.is_empty()
    }
}

/// Wrapper for TOML deserialization of a `[[player]]` table file.
#[derive(Debug, Deserialize)]
struct PlayerFile {
    #[serde(rename = "player", default)]
    players: Vec<PlayerProfile>,
}

/// The resolved player table: built-in defaults overlaid by user
/// configuration. Read-only after construction.
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    players: HashMap<String, PlayerProfile>,
}

impl PlayerRegistry {
    /// Registry holding only the built-in defaults.
    pub fn embedded() -> Self {
        let file: PlayerFile =
            toml::from_str(EMBEDDED_PLAYERS).expect("embedded players.toml should be valid");
        let mut registry = Self {
            players: HashMap::new(),
        };
        registry.merge(file.players);
        registry
    }

    /// Parse profiles from a user `players.toml` string.
    pub fn profiles_from_toml(toml_str: &str) -> Result<Vec<PlayerProfile>, toml::de::Error> {
        let file: PlayerFile = toml::from_str(toml_str)?;
        Ok(file.players)
    }

    /// Overlay user profiles: a matching name replaces the built-in entry
    /// wholesale, a new name is appended.
    pub fn merge_user(&mut self, profiles: Vec<PlayerProfile>) {
        self.merge(profiles);
    }

    /// Look up a profile by name, case-insensitively.
    pub fn resolve(&self, name: &str) -> Option<&PlayerProfile> {
        self.players.get(&name.to_lowercase())
    }

    fn merge(&mut self, profiles: Vec<PlayerProfile>) {
        for mut profile in profiles {
            Self::normalize(&mut profile);
            self.players.insert(profile.name.to_lowercase(), profile);
        }
    }

    /// Load-time fixups: assign the default scheme set to profiles that
    /// declare none, and hoist the `"*"` override key out of the map.
    fn normalize(profile: &mut PlayerProfile) {
        if profile.supported_schemes.is_empty() {
            warn!(player = %profile.name, "No supported schemes configured, using defaults");
            profile.supported_schemes = DEFAULT_SCHEMES.iter().map(|s| s.to_string()).collect();
        }
        if let Some(template) = profile.flag_overrides.remove("*") {
            profile.wildcard_template.get_or_insert(template);
        }
    }
}
