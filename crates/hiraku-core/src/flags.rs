use crate::registry::PlayerProfile;

/// Placeholder substituted with the dash-stripped flag token.
const PLACEHOLDER: &str = "%s";

/// Rewrite caller-supplied flags through the profile's override templates.
///
/// `raw_flags` is split on single spaces and the surviving tokens are
/// rejoined in order. A wildcard template applies to every token and
/// supersedes per-token entries for the whole call. Without a wildcard,
/// tokens absent from `flag_overrides` are dropped, not passed through.
/// Leading dashes are stripped from the token before substitution; the
/// template supplies its own dashes.
///
/// Only meaningful for profiles with overrides configured; the command
/// builder passes raw flags through verbatim otherwise.
pub fn apply_overrides(profile: &PlayerProfile, raw_flags: &str) -> String {
    let mut rewritten: Vec<String> = Vec::new();

    for token in raw_flags.split(' ') {
        let template = match &profile.wildcard_template {
            Some(wildcard) => Some(wildcard),
            None => profile.flag_overrides.get(token),
        };

        if let Some(template) = template {
            let stripped = token.trim_start_matches('-');
            rewritten.push(template.replace(PLACEHOLDER, stripped));
        }
    }

    rewritten.join(" ")
}
