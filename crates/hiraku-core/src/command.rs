use serde::Serialize;

use crate::error::HirakuError;
use crate::flags;
use crate::options::Options;
use crate::registry::PlayerRegistry;

/// Wire shape of an mpv IPC command: a JSON array of strings under a single
/// `command` key.
#[derive(Debug, Serialize)]
struct EnqueueCommand<'a> {
    command: [&'a str; 3],
}

/// Build the executable and argument list to spawn a new player instance.
///
/// Argument order is fixed: fullscreen template, pip template, flags block,
/// target URL. The URL is always the final argument; players that parse
/// positional arguments depend on that. Templates land as single argv tokens
/// even when they contain spaces.
pub fn build_argv(
    options: &Options,
    registry: &PlayerRegistry,
) -> Result<(String, Vec<String>), HirakuError> {
    let profile =
        registry
            .resolve(&options.player)
            .ok_or_else(|| HirakuError::UnsupportedPlayer {
                player: options.player.clone(),
            })?;

    let mut args = Vec::new();

    if options.fullscreen {
        args.push(profile.fullscreen.clone());
    }

    if options.pip {
        args.push(profile.pip.clone());
    }

    if !options.flags.is_empty() {
        let block = if profile.has_overrides() {
            flags::apply_overrides(profile, &options.flags)
        } else {
            options.flags.clone()
        };
        if !block.is_empty() {
            args.push(block);
        }
    }

    args.push(options.target_url.to_string());

    Ok((profile.executable.clone(), args))
}

/// Serialize the enqueue command for the control channel:
/// `{"command":["loadfile",<url>,"append-play"]}` followed by exactly one
/// newline byte. Fails for profiles that do not use IPC.
pub fn build_ipc_payload(options: &Options) -> Result<Vec<u8>, HirakuError> {
    if !options.needs_ipc {
        return Err(HirakuError::IpcNotSupported {
            player: options.player.clone(),
        });
    }

    let cmd = EnqueueCommand {
        command: ["loadfile", options.target_url.as_str(), "append-play"],
    };

    let mut payload = serde_json::to_vec(&cmd)?;
    if payload.last() != Some(&b'\n') {
        payload.push(b'\n');
    }

    Ok(payload)
}
