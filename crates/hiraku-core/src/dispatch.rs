use tracing::{info, warn};

use crate::command;
use crate::error::HirakuError;
use crate::ipc::ChannelTransport;
use crate::launcher::ProcessLauncher;
use crate::options::Options;
use crate::registry::PlayerRegistry;

/// How a URI was ultimately handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A running instance accepted the enqueue command; nothing was spawned.
    Enqueued { player: String },
    /// A new player process was started.
    Spawned { executable: String },
}

/// End-to-end handler for one `mpv://` URI: translate, then route to the
/// control channel or to a fresh process.
pub struct Dispatcher<'a> {
    registry: &'a PlayerRegistry,
    transport: &'a dyn ChannelTransport,
    launcher: &'a dyn ProcessLauncher,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        registry: &'a PlayerRegistry,
        transport: &'a dyn ChannelTransport,
        launcher: &'a dyn ProcessLauncher,
    ) -> Self {
        Self {
            registry,
            transport,
            launcher,
        }
    }

    /// Translate and dispatch a raw URI.
    pub fn run(&self, raw_uri: &str) -> Result<Outcome, HirakuError> {
        let options = Options::parse(raw_uri, self.registry)?;
        self.dispatch(&options)
    }

    /// Route a translated request. Profiles with `needs_ipc` get an enqueue
    /// attempt first; a transport failure is a routing signal (no live
    /// instance), never a hard error, and falls through to spawning.
    pub fn dispatch(&self, options: &Options) -> Result<Outcome, HirakuError> {
        if options.needs_ipc {
            let profile =
                self.registry
                    .resolve(&options.player)
                    .ok_or_else(|| HirakuError::UnsupportedPlayer {
                        player: options.player.clone(),
                    })?;
            let payload = command::build_ipc_payload(options)?;

            match self.transport.send(&profile.ipc_socket, &payload) {
                Ok(()) => {
                    info!(
                        player = %options.player,
                        url = %options.target_url,
                        "Enqueued into running instance"
                    );
                    return Ok(Outcome::Enqueued {
                        player: options.player.clone(),
                    });
                }
                Err(e) => {
                    warn!(error = %e, "Control channel unavailable, spawning a new instance");
                }
            }
        }

        let (executable, args) = command::build_argv(options, self.registry)?;
        self.launcher.spawn(&executable, &args)?;
        Ok(Outcome::Spawned { executable })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    struct MockTransport {
        fail: bool,
        sent: RefCell<Vec<(PathBuf, Vec<u8>)>>,
    }

    impl MockTransport {
        fn failing() -> Self {
            Self {
                fail: true,
                sent: RefCell::new(Vec::new()),
            }
        }

        fn accepting() -> Self {
            Self {
                fail: false,
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl ChannelTransport for MockTransport {
        fn send(&self, address: &Path, payload: &[u8]) -> std::io::Result<()> {
            if self.fail {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "no listener",
                ));
            }
            self.sent
                .borrow_mut()
                .push((address.to_path_buf(), payload.to_vec()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockLauncher {
        spawned: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl ProcessLauncher for MockLauncher {
        fn spawn(&self, executable: &str, args: &[String]) -> Result<(), HirakuError> {
            self.spawned
                .borrow_mut()
                .push((executable.to_string(), args.to_vec()));
            Ok(())
        }
    }

    fn no_ipc_registry() -> PlayerRegistry {
        let profiles = PlayerRegistry::profiles_from_toml(
            r#"
            [[player]]
            name = "plain"
            executable = "plain"
            needs_ipc = false
            "#,
        )
        .unwrap();
        let mut registry = PlayerRegistry::embedded();
        registry.merge_user(profiles);
        registry
    }

    #[test]
    fn test_dead_channel_falls_back_to_spawn() {
        let registry = PlayerRegistry::embedded();
        let transport = MockTransport::failing();
        let launcher = MockLauncher::default();
        let dispatcher = Dispatcher::new(&registry, &transport, &launcher);

        let outcome = dispatcher
            .run("mpv:///open?url=https%3A%2F%2Fexample.com%2Fv&fullscreen=1")
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Spawned {
                executable: "mpv".to_string()
            }
        );
        let spawned = launcher.spawned.borrow();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].0, "mpv");
        assert_eq!(spawned[0].1, vec!["--fs", "https://example.com/v"]);
    }

    #[test]
    fn test_live_channel_skips_spawn() {
        let registry = PlayerRegistry::embedded();
        let transport = MockTransport::accepting();
        let launcher = MockLauncher::default();
        let dispatcher = Dispatcher::new(&registry, &transport, &launcher);

        let outcome = dispatcher
            .run("mpv:///open?url=https%3A%2F%2Fexample.com%2Fv")
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Enqueued {
                player: "mpv".to_string()
            }
        );
        assert!(launcher.spawned.borrow().is_empty());

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, PathBuf::from("/tmp/mpvsocket"));
        assert_eq!(
            sent[0].1,
            b"{\"command\":[\"loadfile\",\"https://example.com/v\",\"append-play\"]}\n"
        );
    }

    #[test]
    fn test_non_ipc_profile_spawns_directly() {
        let registry = no_ipc_registry();
        let transport = MockTransport::accepting();
        let launcher = MockLauncher::default();
        let dispatcher = Dispatcher::new(&registry, &transport, &launcher);

        let outcome = dispatcher
            .run("mpv:///open?url=https%3A%2F%2Fexample.com%2Fv&player=plain")
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Spawned {
                executable: "plain".to_string()
            }
        );
        // The channel must not even be attempted.
        assert!(transport.sent.borrow().is_empty());
        assert_eq!(launcher.spawned.borrow().len(), 1);
    }

    #[test]
    fn test_translation_errors_bubble_up() {
        let registry = PlayerRegistry::embedded();
        let transport = MockTransport::accepting();
        let launcher = MockLauncher::default();
        let dispatcher = Dispatcher::new(&registry, &transport, &launcher);

        let err = dispatcher.run("mpv:///open?url=x").unwrap_err();
        assert!(matches!(err, HirakuError::InvalidTargetUrl { .. }));
        assert!(launcher.spawned.borrow().is_empty());
    }
}
