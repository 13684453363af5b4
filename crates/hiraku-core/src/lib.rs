//! URI-to-action translation engine for the `mpv://` protocol handler.
//!
//! An inbound URI is parsed into an [`Options`] request against the
//! [`PlayerRegistry`], then routed by the [`Dispatcher`]: enqueued into a
//! running player over its control socket, or spawned as a new process when
//! no instance answers.

pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod flags;
pub mod ipc;
pub mod launcher;
pub mod options;
pub mod registry;

pub use dispatch::{Dispatcher, Outcome};
pub use error::HirakuError;
pub use options::Options;
pub use registry::{PlayerProfile, PlayerRegistry};
