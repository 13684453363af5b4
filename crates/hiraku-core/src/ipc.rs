use std::io;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

/// Write timeout for the control socket. A hung peer must not stall the
/// spawn fallback.
const WRITE_TIMEOUT: Duration = Duration::from_millis(500);

/// One-way control channel to a running player instance.
///
/// Fire-and-forget: a successful send means the payload was written, not
/// that the player acted on it. Liveness of an instance is inferred solely
/// from whether the write succeeds.
pub trait ChannelTransport {
    fn send(&self, address: &Path, payload: &[u8]) -> io::Result<()>;
}

/// Control channel over a UNIX domain socket (mpv's `--input-ipc-server`).
#[derive(Debug, Default)]
pub struct UnixSocketTransport;

#[cfg(unix)]
impl ChannelTransport for UnixSocketTransport {
    fn send(&self, address: &Path, payload: &[u8]) -> io::Result<()> {
        use std::io::Write;
        use std::os::unix::net::UnixStream;

        let mut stream = UnixStream::connect(address)?;
        stream.set_write_timeout(Some(WRITE_TIMEOUT))?;
        stream.write_all(payload)?;
        stream.flush()?;
        debug!(socket = %address.display(), bytes = payload.len(), "Wrote control command");
        Ok(())
    }
}

#[cfg(not(unix))]
impl ChannelTransport for UnixSocketTransport {
    fn send(&self, _address: &Path, _payload: &[u8]) -> io::Result<()> {
        // Routes into the spawn fallback on platforms without UNIX sockets.
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "no control channel on this platform",
        ))
    }
}
