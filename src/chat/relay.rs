//! Chat message relay
//!
//! Forwards chat messages from the conferencing session into a named pipe
//! (FIFO) for consumption by an external process, e.g. a moderation bot or
//! a now-playing overlay. The relay is stateless beyond the pipe identity:
//! one FIFO per server instance, written one message per send, never held
//! open between sends.

use crate::utils::error::{RelayError, RelayResult};
use nix::sys::stat::Mode;
use nix::unistd::mkfifo;
use std::fs::OpenOptions;
use std::io::Write;
use std::os::unix::fs::{FileTypeExt, OpenOptionsExt};
use std::path::{Path, PathBuf};

/// Default FIFO base path; the server port is appended as `<base>-<port>`
pub const DEFAULT_BASE_PATH: &str = "/tmp/audio-relay-chat";

/// Per-instance FIFO name: `<base>-<instance_key>`
fn fifo_path(base: &Path, instance_key: u16) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(format!("-{}", instance_key));
    PathBuf::from(name)
}

/// One-way chat sink backed by a named pipe
#[derive(Debug)]
pub struct MessageRelay {
    path: PathBuf,
}

impl MessageRelay {
    /// Create the relay for a server instance, keyed by its port number.
    ///
    /// Creating the FIFO is idempotent: an existing FIFO at the path is
    /// reused, an existing non-FIFO is a resource creation error.
    pub fn new(instance_key: u16) -> RelayResult<Self> {
        Self::with_base_path(DEFAULT_BASE_PATH, instance_key)
    }

    /// Create the relay with a custom FIFO base path
    pub fn with_base_path(base_path: impl AsRef<Path>, instance_key: u16) -> RelayResult<Self> {
        let path = fifo_path(base_path.as_ref(), instance_key);

        match mkfifo(&path, Mode::from_bits_truncate(0o777)) {
            Ok(()) => {
                tracing::info!("Created chat FIFO at {}", path.display());
            }
            Err(nix::errno::Errno::EEXIST) => {
                let metadata = std::fs::metadata(&path).map_err(|e| {
                    RelayError::ResourceCreation(format!(
                        "cannot inspect existing {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                if !metadata.file_type().is_fifo() {
                    return Err(RelayError::ResourceCreation(format!(
                        "{} exists and is not a FIFO",
                        path.display()
                    )));
                }
                tracing::debug!("Reusing existing chat FIFO at {}", path.display());
            }
            Err(e) => {
                return Err(RelayError::ResourceCreation(format!(
                    "mkfifo {} failed: {}",
                    path.display(),
                    e
                )));
            }
        }

        Ok(Self { path })
    }

    /// Path of the FIFO this relay writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forward one chat message to the FIFO.
    ///
    /// The pipe is opened write-only and non-blocking, written once with the
    /// UTF-8 bytes of `message` (no delimiter appended), and closed again.
    /// With no reader attached the message is dropped; all failures are
    /// swallowed so the chat pipeline never stalls on the relay.
    pub fn send(&self, message: &str) {
        let file = OpenOptions::new()
            .write(true)
            .custom_flags(nix::libc::O_NONBLOCK)
            .open(&self.path);

        let mut file = match file {
            Ok(f) => f,
            Err(e) => {
                // ENXIO means no reader is attached right now; anything else
                // is equally non-fatal for the caller.
                tracing::debug!(
                    "Chat FIFO {} not writable, dropping message: {}",
                    self.path.display(),
                    e
                );
                return;
            }
        };

        if let Err(e) = file.write_all(message.as_bytes()) {
            tracing::debug!("Chat FIFO write failed, dropping message: {}", e);
        }
        // The file handle drops here; the sink is not kept open between sends.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_new_creates_fifo() {
        let dir = tempfile::tempdir().unwrap();
        let relay = MessageRelay::with_base_path(dir.path().join("chat"), 22124).unwrap();

        assert_eq!(relay.path(), dir.path().join("chat-22124"));
        let file_type = std::fs::metadata(relay.path()).unwrap().file_type();
        assert!(file_type.is_fifo());
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("chat");
        let first = MessageRelay::with_base_path(&base, 22124).unwrap();
        let second = MessageRelay::with_base_path(&base, 22124).unwrap();
        assert_eq!(first.path(), second.path());
    }

    #[test]
    fn test_non_fifo_collision_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("chat");
        std::fs::write(dir.path().join("chat-22124"), b"in the way").unwrap();

        let err = MessageRelay::with_base_path(&base, 22124).unwrap_err();
        assert!(matches!(err, RelayError::ResourceCreation(_)));
    }

    #[test]
    fn test_send_without_reader_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let relay = MessageRelay::with_base_path(dir.path().join("chat"), 22124).unwrap();
        // Nobody has the read end open; the message just vanishes.
        relay.send("hello?");
    }

    #[test]
    fn test_send_delivers_bytes_to_reader() {
        let dir = tempfile::tempdir().unwrap();
        let relay = MessageRelay::with_base_path(dir.path().join("chat"), 22124).unwrap();

        let mut reader = OpenOptions::new()
            .read(true)
            .custom_flags(nix::libc::O_NONBLOCK)
            .open(relay.path())
            .unwrap();

        relay.send("tune request: fly me to the moon");

        let mut buf = [0u8; 256];
        let n = reader.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"tune request: fly me to the moon");
    }

    #[test]
    fn test_messages_are_not_delimited() {
        let dir = tempfile::tempdir().unwrap();
        let relay = MessageRelay::with_base_path(dir.path().join("chat"), 22124).unwrap();

        let mut reader = OpenOptions::new()
            .read(true)
            .custom_flags(nix::libc::O_NONBLOCK)
            .open(relay.path())
            .unwrap();

        relay.send("one");
        relay.send("two");

        // Consumers frame messages themselves; the pipe carries raw bytes.
        let mut buf = [0u8; 256];
        let n = reader.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"onetwo");
    }
}
