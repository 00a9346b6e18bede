//! Stream relay lifecycle
//!
//! Owns the external encoder process for one conferencing session and the
//! enable/destination configuration that governs whether forwarding occurs.
//! The audio pipeline pushes one fixed-size PCM frame per tick into
//! [`StreamRelay::forward`]; control surfaces configure, start, stop and
//! toggle from their own context. All state-mutating operations are
//! serialized through a single per-instance lock.

use crate::stream::encoder::{EncoderLauncher, EncoderSink, FfmpegLauncher, CHANNELS};
use crate::stream::state::{RelayState, StreamStatus};
use parking_lot::Mutex;
use std::sync::Arc;

struct Inner {
    /// Target address passed to the encoder; empty means unconfigured
    destination: String,

    /// Operator toggle; gates future starts only
    enabled: bool,

    /// Input stream of the live encoder; `Some` exactly while running
    encoder: Option<Box<dyn EncoderSink>>,

    launcher: Box<dyn EncoderLauncher>,
}

impl Inner {
    /// Idempotent teardown. Dropping the sink closes the encoder input.
    fn stop(&mut self) {
        if self.encoder.take().is_some() {
            tracing::info!("Stream relay stopped");
        }
    }

    /// Start forwarding if the relay is eligible (enabled and configured)
    fn start_if_enabled(&mut self) {
        if self.enabled {
            self.begin_forwarding();
        }
    }

    fn begin_forwarding(&mut self) {
        // Guards against double-start leaving a stray encoder behind.
        self.stop();

        if self.destination.is_empty() {
            tracing::debug!("Stream relay has no destination, staying stopped");
            return;
        }

        match self.launcher.launch(&self.destination) {
            Ok(sink) => {
                self.encoder = Some(sink);
                tracing::info!("Stream relay running, destination: {}", self.destination);
            }
            Err(e) => {
                // Contained: the relay stays stopped and the session goes on.
                tracing::warn!("Failed to start stream encoder: {}", e);
            }
        }
    }
}

/// Relays decoded PCM audio from the conferencing session into an external
/// encoder process for re-streaming to a destination.
///
/// Cheaply cloneable handle; clones share one relay instance. The owning
/// session constructs one relay and drops it on shutdown, which tears down
/// any live encoder.
#[derive(Clone)]
pub struct StreamRelay {
    inner: Arc<Mutex<Inner>>,
}

impl StreamRelay {
    /// Create a relay that spawns real FFmpeg encoder processes
    pub fn new() -> Self {
        Self::with_launcher(Box::new(FfmpegLauncher::new()))
    }

    /// Create a relay with a custom encoder launcher
    pub fn with_launcher(launcher: Box<dyn EncoderLauncher>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                destination: String::new(),
                enabled: true,
                encoder: None,
                launcher,
            })),
        }
    }

    /// Set the stream destination.
    ///
    /// If the relay is currently running this is an in-place restart: the
    /// live encoder is stopped first, then a new one is started against the
    /// new destination (still gated on `enabled`). When stopped, only the
    /// stored destination changes; nothing is launched.
    pub fn configure(&self, destination: &str) {
        let mut inner = self.inner.lock();
        if inner.encoder.is_some() {
            tracing::info!("Reconfiguring live stream relay, destination: {}", destination);
            inner.stop();
            inner.destination = destination.to_string();
            inner.start_if_enabled();
        } else {
            inner.destination = destination.to_string();
        }
    }

    /// Begin forwarding if the relay is enabled. No-op when disabled or
    /// unconfigured.
    pub fn start(&self) {
        self.inner.lock().start_if_enabled();
    }

    /// Stop forwarding and release the encoder. Idempotent.
    pub fn stop(&self) {
        self.inner.lock().stop();
    }

    /// Flip the operator enable toggle.
    ///
    /// Affects eligibility for future starts only: disabling does not stop
    /// an already-running stream. An explicit `stop()` does that.
    pub fn toggle_enabled(&self) {
        let mut inner = self.inner.lock();
        inner.enabled = !inner.enabled;
        tracing::info!("Stream relay enabled: {}", inner.enabled);
    }

    /// Forward one audio frame to the encoder. Hot path, one call per tick.
    ///
    /// `samples` must hold `2 * frame_size_samples` interleaved stereo i16
    /// samples. While stopped, frames are silently dropped (never buffered).
    /// A failed write stops the relay in place instead of propagating a
    /// fault into the audio pipeline.
    pub fn forward(&self, frame_size_samples: usize, samples: &[i16]) {
        let mut inner = self.inner.lock();
        if inner.encoder.is_none() {
            return;
        }

        let Some(pcm) = samples.get(..CHANNELS as usize * frame_size_samples) else {
            tracing::warn!(
                "Dropping short PCM frame: {} samples, frame size {}",
                samples.len(),
                frame_size_samples
            );
            return;
        };

        let bytes: Vec<u8> = pcm.iter().flat_map(|&s| s.to_le_bytes()).collect();

        let result = inner.encoder.as_mut().map(|encoder| encoder.write(&bytes));
        if let Some(Err(e)) = result {
            tracing::warn!("Stream encoder write failed, stopping relay: {}", e);
            inner.stop();
        }
    }

    /// Configured stream destination; empty when unconfigured
    pub fn destination(&self) -> String {
        self.inner.lock().destination.clone()
    }

    /// Whether the relay is eligible to start
    pub fn is_enabled(&self) -> bool {
        self.inner.lock().enabled
    }

    /// Whether an encoder process is currently being fed
    pub fn is_running(&self) -> bool {
        self.inner.lock().encoder.is_some()
    }

    /// Whether a destination has been configured
    pub fn is_configured(&self) -> bool {
        !self.inner.lock().destination.is_empty()
    }

    /// Current lifecycle state
    pub fn state(&self) -> RelayState {
        self.status().state()
    }

    /// Snapshot for status queries from the control surface
    pub fn status(&self) -> StreamStatus {
        let inner = self.inner.lock();
        StreamStatus {
            destination: inner.destination.clone(),
            enabled: inner.enabled,
            running: inner.encoder.is_some(),
        }
    }
}

impl Default for StreamRelay {
    fn default() -> Self {
        Self::new()
    }
}
