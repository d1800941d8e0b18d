//! Background asset loading.
//!
//! Each request decodes on its own worker thread and reports back through a
//! channel. The main thread drains the channel once per frame, so scene state
//! is only ever touched from the render loop. A failed load is logged and the
//! scene carries on without that asset.

mod hdr;
mod model;

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

pub use hdr::{linear_to_srgb, load_equirect, EnvironmentMap};
pub use model::{load_model, ModelMesh, ModelVertex};

/// A finished load
pub enum AssetEvent {
    EnvironmentMap(EnvironmentMap),
    Model(ModelMesh),
}

/// Fire-and-forget loader for the environment map and the prop model
pub struct AssetLoader {
    sender: Sender<anyhow::Result<AssetEvent>>,
    receiver: Receiver<anyhow::Result<AssetEvent>>,
    pending: usize,
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLoader {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            pending: 0,
        }
    }

    /// Number of loads that have not reported yet
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Start decoding an equirectangular environment map
    pub fn request_environment_map(&mut self, path: PathBuf) {
        self.spawn("env-map", move || {
            load_equirect(&path)
                .map(AssetEvent::EnvironmentMap)
                .map_err(|e| e.context(format!("environment map {} unavailable", path.display())))
        });
    }

    /// Start importing a glTF model
    pub fn request_model(&mut self, path: PathBuf) {
        self.spawn("model", move || {
            load_model(&path)
                .map(AssetEvent::Model)
                .map_err(|e| e.context(format!("model {} unavailable", path.display())))
        });
    }

    fn spawn<F>(&mut self, name: &str, job: F)
    where
        F: FnOnce() -> anyhow::Result<AssetEvent> + Send + 'static,
    {
        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name(format!("asset-{}", name))
            .spawn(move || {
                // The receiver is gone if the app already exited
                let _ = sender.send(job());
            });

        match spawned {
            Ok(_) => self.pending += 1,
            Err(e) => log::warn!("could not start {} loader thread: {}", name, e),
        }
    }

    /// Drain finished loads (never blocks). Failures are logged and dropped.
    pub fn poll(&mut self) -> Vec<AssetEvent> {
        let mut events = Vec::new();
        for result in self.receiver.try_iter() {
            self.pending = self.pending.saturating_sub(1);
            match result {
                Ok(event) => events.push(event),
                Err(e) => log::warn!("{:#}", e),
            }
        }
        events
    }
}
