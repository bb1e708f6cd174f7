//! Shared host state.
//!
//! `CoreState` owns the one `Portal` behind a `Mutex`, so each HTTP request
//! runs as a single synchronous turn against it, plus the narration queue the
//! portal speaks into. A turn's effects (views, notices, narration) are
//! drained while the lock is still held so they never interleave.

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::config::{self, PortalConfig};
use crate::portal::{Capabilities, Portal};
use crate::render::Notice;
use crate::speech::{ClientRecognizer, NarrationQueue, Recognizer, Utterance};
use crate::store::{KeyedStore, MemorySlots, SqliteSlots, StoreError};
use crate::views::View;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Portal lock poisoned")]
    LockPoisoned,
    #[error("Storage unavailable: {0}")]
    Storage(#[from] StoreError),
}

/// Everything one turn produced for the client.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Effects {
    pub views: Vec<View>,
    pub notices: Vec<Notice>,
    pub spoken: Vec<Utterance>,
}

pub struct CoreState {
    portal: Mutex<Portal>,
    narration: NarrationQueue,
    pub config: PortalConfig,
}

impl CoreState {
    /// Open the slot database under the configured data directory.
    pub fn open(config: PortalConfig) -> Result<Self, CoreError> {
        let path = config::storage_path(&config.data_dir);
        let slots = SqliteSlots::open(&path)?;
        tracing::info!(path = %path.display(), "Slot storage opened");
        let store = KeyedStore::new(Box::new(slots), config.slot_prefix.clone());
        Ok(Self::with_store(store, config))
    }

    /// Volatile state over in-memory slots.
    pub fn in_memory(config: PortalConfig) -> Self {
        let store = KeyedStore::new(Box::new(MemorySlots::new()), config.slot_prefix.clone());
        Self::with_store(store, config)
    }

    pub fn with_store(store: KeyedStore, config: PortalConfig) -> Self {
        let narration = NarrationQueue::new();
        let recognizer: Option<Box<dyn Recognizer>> = if config.voice_enabled {
            Some(Box::new(ClientRecognizer))
        } else {
            None
        };
        let caps = Capabilities {
            speaker: Some(Box::new(narration.clone())),
            recognizer,
        };
        Self {
            portal: Mutex::new(Portal::buffered(store, caps)),
            narration,
            config,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Portal>, CoreError> {
        self.portal.lock().map_err(|_| CoreError::LockPoisoned)
    }

    /// Run one user action and collect its effects.
    pub fn act<R>(&self, f: impl FnOnce(&mut Portal) -> R) -> Result<(R, Effects), CoreError> {
        let mut portal = self.lock()?;
        let result = f(&mut portal);
        let outbox = portal.take_outbox();
        let effects = Effects {
            views: outbox.views,
            notices: outbox.notices,
            spoken: self.narration.drain(),
        };
        Ok((result, effects))
    }

    /// Read-only access; produces no effects.
    pub fn read<R>(&self, f: impl FnOnce(&Portal) -> R) -> Result<R, CoreError> {
        let portal = self.lock()?;
        Ok(f(&portal))
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> PortalConfig {
    PortalConfig::from_lookup(|_| None).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::Form;
    use crate::speech::STATUS_UNSUPPORTED;

    #[test]
    fn act_collects_views_and_narration() {
        let core = CoreState::in_memory(test_config());
        let (_, effects) = core
            .act(|p| {
                let mut form = Form::review();
                form.fill([("hospital", "City"), ("rating", "4")]);
                p.submit_review(&mut form);
            })
            .unwrap();
        assert_eq!(effects.views.len(), 1);
        assert_eq!(effects.spoken.len(), 1);
        assert_eq!(effects.spoken[0].text, "Thanks for your review.");

        // Effects are drained per turn
        let (_, next) = core.act(|_| ()).unwrap();
        assert_eq!(next, Effects::default());
    }

    #[test]
    fn voice_off_reports_unsupported() {
        let mut config = test_config();
        config.voice_enabled = false;
        let core = CoreState::in_memory(config);
        let label = core.read(|p| p.voice_status().label()).unwrap();
        assert_eq!(label, STATUS_UNSUPPORTED);
    }

    #[test]
    fn open_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config();
        config.data_dir = dir.path().to_path_buf();

        let core = CoreState::open(config.clone()).unwrap();
        let mut form = Form::delivery();
        form.fill([("medicine", "Aspirin"), ("qty", "2"), ("address", "Home")]);
        core.act(|p| p.add_to_cart(&mut form)).unwrap();
        drop(core);

        let reopened = CoreState::open(config).unwrap();
        let cart = reopened.read(|p| p.cart()).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].medicine, "Aspirin");
    }
}
