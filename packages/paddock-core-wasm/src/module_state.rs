use lazy_static::lazy_static;
use parking_lot::ReentrantMutex;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

use crate::config::PaddockConfig;
use crate::ingest::ProjectSession;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestStats {
    pub uploads_accepted: usize,
    pub uploads_rejected: usize,
    pub projects_loaded: usize,
    pub paddocks_loaded: usize,
}

// Module state shared by all wasm exports
pub struct ModuleState {
    pub config: PaddockConfig,

    // Current grouped result plus pending toasts
    pub session: ProjectSession,

    // Stats
    pub uploads_accepted: usize,
    pub uploads_rejected: usize,
}

// Create a global static instance of the module state
lazy_static! {
    static ref MODULE_STATE: ReentrantMutex<RefCell<ModuleState>> =
        ReentrantMutex::new(RefCell::new(ModuleState::new()));
}

impl ModuleState {
    pub fn new() -> Self {
        ModuleState {
            config: PaddockConfig::default(),
            session: ProjectSession::new(),
            uploads_accepted: 0,
            uploads_rejected: 0,
        }
    }

    pub fn with_mut<F, R>(f: F) -> R
    where
        F: FnOnce(&mut ModuleState) -> R,
    {
        let guard = MODULE_STATE.lock();
        let mut borrow = guard.borrow_mut();
        f(&mut borrow)
    }

    pub fn with<F, R>(f: F) -> R
    where
        F: FnOnce(&ModuleState) -> R,
    {
        let guard = MODULE_STATE.lock();
        let borrow = guard.borrow();
        f(&borrow)
    }

    pub fn record_upload(&mut self, accepted: bool) {
        if accepted {
            self.uploads_accepted += 1;
        } else {
            self.uploads_rejected += 1;
        }
    }

    pub fn get_stats(&self) -> IngestStats {
        let current = self.session.current();
        IngestStats {
            uploads_accepted: self.uploads_accepted,
            uploads_rejected: self.uploads_rejected,
            projects_loaded: current.as_ref().map_or(0, |grouped| grouped.len()),
            paddocks_loaded: current.as_ref().map_or(0, |grouped| grouped.feature_count()),
        }
    }

    // Drop the loaded projects and reset stats; config is kept
    pub fn reset(&mut self) {
        self.session.clear();
        self.session.take_notifications();
        self.uploads_accepted = 0;
        self.uploads_rejected = 0;
    }
}

impl Default for ModuleState {
    fn default() -> Self {
        Self::new()
    }
}
