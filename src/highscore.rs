//! Best-score persistence
//!
//! The session controller talks to storage only through `HighScoreStore`.
//! Implementations degrade gracefully: a failed read is a 0, a failed write
//! is dropped with a warning. Gameplay never blocks on storage.

/// Persistence collaborator for the single best score
pub trait HighScoreStore {
    /// Best score from a previous session; 0 when absent or unreadable
    fn load(&self) -> u32;
    /// Record a new best score
    fn save(&mut self, score: u32);
}

/// Keeps the best score for the lifetime of the process only
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    best: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn save(&mut self, score: u32) {
        self.best = score;
    }
}

/// Browser LocalStorage, same key the game has always used
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "snake-high-score";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> u32 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, best score starts at 0");
            return 0;
        };
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    fn save(&mut self, score: u32) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, best score not persisted");
            return;
        };
        if storage.set_item(Self::STORAGE_KEY, &score.to_string()).is_err() {
            log::warn!("failed to persist best score");
        }
    }
}
