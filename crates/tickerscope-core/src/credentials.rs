use std::fmt::{Debug, Formatter};
use std::sync::Mutex;

use crate::{ConfigError, QueryError};

/// Ordered API keys plus the rotation cursor and the attempt counter.
///
/// The ceiling is `size() * calls_per_key()` attempts over the pool's
/// lifetime; the counter is never reset.
pub struct CredentialPool {
    keys: Vec<String>,
    calls_per_key: u32,
    state: Mutex<RotationState>,
}

#[derive(Debug, Default)]
struct RotationState {
    current_index: usize,
    total_attempts: u64,
}

/// One admitted attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    /// 1-based, counted across the pool's lifetime.
    pub number: u64,
    pub credential_index: usize,
}

impl CredentialPool {
    pub fn new(keys: Vec<String>, calls_per_key: u32) -> Result<Self, ConfigError> {
        if keys.is_empty() {
            return Err(ConfigError::EmptyCredentialPool);
        }
        if let Some(index) = keys.iter().position(|key| key.trim().is_empty()) {
            return Err(ConfigError::BlankCredential { index });
        }
        if calls_per_key == 0 {
            return Err(ConfigError::ZeroCallLimit);
        }

        Ok(Self {
            keys: keys.into_iter().map(|key| key.trim().to_owned()).collect(),
            calls_per_key,
            state: Mutex::new(RotationState::default()),
        })
    }

    pub fn size(&self) -> usize {
        self.keys.len()
    }

    pub const fn calls_per_key(&self) -> u32 {
        self.calls_per_key
    }

    pub fn attempt_ceiling(&self) -> u64 {
        self.keys.len() as u64 * u64::from(self.calls_per_key)
    }

    pub fn key(&self, index: usize) -> &str {
        &self.keys[index % self.keys.len()]
    }

    pub fn current_index(&self) -> usize {
        self.lock().current_index
    }

    pub fn total_attempts(&self) -> u64 {
        self.lock().total_attempts
    }

    /// Counts one attempt and admits it unless the ceiling is exceeded.
    pub fn begin_attempt(&self) -> Result<Attempt, QueryError> {
        let ceiling = self.attempt_ceiling();
        let mut state = self.lock();
        state.total_attempts = state.total_attempts.saturating_add(1);

        if state.total_attempts > ceiling {
            return Err(QueryError::QuotaExceeded {
                attempts: state.total_attempts,
                ceiling,
            });
        }

        Ok(Attempt {
            number: state.total_attempts,
            credential_index: state.current_index,
        })
    }

    /// Advances the cursor to the next credential and returns its index.
    pub fn rotate(&self) -> usize {
        let size = self.keys.len();
        let mut state = self.lock();
        state.current_index = (state.current_index + 1) % size;
        state.current_index
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RotationState> {
        self.state
            .lock()
            .expect("credential rotation lock is not poisoned")
    }
}

impl Debug for CredentialPool {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPool")
            .field("size", &self.keys.len())
            .field("calls_per_key", &self.calls_per_key)
            .field("state", &self.state)
            .finish()
    }
}
