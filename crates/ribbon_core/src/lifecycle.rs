//! Mount-lifetime tokens
//!
//! Timers and animation callbacks can fire after the component that
//! scheduled them has been torn down. Every write path checks a shared
//! liveness flag first; once the owning [`MountGuard`] is dropped (or
//! `unmount()` is called) all outstanding callbacks become no-ops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cheap cloneable handle checked before each deferred write
#[derive(Clone, Debug)]
pub struct MountToken {
    alive: Arc<AtomicBool>,
}

impl MountToken {
    /// Whether the owning component is still mounted
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

/// Owner side of the liveness flag
///
/// Held by the carousel for its mounted lifetime. Dropping the guard
/// revokes every token handed out, so a forgotten `unmount()` still
/// cannot leave dangling callbacks armed.
#[derive(Debug)]
pub struct MountGuard {
    alive: Arc<AtomicBool>,
}

impl MountGuard {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Hand out a token for a timer or animation callback
    pub fn token(&self) -> MountToken {
        MountToken {
            alive: Arc::clone(&self.alive),
        }
    }

    /// Whether the component is still mounted
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Explicitly revoke all tokens
    pub fn unmount(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_tracks_guard() {
        let guard = MountGuard::new();
        let token = guard.token();
        assert!(token.is_alive());

        guard.unmount();
        assert!(!token.is_alive());
        assert!(!guard.is_alive());
    }

    #[test]
    fn test_drop_revokes_tokens() {
        let guard = MountGuard::new();
        let token = guard.token();
        drop(guard);
        assert!(!token.is_alive());
    }

    #[test]
    fn test_tokens_share_one_flag() {
        let guard = MountGuard::new();
        let a = guard.token();
        let b = a.clone();
        guard.unmount();
        assert!(!a.is_alive());
        assert!(!b.is_alive());
    }
}
