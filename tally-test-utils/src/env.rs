//! Environment variable management for testing
//!
//! Tests in one binary run on parallel threads but share a single process
//! environment, so every guard holds a global lock for its whole lifetime and
//! puts the original values back when dropped.

use std::collections::HashMap;
use std::env;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Snapshot of a set of environment variables, restored on drop
pub struct EnvVarGuard {
  /// The original values, `None` when the variable was unset
  original: HashMap<String, Option<String>>,
  _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
  /// Lock the environment and remember the current values of `keys`.
  ///
  /// Only one guard may be alive per thread; take all the keys a test needs
  /// in a single call.
  pub fn new(keys: &[&str]) -> Self {
    // A panicking test poisons the lock; the data it protects is still fine
    let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let original = keys
      .iter()
      .map(|key| (key.to_string(), env::var(key).ok()))
      .collect();

    Self { original, _lock: lock }
  }

  /// Set a guarded variable
  pub fn set(&self, key: &str, value: &str) {
    debug_assert!(self.original.contains_key(key), "{key} is not guarded");
    unsafe {
      env::set_var(key, value);
    }
  }

  /// Remove a guarded variable
  pub fn remove(&self, key: &str) {
    debug_assert!(self.original.contains_key(key), "{key} is not guarded");
    unsafe {
      env::remove_var(key);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    for (key, value) in &self.original {
      match value {
        Some(val) => unsafe {
          env::set_var(key, val);
        },
        None => unsafe {
          env::remove_var(key);
        },
      }
    }
  }
}
