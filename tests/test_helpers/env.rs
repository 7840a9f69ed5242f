//! Scoped environment variable updates for configuration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Every variable the server configuration reads.
pub const SERVER_ENV_VARS: [&str; 5] = [
    "TODO_PORT",
    "TODO_DBFILE",
    "TODO_LIST_LIMIT",
    "TODO_POOL_SIZE",
    "TODO_LOG",
];

/// Guard that applies a scoped environment update and restores it on drop.
///
/// Holds a process-wide lock so tests touching the environment never
/// interleave.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets (`Some`) or removes (`None`) each variable for the guard lifetime.
    pub fn set_many(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = env_lock();
        let previous = changes
            .iter()
            .map(|(key, value)| {
                let saved = (OsString::from(key), env::var_os(key));
                apply(key, *value);
                saved
            })
            .collect();

        Self {
            previous,
            _lock: lock,
        }
    }

    /// Removes every server variable, then applies `changes`.
    pub fn server(changes: &[(&str, Option<&str>)]) -> Self {
        let mut all: Vec<(&str, Option<&str>)> =
            SERVER_ENV_VARS.iter().map(|key| (*key, None)).collect();
        all.extend_from_slice(changes);
        Self::set_many(&all)
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // Restore in reverse so repeated keys end at their original value.
        for (key, value) in self.previous.drain(..).rev() {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, &previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}

fn apply(key: &str, value: Option<&str>) {
    unsafe {
        // SAFETY: callers hold the global environment mutex.
        match value {
            Some(new_value) => env::set_var(key, new_value),
            None => env::remove_var(key),
        }
    }
}

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
