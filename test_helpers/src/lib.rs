//! Shared test support for the flagbind workspace.

pub mod env {
    //! Scoped environment variable overrides.
    //!
    //! The process environment is global state, so every override takes a
    //! crate-wide lock and hands back a guard that undoes the change when
    //! it falls out of scope. Combine with `serial_test` when several
    //! tests in one binary touch the environment.
    //!
    //! ```
    //! use flagbind_test_helpers::env;
    //!
    //! let _port = env::set_var("APP_PORT", "8080");
    //! let _name = env::remove_var("APP_NAME");
    //! ```

    use std::ffi::{OsStr, OsString};
    use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

    static LOCK: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

    /// Undoes one environment override when dropped.
    #[must_use = "the override is reverted when the guard drops"]
    pub struct EnvVarGuard {
        key: String,
        saved: Option<OsString>,
    }

    /// Override `key` with `value` for the lifetime of the returned guard.
    pub fn set_var(key: &str, value: &str) -> EnvVarGuard {
        install(key, Some(value.as_ref()))
    }

    /// Unset `key` for the lifetime of the returned guard.
    pub fn remove_var(key: &str) -> EnvVarGuard {
        install(key, None)
    }

    fn install(key: &str, value: Option<&OsStr>) -> EnvVarGuard {
        let _held = lock();
        let saved = std::env::var_os(key);
        apply(key, value);
        EnvVarGuard {
            key: key.to_owned(),
            saved,
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            let _held = lock();
            apply(&self.key, self.saved.take().as_deref());
        }
    }

    fn apply(key: &str, value: Option<&OsStr>) {
        match value {
            Some(value) => unsafe { std::env::set_var(key, value) },
            None => unsafe { std::env::remove_var(key) },
        }
    }

    // A panicking test poisons the lock; keep serving the remaining tests.
    fn lock() -> MutexGuard<'static, ()> {
        LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
