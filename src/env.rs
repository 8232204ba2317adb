use std::collections::HashMap;
use std::env as stdenv;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Name of the variable holding the status of the last pipeline.
pub const STATUS_KEY: &str = "?";
/// Value of [`STATUS_KEY`] after a successful pipeline.
pub const STATUS_OK: &str = "0";
/// Value of [`STATUS_KEY`] after a failed pipeline.
pub const STATUS_FAILED: &str = "1";

/// A plain mapping from variable name to value.
///
/// Used both for the body of the [`GlobalEnvironment`] and for the variables
/// assigned in front of a single command (`x=1 y=2 cmd`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Set or override a variable.
    pub fn set(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Drop every variable.
    pub fn clear(&mut self) {
        self.vars.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// All variables as `name=value` strings, in no particular order.
    pub fn flatten(&self) -> Vec<String> {
        self.vars.iter().map(|(k, v)| format!("{k}={v}")).collect()
    }

    /// Union of `base` and `self`; entries of `self` win on collision.
    pub fn merged_over(&self, base: &Environment) -> Environment {
        let mut merged = base.clone();
        for (k, v) in self.iter() {
            merged.set(k, v);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Process-wide variable store shared by the tokenizer, the commands and the shell loop.
///
/// The map sits behind a [`RwLock`] so that a reference can be handed to every stage
/// of a running pipeline. Writers are the bare-assignment command and the shell loop
/// updating [`STATUS_KEY`]; both run one line at a time.
#[derive(Debug)]
pub struct GlobalEnvironment {
    inner: RwLock<Environment>,
}

impl GlobalEnvironment {
    /// A fresh store holding only `? = 0`.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set(STATUS_KEY, STATUS_OK);
        Self {
            inner: RwLock::new(env),
        }
    }

    /// Like [`GlobalEnvironment::new`], but also captures the variables of the current process.
    pub fn inherit() -> Self {
        let mut env: Environment = stdenv::vars().collect();
        env.set(STATUS_KEY, STATUS_OK);
        Self {
            inner: RwLock::new(env),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.read().get(key).map(str::to_owned)
    }

    pub fn set(&self, key: impl Into<String>, val: impl Into<String>) {
        self.write().set(key, val);
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn flatten(&self) -> Vec<String> {
        self.read().flatten()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Environment {
        self.read().clone()
    }

    /// Record the outcome of the last pipeline in [`STATUS_KEY`].
    pub fn set_status(&self, success: bool) {
        let status = if success { STATUS_OK } else { STATUS_FAILED };
        self.set(STATUS_KEY, status);
    }

    fn read(&self) -> RwLockReadGuard<'_, Environment> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Environment> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for GlobalEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
