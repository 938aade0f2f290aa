use std::collections::BTreeSet;
use std::fmt;

/// Stable name of a feature module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey(pub &'static str);

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One-way init flags, one per module. A set flag is never cleared.
#[derive(Debug, Clone, Default)]
pub struct InitRegistry {
    flags: BTreeSet<ModuleKey>,
}

impl InitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag for `key`; returns `false` if it was already set.
    pub fn mark(&mut self, key: ModuleKey) -> bool {
        self.flags.insert(key)
    }

    /// Runs `setup` only the first time `key` is seen.
    pub fn ensure_init<R>(&mut self, key: ModuleKey, setup: impl FnOnce() -> R) -> Option<R> {
        if !self.mark(key) {
            return None;
        }
        Some(setup())
    }

    pub fn is_initialized(&self, key: ModuleKey) -> bool {
        self.flags.contains(&key)
    }

    pub fn initialized(&self) -> impl Iterator<Item = ModuleKey> + '_ {
        self.flags.iter().copied()
    }
}
