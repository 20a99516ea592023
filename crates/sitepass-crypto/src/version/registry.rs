//! Version lookup: explicit registration table instead of discovery.

use super::{Aleph, Alpha, Gamma, PasswordVersion};

pub type VersionFactory = Box<dyn Fn() -> Box<dyn PasswordVersion> + Send + Sync>;

struct Entry {
    name: String,
    factory: VersionFactory,
}

/// Maps version names to constructors.
///
/// Built-in entries are added once, in release order; `latest` is
/// pinned to that order and never moves when callers register
/// additional entries at runtime.
pub struct VersionRegistry {
    entries: Vec<Entry>,
    builtin_len: usize,
}

impl VersionRegistry {
    /// The registry with the built-in versions, oldest first.
    pub fn builtin() -> Self {
        let mut registry = Self {
            entries: Vec::new(),
            builtin_len: 0,
        };
        registry.push("ALPHA", Box::new(|| Box::new(Alpha)));
        registry.push("GAMMA", Box::new(|| Box::new(Gamma)));
        registry.push("ALEPH", Box::new(|| Box::new(Aleph)));
        registry.builtin_len = registry.entries.len();
        registry
    }

    fn push(&mut self, name: &str, factory: VersionFactory) {
        self.entries.push(Entry {
            name: name.to_string(),
            factory,
        });
    }

    /// Register an additional version at runtime. Built-in names cannot
    /// be shadowed: lookup always checks earlier entries first.
    pub fn register(&mut self, name: impl Into<String>, factory: VersionFactory) {
        self.entries.push(Entry {
            name: name.into(),
            factory,
        });
    }

    /// Look up a version by name, case-insensitively.
    ///
    /// Returns `None` for empty or unknown names; never panics or
    /// propagates an error.
    pub fn resolve(&self, name: &str) -> Option<Box<dyn PasswordVersion>> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .map(|entry| (entry.factory)())
    }

    /// The most recently released built-in version, used when the
    /// caller names no version.
    pub fn latest(&self) -> Box<dyn PasswordVersion> {
        let entry = &self.entries[self.builtin_len - 1];
        (entry.factory)()
    }

    /// Registered version names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}

impl Default for VersionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
