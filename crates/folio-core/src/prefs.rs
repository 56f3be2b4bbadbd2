use std::collections::HashMap;

/// Keys written to the preference store.
pub mod keys {
    pub const PROJECT_VIEW: &str = "projectView";
    pub const THEME: &str = "theme";
    pub const VISITOR_NAME: &str = "visitorName";
    pub const VISIT_COUNT: &str = "visitCount";
}

/// Key/value storage that survives across sessions.
///
/// Infallible at this boundary: a store that cannot persist logs and carries
/// on, and callers fall back to hardcoded defaults for absent keys.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

impl<P: PreferenceStore + ?Sized> PreferenceStore for &mut P {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls observed.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.writes += 1;
        self.values.insert(key.to_string(), value.to_string());
    }
}
