use std::collections::BTreeMap;
use std::fmt;

/// Key/value configuration collaborator the gains are read from and written to.
pub trait ConfigStore {
    fn get_double(&self, key: &str, default: f64) -> f64;

    /// Store a value and notify observers.
    fn put(&mut self, key: &str, value: f64);
}

type Observer = Box<dyn FnMut(&str, f64)>;

/// Map-backed store with change observers, fired after every `put`.
#[derive(Default)]
pub struct MemoryStore {
    values: BTreeMap<String, f64>,
    observers: Vec<Observer>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_change(&mut self, observer: impl FnMut(&str, f64) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl ConfigStore for MemoryStore {
    fn get_double(&self, key: &str, default: f64) -> f64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn put(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), value);
        for observer in &mut self.observers {
            observer(key, value);
        }
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("values", &self.values)
            .field("observers", &self.observers.len())
            .finish()
    }
}
