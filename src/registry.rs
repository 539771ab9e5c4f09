//! Layout registry.
//!
//! An explicit registry keyed by layout id, built once at application start
//! and passed by reference wherever components are created. Nothing here
//! touches global state.

use std::collections::HashMap;

use crate::lifecycle::Renderable;

type LayoutFactory = Box<dyn Fn() -> Box<dyn Renderable>>;

pub struct LayoutRegistry {
    factories: HashMap<String, LayoutFactory>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry pre-populated with the layouts shipped in this crate.
    pub fn with_builtin_layouts() -> Self {
        let mut registry = Self::new();
        registry.register(crate::layouts::classic::LAYOUT_ID, || {
            Box::new(crate::layouts::classic::ClassicLayout)
        });
        registry
    }

    pub fn register<F>(&mut self, id: &str, factory: F)
    where
        F: Fn() -> Box<dyn Renderable> + 'static,
    {
        self.factories.insert(id.to_string(), Box::new(factory));
    }

    /// Instantiate a fresh layout for the given id.
    pub fn create(&self, id: &str) -> Option<Box<dyn Renderable>> {
        self.factories.get(id).map(|factory| factory())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered layout ids, sorted for stable listings.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::with_builtin_layouts()
    }
}
