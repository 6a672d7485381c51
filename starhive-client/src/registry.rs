//! Decoder registry keyed by type id.

use crate::error::{ClientError, ClientResult};
use starhive_model::JsonDecoder;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Zero-argument factory producing a fresh decoder.
pub type DecoderFactory = Arc<dyn Fn() -> Box<dyn JsonDecoder> + Send + Sync>;

/// Maps type ids to decoder factories.
///
/// Populated by generated code and handed to the client at construction. It
/// has no default entries: a type id that was never registered fails at the
/// first read that needs it.
#[derive(Clone, Default)]
pub struct DecoderRegistry {
    factories: HashMap<String, DecoderFactory>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the factory for `type_id`.
    pub fn register<F>(&mut self, type_id: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn JsonDecoder> + Send + Sync + 'static,
    {
        self.factories.insert(type_id.into(), Arc::new(factory));
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with<F>(mut self, type_id: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn JsonDecoder> + Send + Sync + 'static,
    {
        self.register(type_id, factory);
        self
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.factories.contains_key(type_id)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Creates a fresh decoder for `type_id`.
    pub fn decoder_for(&self, type_id: &str) -> ClientResult<Box<dyn JsonDecoder>> {
        self.factories
            .get(type_id)
            .map(|factory| factory())
            .ok_or_else(|| ClientError::DecoderNotFound(type_id.to_string()))
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut type_ids: Vec<&String> = self.factories.keys().collect();
        type_ids.sort();
        f.debug_struct("DecoderRegistry")
            .field("type_ids", &type_ids)
            .finish()
    }
}
