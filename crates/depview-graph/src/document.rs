//! Analysis documents: a name and an applicability matcher bound to a payload.
//!
//! Property access is typed. The reserved key [`MATCHER_KEY`] always resolves
//! to the bound [`ModelMatcher`] and can never be written; every other key is
//! handed to the payload through [`DocumentPayload`], which decides its own
//! read and write policy.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{DependencyModel, ModelMatcher};
use crate::{Error, Result};

/// Reserved property key for a document's matcher.
pub const MATCHER_KEY: &str = "matcher";

/// A parsed property key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKey<'a> {
    /// The reserved matcher key.
    Matcher,
    /// Any other key, owned by the payload.
    Payload(&'a str),
}

impl<'a> PropertyKey<'a> {
    pub fn parse(key: &'a str) -> Self {
        if key == MATCHER_KEY {
            PropertyKey::Matcher
        } else {
            PropertyKey::Payload(key)
        }
    }
}

/// A property read from a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Property<'a, V> {
    Matcher(&'a Arc<ModelMatcher>),
    Payload(V),
}

/// Property policy of a document payload.
///
/// The defaults describe a payload with no properties that rejects every
/// write.
pub trait DocumentPayload {
    /// Value type of the payload's properties.
    type Value;

    fn property(&self, _key: &str) -> Option<Self::Value> {
        None
    }

    fn is_writable(&self, _key: &str) -> bool {
        false
    }

    fn set_property(&mut self, key: &str, _value: Self::Value) -> Result<()> {
        Err(Error::read_only(key))
    }
}

impl DocumentPayload for () {
    type Value = Value;
}

/// General-purpose payload: string keys mapped to JSON values, all writable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap(BTreeMap<String, Value>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl DocumentPayload for PropertyMap {
    type Value = Value;

    fn property(&self, key: &str) -> Option<Value> {
        self.0.get(key).cloned()
    }

    fn is_writable(&self, _key: &str) -> bool {
        true
    }

    fn set_property(&mut self, key: &str, value: Value) -> Result<()> {
        self.0.insert(key.to_string(), value);
        Ok(())
    }
}

/// Immutable binding of a name and a [`ModelMatcher`] to an analysis payload.
///
/// The name and matcher are fixed for the document's lifetime. The payload
/// may be mutated through [`payload_mut`](Self::payload_mut) or
/// [`set_property`](Self::set_property); its discipline is the payload
/// owner's concern.
#[derive(Debug, Clone)]
pub struct AnalysisDocument<T> {
    name: String,
    matcher: Arc<ModelMatcher>,
    payload: T,
}

impl<T: DocumentPayload> AnalysisDocument<T> {
    /// Bind `name`, `matcher` and `payload` in one step.
    ///
    /// Fails with a configuration error if the name is blank or if the
    /// payload tries to provide its own value for the reserved matcher key.
    pub fn new(
        name: impl Into<String>,
        matcher: impl Into<Arc<ModelMatcher>>,
        payload: T,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::Configuration(
                "analysis document name cannot be empty".to_string(),
            ));
        }
        if payload.property(MATCHER_KEY).is_some() {
            return Err(Error::Configuration(format!(
                "document '{name}' payload overrides reserved key '{MATCHER_KEY}'"
            )));
        }

        Ok(Self {
            name,
            matcher: matcher.into(),
            payload,
        })
    }

    /// Read a property. The reserved key yields the bound matcher itself.
    pub fn property(&self, key: &str) -> Option<Property<'_, T::Value>> {
        match PropertyKey::parse(key) {
            PropertyKey::Matcher => Some(Property::Matcher(&self.matcher)),
            PropertyKey::Payload(key) => self.payload.property(key).map(Property::Payload),
        }
    }

    pub fn is_writable(&self, key: &str) -> bool {
        match PropertyKey::parse(key) {
            PropertyKey::Matcher => false,
            PropertyKey::Payload(key) => self.payload.is_writable(key),
        }
    }

    /// Write a property.
    ///
    /// Writing the reserved matcher key is always rejected. Other keys follow
    /// the payload's policy.
    pub fn set_property(&mut self, key: &str, value: T::Value) -> Result<()> {
        match PropertyKey::parse(key) {
            PropertyKey::Matcher => Err(Error::read_only(MATCHER_KEY)),
            PropertyKey::Payload(key) => self.payload.set_property(key, value),
        }
    }
}

impl<T> AnalysisDocument<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The matcher bound at construction (same allocation every time).
    pub fn matcher(&self) -> &Arc<ModelMatcher> {
        &self.matcher
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Returns `true` iff this document applies to graphs built under `model`.
    pub fn for_model(&self, model: &DependencyModel) -> bool {
        self.matcher.for_model(model)
    }
}
