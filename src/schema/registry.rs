//! Schema registry for object classes parsed from a subschema subentry.
//!
//! The registry owns one record per object class and indexes it under every
//! alias the class declares. Lookups through different aliases therefore see
//! the same record, and inheritance queries follow `parent` links across it.

use super::types::ObjectClass;
use crate::error::{ValidationError, ValidationResult};

use log::{debug, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Registry of object classes indexed by every one of their names.
///
/// Built once during schema ingestion and read afterwards. There is no
/// removal; a reload builds a new registry.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    classes: Vec<ObjectClass>,
    by_name: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class under all of its names and return its slot.
    ///
    /// A name that was already registered is re-pointed to the new record.
    /// Registering a class whose names already resolve to a record with the
    /// same names replaces that record in place.
    pub fn register(&mut self, class: ObjectClass) -> usize {
        if let Some(&slot) = class.names.first().and_then(|name| self.by_name.get(name)) {
            if self.classes[slot].names == class.names {
                debug!("Replacing object class '{}'", class.primary_name());
                for name in &class.names {
                    self.by_name.insert(name.clone(), slot);
                }
                self.classes[slot] = class;
                return slot;
            }
        }

        let slot = self.classes.len();
        for name in &class.names {
            if self.by_name.insert(name.clone(), slot).is_some() {
                debug!("Object class name '{}' now refers to a newer definition", name);
            }
        }
        self.classes.push(class);
        slot
    }

    /// Look up a class by any of its names.
    pub fn get(&self, name: &str) -> Option<&ObjectClass> {
        self.by_name.get(name).map(|&slot| &self.classes[slot])
    }

    /// Mutable lookup. Changes are visible through every alias of the class.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ObjectClass> {
        let slot = *self.by_name.get(name)?;
        self.classes.get_mut(slot)
    }

    /// Whether `name` resolves to a class.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of distinct classes currently reachable by name.
    pub fn len(&self) -> usize {
        self.live_slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Distinct classes in registration order.
    pub fn classes(&self) -> Vec<&ObjectClass> {
        self.live_slots()
            .into_iter()
            .map(|slot| &self.classes[slot])
            .collect()
    }

    /// The MUST and MAY attributes a class declares itself, without inheritance.
    pub fn own_attributes(&self, name: &str) -> Option<(&[String], &[String])> {
        self.get(name)
            .map(|class| (class.must.as_slice(), class.may.as_slice()))
    }

    /// Every name of every class from `start` up to the root.
    ///
    /// All aliases of a class are listed in declaration order before moving
    /// on to its parent. The walk stops at the first name that does not
    /// resolve, so a dangling parent silently truncates the chain.
    pub fn inheritance_chain(&self, start: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = start;

        while let Some(&slot) = self.by_name.get(current) {
            if !visited.insert(slot) {
                warn!(
                    "Object class '{}' has a cyclic superclass chain at '{}'",
                    start, current
                );
                break;
            }
            let class = &self.classes[slot];
            chain.extend(class.names.iter().cloned());
            current = &class.parent;
        }

        dedup_preserving_order(chain)
    }

    /// Required and optional attributes of a class including inherited ones.
    ///
    /// Own attributes come first, followed by each ancestor's in chain order.
    /// Each list keeps only the first occurrence of an attribute name.
    pub fn aggregated_attributes(&self, name: &str) -> (Vec<String>, Vec<String>) {
        let mut must = Vec::new();
        let mut may = Vec::new();

        for class in self
            .inheritance_chain(name)
            .iter()
            .filter_map(|link| self.get(link))
        {
            must.extend(class.must.iter().cloned());
            may.extend(class.may.iter().cloned());
        }

        (dedup_preserving_order(must), dedup_preserving_order(may))
    }

    /// Check a directory entry's attribute names against its object classes.
    ///
    /// Every MUST attribute of every class (inherited ones included) has to be
    /// present and every present attribute has to be allowed by some class.
    /// Attribute names compare case-insensitively. `objectClass` itself is
    /// always allowed and satisfied by `object_classes`.
    pub fn validate_entry<C, A>(&self, object_classes: &[C], attributes: &[A]) -> ValidationResult<()>
    where
        C: AsRef<str>,
        A: AsRef<str>,
    {
        if object_classes.is_empty() {
            return Err(ValidationError::MissingObjectClass);
        }

        let mut required = Vec::new();
        let mut allowed = BTreeSet::new();
        for object_class in object_classes {
            let object_class = object_class.as_ref();
            if !self.contains(object_class) {
                return Err(ValidationError::unknown_object_class(object_class));
            }
            let (must, may) = self.aggregated_attributes(object_class);
            allowed.extend(must.iter().chain(may.iter()).map(|a| a.to_ascii_lowercase()));
            required.extend(must);
        }

        let present: HashSet<String> = attributes
            .iter()
            .map(|a| a.as_ref().to_ascii_lowercase())
            .collect();

        for attribute in dedup_preserving_order(required) {
            if attribute.is_empty() || attribute.eq_ignore_ascii_case(OBJECT_CLASS) {
                continue;
            }
            if !present.contains(&attribute.to_ascii_lowercase()) {
                return Err(ValidationError::missing_required(attribute));
            }
        }

        for attribute in attributes {
            let attribute = attribute.as_ref();
            if attribute.eq_ignore_ascii_case(OBJECT_CLASS) {
                continue;
            }
            if !allowed.contains(&attribute.to_ascii_lowercase()) {
                return Err(ValidationError::UnknownAttribute {
                    attribute: attribute.to_string(),
                    object_classes: object_classes
                        .iter()
                        .map(|c| c.as_ref().to_string())
                        .collect(),
                });
            }
        }

        Ok(())
    }

    /// Export the registry as a JSON object keyed by class name.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn live_slots(&self) -> Vec<usize> {
        let slots: BTreeSet<usize> = self.by_name.values().copied().collect();
        slots.into_iter().collect()
    }
}

const OBJECT_CLASS: &str = "objectClass";

// Serialized as { name: class, ... } with one entry per alias, sorted by name.
impl Serialize for SchemaRegistry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let names = self.names();
        let mut map = serializer.serialize_map(Some(names.len()))?;
        for name in names {
            if let Some(class) = self.get(name) {
                map.serialize_entry(name, class)?;
            }
        }
        map.end()
    }
}

/// Remove repeated values, keeping the first occurrence of each.
pub fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
