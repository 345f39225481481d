//! Record types and their tagged fields.


use thisisplural::Plural;

use crate::namespace::Namespace;
use crate::types::TypeDescriptor;

/// A `key:"value"` pair attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Tags of a field in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Plural)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tags(pub Vec<Tag>);

impl Tags {
    /// Returns the first tag carrying `key`. Later tags with the same key are
    /// never consulted.
    pub fn primary(&self, key: &str) -> Option<&Tag> {
        self.0.iter().find(|tag| tag.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Tags,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            tags: Tags::default(),
        }
    }

    /// Appends a tag, keeping declaration order.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.0.push(Tag::new(key, value));
        self
    }

    /// Value of the primary tag under `key`, if any.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags.primary(key).map(|tag| tag.value.as_str())
    }
}

/// Fields of a record in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Plural)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fields(pub Vec<Field>);

/// A named aggregate of fields; the unit a routine maps between.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordType {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub namespace: Option<Namespace>,
    /// Whether the routine receives/returns this record by optional reference.
    #[cfg_attr(feature = "serde", serde(default))]
    pub optional: bool,
    pub fields: Fields,
}

impl RecordType {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            optional: false,
            fields: Fields(fields.into_iter().collect()),
        }
    }

    pub fn in_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn namespace_path(&self) -> Option<&str> {
        self.namespace.as_ref().map(|ns| ns.path.as_str())
    }

    /// Descriptor of this record as a type, carrying its optionality.
    pub fn type_descriptor(&self) -> TypeDescriptor {
        let ty = TypeDescriptor::record(self.name.clone(), self.fields.clone());
        let ty = match &self.namespace {
            Some(ns) => ty.in_namespace(ns.clone()),
            None => ty,
        };
        if self.optional { ty.optional() } else { ty }
    }
}
