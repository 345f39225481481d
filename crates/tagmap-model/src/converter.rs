//! Converter function descriptors.

use crate::namespace::Namespace;
use crate::types::{TypeDescriptor, TypeKey};

/// Which type arguments a generic converter is instantiated with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeParamArity {
    /// Not generic.
    #[default]
    None,
    /// Instantiated with the destination element type only.
    DestOnly,
    /// Instantiated with the source element type, then the destination.
    SourceAndDest,
}

/// A user or library function converting one element type into another.
///
/// ```ignore
/// let cf = ConverterFunction::builder()
///     .name("ParseInt")
///     .namespace(Namespace::from_path("example.com/converts"))
///     .source(TypeDescriptor::scalar("string"))
///     .dest(TypeDescriptor::scalar("int"))
///     .returns_error(true)
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, bon::Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConverterFunction {
    /// Namespace declaring the function. `None` when it lives next to the
    /// generated routine.
    #[cfg_attr(feature = "serde", serde(default))]
    pub namespace: Option<Namespace>,
    #[builder(into)]
    pub name: String,
    /// Declared parameter type, including its optionality.
    pub source: TypeDescriptor,
    /// Declared return type, including its optionality.
    pub dest: TypeDescriptor,
    /// Whether the function also returns an error.
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub returns_error: bool,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub type_params: TypeParamArity,
}

impl ConverterFunction {
    /// The registry key: both sides with optionality erased.
    pub fn key(&self) -> (TypeKey, TypeKey) {
        (self.source.key(), self.dest.key())
    }

    /// `ns.Name`, or just `Name` for local functions.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns.name, self.name),
            None => self.name.clone(),
        }
    }
}
