//! Lookup of converter functions by element type pair.


use indexmap::IndexMap;
use indexmap::map::Entry;
use tagmap_model::{ConverterFunction, TypeDescriptor, TypeKey};

use crate::error::RegistryError;

/// Read-only map from (source type, dest type) to the single converter
/// registered for that pair.
///
/// Keys ignore optionality on both sides; the rule selector handles
/// optionality. Built once per run and never mutated afterwards, so one
/// registry can be shared by any number of concurrent generations.
#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
    converters: IndexMap<(TypeKey, TypeKey), ConverterFunction>,
}

impl ConverterRegistry {
    /// Builds the registry, rejecting two converters for the same pair.
    pub fn build(
        functions: impl IntoIterator<Item = ConverterFunction>,
    ) -> Result<Self, RegistryError> {
        let mut converters = IndexMap::new();
        for function in functions {
            match converters.entry(function.key()) {
                Entry::Occupied(entry) => {
                    let existing: &ConverterFunction = entry.get();
                    return Err(RegistryError::AmbiguousConverter {
                        source_type: function.source.required().to_string(),
                        dest_type: function.dest.required().to_string(),
                        first: existing.qualified_name(),
                        second: function.qualified_name(),
                    });
                }
                Entry::Vacant(entry) => {
                    tracing::trace!(
                        converter = %function.qualified_name(),
                        source = %function.source,
                        dest = %function.dest,
                        "registered converter"
                    );
                    entry.insert(function);
                }
            }
        }
        Ok(Self { converters })
    }

    pub fn resolve(
        &self,
        source: &TypeDescriptor,
        dest: &TypeDescriptor,
    ) -> Option<&ConverterFunction> {
        self.converters.get(&(source.key(), dest.key()))
    }
}
