use thiserror::Error;

/// Failure while building a [`ConverterRegistry`](crate::ConverterRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("ambiguous converters for {source_type} -> {dest_type}: {first} and {second}")]
    AmbiguousConverter {
        source_type: String,
        dest_type: String,
        first: String,
        second: String,
    },
}

/// Failure while generating one routine. Generation is all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("field {record}.{field} has no `{key}` tag")]
    MissingTag {
        record: String,
        field: String,
        key: String,
    },

    #[error("no converter from {source_type} to {dest_type} for {source_field} -> {dest_field}")]
    ConverterNotFound {
        source_field: String,
        dest_field: String,
        source_type: String,
        dest_type: String,
    },

    #[error("undefined conversion rule from field {source_field} to field {dest_field}")]
    UndefinedConversionRule {
        source_field: String,
        dest_field: String,
    },
}
