//! Data model for tag-driven record mapping.
//!
//! These types describe what the metadata extraction collaborator hands to
//! the generator: record types with ordered, tagged fields, the type
//! descriptors of those fields, and the converter functions available for a
//! run. Everything here is plain immutable data.
//!
//! # Types
//!
//! - [`Namespace`] - Import path plus the short name used to qualify symbols
//! - [`TypeDescriptor`] / [`TypeShape`] - Field types (scalar, collection, record)
//! - [`TypeKey`] - Optionality-free identity of a type, used for registry lookups
//! - [`RecordType`], [`Field`], [`Tag`] - The records being mapped
//! - [`ConverterFunction`] / [`TypeParamArity`] - Element-level converters
//!
//! # Features
//!
//! - `serde` - Derive `Serialize`/`Deserialize` for every model type

mod converter;
mod namespace;
mod record;
mod types;

pub use converter::*;
pub use namespace::*;
pub use record::*;
pub use types::*;
