//! Record mapping routines generated from field correspondence tags.
//!
//! - [`model`] - records, fields, types and converter descriptors
//! - [`ir`] - the statement representation and its printers
//! - [`codegen`] - pairing, rule selection, synthesis and assembly

pub use tagmap_codegen as codegen;
pub use tagmap_ir as ir;
pub use tagmap_model as model;

pub use tagmap_codegen::{
    ConverterRegistry, GenerationConfig, GenerationError, GenerationResult, RegistryError,
    generate, generate_with_config,
};
pub use tagmap_ir::{GoPrinter, Printer};
