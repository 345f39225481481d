//! Generation of record mapping routines from correspondence tags.
//!
//! Given a source and a destination [`RecordType`] whose fields carry tags,
//! the generator pairs fields by tag value, selects a [`Rule`] for every
//! pair, synthesizes the statements the rule needs, and assembles them into
//! a [`GenerationResult`].
//!
//! # Example
//!
//! ```ignore
//! let registry = ConverterRegistry::build(converters)?;
//! let result = tagmap_codegen::generate(&from, &to, &home, &registry)?;
//! let source = result.render(&GoPrinter);
//! ```
//!
//! Generation is all-or-nothing: the first failure, scanning destination
//! fields in declaration order, is returned and nothing else is produced.

mod assemble;
mod config;
mod error;
mod pairing;
mod registry;
mod rule;
mod synth;

pub use assemble::{GenerationResult, assemble};
pub use config::GenerationConfig;
pub use error::{GenerationError, RegistryError};
pub use pairing::{FieldPair, pair_fields};
pub use registry::ConverterRegistry;
pub use rule::{NoRule, Rule, RuleSelector, Selection, requires_nil_guard, select_rule};
pub use synth::{FieldMapping, SynthContext, synthesize};

use tagmap_model::{Namespace, RecordType};

/// Generates the routine converting `source` into `dest` with the default
/// configuration.
pub fn generate(
    source: &RecordType,
    dest: &RecordType,
    home: &Namespace,
    registry: &ConverterRegistry,
) -> Result<GenerationResult, GenerationError> {
    generate_with_config(source, dest, home, registry, &GenerationConfig::default())
}

/// Generates the routine converting `source` into `dest`.
pub fn generate_with_config(
    source: &RecordType,
    dest: &RecordType,
    home: &Namespace,
    registry: &ConverterRegistry,
    config: &GenerationConfig,
) -> Result<GenerationResult, GenerationError> {
    let _span =
        tracing::debug_span!("generate", source = %source.name, dest = %dest.name).entered();

    let selector = RuleSelector::new(registry);
    let ctx = SynthContext {
        config,
        source_record: source,
        dest_record: dest,
    };
    let mut mappings = Vec::new();
    for pair in pair_fields(source, dest, config)? {
        let selection = selector
            .select(&pair.source.ty, &pair.dest.ty)
            .map_err(|no_rule| rule_error(no_rule, &pair, source, dest))?;
        mappings.push(synthesize(&selection, pair.source, pair.dest, &ctx)?);
    }

    Ok(assemble(source, dest, home, config, mappings))
}

fn rule_error(
    no_rule: NoRule,
    pair: &FieldPair<'_>,
    source: &RecordType,
    dest: &RecordType,
) -> GenerationError {
    let source_field = format!("{}.{}", source.name, pair.source.name);
    let dest_field = format!("{}.{}", dest.name, pair.dest.name);
    match no_rule {
        NoRule::MissingConverter {
            source: source_type,
            dest: dest_type,
        } => GenerationError::ConverterNotFound {
            source_field,
            dest_field,
            source_type: source_type.required().to_string(),
            dest_type: dest_type.required().to_string(),
        },
        NoRule::Undefined => GenerationError::UndefinedConversionRule {
            source_field,
            dest_field,
        },
    }
}
