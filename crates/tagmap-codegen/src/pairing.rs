//! Alignment of source and destination fields by correspondence tag.


use indexmap::IndexMap;
use tagmap_model::{Field, RecordType};

use crate::config::GenerationConfig;
use crate::error::GenerationError;

/// A source field and the destination field it maps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPair<'a> {
    pub source: &'a Field,
    pub dest: &'a Field,
}

/// Pairs fields by the value of their primary tag, in destination order.
///
/// Only the first tag carrying the configured key is consulted on each side.
/// When several source fields share a tag value, the last one is paired.
/// Destination fields without a source counterpart are skipped.
pub fn pair_fields<'a>(
    source: &'a RecordType,
    dest: &'a RecordType,
    config: &GenerationConfig,
) -> Result<Vec<FieldPair<'a>>, GenerationError> {
    let mut by_tag: IndexMap<&str, &Field> = IndexMap::with_capacity(source.fields.len());
    for field in source.fields.iter() {
        let value = primary_tag(source, field, &config.source_tag)?;
        if let Some(shadowed) = by_tag.insert(value, field) {
            tracing::debug!(
                record = %source.name,
                tag = value,
                shadowed = %shadowed.name,
                field = %field.name,
                "source tag value repeated, later field wins"
            );
        }
    }

    let mut pairs = Vec::with_capacity(dest.fields.len());
    for field in dest.fields.iter() {
        let value = primary_tag(dest, field, &config.dest_tag)?;
        match by_tag.get(value) {
            Some(source_field) => pairs.push(FieldPair {
                source: *source_field,
                dest: field,
            }),
            None => {
                tracing::debug!(
                    record = %dest.name,
                    field = %field.name,
                    tag = value,
                    "no source field for destination field, skipping"
                );
            }
        }
    }
    Ok(pairs)
}

fn primary_tag<'a>(
    record: &RecordType,
    field: &'a Field,
    key: &str,
) -> Result<&'a str, GenerationError> {
    field.tag_value(key).ok_or_else(|| GenerationError::MissingTag {
        record: record.name.clone(),
        field: field.name.clone(),
        key: key.to_string(),
    })
}
