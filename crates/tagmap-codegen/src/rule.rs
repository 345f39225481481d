//! Choice of the synthesis strategy for one field pair.
//!
//! Precedence, first match wins:
//!
//! 1. Same type on both sides: [`Rule::DirectAssignment`], or
//!    [`Rule::NilGuardRequired`] when an optional source feeds a required
//!    destination.
//! 2. A converter is registered for the pair: one of the converter rules,
//!    depending on the optionality of both fields and of the converter's
//!    declared signature.
//! 3. Both sides are collections: [`Rule::CollectionMapping`], recursing on
//!    the element types.


use core::fmt::{self, Display};

use tagmap_model::{ConverterFunction, TypeDescriptor};

use crate::registry::ConverterRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Identical types; optionality bridged by address-of.
    DirectAssignment,
    /// The converter call is the assigned value.
    ConverterCall,
    /// The converter result is bound first and its address assigned.
    ConverterCallThenAddress,
    /// Optional to optional through a converter taking a value: nil passes
    /// through, anything else is converted.
    OptionalToOptionalConversion,
    /// Identical types, optional source, required destination: the routine
    /// fails when the source is nil.
    NilGuardRequired,
    /// Fallible converter: bind value and error, fail on error.
    ConverterCallWithError,
    /// Element-wise conversion with the contained per-element rule.
    CollectionMapping(Box<Rule>),
}

impl Rule {
    /// The rule applied to the innermost, non-collection elements.
    pub fn leaf(&self) -> &Rule {
        match self {
            Rule::CollectionMapping(element) => element.leaf(),
            rule => rule,
        }
    }

    /// How many collection levels wrap the leaf rule.
    pub fn depth(&self) -> usize {
        match self {
            Rule::CollectionMapping(element) => 1 + element.depth(),
            _ => 0,
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::DirectAssignment => write!(f, "DirectAssignment"),
            Rule::ConverterCall => write!(f, "ConverterCall"),
            Rule::ConverterCallThenAddress => write!(f, "ConverterCallThenAddress"),
            Rule::OptionalToOptionalConversion => write!(f, "OptionalToOptionalConversion"),
            Rule::NilGuardRequired => write!(f, "NilGuardRequired"),
            Rule::ConverterCallWithError => write!(f, "ConverterCallWithError"),
            Rule::CollectionMapping(element) => write!(f, "CollectionMapping<{element}>"),
        }
    }
}

/// A selected rule together with the converter its leaf calls, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'r> {
    pub rule: Rule,
    pub converter: Option<&'r ConverterFunction>,
}

/// Why no rule applies to a type pair.
#[derive(Debug, Clone, PartialEq)]
pub enum NoRule {
    /// The types differ and nothing is registered for these (element) types.
    MissingConverter {
        source: TypeDescriptor,
        dest: TypeDescriptor,
    },
    /// The shapes cannot be bridged by any rule.
    Undefined,
}

#[derive(Debug, Clone, Copy)]
pub struct RuleSelector<'r> {
    registry: &'r ConverterRegistry,
}

impl<'r> RuleSelector<'r> {
    pub fn new(registry: &'r ConverterRegistry) -> Self {
        Self { registry }
    }

    pub fn select(
        &self,
        source: &TypeDescriptor,
        dest: &TypeDescriptor,
    ) -> Result<Selection<'r>, NoRule> {
        let converter = self.registry.resolve(source, dest);
        if let Some(rule) = select_rule(source, dest, converter)? {
            let converter = match rule {
                Rule::DirectAssignment | Rule::NilGuardRequired => None,
                _ => converter,
            };
            return Ok(Selection { rule, converter });
        }

        match (source.element_type(), dest.element_type()) {
            (Some(_), Some(_)) if source.optional => Err(NoRule::Undefined),
            (Some(source_element), Some(dest_element)) => {
                let element = self.select(source_element, dest_element)?;
                Ok(Selection {
                    rule: Rule::CollectionMapping(Box::new(element.rule)),
                    converter: element.converter,
                })
            }
            (None, None) => Err(NoRule::MissingConverter {
                source: source.clone(),
                dest: dest.clone(),
            }),
            _ => Err(NoRule::Undefined),
        }
    }
}

/// Picks a rule from the types and the converter resolved for them.
///
/// `Ok(None)` means neither identity nor a converter applies and the caller
/// should try element-wise mapping.
pub fn select_rule(
    source: &TypeDescriptor,
    dest: &TypeDescriptor,
    converter: Option<&ConverterFunction>,
) -> Result<Option<Rule>, NoRule> {
    if source.same_type(dest) {
        return Ok(Some(if source.optional && !dest.optional {
            Rule::NilGuardRequired
        } else {
            Rule::DirectAssignment
        }));
    }
    match converter {
        Some(cf) => converter_rule(source, dest, cf).map(Some),
        None => Ok(None),
    }
}

fn converter_rule(
    source: &TypeDescriptor,
    dest: &TypeDescriptor,
    cf: &ConverterFunction,
) -> Result<Rule, NoRule> {
    // an optional result can't be stored in a required field
    if cf.dest.optional && !dest.optional {
        return Err(NoRule::Undefined);
    }
    if source.optional && !cf.source.optional && dest.optional {
        return Ok(Rule::OptionalToOptionalConversion);
    }
    if cf.returns_error {
        return Ok(Rule::ConverterCallWithError);
    }
    if dest.optional && !cf.dest.optional {
        return Ok(Rule::ConverterCallThenAddress);
    }
    Ok(Rule::ConverterCall)
}

/// Whether the field needs a nil precondition before its value is read.
pub fn requires_nil_guard(
    source: &TypeDescriptor,
    dest: &TypeDescriptor,
    converter: Option<&ConverterFunction>,
) -> bool {
    source.optional && !dest.optional && converter.is_none_or(|cf| !cf.source.optional)
}
