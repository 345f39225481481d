//! Assembly of field mappings into one conversion routine.


use std::collections::BTreeSet;

use convert_case::{Case, Casing};
use tagmap_ir::{Condition, Expr, Param, Printer, Routine, Stmt};
use tagmap_model::{Namespace, RecordType, TypeDescriptor};

use crate::config::GenerationConfig;
use crate::synth::FieldMapping;

/// The complete output of mapping one source record into one destination
/// record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub routine_name: String,
    /// Namespace the routine is declared in.
    pub home: Namespace,
    pub source_record: TypeDescriptor,
    pub dest_record: TypeDescriptor,
    pub source_tag: String,
    pub dest_tag: String,
    pub source_param: String,
    /// Record-level nil check, run before any field is read.
    pub record_guard: Vec<Stmt>,
    /// One mapping per paired field, in destination declaration order.
    pub field_mappings: Vec<FieldMapping>,
    /// Sorted by path, never containing `home`.
    pub imports: Vec<Namespace>,
    pub returns_error: bool,
}

impl GenerationResult {
    /// Lowers the result into a routine ready for a [`Printer`].
    pub fn to_routine(&self) -> Routine {
        let mut body = self.record_guard.clone();
        for mapping in &self.field_mappings {
            body.extend(mapping.statements.iter().cloned());
        }
        let fields = self
            .field_mappings
            .iter()
            .map(|mapping| (mapping.dest_field.clone(), mapping.assignment.clone()))
            .collect();

        Routine {
            name: self.routine_name.clone(),
            home: Some(self.home.clone()),
            doc: Some(format!(
                "{} convert {} by tag {} to {} by tag {}",
                self.routine_name,
                self.source_record.name,
                self.source_tag,
                self.dest_record.name,
                self.dest_tag
            )),
            param: Param {
                name: self.source_param.clone(),
                ty: self.source_record.clone(),
            },
            returns: self.dest_record.clone(),
            returns_error: self.returns_error,
            body,
            result: Expr::Construct {
                ty: self.dest_record.clone(),
                fields,
            },
        }
    }

    /// Renders the import block followed by the routine.
    pub fn render(&self, printer: &impl Printer) -> String {
        let imports = printer.print_imports(&self.imports);
        let routine = printer.print_routine(&self.to_routine());
        if imports.is_empty() {
            routine
        } else {
            format!("{imports}\n{routine}")
        }
    }
}

/// Builds the result from already synthesized field mappings.
pub fn assemble(
    source: &RecordType,
    dest: &RecordType,
    home: &Namespace,
    config: &GenerationConfig,
    field_mappings: Vec<FieldMapping>,
) -> GenerationResult {
    let mut imports = BTreeSet::new();
    for ns in [&source.namespace, &dest.namespace].into_iter().flatten() {
        imports.insert(ns.clone());
    }

    let record_guard = record_guard(source, dest, config, &mut imports);
    let mut returns_error = source.optional && !dest.optional;
    for mapping in &field_mappings {
        returns_error |= mapping.returns_error;
        imports.extend(mapping.imports.iter().cloned());
    }

    let imports: Vec<Namespace> = imports
        .into_iter()
        .filter(|ns| ns.path != home.path)
        .collect();

    let routine_name = format!(
        "Convert{}To{}",
        qualified_record_name(source, home),
        qualified_record_name(dest, home)
    );
    tracing::debug!(
        routine = %routine_name,
        fields = field_mappings.len(),
        imports = imports.len(),
        returns_error,
        "assembled routine"
    );

    GenerationResult {
        routine_name,
        home: home.clone(),
        source_record: source.type_descriptor(),
        dest_record: dest.type_descriptor(),
        source_tag: config.source_tag.clone(),
        dest_tag: config.dest_tag.clone(),
        source_param: config.source_param.clone(),
        record_guard,
        field_mappings,
        imports,
        returns_error,
    }
}

fn record_guard(
    source: &RecordType,
    dest: &RecordType,
    config: &GenerationConfig,
    imports: &mut BTreeSet<Namespace>,
) -> Vec<Stmt> {
    if !source.optional {
        return Vec::new();
    }
    let then = if dest.optional {
        Stmt::ReturnZero
    } else {
        imports.insert(config.errors_namespace.clone());
        Stmt::Fail(Expr::NewError {
            namespace: config.errors_namespace.clone(),
            message: format!("{} is nil", source.name),
        })
    };
    vec![Stmt::If {
        condition: Condition::IsNil(Expr::var(&config.source_param)),
        then: vec![then],
    }]
}

/// `Name`, or `NsName` when the record lives outside `home`.
fn qualified_record_name(record: &RecordType, home: &Namespace) -> String {
    match &record.namespace {
        Some(ns) if ns.path != home.path => {
            format!("{}{}", ns.name.to_case(Case::Pascal), record.name)
        }
        _ => record.name.clone(),
    }
}
