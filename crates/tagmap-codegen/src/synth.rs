//! Statement synthesis for a selected rule.
//!
//! Synthesis is a pure function of the selection, the two fields and the
//! context. It produces the value assigned to the destination field, the
//! statements that must run before the assignment, and the namespaces those
//! statements reference.


use std::collections::BTreeSet;

use tagmap_ir::{Condition, Expr, Stmt, Symbol};
use tagmap_model::{
    ConverterFunction, Field, Namespace, RecordType, TypeDescriptor, TypeParamArity, TypeShape,
};

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::rule::{Rule, Selection, requires_nil_guard};

const ERROR_VAR: &str = "err";

/// Everything synthesis needs besides the field pair itself.
#[derive(Debug, Clone, Copy)]
pub struct SynthContext<'a> {
    pub config: &'a GenerationConfig,
    pub source_record: &'a RecordType,
    pub dest_record: &'a RecordType,
}

/// The synthesized mapping of one source field into one destination field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub source_field: String,
    pub dest_field: String,
    pub rule: Rule,
    /// Value stored into the destination field.
    pub assignment: Expr,
    /// Statements that must run before `assignment` is evaluated.
    pub statements: Vec<Stmt>,
    pub returns_error: bool,
    pub requires_nil_guard: bool,
    /// Namespaces referenced by `assignment` and `statements`.
    pub imports: BTreeSet<Namespace>,
}

pub fn synthesize(
    selection: &Selection<'_>,
    source: &Field,
    dest: &Field,
    ctx: &SynthContext<'_>,
) -> Result<FieldMapping, GenerationError> {
    let mut synth = Synthesizer {
        ctx,
        source,
        dest,
        converter: selection.converter,
        returns_error: false,
        requires_nil_guard: false,
        imports: BTreeSet::new(),
    };
    let operand = Operand {
        expr: Expr::var(&ctx.config.source_param).field(&source.name),
        addressable: true,
    };
    let binding = format!("{}{}", ctx.config.source_param, dest.name);
    let mut statements = Vec::new();
    let assignment = synth.emit(
        &selection.rule,
        operand,
        &source.ty,
        &dest.ty,
        &binding,
        0,
        &mut statements,
    )?;

    tracing::debug!(
        source = %source.name,
        dest = %dest.name,
        rule = %selection.rule,
        "synthesized field mapping"
    );

    Ok(FieldMapping {
        source_field: source.name.clone(),
        dest_field: dest.name.clone(),
        rule: selection.rule.clone(),
        assignment,
        statements,
        returns_error: synth.returns_error,
        requires_nil_guard: synth.requires_nil_guard,
        imports: synth.imports,
    })
}

/// Names bound by the loop at one collection nesting level.
struct LoopNames {
    index: String,
    item: String,
    result: String,
}

impl LoopNames {
    fn at(depth: usize) -> Self {
        if depth == 0 {
            Self {
                index: "i".to_string(),
                item: "item".to_string(),
                result: "res".to_string(),
            }
        } else {
            Self {
                index: format!("i{depth}"),
                item: format!("item{depth}"),
                result: format!("res{depth}"),
            }
        }
    }
}

/// The expression a rule reads from.
struct Operand {
    expr: Expr,
    /// Loop items must be copied before their address is taken.
    addressable: bool,
}

struct Synthesizer<'a> {
    ctx: &'a SynthContext<'a>,
    source: &'a Field,
    dest: &'a Field,
    converter: Option<&'a ConverterFunction>,
    returns_error: bool,
    requires_nil_guard: bool,
    imports: BTreeSet<Namespace>,
}

impl<'a> Synthesizer<'a> {
    /// Emits statements for `rule` into `out` and returns the assigned value.
    #[allow(clippy::too_many_arguments)]
    fn emit(
        &mut self,
        rule: &Rule,
        operand: Operand,
        source_ty: &TypeDescriptor,
        dest_ty: &TypeDescriptor,
        binding: &str,
        depth: usize,
        out: &mut Vec<Stmt>,
    ) -> Result<Expr, GenerationError> {
        match rule {
            Rule::DirectAssignment => {
                if !source_ty.optional && dest_ty.optional {
                    Ok(self.address(operand, binding, out))
                } else {
                    Ok(operand.expr)
                }
            }
            Rule::NilGuardRequired => {
                self.nil_guard(operand.expr.clone(), out);
                Ok(operand.expr.deref())
            }
            Rule::ConverterCall => {
                let cf = self.require_converter(source_ty, dest_ty)?;
                if requires_nil_guard(source_ty, dest_ty, Some(cf)) {
                    self.nil_guard(operand.expr.clone(), out);
                }
                let arg = self.argument(cf, operand, source_ty, binding, out);
                Ok(self.call(cf, arg, source_ty, dest_ty))
            }
            Rule::ConverterCallThenAddress => {
                let cf = self.require_converter(source_ty, dest_ty)?;
                let arg = self.argument(cf, operand, source_ty, binding, out);
                let value = self.call(cf, arg, source_ty, dest_ty);
                out.push(Stmt::Let {
                    name: binding.to_string(),
                    value,
                });
                Ok(Expr::var(binding).address_of())
            }
            Rule::ConverterCallWithError => {
                let cf = self.require_converter(source_ty, dest_ty)?;
                if requires_nil_guard(source_ty, dest_ty, Some(cf)) {
                    self.nil_guard(operand.expr.clone(), out);
                }
                let arg = self.argument(cf, operand, source_ty, binding, out);
                let call = self.call(cf, arg, source_ty, dest_ty);
                self.fallible(binding, call, out);
                let value = Expr::var(binding);
                if dest_ty.optional && !cf.dest.optional {
                    Ok(value.address_of())
                } else {
                    Ok(value)
                }
            }
            Rule::OptionalToOptionalConversion => {
                let cf = self.require_converter(source_ty, dest_ty)?;
                self.import_type(dest_ty);
                out.push(Stmt::Declare {
                    name: binding.to_string(),
                    ty: dest_ty.clone(),
                });

                let converted = format!("{binding}Value");
                let call = self.call(cf, operand.expr.clone().deref(), source_ty, dest_ty);
                let mut then = Vec::new();
                if cf.returns_error {
                    self.fallible(&converted, call, &mut then);
                } else {
                    then.push(Stmt::Let {
                        name: converted.clone(),
                        value: call,
                    });
                }
                let value = if cf.dest.optional {
                    Expr::var(&converted)
                } else {
                    Expr::var(&converted).address_of()
                };
                then.push(Stmt::Assign {
                    target: Expr::var(binding),
                    value,
                });
                out.push(Stmt::If {
                    condition: Condition::NotNil(operand.expr),
                    then,
                });
                Ok(Expr::var(binding))
            }
            Rule::CollectionMapping(element_rule) => {
                let (Some(source_element), Some(dest_element)) =
                    (source_ty.element_type(), dest_ty.element_type())
                else {
                    return Err(self.undefined());
                };
                self.import_type(dest_element);
                out.push(Stmt::Let {
                    name: binding.to_string(),
                    value: Expr::MakeCollection {
                        element: dest_element.clone(),
                        len: Box::new(operand.expr.clone().length()),
                    },
                });

                let names = LoopNames::at(depth);
                let mut body = Vec::new();
                let item = Operand {
                    expr: Expr::var(&names.item),
                    addressable: false,
                };
                let value = self.emit(
                    element_rule,
                    item,
                    source_element,
                    dest_element,
                    &names.result,
                    depth + 1,
                    &mut body,
                )?;
                body.push(Stmt::Assign {
                    target: Expr::var(binding).index(Expr::var(&names.index)),
                    value,
                });
                out.push(Stmt::ForEach {
                    index: names.index,
                    item: names.item,
                    over: operand.expr,
                    body,
                });

                if dest_ty.optional {
                    Ok(Expr::var(binding).address_of())
                } else {
                    Ok(Expr::var(binding))
                }
            }
        }
    }

    fn require_converter(
        &self,
        source_ty: &TypeDescriptor,
        dest_ty: &TypeDescriptor,
    ) -> Result<&'a ConverterFunction, GenerationError> {
        self.converter.ok_or_else(|| GenerationError::ConverterNotFound {
            source_field: self.source_path(),
            dest_field: self.dest_path(),
            source_type: source_ty.required().to_string(),
            dest_type: dest_ty.required().to_string(),
        })
    }

    fn undefined(&self) -> GenerationError {
        GenerationError::UndefinedConversionRule {
            source_field: self.source_path(),
            dest_field: self.dest_path(),
        }
    }

    fn source_path(&self) -> String {
        format!("{}.{}", self.ctx.source_record.name, self.source.name)
    }

    fn dest_path(&self) -> String {
        format!("{}.{}", self.ctx.dest_record.name, self.dest.name)
    }

    fn conversion_message(&self) -> String {
        format!(
            "cannot convert {} -> {}",
            self.source_path(),
            self.dest_path()
        )
    }

    /// Fails the routine when `subject` is nil.
    fn nil_guard(&mut self, subject: Expr, out: &mut Vec<Stmt>) {
        let namespace = self.ctx.config.errors_namespace.clone();
        self.imports.insert(namespace.clone());
        self.requires_nil_guard = true;
        self.returns_error = true;
        out.push(Stmt::If {
            condition: Condition::IsNil(subject),
            then: vec![Stmt::Fail(Expr::NewError {
                namespace,
                message: format!("{}, field is nil", self.conversion_message()),
            })],
        });
    }

    /// Binds the value and error of `call`, failing the routine on error.
    fn fallible(&mut self, value: &str, call: Expr, out: &mut Vec<Stmt>) {
        let namespace = self.ctx.config.format_namespace.clone();
        self.imports.insert(namespace.clone());
        self.returns_error = true;
        out.push(Stmt::LetFallible {
            value: value.to_string(),
            error: ERROR_VAR.to_string(),
            call,
        });
        out.push(Stmt::If {
            condition: Condition::NotNil(Expr::var(ERROR_VAR)),
            then: vec![Stmt::Fail(Expr::WrapError {
                namespace,
                message: self.conversion_message(),
                error: Box::new(Expr::var(ERROR_VAR)),
            })],
        });
    }

    /// Address of the operand, copying loop items into `binding` first.
    fn address(&mut self, operand: Operand, binding: &str, out: &mut Vec<Stmt>) -> Expr {
        if operand.addressable {
            operand.expr.address_of()
        } else {
            out.push(Stmt::Let {
                name: binding.to_string(),
                value: operand.expr,
            });
            Expr::var(binding).address_of()
        }
    }

    /// Adapts the operand to the converter's declared parameter optionality.
    fn argument(
        &mut self,
        cf: &ConverterFunction,
        operand: Operand,
        source_ty: &TypeDescriptor,
        binding: &str,
        out: &mut Vec<Stmt>,
    ) -> Expr {
        match (source_ty.optional, cf.source.optional) {
            (true, false) => operand.expr.deref(),
            (false, true) => self.address(operand, &format!("{binding}Arg"), out),
            _ => operand.expr,
        }
    }

    fn call(
        &mut self,
        cf: &ConverterFunction,
        arg: Expr,
        source_ty: &TypeDescriptor,
        dest_ty: &TypeDescriptor,
    ) -> Expr {
        if let Some(ns) = &cf.namespace {
            self.imports.insert(ns.clone());
        }
        let type_args = match cf.type_params {
            TypeParamArity::None => Vec::new(),
            TypeParamArity::DestOnly => vec![dest_ty.required()],
            TypeParamArity::SourceAndDest => vec![source_ty.required(), dest_ty.required()],
        };
        for ty in &type_args {
            self.import_type(ty);
        }
        Expr::Call {
            function: Symbol::new(cf.namespace.clone(), cf.name.clone()),
            type_args,
            args: vec![arg],
        }
    }

    /// Records every namespace a printed type refers to.
    fn import_type(&mut self, ty: &TypeDescriptor) {
        if let Some(ns) = &ty.namespace {
            self.imports.insert(ns.clone());
        }
        if let TypeShape::Collection(element) = &ty.shape {
            self.import_type(element);
        }
        for param in &ty.type_parameters {
            self.import_type(param);
        }
    }
}
