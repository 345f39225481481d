
use tagmap_model::{Namespace, TypeDescriptor, TypeShape};

use crate::expr::{Condition, Expr, Stmt, Symbol};
use crate::printer::Printer;
use crate::routine::Routine;

/// Prints routines as Go source, formatted the way `gofmt` would.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoPrinter;

impl Printer for GoPrinter {
    fn print_routine(&self, routine: &Routine) -> String {
        RoutineWriter::new(routine).write()
    }

    fn print_imports(&self, imports: &[Namespace]) -> String {
        match imports {
            [] => String::new(),
            [single] => format!("import {}\n", import_spec(single)),
            many => {
                let mut out = String::from("import (\n");
                for ns in many {
                    out.push('\t');
                    out.push_str(&import_spec(ns));
                    out.push('\n');
                }
                out.push_str(")\n");
                out
            }
        }
    }
}

fn import_spec(ns: &Namespace) -> String {
    let implied = ns.path.rsplit('/').next().unwrap_or_default();
    if implied == ns.name {
        quote(&ns.path)
    } else {
        format!("{} {}", ns.name, quote(&ns.path))
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn tabs(depth: usize) -> String {
    "\t".repeat(depth)
}

struct RoutineWriter<'a> {
    routine: &'a Routine,
    out: String,
}

impl<'a> RoutineWriter<'a> {
    fn new(routine: &'a Routine) -> Self {
        Self {
            routine,
            out: String::new(),
        }
    }

    fn write(mut self) -> String {
        let routine = self.routine;
        if let Some(doc) = &routine.doc {
            for line in doc.lines() {
                self.out.push_str(&format!("// {line}\n"));
            }
        }
        let returns = if routine.returns_error {
            format!("({}, error)", self.ty(&routine.returns))
        } else {
            self.ty(&routine.returns)
        };
        self.out.push_str(&format!(
            "func {}({} {}) {} {{\n",
            routine.name,
            routine.param.name,
            self.ty(&routine.param.ty),
            returns
        ));

        for (i, stmt) in routine.body.iter().enumerate() {
            self.stmt(stmt, 1);
            if stmt.is_compound() && i + 1 < routine.body.len() {
                self.out.push('\n');
            }
        }
        if !routine.body.is_empty() {
            self.out.push('\n');
        }

        let result = self.expr(&routine.result, 1);
        if routine.returns_error {
            self.out.push_str(&format!("\treturn {result}, nil\n"));
        } else {
            self.out.push_str(&format!("\treturn {result}\n"));
        }
        self.out.push_str("}\n");
        self.out
    }

    fn is_home(&self, ns: &Namespace) -> bool {
        self.routine
            .home
            .as_ref()
            .is_some_and(|home| home.path == ns.path)
    }

    fn qualify(&self, namespace: Option<&Namespace>, name: &str) -> String {
        match namespace {
            Some(ns) if !self.is_home(ns) => format!("{}.{}", ns.name, name),
            _ => name.to_string(),
        }
    }

    fn ty(&self, ty: &TypeDescriptor) -> String {
        let base = match &ty.shape {
            TypeShape::Collection(element) => format!("[]{}", self.ty(element)),
            TypeShape::Scalar | TypeShape::Record(_) => {
                let name = self.qualify(ty.namespace.as_ref(), &ty.name);
                if ty.type_parameters.is_empty() {
                    name
                } else {
                    format!("{}[{}]", name, self.type_list(&ty.type_parameters))
                }
            }
        };
        if ty.optional { format!("*{base}") } else { base }
    }

    fn type_list(&self, types: &[TypeDescriptor]) -> String {
        types
            .iter()
            .map(|ty| self.ty(ty))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn symbol(&self, symbol: &Symbol) -> String {
        self.qualify(symbol.namespace.as_ref(), &symbol.name)
    }

    fn zero(&self) -> String {
        let returns = &self.routine.returns;
        if returns.optional {
            "nil".to_string()
        } else {
            format!("{}{{}}", self.ty(returns))
        }
    }

    fn expr(&self, expr: &Expr, depth: usize) -> String {
        match expr {
            Expr::Var(name) => name.clone(),
            Expr::Field { base, name } => format!("{}.{}", self.expr(base, depth), name),
            Expr::Index { base, index } => {
                format!("{}[{}]", self.expr(base, depth), self.expr(index, depth))
            }
            Expr::AddressOf(inner) => format!("&{}", self.expr(inner, depth)),
            Expr::Deref(inner) => format!("*{}", self.expr(inner, depth)),
            Expr::Call {
                function,
                type_args,
                args,
            } => {
                let args = args
                    .iter()
                    .map(|arg| self.expr(arg, depth))
                    .collect::<Vec<_>>()
                    .join(", ");
                if type_args.is_empty() {
                    format!("{}({})", self.symbol(function), args)
                } else {
                    format!(
                        "{}[{}]({})",
                        self.symbol(function),
                        self.type_list(type_args),
                        args
                    )
                }
            }
            Expr::Len(inner) => format!("len({})", self.expr(inner, depth)),
            Expr::MakeCollection { element, len } => {
                format!("make([]{}, {})", self.ty(element), self.expr(len, depth))
            }
            Expr::NewError { namespace, message } => {
                format!("{}.New({})", namespace.name, quote(message))
            }
            Expr::WrapError {
                namespace,
                message,
                error,
            } => format!(
                "{}.Errorf({}, {})",
                namespace.name,
                quote(&format!("{message}: %w")),
                self.expr(error, depth)
            ),
            Expr::Construct { ty, fields } => self.construct(ty, fields, depth),
        }
    }

    fn construct(&self, ty: &TypeDescriptor, fields: &[(String, Expr)], depth: usize) -> String {
        let prefix = if ty.optional { "&" } else { "" };
        let name = self.ty(&ty.required());
        if fields.is_empty() {
            return format!("{prefix}{name}{{}}");
        }
        let width = fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0) + 1;
        let mut out = format!("{prefix}{name}{{\n");
        for (key, value) in fields {
            let key = format!("{key}:");
            out.push_str(&format!(
                "{}{:<width$} {},\n",
                tabs(depth + 1),
                key,
                self.expr(value, depth + 1),
            ));
        }
        out.push_str(&tabs(depth));
        out.push('}');
        out
    }

    fn line(&mut self, depth: usize, text: &str) {
        self.out.push_str(&tabs(depth));
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn block(&mut self, stmts: &[Stmt], depth: usize) {
        for stmt in stmts {
            self.stmt(stmt, depth);
        }
    }

    fn stmt(&mut self, stmt: &Stmt, depth: usize) {
        match stmt {
            Stmt::Let { name, value } => {
                let value = self.expr(value, depth);
                self.line(depth, &format!("{name} := {value}"));
            }
            Stmt::LetFallible { value, error, call } => {
                let call = self.expr(call, depth);
                self.line(depth, &format!("{value}, {error} := {call}"));
            }
            Stmt::Declare { name, ty } => {
                let ty = self.ty(ty);
                self.line(depth, &format!("var {name} {ty}"));
            }
            Stmt::Assign { target, value } => {
                let target = self.expr(target, depth);
                let value = self.expr(value, depth);
                self.line(depth, &format!("{target} = {value}"));
            }
            Stmt::If { condition, then } => {
                let condition = match condition {
                    Condition::IsNil(subject) => format!("{} == nil", self.expr(subject, depth)),
                    Condition::NotNil(subject) => format!("{} != nil", self.expr(subject, depth)),
                };
                self.line(depth, &format!("if {condition} {{"));
                self.block(then, depth + 1);
                self.line(depth, "}");
            }
            Stmt::ForEach {
                index,
                item,
                over,
                body,
            } => {
                let over = self.expr(over, depth);
                self.line(depth, &format!("for {index}, {item} := range {over} {{"));
                self.block(body, depth + 1);
                self.line(depth, "}");
            }
            Stmt::Fail(error) => {
                let zero = self.zero();
                let error = self.expr(error, depth);
                self.line(depth, &format!("return {zero}, {error}"));
            }
            Stmt::ReturnZero => {
                let zero = self.zero();
                if self.routine.returns_error {
                    self.line(depth, &format!("return {zero}, nil"));
                } else {
                    self.line(depth, &format!("return {zero}"));
                }
            }
        }
    }
}
