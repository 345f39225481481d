use tagmap_model::{Namespace, TypeDescriptor};

use crate::expr::{Expr, Stmt};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    pub ty: TypeDescriptor,
}

/// A complete conversion routine.
///
/// The routine takes one parameter and returns `returns`, plus an error
/// when `returns_error` is set. `body` runs first; `result` is the returned
/// value when the body falls through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Routine {
    pub name: String,
    /// Namespace the routine is declared in. Symbols from it print unqualified.
    pub home: Option<Namespace>,
    pub doc: Option<String>,
    pub param: Param,
    pub returns: TypeDescriptor,
    pub returns_error: bool,
    pub body: Vec<Stmt>,
    pub result: Expr,
}
