//! Intermediate representation of generated mapping routines.
//!
//! Rule selection and synthesis never build target text directly. They emit
//! [`Expr`] and [`Stmt`] values, which are collected into a [`Routine`] and
//! rendered by a [`Printer`]. Each printer targets one concrete syntax.
//!
//! # Types
//!
//! - [`Expr`] / [`Symbol`] - Expressions and namespace-qualified references
//! - [`Stmt`] / [`Condition`] - Statements, including guards and loops
//! - [`Routine`] / [`Param`] - A whole conversion routine
//! - [`Printer`] - Rendering trait; [`GoPrinter`] is the bundled implementation

mod expr;
mod printer;
mod routine;

pub use expr::*;
pub use printer::*;
pub use routine::*;
