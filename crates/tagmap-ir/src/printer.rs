mod go;

pub use go::GoPrinter;

use tagmap_model::Namespace;

use crate::routine::Routine;

/// Renders routines into one concrete target syntax.
pub trait Printer {
    /// Renders the routine declaration, including its doc comment.
    fn print_routine(&self, routine: &Routine) -> String;

    /// Renders an import block for `imports`, in the given order.
    fn print_imports(&self, imports: &[Namespace]) -> String;
}
