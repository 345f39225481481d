//! Configuration for routine generation.

use tagmap_model::Namespace;

/// Configuration for routine generation.
///
/// Use the builder pattern to construct:
/// ```ignore
/// let config = GenerationConfig::builder()
///     .source_tag("db")
///     .dest_tag("json")
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct GenerationConfig {
    /// Tag key whose value pairs source fields.
    #[builder(into, default = String::from("map"))]
    pub source_tag: String,

    /// Tag key whose value pairs destination fields.
    #[builder(into, default = String::from("map"))]
    pub dest_tag: String,

    /// Name of the routine's parameter.
    #[builder(into, default = String::from("from"))]
    pub source_param: String,

    /// Namespace providing plain error construction.
    #[builder(default = Namespace::from_path("errors"))]
    pub errors_namespace: Namespace,

    /// Namespace providing error wrapping.
    #[builder(default = Namespace::from_path("fmt"))]
    pub format_namespace: Namespace,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
