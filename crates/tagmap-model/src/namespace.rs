use core::fmt::{self, Display};

/// A namespace symbols can live in.
///
/// `path` is the full import path and is what identity compares on; `name` is
/// the short qualifier used when a symbol is referenced from elsewhere
/// (`name.Symbol`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Namespace {
    pub path: String,
    pub name: String,
}

impl Namespace {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Creates a namespace whose short name is the last `/`-separated
    /// segment of its path.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self { path, name }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}
