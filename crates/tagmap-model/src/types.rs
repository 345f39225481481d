//! Field type descriptors.


use core::fmt::{self, Display};

use crate::namespace::Namespace;
use crate::record::Fields;

/// Describes the type of a record field.
///
/// The descriptor is recursive: a collection carries the descriptor of its
/// element type, which may itself be a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDescriptor {
    /// Type name without its namespace qualifier. Empty for collections.
    pub name: String,
    /// Namespace declaring the type. `None` for builtins.
    #[cfg_attr(feature = "serde", serde(default))]
    pub namespace: Option<Namespace>,
    /// Whether a value of this type may be absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub optional: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shape: TypeShape,
    /// Type arguments of a generic type, in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub type_parameters: Vec<TypeDescriptor>,
}

/// Structural variant of a [`TypeDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeShape {
    /// Any non-collection, non-record type (`int`, `string`, `uuid.UUID`).
    #[default]
    Scalar,
    /// Ordered homogeneous sequence of the element type.
    Collection(Box<TypeDescriptor>),
    /// A record type with its fields.
    Record(Fields),
}

/// Identity of a type with top-level optionality erased.
///
/// Two descriptors that differ only in whether they are optional share a key.
/// Element optionality of a collection is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeKey {
    Named {
        namespace: Option<String>,
        name: String,
    },
    Collection {
        element: Box<TypeKey>,
        optional_element: bool,
    },
}

impl TypeDescriptor {
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            optional: false,
            shape: TypeShape::Scalar,
            type_parameters: Vec::new(),
        }
    }

    pub fn collection(element: TypeDescriptor) -> Self {
        Self {
            name: String::new(),
            namespace: None,
            optional: false,
            shape: TypeShape::Collection(Box::new(element)),
            type_parameters: Vec::new(),
        }
    }

    pub fn record(name: impl Into<String>, fields: Fields) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            optional: false,
            shape: TypeShape::Record(fields),
            type_parameters: Vec::new(),
        }
    }

    pub fn in_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Returns the optional form of this type.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Returns the required (non-optional) form of this type.
    pub fn required(&self) -> Self {
        Self {
            optional: false,
            ..self.clone()
        }
    }

    pub fn with_type_parameters(mut self, params: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.type_parameters = params.into_iter().collect();
        self
    }

    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        match &self.shape {
            TypeShape::Collection(element) => Some(element),
            TypeShape::Scalar | TypeShape::Record(_) => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.shape, TypeShape::Collection(_))
    }

    pub fn namespace_path(&self) -> Option<&str> {
        self.namespace.as_ref().map(|ns| ns.path.as_str())
    }

    /// Whether both descriptors name the same type, ignoring top-level
    /// optionality.
    pub fn same_type(&self, other: &TypeDescriptor) -> bool {
        match (&self.shape, &other.shape) {
            (TypeShape::Collection(a), TypeShape::Collection(b)) => {
                a.optional == b.optional && a.same_type(b)
            }
            (TypeShape::Collection(_), _) | (_, TypeShape::Collection(_)) => false,
            _ => {
                self.name == other.name
                    && self.namespace_path() == other.namespace_path()
                    && self.type_parameters.len() == other.type_parameters.len()
                    && self
                        .type_parameters
                        .iter()
                        .zip(&other.type_parameters)
                        .all(|(a, b)| a.optional == b.optional && a.same_type(b))
            }
        }
    }

    pub fn key(&self) -> TypeKey {
        match &self.shape {
            TypeShape::Collection(element) => TypeKey::Collection {
                element: Box::new(element.key()),
                optional_element: element.optional,
            },
            TypeShape::Scalar | TypeShape::Record(_) => TypeKey::Named {
                namespace: self.namespace_path().map(str::to_string),
                name: self.name.clone(),
            },
        }
    }
}

/// Diagnostic notation: `optional<T>`, `collection<T>`, `ns.Name`.
impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "optional<")?;
        }
        match &self.shape {
            TypeShape::Collection(element) => write!(f, "collection<{element}>")?,
            TypeShape::Scalar | TypeShape::Record(_) => {
                if let Some(ns) = &self.namespace {
                    write!(f, "{}.", ns.name)?;
                }
                write!(f, "{}", self.name)?;
                if !self.type_parameters.is_empty() {
                    write!(f, "[")?;
                    for (i, param) in self.type_parameters.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{param}")?;
                    }
                    write!(f, "]")?;
                }
            }
        }
        if self.optional {
            write!(f, ">")?;
        }
        Ok(())
    }
}
