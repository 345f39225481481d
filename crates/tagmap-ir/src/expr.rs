use tagmap_model::{Namespace, TypeDescriptor};

/// A reference to a named symbol, qualified when it lives in a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub namespace: Option<Namespace>,
    pub name: String,
}

impl Symbol {
    pub fn new(namespace: Option<Namespace>, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A local variable or parameter.
    Var(String),
    /// `base.name`
    Field { base: Box<Expr>, name: String },
    /// `base[index]`
    Index { base: Box<Expr>, index: Box<Expr> },
    /// Address of a value, producing its optional form.
    AddressOf(Box<Expr>),
    /// Value behind an optional.
    Deref(Box<Expr>),
    /// Function call with explicit type arguments.
    Call {
        function: Symbol,
        type_args: Vec<TypeDescriptor>,
        args: Vec<Expr>,
    },
    /// Length of a collection.
    Len(Box<Expr>),
    /// A new collection of `element` values with `len` slots.
    MakeCollection {
        element: TypeDescriptor,
        len: Box<Expr>,
    },
    /// A fresh error carrying `message`, built with a function from `namespace`.
    NewError {
        namespace: Namespace,
        message: String,
    },
    /// An error carrying `message` that wraps `error`.
    WrapError {
        namespace: Namespace,
        message: String,
        error: Box<Expr>,
    },
    /// A record literal. An optional `ty` yields the address of the literal.
    Construct {
        ty: TypeDescriptor,
        fields: Vec<(String, Expr)>,
    },
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn field(self, name: impl Into<String>) -> Self {
        Expr::Field {
            base: Box::new(self),
            name: name.into(),
        }
    }

    pub fn index(self, index: Expr) -> Self {
        Expr::Index {
            base: Box::new(self),
            index: Box::new(index),
        }
    }

    pub fn address_of(self) -> Self {
        Expr::AddressOf(Box::new(self))
    }

    pub fn deref(self) -> Self {
        Expr::Deref(Box::new(self))
    }

    pub fn length(self) -> Self {
        Expr::Len(Box::new(self))
    }
}

/// Condition of an [`Stmt::If`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    IsNil(Expr),
    NotNil(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    /// Binds `name` to `value`.
    Let { name: String, value: Expr },
    /// Binds the value and error results of a fallible call.
    LetFallible {
        value: String,
        error: String,
        call: Expr,
    },
    /// Declares `name` of type `ty`, initialized to its zero value.
    Declare { name: String, ty: TypeDescriptor },
    Assign { target: Expr, value: Expr },
    If {
        condition: Condition,
        then: Vec<Stmt>,
    },
    /// Iterates `over`, binding each position to `index` and element to `item`.
    ForEach {
        index: String,
        item: String,
        over: Expr,
        body: Vec<Stmt>,
    },
    /// Leaves the routine with the destination zero value and `error`.
    Fail(Expr),
    /// Leaves the routine with the destination zero value and no error.
    ReturnZero,
}

impl Stmt {
    pub fn is_compound(&self) -> bool {
        matches!(self, Stmt::If { .. } | Stmt::ForEach { .. })
    }
}
