#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The dynamic value model the validator checks against.
//!
//! A scope is an explicit mapping from variable name to [`Value`], built by
//! the caller (typically from a student's runtime state). This is a deliberate
//! redesign from implicit interpreter-frame introspection: the validator only
//! ever sees what the caller put in the map, and never mutates it.

use std::{collections::HashMap, fmt, sync::Arc};

use itertools::Itertools;

/// A caller-supplied mapping from variable name to value, checked for the
/// duration of one validation call.
pub type Scope = HashMap<String, Value>;

/// A callable held in a scope. Takes its arguments as a slice and either
/// returns a value or fails with a message.
#[derive(Clone)]
pub struct ScopeFn(Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>);

impl ScopeFn {
    /// Wraps a closure as a scope callable.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invokes the callable.
    pub fn call(&self, args: &[Value]) -> Result<Value, String> {
        (self.0)(args)
    }

    /// Identity comparison; closures have no structural equality.
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ScopeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<callable>")
    }
}

/// A numeric-array container: a dtype descriptor (`"int64"`, `"float64"`,
/// `"bool"`, ...), a shape, and flat element data in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    /// Element-type descriptor string.
    dtype: String,
    /// Extent along each dimension.
    shape: Vec<usize>,
    /// Flat element data; booleans are stored as 0.0/1.0.
    data:  Vec<f64>,
}

impl NdArray {
    /// Builds an array from its dtype descriptor, shape, and flat data.
    pub fn new(dtype: impl Into<String>, shape: Vec<usize>, data: Vec<f64>) -> Self {
        Self {
            dtype: dtype.into(),
            shape,
            data,
        }
    }

    /// The element-type descriptor string.
    pub fn dtype(&self) -> &str {
        &self.dtype
    }

    /// The extent along each dimension.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A tag naming the concrete type of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    /// An integer.
    Int,
    /// A float.
    Float,
    /// A string.
    Str,
    /// A boolean.
    Bool,
    /// A numeric array.
    Array,
    /// An ordered sequence of values.
    List,
    /// A callable.
    Func,
    /// The absent value.
    None,
}

impl TypeTag {
    /// The tag's short name, also used as the dtype prefix in array-mode type
    /// checks (`Int` matches dtypes starting with `"int"`).
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Str => "str",
            TypeTag::Bool => "bool",
            TypeTag::Array => "array",
            TypeTag::List => "list",
            TypeTag::Func => "func",
            TypeTag::None => "none",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Either a single acceptable type tag or a set of them.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpec {
    /// Exactly one acceptable type.
    Single(TypeTag),
    /// Any of a set of acceptable types.
    AnyOf(Vec<TypeTag>),
}

impl TypeSpec {
    /// Whether `tag` satisfies this spec.
    pub fn admits(&self, tag: TypeTag) -> bool {
        match self {
            TypeSpec::Single(expected) => *expected == tag,
            TypeSpec::AnyOf(expected) => expected.contains(&tag),
        }
    }

    /// Whether any tag in this spec is a prefix of the array dtype
    /// descriptor, so `Int` admits `"int64"` and `Bool` admits `"bool"`.
    pub fn admits_dtype(&self, dtype: &str) -> bool {
        match self {
            TypeSpec::Single(expected) => dtype.starts_with(expected.name()),
            TypeSpec::AnyOf(expected) => expected.iter().any(|tag| dtype.starts_with(tag.name())),
        }
    }

    /// Human-readable rendering for failure messages.
    pub fn describe(&self) -> String {
        match self {
            TypeSpec::Single(tag) => tag.to_string(),
            TypeSpec::AnyOf(tags) => format!("{{{}}}", tags.iter().join(", ")),
        }
    }
}

impl From<TypeTag> for TypeSpec {
    fn from(tag: TypeTag) -> Self {
        TypeSpec::Single(tag)
    }
}

impl From<Vec<TypeTag>> for TypeSpec {
    fn from(tags: Vec<TypeTag>) -> Self {
        TypeSpec::AnyOf(tags)
    }
}

/// A dynamic runtime value, as placed in a scope by the caller.
#[derive(Debug, Clone)]
pub enum Value {
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A string.
    Str(String),
    /// A boolean.
    Bool(bool),
    /// A numeric array.
    Array(NdArray),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// A callable.
    Func(ScopeFn),
    /// The absent value.
    None,
}

impl Value {
    /// The tag naming this value's concrete type.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Str(_) => TypeTag::Str,
            Value::Bool(_) => TypeTag::Bool,
            Value::Array(_) => TypeTag::Array,
            Value::List(_) => TypeTag::List,
            Value::Func(_) => TypeTag::Func,
            Value::None => TypeTag::None,
        }
    }

    /// Whether the value can be invoked.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Func(_))
    }

    /// Resolves a named attribute, or `None` if the value has no such
    /// attribute. Arrays expose `shape`, `dtype`, and `size`; strings and
    /// lists expose `len`.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match (self, name) {
            (Value::Array(arr), "shape") => Some(Value::List(
                arr.shape().iter().map(|&extent| Value::Int(extent as i64)).collect(),
            )),
            (Value::Array(arr), "dtype") => Some(Value::Str(arr.dtype().to_string())),
            (Value::Array(arr), "size") => Some(Value::Int(arr.size() as i64)),
            (Value::Str(s), "len") => Some(Value::Int(s.chars().count() as i64)),
            (Value::List(items), "len") => Some(Value::Int(items.len() as i64)),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            // ints and floats compare numerically, as students rarely
            // distinguish 1 from 1.0
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Func(a), Value::Func(b)) => a.ptr_eq(b),
            (Value::None, Value::None) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            // strings are quoted so `'1'` and `1` read differently in
            // failure messages
            Value::Str(v) => write!(f, "'{v}'"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Array(arr) => {
                write!(f, "array(dtype={}, shape=[{}])", arr.dtype(), arr.shape().iter().join(", "))
            }
            Value::List(items) => write!(f, "[{}]", items.iter().join(", ")),
            Value::Func(_) => f.write_str("<callable>"),
            Value::None => f.write_str("None"),
        }
    }
}
