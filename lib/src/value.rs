use std::fmt::{Display, Formatter, Result};

use crate::{Dict, List, Str};

/// Dynamically typed value for heterogeneous and nested dictionaries.
///
/// `Value` is `Eq + Hash`, so it works as a key as well as a value:
/// `Dict<Value, Value>` is the nested-data shape that [`Dict::dig`] walks.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Str(Str),
    /// Interned-style name, printed as `:name`.
    Sym(Str),
    List(List<Value>),
    Dict(Dict<Value, Value>),
}

impl Value {
    pub fn sym(name: &str) -> Value {
        Value::Sym(Str::from(name))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::Sym(_) => "sym",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Sym(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict<Value, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Sym(s) => write!(f, ":{s}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Dict(d) => {
                f.write_str("{")?;
                for (i, (k, v)) in d.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}=>{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Str::from(s))
    }
}

impl From<Str> for Value {
    fn from(s: Str) -> Self {
        Value::Str(s)
    }
}

impl From<List<Value>> for Value {
    fn from(l: List<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Dict<Value, Value>> for Value {
    fn from(d: Dict<Value, Value>) -> Self {
        Value::Dict(d)
    }
}
