//! Type predicates over dynamically-shaped values
//!
//! JSON covers every runtime type except "absent" and "callable", so a
//! [`Dynamic`] is either a borrowed `serde_json::Value`, `Undefined`, or
//! `Function`.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dynamic<'a> {
    Undefined,
    Value(&'a Value),
    Function,
}

impl<'a> Dynamic<'a> {
    /// Classify any callable as a function
    pub fn function<F: ?Sized>(_f: &F) -> Self {
        Dynamic::Function
    }
}

impl<'a> From<&'a Value> for Dynamic<'a> {
    fn from(value: &'a Value) -> Self {
        Dynamic::Value(value)
    }
}

impl<'a> From<Option<&'a Value>> for Dynamic<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map_or(Dynamic::Undefined, Dynamic::Value)
    }
}

fn dynamic<'a>(val: impl Into<Dynamic<'a>>) -> Dynamic<'a> {
    val.into()
}

pub fn is_num<'a>(val: impl Into<Dynamic<'a>>) -> bool {
    matches!(dynamic(val), Dynamic::Value(Value::Number(n)) if n.as_f64().is_some_and(|f| !f.is_nan()))
}

pub fn is_str<'a>(val: impl Into<Dynamic<'a>>) -> bool {
    matches!(dynamic(val), Dynamic::Value(Value::String(_)))
}

pub fn is_arr<'a>(val: impl Into<Dynamic<'a>>) -> bool {
    matches!(dynamic(val), Dynamic::Value(Value::Array(_)))
}

/// Keyed record: not null, not an array
pub fn is_obj<'a>(val: impl Into<Dynamic<'a>>) -> bool {
    matches!(dynamic(val), Dynamic::Value(Value::Object(_)))
}

pub fn is_bool<'a>(val: impl Into<Dynamic<'a>>) -> bool {
    matches!(dynamic(val), Dynamic::Value(Value::Bool(_)))
}

pub fn is_func<'a>(val: impl Into<Dynamic<'a>>) -> bool {
    matches!(dynamic(val), Dynamic::Function)
}

/// Undefined, null, `""`, `[]` or `{}`. Zero and `false` are not empty.
pub fn is_empty<'a>(val: impl Into<Dynamic<'a>>) -> bool {
    match dynamic(val) {
        Dynamic::Undefined | Dynamic::Value(Value::Null) => true,
        Dynamic::Value(Value::String(s)) => s.is_empty(),
        Dynamic::Value(Value::Array(a)) => a.is_empty(),
        Dynamic::Value(Value::Object(o)) => o.is_empty(),
        Dynamic::Value(_) | Dynamic::Function => false,
    }
}
