//! Typed access to fields of upstream configuration objects
//!
//! Each DTO implements [`Inspect`] through the [`inspect!`] macro, which
//! expands to an exhaustive match from field name to a typed struct field.
//! Rules select fields by name; an unknown name resolves to `None`.

use serde_json::{json, Value};
use std::fmt;

/// Observed value of one configuration field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
    /// Field missing from the upstream response
    Null,
}

impl FieldValue {
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Bool(b) => json!(b),
            FieldValue::Int(i) => json!(i),
            FieldValue::Text(s) => json!(s),
            FieldValue::List(items) => json!(items),
            FieldValue::Null => Value::Null,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "boolean",
            FieldValue::Int(_) => "integer",
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "list",
            FieldValue::Null => "null",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::List(items) => write!(f, "[{}]", items.join(", ")),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        FieldValue::List(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// A configuration object whose fields can be selected by name
pub trait Inspect: Send + Sync {
    /// Identity of the record inside a collection (policy name, domain, ...)
    fn identity(&self) -> String;

    fn field(&self, name: &str) -> Option<FieldValue>;

    fn field_names(&self) -> &'static [&'static str];
}

/// Implement [`Inspect`] for a DTO
///
/// ```ignore
/// inspect!(TransportConfig {
///     identity: |c| c.identity.clone().unwrap_or_default(),
///     fields: {
///         "SmtpClientAuthenticationDisabled" => |c| c.smtp_client_authentication_disabled,
///     }
/// });
/// ```
macro_rules! inspect {
    ($ty:ty {
        identity: |$id_self:ident| $identity:expr,
        fields: { $($name:literal => |$field_self:ident| $value:expr),* $(,)? } $(,)?
    }) => {
        impl $crate::checks::record::Inspect for $ty {
            fn identity(&self) -> String {
                let $id_self = self;
                $identity
            }

            fn field(&self, name: &str) -> Option<$crate::checks::record::FieldValue> {
                match name {
                    $(
                        $name => {
                            let $field_self = self;
                            Some($crate::checks::record::FieldValue::from($value))
                        }
                    )*
                    _ => None,
                }
            }

            fn field_names(&self) -> &'static [&'static str] {
                &[$($name),*]
            }
        }
    };
}

pub(crate) use inspect;
