//! Compliance predicates and their application to upstream records

use crate::checks::outcome::{ResourceResult, ResultShape};
use crate::checks::record::{FieldValue, Inspect};
use crate::error::{Cis365Error, Result};
use serde_json::{json, Value};

/// Predicate over one observed field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expect {
    /// Boolean equality
    Is(bool),
    /// Case-insensitive text equality
    Equals(&'static str),
    /// Case-insensitive text inequality
    NotEquals(&'static str),
    /// Case-insensitive membership
    OneOf(&'static [&'static str]),
    AtMost(i64),
    AtLeast(i64),
    /// No list entry starts with the prefix (case-insensitive)
    NoneStartingWith(&'static str),
}

impl Expect {
    /// Evaluate against an observed value
    ///
    /// A null value or a value of the wrong kind cannot be evaluated and is
    /// reported as an error rather than as non-compliance.
    pub fn evaluate(&self, field: &str, value: &FieldValue) -> Result<bool> {
        let compliant = match (self, value) {
            (_, FieldValue::Null) => {
                return Err(Cis365Error::Evaluation(format!(
                    "field '{}' is missing from the response",
                    field
                )));
            }
            (Expect::Is(expected), FieldValue::Bool(actual)) => actual == expected,
            (Expect::Equals(expected), FieldValue::Text(actual)) => {
                actual.eq_ignore_ascii_case(expected)
            }
            (Expect::NotEquals(unwanted), FieldValue::Text(actual)) => {
                !actual.eq_ignore_ascii_case(unwanted)
            }
            (Expect::OneOf(allowed), FieldValue::Text(actual)) => {
                allowed.iter().any(|a| actual.eq_ignore_ascii_case(a))
            }
            (Expect::AtMost(limit), FieldValue::Int(actual)) => actual <= limit,
            (Expect::AtLeast(limit), FieldValue::Int(actual)) => actual >= limit,
            (Expect::NoneStartingWith(prefix), FieldValue::List(items)) => {
                let prefix = prefix.to_ascii_lowercase();
                !items
                    .iter()
                    .any(|item| item.to_ascii_lowercase().starts_with(&prefix))
            }
            (expect, other) => {
                return Err(Cis365Error::Evaluation(format!(
                    "field '{}' is {} ({}), cannot apply {}",
                    field,
                    other.kind(),
                    other,
                    expect.describe()
                )));
            }
        };

        Ok(compliant)
    }

    /// Expected value as reported in `ExpectedValue`
    pub fn expected_value(&self) -> Value {
        match self {
            Expect::Is(b) => json!(b),
            Expect::Equals(s) => json!(s),
            Expect::OneOf(items) => json!(items),
            Expect::NotEquals(_)
            | Expect::AtMost(_)
            | Expect::AtLeast(_)
            | Expect::NoneStartingWith(_) => json!(self.describe()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Expect::Is(b) => format!("= {}", b),
            Expect::Equals(s) => format!("= {}", s),
            Expect::NotEquals(s) => format!("!= {}", s),
            Expect::OneOf(items) => format!("one of [{}]", items.join(", ")),
            Expect::AtMost(n) => format!("<= {}", n),
            Expect::AtLeast(n) => format!(">= {}", n),
            Expect::NoneStartingWith(p) => format!("no entry starting with {}", p),
        }
    }
}

/// Detail notes attached to a result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Notes {
    pub compliant: &'static str,
    pub non_compliant: &'static str,
}

/// Field selector plus predicate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub field: &'static str,
    pub expect: Expect,
    /// Reported name, defaults to the field name
    pub label: Option<&'static str>,
    pub notes: Option<Notes>,
    pub shape: ResultShape,
}

impl FieldRule {
    pub const fn new(field: &'static str, expect: Expect) -> Self {
        Self {
            field,
            expect,
            label: None,
            notes: None,
            shape: ResultShape::Compared,
        }
    }

    pub const fn shaped(mut self, shape: ResultShape) -> Self {
        self.shape = shape;
        self
    }

    pub const fn labelled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub const fn noted(mut self, compliant: &'static str, non_compliant: &'static str) -> Self {
        self.notes = Some(Notes {
            compliant,
            non_compliant,
        });
        self
    }

    pub fn name(&self) -> &'static str {
        self.label.unwrap_or(self.field)
    }

    fn observe(&self, record: &dyn Inspect) -> Result<FieldValue> {
        record.field(self.field).ok_or_else(|| {
            Cis365Error::Evaluation(format!(
                "unknown field '{}' on {}",
                self.field,
                record.identity()
            ))
        })
    }

    fn evaluate(&self, record: &dyn Inspect, resource: Option<String>) -> Result<ResourceResult> {
        let observed = self.observe(record)?;
        let is_compliant = self.expect.evaluate(self.field, &observed)?;

        Ok(ResourceResult {
            name: self.name().to_string(),
            resource,
            current_value: observed.to_json(),
            expected_value: Some(self.expect.expected_value()),
            is_compliant,
            details: self.notes.map(|n| {
                if is_compliant {
                    n.compliant.to_string()
                } else {
                    n.non_compliant.to_string()
                }
            }),
            shape: self.shape,
        })
    }
}

/// How field rules turn into resource results
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// One result per field rule per record
    Each(&'static [FieldRule]),
    /// All field rules of a record folded into one result
    All {
        label: &'static str,
        fields: &'static [FieldRule],
        notes: Option<Notes>,
    },
}

impl Rule {
    pub fn fields(&self) -> &'static [FieldRule] {
        match *self {
            Rule::Each(fields) => fields,
            Rule::All { fields, .. } => fields,
        }
    }

    /// Apply to records fetched from a source
    ///
    /// `collection` marks records that came from a list; their identity is
    /// reported as the result's `Resource`.
    pub fn apply(&self, records: &[Box<dyn Inspect>], collection: bool) -> Result<Vec<ResourceResult>> {
        let mut results = Vec::new();

        for record in records {
            let resource = collection.then(|| record.identity());

            match self {
                Rule::Each(fields) => {
                    for rule in fields.iter() {
                        results.push(rule.evaluate(record.as_ref(), resource.clone())?);
                    }
                }
                Rule::All {
                    label,
                    fields,
                    notes,
                } => {
                    results.push(fold(label, fields, *notes, record.as_ref(), resource)?);
                }
            }
        }

        Ok(results)
    }
}

fn fold(
    label: &str,
    fields: &[FieldRule],
    notes: Option<Notes>,
    record: &dyn Inspect,
    resource: Option<String>,
) -> Result<ResourceResult> {
    let mut current = serde_json::Map::new();
    let mut expected = serde_json::Map::new();
    let mut is_compliant = true;

    for rule in fields {
        let observed = rule.observe(record)?;
        is_compliant &= rule.expect.evaluate(rule.field, &observed)?;
        current.insert(rule.field.to_string(), observed.to_json());
        expected.insert(rule.field.to_string(), rule.expect.expected_value());
    }

    Ok(ResourceResult {
        name: label.to_string(),
        resource,
        current_value: Value::Object(current),
        expected_value: Some(Value::Object(expected)),
        is_compliant,
        details: notes.map(|n| {
            if is_compliant {
                n.compliant.to_string()
            } else {
                n.non_compliant.to_string()
            }
        }),
        shape: ResultShape::Compared,
    })
}
