//! Declarative field constraints checked against request bodies

use serde::Serialize;
use serde_json::Value;

/// A single constraint failure reported back to the client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
    pub value: Value,
}

#[derive(Debug, Clone, Copy)]
struct LengthBound {
    min: usize,
    max: usize,
    message: &'static str,
}

/// Constraints on one body field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    field: &'static str,
    trim: bool,
    required: Option<&'static str>,
    length: Option<LengthBound>,
    boolean: Option<&'static str>,
}

impl FieldRule {
    pub const fn field(field: &'static str) -> Self {
        Self {
            field,
            trim: false,
            required: None,
            length: None,
            boolean: None,
        }
    }

    /// Ignore surrounding whitespace before checking the value
    pub const fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub const fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }

    /// Bound the length in characters, inclusive on both ends
    pub const fn length(mut self, min: usize, max: usize, message: &'static str) -> Self {
        self.length = Some(LengthBound { min, max, message });
        self
    }

    pub const fn boolean(mut self, message: &'static str) -> Self {
        self.boolean = Some(message);
        self
    }

    fn check(&self, body: &Value, violations: &mut Vec<FieldViolation>) {
        let raw = body.get(self.field).cloned().unwrap_or(Value::Null);
        let mut violate = |message: &str| {
            violations.push(FieldViolation {
                field: self.field.to_string(),
                message: message.to_string(),
                value: raw.clone(),
            });
        };

        if let Some(message) = self.boolean {
            match raw {
                Value::Bool(_) => {}
                Value::Null => violate(self.required.unwrap_or(message)),
                _ => violate(message),
            }
            return;
        }

        let text = text_of(&raw);
        let text = if self.trim { text.trim() } else { text.as_str() };

        if let Some(message) = self.required {
            if text.is_empty() {
                violate(message);
            }
        }

        if let Some(bound) = self.length {
            let len = text.chars().count();
            if len < bound.min || len > bound.max {
                violate(bound.message);
            }
        }
    }
}

/// Rules for `PUT /shows/:id/rating`
pub const RATING_RULES: &[FieldRule] = &[FieldRule::field("rating")
    .trim()
    .required("Rating is required")
    .length(1, 25, "Rating must be between 1 and 25 characters")];

/// Rules for `PUT /shows/:id/availability`
pub const AVAILABILITY_RULES: &[FieldRule] = &[FieldRule::field("available")
    .required("Availability is required")
    .boolean("Availability must be a boolean")];

/// Rules for `PUT /shows/:id/updates`
pub const STATUS_RULES: &[FieldRule] = &[FieldRule::field("status")
    .trim()
    .required("Status is required")
    .length(5, 25, "Status must be between 5 and 25 characters")];

/// Check every rule against the body, collecting all violations
pub fn validate(body: &Value, rules: &[FieldRule]) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();
    for rule in rules {
        rule.check(body, &mut violations);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// String form of a field, trimmed. Missing fields read as empty.
pub fn trimmed_str(body: &Value, field: &str) -> String {
    body.get(field)
        .map(text_of)
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
