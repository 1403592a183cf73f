// assertions/value.rs - Checks on one cell

use crate::error::AssertionError;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct ValueAssert<'a> {
    value: &'a Value,
    target: String,
}

impl<'a> ValueAssert<'a> {
    pub(crate) fn new(value: &'a Value, target: String) -> Self {
        Self { value, target }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Equal under the semantic type of the stored value: numbers compare
    /// numerically, text exactly, dates by calendar day.
    pub fn is_equal_to(self, expected: impl Into<Value>) -> Result<Self, AssertionError> {
        let expected = expected.into();
        if !self.value.matches(&expected) {
            return Err(AssertionError::new(
                self.target,
                "value equal to",
                describe(&expected),
                describe(self.value),
            ));
        }
        Ok(self)
    }

    pub fn is_not_equal_to(self, unexpected: impl Into<Value>) -> Result<Self, AssertionError> {
        let unexpected = unexpected.into();
        if self.value.matches(&unexpected) {
            return Err(AssertionError::new(
                self.target,
                "value not equal to",
                format!("not {}", describe(&unexpected)),
                describe(self.value),
            ));
        }
        Ok(self)
    }

    pub fn is_null(self) -> Result<Self, AssertionError> {
        if !self.value.is_null() {
            return Err(AssertionError::new(
                self.target,
                "value is null",
                Value::Null,
                describe(self.value),
            ));
        }
        Ok(self)
    }

    pub fn is_not_null(self) -> Result<Self, AssertionError> {
        if self.value.is_null() {
            return Err(AssertionError::new(
                self.target,
                "value is not null",
                "not null",
                Value::Null,
            ));
        }
        Ok(self)
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => value.to_string(),
        _ => format!("{} ({})", value, value.kind()),
    }
}
