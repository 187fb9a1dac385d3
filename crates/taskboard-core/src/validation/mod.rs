//! Input validation
//!
//! A single pure predicate, [`validate`], checks one value against a set of
//! optional constraints. Every supplied constraint must hold; absent ones
//! impose nothing.
//!
//! Upper bounds follow truthiness: a `max_length` or `max` of zero counts
//! as "not set" and is never enforced.

/// The value under validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Textual input, length constraints apply
    Text(&'a str),
    /// Numeric input, range constraints apply unless NaN
    Number(f64),
}

impl Default for Value<'_> {
    fn default() -> Self {
        Self::Text("")
    }
}

impl Value<'_> {
    /// Truthiness of the raw value: non-empty text, non-zero non-NaN number
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
        }
    }
}

/// A value together with the constraints it must satisfy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationConfig<'a> {
    pub value: Value<'a>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl<'a> ValidationConfig<'a> {
    /// Start a config for a text value
    pub fn text(value: &'a str) -> Self {
        Self {
            value: Value::Text(value),
            ..Self::default()
        }
    }

    /// Start a config for a numeric value
    pub fn number(value: f64) -> Self {
        Self {
            value: Value::Number(value),
            ..Self::default()
        }
    }

    /// Require a truthy value
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Minimum trimmed length for text
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    /// Maximum trimmed length for text (zero means unbounded)
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// Inclusive lower bound for numbers
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound for numbers (zero means unbounded)
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// Check a value against its constraints.
pub fn validate(config: &ValidationConfig<'_>) -> bool {
    let mut is_valid = true;

    if config.required {
        is_valid = is_valid && config.value.is_truthy();
    }

    match config.value {
        Value::Text(text) => {
            let length = text.trim().chars().count();

            if let Some(min_length) = config.min_length {
                is_valid = is_valid && length >= min_length;
            }

            if let Some(max_length) = config.max_length.filter(|&max| max != 0) {
                is_valid = is_valid && length <= max_length;
            }
        }
        Value::Number(n) if !n.is_nan() => {
            if let Some(min) = config.min {
                is_valid = is_valid && n >= min;
            }

            if let Some(max) = config.max.filter(|&max| max != 0.0 && !max.is_nan()) {
                is_valid = is_valid && n <= max;
            }
        }
        Value::Number(_) => {}
    }

    is_valid
}
