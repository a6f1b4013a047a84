use crate::engine::types::ScalarValue;

pub struct ValuesFactory {
    values: Vec<ScalarValue>,
}

impl ValuesFactory {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn with_doubles(mut self, values: &[f64]) -> Self {
        self.values.extend(values.iter().map(|v| ScalarValue::Float64(*v)));
        self
    }

    pub fn with_nulls(mut self, n: usize) -> Self {
        self.values.extend(std::iter::repeat_n(ScalarValue::Null, n));
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.values.push(ScalarValue::Utf8(text.to_string()));
        self
    }

    pub fn with_value(mut self, value: ScalarValue) -> Self {
        self.values.push(value);
        self
    }

    /// `n` doubles `start, start + step, ...`, with every `null_every`-th
    /// slot replaced by a null when `null_every > 0`.
    pub fn with_sequence(mut self, start: f64, step: f64, n: usize, null_every: usize) -> Self {
        for i in 0..n {
            if null_every > 0 && i % null_every == null_every - 1 {
                self.values.push(ScalarValue::Null);
            } else {
                self.values.push(ScalarValue::Float64(start + step * i as f64));
            }
        }
        self
    }

    pub fn create(self) -> Vec<ScalarValue> {
        self.values
    }
}
