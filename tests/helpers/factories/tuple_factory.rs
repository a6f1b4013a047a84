use crate::engine::moment::partial::PartialAggregate;
use crate::engine::types::ScalarValue;
use crate::engine::udf::datum::{Datum, Tuple, partial_to_tuple, values_to_bag};

/// Builds the input tuples the host engine passes to each entry point.
pub struct TupleFactory {
    values: Vec<ScalarValue>,
    order: Option<Datum>,
}

impl TupleFactory {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            order: Some(Datum::Scalar(ScalarValue::Float64(1.0))),
        }
    }

    pub fn with_values(mut self, values: Vec<ScalarValue>) -> Self {
        self.values = values;
        self
    }

    pub fn with_doubles(mut self, values: &[f64]) -> Self {
        self.values = values.iter().map(|v| ScalarValue::Float64(*v)).collect();
        self
    }

    pub fn with_order(mut self, order: f64) -> Self {
        self.order = Some(Datum::Scalar(ScalarValue::Float64(order)));
        self
    }

    pub fn with_order_datum(mut self, order: Datum) -> Self {
        self.order = Some(order);
        self
    }

    pub fn without_order(mut self) -> Self {
        self.order = None;
        self
    }

    /// `(bag, order)` as handed to exec, Initial and accumulate.
    pub fn create(self) -> Tuple {
        let mut tuple = vec![Datum::Bag(values_to_bag(&self.values))];
        if let Some(order) = self.order {
            tuple.push(order);
        }
        tuple
    }

    /// `(bag of (sum, count))` as handed to Intermediate and Final.
    pub fn partials(partials: &[PartialAggregate]) -> Tuple {
        vec![Datum::Bag(partials.iter().map(partial_to_tuple).collect())]
    }
}
