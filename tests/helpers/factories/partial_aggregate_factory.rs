use crate::engine::moment::partial::PartialAggregate;
use crate::engine::udf::datum::{Tuple, partial_to_tuple};

pub struct PartialAggregateFactory {
    sum: Option<f64>,
    count: i64,
}

impl PartialAggregateFactory {
    pub fn new() -> Self {
        Self {
            sum: None,
            count: 0,
        }
    }

    pub fn with_sum(mut self, sum: f64) -> Self {
        self.sum = Some(sum);
        self
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }

    /// Partial as emitted by Initial for a single non-null value.
    pub fn with_value(self, value: f64, order: f64) -> Self {
        self.with_sum(value.powf(order)).with_count(1)
    }

    pub fn create(self) -> PartialAggregate {
        PartialAggregate::new(self.sum, self.count)
    }

    pub fn create_tuple(self) -> Tuple {
        partial_to_tuple(&self.create())
    }
}
