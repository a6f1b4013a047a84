use crate::engine::moment::coerce::coerce;
use crate::engine::moment::order::MomentOrder;
use crate::engine::types::ScalarValue;

/// Mergeable state of a moment: the sum of `x^p` and how many values fed it.
///
/// `sum == None` means no non-null value has been seen in this lineage,
/// which is not the same thing as a sum that happens to be zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartialAggregate {
    pub sum: Option<f64>,
    pub count: i64,
}

impl PartialAggregate {
    pub const EMPTY: PartialAggregate = PartialAggregate {
        sum: None,
        count: 0,
    };

    pub fn new(sum: Option<f64>, count: i64) -> Self {
        Self { sum, count }
    }

    pub fn is_empty(&self) -> bool {
        self.sum.is_none()
    }

    #[inline]
    pub fn merge(&mut self, other: &PartialAggregate) {
        *self = combine([&*self, other]);
    }
}

/// Initial phase: one raw value becomes one partial.
pub fn initial(value: &ScalarValue, order: MomentOrder) -> PartialAggregate {
    match coerce(value) {
        Some(x) => PartialAggregate {
            sum: Some(order.apply(x)),
            count: 1,
        },
        None => PartialAggregate::EMPTY,
    }
}

/// Intermediate phase: folds any number of partials into one.
///
/// Null sums add 0 to the running total without marking the result as
/// defined, so counts can be summed blindly.
pub fn combine<'a, I>(aggregates: I) -> PartialAggregate
where
    I: IntoIterator<Item = &'a PartialAggregate>,
{
    let mut sum = 0.0;
    let mut count = 0i64;
    let mut saw_non_null = false;

    for agg in aggregates {
        saw_non_null |= agg.sum.is_some();
        sum += agg.sum.unwrap_or(0.0);
        count += agg.count;
    }

    PartialAggregate {
        sum: saw_non_null.then_some(sum),
        count,
    }
}
