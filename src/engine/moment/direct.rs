use tracing::debug;

use crate::engine::moment::coerce::coerce;
use crate::engine::moment::order::MomentOrder;
use crate::engine::moment::partial::PartialAggregate;
use crate::engine::types::ScalarValue;

/// Sum of `x^p` and the number of coercible values, or `None` when no value
/// coerced at all.
fn power_sum(values: &[ScalarValue], order: MomentOrder) -> Option<(f64, i64)> {
    let mut sum = 0.0;
    let mut count = 0i64;
    for x in values.iter().filter_map(coerce) {
        sum += order.apply(x);
        count += 1;
    }
    (count > 0).then_some((sum, count))
}

/// Single-shot moment over a whole group.
pub fn compute(values: &[ScalarValue], order: MomentOrder) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let (sum, count) = power_sum(values, order)?;
    Some(sum / count as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorState {
    Uninitialized,
    Accumulating,
}

/// Streaming reducer owned by one group. Batches arrive in order on a single
/// thread; `reset` must be called between groups.
#[derive(Debug, Clone)]
pub struct MomentAccumulator {
    order: MomentOrder,
    running: Option<(f64, i64)>,
}

impl MomentAccumulator {
    pub fn new(order: MomentOrder) -> Self {
        Self {
            order,
            running: None,
        }
    }

    pub fn order(&self) -> MomentOrder {
        self.order
    }

    pub fn state(&self) -> AccumulatorState {
        match self.running {
            Some(_) => AccumulatorState::Accumulating,
            None => AccumulatorState::Uninitialized,
        }
    }

    pub fn accumulate(&mut self, batch: &[ScalarValue]) {
        let Some((sum, count)) = power_sum(batch, self.order) else {
            return;
        };
        let (running_sum, running_count) = self.running.get_or_insert((0.0, 0));
        *running_sum += sum;
        *running_count += count;
        debug!(
            target: "moment_agg::accumulator",
            batch = batch.len(),
            seen = *running_count,
            "Accumulated batch"
        );
    }

    pub fn value(&self) -> Option<f64> {
        match self.running {
            Some((sum, count)) if count > 0 => Some(sum / count as f64),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.running = None;
    }

    /// Current state as a mergeable partial, so a streamed group can still
    /// join a combine tree.
    pub fn snapshot(&self) -> PartialAggregate {
        match self.running {
            Some((sum, count)) => PartialAggregate::new(Some(sum), count),
            None => PartialAggregate::EMPTY,
        }
    }
}
