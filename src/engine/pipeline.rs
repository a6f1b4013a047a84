use rayon::prelude::*;
use tracing::debug;

use crate::engine::errors::MomentError;
use crate::engine::moment::central::{
    CentralMoments, central_degree, combine_central, finalize_central, initial_central,
};
use crate::engine::moment::finalize::finalize;
use crate::engine::moment::order::MomentOrder;
use crate::engine::moment::partial::{PartialAggregate, combine, initial};
use crate::engine::types::ScalarValue;
use crate::engine::udf::datum::{Datum, Tuple, values_to_bag};
use crate::engine::udf::function::MomentFunction;
use crate::engine::udf::phase::Phase;
use crate::engine::udf::registry::FunctionRegistry;
use crate::shared::config::PipelineConfig;

/// In-process stand-in for the distributed engine: partitions a group into
/// shards, runs Initial per value, combines per shard, then reduces the shard
/// outputs through a combine tree before the final division.
#[derive(Debug, Clone)]
pub struct LocalPipeline {
    shard_count: usize,
    fan_in: usize,
    parallel: bool,
    central_max_order: u32,
}

impl LocalPipeline {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            shard_count: config.shard_count.max(1),
            fan_in: config.combine_fan_in.max(2),
            parallel: config.parallel,
            central_max_order: config.central_max_order,
        }
    }

    pub fn with_shards(shard_count: usize, fan_in: usize) -> Self {
        Self::new(&PipelineConfig {
            shard_count,
            combine_fan_in: fan_in,
            ..PipelineConfig::default()
        })
    }

    pub fn shard_count(&self) -> usize {
        self.shard_count
    }

    pub fn fan_in(&self) -> usize {
        self.fan_in
    }

    /// Splits `values` into exactly `shard_count` contiguous slices. Trailing
    /// shards are empty when there are fewer values than shards.
    pub fn partition<'a>(&self, values: &'a [ScalarValue]) -> Vec<&'a [ScalarValue]> {
        let chunk = values.len().div_ceil(self.shard_count).max(1);
        (0..self.shard_count)
            .map(|i| {
                let start = (i * chunk).min(values.len());
                let end = (start + chunk).min(values.len());
                &values[start..end]
            })
            .collect()
    }

    /// Initial on every value of every shard, combined once per shard.
    pub fn shard_partials(
        &self,
        values: &[ScalarValue],
        order: MomentOrder,
    ) -> Vec<PartialAggregate> {
        let shards = self.partition(values);
        let reduce_shard = |shard: &&[ScalarValue]| {
            let partials: Vec<PartialAggregate> =
                shard.iter().map(|v| initial(v, order)).collect();
            combine(&partials)
        };
        if self.parallel {
            shards.par_iter().map(reduce_shard).collect()
        } else {
            shards.iter().map(reduce_shard).collect()
        }
    }

    /// Combines partials level by level, at most `fan_in` at a time, until a
    /// single root remains.
    pub fn reduce_tree(&self, mut level: Vec<PartialAggregate>) -> PartialAggregate {
        let mut depth = 0usize;
        while level.len() > 1 {
            level = level.chunks(self.fan_in).map(combine).collect();
            depth += 1;
        }
        debug!(target: "moment_agg::pipeline", depth, "Combine tree reduced");
        level.pop().unwrap_or(PartialAggregate::EMPTY)
    }

    pub fn run(&self, values: &[ScalarValue], order: MomentOrder) -> Option<f64> {
        debug!(
            target: "moment_agg::pipeline",
            values = values.len(),
            shards = self.shard_count,
            fan_in = self.fan_in,
            "Running algebraic moment"
        );
        let root = self.reduce_tree(self.shard_partials(values, order));
        finalize(&root)
    }

    /// Same plan, but every phase goes through the engine-facing tuples and
    /// is resolved by name from `registry`.
    pub fn run_through_registry(
        &self,
        registry: &FunctionRegistry,
        values: &[ScalarValue],
        order: MomentOrder,
    ) -> Result<Option<f64>, MomentError> {
        let order_datum = Datum::Scalar(ScalarValue::Float64(order.value()));
        let initial_name = MomentFunction::initial_name();
        let intermediate_name = MomentFunction::intermediate_name();

        let mut level: Vec<Tuple> = Vec::with_capacity(self.shard_count);
        for shard in self.partition(values) {
            let mut rows = Vec::with_capacity(shard.len());
            for row in values_to_bag(shard) {
                let input = vec![Datum::Bag(vec![row]), order_datum.clone()];
                rows.push(expect_tuple(registry.invoke(&initial_name, &input)?)?);
            }
            let input = vec![Datum::Bag(rows)];
            level.push(expect_tuple(registry.invoke(&intermediate_name, &input)?)?);
        }

        while level.len() > self.fan_in {
            let mut next = Vec::with_capacity(level.len().div_ceil(self.fan_in));
            for group in level.chunks(self.fan_in) {
                let input = vec![Datum::Bag(group.to_vec())];
                next.push(expect_tuple(registry.invoke(&intermediate_name, &input)?)?);
            }
            level = next;
        }

        let output = registry.invoke(&MomentFunction::final_name(), &vec![Datum::Bag(level)])?;
        match output {
            Datum::Scalar(v) => Ok(v.as_f64()),
            other => Err(MomentError::structural(
                Phase::Final,
                format!("final phase produced {:?}", other),
            )),
        }
    }

    /// Central moment over the same shard layout.
    pub fn run_central(
        &self,
        values: &[ScalarValue],
        order: MomentOrder,
    ) -> Result<Option<f64>, MomentError> {
        let degree = central_degree(order, self.central_max_order)?;
        let shards = self.partition(values);
        let reduce_shard = |shard: &&[ScalarValue]| {
            let parts: Vec<CentralMoments> = shard
                .iter()
                .map(|v| initial_central(v, degree))
                .collect();
            combine_central(&parts)
        };
        let mut level: Vec<CentralMoments> = if self.parallel {
            shards.par_iter().map(reduce_shard).collect::<Result<_, _>>()?
        } else {
            shards.iter().map(reduce_shard).collect::<Result<_, _>>()?
        };
        while level.len() > 1 {
            level = level
                .chunks(self.fan_in)
                .map(combine_central)
                .collect::<Result<_, _>>()?;
        }
        Ok(level.pop().as_ref().and_then(finalize_central))
    }
}

fn expect_tuple(datum: Datum) -> Result<Tuple, MomentError> {
    match datum {
        Datum::Tuple(t) => Ok(t),
        other => Err(MomentError::structural(
            Phase::Intermediate,
            format!("expected a partial tuple, got {:?}", other),
        )),
    }
}
