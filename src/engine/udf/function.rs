use tracing::debug;

use crate::engine::errors::MomentError;
use crate::engine::moment::direct::{AccumulatorState, MomentAccumulator, compute};
use crate::engine::moment::finalize::finalize;
use crate::engine::moment::order::MomentOrder;
use crate::engine::moment::partial::{PartialAggregate, combine, initial};
use crate::engine::types::{LogicalType, ScalarValue};
use crate::engine::udf::datum::{Bag, Datum, Tuple, partial_from_tuple, partial_to_tuple};
use crate::engine::udf::phase::{FUNCTION_NAME, Phase};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: Option<String>,
    pub logical_type: LogicalType,
}

impl FieldSchema {
    pub fn new(name: Option<&str>, logical_type: LogicalType) -> Self {
        Self {
            name: name.map(str::to_string),
            logical_type,
        }
    }
}

/// One declared argument signature and the implementation it maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncSignature {
    pub implementation: String,
    pub fields: Vec<FieldSchema>,
}

impl FuncSignature {
    pub fn order_type(&self) -> Option<LogicalType> {
        self.fields.get(1).map(|f| f.logical_type)
    }
}

/// Order argument types the function declares, in resolution order.
pub const ORDER_TYPES: [LogicalType; 3] = [
    LogicalType::Double,
    LogicalType::Float,
    LogicalType::Integer,
];

/// Moment aggregate as exposed to the host engine.
///
/// The algebraic entry points are stateless; only the accumulate trio keeps
/// state, scoped to one group at a time.
#[derive(Debug, Default)]
pub struct MomentFunction {
    accumulator: Option<MomentAccumulator>,
}

impl MomentFunction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_schema() -> FieldSchema {
        FieldSchema::new(None, LogicalType::Double)
    }

    /// Three declared signatures, one per order representation. They all
    /// resolve to the same implementation.
    pub fn arg_to_func_mapping() -> Vec<FuncSignature> {
        ORDER_TYPES
            .iter()
            .map(|order_type| FuncSignature {
                implementation: format!("{}.{}", FUNCTION_NAME, order_type),
                fields: vec![
                    FieldSchema::new(Some("data"), LogicalType::Bag),
                    FieldSchema::new(Some("orderOfMoment"), *order_type),
                ],
            })
            .collect()
    }

    /// Picks the signature matching the declared type of the order argument.
    pub fn resolve_signature(order_type: LogicalType) -> Option<FuncSignature> {
        Self::arg_to_func_mapping()
            .into_iter()
            .find(|sig| sig.order_type() == Some(order_type))
    }

    pub fn initial_name() -> String {
        Phase::Initial.entry_name()
    }

    pub fn intermediate_name() -> String {
        Phase::Intermediate.entry_name()
    }

    pub fn final_name() -> String {
        Phase::Final.entry_name()
    }

    /// Single-shot evaluation of `(bag, order)`.
    pub fn exec(input: &Tuple) -> Result<Option<f64>, MomentError> {
        let (bag, order) = bag_and_order(input, Phase::Exec)?;
        let values = first_field_values(bag, Phase::Exec)?;
        Ok(compute(&values, order))
    }

    /// Initial phase of `(bag, order)`. The engine hands Initial one row at
    /// a time, so only the first row of the bag is read.
    pub fn initial(input: &Tuple) -> Result<Tuple, MomentError> {
        let (bag, order) = bag_and_order(input, Phase::Initial)?;
        if bag.len() > 1 {
            debug!(
                target: "moment_agg::udf",
                rows = bag.len(),
                "Initial received more than one row, reading the first"
            );
        }
        let partial = match bag.first() {
            Some(row) => initial(&row_value(row, Phase::Initial)?, order),
            None => PartialAggregate::EMPTY,
        };
        Ok(partial_to_tuple(&partial))
    }

    /// Intermediate phase of `(bag of (sum, count))`.
    pub fn intermediate(input: &Tuple) -> Result<Tuple, MomentError> {
        let combined = combine_bag(input, Phase::Intermediate)?;
        Ok(partial_to_tuple(&combined))
    }

    /// Final phase of `(bag of (sum, count))`: combines once more, then divides.
    pub fn final_value(input: &Tuple) -> Result<Option<f64>, MomentError> {
        let combined = combine_bag(input, Phase::Final)?;
        Ok(finalize(&combined))
    }

    pub fn accumulate(&mut self, input: &Tuple) -> Result<(), MomentError> {
        let (bag, order) = bag_and_order(input, Phase::Accumulate)?;
        let values = first_field_values(bag, Phase::Accumulate)?;

        let reusable = match self.accumulator.as_ref() {
            Some(acc) if acc.order() == order => true,
            Some(acc) if acc.state() == AccumulatorState::Accumulating => {
                return Err(MomentError::structural(
                    Phase::Accumulate,
                    format!(
                        "order changed within a group: {} then {}",
                        acc.order().value(),
                        order.value()
                    ),
                ));
            }
            _ => false,
        };
        if !reusable {
            self.accumulator = None;
        }
        self.accumulator
            .get_or_insert_with(|| MomentAccumulator::new(order))
            .accumulate(&values);
        Ok(())
    }

    pub fn value(&self) -> Option<f64> {
        self.accumulator.as_ref().and_then(MomentAccumulator::value)
    }

    /// Clears the accumulated group so the instance can serve the next key.
    pub fn cleanup(&mut self) {
        if let Some(acc) = self.accumulator.as_mut() {
            acc.reset();
        }
    }
}

fn bag_and_order(input: &Tuple, phase: Phase) -> Result<(&Bag, MomentOrder), MomentError> {
    let [data, order] = input.as_slice() else {
        return Err(MomentError::structural(
            phase,
            format!("expected (data, orderOfMoment), got {} fields", input.len()),
        ));
    };
    let bag = data
        .as_bag()
        .ok_or_else(|| MomentError::structural(phase, "first argument must be a bag"))?;
    let order = order
        .as_scalar()
        .and_then(MomentOrder::from_scalar)
        .ok_or_else(|| {
            MomentError::structural(phase, format!("unusable orderOfMoment: {:?}", order))
        })?;
    Ok((bag, order))
}

/// First field of a row. Empty rows count as null; a nested tuple or bag
/// means something slipped past the loader and is fatal. The summing
/// entry points report it as a computation failure, Initial as a bad shape.
fn row_value(row: &Tuple, phase: Phase) -> Result<ScalarValue, MomentError> {
    match row.first() {
        None => Ok(ScalarValue::Null),
        Some(Datum::Scalar(v)) => Ok(v.clone()),
        Some(other) if phase == Phase::Initial => Err(MomentError::structural(
            phase,
            format!("expected a scalar value, found {:?}", other),
        )),
        Some(other) => Err(MomentError::Computation(format!(
            "expected a scalar value, found {:?}",
            other
        ))),
    }
}

fn first_field_values(bag: &Bag, phase: Phase) -> Result<Vec<ScalarValue>, MomentError> {
    bag.iter().map(|row| row_value(row, phase)).collect()
}

fn combine_bag(input: &Tuple, phase: Phase) -> Result<PartialAggregate, MomentError> {
    let bag = input
        .first()
        .and_then(Datum::as_bag)
        .ok_or_else(|| MomentError::structural(phase, "expected a bag of partial tuples"))?;
    let partials = bag
        .iter()
        .map(|t| partial_from_tuple(t, phase))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(combine(&partials))
}
