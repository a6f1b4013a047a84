use crate::engine::errors::MomentError;
use crate::engine::moment::partial::PartialAggregate;
use crate::engine::types::ScalarValue;
use crate::engine::udf::phase::Phase;

/// A field of an engine tuple.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Scalar(ScalarValue),
    Tuple(Tuple),
    Bag(Bag),
}

pub type Tuple = Vec<Datum>;
pub type Bag = Vec<Tuple>;

impl Datum {
    pub fn null() -> Self {
        Datum::Scalar(ScalarValue::Null)
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Datum::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&Tuple> {
        match self {
            Datum::Tuple(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_bag(&self) -> Option<&Bag> {
        match self {
            Datum::Bag(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Scalar(ScalarValue::Null))
    }
}

impl From<ScalarValue> for Datum {
    fn from(value: ScalarValue) -> Self {
        Datum::Scalar(value)
    }
}

impl From<Option<f64>> for Datum {
    fn from(value: Option<f64>) -> Self {
        Datum::Scalar(ScalarValue::from(value))
    }
}

impl From<Bag> for Datum {
    fn from(bag: Bag) -> Self {
        Datum::Bag(bag)
    }
}

/// Encodes a partial as the `(sum, count)` tuple passed between phases.
pub fn partial_to_tuple(partial: &PartialAggregate) -> Tuple {
    vec![
        Datum::from(partial.sum),
        Datum::Scalar(ScalarValue::Int64(partial.count)),
    ]
}

/// Decodes a `(sum, count)` tuple emitted by an earlier phase.
pub fn partial_from_tuple(tuple: &Tuple, phase: Phase) -> Result<PartialAggregate, MomentError> {
    let [sum_field, count_field] = tuple.as_slice() else {
        return Err(MomentError::structural(
            phase,
            format!("partial tuple must have 2 fields, got {}", tuple.len()),
        ));
    };

    let sum = match sum_field.as_scalar() {
        Some(ScalarValue::Null) => None,
        Some(v @ (ScalarValue::Float64(_) | ScalarValue::Float32(_))) => v.as_f64(),
        _ => {
            return Err(MomentError::structural(
                phase,
                format!("partial sum must be a double or null, got {:?}", sum_field),
            ));
        }
    };

    let count = match count_field.as_scalar() {
        Some(v @ (ScalarValue::Int64(_) | ScalarValue::Int32(_))) => v.as_i64(),
        _ => None,
    };
    let Some(count) = count.filter(|c| *c >= 0) else {
        return Err(MomentError::structural(
            phase,
            format!(
                "partial count must be a non-negative long, got {:?}",
                count_field
            ),
        ));
    };

    Ok(PartialAggregate { sum, count })
}

/// Wraps raw values as a one-column bag, the shape the engine groups into.
pub fn values_to_bag(values: &[ScalarValue]) -> Bag {
    values
        .iter()
        .map(|v| vec![Datum::Scalar(v.clone())])
        .collect()
}
