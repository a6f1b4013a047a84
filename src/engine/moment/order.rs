use crate::engine::types::{LogicalType, ScalarValue};

/// Order `p` of the moment, normalised to a double.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentOrder(f64);

impl MomentOrder {
    pub fn new(order: f64) -> Self {
        Self(order)
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Parses the order the way the engine hands it over: any scalar whose
    /// textual form is a number is accepted.
    pub fn from_scalar(value: &ScalarValue) -> Option<Self> {
        OrderArg::from_scalar(value).map(OrderArg::normalize)
    }

    /// Raises `x` to this order with the general power function.
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        x.powf(self.0)
    }
}

impl From<OrderArg> for MomentOrder {
    fn from(arg: OrderArg) -> Self {
        arg.normalize()
    }
}

impl From<f64> for MomentOrder {
    fn from(order: f64) -> Self {
        MomentOrder(order)
    }
}

impl From<f32> for MomentOrder {
    fn from(order: f32) -> Self {
        OrderArg::Float(order).normalize()
    }
}

impl From<i32> for MomentOrder {
    fn from(order: i32) -> Self {
        OrderArg::Integer(order).normalize()
    }
}

/// The three representations the order may be declared with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderArg {
    Integer(i32),
    Float(f32),
    Double(f64),
}

impl OrderArg {
    pub fn logical_type(&self) -> LogicalType {
        match self {
            OrderArg::Integer(_) => LogicalType::Integer,
            OrderArg::Float(_) => LogicalType::Float,
            OrderArg::Double(_) => LogicalType::Double,
        }
    }

    /// A float order keeps its written decimal value: `0.1f32` becomes
    /// `0.1`, not the widened `0.10000000149011612`.
    pub fn normalize(self) -> MomentOrder {
        match self {
            OrderArg::Integer(i) => MomentOrder(i as f64),
            OrderArg::Float(f) => MomentOrder(f.to_string().parse().unwrap_or(f as f64)),
            OrderArg::Double(d) => MomentOrder(d),
        }
    }

    pub fn from_scalar(value: &ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Int32(i) => Some(OrderArg::Integer(*i)),
            ScalarValue::Float32(f) => Some(OrderArg::Float(*f)),
            ScalarValue::Int64(i) => Some(OrderArg::Double(*i as f64)),
            ScalarValue::Float64(d) => Some(OrderArg::Double(*d)),
            ScalarValue::Utf8(_) | ScalarValue::Binary(_) => value
                .to_string_repr()
                .trim()
                .parse::<f64>()
                .ok()
                .map(OrderArg::Double),
            ScalarValue::Null | ScalarValue::Boolean(_) => None,
        }
    }
}
