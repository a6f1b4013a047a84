pub use super::factories::{PartialAggregateFactory, TupleFactory, ValuesFactory};

pub struct Factory;

impl Factory {
    pub fn partial() -> PartialAggregateFactory {
        PartialAggregateFactory::new()
    }

    pub fn tuple() -> TupleFactory {
        TupleFactory::new()
    }

    pub fn values() -> ValuesFactory {
        ValuesFactory::new()
    }
}
