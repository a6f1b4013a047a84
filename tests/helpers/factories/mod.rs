pub mod partial_aggregate_factory;
pub mod tuple_factory;
pub mod values_factory;

pub use partial_aggregate_factory::PartialAggregateFactory;
pub use tuple_factory::TupleFactory;
pub use values_factory::ValuesFactory;

#[cfg(test)]
mod partial_aggregate_factory_test;
#[cfg(test)]
mod tuple_factory_test;
#[cfg(test)]
mod values_factory_test;
