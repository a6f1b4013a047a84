pub mod central;
pub mod coerce;
pub mod direct;
pub mod finalize;
pub mod order;
pub mod partial;

pub use direct::{AccumulatorState, MomentAccumulator, compute};
pub use finalize::finalize;
pub use order::{MomentOrder, OrderArg};
pub use partial::{PartialAggregate, combine, initial};
