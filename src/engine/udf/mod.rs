pub mod datum;
pub mod function;
pub mod phase;
pub mod registry;

pub use datum::{Bag, Datum, Tuple};
pub use function::{FieldSchema, FuncSignature, MomentFunction};
pub use phase::Phase;
pub use registry::FunctionRegistry;
