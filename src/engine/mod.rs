pub mod errors;
pub mod moment;
pub mod pipeline;
pub mod types;
pub mod udf;
