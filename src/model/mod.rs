pub mod coercions;
pub mod collections;
pub mod errors;
pub mod values;

pub use collections::*;
pub use errors::*;
pub use values::*;
