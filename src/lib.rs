pub mod model;
pub mod parser;
mod shape;
mod size;
mod summary;

pub use model::*;
pub use parser::parse_value;
pub use shape::*;
pub use size::*;
pub use summary::*;
