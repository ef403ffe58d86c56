pub mod datatype;
pub mod queries;
pub mod sample_data;

pub use datatype::*;
pub use queries::*;
