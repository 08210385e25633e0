//! Safe SQL builder: identifiers from fixed table descriptors only, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
