pub mod feature;
pub mod ring;

pub use feature::{Feature, Geometry};
pub use ring::Ring;
