pub mod centroid;

pub use centroid::{AREA_EPSILON, Centroid, polygon_centroid, signed_area};
