//! kmlcentroid - Compute the centroid of the first polygon in a KML file

pub mod config;
pub mod domain;
pub mod geometry;
pub mod kml;
pub mod output;
