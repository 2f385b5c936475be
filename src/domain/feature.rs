use crate::domain::Ring;

/// Geometry payload carried by a feature.
///
/// KML wraps concrete geometries one level deep in container elements
/// such as `MultiGeometry`; `Container` models that single level of
/// indirection. Points, line strings and everything else collapse into
/// `Other` - only polygons matter downstream.
#[derive(Debug, Clone)]
pub enum Geometry {
    Polygon(Ring),
    Container(Box<Geometry>),
    Other,
}

/// A node of the KML feature tree.
///
/// Documents and folders nest placemarks arbitrarily deep, so every
/// feature uniformly carries an optional geometry payload plus an ordered
/// list of child features.
#[derive(Debug, Clone, Default)]
pub struct Feature {
    pub name: Option<String>,
    pub geometry: Option<Geometry>,
    pub children: Vec<Feature>,
}
