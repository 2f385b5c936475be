use log::debug;

use crate::domain::{Feature, Geometry, Ring};
use crate::kml::KmlError;
use crate::kml::parser::{build_features, polygon_ring};
use crate::kml::tree::XmlNode;

/// A polygon pulled out of a KML document: its display name (possibly
/// empty) and outer ring.
#[derive(Debug, Clone)]
pub struct LocatedPolygon {
    pub name: String,
    pub ring: Ring,
}

/// Find the first polygon in the document, in preorder document order.
///
/// The typed feature tree is walked first. Documents that keep geometry
/// outside any placemark structure are covered by a raw element scan that
/// matches tags by local name only.
///
/// The first polygon wins unconditionally: if its ring has fewer than 3
/// usable vertices the outcome is `NoCoordinates`, even when a later
/// polygon would have been usable.
pub fn locate_polygon(root: &XmlNode) -> Result<LocatedPolygon, KmlError> {
    let features = build_features(root);

    let located =
        find_in_features(&features).or_else(|| find_in_elements(root, &mut Vec::new()));

    match located {
        Some(found) if found.ring.is_usable() => {
            debug!(
                "matched polygon '{}' with {} vertices",
                found.name,
                found.ring.len()
            );
            Ok(found)
        }
        Some(_) => Err(KmlError::NoCoordinates),
        None => Err(KmlError::NoPolygon),
    }
}

/// Preorder walk over the feature tree, first polygon wins
fn find_in_features(features: &[Feature]) -> Option<LocatedPolygon> {
    for feature in features {
        debug!(
            "examining feature '{}'",
            feature.name.as_deref().unwrap_or("")
        );
        if let Some(ring) = polygon_of(feature) {
            return Some(LocatedPolygon {
                name: feature.name.clone().unwrap_or_default(),
                ring: ring.clone(),
            });
        }
        if let Some(found) = find_in_features(&feature.children) {
            return Some(found);
        }
    }
    None
}

/// The feature's polygon ring, if its geometry is a polygon directly or a
/// container wrapping one (a single level of indirection)
fn polygon_of(feature: &Feature) -> Option<&Ring> {
    match &feature.geometry {
        Some(Geometry::Polygon(ring)) => Some(ring),
        Some(Geometry::Container(inner)) => match inner.as_ref() {
            Geometry::Polygon(ring) => Some(ring),
            _ => None,
        },
        _ => None,
    }
}

/// Raw element scan for documents without placemark structure.
///
/// The name comes from the `name` child of the nearest enclosing
/// `Placemark` ancestor; absent ancestors just leave it empty.
fn find_in_elements<'a>(
    node: &'a XmlNode,
    ancestors: &mut Vec<&'a XmlNode>,
) -> Option<LocatedPolygon> {
    if node.name == "Polygon" {
        let name = ancestors
            .iter()
            .rev()
            .find(|a| a.name == "Placemark")
            .and_then(|p| p.child("name"))
            .map(|n| n.trimmed_text().to_string())
            .unwrap_or_default();
        return Some(LocatedPolygon {
            name,
            ring: polygon_ring(node),
        });
    }

    ancestors.push(node);
    for child in &node.children {
        if let Some(found) = find_in_elements(child, ancestors) {
            ancestors.pop();
            return Some(found);
        }
    }
    ancestors.pop();
    None
}
