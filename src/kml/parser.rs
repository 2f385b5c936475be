use crate::domain::{Feature, Geometry, Ring};
use crate::kml::tree::XmlNode;

/// Element names that nest further features rather than carry geometry
const CONTAINER_TAGS: &[&str] = &["kml", "Document", "Folder"];

/// Concrete geometry elements that are not polygons
const OTHER_GEOMETRY_TAGS: &[&str] = &["Point", "LineString", "LinearRing", "Model", "Track"];

fn is_container(name: &str) -> bool {
    CONTAINER_TAGS.contains(&name)
}

/// Build the feature tree from the parsed element tree.
///
/// `Document` and `Folder` elements nest further features; `Placemark`
/// elements carry a display name and an optional geometry payload.
/// Non-feature elements (styles, schemas, ...) are skipped.
pub fn build_features(root: &XmlNode) -> Vec<Feature> {
    let mut features = Vec::new();
    if is_container(&root.name) {
        for child in &root.children {
            collect_features(child, &mut features);
        }
    } else {
        collect_features(root, &mut features);
    }
    features
}

fn collect_features(node: &XmlNode, out: &mut Vec<Feature>) {
    if node.name == "Placemark" {
        out.push(build_placemark(node));
    } else if is_container(&node.name) {
        let mut children = Vec::new();
        for child in &node.children {
            collect_features(child, &mut children);
        }
        out.push(Feature {
            name: feature_name(node),
            geometry: None,
            children,
        });
    }
}

fn build_placemark(node: &XmlNode) -> Feature {
    Feature {
        name: feature_name(node),
        geometry: node.children.iter().find_map(build_geometry),
        children: Vec::new(),
    }
}

fn feature_name(node: &XmlNode) -> Option<String> {
    node.child("name").map(|n| n.trimmed_text().to_string())
}

/// Map a geometry element onto the `Geometry` variant, if it is one.
///
/// `MultiGeometry` wraps its first child geometry, mirroring the single
/// level of indirection abstract geometry containers add.
fn build_geometry(node: &XmlNode) -> Option<Geometry> {
    match node.name.as_str() {
        "Polygon" => Some(Geometry::Polygon(polygon_ring(node))),
        "MultiGeometry" => {
            let inner = node.children.iter().find_map(build_geometry)?;
            Some(Geometry::Container(Box::new(inner)))
        }
        name if OTHER_GEOMETRY_TAGS.contains(&name) => Some(Geometry::Other),
        _ => None,
    }
}

/// Extract the outer ring of a polygon element.
///
/// Prefers the well-formed path (`outerBoundaryIs` > `LinearRing` >
/// `coordinates`); falls back to any `coordinates` descendant so sloppily
/// nested documents still yield their vertices. Inner boundaries are
/// ignored.
pub fn polygon_ring(polygon: &XmlNode) -> Ring {
    let exact = polygon
        .child("outerBoundaryIs")
        .and_then(|outer| outer.descendant("LinearRing"))
        .and_then(|ring| ring.child("coordinates"))
        .map(XmlNode::trimmed_text)
        .filter(|text| !text.is_empty());

    let text = exact.or_else(|| {
        polygon
            .descendant("coordinates")
            .map(XmlNode::trimmed_text)
            .filter(|text| !text.is_empty())
    });

    Ring::new(text.map(parse_coordinates).unwrap_or_default())
}

/// Parse KML coordinate text: whitespace-separated tuples of
/// `lon,lat[,alt]`.
///
/// Altitude is dropped. Tuples that do not yield two floats are skipped
/// so one bad token does not abort the whole ring.
pub fn parse_coordinates(text: &str) -> Vec<(f64, f64)> {
    text.split_whitespace()
        .filter_map(|tuple| {
            let mut parts = tuple.split(',');
            let lon: f64 = parts.next()?.trim().parse().ok()?;
            let lat: f64 = parts.next()?.trim().parse().ok()?;
            Some((lon, lat))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kml::tree::parse_document;

    #[test]
    fn test_parse_coordinates_with_altitude() {
        let points = parse_coordinates("10.5,20.5,0 11.0,21.0,100.0");
        assert_eq!(points, vec![(10.5, 20.5), (11.0, 21.0)]);
    }

    #[test]
    fn test_parse_coordinates_without_altitude() {
        let points = parse_coordinates("1,2 3,4");
        assert_eq!(points, vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn test_parse_coordinates_skips_bad_tuples() {
        let points = parse_coordinates("0,0 garbage 1,0 1,x 1,1 ,5 0,1");
        assert_eq!(points.len(), 4);
        assert_eq!(points, vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    }

    #[test]
    fn test_parse_coordinates_empty() {
        assert!(parse_coordinates("   \n  ").is_empty());
    }

    #[test]
    fn test_build_features_nesting() {
        let xml = r#"<kml>
            <Document>
              <name>doc</name>
              <Folder>
                <name>folder</name>
                <Placemark><name>pm</name><Point><coordinates>1,2</coordinates></Point></Placemark>
              </Folder>
            </Document>
        </kml>"#;
        let root = parse_document(xml).unwrap();
        let features = build_features(&root);

        assert_eq!(features.len(), 1);
        let doc = &features[0];
        assert_eq!(doc.name.as_deref(), Some("doc"));
        let folder = &doc.children[0];
        assert_eq!(folder.name.as_deref(), Some("folder"));
        let pm = &folder.children[0];
        assert_eq!(pm.name.as_deref(), Some("pm"));
        assert!(matches!(pm.geometry, Some(Geometry::Other)));
    }

    #[test]
    fn test_placemark_polygon_geometry() {
        let xml = r#"<Placemark>
            <name>field</name>
            <Polygon>
              <outerBoundaryIs><LinearRing>
                <coordinates>0,0 1,0 1,1 0,1 0,0</coordinates>
              </LinearRing></outerBoundaryIs>
            </Polygon>
        </Placemark>"#;
        let root = parse_document(xml).unwrap();
        let features = build_features(&root);

        assert_eq!(features.len(), 1);
        match &features[0].geometry {
            Some(Geometry::Polygon(ring)) => assert_eq!(ring.len(), 5),
            other => panic!("expected polygon geometry, got {other:?}"),
        }
    }

    #[test]
    fn test_multigeometry_becomes_container() {
        let xml = r#"<Placemark>
            <MultiGeometry>
              <Polygon><outerBoundaryIs><LinearRing>
                <coordinates>0,0 2,0 2,2 0,0</coordinates>
              </LinearRing></outerBoundaryIs></Polygon>
            </MultiGeometry>
        </Placemark>"#;
        let root = parse_document(xml).unwrap();
        let features = build_features(&root);

        match &features[0].geometry {
            Some(Geometry::Container(inner)) => {
                assert!(matches!(inner.as_ref(), Geometry::Polygon(_)))
            }
            other => panic!("expected container geometry, got {other:?}"),
        }
    }

    #[test]
    fn test_polygon_ring_prefers_outer_boundary() {
        let xml = r#"<Polygon>
            <innerBoundaryIs><LinearRing>
              <coordinates>9,9 9.1,9 9,9.1 9,9</coordinates>
            </LinearRing></innerBoundaryIs>
            <outerBoundaryIs><LinearRing>
              <coordinates>0,0 4,0 4,4 0,4 0,0</coordinates>
            </LinearRing></outerBoundaryIs>
        </Polygon>"#;
        let root = parse_document(xml).unwrap();
        let ring = polygon_ring(&root);
        assert_eq!(ring.points()[1], (4.0, 0.0));
    }

    #[test]
    fn test_polygon_ring_falls_back_to_any_coordinates() {
        // No outerBoundaryIs at all, coordinates nested directly
        let xml = r#"<Polygon>
            <LinearRing><coordinates>0,0 1,0 1,1 0,0</coordinates></LinearRing>
        </Polygon>"#;
        let root = parse_document(xml).unwrap();
        let ring = polygon_ring(&root);
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_polygon_ring_empty_when_no_coordinates() {
        let xml = "<Polygon><outerBoundaryIs><LinearRing><coordinates></coordinates></LinearRing></outerBoundaryIs></Polygon>";
        let root = parse_document(xml).unwrap();
        assert!(polygon_ring(&root).is_empty());
    }
}
