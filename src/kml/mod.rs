pub mod locator;
pub mod parser;
pub mod tree;

pub use locator::{LocatedPolygon, locate_polygon};
pub use parser::{build_features, parse_coordinates};
pub use tree::{XmlNode, parse_document};

use thiserror::Error;

/// Failure classes for reading a KML document.
///
/// `NoPolygon` and `NoCoordinates` mean the document was well formed but
/// had nothing usable in it; `Parse`, `Truncated` and `Empty` mean the
/// document itself was malformed.
#[derive(Debug, Error)]
pub enum KmlError {
    #[error("The KML file does not contain a Polygon")]
    NoPolygon,
    #[error("The KML file does not contain a Polygon with coordinates")]
    NoCoordinates,
    #[error("malformed XML: {0}")]
    Parse(#[from] quick_xml::Error),
    #[error("malformed XML: document ends inside <{0}>")]
    Truncated(String),
    #[error("the document contains no XML elements")]
    Empty,
}
