use quick_xml::Reader;
use quick_xml::events::Event;
use quick_xml::name::QName;

use super::KmlError;

/// A single element of the parsed document.
///
/// Tag names are stored without their namespace prefix, so lookups match
/// `Polygon`, `kml:Polygon` and `ns0:Polygon` alike. Text content of all
/// direct text and CDATA nodes is concatenated.
#[derive(Debug, Clone, Default)]
pub struct XmlNode {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// First direct child with the given local name
    pub fn child(&self, local: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == local)
    }

    /// First descendant with the given local name, in preorder document order
    pub fn descendant(&self, local: &str) -> Option<&XmlNode> {
        for child in &self.children {
            if child.name == local {
                return Some(child);
            }
            if let Some(found) = child.descendant(local) {
                return Some(found);
            }
        }
        None
    }

    /// Text content with surrounding whitespace removed
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

fn local_name(name: QName) -> String {
    String::from_utf8_lossy(name.local_name().as_ref()).into_owned()
}

/// Parse a whole KML document into an element tree and return the root
/// element.
///
/// The reader runs over the full in-memory document; mismatched tags are
/// reported by quick-xml, unclosed ones are caught at end of input.
pub fn parse_document(xml: &str) -> Result<XmlNode, KmlError> {
    let mut reader = Reader::from_str(xml);
    // Sentinel node that collects top-level elements
    let mut stack = vec![XmlNode::new(String::new())];

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(XmlNode::new(local_name(start.name())));
            }
            Event::Empty(start) => {
                let node = XmlNode::new(local_name(start.name()));
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
            Event::End(_) => {
                // quick-xml has already checked that the end name matches
                if let Some(node) = stack.pop()
                    && let Some(parent) = stack.last_mut()
                {
                    parent.children.push(node);
                }
            }
            Event::Text(text) => {
                let unescaped = text.unescape().map_err(quick_xml::Error::from)?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                let raw = String::from_utf8_lossy(&data.into_inner()).into_owned();
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&raw);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open = stack.pop().map(|n| n.name).unwrap_or_default();
        return Err(KmlError::Truncated(open));
    }

    stack
        .pop()
        .and_then(|sentinel| sentinel.children.into_iter().next())
        .ok_or(KmlError::Empty)
}
