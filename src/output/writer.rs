use anyhow::{Context, Result};
use log::info;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
const STYLE_ID: &str = "centroid-marker";

/// Write a KML document containing a single marker placemark.
///
/// The document carries one `Style` referencing `icon_path` and one
/// `Placemark` with the given label, description and point coordinates
/// (emitted as `lon,lat,0`, the order KML uses).
pub fn write_point_placemark(
    path: &Path,
    label: &str,
    description: &str,
    latitude: f64,
    longitude: f64,
    icon_path: &Path,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create KML file: {}", path.display()))?;
    let mut writer = Writer::new_with_indent(BufWriter::new(file), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", KML_NAMESPACE));
    writer.write_event(Event::Start(kml))?;
    writer.write_event(Event::Start(BytesStart::new("Document")))?;

    let mut style = BytesStart::new("Style");
    style.push_attribute(("id", STYLE_ID));
    writer.write_event(Event::Start(style))?;
    writer.write_event(Event::Start(BytesStart::new("IconStyle")))?;
    writer.write_event(Event::Start(BytesStart::new("Icon")))?;
    write_text_element(&mut writer, "href", &icon_path.to_string_lossy())?;
    writer.write_event(Event::End(BytesEnd::new("Icon")))?;
    writer.write_event(Event::End(BytesEnd::new("IconStyle")))?;
    writer.write_event(Event::End(BytesEnd::new("Style")))?;

    writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
    write_text_element(&mut writer, "name", label)?;
    write_text_element(&mut writer, "description", description)?;
    write_text_element(&mut writer, "styleUrl", &format!("#{STYLE_ID}"))?;
    writer.write_event(Event::Start(BytesStart::new("Point")))?;
    write_text_element(&mut writer, "coordinates", &format!("{longitude},{latitude},0"))?;
    writer.write_event(Event::End(BytesEnd::new("Point")))?;
    writer.write_event(Event::End(BytesEnd::new("Placemark")))?;

    writer.write_event(Event::End(BytesEnd::new("Document")))?;
    writer.write_event(Event::End(BytesEnd::new("kml")))?;

    writer
        .into_inner()
        .flush()
        .with_context(|| format!("Failed to write KML file: {}", path.display()))?;

    info!("marker written to {}", path.display());
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kml::parse_document;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_written_placemark_reparses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.kml");
        let icon = PathBuf::from("cross.svg");

        write_point_placemark(&path, "Centroid", "field centroid", 37.775, -122.42, &icon)
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let root = parse_document(&contents).unwrap();
        assert_eq!(root.name, "kml");

        let placemark = root.descendant("Placemark").unwrap();
        assert_eq!(
            placemark.child("name").map(|n| n.trimmed_text()),
            Some("Centroid")
        );
        assert_eq!(
            placemark.child("description").map(|n| n.trimmed_text()),
            Some("field centroid")
        );

        // KML coordinate order is lon,lat,alt
        let coords = placemark.descendant("coordinates").unwrap();
        assert_eq!(coords.trimmed_text(), "-122.42,37.775,0");

        let href = root.descendant("href").unwrap();
        assert_eq!(href.trimmed_text(), "cross.svg");
    }

    #[test]
    fn test_description_is_escaped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.kml");

        write_point_placemark(
            &path,
            "Centroid",
            "Jack & Jill <field> centroid",
            1.0,
            2.0,
            &PathBuf::from("i.svg"),
        )
        .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Jack &amp; Jill"));

        // Round-trips back through the parser unescaped
        let root = parse_document(&contents).unwrap();
        let description = root.descendant("description").unwrap();
        assert_eq!(description.trimmed_text(), "Jack & Jill <field> centroid");
    }
}
