use crate::adapters::{announce_export, create_export_file, OutputSettings};
use crate::domain::model::{Addressee, Exported};
use crate::domain::ports::{Adapter, AdapterDescriptor, Exporter, Importer};
use crate::utils::error::{ConvertError, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

const DESCRIPTOR: AdapterDescriptor = AdapterDescriptor::new("XML").with_extension("xml");

const ROOT: &str = "Addressee";
const FIELDS: [&str; 3] = ["name", "address", "phone"];

/// Reads and writes `<Addressee><name>..</name><address>..</address><phone>..</phone></Addressee>`.
#[derive(Debug, Clone, Default)]
pub struct XmlAdapter {
    output: OutputSettings,
}

impl XmlAdapter {
    pub fn new(output: OutputSettings) -> Self {
        Self { output }
    }
}

fn malformed(reason: &str) -> ConvertError {
    ConvertError::MalformedXml {
        reason: reason.to_string(),
    }
}

fn field_index(tag: &[u8]) -> Option<usize> {
    FIELDS.iter().position(|field| field.as_bytes() == tag)
}

/// Collects the text of the first direct child of the root named after each
/// field. Extra children and repeated fields are ignored.
fn parse_fields<R: BufRead>(input: R) -> Result<[Option<String>; 3]> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();

    let mut fields: [Option<String>; 3] = Default::default();
    let mut depth = 0usize;
    let mut seen_root = false;
    // Field whose leading text is being collected.
    let mut capturing: Option<usize> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                match depth {
                    0 if seen_root => return Err(malformed("multiple root elements")),
                    0 => seen_root = true,
                    1 => {
                        capturing = field_index(e.name().as_ref()).filter(|&i| fields[i].is_none());
                        if let Some(i) = capturing {
                            fields[i] = Some(String::new());
                        }
                    }
                    // Only the text before the first nested child belongs to the field.
                    _ => capturing = None,
                }
                depth += 1;
            }
            Event::Empty(e) => match depth {
                0 if seen_root => return Err(malformed("multiple root elements")),
                0 => seen_root = true,
                1 => {
                    if let Some(i) = field_index(e.name().as_ref()) {
                        fields[i].get_or_insert_with(String::new);
                    }
                }
                _ => capturing = None,
            },
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth <= 1 {
                    capturing = None;
                }
            }
            Event::Text(t) => {
                if depth == 0 {
                    if !t.iter().all(u8::is_ascii_whitespace) {
                        return Err(malformed("text outside the root element"));
                    }
                } else if let (2, Some(i)) = (depth, capturing) {
                    if let Some(value) = fields[i].as_mut() {
                        value.push_str(&t.unescape()?);
                    }
                }
            }
            Event::CData(c) => {
                if let (2, Some(i)) = (depth, capturing) {
                    if let Some(value) = fields[i].as_mut() {
                        value.push_str(&String::from_utf8_lossy(&c));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(malformed("no root element found"));
    }
    if depth != 0 {
        return Err(malformed("unclosed element at end of document"));
    }

    Ok(fields)
}

fn into_addressee(fields: [Option<String>; 3]) -> Result<Addressee> {
    let [name, address, phone] = fields;
    let require = |value: Option<String>, field: &str| {
        value.ok_or_else(|| {
            ConvertError::missing_information(format!("Missing {field} in the xml file"))
        })
    };
    Addressee::new(
        require(name, "name")?,
        require(address, "address")?,
        require(phone, "phone")?,
    )
}

fn render(addressee: &Addressee) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Start(BytesStart::new(ROOT)))?;
    for (field, value) in addressee.fields() {
        writer.write_event(Event::Start(
            BytesStart::new(field).with_attributes([("name", field)]),
        ))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new(field)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(ROOT)))?;

    Ok(writer.into_inner())
}

impl Importer for XmlAdapter {
    fn read(&self, path: &Path) -> Result<Addressee> {
        tracing::debug!("Reading XML addressee from {}", path.display());
        let file = File::open(path)?;
        into_addressee(parse_fields(BufReader::new(file))?)
    }
}

impl Exporter for XmlAdapter {
    fn write(&self, addressee: &Addressee) -> Result<Exported> {
        let data = render(addressee)?;

        let (mut file, path) = create_export_file(&self.output, "xml")?;
        file.write_all(&data)?;
        file.flush()?;

        announce_export(&path);
        Ok(Exported::File(path))
    }
}

impl Adapter for XmlAdapter {
    fn descriptor(&self) -> &AdapterDescriptor {
        &DESCRIPTOR
    }

    fn importer(&self) -> Option<&dyn Importer> {
        Some(self)
    }

    fn exporter(&self) -> Option<&dyn Exporter> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Addressee> {
        into_addressee(parse_fields(input.as_bytes())?)
    }

    #[test]
    fn test_render_carries_name_attributes() {
        let addressee = Addressee::new("Remi", "1200 west 5th Avenue", "604 000 0000").unwrap();
        let xml = String::from_utf8(render(&addressee).unwrap()).unwrap();
        assert_eq!(
            xml,
            "<Addressee><name name=\"name\">Remi</name>\
             <address name=\"address\">1200 west 5th Avenue</address>\
             <phone name=\"phone\">604 000 0000</phone></Addressee>"
        );
    }

    #[test]
    fn test_render_escapes_markup() {
        let addressee = Addressee::new("R&D <Team>", "1200 west 5th Avenue", "604").unwrap();
        let xml = String::from_utf8(render(&addressee).unwrap()).unwrap();
        assert!(xml.contains("R&amp;D &lt;Team&gt;"));
        assert_eq!(parse(&xml).unwrap(), addressee);
    }

    #[test]
    fn test_only_direct_children_count() {
        let err = parse(
            "<Addressee><contact><phone>604</phone></contact>\
             <name>Remi</name><address>1200 west 5th Avenue</address></Addressee>",
        )
        .unwrap_err();
        assert_eq!(err.kind(), "MissingInformation");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let addressee = parse(
            "<Addressee><name>Remi</name><name>Other</name>\
             <address>1200 west 5th Avenue</address><phone>604 000 0000</phone></Addressee>",
        )
        .unwrap();
        assert_eq!(addressee.name(), "Remi");
    }

    #[test]
    fn test_empty_element_is_missing_information() {
        let err = parse(
            "<Addressee><name/><address>1200 west 5th Avenue</address><phone>604</phone></Addressee>",
        )
        .unwrap_err();
        assert_eq!(err.kind(), "MissingInformation");
    }

    #[test]
    fn test_structural_errors_are_xml_errors() {
        for input in [
            r#"{"name": "Remi"}"#,
            "",
            "<Addressee><name>Remi</name>",
            "<Addressee><name>Remi</address></Addressee>",
        ] {
            let err = parse(input).unwrap_err();
            assert_eq!(err.kind(), "XmlError", "input {input:?} gave {err}");
        }
    }
}
