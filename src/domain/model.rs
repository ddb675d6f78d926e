use crate::utils::error::Result;
use crate::utils::validation::validate_required_info;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A validated name/address/phone record exchanged between adapters.
///
/// Construction fails with `MissingInformation` if any field is empty; the
/// value is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Addressee {
    name: String,
    address: String,
    phone: String,
}

impl Addressee {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self> {
        let addressee = Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
        };

        for (field, value) in addressee.fields() {
            validate_required_info(field, value)?;
        }

        Ok(addressee)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Field-ordered view used by adapters to serialize the record.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("name", self.name.as_str()),
            ("address", self.address.as_str()),
            ("phone", self.phone.as_str()),
        ]
    }
}

impl fmt::Display for Addressee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}\nAddress: {}\nPhone: {}",
            self.name, self.address, self.phone
        )
    }
}

/// What an exporter produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exported {
    /// A freshly created file holding the serialized record.
    File(PathBuf),
    /// Text that was printed to the console.
    Text(String),
}

impl Exported {
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Exported::File(path) => Some(path),
            Exported::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Exported::File(_) => None,
            Exported::Text(text) => Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ConvertError;

    #[test]
    fn test_fields_keep_declaration_order() {
        let addressee = Addressee::new("Remi", "1600 west 5th Avenue", "604 111 1111").unwrap();
        assert_eq!(
            addressee.fields(),
            [
                ("name", "Remi"),
                ("address", "1600 west 5th Avenue"),
                ("phone", "604 111 1111"),
            ]
        );

        let addressee = Addressee::new("Tatyana", "1500 east 2nd Avenue", "604 000 0000").unwrap();
        assert_eq!(addressee.fields()[0], ("name", "Tatyana"));
        assert_eq!(addressee.phone(), "604 000 0000");
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        for (name, address, phone) in [
            ("", "", ""),
            ("name", "", ""),
            ("name", "address", ""),
            ("", "address", "phone"),
        ] {
            let err = Addressee::new(name, address, phone).unwrap_err();
            assert!(
                matches!(err, ConvertError::MissingInformation { .. }),
                "unexpected error for ({name:?}, {address:?}, {phone:?}): {err}"
            );
        }
    }

    #[test]
    fn test_exported_accessors() {
        let file = Exported::File(PathBuf::from("/tmp/addressee-1.json"));
        assert_eq!(file.as_path(), Some(Path::new("/tmp/addressee-1.json")));
        assert_eq!(file.as_text(), None);

        let text = Exported::Text("Name: Remi".to_string());
        assert_eq!(text.as_path(), None);
        assert_eq!(text.as_text(), Some("Name: Remi"));
    }

    #[test]
    fn test_structural_equality() {
        let a = Addressee::new("Remi", "1200 west 5th Avenue", "604 000 0000").unwrap();
        let b = Addressee::new("Remi", "1200 west 5th Avenue", "604 000 0000").unwrap();
        let c = Addressee::new("Remi", "1200 west 5th Avenue", "604 999 9999").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_renders_text_block() {
        let addressee = Addressee::new("Remi", "1200 west 5th Avenue", "604 000 0000").unwrap();
        assert_eq!(
            addressee.to_string(),
            "Name: Remi\nAddress: 1200 west 5th Avenue\nPhone: 604 000 0000"
        );
    }

    #[test]
    fn test_serializes_in_field_order() {
        let addressee = Addressee::new("Remi", "1200 west 5th Avenue", "604 000 0000").unwrap();
        let json = serde_json::to_string(&addressee).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Remi","address":"1200 west 5th Avenue","phone":"604 000 0000"}"#
        );
    }
}
