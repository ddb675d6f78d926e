use crate::adapters::{announce_export, create_export_file, OutputSettings};
use crate::domain::model::{Addressee, Exported};
use crate::domain::ports::{Adapter, AdapterDescriptor, Exporter, Importer};
use crate::utils::error::Result;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

const DESCRIPTOR: AdapterDescriptor = AdapterDescriptor::new("JSON").with_extension("json");

/// Reads and writes `{"name": .., "address": .., "phone": ..}` objects.
#[derive(Debug, Clone, Default)]
pub struct JsonAdapter {
    output: OutputSettings,
}

impl JsonAdapter {
    pub fn new(output: OutputSettings) -> Self {
        Self { output }
    }
}

/// The three recognised keys of a JSON object, each possibly absent.
///
/// Unknown keys are skipped and only the first occurrence of a repeated key
/// is kept. `null` counts as absent; numbers and booleans keep their JSON
/// text, so `"phone": 604` reads as `"604"`.
#[derive(Debug, Default)]
struct JsonFields {
    name: Option<String>,
    address: Option<String>,
    phone: Option<String>,
}

impl<'de> Deserialize<'de> for JsonFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = JsonFields;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object with name, address and phone keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<JsonFields, A::Error> {
                let mut fields = JsonFields::default();
                while let Some(key) = map.next_key::<String>()? {
                    let slot = match key.as_str() {
                        "name" => &mut fields.name,
                        "address" => &mut fields.address,
                        "phone" => &mut fields.phone,
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                            continue;
                        }
                    };
                    if slot.is_some() {
                        map.next_value::<IgnoredAny>()?;
                    } else {
                        *slot = match map.next_value::<Option<Value>>()? {
                            None | Some(Value::Null) => None,
                            Some(Value::String(text)) => Some(text),
                            Some(Value::Number(number)) => Some(number.to_string()),
                            Some(Value::Bool(flag)) => Some(flag.to_string()),
                            Some(other) => {
                                return Err(de::Error::custom(format!(
                                    "{key} must be a string, number or boolean, found {other}"
                                )))
                            }
                        };
                    }
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

impl JsonFields {
    fn into_addressee(self) -> Result<Addressee> {
        Addressee::new(
            self.name.unwrap_or_default(),
            self.address.unwrap_or_default(),
            self.phone.unwrap_or_default(),
        )
    }
}

impl Importer for JsonAdapter {
    fn read(&self, path: &Path) -> Result<Addressee> {
        tracing::debug!("Reading JSON addressee from {}", path.display());
        let file = File::open(path)?;
        let fields: JsonFields = serde_json::from_reader(BufReader::new(file))?;
        fields.into_addressee()
    }
}

impl Exporter for JsonAdapter {
    fn write(&self, addressee: &Addressee) -> Result<Exported> {
        let (file, path) = create_export_file(&self.output, "json")?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, addressee)?;
        writer.flush()?;

        announce_export(&path);
        Ok(Exported::File(path))
    }
}

impl Adapter for JsonAdapter {
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
