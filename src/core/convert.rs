use crate::core::registry::AdapterRegistry;
use crate::domain::model::Exported;
use crate::domain::ports::DEFAULT_VARIANT;
use crate::utils::error::{ConvertError, Result};
use std::path::PathBuf;

pub const DEFAULT_EXPORT_FORMAT: &str = "XML";

/// One import followed by one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub export: String,
    pub variant: String,
}

impl ConvertRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            export: DEFAULT_EXPORT_FORMAT.to_string(),
            variant: DEFAULT_VARIANT.to_string(),
        }
    }

    pub fn with_export(mut self, export: impl Into<String>, variant: impl Into<String>) -> Self {
        self.export = export.into();
        self.variant = variant.into();
        self
    }
}

pub struct Converter<'r> {
    registry: &'r AdapterRegistry,
}

impl<'r> Converter<'r> {
    pub fn new(registry: &'r AdapterRegistry) -> Self {
        Self { registry }
    }

    /// Reads `request.input` with the importer matching its extension and
    /// hands the record to the requested exporter.
    pub fn run(&self, request: &ConvertRequest) -> Result<Exported> {
        let input = request.input.display().to_string();
        tracing::debug!(
            "Converting {} to {}/{}",
            input,
            request.export,
            request.variant
        );

        let importer = self
            .registry
            .find_importer(&request.input)
            .ok_or_else(|| ConvertError::WrongFiletype {
                path: input.clone(),
            })?;

        let addressee = importer.read(&request.input)?;
        tracing::debug!("Imported addressee {:?} from {}", addressee.name(), input);

        let exporter = self
            .registry
            .find_exporter(&request.export, &request.variant)
            .ok_or_else(|| ConvertError::WrongExporter {
                name: request.export.clone(),
                variant: request.variant.clone(),
            })?;

        exporter.write(&addressee)
    }

    /// The `-f/--formats` listing: importer extensions, then exporter keys.
    pub fn describe_formats(&self) -> String {
        let importers: Vec<String> = self.registry.list_importers().into_keys().collect();
        let exporters: Vec<String> = self.registry.list_exporters().into_keys().collect();
        format!(
            "Available importers : [{}]\nAvailable exporters : [{}]",
            importers.join(", "),
            exporters.join(", ")
        )
    }
}
