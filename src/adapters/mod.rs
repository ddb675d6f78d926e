// Adapters layer: the concrete file and console formats.

pub mod json;
pub mod plain;
pub mod xml;

use crate::domain::ports::Adapter;
use crate::utils::error::Result;
use std::fs::File;
use std::path::{Path, PathBuf};

pub use json::JsonAdapter;
pub use plain::{PlainAdapter, PlainStyle};
pub use xml::XmlAdapter;

/// Where file-producing exporters place their output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSettings {
    /// Directory for exported files; the system temp dir when unset.
    pub directory: Option<PathBuf>,
}

impl OutputSettings {
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
        }
    }
}

/// Every adapter the binary ships with, one entry per name/variant.
pub fn builtin_adapters(settings: &OutputSettings) -> Vec<Box<dyn Adapter>> {
    vec![
        Box::new(JsonAdapter::new(settings.clone())),
        Box::new(XmlAdapter::new(settings.clone())),
        Box::new(PlainAdapter::new(PlainStyle::Default)),
        Box::new(PlainAdapter::new(PlainStyle::Red)),
    ]
}

/// Creates a new, uniquely named file ending in `.{extension}` and keeps it
/// on disk after the handle is dropped.
pub(crate) fn create_export_file(
    settings: &OutputSettings,
    extension: &str,
) -> Result<(File, PathBuf)> {
    let suffix = format!(".{extension}");
    let mut builder = tempfile::Builder::new();
    builder.prefix("addressee-").suffix(&suffix);

    let named = match &settings.directory {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };

    let (file, path) = named.keep().map_err(|e| e.error)?;
    tracing::debug!("Created export file {}", path.display());
    Ok((file, path))
}

pub(crate) fn announce_export(path: &Path) {
    tracing::info!("Exported addressee to {}", path.display());
    println!("Exported : {}", path.display());
}
