use crate::domain::model::{Addressee, Exported};
use crate::utils::error::Result;
use std::fmt;
use std::path::Path;

pub const DEFAULT_VARIANT: &str = "default";

/// Static metadata identifying an adapter in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterDescriptor {
    /// Format family, e.g. `JSON`.
    pub name: &'static str,
    /// Sub-style within the family.
    pub variant: &'static str,
    /// File suffix used for extension lookup; `None` for export-only formats.
    pub extension: Option<&'static str>,
}

impl AdapterDescriptor {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            variant: DEFAULT_VARIANT,
            extension: None,
        }
    }

    pub const fn with_variant(mut self, variant: &'static str) -> Self {
        self.variant = variant;
        self
    }

    pub const fn with_extension(mut self, extension: &'static str) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Registry key, lowercase `name/variant`.
    pub fn key(&self) -> String {
        registry_key(self.name, self.variant)
    }
}

impl fmt::Display for AdapterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}/{}>", self.name, self.variant)?;
        match self.extension {
            Some(ext) => write!(f, " extension : .{ext}"),
            None => write!(f, " export only"),
        }
    }
}

pub fn registry_key(name: &str, variant: &str) -> String {
    format!("{name}/{variant}").to_lowercase()
}

/// Parses a file into an [`Addressee`].
pub trait Importer: Send + Sync {
    fn read(&self, path: &Path) -> Result<Addressee>;
}

/// Renders an [`Addressee`] to the adapter's target representation.
pub trait Exporter: Send + Sync {
    fn write(&self, addressee: &Addressee) -> Result<Exported>;
}

/// A registered format. Capabilities are opt-in: an adapter exposes only the
/// halves it actually implements.
pub trait Adapter: Send + Sync {
    fn descriptor(&self) -> &AdapterDescriptor;

    fn importer(&self) -> Option<&dyn Importer> {
        None
    }

    fn exporter(&self) -> Option<&dyn Exporter> {
        None
    }
}
