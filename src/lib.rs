pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{builtin_adapters, OutputSettings};
pub use config::{toml_config::TomlConfig, ConvertSettings};
pub use crate::core::{
    convert::{ConvertRequest, Converter},
    registry::AdapterRegistry,
};
pub use domain::model::{Addressee, Exported};
pub use domain::ports::{Adapter, AdapterDescriptor, Exporter, Importer};
pub use utils::error::{ConvertError, Result};
