pub mod convert;
pub mod registry;

pub use crate::domain::model::{Addressee, Exported};
pub use crate::domain::ports::{Adapter, AdapterDescriptor, Exporter, Importer};
pub use crate::utils::error::Result;
