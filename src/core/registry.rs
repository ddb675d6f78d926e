//! Catalog of every known adapter, keyed by lowercase `name/variant`.
//!
//! The catalog is filled once at start-up by [`AdapterRegistry::with_builtin`]
//! and only read afterwards. Importers are looked up by file extension,
//! exporters by name and variant. Every key is case-folded to lowercase.

use crate::adapters::{builtin_adapters, OutputSettings};
use crate::domain::ports::{registry_key, Adapter, Exporter, Importer};
use crate::utils::error::{ConvertError, Result};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Default)]
pub struct AdapterRegistry {
    adapters: BTreeMap<String, Box<dyn Adapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every built-in adapter.
    pub fn with_builtin(settings: &OutputSettings) -> Result<Self> {
        let mut registry = Self::new();
        for adapter in builtin_adapters(settings) {
            registry.register(adapter)?;
        }
        Ok(registry)
    }

    /// Adds an adapter to the catalog.
    ///
    /// Fails with `DuplicateAdapter` when the `name/variant` pair is already
    /// taken, or when an importer claims an extension another importer owns.
    pub fn register(&mut self, adapter: Box<dyn Adapter>) -> Result<()> {
        let descriptor = *adapter.descriptor();
        let key = descriptor.key();

        if self.adapters.contains_key(&key) {
            return Err(ConvertError::DuplicateAdapter { key });
        }

        if adapter.importer().is_some() {
            if let Some(extension) = descriptor.extension {
                let extension = extension.to_lowercase();
                if self.list_importers().contains_key(&extension) {
                    return Err(ConvertError::DuplicateAdapter {
                        key: format!("extension .{extension}"),
                    });
                }
            }
        }

        tracing::debug!("Registered adapter {}", descriptor);
        self.adapters.insert(key, adapter);
        Ok(())
    }

    /// The full catalog, including adapters that can neither read nor write.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &dyn Adapter)> {
        self.adapters
            .iter()
            .map(|(key, adapter)| (key.as_str(), adapter.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Lowercase extension to adapter, for adapters that can read files.
    pub fn list_importers(&self) -> BTreeMap<String, &dyn Adapter> {
        self.entries()
            .filter(|(_, adapter)| adapter.importer().is_some())
            .filter_map(|(_, adapter)| {
                adapter
                    .descriptor()
                    .extension
                    .map(|ext| (ext.to_lowercase(), adapter))
            })
            .collect()
    }

    /// `name/variant` to adapter, for adapters that can write.
    pub fn list_exporters(&self) -> BTreeMap<String, &dyn Adapter> {
        self.entries()
            .filter(|(_, adapter)| adapter.exporter().is_some())
            .map(|(key, adapter)| (key.to_string(), adapter))
            .collect()
    }

    pub fn find_importer(&self, path: impl AsRef<Path>) -> Option<&dyn Importer> {
        let path = path.as_ref();
        let extension = path.extension()?.to_str()?.to_lowercase();

        let importer = self
            .list_importers()
            .get(&extension)
            .copied()
            .and_then(|adapter| adapter.importer());
        tracing::debug!(
            "Importer lookup for {}: {}",
            path.display(),
            if importer.is_some() { "found" } else { "none" }
        );
        importer
    }

    pub fn find_exporter(&self, name: &str, variant: &str) -> Option<&dyn Exporter> {
        let key = registry_key(name, variant);
        let exporter = self
            .list_exporters()
            .get(&key)
            .copied()
            .and_then(|adapter| adapter.exporter());
        tracing::debug!(
            "Exporter lookup for {}: {}",
            key,
            if exporter.is_some() { "found" } else { "none" }
        );
        exporter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Addressee, Exported};
    use crate::domain::ports::AdapterDescriptor;

    struct CatalogOnly;

    impl Adapter for CatalogOnly {
        fn descriptor(&self) -> &AdapterDescriptor {
            const DESCRIPTOR: AdapterDescriptor =
                AdapterDescriptor::new("CATALOG").with_extension("cat");
            &DESCRIPTOR
        }
    }

    struct ShoutingJson;

    impl Importer for ShoutingJson {
        fn read(&self, _path: &Path) -> Result<Addressee> {
            Addressee::new("REMI", "1200 WEST 5TH AVENUE", "604 000 0000")
        }
    }

    impl Exporter for ShoutingJson {
        fn write(&self, addressee: &Addressee) -> Result<Exported> {
            Ok(Exported::Text(addressee.to_string().to_uppercase()))
        }
    }

    impl Adapter for ShoutingJson {
        fn descriptor(&self) -> &AdapterDescriptor {
            const DESCRIPTOR: AdapterDescriptor = AdapterDescriptor::new("json")
                .with_variant("LOUD")
                .with_extension("JSON");
            &DESCRIPTOR
        }

        fn importer(&self) -> Option<&dyn Importer> {
            Some(self)
        }

        fn exporter(&self) -> Option<&dyn Exporter> {
            Some(self)
        }
    }

    fn builtin() -> AdapterRegistry {
        AdapterRegistry::with_builtin(&OutputSettings::default()).unwrap()
    }

    #[test]
    fn test_builtin_views() {
        let registry = builtin();
        assert_eq!(registry.len(), 4);

        let importers: Vec<String> = registry.list_importers().into_keys().collect();
        assert_eq!(importers, vec!["json", "xml"]);

        let exporters: Vec<String> = registry.list_exporters().into_keys().collect();
        assert_eq!(
            exporters,
            vec!["json/default", "plain/default", "plain/red", "xml/default"]
        );
    }

    #[test]
    fn test_find_importer_by_extension() {
        let registry = builtin();
        assert!(registry.find_importer("input/correct.json").is_some());
        assert!(registry.find_importer("input/correct.xml").is_some());
        assert!(registry.find_importer("input/CORRECT.XML").is_some());
        assert!(registry.find_importer("input/correct.html").is_none());
        assert!(registry.find_importer("input/not_a_file").is_none());
        assert!(registry.find_importer("input/.json").is_none());
    }

    #[test]
    fn test_find_exporter_is_case_insensitive() {
        let registry = builtin();
        assert!(registry.find_exporter("json", "DEFAULT").is_some());
        assert!(registry.find_exporter("JSON", "default").is_some());
        assert!(registry.find_exporter("Plain", "Red").is_some());
        assert!(registry.find_exporter("plain", "blue").is_none());
        assert!(registry.find_exporter("nonexistent", "default").is_none());
    }

    #[test]
    fn test_capabilities_filter_views() {
        let mut registry = AdapterRegistry::new();
        registry.register(Box::new(CatalogOnly)).unwrap();

        assert_eq!(registry.entries().count(), 1);
        assert!(registry.list_importers().is_empty());
        assert!(registry.list_exporters().is_empty());
        assert!(registry.find_importer("x.cat").is_none());
        assert!(registry.find_exporter("catalog", "default").is_none());
    }

    #[test]
    fn test_duplicate_name_variant_fails_fast() {
        let mut registry = builtin();
        let err = registry
            .register(Box::new(crate::adapters::PlainAdapter::new(
                crate::adapters::PlainStyle::Red,
            )))
            .unwrap_err();
        assert!(matches!(err, ConvertError::DuplicateAdapter { ref key } if key == "plain/red"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_duplicate_extension_fails_fast() {
        let mut registry = builtin();
        let err = registry.register(Box::new(ShoutingJson)).unwrap_err();
        assert!(matches!(err, ConvertError::DuplicateAdapter { .. }));
        assert!(registry.find_exporter("json", "loud").is_none());

        let mut registry = AdapterRegistry::new();
        registry.register(Box::new(ShoutingJson)).unwrap();
        assert!(registry.find_importer("data.json").is_some());
        assert!(registry.find_exporter("JSON", "loud").is_some());
    }
}
