use crate::domain::model::{Addressee, Exported};
use crate::domain::ports::{Adapter, AdapterDescriptor, Exporter};
use crate::utils::error::Result;
use colored::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlainStyle {
    Default,
    Red,
}

/// Console-only exporter rendering the `Name/Address/Phone` text block.
#[derive(Debug, Clone)]
pub struct PlainAdapter {
    style: PlainStyle,
    descriptor: AdapterDescriptor,
}

impl PlainAdapter {
    pub fn new(style: PlainStyle) -> Self {
        let descriptor = AdapterDescriptor::new("PLAIN");
        let descriptor = match style {
            PlainStyle::Default => descriptor,
            PlainStyle::Red => descriptor.with_variant("red"),
        };
        Self { style, descriptor }
    }

    fn render(&self, addressee: &Addressee) -> String {
        let block = addressee.to_string();
        match self.style {
            PlainStyle::Default => block,
            // Always escaped, whether or not stdout is a terminal.
            PlainStyle::Red => format!("\x1b[{}m{block}\x1b[0m", Color::Red.to_fg_str()),
        }
    }
}

impl Exporter for PlainAdapter {
    fn write(&self, addressee: &Addressee) -> Result<Exported> {
        let message = self.render(addressee);
        println!("{message}");
        Ok(Exported::Text(message))
    }
}

impl Adapter for PlainAdapter {
    fn descriptor(&self) -> &AdapterDescriptor {
        &self.descriptor
    }

    fn exporter(&self) -> Option<&dyn Exporter> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: &str = "Name: Remi\nAddress: 1200 west 5th Avenue\nPhone: 604 000 0000";

    fn remi() -> Addressee {
        Addressee::new("Remi", "1200 west 5th Avenue", "604 000 0000").unwrap()
    }

    #[test]
    fn test_default_style_is_exact_block() {
        let exported = PlainAdapter::new(PlainStyle::Default).write(&remi()).unwrap();
        assert_eq!(exported, Exported::Text(BLOCK.to_string()));
    }

    #[test]
    fn test_red_style_prefixes_ansi_red() {
        let exported = PlainAdapter::new(PlainStyle::Red).write(&remi()).unwrap();
        let text = exported.as_text().unwrap();
        assert!(text.starts_with("\u{1b}[31m"), "missing red escape in {text:?}");
        assert!(text.contains(BLOCK));

        let plain = PlainAdapter::new(PlainStyle::Default).write(&remi()).unwrap();
        assert_ne!(exported, plain);
    }

    #[test]
    fn test_plain_is_export_only() {
        let adapter = PlainAdapter::new(PlainStyle::Red);
        assert!(adapter.importer().is_none());
        assert_eq!(adapter.descriptor().key(), "plain/red");
        assert_eq!(adapter.descriptor().extension, None);
    }
}
