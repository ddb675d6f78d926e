use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("MissingInformation: {message}")]
    MissingInformation { message: String },

    #[error("MissingInput: {message}")]
    MissingInput { message: String },

    #[error("WrongFiletype: no importer can read '{path}'")]
    WrongFiletype { path: String },

    #[error("WrongExporter: no exporter registered as '{name}/{variant}'")]
    WrongExporter { name: String, variant: String },

    #[error("Duplicate adapter registration: {key}")]
    DuplicateAdapter { key: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("XML error: {reason}")]
    MalformedXml { reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ConvertError {
    pub fn missing_information(message: impl Into<String>) -> Self {
        Self::MissingInformation {
            message: message.into(),
        }
    }

    /// Short, stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInformation { .. } => "MissingInformation",
            Self::MissingInput { .. } => "MissingInput",
            Self::WrongFiletype { .. } => "WrongFiletype",
            Self::WrongExporter { .. } => "WrongExporter",
            Self::DuplicateAdapter { .. } => "DuplicateAdapter",
            Self::IoError(_) => "IoError",
            Self::JsonError(_) => "JsonError",
            Self::XmlError(_) | Self::MalformedXml { .. } => "XmlError",
            Self::ConfigError { .. } => "ConfigError",
            Self::InvalidConfigValueError { .. } => "InvalidConfigValueError",
        }
    }

    /// Domain errors are raised by this crate; everything else is surfaced
    /// from the I/O or parsing layer untouched.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            Self::MissingInformation { .. }
                | Self::MissingInput { .. }
                | Self::WrongFiletype { .. }
                | Self::WrongExporter { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                format!("IoError: file not found ({e})")
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingInformation { .. } => {
                "Make sure the input provides a non-empty name, address and phone"
            }
            Self::MissingInput { .. } => "Pass the file to convert with -i/--input",
            Self::WrongFiletype { .. } => {
                "Run with -f/--formats to list the extensions that can be imported"
            }
            Self::WrongExporter { .. } => {
                "Run with -f/--formats to list the available name/variant exporters"
            }
            Self::DuplicateAdapter { .. } => {
                "Each adapter needs a unique name/variant and importers a unique extension"
            }
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::JsonError(_) => "Check that the input is well-formed JSON",
            Self::XmlError(_) | Self::MalformedXml { .. } => {
                "Check that the input is a well-formed XML document"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
