pub mod toml_config;

use crate::adapters::OutputSettings;
use crate::core::convert::{ConvertRequest, DEFAULT_EXPORT_FORMAT};
use crate::domain::ports::DEFAULT_VARIANT;
use crate::utils::error::{ConvertError, Result};
use crate::utils::logger::LogFormat;
use std::path::PathBuf;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "addr-convert")]
#[command(about = "Convert a name/address/phone record between JSON, XML and plain text")]
pub struct CliConfig {
    /// The file to import
    #[arg(short = 'i', long = "input")]
    pub input: Option<String>,

    /// Show the available importers and exporters
    #[arg(short = 'f', long = "formats")]
    pub formats: bool,

    /// Export to the given format [default: XML]
    #[arg(short = 'e', long = "export")]
    pub export: Option<String>,

    /// Use the given export variant [default: default]
    #[arg(short = 'v', long = "variant")]
    pub variant: Option<String>,

    /// TOML file with default settings
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Directory for exported files (system temp dir when omitted)
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads and validates the `--config` file, if one was given.
    pub fn load_file_config(&self) -> Result<Option<TomlConfig>> {
        let Some(path) = &self.config else {
            return Ok(None);
        };
        let config = TomlConfig::from_file(path)?;
        config.validate()?;
        Ok(Some(config))
    }
}

/// Settings after merging CLI flags over the config file over built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSettings {
    pub input: Option<PathBuf>,
    pub show_formats: bool,
    pub export: String,
    pub variant: String,
    pub output: OutputSettings,
    pub verbose: bool,
    pub log_format: LogFormat,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            input: None,
            show_formats: false,
            export: DEFAULT_EXPORT_FORMAT.to_string(),
            variant: DEFAULT_VARIANT.to_string(),
            output: OutputSettings::default(),
            verbose: false,
            log_format: LogFormat::default(),
        }
    }
}

impl ConvertSettings {
    /// Applies a config file on top of the built-in defaults.
    pub fn with_file_config(mut self, file: &TomlConfig) -> Self {
        if let Some(format) = &file.export.format {
            self.export = format.clone();
        }
        if let Some(variant) = &file.export.variant {
            self.variant = variant.clone();
        }
        if let Some(directory) = &file.output.directory {
            self.output = OutputSettings::in_directory(directory);
        }
        if let Some(verbose) = file.logging.verbose {
            self.verbose = verbose;
        }
        if let Some(format) = file.logging.format {
            self.log_format = format;
        }
        self
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig, file: Option<&TomlConfig>) -> Self {
        let mut settings = match file {
            Some(file) => Self::default().with_file_config(file),
            None => Self::default(),
        };

        // An empty `-i ""` counts as no input at all.
        settings.input = cli
            .input
            .as_deref()
            .filter(|input| !input.is_empty())
            .map(PathBuf::from);
        settings.show_formats = cli.formats;
        if let Some(export) = &cli.export {
            settings.export = export.clone();
        }
        if let Some(variant) = &cli.variant {
            settings.variant = variant.clone();
        }
        if let Some(directory) = &cli.output_dir {
            settings.output = OutputSettings::in_directory(directory);
        }
        settings.verbose |= cli.verbose;
        settings
    }

    /// The conversion to run, or `MissingInput` when no input was given.
    pub fn request(&self) -> Result<ConvertRequest> {
        let input = self.input.as_ref().ok_or_else(|| ConvertError::MissingInput {
            message: "You need to specify the input file".to_string(),
        })?;
        Ok(ConvertRequest::new(input).with_export(&self.export, &self.variant))
    }
}
