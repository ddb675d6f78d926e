use addr_convert::utils::logger;
use addr_convert::{AdapterRegistry, CliConfig, ConvertError, ConvertSettings, Converter};
use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;

fn run(cli: CliConfig) -> anyhow::Result<()> {
    let file_config = cli.load_file_config().with_context(|| {
        format!(
            "failed to load config file '{}'",
            cli.config.as_deref().unwrap_or_default()
        )
    })?;
    let settings = ConvertSettings::resolve(&cli, file_config.as_ref());

    logger::init_cli_logger(settings.verbose, settings.log_format);
    tracing::debug!("Resolved settings: {:?}", settings);

    let registry = AdapterRegistry::with_builtin(&settings.output)?;
    let converter = Converter::new(&registry);

    if settings.show_formats {
        println!("{}", converter.describe_formats());
        return Ok(());
    }

    let request = settings.request()?;
    converter.run(&request)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = CliConfig::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e:#}");
            if let Some(err) = e.downcast_ref::<ConvertError>() {
                tracing::error!(
                    "Conversion failed: {} (kind: {}, domain: {})",
                    err.user_friendly_message(),
                    err.kind(),
                    err.is_domain()
                );
                eprintln!("💡 Suggestion: {}", err.recovery_suggestion());
            }
            ExitCode::FAILURE
        }
    }
}
