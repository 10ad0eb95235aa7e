use anyhow::Context;
use clap::Parser;
use moonphase::adapters::raster::encode_png;
use moonphase::domain::colour::Colour;
use moonphase::domain::ports::Clock;
use moonphase::utils::error::ErrorSeverity;
use moonphase::utils::{logger, validation::Validate};
use moonphase::{
    CliConfig, FixedClock, LocalStorage, MoonEngine, MoonError, MoonToml, OutputFormat,
    RasterRenderer, SvgRenderer, SystemClock,
};

fn main() {
    let cli = CliConfig::parse();

    // Initialise logging
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli) {
        match e.downcast_ref::<MoonError>() {
            Some(moon_error) => {
                // Log the full error, show the user the friendly version
                tracing::error!(
                    "moonphase failed: {} (Category: {:?}, Severity: {:?})",
                    moon_error,
                    moon_error.category(),
                    moon_error.severity()
                );
                eprintln!("❌ {}", moon_error.user_friendly_message());
                eprintln!("💡 Suggestion: {}", moon_error.recovery_suggestion());

                // Exit code follows severity
                let exit_code = match moon_error.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                };
                std::process::exit(exit_code);
            }
            None => {
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run(cli: &CliConfig) -> anyhow::Result<()> {
    // Load the config file, if any
    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            MoonToml::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?
        }
        None => MoonToml::default(),
    };

    // Command-line flags win over the file; bad values are clamped, not fatal
    let options = file_config.disc.merged_with(&cli.draw_overrides());
    if let Err(e) = options.validate() {
        tracing::warn!("{}; continuing with clamped values", e);
    }
    let config = options.apply_defaults();

    let format = cli.format.unwrap_or_else(|| file_config.format());
    let output_path = cli.output.clone().or_else(|| file_config.output.path.clone());
    let background = match cli.background.as_ref().or(file_config.output.background.as_ref()) {
        Some(value) => Colour::parse(value)?,
        None => Colour::TRANSPARENT,
    };

    // Pin the clock so every output describes the same moment
    let moment = match cli.moment()? {
        Some(moment) => moment,
        None => SystemClock.now(),
    };
    let engine = MoonEngine::new(FixedClock::new(moment), config);
    let storage = LocalStorage::new(".");

    match format {
        OutputFormat::Svg => {
            let rendering = engine.run(&mut SvgRenderer::new())?;
            match output_path {
                Some(path) => {
                    let written = storage.write_file(&path, rendering.output.as_bytes())?;
                    tracing::info!("SVG saved to: {}", written.display());
                    println!("{}", rendering.label());
                }
                None => {
                    print!("{}", rendering.output);
                    eprintln!("{}", rendering.label());
                }
            }
        }
        OutputFormat::Png => {
            let rendering = engine.run(&mut RasterRenderer::with_background(background))?;
            let path = output_path.unwrap_or_else(|| "moon.png".to_string());
            let written = storage.write_file(&path, &encode_png(&rendering.output)?)?;
            tracing::info!("PNG saved to: {}", written.display());
            println!("{}", rendering.label());
        }
        OutputFormat::Json => {
            let report = engine.report();
            let text = serde_json::to_string_pretty(&report).map_err(MoonError::from)?;
            match output_path {
                Some(path) => {
                    let written = storage.write_file(&path, text.as_bytes())?;
                    tracing::info!("Report saved to: {}", written.display());
                    println!("{}", engine.current_phase().name);
                }
                None => println!("{}", text),
            }
        }
    }

    Ok(())
}
