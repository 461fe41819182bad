//! `syscolour`: prints the OS appearance colour scheme and renders the
//! stylesheet template against it.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use syscolour::{BundledSchemes, ColourScheme, Settings, SystemLoader, TemplateBinder, Variant};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_LEVEL_ENV: &str = "SYSCOLOUR_LOG";

#[derive(Parser, Debug)]
#[command(name = "syscolour", version)]
#[command(about = "Read the OS appearance colours and bind them into a stylesheet")]
struct Cli {
    /// YAML settings file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); overridden by SYSCOLOUR_LOG
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the colour scheme as JSON
    Scheme {
        #[command(flatten)]
        source: SchemeArgs,
    },
    /// Render the stylesheet template
    Render {
        #[command(flatten)]
        source: SchemeArgs,

        /// Template file to use instead of the bundled one
        #[arg(long, value_name = "PATH")]
        template: Option<PathBuf>,

        /// Write the stylesheet to a file, keep it and print its path
        #[arg(long)]
        keep: bool,
    },
}

#[derive(Args, Debug)]
struct SchemeArgs {
    /// Use a bundled scheme instead of querying the OS
    #[arg(long, value_name = "VARIANT", value_parser = Variant::from_str)]
    bundled: Option<Variant>,

    /// Replace the slider colours with their dark-mode values
    #[arg(long)]
    adjust_slider: bool,
}

fn setup_logs(log_level: &str) -> anyhow::Result<()> {
    let mut filter_level = LevelFilter::from_str(log_level).unwrap_or(LevelFilter::WARN);

    if let Ok(data) = std::env::var(LOG_LEVEL_ENV) {
        if !data.is_empty() {
            filter_level = LevelFilter::from_str(&data).unwrap_or(filter_level);
        }
    }

    let filter = EnvFilter::builder()
        .with_default_directive(filter_level.into())
        .parse("")?;

    // stdout carries the command output
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);
    tracing_subscriber::registry().with(stderr_layer).init();

    tracing::debug!(level = %filter_level, "logger ready");
    Ok(())
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

fn load_scheme(
    settings: &Settings,
    bundled: &BundledSchemes,
    args: &SchemeArgs,
) -> anyhow::Result<ColourScheme> {
    let mut scheme = match args.bundled {
        Some(variant) => bundled.get(variant)?.clone(),
        None => {
            let probe_settings = settings.probe_settings()?;
            SystemLoader::real(&probe_settings).load_or_bundled(bundled)?
        }
    };
    if args.adjust_slider {
        scheme.adjust_slider();
    }
    Ok(scheme)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(cli.config.as_ref())?;
    let bundled = BundledSchemes::embedded();

    match cli.command {
        Command::Scheme { source } => {
            let scheme = load_scheme(&settings, &bundled, &source)?;
            println!("{}", scheme.to_json_pretty()?);
        }
        Command::Render {
            source,
            template,
            keep,
        } => {
            let scheme = load_scheme(&settings, &bundled, &source)?;

            let mut binder = TemplateBinder::embedded();
            if let Some(path) = template.as_deref().or(settings.template_path()) {
                binder = binder.with_template_file(path);
            }

            if keep {
                let Some(reference) = binder.write(&scheme)? else {
                    bail!("no stylesheet template found");
                };
                let path = reference.persist()?;
                println!("{}", path.display());
            } else {
                let Some(css) = binder.render(&scheme)? else {
                    bail!("no stylesheet template found");
                };
                print!("{}", css);
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Err(e) = setup_logs(&cli.log_level) {
        eprintln!("unable to configure the logger: {e:?}");
    }
    run(cli)
}
