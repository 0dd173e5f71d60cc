use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use craftlog::core::config::{Config, OutputFormat};
use craftlog::core::{OutputParser, VariantRegistry};
use craftlog::output::{format_result, format_variant, TypeFilter};

#[derive(Parser)]
#[command(name = "craftlog", about = "craftlog: classify Minecraft server console output")]
struct Cli {
    /// Server variant (vanilla, bukkit, paper, forge, or an alias such as craftbukkit).
    #[arg(long, short)]
    variant: Option<String>,

    /// Read this log file instead of stdin.
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Print JSON lines instead of tab-separated text.
    #[arg(long)]
    json: bool,

    /// Only print these message types (comma separated, e.g. player_join,warning).
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,

    /// Print the known server variants and exit.
    #[arg(long)]
    list_variants: bool,

    /// Print the launch parameters and flags for the selected variant and exit.
    #[arg(long)]
    show_launch: bool,

    /// Use this config file instead of ~/.config/craftlog/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to /tmp/craftlog-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/craftlog-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("craftlog debug log started: tail -f /tmp/craftlog-debug.log");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default config");
            Config::defaults()
        }),
    };
    let registry = VariantRegistry::standard()?;
    let mut stdout = std::io::stdout().lock();

    if cli.list_variants {
        for variant in registry.iter() {
            let is_default = variant.id() == registry.default_id();
            writeln!(stdout, "{}", format_variant(variant, is_default))?;
        }
        return Ok(());
    }

    let variant_name = cli.variant.as_deref().unwrap_or(&config.server.variant);
    let parser = OutputParser::for_name(&registry, variant_name);

    if cli.show_launch {
        let variant = parser.variant();
        writeln!(stdout, "parameters\t{}", variant.launch_parameters(&config.launch.parameters))?;
        writeln!(stdout, "flags\t{}", variant.launch_flags(&config.launch.flags))?;
        return Ok(());
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output.format
    };
    let filter = TypeFilter::from_names(&cli.only)?;
    let capacity = config.output.channel_capacity;

    let mut feed = match &cli.file {
        Some(path) => craftlog::feeds::file::open(path, parser, capacity).await?,
        None => craftlog::feeds::stdin::spawn(parser, capacity),
    };

    while let Some(result) = feed.recv().await {
        if filter.accepts(&result) {
            writeln!(stdout, "{}", format_result(&result, format)?)?;
        }
    }
    let summary = feed.finish().await?;
    tracing::debug!(lines = summary.lines, "done");
    Ok(())
}
