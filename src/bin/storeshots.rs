use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "storeshots", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose every configured slide into the output directory.
    Render(RenderArgs),
    /// Print the configured slides without rendering.
    List(ConfigArgs),
    /// Print the effective job configuration as JSON.
    DumpConfig(ConfigArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Job configuration JSON; the built-in ten-slide job when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Directory holding the raw device screenshots.
    #[arg(long, default_value = "AppStore/source")]
    source: PathBuf,

    /// Directory the composed slides are written to (created if missing).
    #[arg(long, default_value = "AppStore/Screenshots")]
    out: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,

    /// Extra directory of `ttf`/`otf`/`ttc` fonts, tried before the platform fonts.
    #[arg(long)]
    font_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::List(args) => cmd_list(args),
        Command::DumpConfig(args) => cmd_dump_config(args),
    }
}

fn load_job(args: &ConfigArgs) -> anyhow::Result<storeshots::JobConfig> {
    let job = match &args.config {
        Some(path) => storeshots::JobConfig::from_path(path)
            .with_context(|| format!("load job config '{}'", path.display()))?,
        None => storeshots::JobConfig::default(),
    };
    Ok(job)
}

fn font_resolver(font_dir: Option<&Path>) -> storeshots::ChainResolver {
    let mut chain = storeshots::ChainResolver::new();
    if let Some(dir) = font_dir {
        let db = storeshots::FontDbResolver::from_dir(dir);
        if db.is_empty() {
            tracing::warn!(dir = %dir.display(), "no fonts found in font dir");
        } else {
            chain = chain.with(db);
        }
    }
    chain.with(storeshots::default_resolver())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let job = load_job(&args.config)?;
    let fonts = font_resolver(args.font_dir.as_deref());

    let report = storeshots::run_batch(&job, &args.source, &args.out, &fonts)?;

    let missing = report.missing();
    if !missing.is_empty() {
        eprintln!(
            "missing from {}: {}",
            args.source.display(),
            missing.join(", ")
        );
    }
    for (output, error) in report.failures() {
        eprintln!("failed {output}: {error}");
    }
    println!("{}", report.summary());
    println!("output: {}", args.out.display());
    Ok(())
}

fn cmd_list(args: ConfigArgs) -> anyhow::Result<()> {
    let job = load_job(&args)?;
    for (i, slide) in job.slides.iter().enumerate() {
        println!(
            "{:2}. {:<20} -> {:<22} {}",
            i + 1,
            slide.source,
            slide.output,
            slide.headline.join(" ")
        );
    }
    Ok(())
}

fn cmd_dump_config(args: ConfigArgs) -> anyhow::Result<()> {
    let job = load_job(&args)?;
    println!("{}", job.to_json_pretty()?);
    Ok(())
}
