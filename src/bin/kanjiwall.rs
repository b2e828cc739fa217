use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use kanjiwall::EntryParser as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kanjiwall", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one wallpaper PNG per entry.
    Generate(GenerateArgs),
    /// Print the compound block layout of one entry as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Input entry file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Source dialect; `auto` picks CSV for `.csv` files and scraped text otherwise.
    #[arg(long, value_enum, default_value_t = FormatChoice::Auto)]
    format: FormatChoice,

    /// JSON config overriding the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file to try before the configured candidates (repeatable).
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory (created if missing).
    #[arg(long)]
    out_dir: PathBuf,

    /// Output file prefix.
    #[arg(long)]
    prefix: Option<String>,

    /// Render on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads when `--parallel` is set.
    #[arg(long)]
    threads: Option<usize>,

    /// Entries per parallel chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// 0-based position of the entry in the parsed list.
    #[arg(long, default_value_t = 0)]
    index: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Auto,
    Csv,
    Text,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn load_config(source: &SourceArgs) -> anyhow::Result<kanjiwall::WallpaperConfig> {
    let mut config = match &source.config {
        Some(path) => kanjiwall::WallpaperConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => kanjiwall::WallpaperConfig::default(),
    };
    if !source.fonts.is_empty() {
        let mut candidates = source.fonts.clone();
        candidates.append(&mut config.fonts.candidates);
        config.fonts.candidates = candidates;
    }
    Ok(config)
}

fn parse_entries(source: &SourceArgs) -> anyhow::Result<kanjiwall::ParsedEntries> {
    let format = match source.format {
        FormatChoice::Auto => kanjiwall::SourceFormat::from_path(&source.in_path),
        FormatChoice::Csv => kanjiwall::SourceFormat::Csv,
        FormatChoice::Text => kanjiwall::SourceFormat::ScrapedText,
    };
    let parser = format.parser();
    let parsed = parser
        .parse_path(&source.in_path)
        .with_context(|| format!("parse entries from '{}'", source.in_path.display()))?;
    tracing::info!(
        dialect = parser.dialect(),
        entries = parsed.entries.len(),
        skipped = parsed.skipped.len(),
        "parsed source"
    );
    Ok(parsed)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.source)?;
    if let Some(prefix) = &args.prefix {
        config.output.prefix = prefix.clone();
    }
    config.validate().context("invalid configuration")?;

    let parsed = parse_entries(&args.source)?;
    if parsed.entries.is_empty() {
        anyhow::bail!(
            "no valid entries found in '{}'",
            args.source.in_path.display()
        );
    }

    let styles = config.style_set();
    let renderer =
        kanjiwall::BatchRenderer::new(config.composer()?, &styles, config.output.start_index);
    let mut sink = kanjiwall::DirectorySink::new(&args.out_dir, &config.output)?;
    let opts = kanjiwall::BatchOpts {
        parallel: args.parallel,
        threads: args.threads,
        chunk_size: args.chunk_size,
    };
    let report = renderer.run(&parsed.entries, &mut sink, &opts)?;

    eprintln!("created: {} images", report.succeeded);
    eprintln!("failed: {} images", report.failed);
    eprintln!("output directory: {}", display_dir(sink.dir()));
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let config = load_config(&args.source)?;
    config.validate().context("invalid configuration")?;

    let parsed = parse_entries(&args.source)?;
    let entry = parsed.entries.get(args.index).with_context(|| {
        format!(
            "entry index {} out of range ({} entries)",
            args.index,
            parsed.entries.len()
        )
    })?;

    let styles = config.style_set();
    let mut measurer = styles.measurer()?;
    let block = config.composer()?.layout_for(entry, &mut measurer)?;

    let json = serde_json::to_string_pretty(&block).context("serialize layout")?;
    println!("{json}");
    Ok(())
}

fn display_dir(dir: &Path) -> String {
    std::fs::canonicalize(dir)
        .unwrap_or_else(|_| dir.to_path_buf())
        .display()
        .to_string()
}
