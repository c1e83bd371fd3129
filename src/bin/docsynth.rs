use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "docsynth", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset of pages with a gt.txt label file.
    Generate(GenerateArgs),
    /// Render a single page as a PNG.
    Page(PageArgs),
    /// Print a default template configuration as JSON, ready for `generate`.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Template configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Dataset root directory.
    #[arg(long)]
    out: PathBuf,

    /// Number of pages.
    #[arg(long)]
    count: u64,

    /// Index of the first page.
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Run seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Enable page-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Pages per parallel batch (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Stop at the first failed page instead of skipping it.
    #[arg(long, default_value_t = false)]
    halt_on_error: bool,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Font file for the parley renderer; repeat for more. Without fonts the config uses the
    /// glyph_box renderer.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Template configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Page index.
    #[arg(long, default_value_t = 0)]
    index: u64,

    /// Run seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Outline paragraphs and fragments.
    #[arg(long, default_value_t = false)]
    boxes: bool,

    /// Also write the page geometry as JSON.
    #[arg(long)]
    geometry: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Page(args) => cmd_page(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_template(path: &Path) -> anyhow::Result<docsynth::DocumentTemplate> {
    let config = docsynth::TemplateConfig::from_path(path)?;
    let template = docsynth::DocumentTemplate::from_config(config)
        .with_context(|| format!("build template from '{}'", path.display()))?;
    Ok(template)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let template = load_template(&args.config)?;
    let opts = docsynth::RunOpts {
        count: args.count,
        start_index: args.start,
        seed: args.seed,
        parallel: args.parallel,
        threads: args.threads,
        chunk_size: args.chunk_size,
        halt_on_error: args.halt_on_error,
    };
    let mut sink = docsynth::DatasetWriter::new(&args.out);
    let stats = docsynth::generate_dataset(&template, &mut sink, &opts)?;

    eprintln!(
        "wrote {} of {} pages to {} ({} failed)",
        stats.pages_written,
        stats.pages_total,
        args.out.display(),
        stats.pages_failed
    );
    Ok(())
}

fn cmd_page(args: PageArgs) -> anyhow::Result<()> {
    let template = load_template(&args.config)?;
    let mut renderer = template.create_renderer();
    let page = docsynth::generate_page(&template, args.seed, args.index, renderer.as_mut())?;

    let raster = if args.boxes {
        page.with_boxes()?
    } else {
        page.image().clone()
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    raster
        .to_rgba_image()
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    if let Some(path) = &args.geometry {
        let json = serde_json::to_string_pretty(&page.geometry())?;
        std::fs::write(path, json)
            .with_context(|| format!("write geometry '{}'", path.display()))?;
    }

    eprintln!("wrote {} ({})", args.out.display(), page.label());
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let mut config = docsynth::TemplateConfig::default();
    if args.fonts.is_empty() {
        config.renderer = docsynth::TextRendererKind::GlyphBox;
        eprintln!("no --font given: using the glyph_box renderer");
    } else {
        config.font.paths = args.fonts;
    }
    config.validate()?;
    let json = serde_json::to_string_pretty(&config)?;
    println!("{json}");
    Ok(())
}
