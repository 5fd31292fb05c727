use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photogrid::{
    AspectRatio, CountRecommender, EditorConfig, EditorSession, FilterId, ImageSource,
    ImageTransform, Layout, LayoutRecommender, LayoutStyle, OutputSpec, PresetStore,
};

#[derive(Parser, Debug)]
#[command(name = "photogrid", version, about = "Compose photos into a grid collage")]
struct Cli {
    /// Editor config JSON (defaults apply to missing fields).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a collage to PNG.
    Render(RenderArgs),
    /// List layout templates, or the recommendation for an image count.
    Layouts {
        #[arg(long)]
        count: Option<usize>,
    },
    /// List the filter catalog.
    Filters,
    /// Manage saved presets.
    #[command(subcommand)]
    Preset(PresetCommand),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Image path or data URI; repeat in collage order.
    #[arg(long = "image", value_name = "SRC")]
    images: Vec<String>,

    /// Template id (see `photogrid layouts`).
    #[arg(long, conflicts_with_all = ["rows", "cols"])]
    layout: Option<String>,

    #[arg(long, requires = "cols")]
    rows: Option<u32>,

    #[arg(long, requires = "rows")]
    cols: Option<u32>,

    /// grid, framed, masked or creative.
    #[arg(long)]
    style: Option<LayoutStyle>,

    /// Aspect ratio as W:H.
    #[arg(long)]
    aspect: Option<AspectRatio>,

    /// Length of the longer output side in pixels.
    #[arg(long)]
    resolution: Option<u32>,

    #[arg(long)]
    filter: Option<FilterId>,

    /// Per-image pan and zoom as IDX:X,Y,SCALE.
    #[arg(long = "transform", value_name = "IDX:X,Y,SCALE", value_parser = parse_transform)]
    transforms: Vec<(usize, ImageTransform)>,

    /// Draw the selection outline around this image.
    #[arg(long)]
    select: Option<usize>,

    /// Apply a saved preset before the flags above.
    #[arg(long, requires = "presets")]
    preset: Option<String>,

    /// Presets file.
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long, conflicts_with = "out_dir", required_unless_present = "out_dir")]
    out: Option<PathBuf>,

    /// Output directory; the file name follows the export naming convention.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum PresetCommand {
    /// Save layout, aspect ratio, resolution and filter under a name.
    Save {
        #[arg(long)]
        presets: PathBuf,
        #[arg(long)]
        name: String,
        /// Template id; defaults to the recommendation for `--count`.
        #[arg(long)]
        layout: Option<String>,
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long)]
        style: Option<LayoutStyle>,
        #[arg(long, default_value = "1:1")]
        aspect: AspectRatio,
        #[arg(long, default_value_t = 1080)]
        resolution: u32,
        #[arg(long, default_value = "none")]
        filter: FilterId,
    },
    /// Print saved presets.
    List {
        #[arg(long)]
        presets: PathBuf,
    },
    /// Delete a preset.
    Remove {
        #[arg(long)]
        presets: PathBuf,
        #[arg(long)]
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    match cli.cmd {
        Command::Render(args) => cmd_render(args, config),
        Command::Layouts { count } => cmd_layouts(count),
        Command::Filters => cmd_filters(),
        Command::Preset(cmd) => cmd_preset(cmd),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EditorConfig> {
    let base = match path {
        Some(p) => EditorConfig::from_path(p)?,
        None => EditorConfig::default(),
    };
    Ok(base.with_env_overrides()?)
}

fn parse_transform(s: &str) -> Result<(usize, ImageTransform), String> {
    let (idx, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("expected IDX:X,Y,SCALE, got '{s}'"))?;
    let idx: usize = idx
        .trim()
        .parse()
        .map_err(|_| format!("invalid image index '{idx}'"))?;
    let parts: Vec<f64> = rest
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid transform '{rest}': {e}"))?;
    let [x, y, scale] = parts[..] else {
        return Err(format!("expected three numbers after ':', got '{rest}'"));
    };
    Ok((idx, ImageTransform::clamped(x, y, scale)))
}

fn resolve_template(id: &str, style: Option<LayoutStyle>) -> anyhow::Result<Layout> {
    let layout = photogrid::find_template(id)
        .with_context(|| format!("unknown layout template '{id}' (see `photogrid layouts`)"))?;
    Ok(match style {
        Some(style) => layout.with_style(style),
        None => layout,
    })
}

fn cmd_render(args: RenderArgs, config: EditorConfig) -> anyhow::Result<()> {
    if args.images.is_empty() {
        bail!("nothing to export: pass at least one --image");
    }
    let mut session = EditorSession::new(config);

    let sources: Vec<ImageSource> = args.images.iter().map(|s| ImageSource::parse(s)).collect();
    let explicit_layout = args.layout.is_some() || args.rows.is_some();
    session.replace_images(sources, !explicit_layout);

    if let (Some(name), Some(path)) = (&args.preset, &args.presets) {
        let store = PresetStore::open(path)?;
        let preset = store
            .get(name)
            .with_context(|| format!("no preset named '{name}' in '{}'", path.display()))?;
        session.apply_preset(&preset.snapshot())?;
    }

    if let Some(id) = &args.layout {
        session.set_layout(resolve_template(id, args.style)?)?;
    } else if let (Some(rows), Some(cols)) = (args.rows, args.cols) {
        session.set_layout(Layout::grid(rows, cols, args.style.unwrap_or_default())?)?;
    } else if let Some(style) = args.style {
        let current = session.layout().clone();
        session.set_layout(current.with_style(style))?;
    }

    let current = session.output();
    session.set_output(OutputSpec::new(
        args.aspect.unwrap_or(current.aspect),
        args.resolution.unwrap_or(current.resolution),
    ))?;
    if let Some(filter) = args.filter {
        session.set_filter(filter);
    }
    for (idx, t) in &args.transforms {
        if *idx >= session.images().len() {
            bail!("--transform index {idx} is out of range");
        }
        session.set_transform(*idx, *t);
    }
    if let Some(idx) = args.select {
        session.select(Some(idx));
    }

    let report = session
        .end_event()?
        .context("render produced no frame")?;
    let frame = session.frame().context("render produced no frame")?;

    let out = match (args.out, args.out_dir) {
        (Some(out), _) => out,
        (None, Some(dir)) => dir.join(session.export_file_name(chrono::Local::now().date_naive())),
        (None, None) => bail!("one of --out or --out-dir is required"),
    };
    photogrid::write_png(frame, &out)?;

    tracing::info!(
        drawn = report.drawn_slots.len(),
        placeholders = report.placeholder_slots.len(),
        failed = report.failed_slots.len(),
        "collage rendered"
    );
    println!("{}", out.display());
    Ok(())
}

fn cmd_layouts(count: Option<usize>) -> anyhow::Result<()> {
    match count {
        Some(n) => {
            let layout = CountRecommender::default().recommend(n);
            println!(
                "{}\t{}x{}\t{}\t{} slot(s) remaining",
                layout.id,
                layout.rows,
                layout.cols,
                layout.name,
                layout.slots_remaining(n)
            );
        }
        None => {
            for layout in photogrid::templates() {
                println!(
                    "{}\t{}x{}\t{}\t{}",
                    layout.id, layout.rows, layout.cols, layout.name, layout.style
                );
            }
        }
    }
    Ok(())
}

fn cmd_filters() -> anyhow::Result<()> {
    use photogrid::FilterCatalog as _;

    for id in FilterId::ALL {
        let chain = photogrid::BuiltinFilters.resolve(id);
        println!("{id}\t{}", serde_json::to_string(&chain.ops)?);
    }
    Ok(())
}

fn cmd_preset(cmd: PresetCommand) -> anyhow::Result<()> {
    match cmd {
        PresetCommand::Save {
            presets,
            name,
            layout,
            count,
            style,
            aspect,
            resolution,
            filter,
        } => {
            let layout = match layout {
                Some(id) => resolve_template(&id, style)?,
                None => CountRecommender {
                    style: style.unwrap_or_default(),
                }
                .recommend(count),
            };
            let mut store = PresetStore::open(&presets)?;
            let snapshot = photogrid::PresetSnapshot {
                layout,
                aspect_ratio: aspect,
                resolution,
                filter,
            };
            let saved = store.save(&name, snapshot, chrono::Utc::now())?.name.clone();
            store.flush()?;
            println!("saved preset '{saved}'");
        }
        PresetCommand::List { presets } => {
            let store = PresetStore::open(&presets)?;
            for p in store.list() {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    p.name,
                    p.layout.id,
                    p.aspect_ratio,
                    p.resolution,
                    p.filter,
                    p.saved_at.to_rfc3339()
                );
            }
        }
        PresetCommand::Remove { presets, name } => {
            let mut store = PresetStore::open(&presets)?;
            if !store.remove(&name) {
                bail!("no preset named '{name}'");
            }
            store.flush()?;
            println!("removed preset '{name}'");
        }
    }
    Ok(())
}
