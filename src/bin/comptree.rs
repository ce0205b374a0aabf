use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use comptree::{CompositionId, Engine, EngineOpts, ExportedComposition};

#[derive(Parser, Debug)]
#[command(name = "comptree", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the nesting outline of an exported composition tree.
    Inspect(InputArgs),
    /// Import a tree and export it again with fresh ids.
    Reimport(ReimportArgs),
    /// Print composition/track/clip counts and integrity violations.
    Stats(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input export JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine options JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReimportArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output export JSON.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Reimport(args) => cmd_reimport(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn read_export(path: &Path) -> anyhow::Result<ExportedComposition> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read export '{}'", path.display()))?;
    ExportedComposition::from_json(&s).with_context(|| "parse export JSON")
}

fn load(args: &InputArgs) -> anyhow::Result<(Engine, CompositionId)> {
    let opts = match &args.config {
        Some(path) => EngineOpts::from_path(path)?,
        None => EngineOpts::default(),
    };
    let data = read_export(&args.in_path)?;
    let mut engine = Engine::new(opts)?;
    let id = engine
        .try_import_composition(&data, None)
        .with_context(|| format!("import '{}'", args.in_path.display()))?;
    Ok((engine, id))
}

fn cmd_inspect(args: InputArgs) -> anyhow::Result<()> {
    let (engine, root) = load(&args)?;
    let ids = std::iter::once(root.clone()).chain(engine.nested_compositions(&root));
    for id in ids {
        let Some(comp) = engine.composition(&id) else {
            continue;
        };
        let depth = engine.nesting_depth(&id).unwrap_or(0);
        println!(
            "{:indent$}{} [{}x{} @ {} fps, {} ms] tracks={} clips={}",
            "",
            comp.name,
            comp.width,
            comp.height,
            comp.frame_rate,
            comp.duration,
            comp.track_ids.len(),
            engine.clips_of_composition(&id).len(),
            indent = depth * 2,
        );
    }
    Ok(())
}

fn cmd_reimport(args: ReimportArgs) -> anyhow::Result<()> {
    let (engine, root) = load(&args.input)?;
    let json = engine.export_json(&root)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write export '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_stats(args: InputArgs) -> anyhow::Result<()> {
    let (engine, _) = load(&args)?;
    let registry = engine.registry();
    println!("compositions: {}", registry.composition_count());
    println!("tracks:       {}", registry.track_count());
    println!("clips:        {}", registry.clip_count());

    let violations = engine.check_integrity();
    println!("violations:   {}", violations.len());
    for v in &violations {
        println!("  {v}");
    }
    Ok(())
}
