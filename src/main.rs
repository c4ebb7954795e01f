use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use phong_tracer::consts::OUT_FILE;
use phong_tracer::scene::Scene;

/// Renders a JSON scene description to a PPM image.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// The JSON scene to render.
    scene: PathBuf,

    /// Where to write the rendered PPM image.
    #[clap(short, long, default_value = OUT_FILE)]
    output: PathBuf,

    /// Number of render threads. 1 renders on the main thread.
    #[clap(short = 'j', long)]
    threads: Option<usize>,

    /// Offset along the surface normal for shadow rays.
    #[clap(long)]
    bias: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    // Info by default; RUST_LOG overrides
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let mut scene = Scene::load(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;

    if let Some(bias) = args.bias {
        scene.world.shadow_bias = bias;
    }

    let start = Instant::now();
    let canvas = match args.threads {
        Some(1) => scene.camera.render(&scene.world)?,
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("failed to start render threads")?;
            pool.install(|| scene.camera.render_parallel(&scene.world))?
        },
        None => scene.camera.render_parallel(&scene.world)?,
    };
    log::info!("rendered in {:.2?}", start.elapsed());

    canvas.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}
