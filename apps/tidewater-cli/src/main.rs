use clap::{Parser, Subcommand};
use tidewater_panel::{Binding, Folder, controls};
use tidewater_render::{MAX_PROBE_SAMPLES, Renderer, SurfaceProbe};
use tidewater_scene::{FrameDriver, SceneConfig, Viewport, WaterScene};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tidewater-cli", about = "Headless inspection of the tidewater scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and scene defaults
    Info,
    /// List the parameter panel's controls and their default values
    Controls,
    /// Evaluate the shading model over a sample grid
    Probe {
        /// Elapsed time in seconds
        #[arg(short, long, default_value = "0")]
        time: f32,
        /// Sample points per side
        #[arg(
            short,
            long,
            default_value = "32",
            value_parser = clap::value_parser!(u32).range(2..=MAX_PROBE_SAMPLES as i64)
        )]
        samples: u32,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn default_scene() -> WaterScene {
    WaterScene::new(&SceneConfig::default(), Viewport::new(1280, 720, 1.0))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            let scene = default_scene();
            let config = SceneConfig::default();
            println!("tidewater-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", tidewater_render::crate_info());
            println!(
                "plane: size={} subdivisions={} vertices={}",
                config.size,
                config.subdivisions,
                scene.surface.grid().vertex_count()
            );
            println!(
                "uniforms: {}",
                serde_json::to_string(&scene.uniforms)?
            );
            let cam = &scene.camera;
            println!(
                "camera: pos=({:.1}, {:.1}, {:.1}) fov={:.0} near={} far={}",
                cam.position.x,
                cam.position.y,
                cam.position.z,
                cam.fov_y.to_degrees(),
                cam.near,
                cam.far
            );
        }
        Commands::Controls => {
            let scene = default_scene();
            let all = controls();
            for folder in Folder::ALL {
                println!("[{}]", folder.title());
                for control in all.iter().filter(|c| c.folder == folder) {
                    let kind = match control.binding {
                        Binding::Scalar(_, range) => format!("range {range}"),
                        Binding::Color(_) => "color".to_string(),
                        Binding::Wireframe => "toggle".to_string(),
                    };
                    println!(
                        "  {:<18} {:<10} {}",
                        control.label,
                        control.current(&scene).to_string(),
                        kind
                    );
                }
            }
        }
        Commands::Probe {
            time,
            samples,
            json,
        } => {
            tracing::debug!(time, samples, "probing surface");
            let mut scene = default_scene();
            FrameDriver::new().advance(&mut scene, time.max(0.0));
            let report = SurfaceProbe::new(samples).render(&scene);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }
    }

    Ok(())
}
