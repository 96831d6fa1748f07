use clap::{Parser, Subcommand};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use voxelspace_camera::Camera;
use voxelspace_common::{GridDims, RenderSettings};
use voxelspace_input::{apply_action, walk_deltas, Action};
use voxelspace_render::{Raycaster, Renderer};
use voxelspace_tools::FrameInspector;
use voxelspace_world::VoxelGrid;

#[derive(Parser)]
#[command(name = "voxelspace-cli", about = "Headless voxelspace rendering")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and default-world facts
    Info,
    /// Render frames of the sealed box world and report per-frame stats
    Render {
        /// Number of frames to render
        #[arg(short, long, default_value = "1")]
        frames: u32,
        /// Rotate the camera between frames (radians of azimuth per frame)
        #[arg(long, default_value = "0.0")]
        spin: f64,
        /// Render settings file (JSON); flags below override it
        #[arg(long)]
        config: Option<String>,
        /// Output width in pixels
        #[arg(long)]
        width: Option<u32>,
        /// Output height in pixels
        #[arg(long)]
        height: Option<u32>,
    },
    /// Walk the camera toward a wall and show where collision stops it
    Walk {
        /// Number of movement steps to attempt
        #[arg(short, long, default_value = "60")]
        steps: u32,
        /// Distance per step in world units
        #[arg(long, default_value = "0.5")]
        stride: f64,
    },
}

fn load_settings(
    config: Option<&str>,
    width: Option<u32>,
    height: Option<u32>,
) -> anyhow::Result<RenderSettings> {
    let mut settings = match config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => RenderSettings::default(),
    };
    if let Some(w) = width {
        settings.width = w;
    }
    if let Some(h) = height {
        settings.height = h;
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("voxelspace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", voxelspace_common::crate_info());
            println!("world: {}", voxelspace_world::crate_info());
            println!("camera: {}", voxelspace_camera::crate_info());
            println!("render: {}", voxelspace_render::crate_info());
            println!("input: {}", voxelspace_input::crate_info());
            println!("tools: {}", voxelspace_tools::crate_info());

            let dims = GridDims::default();
            let grid = VoxelGrid::sealed_box(dims);
            println!(
                "default world: {}x{}x{}, sealed: {}",
                dims.width,
                dims.height,
                dims.depth,
                grid.is_sealed()
            );
            let settings = RenderSettings::default();
            println!(
                "default output: {}x{}, fov {:.3} rad, focal {:.1}, max draw {}",
                settings.width,
                settings.height,
                settings.fov,
                settings.focal_length(),
                settings.max_draw_distance
            );
        }
        Commands::Render {
            frames,
            spin,
            config,
            width,
            height,
        } => {
            let settings = load_settings(config.as_deref(), width, height)?;
            let dims = GridDims::default();
            let grid = VoxelGrid::sealed_box(dims);
            let mut camera = Camera::centered_in(dims);
            let raycaster = Raycaster::new(settings);
            let mut buffer = raycaster.make_buffer();

            println!(
                "Rendering {frames} frame(s) at {}x{}",
                settings.width, settings.height
            );
            for frame in 0..frames {
                let start = Instant::now();
                raycaster.render(&grid, &camera, &mut buffer)?;
                let elapsed = start.elapsed();

                let summary = FrameInspector::summary(&buffer, settings.sky);
                println!(
                    "frame {frame}: {summary} azimuth={:.3} ({elapsed:?})",
                    camera.azimuth
                );

                if spin != 0.0 {
                    apply_action(
                        &mut camera,
                        &grid,
                        Action::Rotate {
                            d_azimuth: spin,
                            d_altitude: 0.0,
                        },
                    );
                }
            }
        }
        Commands::Walk { steps, stride } => {
            let dims = GridDims::default();
            let grid = VoxelGrid::sealed_box(dims);
            let mut camera = Camera::centered_in(dims);

            println!(
                "Walking +z from {:?} in strides of {stride}",
                camera.cell()
            );
            let mut blocked_at = None;
            for step in 0..steps {
                let (dx, dz) = walk_deltas(camera.azimuth, stride, 0.0);
                let moved = apply_action(
                    &mut camera,
                    &grid,
                    Action::Move {
                        dx,
                        dy: 0.0,
                        dz,
                    },
                );
                if !moved {
                    blocked_at = Some(step);
                    break;
                }
                tracing::debug!(step, cell = ?camera.cell(), "moved");
            }

            let pos = camera.position();
            match blocked_at {
                Some(step) => println!(
                    "blocked by the wall at step {step}, camera at ({:.2}, {:.2}, {:.2})",
                    pos.x, pos.y, pos.z
                ),
                None => println!(
                    "finished {steps} steps, camera at ({:.2}, {:.2}, {:.2})",
                    pos.x, pos.y, pos.z
                ),
            }
        }
    }

    Ok(())
}
