#![deny(unsafe_code)]
//! Headless front end for the particle field.
//!
//! Subcommands:
//! - `render`: simulate a scene for N frames and write the last one as PNG
//! - `stats`: simulate a scene and report per-frame draw counts
//! - `params`: print presets and the parameter schema

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use particle_field_core::{FixedFrames, HostEvent, RecordingSurface, Rgba, RunLoop, Scene};
use particle_field_plexus::{ParticleField, PlexusParams, PRESET_NAMES};
use particle_field_raster::Raster;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "particle-field", about = "Drifting particle field renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a scene and write its last frame as a PNG.
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Page colour the transparent canvas is composited over.
        #[arg(long, default_value = "#0a0a0a")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "particles.png")]
        output: PathBuf,
    },
    /// Simulate a scene and report particle, circle and link counts.
    Stats {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// List presets and the tunable parameters.
    Params,
}

#[derive(Args)]
struct SceneArgs {
    /// Surface width in pixels.
    #[arg(short = 'W', long, default_value_t = 1200)]
    width: u32,

    /// Surface height in pixels.
    #[arg(short = 'H', long, default_value_t = 800)]
    height: u32,

    /// Frames to simulate (at most 1 000 000).
    #[arg(short, long, default_value_t = 120)]
    frames: usize,

    /// PRNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Preset name (classic, vivid).
    #[arg(short, long, default_value = "classic")]
    preset: String,

    /// Parameter overrides as a JSON object.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Fixed pointer position as "x,y".
    #[arg(long)]
    pointer: Option<String>,

    /// Load the whole scene from a JSON file; other scene flags are ignored.
    #[arg(long)]
    scene: Option<PathBuf>,
}

impl SceneArgs {
    fn resolve(self) -> Result<Scene, CliError> {
        let scene = match &self.scene {
            Some(path) => read_scene(path)?,
            None => {
                let params = serde_json::from_str(&self.params)
                    .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
                let pointer = self.pointer.as_deref().map(parse_pointer).transpose()?;
                Scene {
                    preset: self.preset,
                    params,
                    frames: self.frames,
                    pointer,
                    ..Scene::new(self.width, self.height, self.seed)
                }
            }
        };
        scene.validate()?;
        Ok(scene)
    }
}

fn read_scene(path: &Path) -> Result<Scene, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display())))?;
    Scene::from_json(&text)
        .map_err(|e| CliError::Input(format!("invalid scene {}: {e}", path.display())))
}

fn parse_pointer(text: &str) -> Result<[f64; 2], CliError> {
    let bad = || CliError::Input(format!("invalid --pointer {text:?}, expected \"x,y\""));
    let (x, y) = text.split_once(',').ok_or_else(bad)?;
    let x: f64 = x.trim().parse().map_err(|_| bad())?;
    let y: f64 = y.trim().parse().map_err(|_| bad())?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(bad());
    }
    Ok([x, y])
}

/// Builds the field for `scene` with its pointer queued for the first frame.
fn build_loop(scene: &Scene) -> Result<RunLoop<ParticleField>, CliError> {
    let field = ParticleField::from_json(
        scene.width,
        scene.height,
        scene.seed,
        &scene.preset,
        &scene.params,
    )?;
    let mut run_loop = RunLoop::new(field);
    if let Some([x, y]) = scene.pointer {
        run_loop.push_event(HostEvent::PointerMove { x, y });
    }
    Ok(run_loop)
}

fn render(scene: &Scene, background: Rgba, output: &Path) -> Result<usize, CliError> {
    let mut run_loop = build_loop(scene)?;
    let mut raster = Raster::new(scene.width, scene.height)?;
    // The picture is whatever the last frame drew, so always run at least one.
    let frames = run_loop.run(&mut FixedFrames(scene.frames.max(1)), &mut raster);
    log::info!(
        "simulated {frames} frames, {} particles",
        run_loop.engine().particles().len()
    );
    particle_field_raster::snapshot::write_png(&raster, background, output)?;
    Ok(run_loop.engine().particles().len())
}

/// Per-frame draw counts from a headless run.
struct FrameStats {
    particles: usize,
    circles: Vec<usize>,
    links: Vec<usize>,
}

fn stats(scene: &Scene) -> Result<FrameStats, CliError> {
    let mut run_loop = build_loop(scene)?;
    let mut surface = RecordingSurface::new(scene.width, scene.height);
    let mut circles = Vec::new();
    let mut links = Vec::new();
    run_loop.start();
    for _ in 0..scene.frames {
        run_loop.tick(&mut surface);
        circles.push(surface.circles().count());
        links.push(surface.lines().count());
    }
    Ok(FrameStats {
        particles: run_loop.engine().particles().len(),
        circles,
        links,
    })
}

fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<usize>() as f64 / values.len() as f64
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params => {
            let schema = PlexusParams::schema();
            if cli.json {
                let info = serde_json::json!({
                    "presets": PRESET_NAMES,
                    "schema": schema,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Presets:");
                println!("  {}", PRESET_NAMES.join(", "));
                println!("Parameters:");
                if let Some(fields) = schema.as_object() {
                    for (name, spec) in fields {
                        println!("  {name}: {spec}");
                    }
                }
            }
        }
        Command::Render {
            scene,
            background,
            output,
        } => {
            let scene = scene.resolve()?;
            let background = Rgba::from_hex(&background)?;
            let particles = render(&scene, background, &output)?;
            if cli.json {
                let info = serde_json::json!({
                    "scene": scene,
                    "particles": particles,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {}x{} {} ({} frames, seed {}, {particles} particles) -> {}",
                    scene.width,
                    scene.height,
                    scene.preset,
                    scene.frames.max(1),
                    scene.seed,
                    output.display()
                );
            }
        }
        Command::Stats { scene } => {
            let scene = scene.resolve()?;
            let stats = stats(&scene)?;
            if cli.json {
                let info = serde_json::json!({
                    "scene": scene,
                    "particles": stats.particles,
                    "circles_per_frame": stats.circles,
                    "links_per_frame": stats.links,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("particles: {}", stats.particles);
                println!("frames:    {}", stats.links.len());
                println!(
                    "links:     min {} / mean {:.1} / max {}",
                    stats.links.iter().min().copied().unwrap_or(0),
                    mean(&stats.links),
                    stats.links.iter().max().copied().unwrap_or(0)
                );
                println!("circles:   mean {:.1}", mean(&stats.circles));
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use particle_field_core::EngineError;
    use serde_json::json;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pointer_parses_pair() {
        assert_eq!(parse_pointer("120, 45.5").unwrap(), [120.0, 45.5]);
    }

    #[test]
    fn pointer_rejects_garbage() {
        for text in ["", "12", "a,b", "1,2,3", "nan,4"] {
            let err = parse_pointer(text).unwrap_err();
            assert_eq!(err.exit_code(), 12, "{text:?}");
        }
    }

    #[test]
    fn scene_flags_build_a_scene() {
        let cli = Cli::parse_from([
            "particle-field",
            "stats",
            "-W",
            "600",
            "-H",
            "400",
            "--frames",
            "3",
            "--pointer",
            "10,20",
            "--params",
            r#"{"link_distance": 80}"#,
        ]);
        let Command::Stats { scene } = cli.command else {
            panic!("expected stats");
        };
        let scene = scene.resolve().unwrap();
        assert_eq!((scene.width, scene.height, scene.frames), (600, 400, 3));
        assert_eq!(scene.pointer, Some([10.0, 20.0]));
        assert_eq!(scene.params, json!({"link_distance": 80}));
    }

    #[test]
    fn bad_params_json_is_input_error() {
        let cli = Cli::parse_from(["particle-field", "stats", "--params", "{nope"]);
        let Command::Stats { scene } = cli.command else {
            panic!("expected stats");
        };
        assert_eq!(scene.resolve().unwrap_err().exit_code(), 12);
    }

    #[test]
    fn zero_width_is_engine_error() {
        let cli = Cli::parse_from(["particle-field", "stats", "-W", "0"]);
        let Command::Stats { scene } = cli.command else {
            panic!("expected stats");
        };
        assert_eq!(scene.resolve().unwrap_err().exit_code(), 10);
    }

    #[test]
    fn huge_frame_count_is_rejected_before_running() {
        let cli = Cli::parse_from([
            "particle-field",
            "stats",
            "-W",
            "10",
            "-H",
            "10",
            "--frames",
            "18446744073709551615",
        ]);
        let Command::Stats { scene } = cli.command else {
            panic!("expected stats");
        };
        assert_eq!(scene.resolve().unwrap_err().exit_code(), 10);
    }

    #[test]
    fn oversized_render_is_rejected_before_allocating() {
        let cli = Cli::parse_from([
            "particle-field",
            "render",
            "-W",
            "100000",
            "-H",
            "100000",
        ]);
        let Command::Render { scene, .. } = cli.command else {
            panic!("expected render");
        };
        let err = scene.resolve().unwrap_err();
        assert!(matches!(err, CliError::Engine(EngineError::InvalidDimensions)));
    }

    #[test]
    fn missing_scene_file_is_io_error() {
        let err = read_scene(Path::new("/nonexistent/scene.json")).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn stats_counts_one_circle_per_particle() {
        let mut scene = Scene::new(600, 400, 7);
        scene.frames = 4;
        let stats = stats(&scene).unwrap();
        assert_eq!(stats.particles, 13);
        assert_eq!(stats.circles, vec![13; 4]);
        assert_eq!(stats.links.len(), 4);
    }

    #[test]
    fn unknown_preset_fails_before_running() {
        let mut scene = Scene::new(600, 400, 7);
        scene.preset = "neon".into();
        assert_eq!(stats(&scene).err().map(|e| e.exit_code()), Some(10));
    }

    #[test]
    fn render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("frame.png");
        let mut scene = Scene::new(120, 90, 3);
        scene.frames = 2;
        render(&scene, Rgba::rgb(10, 10, 10), &out).unwrap();
        assert!(out.metadata().unwrap().len() > 0);
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1, 2, 3]), 2.0);
    }
}
