use clap::{Parser, Subcommand};
use site_motion::sim::{DEFAULT_FRAME_MS, simulate_counter};
use site_motion::{config, demo, output, stat};
use std::path::PathBuf;

/// Shared flag for commands that read a config file.
#[derive(clap::Args, Clone)]
struct ConfigArgs {
    /// Config file (TOML); stock defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "site-motion")]
#[command(about = "Stat counters, scroll reveals, menus and modals for a marketing site")]
#[command(long_about = "\
Stat counters, scroll reveals, menus and modals for a marketing site

The library compiles to wasm and wires itself onto the page. This binary
lets you try the pieces without a browser:

  site-motion parse \"12,9 Mio.\"        how a stat string is understood
  site-motion simulate \"57%\" --fps 10  every frame of the count-up
  site-motion demo --output site/      a page carrying every hook
  site-motion check --config motion.toml

Set RUST_LOG=debug to see controller wiring and counter lifecycle.

Run 'site-motion gen-config' to generate a documented motion.toml.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show how a stat string is split into number, suffix and precision
    Parse {
        text: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the count-up for a stat against an in-memory page
    Simulate {
        text: String,
        /// Frames per second of the simulated display
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Behave as if the visitor prefers reduced motion
        #[arg(long)]
        reduced_motion: bool,
        #[command(flatten)]
        config: ConfigArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write a demo page with every hook the controllers use
    Demo {
        /// Output file, or a directory to write index.html into
        #[arg(long, default_value = "site-motion-demo")]
        output: PathBuf,
        /// Module script for the wasm-bindgen glue
        #[arg(long, default_value = "./pkg/site_motion.js")]
        script: String,
    },
    /// Load and validate a config file
    Check(ConfigArgs),
    /// Print a stock motion.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { text, json } => {
            let parsed = stat::parse_stat_value(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            } else {
                output::print_parse_output(&text, parsed.as_ref());
            }
        }
        Command::Simulate {
            text,
            fps,
            reduced_motion,
            config: config_args,
            json,
        } => {
            let motion = config::load_config(config_args.config.as_deref())?;
            let frame_ms = frame_interval(fps);
            let run = simulate_counter(&text, &motion, frame_ms, reduced_motion);
            if json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                output::print_simulation(&run, motion.counter.duration_ms);
            }
        }
        Command::Demo { output, script } => {
            let path = if output.extension().is_some() {
                output
            } else {
                output.join("index.html")
            };
            demo::write_demo_page(&path, &script)?;
            println!("==> Demo page written to {}", path.display());
        }
        Command::Check(config_args) => {
            let path = config_args.config.as_deref();
            let motion = config::load_config(path)?;
            output::print_config_check(path, &motion);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Milliseconds per frame; non-positive rates fall back to 60 Hz.
fn frame_interval(fps: f64) -> f64 {
    if fps.is_finite() && fps > 0.0 {
        1000.0 / fps
    } else {
        DEFAULT_FRAME_MS
    }
}
