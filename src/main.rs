//! Choreo CLI
//!
//! Usage:
//!   choreo --event "commit execution 0.1 -0.2"   # Single event
//!   choreo --interactive                          # Interactive session
//!   choreo --serve                                # HTTP API server
//!   choreo --event "hover design" --json          # JSON output

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::thread::sleep;
use std::time::Duration;

use choreo::core::{
    run_server, save_handoff, ChoreographyEngine, Clock, FrameTelemetry, QualityClassifier,
    ResolutionController, SystemClock,
};
use choreo::types::{DeviceSignals, InputEvent, NormPoint, PillarRegistry};
use choreo::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "choreo",
    version = VERSION,
    about = "Choreo - drive the hover/commit/dive/hold choreography and its quality loop",
    long_about = "Choreo sequences the multi-second portal transition of the front-end\n\
                  (hover → commit → dive → hold) and adapts render quality to the\n\
                  frame budget of the host device.\n\n\
                  Modes:\n  \
                  --event        Apply one event and print the result\n  \
                  --interactive  Drive a session from stdin\n  \
                  --serve        HTTP API server mode\n\n\
                  Phases:\n  \
                  IDLE    - Nothing targeted\n  \
                  HOVER   - Pillar under the pointer\n  \
                  COMMIT  - Rupture opening (140 ms)\n  \
                  DIVE    - Traveling (780 ms)\n  \
                  HOLD    - Arrived"
)]
struct Args {
    /// Single event, e.g. "hover execution", "commit execution 0.1 -0.2", "reset"
    #[arg(short, long)]
    event: Option<String>,

    /// Interactive mode - read commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Classify as if the user prefers reduced motion
    #[arg(long)]
    reduced_motion: bool,

    /// Reported device memory in GiB
    #[arg(long)]
    memory_gb: Option<f64>,

    /// Reported logical core count
    #[arg(long)]
    cores: Option<u32>,

    /// Device pixel ratio (default: 1.0)
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Directory for handoff payloads (default: ./handoff)
    #[arg(long, default_value = "./handoff")]
    handoff_dir: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.serve {
        if let Err(e) = run_server(&args.addr).await {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        }
    } else if args.interactive {
        run_interactive(&args);
    } else if let Some(ref event) = args.event {
        run_single(event, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args);
    }
}

/// Pillars the demo front-end exposes
fn default_registry() -> PillarRegistry {
    let mut registry = PillarRegistry::new();
    registry.insert("execution", "#e8491d");
    registry.insert("design", "#1d7fe8");
    registry.insert("research", "#3fa34d");
    registry
}

fn signals_from_args(args: &Args) -> DeviceSignals {
    DeviceSignals {
        reduced_motion: args.reduced_motion,
        device_memory_gb: args.memory_gb,
        cpu_cores: args.cores,
    }
}

/// Apply a single event and print the result
fn run_single(event_text: &str, args: &Args) {
    let mut engine = ChoreographyEngine::new(default_registry());

    let Some(event) = parse_event(event_text) else {
        eprintln!("Unrecognized event: {}", event_text);
        eprintln!("Expected: hover <id> | unhover | commit <id> [x y] | reset");
        std::process::exit(2);
    };

    let output = engine.apply(event);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
}

/// Run interactive session
fn run_interactive(args: &Args) {
    let mut engine = ChoreographyEngine::new(default_registry());
    let mut telemetry = FrameTelemetry::new();
    let mut classifier = QualityClassifier::new();
    let tier = classifier.classify(&signals_from_args(args));
    let mut controller = ResolutionController::new(tier, args.dpr);
    let clock = SystemClock::new();
    let mut handoff_saved = false;

    print_header(args.no_color);
    println!("Commands: hover <id> | unhover | commit <id> [x y] | reset");
    println!("          frame <ms> [count] | wait <ms> | status | quality | quit");
    println!("Tier: {} (scale starts at {:.2})", tier, controller.scale());
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        // Fire anything that came due while we were at the prompt
        for output in engine.tick() {
            print_phase_output(&output, args);
        }

        // Persist the handoff the moment it appears
        if let Some(payload) = engine.handoff() {
            if !handoff_saved {
                handoff_saved = true;
                match save_handoff(payload, &args.handoff_dir) {
                    Ok(path) => println!("  handoff saved: {}", path),
                    // Best effort: arrival falls back to default presentation
                    Err(_) => {}
                }
            }
        } else {
            handoff_saved = false;
        }

        let prompt = format_prompt(&engine, args.no_color);
        print!("{}", prompt);
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Events: {}", engine.update_count());
            break;
        }
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("frame") => {
                let ms: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(16.0);
                let count: usize = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1);
                for _ in 0..count {
                    telemetry.record_sample(ms);
                }
                let ceiling = tier.max_scale(args.dpr);
                let output =
                    controller.update(&telemetry.history_vec(), clock.now_ms(), ceiling);
                print_quality_output(&output, args);
            }
            Some("wait") => {
                let ms: u64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
                sleep(Duration::from_millis(ms));
            }
            Some("status") => {
                print_phase_output(&engine.current_output(), args);
            }
            Some("quality") => {
                println!(
                    "tier={} scale={:.2} samples={}",
                    tier,
                    controller.scale(),
                    telemetry.len()
                );
            }
            _ => match parse_event(line) {
                Some(event) => {
                    let output = engine.apply(event);
                    print_phase_output(&output, args);
                }
                None => {
                    println!("Unrecognized command: {}", line);
                }
            },
        }
    }
}

/// Parse "hover x" / "unhover" / "commit x [x y]" / "reset"
fn parse_event(text: &str) -> Option<InputEvent> {
    let mut parts = text.split_whitespace();
    match parts.next()? {
        "hover" => Some(InputEvent::hover(parts.next()?)),
        "unhover" => Some(InputEvent::unhover()),
        "commit" => {
            let id = parts.next()?;
            let x: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0.0);
            let y: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0.0);
            Some(InputEvent::commit(id, NormPoint::new(x, y)))
        }
        "reset" => Some(InputEvent::Reset),
        _ => None,
    }
}

fn print_phase_output(output: &choreo::types::PhaseOutput, args: &Args) {
    if args.json {
        println!("{}", serde_json::to_string(output).unwrap());
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
}

fn print_quality_output(output: &choreo::types::QualityOutput, args: &Args) {
    if args.json {
        println!("{}", serde_json::to_string(output).unwrap());
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
}

fn print_header(no_color: bool) {
    if no_color {
        println!("=== Choreo v{} ===", VERSION);
    } else {
        println!("\x1b[35m=== Choreo v{} ===\x1b[0m", VERSION);
    }
}

fn format_prompt(engine: &ChoreographyEngine, no_color: bool) -> String {
    let phase = engine.phase();
    if no_color {
        format!("[{}] > ", phase)
    } else {
        format!(
            "{}[{}]{} > ",
            phase.color_code(),
            phase,
            choreo::types::Phase::color_reset()
        )
    }
}
