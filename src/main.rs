//! Ergowatch CLI
//!
//! Usage:
//!   ergowatch                                   # Interactive: detection lines on stdin
//!   ergowatch --eyes "100 100 140 100"          # Single evaluation
//!   ergowatch --replay session.txt              # Replay a recorded detection log
//!   ergowatch --json                            # JSON output per tick
//!
//! Detection lines: `lost`, `face`, or `eyes X1 Y1 X2 Y2` (full-frame pixels).
//! Replay lines may be prefixed with `+DT` (seconds) to drive the clock.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use clap::Parser;
use colored::Colorize;

use ergowatch::core::PostureEngine;
use ergowatch::types::{Detection, Settings, TickOutput};
use ergowatch::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "ergowatch",
    version = VERSION,
    about = "Watch head position via webcam detections and beep on sustained bad posture",
    long_about = "Ergowatch triangulates head position from eye-center detections,\n\
                  smooths it over a trailing window, and beeps with escalating\n\
                  urgency once the position has been outside the neutral zone\n\
                  longer than the configured delay.\n\n\
                  Detection lines (stdin or replay file):\n  \
                  lost                 detector saw nothing\n  \
                  face                 face without both eyes\n  \
                  eyes X1 Y1 X2 Y2     eye centers in full-frame pixels\n\n\
                  Replay lines may carry a `+DT` prefix (seconds) to advance\n\
                  the clock deterministically."
)]
struct Args {
    /// Settings file path
    #[arg(short, long, default_value = "config/settings.json")]
    config: String,

    /// Single evaluation: eye centers as "X1 Y1 X2 Y2"
    #[arg(short, long)]
    eyes: Option<String>,

    /// Replay a detection log file instead of reading stdin
    #[arg(short, long)]
    replay: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show position/timing breakdown per tick
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let settings = match Settings::load(&args.config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Settings error: {}", e);
            std::process::exit(1);
        }
    };

    if !args.json {
        print_settings_echo(&settings);
    }

    let engine = match PostureEngine::new(
        settings.calibration(),
        settings.neutral_zone(),
        settings.alert(),
        Instant::now(),
    ) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Settings error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(ref eyes) = args.eyes {
        run_single(engine, eyes, &args);
    } else if let Some(ref path) = args.replay {
        run_replay(engine, path, &args);
    } else {
        run_interactive(engine, &args);
    }
}

/// Echo the loaded settings the way the original tool announces itself
fn print_settings_echo(settings: &Settings) {
    println!("{}", format!("Ergowatch v{}", VERSION).bold());
    println!("Bad posture alert after: {} s", settings.alert_time);
    println!(
        "Interpupillary distance: {} mm",
        settings.ipd * 1000.0
    );
    println!("Downscale factor: {}x", settings.downscale_factor);
    println!("Focal length: {}", settings.camera_calibration.f);
    println!(
        "Neutral zone: center ({}, {}, {}) m, radius {} m",
        settings.neutral_position[0],
        settings.neutral_position[1],
        settings.neutral_position[2],
        settings.neutral_radius
    );
    println!();
}

/// Evaluate a single detection and exit
fn run_single(mut engine: PostureEngine, eyes: &str, args: &Args) {
    let line = format!("eyes {}", eyes);
    let Some(detection) = Detection::parse(&line) else {
        eprintln!("Cannot parse eye centers: {:?} (expected \"X1 Y1 X2 Y2\")", eyes);
        std::process::exit(1);
    };

    let output = engine.on_tick(&detection, Instant::now());
    print_tick(&output, &engine, args);
}

/// Interactive mode: one detection line per tick, real clock
fn run_interactive(mut engine: PostureEngine, args: &Args) {
    if !args.json {
        println!("Type detection lines and press Enter. Type 'quit' to exit.");
        println!();
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut pulses: u64 = 0;

    loop {
        print!("> ");
        stdout.flush().unwrap();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let Some(detection) = Detection::parse(line) else {
            println!("{}", "Unrecognized line (try: lost | face | eyes X1 Y1 X2 Y2)".yellow());
            continue;
        };

        let output = engine.on_tick(&detection, Instant::now());
        if output.alert_pulse {
            pulses += 1;
        }
        print_tick(&output, &engine, args);
    }

    if !args.json {
        println!(
            "\nSession ended. Ticks: {}, pulses: {}, rejected samples: {}",
            engine.tick_count(),
            pulses,
            engine.rejected_samples()
        );
    }
}

/// Replay mode: detection log drives a synthetic clock
fn run_replay(mut engine: PostureEngine, path: &str, args: &Args) {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Cannot read replay file {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let mut elapsed = 0.0_f64;
    let mut pulses: u64 = 0;

    for (lineno, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (dt, rest) = split_dt_prefix(line);
        let Some(detection) = Detection::parse(rest) else {
            eprintln!("Replay line {}: cannot parse {:?}", lineno + 1, line);
            std::process::exit(1);
        };

        elapsed += dt;
        let now = start + Duration::from_secs_f64(elapsed);
        let output = engine.on_tick(&detection, now);
        if output.alert_pulse {
            pulses += 1;
        }
        print_tick(&output, &engine, args);
    }

    if !args.json {
        println!(
            "\nReplay finished. Ticks: {}, pulses: {}, rejected samples: {}, span: {:.1}s",
            engine.tick_count(),
            pulses,
            engine.rejected_samples(),
            elapsed
        );
    }
}

/// Split an optional `+DT` seconds prefix off a replay line.
/// Lines without the prefix advance the clock by a 30 Hz frame.
fn split_dt_prefix(line: &str) -> (f64, &str) {
    if let Some(rest) = line.strip_prefix('+') {
        let mut parts = rest.splitn(2, char::is_whitespace);
        if let (Some(dt), Some(detection)) = (parts.next(), parts.next()) {
            if let Ok(dt) = dt.parse::<f64>() {
                if dt.is_finite() && dt >= 0.0 {
                    return (dt, detection.trim_start());
                }
            }
        }
    }
    (1.0 / 30.0, line)
}

/// Print one tick in the selected output style, ringing the bell on a pulse
fn print_tick(output: &TickOutput, engine: &PostureEngine, args: &Args) {
    if output.alert_pulse {
        print!("\x07");
    }

    if args.json {
        println!("{}", serde_json::to_string(output).unwrap());
    } else if args.verbose {
        print_verbose(output, engine, args);
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
}

/// Multi-line breakdown of one tick
fn print_verbose(output: &TickOutput, engine: &PostureEngine, args: &Args) {
    let line = if args.no_color {
        output.to_parseable_string()
    } else {
        output.to_terminal_string()
    };
    println!("{}", line);

    match output.position {
        Some(pos) => println!("  position:   {}", pos),
        None => println!("  position:   unavailable"),
    }
    println!("  alert after: {:.1}s", engine.alert_delay());
    if let Some(tier) = output.tier {
        println!("  tier:        {} (beep every {:.0}s)", tier, tier.beep_period());
    }
    if output.sample_rejected {
        println!("  {}", "degenerate detection discarded".yellow());
    }
    println!(
        "  rejected samples so far: {}",
        engine.rejected_samples()
    );
}
