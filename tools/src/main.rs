//! sim-runner: headless runner for the trade-world simulation.
//!
//! Usage:
//!   sim-runner --seed 12345 --ticks 100 --speed 2
//!   sim-runner --data-dir ./data --ipc-mode
//!   sim-runner --realtime
//!
//! IPC mode reads one JSON request per line on stdin and answers each with
//! one JSON snapshot line on stdout. Realtime mode runs the timer driver;
//! stdin lines are player commands (`{"cmd":"start"}`), and every tick
//! prints a snapshot line.

use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::sync::mpsc;
use std::thread;
use tradesim_core::{
    command::PlayerCommand,
    driver::{run_realtime, DriverMessage, DriverOptions},
    SimConfig, WorldStore,
};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Tick { count: u64 },
    Command { command: PlayerCommand },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ticks = parse_arg(&args, "--ticks", 10u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let realtime = args.iter().any(|a| a == "--realtime");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str());

    let mut config = match data_dir {
        Some(dir) => SimConfig::load(dir)?,
        None => SimConfig::builtin()?,
    };
    config.rng_seed = parse_arg(&args, "--seed", config.rng_seed);
    let speed = parse_arg(&args, "--speed", u32::from(config.speed));
    let seed = config.rng_seed;

    let mut store = WorldStore::new(config)?;
    store.set_speed(speed)?;

    if ipc_mode {
        run_ipc_loop(&mut store)?;
    } else if realtime {
        run_realtime_mode(&mut store)?;
    } else {
        println!("Trade world sim-runner");
        println!("  seed:      {seed}");
        println!("  ticks:     {ticks}");
        println!("  countries: {}", store.state().countries.len());
        println!();
        store.run_ticks(ticks);
        print_summary(&store);
    }

    Ok(())
}

fn run_ipc_loop(store: &mut WorldStore) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        match request {
            IpcRequest::Quit => break,
            IpcRequest::Tick { count } => store.run_ticks(count),
            IpcRequest::GetState => {}
            IpcRequest::Command { command } => {
                if let Err(e) = store.apply(command) {
                    log::warn!("command rejected: {e}");
                    let err_json = serde_json::json!({ "error": e.to_string() });
                    writeln!(stdout, "{err_json}")?;
                    stdout.flush()?;
                    continue;
                }
            }
        }
        writeln!(stdout, "{}", serde_json::to_string(&store.snapshot())?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn run_realtime_mode(store: &mut WorldStore) -> Result<()> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match serde_json::from_str::<PlayerCommand>(&line) {
                Ok(command) => {
                    if tx.send(DriverMessage::Command(command)).is_err() {
                        break;
                    }
                }
                Err(e) => log::warn!("Unknown command {line:?}: {e}"),
            }
        }
        let _ = tx.send(DriverMessage::Quit);
    });

    let mut stdout = io::stdout();
    let mut write_error = None;
    run_realtime(store, &rx, DriverOptions::default(), |snapshot| {
        let line = serde_json::to_string(snapshot).map_err(io::Error::from);
        let written = line.and_then(|l| {
            writeln!(stdout, "{l}")?;
            stdout.flush()
        });
        match written {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                write_error = Some(e);
                ControlFlow::Break(())
            }
        }
    });

    match write_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn print_summary(store: &WorldStore) {
    let state = store.state();
    println!("=== RUN SUMMARY ===");
    println!("  final tick:  {}", state.current_time);
    println!("  total gdp:   ${:.1}T", state.total_gdp() / 1000.0);
    println!("  events:      {}", store.events().len());
    println!();
    println!("=== COUNTRIES ===");
    for c in &state.countries {
        println!(
            "  {:<3} {:<16} ${:>8.1}B  Δ {:>+8.2}  ({:+.2}%)",
            c.id(),
            c.name,
            c.gdp,
            c.gdp_change,
            c.growth_percent()
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
