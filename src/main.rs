/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::{error, info, warn};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::thread::Builder;

/* Custom libraries */
use elevator_dispatch::config::{self, Config};
use elevator_dispatch::console;
use elevator_dispatch::coordinator::Coordinator;
use elevator_dispatch::registry::ElevatorRegistry;
use elevator_dispatch::shared::Arrival;
use elevator_dispatch::unwrap_or_exit;

/* Main */
fn main() -> io::Result<()> {
    let matches = Command::new("elevator-dispatch")
        .about("Simulates a fleet of elevators serving floor requests")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the fleet configuration file"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .takes_value(true)
                .default_value("info")
                .help("Default log filter, overridden by RUST_LOG"),
        )
        .get_matches();

    let log_level = matches.value_of("log-level").unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let config = load_or_prompt_config(config_path)?;
    info!("Building has {} floors", config.building.n_floors);

    // Initialize channels
    let (arrival_tx, arrival_rx) = cbc::unbounded::<Arrival>();
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    // Create the fleet
    let registry = Arc::new(ElevatorRegistry::new());
    let coordinator = Coordinator::new(registry, arrival_tx);
    let report = coordinator.initialize_fleet(&config.elevator_specs());
    info!(
        "Registered {} elevators, rejected {}",
        report.registered.len(),
        report.rejected.len()
    );

    // Start the arrival monitor
    let arrival_thread = Builder::new().name("arrival_monitor".into());
    let arrival_handle = arrival_thread.spawn(move || monitor_arrivals(arrival_rx, terminate_rx))?;

    // Run the console until the user exits
    let stdin = io::stdin();
    let stdout = io::stdout();
    console::run(&coordinator, &mut stdin.lock(), &mut stdout.lock())?;

    // Let elevators in transit arrive before shutting down
    coordinator.join_transits();
    let _ = terminate_tx.send(());
    if arrival_handle.join().is_err() {
        error!("Arrival monitor panicked");
    }

    Ok(())
}

fn load_or_prompt_config(path: &str) -> io::Result<Config> {
    if Path::new(path).exists() {
        info!("Loading configuration from {}", path);
        return Ok(unwrap_or_exit!(config::load_config(path), "Failed to load configuration"));
    }

    warn!("Configuration file {} not found. Loading configuration interactively.", path);
    let stdin = io::stdin();
    let stdout = io::stdout();
    match console::prompt_config(&mut stdin.lock(), &mut stdout.lock())? {
        Some(config) => Ok(config),
        None => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input ended before the configuration was complete",
        )),
    }
}

fn monitor_arrivals(arrival_rx: cbc::Receiver<Arrival>, terminate_rx: cbc::Receiver<()>) {
    loop {
        cbc::select! {
            recv(arrival_rx) -> arrival => {
                match arrival {
                    Ok(arrival) => info!(
                        "Elevator {} arrived at floor {}: {} boarded, {} on board",
                        arrival.elevator_id, arrival.floor, arrival.boarded, arrival.passenger_count
                    ),
                    Err(_) => break,
                }
            }
            recv(terminate_rx) -> _ => break,
        }
    }
}
