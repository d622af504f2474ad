/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{info, warn};
use std::io::{self, BufRead, Write};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{BuildingConfig, Config, ElevatorConfig};
use crate::coordinator::Coordinator;
use crate::shared::{DispatchError, ElevatorKind, ElevatorStatus};

/***************************************/
/*               Enums                 */
/***************************************/
enum Command {
    Request(u32),
    Status,
    Json,
    Exit,
    Invalid(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "exit" | "quit" => Command::Exit,
        "status" => Command::Status,
        "json" => Command::Json,
        _ => match line.parse::<u32>() {
            Ok(floor) => Command::Request(floor),
            Err(_) => Command::Invalid(line.to_string()),
        },
    }
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Interactive front end for the dispatcher.
 *
 * Reads a floor, then a passenger count, dispatches the request and prints the
 * fleet after every round. `status` and `json` print the fleet on demand and
 * `exit` (or end of input) leaves the loop.
 */
pub fn run<R: BufRead, W: Write>(coordinator: &Coordinator, input: &mut R, output: &mut W) -> io::Result<()> {
    writeln!(output, "Welcome to the elevator dispatch simulator!")?;

    loop {
        write!(
            output,
            "\nEnter a floor number to request an elevator ('status', 'json' or 'exit'): "
        )?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            break;
        };

        match parse_command(&line) {
            Command::Exit => {
                info!("Exiting the console");
                break;
            }
            Command::Status => writeln!(output, "{}", format_status_table(&coordinator.status()))?,
            Command::Json => {
                let json = serde_json::to_string_pretty(&coordinator.status())
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                writeln!(output, "{}", json)?;
            }
            Command::Invalid(text) => {
                warn!("Invalid floor input: {:?}", text);
                writeln!(output, "Invalid input. Please enter a floor number.")?;
            }
            Command::Request(floor) => {
                let Some(passengers) = read_passenger_count(coordinator, input, output)? else {
                    break;
                };
                request(coordinator, floor, passengers, output)?;
                writeln!(output, "{}", format_status_table(&coordinator.status()))?;
            }
        }
    }

    Ok(())
}

/// Asks for a building and a fleet when no configuration file is available.
///
/// Elevators get ids starting at 1 and start empty on floor 1. Returns `None`
/// if the input ends before the configuration is complete.
pub fn prompt_config<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<Config>> {
    let Some(n_floors) = read_positive(input, output, "Enter total number of floors: ")? else {
        return Ok(None);
    };
    let Some(n_elevators) = read_positive(input, output, "Enter number of elevators: ")? else {
        return Ok(None);
    };

    let mut elevators = Vec::new();
    for id in 1..=n_elevators {
        let prompt = format!("Enter max passenger capacity for elevator {}: ", id);
        let Some(max_capacity) = read_positive(input, output, &prompt)? else {
            return Ok(None);
        };

        elevators.push(ElevatorConfig {
            id,
            max_capacity,
            start_floor: 1,
            start_passengers: 0,
            max_floor: None,
            kind: ElevatorKind::Standard,
            time_per_floor_ms: None,
            in_service: true,
        });
    }

    Ok(Some(Config {
        building: BuildingConfig {
            n_floors,
            time_per_floor_ms: None,
        },
        elevators,
    }))
}

pub fn format_status_table(statuses: &[ElevatorStatus]) -> String {
    if statuses.is_empty() {
        return "No elevators available.".to_string();
    }

    let mut table = format!(
        "{:<4} {:<11} {:>5} {:>6} {:<11} {:>10} {:>10}",
        "ID", "Kind", "Floor", "Target", "Direction", "Passengers", "In service"
    );
    for status in statuses {
        let target = status
            .target_floor
            .map_or_else(|| "-".to_string(), |floor| floor.to_string());
        let passengers = format!("{}/{}", status.passenger_count, status.max_capacity);
        let direction = if status.moving && status.target_floor.is_none() {
            // Reserved by a dispatch that has not started moving yet
            "Reserved".to_string()
        } else {
            status.direction.to_string()
        };

        table.push_str(&format!(
            "\n{:<4} {:<11} {:>5} {:>6} {:<11} {:>10} {:>10}",
            status.id,
            status.kind.to_string(),
            status.current_floor,
            target,
            direction,
            passengers,
            if status.in_service { "yes" } else { "no" }
        ));
    }
    table
}

/***************************************/
/*          Private functions          */
/***************************************/
fn request<W: Write>(coordinator: &Coordinator, floor: u32, passengers: u32, output: &mut W) -> io::Result<()> {
    info!("Requesting elevator to floor {} for {} passengers", floor, passengers);

    match coordinator.dispatch(floor, passengers) {
        Ok(id) => writeln!(
            output,
            "Elevator {} is on its way to floor {} for {} passengers.",
            id, floor, passengers
        ),
        Err(DispatchError::NoElevatorAvailable) => writeln!(
            output,
            "No elevators available at the moment. Please try again later."
        ),
        Err(e) => writeln!(output, "Request rejected: {}.", e),
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// Counts above the largest capacity in the fleet can never be served
fn read_passenger_count<R: BufRead, W: Write>(
    coordinator: &Coordinator,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<u32>> {
    match coordinator.status().iter().map(|status| status.max_capacity).max() {
        Some(max) => {
            let prompt = format!("Enter the number of passengers waiting (1-{}): ", max);
            read_bounded(input, output, &prompt, max)
        }
        None => read_positive(input, output, "Enter the number of passengers waiting: "),
    }
}

fn read_positive<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<Option<u32>> {
    read_bounded(input, output, prompt, u32::MAX)
}

fn read_bounded<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    max: u32,
) -> io::Result<Option<u32>> {
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.parse::<u32>() {
            Ok(value) if value > 0 && value <= max => return Ok(Some(value)),
            _ if max == u32::MAX => {
                warn!("Invalid number entered: {:?}", line);
                writeln!(output, "Invalid input. Please enter a valid positive number.")?;
            }
            _ => {
                warn!("Invalid number entered: {:?}", line);
                writeln!(output, "Invalid input. Please enter a number between 1 and {}.", max)?;
            }
        }
    }
}
