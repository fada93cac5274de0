//! Interactive counter menu.
//!
//! Sequences operator input into service calls and renders the results.
//! Domain errors are printed and the operator is prompted again.

use anyhow::Result;
use colored::Colorize;
use parking_core::clock::format_timestamp;
use parking_core::{COLS, FLOORS, ParkingError, ROWS, SubscriptionPlan};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use crate::bootstrap::Service;
use crate::commands::{history, status};
use crate::menu::{Action, MenuHelper, menu_line};
use crate::render;

/// Outcome of a single prompt.
enum Input<T> {
    Value(T),
    /// Ctrl-C / Ctrl-D: abandon the current flow.
    Cancelled,
}

struct Console {
    editor: Editor<MenuHelper, DefaultHistory>,
}

impl Console {
    fn new() -> Result<Self> {
        let mut editor: Editor<MenuHelper, DefaultHistory> = Editor::new()?;
        editor.set_helper(Some(MenuHelper::new()));
        Ok(Self { editor })
    }

    fn read_line(&mut self, prompt: &str) -> Result<Input<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Input::Value(line.trim().to_string())),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(Input::Cancelled),
            Err(err) => Err(err.into()),
        }
    }

    /// Re-prompts until a non-empty identifier is typed.
    fn read_vehicle_id(&mut self) -> Result<Input<String>> {
        loop {
            match self.read_line("Vehicle number: ")? {
                Input::Value(id) if id.is_empty() => {
                    println!("{}", "Vehicle number must not be empty.".yellow());
                }
                other => return Ok(other),
            }
        }
    }

    /// Re-prompts until an integer in `min..=max` is typed.
    fn read_number(&mut self, label: &str, min: i64, max: i64) -> Result<Input<i64>> {
        let prompt = format!("{} ({}-{}): ", label, min, max);
        loop {
            let text = match self.read_line(&prompt)? {
                Input::Value(text) => text,
                Input::Cancelled => return Ok(Input::Cancelled),
            };
            match text.parse::<i64>() {
                Ok(n) if (min..=max).contains(&n) => return Ok(Input::Value(n)),
                _ => println!("{}", format!("Enter a number from {} to {}.", min, max).yellow()),
            }
        }
    }

    /// Card payment is not wired to any gateway; any input is accepted.
    fn take_card_payment(&mut self, amount: u32) -> Result<bool> {
        println!("Amount due: {} won", amount.to_string().bold());
        match self.read_line("Card number (Enter to charge): ")? {
            Input::Value(_) => {
                println!("{}", "Payment approved.".bright_green());
                Ok(true)
            }
            Input::Cancelled => Ok(false),
        }
    }
}

pub fn run(mut service: Service) -> Result<()> {
    let mut console = Console::new()?;

    println!("{}", "=== Parking Counter ===".bright_magenta().bold());
    println!(
        "{}",
        format!("{} floors x {} rows x {} columns", FLOORS, ROWS, COLS).bright_black()
    );

    loop {
        println!();
        println!("{}", menu_line().bright_black());
        let line = match console.read_line(">> ")? {
            Input::Value(line) => line,
            Input::Cancelled => {
                println!("{}", "Exiting...".bright_green());
                break;
            }
        };
        if line.is_empty() {
            continue;
        }
        let _ = console.editor.add_history_entry(&line);

        let Some(action) = Action::from_token(&line) else {
            println!("{}", "Unknown selection, try again.".yellow());
            continue;
        };

        let outcome = match action {
            Action::Enter => enter(&mut console, &mut service),
            Action::Leave => leave(&mut console, &mut service),
            Action::Subscribe => subscribe(&mut console, &mut service),
            Action::Status => {
                status::show(&service);
                Ok(())
            }
            Action::History => show_history(&mut console, &service),
            Action::Quit => {
                println!("{}", "Shutting down.".bright_green());
                break;
            }
        };

        if let Err(err) = outcome {
            match err.downcast_ref::<ParkingError>() {
                Some(domain) if domain.is_recoverable() => {
                    println!("{}", domain.to_string().red());
                }
                _ => return Err(err),
            }
        }
    }

    Ok(())
}

fn enter(console: &mut Console, service: &mut Service) -> Result<()> {
    let Input::Value(vehicle_id) = console.read_vehicle_id()? else {
        return Ok(());
    };
    if service.is_parked(&vehicle_id) {
        return Err(ParkingError::already_parked(vehicle_id).into());
    }

    println!("{}", render::free_counts(&service.free_counts()).bright_green());
    let floor = loop {
        let Input::Value(floor) = console.read_number("Floor", 1, FLOORS.into())? else {
            return Ok(());
        };
        if service.free_count(floor)? > 0 {
            break floor;
        }
        println!("{}", format!("Floor {} is full.", floor).yellow());
    };

    let suggested = service.first_free(floor)?;
    let view = service.floor_view(floor)?;
    println!("{}", render::floor_grid(floor as u8, &view, suggested));
    if let Some(slot) = suggested {
        println!(
            "{}",
            format!("Suggested: row {} col {} (#{})", slot.row(), slot.col(), slot.position())
                .bright_cyan()
        );
    }

    loop {
        let Input::Value(row) = console.read_number("Row", 1, ROWS.into())? else {
            return Ok(());
        };
        let Input::Value(col) = console.read_number("Column", 1, COLS.into())? else {
            return Ok(());
        };

        match service.enter(&vehicle_id, floor, row, col) {
            Ok(session) => {
                println!(
                    "{}",
                    format!(
                        "{} parked at {} ({})",
                        vehicle_id,
                        session.slot,
                        format_timestamp(&session.started_at)
                    )
                    .bright_green()
                );
                return Ok(());
            }
            Err(err) if err.is_slot_taken() => println!("{}", err.to_string().yellow()),
            Err(err) => return Err(err.into()),
        }
    }
}

fn leave(console: &mut Console, service: &mut Service) -> Result<()> {
    let Input::Value(vehicle_id) = console.read_vehicle_id()? else {
        return Ok(());
    };

    let receipt = service.leave(&vehicle_id)?;
    println!("{}", render::receipt(&receipt));
    if receipt.fee > 0 {
        console.take_card_payment(receipt.fee)?;
    }
    println!("{}", "Have a safe trip!".bright_green());
    Ok(())
}

fn subscribe(console: &mut Console, service: &mut Service) -> Result<()> {
    let Input::Value(vehicle_id) = console.read_vehicle_id()? else {
        return Ok(());
    };
    // Fail before asking for a plan if the vehicle is not here.
    service.session(&vehicle_id)?;

    for plan in SubscriptionPlan::ALL {
        println!("  [{}] {}", plan.code(), plan.label());
    }
    let plan = loop {
        let Input::Value(code) = console.read_line("Plan: ")? else {
            return Ok(());
        };
        match SubscriptionPlan::from_code(&code) {
            Some(plan) => break plan,
            None => println!("{}", "Unknown plan, try again.".yellow()),
        }
    };

    if !console.take_card_payment(plan.price())? {
        return Ok(());
    }
    service.purchase_subscription(&vehicle_id, plan)?;
    println!(
        "{}",
        format!("{} is now a subscriber ({}).", vehicle_id, plan.label()).bright_green()
    );
    Ok(())
}

fn show_history(console: &mut Console, service: &Service) -> Result<()> {
    if let Input::Value(vehicle_id) = console.read_vehicle_id()? {
        history::show(service, &vehicle_id);
    }
    Ok(())
}
