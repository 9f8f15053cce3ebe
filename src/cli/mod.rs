use anyhow::{anyhow, Context, Result};
use clap::Parser;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::application::{ClosurePolicy, RentalService, RentalView};
use crate::domain::{format_cents, parse_cents, Car, RentalFilter};

/// Vettura - Car Rental Ledger
#[derive(Parser)]
#[command(name = "vettura")]
#[command(about = "A session-local car rental ledger for the command line")]
#[command(version)]
pub struct Cli {
    /// Closure policy for returned rentals: retain, purge
    #[arg(short, long, default_value = "retain")]
    pub policy: String,

    /// Start with an empty catalog instead of the demo fleet
    #[arg(long)]
    pub empty: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

const MENU: &[&str] = &[
    "List cars",
    "Rent a car",
    "Return a car",
    "Add a car",
    "Search rentals",
    "Statistics",
    "Export session (JSON)",
    "Quit",
];

impl Cli {
    pub fn run(self) -> Result<()> {
        let policy = ClosurePolicy::from_str(&self.policy).ok_or_else(|| {
            anyhow!(
                "Invalid closure policy '{}'. Valid policies: retain, purge",
                self.policy
            )
        })?;

        let mut service = RentalService::new(policy);
        if !self.empty {
            seed_catalog(&mut service)?;
        }

        println!("Vettura - car rental ledger (closure policy: {policy})");
        println!("All state is session-local and lost on exit.");
        println!();

        loop {
            let choice = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("What would you like to do?")
                .items(MENU)
                .default(0)
                .interact()?;
            println!();

            // Ledger errors are user-facing and never fatal; show them and
            // go back to the menu.
            let outcome = match choice {
                0 => run_list_cars(&service),
                1 => run_rent_flow(&mut service, self.verbose),
                2 => run_return_flow(&mut service, self.verbose),
                3 => run_add_car_flow(&mut service, self.verbose),
                4 => run_search_flow(&service),
                5 => run_statistics(&service),
                6 => run_export(&service),
                _ => break,
            };
            if let Err(err) = outcome {
                eprintln!("Error: {err:#}");
            }
            println!();
        }

        Ok(())
    }
}

/// The demo fleet the original catalog ships with.
fn seed_catalog(service: &mut RentalService) -> Result<()> {
    service.add_car("C001", "Toyota", "Camry", 500000)?;
    service.add_car("C002", "Honda", "Accord", 600000)?;
    service.add_car("C003", "Mahindra", "Thar", 1200000)?;
    Ok(())
}

fn run_list_cars(service: &RentalService) -> Result<()> {
    let cars = service.list_cars();
    if cars.is_empty() {
        println!("The catalog is empty. Add a car first.");
        return Ok(());
    }
    println!("{}", car_table(cars));
    Ok(())
}

fn run_rent_flow(service: &mut RentalService, verbose: bool) -> Result<()> {
    let available = service.list_available_cars();
    if available.is_empty() {
        println!("No cars are currently available.");
        return Ok(());
    }

    let labels: Vec<String> = available
        .iter()
        .map(|car| {
            format!(
                "{} ({}/day)",
                car.label(),
                format_cents(car.price_per_day)
            )
        })
        .collect();
    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which car?")
        .items(&labels)
        .default(0)
        .interact()?;
    let car_id = available[picked].id.clone();

    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Customer name")
        .allow_empty(true)
        .interact_text()?;
    let phone: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Phone number (optional)")
        .allow_empty(true)
        .interact_text()?;
    let days: u32 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Number of days")
        .interact_text()?;

    // Two-phase: quote first, commit only after explicit confirmation.
    let quote = service.quote_price(&car_id, days)?;
    println!(
        "Total price for {} day(s): {}",
        days,
        format_cents(quote)
    );

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Confirm rental?")
        .default(false)
        .interact()?;
    if !confirmed {
        println!("Rental cancelled.");
        return Ok(());
    }

    let phone = if phone.trim().is_empty() {
        None
    } else {
        Some(phone.as_str())
    };
    let result = service.rent_car(&car_id, &name, phone, days)?;

    println!("Car rented successfully.");
    println!("  Customer: {} ({})", result.customer.name, result.customer.id);
    println!("  Car:      {}", result.car.label());
    println!("  Days:     {}", result.rental.days);
    println!("  Price:    {}", format_cents(result.rental.total_price));
    if verbose {
        eprintln!(
            "[ledger] opened rental on {} at {}",
            result.car.id,
            result.rental.rented_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

fn run_return_flow(service: &mut RentalService, verbose: bool) -> Result<()> {
    let rented: Vec<Car> = service
        .list_cars()
        .iter()
        .filter(|car| !car.available)
        .cloned()
        .collect();
    if rented.is_empty() {
        println!("No cars are currently rented.");
        return Ok(());
    }

    let labels: Vec<String> = rented.iter().map(Car::label).collect();
    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which car is coming back?")
        .items(&labels)
        .default(0)
        .interact()?;

    let result = service.return_car(&rented[picked].id)?;
    println!(
        "Car returned by {}. Rental total was {}.",
        result.customer_name,
        format_cents(result.rental.total_price)
    );
    if verbose {
        eprintln!(
            "[ledger] closed rental on {} ({} policy)",
            result.rental.car_id,
            service.policy()
        );
    }
    Ok(())
}

fn run_add_car_flow(service: &mut RentalService, verbose: bool) -> Result<()> {
    let id: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Car ID")
        .allow_empty(true)
        .interact_text()?;
    let brand: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Brand")
        .allow_empty(true)
        .interact_text()?;
    let model: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Model")
        .allow_empty(true)
        .interact_text()?;
    let price: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Price per day")
        .interact_text()?;
    let price_per_day =
        parse_cents(&price).context("Invalid price format. Use '5000' or '5000.00'")?;

    let car = service.add_car(&id, &brand, &model, price_per_day)?;
    println!(
        "Added {} at {}/day.",
        car.label(),
        format_cents(car.price_per_day)
    );
    if verbose {
        eprintln!("[ledger] catalog now holds {} car(s)", service.list_cars().len());
    }
    Ok(())
}

fn run_search_flow(service: &RentalService) -> Result<()> {
    let text: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Search text (empty matches everything)")
        .allow_empty(true)
        .interact_text()?;

    let filter_labels = ["All", "Active", "Returned", "Last 7 days", "Last 30 days"];
    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Filter")
        .items(&filter_labels)
        .default(0)
        .interact()?;
    let filter = match picked {
        1 => RentalFilter::ActiveOnly,
        2 => RentalFilter::ReturnedOnly,
        3 => RentalFilter::WithinLastDays(7),
        4 => RentalFilter::WithinLastDays(30),
        _ => RentalFilter::All,
    };

    let results = service.search_rentals(&text, filter);
    if results.is_empty() {
        println!("No rentals match.");
    } else {
        println!("{}", rental_table(&results));
        println!("{} rental(s) match.", results.len());
    }
    Ok(())
}

fn run_statistics(service: &RentalService) -> Result<()> {
    let stats = service.statistics();
    println!("Total rentals:  {}", stats.total_rentals);
    println!("Active rentals: {}", stats.active_rentals);
    println!("Total revenue:  {}", format_cents(stats.total_revenue));
    Ok(())
}

fn run_export(service: &RentalService) -> Result<()> {
    let json = serde_json::to_string_pretty(&service.snapshot())
        .context("Failed to serialize session snapshot")?;
    println!("{json}");
    Ok(())
}

fn car_table(cars: &[Car]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Brand", "Model", "Price/Day", "Status"]);
    for car in cars {
        table.add_row(vec![
            car.id.clone(),
            car.brand.clone(),
            car.model.clone(),
            format_cents(car.price_per_day),
            (if car.available { "Available" } else { "Rented" }).to_string(),
        ]);
    }
    table
}

fn rental_table(views: &[RentalView]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Car", "Customer", "Phone", "Days", "Price", "Rented on", "Status",
        ]);
    for view in views {
        table.add_row(vec![
            view.car.label(),
            format!("{} ({})", view.customer.name, view.customer.id),
            view.customer.phone.clone().unwrap_or_else(|| "-".into()),
            view.rental.days.to_string(),
            format_cents(view.rental.total_price),
            view.rental.rented_at.format("%Y-%m-%d %H:%M").to_string(),
            (if view.rental.is_open() { "Active" } else { "Returned" }).to_string(),
        ]);
    }
    table
}
