//! formgym: drive the trellis form engine with invoicing-shaped forms.
//!
//! The engine never touches storage; this binary plays the caller, printing
//! whatever a confirmed session would have persisted.

use anyhow::Result;
use clap::{Parser, Subcommand};
use trellis::{Field, FieldValue, Form, FormResult};

#[derive(Parser)]
#[command(name = "formgym", about = "Exercise trellis forms in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// A plain text form, shaped like a client record.
    Client,
    /// A form with a searchable select and a date, shaped like a bill.
    Bill,
}

fn client_form() -> Form {
    Form::new("New client").fields([
        Field::text("Name", ""),
        Field::text("Address", ""),
        Field::text("Postal code", ""),
        Field::text("City", ""),
        Field::text("Country", ""),
        Field::text("Telephone", ""),
        Field::text("E-Mail", ""),
    ])
}

fn bill_form() -> Form {
    let clients = ["Acme Corp", "Globex", "Initech", "Tyrell"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    Form::new("New bill")
        .field(Field::select("Client", clients, None))
        .field(Field::date("Date", Some(chrono::Local::now().date_naive())))
}

fn report(result: &FormResult) {
    if result.is_cancelled() {
        println!("cancelled, nothing to save");
        return;
    }
    for (label, value) in result.values() {
        match value {
            FieldValue::Text(text) => println!("{label}: {text}"),
            FieldValue::Choice(choice) => {
                println!("{label}: {}", choice.as_deref().unwrap_or("<None>"))
            }
            FieldValue::Date(date) => match date {
                Some(date) => println!("{label}: {date}"),
                None => println!("{label}: <invalid>"),
            },
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let form = match cli.command {
        Command::Client => client_form(),
        Command::Bill => bill_form(),
    };
    report(&form.run_fullscreen()?);
    Ok(())
}
