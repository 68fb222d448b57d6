//! `timeshare` command-line host: propose dates, vote, and inspect poll URLs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use url::Url;

use timeshare_messages::config::{MessagesConfig, log_format_from_env};
use timeshare_messages::input::parse_date_input;
use timeshare_messages::{
    InMemoryConversation, Message, MessagesController, rows,
};

/// Propose meeting dates and collect votes through shareable URLs.
#[derive(Parser, Debug)]
#[command(name = "timeshare")]
#[command(version)]
#[command(about = "Propose meeting dates and vote on them.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a new poll with the given dates (you vote for each of them)
    Propose {
        /// Candidate date, e.g. 2024-01-01T10:00 (UTC); repeatable
        #[arg(short, long = "date", required = true, value_parser = parse_date_input)]
        dates: Vec<DateTime<Utc>>,
    },

    /// Answer a received poll URL
    Vote {
        /// URL of the received message
        url: Url,

        /// Toggle your vote on the option at this position; repeatable
        #[arg(short, long = "toggle")]
        toggles: Vec<usize>,

        /// Propose an additional date; repeatable
        #[arg(short, long = "add", value_parser = parse_date_input)]
        add: Vec<DateTime<Utc>>,
    },

    /// Show the dates and tallies of a poll URL
    Show {
        /// URL of the message
        url: Url,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    timeshare_observability::init(log_format_from_env());

    let cli = Cli::parse();
    let config = MessagesConfig::from_env();

    match cli.command {
        Commands::Propose { dates } => {
            let mut conversation = InMemoryConversation::new();
            let mut app = MessagesController::new(config);
            app.create_new_event(Some(&conversation));

            let child = app
                .event_controller_mut()
                .context("create view was not shown")?;
            for date in dates {
                child.add_date(date)?;
            }

            let message = app.save(Some(&mut conversation))?;
            print_message(&message);
        }
        Commands::Vote { url, toggles, add } => {
            let mut conversation = InMemoryConversation::with_message(Message::received(url));
            let mut app = MessagesController::new(config);

            // Adding dates needs the create view; voting alone uses the select view.
            app.create_new_event(Some(&conversation));
            if add.is_empty() {
                app.will_become_active(&conversation);
            }

            let child = app
                .event_controller_mut()
                .context("event view was not shown")?;
            for index in toggles {
                child
                    .select_row(index)
                    .with_context(|| format!("cannot toggle option {index}"))?;
            }
            for date in add {
                child.add_date(date)?;
            }

            let message = app.save(Some(&mut conversation))?;
            print_message(&message);
        }
        Commands::Show { url, json } => {
            let rows = rows(&Message::received(url).ledger());
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for (i, row) in rows.iter().enumerate() {
                    let mark = if row.checked { "[x]" } else { "[ ]" };
                    println!("{i:>3} {mark} {}  {}", row.label, row.detail);
                }
            }
        }
    }

    Ok(())
}

fn print_message(message: &Message) {
    println!("{}", message.url);
    println!();
    println!("{}", message.layout.summary);
    println!("-- {}", message.layout.caption);
}
