//! PartyBoard command-line dashboard
//!
//! Main application entry point

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use PartyBoard::{
    config::Settings,
    i18n::Language,
    models::{Event, EventStatus, User},
    query::{by_status, nearest_event, DateRange, FieldFilters, QuerySpec, SortDirection, SortKey, StatusCounts},
    services::export_file_name,
    state::{AppContext, UiContext},
    utils::{helpers::truncate_text, logging},
};

#[derive(Parser)]
#[command(name = "partyboard")]
#[command(about = "Community events dashboard")]
#[command(version)]
struct Cli {
    /// Settings file, extension optional
    #[arg(long, default_value = "config")]
    config: String,

    /// Interface language (en, ar)
    #[arg(long)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events with search, filters and sorting
    Events {
        /// Case-insensitive text matched against every displayed field
        #[arg(long)]
        search: Option<String>,
        /// Per-column filter such as `place=hall` (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,
        /// Earliest event date, YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,
        /// Latest event date, YYYY-MM-DD
        #[arg(long)]
        to: Option<String>,
        /// Sort column (date, date_time, place, participants, ...)
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show parties of one status together with the nearest upcoming one
    Parties {
        #[arg(long, default_value = "confirmed")]
        status: String,
    },
    /// List dashboard users
    Users,
    /// Print the effective configuration
    Config,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_file(&cli.config).context("failed to load settings")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _guard = logging::init_logging(&settings.logging)?;
    info!("Starting {}", PartyBoard::info());

    if let Commands::Config = cli.command {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let language = cli.lang.as_deref().map(str::parse::<Language>).transpose()?;
    let ctx = AppContext::from_settings(settings).await?;
    let ui = ctx.ui(language);

    match cli.command {
        Commands::Events { search, filters, from, to, sort, desc, format } => {
            let mut field_filters = FieldFilters::new();
            for expr in &filters {
                field_filters.parse_assignment(expr)?;
            }

            let mut spec = QuerySpec {
                field_filters,
                date_range: DateRange::parse(from.as_deref(), to.as_deref())?,
                ..ctx.default_query()
            };
            if let Some(term) = search {
                spec = spec.search(term);
            }
            if let Some(key) = sort {
                let direction = if desc { SortDirection::Descending } else { SortDirection::Ascending };
                spec = spec.sorted_by(SortKey::from_name(&key), direction);
            }
            debug!(?spec, "Running event query");

            let events = ctx.api.fetch_events_or_empty().await;
            let shown = ctx.engine.apply(&events, &spec);

            match format {
                OutputFormat::Csv => {
                    info!(file = %export_file_name("events", Local::now().date_naive(), "csv"), "Writing CSV to stdout");
                    println!("{}", ctx.export.to_csv(&shown));
                }
                OutputFormat::Table => {
                    print_events(&ctx, &ui, &shown);
                    if let Some(label) = ui.sort_label(&spec.sort) {
                        println!("{}", label);
                    }
                    println!("{}", ui.shown_label(shown.len(), events.len()));
                }
            }
        }
        Commands::Parties { status } => {
            let status: EventStatus = status.parse()?;
            let events = ctx.api.fetch_events_or_empty().await;
            let today = Local::now().date_naive();

            match nearest_event(&events, today) {
                Some(next) => println!(
                    "{}: {} {} - {}",
                    ui.t("nearestParty"),
                    ctx.engine.date_formatter().format(&next.date),
                    next.time,
                    next.place
                ),
                None => println!("{}", ui.t("noUpcomingParties")),
            }

            let counts = StatusCounts::from_events(&events);
            let summary: Vec<String> = EventStatus::ALL
                .iter()
                .map(|s| format!("{} {}", ui.status_label(*s), counts.get(*s)))
                .collect();
            println!("{}\n", summary.join(" | "));

            let selected = by_status(&events, status);
            print_events(&ctx, &ui, &selected);
        }
        Commands::Users => {
            let users = ctx.api.list_users().await?;
            print_users(&ui, &users);
        }
        Commands::Config => {}
    }

    Ok(())
}

fn print_events(ctx: &AppContext, ui: &UiContext, events: &[&Event]) {
    if events.is_empty() {
        println!("{}", ui.t("noEventsMatch"));
        return;
    }

    println!(
        "{:<10} {:<12} {:<6} {:<28} {:>5} {}",
        ui.t("day"),
        ui.t("date"),
        ui.t("time"),
        ui.t("place"),
        ui.t("participants"),
        ui.t("status")
    );
    for event in events {
        println!(
            "{:<10} {:<12} {:<6} {:<28} {:>5} {}",
            truncate_text(&event.day, 10),
            ctx.engine.date_formatter().format(&event.date),
            truncate_text(&event.time, 6),
            truncate_text(&event.place, 28),
            event.number_of_participants,
            ui.status_label(event.status)
        );
    }
}

fn print_users(ui: &UiContext, users: &[User]) {
    for user in users {
        let active = if user.is_active { "" } else { " (inactive)" };
        println!("{:<20} {:<24} {:?}{}", user.username, user.display_name(), user.role, active);
    }
    println!("{}: {}", ui.t("users"), users.len());
}
