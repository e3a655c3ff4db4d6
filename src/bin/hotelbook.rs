//! CLI binary for the hotel reservation store.

use std::io::{self, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use hotelbook_rs::booking;
use hotelbook_rs::front_desk::{BookingRequest, FrontDeskBlocking, ReservationFilter};
use hotelbook_rs::models::{NaiveDate, Reservation, ReservationId, ReservationStatus, Room};
use hotelbook_rs::store::{BlockingReservationStore, FileStore};
use owo_colors::OwoColorize;

/// Hotel reservation CLI — book rooms and manage the reservation list.
#[derive(Debug, Parser)]
#[command(name = "hotelbook", version, about)]
struct Cli {
    /// Override the storage directory (default: XDG data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// List the room catalog, optionally filtered by a search term.
    Rooms {
        /// Case-insensitive substring to match against room types.
        #[arg(long)]
        search: Option<String>,
    },
    /// Compute a quote for a date range without booking.
    Quote(QuoteArgs),
    /// Book a room: quote the stay and store a pending reservation.
    Book(BookArgs),
    /// List reservations, optionally filtered.
    List(ListArgs),
    /// Confirm a pending reservation.
    Confirm {
        /// Reservation id.
        id: i64,
    },
    /// Cancel a reservation.
    Cancel {
        /// Reservation id.
        id: i64,
    },
    /// Delete a reservation from the collection.
    Delete {
        /// Reservation id.
        id: i64,
    },
    /// Show the summed total of all confirmed reservations.
    Revenue,
    /// Wipe the reservation collection (it will be re-seeded on the
    /// next run).
    Clear,
}

/// Arguments for the `quote` subcommand.
#[derive(Debug, Args)]
struct QuoteArgs {
    /// Check-in date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    check_in: NaiveDate,
    /// Check-out date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    check_out: NaiveDate,
    /// Room type to price from the catalog (e.g. "Deluxe Suite").
    #[arg(long, conflicts_with = "price", required_unless_present = "price")]
    room: Option<String>,
    /// Explicit nightly price, overriding the catalog.
    #[arg(long)]
    price: Option<f64>,
}

/// Arguments for the `book` subcommand.
#[derive(Debug, Args)]
struct BookArgs {
    /// Guest display name.
    #[arg(long)]
    guest: String,
    /// Room type (priced from the catalog unless --price is given).
    #[arg(long)]
    room: String,
    /// Check-in date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    check_in: NaiveDate,
    /// Check-out date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    check_out: NaiveDate,
    /// Explicit nightly price, overriding the catalog.
    #[arg(long)]
    price: Option<f64>,
}

/// Arguments for the `list` subcommand.
#[derive(Debug, Args)]
struct ListArgs {
    /// Filter by status (Pending, Confirmed, Cancelled).
    #[arg(long, value_parser = parse_status)]
    status: Option<ReservationStatus>,
    /// Filter by guest-name substring (case-insensitive).
    #[arg(long)]
    guest: Option<String>,
    /// Filter by room-label substring (case-insensitive).
    #[arg(long)]
    room: Option<String>,
    /// Earliest check-in date (inclusive, YYYY-MM-DD). Requires --to.
    #[arg(long, requires = "to", value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// Latest check-in date (inclusive, YYYY-MM-DD). Requires --from.
    #[arg(long, requires = "from", value_parser = parse_date)]
    to: Option<NaiveDate>,
}

/// Parses a date string in `YYYY-MM-DD` format for clap.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("{err}"))
}

/// Parses a reservation status for clap.
fn parse_status(s: &str) -> Result<ReservationStatus, String> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(ReservationStatus::Pending),
        "confirmed" => Ok(ReservationStatus::Confirmed),
        "cancelled" => Ok(ReservationStatus::Cancelled),
        other => Err(format!(
            "unknown status '{other}' (expected Pending, Confirmed, or Cancelled)"
        )),
    }
}

/// Resolves the nightly price: explicit override first, then catalog.
fn resolve_price(room: &str, price: Option<f64>) -> io::Result<Option<f64>> {
    if let Some(value) = price {
        return Ok(Some(value));
    }
    match Room::find_by_type(room) {
        Some(entry) => Ok(Some(entry.price_per_night)),
        None => {
            writeln!(
                io::stderr().lock(),
                "{} room type not in catalog: {room}",
                "error:".red().bold()
            )?;
            writeln!(
                io::stderr().lock(),
                "  {} pass --price, or pick a catalog room (see `hotelbook rooms`)",
                "hint:".cyan()
            )?;
            Ok(None)
        }
    }
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store = match create_store(cli.data_dir) {
        Ok(store) => store,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to initialize storage: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let desk = FrontDeskBlocking::new(store);

    // Seed the demo collection on first use.
    if should_initialize(&cli.command)
        && let Err(err) = desk.initialize()
    {
        writeln!(
            io::stderr().lock(),
            "{} failed to initialize reservations: {err}",
            "error:".red().bold()
        )?;
        return Ok(ExitCode::FAILURE);
    }

    dispatch(&desk, cli.command)
}

/// Returns `true` for subcommands that read the collection up front.
///
/// `clear` never reads the slot, and skipping the seeding keeps it
/// reachable as a recovery path when the slot file is corrupted.
const fn should_initialize(command: &Command) -> bool {
    !matches!(command, Command::Clear)
}

/// Creates the store, using `data_dir` if provided or the default XDG
/// data directory otherwise.
fn create_store(data_dir: Option<PathBuf>) -> hotelbook_rs::error::Result<FileStore> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => FileStore::default_dir()?,
    };
    FileStore::new(dir)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch<S: BlockingReservationStore>(
    desk: &FrontDeskBlocking<S>,
    command: Command,
) -> io::Result<ExitCode> {
    match command {
        Command::Rooms { search } => cmd_rooms(search.as_deref()),
        Command::Quote(args) => cmd_quote(&args),
        Command::Book(args) => cmd_book(desk, args),
        Command::List(args) => cmd_list(desk, &args),
        Command::Confirm { id } => cmd_confirm(desk, ReservationId::new(id)),
        Command::Cancel { id } => cmd_cancel(desk, ReservationId::new(id)),
        Command::Delete { id } => cmd_delete(desk, ReservationId::new(id)),
        Command::Revenue => cmd_revenue(desk),
        Command::Clear => cmd_clear(desk),
    }
}

/// Executes the `rooms` subcommand: prints the (filtered) catalog.
fn cmd_rooms(search: Option<&str>) -> io::Result<ExitCode> {
    let rooms: Vec<Room> = Room::catalog()
        .into_iter()
        .filter(|room| search.is_none_or(|term| room.matches(term)))
        .collect();
    print_rooms_table(&rooms)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `quote` subcommand: prices a stay without booking.
fn cmd_quote(args: &QuoteArgs) -> io::Result<ExitCode> {
    let room_label = args.room.as_deref().unwrap_or("(custom price)");
    let Some(price) = resolve_price(room_label, args.price)? else {
        return Ok(ExitCode::FAILURE);
    };

    match booking::quote(args.check_in, args.check_out, price) {
        Ok(quoted) => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", "Quote".green().bold())?;
            writeln!(out)?;
            writeln!(out, "  {} {room_label}", "Room:".bold())?;
            writeln!(out, "  {} {}", "Nights:".bold(), quoted.nights)?;
            writeln!(out, "  {} ${:.2}/night", "Rate:".bold(), price)?;
            writeln!(out, "  {} ${:.2}", "Total:".bold(), quoted.total)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(io::stderr().lock(), "{} {err}", "error:".red().bold())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `book` subcommand: stores a pending reservation.
fn cmd_book<S: BlockingReservationStore>(
    desk: &FrontDeskBlocking<S>,
    args: BookArgs,
) -> io::Result<ExitCode> {
    let Some(price) = resolve_price(&args.room, args.price)? else {
        return Ok(ExitCode::FAILURE);
    };

    let request = BookingRequest {
        guest: args.guest,
        room: args.room,
        check_in: args.check_in,
        check_out: args.check_out,
        price_per_night: price,
    };

    match desk.book(request) {
        Ok(stored) => {
            let mut out = io::stdout().lock();
            writeln!(
                out,
                "{} reservation {} for {}: {} night(s), ${:.2} total",
                "booked:".green().bold(),
                stored.id.bold(),
                stored.guest,
                stored.nights,
                stored.total
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} booking failed: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Builds a [`ReservationFilter`] from CLI arguments.
fn build_filter(args: &ListArgs) -> ReservationFilter {
    let mut filter = ReservationFilter::new();
    if let Some(status) = args.status {
        filter = filter.status(status);
    }
    if let Some(name) = args.guest.as_deref() {
        filter = filter.guest(name);
    }
    if let Some(label) = args.room.as_deref() {
        filter = filter.room(label);
    }
    if let Some((from_date, to_date)) = args.from.zip(args.to) {
        filter = filter.check_in_range(from_date, to_date);
    }
    filter
}

/// Executes the `list` subcommand: prints matching reservations.
fn cmd_list<S: BlockingReservationStore>(
    desk: &FrontDeskBlocking<S>,
    args: &ListArgs,
) -> io::Result<ExitCode> {
    match desk.filtered(&build_filter(args)) {
        Ok(entries) => {
            print_reservations_table(&entries)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to read reservations: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Reports the outcome of a by-id mutation (confirm/cancel/delete).
fn report_mutation(action: &str, id: ReservationId, found: bool) -> io::Result<ExitCode> {
    let mut out = io::stdout().lock();
    if found {
        writeln!(out, "{} reservation {id}", format_args!("{action}:").green().bold())?;
        Ok(ExitCode::SUCCESS)
    } else {
        writeln!(
            io::stderr().lock(),
            "{} no reservation with id {id}",
            "error:".red().bold()
        )?;
        Ok(ExitCode::FAILURE)
    }
}

/// Executes the `confirm` subcommand.
fn cmd_confirm<S: BlockingReservationStore>(
    desk: &FrontDeskBlocking<S>,
    id: ReservationId,
) -> io::Result<ExitCode> {
    match desk.confirm(id) {
        Ok(found) => report_mutation("confirmed", id, found),
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} confirm failed: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `cancel` subcommand.
fn cmd_cancel<S: BlockingReservationStore>(
    desk: &FrontDeskBlocking<S>,
    id: ReservationId,
) -> io::Result<ExitCode> {
    match desk.cancel(id) {
        Ok(found) => report_mutation("cancelled", id, found),
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} cancel failed: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `delete` subcommand.
fn cmd_delete<S: BlockingReservationStore>(
    desk: &FrontDeskBlocking<S>,
    id: ReservationId,
) -> io::Result<ExitCode> {
    match desk.remove(id) {
        Ok(found) => report_mutation("deleted", id, found),
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} delete failed: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `revenue` subcommand.
fn cmd_revenue<S: BlockingReservationStore>(
    desk: &FrontDeskBlocking<S>,
) -> io::Result<ExitCode> {
    match desk.total_revenue() {
        Ok(revenue) => {
            writeln!(
                io::stdout().lock(),
                "{} ${revenue:.2}",
                "Confirmed revenue:".green().bold()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to compute revenue: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `clear` subcommand.
fn cmd_clear<S: BlockingReservationStore>(desk: &FrontDeskBlocking<S>) -> io::Result<ExitCode> {
    match desk.clear_all() {
        Ok(()) => {
            writeln!(
                io::stdout().lock(),
                "{} reservation collection wiped",
                "cleared:".green().bold()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} clear failed: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

// ── Output formatting ────────────────────────────────────────────────

/// Prints the room catalog in a table.
fn print_rooms_table(rooms: &[Room]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if rooms.is_empty() {
        writeln!(out, "{}", "No rooms match.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Room").fg(Color::Cyan),
        Cell::new("Per night").fg(Color::Cyan),
    ]);

    for room in rooms {
        _ = table.add_row(vec![
            Cell::new(&room.room_type),
            Cell::new(format!("${:.2}", room.price_per_night)),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Rooms".green().bold(),
        format_args!("({})", rooms.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints reservations in a table.
fn print_reservations_table(entries: &[Reservation]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if entries.is_empty() {
        writeln!(out, "{}", "No reservations found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Id").fg(Color::Cyan),
        Cell::new("Guest").fg(Color::Cyan),
        Cell::new("Room").fg(Color::Cyan),
        Cell::new("Check-in").fg(Color::Cyan),
        Cell::new("Nights").fg(Color::Cyan),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);

    for entry in entries {
        let status_cell = match entry.status {
            ReservationStatus::Confirmed => {
                Cell::new(entry.status.to_string()).fg(Color::Green)
            }
            ReservationStatus::Pending => Cell::new(entry.status.to_string()).fg(Color::Yellow),
            ReservationStatus::Cancelled => Cell::new(entry.status.to_string()).fg(Color::Red),
        };
        _ = table.add_row(vec![
            Cell::new(entry.id),
            Cell::new(&entry.guest),
            Cell::new(&entry.room),
            Cell::new(entry.check_in),
            Cell::new(entry.nights),
            Cell::new(format!("${:.2}", entry.total)),
            status_cell,
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Reservations".green().bold(),
        format_args!("({})", entries.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // Last-resort error output; if stderr itself failed, nothing
            // we can do.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
