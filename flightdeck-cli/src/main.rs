//! Flightdeck CLI - airport directory commands and a headless search.
//!
//! Commands:
//! - `airports list` - print every airport from the bundled list, a file or a URL
//! - `airports lookup` - resolve one IATA code
//! - `airports check` - validate an airport JSON file
//! - `search` - run the simulated search without a terminal UI

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use flightdeck_core::criteria::parse_date;
use flightdeck_core::flights::airline_badge;
use flightdeck_core::{
    AirportDirectory, AirportSource, BookingConfig, BookingSession, FlightDetails, FlightId,
    FlightLeg, ProgressSimulator, StageStatus, Tick,
};

#[derive(Parser)]
#[command(name = "flightdeck", about = "Flightdeck CLI - simulated flight booking")]
struct Cli {
    /// Config file (default: <config dir>/flightdeck/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Airport directory commands.
    Airports {
        #[command(subcommand)]
        action: AirportAction,
    },
    /// Run a simulated search and print the results.
    Search {
        /// Origin IATA code.
        #[arg(long)]
        from: Option<String>,

        /// Destination IATA code.
        #[arg(long)]
        to: Option<String>,

        /// Departure date (YYYY-MM-DD).
        #[arg(long)]
        depart: Option<String>,

        /// Return date (YYYY-MM-DD).
        #[arg(long = "return")]
        return_date: Option<String>,

        /// Milliseconds per progress step. Overrides the config file.
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Open the details of this flight id after the search.
        #[arg(long)]
        select: Option<String>,

        /// Print results as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum AirportAction {
    /// Print every airport.
    List {
        /// Airport JSON file instead of the configured source.
        #[arg(long, conflicts_with = "url")]
        file: Option<PathBuf>,

        /// Fetch the airport JSON from this URL.
        #[arg(long)]
        url: Option<String>,
    },
    /// Resolve an IATA code.
    Lookup {
        code: String,

        #[arg(long, conflicts_with = "url")]
        file: Option<PathBuf>,

        #[arg(long)]
        url: Option<String>,
    },
    /// Validate an airport JSON file.
    Check { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Airports { action } => match action {
            AirportAction::List { file, url } => {
                let directory = open_directory(&config, file, url)?;
                print_airports(&directory, &mut io::stdout().lock())
            }
            AirportAction::Lookup { code, file, url } => {
                let directory = open_directory(&config, file, url)?;
                run_lookup(&directory, &code)
            }
            AirportAction::Check { file } => run_check(&file),
        },
        Commands::Search {
            from,
            to,
            depart,
            return_date,
            tick_ms,
            select,
            json,
        } => {
            let mut config = config;
            if let Some(tick_ms) = tick_ms {
                config.tick_ms = tick_ms;
            }
            config.validate().context("invalid --tick-ms")?;

            let mut session = BookingSession::new(ProgressSimulator::new(config.tick_interval()));
            session.criteria.origin = from.map(|c| c.trim().to_uppercase());
            session.criteria.destination = to.map(|c| c.trim().to_uppercase());
            session.criteria.departure = parse_date_arg("--depart", depart.as_deref())?;
            session.criteria.return_date = parse_date_arg("--return", return_date.as_deref())?;

            let mut out = io::stdout().lock();
            run_search(&mut session, Some(config.tick_interval()), json, &mut out)?;
            if let Some(id) = select {
                run_select(&mut session, FlightId::new(id), json, &mut out)?;
            }
            Ok(())
        }
    }
}

/// Stderr logging with `RUST_LOG` honoured; defaults to `info`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<BookingConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flightdeck")
            .join("config.toml"),
    };
    BookingConfig::load(&path).with_context(|| format!("load config {}", path.display()))
}

/// Flags win over the config file; otherwise the config's URL, then its file,
/// then the bundled list.
fn resolve_source(
    config: &BookingConfig,
    file: Option<PathBuf>,
    url: Option<String>,
) -> AirportSource {
    match (file, url) {
        (Some(path), _) => AirportSource::File(path),
        (None, Some(url)) => AirportSource::Url(url),
        (None, None) => config
            .refresh_source()
            .unwrap_or_else(|| config.initial_source()),
    }
}

fn open_directory(
    config: &BookingConfig,
    file: Option<PathBuf>,
    url: Option<String>,
) -> Result<AirportDirectory> {
    let source = resolve_source(config, file, url);
    AirportDirectory::try_load(&source).with_context(|| format!("load airports from {source}"))
}

fn print_airports(directory: &AirportDirectory, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:<5} {:<16} {:<44} Country", "Code", "City", "Name")?;
    writeln!(out, "{}", "-".repeat(80))?;
    for a in directory.airports() {
        writeln!(out, "{:<5} {:<16} {:<44} {}", a.code, a.city, a.name, a.country)?;
    }
    writeln!(out, "\n{} airports", directory.len())?;
    Ok(())
}

fn run_lookup(directory: &AirportDirectory, code: &str) -> Result<()> {
    match directory.lookup(code) {
        Some(a) => {
            println!("{} - {}", a.code, a.name);
            println!("{}, {}", a.city, a.country);
            Ok(())
        }
        None => bail!("no airport with code '{}'", code.trim().to_uppercase()),
    }
}

/// Problems a loaded file can still have: blank fields and repeated codes.
fn audit(directory: &AirportDirectory) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen = BTreeSet::new();
    for (i, a) in directory.airports().iter().enumerate() {
        for (field, value) in [
            ("code", &a.code),
            ("name", &a.name),
            ("city", &a.city),
            ("country", &a.country),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("entry {i}: empty {field}"));
            }
        }
        if !a.code.is_empty() && !seen.insert(a.code.to_uppercase()) {
            problems.push(format!("entry {i}: duplicate code {}", a.code));
        }
    }
    problems
}

fn run_check(file: &Path) -> Result<()> {
    let directory = AirportDirectory::from_file(file)?;
    let problems = audit(&directory);
    if problems.is_empty() {
        println!("{}: {} airports, OK", file.display(), directory.len());
        return Ok(());
    }
    for p in &problems {
        eprintln!("{}: {p}", file.display());
    }
    bail!("{} problem(s) in {}", problems.len(), file.display());
}

fn parse_date_arg(flag: &str, value: Option<&str>) -> Result<Option<chrono::NaiveDate>> {
    match value {
        Some(v) => parse_date(v).with_context(|| format!("{flag} '{v}' is not YYYY-MM-DD")),
        None => Ok(None),
    }
}

/// Drive the session to completion, printing each stage as it changes.
/// With `pace` set, sleeps one interval per step.
fn run_search(
    session: &mut BookingSession,
    pace: Option<Duration>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    for issue in session.criteria.issues() {
        warn!(%issue, "searching anyway");
    }
    if !session.submit() {
        bail!("search could not be started");
    }

    let mut last: Vec<StageStatus> = session.stages().iter().map(|(_, s)| *s).collect();
    if !json {
        writeln!(out, "Searching for flights {}...", session.criteria.route())?;
        print_stage_changes(session, &mut last, true, out)?;
    }

    loop {
        if let Some(interval) = pace {
            thread::sleep(interval);
        }
        let outcome = session.tick();
        if !json {
            print_stage_changes(session, &mut last, false, out)?;
        }
        match outcome {
            Tick::Completed => break,
            Tick::Advanced(p) => debug!(progress = p, "search progress"),
            Tick::Idle => bail!("search stopped before completing"),
        }
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(session.results())?)?;
        return Ok(());
    }

    let results = session.results();
    writeln!(out, "\nShowing {} of {} results", results.len(), results.len())?;
    for f in results {
        writeln!(
            out,
            "{:>3}  [{}] {:>8} - {:<8} {:<10} {:<9} from {}   {} • {}",
            f.id.as_str(),
            airline_badge(&f.airline),
            f.departure,
            f.arrival,
            f.duration,
            f.stops,
            f.price,
            f.airline,
            f.flight_number
        )?;
    }
    Ok(())
}

fn print_stage_changes(
    session: &BookingSession,
    last: &mut [StageStatus],
    force: bool,
    out: &mut impl Write,
) -> Result<()> {
    for (i, (stage, status)) in session.stages().iter().enumerate() {
        if force || last[i] != *status {
            if *status != StageStatus::Pending {
                writeln!(out, "  {} {}", stage_marker(*status), stage.label())?;
            }
            last[i] = *status;
        }
    }
    Ok(())
}

fn stage_marker(status: StageStatus) -> &'static str {
    match status {
        StageStatus::Complete => "[done]",
        StageStatus::InProgress => "[....]",
        StageStatus::Pending => "[    ]",
    }
}

fn run_select(
    session: &mut BookingSession,
    id: FlightId,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    if !session.select(id.clone()) {
        bail!("no flight with id '{id}' in the results");
    }
    let Some(details) = session.details() else {
        bail!("no details for flight '{id}'");
    };
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(details)?)?;
    } else {
        print_details(details, out)?;
    }
    Ok(())
}

fn print_details(details: &FlightDetails, out: &mut impl Write) -> Result<()> {
    writeln!(out, "\nFlight details")?;
    print_leg("Outbound", &details.outbound, out)?;
    if let Some(layover) = &details.layover {
        writeln!(out, "  Layover: {}", layover.duration)?;
    }
    print_leg("Return", &details.inbound, out)?;
    Ok(())
}

fn print_leg(title: &str, leg: &FlightLeg, out: &mut impl Write) -> Result<()> {
    let (from_code, from_name) = leg.from_parts();
    let (to_code, to_name) = leg.to_parts();
    writeln!(out, "\n{title} - {}", leg.date)?;
    writeln!(out, "  {} {from_code} ({from_name})", leg.departure_time)?;
    writeln!(out, "  {} {to_code} ({to_name})", leg.arrival_time)?;
    writeln!(
        out,
        "  {} {} | {} | {}",
        leg.airline, leg.flight_number, leg.aircraft, leg.duration
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightdeck_core::Airport;

    fn airport(code: &str, city: &str) -> Airport {
        Airport {
            name: format!("{city} Airport"),
            code: code.into(),
            city: city.into(),
            country: "Nowhere".into(),
        }
    }

    #[test]
    fn search_prints_stages_and_rows() {
        let mut session = BookingSession::default();
        session.criteria.origin = Some("DXB".into());
        session.criteria.destination = Some("JFK".into());

        let mut out = Vec::new();
        run_search(&mut session, None, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Searching for flights DXB → JFK"));
        assert!(text.contains("[done] Searching 400+ flights"));
        assert!(text.contains("[done] Serving best results"));
        assert!(text.contains("Showing 6 of 6 results"));
        assert!(text.contains("AT 4324, Indigo • 6E 783"));
        assert_eq!(session.progress(), 100);
    }

    #[test]
    fn search_json_is_parseable() {
        let mut session = BookingSession::default();
        let mut out = Vec::new();
        run_search(&mut session, None, true, &mut out).unwrap();

        let rows: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(rows.as_array().map(Vec::len), Some(6));
        assert_eq!(rows[0]["flightNumber"], "AT 4324");
    }

    #[test]
    fn select_prints_sample_details() {
        let mut session = BookingSession::default();
        run_search(&mut session, None, true, &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        run_select(&mut session, FlightId::new("3"), false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("DXB (Dubai International Airport)"));
        assert!(text.contains("Layover: 2h 30m"));
    }

    #[test]
    fn select_unknown_id_fails() {
        let mut session = BookingSession::default();
        run_search(&mut session, None, true, &mut Vec::new()).unwrap();
        assert!(run_select(&mut session, FlightId::new("99"), false, &mut Vec::new()).is_err());
    }

    #[test]
    fn audit_flags_blanks_and_duplicates() {
        let directory = AirportDirectory::new(vec![
            airport("DXB", "Dubai"),
            airport("dxb", "Dubai again"),
            airport("", "Nowhere"),
        ]);
        let problems = audit(&directory);
        assert!(problems.iter().any(|p| p.contains("duplicate code dxb")));
        assert!(problems.iter().any(|p| p.contains("entry 2: empty code")));
    }

    #[test]
    fn bundled_list_passes_audit() {
        assert!(audit(&AirportDirectory::bundled()).is_empty());
    }

    #[test]
    fn check_rejects_bad_json() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "{ not json").unwrap();
        assert!(run_check(tmp.path()).is_err());
    }

    #[test]
    fn flags_override_config_source() {
        let config = BookingConfig {
            airports_url: Some("http://example.invalid/a.json".into()),
            ..BookingConfig::default()
        };
        assert_eq!(
            resolve_source(&config, Some(PathBuf::from("a.json")), None),
            AirportSource::File(PathBuf::from("a.json"))
        );
        assert_eq!(
            resolve_source(&config, None, None),
            AirportSource::Url("http://example.invalid/a.json".into())
        );
        assert_eq!(
            resolve_source(&BookingConfig::default(), None, None),
            AirportSource::Bundled
        );
    }

    #[test]
    fn bad_date_flag_names_the_flag() {
        let err = parse_date_arg("--depart", Some("28/09/2024")).unwrap_err();
        assert!(err.to_string().contains("--depart"));
        assert_eq!(parse_date_arg("--return", None).unwrap(), None);
    }
}
