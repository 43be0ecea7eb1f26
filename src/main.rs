//! # Route-planner CLI
//!
//! Command-line front end for the route-planner library.
//! Adds stops by name, searches routes through them and prints the result.

use clap::Parser;
use log::error;
use route_planner::{
    Error, KakaoClient, ProviderConfig, Result, RoutePlanner, RouteSummary, SceneRenderer,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

mod cli;

use cli::commands::HELP;
use cli::notify::notify_error;
use cli::{notify, parse_command, Command, Severity, Spinner};

/// Command-line interface for route-planner
#[derive(Parser)]
#[command(name = "route-planner")]
#[command(about = "Plan driving routes through ordered stops using the Kakao map APIs")]
#[command(long_about = "Geocodes stops in order and searches routes through them:
  route-planner 서울역 강남역                  # Optimal route between two stops
  route-planner 서울역 홍대입구역 잠실역 --alternatives
                                               # Optimal route plus three alternatives
  route-planner --interactive                  # Add, remove and search at a prompt

Stops are visited in the order given. The first is the origin, the last the
destination and the rest are waypoints.

Requires a Kakao REST API key in KAKAO_REST_API_KEY or --api-key.")]
#[command(version = env!("PLANNER_VERSION"))]
struct Cli {
    /// Stops to visit, as place names or addresses
    stops: Vec<String>,

    /// Search three alternative routes besides the optimal one
    #[arg(short, long)]
    alternatives: bool,

    /// Open a prompt after adding the given stops
    #[arg(short, long)]
    interactive: bool,

    /// Show what would be requested without calling any API
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Hide progress spinners
    #[arg(short, long)]
    quiet: bool,

    /// Kakao REST API key
    #[arg(long, env = "KAKAO_REST_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Serve both Kakao APIs from this base URL instead of the public hosts
    #[arg(long, env = "ROUTE_PLANNER_BASE_URL", hide = true)]
    base_url: Option<String>,
}

type Planner = RoutePlanner<KakaoClient, KakaoClient, SceneRenderer>;

/// What the session does after a command
#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("❌ Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    if cli.verbose {
        eprintln!("🗺️  Route-planner v{} starting...", env!("PLANNER_VERSION"));
    }

    let interactive = cli.interactive || cli.stops.is_empty();
    if cli.dry_run {
        show_dry_run(&cli, interactive);
        return Ok(());
    }

    if !interactive && cli.stops.len() < 2 {
        return Err(Error::InsufficientStops {
            count: cli.stops.len(),
        }
        .into());
    }

    let mut config = ProviderConfig::with_api_key(cli.api_key.clone().unwrap_or_default());
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    let client = KakaoClient::new(config)?;
    let mut planner = RoutePlanner::new(client.clone(), client, SceneRenderer::new());

    if interactive {
        // Stops that fail to resolve are reported and the prompt still opens
        for stop in &cli.stops {
            if let Err(e) = execute(&mut planner, Command::Add(stop.clone()), cli.quiet).await {
                notify_error(&e);
            }
        }
        return prompt_loop(&mut planner, cli.quiet).await;
    }

    for stop in &cli.stops {
        execute(&mut planner, Command::Add(stop.clone()), cli.quiet).await?;
    }

    let search = if cli.alternatives {
        Command::Alternatives
    } else {
        Command::Route
    };
    execute(&mut planner, search, cli.quiet).await?;
    print!("{}", planner.renderer().describe());

    Ok(())
}

/// Print the requests a real run would make
fn show_dry_run(cli: &Cli, interactive: bool) {
    for (i, stop) in cli.stops.iter().enumerate() {
        eprintln!("🔍 [DRY RUN] Would geocode stop {}: {stop}", i + 1);
    }
    match cli.stops.len() {
        _ if interactive => eprintln!("🔍 [DRY RUN] Would open the interactive prompt"),
        0 | 1 => eprintln!("🔍 [DRY RUN] Not enough stops for a route search (need 2)"),
        n => {
            let searches = if cli.alternatives { 4 } else { 1 };
            eprintln!(
                "🔍 [DRY RUN] Would request {searches} route(s) through {n} stops ({} waypoint(s))",
                n - 2
            );
        }
    }
}

/// Read commands from stdin until `quit` or end of input
async fn prompt_loop(planner: &mut Planner, quiet: bool) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    eprintln!("Type 'help' for commands.");

    loop {
        stdout.write_all(b"route> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                notify_error(&e);
                continue;
            }
        };

        // Failed commands are reported and the session goes on
        match execute(planner, command, quiet).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => notify_error(&e),
        }
    }

    Ok(())
}

/// Run one command against the planner and report the outcome
async fn execute(planner: &mut Planner, command: Command, quiet: bool) -> Result<Flow> {
    match command {
        Command::Add(name) => {
            let spinner = Spinner::start(&format!("Searching '{name}'..."), quiet);
            let result = planner.on_add_stop(&name).await;
            spinner.finish();
            let index = result?;
            notify(Severity::Success, &format!("Added stop {}: {name}", index + 1));
        }
        Command::Pin { coord, name } => {
            let spinner = Spinner::start("Looking up address...", quiet);
            let result = planner.on_pick_point(coord, name.as_deref()).await;
            spinner.finish();
            let index = result?;
            announce_added(planner, index);
        }
        Command::Here(coord) => {
            let index = planner.on_add_coordinate("Current location", coord)?;
            announce_added(planner, index);
        }
        Command::Remove(index) => {
            let stop = planner.on_remove_stop(index)?;
            notify(Severity::Info, &format!("Removed {}", stop.name));
        }
        Command::Clear => {
            planner.on_clear_all();
            notify(Severity::Info, "Cleared all stops and routes");
        }
        Command::Reset => {
            planner.on_reset();
            notify(Severity::Info, "Map reset");
        }
        Command::Fit => {
            planner.on_fit_view();
            print!("{}", planner.renderer().describe());
        }
        Command::Route => {
            let spinner = Spinner::start("Calculating route...", quiet);
            let result = planner.find_optimal_route().await;
            spinner.finish();
            show_summary(planner, &result?);
            notify(Severity::Success, "Found the optimal route");
        }
        Command::Alternatives => {
            let spinner = Spinner::start("Calculating alternative routes...", quiet);
            let result = planner.find_alternative_routes().await;
            spinner.finish();
            show_summary(planner, &result?);
            notify(Severity::Success, "Found alternative routes");
        }
        Command::Select(index) => {
            let summary = planner.select_route(index)?;
            show_summary(planner, &summary);
            notify(Severity::Info, &format!("Selected route {}", index + 1));
        }
        Command::List => show_stops(planner),
        Command::Show => print!("{}", planner.renderer().describe()),
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn announce_added(planner: &Planner, index: usize) {
    if let Some(stop) = planner.stops().get(index) {
        notify(
            Severity::Success,
            &format!("Added stop {}: {} ({})", index + 1, stop.name, stop.coord()),
        );
    }
}

fn show_stops(planner: &Planner) {
    let stops = planner.stops().current_stops();
    if stops.is_empty() {
        println!("No stops yet. Add at least two to search a route.");
        return;
    }
    for (i, stop) in stops.iter().enumerate() {
        println!("{}. {} ({})", i + 1, stop.name, stop.coord());
    }
}

fn show_summary(planner: &Planner, summary: &RouteSummary) {
    println!("{summary}");
    let slots: Vec<String> = planner
        .available_routes()
        .iter()
        .enumerate()
        .map(|(i, available)| {
            let marker = if Some(i) == planner.selected() { "*" } else { "" };
            if *available {
                format!("[{}{marker}]", i + 1)
            } else {
                format!(" {} ", i + 1)
            }
        })
        .collect();
    println!("routes: {}", slots.join(" "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_planner::Coord;

    #[test]
    fn test_cli_parses_stops_and_flags() {
        let cli = Cli::try_parse_from([
            "route-planner",
            "서울역",
            "강남역",
            "--alternatives",
            "--api-key",
            "abc",
        ])
        .unwrap();
        assert_eq!(cli.stops, vec!["서울역", "강남역"]);
        assert!(cli.alternatives);
        assert!(!cli.interactive);
        assert_eq!(cli.api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["route-planner", "--dry-run"]).unwrap();
        assert!(cli.stops.is_empty());
        assert!(cli.dry_run);
        assert!(!cli.alternatives);
    }

    #[test]
    fn test_here_coordinate_command() {
        assert_eq!(
            parse_command("here 37.5665 126.978").unwrap(),
            Command::Here(Coord::new(37.5665, 126.978))
        );
    }
}
