//! Interactive commands for the route-planner CLI
//!
//! Parses one input line into a `Command`. Unknown verbs get a
//! "did you mean" suggestion.

use route_planner::{Coord, Error, Result};
use strsim::{jaro_winkler, normalized_levenshtein};

/// A user action, with stop and route numbers already converted to indices
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Geocode a name and append it
    Add(String),
    /// Append a map point, named by its address unless a name is given
    Pin { coord: Coord, name: Option<String> },
    /// Append the user's current position
    Here(Coord),
    Remove(usize),
    Clear,
    Reset,
    Fit,
    Route,
    Alternatives,
    Select(usize),
    List,
    Show,
    Help,
    Quit,
}

/// Verbs accepted at the prompt
pub const VERBS: &[&str] = &[
    "add",
    "pin",
    "here",
    "remove",
    "clear",
    "reset",
    "fit",
    "route",
    "alternatives",
    "select",
    "list",
    "show",
    "help",
    "quit",
];

pub const HELP: &str = "\
Commands:
  add <place or address>     geocode and append a stop
  pin <lat> <lng> [name]     append a map point (named by its address)
  here <lat> <lng>           append your current position
  remove <n>                 remove stop number n
  clear                      remove all stops and routes
  reset                      clear and recenter the map
  fit                        frame all stops
  route                      find the optimal route
  alternatives               find the optimal route and three alternatives
  select <1-4>               display another route
  list                       list stops
  show                       print the map
  help                       show this help
  quit                       exit";

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "add" | "a" => {
            if rest.is_empty() {
                return Err(Error::InvalidInput("add needs a place name".to_string()));
            }
            Ok(Command::Add(rest.to_string()))
        }
        "pin" => {
            let mut parts = rest.split_whitespace();
            let coord = parse_coord(parts.next(), parts.next())?;
            let name = parts.collect::<Vec<_>>().join(" ");
            let name = (!name.is_empty()).then_some(name);
            Ok(Command::Pin { coord, name })
        }
        "here" => {
            let mut parts = rest.split_whitespace();
            Ok(Command::Here(parse_coord(parts.next(), parts.next())?))
        }
        "remove" | "rm" | "delete" => Ok(Command::Remove(parse_ordinal(rest)?)),
        "clear" => Ok(Command::Clear),
        "reset" => Ok(Command::Reset),
        "fit" => Ok(Command::Fit),
        "route" | "r" => Ok(Command::Route),
        "alternatives" | "alt" => Ok(Command::Alternatives),
        "select" | "s" => Ok(Command::Select(parse_ordinal(rest)?)),
        "list" | "ls" => Ok(Command::List),
        "show" | "map" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "" => Err(Error::InvalidInput("empty command".to_string())),
        other => {
            let message = match suggest_command(other) {
                Some(suggestion) => {
                    format!("unknown command '{other}'. Did you mean '{suggestion}'?")
                }
                None => format!("unknown command '{other}'. Type 'help' for commands"),
            };
            Err(Error::InvalidInput(message))
        }
    }
}

/// Closest known verb to a mistyped one
pub fn suggest_command(input: &str) -> Option<&'static str> {
    let input = input.to_lowercase();
    let mut best: Option<(&'static str, f64)> = None;

    for &verb in VERBS {
        // JW catches transpositions, Levenshtein catches dropped letters
        let score = jaro_winkler(&input, verb) * 0.7 + normalized_levenshtein(&input, verb) * 0.3;
        if score >= 0.75 && best.map_or(true, |(_, s)| score > s) {
            best = Some((verb, score));
        }
    }

    best.map(|(verb, _)| verb)
}

/// 1-based number as typed by the user, returned as a 0-based index
fn parse_ordinal(input: &str) -> Result<usize> {
    let n: usize = input
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("expected a number, got '{input}'")))?;
    if n == 0 {
        return Err(Error::InvalidInput("numbers start at 1".to_string()));
    }
    Ok(n - 1)
}

fn parse_coord(lat: Option<&str>, lng: Option<&str>) -> Result<Coord> {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err(Error::InvalidInput("expected <lat> <lng>".to_string()));
    };
    let parse = |value: &str| {
        value
            .trim_end_matches(',')
            .parse::<f64>()
            .map_err(|_| Error::InvalidInput(format!("'{value}' is not a number")))
    };
    let coord = Coord::new(parse(lat)?, parse(lng)?);
    if !coord.is_valid() {
        return Err(Error::InvalidInput(format!("invalid coordinate: {coord}")));
    }
    Ok(coord)
}
