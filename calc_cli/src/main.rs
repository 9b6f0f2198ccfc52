//! # Liftcalc CLI
//!
//! Command-line front end for the commissioning formula engine. Fields are
//! entered as `name=value`; whatever is left empty is solved.
//!
//! ```text
//! liftcalc solve current-limit --set motor_current=10 --set inverter_current=5
//! liftcalc solve frequency-divider --set rated_speed=45 --set rpm=1200 --set encoder_ppr=1024
//! liftcalc interactive traction-speed
//! liftcalc search rpm
//! liftcalc profile --rated 60 --frequency 60
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG` or pass `--verbose`.

mod prompt;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use calc_core::catalog::{search, Calculator, Category};
use calc_core::parsing::quick_convert;
use calc_core::relations::RelationId;
use calc_core::solver::{try_solve, SolveRequest};
use calc_core::speed_profile::{profile_from_text, RatedSpeedClass};
use calc_core::{CalcError, CalcResult, OutputFormat, Settings};

#[derive(Debug, Parser)]
#[command(name = "liftcalc", author, version, about = "Elevator commissioning calculator")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (JSON)
    #[arg(long, global = true, env = "LIFTCALC_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a relation; fields left out are the unknowns
    Solve {
        /// Relation name (see `list`)
        relation: String,

        /// Field assignment, repeatable
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// Delta VL inverter (frequency divider)
        #[arg(long)]
        delta_vl: bool,
    },

    /// Prompt for each field of a relation
    Interactive {
        /// Relation name (see `list`)
        relation: String,

        /// Delta VL inverter (frequency divider)
        #[arg(long)]
        delta_vl: bool,
    },

    /// List calculators
    List {
        /// Motor, Inverter, Speed or All
        #[arg(short, long, default_value = "all")]
        category: String,
    },

    /// Search calculators by name, parameter code or keyword
    Search {
        term: String,

        /// Motor, Inverter, Speed or All
        #[arg(short, long, default_value = "all")]
        category: String,
    },

    /// 04-XX speed profile from the full-speed frequency
    Profile {
        /// Rated speed class: 30, 45 or 60 (m/min)
        #[arg(long)]
        rated: String,

        /// Full-speed frequency in Hz
        #[arg(long)]
        frequency: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json_errors = cli.json;
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.error_code(), "{}", e);
            eprintln!("Error: {}", e);
            if json_errors {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CalcResult<()> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if cli.json {
        settings.output = OutputFormat::Json;
    }
    debug!(?settings, "effective settings");

    match cli.command {
        Command::Solve {
            relation,
            set,
            delta_vl,
        } => {
            let id = resolve_relation(&relation)?;
            let mut request = SolveRequest::new().with_delta_vl(delta_vl);
            for assignment in &set {
                let (name, value) = parse_assignment(id, assignment)?;
                request.set(name, value);
            }
            solve_and_print(id, request, &settings)
        }
        Command::Interactive { relation, delta_vl } => {
            let id = resolve_relation(&relation)?;
            prompt::run_interactive(id, delta_vl, &settings)
        }
        Command::List { category } => {
            let category = resolve_category(&category)?;
            render::print_catalog(&search("", category), settings.output)
        }
        Command::Search { term, category } => {
            let category = resolve_category(&category)?;
            let hits = search(&term, category);
            info!(term = %term, hits = hits.len(), "catalog search");
            render::print_search(&hits, quick_convert(&term).as_ref(), settings.output)
        }
        Command::Profile { rated, frequency } => {
            let class = RatedSpeedClass::parse(&rated).ok_or_else(|| {
                CalcError::invalid_input("rated", &rated, "Rated speed must be 30, 45 or 60")
            })?;
            let profile = profile_from_text(class, &frequency).ok_or_else(|| {
                CalcError::invalid_input(
                    "frequency",
                    &frequency,
                    "Frequency must be a non-negative number",
                )
            })?;
            render::print_profile(&profile, settings.output)
        }
    }
}

/// Apply settings defaults, solve, and print the result or the reason there is none.
pub(crate) fn solve_and_print(
    id: RelationId,
    request: SolveRequest,
    settings: &Settings,
) -> CalcResult<()> {
    let request = settings.apply_defaults(id, request);
    match try_solve(id.relation(), &request) {
        Ok(result) => render::print_result(&result, &request, settings.output),
        Err(e) => {
            debug!(relation = %id, code = e.error_code(), "no result");
            render::print_no_result(&e, settings.output)
        }
    }
}

fn resolve_relation(name: &str) -> CalcResult<RelationId> {
    match Calculator::from_slug(name) {
        Some(Calculator::Relation(id)) => Ok(id),
        Some(Calculator::SpeedProfile) => Err(CalcError::invalid_input(
            "relation",
            name,
            "The speed profile is not a relation; use the `profile` command",
        )),
        None => Err(CalcError::unknown_relation(name)),
    }
}

fn resolve_category(name: &str) -> CalcResult<Category> {
    Category::parse(name).ok_or_else(|| {
        CalcError::invalid_input("category", name, "Expected Motor, Inverter, Speed or All")
    })
}

/// Split `name=value` and check the name belongs to the relation.
fn parse_assignment(id: RelationId, raw: &str) -> CalcResult<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| CalcError::invalid_input("set", raw, "Expected NAME=VALUE"))?;
    let name = name.trim();
    if id.relation().variable(name).is_none() {
        let expected = id.relation().variable_names().join(", ");
        return Err(CalcError::invalid_input(
            "set",
            raw,
            format!("Unknown field for {}; expected one of {}", id, expected),
        ));
    }
    Ok((name.to_string(), value.to_string()))
}
