//! CLI support for printing generated users.
//!
//! The `user-stub-generate` binary delegates to these functions so argument
//! handling and rendering can be exercised without spawning a process.

use std::fmt;

mod error;

pub use error::CliError;

use crate::catalogue::DepartmentCatalogue;
use crate::count::UserCount;
use crate::generator::{generate_users, generate_users_seeded};

/// Usage text printed for `--help`.
pub const USAGE: &str = concat!(
    "Usage: user-stub-generate --count <n> [options]\n",
    "\n",
    "Options:\n",
    "  --count <n>     Number of users to generate (at least 1)\n",
    "  --seed <seed>   RNG seed for reproducible output (defaults to random)\n",
    "  --pretty        Pretty-print the JSON output\n",
    "  -h, --help      Print this help output\n",
);

/// Parsed options for the generation CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    count: UserCount,
    seed: Option<u64>,
    pretty: bool,
}

impl Options {
    /// Number of users to generate.
    #[must_use]
    pub const fn count(&self) -> UserCount {
        self.count
    }

    /// Seed for reproducible output, if supplied.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether output is pretty-printed.
    #[must_use]
    pub const fn pretty(&self) -> bool {
        self.pretty
    }
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Show help output and exit successfully.
    Help,
    /// Continue with the parsed options.
    Options(Options),
}

/// Parses CLI arguments (excluding the program name).
///
/// # Errors
///
/// Returns [`CliError`] when `--count` is missing, a flag lacks a value, a
/// number fails to parse, or an unknown argument is supplied.
///
/// # Example
///
/// ```
/// use user_stub_data::generate_cli::{ParseOutcome, parse_args};
///
/// let args = vec!["--count".to_owned(), "3".to_owned()];
/// let ParseOutcome::Options(options) = parse_args(args.into_iter()).expect("parse") else {
///     panic!("expected options");
/// };
///
/// assert_eq!(options.count().get(), 3);
/// assert_eq!(options.seed(), None);
/// ```
pub fn parse_args<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let mut count: Option<usize> = None;
    let mut seed: Option<u64> = None;
    let mut pretty = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseOutcome::Help),
            "--count" => {
                let value = next_value(&mut args, "--count")?;
                count = Some(parse_number(&value, "--count")?);
            }
            "--seed" => {
                let value = next_value(&mut args, "--seed")?;
                seed = Some(parse_number(&value, "--seed")?);
            }
            "--pretty" => pretty = true,
            _ => return Err(CliError::UnknownArgument { value: arg }),
        }
    }

    let raw_count = count.ok_or(CliError::MissingCount)?;
    Ok(ParseOutcome::Options(Options {
        count: UserCount::new(raw_count)?,
        seed,
        pretty,
    }))
}

/// Generates users for the options and renders them as a JSON array.
///
/// # Errors
///
/// Returns [`CliError::Render`] if serialisation fails.
///
/// # Example
///
/// ```
/// use user_stub_data::generate_cli::{ParseOutcome, parse_args, render};
///
/// let args = ["--count", "2", "--seed", "42"].map(str::to_owned);
/// let ParseOutcome::Options(options) = parse_args(args.into_iter()).expect("parse") else {
///     panic!("expected options");
/// };
///
/// let json = render(&options).expect("render");
/// assert!(json.starts_with('['));
/// ```
pub fn render(options: &Options) -> Result<String, CliError> {
    let catalogue = DepartmentCatalogue::standard();
    let users = match options.seed {
        Some(seed) => generate_users_seeded(seed, options.count, &catalogue),
        None => generate_users(&mut rand::rng(), options.count, &catalogue),
    };

    let rendered = if options.pretty {
        serde_json::to_string_pretty(&users)
    } else {
        serde_json::to_string(&users)
    };
    rendered.map_err(|err| CliError::Render {
        message: err.to_string(),
    })
}

fn next_value<I>(args: &mut I, flag: &'static str) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or(CliError::MissingValue { flag })
}

fn parse_number<T>(value: &str, flag: &'static str) -> Result<T, CliError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|err| CliError::InvalidNumber {
        flag,
        value: value.to_owned(),
        message: err.to_string(),
    })
}
