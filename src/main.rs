// SPDX-License-Identifier: MIT
//
// chromatext — a line filter over ct-markup.
//
//   chromatext [OPTIONS] [TEXT...]
//
// Every TEXT argument (or, when there are none, every line of stdin) is
// run through one transformation and written to stdout on its own line:
//
//   convert       all dialects → canonical tokens (default)
//   minify        convert, then drop redundant tokens
//   strip         remove every code of every dialect
//   strip-legacy  remove delimited codes only
//
// Exit status: 0 on success, 2 on a usage or configuration error, 1 when
// reading or writing fails.

use std::env;
use std::io::{self, BufRead, BufWriter, Write};
use std::process;

use ct_markup::{Converter, Delimiter};
use env_logger::Env;
use log::info;

const USAGE: &str = "\
Usage: chromatext [OPTIONS] [TEXT...]

Rewrites inline chat color codes (&a, &#f80, &x&f&8&0, {#gold},
{#red>}gradients{#blue<}) into canonical § tokens. Reads stdin line by
line when no TEXT is given.

Options:
  -d, --delimiter <CHAR>  Delimiter used instead of & [env: CHROMATEXT_DELIMITER]
  -m, --minify            Convert, then drop redundant tokens
  -s, --strip             Remove every color and format code
      --strip-legacy      Remove only delimited codes
      --mode <MODE>       convert | minify | strip | strip-legacy
  -h, --help              Print this help
  -V, --version           Print the version
";

/// Environment variable consulted when `--delimiter` is absent.
const DELIMITER_ENV: &str = "CHROMATEXT_DELIMITER";

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0} (see --help)")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ct_markup::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CliError {
    const fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Usage(_) | Self::Config(_) => 2,
        }
    }
}

// ─── Mode ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    Convert,
    Minify,
    Strip,
    StripLegacy,
}

impl Mode {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "convert" => Some(Self::Convert),
            "minify" => Some(Self::Minify),
            "strip" => Some(Self::Strip),
            "strip-legacy" => Some(Self::StripLegacy),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Convert => "convert",
            Self::Minify => "minify",
            Self::Strip => "strip",
            Self::StripLegacy => "strip-legacy",
        }
    }

    fn apply(self, converter: &Converter, text: &str) -> String {
        match self {
            Self::Convert => converter.convert(text),
            Self::Minify => converter.convert_minified(text),
            Self::Strip => converter.strip(text),
            Self::StripLegacy => converter.strip_legacy(text),
        }
    }
}

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    mode: Mode,
    delimiter: Option<Delimiter>,
    texts: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

/// Parse everything after the program name.
///
/// `--` ends option parsing, so text starting with `-` can follow it.
/// Long options taking a value accept both `--opt value` and `--opt=value`.
fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_owned(), Some(value.to_owned())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or_else(|| CliError::Usage(format!("{name} needs a value")))
        };

        match flag.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-m" | "--minify" => options.mode = Mode::Minify,
            "-s" | "--strip" => options.mode = Mode::Strip,
            "--strip-legacy" => options.mode = Mode::StripLegacy,
            "-d" | "--delimiter" => {
                options.delimiter = Some(value("--delimiter")?.parse()?);
            }
            "--mode" => {
                let name = value("--mode")?;
                options.mode = Mode::parse(&name)
                    .ok_or_else(|| CliError::Usage(format!("unknown mode {name:?}")))?;
            }
            "--" => {
                options.texts.extend(args.by_ref());
                break;
            }
            other if other.len() > 1 && other.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option {other:?}")));
            }
            _ => options.texts.push(arg),
        }
    }

    Ok(Command::Run(options))
}

/// The flag wins over the environment; both fall back to `&`.
fn resolve_delimiter(flag: Option<Delimiter>, env: Option<&str>) -> Result<Delimiter, CliError> {
    match (flag, env) {
        (Some(delimiter), _) => Ok(delimiter),
        (None, Some(value)) if !value.is_empty() => Ok(value.parse()?),
        (None, _) => Ok(Delimiter::default()),
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn run() -> Result<(), CliError> {
    let options = match parse_args(env::args().skip(1))? {
        Command::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        Command::Version => {
            println!("chromatext {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Run(options) => options,
    };

    let env_delimiter = env::var(DELIMITER_ENV).ok();
    let delimiter = resolve_delimiter(options.delimiter, env_delimiter.as_deref())?;
    let converter = Converter::with_delimiter(delimiter.as_char())?;
    let mode = options.mode;
    info!("mode {}, delimiter {delimiter}", mode.name());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if options.texts.is_empty() {
        for line in io::stdin().lock().lines() {
            writeln!(out, "{}", mode.apply(&converter, &line?))?;
        }
    } else {
        for text in &options.texts {
            writeln!(out, "{}", mode.apply(&converter, text))?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("chromatext: {e}");
        process::exit(e.exit_code());
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
