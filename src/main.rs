use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use rox::ast_printer::AstPrinter;
use rox::diagnostics::{Diagnostics, Outcome, EX_USAGE};
use rox::interpreter::Interpreter;
use rox::parser::Parser;
use rox::scanner::Scanner;
use rox::token::Token;
use rox::Session;

#[derive(ClapParser, Debug)]
#[command(
    version,
    about = "Rox language interpreter",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Script to run; starts an interactive prompt when omitted
    scripts: Vec<PathBuf>,

    /// Enable logging to a file
    #[arg(long, global = true)]
    log: bool,

    /// File written by --log
    #[arg(long, global = true, value_name = "PATH", default_value = "app.log")]
    log_file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the token stream as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and prints its syntax tree
    Parse { filename: PathBuf },

    /// Evaluates input from a file as a single expression and prints the result
    Evaluate { filename: PathBuf },
}

/// Reads a whole source file as UTF-8 text.
fn read_file(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let bytes = reader
        .read_to_string(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn init_logger(path: &Path) -> Result<()> {
    let log_file = File::create(path).context(format!("Failed to create {:?}", path))?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("rox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "{} {:<5} [{}:{}] - {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env() // RUST_LOG overrides the default level
        .init();

    info!("Logger initialized, writing to {:?}", path);

    Ok(())
}

/// Print every collected error to stderr, one report per problem.
fn report(diagnostics: &Diagnostics) {
    for error in diagnostics.errors() {
        eprintln!("{}", error);
    }
}

fn exit_with(outcome: Outcome) -> ! {
    debug!("Exiting with {:?}", outcome);

    let _ = io::stdout().flush();

    std::process::exit(outcome.exit_code());
}

fn run_file(path: &Path) -> Result<()> {
    let source = read_file(path)?;
    let mut session = Session::new();

    let diagnostics = session.run(&source);
    report(&diagnostics);

    if diagnostics.outcome() != Outcome::Success {
        exit_with(diagnostics.outcome());
    }

    Ok(())
}

fn run_prompt() -> Result<()> {
    info!("Starting interactive prompt");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut session = Session::new();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        // Errors are reported and forgotten; the next line starts clean.
        let diagnostics = session.run(&line);
        report(&diagnostics);
    }

    info!("Prompt closed");

    Ok(())
}

fn tokenize(filename: &Path, json: bool) -> Result<()> {
    let source = read_file(filename)?;
    let mut tokens: Vec<Token> = Vec::new();
    let mut tokenized = true;

    for token in Scanner::new(&source) {
        match token {
            Ok(token) => {
                if !json {
                    println!("{}", token);
                }
                tokens.push(token);
            }

            Err(e) => {
                tokenized = false;
                eprintln!("{}", e);
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    }

    if !tokenized {
        exit_with(Outcome::SyntaxError);
    }

    Ok(())
}

fn parse(filename: &Path) -> Result<()> {
    let source = read_file(filename)?;
    let mut diagnostics = Diagnostics::new();

    let tokens = Scanner::new(&source).scan_tokens(&mut diagnostics);
    let statements = Parser::new(&tokens).parse(&mut diagnostics);

    report(&diagnostics);

    if diagnostics.had_error() {
        exit_with(Outcome::SyntaxError);
    }

    for stmt in &statements {
        println!("{}", AstPrinter::print_stmt(stmt));
    }

    Ok(())
}

fn evaluate(filename: &Path) -> Result<()> {
    let source = read_file(filename)?;
    let mut diagnostics = Diagnostics::new();

    let tokens = Scanner::new(&source).scan_tokens(&mut diagnostics);
    let expr = Parser::new(&tokens).parse_expression(&mut diagnostics);

    let Some(expr) = expr.filter(|_| !diagnostics.had_error()) else {
        report(&diagnostics);
        exit_with(Outcome::SyntaxError);
    };

    match Interpreter::new().evaluate(&expr) {
        Ok(value) => println!("{}", value),

        Err(e) => {
            eprintln!("{}", e);
            exit_with(Outcome::RuntimeError);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger(&args.log_file)?;
    } else {
        // A logger that drops everything, so `log` macros stay cheap.
        Builder::new().filter_level(log::LevelFilter::Off).init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Some(Commands::Tokenize { filename, json }) => tokenize(&filename, json),

        Some(Commands::Parse { filename }) => parse(&filename),

        Some(Commands::Evaluate { filename }) => evaluate(&filename),

        None => match args.scripts.as_slice() {
            [] => run_prompt(),

            [script] => run_file(script),

            _ => {
                eprintln!("Usage: rox [script]");
                std::process::exit(EX_USAGE);
            }
        },
    }
}
