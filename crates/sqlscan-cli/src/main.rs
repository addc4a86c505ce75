//! sqlscan CLI
//!
//! Command-line tool for lexing, parsing and rewriting MySQL/MariaDB queries.

use std::io::Read;
use std::sync::OnceLock;

use anyhow::{bail, Context as _};
use clap::{Parser as ClapParser, Subcommand};
use serde::Serialize;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use sqlscan_core::context::{DEFAULT_CONTEXT, REGISTERED};
use sqlscan_core::query::{self, ClauseSelector, QueryFlags};
use sqlscan_core::{Context, Diagnostic, Lexer, Parser, SqlMode, Statement, Token};

/// The dialect every command uses, resolved once from the command line.
static DEFAULT: OnceLock<Context> = OnceLock::new();

/// Non-validating lexer and parser for MySQL and MariaDB queries.
#[derive(ClapParser)]
#[command(name = "sqlscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dialect, e.g. MySql80000 or MariaDb100600. Unregistered versions
    /// resolve to the closest older one.
    #[arg(short, long, env = "SQLSCAN_CONTEXT", default_value = DEFAULT_CONTEXT)]
    context: String,

    /// Comma separated SQL modes, e.g. ANSI_QUOTES,IGNORE_SPACE.
    #[arg(short, long, env = "SQLSCAN_MODE", default_value = "")]
    mode: String,

    /// Fail on the first diagnostic.
    #[arg(short, long)]
    strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream.
    Lex {
        /// Query text (read from stdin if not specified).
        #[arg(short, long)]
        query: Option<String>,

        /// Initial statement delimiter.
        #[arg(short, long, default_value = ";")]
        delimiter: String,

        /// Omit whitespace and comment tokens.
        #[arg(long)]
        significant: bool,
    },

    /// Split the input into statements and summarize each one.
    Parse {
        /// Query text (read from stdin if not specified).
        #[arg(short, long)]
        query: Option<String>,

        /// Include the full parse tree of every statement.
        #[arg(long)]
        tree: bool,
    },

    /// Extract or replace one clause of a statement.
    Clause {
        /// Clause name, e.g. WHERE or "ORDER BY".
        name: String,

        /// Query text (read from stdin if not specified).
        #[arg(short, long)]
        query: Option<String>,

        /// Index of the statement to work on.
        #[arg(long, default_value_t = 0)]
        statement: usize,

        /// Return every clause before it.
        #[arg(long, conflicts_with_all = ["after", "between"])]
        before: bool,

        /// Return every clause after it.
        #[arg(long, conflicts_with = "between")]
        after: bool,

        /// Return every clause between it and this one.
        #[arg(long)]
        between: Option<String>,

        /// Leave out the clause keyword.
        #[arg(long)]
        skip_first: bool,

        /// Replace the clause (keyword included) with this text.
        #[arg(short, long, conflicts_with_all = ["before", "after", "between"])]
        replace: Option<String>,

        /// With --replace, only replace the keyword.
        #[arg(long, requires = "replace")]
        only_keyword: bool,
    },

    /// List registered dialects.
    Contexts {
        /// Show the dialect this name resolves to.
        #[arg(short, long)]
        resolve: Option<String>,
    },
}

#[derive(Serialize)]
struct LexOutput<'a> {
    context: &'a str,
    tokens: Vec<&'a Token>,
    diagnostics: Vec<Diagnostic<'a>>,
}

#[derive(Serialize)]
struct StatementSummary<'a> {
    keyword: &'static str,
    first: usize,
    last: usize,
    clauses: &'static [&'static str],
    build: String,
    flags: QueryFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<&'a Statement>,
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    context: &'a str,
    statements: Vec<StatementSummary<'a>>,
    diagnostics: Vec<Diagnostic<'a>>,
}

#[derive(Serialize)]
struct ContextEntry<'a> {
    name: &'a str,
    default: bool,
}

#[allow(clippy::too_many_lines)]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let context = DEFAULT.get_or_init(|| resolve_context(&cli.context, &cli.mode));
    if !context.name().eq_ignore_ascii_case(&cli.context) {
        info!(requested = %cli.context, using = context.name(), "dialect resolved");
    }

    match cli.command {
        Commands::Lex {
            query,
            delimiter,
            significant,
        } => {
            let sql = read_query(query)?;
            let lexed = Lexer::new(&sql, context)
                .with_delimiter(&delimiter)
                .strict(cli.strict)
                .tokenize()?;
            let output = LexOutput {
                context: context.name(),
                tokens: lexed
                    .list
                    .tokens()
                    .iter()
                    .filter(|t| !significant || t.is_significant())
                    .collect(),
                diagnostics: lexed.errors.iter().map(Diagnostic::Lex).collect(),
            };
            print_json(&output)?;
        }

        Commands::Parse { query, tree } => {
            let sql = read_query(query)?;
            let parsed = Parser::new(context).strict(cli.strict).parse(&sql)?;
            debug!(statements = parsed.statements.len(), "parsed");
            let output = ParseOutput {
                context: context.name(),
                statements: parsed
                    .statements
                    .iter()
                    .map(|stmt| StatementSummary {
                        keyword: stmt.keyword(),
                        first: stmt.first,
                        last: stmt.last,
                        clauses: stmt.clauses(),
                        build: stmt.to_string(),
                        flags: query::get_flags(stmt),
                        tree: tree.then_some(stmt),
                    })
                    .collect(),
                diagnostics: parsed.diagnostics().collect(),
            };
            print_json(&output)?;
        }

        Commands::Clause {
            name,
            query: text,
            statement,
            before,
            after,
            between,
            skip_first,
            replace,
            only_keyword,
        } => {
            let sql = read_query(text)?;
            let parsed = Parser::new(context).strict(cli.strict).parse(&sql)?;
            for diagnostic in parsed.diagnostics() {
                info!(
                    position = diagnostic.position(),
                    text = diagnostic.text(),
                    "{}",
                    diagnostic.message()
                );
            }
            let Some(stmt) = parsed.statements.get(statement) else {
                bail!(
                    "statement {statement} not found ({} parsed)",
                    parsed.statements.len()
                );
            };
            if stmt.clause_index(&name).is_none() {
                bail!("{} statements have no {name} clause", stmt.keyword());
            }

            let out = if let Some(replacement) = replace {
                query::replace_clause(stmt, &parsed.list, &name, &replacement, only_keyword)
            } else {
                let selector = match between.as_deref() {
                    Some(other) => ClauseSelector::Between(other),
                    None if before => ClauseSelector::Before,
                    None if after => ClauseSelector::After,
                    None => ClauseSelector::Exact,
                };
                query::get_clause(stmt, &parsed.list, &name, selector, skip_first)
            };
            println!("{out}");
        }

        Commands::Contexts { resolve } => {
            if let Some(name) = resolve {
                match Context::closest(&name) {
                    Some(found) => println!("{found}"),
                    None => bail!("no registered dialect matches {name}"),
                }
            } else {
                let entries: Vec<_> = REGISTERED
                    .iter()
                    .map(|name| ContextEntry {
                        name,
                        default: *name == context.name(),
                    })
                    .collect();
                print_json(&entries)?;
            }
        }
    }

    Ok(())
}

/// Loads the requested dialect, falling back to the closest registered
/// version and then to the default one.
fn resolve_context(name: &str, mode: &str) -> Context {
    let context = Context::load(name)
        .ok()
        .or_else(|| Context::load_closest(name))
        .unwrap_or_else(|| {
            info!(requested = name, using = DEFAULT_CONTEXT, "unknown dialect");
            Context::default()
        });
    context.with_mode(SqlMode::parse(mode))
}

fn read_query(query: Option<String>) -> anyhow::Result<String> {
    if let Some(query) = query {
        return Ok(query);
    }
    let mut sql = String::new();
    std::io::stdin()
        .read_to_string(&mut sql)
        .context("failed to read the query from stdin")?;
    Ok(sql)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
