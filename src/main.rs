use clap::{Parser as ClapParser, Subcommand};
use mongosql::cli::{self, CheckOptions, CliError};
use std::io::{self, Read};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(ClapParser)]
#[command(name = "mongosql")]
#[command(about = "MongoSQL - compile SQL-like queries into document-store queries")]
#[command(version)]
struct Cli {
    /// Log parser and lowering activity to stderr
    #[arg(long, global = true, env = "MONGOSQL_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query and print the resulting document
    Check {
        /// The query to compile (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't translate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the token stream of a query
    Tokens {
        /// The query to tokenize (reads from stdin if not provided)
        query: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'mongosql docs' to list categories)
        category: String,
    },
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("mongosql=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let result = match cli.command {
        Commands::Check {
            query,
            pretty,
            syntax_only,
        } => run_check(query, pretty, syntax_only),
        Commands::Tokens { query } => run_tokens(query),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Use the argument if given, else read a piped stdin.
fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(query: Option<String>, pretty: bool, syntax_only: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        query: read_query(query)?,
        pretty,
        syntax_only,
    };

    let result = cli::execute_check(&options)?;
    println!("{}", result.render(options.pretty));
    Ok(())
}

fn run_tokens(query: Option<String>) -> Result<(), CliError> {
    let query = read_query(query)?;
    for token in cli::list_tokens(&query)? {
        println!("{:>4}  {}", token.line, token.kind);
    }
    Ok(())
}
