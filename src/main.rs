use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use sql_odata::cli::{self, CliError, OutputFormat, ParseOptions, RequestOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "sqlo")]
#[command(about = "sqlo - Translate SQL statements into OData v4 Web API requests")]
#[command(version)]
struct Cli {
    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Http,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Http => OutputFormat::Http,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a statement and print the structured query
    Parse {
        /// The SQL statement (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Reject mismatched INSERT lists and UPDATE/DELETE without WHERE
        #[arg(long)]
        strict: bool,
    },

    /// Build the OData request for a statement
    Request {
        /// The SQL statement (reads from stdin if not provided)
        query: Option<String>,

        /// Service root, e.g. https://org.crm.dynamics.com
        #[arg(short, long, env = "SQLO_BASE_URL", default_value = "")]
        base_url: String,

        /// Web API version
        #[arg(long, env = "SQLO_API_VERSION")]
        api_version: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Percent-encode query option values
        #[arg(long)]
        encoded: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Reject mismatched INSERT lists and UPDATE/DELETE without WHERE
        #[arg(long)]
        strict: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'sqlo docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Parse {
            query,
            pretty,
            strict,
        } => read_query(query).and_then(|query| {
            cli::execute_parse(&ParseOptions {
                query,
                pretty,
                strict,
            })
        }),
        Commands::Request {
            query,
            base_url,
            api_version,
            format,
            encoded,
            pretty,
            strict,
        } => read_query(query).and_then(|query| {
            cli::execute_request(&RequestOptions {
                query,
                base_url,
                api_version,
                format: format.into(),
                encoded,
                pretty,
                strict,
            })
        }),
        Commands::Docs => Ok(cli::get_docs_overview().to_string()),
        Commands::Doc { category } => cli::get_doc_category(&category).map(str::to_string),
    };

    match result {
        Ok(output) => print!("{}", with_newline(output)),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            if buffer.trim().is_empty() {
                Err(CliError::NoInput)
            } else {
                Ok(buffer)
            }
        }
        None => Err(CliError::NoInput),
    }
}

fn with_newline(mut output: String) -> String {
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}
