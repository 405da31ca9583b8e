//! Madvoc Route - route definition inspector
//!
//! # Usage
//!
//! ```bash
//! madvoc-route routes routes.txt
//! madvoc-route match '/user/${id:\d+}/${name}' /user/42/ana /user/x/ana
//! madvoc-route rewrite '/user/${id:\d+}' ':$1($2)' ':$1'
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use madvoc_route::{
    error::Result, routes, MacroCompiler, MacroDelimiters, ParserConfig, PatternDialect,
    RouteConfigurator,
};
use tracing::Level;

/// Route definition parser and path macro matcher
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a route definition file and print its routes
    Routes {
        /// Path to the route definition file
        #[arg(value_name = "ROUTES_FILE")]
        file: PathBuf,

        /// Print routes as JSON
        #[arg(long)]
        json: bool,

        /// Fail on '@' lines that are not variable bindings
        #[arg(long)]
        strict: bool,
    },

    /// Match paths against a template and print extracted parameters
    Match {
        /// Path template, e.g. '/user/${id:\d+}'
        template: String,

        /// Paths to test
        #[arg(required = true)]
        paths: Vec<String>,

        /// Notation of the macro patterns
        #[arg(short, long, value_enum, default_value_t = DialectArg::Regex)]
        dialect: DialectArg,

        #[command(flatten)]
        delimiters: DelimiterArgs,
    },

    /// Rewrite the macros of a template
    Rewrite {
        /// Path template
        template: String,

        /// Replacement for macros with a pattern ($1 = name, $2 = pattern)
        complete: String,

        /// Replacement for macros without a pattern ($1 = name)
        single: String,

        #[command(flatten)]
        delimiters: DelimiterArgs,
    },
}

#[derive(clap::Args, Debug)]
struct DelimiterArgs {
    /// Macro delimiters: prefix, splitter and suffix
    #[arg(long, num_args = 3, value_names = ["PREFIX", "SPLITTER", "SUFFIX"])]
    delimiters: Option<Vec<String>>,
}

impl DelimiterArgs {
    fn resolve(self) -> Result<MacroDelimiters> {
        match self.delimiters.as_deref() {
            Some([prefix, splitter, suffix]) => MacroDelimiters::new(prefix, splitter, suffix),
            _ => Ok(MacroDelimiters::default()),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DialectArg {
    Regex,
    Wildcard,
    Glob,
}

impl From<DialectArg> for PatternDialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Regex => PatternDialect::Regex,
            DialectArg::Wildcard => PatternDialect::Wildcard,
            DialectArg::Glob => PatternDialect::ShellGlob,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Routes { file, json, strict } => {
            let config = ParserConfig::new().with_strict_bindings(strict);
            let mut configurator = RouteConfigurator::with_config(config);
            configurator.load_file(&file)?;

            let parsed = configurator.routes().unwrap_or_default();
            if json {
                println!("{}", routes::to_json(parsed)?);
            } else {
                for route in parsed {
                    println!("{}", route);
                }
            }
        }

        Command::Match {
            template,
            paths,
            dialect,
            delimiters,
        } => {
            let compiler =
                MacroCompiler::with_options(&template, dialect.into(), delimiters.resolve()?)?;
            let mut all_matched = true;

            for path in &paths {
                match compiler.extract_params(path) {
                    Some(params) => {
                        let rendered: Vec<String> = compiler
                            .macros()
                            .iter()
                            .filter_map(|m| params.get(&m.name).map(|v| format!("{}={}", m.name, v)))
                            .collect();
                        println!("{} {}", path, rendered.join(" "));
                    }
                    None => {
                        all_matched = false;
                        println!("{} no match", path);
                    }
                }
            }

            if !all_matched {
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Rewrite {
            template,
            complete,
            single,
            delimiters,
        } => {
            let compiler = MacroCompiler::with_delimiters(&template, delimiters.resolve()?)?;
            println!("{}", compiler.replace_macros(&complete, &single));
        }
    }

    Ok(ExitCode::SUCCESS)
}
