use std::{io::BufRead, path::PathBuf, process::ExitCode};

use clap::Parser as _;
use query_expr::{
    FieldMap,
    config::Config,
    parser::Parser,
    query::Query,
    to_sql::Printer,
    translate::Dialect,
};
use serde_json::json;

/// Compiles tagged-array query records to SQL.
///
/// A record looks like `{"where": ["=", ["field", 2], "cam"], "limit": 10}`.
#[derive(clap::Parser, Debug)]
#[command(name = "query_expr", version, about)]
struct Cli {
    /// JSON config file with the field map, table name and depth limit
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render a single dialect (MySQL, PostgreSQL, SQLServer); all by default
    #[arg(long)]
    dialect: Option<Dialect>,

    /// Print the sample queries
    #[arg(long)]
    demo: bool,

    /// Query record; read one per line from stdin when omitted
    query: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every query compiled.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    if cli.demo {
        demo();
        return Ok(true);
    }

    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config {
            fields: sample_fields(),
            ..Config::default()
        },
    };
    let dialects = match cli.dialect.or(config.dialect) {
        Some(dialect) => vec![dialect],
        None => Dialect::ALL.to_vec(),
    };

    if let Some(query) = &cli.query {
        return Ok(compile(query, &config, &dialects));
    }

    let mut all_ok = true;
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        all_ok &= compile(&line, &config, &dialects);
    }
    Ok(all_ok)
}

fn compile(input: &str, config: &Config, dialects: &[Dialect]) -> bool {
    let raw = match serde_json::from_str(input) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error reading query: {e}\n:{input}");
            return false;
        }
    };
    let parser = Parser::new(&config.fields, config.parser_config());
    let query = match Query::parse_with(&raw, &parser) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("Error building query: {e}\n:{input}");
            return false;
        }
    };

    for &dialect in dialects {
        let sql = Printer::new(&query, config.printer_config(dialect));
        if dialects.len() == 1 {
            println!("{sql}");
        } else {
            println!("{dialect}: {sql}");
        }
    }
    true
}

fn sample_fields() -> FieldMap {
    [(1, "id"), (2, "name"), (3, "date_joined"), (4, "age")]
        .into_iter()
        .collect()
}

fn demo() {
    let fields = sample_fields();
    let samples = [
        (
            Dialect::SqlServer,
            json!({"where": ["=", ["field", 2], "cam"], "limit": 10}),
        ),
        (
            Dialect::MySql,
            json!({"where": ["=", ["field", 4], 25, 26, 27], "limit": 10}),
        ),
        (
            Dialect::MySql,
            json!({"where": ["and", ["or", ["is-empty", null], ["not-empty", ["field", 3]]], ["=", ["field", 2], "cam"]]}),
        ),
    ];

    for (dialect, raw) in samples {
        println!("\n{dialect} {raw}");
        match Query::parse(&raw, &fields) {
            Ok(query) => println!("=> {}", query.to_sql(dialect)),
            Err(e) => eprintln!("Error building query: {e}"),
        }
    }
}
