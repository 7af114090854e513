//! Command line front end for the reorder engine
//!
//! Parses arguments into a sort specification, runs the engine once on the
//! given file and prints the output path. Warnings always go to stderr;
//! verbose mode adds progress events.

use std::path::PathBuf;
use std::process;

use clap::{Arg, Command};

// Import from the library modules
use csv_reorder::{
    config::{SortColumn, SortSpec, SortSpecBuilder},
    diag::{Severity, StderrSink},
    engine::Reorderer,
    error::ReorderResult,
    EXIT_SUCCESS,
};

fn main() {
    let result = run();
    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("csv-reorder: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn run() -> ReorderResult<i32> {
    let matches = build_cli().get_matches();

    let spec = parse_spec_from_matches(&matches)?;

    let input: PathBuf = matches
        .get_one::<String>("file")
        .map(PathBuf::from)
        .unwrap_or_default();
    let output_dir: PathBuf = matches
        .get_one::<String>("output-dir")
        .map(PathBuf::from)
        .unwrap_or_default();

    let min_severity = if matches.get_flag("verbose") {
        Severity::Info
    } else {
        Severity::Warn
    };

    let engine = Reorderer::with_sink(spec, Box::new(StderrSink::new(min_severity)));
    let output = engine.reorder(&input, &output_dir)?;
    println!("{}", output.display());
    Ok(EXIT_SUCCESS)
}

fn build_cli() -> Command {
    Command::new("csv-reorder")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("csv-reorder [OPTION]... -k COLUMN[:date] <FILE>")
        .about("Reorder rows of a delimited text file by one or more columns")
        .long_about(
            "Reorder rows of a delimited text file by one or more columns.\n\n\
             The field delimiter is detected from the file (comma, semicolon, \
             tab or pipe) and preserved in the output. Columns marked :date are \
             compared as dates in a range of common formats; values that do not \
             parse fall back to text ordering after all dates, with a warning.",
        )
        // Input file
        .arg(
            Arg::new("file")
                .help("Delimited text file to reorder")
                .value_name("FILE")
                .required(true),
        )
        // Key columns
        .arg(
            Arg::new("key")
                .short('k')
                .long("key")
                .help("Sort by COLUMN; append ':date' to compare as dates")
                .long_help(
                    "Sort by COLUMN, most significant first; repeat for a \
                     composite key. Append ':date' to compare the column as \
                     dates instead of case-insensitive text.\n\nExamples:\n  \
                     -k year:date -k title\n  -k 'release date:date'",
                )
                .value_name("COLUMN[:date]")
                .action(clap::ArgAction::Append)
                .required(true),
        )
        // Sort modifiers
        .arg(
            Arg::new("reverse")
                .short('r')
                .long("reverse")
                .help("Reverse the fully sorted order, ties included")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("categorical")
                .short('c')
                .long("categorical")
                .help("Rank rows by this column ahead of the key columns")
                .value_name("COLUMN"),
        )
        .arg(
            Arg::new("categorical-order")
                .long("categorical-order")
                .help("Priority order for the categorical column (default: EN,CN)")
                .long_help(
                    "Comma separated priority order for the categorical \
                     column. Rows whose value is not listed rank after every \
                     listed value. Defaults to EN,CN.",
                )
                .value_name("LIST")
                .requires("categorical"),
        )
        // Output options
        .arg(
            Arg::new("output-dir")
                .short('d')
                .long("output-dir")
                .help("Directory for the output file (created if missing)")
                .value_name("DIR")
                .default_value("."),
        )
        .arg(
            Arg::new("prefix")
                .short('p')
                .long("prefix")
                .help("Prefix for the output file name")
                .value_name("PREFIX"),
        )
        .arg(
            Arg::new("encoding")
                .short('e')
                .long("encoding")
                .help("Text encoding for reading and writing (default: utf-8)")
                .value_name("LABEL"),
        )
        // Diagnostics
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Report progress events to stderr")
                .action(clap::ArgAction::SetTrue),
        )
}

/// Parse a sort specification from command line matches
fn parse_spec_from_matches(matches: &clap::ArgMatches) -> ReorderResult<SortSpec> {
    let mut builder = SortSpecBuilder::new();

    if let Some(keydefs) = matches.get_many::<String>("key") {
        for keydef in keydefs {
            builder = builder.key(SortColumn::parse(keydef)?);
        }
    }

    if matches.get_flag("reverse") {
        builder = builder.reverse();
    }

    if let Some(column) = matches.get_one::<String>("categorical") {
        builder = builder.categorical_column(column);
    }
    if let Some(order) = matches.get_one::<String>("categorical-order") {
        let values = order
            .split(',')
            .map(|value| value.trim().to_string())
            .collect();
        builder = builder.categorical_order(values);
    }

    if let Some(prefix) = matches.get_one::<String>("prefix") {
        builder = builder.output_prefix(prefix);
    }
    if let Some(label) = matches.get_one::<String>("encoding") {
        builder = builder.encoding(label);
    }

    builder.build()
}
