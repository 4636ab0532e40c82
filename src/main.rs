use clap::{App, Arg};
use std::path::PathBuf;
use std::process;
use tracing::error;

use rainjoin::{logging, pipeline, Config, OnMalformed};

fn main() {
    let defaults = Config::default();

    let matches = App::new("rainjoin")
        .version("0.1")
        .author("Abraham Toriz <categulario@gmail.com>")
        .about("Joins monthly dengue cases with monthly rainfall per state into one CSV report")
        .arg(
            Arg::with_name("cases")
                .long("cases")
                .value_name("CASES")
                .help("Pipe delimited case reports, first line is a header [default: casos_dengue.txt]"),
        )
        .arg(
            Arg::with_name("rainfall")
                .long("rainfall")
                .value_name("RAINFALL")
                .help("Comma delimited rainfall readings (date,mm,state) [default: chuvas.csv]"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("OUTPUT")
                .help("Output filename [default: resultado.csv]"),
        )
        .arg(
            Arg::with_name("cases-encoding")
                .long("cases-encoding")
                .value_name("LABEL")
                .help("Text encoding of the case reports, e.g. iso-8859-1 [default: utf-8]"),
        )
        .arg(
            Arg::with_name("rainfall-encoding")
                .long("rainfall-encoding")
                .value_name("LABEL")
                .help("Text encoding of the rainfall readings [default: utf-8]"),
        )
        .arg(
            Arg::with_name("skip-malformed")
                .long("skip-malformed")
                .help("Drop rows with unreadable numbers instead of failing"),
        )
        .arg(
            Arg::with_name("inspect")
                .long("inspect")
                .help("Log every aggregated total"),
        )
        .get_matches();

    let inspect = matches.is_present("inspect");

    logging::init(inspect);

    let config = Config {
        cases_path: matches
            .value_of("cases")
            .map(PathBuf::from)
            .unwrap_or(defaults.cases_path),
        rainfall_path: matches
            .value_of("rainfall")
            .map(PathBuf::from)
            .unwrap_or(defaults.rainfall_path),
        output_path: matches
            .value_of("output")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_path),
        cases_encoding: matches
            .value_of("cases-encoding")
            .map(str::to_string)
            .unwrap_or(defaults.cases_encoding),
        rainfall_encoding: matches
            .value_of("rainfall-encoding")
            .map(str::to_string)
            .unwrap_or(defaults.rainfall_encoding),
        on_malformed: if matches.is_present("skip-malformed") {
            OnMalformed::Skip
        } else {
            OnMalformed::Abort
        },
        inspect,
        ..defaults
    };

    if let Err(e) = pipeline::run(&config) {
        error!("failed: {}", e);
        process::exit(1);
    }
}
