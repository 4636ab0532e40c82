//! The report as an explicit sequence of stages.
//!
//! Case rows and rainfall rows are reduced independently, the two sets of
//! totals are joined on their key, and each joined key becomes an
//! [OutputRow]. [run] adds the file handling around [process].
use tracing::{info, warn};

use crate::flush::Flush;
use crate::{
    encoding_for, join, CaseAggregator, Config, OutputRow, RainfallAggregator, ReaderSource,
    Result, RowResult, Totals,
};

/// The joined report before it is written anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub rows: Vec<OutputRow>,
    pub summary: Summary,
}

/// Counts describing one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub case_keys: usize,
    pub rainfall_keys: usize,
    pub joined: usize,
    pub skipped: usize,
}

fn case_aggregator(config: &Config) -> CaseAggregator {
    CaseAggregator::new(config.on_malformed).inspect(config.inspect)
}

fn rainfall_aggregator(config: &Config) -> RainfallAggregator {
    RainfallAggregator::new(config.on_malformed).inspect(config.inspect)
}

/// Joins already aggregated totals into report rows, ordered by key.
pub fn assemble(cases: Totals, rainfall: Totals) -> Report {
    let rows: Vec<OutputRow> = join(&rainfall, &cases)
        .iter()
        .filter_map(|(key, joined)| OutputRow::from_joined(key, joined))
        .collect();

    let summary = Summary {
        case_keys: cases.len(),
        rainfall_keys: rainfall.len(),
        joined: rows.len(),
        skipped: cases.skipped() + rainfall.skipped(),
    };

    Report { rows, summary }
}

/// Runs every stage over rows that were already read.
pub fn process<C, R>(cases: C, rainfall: R, config: &Config) -> Result<Report>
where
    C: IntoIterator<Item = RowResult>,
    R: IntoIterator<Item = RowResult>,
{
    let cases = case_aggregator(config).aggregate(cases)?;
    let rainfall = rainfall_aggregator(config).aggregate(rainfall)?;

    Ok(assemble(cases, rainfall))
}

fn aggregate_cases(config: &Config) -> Result<Totals> {
    let encoding = encoding_for(&config.cases_encoding)?;
    let source = ReaderSource::from_path(&config.cases_path, config.cases_delimiter, encoding)?;

    info!(source = source.name(), "reading case reports");

    case_aggregator(config).aggregate(source)
}

fn aggregate_rainfall(config: &Config) -> Result<Totals> {
    let encoding = encoding_for(&config.rainfall_encoding)?;
    let source =
        ReaderSource::from_path(&config.rainfall_path, config.rainfall_delimiter, encoding)?;

    info!(source = source.name(), "reading rainfall");

    rainfall_aggregator(config).aggregate(source)
}

/// Reads both datasets, aggregating them in parallel, and writes the report
/// to `config.output_path`.
pub fn run(config: &Config) -> Result<Summary> {
    let (cases, rainfall) = rayon::join(|| aggregate_cases(config), || aggregate_rainfall(config));
    let (cases, rainfall) = (cases?, rainfall?);

    info!(
        case_keys = cases.len(),
        rainfall_keys = rainfall.len(),
        "aggregated both datasets"
    );

    if cases.is_empty() {
        warn!(source = %config.cases_path.display(), "no case reports aggregated");
    }

    if rainfall.is_empty() {
        warn!(source = %config.rainfall_path.display(), "no rainfall aggregated");
    }

    let report = assemble(cases, rainfall);
    let mut flush = Flush::to_path(&config.output_path, config.output_delimiter)?;

    for row in report.rows.iter() {
        flush.write(row)?;
    }

    let written = flush.finish()?;

    info!(
        rows = written,
        skipped = report.summary.skipped,
        output = %config.output_path.display(),
        "report written"
    );

    Ok(report.summary)
}

#[cfg(test)]
mod tests {
    use super::{process, run, Summary};
    use crate::{split_line, Config, Error, OnMalformed, ReaderSource, RowResult};
    use encoding::all::UTF_8;
    use std::fs;
    use std::path::PathBuf;

    fn rows(lines: &[&str], delimiter: char) -> Vec<RowResult> {
        lines.iter().map(|l| Ok(split_line(l, delimiter))).collect()
    }

    fn lines(report: &super::Report) -> Vec<String> {
        report.rows.iter().map(|r| r.to_line(';')).collect()
    }

    #[test]
    fn test_process_joins_cases_and_rainfall() {
        let cases = rows(
            &[
                "1|2015-01-05|3|2304400|Fortaleza|CE|60000-000|-3.7|-38.5",
                "2|2015-01-20|abc|2304400|Fortaleza|CE|60000-000|-3.7|-38.5",
            ],
            '|',
        );
        let rainfall = rows(&["2015-01-05,10.0,CE", "2015-01-20,-5.0,CE"], ',');

        let report = process(cases, rainfall, &Config::default()).unwrap();

        assert_eq!(lines(&report), vec!["CE;2015;01;10.0;3.0"]);
    }

    #[test]
    fn test_process_drops_one_sided_keys() {
        let cases = rows(&["1|2015-01-05|3|1|a|CE", "2|2015-03-05|8|1|a|PA"], '|');
        let rainfall = rows(
            &["2015-01-05,10.0,CE", "2015-02-05,1.0,CE", "2015-01-05,4.0,RJ"],
            ',',
        );

        let report = process(cases, rainfall, &Config::default()).unwrap();

        assert_eq!(lines(&report), vec!["CE;2015;01;10.0;3.0"]);
        assert_eq!(
            report.summary,
            Summary {
                case_keys: 2,
                rainfall_keys: 3,
                joined: 1,
                skipped: 0,
            }
        );
    }

    #[test]
    fn test_process_orders_by_key() {
        let cases = rows(
            &["1|2015-02-05|1|1|a|PA", "1|2015-01-05|2|1|a|PA", "1|2015-01-05|3|1|a|CE"],
            '|',
        );
        let rainfall = rows(
            &["2015-02-05,1.0,PA", "2015-01-05,2.0,PA", "2015-01-05,3.0,CE"],
            ',',
        );

        let report = process(cases, rainfall, &Config::default()).unwrap();

        assert_eq!(
            lines(&report),
            vec!["CE;2015;01;3.0;3.0", "PA;2015;01;2.0;2.0", "PA;2015;02;1.0;1.0"]
        );
    }

    #[test]
    fn test_process_aborts_on_bad_rainfall() {
        let cases = rows(&["1|2015-01-05|3|1|a|CE"], '|');
        let rainfall = rows(&["2015-01-05,lots,CE"], ',');

        match process(cases, rainfall, &Config::default()) {
            Err(Error::InvalidNumber { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_process_skips_bad_rainfall() {
        let cases = rows(&["1|2015-01-05|3|1|a|CE"], '|');
        let rainfall = rows(&["2015-01-05,lots,CE", "2015-01-06,2.5,CE"], ',');
        let config = Config {
            on_malformed: OnMalformed::Skip,
            ..Default::default()
        };

        let report = process(cases, rainfall, &config).unwrap();

        assert_eq!(lines(&report), vec!["CE;2015;01;2.5;3.0"]);
        assert_eq!(report.summary.skipped, 1);
    }

    #[test]
    fn test_blank_rainfall_line_aborts() {
        let cases = rows(&["1|2015-01-05|3|1|a|CE"], '|');
        let data = "data,mm,uf\n2015-01-05,10.0,CE\n\n2015-01-06,1.0,CE\n";
        let rainfall = ReaderSource::from_reader(data.as_bytes(), "mem", b',', UTF_8);

        match process(cases, rainfall, &Config::default()) {
            Err(Error::FieldCount {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_blank_rainfall_line_skipped() {
        let cases = rows(&["1|2015-01-05|3|1|a|CE"], '|');
        let data = "data,mm,uf\n2015-01-05,10.0,CE\n\n2015-01-06,1.0,CE\n";
        let rainfall = ReaderSource::from_reader(data.as_bytes(), "mem", b',', UTF_8);
        let config = Config {
            on_malformed: OnMalformed::Skip,
            ..Default::default()
        };

        let report = process(cases, rainfall, &config).unwrap();

        assert_eq!(lines(&report), vec!["CE;2015;01;11.0;3.0"]);
        assert_eq!(report.summary.skipped, 1);
    }

    #[test]
    fn test_run_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("resultado.csv");
        let config = Config {
            cases_path: PathBuf::from("test/assets/casos_dengue.txt"),
            rainfall_path: PathBuf::from("test/assets/chuvas.csv"),
            output_path: output.clone(),
            cases_encoding: "iso-8859-1".to_string(),
            ..Default::default()
        };

        let summary = run(&config).unwrap();

        assert_eq!(
            summary,
            Summary {
                case_keys: 3,
                rainfall_keys: 3,
                joined: 2,
                skipped: 0,
            }
        );
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "UF;ANO;MES;CHUVA;DENGUE\nCE;2015;01;10.0;3.0\nPA;2015;09;252.2;175.0\n"
        );
    }

    #[test]
    fn test_run_header_only_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let cases = dir.path().join("casos.txt");
        let rainfall = dir.path().join("chuvas.csv");
        let output = dir.path().join("resultado.csv");

        fs::write(&cases, "id|data_iniSE|casos|ibge_code|cidade|uf\n").unwrap();
        fs::write(&rainfall, "data,mm,uf\n").unwrap();

        let config = Config {
            cases_path: cases,
            rainfall_path: rainfall,
            output_path: output.clone(),
            ..Default::default()
        };

        assert_eq!(run(&config).unwrap(), Summary::default());
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "UF;ANO;MES;CHUVA;DENGUE\n"
        );
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            cases_path: PathBuf::from("test/assets/nope.txt"),
            rainfall_path: PathBuf::from("test/assets/chuvas.csv"),
            output_path: dir.path().join("resultado.csv"),
            ..Default::default()
        };

        match run(&config) {
            Err(Error::Io(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
