use log::{info, warn};

use instant_runoff::{tabulate, TabulationError, TabulationResult};
use snafu::{prelude::*, Snafu};

use std::fs;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod io_csv;
pub mod io_json;

use crate::tabulate::io_json::ElectionFile;

#[derive(Debug, Snafu)]
pub enum TallyError {
    #[snafu(display("Error opening input file {path}"))]
    OpeningInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON in {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error reading CSV record"))]
    CsvRecord { source: csv::Error },
    #[snafu(display("Line {lineno}: cell {cell:?} is not a rank number"))]
    CsvCell { lineno: usize, cell: String },
    #[snafu(display("Input type {input_type:?} is not supported"))]
    UnknownInputType { input_type: String },
    #[snafu(display("The input provides no candidate names; pass them with --candidates"))]
    MissingCandidates {},
    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Tabulation failed: {source}"))]
    Tabulation { source: TabulationError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TallyResult<T> = Result<T, TallyError>;

fn result_stats_to_json(res: &TabulationResult) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for round_stat in res.round_stats.iter() {
        let mut tally: JSMap<String, JSValue> = JSMap::new();
        for (name, count) in round_stat.tally.iter() {
            tally.insert(name.clone(), json!(count.to_string()));
        }
        let mut js = JSMap::new();
        js.insert("round".to_string(), json!(round_stat.round));
        js.insert("tally".to_string(), JSValue::Object(tally));
        if let Some(name) = &round_stat.eliminated {
            js.insert("eliminated".to_string(), json!(name));
        }
        l.push(JSValue::Object(js));
    }
    l
}

fn build_summary_js(election: &ElectionFile, res: &TabulationResult) -> JSValue {
    json!({
        "config": {
            "contest": election.name,
            "threshold": res.threshold.to_string(),
        },
        "winner": {
            "name": res.winner.name,
            "votes": res.winner.votes,
        },
        "results": result_stats_to_json(res),
    })
}

fn read_summary(path: &str) -> TallyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningInputSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

fn read_election(args: &Args) -> TallyResult<ElectionFile> {
    let input_type = args.input_type.clone().unwrap_or_else(|| "json".to_string());
    let mut election = match input_type.as_str() {
        "json" => io_json::read_json_election(&args.input),
        "csv" => io_csv::read_csv_election(&args.input),
        _ => UnknownInputTypeSnafu { input_type }.fail(),
    }?;
    if let Some(cands) = &args.candidates {
        election.candidates = cands.clone();
    }
    if election.candidates.is_empty() {
        return MissingCandidatesSnafu {}.fail();
    }
    Ok(election)
}

pub fn run_election(args: &Args) -> TallyResult<()> {
    let election = read_election(args)?;
    info!(
        "run_election: {:?} ballots over {:?} candidates",
        election.ballots.len(),
        election.candidates.len()
    );

    let ballots = election.to_ballots();
    let res = tabulate(&ballots, &election.candidates).context(TabulationSnafu {})?;
    println!(
        "winner: {} with {} votes in round {}",
        res.winner.name,
        res.winner.votes,
        res.round_stats.len()
    );

    let summary_js = build_summary_js(&election, &res);
    let pretty_js_stats =
        serde_json::to_string_pretty(&summary_js).whatever_context("serializing the summary")?;

    match args.out.as_deref() {
        None => {}
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            fs::write(path, &pretty_js_stats).context(WritingSummarySnafu { path })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref = serde_json::to_string_pretty(&summary_ref)
            .whatever_context("serializing the reference summary")?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary");
        }
    }

    Ok(())
}
