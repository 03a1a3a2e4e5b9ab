// Primitives for reading CSV ballot files.

use std::fs::File;
use std::io;

use log::debug;
use snafu::{OptionExt, ResultExt};

use crate::tabulate::{CsvCellSnafu, CsvRecordSnafu, OpeningInputSnafu, TallyResult};
use crate::tabulate::io_json::ElectionFile;

/// Reads one ballot per row of numeric ranks. The file carries no
/// candidate names; the registry comes from the --candidates flag.
pub fn read_csv_election(path: &str) -> TallyResult<ElectionFile> {
    let f = File::open(path).context(OpeningInputSnafu { path })?;
    let ballots = parse_csv_ballots(f)?;
    Ok(ElectionFile {
        name: None,
        candidates: Vec::new(),
        ballots,
    })
}

fn parse_csv_ballots<R: io::Read>(reader: R) -> TallyResult<Vec<Vec<u32>>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut res: Vec<Vec<u32>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvRecordSnafu {})?;
        debug!("parse_csv_ballots: lineno: {:?} row: {:?}", lineno, line);
        let mut rankings: Vec<u32> = Vec::new();
        for cell in line.iter() {
            let rank = cell.trim().parse::<u32>().ok().context(CsvCellSnafu {
                lineno,
                cell: cell.to_string(),
            })?;
            rankings.push(rank);
        }
        res.push(rankings);
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rank_rows() {
        let raw = "1,4,3,2\n2,4,1,3\n";
        let ballots = parse_csv_ballots(raw.as_bytes()).unwrap();
        assert_eq!(ballots, vec![vec![1, 4, 3, 2], vec![2, 4, 1, 3]]);
    }

    #[test]
    fn rejects_non_numeric_cells() {
        let raw = "1,2\nChan,2\n";
        let err = parse_csv_ballots(raw.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Line 2"), "{}", err);
    }
}
