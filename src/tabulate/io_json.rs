// Reader for the JSON election description format.

use std::fs;

use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use instant_runoff::Ballot;

use crate::tabulate::{OpeningInputSnafu, ParsingJsonSnafu, TallyResult};

/// An election description file: the candidate registry plus one ranking
/// per ballot, as 1-based candidate identifiers.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionFile {
    pub name: Option<String>,
    #[serde(default)]
    pub candidates: Vec<String>,
    pub ballots: Vec<Vec<u32>>,
}

impl ElectionFile {
    pub fn to_ballots(&self) -> Vec<Ballot> {
        self.ballots.iter().map(|r| Ballot::new(r)).collect()
    }
}

pub fn read_json_election(path: &str) -> TallyResult<ElectionFile> {
    let contents = fs::read_to_string(path).context(OpeningInputSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}
