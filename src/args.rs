use clap::Parser;

/// This is a ranked voting tabulation program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the election data. See the documentation for the
    /// supported formats.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (default json) The type of the input: 'json' or 'csv'.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (list of comma-separated names) The candidate registry, in identifier order. Required
    /// for CSV inputs, which carry no candidate names. For JSON inputs this overrides the
    /// names found in the file.
    #[clap(long, value_parser, use_value_delimiter = true)]
    pub candidates: Option<Vec<String>>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be
    /// written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the summary of an election in JSON format.
    /// If provided, irvtally will check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
