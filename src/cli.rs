use clap::Parser;

/// Gmail caps a single search page at 500 results.
pub const MAX_COUNT: u32 = 500;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "listmail",
    version,
    about = "List Gmail messages matching a query and label, then mark them read"
)]
pub struct Cli {
    #[arg(allow_hyphen_values = true, help = "Gmail search query, e.g. is:unread or -in:spam")]
    pub query: String,
    #[arg(help = "Label name (or id) to filter by")]
    pub tag: String,
    #[arg(
        value_parser = clap::value_parser!(u32).range(1..=(MAX_COUNT as i64)),
        help = "Maximum messages to return"
    )]
    pub count: u32,
}
