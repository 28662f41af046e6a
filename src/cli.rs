use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about = "Mock AI price predictions for a handful of tickers", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the prediction API (default).
    Serve,

    /// Show every asset card, predicting for the given date.
    Dashboard(DashboardArgs),

    /// Single-ticker view: recent history, or predictions for a date or range.
    Range(RangeArgs),
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Prediction date, YYYY-MM-DD. Without it only prices are shown.
    #[arg(short, long)]
    pub date: Option<String>,

    /// Base URL of the prediction API.
    #[arg(long)]
    pub api: Option<String>,
}

#[derive(Args, Debug)]
pub struct RangeArgs {
    /// Asset id or symbol, e.g. `btc` or `BTC-USD`.
    #[arg(short, long, default_value = "TSLA")]
    pub ticker: String,

    /// Predict a single date.
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    pub date: Option<String>,

    #[arg(long, requires = "end")]
    pub start: Option<String>,

    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Base URL of the prediction API.
    #[arg(long)]
    pub api: Option<String>,
}
