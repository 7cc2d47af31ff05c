use anyhow::Result;
use clap::{Args, Parser};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitlines")]
#[command(about = "Count lines added and removed per author in a git repository")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[clap(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Start date (defaults to the first commit)")]
    pub start_date: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "End date (defaults to today)")]
    pub end_date: Option<String>,

    #[arg(long, help = "Filter by author")]
    pub author: Option<String>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct OutputArgs {
    #[arg(long, help = "Output as JSON", conflicts_with = "ndjson")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON, one author per line")]
    pub ndjson: bool,

    #[arg(long, help = "Include every analyzed commit in the report")]
    pub commits: bool,

    #[arg(long, help = "Disable the progress bar")]
    pub no_progress: bool,
}

impl OutputArgs {
    pub fn machine_readable(&self) -> bool {
        self.json || self.ndjson
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::stats::exec(self.common, self.output)
    }
}
