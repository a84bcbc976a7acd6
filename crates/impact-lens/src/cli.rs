use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "impact-lens",
    version,
    about = "Inspect change-impact reports",
    after_help = r#"Examples:
  impact-lens diff --original Old.java --modified New.java
  impact-lens report --payload report.json --text
  impact-lens analyze --payload analyze.json --repos repositories.json --text
  impact-lens layout --payload report.json --width 1200 --height 800
  impact-lens layout --payload report.json --actions drag.json --live
"#
)]
pub struct Args {
    /// Config file to use instead of the default lookup.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Line diff of two text files.
    Diff {
        #[arg(long, value_name = "FILE")]
        original: PathBuf,
        #[arg(long, value_name = "FILE")]
        modified: PathBuf,
        /// Print prefixed diff lines instead of JSON.
        #[arg(long)]
        text: bool,
    },
    /// Normalize an impact report and build its tree.
    Report {
        #[arg(long, value_name = "FILE")]
        payload: PathBuf,
        /// Print the tree outline instead of JSON.
        #[arg(long)]
        text: bool,
    },
    /// Group affected classes by repository and package.
    Analyze {
        /// Analyzer response.
        #[arg(long, value_name = "FILE")]
        payload: PathBuf,
        /// Cached repository listing.
        #[arg(long, value_name = "FILE")]
        repos: Option<PathBuf>,
        /// Print the rendered tree and summary instead of JSON.
        #[arg(long)]
        text: bool,
    },
    /// Run the force layout of an impact report's graph.
    Layout {
        #[arg(long, value_name = "FILE")]
        payload: PathBuf,
        /// Canvas width, defaults to the configured width.
        #[arg(long)]
        width: Option<f64>,
        /// Canvas height, defaults to the configured height.
        #[arg(long)]
        height: Option<f64>,
        /// Stop after this many ticks even if the layout has not rested.
        #[arg(long, default_value_t = 1000)]
        ticks: u32,
        /// JSON array of graph actions applied before ticking.
        #[arg(long, value_name = "FILE")]
        actions: Option<PathBuf>,
        /// Stream events as JSON lines at the given frame rate until rest.
        #[arg(long)]
        live: bool,
        #[arg(long, default_value_t = 60)]
        fps: u32,
    },
}
