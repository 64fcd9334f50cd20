use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start jobmatch as a service.
    Daemon {
        /// Address to listen on. Overrides `listen` from config.yaml
        #[clap(short, long)]
        listen: Option<String>,
    },

    /// Match a resume against recently posted jobs
    Match {
        /// Resume text file. Reads stdin when omitted or "-"
        #[clap(short, long)]
        resume: Option<PathBuf>,

        /// Desired job titles, comma-separated
        #[clap(short, long)]
        keywords: String,

        /// Also write results to this CSV file
        #[clap(long)]
        csv: Option<PathBuf>,

        /// Print the report as json instead of a table
        #[clap(long, default_value = "false")]
        json: bool,
    },

    /// Fetch postings without scoring them
    Fetch {
        /// Job titles, comma-separated
        #[clap(short, long)]
        keywords: String,

        /// Print the count
        #[clap(short = 'c', long, default_value = "false")]
        count: bool,
    },
}
