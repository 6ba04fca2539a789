use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "catalogue")]
/// SEDIMARK offering catalogue server
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the catalogue HTTP server
    Serve {
        /// Host and port to listen to
        #[arg(short, long, default_value = "127.0.0.1:3030", value_hint = ValueHint::Hostname)]
        bind: String,
        /// Allows cross-origin requests
        #[arg(long)]
        cors: bool,
        /// RDF file to publish into the catalogue at startup
        ///
        /// The format is guessed from the file extension. May be repeated;
        /// a file that fails to load is skipped with a warning.
        #[arg(long, value_hint = ValueHint::FilePath)]
        load: Vec<PathBuf>,
    },
}
