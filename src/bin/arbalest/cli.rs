use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "arbalest",
    version,
    about = "Allow-list store for GraphQL gateways",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Add a raw GraphQL document (comment/variables/operation/fragments)
    /// to the allow list
    Add {
        /// Store root directory
        path: PathBuf,
        /// File with the submitted document
        file: PathBuf,
        #[arg(long, default_value = "")]
        namespace: String,
        /// Variables template file (overrides a variables block in the
        /// document)
        #[arg(long)]
        vars: Option<PathBuf>,
    },

    /// List allow-listed operations
    List {
        path: PathBuf,
    },

    /// Print one record by name
    Get {
        path: PathBuf,
        name: String,
        #[arg(long, default_value = "")]
        namespace: String,
        /// Print only the operation body
        #[arg(long)]
        query_only: bool,
    },

    /// Print a stored fragment body
    Frag {
        path: PathBuf,
        name: String,
        #[arg(long, default_value = "")]
        namespace: String,
    },

    /// Item counts and metrics counters
    Status {
        path: PathBuf,
    },
}
