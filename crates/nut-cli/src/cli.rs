//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect the assets of a nut application
#[derive(Parser, Debug)]
#[command(name = "nutassets")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Application root holding nuts/, manifests/, conf/, ...
    #[arg(short, long, global = true, env = "NUT_APP_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Project name (defaults to nutApplication)
    #[arg(short, long, global = true, env = "NUT_PROJECT")]
    pub project: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the asset kind of a file name
    Classify {
        /// File name or path to classify
        path: String,
    },

    /// Resolve the project and print its file list
    ///
    /// Examples:
    ///   nutassets project                        # /nuts/<project>.<ext>
    ///   nutassets project --file /nuts/x.nuts.json
    ///   nutassets project --contents             # include file text
    Project {
        /// Virtual path of a descriptor to resolve instead of the default
        #[arg(short, long)]
        file: Option<String>,

        /// Include loaded file contents in the output
        #[arg(long)]
        contents: bool,
    },

    /// Merge the project manifest onto the defaults and print it
    Manifest {
        /// Virtual path of a manifest document to merge instead of the default
        #[arg(short, long)]
        file: Option<String>,
    },

    /// List the applications of the app-selector manifest
    Apps,
}
