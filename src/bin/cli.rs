//! FlatKV CLI
//!
//! Works directly on a store root, no server needed.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use flatkv::{key, FlatError, Store};

/// FlatKV CLI
#[derive(Parser, Debug)]
#[command(name = "flatkv-cli")]
#[command(about = "CLI for a FlatKV store root")]
#[command(version)]
struct Args {
    /// Store root directory
    #[arg(short, long, env = "FLATKV_DATA_DIR", default_value = "./db")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List keys
    List {
        /// Only keys starting with this prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Percent-encode each key
        #[arg(short, long)]
        encode: bool,
    },

    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            match e {
                FlatError::NotFound { .. } => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(args: Args) -> flatkv::Result<()> {
    let store = Store::open_path(args.data_dir)?;

    match args.command {
        Commands::List { prefix, encode } => {
            for name in store.list(prefix.as_deref())? {
                if encode {
                    println!("{}", key::encode(&name));
                } else {
                    println!("{}", name);
                }
            }
        }
        Commands::Get { key } => {
            let value = store.get(&key)?;
            std::io::stdout().write_all(&value)?;
        }
        Commands::Set { key, value } => {
            store.put(&key, value.as_bytes())?;
        }
        Commands::Del { key } => {
            store.delete(&key)?;
        }
    }

    Ok(())
}
