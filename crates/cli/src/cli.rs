use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "accolade")]
#[command(about = "Inspect the installed badge rules")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// TOML configuration file
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Directory for the persistent rule cache (in-memory if omitted)
	#[arg(long, value_name = "PATH")]
	pub cache_dir: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Print every installed rule, sorted by name
	Catalog,
	/// Print the rules one user can trigger for another
	Interactive,
	/// Print the criteria form for one rule
	Form {
		/// Rule identity, as listed by `catalog`
		rule: String,
	},
}
