//! `accolade` binary.
//!
//! Lists installed badge rules and renders criteria forms as JSON.

mod app;
mod cli;

use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let output = app::run(&cli)?;
	println!("{output}");
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("accolade=debug,accolade_registry=debug,accolade_cache=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();
}
