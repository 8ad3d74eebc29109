#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "typegram", about = "Type description compiler and reply inspection tools")]
struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Show the token stream of each catalogue entry.
	Tokens(cmd::tokens::Args),
	/// Compile a catalogue and report registered types.
	Compile(cmd::compile::Args),
	/// Construct an empty record from the compiled registry.
	New(cmd::new::Args),
	/// Decode a reply and normalize its records.
	Reply(cmd::reply::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> typegram::schema::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	match cli.command {
		Commands::Tokens(args) => cmd::tokens::run(args),
		Commands::Compile(args) => cmd::compile::run(args),
		Commands::New(args) => cmd::new::run(args),
		Commands::Reply(args) => cmd::reply::run(args),
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("TYPEGRAM_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("typegram=debug")
		} else {
			EnvFilter::new("typegram=info")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
