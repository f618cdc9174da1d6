//! # shapemill CLI
//!
//! shapemill is a command-line tool for converting ESRI shapefiles into
//! GeoJSON or a compact binary region format, optionally simplifying the
//! polygons on the way, and for serving the encoded output.
//!
//! ## Subcommands
//! - **Convert**: Convert a shapefile (and optionally a dBASE attribute
//!   table) into GeoJSON or a binary region file.
//! - **Serve**: Serve static files from a directory.
//!
//! ## Example
//! ```sh
//! # Convert a county shapefile into simplified GeoJSON
//! shapemill convert --shp counties.shp --dbf counties.dbf -p 0.1 -o counties.geojson
//!
//! # Serve the encoded output
//! shapemill serve --dir ./static/ --port 8080
//! ```

mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

/// Command-line interface for shapemill
#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = false,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[arg(
		long,
		short = 'q',
		action = clap::ArgAction::Count,
		global = true,
		help = "Decrease logging verbosity",
		conflicts_with = "verbose",
		display_order = 100,
	)]
	quiet: u8,

	#[arg(
		long,
		short = 'v',
		action = clap::ArgAction::Count,
		global = true,
		help = "Increase logging verbosity\n(add more 'v' for greater detail, e.g., '-vvvv' for trace-level logs).",
		display_order = 100,
	)]
	verbose: u8,
}

/// Define subcommands for the command-line interface
#[derive(Subcommand, Debug)]
enum Commands {
	#[clap(alias = "converter")]
	/// Convert a shapefile into GeoJSON or a binary region file
	Convert(tools::convert::Subcommand),

	#[clap(alias = "server")]
	/// Serve static files from a directory
	Serve(tools::serve::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	// Set log level based on verbosity flags
	let verbosity = cli.verbose as i16 - cli.quiet as i16;
	let log_level = match verbosity {
		i16::MIN..=-1 => LevelFilter::Off,
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		3..=i16::MAX => LevelFilter::Trace,
	};

	env_logger::Builder::new()
		.filter_level(log_level)
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Convert(arguments) => tools::convert::run(arguments),
		Commands::Serve(arguments) => tools::serve::run(arguments),
	}
}
