use anyhow::{Context, Result};
use shapemill::regions;
use shapemill_geometry::{
	geojson::write_geojson,
	shapefile::Shapefile,
	simplify::{Algorithm, DEFAULT_WEIGHTING, MIN_POINTS},
};
use std::{
	fs::File,
	io::{BufReader, BufWriter},
	path::PathBuf,
};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Path of the shapefile main file (*.shp)
	#[arg(long, short = 's', value_name = "FILE")]
	shp: PathBuf,

	/// Path of the dBASE attribute table (*.dbf)
	#[arg(long, short = 'd', value_name = "FILE")]
	dbf: Option<PathBuf>,

	/// Approximate fraction of points to keep, between 0 and 1.
	/// Simplification is skipped when this is omitted.
	#[arg(long, short = 'p', value_name = "FRACTION", display_order = 1)]
	percentage: Option<f64>,

	/// The algorithm to use when simplifying
	#[arg(long, short = 'a', value_enum, default_value = "doug", display_order = 1)]
	algorithm: Algorithm,

	/// Sharpness coefficient for weighted Visvalingam; 0 disables weighting
	#[arg(long, value_name = "K", default_value_t = DEFAULT_WEIGHTING, display_order = 2)]
	weighting: f64,

	/// Minimum number of points to keep per ring
	#[arg(long, value_name = "N", default_value_t = MIN_POINTS, display_order = 2)]
	min_points: usize,

	/// Output file path; stdout if omitted. A *.smr path selects the
	/// binary region format, anything else gets GeoJSON.
	#[arg(long, short = 'o', value_name = "FILE")]
	output: Option<PathBuf>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let file = File::open(&arguments.shp).with_context(|| format!("failed to open shapefile {:?}", arguments.shp))?;
	let mut shapefile = Shapefile::read(BufReader::new(file))?;
	log::info!("parsed {} polygon records from {:?}", shapefile.features.len(), arguments.shp);

	if let Some(dbf_path) = &arguments.dbf {
		let file = File::open(dbf_path).with_context(|| format!("failed to open dbase table {:?}", dbf_path))?;
		shapefile.load_attributes(BufReader::new(file))?;
	}

	let mut collection = shapefile.into_collection();

	if let Some(percentage) = arguments.percentage {
		let simplifier = arguments.algorithm.simplifier(arguments.min_points, arguments.weighting);
		collection.simplify(simplifier.as_ref(), percentage)?;
		log::info!(
			"simplified {} features to {:.0}% with {:?}",
			collection.len(),
			percentage.clamp(0.0, 1.0) * 100.0,
			arguments.algorithm
		);
	}

	match &arguments.output {
		Some(path) if path.extension().is_some_and(|extension| extension == "smr") => {
			let writer = BufWriter::new(File::create(path).with_context(|| format!("failed to create {path:?}"))?);
			regions::write_regions(writer, &collection)?;
		}
		Some(path) => {
			let writer = BufWriter::new(File::create(path).with_context(|| format!("failed to create {path:?}"))?);
			write_geojson(writer, &collection)?;
		}
		None => write_geojson(std::io::stdout().lock(), &collection)?,
	}

	Ok(())
}
