
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use test_utilities::*;

fn write_inputs(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
	let shp = dir.join("counties.shp");
	let dbf = dir.join("counties.dbf");
	fs::write(&shp, build_shapefile(&[&[SQUARE], &[TRIANGLE]])).unwrap();
	fs::write(
		&dbf,
		build_dbase(&[("NAME", 10), ("STATEFP", 2)], &[&["Adams", "29"], &["Bond", "17"]]),
	)
	.unwrap();
	(shp, dbf)
}

#[test]
fn convert_joins_attributes_and_writes_geojson() {
	let (temp_dir, output) = get_temp_output("counties.geojson");
	let (shp, dbf) = write_inputs(temp_dir.path());

	shapemill_cmd()
		.args(["convert", "--shp", shp.to_str().unwrap(), "--dbf", dbf.to_str().unwrap()])
		.args(["-o", output.to_str().unwrap()])
		.assert()
		.success();

	let json: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
	assert_eq!(json["type"], "FeatureCollection");

	let features = json["features"].as_array().unwrap();
	assert_eq!(features.len(), 2);

	assert_eq!(features[0]["properties"]["NAME"], "Adams");
	assert_eq!(features[0]["properties"]["STATEFP"], "29");
	assert_eq!(features[1]["properties"]["NAME"], "Bond");
	assert_eq!(features[1]["properties"]["STATEFP"], "17");

	let rings = features[0]["geometry"]["coordinates"].as_array().unwrap();
	assert_eq!(rings.len(), 1);
	assert_eq!(rings[0].as_array().unwrap().len(), SQUARE.len());
	assert_eq!(rings[0][0], serde_json::json!([0.0, 0.0]));
	assert_eq!(features[1]["geometry"]["type"], "Polygon");
}

#[test]
fn convert_without_dbf_leaves_properties_empty() {
	let (temp_dir, output) = get_temp_output("plain.geojson");
	let (shp, _) = write_inputs(temp_dir.path());

	shapemill_cmd()
		.args(["convert", "--shp", shp.to_str().unwrap(), "-o", output.to_str().unwrap()])
		.assert()
		.success();

	let json: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
	assert_eq!(json["features"][0]["properties"], serde_json::json!({}));
}

#[test]
fn convert_simplifies_when_a_percentage_is_given() {
	let (temp_dir, output) = get_temp_output("simplified.geojson");
	let shp = temp_dir.path().join("ring.shp");
	// A closed ring with redundant collinear points on the square's edges.
	let ring: &[(f64, f64)] = &[
		(0.0, 0.0),
		(0.5, 0.0),
		(1.0, 0.0),
		(1.0, 0.5),
		(1.0, 1.0),
		(0.5, 1.0),
		(0.0, 1.0),
		(0.0, 0.5),
		(0.0, 0.0),
	];
	fs::write(&shp, build_shapefile(&[&[ring]])).unwrap();

	shapemill_cmd()
		.args(["convert", "--shp", shp.to_str().unwrap()])
		.args(["-p", "0.1", "-a", "vis", "-o", output.to_str().unwrap()])
		.assert()
		.success();

	let json: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
	let ring = json["features"][0]["geometry"]["coordinates"][0].as_array().unwrap();
	assert_eq!(ring.len(), 4);
	assert_eq!(ring.first(), ring.last());
}

#[test]
fn convert_writes_region_files() {
	let (temp_dir, output) = get_temp_output("counties.smr");
	let (shp, dbf) = write_inputs(temp_dir.path());

	shapemill_cmd()
		.args(["convert", "--shp", shp.to_str().unwrap(), "--dbf", dbf.to_str().unwrap()])
		.args(["-o", output.to_str().unwrap()])
		.assert()
		.success();

	let bytes = fs::read(&output).unwrap();
	let regions = shapemill::regions::read_regions(bytes.as_slice()).unwrap();
	assert_eq!(regions.len(), 2);
	assert_eq!(regions[0].name, "Adams");
	assert_eq!(regions[0].state, "MO, MISSOURI");
	assert_eq!(regions[0].rings.len(), 1);
	assert_eq!(regions[0].rings[0].len(), SQUARE.len());
	assert_eq!(regions[1].name, "Bond");
	assert_eq!(regions[1].state, "IL, ILLINOIS");
}

#[test]
fn convert_streams_geojson_to_stdout() {
	let (temp_dir, _) = get_temp_output("unused");
	let (shp, _) = write_inputs(temp_dir.path());

	let output = shapemill_cmd()
		.args(["convert", "--shp", shp.to_str().unwrap()])
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let json: Value = serde_json::from_slice(&output).unwrap();
	assert_eq!(json["type"], "FeatureCollection");
	assert_eq!(json["features"].as_array().unwrap().len(), 2);
}

#[test]
fn convert_rejects_a_truncated_shapefile() {
	let (temp_dir, output) = get_temp_output("broken.geojson");
	let shp = temp_dir.path().join("broken.shp");
	let mut bytes = build_shapefile(&[&[SQUARE]]);
	bytes.truncate(bytes.len() - 8);
	fs::write(&shp, bytes).unwrap();

	shapemill_cmd()
		.args(["convert", "--shp", shp.to_str().unwrap(), "-o", output.to_str().unwrap()])
		.assert()
		.failure();
}
