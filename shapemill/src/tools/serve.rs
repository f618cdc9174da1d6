use anyhow::{Context, Result, ensure};
use axum::{
	Router,
	body::Body,
	extract::State,
	http::{Uri, header::CONTENT_TYPE},
	response::Response,
	routing::get,
};
use std::path::{Path, PathBuf};
use tokio::time::{Duration, sleep};

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {
	/// Directory to serve static files from
	#[arg(long, short = 'd', value_name = "DIR", default_value = "./static/")]
	dir: PathBuf,

	/// Port to listen on
	#[arg(long, short = 'p', default_value_t = 8080)]
	port: u16,

	/// Listen on 0.0.0.0 instead of localhost
	#[arg(long, short = 'l')]
	listen: bool,

	/// Shutdown the server automatically after x milliseconds
	#[arg(long, value_name = "MS", display_order = 4)]
	auto_shutdown: Option<u64>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let folder = arguments
		.dir
		.canonicalize()
		.with_context(|| format!("static directory {:?} does not exist", arguments.dir))?;
	ensure!(folder.is_dir(), "path {folder:?} must be a directory");

	let router = Router::new().fallback(get(serve_static)).with_state(folder.clone());

	let host = if arguments.listen { "0.0.0.0" } else { "127.0.0.1" };
	let addr = format!("{host}:{}", arguments.port);
	let listener = tokio::net::TcpListener::bind(&addr).await?;
	log::info!("serving {folder:?}");
	eprintln!("server starts listening on http://{addr}");

	if let Some(milliseconds) = arguments.auto_shutdown {
		axum::serve(listener, router.into_make_service())
			.with_graceful_shutdown(async move { sleep(Duration::from_millis(milliseconds)).await })
			.await?;
	} else {
		axum::serve(listener, router.into_make_service()).await?;
	}

	Ok(())
}

async fn serve_static(uri: Uri, State(folder): State<PathBuf>) -> Response<Body> {
	let mut local_path = folder.clone();
	for segment in uri.path().split('/') {
		// Reject traversal outright instead of resolving it.
		if segment == ".." {
			return not_found();
		}
		if segment.is_empty() || segment == "." {
			continue;
		}
		local_path.push(segment);
	}

	// If the path is a directory, serve its index.html
	if local_path.is_dir() {
		local_path.push("index.html");
	}

	if !local_path.starts_with(&folder) {
		return not_found();
	}

	match std::fs::read(&local_path) {
		Ok(bytes) => Response::builder()
			.status(200)
			.header(CONTENT_TYPE, guess_mime(&local_path))
			.body(Body::from(bytes))
			.unwrap(),
		Err(_) => not_found(),
	}
}

fn not_found() -> Response<Body> {
	Response::builder().status(404).body(Body::from("Not Found")).unwrap()
}

fn guess_mime(path: &Path) -> String {
	let mime = mime_guess::from_path(path).first_or_octet_stream().essence_str().to_owned();
	if mime.starts_with("text/") {
		format!("{mime}; charset=utf-8")
	} else {
		mime
	}
}

#[cfg(test)]
mod tests {
	use super::guess_mime;
	use crate::tests::run_command;
	use std::path::Path;

	#[test]
	fn test_guess_mime() {
		let test = |path: &str, mime: &str| {
			assert_eq!(guess_mime(Path::new(path)), mime);
		};

		test("counties.geojson", "application/octet-stream");
		test("counties.json", "application/json");
		test("index.html", "text/html; charset=utf-8");
		test("map.js", "application/javascript");
		test("style.css", "text/css; charset=utf-8");
	}

	#[test]
	fn serves_and_shuts_down() {
		let temp_dir = tempfile::tempdir().unwrap();
		std::fs::write(temp_dir.path().join("index.html"), b"hello").unwrap();

		run_command(vec![
			"shapemill",
			"serve",
			"-p",
			"65201",
			"--auto-shutdown",
			"250",
			"-d",
			temp_dir.path().to_str().unwrap(),
		])
		.unwrap();
	}

	#[test]
	fn missing_directory_fails() {
		let err = run_command(vec!["shapemill", "serve", "-d", "/no/such/dir", "-p", "65202"])
			.unwrap_err()
			.to_string();
		assert!(err.contains("does not exist"), "{err}");
	}
}
