use std::collections::BTreeMap;
use std::{env, fs};
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{delete, get, put, web, App, HttpResponse, HttpServer, Responder};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rs_mark_core::model::generation_config::GenerationConfig;
use rs_mark_core::model::generator::SentenceGenerator;
use rs_mark_core::{build_or_merge, generate_with, Error};

/// Server settings read from the environment.
#[derive(Debug, Clone)]
struct ServerConfig {
	host: String,
	port: u16,
	generation: GenerationConfig,
}

impl ServerConfig {
	/// Reads the settings from the process environment.
	fn from_env() -> Result<Self, String> {
		Self::from_lookup(|name| env::var(name).ok())
	}

	/// Builds the settings from a variable lookup.
	///
	/// - `RS_MARK_HOST` (default `127.0.0.1`), `RS_MARK_PORT` (default `5000`)
	/// - `RS_MARK_GENERATION`: path of a JSON `GenerationConfig` file
	/// - `RS_MARK_MAX_RETRIES`, `RS_MARK_MAX_WORDS`: override the file values
	///
	/// # Errors
	/// Returns an error if a variable is set but cannot be parsed or is out of range.
	fn from_lookup<F: Fn(&str) -> Option<String>>(var: F) -> Result<Self, String> {
		let host = var("RS_MARK_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
		let port = match var("RS_MARK_PORT") {
			Some(s) => s.parse::<u16>().map_err(|e| format!("RS_MARK_PORT: {e}"))?,
			None => 5000,
		};

		let mut generation = match var("RS_MARK_GENERATION") {
			Some(path) => load_generation(&path)?,
			None => GenerationConfig::default(),
		};
		if let Some(s) = var("RS_MARK_MAX_RETRIES") {
			let max_retries = s.parse::<usize>().map_err(|e| format!("RS_MARK_MAX_RETRIES: {e}"))?;
			generation.set_max_retries(max_retries)?;
		}
		if let Some(s) = var("RS_MARK_MAX_WORDS") {
			let max_words = s.parse::<usize>().map_err(|e| format!("RS_MARK_MAX_WORDS: {e}"))?;
			generation.set_max_words(Some(max_words))?;
		}

		Ok(Self { host, port, generation })
	}
}

/// Loads generation bounds from a JSON file, ex. `{"max_retries": 5000, "max_words": 80}`.
///
/// Missing fields keep their defaults.
fn load_generation(path: &str) -> Result<GenerationConfig, String> {
	let text = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
	let generation: GenerationConfig = serde_json::from_str(&text).map_err(|e| format!("{path}: {e}"))?;
	generation.validate().map_err(|e| format!("{path}: {e}"))?;
	Ok(generation)
}

/// Serialized graphs keyed by (owner, mark).
///
/// Blobs are opaque here; only the core reads them.
struct SharedData {
	marks: BTreeMap<(String, String), Vec<u8>>,
	generation: GenerationConfig,
}

type SharedState = web::Data<Mutex<SharedData>>;

/// HTTP PUT endpoint `/v1/marks/{owner}/{mark}`
///
/// Learns the request body (UTF-8 text) into the stored mark, creating it if needed.
#[put("/v1/marks/{owner}/{mark}")]
async fn put_mark(data: SharedState, path: web::Path<(String, String)>, body: web::Bytes) -> impl Responder {
	let text = match std::str::from_utf8(&body) {
		Ok(t) => t,
		Err(_) => return HttpResponse::BadRequest().body("Body must be UTF-8 text"),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Mark lock failed"),
	};

	let key = path.into_inner();
	let existing = shared_data.marks.get(&key).map(Vec::as_slice);
	match build_or_merge(text, existing) {
		Ok(bytes) => {
			info!(owner = %key.0, mark = %key.1, size = bytes.len(), "mark updated");
			shared_data.marks.insert(key, bytes);
			HttpResponse::Ok().body("Mark updated")
		}
		Err(e) => {
			error!(owner = %key.0, mark = %key.1, error = %e, "mark update failed");
			HttpResponse::InternalServerError().body(format!("Failed to update mark: {e}"))
		}
	}
}

/// HTTP GET endpoint `/v1/marks/{owner}/{mark}`
///
/// Returns the stored graph as JSON.
#[get("/v1/marks/{owner}/{mark}")]
async fn get_mark(data: SharedState, path: web::Path<(String, String)>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Mark lock failed"),
	};

	match shared_data.marks.get(&path.into_inner()) {
		Some(bytes) => HttpResponse::Ok().content_type("application/json").body(bytes.clone()),
		None => HttpResponse::NotFound().body("Mark not found"),
	}
}

/// HTTP DELETE endpoint `/v1/marks/{owner}/{mark}`
#[delete("/v1/marks/{owner}/{mark}")]
async fn delete_mark(data: SharedState, path: web::Path<(String, String)>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Mark lock failed"),
	};

	match shared_data.marks.remove(&path.into_inner()) {
		Some(_) => HttpResponse::Ok().body("Mark deleted"),
		None => HttpResponse::NotFound().body("Mark not found"),
	}
}

/// HTTP GET endpoint `/v1/marks/{owner}`
///
/// Lists the owner's marks, one per line.
#[get("/v1/marks/{owner}")]
async fn get_marks(data: SharedState, owner: web::Path<String>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Mark lock failed"),
	};

	let owner = owner.into_inner();
	let names: Vec<&str> = shared_data
		.marks
		.keys()
		.filter(|(o, _)| *o == owner)
		.map(|(_, name)| name.as_str())
		.collect();
	HttpResponse::Ok().body(names.join("\n"))
}

/// HTTP GET endpoint `/v1/generate/{owner}/{mark}`
///
/// Generates one sentence from the stored mark.
#[get("/v1/generate/{owner}/{mark}")]
async fn get_generated(data: SharedState, path: web::Path<(String, String)>) -> impl Responder {
	let (bytes, generation) = match snapshot_mark(&data, &path.into_inner()) {
		Ok(Some(snapshot)) => snapshot,
		Ok(None) => return HttpResponse::NotFound().body("Mark not found"),
		Err(e) => return HttpResponse::InternalServerError().body(e),
	};

	let mut generator = SentenceGenerator::new(generation);
	match generate_with(&bytes, &mut generator) {
		Ok(sentence) => HttpResponse::Ok().body(sentence),
		Err(Error::Generation(e)) => HttpResponse::UnprocessableEntity().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// Copies a stored mark and the generation bounds out of the shared state.
///
/// The lock is released on return: the walk runs on the copy, so updates
/// and reads of other marks never wait on a generation.
fn snapshot_mark(data: &Mutex<SharedData>, key: &(String, String)) -> Result<Option<(Vec<u8>, GenerationConfig)>, String> {
	let shared_data = data.lock().map_err(|_| "Mark lock failed".to_owned())?;
	Ok(shared_data.marks.get(key).map(|bytes| (bytes.clone(), shared_data.generation.clone())))
}

/// Registers every route on an app.
fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(put_mark)
		.service(get_mark)
		.service(delete_mark)
		.service(get_marks)
		.service(get_generated);
}

/// Main entry point for the server.
///
/// Marks live in memory behind a `Mutex`: updates merge under the lock, and a
/// generation walks a copy taken under the lock, so it never sees a half-merged mark.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let config = ServerConfig::from_env().map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	info!(host = %config.host, port = config.port, "starting rs-mark server");

	let shared_data = SharedData {
		marks: BTreeMap::new(),
		generation: config.generation,
	};
	let shared_marks = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_marks.clone())
			.configure(configure)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
