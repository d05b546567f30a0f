use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Extension of corpus text files.
pub const CORPUS_EXTENSION: &str = "txt";

/// Extension of serialized graphs.
pub const GRAPH_EXTENSION: &str = "json";

/// Folder used when no corpus folder is given.
pub const DEFAULT_CORPUS_FOLDER: &str = "./data";

/// Reads a whole corpus file as text.
///
/// Newlines are kept; the tokenizer turns them into word separators.
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	fs::read_to_string(filename)
}

/// Name of the mark learned from `path`: its file or folder name without extension.
///
/// - `"./data/poems.txt"` → `"poems"`
/// - `"./data"` → `"data"`
pub fn mark_name<P: AsRef<Path>>(path: P) -> io::Result<String> {
	path.as_ref()
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no mark name"))
}

/// Where the graph of the mark learned from `path` is stored: a sibling
/// `<mark>.json`.
///
/// - `"data/poems.txt"` → `"data/poems.json"`
/// - `"./data"` (a whole corpus folder) → `"./data.json"`
pub fn graph_path<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
	let path = path.as_ref();
	let name = mark_name(path)?;
	let parent = path.parent().unwrap_or_else(|| Path::new("."));
	Ok(parent.join(format!("{name}.{GRAPH_EXTENSION}")))
}

/// Resolves the corpus folder argument.
///
/// - `None` → [`DEFAULT_CORPUS_FOLDER`]
/// - `"."` or `"./"` → the current working directory, so the mark gets a real name
/// - anything else is returned as-is (not canonicalized)
pub fn corpus_folder(arg: Option<&str>) -> PathBuf {
	match arg {
		None => PathBuf::from(DEFAULT_CORPUS_FOLDER),
		Some("." | "./") => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
		Some(folder) => PathBuf::from(folder),
	}
}

/// Lists the corpus files of a folder, sorted by name.
///
/// Returns file names only (no paths).
pub fn list_corpora<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(OsStr::new(CORPUS_EXTENSION)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().into_owned());
			}
		}
	}

	files.sort();
	Ok(files)
}
