//! This module provides the `Config` type, which records where the
//! classes and attendance files live.
//!
//! The configuration is stored as JSON in `config.json` inside the
//! user's config directory (see `files::config_dir`). Any field missing
//! from the file takes its default value, and a missing file means the
//! defaults are used for everything.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json;

use super::errors::*;
use super::files;

/// The name of the config file inside the config directory.
pub const CONFIG_FILE: &'static str = "config.json";

/// The locations of the files read and written by the timetable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The classes file read at startup.
    pub classes_in: PathBuf,
    /// The attendances file read after the classes file.
    pub attendances_in: PathBuf,
    /// The file the classes are saved to.
    pub classes_out: PathBuf,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            classes_in: PathBuf::from("ClassesIn.txt"),
            attendances_in: PathBuf::from("AttendancesIn.txt"),
            classes_out: PathBuf::from("ClassesOut.txt"),
        }
    }
}

impl Config {
    /// Reads a config from JSON.
    pub fn from_reader<R: Read>(input: R) -> Result<Config> {
        serde_json::from_reader(input).chain_err(|| ErrorKind::Json("json error in config file".into()))
    }

    /// Reads the config at the given path, falling back to the defaults
    /// if there is no file there.
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            debug!("no config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let f = File::open(path).chain_err(|| ErrorKind::Io(format!("could not open config file '{}'", path.display())))?;
        Config::from_reader(f)
    }

    /// Returns the classes file to read at startup: the output file once
    /// it has been written, so that saved changes carry over, and the
    /// input file before that.
    pub fn classes_source(&self) -> &Path {
        if self.classes_out.is_file() {
            &self.classes_out
        } else {
            &self.classes_in
        }
    }

    /// Reads the config from the user's config directory.
    pub fn load() -> Result<Config> {
        Config::load_from(&config_path()?)
    }
}

/// Returns the location of the config file (which may not exist).
pub fn config_path() -> Result<PathBuf> {
    let mut path = files::config_dir()?;
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let json = r#"{ "classes_out": "/tmp/out.txt" }"#;
        let c = Config::from_reader(json.as_bytes()).unwrap();
        assert_eq!(c.classes_out, PathBuf::from("/tmp/out.txt"));
        assert_eq!(c.classes_in, Config::default().classes_in);
        assert_eq!(c.attendances_in, PathBuf::from("AttendancesIn.txt"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = Config::from_reader("{ classes_in: ".as_bytes()).unwrap_err();
        match *err.kind() {
            ErrorKind::Json(_) => {}
            ref k => panic!("unexpected error {:?}", k),
        }
    }

    #[test]
    fn classes_source_prefers_existing_output() {
        let mut c = Config::default();
        c.classes_out = PathBuf::from("no/such/ClassesOut.txt");
        assert_eq!(c.classes_source(), c.classes_in.as_path());

        c.classes_out = PathBuf::from("Cargo.toml");
        assert_eq!(c.classes_source(), Path::new("Cargo.toml"));
    }

    #[test]
    fn absent_file_gives_defaults() {
        let path = Path::new("this/path/does/not/exist/config.json");
        assert_eq!(Config::load_from(path).unwrap(), Config::default());
    }
}
