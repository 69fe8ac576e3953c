//! This module provides functions for reading a `Schedule` from the plain
//! text classes and attendances files, writing the classes back out, and
//! locating the config directory (determined by the `app_dirs` crate,
//! which will return a path based on the operating system).
//!
//! Input files are read line by line. A line that cannot be used is
//! skipped and recorded in the returned `LoadSummary`; the rest of the
//! file is still read. Only a failure to read the file itself aborts.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use app_dirs::{self, AppDataType, AppDirsError, AppInfo};

use super::{Config, Schedule};
use super::errors::*;

/// The information for app_dirs
const APP_INFO: AppInfo = AppInfo {
    name: "timetable",
    author: "Ian Johnson",
};

/// The outcome of reading an input file into a schedule.
#[derive(Debug, Default)]
pub struct LoadSummary {
    /// The number of lines that were applied to the schedule.
    pub accepted: usize,
    /// The lines that were skipped, as (1-based line number, error) pairs.
    pub rejected: Vec<(usize, Error)>,
}

impl LoadSummary {
    /// Records the result of applying one line.
    fn record(&mut self, line_number: usize, result: Result<()>) {
        match result {
            Ok(()) => self.accepted += 1,
            Err(e) => {
                warn!("skipping line {}: {}", line_number, e);
                self.rejected.push((line_number, e));
            }
        }
    }
}

/// Adds a class to the schedule for every line of the classes input.
pub fn read_classes<R: Read>(schedule: &mut Schedule, input: R) -> Result<LoadSummary> {
    read_lines(input, |line| schedule.add_from_text(line))
}

/// Sets class attendance for every line of the attendances input.
pub fn read_attendances<R: Read>(schedule: &mut Schedule, input: R) -> Result<LoadSummary> {
    read_lines(input, |line| schedule.populate_attendance(line))
}

/// Applies `f` to every non-blank line of the input.
fn read_lines<R, F>(input: R, mut f: F) -> Result<LoadSummary>
    where R: Read,
          F: FnMut(&str) -> Result<()>
{
    let r = BufReader::new(input);
    let mut summary = LoadSummary::default();

    for (n, l) in r.lines().enumerate() {
        let l = l.chain_err(|| ErrorKind::Io("could not read line".into()))?;
        if l.trim().is_empty() {
            continue;
        }
        summary.record(n + 1, f(&l));
    }

    Ok(summary)
}

/// Reads the classes file at the given path into the schedule.
pub fn load_classes(schedule: &mut Schedule, path: &Path) -> Result<LoadSummary> {
    let f = open(path)?;
    let summary = read_classes(schedule, f)?;
    info!("read {} classes from {}", summary.accepted, path.display());
    Ok(summary)
}

/// Reads the classes saved by an earlier run, or the configured input
/// file if nothing has been saved yet (see `Config::classes_source`).
pub fn load_current_classes(schedule: &mut Schedule, config: &Config) -> Result<LoadSummary> {
    load_classes(schedule, config.classes_source())
}

/// Reads the attendances file at the given path into the schedule.
pub fn load_attendances(schedule: &mut Schedule, path: &Path) -> Result<LoadSummary> {
    let f = open(path)?;
    let summary = read_attendances(schedule, f)?;
    info!("read attendance for {} classes from {}", summary.accepted, path.display());
    Ok(summary)
}

/// Writes the schedule's classes to the given path, overwriting it if
/// it already exists.
pub fn save_classes(schedule: &Schedule, path: &Path) -> Result<()> {
    let mut f = File::create(path).chain_err(|| ErrorKind::Io(format!("could not create file '{}'", path.display())))?;
    f.write_all(schedule.persistence_text().as_bytes())
        .chain_err(|| ErrorKind::Io(format!("could not write to file '{}'", path.display())))?;

    info!("saved {} classes to {}", schedule.len(), path.display());
    Ok(())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).chain_err(|| ErrorKind::Io(format!("could not open file '{}'", path.display())))
}

/// Returns the location of the config directory if possible.
/// The directory is not created.
pub fn config_dir() -> Result<PathBuf> {
    match app_dirs::get_app_root(AppDataType::UserConfig, &APP_INFO) {
        Ok(p) => Ok(p),
        Err(AppDirsError::NotSupported) => Err(ErrorKind::CannotLocateConfig.into()),
        Err(AppDirsError::Io(e)) => Err(e).chain_err(|| ErrorKind::Io("could not find config directory".into())),
        Err(_) => Err(ErrorKind::CannotLocateConfig.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::process;

    use super::*;

    const CLASSES: &'static str = "AQ1 Aquacise Maria 9\n\
                                   SP2 Spinning Tom 10\n\
                                   \n\
                                   BAD Line\n\
                                   BX5 Boxing Bob 13\n";

    #[test]
    fn read_classes_skips_bad_lines() {
        let mut s = Schedule::new();
        let summary = read_classes(&mut s, CLASSES.as_bytes()).unwrap();
        assert_eq!(summary.accepted, 3);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].0, 4);
        assert_eq!(s.len(), 3);
        assert_eq!(s.get_at_hour(13).unwrap().id(), "BX5");
    }

    #[test]
    fn read_attendances_skips_unknown_classes() {
        let mut s = Schedule::new();
        read_classes(&mut s, CLASSES.as_bytes()).unwrap();

        let attendances = "AQ1 5 6 7 8 9\nZZ9 1 1 1 1 1\n\nSP2 2 2 2 2 2\n";
        let summary = read_attendances(&mut s, attendances.as_bytes()).unwrap();
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.rejected.len(), 1);
        match *summary.rejected[0].1.kind() {
            ErrorKind::ClassNotFound(ref id) => assert_eq!(id, "ZZ9"),
            ref k => panic!("unexpected error {:?}", k),
        }
        assert_eq!(s.get_by_id("AQ1").unwrap().average_attendance(), 7.0);
        assert_eq!(s.get_by_id("SP2").unwrap().average_attendance(), 2.0);
    }

    #[test]
    fn save_and_reload() {
        let mut s = Schedule::new();
        read_classes(&mut s, CLASSES.as_bytes()).unwrap();

        let path = env::temp_dir().join(format!("timetable-save-test-{}.txt", process::id()));
        save_classes(&s, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), s.persistence_text());

        let mut reloaded = Schedule::new();
        let summary = load_classes(&mut reloaded, &path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(summary.accepted, 3);
        assert!(summary.rejected.is_empty());
        assert_eq!(reloaded.persistence_text(), s.persistence_text());
    }

    #[test]
    fn successive_edits_build_on_saved_classes() {
        let dir = env::temp_dir().join(format!("timetable-edits-test-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let config = Config {
            classes_in: dir.join("ClassesIn.txt"),
            attendances_in: dir.join("AttendancesIn.txt"),
            classes_out: dir.join("ClassesOut.txt"),
        };
        fs::write(&config.classes_in, "C1 Yoga Ann 9\n").unwrap();

        // First run: nothing saved yet, so the input file is read
        let mut s = Schedule::new();
        load_current_classes(&mut s, &config).unwrap();
        assert_eq!(s.add_class("C2", "Zumba", "Sue").unwrap(), 10);
        save_classes(&s, &config.classes_out).unwrap();

        // Second run picks up the first run's class
        let mut s = Schedule::new();
        load_current_classes(&mut s, &config).unwrap();
        assert_eq!(s.add_class("C3", "Box", "Bob").unwrap(), 11);
        save_classes(&s, &config.classes_out).unwrap();

        let saved = fs::read_to_string(&config.classes_out).unwrap();
        fs::remove_dir_all(&dir).unwrap();
        assert_eq!(saved, "C1 Yoga Ann 9\nC2 Zumba Sue 10\nC3 Box Bob 11");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut s = Schedule::new();
        let err = load_classes(&mut s, Path::new("no/such/ClassesIn.txt")).unwrap_err();
        match *err.kind() {
            ErrorKind::Io(_) => {}
            ref k => panic!("unexpected error {:?}", k),
        }
    }
}
