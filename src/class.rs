//! This module provides the `FitnessClass` type, which holds the details of
//! a single class along with its attendance over the monitored weeks.
//! A class can be read from a line of the classes file (`from_text`) and
//! rendered either as a row of the attendance report (`report_line`) or
//! as a line of the classes file again (`persistence_line`).

use std::cmp::Ordering;
use std::fmt::Write;

use super::errors::*;

/// The number of weeks attendance is monitored for.
pub const NUM_WEEKS: usize = 5;

/// A single fitness class and its weekly attendance figures.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessClass {
    id: String,
    name: String,
    tutor: String,
    /// The start hour of the class, which determines its slot in the schedule.
    start_hour: u32,
    /// Attendance for weeks 1 to `NUM_WEEKS`, stored at index `week - 1`.
    attendance: [u32; NUM_WEEKS],
}

impl FitnessClass {
    /// Returns a class with the given details and no attendance.
    ///
    /// The start hour is left at 0; the schedule assigns the real one
    /// with `set_start_hour` when the class is placed in a slot.
    pub fn new(id: &str, name: &str, tutor: &str) -> FitnessClass {
        FitnessClass {
            id: id.to_owned(),
            name: name.to_owned(),
            tutor: tutor.to_owned(),
            start_hour: 0,
            attendance: [0; NUM_WEEKS],
        }
    }

    /// Attempts to construct a class from a line of the classes file.
    ///
    /// The line must consist of exactly four whitespace separated fields:
    /// the ID, name, tutor and start hour of the class. Attendance starts
    /// at zero for every week.
    pub fn from_text(line: &str) -> Result<FitnessClass> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 4 {
            bail!(ErrorKind::Parse(format!("expected 4 fields (id name tutor hour), found {} in '{}'",
                                           tokens.len(),
                                           line.trim())));
        }

        let start_hour = tokens[3]
            .parse::<u32>()
            .chain_err(|| ErrorKind::Parse(format!("invalid start hour '{}'", tokens[3])))?;

        let mut class = FitnessClass::new(tokens[0], tokens[1], tokens[2]);
        class.start_hour = start_hour;
        Ok(class)
    }

    /// Returns the ID of the class.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets the ID of the class.
    pub fn set_id(&mut self, id: &str) {
        self.id = id.to_owned();
    }

    /// Returns the name of the class.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the name of the class.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    /// Returns the name of the tutor.
    pub fn tutor(&self) -> &str {
        &self.tutor
    }

    /// Sets the name of the tutor.
    pub fn set_tutor(&mut self, tutor: &str) {
        self.tutor = tutor.to_owned();
    }

    /// Returns the start hour of the class.
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// Sets the start hour of the class.
    ///
    /// This does not move the class within a schedule; use the `Schedule`
    /// methods to place or remove classes.
    pub fn set_start_hour(&mut self, hour: u32) {
        self.start_hour = hour;
    }

    /// Sets the attendance for the given week (a 1-based week number).
    pub fn set_attendance(&mut self, week: usize, value: u32) -> Result<()> {
        let index = week_index(week)?;
        self.attendance[index] = value;
        Ok(())
    }

    /// Returns the attendance for the given week (a 1-based week number).
    pub fn attendance(&self, week: usize) -> Result<u32> {
        week_index(week).map(|i| self.attendance[i])
    }

    /// Returns the mean attendance over all the monitored weeks.
    pub fn average_attendance(&self) -> f64 {
        let sum: u64 = self.attendance.iter().map(|&a| u64::from(a)).sum();
        sum as f64 / NUM_WEEKS as f64
    }

    /// Orders classes by descending average attendance, so that sorting
    /// with this comparison puts the best attended class first.
    pub fn cmp_by_attendance(&self, other: &FitnessClass) -> Ordering {
        other.average_attendance()
            .partial_cmp(&self.average_attendance())
            .unwrap_or(Ordering::Equal)
    }

    /// Returns the row of the attendance report for this class, including
    /// the trailing newline.
    pub fn report_line(&self) -> String {
        let mut weeks = String::new();
        for a in &self.attendance {
            // Writing to a `String` cannot fail
            let _ = write!(weeks, "{:3}", a);
        }

        format!("{:<5}{:<15}{:<15}{:<25}{:<15.2}\n",
                self.id,
                self.name,
                self.tutor,
                weeks,
                self.average_attendance())
    }

    /// Returns the line of the classes file for this class (without a
    /// line terminator). Attendance is not part of this line.
    pub fn persistence_line(&self) -> String {
        format!("{} {} {} {}", self.id, self.name, self.tutor, self.start_hour)
    }
}

/// Converts a 1-based week number to an index into the attendance array.
fn week_index(week: usize) -> Result<usize> {
    if week >= 1 && week <= NUM_WEEKS {
        Ok(week - 1)
    } else {
        Err(ErrorKind::OutOfRange(format!("week {} is not between 1 and {}", week, NUM_WEEKS)).into())
    }
}
