//! This module provides the `Schedule` type: a fixed table of one-hour
//! slots, each of which may hold a single `FitnessClass`.
//!
//! Slots are indexed by start hour, beginning at `FIRST_START_TIME`.
//! The table never grows; once all `MAX_CLASSES` slots are occupied no
//! more classes can be added until one is removed.

use std::slice;

use super::class::{FitnessClass, NUM_WEEKS};
use super::errors::*;

/// The number of slots in the schedule.
pub const MAX_CLASSES: usize = 7;
/// The start hour of the first slot.
pub const FIRST_START_TIME: u32 = 9;
/// The start hour of the last slot.
pub const LAST_START_TIME: u32 = FIRST_START_TIME + MAX_CLASSES as u32 - 1;

/// A day's timetable of fitness classes.
#[derive(Debug, Default)]
pub struct Schedule {
    /// The slot at index `i` holds the class starting at
    /// `FIRST_START_TIME + i`, if any.
    slots: [Option<FitnessClass>; MAX_CLASSES],
}

impl Schedule {
    /// Returns an empty schedule.
    pub fn new() -> Schedule {
        Schedule::default()
    }

    /// Adds a class read from a line of the classes file, placing it in the
    /// slot for its start hour. Blank lines are ignored.
    ///
    /// A line whose hour is already taken by another class is rejected
    /// rather than overwriting that class.
    pub fn add_from_text(&mut self, line: &str) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }

        let class = FitnessClass::from_text(line)?;
        let index = slot_index(class.start_hour())?;
        if let Some(ref existing) = self.slots[index] {
            bail!(ErrorKind::Parse(format!("class {} cannot start at {}, which is taken by class {}",
                                           class.id(),
                                           class.start_hour(),
                                           existing.id())));
        }

        debug!("placing class {} at {}:00", class.id(), class.start_hour());
        self.slots[index] = Some(class);
        Ok(())
    }

    /// Adds a new class at the earliest free hour, returning that hour.
    ///
    /// The details are not validated here; see `check_new_class`.
    pub fn add_from_fields(&mut self, id: &str, name: &str, tutor: &str) -> Result<u32> {
        let hour = self.earliest_free_hour().ok_or(ErrorKind::ScheduleFull)?;
        let mut class = FitnessClass::new(id, name, tutor);
        class.set_start_hour(hour);

        debug!("placing new class {} at {}:00", id, hour);
        self.slots[(hour - FIRST_START_TIME) as usize] = Some(class);
        Ok(hour)
    }

    /// Validates and adds a new class, in the order a user would want
    /// problems reported: no room at all, then bad details.
    pub fn add_class(&mut self, id: &str, name: &str, tutor: &str) -> Result<u32> {
        if self.is_full() {
            bail!(ErrorKind::ScheduleFull);
        }
        self.check_new_class(id, name, tutor)?;
        self.add_from_fields(id, name, tutor)
    }

    /// Checks user supplied details for a new class: every field must be
    /// filled in, the ID must not be in use, and every field must be a
    /// single word.
    pub fn check_new_class(&self, id: &str, name: &str, tutor: &str) -> Result<()> {
        let fields = [id, name, tutor];
        if fields.iter().any(|f| f.is_empty()) {
            bail!(ErrorKind::InvalidInput("please fill in all fields".into()));
        }
        if self.get_by_id(id).is_some() {
            bail!(ErrorKind::DuplicateClass(id.into()));
        }
        if fields.iter().any(|f| f.contains(char::is_whitespace)) {
            bail!(ErrorKind::InvalidInput("please enter single words only".into()));
        }
        Ok(())
    }

    /// Removes the class with the given ID, returning it.
    pub fn delete_by_id(&mut self, id: &str) -> Result<FitnessClass> {
        let index = self.slots
            .iter()
            .position(|s| s.as_ref().map_or(false, |c| c.id() == id))
            .ok_or_else(|| ErrorKind::ClassNotFound(id.into()))?;

        debug!("removing class {} from {}:00", id, FIRST_START_TIME + index as u32);
        self.slots[index].take().ok_or_else(|| ErrorKind::ClassNotFound(id.into()).into())
    }

    /// Returns the class in the slot with the given (0-based) index, or `None`
    /// if the slot is empty or there is no such slot.
    pub fn get_by_index(&self, index: usize) -> Option<&FitnessClass> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Returns the first class (in order of start hour) with the given ID.
    pub fn get_by_id(&self, id: &str) -> Option<&FitnessClass> {
        self.classes().find(|c| c.id() == id)
    }

    fn get_by_id_mut(&mut self, id: &str) -> Option<&mut FitnessClass> {
        self.slots.iter_mut().filter_map(Option::as_mut).find(|c| c.id() == id)
    }

    /// Returns the class starting at the given hour, or `None` if the slot
    /// is empty or the hour is outside the schedule.
    pub fn get_at_hour(&self, hour: u32) -> Option<&FitnessClass> {
        slot_index(hour).ok().and_then(|i| self.get_by_index(i))
    }

    /// Returns the earliest hour with no class, or `None` if the schedule
    /// is full.
    pub fn earliest_free_hour(&self) -> Option<u32> {
        (FIRST_START_TIME..LAST_START_TIME + 1).find(|&h| self.get_at_hour(h).is_none())
    }

    /// Returns the number of classes in the schedule.
    pub fn len(&self) -> usize {
        self.classes().count()
    }

    /// Returns whether the schedule has no classes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.len() == MAX_CLASSES
    }

    /// Sets the attendance figures of a class from a line of the attendances
    /// file, which holds the class ID followed by one figure per week.
    ///
    /// The line is parsed completely before the class is changed, so a bad
    /// figure leaves the existing attendance untouched.
    pub fn populate_attendance(&mut self, line: &str) -> Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != NUM_WEEKS + 1 {
            bail!(ErrorKind::Parse(format!("expected an ID and {} weekly figures, found {} fields in '{}'",
                                           NUM_WEEKS,
                                           tokens.len(),
                                           line.trim())));
        }

        let mut figures = [0u32; NUM_WEEKS];
        for (figure, token) in figures.iter_mut().zip(&tokens[1..]) {
            *figure = token.parse::<u32>()
                .chain_err(|| ErrorKind::Parse(format!("invalid attendance figure '{}'", token)))?;
        }

        let id = tokens[0];
        let class = self.get_by_id_mut(id).ok_or_else(|| ErrorKind::ClassNotFound(id.into()))?;
        for (i, figure) in figures.iter().enumerate() {
            class.set_attendance(i + 1, *figure)?;
        }
        Ok(())
    }

    /// Returns the classes ordered by descending average attendance.
    /// Classes with equal averages keep their order of start hour.
    pub fn sorted_by_attendance(&self) -> Vec<&FitnessClass> {
        let mut sorted: Vec<&FitnessClass> = self.classes().collect();
        // `sort_by` is stable
        sorted.sort_by(|a, b| a.cmp_by_attendance(b));
        sorted
    }

    /// Returns the mean of the average attendance of every class.
    ///
    /// An empty schedule has an overall average of 0.
    pub fn overall_average(&self) -> f64 {
        let sum: f64 = self.classes().map(FitnessClass::average_attendance).sum();
        sum / self.len().max(1) as f64
    }

    /// Returns the text of the classes file for this schedule: one line per
    /// class in order of start hour, with no newline after the last.
    pub fn persistence_text(&self) -> String {
        self.classes()
            .map(FitnessClass::persistence_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns an iterator over the classes in order of start hour.
    pub fn classes(&self) -> Classes<'_> {
        Classes { slots: self.slots.iter() }
    }
}

/// An iterator over the classes of a `Schedule`, skipping empty slots.
pub struct Classes<'a> {
    slots: slice::Iter<'a, Option<FitnessClass>>,
}

impl<'a> Iterator for Classes<'a> {
    type Item = &'a FitnessClass;

    fn next(&mut self) -> Option<&'a FitnessClass> {
        while let Some(slot) = self.slots.next() {
            if let Some(ref c) = *slot {
                return Some(c);
            }
        }
        None
    }
}

/// Converts a start hour to an index into the slot table.
fn slot_index(hour: u32) -> Result<usize> {
    if hour >= FIRST_START_TIME && hour <= LAST_START_TIME {
        Ok((hour - FIRST_START_TIME) as usize)
    } else {
        Err(ErrorKind::OutOfRange(format!("start hour {} is not between {} and {}",
                                          hour,
                                          FIRST_START_TIME,
                                          LAST_START_TIME))
            .into())
    }
}
