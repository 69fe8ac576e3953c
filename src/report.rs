//! Text renderings of a `Schedule`: the attendance report, with classes
//! ordered by average attendance, and the timetable grid.

use std::fmt::Write;

use super::Schedule;
use super::schedule::{FIRST_START_TIME, LAST_START_TIME};

/// Returns the attendance report for the schedule.
///
/// The report has a header, one row per class (best attended first) and
/// a closing line with the overall average attendance.
pub fn attendance_report(schedule: &Schedule) -> String {
    let mut report = format!("{:<5}{:<15}{:<18}{:<20}{:<15}\n\n",
                             "Id",
                             "Class",
                             "Tutor",
                             "Attendances",
                             "Average Attendance");

    for class in schedule.sorted_by_attendance() {
        report.push_str(&class.report_line());
    }

    let _ = write!(report, "\n{:>70} {:.2}", "Overall Average:", schedule.overall_average());
    report
}

/// Returns the timetable for the schedule as three lines: the hours of
/// each slot, the class names, and the tutors. Empty slots are shown as
/// available.
pub fn timetable(schedule: &Schedule) -> String {
    let mut times = String::new();
    let mut names = String::new();
    let mut tutors = String::new();

    for hour in FIRST_START_TIME..LAST_START_TIME + 1 {
        let _ = write!(times, " {:<12}", format!("{}-{}", hour, hour + 1));
        match schedule.get_at_hour(hour) {
            Some(class) => {
                let _ = write!(names, " {:<12}", class.name());
                let _ = write!(tutors, " {:<12}", class.tutor());
            }
            None => {
                let _ = write!(names, " {:<12}", "Available");
                let _ = write!(tutors, " {:<12}", "");
            }
        }
    }

    format!("{}\n{}\n{}", times, names, tutors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schedule {
        let mut s = Schedule::new();
        s.add_from_text("AQ1 Aquacise Maria 9").unwrap();
        s.add_from_text("SP2 Spinning Tom 11").unwrap();
        s.populate_attendance("AQ1 1 2 3 4 5").unwrap();
        s.populate_attendance("SP2 10 10 10 10 10").unwrap();
        s
    }

    #[test]
    fn report_orders_rows_by_attendance() {
        let s = sample();
        let report = attendance_report(&s);
        let lines: Vec<&str> = report.lines().collect();

        assert!(lines[0].starts_with("Id   Class          Tutor"));
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("SP2  Spinning"));
        assert!(lines[3].starts_with("AQ1  Aquacise"));
        assert_eq!(lines[4], "");
        assert_eq!(lines[5].trim(), "Overall Average: 6.50");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn empty_report_has_zero_average() {
        let report = attendance_report(&Schedule::new());
        assert!(report.ends_with("Overall Average: 0.00"));
    }

    #[test]
    fn timetable_marks_free_slots() {
        let t = timetable(&sample());
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(" 9-10         10-11        11-12"));
        assert!(lines[1].starts_with(" Aquacise     Available    Spinning"));
        assert!(lines[2].starts_with(" Maria                     Tom"));
        assert!(lines[0].trim_end().ends_with("15-16"));
    }
}
