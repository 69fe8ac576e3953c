// For `error_chain!`
#![recursion_limit = "1024"]

#[macro_use]
extern crate serde_derive;

extern crate app_dirs;
extern crate serde;
extern crate serde_json;

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

pub mod errors {
    error_chain!{
        errors {
            /// A line of class or attendance input could not be parsed.
            Parse(t: String) {
                description("parse error")
                display("parse error: {}", t)
            }
            /// No class with the given ID is in the schedule.
            ClassNotFound(id: String) {
                description("class not found")
                display("there is no class with the ID {}", id)
            }
            /// Every slot of the schedule is occupied.
            ScheduleFull {
                description("schedule is full")
                display("there is no room for another class")
            }
            /// A week, hour or slot index outside its valid range.
            OutOfRange(t: String) {
                description("value out of range")
                display("out of range: {}", t)
            }
            /// The class ID is already used by another class in the schedule.
            DuplicateClass(id: String) {
                description("class already exists")
                display("the class ID {} already exists", id)
            }
            /// User supplied class details were rejected.
            InvalidInput(t: String) {
                description("invalid input")
                display("{}", t)
            }
            /// The user's config directory could not be found or deduced.
            CannotLocateConfig {
                description("cannot locate config directory")
            }
            /// An IO error (usually caused by `std::io::Error`).
            Io(t: String) {
                description("io error")
                display("{}", t)
            }
            /// A JSON error in the config file (usually caused by `serde_json::Error`).
            Json(t: String) {
                description("json error")
                display("{}", t)
            }
        }
    }
}

pub use errors::*;

pub mod class;
pub mod schedule;
pub mod config;
pub mod files;
pub mod report;

pub use class::FitnessClass;
pub use config::Config;
pub use schedule::Schedule;
