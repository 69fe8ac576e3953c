extern crate timetable;

extern crate ansi_term;
extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

use std::path::PathBuf;

use ansi_term::{Colour, Style};
use clap::{Arg, ArgMatches, App, AppSettings, SubCommand};
use env_logger::Env;

use timetable::{config, files, report, Config, Schedule};
use timetable::files::LoadSummary;
use timetable::errors::*;

/// The styles used when printing the timetable, the report and messages.
#[derive(Debug, Clone)]
struct StyleSet {
    normal: Style,
    /// The hour line of the timetable and the labels of `config`
    title: Style,
    /// Confirmation that the classes file changed
    success: Style,
    /// Errors and skipped input lines
    error: Style,
}

impl StyleSet {
    /// Preset for the --no-ansi option (no style)
    fn no_ansi() -> StyleSet {
        StyleSet {
            normal: Style::new(),
            title: Style::new(),
            success: Style::new(),
            error: Style::new(),
        }
    }

    /// Preset for the normal "fancy" style
    fn fancy() -> StyleSet {
        StyleSet {
            normal: Style::new(),
            title: Colour::White.bold(),
            success: Colour::Green.normal(),
            error: Colour::Red.normal(),
        }
    }
}

/// Returns styled text (using a format string syntax)
macro_rules! style {
    ($style:expr, $($arg:tt)*) => {
        {{
            $style.paint(format!( $($arg)*) )
        }}
    }
}

/// Prints a line of text in the given style
macro_rules! styleln {
    ($style:expr, $($arg:tt)*) => {
        println!("{}", style!($style, $($arg)*))
    }
}

pub fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let matches = App::new("timetable")
        .version("0.1.0")
        .author("Ian Johnson <ianprime0509@gmail.com>")
        .about("A fitness class timetable and attendance manager")
        .setting(AppSettings::ColoredHelp)
        .arg(Arg::with_name("no-ansi")
            .help("Disables fancy text output")
            .short("n")
            .long("no-ansi"))
        .arg(Arg::with_name("classes")
            .long("classes")
            .value_name("FILE")
            .help("The classes file to read")
            .takes_value(true))
        .arg(Arg::with_name("attendances")
            .long("attendances")
            .value_name("FILE")
            .help("The attendances file to read")
            .takes_value(true))
        .arg(Arg::with_name("output")
            .short("o")
            .long("output")
            .value_name("FILE")
            .help("The file classes are saved to")
            .takes_value(true))
        .subcommand(SubCommand::with_name("timetable").about("Shows the classes at each hour"))
        .subcommand(SubCommand::with_name("report")
            .about("Shows the attendance report, best attended classes first"))
        .subcommand(SubCommand::with_name("add")
            .about("Adds a class at the earliest free hour and saves the classes")
            .arg(Arg::with_name("ID")
                .help("The ID of the new class")
                .required(true))
            .arg(Arg::with_name("NAME")
                .help("The name of the new class")
                .required(true))
            .arg(Arg::with_name("TUTOR")
                .help("The tutor of the new class")
                .required(true))
            .after_help("Each of the ID, name and tutor must be a single word, and the ID must \
                         not already be in use."))
        .subcommand(SubCommand::with_name("remove")
            .about("Removes a class and saves the classes")
            .arg(Arg::with_name("ID")
                .help("The ID of the class to remove")
                .required(true)))
        .subcommand(SubCommand::with_name("save").about("Saves the classes to the output file"))
        .subcommand(SubCommand::with_name("config").about("Shows the files in use"))
        .after_help("The classes file has one class per line: an ID, name, tutor and start hour, \
                     separated by spaces. The attendances file has one line per class: the ID \
                     followed by the attendance for each of the five weeks. Default locations \
                     can be set in config.json in the config directory (see `timetable config`).")
        .get_matches();

    // Whether we should disable the fancy ANSI terminal text
    let no_ansi = matches.is_present("no-ansi");
    // The style to use
    let style_set = if no_ansi {
        StyleSet::no_ansi()
    } else {
        StyleSet::fancy()
    };

    // Handle errors nicely
    if let Err(ref e) = run(&matches, &style_set) {
        styleln!(style_set.error, "Error: {}", e);

        for e in e.iter().skip(1) {
            styleln!(style_set.error, "Caused by: {}", e);
        }

        if let Some(backtrace) = e.backtrace() {
            styleln!(style_set.error, "Backtrace: {:?}", backtrace);
        }

        std::process::exit(1);
    }
}

/// The main program logic.
/// Each subcommand should do its own printing, except for errors, which are returned.
fn run(m: &ArgMatches, style_set: &StyleSet) -> Result<()> {
    let config = effective_config(m)?;

    if let ("config", Some(_)) = m.subcommand() {
        return show_config(&config, style_set);
    }

    let mut schedule = load_schedule(&config, style_set);

    match m.subcommand() {
        ("report", Some(_)) => show_report(&schedule),
        ("add", Some(sub_m)) => add(sub_m, &mut schedule, &config, style_set),
        ("remove", Some(sub_m)) => remove(sub_m, &mut schedule, &config, style_set),
        ("save", Some(_)) => save(&schedule, &config, style_set),
        _ => show_timetable(&schedule, style_set),
    }
}

/// Reads the config file and applies any paths given on the command line.
fn effective_config(m: &ArgMatches) -> Result<Config> {
    let mut config = match Config::load() {
        Ok(c) => c,
        Err(Error(ErrorKind::CannotLocateConfig, _)) => {
            warn!("cannot locate config directory; using default file locations");
            Config::default()
        }
        Err(e) => return Err(e).chain_err(|| "could not read config"),
    };

    if let Some(p) = m.value_of("classes") {
        config.classes_in = PathBuf::from(p);
    }
    if let Some(p) = m.value_of("attendances") {
        config.attendances_in = PathBuf::from(p);
    }
    if let Some(p) = m.value_of("output") {
        config.classes_out = PathBuf::from(p);
    }
    Ok(config)
}

/// Builds the schedule from the classes file and then the attendances file.
/// Once classes have been saved, the saved file is read in place of the
/// input file, so each run continues from the last one.
///
/// A file that cannot be read is reported and skipped, so the program
/// carries on with whatever could be loaded.
fn load_schedule(config: &Config, style_set: &StyleSet) -> Schedule {
    let mut schedule = Schedule::new();

    match files::load_current_classes(&mut schedule, config) {
        Ok(summary) => report_skipped(&summary, "classes", style_set),
        Err(e) => styleln!(style_set.error, "{}", e),
    }
    match files::load_attendances(&mut schedule, &config.attendances_in) {
        Ok(summary) => report_skipped(&summary, "attendances", style_set),
        Err(e) => styleln!(style_set.error, "{}", e),
    }

    schedule
}

/// Prints any lines of an input file that had to be skipped.
fn report_skipped(summary: &LoadSummary, file: &str, style_set: &StyleSet) {
    for &(n, ref e) in &summary.rejected {
        styleln!(style_set.error, "{} file, line {}: {}", file, n, e);
    }

    match summary.rejected.len() {
        0 => {}
        1 => styleln!(style_set.error, "1 line of the {} file was skipped", file),
        n @ _ => styleln!(style_set.error, "{} lines of the {} file were skipped", n, file),
    }
}

/// The default (`timetable`) subcommand logic.
fn show_timetable(schedule: &Schedule, style_set: &StyleSet) -> Result<()> {
    let text = report::timetable(schedule);
    let mut lines = text.lines();

    if let Some(times) = lines.next() {
        styleln!(style_set.title, "{}", times);
    }
    for l in lines {
        styleln!(style_set.normal, "{}", l);
    }
    Ok(())
}

/// The `report` subcommand logic.
fn show_report(schedule: &Schedule) -> Result<()> {
    println!("{}", report::attendance_report(schedule));
    Ok(())
}

/// The `add` subcommand logic.
fn add(m: &ArgMatches, schedule: &mut Schedule, config: &Config, style_set: &StyleSet) -> Result<()> {
    // These are required arguments
    let id = m.value_of("ID").unwrap_or("").trim();
    let name = m.value_of("NAME").unwrap_or("").trim();
    let tutor = m.value_of("TUTOR").unwrap_or("").trim();

    let hour = schedule.add_class(id, name, tutor).chain_err(|| "could not add class")?;
    save(schedule, config, style_set)?;

    styleln!(style_set.success, "Added class {} at {}:00", id, hour);
    Ok(())
}

/// The `remove` subcommand logic.
fn remove(m: &ArgMatches, schedule: &mut Schedule, config: &Config, style_set: &StyleSet) -> Result<()> {
    let id = m.value_of("ID").unwrap_or("").trim();
    if id.is_empty() {
        bail!(ErrorKind::InvalidInput("please enter the ID of the class you wish to delete".into()));
    }

    let class = schedule.delete_by_id(id).chain_err(|| "could not remove class")?;
    save(schedule, config, style_set)?;

    styleln!(style_set.success,
             "Removed class {} ({}) from {}:00",
             class.id(),
             class.name(),
             class.start_hour());
    Ok(())
}

/// The `save` subcommand logic.
fn save(schedule: &Schedule, config: &Config, style_set: &StyleSet) -> Result<()> {
    files::save_classes(schedule, &config.classes_out).chain_err(|| "could not save classes")?;
    styleln!(style_set.success,
             "Saved {} classes to '{}'",
             schedule.len(),
             config.classes_out.display());
    Ok(())
}

/// The `config` subcommand logic.
fn show_config(config: &Config, style_set: &StyleSet) -> Result<()> {
    match config::config_path() {
        Ok(p) => {
            println!("{} {}",
                     style!(style_set.title, "{:20}", "Config file:"),
                     style!(style_set.normal, "{}", p.display()))
        }
        Err(e) => styleln!(style_set.error, "{}", e),
    }

    let rows = [("Classes file:", &config.classes_in),
                ("Attendances file:", &config.attendances_in),
                ("Output file:", &config.classes_out)];
    for &(label, path) in &rows {
        println!("{} {}",
                 style!(style_set.title, "{:20}", label),
                 style!(style_set.normal, "{}", path.display()));
    }
    Ok(())
}
