use std::path::PathBuf;

use crate::error::{CampError, CampResult};

pub const DEFAULT_USERS_PATH: &str = ".data/users.txt";
pub const DEFAULT_CAMPS_PATH: &str = ".data/camps.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub users_path: PathBuf,
    pub camps_path: PathBuf,
    pub import_students: Option<PathBuf>,
    pub import_staff: Option<PathBuf>,
    pub performance_path: Option<PathBuf>,
    pub delimiter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users_path: PathBuf::from(DEFAULT_USERS_PATH),
            camps_path: PathBuf::from(DEFAULT_CAMPS_PATH),
            import_students: None,
            import_staff: None,
            performance_path: None,
            delimiter: ",".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Config),
    Help,
}

pub const USAGE: &str = "\
Camp Manager

Usage: camp-manager [OPTIONS]

Options:
  -u, --users <PATH>         User records (default: .data/users.txt)
  -c, --camps <PATH>         Camp snapshot (default: .data/camps.json)
  --import-students <CSV>    Add students from a name,email,faculty roster
  --import-staff <CSV>       Add staff from a name,email,faculty roster
  --performance <PATH>       Write committee points to PATH
  --delimiter <STR>          Delimiter for the performance report (default: ,)
  -h, --help                 Show this help";

fn value(flag: &str, next: Option<String>) -> CampResult<String> {
    next.filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CampError::Usage(format!("{flag} requires a value")))
}

/// Parses command-line arguments, program name already skipped.
pub fn parse_args(args: impl IntoIterator<Item = String>) -> CampResult<Command> {
    let mut config = Config::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--users" | "-u" => config.users_path = value(&arg, args.next())?.into(),
            "--camps" | "-c" => config.camps_path = value(&arg, args.next())?.into(),
            "--import-students" => config.import_students = Some(value(&arg, args.next())?.into()),
            "--import-staff" => config.import_staff = Some(value(&arg, args.next())?.into()),
            "--performance" => config.performance_path = Some(value(&arg, args.next())?.into()),
            "--delimiter" => config.delimiter = args.next().unwrap_or_default(),
            "--help" | "-h" => return Ok(Command::Help),
            other => {
                return Err(CampError::Usage(format!(
                    "unknown argument '{other}', use --help for usage"
                )))
            }
        }
    }

    if config.delimiter.is_empty() {
        return Err(CampError::Usage("--delimiter requires a value".into()));
    }
    Ok(Command::Run(config))
}
