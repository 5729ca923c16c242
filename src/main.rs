use std::path::Path;
use std::process;

use cams::config::{self, Command, Config};
use cams::error::CampResult;
use cams::queries::stats_queries;
use cams::store::{CampController, RosterKind, UserController};
use tracing::{error, info};

/// `RUST_LOG` controls verbosity, `info` by default.
fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}

fn ensure_parent(path: &Path) -> CampResult<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn load_users(path: &Path) -> CampResult<UserController> {
    if path.exists() {
        UserController::load_from(path)
    } else {
        info!(path = %path.display(), "No user file yet, starting empty");
        Ok(UserController::new())
    }
}

fn load_camps(path: &Path) -> CampResult<CampController> {
    if path.exists() {
        CampController::load_from(path)
    } else {
        info!(path = %path.display(), "No camp file yet, starting empty");
        Ok(CampController::new())
    }
}

fn run(config: &Config) -> CampResult<()> {
    let mut users = load_users(&config.users_path)?;
    let camps = load_camps(&config.camps_path)?;
    users.relink(&camps);

    if let Some(path) = &config.import_students {
        let added = users.import_roster(path, RosterKind::Student)?;
        println!("Imported {} student(s) from {}", added, path.display());
    }
    if let Some(path) = &config.import_staff {
        let added = users.import_roster(path, RosterKind::Staff)?;
        println!("Imported {} staff from {}", added, path.display());
    }
    if let Some(path) = &config.performance_path {
        let ranking = stats_queries::committee_ranking(&users);
        users.write_performance(path, &ranking, &config.delimiter)?;
        println!("Wrote points for {} committee member(s) to {}", ranking.len(), path.display());
    }

    ensure_parent(&config.users_path)?;
    ensure_parent(&config.camps_path)?;
    users.save_to(&config.users_path)?;
    camps.save_to(&config.camps_path)?;

    let stats = stats_queries::stats(&camps, &users);
    println!();
    println!("Camps: {} ({} visible)", stats.total_camps, stats.visible_camps);
    println!(
        "Users: {} student(s), {} committee member(s), {} staff",
        stats.students, stats.committee_members, stats.staff
    );
    println!(
        "Sign-ups: {} attendee(s), {} committee",
        stats.attendee_signups, stats.committee_signups
    );
    println!(
        "Open enquiries: {}, pending suggestions: {}",
        stats.open_enquiries, stats.pending_suggestions
    );
    if stats.awaiting_first_login > 0 {
        println!("{} account(s) have not logged in yet", stats.awaiting_first_login);
    }
    Ok(())
}

fn main() {
    setup_tracing();

    let config = match config::parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            println!("{}", config::USAGE);
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    if let Err(e) = run(&config) {
        error!(error = %e, "Run failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
