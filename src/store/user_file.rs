//! Flat text formats for users: the saved user list, roster imports and the
//! committee performance report.

use crate::error::{CampError, CampResult};
use crate::model::{Camp, Id, Role, User, DEFAULT_PASSWORD};
use crate::validation;

const FIELD_COUNT: usize = 6;
const COMMITTEE_TAG: &str = "Committee";

/// Which kind of account a roster file creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterKind {
    Student,
    Staff,
}

fn type_tag(role: &Role) -> String {
    match role {
        Role::Student => "Student".into(),
        Role::Staff => "Staff".into(),
        Role::Committee { camp_id, points } => format!("{COMMITTEE_TAG}:{camp_id}:{points}"),
    }
}

fn parse_type_tag(tag: &str, line: usize) -> CampResult<Role> {
    let malformed = |reason: String| CampError::Malformed { line, reason };

    match tag {
        "Student" => Ok(Role::Student),
        "Staff" => Ok(Role::Staff),
        _ => {
            let mut parts = tag.split(':');
            if parts.next() != Some(COMMITTEE_TAG) {
                return Err(malformed(format!("unknown type tag '{tag}'")));
            }
            let (Some(camp), Some(points), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(malformed(format!("bad committee tag '{tag}'")));
            };
            let camp_id = camp
                .parse::<Id<Camp>>()
                .map_err(|e| malformed(format!("bad camp id '{camp}': {e}")))?;
            let points = points
                .parse::<u32>()
                .map_err(|e| malformed(format!("bad points '{points}': {e}")))?;
            Ok(Role::Committee { camp_id, points })
        }
    }
}

fn parse_flag(value: &str, line: usize) -> CampResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(CampError::Malformed {
            line,
            reason: format!("expected true or false, got '{other}'"),
        }),
    }
}

/// Fails if any free-text field of `user` would break its saved line.
pub fn check_record_fields(user: &User) -> CampResult<()> {
    validation::record_field(&user.name, "name")?;
    validation::record_field(&user.user_id, "user id")?;
    validation::record_field(&user.password, "password")?;
    validation::record_field(&user.faculty, "faculty")
}

/// One saved line: `type,name,userID,password,faculty,firstLogin`.
pub fn representation(user: &User) -> CampResult<String> {
    check_record_fields(user)?;
    Ok([
        type_tag(&user.role),
        user.name.clone(),
        user.user_id.clone(),
        user.password.clone(),
        user.faculty.clone(),
        user.first_login.to_string(),
    ]
    .join(","))
}

/// Parses one saved line. `line` is 1-based and only used in errors.
pub fn parse_record(record: &str, line: usize) -> CampResult<User> {
    let values: Vec<&str> = record.split(',').map(str::trim).collect();
    if values.len() != FIELD_COUNT {
        return Err(CampError::Malformed {
            line,
            reason: format!("expected {FIELD_COUNT} fields, found {}", values.len()),
        });
    }

    let role = parse_type_tag(values[0], line)?;
    let (name, user_id, password, faculty) = (
        values[1].to_string(),
        values[2].to_string(),
        values[3].to_string(),
        values[4].to_string(),
    );
    let mut user = match role {
        Role::Staff => User::staff(name, user_id, password, faculty),
        _ => User::student(name, user_id, password, faculty),
    };
    user.role = role;
    user.first_login = parse_flag(values[5], line)?;
    Ok(user)
}

/// Parses a whole saved user file. Any bad line fails the whole parse.
pub fn parse_users(text: &str) -> CampResult<Vec<User>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_record(line, i + 1))
        .collect()
}

/// Parses a `name,email,faculty` roster with a header line. The login is the
/// local part of the email and every account starts with the default password.
pub fn parse_roster(text: &str, kind: RosterKind) -> CampResult<Vec<User>> {
    text.lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            let [name, email, faculty] = values[..] else {
                return Err(CampError::Malformed {
                    line: i + 1,
                    reason: format!("expected 3 fields, found {}", values.len()),
                });
            };
            let user_id = email.split('@').next().unwrap_or_default().trim();
            if user_id.is_empty() {
                return Err(CampError::Malformed {
                    line: i + 1,
                    reason: format!("cannot derive a login from '{email}'"),
                });
            }
            let (name, user_id, faculty) = (name.to_string(), user_id.to_string(), faculty.to_string());
            let password = DEFAULT_PASSWORD.to_string();
            let mut user = match kind {
                RosterKind::Student => User::student(name, user_id, password, faculty),
                RosterKind::Staff => User::staff(name, user_id, password, faculty),
            };
            user.email = Some(email.to_string());
            user.first_login = true;
            Ok(user)
        })
        .collect()
}

/// One `userID<delimiter>points` line per committee member.
pub fn performance_report(committees: &[&User], delimiter: &str) -> String {
    committees
        .iter()
        .filter_map(|user| {
            user.points()
                .map(|points| format!("{}{delimiter}{points}\n", user.user_id))
        })
        .collect()
}
