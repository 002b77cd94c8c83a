//! Delimited-text uploads (CSV with a header row).
//!
//! Multi-value columns (`skills`, `projects`, `domain_experience`) hold
//! `;`-separated items. Blank optional cells take their defaults: `0` for
//! integers, `None` for location, `"available"` for availability.

use crate::core::{AVAILABLE, Profile};
use crate::error::{Result, RosterError};

const COLUMNS: [&str; 9] = [
    "id",
    "name",
    "title",
    "skills",
    "experience_years",
    "projects",
    "domain_experience",
    "location",
    "availability",
];

/// One record's cells, looked up by header name. Absent columns and short
/// records read as empty.
#[derive(Debug)]
struct Row {
    id: String,
    name: String,
    title: String,
    skills: String,
    experience_years: String,
    projects: String,
    domain_experience: String,
    location: String,
    availability: String,
}

impl Row {
    fn from_record(record: &::csv::StringRecord, positions: &[Option<usize>; 9]) -> Self {
        let cell = |column: usize| {
            positions[column]
                .and_then(|i| record.get(i))
                .unwrap_or("")
                .to_string()
        };
        Self {
            id: cell(0),
            name: cell(1),
            title: cell(2),
            skills: cell(3),
            experience_years: cell(4),
            projects: cell(5),
            domain_experience: cell(6),
            location: cell(7),
            availability: cell(8),
        }
    }
}

pub fn parse(text: &str) -> Result<Vec<Profile>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::None)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(invalid)?.clone();
    let positions = COLUMNS.map(|column| headers.iter().position(|h| h.trim() == column));

    let mut profiles = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(invalid)?;
        profiles.push(to_profile(Row::from_record(&record, &positions), line + 2)?);
    }
    Ok(profiles)
}

fn invalid(err: ::csv::Error) -> RosterError {
    RosterError::InvalidInput(format!("Failed to parse: {err}"))
}

fn to_profile(row: Row, line: usize) -> Result<Profile> {
    let domain = split_list(&row.domain_experience);
    Ok(Profile {
        id: parse_int(&row.id, "id", line)?,
        name: row.name,
        title: row.title,
        skills: split_list(&row.skills),
        experience_years: parse_int(&row.experience_years, "experience_years", line)?,
        projects: split_list(&row.projects),
        domain_experience: Some(domain),
        location: Some(row.location).filter(|loc| !loc.is_empty()),
        availability: if row.availability.is_empty() {
            AVAILABLE.to_string()
        } else {
            row.availability
        },
    })
}

fn split_list(cell: &str) -> Vec<String> {
    cell.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_int<T>(cell: &str, column: &str, line: usize) -> Result<T>
where
    T: std::str::FromStr + Default,
    T::Err: std::fmt::Display,
{
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(T::default());
    }
    cell.parse::<T>().map_err(|err| {
        RosterError::InvalidInput(format!(
            "Failed to parse: line {line}: invalid {column} {cell:?}: {err}"
        ))
    })
}
