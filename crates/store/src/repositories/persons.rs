use std::path::Path;

use eyre::{Result, WrapErr};
use tutorbook_core::models::person::Person;

use crate::models::{JsonPerson, JsonRoster};
use crate::repositories::{read_if_exists, write_atomically};

pub async fn load_persons(path: &Path) -> Result<Vec<Person>> {
    tracing::debug!("Loading persons from {}", path.display());

    let Some(contents) = read_if_exists(path).await? else {
        return Ok(Vec::new());
    };

    let roster: JsonRoster = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("Malformed roster in {}", path.display()))?;

    let persons = roster
        .persons
        .iter()
        .map(JsonPerson::to_model)
        .collect::<Result<Vec<_>>>()
        .wrap_err_with(|| format!("Invalid person in {}", path.display()))?;

    tracing::debug!("Loaded {} persons", persons.len());
    Ok(persons)
}

pub async fn save_persons(path: &Path, persons: &[Person]) -> Result<()> {
    tracing::debug!("Saving {} persons to {}", persons.len(), path.display());

    let roster = JsonRoster {
        persons: persons.iter().map(JsonPerson::from_model).collect(),
    };
    let contents = serde_json::to_string_pretty(&roster)?;
    write_atomically(path, &contents).await
}
