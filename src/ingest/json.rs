//! JSON uploads: a bare array of profiles or `{"employees": [...]}`.

use serde_json::Value;

use crate::core::Profile;
use crate::error::{Result, RosterError};

pub fn parse(text: &str) -> Result<Vec<Profile>> {
    let value: Value = serde_json::from_str(text).map_err(|err| invalid(&err))?;
    let list = match value {
        Value::Object(mut object) => object.remove("employees").ok_or_else(|| {
            RosterError::InvalidInput(
                "Failed to parse: expected a list of profiles or an object with `employees`"
                    .to_string(),
            )
        })?,
        other => other,
    };
    serde_json::from_value(list).map_err(|err| invalid(&err))
}

fn invalid(err: &serde_json::Error) -> RosterError {
    RosterError::InvalidInput(format!("Failed to parse: {err}"))
}
