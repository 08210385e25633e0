//! Payload validation for character and droid writes.
//!
//! Checks run in a fixed order and the first failure wins, so a payload with several problems
//! always reports the same message.

use crate::error::AppError;
use crate::model::{NewCharacter, NewDroid};
use regex::Regex;
use serde_json::{Number, Value};
use std::sync::LazyLock;

static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]").expect("valid regex"));

pub struct RequestValidator;

impl RequestValidator {
    /// `{name, description, age}`: all present and truthy, strings for the first two, a number
    /// for `age`, and no digits in `name`.
    pub fn character(body: &Value) -> Result<NewCharacter, AppError> {
        let (name, description, age) = (body.get("name"), body.get("description"), body.get("age"));
        if ![name, description, age].into_iter().all(is_truthy) {
            return Err(invalid("Name, description and age are required fields"));
        }
        let (Some(Value::String(name)), Some(Value::String(description))) = (name, description)
        else {
            return Err(invalid("Name and description must be strings"));
        };
        let Some(Value::Number(age)) = age else {
            return Err(invalid("Age must be a number"));
        };
        if DIGIT_RE.is_match(name) {
            return Err(invalid("Name cannot contain numbers"));
        }
        Ok(NewCharacter {
            name: name.clone(),
            description: description.clone(),
            age: age_column(age)?,
        })
    }

    /// `{name, description, belongs}`: all present, truthy, and strings.
    pub fn droid(body: &Value) -> Result<NewDroid, AppError> {
        let fields = [body.get("name"), body.get("description"), body.get("belongs")];
        if !fields.into_iter().all(is_truthy) {
            return Err(invalid("Name, description, and belongs are required fields"));
        }
        let [Some(Value::String(name)), Some(Value::String(description)), Some(Value::String(belongs))] =
            fields
        else {
            return Err(invalid("Name, description, and belongs must be strings"));
        };
        Ok(NewDroid {
            name: name.clone(),
            description: description.clone(),
            belongs: belongs.clone(),
        })
    }
}

fn invalid(msg: &str) -> AppError {
    AppError::Validation(msg.to_string())
}

/// Missing, `null`, `false`, `0` and `""` are falsy; everything else (including `[]` and `{}`) is not.
fn is_truthy(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Integer ages pass through; fractional ages round half away from zero.
fn age_column(n: &Number) -> Result<i64, AppError> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    match n.as_f64().map(f64::round) {
        Some(r) if r >= i64::MIN as f64 && r < i64::MAX as f64 => Ok(r as i64),
        _ => Err(invalid("Age is out of range")),
    }
}
