use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]{30,}$").unwrap());

const MIN_SKILL_LEN: usize = 3;

/// Precondition failures raised before any generation or extraction runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a valid skill (at least 3 characters).")]
    InvalidSkill,

    #[error("An API key is required. Pass --api-key or set GOOGLE_API_KEY.")]
    MissingApiKey,

    #[error("The API key format appears to be incorrect.")]
    InvalidApiKey,

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: String,
        min: String,
        max: String,
    },
}

/// Trim the skill and reject anything shorter than three characters.
pub fn validate_skill(skill: &str) -> Result<&str, InputError> {
    let trimmed = skill.trim();
    if trimmed.chars().count() < MIN_SKILL_LEN {
        return Err(InputError::InvalidSkill);
    }
    Ok(trimmed)
}

/// Shape check only; the key is never sent anywhere here.
pub fn validate_api_key(key: Option<&str>) -> Result<&str, InputError> {
    let key = key.map(str::trim).filter(|k| !k.is_empty()).ok_or(InputError::MissingApiKey)?;
    if !API_KEY_RE.is_match(key) {
        return Err(InputError::InvalidApiKey);
    }
    Ok(key)
}

pub fn validate_range<T: PartialOrd + ToString>(
    name: &'static str,
    value: T,
    min: T,
    max: T,
) -> Result<(), InputError> {
    if value < min || value > max {
        return Err(InputError::OutOfRange {
            name,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}

// ── Tests ──
