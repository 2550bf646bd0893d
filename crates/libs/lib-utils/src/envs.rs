//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.
//!
//! Blank values are treated the same as unset ones, so `JWT_SECRET=` in a
//! `.env` file still counts as missing.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    match env::var(name) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => Err(Error::MissingEnv(name)),
    }
}

/// Get an environment variable, falling back to `default` when it is missing.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    get_env(name).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Get and parse an environment variable, falling back to `default` when it is missing.
///
/// A value that is present but unparsable is still an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env_parse(name) {
        Err(Error::MissingEnv(_)) => Ok(default),
        other => other,
    }
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{name} must be set in environment"),
            Error::WrongFormat(name) => write!(fmt, "{name} has an invalid format"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; the process environment is shared across threads.

    #[test]
    fn test_get_env_missing() {
        assert_eq!(
            get_env("LIB_UTILS_TEST_NEVER_SET"),
            Err(Error::MissingEnv("LIB_UTILS_TEST_NEVER_SET"))
        );
    }

    #[test]
    fn test_get_env_blank_counts_as_missing() {
        env::set_var("LIB_UTILS_TEST_BLANK", "   ");
        assert!(get_env("LIB_UTILS_TEST_BLANK").is_err());
        assert_eq!(get_env_or("LIB_UTILS_TEST_BLANK", "fallback"), "fallback");
    }

    #[test]
    fn test_get_env_parse_or() {
        assert_eq!(get_env_parse_or("LIB_UTILS_TEST_PORT_UNSET", 3000u16), Ok(3000));

        env::set_var("LIB_UTILS_TEST_PORT", " 8081 ");
        assert_eq!(get_env_parse_or("LIB_UTILS_TEST_PORT", 3000u16), Ok(8081));

        env::set_var("LIB_UTILS_TEST_PORT_BAD", "eighty");
        assert_eq!(
            get_env_parse_or("LIB_UTILS_TEST_PORT_BAD", 3000u16),
            Err(Error::WrongFormat("LIB_UTILS_TEST_PORT_BAD"))
        );
    }
}
