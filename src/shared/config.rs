use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{name} must be a positive integer, got {value:?}")]
  InvalidNumber { name: &'static str, value: String },
  #[error("{name} must be between {min} and {max}, got {value}")]
  OutOfRange {
    name: &'static str,
    value: u32,
    min: u32,
    max: u32,
  },
}

/// Costs bcrypt accepts. Anything outside fails every hash at runtime.
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Clone, Debug)]
pub struct Config {
  pub host: String,
  pub jwt_secret: String,
  pub bcrypt_cost: u32,
  pub hash_threads: usize,
  pub mongodb_uri: String,
  pub mongodb_database: String,
}

impl Config {
  /// Reads the configuration from the process environment. Call
  /// `dotenvy::dotenv()` beforehand to pick up a local `.env` file.
  pub fn from_env() -> Result<Self, ConfigError> {
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let jwt_secret =
      env::var("JWT_SECRET").unwrap_or_else(|_| "DEV_JWT_SECRET".to_string());
    let bcrypt_cost =
      bcrypt_cost(parse_number("BCRYPT_COST", bcrypt::DEFAULT_COST)?)?;
    let hash_threads = parse_number("HASH_THREADS", 4)?;
    let mongodb_uri = env::var("MONGODB_URI")
      .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let mongodb_database =
      env::var("MONGODB_DATABASE").unwrap_or_else(|_| "rentdesk".to_string());
    Ok(Self {
      host,
      jwt_secret,
      bcrypt_cost,
      hash_threads,
      mongodb_uri,
      mongodb_database,
    })
  }
}

fn bcrypt_cost(value: u32) -> Result<u32, ConfigError> {
  if BCRYPT_COST_RANGE.contains(&value) {
    Ok(value)
  } else {
    Err(ConfigError::OutOfRange {
      name: "BCRYPT_COST",
      value,
      min: *BCRYPT_COST_RANGE.start(),
      max: *BCRYPT_COST_RANGE.end(),
    })
  }
}

fn parse_number<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
  T: std::str::FromStr + PartialOrd + Default,
{
  match env::var(name) {
    Ok(value) => match value.trim().parse::<T>() {
      Ok(number) if number > T::default() => Ok(number),
      _ => Err(ConfigError::InvalidNumber { name, value }),
    },
    Err(_) => Ok(default),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // Each test uses its own variable name so they can run in parallel.
  #[test]
  fn test_parse_number_defaults_when_unset() {
    env::remove_var("RENTDESK_TEST_UNSET");
    assert_eq!(parse_number("RENTDESK_TEST_UNSET", 7u32).unwrap(), 7);
  }

  #[test]
  fn test_parse_number_reads_value() {
    env::set_var("RENTDESK_TEST_SET", " 12 ");
    assert_eq!(parse_number("RENTDESK_TEST_SET", 7u32).unwrap(), 12);
  }

  #[test]
  fn test_parse_number_rejects_garbage_and_zero() {
    env::set_var("RENTDESK_TEST_GARBAGE", "twelve");
    assert!(parse_number("RENTDESK_TEST_GARBAGE", 7u32).is_err());

    env::set_var("RENTDESK_TEST_ZERO", "0");
    let error = parse_number("RENTDESK_TEST_ZERO", 7usize).unwrap_err();
    assert_eq!(
      error.to_string(),
      r#"RENTDESK_TEST_ZERO must be a positive integer, got "0""#
    );
  }

  #[test]
  fn test_bcrypt_cost_outside_supported_range_is_rejected() {
    // The only test that sets BCRYPT_COST.
    for cost in ["3", "32"] {
      env::set_var("BCRYPT_COST", cost);
      let error = Config::from_env().unwrap_err();
      assert!(matches!(
        error,
        ConfigError::OutOfRange {
          name: "BCRYPT_COST",
          ..
        }
      ));
    }
    env::remove_var("BCRYPT_COST");

    assert_eq!(
      bcrypt_cost(32).unwrap_err().to_string(),
      "BCRYPT_COST must be between 4 and 31, got 32"
    );
  }

  #[test]
  fn test_bcrypt_cost_bounds_are_accepted() {
    assert_eq!(bcrypt_cost(4).unwrap(), 4);
    assert_eq!(bcrypt_cost(31).unwrap(), 31);
    assert_eq!(
      bcrypt_cost(bcrypt::DEFAULT_COST).unwrap(),
      bcrypt::DEFAULT_COST
    );
  }
}
