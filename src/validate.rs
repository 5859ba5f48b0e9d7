//! Construction-time and generation-time checks

use crate::domain::{EnvValue, ExpectedVariable, Schema};
use crate::error::{Result, UnifiedEnvError};
use crate::logger::{LogLevel, Logger, LIB_NAME};

/// Validate construction options, returning the parsed log level.
///
/// Failures are written to the logger's `log` channel before being returned.
pub fn validate_config_options(log_level: &str, logger: &dyn Logger) -> Result<LogLevel> {
    match log_level.parse::<LogLevel>() {
        Ok(level) => Ok(level),
        Err(reason) => {
            let err = UnifiedEnvError::InvalidOptions(reason);
            logger.log(format_args!("*********{}*********", LIB_NAME));
            logger.log(format_args!("ERROR: ConfigOptions are invalid."));
            logger.log(format_args!("{}", err));
            Err(err)
        }
    }
}

/// Schema shape hook. The schema type already guarantees the key to
/// descriptor shape; default/acceptable/tie-breaker agreement is not checked.
pub fn validate_expected_variables(_schema: &Schema) -> Result<()> {
    Ok(())
}

/// Final type consistency hook run by `generate`; currently always passes.
pub fn final_types_match(_value: &EnvValue, _expected: &ExpectedVariable) -> bool {
    true
}

/// Error message when `value` is not in the declared acceptable values.
pub fn acceptable_value_error(value: &EnvValue, expected: &ExpectedVariable) -> Option<String> {
    let acceptable = expected.options()?.acceptable_values.as_ref()?;
    if acceptable.iter().any(|candidate| candidate == value) {
        return None;
    }
    Some(format!(
        "Does not have an acceptable value. Acceptable values are: {}",
        join_values(acceptable)
    ))
}

/// Join values with `, `, double-quoting strings.
pub fn join_values(values: &[EnvValue]) -> String {
    values
        .iter()
        .map(|value| match value {
            EnvValue::String(s) => format!("\"{}\"", s),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
