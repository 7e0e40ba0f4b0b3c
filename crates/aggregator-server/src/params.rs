//! Typed extraction of HTTP path parameters.
//!
//! Stateless helpers over a request's path-parameter map. Each returns a
//! typed value or a [`ParamError`] carrying the parameter name and, for
//! parsing failures, the offending value and a human-readable reason;
//! callers pick an HTTP status by inspecting the error kind.

use std::collections::HashMap;

use thiserror::Error;

/// Structured failure while extracting a path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// The named parameter is absent from the route.
    #[error("missing param {0}")]
    Missing(String),

    /// The parameter is present but its value does not parse.
    #[error("Error during parsing param {name} with value {value}. Error: {reason}")]
    Parsing {
        name: String,
        value: String,
        reason: &'static str,
    },
}

/// Retrieve a parameter from a route like `/organizations/{organization}`.
pub fn get_param<'a>(
    params: &'a HashMap<String, String>,
    name: &str,
) -> Result<&'a str, ParamError> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| ParamError::Missing(name.to_string()))
}

/// Retrieve a parameter and parse it as a base-10 64-bit integer.
pub fn get_int_param(params: &HashMap<String, String>, name: &str) -> Result<i64, ParamError> {
    let value = get_param(params, name)?;
    value.parse::<i64>().map_err(|_| ParamError::Parsing {
        name: name.to_string(),
        value: value.to_string(),
        reason: "integer expected",
    })
}

/// Retrieve a parameter and require it to be a positive integer.
pub fn get_positive_int_param(
    params: &HashMap<String, String>,
    name: &str,
) -> Result<i64, ParamError> {
    let value = get_int_param(params, name)?;
    if value <= 0 {
        return Err(ParamError::Parsing {
            name: name.to_string(),
            value: value.to_string(),
            reason: "positive integer expected",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // ---------------------------------------------------------------
    // get_param
    // ---------------------------------------------------------------

    #[test]
    fn test_get_param_present() {
        let p = params(&[("organization", "42")]);
        assert_eq!(get_param(&p, "organization").unwrap(), "42");
    }

    #[test]
    fn test_get_param_missing() {
        let p = params(&[]);
        assert_eq!(
            get_param(&p, "organization").unwrap_err(),
            ParamError::Missing("organization".to_string())
        );
    }

    #[test]
    fn test_missing_param_display() {
        let err = ParamError::Missing("organization".to_string());
        assert_eq!(err.to_string(), "missing param organization");
    }

    // ---------------------------------------------------------------
    // get_int_param
    // ---------------------------------------------------------------

    #[test]
    fn test_get_int_param_valid() {
        let p = params(&[("organization", "42")]);
        assert_eq!(get_int_param(&p, "organization").unwrap(), 42);
    }

    #[test]
    fn test_get_int_param_negative_is_still_an_integer() {
        let p = params(&[("organization", "-5")]);
        assert_eq!(get_int_param(&p, "organization").unwrap(), -5);
    }

    #[test]
    fn test_get_int_param_non_numeric() {
        let p = params(&[("organization", "abc")]);
        assert_eq!(
            get_int_param(&p, "organization").unwrap_err(),
            ParamError::Parsing {
                name: "organization".to_string(),
                value: "abc".to_string(),
                reason: "integer expected",
            }
        );
    }

    #[test]
    fn test_get_int_param_missing_propagates() {
        let p = params(&[]);
        assert!(matches!(
            get_int_param(&p, "organization").unwrap_err(),
            ParamError::Missing(_)
        ));
    }

    #[test]
    fn test_parsing_error_display() {
        let err = ParamError::Parsing {
            name: "organization".to_string(),
            value: "abc".to_string(),
            reason: "integer expected",
        };
        assert_eq!(
            err.to_string(),
            "Error during parsing param organization with value abc. Error: integer expected"
        );
    }

    // ---------------------------------------------------------------
    // get_positive_int_param
    // ---------------------------------------------------------------

    #[test]
    fn test_get_positive_int_param_valid() {
        let p = params(&[("organization", "42")]);
        assert_eq!(get_positive_int_param(&p, "organization").unwrap(), 42);
    }

    #[test]
    fn test_get_positive_int_param_zero() {
        let p = params(&[("organization", "0")]);
        assert_eq!(
            get_positive_int_param(&p, "organization").unwrap_err(),
            ParamError::Parsing {
                name: "organization".to_string(),
                value: "0".to_string(),
                reason: "positive integer expected",
            }
        );
    }

    #[test]
    fn test_get_positive_int_param_negative() {
        let p = params(&[("organization", "-5")]);
        assert_eq!(
            get_positive_int_param(&p, "organization").unwrap_err(),
            ParamError::Parsing {
                name: "organization".to_string(),
                value: "-5".to_string(),
                reason: "positive integer expected",
            }
        );
    }

    #[test]
    fn test_get_positive_int_param_non_numeric_reason_unchanged() {
        // Non-numeric input fails the integer parse first; the reason
        // stays "integer expected".
        let p = params(&[("organization", "abc")]);
        assert!(matches!(
            get_positive_int_param(&p, "organization").unwrap_err(),
            ParamError::Parsing {
                reason: "integer expected",
                ..
            }
        ));
    }
}
