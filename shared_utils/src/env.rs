use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// Reads an optional override from the environment.
///
/// Unset, non-unicode and blank values are all treated as "no override", so
/// callers can fall back to their configured value with a single `if let`.
pub fn get_env_override(name: &str) -> Option<String> {
    get_env_var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn missing_variable_is_reported_by_name() {
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_MISSING") };
        let err = get_env_var("SHARED_UTILS_TEST_MISSING").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing environment variable: SHARED_UTILS_TEST_MISSING"
        );
    }

    #[test]
    #[serial]
    fn blank_override_is_ignored() {
        unsafe { std::env::set_var("SHARED_UTILS_TEST_BLANK", "   ") };
        assert_eq!(get_env_override("SHARED_UTILS_TEST_BLANK"), None);

        unsafe { std::env::set_var("SHARED_UTILS_TEST_BLANK", " data.csv ") };
        assert_eq!(
            get_env_override("SHARED_UTILS_TEST_BLANK").as_deref(),
            Some("data.csv")
        );
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_BLANK") };
    }
}
