use std::env;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::warn;

/// Raw value of `name`, trimmed; unset and blank variables are both `None`
fn read_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Reads and parses an environment variable, falling back to `default`
///
/// Unset or blank variables yield `default` silently. A value that does not
/// parse yields `default` with a warning naming the variable; the value
/// itself is not logged since it may be a credential.
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match read_env(env_var) {
        Some(raw) => raw.parse::<T>().unwrap_or_else(|e| {
            warn!("Ignoring {}: cannot parse value ({:?}), using default", env_var, e);
            default
        }),
        None => default,
    }
}

/// Reads and parses an environment variable
///
/// # Returns
/// `None` when the variable is unset, blank or does not parse as `T`.
pub fn get_env_or_none<T: FromStr>(env_var: &str) -> Option<T>
where
    <T as FromStr>::Err: Debug,
{
    read_env(env_var).and_then(|raw| raw.parse::<T>().ok())
}
