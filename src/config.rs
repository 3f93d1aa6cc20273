use log::debug;
use crate::error::Error;

pub const USERNAME_VAR: &str = "SALES_USERNAME";
pub const PASSWORD_VAR: &str = "SALES_PASSWORD";

/// The operator credentials the login gate compares against.
///
/// This is a plaintext placeholder gate, not an authentication system.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads both secrets from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads both secrets through `lookup`, failing on the first one that is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let username = lookup(USERNAME_VAR).ok_or(Error::MissingCredential(USERNAME_VAR))?;
        let password = lookup(PASSWORD_VAR).ok_or(Error::MissingCredential(PASSWORD_VAR))?;
        debug!("Loaded login credentials for user {}", username);
        Ok(Credentials::new(username, password))
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_reads_both_secrets() {
        let vars = HashMap::from([(USERNAME_VAR, "ana"), (PASSWORD_VAR, "secreto")]);
        let credentials = Credentials::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert!(credentials.matches("ana", "secreto"));
        assert!(!credentials.matches("ana", "otro"));
        assert!(!credentials.matches("otro", "secreto"));
    }

    #[test]
    fn test_from_lookup_missing_password() {
        let vars = HashMap::from([(USERNAME_VAR, "ana")]);
        let result = Credentials::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert!(matches!(result, Err(Error::MissingCredential(PASSWORD_VAR))));
    }
}
