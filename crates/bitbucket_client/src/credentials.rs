//! Basic-Auth credentials for the Bitbucket API.
//!
//! Bitbucket Cloud accepts a username together with an app password (or API
//! token) over HTTP Basic authentication. The password is held in a
//! [`SecretString`] so it cannot end up in `Debug` output or log fields.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::Error;

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;

/// Username and app password used to authenticate a pipeline request.
#[derive(Debug)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Builds the value of the `Authorization` header.
    ///
    /// The returned header is flagged as sensitive so that HTTP client
    /// instrumentation does not print it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidHeader` if the encoded value is not a valid header value.
    pub fn authorization_header(&self) -> Result<HeaderValue, Error> {
        let encoded = encode_basic_auth(&self.username, self.password.expose_secret());
        let mut value = HeaderValue::from_str(&encoded)
            .map_err(|_| Error::InvalidHeader("Authorization".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// Encodes `username:password` as an HTTP Basic authorization value.
///
/// Uses the standard base64 alphabet with padding, e.g. `u` / `pw` becomes
/// `Basic dTpwdw==`.
fn encode_basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}
