use super::*;

#[test]
fn test_config_error_display() {
    let error = Error::Config("Missing settings: branch".to_string());
    assert_eq!(
        error.to_string(),
        "Configuration error: Missing settings: branch"
    );
}

#[test]
fn test_invalid_arguments_error_display() {
    let error = Error::InvalidArguments("--timeout must be greater than zero".to_string());
    assert_eq!(
        error.to_string(),
        "Invalid arguments: --timeout must be greater than zero"
    );
}

#[test]
fn test_client_error_display() {
    let error = Error::from(bitbucket_client::Error::InvalidBaseUrl("nope".to_string()));
    assert_eq!(
        error.to_string(),
        "Bitbucket client error: Invalid Bitbucket API base URL: nope"
    );
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
