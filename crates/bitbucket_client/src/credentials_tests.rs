use super::*;

#[test]
fn test_encode_basic_auth() {
    assert_eq!(encode_basic_auth("u", "pw"), "Basic dTpwdw==");
}

#[test]
fn test_encode_basic_auth_keeps_colons_in_password() {
    // Only the first colon separates the username from the password.
    assert_eq!(
        encode_basic_auth("deploy-bot", "a:b"),
        format!("Basic {}", STANDARD.encode("deploy-bot:a:b"))
    );
}

#[test]
fn test_authorization_header_is_sensitive() {
    let credentials = Credentials::new("u", SecretString::from("pw".to_string()));

    let header = credentials.authorization_header().unwrap();

    assert!(header.is_sensitive());
    assert_eq!(header.to_str().unwrap(), "Basic dTpwdw==");
}

#[test]
fn test_debug_output_hides_password() {
    let credentials = Credentials::new(
        "deploy-bot",
        SecretString::from("hunter2-app-password".to_string()),
    );

    let debug_output = format!("{:?}", credentials);

    assert!(debug_output.contains("deploy-bot"));
    assert!(!debug_output.contains("hunter2-app-password"));
}
