use super::*;

#[test]
fn test_from_status_classification() {
    assert_eq!(
        DeploymentOutcome::from_status(201, "acme/website"),
        DeploymentOutcome::Started {
            project: "acme/website".to_string()
        }
    );
    assert_eq!(
        DeploymentOutcome::from_status(400, "p"),
        DeploymentOutcome::InvalidRequest
    );
    assert_eq!(
        DeploymentOutcome::from_status(404, "p"),
        DeploymentOutcome::NotFound
    );
    assert_eq!(
        DeploymentOutcome::from_status(500, "p"),
        DeploymentOutcome::UnexpectedResponse { status: 500 }
    );
}

#[test]
fn test_other_success_codes_are_unexpected() {
    // Bitbucket answers a created pipeline with 201; 200 means something else happened.
    assert_eq!(
        DeploymentOutcome::from_status(200, "p"),
        DeploymentOutcome::UnexpectedResponse { status: 200 }
    );
    assert_eq!(
        DeploymentOutcome::from_status(401, "p"),
        DeploymentOutcome::UnexpectedResponse { status: 401 }
    );
}

#[test]
fn test_messages() {
    assert_eq!(
        DeploymentOutcome::from_status(201, "acme/website").message(),
        "Starting deploy to acme/website"
    );
    assert_eq!(
        DeploymentOutcome::InvalidRequest.message(),
        "Failed to start deployment: invalid request"
    );
    assert_eq!(
        DeploymentOutcome::NotFound.message(),
        "Failed to start deployment: the account or repository was not found"
    );
    assert_eq!(
        DeploymentOutcome::UnexpectedResponse { status: 503 }.message(),
        "Failed to start deployment: unexpected response from the deployment pipeline"
    );
    assert_eq!(
        DeploymentOutcome::TransportError {
            detail: "connection refused".to_string()
        }
        .message(),
        "Failed to start deployment: unknown error with the deployment pipeline"
    );
    assert_eq!(
        DeploymentOutcome::MissingConfig {
            missing: vec![ConfigKey::Password]
        }
        .message(),
        "Failed to start deployment: invalid configuration"
    );
}

#[test]
fn test_display_matches_message() {
    let outcome = DeploymentOutcome::NotFound;

    assert_eq!(outcome.to_string(), outcome.message());
}

#[test]
fn test_status_only_for_http_outcomes() {
    assert_eq!(DeploymentOutcome::from_status(201, "p").status(), Some(201));
    assert_eq!(
        DeploymentOutcome::UnexpectedResponse { status: 502 }.status(),
        Some(502)
    );
    assert_eq!(
        DeploymentOutcome::TransportError {
            detail: "dns".to_string()
        }
        .status(),
        None
    );
    assert_eq!(
        DeploymentOutcome::MissingConfig { missing: vec![] }.status(),
        None
    );
}

#[test]
fn test_is_started() {
    assert!(DeploymentOutcome::from_status(201, "p").is_started());
    assert!(!DeploymentOutcome::NotFound.is_started());
}
