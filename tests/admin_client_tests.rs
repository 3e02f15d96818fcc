//! Integration tests for the admin API client
//!
//! Uses wiremock to stand in for Microsoft Graph, the Exchange admin REST
//! endpoint and the Teams configuration API, then runs catalog checks end to
//! end through the executor.

use cis365::{catalog, execute, AdminClient, CheckStatus, Endpoints, Service, Session};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

const TENANT_ID: &str = "contoso-id";

fn full_session() -> Session {
    Session::new(TENANT_ID)
        .with_token(Service::Graph, "graph-token")
        .with_token(Service::ExchangeOnline, "exo-token")
        .with_token(Service::Teams, "teams-token")
}

fn client(server: &MockServer, session: Session) -> AdminClient {
    AdminClient::new(session, Endpoints::single_host(&server.uri())).unwrap()
}

fn cmdlet(name: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(format!("/adminapi/beta/{}/InvokeCommand", TENANT_ID)))
        .and(header("authorization", "Bearer exo-token"))
        .and(header("X-ResponseFormat", "json"))
        .and(body_partial_json(json!({ "CmdletInput": { "CmdletName": name } })))
}

#[tokio::test]
async fn test_exchange_cmdlet_check_passes() {
    let server = MockServer::start().await;

    cmdlet("Get-TransportConfig")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{
                "Identity": "Transport Settings",
                "SmtpClientAuthenticationDisabled": true
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, full_session());
    let outcome = execute(&client, catalog::find("6.5.4").unwrap()).await;

    assert_eq!(outcome.status(), CheckStatus::Pass);
    assert_eq!(outcome.status_id(), 1);
    let result = &outcome.details()[0];
    assert_eq!(result.name, "SMTP Client Authentication");
    assert_eq!(
        result.details.as_deref(),
        Some("SMTP Client Authentication is disabled")
    );
    assert_eq!(
        serde_json::to_value(&outcome).unwrap()["Details"],
        json!([{
            "Resource": "SMTP Client Authentication",
            "IsCompliant": true,
            "Details": "SMTP Client Authentication is disabled"
        }])
    );
}

#[tokio::test]
async fn test_exchange_empty_response_is_error() {
    let server = MockServer::start().await;

    cmdlet("Get-TransportConfig")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .mount(&server)
        .await;

    let client = client(&server, full_session());
    let outcome = execute(&client, catalog::find("6.5.4").unwrap()).await;

    assert_eq!(outcome.status(), CheckStatus::Error);
    assert!(outcome.details().is_empty());
    assert_eq!(
        outcome.error_message(),
        Some("Get-TransportConfig returned no configuration object")
    );
}

#[tokio::test]
async fn test_exchange_paging_follows_next_link() {
    let server = MockServer::start().await;

    cmdlet("Get-DkimSigningConfig")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "Domain": "contoso.com", "Enabled": true }],
            "@odata.nextLink": format!("{}/adminapi/beta/{}/InvokeCommand?skip=1", server.uri(), TENANT_ID)
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/adminapi/beta/{}/InvokeCommand", TENANT_ID)))
        .and(query_param("skip", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "Domain": "fabrikam.com", "Enabled": false }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, full_session());
    let outcome = execute(&client, catalog::find("2.1.9").unwrap()).await;

    assert_eq!(outcome.status(), CheckStatus::Fail);
    let resources: Vec<_> = outcome
        .details()
        .iter()
        .map(|r| (r.resource.as_deref(), r.is_compliant))
        .collect();
    assert_eq!(
        resources,
        vec![(Some("contoso.com"), true), (Some("fabrikam.com"), false)]
    );
}

#[tokio::test]
async fn test_graph_domains_paged_and_unverified_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/domains"))
        .and(header("authorization", "Bearer graph-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                { "id": "contoso.com", "isVerified": true, "passwordValidityPeriodInDays": 2147483647 },
                { "id": "pending.contoso.com", "isVerified": false }
            ],
            "@odata.nextLink": format!("{}/v1.0/domains?page=2", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/domains"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                { "id": "fabrikam.com", "isVerified": true, "passwordValidityPeriodInDays": 90 }
            ]
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, full_session());
    let outcome = execute(&client, catalog::find("1.3.1").unwrap()).await;

    assert_eq!(outcome.status(), CheckStatus::Fail);
    assert_eq!(outcome.details().len(), 2);

    let failing: Vec<_> = outcome
        .non_compliant()
        .map(|r| (r.resource.clone(), r.current_value.clone()))
        .collect();
    assert_eq!(failing, vec![(Some("fabrikam.com".to_string()), json!(90))]);
}

#[tokio::test]
async fn test_teams_meeting_policy_folds_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/Skype.Policy/configurations/TeamsMeetingPolicy/configuration/Global",
        ))
        .and(header("authorization", "Bearer teams-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Identity": "Global",
            "AllowAnonymousUsersToStartMeeting": true,
            "AllowPSTNUsersToBypassLobby": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, full_session());
    let outcome = execute(&client, catalog::find("8.5.2").unwrap()).await;

    assert_eq!(outcome.status(), CheckStatus::Fail);
    assert_eq!(outcome.details().len(), 1);
    let result = &outcome.details()[0];
    assert!(!result.is_compliant);
    assert_eq!(
        result.current_value,
        json!({
            "AllowAnonymousUsersToStartMeeting": true,
            "AllowPSTNUsersToBypassLobby": false
        })
    );
}

#[tokio::test]
async fn test_forbidden_response_becomes_error_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/policies/authorizationPolicy"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": "Authorization_RequestDenied",
                "message": "Insufficient privileges to complete the operation."
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, full_session());
    let outcome = execute(&client, catalog::find("5.1.2.3").unwrap()).await;

    assert_eq!(outcome.status(), CheckStatus::Error);
    assert_eq!(outcome.status_id(), 3);
    assert!(outcome.details().is_empty());

    let message = outcome.error_message().unwrap();
    assert!(message.contains("403"));
    assert!(message.contains("Authorization_RequestDenied"));
}

#[tokio::test]
async fn test_missing_token_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let session = Session::new(TENANT_ID).with_token(Service::Graph, "graph-token");
    let client = client(&server, session);
    let outcome = execute(&client, catalog::find("8.2.2").unwrap()).await;

    assert_eq!(outcome.status(), CheckStatus::Error);
    assert_eq!(
        outcome.error_message(),
        Some("No access token for Microsoft Teams in the current session")
    );
}

#[tokio::test]
async fn test_missing_field_is_error_not_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/admin/sharepoint/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sharingCapability": "externalUserAndGuestSharing"
        })))
        .mount(&server)
        .await;

    let client = client(&server, full_session());

    let outcome = execute(&client, catalog::find("7.2.1").unwrap()).await;
    assert_eq!(outcome.status(), CheckStatus::Error);
    assert!(outcome
        .error_message()
        .unwrap()
        .contains("isLegacyAuthProtocolsEnabled"));

    let outcome = execute(&client, catalog::find("7.2.3").unwrap()).await;
    assert_eq!(outcome.status(), CheckStatus::Fail);
    assert_eq!(
        outcome.details()[0].current_value,
        json!("externalUserAndGuestSharing")
    );
}

#[tokio::test]
async fn test_outcome_wire_shape() {
    let server = MockServer::start().await;

    cmdlet("Get-AdminAuditLogConfig")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{
                "Identity": "Admin Audit Log Settings",
                "UnifiedAuditLogIngestionEnabled": true
            }]
        })))
        .mount(&server)
        .await;

    let client = client(&server, full_session());
    let outcome = execute(&client, catalog::find("3.1.1").unwrap()).await;

    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({
            "status": "Pass",
            "status_id": 1,
            "Details": [{
                "Name": "UnifiedAuditLogIngestionEnabled",
                "CurrentValue": true,
                "ExpectedValue": true,
                "IsCompliant": true
            }]
        })
    );
}

#[tokio::test]
async fn test_mailbox_auditing_reports_observed_value() {
    let server = MockServer::start().await;

    cmdlet("Get-OrganizationConfig")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "Name": "contoso.onmicrosoft.com", "AuditDisabled": true }]
        })))
        .mount(&server)
        .await;

    let client = client(&server, full_session());
    let outcome = execute(&client, catalog::find("6.1.1").unwrap()).await;

    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({
            "status": "Fail",
            "status_id": 3,
            "Details": [{ "Name": "AuditDisabled", "Value": true, "IsCompliant": false }]
        })
    );
}

#[tokio::test]
async fn test_federated_domain_is_not_evaluated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {
                    "id": "contoso.com",
                    "isVerified": true,
                    "authenticationType": "Managed",
                    "passwordValidityPeriodInDays": 2147483647
                },
                {
                    "id": "corp.contoso.com",
                    "isVerified": true,
                    "authenticationType": "Federated",
                    "passwordValidityPeriodInDays": null
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = client(&server, full_session());
    let outcome = execute(&client, catalog::find("1.3.1").unwrap()).await;

    assert_eq!(outcome.status(), CheckStatus::Pass);
    assert_eq!(outcome.details().len(), 1);
    assert_eq!(outcome.details()[0].resource.as_deref(), Some("contoso.com"));
}

#[tokio::test]
async fn test_managed_domain_without_policy_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{
                "id": "contoso.com",
                "isVerified": true,
                "authenticationType": "Managed",
                "passwordValidityPeriodInDays": null
            }]
        })))
        .mount(&server)
        .await;

    let client = client(&server, full_session());
    let outcome = execute(&client, catalog::find("1.3.1").unwrap()).await;

    assert_eq!(outcome.status(), CheckStatus::Fail);
    assert_eq!(outcome.details()[0].current_value, json!(90));
}
