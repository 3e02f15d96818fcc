//! In-memory tenant for executor and catalog tests

use super::entra::{AuthorizationPolicy, DefaultUserRolePermissions, Domain};
use super::exchange_online::*;
use super::sharepoint::SharePointSettings;
use super::teams::*;
use super::TenantApi;
use crate::error::{Cis365Error, Result};
use crate::session::Service;

/// Canned configuration; `None` single objects answer with an empty response
#[derive(Debug, Clone, Default)]
pub struct FixtureTenant {
    pub organization_config: Option<OrganizationConfig>,
    pub admin_audit_log_config: Option<AdminAuditLogConfig>,
    pub transport_config: Option<TransportConfig>,
    pub malware_filter_policies: Vec<MalwareFilterPolicy>,
    pub dkim_signing_configs: Vec<DkimSigningConfig>,
    pub outbound_spam_filter_policies: Vec<HostedOutboundSpamFilterPolicy>,
    pub owa_mailbox_policies: Vec<OwaMailboxPolicy>,
    pub external_in_outlook: Option<ExternalInOutlook>,
    pub domains: Vec<Domain>,
    pub authorization_policy: Option<AuthorizationPolicy>,
    pub sharepoint_settings: Option<SharePointSettings>,
    pub teams_meeting_policies: Vec<TeamsMeetingPolicy>,
    pub tenant_federation_configuration: Option<TenantFederationConfiguration>,
    pub teams_client_configuration: Option<TeamsClientConfiguration>,
    /// Services the session holds no token for
    pub missing_services: Vec<Service>,
    /// Every call fails with this upstream message
    pub failure: Option<String>,
}

impl FixtureTenant {
    /// A tenant configured to pass every check in the catalog
    pub fn compliant() -> Self {
        Self {
            organization_config: Some(OrganizationConfig {
                name: Some("contoso.onmicrosoft.com".to_string()),
                audit_disabled: Some(false),
                customer_lock_box_enabled: Some(true),
                oauth2_client_profile_enabled: Some(true),
                mail_tips_all_tips_enabled: Some(true),
                mail_tips_external_recipients_tips_enabled: Some(true),
                mail_tips_group_metrics_enabled: Some(true),
                mail_tips_large_audience_threshold: Some(25),
            }),
            admin_audit_log_config: Some(AdminAuditLogConfig {
                identity: Some("Admin Audit Log Settings".to_string()),
                admin_audit_log_enabled: Some(true),
                unified_audit_log_ingestion_enabled: Some(true),
            }),
            transport_config: Some(TransportConfig {
                identity: Some("Transport Settings".to_string()),
                smtp_client_authentication_disabled: Some(true),
            }),
            malware_filter_policies: vec![MalwareFilterPolicy {
                identity: Some("Default".to_string()),
                enable_file_filter: Some(true),
                enable_internal_sender_admin_notifications: Some(true),
            }],
            dkim_signing_configs: vec![dkim("contoso.com", true), dkim("fabrikam.com", true)],
            outbound_spam_filter_policies: vec![HostedOutboundSpamFilterPolicy {
                identity: Some("Default".to_string()),
                auto_forwarding_mode: Some("Off".to_string()),
            }],
            owa_mailbox_policies: vec![OwaMailboxPolicy {
                identity: Some("OwaMailboxPolicy-Default".to_string()),
                additional_storage_providers_available: Some(false),
            }],
            external_in_outlook: Some(ExternalInOutlook {
                identity: Some("contoso".to_string()),
                enabled: Some(true),
            }),
            domains: vec![Domain {
                id: "contoso.com".to_string(),
                is_verified: Some(true),
                authentication_type: Some("Managed".to_string()),
                password_validity_period_in_days: Some(super::entra::PASSWORD_NEVER_EXPIRES_DAYS),
            }],
            authorization_policy: Some(AuthorizationPolicy {
                id: Some("authorizationPolicy".to_string()),
                guest_user_role_id: Some("2af84b1e-32c8-42b7-82bc-daa82404023b".to_string()),
                default_user_role_permissions: Some(DefaultUserRolePermissions {
                    allowed_to_create_apps: Some(false),
                    allowed_to_create_tenants: Some(false),
                    permission_grant_policies_assigned: Some(vec![
                        "ManagePermissionGrantsForOwnedResource.microsoft-dynamically-managed-permissions-for-team"
                            .to_string(),
                    ]),
                }),
            }),
            sharepoint_settings: Some(SharePointSettings {
                sharing_capability: Some("externalUserSharingOnly".to_string()),
                is_resharing_by_external_users_enabled: Some(false),
                is_legacy_auth_protocols_enabled: Some(false),
                is_unmanaged_sync_app_for_tenant_restricted: Some(true),
            }),
            teams_meeting_policies: vec![TeamsMeetingPolicy {
                identity: Some("Global".to_string()),
                allow_anonymous_users_to_join_meeting: Some(false),
                allow_anonymous_users_to_start_meeting: Some(false),
                allow_pstn_users_to_bypass_lobby: Some(false),
                auto_admitted_users: Some("EveryoneInCompanyExcludingGuests".to_string()),
                meeting_chat_enabled_type: Some("EnabledExceptAnonymous".to_string()),
                allow_external_participant_give_request_control: Some(false),
                allow_external_non_trusted_meeting_chat: Some(false),
            }],
            tenant_federation_configuration: Some(TenantFederationConfiguration {
                identity: Some("Global".to_string()),
                allow_federated_users: Some(true),
                allow_teams_consumer: Some(false),
                allow_public_users: Some(false),
            }),
            teams_client_configuration: Some(TeamsClientConfiguration {
                identity: Some("Global".to_string()),
                allow_drop_box: Some(false),
                allow_box: Some(false),
                allow_google_drive: Some(false),
                allow_share_file: Some(false),
                allow_egnyte: Some(false),
            }),
            missing_services: Vec::new(),
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::compliant()
        }
    }

    pub fn without_token(mut self, service: Service) -> Self {
        self.missing_services.push(service);
        self
    }

    pub fn meeting_policy_mut(&mut self, identity: &str) -> Option<&mut TeamsMeetingPolicy> {
        self.teams_meeting_policies
            .iter_mut()
            .find(|p| p.identity.as_deref() == Some(identity))
    }

    fn guard(&self, service: Service) -> Result<()> {
        if self.missing_services.contains(&service) {
            return Err(Cis365Error::MissingServiceToken(service));
        }
        if let Some(message) = &self.failure {
            return Err(Cis365Error::AdminApiError(message.clone()));
        }
        Ok(())
    }

    fn single<T: Clone>(&self, service: Service, name: &str, value: &Option<T>) -> Result<T> {
        self.guard(service)?;
        value
            .clone()
            .ok_or_else(|| Cis365Error::EmptyResponse(name.to_string()))
    }

    fn list<T: Clone>(&self, service: Service, values: &[T]) -> Result<Vec<T>> {
        self.guard(service)?;
        Ok(values.to_vec())
    }
}

pub fn dkim(domain: &str, enabled: bool) -> DkimSigningConfig {
    DkimSigningConfig {
        domain: Some(domain.to_string()),
        enabled: Some(enabled),
    }
}

impl TenantApi for FixtureTenant {
    async fn organization_config(&self) -> Result<OrganizationConfig> {
        self.single(
            Service::ExchangeOnline,
            "Get-OrganizationConfig",
            &self.organization_config,
        )
    }

    async fn admin_audit_log_config(&self) -> Result<AdminAuditLogConfig> {
        self.single(
            Service::ExchangeOnline,
            "Get-AdminAuditLogConfig",
            &self.admin_audit_log_config,
        )
    }

    async fn transport_config(&self) -> Result<TransportConfig> {
        self.single(
            Service::ExchangeOnline,
            "Get-TransportConfig",
            &self.transport_config,
        )
    }

    async fn malware_filter_policies(&self) -> Result<Vec<MalwareFilterPolicy>> {
        self.list(Service::ExchangeOnline, &self.malware_filter_policies)
    }

    async fn dkim_signing_configs(&self) -> Result<Vec<DkimSigningConfig>> {
        self.list(Service::ExchangeOnline, &self.dkim_signing_configs)
    }

    async fn outbound_spam_filter_policies(&self) -> Result<Vec<HostedOutboundSpamFilterPolicy>> {
        self.list(Service::ExchangeOnline, &self.outbound_spam_filter_policies)
    }

    async fn owa_mailbox_policies(&self) -> Result<Vec<OwaMailboxPolicy>> {
        self.list(Service::ExchangeOnline, &self.owa_mailbox_policies)
    }

    async fn external_in_outlook(&self) -> Result<ExternalInOutlook> {
        self.single(
            Service::ExchangeOnline,
            "Get-ExternalInOutlook",
            &self.external_in_outlook,
        )
    }

    async fn domains(&self) -> Result<Vec<Domain>> {
        self.list(Service::Graph, &self.domains)
    }

    async fn authorization_policy(&self) -> Result<AuthorizationPolicy> {
        self.single(
            Service::Graph,
            "policies/authorizationPolicy",
            &self.authorization_policy,
        )
    }

    async fn sharepoint_settings(&self) -> Result<SharePointSettings> {
        self.single(
            Service::Graph,
            "admin/sharepoint/settings",
            &self.sharepoint_settings,
        )
    }

    async fn teams_meeting_policy(&self, identity: &str) -> Result<TeamsMeetingPolicy> {
        let policy = self
            .teams_meeting_policies
            .iter()
            .find(|p| p.identity.as_deref() == Some(identity))
            .cloned();
        self.single(Service::Teams, "Get-CsTeamsMeetingPolicy", &policy)
    }

    async fn tenant_federation_configuration(&self) -> Result<TenantFederationConfiguration> {
        self.single(
            Service::Teams,
            "Get-CsTenantFederationConfiguration",
            &self.tenant_federation_configuration,
        )
    }

    async fn teams_client_configuration(&self) -> Result<TeamsClientConfiguration> {
        self.single(
            Service::Teams,
            "Get-CsTeamsClientConfiguration",
            &self.teams_client_configuration,
        )
    }
}
