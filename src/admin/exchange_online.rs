//! Exchange Online configuration
//!
//! Read-only `Get-*` cmdlets invoked through the Exchange admin REST endpoint.
//! Property names follow the cmdlet output (PascalCase); every property is
//! optional so an absent value stays visible to the evaluator.

use crate::admin::AdminClient;
use crate::checks::record::inspect;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrganizationConfig {
    pub name: Option<String>,
    pub audit_disabled: Option<bool>,
    pub customer_lock_box_enabled: Option<bool>,
    #[serde(rename = "OAuth2ClientProfileEnabled")]
    pub oauth2_client_profile_enabled: Option<bool>,
    pub mail_tips_all_tips_enabled: Option<bool>,
    pub mail_tips_external_recipients_tips_enabled: Option<bool>,
    pub mail_tips_group_metrics_enabled: Option<bool>,
    pub mail_tips_large_audience_threshold: Option<i64>,
}

inspect!(OrganizationConfig {
    identity: |c| c.name.clone().unwrap_or_else(|| "Organization".to_string()),
    fields: {
        "AuditDisabled" => |c| c.audit_disabled,
        "CustomerLockBoxEnabled" => |c| c.customer_lock_box_enabled,
        "OAuth2ClientProfileEnabled" => |c| c.oauth2_client_profile_enabled,
        "MailTipsAllTipsEnabled" => |c| c.mail_tips_all_tips_enabled,
        "MailTipsExternalRecipientsTipsEnabled" => |c| c.mail_tips_external_recipients_tips_enabled,
        "MailTipsGroupMetricsEnabled" => |c| c.mail_tips_group_metrics_enabled,
        "MailTipsLargeAudienceThreshold" => |c| c.mail_tips_large_audience_threshold,
    }
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdminAuditLogConfig {
    pub identity: Option<String>,
    pub admin_audit_log_enabled: Option<bool>,
    pub unified_audit_log_ingestion_enabled: Option<bool>,
}

inspect!(AdminAuditLogConfig {
    identity: |c| c.identity.clone().unwrap_or_else(|| "Admin Audit Log Settings".to_string()),
    fields: {
        "AdminAuditLogEnabled" => |c| c.admin_audit_log_enabled,
        "UnifiedAuditLogIngestionEnabled" => |c| c.unified_audit_log_ingestion_enabled,
    }
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransportConfig {
    pub identity: Option<String>,
    pub smtp_client_authentication_disabled: Option<bool>,
}

inspect!(TransportConfig {
    identity: |c| c.identity.clone().unwrap_or_else(|| "Transport Settings".to_string()),
    fields: {
        "SmtpClientAuthenticationDisabled" => |c| c.smtp_client_authentication_disabled,
    }
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MalwareFilterPolicy {
    pub identity: Option<String>,
    pub enable_file_filter: Option<bool>,
    pub enable_internal_sender_admin_notifications: Option<bool>,
}

inspect!(MalwareFilterPolicy {
    identity: |p| p.identity.clone().unwrap_or_default(),
    fields: {
        "EnableFileFilter" => |p| p.enable_file_filter,
        "EnableInternalSenderAdminNotifications" => |p| p.enable_internal_sender_admin_notifications,
    }
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DkimSigningConfig {
    pub domain: Option<String>,
    pub enabled: Option<bool>,
}

inspect!(DkimSigningConfig {
    identity: |c| c.domain.clone().unwrap_or_default(),
    fields: {
        "Enabled" => |c| c.enabled,
    }
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedOutboundSpamFilterPolicy {
    pub identity: Option<String>,
    pub auto_forwarding_mode: Option<String>,
}

inspect!(HostedOutboundSpamFilterPolicy {
    identity: |p| p.identity.clone().unwrap_or_default(),
    fields: {
        "AutoForwardingMode" => |p| p.auto_forwarding_mode.clone(),
    }
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OwaMailboxPolicy {
    pub identity: Option<String>,
    pub additional_storage_providers_available: Option<bool>,
}

inspect!(OwaMailboxPolicy {
    identity: |p| p.identity.clone().unwrap_or_default(),
    fields: {
        "AdditionalStorageProvidersAvailable" => |p| p.additional_storage_providers_available,
    }
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExternalInOutlook {
    pub identity: Option<String>,
    pub enabled: Option<bool>,
}

inspect!(ExternalInOutlook {
    identity: |c| c.identity.clone().unwrap_or_default(),
    fields: {
        "Enabled" => |c| c.enabled,
    }
});

pub async fn get_organization_config(client: &AdminClient) -> Result<OrganizationConfig> {
    client
        .invoke_cmdlet_single("Get-OrganizationConfig", json!({}))
        .await
}

pub async fn get_admin_audit_log_config(client: &AdminClient) -> Result<AdminAuditLogConfig> {
    client
        .invoke_cmdlet_single("Get-AdminAuditLogConfig", json!({}))
        .await
}

pub async fn get_transport_config(client: &AdminClient) -> Result<TransportConfig> {
    client
        .invoke_cmdlet_single("Get-TransportConfig", json!({}))
        .await
}

pub async fn list_malware_filter_policies(client: &AdminClient) -> Result<Vec<MalwareFilterPolicy>> {
    client
        .invoke_cmdlet("Get-MalwareFilterPolicy", json!({}))
        .await
}

pub async fn list_dkim_signing_configs(client: &AdminClient) -> Result<Vec<DkimSigningConfig>> {
    client
        .invoke_cmdlet("Get-DkimSigningConfig", json!({}))
        .await
}

pub async fn list_outbound_spam_filter_policies(
    client: &AdminClient,
) -> Result<Vec<HostedOutboundSpamFilterPolicy>> {
    client
        .invoke_cmdlet("Get-HostedOutboundSpamFilterPolicy", json!({}))
        .await
}

pub async fn list_owa_mailbox_policies(client: &AdminClient) -> Result<Vec<OwaMailboxPolicy>> {
    client
        .invoke_cmdlet("Get-OwaMailboxPolicy", json!({}))
        .await
}

pub async fn get_external_in_outlook(client: &AdminClient) -> Result<ExternalInOutlook> {
    client
        .invoke_cmdlet_single("Get-ExternalInOutlook", json!({}))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::record::{FieldValue, Inspect};

    #[test]
    fn test_organization_config_deserialize() {
        let config: OrganizationConfig = serde_json::from_value(json!({
            "Name": "contoso.onmicrosoft.com",
            "AuditDisabled": false,
            "OAuth2ClientProfileEnabled": true,
            "MailTipsLargeAudienceThreshold": 25,
            "SomethingElse": "ignored"
        }))
        .unwrap();

        assert_eq!(config.audit_disabled, Some(false));
        assert_eq!(config.oauth2_client_profile_enabled, Some(true));
        assert_eq!(
            config.field("MailTipsLargeAudienceThreshold"),
            Some(FieldValue::Int(25))
        );
        assert_eq!(config.field("CustomerLockBoxEnabled"), Some(FieldValue::Null));
        assert_eq!(config.identity(), "contoso.onmicrosoft.com");
    }

    #[test]
    fn test_dkim_identity_is_domain() {
        let config: DkimSigningConfig = serde_json::from_value(json!({
            "Domain": "contoso.com",
            "Enabled": false,
            "Status": "Valid"
        }))
        .unwrap();
        assert_eq!(config.identity(), "contoso.com");
        assert_eq!(config.field("Enabled"), Some(FieldValue::Bool(false)));
    }
}
