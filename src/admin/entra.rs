//! Microsoft Entra ID directory settings read through Microsoft Graph

use crate::admin::AdminClient;
use crate::checks::record::inspect;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Role template IDs that keep guest directory access limited
pub const RESTRICTED_GUEST_ROLE_IDS: &[&str] = &[
    // Guest users have limited access to properties and memberships of directory objects
    "10dae51f-b6af-4016-8d66-8c2a99b929b3",
    // Guest user access is restricted to properties and memberships of their own directory objects
    "2af84b1e-32c8-42b7-82bc-daa82404023b",
];

/// Password validity value meaning "never expire"
pub const PASSWORD_NEVER_EXPIRES_DAYS: i64 = 2_147_483_647;

/// Validity applied by Entra ID to a managed domain with no explicit policy
pub const DEFAULT_PASSWORD_VALIDITY_DAYS: i64 = 90;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: String,
    pub is_verified: Option<bool>,
    pub authentication_type: Option<String>,
    pub password_validity_period_in_days: Option<i64>,
}

impl Domain {
    /// Federated domains take their password policy from the on-premises IdP
    pub fn is_federated(&self) -> bool {
        self.authentication_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("Federated"))
    }

    pub fn password_validity_days(&self) -> i64 {
        self.password_validity_period_in_days
            .unwrap_or(DEFAULT_PASSWORD_VALIDITY_DAYS)
    }
}

inspect!(Domain {
    identity: |d| d.id.clone(),
    fields: {
        "passwordValidityPeriodInDays" => |d| d.password_validity_days(),
    }
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultUserRolePermissions {
    pub allowed_to_create_apps: Option<bool>,
    pub allowed_to_create_tenants: Option<bool>,
    pub permission_grant_policies_assigned: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationPolicy {
    pub id: Option<String>,
    pub guest_user_role_id: Option<String>,
    pub default_user_role_permissions: Option<DefaultUserRolePermissions>,
}

impl AuthorizationPolicy {
    fn permissions(&self) -> Option<&DefaultUserRolePermissions> {
        self.default_user_role_permissions.as_ref()
    }
}

inspect!(AuthorizationPolicy {
    identity: |p| p.id.clone().unwrap_or_else(|| "authorizationPolicy".to_string()),
    fields: {
        "guestUserRoleId" => |p| p.guest_user_role_id.clone(),
        "defaultUserRolePermissions.allowedToCreateApps" =>
            |p| p.permissions().and_then(|d| d.allowed_to_create_apps),
        "defaultUserRolePermissions.allowedToCreateTenants" =>
            |p| p.permissions().and_then(|d| d.allowed_to_create_tenants),
        "defaultUserRolePermissions.permissionGrantPoliciesAssigned" =>
            |p| p.permissions().and_then(|d| d.permission_grant_policies_assigned.clone()),
    }
});

/// Verified, cloud-managed domains
pub async fn list_domains(client: &AdminClient) -> Result<Vec<Domain>> {
    let domains: Vec<Domain> = client.graph_get_all("domains").await?;
    Ok(managed_domains(domains))
}

/// Drop domains whose password policy Entra ID does not own
pub fn managed_domains(domains: Vec<Domain>) -> Vec<Domain> {
    domains
        .into_iter()
        .filter(|d| d.is_verified.unwrap_or(false) && !d.is_federated())
        .collect()
}

pub async fn get_authorization_policy(client: &AdminClient) -> Result<AuthorizationPolicy> {
    client.graph_get("policies/authorizationPolicy").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::record::{FieldValue, Inspect};
    use serde_json::json;

    #[test]
    fn test_nested_permissions_resolve() {
        let policy: AuthorizationPolicy = serde_json::from_value(json!({
            "id": "authorizationPolicy",
            "guestUserRoleId": "2af84b1e-32c8-42b7-82bc-daa82404023b",
            "defaultUserRolePermissions": {
                "allowedToCreateApps": false,
                "permissionGrantPoliciesAssigned": ["ManagePermissionGrantsForSelf.microsoft-user-default-legacy"]
            }
        }))
        .unwrap();

        assert_eq!(
            policy.field("defaultUserRolePermissions.allowedToCreateApps"),
            Some(FieldValue::Bool(false))
        );
        assert_eq!(
            policy.field("defaultUserRolePermissions.allowedToCreateTenants"),
            Some(FieldValue::Null)
        );
        assert_eq!(
            policy.field("defaultUserRolePermissions.permissionGrantPoliciesAssigned"),
            Some(FieldValue::List(vec![
                "ManagePermissionGrantsForSelf.microsoft-user-default-legacy".to_string()
            ]))
        );
    }

    #[test]
    fn test_missing_permissions_block_is_null() {
        let policy = AuthorizationPolicy::default();
        assert_eq!(
            policy.field("defaultUserRolePermissions.allowedToCreateApps"),
            Some(FieldValue::Null)
        );
    }

    fn domain(id: &str, authentication_type: &str, validity: Option<i64>) -> Domain {
        Domain {
            id: id.to_string(),
            is_verified: Some(true),
            authentication_type: Some(authentication_type.to_string()),
            password_validity_period_in_days: validity,
        }
    }

    #[test]
    fn test_federated_and_unverified_domains_are_skipped() {
        let mut pending = domain("pending.contoso.com", "Managed", None);
        pending.is_verified = Some(false);

        let kept = managed_domains(vec![
            domain("contoso.com", "Managed", Some(PASSWORD_NEVER_EXPIRES_DAYS)),
            domain("corp.contoso.com", "federated", None),
            pending,
        ]);

        let ids: Vec<&str> = kept.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["contoso.com"]);
    }

    #[test]
    fn test_unset_validity_reports_default() {
        let unset = domain("contoso.com", "Managed", None);
        assert_eq!(
            unset.field("passwordValidityPeriodInDays"),
            Some(FieldValue::Int(DEFAULT_PASSWORD_VALIDITY_DAYS))
        );
    }
}
