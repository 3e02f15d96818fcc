//! SharePoint and OneDrive tenant settings (`GET /admin/sharepoint/settings`)

use crate::admin::AdminClient;
use crate::checks::record::inspect;
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePointSettings {
    /// disabled, externalUserSharingOnly, externalUserAndGuestSharing, existingExternalUserSharingOnly
    pub sharing_capability: Option<String>,
    pub is_resharing_by_external_users_enabled: Option<bool>,
    pub is_legacy_auth_protocols_enabled: Option<bool>,
    pub is_unmanaged_sync_app_for_tenant_restricted: Option<bool>,
}

inspect!(SharePointSettings {
    identity: |_s| "SharePoint tenant settings".to_string(),
    fields: {
        "sharingCapability" => |s| s.sharing_capability.clone(),
        "isResharingByExternalUsersEnabled" => |s| s.is_resharing_by_external_users_enabled,
        "isLegacyAuthProtocolsEnabled" => |s| s.is_legacy_auth_protocols_enabled,
        "isUnmanagedSyncAppForTenantRestricted" => |s| s.is_unmanaged_sync_app_for_tenant_restricted,
    }
});

pub async fn get_settings(client: &AdminClient) -> Result<SharePointSettings> {
    client.graph_get("admin/sharepoint/settings").await
}
