//! Microsoft Teams policy configuration
//!
//! Read from the Teams configuration API that backs the `Get-Cs*` cmdlets.

use crate::admin::AdminClient;
use crate::checks::record::inspect;
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TeamsMeetingPolicy {
    pub identity: Option<String>,
    pub allow_anonymous_users_to_join_meeting: Option<bool>,
    pub allow_anonymous_users_to_start_meeting: Option<bool>,
    #[serde(rename = "AllowPSTNUsersToBypassLobby", alias = "AllowDialInUsersToBypassLobby")]
    pub allow_pstn_users_to_bypass_lobby: Option<bool>,
    /// EveryoneInCompanyExcludingGuests, EveryoneInSameAndFederatedCompany, Everyone, OrganizerOnly, InvitedUsers
    pub auto_admitted_users: Option<String>,
    /// Enabled, EnabledExceptAnonymous, Disabled
    pub meeting_chat_enabled_type: Option<String>,
    pub allow_external_participant_give_request_control: Option<bool>,
    pub allow_external_non_trusted_meeting_chat: Option<bool>,
}

inspect!(TeamsMeetingPolicy {
    identity: |p| p.identity.clone().unwrap_or_else(|| "Global".to_string()),
    fields: {
        "AllowAnonymousUsersToJoinMeeting" => |p| p.allow_anonymous_users_to_join_meeting,
        "AllowAnonymousUsersToStartMeeting" => |p| p.allow_anonymous_users_to_start_meeting,
        "AllowPSTNUsersToBypassLobby" => |p| p.allow_pstn_users_to_bypass_lobby,
        "AutoAdmittedUsers" => |p| p.auto_admitted_users.clone(),
        "MeetingChatEnabledType" => |p| p.meeting_chat_enabled_type.clone(),
        "AllowExternalParticipantGiveRequestControl" => |p| p.allow_external_participant_give_request_control,
        "AllowExternalNonTrustedMeetingChat" => |p| p.allow_external_non_trusted_meeting_chat,
    }
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TenantFederationConfiguration {
    pub identity: Option<String>,
    pub allow_federated_users: Option<bool>,
    pub allow_teams_consumer: Option<bool>,
    pub allow_public_users: Option<bool>,
}

inspect!(TenantFederationConfiguration {
    identity: |c| c.identity.clone().unwrap_or_else(|| "Global".to_string()),
    fields: {
        "AllowFederatedUsers" => |c| c.allow_federated_users,
        "AllowTeamsConsumer" => |c| c.allow_teams_consumer,
        "AllowPublicUsers" => |c| c.allow_public_users,
    }
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TeamsClientConfiguration {
    pub identity: Option<String>,
    pub allow_drop_box: Option<bool>,
    pub allow_box: Option<bool>,
    pub allow_google_drive: Option<bool>,
    pub allow_share_file: Option<bool>,
    pub allow_egnyte: Option<bool>,
}

inspect!(TeamsClientConfiguration {
    identity: |c| c.identity.clone().unwrap_or_else(|| "Global".to_string()),
    fields: {
        "AllowDropBox" => |c| c.allow_drop_box,
        "AllowBox" => |c| c.allow_box,
        "AllowGoogleDrive" => |c| c.allow_google_drive,
        "AllowShareFile" => |c| c.allow_share_file,
        "AllowEgnyte" => |c| c.allow_egnyte,
    }
});

fn configuration_path(kind: &str, identity: &str) -> String {
    format!("Skype.Policy/configurations/{}/configuration/{}", kind, identity)
}

pub async fn get_meeting_policy(client: &AdminClient, identity: &str) -> Result<TeamsMeetingPolicy> {
    client
        .teams_get(&configuration_path("TeamsMeetingPolicy", identity))
        .await
}

pub async fn get_federation_configuration(
    client: &AdminClient,
) -> Result<TenantFederationConfiguration> {
    client
        .teams_get(&configuration_path("TenantFederationSettings", "global"))
        .await
}

pub async fn get_client_configuration(client: &AdminClient) -> Result<TeamsClientConfiguration> {
    client
        .teams_get(&configuration_path("TeamsClientConfiguration", "global"))
        .await
}
