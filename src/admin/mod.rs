pub mod entra;
pub mod exchange_online;
pub mod sharepoint;
pub mod teams;

#[cfg(test)]
pub mod fixture;

use crate::checks::record::Inspect;
use crate::config::Endpoints;
use crate::error::{Cis365Error, Result};
use crate::session::{Service, Session};
use entra::{AuthorizationPolicy, Domain};
use exchange_online::{
    AdminAuditLogConfig, DkimSigningConfig, ExternalInOutlook, HostedOutboundSpamFilterPolicy,
    MalwareFilterPolicy, OrganizationConfig, OwaMailboxPolicy, TransportConfig,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use sharepoint::SharePointSettings;
use std::time::Duration;
use teams::{TeamsClientConfiguration, TeamsMeetingPolicy, TenantFederationConfiguration};

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Mailbox that anchors Exchange admin REST calls to the tenant's forest
const EXCHANGE_ANCHOR_MAILBOX: &str = "SystemMailbox{bb558c35-97f1-4cb9-8ff7-d53741dc928c}";

/// Upstream configuration object a check reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    OrganizationConfig,
    AdminAuditLogConfig,
    TransportConfig,
    MalwareFilterPolicies,
    DkimSigningConfigs,
    OutboundSpamFilterPolicies,
    OwaMailboxPolicies,
    ExternalInOutlook,
    Domains,
    AuthorizationPolicy,
    SharePointSettings,
    /// Teams meeting policy by identity (`Global` for the org-wide default)
    TeamsMeetingPolicy(&'static str),
    TenantFederationConfiguration,
    TeamsClientConfiguration,
}

impl Source {
    pub fn service(&self) -> Service {
        match self {
            Source::OrganizationConfig
            | Source::AdminAuditLogConfig
            | Source::TransportConfig
            | Source::MalwareFilterPolicies
            | Source::DkimSigningConfigs
            | Source::OutboundSpamFilterPolicies
            | Source::OwaMailboxPolicies
            | Source::ExternalInOutlook => Service::ExchangeOnline,
            Source::Domains | Source::AuthorizationPolicy | Source::SharePointSettings => {
                Service::Graph
            }
            Source::TeamsMeetingPolicy(_)
            | Source::TenantFederationConfiguration
            | Source::TeamsClientConfiguration => Service::Teams,
        }
    }

    /// Name of the cmdlet or Graph resource, as shown in `show` output
    pub fn name(&self) -> String {
        match self {
            Source::OrganizationConfig => "Get-OrganizationConfig".to_string(),
            Source::AdminAuditLogConfig => "Get-AdminAuditLogConfig".to_string(),
            Source::TransportConfig => "Get-TransportConfig".to_string(),
            Source::MalwareFilterPolicies => "Get-MalwareFilterPolicy".to_string(),
            Source::DkimSigningConfigs => "Get-DkimSigningConfig".to_string(),
            Source::OutboundSpamFilterPolicies => "Get-HostedOutboundSpamFilterPolicy".to_string(),
            Source::OwaMailboxPolicies => "Get-OwaMailboxPolicy".to_string(),
            Source::ExternalInOutlook => "Get-ExternalInOutlook".to_string(),
            Source::Domains => "GET /domains".to_string(),
            Source::AuthorizationPolicy => "GET /policies/authorizationPolicy".to_string(),
            Source::SharePointSettings => "GET /admin/sharepoint/settings".to_string(),
            Source::TeamsMeetingPolicy(identity) => {
                format!("Get-CsTeamsMeetingPolicy -Identity {}", identity)
            }
            Source::TenantFederationConfiguration => {
                "Get-CsTenantFederationConfiguration".to_string()
            }
            Source::TeamsClientConfiguration => "Get-CsTeamsClientConfiguration".to_string(),
        }
    }

    /// Whether the source yields a list of records rather than one object
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Source::MalwareFilterPolicies
                | Source::DkimSigningConfigs
                | Source::OutboundSpamFilterPolicies
                | Source::OwaMailboxPolicies
                | Source::Domains
        )
    }

    /// Field names a rule may select on records of this source
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Source::OrganizationConfig => OrganizationConfig::default().field_names(),
            Source::AdminAuditLogConfig => AdminAuditLogConfig::default().field_names(),
            Source::TransportConfig => TransportConfig::default().field_names(),
            Source::MalwareFilterPolicies => MalwareFilterPolicy::default().field_names(),
            Source::DkimSigningConfigs => DkimSigningConfig::default().field_names(),
            Source::OutboundSpamFilterPolicies => {
                HostedOutboundSpamFilterPolicy::default().field_names()
            }
            Source::OwaMailboxPolicies => OwaMailboxPolicy::default().field_names(),
            Source::ExternalInOutlook => ExternalInOutlook::default().field_names(),
            Source::Domains => Domain::default().field_names(),
            Source::AuthorizationPolicy => AuthorizationPolicy::default().field_names(),
            Source::SharePointSettings => SharePointSettings::default().field_names(),
            Source::TeamsMeetingPolicy(_) => TeamsMeetingPolicy::default().field_names(),
            Source::TenantFederationConfiguration => {
                TenantFederationConfiguration::default().field_names()
            }
            Source::TeamsClientConfiguration => TeamsClientConfiguration::default().field_names(),
        }
    }
}

/// Read access to tenant configuration
///
/// Implemented by [`AdminClient`] over HTTP and by an in-memory fixture in
/// tests. Every method is a plain read; nothing here mutates the tenant.
#[allow(async_fn_in_trait)]
pub trait TenantApi {
    async fn organization_config(&self) -> Result<OrganizationConfig>;
    async fn admin_audit_log_config(&self) -> Result<AdminAuditLogConfig>;
    async fn transport_config(&self) -> Result<TransportConfig>;
    async fn malware_filter_policies(&self) -> Result<Vec<MalwareFilterPolicy>>;
    async fn dkim_signing_configs(&self) -> Result<Vec<DkimSigningConfig>>;
    async fn outbound_spam_filter_policies(&self) -> Result<Vec<HostedOutboundSpamFilterPolicy>>;
    async fn owa_mailbox_policies(&self) -> Result<Vec<OwaMailboxPolicy>>;
    async fn external_in_outlook(&self) -> Result<ExternalInOutlook>;
    async fn domains(&self) -> Result<Vec<Domain>>;
    async fn authorization_policy(&self) -> Result<AuthorizationPolicy>;
    async fn sharepoint_settings(&self) -> Result<SharePointSettings>;
    async fn teams_meeting_policy(&self, identity: &str) -> Result<TeamsMeetingPolicy>;
    async fn tenant_federation_configuration(&self) -> Result<TenantFederationConfiguration>;
    async fn teams_client_configuration(&self) -> Result<TeamsClientConfiguration>;
}

fn one<T: Inspect + 'static>(record: T) -> Vec<Box<dyn Inspect>> {
    vec![Box::new(record)]
}

fn many<T: Inspect + 'static>(records: Vec<T>) -> Vec<Box<dyn Inspect>> {
    records
        .into_iter()
        .map(|r| Box::new(r) as Box<dyn Inspect>)
        .collect()
}

/// Fetch the records behind a source
pub async fn fetch<A: TenantApi>(api: &A, source: Source) -> Result<Vec<Box<dyn Inspect>>> {
    tracing::debug!("Fetching {}", source.name());

    let records = match source {
        Source::OrganizationConfig => one(api.organization_config().await?),
        Source::AdminAuditLogConfig => one(api.admin_audit_log_config().await?),
        Source::TransportConfig => one(api.transport_config().await?),
        Source::MalwareFilterPolicies => many(api.malware_filter_policies().await?),
        Source::DkimSigningConfigs => many(api.dkim_signing_configs().await?),
        Source::OutboundSpamFilterPolicies => many(api.outbound_spam_filter_policies().await?),
        Source::OwaMailboxPolicies => many(api.owa_mailbox_policies().await?),
        Source::ExternalInOutlook => one(api.external_in_outlook().await?),
        Source::Domains => many(api.domains().await?),
        Source::AuthorizationPolicy => one(api.authorization_policy().await?),
        Source::SharePointSettings => one(api.sharepoint_settings().await?),
        Source::TeamsMeetingPolicy(identity) => one(api.teams_meeting_policy(identity).await?),
        Source::TenantFederationConfiguration => one(api.tenant_federation_configuration().await?),
        Source::TeamsClientConfiguration => one(api.teams_client_configuration().await?),
    };

    tracing::debug!("{} returned {} record(s)", source.name(), records.len());
    Ok(records)
}

/// OData collection envelope shared by Graph and the Exchange admin endpoint
#[derive(Debug, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// HTTP client for the admin APIs behind the checks
///
/// Requests are not retried; a throttled or failed call surfaces as an error
/// on the check that made it.
pub struct AdminClient {
    client: Client,
    endpoints: Endpoints,
    session: Session,
}

impl AdminClient {
    pub fn new(session: Session, endpoints: Endpoints) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("cis365/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoints,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// GET a Graph resource relative to the Graph base URL
    pub async fn graph_get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = join(&self.endpoints.graph, endpoint);
        self.get_url(Service::Graph, &url).await
    }

    /// GET every page of a Graph collection, following `@odata.nextLink`
    pub async fn graph_get_all<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut current_url = join(&self.endpoints.graph, endpoint);

        loop {
            let page: PaginatedResponse<T> = self.get_url(Service::Graph, &current_url).await?;
            items.extend(page.value);

            match page.next_link {
                Some(next) => current_url = next,
                None => break,
            }
        }

        Ok(items)
    }

    /// Invoke a read-only Exchange cmdlet and collect every returned object
    pub async fn invoke_cmdlet<T: DeserializeOwned>(
        &self,
        cmdlet: &str,
        parameters: Value,
    ) -> Result<Vec<T>> {
        let token = self.session.token(Service::ExchangeOnline)?;
        let tenant_id = self.session.tenant_id();
        let url = format!(
            "{}/{}/InvokeCommand",
            self.endpoints.exchange.trim_end_matches('/'),
            tenant_id
        );
        let body = json!({
            "CmdletInput": {
                "CmdletName": cmdlet,
                "Parameters": parameters,
            }
        });

        tracing::debug!("POST {} ({})", url, cmdlet);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("X-CmdletName", cmdlet)
            .header("X-ResponseFormat", "json")
            .header(
                "X-AnchorMailbox",
                format!("UPN:{}@{}", EXCHANGE_ANCHOR_MAILBOX, tenant_id),
            )
            .json(&body)
            .send()
            .await?;

        let mut page: PaginatedResponse<T> = read_json(response).await?;
        let mut items = std::mem::take(&mut page.value);

        while let Some(next) = page.next_link.take() {
            page = self.get_url(Service::ExchangeOnline, &next).await?;
            items.append(&mut page.value);
        }

        Ok(items)
    }

    /// Invoke a cmdlet that returns one configuration object
    pub async fn invoke_cmdlet_single<T: DeserializeOwned>(
        &self,
        cmdlet: &str,
        parameters: Value,
    ) -> Result<T> {
        self.invoke_cmdlet(cmdlet, parameters)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Cis365Error::EmptyResponse(cmdlet.to_string()))
    }

    /// GET a Teams configuration document relative to the Teams base URL
    pub async fn teams_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = join(&self.endpoints.teams, path);
        self.get_url(Service::Teams, &url).await
    }

    async fn get_url<T: DeserializeOwned>(&self, service: Service, url: &str) -> Result<T> {
        let token = self.session.token(service)?;

        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        let enhanced_error = crate::error::enhance_admin_error(&error_text);
        return Err(Cis365Error::AdminApiError(format!(
            "HTTP {}: {}",
            status, enhanced_error
        )));
    }

    Ok(response.json::<T>().await?)
}

fn join(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

impl TenantApi for AdminClient {
    async fn organization_config(&self) -> Result<OrganizationConfig> {
        exchange_online::get_organization_config(self).await
    }

    async fn admin_audit_log_config(&self) -> Result<AdminAuditLogConfig> {
        exchange_online::get_admin_audit_log_config(self).await
    }

    async fn transport_config(&self) -> Result<TransportConfig> {
        exchange_online::get_transport_config(self).await
    }

    async fn malware_filter_policies(&self) -> Result<Vec<MalwareFilterPolicy>> {
        exchange_online::list_malware_filter_policies(self).await
    }

    async fn dkim_signing_configs(&self) -> Result<Vec<DkimSigningConfig>> {
        exchange_online::list_dkim_signing_configs(self).await
    }

    async fn outbound_spam_filter_policies(&self) -> Result<Vec<HostedOutboundSpamFilterPolicy>> {
        exchange_online::list_outbound_spam_filter_policies(self).await
    }

    async fn owa_mailbox_policies(&self) -> Result<Vec<OwaMailboxPolicy>> {
        exchange_online::list_owa_mailbox_policies(self).await
    }

    async fn external_in_outlook(&self) -> Result<ExternalInOutlook> {
        exchange_online::get_external_in_outlook(self).await
    }

    async fn domains(&self) -> Result<Vec<Domain>> {
        entra::list_domains(self).await
    }

    async fn authorization_policy(&self) -> Result<AuthorizationPolicy> {
        entra::get_authorization_policy(self).await
    }

    async fn sharepoint_settings(&self) -> Result<SharePointSettings> {
        sharepoint::get_settings(self).await
    }

    async fn teams_meeting_policy(&self, identity: &str) -> Result<TeamsMeetingPolicy> {
        teams::get_meeting_policy(self, identity).await
    }

    async fn tenant_federation_configuration(&self) -> Result<TenantFederationConfiguration> {
        teams::get_federation_configuration(self).await
    }

    async fn teams_client_configuration(&self) -> Result<TeamsClientConfiguration> {
        teams::get_client_configuration(self).await
    }
}
