//! Pre-authenticated management session
//!
//! Tokens are produced by external sign-in tooling. This module only reads
//! them: from the environment or from the per-tenant session cache file. An
//! expired token is dropped, never refreshed.

use crate::config::ConfigManager;
use crate::error::{Cis365Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;

pub const ENV_TENANT_ID: &str = "CIS365_TENANT_ID";

/// Upstream administrative surface a check talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    /// Microsoft Graph: Entra ID policies, domains, SharePoint admin settings
    Graph,
    ExchangeOnline,
    Teams,
}

impl Service {
    pub fn all() -> &'static [Service] {
        &[Service::Graph, Service::ExchangeOnline, Service::Teams]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Graph => "Microsoft Graph",
            Service::ExchangeOnline => "Exchange Online",
            Service::Teams => "Microsoft Teams",
        }
    }

    /// Environment variable holding a bearer token for this service
    pub fn env_var(&self) -> &'static str {
        match self {
            Service::Graph => "CIS365_GRAPH_TOKEN",
            Service::ExchangeOnline => "CIS365_EXCHANGE_TOKEN",
            Service::Teams => "CIS365_TEAMS_TOKEN",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "graph" | "entra" | "sharepoint" => Ok(Service::Graph),
            "exchange" | "exchange-online" | "exo" => Ok(Service::ExchangeOnline),
            "teams" => Ok(Service::Teams),
            other => Err(format!("unknown service '{}'", other)),
        }
    }
}

/// One cached access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceToken {
    pub service: Service,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// On-disk session cache, written by external sign-in tooling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCache {
    pub tenant_id: String,
    #[serde(default)]
    pub tokens: Vec<ServiceToken>,
}

/// Read-only session handed to the admin client
#[derive(Debug, Clone)]
pub struct Session {
    tenant_id: String,
    tokens: HashMap<Service, String>,
}

impl Session {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            tokens: HashMap::new(),
        }
    }

    pub fn with_token(mut self, service: Service, token: impl Into<String>) -> Self {
        self.tokens.insert(service, token.into());
        self
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn token(&self, service: Service) -> Result<&str> {
        self.tokens
            .get(&service)
            .map(String::as_str)
            .ok_or(Cis365Error::MissingServiceToken(service))
    }

    pub fn services(&self) -> Vec<Service> {
        Service::all()
            .iter()
            .copied()
            .filter(|s| self.tokens.contains_key(s))
            .collect()
    }

    /// Build a session from `CIS365_*` variables, if a tenant ID is set
    pub fn from_env() -> Option<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let tenant_id = lookup(ENV_TENANT_ID).filter(|v| !v.trim().is_empty())?;
        let mut session = Session::new(tenant_id.trim());

        for service in Service::all() {
            if let Some(token) = lookup(service.env_var()).filter(|v| !v.trim().is_empty()) {
                session.tokens.insert(*service, token.trim().to_string());
            }
        }

        Some(session)
    }

    /// Build a session from a cache, dropping tokens that expired before `now`
    pub fn from_cache(cache: SessionCache, now: DateTime<Utc>) -> Self {
        let mut session = Session::new(cache.tenant_id);

        for token in cache.tokens {
            if token.expires_at <= now {
                tracing::warn!(
                    "Ignoring expired {} token (expired {})",
                    token.service,
                    token.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
                continue;
            }
            session.tokens.insert(token.service, token.access_token);
        }

        session
    }

    /// Load the session for a tenant: environment first, then the session cache
    pub fn load(config: &ConfigManager, tenant_name: Option<&str>) -> Result<Self> {
        if let Some(session) = Self::from_env() {
            tracing::debug!("Using session from environment for {}", session.tenant_id);
            return Ok(session);
        }

        let tenant_name = match tenant_name {
            Some(name) => name.to_string(),
            None => config
                .load_config()?
                .current_tenant
                .ok_or_else(|| {
                    Cis365Error::ConfigError(format!(
                        "No active tenant. Set {} or run 'cis365 tenant switch <NAME>'",
                        ENV_TENANT_ID
                    ))
                })?,
        };

        let tenant = config.get_tenant(&tenant_name)?;
        let cache = config.load_session_cache(&tenant.name)?;

        if !cache.tenant_id.eq_ignore_ascii_case(&tenant.tenant_id) {
            return Err(Cis365Error::SessionError(format!(
                "session cache for '{}' belongs to tenant {}, expected {}",
                tenant.name, cache.tenant_id, tenant.tenant_id
            )));
        }

        let session = Self::from_cache(cache, Utc::now());
        if session.tokens.is_empty() {
            return Err(Cis365Error::SessionError(format!(
                "every cached token for '{}' has expired",
                tenant.name
            )));
        }

        Ok(session)
    }
}

/// Read a session cache file
pub fn read_cache(path: &std::path::Path) -> Result<SessionCache> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
