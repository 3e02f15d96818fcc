use crate::error::{Cis365Error, Result};
use crate::session::{self, SessionCache};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const GRAPH_API_BASE: &str = "https://graph.microsoft.com/v1.0";
pub const EXCHANGE_ADMIN_API_BASE: &str = "https://outlook.office365.com/adminapi/beta";
pub const TEAMS_CONFIG_API_BASE: &str = "https://api.interfaces.records.teams.microsoft.com";

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub current_tenant: Option<String>,

    #[serde(default)]
    pub log_level: String,

    #[serde(default)]
    pub endpoints: Endpoints,
}

/// Base URLs of the upstream admin APIs
///
/// Overridable for sovereign clouds and for tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Endpoints {
    #[serde(default = "default_graph")]
    pub graph: String,

    #[serde(default = "default_exchange")]
    pub exchange: String,

    #[serde(default = "default_teams")]
    pub teams: String,
}

fn default_graph() -> String {
    GRAPH_API_BASE.to_string()
}

fn default_exchange() -> String {
    EXCHANGE_ADMIN_API_BASE.to_string()
}

fn default_teams() -> String {
    TEAMS_CONFIG_API_BASE.to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            graph: default_graph(),
            exchange: default_exchange(),
            teams: default_teams(),
        }
    }
}

impl Endpoints {
    /// Point every service at one base URL (mock servers)
    pub fn single_host(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            graph: format!("{}/v1.0", base),
            exchange: format!("{}/adminapi/beta", base),
            teams: base.to_string(),
        }
    }
}

/// Tenant record
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TenantConfig {
    pub name: String,
    pub tenant_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Configuration manager
#[derive(Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("com", "cis365", "cis365").ok_or_else(|| {
            Cis365Error::ConfigError("Failed to determine config directory".into())
        })?;

        Self::with_dir(project_dirs.config_dir())
    }

    /// Use an explicit configuration directory
    pub fn with_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let config_dir = dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        Ok(Self { config_dir })
    }

    pub fn load() -> Result<Self> {
        Self::new()
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn tenants_file(&self) -> PathBuf {
        self.config_dir.join("tenants.toml")
    }

    pub fn session_cache_file(&self, tenant_name: &str) -> PathBuf {
        self.config_dir
            .join("cache")
            .join(format!("{}.session.json", tenant_name))
    }

    /// Load main config
    pub fn load_config(&self) -> Result<Config> {
        let config_path = self.config_file();

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save main config
    pub fn save_config(&self, config: &Config) -> Result<()> {
        let contents = toml::to_string_pretty(config)
            .map_err(|e| Cis365Error::ConfigError(format!("Failed to serialize config: {}", e)))?;
        fs::write(self.config_file(), contents)?;
        Ok(())
    }

    /// Load all tenants
    pub fn load_tenants(&self) -> Result<Vec<TenantConfig>> {
        let tenants_path = self.tenants_file();

        if !tenants_path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(tenants_path)?;

        #[derive(Deserialize)]
        struct TenantsFile {
            #[serde(default)]
            tenants: Vec<TenantConfig>,
        }

        let file: TenantsFile = toml::from_str(&contents)?;
        Ok(file.tenants)
    }

    /// Save all tenants
    pub fn save_tenants(&self, tenants: &[TenantConfig]) -> Result<()> {
        #[derive(Serialize)]
        struct TenantsFile<'a> {
            tenants: &'a [TenantConfig],
        }

        let file = TenantsFile { tenants };
        let contents = toml::to_string_pretty(&file)
            .map_err(|e| Cis365Error::ConfigError(format!("Failed to serialize tenants: {}", e)))?;
        fs::write(self.tenants_file(), contents)?;
        Ok(())
    }

    /// Add or update tenant
    pub fn add_tenant(&self, tenant: TenantConfig) -> Result<()> {
        let mut tenants = self.load_tenants()?;
        tenants.retain(|t| !t.name.eq_ignore_ascii_case(&tenant.name));
        tenants.push(tenant);
        self.save_tenants(&tenants)
    }

    /// Get tenant by name
    pub fn get_tenant(&self, name: &str) -> Result<TenantConfig> {
        self.load_tenants()?
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Cis365Error::TenantNotFound(name.to_string()))
    }

    /// Get active tenant
    pub fn get_active_tenant(&self) -> Result<Option<TenantConfig>> {
        match self.load_config()?.current_tenant {
            Some(tenant_name) => Ok(Some(self.get_tenant(&tenant_name)?)),
            None => Ok(None),
        }
    }

    /// Set the active tenant
    pub fn set_active_tenant(&self, tenant_name: &str) -> Result<()> {
        let tenant = self.get_tenant(tenant_name)?;

        let mut config = self.load_config()?;
        config.current_tenant = Some(tenant.name);
        self.save_config(&config)
    }

    /// Remove a tenant by name
    ///
    /// The session cache is left alone; it belongs to the sign-in tooling.
    pub fn remove_tenant(&self, tenant_name: &str) -> Result<()> {
        let mut tenants = self.load_tenants()?;
        let original_len = tenants.len();
        tenants.retain(|t| !t.name.eq_ignore_ascii_case(tenant_name));

        if tenants.len() == original_len {
            return Err(Cis365Error::TenantNotFound(tenant_name.to_string()));
        }

        self.save_tenants(&tenants)?;

        let mut config = self.load_config()?;
        if config
            .current_tenant
            .as_deref()
            .is_some_and(|current| current.eq_ignore_ascii_case(tenant_name))
        {
            config.current_tenant = None;
            self.save_config(&config)?;
        }

        Ok(())
    }

    /// Read the session cache written by external sign-in tooling
    pub fn load_session_cache(&self, tenant_name: &str) -> Result<SessionCache> {
        let path = self.session_cache_file(tenant_name);

        if !path.exists() {
            return Err(Cis365Error::SessionNotFound(tenant_name.to_string()));
        }

        session::read_cache(&path)
    }

    /// Endpoints from config.toml, defaults when unset
    pub fn endpoints(&self) -> Result<Endpoints> {
        Ok(self.load_config()?.endpoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (TempDir, ConfigManager) {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(dir.path().join("cis365")).unwrap();
        (dir, manager)
    }

    fn tenant(name: &str, id: &str) -> TenantConfig {
        TenantConfig {
            name: name.to_string(),
            tenant_id: id.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let (_dir, manager) = manager();
        let config = manager.load_config().unwrap();
        assert!(config.current_tenant.is_none());
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn test_partial_endpoints_override() {
        let (_dir, manager) = manager();
        fs::write(
            manager.config_file(),
            "[endpoints]\ngraph = \"https://graph.microsoft.us/v1.0\"\n",
        )
        .unwrap();

        let endpoints = manager.endpoints().unwrap();
        assert_eq!(endpoints.graph, "https://graph.microsoft.us/v1.0");
        assert_eq!(endpoints.exchange, EXCHANGE_ADMIN_API_BASE);
    }

    #[test]
    fn test_add_replaces_tenant_with_same_name() {
        let (_dir, manager) = manager();
        manager.add_tenant(tenant("contoso", "id-1")).unwrap();
        manager.add_tenant(tenant("CONTOSO", "id-2")).unwrap();

        let tenants = manager.load_tenants().unwrap();
        assert_eq!(tenants.len(), 1);
        assert_eq!(tenants[0].tenant_id, "id-2");
    }

    #[test]
    fn test_switch_and_remove_active_tenant() {
        let (_dir, manager) = manager();
        manager.add_tenant(tenant("contoso", "id-1")).unwrap();
        manager.add_tenant(tenant("fabrikam", "id-2")).unwrap();

        manager.set_active_tenant("fabrikam").unwrap();
        assert_eq!(
            manager.get_active_tenant().unwrap().unwrap().tenant_id,
            "id-2"
        );

        manager.remove_tenant("fabrikam").unwrap();
        assert!(manager.get_active_tenant().unwrap().is_none());
        assert!(matches!(
            manager.remove_tenant("fabrikam"),
            Err(Cis365Error::TenantNotFound(_))
        ));
    }

    #[test]
    fn test_missing_session_cache() {
        let (_dir, manager) = manager();
        assert!(matches!(
            manager.load_session_cache("contoso"),
            Err(Cis365Error::SessionNotFound(name)) if name == "contoso"
        ));
    }

    #[test]
    fn test_single_host_endpoints() {
        let endpoints = Endpoints::single_host("http://127.0.0.1:8080/");
        assert_eq!(endpoints.graph, "http://127.0.0.1:8080/v1.0");
        assert_eq!(endpoints.exchange, "http://127.0.0.1:8080/adminapi/beta");
        assert_eq!(endpoints.teams, "http://127.0.0.1:8080");
    }
}
