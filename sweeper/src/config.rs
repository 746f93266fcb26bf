use std::env;

pub const ENV_PORT: &str = "PORT";
pub const ENV_PAT: &str = "AIRTABLE_PAT";
pub const ENV_BASE_ID: &str = "AIRTABLE_BASE_ID";
pub const ENV_TABLE_NAME: &str = "AIRTABLE_TABLE_NAME";

#[derive(Clone, Debug)]
pub struct Listener {
    pub host: String,
    pub port: u16,
}

impl Default for Listener {
    fn default() -> Self {
        Listener {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

/// Airtable settings as found in the environment.
///
/// Values may be absent at startup; the delete endpoint reports the
/// missing names per request instead of refusing to boot, so the
/// descriptive endpoints keep working on a half-configured deploy.
#[derive(Clone, Debug, Default)]
pub struct AirtableEnv {
    pub pat: Option<String>,
    pub base_id: Option<String>,
    pub table_name: Option<String>,
}

/// All three Airtable values, known present and non-empty.
#[derive(Debug)]
pub struct ResolvedAirtable<'a> {
    pub pat: &'a str,
    pub base_id: &'a str,
    pub table_name: &'a str,
}

impl AirtableEnv {
    pub fn from_env() -> Self {
        AirtableEnv {
            pat: read_non_empty(ENV_PAT),
            base_id: read_non_empty(ENV_BASE_ID),
            table_name: read_non_empty(ENV_TABLE_NAME),
        }
    }

    /// The resolved settings, or the names of the variables that are
    /// missing, in declaration order.
    pub fn resolve(&self) -> Result<ResolvedAirtable<'_>, Vec<&'static str>> {
        let mut missing = Vec::new();
        if self.pat.is_none() {
            missing.push(ENV_PAT);
        }
        if self.base_id.is_none() {
            missing.push(ENV_BASE_ID);
        }
        if self.table_name.is_none() {
            missing.push(ENV_TABLE_NAME);
        }

        match (&self.pat, &self.base_id, &self.table_name) {
            (Some(pat), Some(base_id), Some(table_name)) => Ok(ResolvedAirtable {
                pat,
                base_id,
                table_name,
            }),
            _ => Err(missing),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub listener: Listener,
    pub airtable: AirtableEnv,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

impl Config {
    /// Read the configuration from the process environment, once at
    /// startup. Call sites receive the resulting value; nothing reads the
    /// environment afterwards.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            listener: listener_from_port(read_non_empty(ENV_PORT))?,
            airtable: AirtableEnv::from_env(),
        })
    }
}

fn listener_from_port(port: Option<String>) -> Result<Listener, ConfigError> {
    let mut listener = Listener::default();
    if let Some(port) = port {
        listener.port = port
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
    }
    Ok(listener)
}

fn read_non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
