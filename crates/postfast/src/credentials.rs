//! The `postFastApi` credential.

use secrecy::SecretString;
use serde::Deserialize;

/// Name the node refers to its credential by.
pub const CREDENTIAL_NAME: &str = "postFastApi";
/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.postfa.st";
/// Header every authenticated request carries.
pub const API_KEY_HEADER: &str = "pf-api-key";
/// Cheap authenticated call used to validate a key.
pub const CREDENTIAL_TEST_PATH: &str = "/social-media/my-social-accounts";

/// API key plus the host it is valid for. `Debug` never prints the key.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFastCredentials {
    pub api_key: SecretString,
    /// Override for staging or self-hosted instances.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl PostFastCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: default_base_url(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
