//! Configuration for Git forge platform connections.
use secrecy::SecretString;

/// Default page size for paginated commit queries
pub const DEFAULT_PAGE_SIZE: u8 = 100;
/// Branch name prefix for release PRs, followed by the candidate version.
pub const DEFAULT_PR_BRANCH_PREFIX: &str = "release-v";
/// Default color for release labels in hex format.
pub const DEFAULT_LABEL_COLOR: &str = "ededed";
/// Label marking a release PR that has not been released yet.
pub const PENDING_LABEL: &str = "autorelease: pending";
/// Label marking a PR as a release PR.
pub const RELEASE_LABEL: &str = "type: release";

/// Labels applied to every release PR unless overridden.
pub fn default_labels() -> Vec<String> {
    vec![PENDING_LABEL.into(), RELEASE_LABEL.into()]
}

/// Remote repository connection configuration for authenticating and
/// interacting with forge platforms.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
}

impl RemoteConfig {
    /// Browser URL of the repository, used for changelog links.
    pub fn repository_url(&self) -> String {
        format!("{}://{}/{}/{}", self.scheme, self.host, self.owner, self.repo)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "".to_string(),
            scheme: "".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_remote_config;

    #[test]
    fn builds_repository_url() {
        let remote = create_test_remote_config();
        assert_eq!(remote.repository_url(), "https://github.com/acme/widgets");
    }

    #[test]
    fn builds_repository_url_for_self_hosted_instances() {
        let remote = RemoteConfig {
            host: "git.example.com".into(),
            scheme: "http".into(),
            owner: "acme".into(),
            repo: "widgets".into(),
            ..RemoteConfig::default()
        };
        assert_eq!(remote.repository_url(), "http://git.example.com/acme/widgets");
    }

    #[test]
    fn default_labels_mark_pending_release() {
        let labels = default_labels();
        assert_eq!(labels, vec!["autorelease: pending", "type: release"]);
    }
}
