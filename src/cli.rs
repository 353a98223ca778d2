//! CLI argument parsing and forge platform configuration.
use clap::{Args as ClapArgs, Parser, Subcommand};
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::env;

use crate::{
    config::{ReleasePrConfig, ReleaseType, parse_release_as},
    error::ReleaseError,
    forge::config::{RemoteConfig, default_labels},
    result::Result,
};

/// Environment variable consulted when no token flag is given.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Global CLI arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Release operation subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze commits since the last release and open (or refresh) the
    /// release pull request.
    #[command(name = "release-pr")]
    ReleasePr(ReleasePrArgs),
}

/// Arguments for the release-pr command.
#[derive(ClapArgs, Debug, Clone)]
pub struct ReleasePrArgs {
    #[arg(long)]
    /// GitHub repository URL (https://github.com/owner/repo).
    pub repo_url: String,

    #[arg(long, default_value = "")]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long)]
    /// Package name as published.
    pub package_name: String,

    #[arg(long, default_value = "node")]
    /// Release type: node, rust or simple.
    pub release_type: String,

    #[arg(long, default_value = ".")]
    /// Package directory relative to the repository root.
    pub path: String,

    #[arg(long, default_value_t = false)]
    /// Treat feature commits as patch bumps while below 1.0.0.
    pub bump_minor_pre_major: bool,

    #[arg(long)]
    /// Release this exact version instead of computing one.
    pub release_as: Option<String>,

    #[arg(long = "label")]
    /// Release PR label. Repeat for several; defaults to
    /// "autorelease: pending" and "type: release".
    pub labels: Vec<String>,

    #[arg(long)]
    /// Path to a tera template for the changelog section.
    pub changelog_template: Option<String>,
}

impl ReleasePrArgs {
    /// Configure the remote repository connection, resolving the token from
    /// the flag, the URL, or the environment, in that order.
    pub fn get_remote(&self) -> Result<RemoteConfig> {
        get_github_remote(
            &self.repo_url,
            &self.github_token,
            env::var(GITHUB_TOKEN_VAR).ok(),
        )
    }

    /// Validate every option and build the run configuration. Runs before
    /// any forge call so bad input never touches the remote.
    pub async fn config(&self, remote: &RemoteConfig) -> Result<ReleasePrConfig> {
        let release_type: ReleaseType = self.release_type.parse()?;

        let mut builder = ReleasePrConfig::builder();

        builder
            .package_name(self.package_name.clone())
            .repository_url(remote.repository_url())
            .path(self.path.clone())
            .release_type(release_type)
            .bump_minor_pre_major(self.bump_minor_pre_major);

        if let Some(raw) = self.release_as.as_deref() {
            builder.release_as(Some(parse_release_as(raw)?));
        }

        if let Some(template) = self.changelog_template.as_deref() {
            let content = tokio::fs::read_to_string(template).await?;
            builder.changelog_template(content);
        }

        builder.labels(if self.labels.is_empty() {
            default_labels()
        } else {
            self.labels.clone()
        });

        builder.build()
    }
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(url: &str, scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(ReleaseError::InvalidRemoteUrl(format!(
            "{url}: only http and https schemes are supported"
        ))
        .into()),
    }
}

/// Configure GitHub remote with URL parsing and token resolution.
fn get_github_remote(
    github_repo: &str,
    github_token: &str,
    env_token: Option<String>,
) -> Result<RemoteConfig> {
    let parsed = GitUrl::parse(github_repo)
        .map_err(|e| ReleaseError::InvalidRemoteUrl(format!("{github_repo}: {e}")))?;

    validate_scheme(github_repo, parsed.scheme)?;

    let token = Some(github_token.to_string())
        .filter(|t| !t.is_empty())
        .or(parsed.token.filter(|t| !t.is_empty()))
        .or(env_token.filter(|t| !t.is_empty()))
        .ok_or(ReleaseError::MissingToken)?;

    let host = parsed.host.ok_or_else(|| {
        ReleaseError::InvalidRemoteUrl(format!("{github_repo}: missing host"))
    })?;

    let owner = parsed.owner.ok_or_else(|| {
        ReleaseError::InvalidRemoteUrl(format!("{github_repo}: missing owner"))
    })?;

    Ok(RemoteConfig {
        host,
        scheme: parsed.scheme.to_string(),
        owner,
        repo: parsed.name,
        token: SecretString::from(token),
    })
}
