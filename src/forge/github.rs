//! Implements the Forge trait for Github
use async_trait::async_trait;
use color_eyre::eyre::{OptionExt, eyre};
use log::*;
use octocrab::{Octocrab, models::issues::Issue, params};
use reqwest::StatusCode;

use crate::{
    analyzer::{release::Tag, version::parse_version},
    forge::{
        config::{DEFAULT_LABEL_COLOR, DEFAULT_PAGE_SIZE, RemoteConfig},
        request::{ForgeCommit, OpenPrRequest, PullRequest},
        traits::Forge,
    },
    result::Result,
};

mod graphql;
mod types;

use graphql::{
    COMMITS_QUERY, CommitsQueryResult, CommitsQueryVariables,
    TAG_SEARCH_QUERY, TagSearchQueryVariables, TagSearchResult,
};
use types::{GitCommit, GithubTree, GithubTreeEntry, Tree};

/// GitHub forge implementation using Octocrab: GraphQL for commit history
/// and tags, REST for file contents, branches, PRs and labels.
pub struct Github {
    config: RemoteConfig,
    base_uri: String,
    instance: Octocrab,
    default_branch: String,
}

impl Github {
    /// Create GitHub client with personal access token authentication and
    /// resolve the repository's default branch.
    pub async fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = if config.host == "github.com" {
            format!("{}://api.{}", config.scheme, config.host)
        } else {
            // GitHub Enterprise serves the API under /api/v3
            format!("{}://{}/api/v3", config.scheme, config.host)
        };

        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri.clone())?
            .build()?;

        let repo = instance.repos(&config.owner, &config.repo).get().await?;
        let err_msg = format!(
            "failed to find default branch for github repo: {}/{}",
            config.owner, config.repo
        );
        let default_branch = repo.default_branch.ok_or_eyre(err_msg)?;

        Ok(Self {
            config,
            base_uri,
            instance,
            default_branch,
        })
    }

    async fn get_file_content(
        &self,
        path: &str,
        sha: &str,
    ) -> Result<Option<String>> {
        let result = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .get_content()
            .path(path)
            .r#ref(sha)
            .send()
            .await;

        match result {
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                info!("no file found for path: {path}");
                Ok(None)
            }
            Err(err) => {
                let msg = format!(
                    "encountered error getting file contents for path: {path}: {err}"
                );
                error!("{msg}");
                Err(eyre!(msg))
            }
            Ok(mut data) => {
                let items = data.take_items();

                let Some(item) = items.first() else {
                    info!("no file found for path: {path}");
                    return Ok(None);
                };

                item.decoded_content().map(Some).ok_or_else(|| {
                    eyre!("failed to decode file content for path: {path}")
                })
            }
        }
    }

    async fn get_tree_entries(
        &self,
        req: &OpenPrRequest,
    ) -> Result<Vec<GithubTreeEntry>> {
        let mut entries = vec![];

        for updater in req.updates.iter() {
            let path = updater.path();

            let current = match self.get_file_content(path, &req.sha).await? {
                Some(content) => content,
                None if updater.create_if_missing() => String::new(),
                None => {
                    warn!("skipping update for missing file: {path}");
                    continue;
                }
            };

            let content = updater.update(&current)?;
            entries.push(GithubTreeEntry::blob(path, content));
        }

        Ok(entries)
    }

    async fn create_tree(&self, tree: GithubTree) -> Result<Tree> {
        let endpoint = format!(
            "{}/repos/{}/{}/git/trees",
            self.base_uri, self.config.owner, self.config.repo
        );

        let body = serde_json::json!(tree);

        info!("creating tree starting from: {}", tree.base_tree);

        let tree: Tree = self.instance.post(endpoint, Some(&body)).await?;

        info!("created new tree: {}", tree.sha);

        Ok(tree)
    }

    async fn create_commit(
        &self,
        message: &str,
        parent_sha: &str,
        tree_sha: &str,
    ) -> Result<GitCommit> {
        let endpoint = format!(
            "{}/repos/{}/{}/git/commits",
            self.base_uri, self.config.owner, self.config.repo
        );

        let body = serde_json::json!({
          "message": message,
          "tree": tree_sha,
          "parents": [parent_sha],
        });

        let commit: GitCommit =
            self.instance.post(endpoint, Some(&body)).await?;

        Ok(commit)
    }

    /// Point `branch` at `sha`, creating the branch or force-updating it.
    async fn upsert_branch(&self, branch: &str, sha: &str) -> Result<()> {
        let target_ref = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .get_ref(&params::repos::Reference::Branch(branch.to_string()))
            .await;

        if target_ref.is_ok() {
            info!("release branch {branch} already exists: updating");
            let endpoint = format!(
                "{}/repos/{}/{}/git/refs/heads/{branch}",
                self.base_uri, self.config.owner, self.config.repo
            );
            let _: serde_json::Value = self
                .instance
                .patch(
                    endpoint,
                    Some(&serde_json::json!({
                      "sha": sha,
                      "force": true
                    })),
                )
                .await?;

            return Ok(());
        }

        info!("creating release branch {branch}");

        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .create_ref(
                &params::repos::Reference::Branch(branch.to_string()),
                sha,
            )
            .await?;

        Ok(())
    }

    async fn find_open_pr_for_branch(&self, branch: &str) -> Result<Option<u64>> {
        let prs = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(params::State::Open)
            .head(format!("{}:{branch}", self.config.owner))
            .send()
            .await?;

        Ok(prs.items.first().map(|pr| pr.number))
    }

    /// One page of pull requests carrying all `labels`, newest first, and
    /// whether another page follows.
    async fn list_labeled_pulls(
        &self,
        labels: &[String],
        state: params::State,
        page: u32,
    ) -> Result<(Vec<Issue>, bool)> {
        let issues = self
            .instance
            .issues(&self.config.owner, &self.config.repo)
            .list()
            .direction(params::Direction::Descending)
            .labels(labels)
            .state(state)
            .per_page(DEFAULT_PAGE_SIZE)
            .page(page)
            .send()
            .await?;

        let has_next = issues.next.is_some();

        let pulls = issues
            .items
            .into_iter()
            .filter(|issue| issue.pull_request.is_some())
            .collect();

        Ok((pulls, has_next))
    }

    async fn ensure_labels(&self, labels: &[String]) -> Result<()> {
        let existing = self
            .instance
            .issues(&self.config.owner, &self.config.repo)
            .list_labels_for_repo()
            .per_page(DEFAULT_PAGE_SIZE)
            .send()
            .await?;

        for name in labels {
            if !existing.items.iter().any(|l| &l.name == name) {
                info!("creating label: {name}");
                self.instance
                    .issues(&self.config.owner, &self.config.repo)
                    .create_label(name, DEFAULT_LABEL_COLOR, "")
                    .await?;
            }
        }

        Ok(())
    }
}

/// Fetch pages starting at 1 until `fetch` reports there is no next page.
async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, bool)>>,
{
    let mut items = vec![];
    let mut page = 1;

    loop {
        let (batch, has_next) = fetch(page).await?;
        items.extend(batch);

        if !has_next {
            return Ok(items);
        }
        page += 1;
    }
}

#[async_trait]
impl Forge for Github {
    async fn find_merged_release_pr(
        &self,
        labels: Vec<String>,
    ) -> Result<Option<PullRequest>> {
        info!("looking for merged release prs labeled: {labels:?}");

        let mut page = 1;

        loop {
            let (issues, has_next) = self
                .list_labeled_pulls(&labels, params::State::Closed, page)
                .await?;

            for issue in issues {
                let pr = self
                    .instance
                    .pulls(&self.config.owner, &self.config.repo)
                    .get(issue.number)
                    .await?;

                if pr.merged_at.is_none() {
                    debug!(
                        "release pr {} was closed without merging",
                        pr.number
                    );
                    continue;
                }

                info!("found merged release pr: {}", pr.number);

                let sha = pr
                    .merge_commit_sha
                    .clone()
                    .unwrap_or_else(|| pr.head.sha.clone());

                return Ok(Some(PullRequest {
                    number: pr.number,
                    sha,
                    title: pr.title.clone().unwrap_or_default(),
                }));
            }

            if !has_next {
                return Ok(None);
            }
            page += 1;
        }
    }

    async fn latest_tag(&self) -> Result<Option<Tag>> {
        let mut cursor = None;
        let mut latest: Option<(semver::Version, Tag)> = None;

        loop {
            let vars = TagSearchQueryVariables {
                owner: self.config.owner.clone(),
                repo: self.config.repo.clone(),
                first: DEFAULT_PAGE_SIZE.into(),
                cursor: cursor.clone(),
            };

            let result: TagSearchResult = self
                .instance
                .graphql(&serde_json::json!({
                  "query": TAG_SEARCH_QUERY,
                  "variables": vars,
                }))
                .await?;

            let refs = result.data.repository.refs;

            for node in refs.nodes.iter() {
                let Some(version) = parse_version(&node.name) else {
                    debug!("ignoring non-version tag: {}", node.name);
                    continue;
                };

                if latest.as_ref().is_some_and(|(v, _)| *v >= version) {
                    continue;
                }

                let tag = Tag::new(
                    node.target.commit_sha(),
                    node.name.clone(),
                    version.to_string(),
                );
                latest = Some((version, tag));
            }

            match refs.page_info.end_cursor {
                Some(end) if refs.page_info.has_next_page => cursor = Some(end),
                _ => break,
            }
        }

        Ok(latest.map(|(_, tag)| tag))
    }

    async fn commits_since_sha(
        &self,
        sha: Option<String>,
    ) -> Result<Vec<ForgeCommit>> {
        let mut commits = vec![];
        let mut cursor = None;

        loop {
            let vars = CommitsQueryVariables {
                owner: self.config.owner.clone(),
                repo: self.config.repo.clone(),
                page_limit: DEFAULT_PAGE_SIZE.into(),
                cursor: cursor.clone(),
            };

            let result: CommitsQueryResult = self
                .instance
                .graphql(&serde_json::json!({
                  "query": COMMITS_QUERY,
                  "variables": vars,
                }))
                .await?;

            let history = result.data.repository.default_branch_ref.target.history;

            for node in history.nodes {
                if sha.as_ref() == Some(&node.oid) {
                    debug!("reached starting sha: {}", node.oid);
                    return Ok(commits);
                }
                commits.push(ForgeCommit::new(node.oid, node.message));
            }

            match history.page_info.end_cursor {
                Some(end) if history.page_info.has_next_page => {
                    cursor = Some(end)
                }
                _ => break,
            }
        }

        if let Some(sha) = sha {
            warn!("starting sha {sha} not found on {}", self.default_branch);
        }

        Ok(commits)
    }

    async fn open_pr(&self, req: OpenPrRequest) -> Result<u64> {
        let tree = self.get_tree_entries(&req).await?;

        let tree = self
            .create_tree(GithubTree {
                base_tree: req.sha.clone(),
                tree,
            })
            .await?;

        let commit = self.create_commit(&req.title, &req.sha, &tree.sha).await?;

        info!("created release commit {} for {}", commit.sha, req.version);

        self.upsert_branch(&req.branch, &commit.sha).await?;

        if let Some(number) = self.find_open_pr_for_branch(&req.branch).await? {
            info!("updating existing release pr: {number}");
            self.instance
                .pulls(&self.config.owner, &self.config.repo)
                .update(number)
                .title(req.title)
                .body(req.body)
                .send()
                .await?;

            return Ok(number);
        }

        info!(
            "creating release pr from {} into {}",
            req.branch, self.default_branch
        );

        let pr = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .create(req.title, req.branch, self.default_branch.clone())
            .body(req.body)
            .send()
            .await?;

        Ok(pr.number)
    }

    async fn add_labels(
        &self,
        pr_number: u64,
        labels: Vec<String>,
    ) -> Result<()> {
        self.ensure_labels(&labels).await?;

        self.instance
            .issues(&self.config.owner, &self.config.repo)
            .add_labels(pr_number, &labels)
            .await?;

        Ok(())
    }

    async fn find_open_release_prs(
        &self,
        labels: Vec<String>,
    ) -> Result<Vec<PullRequest>> {
        let issues = collect_pages(|page| {
            self.list_labeled_pulls(&labels, params::State::Open, page)
        })
        .await?;

        let prs = issues
            .into_iter()
            .map(|issue| PullRequest {
                number: issue.number,
                sha: String::new(),
                title: issue.title,
            })
            .collect();

        Ok(prs)
    }

    async fn close_pr(&self, pr_number: u64) -> Result<()> {
        self.instance
            .pulls(&self.config.owner, &self.config.repo)
            .update(pr_number)
            .state(params::pulls::State::Closed)
            .send()
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;

    #[tokio::test]
    async fn collects_every_page() {
        let mut requested = vec![];

        let items = collect_pages(|page| {
            requested.push(page);
            async move {
                let batch = vec![page * 10, page * 10 + 1];
                Ok((batch, page < 3))
            }
        })
        .await
        .unwrap();

        assert_eq!(requested, vec![1, 2, 3]);
        assert_eq!(items, vec![10, 11, 20, 21, 30, 31]);
    }

    #[tokio::test]
    async fn stops_on_first_failing_page() {
        let result: Result<Vec<u32>> = collect_pages(|page| async move {
            if page == 2 {
                Err(eyre!("rate limited"))
            } else {
                Ok((vec![page], true))
            }
        })
        .await;

        assert_eq!(result.unwrap_err().to_string(), "rate limited");
    }
}
