//! GraphQL queries and response shapes used by the GitHub forge.
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}

pub const COMMITS_QUERY: &str = r#"
query GetCommits($owner: String!, $repo: String!, $page_limit: Int!, $cursor: String) {
  repository(owner: $owner, name: $repo) {
    defaultBranchRef {
      target {
        ... on Commit {
          history(first: $page_limit, after: $cursor) {
            pageInfo {
              hasNextPage
              endCursor
            }
            nodes {
              oid
              message
            }
          }
        }
      }
    }
  }
}"#;

#[derive(Debug, Deserialize)]
pub struct CommitsQueryNode {
    pub oid: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CommitsQueryHistory {
    pub nodes: Vec<CommitsQueryNode>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct CommitsQueryTarget {
    pub history: CommitsQueryHistory,
}

#[derive(Debug, Deserialize)]
pub struct CommitsQueryDefaultBranch {
    pub target: CommitsQueryTarget,
}

#[derive(Debug, Deserialize)]
pub struct CommitsQueryRepository {
    #[serde(rename = "defaultBranchRef")]
    pub default_branch_ref: CommitsQueryDefaultBranch,
}

#[derive(Debug, Deserialize)]
pub struct CommitsQueryData {
    pub repository: CommitsQueryRepository,
}

#[derive(Debug, Deserialize)]
pub struct CommitsQueryResult {
    pub data: CommitsQueryData,
}

#[derive(Debug, Serialize)]
pub struct CommitsQueryVariables {
    pub owner: String,
    pub repo: String,
    pub page_limit: u64,
    pub cursor: Option<String>,
}

pub const TAG_SEARCH_QUERY: &str = r#"
query GetRepoTags(
    $owner: String!
    $repo: String!
    $first: Int
    $cursor: String
) {
    repository(owner: $owner, name: $repo) {
        refs(
            refPrefix: "refs/tags/"
            first: $first
            orderBy: { field: TAG_COMMIT_DATE, direction: DESC }
            after: $cursor
        ) {
            nodes {
                name
                target {
                    __typename
                    ... on Commit {
                        oid
                    }
                    ... on Tag {
                        oid
                        target {
                            ... on Commit {
                                oid
                            }
                        }
                    }
                }
            }
            pageInfo {
                endCursor
                hasNextPage
            }
        }
    }
}
"#;

#[derive(Debug, Deserialize)]
pub struct TagSearchNestedTarget {
    pub oid: String,
}

#[derive(Debug, Deserialize)]
pub enum TagSearchTypeName {
    Commit,
    Tag,
}

#[derive(Debug, Deserialize)]
pub struct TagSearchTarget {
    pub __typename: TagSearchTypeName,
    pub oid: String,
    /// Commit an annotated tag points at
    pub target: Option<TagSearchNestedTarget>,
}

impl TagSearchTarget {
    /// Sha of the tagged commit, peeling annotated tags.
    pub fn commit_sha(&self) -> &str {
        match (&self.__typename, &self.target) {
            (TagSearchTypeName::Tag, Some(nested)) => &nested.oid,
            _ => &self.oid,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TagSearchNode {
    pub name: String,
    pub target: TagSearchTarget,
}

#[derive(Debug, Deserialize)]
pub struct TagSearchRefs {
    pub nodes: Vec<TagSearchNode>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct TagSearchRepository {
    pub refs: TagSearchRefs,
}

#[derive(Debug, Deserialize)]
pub struct TagSearchData {
    pub repository: TagSearchRepository,
}

#[derive(Debug, Deserialize)]
pub struct TagSearchResult {
    pub data: TagSearchData,
}

#[derive(Debug, Serialize)]
pub struct TagSearchQueryVariables {
    pub owner: String,
    pub repo: String,
    pub first: u64,
    pub cursor: Option<String>,
}
