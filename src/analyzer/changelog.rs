//! Renders the changelog section for a release candidate.
use chrono::NaiveDate;
use log::*;
use semver::Version;
use serde::Serialize;

use crate::{
    analyzer::{
        commit::{ClassifiedCommit, short_sha},
        group::Group,
        helpers,
        release::ReleaseCandidate,
    },
    result::Result,
};

/// Default changelog section template.
pub const DEFAULT_BODY: &str = r#"{{ title }}
{% for section in sections %}
### {{ section.heading }}

{% for entry in section.entries -%}
* {{ entry }}
{% endfor -%}
{% endfor %}
"#;

/// One rendered section of the changelog, e.g. "Bug Fixes".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogSection {
    pub heading: Group,
    pub entries: Vec<String>,
}

#[derive(Serialize)]
struct TemplateContext<'a> {
    title: &'a str,
    sections: &'a [ChangelogSection],
}

/// Rendered release notes for one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub version: Version,
    pub title: String,
    pub sections: Vec<ChangelogSection>,
    /// Full markdown: title line followed by the sections
    pub notes: String,
}

impl ChangelogEntry {
    /// True when no commit landed in any section, meaning no user facing
    /// change since the previous release. Independent of the template, which
    /// may add fixed lines around the sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Groups classified commits into sections and renders them.
#[derive(Debug, Clone)]
pub struct ChangelogSynthesizer {
    repository_url: String,
    template: String,
}

impl ChangelogSynthesizer {
    /// Create a synthesizer that links commits and comparisons against
    /// `repository_url`.
    pub fn new(repository_url: impl Into<String>) -> Self {
        Self {
            repository_url: repository_url
                .into()
                .trim_end_matches('/')
                .to_string(),
            template: DEFAULT_BODY.into(),
        }
    }

    /// Use a custom tera template. The context exposes `title` and
    /// `sections` (each with `heading` and `entries`).
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn synthesize(
        &self,
        candidate: &ReleaseCandidate,
        commits: &[ClassifiedCommit],
        date: NaiveDate,
    ) -> Result<ChangelogEntry> {
        let title = self.title(candidate, date);
        let sections = self.sections(commits);

        let context = tera::Context::from_serialize(TemplateContext {
            title: &title,
            sections: &sections,
        })?;
        let notes = tera::Tera::one_off(&self.template, &context, false)?;
        let notes = helpers::strip_extra_lines(&notes);

        debug!("rendered changelog for {}:\n{notes}", candidate.version);

        Ok(ChangelogEntry {
            version: candidate.version.clone(),
            title,
            sections,
            notes,
        })
    }

    fn title(&self, candidate: &ReleaseCandidate, date: NaiveDate) -> String {
        let date = date.format("%Y-%m-%d");

        match &candidate.previous_tag {
            Some(previous) => format!(
                "## [{}]({}/compare/{}...{}) ({date})",
                candidate.version,
                self.repository_url,
                previous.name,
                candidate.tag_name()
            ),
            None => format!("## {} ({date})", candidate.version),
        }
    }

    fn sections(&self, commits: &[ClassifiedCommit]) -> Vec<ChangelogSection> {
        Group::ALL
            .iter()
            .filter_map(|group| {
                let entries = commits
                    .iter()
                    .filter(|c| Group::for_commit(c) == Some(*group))
                    .map(|c| self.entry(c))
                    .collect::<Vec<String>>();

                if entries.is_empty() {
                    None
                } else {
                    Some(ChangelogSection {
                        heading: *group,
                        entries,
                    })
                }
            })
            .collect()
    }

    fn entry(&self, commit: &ClassifiedCommit) -> String {
        let description = if commit.breaking {
            commit
                .breaking_description
                .as_deref()
                .unwrap_or(&commit.description)
        } else {
            &commit.description
        };

        let description =
            helpers::link_issue_references(description, &self.repository_url);

        let scope = commit
            .scope
            .as_ref()
            .map(|s| format!("**{s}:** "))
            .unwrap_or_default();

        format!(
            "{scope}{description} ([{}]({}/commit/{}))",
            short_sha(&commit.sha),
            self.repository_url,
            commit.sha
        )
    }
}
