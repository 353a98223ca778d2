//! Computes the concrete next version for a release candidate.
use log::*;
use semver::{BuildMetadata, Prerelease, Version};

use crate::{
    analyzer::{
        bump::BumpDecision,
        release::{ReleaseCandidate, Tag},
    },
    error::ReleaseError,
    result::Result,
};

/// Version used for the very first release of a package.
pub const DEFAULT_SEED_VERSION: Version = Version::new(1, 0, 0);

/// Parse a version as it appears on a tag or on the command line, allowing
/// an optional leading `v`.
pub fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(stripped).ok()
}

/// Increment `version` by `bump`, clearing prerelease and build metadata.
/// Returns None when the bumped component would overflow.
pub fn increment(version: &Version, bump: BumpDecision) -> Option<Version> {
    let mut next = version.clone();

    match bump {
        BumpDecision::Major => {
            next.major = next.major.checked_add(1)?;
            next.minor = 0;
            next.patch = 0;
        }
        BumpDecision::Minor => {
            next.minor = next.minor.checked_add(1)?;
            next.patch = 0;
        }
        BumpDecision::Patch => next.patch = next.patch.checked_add(1)?,
        BumpDecision::None => return Some(next),
    }

    next.pre = Prerelease::EMPTY;
    next.build = BuildMetadata::EMPTY;
    Some(next)
}

/// Combine the previous tag, the bump, and an optional explicit version into
/// the next release candidate.
///
/// * no previous tag and no override: `seed`
/// * override present: the override, unconditionally, even when it is not
///   greater than the previous version
/// * otherwise: previous version incremented by `bump`
pub fn coerce_release_candidate(
    previous_tag: Option<&Tag>,
    bump: BumpDecision,
    release_as: Option<&Version>,
    seed: &Version,
) -> Result<ReleaseCandidate> {
    let version = match (previous_tag, release_as) {
        (_, Some(release_as)) => {
            info!("using explicit release version: {release_as}");
            release_as.clone()
        }
        (None, None) => {
            info!("no previous release found: using seed version {seed}");
            seed.clone()
        }
        (Some(tag), None) => {
            let previous = parse_version(&tag.version).ok_or_else(|| {
                ReleaseError::version_computation(tag.version.clone())
            })?;
            let next = increment(&previous, bump).ok_or_else(|| {
                ReleaseError::version_computation(tag.version.clone())
            })?;
            info!("computed next version: {previous} -> {next} ({bump})");
            next
        }
    };

    Ok(ReleaseCandidate {
        version,
        previous_tag: previous_tag.cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(version: &str) -> Tag {
        Tag::new("tagsha", format!("v{version}"), version)
    }

    #[test]
    fn increments_each_bump_size() {
        let version = Version::parse("1.2.3").unwrap();
        assert_eq!(
            increment(&version, BumpDecision::Major),
            Some(Version::new(2, 0, 0))
        );
        assert_eq!(
            increment(&version, BumpDecision::Minor),
            Some(Version::new(1, 3, 0))
        );
        assert_eq!(
            increment(&version, BumpDecision::Patch),
            Some(Version::new(1, 2, 4))
        );
        assert_eq!(
            increment(&version, BumpDecision::None),
            Some(Version::new(1, 2, 3))
        );
    }

    #[test]
    fn increment_overflow_is_none() {
        let version = Version::new(u64::MAX, u64::MAX, u64::MAX);
        assert_eq!(increment(&version, BumpDecision::Major), None);
        assert_eq!(increment(&version, BumpDecision::Minor), None);
        assert_eq!(increment(&version, BumpDecision::Patch), None);
    }

    #[test]
    fn increment_clears_prerelease() {
        let version = Version::parse("1.2.3-beta.1+build.5").unwrap();
        assert_eq!(
            increment(&version, BumpDecision::Patch),
            Some(Version::new(1, 2, 4))
        );
    }

    #[test]
    fn parse_version_strips_v_prefix() {
        assert_eq!(parse_version("v1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_version("1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_version("one.two"), None);
    }

    #[test]
    fn seeds_first_release() {
        let candidate = coerce_release_candidate(
            None,
            BumpDecision::Major,
            None,
            &DEFAULT_SEED_VERSION,
        )
        .unwrap();

        assert_eq!(candidate.version.to_string(), "1.0.0");
        assert_eq!(candidate.previous_tag, None);
    }

    #[test]
    fn bumps_previous_tag() {
        let previous = tag("1.2.3");
        let candidate = coerce_release_candidate(
            Some(&previous),
            BumpDecision::Minor,
            None,
            &DEFAULT_SEED_VERSION,
        )
        .unwrap();

        assert_eq!(candidate.version.to_string(), "1.3.0");
        assert_eq!(candidate.previous_tag, Some(previous));
        assert_eq!(candidate.tag_name(), "v1.3.0");
    }

    #[test]
    fn accepts_v_prefixed_tag_versions() {
        let previous = Tag::new("tagsha", "v0.4.1", "v0.4.1");
        let candidate = coerce_release_candidate(
            Some(&previous),
            BumpDecision::Patch,
            None,
            &DEFAULT_SEED_VERSION,
        )
        .unwrap();

        assert_eq!(candidate.version.to_string(), "0.4.2");
    }

    #[test]
    fn override_wins_regardless_of_bump() {
        let release_as = Version::new(2, 0, 0);

        for bump in [
            BumpDecision::None,
            BumpDecision::Patch,
            BumpDecision::Minor,
            BumpDecision::Major,
        ] {
            let previous = tag("1.2.3");
            let with_tag = coerce_release_candidate(
                Some(&previous),
                bump,
                Some(&release_as),
                &DEFAULT_SEED_VERSION,
            )
            .unwrap();
            let without_tag = coerce_release_candidate(
                None,
                bump,
                Some(&release_as),
                &DEFAULT_SEED_VERSION,
            )
            .unwrap();

            assert_eq!(with_tag.version.to_string(), "2.0.0");
            assert_eq!(without_tag.version.to_string(), "2.0.0");
        }
    }

    #[test]
    fn override_may_go_backwards() {
        // operator overrides are trusted, no monotonicity check
        let previous = tag("3.1.0");
        let release_as = Version::new(2, 0, 0);
        let candidate = coerce_release_candidate(
            Some(&previous),
            BumpDecision::Minor,
            Some(&release_as),
            &DEFAULT_SEED_VERSION,
        )
        .unwrap();

        assert!(candidate.version < Version::new(3, 1, 0));
    }

    #[test]
    fn malformed_previous_version_fails() {
        let previous = Tag::new("tagsha", "release-latest", "latest");
        let err = coerce_release_candidate(
            Some(&previous),
            BumpDecision::Patch,
            None,
            &DEFAULT_SEED_VERSION,
        )
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ReleaseError>(),
            Some(&ReleaseError::version_computation("latest"))
        );
    }

    #[test]
    fn overflowing_previous_version_fails() {
        let max = u64::MAX.to_string();
        let previous = tag(&format!("1.{max}.0"));
        let err = coerce_release_candidate(
            Some(&previous),
            BumpDecision::Minor,
            None,
            &DEFAULT_SEED_VERSION,
        )
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ReleaseError>(),
            Some(&ReleaseError::version_computation(format!("1.{max}.0")))
        );
    }
}
