//! `OWNER/REPO` references accepted by the tools

use std::fmt;
use std::str::FromStr;

use repo_signals::types::Owner;
use repo_signals::RawRepo;
use thiserror::Error;

/// Rejected repository reference
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected a repository in OWNER/REPO format, got '{0}'")]
pub struct InvalidRepoRef(pub String);

/// Owner and name of one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Minimal record carrying only the identity; the comparator refreshes it
    pub fn skeleton(&self) -> RawRepo {
        RawRepo {
            name: self.name.clone(),
            full_name: self.to_string(),
            owner: Some(Owner {
                login: self.owner.clone(),
            }),
            ..Default::default()
        }
    }
}

impl FromStr for RepoRef {
    type Err = InvalidRepoRef;

    /// Accepts `owner/repo` and `https://github.com/owner/repo(.git)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('/');
        let path = trimmed
            .strip_prefix("https://github.com/")
            .or_else(|| trimmed.strip_prefix("github.com/"))
            .unwrap_or(trimmed);
        let path = path.strip_suffix(".git").unwrap_or(path);

        match path.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(InvalidRepoRef(s.to_string())),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_repo() {
        let r: RepoRef = "rust-lang/cargo".parse().unwrap();
        assert_eq!(r.owner, "rust-lang");
        assert_eq!(r.name, "cargo");
        assert_eq!(r.to_string(), "rust-lang/cargo");
    }

    #[test]
    fn test_parse_url_forms() {
        for input in [
            "https://github.com/rust-lang/cargo",
            "https://github.com/rust-lang/cargo.git",
            "github.com/rust-lang/cargo/",
            "  rust-lang/cargo ",
        ] {
            let r: RepoRef = input.parse().unwrap();
            assert_eq!(r.to_string(), "rust-lang/cargo", "input {input}");
        }
    }

    #[test]
    fn test_reject_malformed() {
        for input in ["", "cargo", "/cargo", "rust-lang/", "a/b/c"] {
            assert!(input.parse::<RepoRef>().is_err(), "input {input:?}");
        }
    }

    #[test]
    fn test_skeleton_is_addressable() {
        let repo = "acme/tool".parse::<RepoRef>().unwrap().skeleton();
        assert!(repo.is_addressable());
        assert_eq!(repo.slug(), "acme/tool");
        assert_eq!(repo.stargazers_count, 0);
    }
}
