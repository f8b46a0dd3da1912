//! Composite module identifiers (`name:version:architecture:mode`).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A parsed module token.
///
/// Missing parts are empty strings. Parsing is total: any input, including
/// the empty string or a token with more than four segments, produces an
/// identifier. Callers check [`ModuleIdentifier::name`] before looking the
/// module up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModuleIdentifier {
    pub name: String,
    pub version: String,
    pub architecture: String,
    pub mode: String,
}

impl ModuleIdentifier {
    /// Split a colon-delimited token into at most four parts.
    ///
    /// Segments past the fourth are ignored.
    ///
    /// ```rust
    /// use isoftrepo::models::ModuleIdentifier;
    ///
    /// let id = ModuleIdentifier::parse("cp2k:8.2:x86_64:para");
    /// assert_eq!(id.version, "8.2");
    /// assert_eq!(id.mode, "para");
    ///
    /// let partial = ModuleIdentifier::parse("cp2k");
    /// assert!(!partial.has_version());
    /// ```
    pub fn parse(token: &str) -> Self {
        let mut parts = token.split(':');
        let mut next = || parts.next().unwrap_or_default().to_string();
        Self {
            name: next(),
            version: next(),
            architecture: next(),
            mode: next(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn has_version(&self) -> bool {
        !self.version.is_empty()
    }

    pub fn has_mode(&self) -> bool {
        !self.mode.is_empty()
    }

    /// `name:version`, the key of a version page.
    pub fn modver(&self) -> String {
        format!("{}:{}", self.name, self.version)
    }

    /// `name:version:architecture:mode`, the key of a build page.
    pub fn build_name(&self) -> String {
        format!("{}:{}:{}:{}", self.name, self.version, self.architecture, self.mode)
    }
}

impl FromStr for ModuleIdentifier {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ModuleIdentifier {
    /// Shortest token that parses back to the same identifier.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [&self.name, &self.version, &self.architecture, &self.mode];
        let len = parts.iter().rposition(|p| !p.is_empty()).map_or(0, |i| i + 1);
        for (i, part) in parts[..len].iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_token() {
        let id = ModuleIdentifier::parse("gromacs:2021.4:x86_64:single");
        assert_eq!(id.name, "gromacs");
        assert_eq!(id.version, "2021.4");
        assert_eq!(id.architecture, "x86_64");
        assert_eq!(id.mode, "single");
        assert_eq!(id.build_name(), "gromacs:2021.4:x86_64:single");
    }

    #[test]
    fn test_parse_partial_tokens() {
        let id = ModuleIdentifier::parse("gromacs:2021.4");
        assert_eq!(id.modver(), "gromacs:2021.4");
        assert!(id.architecture.is_empty());
        assert!(!id.has_mode());

        let id = ModuleIdentifier::parse("gromacs");
        assert!(id.has_name());
        assert!(!id.has_version());
    }

    #[test]
    fn test_parse_empty_token() {
        let id = ModuleIdentifier::parse("");
        assert_eq!(id, ModuleIdentifier::default());
        assert!(!id.has_name());
    }

    #[test]
    fn test_extra_segments_ignored() {
        let id = ModuleIdentifier::parse("a:b:c:d:e:f");
        assert_eq!(id.mode, "d");
        assert_eq!(id.to_string(), "a:b:c:d");
    }

    #[test]
    fn test_skipped_version_is_not_rejected() {
        let id = ModuleIdentifier::parse("a::x86");
        assert_eq!(id.name, "a");
        assert!(!id.has_version());
        assert_eq!(id.architecture, "x86");
    }

    #[test]
    fn test_display_parses_back() {
        for token in ["", "a", "a:1", "a:1:x", "a:1:x:m", "a::x"] {
            let id = ModuleIdentifier::parse(token);
            assert_eq!(ModuleIdentifier::parse(&id.to_string()), id, "token {token:?}");
        }
    }
}
