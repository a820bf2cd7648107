//! Dotted numeric version strings ("2.5.0", "2.10.1.3")

/// Outcome of comparing two dotted versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    Equal,
    Lesser,
    /// At least one side is not a clean dotted numeric version
    Indeterminate,
}

/// A version made only of base-10 components separated by `.`
///
/// Unlike semver there is no fixed arity and no pre-release part.
/// Ordering is defined by [`VersionString::compare`], which stops at the
/// shorter sequence, so this type deliberately does not implement `Ord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionString {
    raw: String,
    components: Vec<u64>,
}

impl VersionString {
    /// Parse a dotted version.
    ///
    /// Whitespace around the string and around each component is trimmed.
    /// Returns `None` if any component is empty or not made of ASCII digits.
    /// Labels such as "Version 2.5.0" must be stripped by the caller.
    ///
    /// Examples:
    /// - "2.5.0" -> [2, 5, 0]
    /// - " 2 . 5 " -> [2, 5]
    /// - "2.x.0" -> None
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let components = raw
            .split('.')
            .map(|part| {
                let part = part.trim();
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                part.parse::<u64>().ok()
            })
            .collect::<Option<Vec<u64>>>()?;

        Some(Self {
            raw: raw.to_string(),
            components,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Compare component by component up to the shorter length.
    ///
    /// The first differing component decides. When every compared component
    /// is equal the result is `Equal`, even if one side has extra trailing
    /// components.
    pub fn compare(&self, other: &Self) -> Comparison {
        self.components
            .iter()
            .zip(other.components.iter())
            .find(|(a, b)| a != b)
            .map(|(a, b)| {
                if a > b {
                    Comparison::Greater
                } else {
                    Comparison::Lesser
                }
            })
            .unwrap_or(Comparison::Equal)
    }
}

impl std::fmt::Display for VersionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse both strings and compare them, `Indeterminate` if either fails to parse
pub fn compare(a: &str, b: &str) -> Comparison {
    match (VersionString::parse(a), VersionString::parse(b)) {
        (Some(a), Some(b)) => a.compare(&b),
        _ => Comparison::Indeterminate,
    }
}
