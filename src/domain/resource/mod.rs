// SPDX-License-Identifier: MPL-2.0
//! Resource path normalization.
//!
//! A request is either absolute (leading `/`) or relative to a dotted
//! namespace such as `io.acme.widgets`. Both forms normalize to a
//! `/`-delimited key without a leading separator, which is what contributors
//! are queried with.

use std::fmt;

/// Path separator used by resource keys.
pub const SEPARATOR: char = '/';

/// A normalized resource key, e.g. `io/acme/Foo_de.properties`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// Normalizes `request` against `namespace`.
    ///
    /// Absolute requests lose exactly one leading separator; the namespace is
    /// ignored for them. Relative requests are prefixed with the namespace,
    /// dots replaced by separators. An empty namespace leaves a relative
    /// request as-is.
    ///
    /// ```
    /// use l10n_overlay::domain::ResourcePath;
    ///
    /// let abs = ResourcePath::normalize("/io/acme/Foo.properties", "org.other");
    /// assert_eq!(abs.as_str(), "io/acme/Foo.properties");
    ///
    /// let rel = ResourcePath::normalize("Foo.properties", "io.acme");
    /// assert_eq!(rel.as_str(), "io/acme/Foo.properties");
    /// ```
    #[must_use]
    pub fn normalize(request: &str, namespace: &str) -> Self {
        if let Some(stripped) = request.strip_prefix(SEPARATOR) {
            return Self(stripped.to_string());
        }
        if namespace.is_empty() {
            return Self(request.to_string());
        }
        let prefix = namespace.replace('.', "/");
        Self(format!("{prefix}{SEPARATOR}{request}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
