//! Per-field binding descriptors and external name derivation.

use std::borrow::Cow;

const SECRET_SUFFIX: &[u8] = b",secret";

/// How a single record field is bound.
///
/// Descriptors are built in `const` context by [`bind_fields!`](crate::bind_fields),
/// so tag text is parsed once at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    ident: &'static str,
    name: &'static str,
    secret: bool,
    prefix: &'static str,
}

impl Field {
    /// Describes a leaf field from its identifier and tag.
    ///
    /// The tag is empty (derive the name from `ident`), `-` (skip the field),
    /// a literal name, or either of the latter two followed by `,secret`.
    pub const fn leaf(ident: &'static str, tag: &'static str) -> Self {
        let bytes = tag.as_bytes();
        let secret = ends_with(bytes, SECRET_SUFFIX);
        let name = if secret {
            let (head, _) = bytes.split_at(bytes.len() - SECRET_SUFFIX.len());
            match std::str::from_utf8(head) {
                Ok(name) => name,
                Err(_) => panic!("field tag is not valid UTF-8"),
            }
        } else {
            tag
        };

        Self {
            ident,
            name,
            secret,
            prefix: "",
        }
    }

    /// Describes a nested record field whose names are extended by `prefix`.
    pub const fn nested(ident: &'static str, prefix: &'static str) -> Self {
        Self {
            ident,
            name: "",
            secret: false,
            prefix,
        }
    }

    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    pub const fn is_skipped(&self) -> bool {
        matches!(self.name.as_bytes(), [b'-'])
    }

    pub const fn is_secret(&self) -> bool {
        self.secret
    }

    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// The external name without the active prefix.
    pub fn name(&self) -> Cow<'static, str> {
        if self.name.is_empty() {
            Cow::Owned(upper_snake_case(self.ident))
        } else {
            Cow::Borrowed(self.name)
        }
    }
}

const fn ends_with(bytes: &[u8], suffix: &[u8]) -> bool {
    if bytes.len() < suffix.len() {
        return false;
    }
    let offset = bytes.len() - suffix.len();
    let mut i = 0;
    while i < suffix.len() {
        if bytes[offset + i] != suffix[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Converts a mixed-case identifier into `UPPER_SNAKE_CASE`.
///
/// An underscore goes before an ASCII uppercase letter only when the previous
/// character is neither uppercase nor an underscore, so runs of capitals stay
/// together: `dbHost` becomes `DB_HOST` while `APIHost` becomes `APIHOST`.
pub fn upper_snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    let mut prev: Option<char> = None;

    for ch in ident.chars() {
        if ch.is_ascii_uppercase() {
            if let Some(p) = prev {
                if !p.is_ascii_uppercase() && p != '_' {
                    out.push('_');
                }
            }
        }
        out.extend(ch.to_uppercase());
        prev = Some(ch);
    }

    out
}
