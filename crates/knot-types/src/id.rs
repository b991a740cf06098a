use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Number of hex digits in the random part of every token.
const HEX_LEN: usize = 32;

/// Mint a fresh opaque token.
///
/// The token is a random (version 4) UUID rendered as 32 lowercase hex
/// digits without dashes. When `tag` is supplied it is appended as a
/// `-{tag}` suffix so rows can be traced back to the tree that produced
/// them; the tag never contributes to uniqueness.
pub fn mint(tag: Option<u32>) -> String {
    let bytes: [u8; 16] = rand::random();
    let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
    match tag {
        Some(tag) => format!("{}-{tag}", uuid.simple()),
        None => uuid.simple().to_string(),
    }
}

/// Check the `<32 hex>[-<u32>]` shape and return the parsed tag.
fn parse_token(s: &str) -> Result<Option<u32>, TypeError> {
    let (hex, tag) = match s.split_once('-') {
        Some((hex, tag)) => (hex, Some(tag)),
        None => (s, None),
    };
    let hex_ok = hex.len() == HEX_LEN
        && hex
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if !hex_ok {
        return Err(TypeError::InvalidId(s.to_string()));
    }
    match tag {
        None => Ok(None),
        Some(tag) if !tag.is_empty() && tag.bytes().all(|b| b.is_ascii_digit()) => tag
            .parse::<u32>()
            .map(Some)
            .map_err(|_| TypeError::InvalidTag(s.to_string())),
        Some(_) => Err(TypeError::InvalidTag(s.to_string())),
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// The full token text.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The traceability tag embedded in the token, if any.
            pub fn tag(&self) -> Option<u32> {
                self.0
                    .split_once('-')
                    .and_then(|(_, tag)| tag.parse().ok())
            }

            /// Short representation (first 8 hex characters).
            pub fn short_id(&self) -> &str {
                &self.0[..8]
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.short_id())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_token(s)?;
                Ok(Self(s.to_string()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                parse_token(&s)?;
                Ok(Self(s))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id! {
    /// Stable identity of a knot.
    ///
    /// Assigned once at creation and never reused. Sibling and parent links
    /// are stored as `NodeId`s and resolved to a [`VersionId`] only when a
    /// row is emitted.
    NodeId
}

opaque_id! {
    /// Physical token naming one immutable version of a knot.
    VersionId
}

opaque_id! {
    /// Identity shared by every knot of one tree.
    TreeId
}

opaque_id! {
    /// Identity of a single emitted hierarchy row.
    RowId
}

impl NodeId {
    /// Mint a new node identity.
    pub fn generate(tag: Option<u32>) -> Self {
        Self(mint(tag))
    }
}

impl VersionId {
    /// Mint a new version token.
    pub fn generate(tag: Option<u32>) -> Self {
        Self(mint(tag))
    }
}

impl TreeId {
    /// Mint a new tree identity.
    pub fn generate(tag: Option<u32>) -> Self {
        Self(mint(tag))
    }
}

impl RowId {
    /// Mint a new, untagged row identity.
    pub fn generate() -> Self {
        Self(mint(None))
    }
}
