//! Name tokenization and token classification

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Delimiter between the tokens of a node name
pub const NAME_DELIMITER: char = '_';

/// Side markers
pub const SIDES: [&str; 3] = ["L", "R", "M"];

/// Instance numbers are zero-padded to this many digits (`000`, `012`)
pub const INSTANCE_NUMBER_WIDTH: usize = 3;

/// What a single name token stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Side,
    InstanceNumber,
    Type,
    Resolution,
    NodeName,
    /// A digit run of the wrong width
    Undefined,
}

impl TokenKind {
    /// Placeholder used when printing templates
    pub fn placeholder(self) -> &'static str {
        match self {
            TokenKind::Side => "{SIDE}",
            TokenKind::InstanceNumber => "{INSTANCE_NUMBER}",
            TokenKind::Type => "{TYPE}",
            TokenKind::Resolution => "{RESOLUTION}",
            TokenKind::NodeName => "{NODE_NAME}",
            TokenKind::Undefined => "{UNDEFINED}",
        }
    }
}

/// A name segment and what it was classified as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
}

/// Ordered token kinds of a name, literal values ignored
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Template(Vec<TokenKind>);

impl Template {
    pub fn new(kinds: impl Into<Vec<TokenKind>>) -> Self {
        Self(kinds.into())
    }

    pub fn kinds(&self) -> &[TokenKind] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Same template with `kind` appended
    pub fn with(&self, kind: TokenKind) -> Self {
        let mut kinds = self.0.clone();
        kinds.push(kind);
        Self(kinds)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.0.iter().map(|k| k.placeholder()).collect();
        write!(f, "{}", parts.join("_"))
    }
}

/// A node's tokens grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeNameData {
    pub side: Vec<String>,
    pub name: Vec<String>,
    pub instance_number: Vec<String>,
    pub type_tag: Vec<String>,
    pub resolution: Vec<String>,
    pub undefined: Vec<String>,
}

impl NodeNameData {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut data = Self::default();
        for token in tokens {
            let bucket = match token.kind {
                TokenKind::Side => &mut data.side,
                TokenKind::NodeName => &mut data.name,
                TokenKind::InstanceNumber => &mut data.instance_number,
                TokenKind::Type => &mut data.type_tag,
                TokenKind::Resolution => &mut data.resolution,
                TokenKind::Undefined => &mut data.undefined,
            };
            bucket.push(token.value.clone());
        }
        data
    }
}

/// Controlled vocabularies used to classify tokens.
///
/// Sides are fixed; type tags are those of one validator category and the
/// resolutions come from the naming policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    type_tags: BTreeSet<String>,
    resolutions: BTreeSet<String>,
}

impl Vocabulary {
    pub fn new<T, R>(type_tags: T, resolutions: R) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            type_tags: type_tags.into_iter().map(Into::into).collect(),
            resolutions: resolutions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.type_tags.iter().map(String::as_str)
    }

    pub fn resolutions(&self) -> impl Iterator<Item = &str> {
        self.resolutions.iter().map(String::as_str)
    }

    pub fn is_type_tag(&self, token: &str) -> bool {
        self.type_tags.contains(token)
    }

    /// Classify one token; first match wins, in declaration order of
    /// [`TokenKind`]
    pub fn classify(&self, token: &str) -> TokenKind {
        if SIDES.contains(&token) {
            TokenKind::Side
        } else if is_digits(token) {
            if token.len() == INSTANCE_NUMBER_WIDTH {
                TokenKind::InstanceNumber
            } else {
                TokenKind::Undefined
            }
        } else if self.type_tags.contains(token) {
            TokenKind::Type
        } else if self.resolutions.contains(token) {
            TokenKind::Resolution
        } else {
            TokenKind::NodeName
        }
    }

    /// Split and classify a short name. Consecutive name tokens stay
    /// separate, so `Table_Leg` yields two `NodeName` tokens.
    pub fn tokenize(&self, short_name: &str) -> Vec<Token> {
        split_name(short_name)
            .into_iter()
            .map(|value| Token {
                kind: self.classify(value),
                value: value.to_string(),
            })
            .collect()
    }

    pub fn template_of(&self, short_name: &str) -> Template {
        Template(self.tokenize(short_name).into_iter().map(|t| t.kind).collect())
    }

    pub fn name_data(&self, short_name: &str) -> NodeNameData {
        NodeNameData::from_tokens(&self.tokenize(short_name))
    }
}

pub(crate) fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Split a short name on the delimiter, keeping empty segments
pub fn split_name(short_name: &str) -> Vec<&str> {
    short_name.split(NAME_DELIMITER).collect()
}

/// The tag that decides which validator handles a node: the last token,
/// or the one before it when the last token is a resolution.
pub fn trailing_type_tag<'a, S: AsRef<str>>(short_name: &'a str, resolutions: &[S]) -> Option<&'a str> {
    let tokens = split_name(short_name);
    let (last, rest) = tokens.split_last()?;
    if resolutions.iter().any(|r| r.as_ref() == *last) {
        rest.last().copied()
    } else {
        Some(*last)
    }
}
