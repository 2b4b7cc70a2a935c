//! Field directives: how a child resource is embedded and linked.
//!
//! Directives are declared as tags on a field, for example
//! `embed(all) link(rel=apps)`. The grammar is a space-separated list of
//! `name(param[=value][, param2...])` tokens:
//!
//! - `embed()` / `embed(all)`: inline the child's full representation
//! - `embed(href)`: inline only a `_self` link to the child
//! - `embed(fields(a, b))`: inline the named top-level keys of the child
//! - `link(rel=<name>)`: add a HAL link under `_links.<name>`
//!
//! Tags are parsed once while the graph is built; a malformed tag is a
//! build error, never a request-time one.

use std::str::FromStr;

use thiserror::Error;

/// How a child resource is represented inside its parent's body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Expansion {
    /// Routable, but not embedded.
    #[default]
    None,
    /// Embed a `{ "_self": <path> }` link object only.
    Href,
    /// Embed the child's full, recursively expanded representation.
    Full,
    /// Embed only the listed top-level keys of the child.
    Fields(Vec<String>),
}

impl Expansion {
    /// Whether the child is embedded at all.
    #[must_use]
    pub fn embeds(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Parsed field directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directive {
    /// Embedding behaviour.
    pub expansion: Expansion,
    /// Link relation, if the field declared `link(rel=...)`.
    pub link: Option<String>,
}

/// A tag that does not follow the directive grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed directive '{tag}': {reason}")]
pub struct DirectiveError {
    /// The offending tag, verbatim.
    pub tag: String,
    /// What is wrong with it.
    pub reason: String,
}

impl Directive {
    /// Directive with the given expansion and no link.
    #[must_use]
    pub fn embed(expansion: Expansion) -> Self {
        Self {
            expansion,
            link: None,
        }
    }

    /// Add a link relation.
    #[must_use]
    pub fn with_link(mut self, rel: impl Into<String>) -> Self {
        self.link = Some(rel.into());
        self
    }

    /// Parse a tag. An empty tag yields the default directive.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectiveError`] if the tag is not well-formed, names an
    /// unknown directive, or repeats one.
    pub fn parse(tag: &str) -> Result<Self, DirectiveError> {
        let fail = |reason: String| DirectiveError {
            tag: tag.to_owned(),
            reason,
        };

        let mut directive = Self::default();
        let mut seen_embed = false;

        for token in split_top_level(tag, char::is_whitespace).map_err(fail)? {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let (name, params) = parse_token(token).map_err(fail)?;
            match name {
                "embed" => {
                    if seen_embed {
                        return Err(fail("'embed' is declared more than once".to_owned()));
                    }
                    seen_embed = true;
                    directive.expansion = parse_embed(&params).map_err(fail)?;
                },
                "link" => {
                    if directive.link.is_some() {
                        return Err(fail("'link' is declared more than once".to_owned()));
                    }
                    directive.link = Some(parse_link(&params).map_err(fail)?);
                },
                other => {
                    return Err(fail(format!(
                        "unknown directive '{other}' (expected 'embed' or 'link')"
                    )));
                },
            }
        }

        Ok(directive)
    }
}

impl FromStr for Directive {
    type Err = DirectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A `key[=value]` token parameter.
type Param<'a> = (&'a str, Option<&'a str>);

fn parse_token(token: &str) -> Result<(&str, Vec<Param<'_>>), String> {
    let malformed = || format!("token '{token}' must be in the format 'name(...)'");

    let open = token.find('(').ok_or_else(malformed)?;
    let (name, rest) = token.split_at(open);
    let inner = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(malformed)?;

    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(malformed());
    }

    if inner.trim().is_empty() {
        return Ok((name, Vec::new()));
    }

    let mut params = Vec::new();
    for raw in split_top_level(inner, |c| c == ',')? {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(format!("token '{token}' has an empty parameter"));
        }
        let param = match raw.split_once('=') {
            None => (raw, None),
            Some((key, value)) if !value.contains('=') => (key.trim(), Some(value.trim())),
            Some(_) => {
                return Err(format!(
                    "parameter '{raw}' must be in the format 'name[=value]'"
                ));
            },
        };
        params.push(param);
    }
    Ok((name, params))
}

fn parse_embed(params: &[Param<'_>]) -> Result<Expansion, String> {
    match params {
        [] | [("all", None)] => Ok(Expansion::Full),
        [("href", None)] => Ok(Expansion::Href),
        [(fields, None)] if fields.starts_with("fields(") => parse_fields(fields),
        [(other, _)] => Err(format!(
            "embed type '{other}' is not recognised (expected 'href', 'all' or 'fields(...)')"
        )),
        _ => Err("embed accepts a single expansion".to_owned()),
    }
}

fn parse_fields(token: &str) -> Result<Expansion, String> {
    let (_, params) = parse_token(token)?;
    if params.is_empty() {
        return Err("fields(...) needs at least one field name".to_owned());
    }
    params
        .into_iter()
        .map(|(name, value)| match value {
            None => Ok(name.to_owned()),
            Some(_) => Err(format!("field name '{name}' may not carry a value")),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Expansion::Fields)
}

fn parse_link(params: &[Param<'_>]) -> Result<String, String> {
    match params {
        [("rel", Some(rel))] if !rel.is_empty() => Ok((*rel).to_owned()),
        _ => Err("link requires exactly one 'rel=<name>' parameter".to_owned()),
    }
}

/// Split on separators that are not nested inside parentheses.
fn split_top_level(input: &str, is_separator: impl Fn(char) -> bool) -> Result<Vec<&str>, String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in input.char_indices() {
        match c {
            '(' => depth = depth.saturating_add(1),
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced ')'".to_owned())?;
            },
            c if depth == 0 && is_separator(c) => {
                parts.push(&input[start..i]);
                start = i.saturating_add(c.len_utf8());
            },
            _ => {},
        }
    }

    if depth != 0 {
        return Err("unbalanced '('".to_owned());
    }
    parts.push(&input[start..]);
    Ok(parts)
}
