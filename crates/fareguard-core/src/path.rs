use std::fmt;

use serde_json::Value;

use crate::error::{Error, Result};

/// Single segment of a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Literal object key (array indices are addressed via wildcards).
    Key(String),
    /// `*`, matching every index of a sequence or every key of a mapping.
    Wildcard,
}

/// Parsed dotted field path with optional `*` wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parse a dotted path such as `passengers.*.dob`.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::InvalidPath("path must not be empty".to_string()));
        }

        let mut segments = Vec::new();
        for segment in raw.split('.') {
            if segment.is_empty() {
                return Err(Error::InvalidPath(format!("empty segment in '{raw}'")));
            }
            if segment == "*" {
                segments.push(PathSegment::Wildcard);
            } else {
                segments.push(PathSegment::Key(segment.to_string()));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The path exactly as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn has_wildcard(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, PathSegment::Wildcard))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One concrete field produced by expanding a path against a payload.
#[derive(Debug, Clone)]
pub struct ResolvedField<'a> {
    /// Concrete path with wildcards replaced by indices/keys.
    pub path: String,
    /// The leaf value, or `None` when the field is absent.
    pub value: Option<&'a Value>,
    /// The container directly holding the final segment, when it exists.
    /// Cross-field rules use it to inspect sibling attributes.
    pub context: Option<&'a Value>,
}

/// Expand a field path against a payload.
///
/// Literal segments descend through objects and keep the branch alive when
/// a key is missing, so a `required` constraint can report the full
/// declared path. A wildcard yields one result per element of a sequence
/// or per key of a mapping, and zero results when the node is absent or a
/// scalar; absence is a constraint concern, not a resolution concern.
/// Side-effect free and safe to call repeatedly.
pub fn resolve<'a>(payload: &'a Value, path: &FieldPath) -> Vec<ResolvedField<'a>> {
    let mut fields = Vec::new();
    walk(Some(payload), path.segments(), String::new(), &mut fields);
    fields
}

fn walk<'a>(
    node: Option<&'a Value>,
    segments: &[PathSegment],
    prefix: String,
    fields: &mut Vec<ResolvedField<'a>>,
) {
    match segments {
        [] => {}
        [last] => match last {
            PathSegment::Key(key) => fields.push(ResolvedField {
                path: join(&prefix, key),
                value: node.and_then(|container| container.get(key)),
                context: node,
            }),
            PathSegment::Wildcard => {
                let Some(container) = node else { return };
                match container {
                    Value::Array(items) => {
                        for (index, item) in items.iter().enumerate() {
                            fields.push(ResolvedField {
                                path: join(&prefix, &index.to_string()),
                                value: Some(item),
                                context: Some(container),
                            });
                        }
                    }
                    Value::Object(map) => {
                        for (key, item) in map {
                            fields.push(ResolvedField {
                                path: join(&prefix, key),
                                value: Some(item),
                                context: Some(container),
                            });
                        }
                    }
                    _ => {}
                }
            }
        },
        [head, rest @ ..] => match head {
            PathSegment::Key(key) => walk(
                node.and_then(|container| container.get(key)),
                rest,
                join(&prefix, key),
                fields,
            ),
            PathSegment::Wildcard => {
                let Some(container) = node else { return };
                match container {
                    Value::Array(items) => {
                        for (index, item) in items.iter().enumerate() {
                            walk(Some(item), rest, join(&prefix, &index.to_string()), fields);
                        }
                    }
                    Value::Object(map) => {
                        for (key, item) in map {
                            walk(Some(item), rest, join(&prefix, key), fields);
                        }
                    }
                    _ => {}
                }
            }
        },
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}
