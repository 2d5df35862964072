use std::fmt::{self, Display, Formatter};

use crate::attributes::AttributeStore;
use crate::diagnostic::Diagnostics;
use crate::parser::ConvertOptions;

pub const COMMENT_MARKER: &str = "#";
pub const INCLUDE_MARKER: &str = "@include";
pub const NAME_ATTR: &str = "name";
pub const DUMMY_ATTR: &str = "dummy";
pub const WILDCARD: &str = "*";

const INDENT_UNIT: &str = "  ";
const NAME_DEPTH: usize = 2;
const ATTRIBUTE_DEPTH: usize = 3;
const SINGLETON_ATTRIBUTE_DEPTH: usize = 1;

/// The section a [`DirectiveBlock`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Input,
    Output,
    Filter,
    Service,
    Includes,
}

impl BlockKind {
    /// Recognise a classic section marker such as `[INPUT]`.
    ///
    /// Matching is case-insensitive on the trimmed line. `Includes` has no
    /// section marker of its own.
    pub fn from_marker(line: &str) -> Option<BlockKind> {
        match line.trim().to_ascii_uppercase().as_str() {
            "[INPUT]" => Some(BlockKind::Input),
            "[OUTPUT]" => Some(BlockKind::Output),
            "[FILTER]" => Some(BlockKind::Filter),
            "[SERVICE]" => Some(BlockKind::Service),
            _ => None,
        }
    }

    /// Kinds that merge into one logical block per document.
    pub fn is_singleton(self) -> bool {
        matches!(self, BlockKind::Service | BlockKind::Includes)
    }

    /// Label of the pipeline section holding this kind, if any.
    pub fn section_label(self) -> Option<&'static str> {
        match self {
            BlockKind::Input => Some("inputs"),
            BlockKind::Filter => Some("filters"),
            BlockKind::Output => Some("outputs"),
            BlockKind::Service | BlockKind::Includes => None,
        }
    }
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            BlockKind::Input => "input",
            BlockKind::Output => "output",
            BlockKind::Filter => "filter",
            BlockKind::Service => "service",
            BlockKind::Includes => "includes",
        };
        f.write_str(label)
    }
}

/// One section's worth of classic configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveBlock {
    pub kind: BlockKind,
    pub name: Option<String>,
    pub attributes: AttributeStore,
}

impl DirectiveBlock {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            name: None,
            attributes: AttributeStore::new(),
        }
    }

    /// Fold one raw source line into this block.
    ///
    /// Blank lines are ignored. A line without a key/value separator is
    /// reported and dropped. Lines referencing `@include` are reported and
    /// demoted to comments.
    pub fn ingest(
        &mut self,
        raw_line: &str,
        line_number: usize,
        options: &ConvertOptions,
        diagnostics: &mut Diagnostics,
    ) {
        let line = raw_line.trim();
        if line.is_empty() {
            return;
        }

        let has_inclusion = line.to_lowercase().contains(INCLUDE_MARKER);
        if has_inclusion {
            diagnostics.warning(
                Some(line_number),
                format!("{INCLUDE_MARKER} found, kept as a comment: {line}"),
            );
        }

        let (key, rest) = match split_attribute(line) {
            Some(parts) => parts,
            None => {
                diagnostics.error(
                    Some(line_number),
                    format!("cannot process attribute: {line}"),
                );
                return;
            }
        };

        let key = if has_inclusion && key != COMMENT_MARKER {
            format!("{COMMENT_MARKER}{key}")
        } else {
            key
        };
        let key = if options.idiomatic_naming {
            idiomatic_key(&key)
        } else {
            key
        };

        if key.eq_ignore_ascii_case(NAME_ATTR) {
            self.name = Some(rest);
            return;
        }

        let value = normalize_value(&key, rest);
        self.attributes.put(key, value);
    }

    /// Render this block as YAML lines, without a trailing blank line.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.attributes.count() + 1);
        let attribute_indent = if self.kind.is_singleton() {
            indent(SINGLETON_ATTRIBUTE_DEPTH)
        } else {
            let header = match self.name.as_deref() {
                Some(name) if !name.is_empty() => format!("- name: {name}"),
                _ => "- name:".to_string(),
            };
            lines.push(format!("{}{header}", indent(NAME_DEPTH)));
            indent(ATTRIBUTE_DEPTH)
        };

        for (key, values) in self.attributes.iter() {
            for value in values {
                if key == COMMENT_MARKER {
                    lines.push(format!("{attribute_indent}{key}{value}"));
                } else {
                    lines.push(format!("{attribute_indent}{key}: {value}"));
                }
            }
        }
        lines
    }
}

/// Convert an underscore separated key to camel case.
///
/// The key is lower-cased first; every underscore is removed and the
/// character after it upper-cased. `tls_verify` becomes `tlsVerify`.
pub fn idiomatic_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.to_lowercase().chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

// Comment lines become a single `#` pseudo-attribute whose value is the
// untouched remainder, so `# note` renders back as `# note`.
fn split_attribute(line: &str) -> Option<(String, String)> {
    if let Some(rest) = line.strip_prefix(COMMENT_MARKER) {
        return Some((COMMENT_MARKER.to_string(), rest.to_string()));
    }
    let (key, rest) = line.split_once(char::is_whitespace)?;
    Some((key.to_string(), rest.trim().to_string()))
}

fn normalize_value(key: &str, value: String) -> String {
    let value = if value == WILDCARD {
        format!("'{WILDCARD}'")
    } else {
        value
    };
    if key.eq_ignore_ascii_case(DUMMY_ATTR) && !value.starts_with('\'') {
        format!("'{value}'")
    } else {
        value
    }
}

fn indent(depth: usize) -> String {
    INDENT_UNIT.repeat(depth)
}
