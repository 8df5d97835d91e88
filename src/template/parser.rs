//! Template scanner and tree builder.
//!
//! Scans for the open delimiter, classifies each tag by its sigil and builds
//! the section tree with an explicit stack. Lines holding nothing but one
//! non-variable tag are dropped together with their line terminator.

use super::{EscapeMode, Node};
use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

const DEFAULT_OPEN: &str = "{{";
const DEFAULT_CLOSE: &str = "}}";

/// Set-delimiter tag body: `=<open> <close>=`.
static DELIMITER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^=\s*(\S+)\s+(\S+)\s*=$").unwrap_or_else(|_| unreachable!())
});

#[derive(Debug)]
enum TagKind {
    Variable(EscapeMode),
    Open { inverted: bool },
    Close,
    Comment,
    Delimiters { open: String, close: String },
}

impl TagKind {
    const fn may_stand_alone(&self) -> bool {
        !matches!(self, Self::Variable(_))
    }
}

#[derive(Debug)]
struct Tag {
    kind: TagKind,
    name: String,
    /// Byte offset just past the close delimiter.
    end: usize,
}

/// An open section awaiting its closing tag.
struct Frame {
    name: String,
    inverted: bool,
    offset: usize,
    children: Vec<Node>,
}

/// Parses template source into a node tree.
pub(super) fn parse(source: &str) -> Result<Vec<Node>> {
    let mut open = DEFAULT_OPEN.to_string();
    let mut close = DEFAULT_CLOSE.to_string();
    let mut root = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut pos = 0;

    while let Some(found) = source[pos..].find(open.as_str()) {
        let tag_start = pos + found;
        let tag = scan_tag(source, tag_start, &open, &close)?;

        let (text_end, next_pos) = if tag.kind.may_stand_alone() {
            standalone_span(source, pos, tag_start, tag.end).unwrap_or((tag_start, tag.end))
        } else {
            (tag_start, tag.end)
        };
        push_text(children(&mut root, &mut stack), &source[pos..text_end]);
        pos = next_pos;

        match tag.kind {
            TagKind::Variable(escape) => {
                children(&mut root, &mut stack).push(Node::Variable {
                    name: tag.name,
                    escape,
                });
            },
            TagKind::Open { inverted } => stack.push(Frame {
                name: tag.name,
                inverted,
                offset: tag_start,
                children: Vec::new(),
            }),
            TagKind::Close => {
                let Some(frame) = stack.pop() else {
                    return Err(syntax_error(
                        source,
                        tag_start,
                        format!("closing tag '{}' has no open section", tag.name),
                    ));
                };
                if frame.name != tag.name {
                    return Err(syntax_error(
                        source,
                        tag_start,
                        format!("section '{}' closed by '{}'", frame.name, tag.name),
                    ));
                }
                children(&mut root, &mut stack).push(Node::Section {
                    name: frame.name,
                    inverted: frame.inverted,
                    children: frame.children,
                });
            },
            TagKind::Comment => {},
            TagKind::Delimiters {
                open: new_open,
                close: new_close,
            } => {
                open = new_open;
                close = new_close;
            },
        }
    }

    push_text(children(&mut root, &mut stack), &source[pos..]);

    if let Some(frame) = stack.pop() {
        return Err(syntax_error(
            source,
            frame.offset,
            format!("unclosed section '{}'", frame.name),
        ));
    }

    Ok(root)
}

/// The node list new segments go into: the innermost open section, or the root.
fn children<'a>(root: &'a mut Vec<Node>, stack: &'a mut [Frame]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => root,
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}

/// Reads the tag starting at `tag_start`, which points at the open delimiter.
fn scan_tag(source: &str, tag_start: usize, open: &str, close: &str) -> Result<Tag> {
    let inner_start = tag_start + open.len();
    let rest = &source[inner_start..];

    if let Some(raw) = rest.strip_prefix('{') {
        let terminator = format!("}}{close}");
        let Some(len) = raw.find(terminator.as_str()) else {
            return Err(syntax_error(
                source,
                tag_start,
                format!("unterminated raw tag: expected '{terminator}'"),
            ));
        };
        let name = checked_name(source, tag_start, &raw[..len])?;
        return Ok(Tag {
            kind: TagKind::Variable(EscapeMode::Raw),
            name,
            end: inner_start + 1 + len + terminator.len(),
        });
    }

    let Some(len) = rest.find(close) else {
        return Err(syntax_error(
            source,
            tag_start,
            format!("unterminated tag: expected '{close}'"),
        ));
    };
    let end = inner_start + len + close.len();
    let content = rest[..len].trim();

    let mut chars = content.chars();
    let (kind, body) = match chars.next() {
        Some('!') => (TagKind::Comment, ""),
        Some('#') => (TagKind::Open { inverted: false }, chars.as_str()),
        Some('^') => (TagKind::Open { inverted: true }, chars.as_str()),
        Some('/') => (TagKind::Close, chars.as_str()),
        Some('&') => (TagKind::Variable(EscapeMode::Raw), chars.as_str()),
        Some('=') => {
            let kind = parse_delimiters(source, tag_start, content)?;
            return Ok(Tag {
                kind,
                name: String::new(),
                end,
            });
        },
        Some('>') => {
            return Err(syntax_error(
                source,
                tag_start,
                "partial tags are not supported",
            ));
        },
        Some('{') => {
            return Err(syntax_error(
                source,
                tag_start,
                "raw tag must start directly after the open delimiter",
            ));
        },
        _ => (TagKind::Variable(EscapeMode::Escaped), content),
    };

    let name = if matches!(kind, TagKind::Comment) {
        String::new()
    } else {
        checked_name(source, tag_start, body)?
    };

    Ok(Tag { kind, name, end })
}

fn parse_delimiters(source: &str, tag_start: usize, content: &str) -> Result<TagKind> {
    let captures = DELIMITER_PATTERN.captures(content).ok_or_else(|| {
        syntax_error(
            source,
            tag_start,
            "malformed set-delimiter tag: expected '=<open> <close>='",
        )
    })?;
    let open = captures.get(1).map_or("", |m| m.as_str());
    let close = captures.get(2).map_or("", |m| m.as_str());
    if open.contains('=') || close.contains('=') {
        return Err(syntax_error(
            source,
            tag_start,
            "delimiters may not contain '='",
        ));
    }
    Ok(TagKind::Delimiters {
        open: open.to_string(),
        close: close.to_string(),
    })
}

/// Validates a tag name: non-empty, no whitespace, no empty dotted segments.
fn checked_name(source: &str, tag_start: usize, raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(syntax_error(source, tag_start, "empty tag name"));
    }
    let malformed = name.chars().any(char::is_whitespace)
        || (name != "." && name.split('.').any(str::is_empty));
    if malformed {
        return Err(syntax_error(
            source,
            tag_start,
            format!("invalid tag name '{name}'"),
        ));
    }
    Ok(name.to_string())
}

/// If the tag sits alone on its line, returns the span to drop: from the
/// start of the line to just past its terminator.
///
/// `pos` is where the pending text run starts; a line start before it means
/// another tag shares the line.
fn standalone_span(
    source: &str,
    pos: usize,
    tag_start: usize,
    tag_end: usize,
) -> Option<(usize, usize)> {
    let line_start = source[..tag_start].rfind('\n').map_or(0, |i| i + 1);
    if line_start < pos || !source[line_start..tag_start].chars().all(is_blank) {
        return None;
    }

    let rest = &source[tag_end..];
    let (tail, next) = match rest.find('\n') {
        Some(i) => (&rest[..i], tag_end + i + 1),
        None => (rest, source.len()),
    };
    if !tail.chars().all(|c| is_blank(c) || c == '\r') {
        return None;
    }

    Some((line_start, next))
}

const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// Builds a syntax error positioned at byte `offset`.
fn syntax_error(source: &str, offset: usize, message: impl Into<String>) -> Error {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_text = before.rfind('\n').map_or(before, |i| &before[i + 1..]);
    Error::TemplateSyntax {
        line,
        column: line_text.chars().count() + 1,
        message: message.into(),
    }
}
