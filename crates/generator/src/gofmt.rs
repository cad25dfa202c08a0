//! Canonical formatting for generated Go source.
//!
//! Plays the role `gofmt` would play if a Go toolchain were available at
//! generation time: it validates that the rendered text lexes as Go and
//! reprints it in canonical layout. Validation is lexical, not a full parse.
//! It catches what template substitution can realistically break: literals
//! and comments left unterminated, unbalanced delimiters, characters Go has
//! no token for, and newlines inside interpreted strings.
//!
//! Canonical layout means tab indentation derived from delimiter nesting,
//! no trailing whitespace, at most one blank line in a row and none against
//! a block edge, import specs sorted by path within their groups, and a
//! single trailing newline. Formatting already-formatted source is a no-op.

use thiserror::Error;

/// A lexical error in source handed to [`format_source`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    /// 1-based line the error was detected on.
    pub line: usize,
    pub message: String,
}

impl SyntaxError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Validate `src` as Go source and reprint it in canonical layout.
///
/// Returns the formatted text, always ending in exactly one newline, or the
/// first lexical error found. Raw string and block comment interiors are
/// preserved byte for byte.
pub fn format_source(src: &str) -> Result<String, SyntaxError> {
    let mut lines = scan(src)?;
    sort_import_blocks(&mut lines);

    let rendered: Vec<Rendered> = lines.iter().map(render_line).collect();

    let mut out: Vec<String> = Vec::with_capacity(rendered.len());
    for (i, line) in rendered.iter().enumerate() {
        if line.literal {
            out.push(line.text.clone());
            continue;
        }
        if !line.text.is_empty() {
            out.push(line.text.clone());
            continue;
        }

        // A blank line survives only between content lines, never doubled,
        // never right after an opener or right before a closer.
        let Some(prev) = out.last() else { continue };
        if prev.is_empty() || prev.ends_with('{') || prev.ends_with('(') {
            continue;
        }
        let next = rendered[i + 1..]
            .iter()
            .find(|l| l.literal || !l.text.is_empty());
        match next {
            None => continue,
            Some(next) => {
                let next = next.text.trim_start();
                if next.starts_with('}') || next.starts_with(')') {
                    continue;
                }
            }
        }

        out.push(String::new());
    }

    let mut result = out.join("\n");
    result.push('\n');
    Ok(result)
}

/// One printable line.
struct Rendered {
    text: String,
    /// Line begins inside a raw string or block comment; it is emitted
    /// exactly as scanned and never treated as blank.
    literal: bool,
}

fn render_line(line: &Line) -> Rendered {
    if line.starts_in_literal {
        // Leading text is literal content. A trailing code segment after the
        // closing delimiter only loses trailing whitespace.
        let text = if line.ends_in_literal {
            line.text.clone()
        } else {
            line.text.trim_end().to_string()
        };
        return Rendered {
            text,
            literal: true,
        };
    }

    let body = if line.ends_in_literal {
        // The tail past the opening delimiter is literal content.
        line.text.trim_start()
    } else {
        line.text.trim()
    };
    if body.is_empty() {
        return Rendered {
            text: String::new(),
            literal: false,
        };
    }

    let closers = body
        .chars()
        .take_while(|c| matches!(c, ')' | ']' | '}'))
        .count();
    let indent = line.depth.saturating_sub(closers);

    Rendered {
        text: format!("{}{}", "\t".repeat(indent), body),
        literal: false,
    }
}

/// One scanned source line with the lexer state around it.
#[derive(Clone)]
struct Line {
    text: String,
    /// Open delimiters when the line starts.
    depth: usize,
    /// Line starts inside a raw string or block comment.
    starts_in_literal: bool,
    /// Line ends inside a raw string or block comment.
    ends_in_literal: bool,
}

#[derive(Clone, Copy)]
enum State {
    Code,
    Str,
    Rune,
    RawStr,
    LineComment,
    BlockComment,
}

/// Split `src` into lines while lexing it, rejecting anything that cannot
/// be tokenized as Go. Carriage returns are discarded, matching how the Go
/// scanner treats them.
fn scan(src: &str) -> Result<Vec<Line>, SyntaxError> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut line_no = 1usize;
    let mut state = State::Code;
    let mut open_delims: Vec<(char, usize)> = Vec::new();
    let mut line_depth = 0usize;
    let mut line_starts_in = false;
    let mut escaped = false;

    let mut chars = src.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            continue;
        }
        if c == '\n' {
            match state {
                State::Str => return Err(SyntaxError::new(line_no, "newline in string literal")),
                State::Rune => return Err(SyntaxError::new(line_no, "newline in rune literal")),
                State::LineComment => state = State::Code,
                _ => {}
            }
            let ends_in = matches!(state, State::RawStr | State::BlockComment);
            lines.push(Line {
                text: std::mem::take(&mut current),
                depth: line_depth,
                starts_in_literal: line_starts_in,
                ends_in_literal: ends_in,
            });
            line_no += 1;
            line_depth = open_delims.len();
            line_starts_in = ends_in;
            continue;
        }

        current.push(c);

        match state {
            State::Code => match c {
                '"' => state = State::Str,
                '\'' => state = State::Rune,
                '`' => state = State::RawStr,
                '/' => match chars.peek() {
                    Some('/') => {
                        current.push('/');
                        chars.next();
                        state = State::LineComment;
                    }
                    Some('*') => {
                        current.push('*');
                        chars.next();
                        state = State::BlockComment;
                    }
                    _ => {}
                },
                '(' | '[' | '{' => open_delims.push((c, line_no)),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match open_delims.pop() {
                        Some((open, _)) if open == expected => {}
                        Some((open, open_line)) => {
                            return Err(SyntaxError::new(
                                line_no,
                                format!("'{}' does not match '{}' opened on line {}", c, open, open_line),
                            ));
                        }
                        None => {
                            return Err(SyntaxError::new(line_no, format!("unexpected '{}'", c)));
                        }
                    }
                }
                _ => {
                    if !is_go_source_char(c) {
                        return Err(SyntaxError::new(
                            line_no,
                            format!("unexpected character {:?}", c),
                        ));
                    }
                }
            },
            State::Str => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    state = State::Code;
                }
            }
            State::Rune => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '\'' {
                    state = State::Code;
                }
            }
            State::RawStr => {
                if c == '`' {
                    state = State::Code;
                }
            }
            State::LineComment => {}
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    current.push('/');
                    chars.next();
                    state = State::Code;
                }
            }
        }
    }

    match state {
        State::Str => return Err(SyntaxError::new(line_no, "string literal not terminated")),
        State::Rune => return Err(SyntaxError::new(line_no, "rune literal not terminated")),
        State::RawStr => {
            return Err(SyntaxError::new(line_no, "raw string literal not terminated"))
        }
        State::BlockComment => return Err(SyntaxError::new(line_no, "comment not terminated")),
        State::Code | State::LineComment => {}
    }
    if let Some((open, open_line)) = open_delims.pop() {
        return Err(SyntaxError::new(open_line, format!("unclosed '{}'", open)));
    }
    if !current.is_empty() {
        lines.push(Line {
            text: current,
            depth: line_depth,
            starts_in_literal: line_starts_in,
            ends_in_literal: false,
        });
    }

    Ok(lines)
}

/// Characters that can appear in Go source outside literals and comments.
fn is_go_source_char(c: char) -> bool {
    c.is_alphanumeric()
        || c == '_'
        || c.is_whitespace()
        || matches!(
            c,
            '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '<' | '>' | '=' | '!' | ':' | ';'
                | '.' | ',' | '~'
        )
}

/// Sort the specs of every `import ( ... )` block by import path, keeping
/// blank-separated groups intact and comments attached to the spec below
/// them. Blocks that do not look like plain spec lists are left untouched.
fn sort_import_blocks(lines: &mut [Line]) {
    let mut i = 0;
    while i < lines.len() {
        let opens_block = !lines[i].starts_in_literal && lines[i].text.trim() == "import (";
        if !opens_block {
            i += 1;
            continue;
        }

        let body_depth = lines[i].depth + 1;
        let close = lines[i + 1..].iter().position(|l| {
            !l.starts_in_literal && l.depth == body_depth && l.text.trim_start().starts_with(')')
        });
        let Some(offset) = close else {
            i += 1;
            continue;
        };
        let end = i + 1 + offset;

        sort_import_specs(&mut lines[i + 1..end]);
        i = end + 1;
    }
}

fn sort_import_specs(block: &mut [Line]) {
    let mut start = 0;
    for idx in 0..=block.len() {
        let at_group_break = idx == block.len()
            || (!block[idx].starts_in_literal && block[idx].text.trim().is_empty());
        if !at_group_break {
            continue;
        }
        sort_import_group(&mut block[start..idx]);
        start = idx + 1;
    }
}

fn sort_import_group(group: &mut [Line]) {
    let mut units: Vec<(String, Vec<Line>)> = Vec::new();
    let mut pending_comments: Vec<Line> = Vec::new();

    for line in group.iter() {
        let trimmed = line.text.trim();
        if trimmed.starts_with("//") {
            pending_comments.push(line.clone());
            continue;
        }
        let Some(path) = import_path(trimmed) else {
            return;
        };
        let mut unit = std::mem::take(&mut pending_comments);
        unit.push(line.clone());
        units.push((path, unit));
    }
    if !pending_comments.is_empty() {
        return;
    }

    units.sort_by(|a, b| a.0.cmp(&b.0));

    let sorted = units.into_iter().flat_map(|(_, unit)| unit);
    for (slot, line) in group.iter_mut().zip(sorted) {
        *slot = line;
    }
}

/// Extract the quoted path from an import spec line, with or without an
/// alias in front.
fn import_path(spec: &str) -> Option<String> {
    let open = spec.find('"')?;
    let rest = &spec[open + 1..];
    let close = rest.find('"')?;
    Some(rest[..close].to_string())
}
