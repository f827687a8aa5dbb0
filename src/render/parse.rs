//! Template compiler: mustache text → flat instruction list.
//!
//! A recursive-descent pass over the tag stream. Each section recurses into
//! its own block and returns once its matching close tag is consumed, so
//! balance errors are found at the point they occur. The output is flat:
//! a [`Instruction::SectionStart`] records the index of its
//! [`Instruction::SectionEnd`], which lets the executor skip or repeat a body
//! without re-scanning.
//!
//! ## Standalone Lines
//!
//! A section, inverted-section, close or comment tag that sits alone on its
//! line takes the whole line with it, line ending included:
//!
//! ```text
//! <mj-column>                          <mj-column>
//!   {{#items}}                           <mj-text>a</mj-text>
//!   <mj-text>{{.}}</mj-text>      →      <mj-text>b</mj-text>
//!   {{/items}}                         </mj-column>
//! </mj-column>
//! ```

use super::TemplateSyntaxError;

/// A variable or section name.
#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    raw: String,
    segments: Vec<String>,
}

impl Name {
    fn parse(raw: &str, line: usize) -> Result<Self, TemplateSyntaxError> {
        if raw.is_empty() {
            return Err(TemplateSyntaxError::EmptyTag { line });
        }
        if raw == "." {
            return Ok(Self {
                raw: raw.to_string(),
                segments: Vec::new(),
            });
        }
        let segments: Vec<String> = raw.split('.').map(|s| s.trim().to_string()).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(TemplateSyntaxError::InvalidName {
                name: raw.to_string(),
                line,
            });
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// `{{.}}`: the current context itself.
    pub fn is_implicit(&self) -> bool {
        self.segments.is_empty()
    }

    /// Dot-separated path segments; empty for the implicit name.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Literal text copied to the output.
    Text(String),
    /// `{{name}}` (escaped) or `{{{name}}}` / `{{& name}}` (raw).
    Variable { name: Name, escape: bool },
    /// `{{#name}}` or `{{^name}}`; `end` is the index of the matching
    /// [`Instruction::SectionEnd`].
    SectionStart {
        name: Name,
        inverted: bool,
        end: usize,
    },
    SectionEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TagKind {
    Variable,
    Raw,
    Section,
    Inverted,
    Close,
    Comment,
    Partial,
    Delimiter,
}

impl TagKind {
    fn can_stand_alone(self) -> bool {
        matches!(
            self,
            TagKind::Section | TagKind::Inverted | TagKind::Close | TagKind::Comment
        )
    }
}

#[derive(Debug)]
struct Tag<'a> {
    kind: TagKind,
    content: &'a str,
    start: usize,
    end: usize,
    line: usize,
}

/// An open section while its body is being parsed.
struct Open<'a> {
    name: &'a str,
    line: usize,
}

pub fn compile(source: &str) -> Result<Vec<Instruction>, TemplateSyntaxError> {
    let mut parser = Parser {
        source,
        cursor: 0,
        line: 1,
        line_pos: 0,
        out: Vec::new(),
    };
    parser.block(None)?;
    Ok(parser.out)
}

struct Parser<'a> {
    source: &'a str,
    cursor: usize,
    /// Line number of `line_pos`. Tags are found in source order, so the
    /// count only ever moves forward.
    line: usize,
    line_pos: usize,
    out: Vec<Instruction>,
}

impl<'a> Parser<'a> {
    /// Parse until end of input (top level) or until the close tag of `open`.
    fn block(&mut self, open: Option<&Open<'a>>) -> Result<(), TemplateSyntaxError> {
        loop {
            let Some(tag) = self.next_tag()? else {
                self.text(self.cursor, self.source.len());
                self.cursor = self.source.len();
                return match open {
                    Some(o) => Err(TemplateSyntaxError::UnclosedSection {
                        name: o.name.to_string(),
                        line: o.line,
                    }),
                    None => Ok(()),
                };
            };

            let (text_end, resume) = self
                .standalone_span(&tag)
                .unwrap_or((tag.start, tag.end));
            self.text(self.cursor, text_end);
            self.cursor = resume;

            match tag.kind {
                TagKind::Comment => {}
                TagKind::Variable | TagKind::Raw => {
                    let name = Name::parse(tag.content, tag.line)?;
                    self.out.push(Instruction::Variable {
                        name,
                        escape: tag.kind == TagKind::Variable,
                    });
                }
                TagKind::Section | TagKind::Inverted => {
                    let name = Name::parse(tag.content, tag.line)?;
                    let start = self.out.len();
                    self.out.push(Instruction::SectionStart {
                        name,
                        inverted: tag.kind == TagKind::Inverted,
                        end: 0,
                    });
                    let inner = Open {
                        name: tag.content,
                        line: tag.line,
                    };
                    self.block(Some(&inner))?;
                    let end = self.out.len();
                    self.out.push(Instruction::SectionEnd);
                    if let Instruction::SectionStart { end: slot, .. } = &mut self.out[start] {
                        *slot = end;
                    }
                }
                TagKind::Close => {
                    let found = tag.content;
                    return match open {
                        None => Err(TemplateSyntaxError::UnexpectedClose {
                            name: found.to_string(),
                            line: tag.line,
                        }),
                        Some(o) if o.name != found => Err(TemplateSyntaxError::MismatchedClose {
                            expected: o.name.to_string(),
                            found: found.to_string(),
                            line: tag.line,
                            opened: o.line,
                        }),
                        Some(_) => Ok(()),
                    };
                }
                TagKind::Partial | TagKind::Delimiter => {
                    return Err(TemplateSyntaxError::Unsupported {
                        tag: self.source[tag.start..tag.end].to_string(),
                        line: tag.line,
                    });
                }
            }
        }
    }

    fn text(&mut self, from: usize, to: usize) {
        if from < to {
            self.out.push(Instruction::Text(self.source[from..to].to_string()));
        }
    }

    fn next_tag(&mut self) -> Result<Option<Tag<'a>>, TemplateSyntaxError> {
        let source = self.source;
        let Some(offset) = source[self.cursor..].find("{{") else {
            return Ok(None);
        };
        let start = self.cursor + offset;
        let line = self.line_at(start);
        let after = start + 2;

        if source[after..].starts_with('{') {
            let inner = after + 1;
            let close = source[inner..]
                .find("}}}")
                .ok_or(TemplateSyntaxError::UnclosedTag {
                    expected: "}}}",
                    line,
                })?;
            return Ok(Some(Tag {
                kind: TagKind::Raw,
                content: source[inner..inner + close].trim(),
                start,
                end: inner + close + 3,
                line,
            }));
        }

        let close = source[after..]
            .find("}}")
            .ok_or(TemplateSyntaxError::UnclosedTag {
                expected: "}}",
                line,
            })?;
        let body = source[after..after + close].trim();
        let (kind, content) = match body.chars().next() {
            Some('#') => (TagKind::Section, &body[1..]),
            Some('^') => (TagKind::Inverted, &body[1..]),
            Some('/') => (TagKind::Close, &body[1..]),
            Some('!') => (TagKind::Comment, &body[1..]),
            Some('&') => (TagKind::Raw, &body[1..]),
            Some('>') => (TagKind::Partial, &body[1..]),
            Some('=') => (TagKind::Delimiter, &body[1..]),
            _ => (TagKind::Variable, body),
        };
        Ok(Some(Tag {
            kind,
            content: content.trim(),
            start,
            end: after + close + 2,
            line,
        }))
    }

    fn line_at(&mut self, pos: usize) -> usize {
        self.line += self.source[self.line_pos..pos].bytes().filter(|&b| b == b'\n').count();
        self.line_pos = pos;
        self.line
    }

    /// If `tag` is alone on its line, the span to drop: from the line start to
    /// just past the line ending. Returned as `(text_end, resume)`.
    fn standalone_span(&self, tag: &Tag<'a>) -> Option<(usize, usize)> {
        if !tag.kind.can_stand_alone() {
            return None;
        }
        let source = self.source;
        let line_start = source[..tag.start].rfind('\n').map_or(0, |i| i + 1);
        if line_start < self.cursor || !is_blank(&source[line_start..tag.start]) {
            return None;
        }
        let rest = &source[tag.end..];
        let (trailing, resume) = match rest.find('\n') {
            Some(i) => (&rest[..i], tag.end + i + 1),
            None => (rest, source.len()),
        };
        if !is_blank(trailing.trim_end_matches('\r')) {
            return None;
        }
        Some((line_start, resume))
    }
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || c == '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(ins: &[Instruction]) -> Vec<&str> {
        ins.iter()
            .filter_map(|i| match i {
                Instruction::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn plain_text_is_one_instruction() {
        let ins = compile("no markers here").unwrap();
        assert_eq!(ins, vec![Instruction::Text("no markers here".into())]);
    }

    #[test]
    fn variable_forms() {
        let ins = compile("{{a}}{{{b}}}{{& c}}{{ d.e }}").unwrap();
        let vars: Vec<(&str, bool)> = ins
            .iter()
            .filter_map(|i| match i {
                Instruction::Variable { name, escape } => Some((name.as_str(), *escape)),
                _ => None,
            })
            .collect();
        assert_eq!(vars, vec![("a", true), ("b", false), ("c", false), ("d.e", true)]);
    }

    #[test]
    fn dotted_name_splits_into_segments() {
        let ins = compile("{{hero.title}}").unwrap();
        match &ins[0] {
            Instruction::Variable { name, .. } => {
                assert_eq!(name.segments(), ["hero".to_string(), "title".to_string()]);
                assert!(!name.is_implicit());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn section_start_points_at_its_end() {
        let ins = compile("{{#a}}x{{#b}}y{{/b}}{{/a}}").unwrap();
        assert_eq!(ins.len(), 6);
        assert!(matches!(ins[0], Instruction::SectionStart { end: 5, inverted: false, .. }));
        assert!(matches!(ins[2], Instruction::SectionStart { end: 4, .. }));
        assert_eq!(ins[4], Instruction::SectionEnd);
        assert_eq!(ins[5], Instruction::SectionEnd);
    }

    #[test]
    fn inverted_section_is_flagged() {
        let ins = compile("{{^a}}none{{/a}}").unwrap();
        assert!(matches!(ins[0], Instruction::SectionStart { inverted: true, end: 2, .. }));
    }

    #[test]
    fn comments_produce_nothing() {
        let ins = compile("a{{! note }}b").unwrap();
        assert_eq!(texts(&ins), vec!["a", "b"]);
    }

    #[test]
    fn standalone_section_lines_are_removed() {
        let ins = compile("<ul>\n  {{#items}}\n  <li/>\n  {{/items}}\n</ul>\n").unwrap();
        assert_eq!(texts(&ins), vec!["<ul>\n", "  <li/>\n", "</ul>\n"]);
    }

    #[test]
    fn standalone_handles_crlf_and_eof() {
        let ins = compile("a\r\n{{#x}}\r\nb\r\n{{/x}}").unwrap();
        assert_eq!(texts(&ins), vec!["a\r\n", "b\r\n"]);
    }

    #[test]
    fn inline_section_keeps_surrounding_text() {
        let ins = compile("  {{#x}}y{{/x}}\n").unwrap();
        assert_eq!(texts(&ins), vec!["  ", "y", "\n"]);
    }

    #[test]
    fn variable_tag_is_never_standalone() {
        let ins = compile("  {{name}}\n").unwrap();
        assert_eq!(texts(&ins), vec!["  ", "\n"]);
    }

    #[test]
    fn unclosed_tag() {
        assert_eq!(
            compile("ok\n{{name").unwrap_err(),
            TemplateSyntaxError::UnclosedTag { expected: "}}", line: 2 }
        );
        assert_eq!(
            compile("{{{raw}}").unwrap_err(),
            TemplateSyntaxError::UnclosedTag { expected: "}}}", line: 1 }
        );
    }

    #[test]
    fn unclosed_section_reports_opening_line() {
        assert_eq!(
            compile("a\nb\n{{#items}}\nc").unwrap_err(),
            TemplateSyntaxError::UnclosedSection { name: "items".into(), line: 3 }
        );
    }

    #[test]
    fn close_without_open() {
        assert_eq!(
            compile("x{{/items}}").unwrap_err(),
            TemplateSyntaxError::UnexpectedClose { name: "items".into(), line: 1 }
        );
    }

    #[test]
    fn mismatched_close() {
        assert_eq!(
            compile("{{#a}}\n{{#b}}\n{{/a}}").unwrap_err(),
            TemplateSyntaxError::MismatchedClose {
                expected: "b".into(),
                found: "a".into(),
                line: 3,
                opened: 2,
            }
        );
    }

    #[test]
    fn empty_and_invalid_names() {
        assert_eq!(
            compile("{{ }}").unwrap_err(),
            TemplateSyntaxError::EmptyTag { line: 1 }
        );
        assert_eq!(
            compile("{{#}}{{/}}").unwrap_err(),
            TemplateSyntaxError::EmptyTag { line: 1 }
        );
        assert_eq!(
            compile("{{a..b}}").unwrap_err(),
            TemplateSyntaxError::InvalidName { name: "a..b".into(), line: 1 }
        );
    }

    #[test]
    fn line_numbers_follow_many_tags() {
        let mut source = String::new();
        for i in 0..200 {
            source.push_str(&format!("<p>{{{{v{i}}}}}</p>\n{{{{#s{i}}}}}\nx\n{{{{/s{i}}}}}\n"));
        }
        source.push_str("{{/stray}}");
        assert_eq!(
            compile(&source).unwrap_err(),
            TemplateSyntaxError::UnexpectedClose { name: "stray".into(), line: 801 }
        );
    }

    #[test]
    fn several_tags_on_one_line_share_its_number() {
        assert_eq!(
            compile("a\nb {{x}} {{y}} {{#z}}").unwrap_err(),
            TemplateSyntaxError::UnclosedSection { name: "z".into(), line: 2 }
        );
    }

    #[test]
    fn partials_and_delimiters_are_unsupported() {
        assert!(matches!(
            compile("{{> footer}}").unwrap_err(),
            TemplateSyntaxError::Unsupported { .. }
        ));
        assert!(matches!(
            compile("{{=<% %>=}}").unwrap_err(),
            TemplateSyntaxError::Unsupported { .. }
        ));
    }
}
