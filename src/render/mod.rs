//! Mustache-style rendering of templates against configuration documents.
//!
//! Rendering is two steps: [`Template::compile`] turns template text into a
//! flat instruction list (see [`parse`]), and [`Template::render`] executes
//! those instructions against a scope stack seeded with the document.
//!
//! ## Supported Tags
//!
//! | Tag | Effect |
//! |-----|--------|
//! | `{{key}}`, `{{a.b}}` | Value as text, HTML-escaped. Missing → empty |
//! | `{{{key}}}`, `{{& key}}` | Value as text, unescaped |
//! | `{{.}}` | The current context (e.g. the element inside a list section) |
//! | `{{#key}}…{{/key}}` | Repeat per element of a non-empty list, once for any other truthy value, skip otherwise |
//! | `{{^key}}…{{/key}}` | Render only when `key` is falsy, missing or an empty list |
//! | `{{! text }}` | Comment, dropped |
//!
//! Falsy values are null, `false`, `0`, `""`, `[]` and `{}`. Names resolve in
//! the innermost section context first, then outward to the document.
//!
//! ## Value Text
//!
//! | Value | Text |
//! |-------|------|
//! | string | verbatim |
//! | number | JSON notation (`3`, `2.5`, `1.0`) |
//! | boolean | `True` / `False`, as the Python generator printed them |
//! | null | empty |
//! | array, object | compact JSON (the Python generator printed its own repr) |
//!
//! Missing data never fails a render. Only malformed markers do, as a
//! [`TemplateSyntaxError`] carrying the line number.
//!
//! Output is a pure function of the template text and the document.

mod exec;
pub mod parse;

use crate::config_store::ConfigDocument;
use parse::Instruction;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateSyntaxError {
    #[error("line {line}: unclosed tag, expected `{expected}`")]
    UnclosedTag { expected: &'static str, line: usize },
    #[error("line {line}: empty tag")]
    EmptyTag { line: usize },
    #[error("line {line}: invalid name `{name}`")]
    InvalidName { name: String, line: usize },
    #[error("line {line}: section `{name}` is never closed")]
    UnclosedSection { name: String, line: usize },
    #[error("line {line}: closing tag for `{name}` has no open section")]
    UnexpectedClose { name: String, line: usize },
    #[error(
        "line {line}: closing tag for `{found}` does not match section `{expected}` opened on line {opened}"
    )]
    MismatchedClose {
        expected: String,
        found: String,
        line: usize,
        opened: usize,
    },
    #[error("line {line}: unsupported tag `{tag}`")]
    Unsupported { tag: String, line: usize },
}

/// A compiled template, reusable across documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    instructions: Vec<Instruction>,
}

impl Template {
    pub fn compile(source: &str) -> Result<Self, TemplateSyntaxError> {
        Ok(Self {
            instructions: parse::compile(source)?,
        })
    }

    pub fn render(&self, document: &ConfigDocument) -> String {
        self.render_value(document.as_value())
    }

    /// Render with an arbitrary JSON value as the root context.
    pub fn render_value(&self, context: &Value) -> String {
        exec::execute(&self.instructions, context)
    }
}

/// Compile and render in one step.
pub fn render(template: &str, document: &ConfigDocument) -> Result<String, TemplateSyntaxError> {
    Ok(Template::compile(template)?.render(document))
}
