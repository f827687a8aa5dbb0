//! # newsletter-gen
//!
//! Renders newsletter emails written in MJML from a template and a JSON
//! configuration document, and writes the result to an output directory.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load      config/<name>.json        →  ConfigDocument
//! 2. Load      templates/<t>.template    →  template text
//! 3. Render    template × document       →  email text     (pure)
//! 4. Write     output/<name>.mjml
//! ```
//!
//! Each step either succeeds or stops the run; nothing is written unless every
//! input loaded and the template compiled.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`settings`] | `newsletter-gen.toml` loading: directory layout and naming defaults |
//! | [`config_store`] | Load, list and clone JSON configuration documents |
//! | [`template_store`] | Load and list template files |
//! | [`store`] | Store errors and directory listing shared by both stores |
//! | [`render`] | Mustache-style compiler and executor |
//! | [`generate`] | The generate pipeline and `new-config` scaffold |
//! | [`naming`] | Name → file name resolution, timestamped output names |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## In-Crate Template Engine
//!
//! Templates use a deliberately small mustache dialect: variables, sections,
//! inverted sections and comments. The engine lives in [`render`] as a
//! compiler to a flat instruction list plus a scope-stack executor, so its
//! exact escaping and truthiness rules are visible and tested here.
//!
//! ## Explicit Layout
//!
//! Every directory comes from a [`settings::Settings`] value resolved against
//! the install root given on the command line. Nothing depends on the process
//! working directory beyond that root.

pub mod config_store;
pub mod generate;
pub mod naming;
pub mod output;
pub mod render;
pub mod settings;
pub mod store;
pub mod template_store;

#[cfg(test)]
pub(crate) mod test_helpers;
