//! Package to footprint resolution
//!
//! Families carry a static package -> footprint table. Packages missing from
//! the table, and symbols that cannot be derived from part data, are handed
//! to a [`Resolver`], which asks an operator or returns an empty string when
//! nobody can answer.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use std::collections::VecDeque;
use std::fmt;

/// What the resolver is asked to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Symbol,
    Footprint,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Symbol => "symbol",
            ArtifactKind::Footprint => "footprint",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source of symbol and footprint names the lookup tables cannot provide
///
/// An empty answer means "unresolved": the record is still built, and the
/// operator is expected to fill the field in later.
pub trait Resolver {
    fn resolve_unknown(&mut self, part_ref: &str, kind: ArtifactKind) -> String;
}

/// Asks on the terminal
#[derive(Default)]
pub struct PromptResolver {
    theme: ColorfulTheme,
}

impl PromptResolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Resolver for PromptResolver {
    fn resolve_unknown(&mut self, part_ref: &str, kind: ArtifactKind) -> String {
        let prompt = format!("Enter {kind}_library:{kind}_name for component {part_ref}");
        let answer: Result<String, _> = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text();
        match answer {
            Ok(value) => value.trim().to_string(),
            Err(e) => {
                tracing::warn!(part = part_ref, error = %e, "prompt failed");
                String::new()
            }
        }
    }
}

/// Never blocks; every request comes back unresolved
#[derive(Debug, Default)]
pub struct BatchResolver {
    pub unresolved: Vec<(String, ArtifactKind)>,
}

impl Resolver for BatchResolver {
    fn resolve_unknown(&mut self, part_ref: &str, kind: ArtifactKind) -> String {
        eprintln!(
            "{} no {} known for {}; left empty",
            style("!").yellow(),
            kind,
            style(part_ref).cyan()
        );
        self.unresolved.push((part_ref.to_string(), kind));
        String::new()
    }
}

/// Replays queued answers in order, then answers empty
#[derive(Debug, Default)]
pub struct ScriptedResolver {
    answers: VecDeque<String>,
    pub requests: Vec<(String, ArtifactKind)>,
}

impl ScriptedResolver {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            requests: Vec::new(),
        }
    }
}

impl Resolver for ScriptedResolver {
    fn resolve_unknown(&mut self, part_ref: &str, kind: ArtifactKind) -> String {
        self.requests.push((part_ref.to_string(), kind));
        self.answers.pop_front().unwrap_or_default()
    }
}

/// Static package -> footprint table of one family
pub type FootprintMap = &'static [(&'static str, &'static str)];

pub fn lookup(map: FootprintMap, package: &str) -> Option<&'static str> {
    map.iter()
        .find(|(known, _)| *known == package)
        .map(|(_, footprint)| *footprint)
}

/// Footprint for a package: table hit, or whatever the resolver answers
pub fn resolve(
    map: FootprintMap,
    package: &str,
    part_ref: &str,
    resolver: &mut dyn Resolver,
) -> String {
    match lookup(map, package) {
        Some(footprint) => footprint.to_string(),
        None => {
            tracing::debug!(package, part = part_ref, "package not in footprint table");
            resolver.resolve_unknown(part_ref, ArtifactKind::Footprint)
        }
    }
}
