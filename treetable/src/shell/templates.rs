//! Named template slots.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A template slot a table can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Caption,
    Header,
    Body,
    Footer,
    Summary,
    ColGroup,
    EmptyMessage,
    PaginatorLeft,
    PaginatorRight,
    FrozenHeader,
    FrozenBody,
    FrozenFooter,
    FrozenColGroup,
}

impl TemplateKind {
    /// All slots, in declaration order.
    pub const ALL: [TemplateKind; 13] = [
        TemplateKind::Caption,
        TemplateKind::Header,
        TemplateKind::Body,
        TemplateKind::Footer,
        TemplateKind::Summary,
        TemplateKind::ColGroup,
        TemplateKind::EmptyMessage,
        TemplateKind::PaginatorLeft,
        TemplateKind::PaginatorRight,
        TemplateKind::FrozenHeader,
        TemplateKind::FrozenBody,
        TemplateKind::FrozenFooter,
        TemplateKind::FrozenColGroup,
    ];

    /// Slot name as used in markup.
    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::Caption => "caption",
            TemplateKind::Header => "header",
            TemplateKind::Body => "body",
            TemplateKind::Footer => "footer",
            TemplateKind::Summary => "summary",
            TemplateKind::ColGroup => "colgroup",
            TemplateKind::EmptyMessage => "emptymessage",
            TemplateKind::PaginatorLeft => "paginatorleft",
            TemplateKind::PaginatorRight => "paginatorright",
            TemplateKind::FrozenHeader => "frozenheader",
            TemplateKind::FrozenBody => "frozenbody",
            TemplateKind::FrozenFooter => "frozenfooter",
            TemplateKind::FrozenColGroup => "frozencolgroup",
        }
    }

    /// The unfrozen counterpart of a frozen slot.
    pub fn unfrozen(self) -> Option<TemplateKind> {
        match self {
            TemplateKind::FrozenHeader => Some(TemplateKind::Header),
            TemplateKind::FrozenBody => Some(TemplateKind::Body),
            TemplateKind::FrozenFooter => Some(TemplateKind::Footer),
            TemplateKind::FrozenColGroup => Some(TemplateKind::ColGroup),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::unknown_template_slot(s))
    }
}

/// Registry of slot templates.
///
/// `T` is whatever the renderer uses as a template (a closure, a component
/// handle, a string).
///
/// # Example
///
/// ```
/// use treetable::shell::{TemplateKind, Templates};
///
/// let mut templates = Templates::new();
/// templates.register_named("body", "row").unwrap();
///
/// assert_eq!(templates.get(TemplateKind::Body), Some(&"row"));
/// assert_eq!(templates.get(TemplateKind::FrozenBody), Some(&"row"));
/// assert!(templates.register_named("sidebar", "x").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Templates<T> {
    slots: HashMap<TemplateKind, T>,
}

impl<T> Templates<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Register a template, replacing any previous one for the slot.
    pub fn register(&mut self, kind: TemplateKind, template: T) {
        self.slots.insert(kind, template);
    }

    /// Register a template by slot name. Unknown names are rejected.
    pub fn register_named(&mut self, name: &str, template: T) -> Result<(), ConfigError> {
        let kind = name.parse()?;
        self.register(kind, template);
        Ok(())
    }

    /// Look up a slot. Frozen slots fall back to their unfrozen counterpart.
    pub fn get(&self, kind: TemplateKind) -> Option<&T> {
        self.slots
            .get(&kind)
            .or_else(|| kind.unfrozen().and_then(|base| self.slots.get(&base)))
    }

    /// Whether a slot has its own template (no fallback).
    pub fn has(&self, kind: TemplateKind) -> bool {
        self.slots.contains_key(&kind)
    }

    /// Whether any frozen slot was registered.
    pub fn has_frozen(&self) -> bool {
        self.slots.keys().any(|kind| kind.unfrozen().is_some())
    }
}

impl<T> Default for Templates<T> {
    fn default() -> Self {
        Self::new()
    }
}
