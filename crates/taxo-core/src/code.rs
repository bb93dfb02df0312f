//! Taxonomy code parsing
//!
//! A declared code has the shape `<processId>.<level>.<subjectId>.<component>`,
//! e.g. `rv.1.8.OI`. Parsing is a lexical gate followed by a plain split on
//! `.`; no semantic validation happens here beyond the pattern itself.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical pattern for a well-formed taxonomy code.
///
/// Segments: lowercase process id with an optional numeric sub-id, a level
/// digit 1-3, a dot-free subject segment (internal hyphens allowed), and one
/// of the four component suffixes. The level range is enforced by the
/// pattern, not by a secondary check.
static CODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2,}(?:-\d{1,3})?\.[123]\.[^\s.]+(?:-[^\s.]+)*\.(?:LT|OI|PI|DT)$")
        .expect("taxonomy code pattern is valid")
});

/// The four 4C/ID component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// Learning tasks (`LT`).
    LearningTasks,
    /// Supporting information (`OI`).
    SupportingInfo,
    /// Procedural information (`PI`).
    ProceduralInfo,
    /// Part-tasks (`DT`).
    PartTasks,
}

impl Component {
    /// All components, in dataset column order.
    pub const ALL: [Component; 4] = [
        Component::LearningTasks,
        Component::SupportingInfo,
        Component::ProceduralInfo,
        Component::PartTasks,
    ];

    /// The two-letter code suffix as it appears in taxonomy codes.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Component::LearningTasks => "LT",
            Component::SupportingInfo => "OI",
            Component::ProceduralInfo => "PI",
            Component::PartTasks => "DT",
        }
    }

    /// The display name used in reports and as the default folder name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Component::LearningTasks => "Leertaken",
            Component::SupportingInfo => "Ondersteunende-informatie",
            Component::ProceduralInfo => "Procedurele-informatie",
            Component::PartTasks => "Deeltaken",
        }
    }

    /// Resolve a code suffix back to a component.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "LT" => Some(Component::LearningTasks),
            "OI" => Some(Component::SupportingInfo),
            "PI" => Some(Component::ProceduralInfo),
            "DT" => Some(Component::PartTasks),
            _ => None,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Education level 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Level(u8);

impl Level {
    /// Construct a level, rejecting anything outside 1-3.
    #[must_use]
    pub fn new(level: u8) -> Option<Self> {
        (1..=3).contains(&level).then_some(Level(level))
    }

    /// The level number, 1-3.
    #[inline]
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot index into a coverage cell.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// All three levels in order.
    pub const ALL: [Level; 3] = [Level(1), Level(2), Level(3)];
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A parsed, well-formed taxonomy code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyCode {
    /// Primary process identifier (TC1).
    pub process_id: String,
    /// Education level (TC2).
    pub level: Level,
    /// Subject identifier (TC3).
    pub subject_id: String,
    /// 4C/ID component implied by the code suffix.
    pub component: Component,
}

/// A declared code that failed the lexical gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCode {
    /// The raw string as declared in the document.
    pub raw: String,
}

impl TaxonomyCode {
    /// Parse a declared code string.
    ///
    /// Returns the decomposed code, or [`InvalidCode`] when the string does
    /// not match the fixed pattern. Never panics.
    pub fn parse(raw: &str) -> Result<Self, InvalidCode> {
        if !CODE_PATTERN.is_match(raw) {
            return Err(InvalidCode {
                raw: raw.to_string(),
            });
        }

        // The pattern guarantees exactly four dot-separated segments, a
        // numeric level in range, and a known component suffix.
        let mut segments = raw.split('.');
        let process_id = segments.next().unwrap_or_default();
        let level = segments
            .next()
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(Level::new)
            .ok_or_else(|| InvalidCode {
                raw: raw.to_string(),
            })?;
        let subject_id = segments.next().unwrap_or_default();
        let component = segments
            .next()
            .and_then(Component::from_code)
            .ok_or_else(|| InvalidCode {
                raw: raw.to_string(),
            })?;

        Ok(TaxonomyCode {
            process_id: process_id.to_string(),
            level,
            subject_id: subject_id.to_string(),
            component,
        })
    }
}

impl fmt::Display for TaxonomyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.process_id, self.level, self.subject_id, self.component
        )
    }
}
