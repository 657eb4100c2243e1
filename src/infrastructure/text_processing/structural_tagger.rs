use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::application::ports::TextSplitterError;

/// Section headings commonly found in rate confirmations and load tenders,
/// in the order the tagger applies them.
pub const DEFAULT_SECTION_NAMES: &[&str] = &[
    "Carrier Details",
    "Rate Breakdown",
    "Pickup",
    "Drop",
    "Stops",
    "Standing Instructions",
    "Special Instructions",
    "Shipper & Carrier Instructions",
    "Driver Details",
    "Reference ID",
    "Commodity",
    "Description",
];

const MARKER_REPLACEMENT: &str = "\n## ${0}\n";

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static DEFAULT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DEFAULT_SECTION_NAMES
        .iter()
        .map(|name| section_pattern(name).expect("default section names are escaped literals"))
        .collect()
});

fn section_pattern(name: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(name))
        .case_insensitive(true)
        .build()
}

/// Wraps every occurrence of a known section name in a `## <Name>` marker line.
///
/// Names are matched literally and case-insensitively; the marker keeps the
/// casing found in the document. Patterns run one after another in
/// declaration order over the output of the previous pass, so a later name
/// that occurs inside an earlier marker wraps again.
#[derive(Debug, Clone)]
pub struct StructuralTagger {
    patterns: Vec<Regex>,
}

impl StructuralTagger {
    pub fn new<S: AsRef<str>>(section_names: &[S]) -> Result<Self, TextSplitterError> {
        let patterns = section_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                if name.trim().is_empty() {
                    return Err(TextSplitterError::InvalidConfiguration(
                        "section name must not be empty".to_string(),
                    ));
                }
                section_pattern(name).map_err(|e| {
                    TextSplitterError::InvalidConfiguration(format!(
                        "section name {name:?}: {e}"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn tag(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for pattern in &self.patterns {
            text = pattern.replace_all(&text, MARKER_REPLACEMENT).into_owned();
        }

        EXCESS_NEWLINES
            .replace_all(&text, "\n\n")
            .trim()
            .to_string()
    }
}

impl Default for StructuralTagger {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.clone(),
        }
    }
}
