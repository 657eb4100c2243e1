//! Section markers and the rules that merge related sections.
//!
//! A section marker is a line of the form `## <Name>`. Markers are inserted by
//! the structural tagger and consumed by the grouper and the chunk assembler.

pub const SECTION_MARKER_PREFIX: &str = "## ";

/// Returns the section name when `line` is a marker line.
///
/// Page markers (`### Page N`) are not section markers.
pub fn parse_section_marker(line: &str) -> Option<&str> {
    line.trim_end_matches(['\n', '\r'])
        .strip_prefix(SECTION_MARKER_PREFIX)
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Name of the first marker line in `text`, if any.
pub fn first_section_marker(text: &str) -> Option<&str> {
    text.lines().find_map(parse_section_marker)
}

/// One row of the grouping table: sections whose name contains any of
/// `section_names` (case-insensitive) belong to `label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGroupRule {
    pub label: String,
    pub section_names: Vec<String>,
}

impl SectionGroupRule {
    pub fn new(label: impl Into<String>, section_names: &[&str]) -> Self {
        Self {
            label: label.into(),
            section_names: section_names.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    pub fn matches(&self, section_name: &str) -> bool {
        let haystack = section_name.to_lowercase();
        self.section_names
            .iter()
            .any(|name| haystack.contains(&name.to_lowercase()))
    }
}

/// Default grouping table. Order is significant: the first matching rule wins.
pub fn default_section_group_rules() -> Vec<SectionGroupRule> {
    vec![
        SectionGroupRule::new("carrier_info", &["Carrier Details", "Driver Details"]),
        SectionGroupRule::new("customer_info", &["Customer Details", "Shipper", "Consignee"]),
        SectionGroupRule::new("location_info", &["Pickup", "Drop", "Stops"]),
        SectionGroupRule::new("rate_info", &["Rate Breakdown", "Agreed Amount"]),
        SectionGroupRule::new("commodity_info", &["Commodity", "Description"]),
        SectionGroupRule::new(
            "instructions",
            &[
                "Standing Instructions",
                "Special Instructions",
                "Shipper Instructions",
                "Carrier Instructions",
            ],
        ),
    ]
}

/// Contiguous run of tagged sections sharing a group label.
///
/// `offset` is the byte offset of `text` inside the tagged document, so the
/// groups of a document concatenate back to the tagged text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGroup {
    pub label: Option<String>,
    pub text: String,
    pub offset: usize,
}

impl SectionGroup {
    /// Name of the group's first section, `None` for the preamble group.
    pub fn section_name(&self) -> Option<&str> {
        first_section_marker(&self.text)
    }
}
