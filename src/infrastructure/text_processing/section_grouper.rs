use crate::domain::{SectionGroup, SectionGroupRule, default_section_group_rules, parse_section_marker};

/// Byte range of one tagged section: a marker line and the content up to the
/// next marker, or the content preceding the first marker.
struct Section<'a> {
    start: usize,
    end: usize,
    name: Option<&'a str>,
}

struct OpenGroup {
    label: Option<String>,
    start: usize,
    end: usize,
}

impl OpenGroup {
    fn close(self, text: &str) -> SectionGroup {
        SectionGroup {
            label: self.label,
            text: text[self.start..self.end].to_string(),
            offset: self.start,
        }
    }
}

/// Merges adjacent tagged sections that belong to the same semantic group.
///
/// The rule table is walked in order and the first rule whose substrings
/// match a section name decides its label. Sections with the same label as
/// the open group extend it; anything else closes it. Unlabeled sections
/// always stand alone. Text before the first marker becomes its own unlabeled
/// preamble group.
#[derive(Debug, Clone)]
pub struct SectionGrouper {
    rules: Vec<SectionGroupRule>,
}

impl SectionGrouper {
    pub fn new(rules: Vec<SectionGroupRule>) -> Self {
        Self { rules }
    }

    pub fn label_for(&self, section_name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(section_name))
            .map(|rule| rule.label.as_str())
    }

    pub fn group(&self, tagged: &str) -> Vec<SectionGroup> {
        let mut groups = Vec::new();
        let mut open: Option<OpenGroup> = None;

        for section in split_sections(tagged) {
            let label = section.name.and_then(|name| self.label_for(name));

            match open.as_mut() {
                Some(group) if section.name.is_none() => group.end = section.end,
                Some(group) if label.is_some() && group.label.as_deref() == label => {
                    group.end = section.end
                }
                _ => {
                    if let Some(group) = open.take() {
                        groups.push(group.close(tagged));
                    }
                    open = Some(OpenGroup {
                        label: label.map(str::to_string),
                        start: section.start,
                        end: section.end,
                    });
                }
            }
        }

        if let Some(group) = open {
            groups.push(group.close(tagged));
        }

        groups
    }
}

impl Default for SectionGrouper {
    fn default() -> Self {
        Self::new(default_section_group_rules())
    }
}

fn split_sections(text: &str) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut name = None;
    let mut line_start = 0;

    for line in text.split_inclusive('\n') {
        if let Some(marker) = parse_section_marker(line) {
            if line_start > start {
                sections.push(Section {
                    start,
                    end: line_start,
                    name,
                });
            }
            start = line_start;
            name = Some(marker);
        }
        line_start += line.len();
    }

    if text.len() > start {
        sections.push(Section {
            start,
            end: text.len(),
            name,
        });
    }

    sections
}
