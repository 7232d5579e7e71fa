//! Section-aware document model
//!
//! Splits raw text into 1-indexed lines and partitions it into headed
//! sections. Every strategy reads the document through this type.

use serde::{Deserialize, Serialize};
use shared_types::Location;

use crate::patterns::{HEADING_PATTERN, WHOLE_DOCUMENT};

/// A headed section of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading depth (number of `#` markers, 1-4)
    pub level: u8,
    /// Heading text, trimmed
    pub name: String,
    /// Line of the heading itself (1-indexed)
    pub start_line: usize,
    /// Last line before the next heading, or the last line of the document
    pub end_line: usize,
}

impl Section {
    /// Number of lines covered, heading included
    pub fn line_count(&self) -> usize {
        self.end_line + 1 - self.start_line
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }
}

/// An immutable parsed document
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<String>,
    sections: Vec<Section>,
}

impl Document {
    /// Parse text into lines and sections in a single pass
    pub fn parse(text: &str) -> Self {
        let lines: Vec<String> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();

        let mut sections: Vec<Section> = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            let Some(caps) = HEADING_PATTERN.captures(line) else {
                continue;
            };
            let (Some(marks), Some(title)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let name = title.as_str().trim();
            if name.is_empty() {
                continue;
            }

            let line_num = idx + 1;
            if let Some(previous) = sections.last_mut() {
                previous.end_line = line_num - 1;
            }
            sections.push(Section {
                level: marks.as_str().len() as u8,
                name: name.to_string(),
                start_line: line_num,
                end_line: lines.len(),
            });
        }

        Self { lines, sections }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterate `(line_number, text)` pairs, 1-indexed
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.as_str()))
    }

    /// Name of the section owning `line`, or "Document" before the first heading
    pub fn section_for(&self, line: usize) -> &str {
        self.sections
            .iter()
            .rev()
            .find(|section| line >= section.start_line)
            .map(|section| section.name.as_str())
            .unwrap_or(WHOLE_DOCUMENT)
    }

    /// Location of a line, attributed to its owning section
    pub fn location(&self, line: usize) -> Location {
        Location {
            line,
            section: self.section_for(line).to_string(),
        }
    }

    /// Text of lines `[line - radius, line + radius]`, clipped to the document
    pub fn context_window(&self, line: usize, radius: usize) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let first = line.saturating_sub(radius).max(1);
        let last = (line + radius).min(self.lines.len());
        if first > last {
            return String::new();
        }
        self.lines[first - 1..last].join("\n")
    }

    /// Full text of a section, heading included
    pub fn section_text(&self, section: &Section) -> String {
        self.lines[section.start_line - 1..section.end_line].join("\n")
    }

    /// Text of every line outside the section, as (before, after)
    pub fn text_outside(&self, section: &Section) -> (String, String) {
        let before = self.lines[..section.start_line - 1].join("\n");
        let after = self.lines[section.end_line..].join("\n");
        (before, after)
    }
}
