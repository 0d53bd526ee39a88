use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fixed set of script sections, in narration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionName {
    Introduction,
    Methodology,
    Results,
    Discussion,
    Conclusion,
}

impl SectionName {
    /// Narration order; the title introduction precedes these at index 0
    pub const ORDER: [SectionName; 5] = [
        SectionName::Introduction,
        SectionName::Methodology,
        SectionName::Results,
        SectionName::Discussion,
        SectionName::Conclusion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Introduction => "Introduction",
            SectionName::Methodology => "Methodology",
            SectionName::Results => "Results",
            SectionName::Discussion => "Discussion",
            SectionName::Conclusion => "Conclusion",
        }
    }

    /// Lowercase form used in audio file names
    pub fn slug(&self) -> &'static str {
        match self {
            SectionName::Introduction => "introduction",
            SectionName::Methodology => "methodology",
            SectionName::Results => "results",
            SectionName::Discussion => "discussion",
            SectionName::Conclusion => "conclusion",
        }
    }

    /// 1-based position in the narration order
    pub fn index(&self) -> usize {
        Self::ORDER.iter().position(|s| s == self).unwrap_or(0) + 1
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.trim().to_lowercase();
        Self::ORDER.into_iter().find(|s| s.slug() == lowered)
    }
}

impl std::fmt::Display for SectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One named block of narration text: the title introduction or a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptUnit {
    pub index: usize,
    pub slug: &'static str,
    pub text: String,
}

impl ScriptUnit {
    /// Base name of the unit's audio file, e.g. `00_title_introduction`
    pub fn file_stem(&self) -> String {
        format!("{:02}_{}", self.index, self.slug)
    }
}

/// The complete narration script for one paper: title introduction plus
/// the section texts. Consumed read-only by the narration pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptSet {
    pub title_introduction: String,
    pub sections: HashMap<SectionName, String>,
}

impl ScriptSet {
    /// All units in narration order. Sections missing from the map are
    /// omitted; empty texts are kept and skipped later by the orchestrator.
    pub fn units(&self) -> Vec<ScriptUnit> {
        let mut units = vec![ScriptUnit {
            index: 0,
            slug: "title_introduction",
            text: self.title_introduction.clone(),
        }];
        for section in SectionName::ORDER {
            if let Some(text) = self.sections.get(&section) {
                units.push(ScriptUnit {
                    index: section.index(),
                    slug: section.slug(),
                    text: text.clone(),
                });
            }
        }
        units
    }
}
