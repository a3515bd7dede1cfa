use serde::{Deserialize, Serialize};

/// One work-experience entry recovered from the resume body.
///
/// During segmentation this doubles as the mutable block accumulator: the
/// segmenter fills title/company/dates when a block opens and appends
/// description lines until the next boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl WorkExperience {
    /// A block is only worth keeping if it resolved a title or a company.
    pub fn is_attributable(&self) -> bool {
        !self.title.trim().is_empty() || !self.company.trim().is_empty()
    }
}

/// The assembled profile record.
///
/// Wire field names are fixed by downstream persistence: the education
/// lists serialize as `university` and `degree` even though the engine
/// fills them as plural lists. Do not rename.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "university")]
    pub universities: Vec<String>,
    #[serde(rename = "degree")]
    pub degrees: Vec<String>,
    pub experiences: Vec<WorkExperience>,
    pub skills: Vec<String>,
    pub total_exp: u32,
    pub raw_summary: String,
}
