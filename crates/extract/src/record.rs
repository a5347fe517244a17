// ABOUTME: JobRecord holds the structured result of one extraction pass; JobFields is an extractor's partial result.
// ABOUTME: Merging applies "first non-default wins"; FormEdits carries user overrides from the edit form.

use serde::{Deserialize, Serialize};

/// Sentinel for a title that was never found.
pub const UNKNOWN_TITLE: &str = "Unknown Position";
/// Sentinel for a company that was never found.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
/// Sentinel for a location that was never found.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// The structured result of one extraction pass.
///
/// Serialized with camelCase keys so it can travel unchanged to the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub date_applied: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub notes: String,
}

impl JobRecord {
    /// A fresh record for `url` with every field at its sentinel.
    pub fn new(url: impl Into<String>, date_applied: impl Into<String>) -> Self {
        Self {
            title: UNKNOWN_TITLE.to_string(),
            company: UNKNOWN_COMPANY.to_string(),
            location: UNKNOWN_LOCATION.to_string(),
            url: url.into(),
            date_applied: date_applied.into(),
            salary: String::new(),
            experience_level: String::new(),
            job_type: String::new(),
            notes: String::new(),
        }
    }

    pub fn has_title(&self) -> bool {
        self.title != UNKNOWN_TITLE
    }

    pub fn has_company(&self) -> bool {
        self.company != UNKNOWN_COMPANY
    }

    pub fn has_location(&self) -> bool {
        self.location != UNKNOWN_LOCATION
    }

    /// True when any field is still at its sentinel.
    pub fn is_incomplete(&self) -> bool {
        !self.has_title()
            || !self.has_company()
            || !self.has_location()
            || self.salary.is_empty()
            || self.experience_level.is_empty()
            || self.job_type.is_empty()
    }

    /// Applies an extractor's findings, only writing fields still at their sentinel.
    ///
    /// Notes lines are appended, never replaced.
    pub fn merge(&mut self, fields: JobFields) {
        fill(&mut self.title, UNKNOWN_TITLE, fields.title);
        fill(&mut self.company, UNKNOWN_COMPANY, fields.company);
        fill(&mut self.location, UNKNOWN_LOCATION, fields.location);
        fill(&mut self.salary, "", fields.salary);
        fill(&mut self.experience_level, "", fields.experience_level);
        fill(&mut self.job_type, "", fields.job_type);

        for line in fields.notes {
            if !self.notes.is_empty() && !self.notes.ends_with('\n') {
                self.notes.push('\n');
            }
            self.notes.push_str(&line);
            self.notes.push('\n');
        }
    }

    /// Applies user edits from the form. Blank edits keep the extracted value;
    /// the URL is never editable.
    pub fn apply_edits(&mut self, edits: &FormEdits) {
        override_with(&mut self.title, &edits.title);
        override_with(&mut self.company, &edits.company);
        override_with(&mut self.location, &edits.location);
        override_with(&mut self.date_applied, &edits.date_applied);
        override_with(&mut self.job_type, &edits.job_type);
        override_with(&mut self.experience_level, &edits.experience_level);
        override_with(&mut self.salary, &edits.salary);
        override_with(&mut self.notes, &edits.notes);
    }
}

fn fill(slot: &mut String, sentinel: &str, value: Option<String>) {
    if slot != sentinel {
        return;
    }
    if let Some(v) = value {
        let v = v.trim();
        if !v.is_empty() {
            *slot = v.to_string();
        }
    }
}

fn override_with(slot: &mut String, edit: &Option<String>) {
    if let Some(v) = edit {
        if !v.trim().is_empty() {
            *slot = v.clone();
        }
    }
}

/// What one extractor found. `None` means "not found here".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFields {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    /// `"Label: value"` lines, in the order they were found.
    pub notes: Vec<String>,
}

impl JobFields {
    /// Appends a `"Label: value"` note, skipping blank values.
    pub fn note(&mut self, label: &str, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.notes.push(format!("{}: {}", label, value));
        }
    }
}

/// User overrides collected from the edit form. `None` or blank keeps the extracted value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEdits {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub date_applied: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub salary: Option<String>,
    pub notes: Option<String>,
}

impl FormEdits {
    /// Sets one field by its form name (`title`, `company`, `jobType`, ...).
    ///
    /// Both camelCase and snake_case names are accepted. Returns false for an
    /// unknown or read-only field such as `url`.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "title" => &mut self.title,
            "company" => &mut self.company,
            "location" => &mut self.location,
            "dateApplied" | "date_applied" | "date" => &mut self.date_applied,
            "jobType" | "job_type" | "type" => &mut self.job_type,
            "experienceLevel" | "experience_level" | "experience" => &mut self.experience_level,
            "salary" => &mut self.salary,
            "notes" => &mut self.notes,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }
}
