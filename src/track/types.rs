use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One CSV row as published by the telemetry provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    #[serde(rename = "CATNUMBER", default)]
    pub subject: Option<String>,
    #[serde(rename = "UTM83EAST", default)]
    pub easting: Option<f64>,
    #[serde(rename = "UTM83NORTH", default)]
    pub northing: Option<f64>,
    #[serde(rename = "FLGTDATE", default)]
    pub date: Option<String>,
    #[serde(rename = "TIME", default)]
    pub time: Option<String>,
    #[serde(rename = "AGENCY", default)]
    pub agency: Option<String>,
}

impl RawRow {
    pub const COLUMNS: [&'static str; 6] = [
        "CATNUMBER",
        "UTM83EAST",
        "UTM83NORTH",
        "FLGTDATE",
        "TIME",
        "AGENCY",
    ];
}

/// A telemetry fix with its geographic position resolved.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Fix {
    pub subject: String,
    pub easting: f64,
    pub northing: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub date: String,
    pub time: String,
    pub agency: String,
}

/// Fixes of a single subject in ingestion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    subject: String,
    fixes: Vec<Fix>,
}

impl Track {
    pub fn new(subject: impl Into<String>, fixes: Vec<Fix>) -> Self {
        Self {
            subject: subject.into(),
            fixes,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn fixes(&self) -> &[Fix] {
        &self.fixes
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubjectSummary {
    pub subject: String,
    pub fix_count: usize,
}

/// Every fix from one load of the source, plus subject ids in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    fixes: Vec<Fix>,
    subjects: Vec<String>,
    skipped_rows: usize,
    loaded_at: Option<DateTime<Utc>>,
}

impl Dataset {
    pub fn new(fixes: Vec<Fix>, skipped_rows: usize) -> Self {
        let mut subjects: Vec<String> = Vec::new();
        for fix in &fixes {
            if !subjects.iter().any(|s| s == &fix.subject) {
                subjects.push(fix.subject.clone());
            }
        }

        Self {
            fixes,
            subjects,
            skipped_rows,
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn fixes(&self) -> &[Fix] {
        &self.fixes
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    /// Returns `None` for a subject with no fixes.
    pub fn track(&self, subject: &str) -> Option<Track> {
        let fixes: Vec<Fix> = self
            .fixes
            .iter()
            .filter(|f| f.subject == subject)
            .cloned()
            .collect();

        if fixes.is_empty() {
            None
        } else {
            Some(Track::new(subject, fixes))
        }
    }

    pub fn summaries(&self) -> Vec<SubjectSummary> {
        self.subjects
            .iter()
            .map(|subject| SubjectSummary {
                subject: subject.clone(),
                fix_count: self.fixes.iter().filter(|f| &f.subject == subject).count(),
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn fix(subject: &str, latitude: f64, longitude: f64, time: &str) -> Fix {
    Fix {
        subject: subject.to_string(),
        easting: 0.0,
        northing: 0.0,
        latitude,
        longitude,
        date: "1/1/2020".to_string(),
        time: time.to_string(),
        agency: "FWC".to_string(),
    }
}
