//! Experiment - a student-run instance of data collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::TextSearchable;
use crate::{Error, Result};

/// Status of an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentStatus {
    /// Experiment is created but data collection has not started.
    Planned,
    /// Data collection is underway.
    Active,
    /// Data collection finished.
    Completed,
    /// Experiment was abandoned.
    Cancelled,
}

/// A student-run instance of data collection, optionally following a
/// protocol (referenced through its tag list).
///
/// Experiments are the only records created at runtime. Construction goes
/// through [`ExperimentBuilder`], which validates the record and assigns a
/// generated id; stored experiments deserialize with their persisted ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Experiment {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    student: String,
    school: String,
    start_date: DateTime<Utc>,
    #[serde(default)]
    end_date: Option<DateTime<Utc>>,
    status: ExperimentStatus,
    #[serde(default)]
    tags: Vec<String>,
}

impl Experiment {
    /// Create a builder for a new experiment.
    #[must_use]
    pub fn builder(title: impl Into<String>, school: impl Into<String>) -> ExperimentBuilder {
        ExperimentBuilder::new(title, school)
    }

    /// Get the experiment id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the descriptive text, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the owning student.
    #[must_use]
    pub fn student(&self) -> &str {
        &self.student
    }

    /// Get the owning school.
    #[must_use]
    pub fn school(&self) -> &str {
        &self.school
    }

    /// Get the start of the date range.
    #[must_use]
    pub const fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// Get the end of the date range, if set.
    #[must_use]
    pub const fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> ExperimentStatus {
        self.status
    }

    /// Get the tag list.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Start data collection, transitioning to `Active`.
    pub fn activate(&mut self) {
        self.status = ExperimentStatus::Active;
    }

    /// Finish data collection, transitioning to `Completed` and closing the
    /// date range.
    pub fn complete(&mut self) {
        self.status = ExperimentStatus::Completed;
        self.end_date = Some(Utc::now());
    }

    /// Abandon the experiment, transitioning to `Cancelled`.
    pub fn cancel(&mut self) {
        self.status = ExperimentStatus::Cancelled;
        self.end_date = Some(Utc::now());
    }
}

impl TextSearchable for Experiment {
    fn text_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.title.as_str()), self.description.as_deref()]
    }

    fn keywords(&self) -> &[String] {
        &self.tags
    }
}

/// Generated experiment id: unix milliseconds plus a random hex suffix.
fn generate_id(now: DateTime<Utc>) -> String {
    format!("exp-{}-{:04x}", now.timestamp_millis(), rand::random::<u16>())
}

/// Builder for [`Experiment`] with validated construction.
#[derive(Debug)]
pub struct ExperimentBuilder {
    title: String,
    description: Option<String>,
    student: String,
    school: String,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
}

impl ExperimentBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, school: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            student: String::new(),
            school: school.into(),
            start_date: Utc::now(),
            end_date: None,
            tags: Vec::new(),
        }
    }

    /// Set the descriptive text.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the owning student.
    #[must_use]
    pub fn student(mut self, student: impl Into<String>) -> Self {
        self.student = student.into();
        self
    }

    /// Set the start of the date range (defaults to now).
    #[must_use]
    pub const fn start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = start_date;
        self
    }

    /// Set the end of the date range.
    #[must_use]
    pub const fn end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Add a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Build the `Experiment` in `Planned` status with a generated id.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the title or student is empty, or if
    /// the end date precedes the start date.
    pub fn build(self) -> Result<Experiment> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("experiment title must not be empty".into()));
        }
        if self.student.trim().is_empty() {
            return Err(Error::Validation("experiment student must not be empty".into()));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(Error::Validation(
                    "experiment end date precedes start date".into(),
                ));
            }
        }

        Ok(Experiment {
            id: generate_id(Utc::now()),
            title: self.title,
            description: self.description,
            student: self.student,
            school: self.school,
            start_date: self.start_date,
            end_date: self.end_date,
            status: ExperimentStatus::Planned,
            tags: self.tags,
        })
    }
}
