//! Enum types for LabTrack entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ENTITY DISCRIMINATOR
// ============================================================================

/// Entity kind discriminator for errors and activity feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Sample,
    Experiment,
    Result,
}

impl EntityKind {
    /// Canonical label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Sample => "SAMPLE",
            EntityKind::Experiment => "EXPERIMENT",
            EntityKind::Result => "RESULT",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SAMPLE ENUMS
// ============================================================================

/// Kind of physical specimen being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SampleType {
    Blood,
    Tissue,
    CellCulture,
    Dna,
    Rna,
    Protein,
    Reagent,
    Buffer,
    Other,
}

impl SampleType {
    /// All sample types, in the order the intake form lists them.
    pub const ALL: [SampleType; 9] = [
        SampleType::Blood,
        SampleType::Tissue,
        SampleType::CellCulture,
        SampleType::Dna,
        SampleType::Rna,
        SampleType::Protein,
        SampleType::Reagent,
        SampleType::Buffer,
        SampleType::Other,
    ];

    /// Canonical label, also used as the aggregation label for charts.
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleType::Blood => "BLOOD",
            SampleType::Tissue => "TISSUE",
            SampleType::CellCulture => "CELL_CULTURE",
            SampleType::Dna => "DNA",
            SampleType::Rna => "RNA",
            SampleType::Protein => "PROTEIN",
            SampleType::Reagent => "REAGENT",
            SampleType::Buffer => "BUFFER",
            SampleType::Other => "OTHER",
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SampleType {
    type Err = SampleTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BLOOD" => Ok(SampleType::Blood),
            "TISSUE" => Ok(SampleType::Tissue),
            "CELL_CULTURE" => Ok(SampleType::CellCulture),
            "DNA" => Ok(SampleType::Dna),
            "RNA" => Ok(SampleType::Rna),
            "PROTEIN" => Ok(SampleType::Protein),
            "REAGENT" => Ok(SampleType::Reagent),
            "BUFFER" => Ok(SampleType::Buffer),
            "OTHER" => Ok(SampleType::Other),
            _ => Err(SampleTypeParseError(s.to_string())),
        }
    }
}

/// Error when parsing an invalid sample type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleTypeParseError(pub String);

impl fmt::Display for SampleTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid sample type: {}", self.0)
    }
}

impl std::error::Error for SampleTypeParseError {}

/// Status of a tracked sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SampleStatus {
    /// Sample is available for use
    #[default]
    Active,
    /// Sample material has been used up
    Depleted,
    /// Sample integrity is in question
    Compromised,
    /// Sample has been moved to long-term storage
    Archived,
    /// Sample is past its expiration date
    Expired,
}

impl SampleStatus {
    /// All sample statuses, in display order.
    pub const ALL: [SampleStatus; 5] = [
        SampleStatus::Active,
        SampleStatus::Depleted,
        SampleStatus::Compromised,
        SampleStatus::Archived,
        SampleStatus::Expired,
    ];

    /// Canonical label, also used as the aggregation label for charts.
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleStatus::Active => "ACTIVE",
            SampleStatus::Depleted => "DEPLETED",
            SampleStatus::Compromised => "COMPROMISED",
            SampleStatus::Archived => "ARCHIVED",
            SampleStatus::Expired => "EXPIRED",
        }
    }

    /// Whether the sample is still in circulation and worth expiry warnings.
    pub fn in_circulation(&self) -> bool {
        matches!(self, SampleStatus::Active | SampleStatus::Compromised)
    }
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SampleStatus {
    type Err = SampleStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(SampleStatus::Active),
            "DEPLETED" => Ok(SampleStatus::Depleted),
            "COMPROMISED" => Ok(SampleStatus::Compromised),
            "ARCHIVED" => Ok(SampleStatus::Archived),
            "EXPIRED" => Ok(SampleStatus::Expired),
            _ => Err(SampleStatusParseError(s.to_string())),
        }
    }
}

/// Error when parsing an invalid sample status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleStatusParseError(pub String);

impl fmt::Display for SampleStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid sample status: {}", self.0)
    }
}

impl std::error::Error for SampleStatusParseError {}

// ============================================================================
// EXPERIMENT ENUMS
// ============================================================================

/// Category of laboratory work an experiment performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperimentType {
    CellStudy,
    ImmuneAssay,
    Separation,
    Pcr,
    Sequencing,
    Microscopy,
    FlowCytometry,
    Spectroscopy,
    Other,
}

impl ExperimentType {
    /// All experiment types, in display order.
    pub const ALL: [ExperimentType; 9] = [
        ExperimentType::CellStudy,
        ExperimentType::ImmuneAssay,
        ExperimentType::Separation,
        ExperimentType::Pcr,
        ExperimentType::Sequencing,
        ExperimentType::Microscopy,
        ExperimentType::FlowCytometry,
        ExperimentType::Spectroscopy,
        ExperimentType::Other,
    ];

    /// Canonical label, also used as the aggregation label for charts.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperimentType::CellStudy => "CELL_STUDY",
            ExperimentType::ImmuneAssay => "IMMUNE_ASSAY",
            ExperimentType::Separation => "SEPARATION",
            ExperimentType::Pcr => "PCR",
            ExperimentType::Sequencing => "SEQUENCING",
            ExperimentType::Microscopy => "MICROSCOPY",
            ExperimentType::FlowCytometry => "FLOW_CYTOMETRY",
            ExperimentType::Spectroscopy => "SPECTROSCOPY",
            ExperimentType::Other => "OTHER",
        }
    }
}

impl fmt::Display for ExperimentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExperimentType {
    type Err = ExperimentTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CELL_STUDY" => Ok(ExperimentType::CellStudy),
            "IMMUNE_ASSAY" => Ok(ExperimentType::ImmuneAssay),
            "SEPARATION" => Ok(ExperimentType::Separation),
            "PCR" => Ok(ExperimentType::Pcr),
            "SEQUENCING" => Ok(ExperimentType::Sequencing),
            "MICROSCOPY" => Ok(ExperimentType::Microscopy),
            "FLOW_CYTOMETRY" => Ok(ExperimentType::FlowCytometry),
            "SPECTROSCOPY" => Ok(ExperimentType::Spectroscopy),
            "OTHER" => Ok(ExperimentType::Other),
            _ => Err(ExperimentTypeParseError(s.to_string())),
        }
    }
}

/// Error when parsing an invalid experiment type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentTypeParseError(pub String);

impl fmt::Display for ExperimentTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid experiment type: {}", self.0)
    }
}

impl std::error::Error for ExperimentTypeParseError {}

/// Status of an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperimentStatus {
    /// Experiment is scheduled but not started
    #[default]
    Planned,
    /// Experiment is actively running
    InProgress,
    /// Experiment finished successfully
    Completed,
    /// Experiment finished unsuccessfully
    Failed,
    /// Experiment was abandoned before it finished
    Cancelled,
}

impl ExperimentStatus {
    /// All experiment statuses, in display order.
    pub const ALL: [ExperimentStatus; 5] = [
        ExperimentStatus::Planned,
        ExperimentStatus::InProgress,
        ExperimentStatus::Completed,
        ExperimentStatus::Failed,
        ExperimentStatus::Cancelled,
    ];

    /// Canonical label, also used as the aggregation label for charts.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperimentStatus::Planned => "PLANNED",
            ExperimentStatus::InProgress => "IN_PROGRESS",
            ExperimentStatus::Completed => "COMPLETED",
            ExperimentStatus::Failed => "FAILED",
            ExperimentStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether this status carries an end timestamp.
    pub fn requires_end_date(&self) -> bool {
        matches!(self, ExperimentStatus::Completed | ExperimentStatus::Failed)
    }
}

impl fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExperimentStatus {
    type Err = ExperimentStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PLANNED" => Ok(ExperimentStatus::Planned),
            "IN_PROGRESS" => Ok(ExperimentStatus::InProgress),
            "COMPLETED" => Ok(ExperimentStatus::Completed),
            "FAILED" => Ok(ExperimentStatus::Failed),
            "CANCELLED" => Ok(ExperimentStatus::Cancelled),
            _ => Err(ExperimentStatusParseError(s.to_string())),
        }
    }
}

/// Error when parsing an invalid experiment status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentStatusParseError(pub String);

impl fmt::Display for ExperimentStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid experiment status: {}", self.0)
    }
}

impl std::error::Error for ExperimentStatusParseError {}

// ============================================================================
// RESULT ENUMS
// ============================================================================

/// Kind of payload a result record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    Numeric,
    Text,
    Image,
    Dataset,
    File,
}

impl ResultType {
    /// Canonical label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Numeric => "NUMERIC",
            ResultType::Text => "TEXT",
            ResultType::Image => "IMAGE",
            ResultType::Dataset => "DATASET",
            ResultType::File => "FILE",
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
