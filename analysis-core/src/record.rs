//! Employee Record - the input of one analysis cycle
//!
//! A flat, immutable set of employee attributes. Created fresh per form
//! submission, fed through the pipeline once, then discarded.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

// ============================================================================
// FIXED DEFAULTS
// ============================================================================

// Three attributes are not collected by the form and are pinned to the
// values the original training run used. Whether this is an intentional
// simplification or drifts from the training schema is an open data
// question; keep them pinned, do not "fix" them here (see DESIGN.md).

/// Default remote-work support score (1-5 scale)
pub const DEFAULT_REMOTE_SUPPORT: u32 = 3;

/// Default industry
pub const DEFAULT_INDUSTRY: &str = "Tech";

/// Default mental-health condition
pub const DEFAULT_MENTAL_HEALTH_CONDITION: &str = "None";

// ============================================================================
// FIELD RANGES
// ============================================================================

/// Valid age range (inclusive)
pub const AGE_RANGE: (u32, u32) = (18, 65);

/// Valid weekly hours range (inclusive)
pub const HOURS_RANGE: (u32, u32) = (20, 80);

/// Valid work-life balance rating range (inclusive)
pub const BALANCE_RANGE: (u32, u32) = (1, 5);

// ============================================================================
// CLOSED ENUMS
// ============================================================================

/// Gender options offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// All options, in form order
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];
}

/// Job role options offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobRole {
    #[serde(rename = "Software Engineer")]
    SoftwareEngineer,
    Manager,
    #[serde(rename = "Data Analyst")]
    DataAnalyst,
}

impl JobRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobRole::SoftwareEngineer => "Software Engineer",
            JobRole::Manager => "Manager",
            JobRole::DataAnalyst => "Data Analyst",
        }
    }

    pub const ALL: [JobRole; 3] = [JobRole::SoftwareEngineer, JobRole::Manager, JobRole::DataAnalyst];
}

/// Work location options offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkLocation {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkLocation::Remote => "Remote",
            WorkLocation::Hybrid => "Hybrid",
            WorkLocation::Onsite => "Onsite",
        }
    }

    pub const ALL: [WorkLocation; 3] = [WorkLocation::Remote, WorkLocation::Hybrid, WorkLocation::Onsite];
}

// ============================================================================
// EMPLOYEE RECORD
// ============================================================================

/// One employee attribute record, column names matching the training schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub age: u32,
    pub gender: Gender,
    pub job_role: JobRole,
    pub work_location: WorkLocation,
    pub hours_worked_per_week: u32,
    pub work_life_balance_rating: u32,
    pub company_support_for_remote_work: u32,
    pub industry: String,
    pub mental_health_condition: String,
}

impl EmployeeRecord {
    /// Build a record from the six form fields, filling the fixed defaults
    /// for the attributes the form does not expose.
    pub fn from_form(
        age: u32,
        gender: Gender,
        job_role: JobRole,
        work_location: WorkLocation,
        hours_worked_per_week: u32,
        work_life_balance_rating: u32,
    ) -> Self {
        Self {
            age,
            gender,
            job_role,
            work_location,
            hours_worked_per_week,
            work_life_balance_rating,
            company_support_for_remote_work: DEFAULT_REMOTE_SUPPORT,
            industry: DEFAULT_INDUSTRY.to_string(),
            mental_health_condition: DEFAULT_MENTAL_HEALTH_CONDITION.to_string(),
        }
    }

    /// Check all numeric fields against the form ranges.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        check_range("Age", self.age, AGE_RANGE)?;
        check_range("Hours_Worked_Per_Week", self.hours_worked_per_week, HOURS_RANGE)?;
        check_range("Work_Life_Balance_Rating", self.work_life_balance_rating, BALANCE_RANGE)?;
        Ok(())
    }

    /// Look up a numeric column by its training-schema name.
    pub fn numeric_value(&self, column: &str) -> Option<f32> {
        match column {
            "Age" => Some(self.age as f32),
            "Hours_Worked_Per_Week" => Some(self.hours_worked_per_week as f32),
            "Work_Life_Balance_Rating" => Some(self.work_life_balance_rating as f32),
            "Company_Support_for_Remote_Work" => Some(self.company_support_for_remote_work as f32),
            _ => None,
        }
    }

    /// Look up a categorical column by its training-schema name.
    pub fn categorical_value(&self, column: &str) -> Option<&str> {
        match column {
            "Gender" => Some(self.gender.as_str()),
            "Job_Role" => Some(self.job_role.as_str()),
            "Work_Location" => Some(self.work_location.as_str()),
            "Industry" => Some(&self.industry),
            "Mental_Health_Condition" => Some(&self.mental_health_condition),
            _ => None,
        }
    }
}

fn check_range(field: &str, value: u32, (min, max): (u32, u32)) -> Result<(), AnalysisError> {
    if value < min || value > max {
        return Err(AnalysisError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, value
        )));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
