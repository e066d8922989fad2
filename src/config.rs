use crate::constants::*;
use crate::error::{Result, SyllabusError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub const BASE_URL_ENV: &str = "SYLLABUS_BASE_URL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub labels: LabelConfig,
    pub filter: FilterConfig,
    pub departments: Vec<DepartmentConfig>,
}

/// Where the syllabus pages live and how long a page load may take.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub school_id: u32,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: SYLLABUS_BASE_URL.to_string(),
            school_id: AKASHI_SCHOOL_ID,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn department_url(&self, department_id: u32, year: u16) -> String {
        format!(
            "{}?school_id={}&department_id={}&year={}&lang=ja",
            self.base_url, self.school_id, department_id, year
        )
    }
}

/// Cell labels that classify a row. Anything else in those cells maps to
/// `Specialized` / elective.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub general_education: String,
    pub required: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            general_education: GENERAL_EDUCATION_LABEL.to_string(),
            required: REQUIRED_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub exclude_title_patterns: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exclude_title_patterns: DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// A course code and the syllabus department page(s) it is scraped from.
///
/// With `shared_department_id` set, grades 1-3 come from the shared page and
/// grades 4-5 from `department_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DepartmentConfig {
    pub code: String,
    pub department_id: u32,
    #[serde(default)]
    pub shared_department_id: Option<u32>,
}

impl DepartmentConfig {
    fn single(code: &str, department_id: u32) -> Self {
        Self {
            code: code.to_string(),
            department_id,
            shared_department_id: None,
        }
    }

    fn split(code: &str, department_id: u32, shared_department_id: u32) -> Self {
        Self {
            code: code.to_string(),
            department_id,
            shared_department_id: Some(shared_department_id),
        }
    }

    pub fn is_split(&self) -> bool {
        self.shared_department_id.is_some()
    }
}

pub fn default_departments() -> Vec<DepartmentConfig> {
    vec![
        DepartmentConfig::single(MECHANICAL_CODE, MECHANICAL_DEPARTMENT_ID),
        DepartmentConfig::split(
            ELECTRICAL_ELECTRONIC_CODE,
            ELECTRICAL_ELECTRONIC_DEPARTMENT_ID,
            ELECTRICAL_COMMON_DEPARTMENT_ID,
        ),
        DepartmentConfig::split(
            ELECTRICAL_INFORMATION_CODE,
            ELECTRICAL_INFORMATION_DEPARTMENT_ID,
            ELECTRICAL_COMMON_DEPARTMENT_ID,
        ),
        DepartmentConfig::single(CIVIL_CODE, CIVIL_DEPARTMENT_ID),
        DepartmentConfig::single(ARCHITECTURE_CODE, ARCHITECTURE_DEPARTMENT_ID),
    ]
}

impl Config {
    /// Built-in configuration for the Akashi syllabus.
    pub fn akashi() -> Self {
        Self {
            departments: default_departments(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            SyllabusError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&config_content)
    }

    /// Loads `path` when it exists, otherwise the built-in configuration.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading config from {}", path.display());
            Self::load(path)
        } else {
            debug!("No config at {}, using built-in defaults", path.display());
            Ok(Self::akashi())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        if config.departments.is_empty() {
            config.departments = default_departments();
        }
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides (`SYLLABUS_BASE_URL`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.source.base_url = base_url.trim().to_string();
            }
        }
        self
    }

    fn validate(&self) -> Result<()> {
        for (i, department) in self.departments.iter().enumerate() {
            if department.code.trim().is_empty() {
                return Err(SyllabusError::Config(format!("department #{i} has an empty code")));
            }
            if self.departments[..i].iter().any(|d| d.code == department.code) {
                return Err(SyllabusError::Config(format!(
                    "duplicate department code: {}",
                    department.code
                )));
            }
        }
        Ok(())
    }

    pub fn course_codes(&self) -> Vec<String> {
        self.departments.iter().map(|d| d.code.clone()).collect()
    }

    pub fn department(&self, code: &str) -> Result<&DepartmentConfig> {
        self.departments
            .iter()
            .find(|d| d.code == code)
            .ok_or_else(|| SyllabusError::UnknownCourseCode {
                code: code.to_string(),
                available: self.course_codes(),
            })
    }
}
