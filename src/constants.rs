//! Layout constants for the syllabus curriculum table and the default
//! department table used when no config file overrides it.

// Table layout
pub const HEADER_ROWS: usize = 4;
pub const MIN_ROW_CELLS: usize = 27;
pub const DIVIDE_CELL: usize = 0;
pub const REQUIRED_CELL: usize = 1;
pub const TITLE_CELL: usize = 2;
pub const CREDIT_CELL: usize = 5;
pub const FIRST_QUARTER_CELL: usize = 6;
pub const LECTURER_CELL: usize = 26;

// Quarter grid: 4 quarters per grade, 5 grades
pub const QUARTERS_PER_GRADE: usize = 4;
pub const GRADE_COUNT: usize = 5;
pub const QUARTER_SLOTS: usize = QUARTERS_PER_GRADE * GRADE_COUNT;

// Cell labels on the Japanese syllabus pages
pub const GENERAL_EDUCATION_LABEL: &str = "一般";
pub const REQUIRED_LABEL: &str = "必修";

// Courses that never belong in a department curriculum
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["海外研修", "留学生"];

// Syllabus site
pub const SYLLABUS_BASE_URL: &str = "https://syllabus.kosen-k.go.jp/Pages/PublicSubjects";
pub const AKASHI_SCHOOL_ID: u32 = 27;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_OUTPUT_DIR: &str = "curriculum";

// Department ids (Akashi)
pub const MECHANICAL_DEPARTMENT_ID: u32 = 11;
pub const ELECTRICAL_COMMON_DEPARTMENT_ID: u32 = 12;
pub const ELECTRICAL_ELECTRONIC_DEPARTMENT_ID: u32 = 13;
pub const ELECTRICAL_INFORMATION_DEPARTMENT_ID: u32 = 14;
pub const CIVIL_DEPARTMENT_ID: u32 = 15;
pub const ARCHITECTURE_DEPARTMENT_ID: u32 = 16;

// Course codes (used in CLI and output paths)
pub const MECHANICAL_CODE: &str = "M";
pub const ELECTRICAL_ELECTRONIC_CODE: &str = "ED";
pub const ELECTRICAL_INFORMATION_CODE: &str = "EJ";
pub const CIVIL_CODE: &str = "C";
pub const ARCHITECTURE_CODE: &str = "A";
