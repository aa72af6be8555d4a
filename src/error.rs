use thiserror::Error;

/// Domain-specific errors for the timetabler
#[derive(Error, Debug)]
pub enum SchedulerError {
    // Input/Parse errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    #[error("Slot label '{label}' does not start with a weekday name")]
    MalformedSlotLabel { label: String },

    // Data validation errors
    #[error("Student '{student_id}' is enrolled in unknown course '{course_id}'")]
    UnknownCourse {
        student_id: String,
        course_id: String,
    },

    #[error("Course '{course_id}' has a non-positive classes-per-week value: {value}")]
    InvalidClassesPerWeek { course_id: String, value: i64 },

    #[error("Course '{course_id}' has no classes-per-week entry")]
    MissingClassesPerWeek { course_id: String },

    // Solver errors
    #[error("ILP solver failed: {0}")]
    SolverFailed(String),
}

/// Use anyhow::Result at application boundaries
pub type Result<T> = anyhow::Result<T>;
