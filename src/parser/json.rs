use crate::error::{Result, SchedulerError};
use crate::types::{
    CourseId, CourseOfferings, CourseType, InstructorId, Schedule, SchedulerInput, SlotId,
    SolverConfig, StudentId,
};
use log::warn;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Per-course metadata as stored on disk
#[derive(Debug, Deserialize)]
struct CourseMeta {
    #[serde(default = "default_classes_per_week")]
    classes_per_week: u32,
    #[serde(default, rename = "type")]
    course_type: CourseType,
}

fn default_classes_per_week() -> u32 {
    2
}

/// Instructor assignments may be a single id or a list; the distinction is
/// flattened away here so the core only ever sees lists
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(InstructorId),
    Many(Vec<InstructorId>),
}

impl From<OneOrMany> for Vec<InstructorId> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(id) => vec![id],
            OneOrMany::Many(ids) => ids,
        }
    }
}

/// Optional solver settings file, sitting next to the JSON inputs
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    non_preferred_slots: Vec<SlotId>,
    #[serde(default)]
    solver: SolverConfig,
}

/// Load the full input bundle from a data directory.
///
/// Required: `offerings.json`, `enrollments.json`, `instructors.json`,
/// `courses.json`. Optional: `busy_slots.json`, `config.toml`.
pub fn load_input_from_dir(dir: &Path) -> Result<SchedulerInput> {
    let offerings: BTreeMap<CourseId, CourseOfferings> =
        load_json_file(&dir.join("offerings.json"))?;
    let enrollments: BTreeMap<StudentId, Vec<CourseId>> =
        load_json_file(&dir.join("enrollments.json"))?;
    let raw_instructors: BTreeMap<CourseId, OneOrMany> =
        load_json_file(&dir.join("instructors.json"))?;
    let mut meta: BTreeMap<CourseId, CourseMeta> = load_json_file(&dir.join("courses.json"))?;

    let busy_path = dir.join("busy_slots.json");
    let busy_slots: BTreeMap<InstructorId, BTreeSet<SlotId>> = if busy_path.exists() {
        load_json_file(&busy_path)?
    } else {
        BTreeMap::new()
    };

    let file_config = load_config_or_default(&dir.join("config.toml"));

    let instructors: BTreeMap<CourseId, Vec<InstructorId>> = raw_instructors
        .into_iter()
        .map(|(course, entry)| (course, entry.into()))
        .collect();

    let mut classes_per_week = BTreeMap::new();
    let mut course_types = BTreeMap::new();
    for course in offerings.keys() {
        match meta.remove(course) {
            Some(m) => {
                classes_per_week.insert(course.clone(), m.classes_per_week);
                course_types.insert(course.clone(), m.course_type);
            }
            None => {
                warn!("course '{course}' has no metadata entry, defaulting to 2 classes per week");
                classes_per_week.insert(course.clone(), default_classes_per_week());
            }
        }
    }
    // Metadata for courses without offerings still participates in
    // diagnostics, so keep it
    for (course, m) in meta {
        classes_per_week.insert(course.clone(), m.classes_per_week);
        course_types.insert(course, m.course_type);
    }

    Ok(SchedulerInput {
        offerings,
        enrollments,
        instructors,
        classes_per_week,
        course_types,
        non_preferred_slots: file_config.non_preferred_slots.into_iter().collect(),
        busy_slots,
        config: file_config.solver,
    })
}

/// Load a previously generated schedule
pub fn load_schedule(path: &Path) -> Result<Schedule> {
    load_json_file(path)
}

/// Load config from TOML file, or use defaults
fn load_config_or_default(path: &Path) -> FileConfig {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => FileConfig::default(),
        }
    } else {
        FileConfig::default()
    }
}

/// Generic JSON file loader
fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SchedulerError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}
