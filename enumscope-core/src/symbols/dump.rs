//! JSON symbol dumps as a solution provider.
//!
//! An external exporter writes one JSON document per solution (or per
//! project) in this shape:
//!
//! ```json
//! {
//!   "projects": [
//!     {
//!       "name": "Shop",
//!       "file_path": "src/Shop/Shop.csproj",
//!       "language": "C#",
//!       "compilation": { "assembly_name": "Shop", "global_namespace": { ... } }
//!     }
//!   ]
//! }
//! ```
//!
//! A project with `"compilation": null` stands for one the build system
//! could not compile. Pointing the loader at a directory picks up every
//! `*.symbols.json` below it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use super::compilation::Compilation;
use super::provider::{InMemorySolution, ProjectInfo};
use crate::error::{AuditError, AuditResult, IoResultExt};
use crate::logging::log_info;

/// File name suffix picked up when loading a dump directory.
pub const DUMP_SUFFIX: &str = ".symbols.json";

/// Directories never descended into when scanning for dumps.
const EXCLUDED_DIRS: &[&str] = &["bin", "obj", ".git", "node_modules"];

fn default_language() -> String {
    "C#".to_string()
}

/// One project entry of a dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDump {
    /// Defaults to `file_path`, or `name` when the path is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub compilation: Option<Compilation>,
}

impl ProjectDump {
    fn into_parts(self) -> (ProjectInfo, Option<Compilation>) {
        let id = match self.id {
            Some(id) => id,
            None if self.file_path.is_empty() => self.name.clone(),
            None => self.file_path.clone(),
        };
        let info = ProjectInfo {
            id,
            name: self.name,
            file_path: self.file_path,
            language: self.language,
        };
        (info, self.compilation)
    }
}

/// Top-level document of a dump file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolutionDump {
    #[serde(default)]
    pub projects: Vec<ProjectDump>,
}

impl SolutionDump {
    /// Decodes a dump document; `origin` is only used for error context.
    pub fn from_json(origin: &Path, json: &str) -> AuditResult<Self> {
        serde_json::from_str(json).map_err(|e| AuditError::dump(origin, &e))
    }

    pub fn into_solution(self) -> InMemorySolution {
        let mut solution = InMemorySolution::new();
        for project in self.projects {
            let (info, compilation) = project.into_parts();
            solution.push(info, compilation);
        }
        solution
    }
}

fn is_excluded_dir(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

/// Finds every `*.symbols.json` below `root`, sorted for a stable project order.
pub fn gather_dump_files(root: &Path) -> AuditResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e))
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            match e.into_io_error() {
                Some(io) => AuditError::io(path, io),
                None => AuditError::io(
                    path,
                    std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"),
                ),
            }
        })?;
        let is_dump = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(DUMP_SUFFIX));
        if entry.file_type().is_file() && is_dump {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Loads a dump file, or every dump under a directory, as one solution.
pub fn load_solution(path: &Path) -> AuditResult<InMemorySolution> {
    let files = if path.is_dir() {
        gather_dump_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut solution = InMemorySolution::new();
    for file in &files {
        let json = fs::read_to_string(file).with_path(file)?;
        let dump = SolutionDump::from_json(file, &json)?;
        for project in dump.projects {
            let (info, compilation) = project.into_parts();
            solution.push(info, compilation);
        }
    }

    log_info(&format!(
        "loaded {} project(s) from {} dump file(s)",
        solution.len(),
        files.len()
    ));
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SolutionProvider;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "enumscope_dump_test_{}_{}",
            std::process::id(),
            id
        ));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const MINIMAL: &str = r#"{
        "projects": [
            { "name": "Shop", "file_path": "Shop.csproj",
              "compilation": { "assembly_name": "Shop" } },
            { "name": "Legacy", "language": "Visual Basic", "compilation": null }
        ]
    }"#;

    #[test]
    fn test_project_defaults() {
        let solution = SolutionDump::from_json(Path::new("inline"), MINIMAL)
            .unwrap()
            .into_solution();
        let projects = solution.projects();

        assert_eq!(projects[0].id, "Shop.csproj");
        assert_eq!(projects[0].language, "C#");
        assert_eq!(projects[1].id, "Legacy");
        assert!(solution.compilation(&projects[1]).unwrap().is_none());
    }

    #[test]
    fn test_malformed_dump_reports_path() {
        let err = SolutionDump::from_json(Path::new("bad.symbols.json"), "{ \"projects\": 3 }")
            .unwrap_err();
        assert_eq!(err.path(), Some(&PathBuf::from("bad.symbols.json")));
    }

    #[test]
    fn test_load_directory_skips_build_output() {
        let dir = temp_dir();
        fs::write(dir.join("b.symbols.json"), MINIMAL).unwrap();
        fs::write(dir.join("notes.json"), "not a dump").unwrap();
        fs::create_dir_all(dir.join("obj")).unwrap();
        fs::write(dir.join("obj/stale.symbols.json"), "{ broken").unwrap();
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(
            dir.join("nested/a.symbols.json"),
            r#"{ "projects": [ { "name": "Api", "file_path": "Api.csproj" } ] }"#,
        )
        .unwrap();

        let files = gather_dump_files(&dir).unwrap();
        assert_eq!(files.len(), 2);

        let solution = load_solution(&dir).unwrap();
        assert_eq!(solution.len(), 3);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_same_project_path_in_two_dumps() {
        let dir = temp_dir();
        let dump = |assembly: &str| {
            format!(
                r#"{{ "projects": [ {{ "name": "Api", "file_path": "src/Api/Api.csproj",
                    "compilation": {{ "assembly_name": "{}" }} }} ] }}"#,
                assembly
            )
        };
        fs::create_dir_all(dir.join("alpha")).unwrap();
        fs::create_dir_all(dir.join("beta")).unwrap();
        fs::write(dir.join("alpha/shop.symbols.json"), dump("Alpha")).unwrap();
        fs::write(dir.join("beta/shop.symbols.json"), dump("Beta")).unwrap();

        let solution = load_solution(&dir).unwrap();
        let projects = solution.projects();
        assert_eq!(projects.len(), 2);
        assert_ne!(projects[0].id, projects[1].id);

        let assemblies: Vec<String> = projects
            .iter()
            .map(|p| solution.compilation(p).unwrap().unwrap().assembly_name().to_string())
            .collect();
        assert_eq!(assemblies, vec!["Alpha", "Beta"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_solution(Path::new("/definitely/not/here.symbols.json")).unwrap_err();
        assert!(matches!(err, AuditError::Io { .. }));
    }
}
