//! Implementation of `bffgen generate`.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::{LoadedSolution, Project, ProjectFailure, Solution};
use crate::generator::{self, GenerationContext};
use crate::resolver::{resolve_build_order, BuildOrder, ResolveError};
use crate::util::config::Config;
use crate::util::fs::write_if_changed;

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Render everything but write nothing
    pub dry_run: bool,
}

/// One rendered descriptor.
#[derive(Debug, Clone)]
pub struct Descriptor {
    /// Destination file
    pub path: PathBuf,

    /// Descriptor text
    pub contents: String,

    /// Owning project, `None` for the solution descriptor
    pub project: Option<String>,
}

/// Every descriptor of a solution, rendered in memory.
#[derive(Debug, Clone)]
pub struct RenderedSolution {
    /// Resolved build order of the active projects
    pub order: BuildOrder,

    /// Project descriptors in build order, then the solution descriptor
    pub descriptors: Vec<Descriptor>,
}

/// Result of a generation pass.
#[derive(Debug, Clone, Default)]
pub struct GenerateResult {
    /// Files written (or, in a dry run, files that would be written)
    pub written: Vec<PathBuf>,

    /// Files left alone because their content was already current
    pub unchanged: Vec<PathBuf>,

    /// Resolved build order
    pub order: BuildOrder,

    /// Projects that failed to load and were left out
    pub failures: Vec<ProjectFailure>,
}

/// Projects that take part in generation: a valid kind and not ignored.
pub fn active_projects<'a>(solution: &'a Solution, config: &Config) -> Vec<&'a Project> {
    solution
        .projects
        .iter()
        .filter(|p| {
            if !p.kind.is_valid() {
                tracing::debug!("skipping project `{}`: kind is not generated", p.name);
                return false;
            }
            if config.is_ignored(&p.name) {
                tracing::debug!("skipping project `{}`: ignored by configuration", p.name);
                return false;
            }
            true
        })
        .collect()
}

/// Render every descriptor of `solution` without touching the filesystem.
pub fn render_all(solution: &Solution, config: &Config) -> Result<RenderedSolution, ResolveError> {
    let active = active_projects(solution, config);
    let order = resolve_build_order(active.iter().copied())?;
    let ctx = GenerationContext::new(active.iter().copied(), config);

    let mut descriptors = Vec::with_capacity(active.len() + 1);
    for name in order.names() {
        let Some(project) = solution.project(name) else {
            continue;
        };
        if let Some(contents) = generator::render_project(project, &ctx) {
            descriptors.push(Descriptor {
                path: project.descriptor_path(),
                contents,
                project: Some(project.name.clone()),
            });
        }
    }

    descriptors.push(Descriptor {
        path: solution.descriptor_path(),
        contents: generator::solution::render(solution, &order, &ctx),
        project: None,
    });

    Ok(RenderedSolution { order, descriptors })
}

/// Generate and write every descriptor of a loaded solution.
///
/// A dependency cycle aborts the pass before anything is written. A write
/// failure aborts the pass at the failing file.
pub fn generate(
    loaded: &LoadedSolution,
    config: &Config,
    options: &GenerateOptions,
) -> Result<GenerateResult> {
    let solution = &loaded.solution;
    tracing::info!("generating descriptors for solution `{}`", solution.name);

    let rendered = render_all(solution, config)?;
    let mut result = GenerateResult {
        order: rendered.order,
        failures: loaded.failures.clone(),
        ..Default::default()
    };

    for descriptor in rendered.descriptors {
        if options.dry_run {
            tracing::debug!("would write {}", descriptor.path.display());
            result.written.push(descriptor.path);
            continue;
        }

        let changed = write_if_changed(&descriptor.path, &descriptor.contents).with_context(|| {
            match &descriptor.project {
                Some(name) => format!("failed to write descriptor for project `{}`", name),
                None => format!("failed to write solution descriptor `{}`", solution.name),
            }
        })?;

        if changed {
            tracing::debug!("wrote {}", descriptor.path.display());
            result.written.push(descriptor.path);
        } else {
            tracing::debug!("{} is up to date", descriptor.path.display());
            result.unchanged.push(descriptor.path);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProjectKind;
    use crate::test_support::{chain_solution, cyclic_solution, native_project};
    use tempfile::TempDir;

    fn loaded(solution: Solution) -> LoadedSolution {
        LoadedSolution {
            solution,
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_generate_writes_all_descriptors() {
        let tmp = TempDir::new().unwrap();
        let solution = loaded(chain_solution(tmp.path()));

        let result = generate(&solution, &Config::default(), &GenerateOptions::default()).unwrap();

        assert_eq!(result.written.len(), 4);
        assert!(result.unchanged.is_empty());
        assert_eq!(result.order.names().collect::<Vec<_>>(), vec!["core", "engine", "app"]);
        assert!(tmp.path().join("Game.bff").is_file());
        assert!(tmp.path().join("app/app.bff").is_file());
        assert!(tmp.path().join("core/core.bff").is_file());
    }

    #[test]
    fn test_generate_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let solution = loaded(chain_solution(tmp.path()));
        let config = Config::default();
        let options = GenerateOptions::default();

        generate(&solution, &config, &options).unwrap();
        let first = std::fs::read_to_string(tmp.path().join("Game.bff")).unwrap();
        let first_app = std::fs::read_to_string(tmp.path().join("app/app.bff")).unwrap();

        let second = generate(&solution, &config, &options).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.unchanged.len(), 4);
        assert_eq!(std::fs::read_to_string(tmp.path().join("Game.bff")).unwrap(), first);
        assert_eq!(std::fs::read_to_string(tmp.path().join("app/app.bff")).unwrap(), first_app);
    }

    #[test]
    fn test_render_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let solution = chain_solution(tmp.path());
        let config = Config::default();

        let a = render_all(&solution, &config).unwrap();
        let b = render_all(&solution, &config).unwrap();
        let a: Vec<_> = a.descriptors.iter().map(|d| d.contents.as_str()).collect();
        let b: Vec<_> = b.descriptors.iter().map(|d| d.contents.as_str()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_includes_follow_build_order() {
        let tmp = TempDir::new().unwrap();
        let rendered = render_all(&chain_solution(tmp.path()), &Config::default()).unwrap();
        let text = &rendered.descriptors.last().unwrap().contents;

        let core = text.find("#include \"core/core.bff\"").unwrap();
        let engine = text.find("#include \"engine/engine.bff\"").unwrap();
        let app = text.find("#include \"app/app.bff\"").unwrap();
        assert!(core < engine && engine < app);
    }

    #[test]
    fn test_ignored_project_excluded_even_when_required() {
        let tmp = TempDir::new().unwrap();
        let solution = loaded(chain_solution(tmp.path()));
        let mut config = Config::default();
        config.ignore.push("core".to_string());

        let result = generate(&solution, &config, &GenerateOptions::default()).unwrap();
        assert_eq!(result.order.names().collect::<Vec<_>>(), vec!["engine", "app"]);

        let text = std::fs::read_to_string(tmp.path().join("Game.bff")).unwrap();
        assert!(!text.contains("core.bff"));
        assert!(text.contains("Alias('All') { .Targets = { 'app', 'engine' } }"));
        assert!(!tmp.path().join("core/core.bff").exists());

        let engine = std::fs::read_to_string(tmp.path().join("engine/engine.bff")).unwrap();
        assert!(!engine.contains("PreBuildDependencies"));
    }

    #[test]
    fn test_invalid_projects_excluded() {
        let tmp = TempDir::new().unwrap();
        let solution = chain_solution(tmp.path())
            .with_project(native_project(tmp.path(), "tools", ProjectKind::Invalid));

        let rendered = render_all(&solution, &Config::default()).unwrap();
        assert_eq!(rendered.descriptors.len(), 4);
        assert!(rendered.descriptors.iter().all(|d| d.project.as_deref() != Some("tools")));
        assert!(!rendered.descriptors.last().unwrap().contents.contains("'tools'"));
    }

    #[test]
    fn test_cycle_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let solution = loaded(cyclic_solution(tmp.path()));

        let err = generate(&solution, &Config::default(), &GenerateOptions::default()).unwrap_err();
        assert!(err.downcast_ref::<ResolveError>().is_some());
        assert!(err.to_string().contains("cyclic dependency"));
        assert!(!tmp.path().join("Loop.bff").exists());
    }

    #[test]
    fn test_write_failure_names_project() {
        let tmp = TempDir::new().unwrap();
        let solution = loaded(chain_solution(tmp.path()));
        // A plain file where the project folder should be
        std::fs::write(tmp.path().join("app"), "not a folder").unwrap();

        let err = generate(&solution, &Config::default(), &GenerateOptions::default()).unwrap_err();
        assert!(err.to_string().contains("failed to write descriptor for project `app`"));
        assert!(err.downcast_ref::<ResolveError>().is_none());
        assert!(!tmp.path().join("Game.bff").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let solution = loaded(chain_solution(tmp.path()));
        let options = GenerateOptions { dry_run: true };

        let result = generate(&solution, &Config::default(), &options).unwrap();
        assert_eq!(result.written.len(), 4);
        assert!(!tmp.path().join("Game.bff").exists());
    }

    #[test]
    fn test_failures_are_carried() {
        let tmp = TempDir::new().unwrap();
        let solution = LoadedSolution {
            solution: chain_solution(tmp.path()),
            failures: vec![ProjectFailure {
                name: "broken".to_string(),
                reason: "missing field `kind`".to_string(),
            }],
        };
        let options = GenerateOptions { dry_run: true };

        let result = generate(&solution, &Config::default(), &options).unwrap();
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].name, "broken");
    }
}
