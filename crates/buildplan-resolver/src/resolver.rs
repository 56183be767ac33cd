//! Variant validation and plan assembly.
//!
//! [`resolve`] checks a variant's invariants in a fixed order and stops at
//! the first violation. It performs no I/O and never returns a partial
//! plan, so it is safe to call concurrently on shared variants.

use buildplan_common::constants::{MAX_PORT, MIN_PORT, PYTHON_INTERPRETERS, PYTHONPATH_ENV};
use buildplan_common::error::ConfigError;
use buildplan_common::types::ContainerPath;

use crate::plan::{BuildPlan, BuildStep};
use crate::variant::{BuildVariant, PythonDependency};

/// Validates a variant and produces its build plan.
///
/// # Checks performed
///
/// 1. At least one source mount.
/// 2. Every local-path dependency installs from inside a mount.
/// 3. `pythonPath` is absolute and covers every local install target.
/// 4. The entrypoint starts with `python`/`python3` or a mounted path.
/// 5. The exposed port, if any, is within `1..=65535`.
/// 6. The base image reference is non-empty and has no whitespace.
/// 7. No field that lands on a build file line holds a control character,
///    and path and package fields hold no whitespace either.
///
/// # Errors
///
/// Returns the [`ConfigError`] for the first check that fails.
pub fn resolve(variant: &BuildVariant) -> Result<BuildPlan, ConfigError> {
    tracing::info!(variant = %variant.name, "resolving build variant");

    check_source_mounts(variant)?;
    let base = variant.base_dir();
    let roots = variant.mount_roots();
    let targets: Vec<(&PythonDependency, ContainerPath)> = variant
        .python_dependencies
        .iter()
        .filter_map(|dep| dep.local_target(base.as_str()).map(|t| (dep, t)))
        .collect();

    check_dangling_dependencies(variant, &targets, &roots)?;
    check_python_path(variant, &targets)?;
    check_entrypoint(variant, &base, &roots)?;
    let port = check_port(variant)?;
    check_base_image(variant)?;
    check_safe_values(variant)?;

    let plan = assemble(variant, port);
    tracing::info!(variant = %variant.name, steps = plan.steps.len(), "variant resolved");
    Ok(plan)
}

fn check_source_mounts(variant: &BuildVariant) -> Result<(), ConfigError> {
    if variant.source_mounts.is_empty() {
        return Err(ConfigError::NoSourceMount {
            variant: variant.name.clone(),
        });
    }
    Ok(())
}

fn check_dangling_dependencies(
    variant: &BuildVariant,
    targets: &[(&PythonDependency, ContainerPath)],
    roots: &[ContainerPath],
) -> Result<(), ConfigError> {
    for (dep, target) in targets {
        tracing::debug!(dependency = %dep, target = %target, "checking local dependency");
        if !roots.iter().any(|root| target.is_under(root)) {
            return Err(ConfigError::DanglingDependencyPath {
                variant: variant.name.clone(),
                dependency: dep.to_string(),
                target: target.to_string(),
            });
        }
    }
    Ok(())
}

fn check_python_path(
    variant: &BuildVariant,
    targets: &[(&PythonDependency, ContainerPath)],
) -> Result<(), ConfigError> {
    let mismatch = |reason: String| ConfigError::PythonPathMismatch {
        variant: variant.name.clone(),
        python_path: variant.python_path.clone(),
        reason,
    };

    if !variant.python_path.starts_with('/') {
        return Err(mismatch("is not an absolute path".into()));
    }
    let python_path = ContainerPath::resolve("/", &variant.python_path);
    if let Some((_, target)) = targets.iter().find(|(_, t)| !t.is_under(&python_path)) {
        return Err(mismatch(format!(
            "does not cover local install target {target}"
        )));
    }
    Ok(())
}

fn check_entrypoint(
    variant: &BuildVariant,
    base: &ContainerPath,
    roots: &[ContainerPath],
) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEntrypoint {
        variant: variant.name.clone(),
        reason,
    };

    let Some(first) = variant.entrypoint.first() else {
        return Err(invalid("entrypoint is empty".into()));
    };
    if PYTHON_INTERPRETERS.contains(&first.as_str()) {
        return Ok(());
    }
    if first.contains('/') {
        let exe = ContainerPath::resolve(base.as_str(), first);
        if roots.iter().any(|root| exe.is_under(root)) {
            return Ok(());
        }
        return Err(invalid(format!(
            "{exe} is not under any sourceMounts containerPath"
        )));
    }
    Err(invalid(format!(
        "\"{first}\" is neither {} nor a path under a mounted source root",
        PYTHON_INTERPRETERS.join("/")
    )))
}

fn check_port(variant: &BuildVariant) -> Result<Option<u16>, ConfigError> {
    let Some(port) = variant.exposed_port else {
        return Ok(None);
    };
    if !(MIN_PORT..=MAX_PORT).contains(&port) {
        return Err(ConfigError::PortOutOfRange {
            variant: variant.name.clone(),
            port,
        });
    }
    u16::try_from(port)
        .map(Some)
        .map_err(|_| ConfigError::PortOutOfRange {
            variant: variant.name.clone(),
            port,
        })
}

fn check_base_image(variant: &BuildVariant) -> Result<(), ConfigError> {
    let image = &variant.base_image;
    if image.is_empty() || image.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidBaseImage {
            variant: variant.name.clone(),
            image: image.clone(),
        });
    }
    Ok(())
}

fn unsafe_reason(value: &str, allow_whitespace: bool) -> Option<&'static str> {
    if value.chars().any(char::is_control) {
        Some("a control character")
    } else if !allow_whitespace && value.chars().any(char::is_whitespace) {
        Some("whitespace")
    } else {
        None
    }
}

fn check_safe_values(variant: &BuildVariant) -> Result<(), ConfigError> {
    let mut words: Vec<(&'static str, &str)> = vec![("pythonPath", variant.python_path.as_str())];
    if let Some(ref workdir) = variant.workdir {
        words.push(("workdir", workdir.as_str()));
    }
    for mount in &variant.source_mounts {
        words.push(("sourceMounts", mount.host_path.as_str()));
        words.push(("sourceMounts", mount.container_path.as_str()));
    }
    words.extend(
        variant
            .system_packages
            .iter()
            .map(|p| ("systemPackages", p.as_str())),
    );

    let dependencies: Vec<String> = variant
        .python_dependencies
        .iter()
        .map(ToString::to_string)
        .collect();
    let lines = std::iter::once(("name", variant.name.as_str()))
        .chain(dependencies.iter().map(|d| ("pythonDependencies", d.as_str())));

    let checked = words
        .into_iter()
        .map(|(field, value)| (field, value, false))
        .chain(lines.map(|(field, value)| (field, value, true)));
    for (field, value, allow_whitespace) in checked {
        if let Some(reason) = unsafe_reason(value, allow_whitespace) {
            return Err(ConfigError::UnsafeValue {
                variant: variant.name.clone(),
                field,
                value: value.to_string(),
                reason,
            });
        }
    }
    Ok(())
}

fn assemble(variant: &BuildVariant, port: Option<u16>) -> BuildPlan {
    let mut steps = vec![BuildStep::BaseImage {
        image: variant.base_image.clone(),
    }];

    if !variant.system_packages.is_empty() {
        steps.push(BuildStep::InstallSystemPackages {
            packages: variant.system_packages.iter().cloned().collect(),
        });
    }
    if let Some(ref path) = variant.workdir {
        steps.push(BuildStep::Workdir { path: path.clone() });
    }
    steps.extend(variant.source_mounts.iter().map(|m| BuildStep::Copy {
        host: m.host_path.clone(),
        container: m.container_path.clone(),
    }));
    steps.extend(
        variant
            .python_dependencies
            .iter()
            .map(|dep| BuildStep::InstallDependency {
                dependency: dep.clone(),
            }),
    );
    steps.push(BuildStep::SetEnv {
        key: PYTHONPATH_ENV.to_string(),
        value: variant.python_path.clone(),
    });
    if let Some(port) = port {
        steps.push(BuildStep::Expose { port });
    }
    steps.push(BuildStep::Entrypoint {
        argv: variant.entrypoint.clone(),
    });

    BuildPlan {
        variant: variant.name.clone(),
        steps,
    }
}
