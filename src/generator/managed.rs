//! Descriptor generation for managed (C#) projects.
//!
//! One `CSAssembly` target per configuration. All configurations compile
//! the same input files; references and compiler flags vary per
//! configuration.

use std::path::Path;

use crate::core::{Configuration, ManagedKind, Project};
use crate::generator::toolchain::managed_base_config;
use crate::generator::writer::{escape, option_value, path_value, string_array, BffWriter};
use crate::generator::GenerationContext;
use crate::util::config::ProjectSettings;
use crate::util::fs::resolve_path;

/// Compiler flags for one configuration, in the order `csc` documents them.
///
/// Flags are returned unescaped.
pub fn compile_flags(
    kind: ManagedKind,
    configuration: &Configuration,
    settings: Option<&ProjectSettings>,
) -> Vec<String> {
    let managed = &configuration.managed;
    let mut flags = Vec::new();

    flags.push(
        match kind {
            ManagedKind::Executable => "/target:exe",
            ManagedKind::Library => "/target:library",
            ManagedKind::GuiExecutable => "/target:winexe",
        }
        .to_string(),
    );
    flags.push(format!("/platform:{}", managed_platform(&configuration.platform)));
    flags.push(if managed.optimize { "/optimize+" } else { "/optimize-" }.to_string());
    if managed.warnings_as_errors {
        flags.push("/warnaserror+".to_string());
    }

    let extra_defines = settings.map(|s| s.add_defines.as_slice()).unwrap_or_default();
    for constant in managed.defined_constants.iter().chain(extra_defines) {
        flags.push(format!("/define:{}", constant));
    }

    if managed.debug {
        flags.push("/debug+".to_string());
    }
    if let Some(kind) = managed.debug_info.as_deref().filter(|k| !k.is_empty()) {
        flags.push(format!("/debug:{}", kind));
    }
    if !managed.warnings_to_ignore.is_empty() {
        flags.push(format!("/nowarn:{}", managed.warnings_to_ignore.join(",")));
    }
    flags.push(format!("/filealign:{}", managed.file_alignment));
    flags.push(format!("/warn:{}", managed.warning_level));

    if let Some(settings) = settings {
        flags.retain(|flag| !settings.remove_compiler_flags.contains(flag));
        flags.extend(settings.add_compiler_flags.iter().cloned());
    }
    flags
}

/// `csc` platform name: `Any CPU` becomes `anycpu`.
fn managed_platform(platform: &str) -> String {
    platform
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Render the descriptor of a managed project.
pub fn render(project: &Project, kind: ManagedKind, ctx: &GenerationContext<'_>) -> String {
    let settings = ctx.settings(&project.name);

    let mut w = BffWriter::new();
    w.line("{");

    w.comment("References...");
    for configuration in &project.configurations {
        let references = configuration
            .managed
            .references
            .iter()
            .map(|r| resolve_path(&project.root_folder, &r.path).display().to_string());
        w.line(format!(
            ".{}_References = {}",
            configuration.variable_prefix(),
            string_array(references)
        ));
    }
    w.blank();

    let inputs = project
        .files
        .iter()
        .map(|f| resolve_path(&project.root_folder, Path::new(f)).display().to_string());
    w.line(format!(".InputFiles = {}", string_array(inputs)));
    w.blank();

    w.comment("Compiler flags...");
    for configuration in &project.configurations {
        let flags: Vec<String> = compile_flags(kind, configuration, settings)
            .iter()
            .map(|f| escape(f))
            .collect();
        w.line(format!(
            ".{}_Compile_Flags = {}",
            configuration.variable_prefix(),
            option_value(&flags)
        ));
    }
    w.blank();

    for configuration in &project.configurations {
        write_assembly(&mut w, project, kind, configuration, ctx);
    }

    w.line(format!(
        "Alias( '{}' ) {{ .Targets = {} }}",
        escape(&project.name),
        string_array(project.target_ids())
    ));
    w.line("}");
    w.finish()
}

fn write_assembly(
    w: &mut BffWriter,
    project: &Project,
    kind: ManagedKind,
    configuration: &Configuration,
    ctx: &GenerationContext<'_>,
) {
    let prefix = configuration.variable_prefix();
    let extension = match kind {
        ManagedKind::Library => "dll",
        ManagedKind::Executable | ManagedKind::GuiExecutable => "exe",
    };
    let output = configuration
        .output_folder
        .join(format!("{}.{}", project.name, extension));

    w.line(format!(
        "CSAssembly( '{}' )",
        escape(&configuration.target_id(&project.name))
    ));
    w.line("{");
    w.line(format!(
        "  Using( .cs{}BaseConfig )",
        managed_base_config(&configuration.platform)
    ));
    w.line(format!("  .CompilerOutput     = '{}'", path_value(&output)));
    w.line(format!("  .CompilerOptions    + .{}_Compile_Flags", prefix));
    w.line("                      + ' \"%1\"'");
    w.line("  .CompilerInputFiles = .InputFiles");
    w.line(format!("  .CompilerReferences = .{}_References", prefix));

    let prebuild = ctx.prebuild_dependencies(project, configuration);
    if !prebuild.is_empty() {
        w.line(format!("  .PreBuildDependencies = {}", string_array(&prebuild)));
    }
    w.line("}");
    w.blank();
}
