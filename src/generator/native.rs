//! Descriptor generation for native (C/C++) projects.
//!
//! A native descriptor declares, for every configuration, six option
//! variables (include paths, library paths, libraries, preprocessor
//! definitions, compiler flags, linker flags) and then one build target per
//! configuration. The target shape depends on the project kind:
//!
//! - executables and shared libraries compile through an `ObjectList` and
//!   link with `Executable` / `DLL`
//! - static libraries compile and archive in a single `Library`
//!
//! The descriptor ends with a per-project `Alias` naming every target.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::{CharacterSet, Configuration, NativeKind, Project};
use crate::generator::toolchain::native_base_config;
use crate::generator::writer::{escape, option_value, path_value, quoted_path, string_array, BffWriter};
use crate::generator::GenerationContext;
use crate::util::config::ProjectSettings;
use crate::util::fs::resolve_path;

/// Build-system placeholders that were never expanded (`$(OutDir)`,
/// `${VAR}`, `%VAR%`, or a bare `$`).
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$[({]?\w*[)}]?|%\w+%").expect("placeholder pattern is valid")
});

/// Option variables of one configuration, ready to be written.
///
/// Every item is already escaped and formatted as a command-line switch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NativeVariables {
    pub include_paths: Vec<String>,
    pub library_paths: Vec<String>,
    pub libraries: Vec<String>,
    pub defines: Vec<String>,
    pub compiler_flags: Vec<String>,
    pub linker_flags: Vec<String>,
}

impl NativeVariables {
    /// Collect the variables of `configuration`, applying any overrides.
    pub fn collect(
        project: &Project,
        configuration: &Configuration,
        settings: Option<&ProjectSettings>,
    ) -> Self {
        let native = &configuration.native;
        let empty = ProjectSettings::default();
        let settings = settings.unwrap_or(&empty);

        let include_paths = native
            .include_paths
            .iter()
            .map(|p| format!("/I{}", quoted_path(&resolve_path(&project.root_folder, p))))
            .collect();

        let library_paths = native
            .library_paths
            .iter()
            .map(|p| {
                format!(
                    "/LIBPATH:{}",
                    quoted_path(&resolve_path(&project.root_folder, p))
                )
            })
            .collect();

        let libraries = native
            .libraries
            .iter()
            .filter(|lib| !settings.remove_libraries.contains(*lib))
            .chain(settings.add_libraries.iter())
            .filter(|lib| {
                if PLACEHOLDER.is_match(lib) {
                    tracing::warn!(
                        "{}: dropping library `{}` with unresolved placeholder",
                        configuration.target_id(&project.name),
                        lib
                    );
                    false
                } else {
                    true
                }
            })
            .map(|lib| escape(&library_file_name(lib)))
            .collect();

        let mut defines: Vec<String> = native
            .defines
            .iter()
            .chain(settings.add_defines.iter())
            .map(|d| format!("/D{}", escape(d)))
            .collect();
        if native.character_set == CharacterSet::Unicode {
            defines.push("/DUNICODE".to_string());
            defines.push("/D_UNICODE".to_string());
        }

        let compiler_flags = native
            .compiler_flags
            .iter()
            .filter(|flag| !settings.remove_compiler_flags.contains(*flag))
            .chain(settings.add_compiler_flags.iter())
            .map(|flag| escape(flag))
            .collect();

        let linker_flags = native
            .linker_flags
            .iter()
            .chain(settings.add_linker_flags.iter())
            .map(|flag| escape(flag))
            .collect();

        NativeVariables {
            include_paths,
            library_paths,
            libraries,
            defines,
            compiler_flags,
            linker_flags,
        }
    }
}

/// Library names are declared without extension; `.lib` is appended unless
/// already present.
fn library_file_name(lib: &str) -> String {
    if lib.to_ascii_lowercase().ends_with(".lib") {
        lib.to_string()
    } else {
        format!("{}.lib", lib)
    }
}

/// Variable names of one configuration.
struct VariableNames {
    include_paths: String,
    library_paths: String,
    libraries: String,
    defines: String,
    compiler_flags: String,
    linker_flags: String,
}

impl VariableNames {
    fn new(configuration: &Configuration) -> Self {
        let prefix = configuration.variable_prefix();
        VariableNames {
            include_paths: format!("{}_Include_Path", prefix),
            library_paths: format!("{}_Library_Path", prefix),
            libraries: format!("{}_Libraries", prefix),
            defines: format!("{}_Preprocessor_Definitions", prefix),
            compiler_flags: format!("{}_Compiler_Flags", prefix),
            linker_flags: format!("{}_Linker_Flags", prefix),
        }
    }
}

/// Render the descriptor of a native project.
pub fn render(project: &Project, kind: NativeKind, ctx: &GenerationContext<'_>) -> String {
    let settings = ctx.settings(&project.name);
    let variables: Vec<(VariableNames, NativeVariables)> = project
        .configurations
        .iter()
        .map(|c| (VariableNames::new(c), NativeVariables::collect(project, c, settings)))
        .collect();

    let mut w = BffWriter::new();
    w.line("{");

    write_group(&mut w, "Include paths...", &variables, |n| &n.include_paths, |v| &v.include_paths);
    write_group(&mut w, "Library paths...", &variables, |n| &n.library_paths, |v| &v.library_paths);
    write_group(&mut w, "Additional libraries...", &variables, |n| &n.libraries, |v| &v.libraries);
    write_group(&mut w, "Preprocessor definitions...", &variables, |n| &n.defines, |v| &v.defines);
    write_group(&mut w, "Compiler flags...", &variables, |n| &n.compiler_flags, |v| &v.compiler_flags);
    write_group(&mut w, "Linker flags...", &variables, |n| &n.linker_flags, |v| &v.linker_flags);

    for (configuration, (names, _)) in project.configurations.iter().zip(&variables) {
        let prebuild = ctx.prebuild_dependencies(project, configuration);
        match kind {
            NativeKind::Executable | NativeKind::SharedLibrary => {
                write_linked_target(&mut w, project, kind, configuration, names, &prebuild)
            }
            NativeKind::StaticLibrary => {
                write_library_target(&mut w, project, configuration, names, &prebuild)
            }
        }
    }

    w.line(format!(
        "Alias( '{}' ) {{ .Targets = {} }}",
        escape(&project.name),
        string_array(project.target_ids())
    ));
    w.line("}");
    w.finish()
}

fn write_group<N, V>(
    w: &mut BffWriter,
    comment: &str,
    variables: &[(VariableNames, NativeVariables)],
    name: N,
    values: V,
) where
    N: Fn(&VariableNames) -> &String,
    V: Fn(&NativeVariables) -> &Vec<String>,
{
    w.comment(comment);
    for (names, vars) in variables {
        w.line(format!(".{} = {}", name(names), option_value(values(vars))));
    }
    w.blank();
}

fn write_linked_target(
    w: &mut BffWriter,
    project: &Project,
    kind: NativeKind,
    configuration: &Configuration,
    names: &VariableNames,
    prebuild: &[String],
) {
    let id = configuration.target_id(&project.name);
    let base = native_base_config(&configuration.platform);

    w.line(format!("ObjectList('{}-objs')", escape(&id)));
    w.line("{");
    w.line(format!("  Using( .{}BaseConfig )", base));
    w.line(format!("  .CompilerInputPath  = '{}'", path_value(&project.root_folder)));
    w.line(format!(
        "  .CompilerOutputPath = '{}'",
        path_value(&configuration.intermediate_folder)
    ));
    w.line(format!("  .CompilerOptions    + .{}", names.defines));
    w.line(format!("                      + .{}", names.include_paths));
    w.line(format!("                      + .{}", names.compiler_flags));
    w.line("}");
    w.blank();

    let (function, extension) = match kind {
        NativeKind::SharedLibrary => ("DLL", "dll"),
        _ => ("Executable", "exe"),
    };
    w.line(format!("{}('{}')", function, escape(&id)));
    w.line("{");
    w.line(format!("  Using( .{}BaseConfig )", base));
    w.line(format!("  .Libraries            = {{ '{}-objs' }}", escape(&id)));
    w.line(format!("  .LinkerOptions        + .{}", names.library_paths));
    w.line(format!("                        + .{}", names.linker_flags));
    w.line(format!("                        + .{}", names.libraries));
    if kind == NativeKind::SharedLibrary {
        w.line("                        + ' /DLL'");
        w.line(format!(
            "                        + ' /IMPLIB:{}'",
            quoted_path(&import_library(project, configuration))
        ));
    }
    w.line(format!(
        "  .LinkerOutput         = '{}'",
        path_value(&output_file(project, configuration, extension))
    ));
    write_prebuild(w, prebuild);
    w.line("}");
    w.blank();
}

fn write_library_target(
    w: &mut BffWriter,
    project: &Project,
    configuration: &Configuration,
    names: &VariableNames,
    prebuild: &[String],
) {
    let id = configuration.target_id(&project.name);

    w.line(format!("Library('{}')", escape(&id)));
    w.line("{");
    w.line(format!(
        "  Using( .{}BaseConfig )",
        native_base_config(&configuration.platform)
    ));
    w.line(format!("  .CompilerInputPath     = '{}'", path_value(&project.root_folder)));
    w.line("  .CompilerInputPattern  = { '*.cc', '*.cpp', '*.c' }");
    w.line(format!(
        "  .CompilerOutputPath    = '{}'",
        path_value(&configuration.intermediate_folder)
    ));
    w.line(format!("  .CompilerOptions       + .{}", names.defines));
    w.line(format!("                         + .{}", names.include_paths));
    w.line(format!("                         + .{}", names.compiler_flags));
    w.line(format!(
        "  .LibrarianOutput       = '{}'",
        path_value(&import_library(project, configuration))
    ));
    w.line(format!("  .LinkerOptions        + .{}", names.library_paths));
    w.line(format!("                        + .{}", names.linker_flags));
    w.line(format!("                        + .{}", names.libraries));
    write_prebuild(w, prebuild);
    w.line("}");
    w.blank();
}

fn write_prebuild(w: &mut BffWriter, prebuild: &[String]) {
    if !prebuild.is_empty() {
        w.line(format!("  .PreBuildDependencies = {}", string_array(prebuild)));
    }
}

/// Import library of a DLL, or archive of a static library.
fn import_library(project: &Project, configuration: &Configuration) -> PathBuf {
    match &configuration.native.import_library {
        Some(path) => path.clone(),
        None => output_file(project, configuration, "lib"),
    }
}

fn output_file(project: &Project, configuration: &Configuration, extension: &str) -> PathBuf {
    configuration.output_folder.join(format!("{}.{}", project.name, extension))
}
