//! The solution descriptor.
//!
//! `<solution root>/<solution name>.bff` is the file FASTBuild is pointed
//! at. It holds the toolchain definitions, includes every project
//! descriptor so that required projects come before the projects that need
//! them, and defines the umbrella `All` alias.

use crate::core::Solution;
use crate::generator::toolchain::write_toolchain;
use crate::generator::writer::{string_array, BffWriter};
use crate::generator::GenerationContext;
use crate::resolver::BuildOrder;
use crate::util::fs::{relative_path, to_slash};

/// Render the solution descriptor.
///
/// `order` decides the include order. Projects in `order` that are not
/// active in `ctx` are skipped.
pub fn render(solution: &Solution, order: &BuildOrder, ctx: &GenerationContext<'_>) -> String {
    let mut w = BffWriter::new();
    write_toolchain(&mut w, &ctx.config().toolchain);

    w.comment("Projects");
    for name in order.names() {
        let Some(project) = solution.project(name).filter(|p| ctx.is_active(&p.name)) else {
            continue;
        };
        let include = relative_path(&solution.root, &project.descriptor_path());
        w.line(format!("#include \"{}\"", to_slash(&include)));
    }
    w.blank();

    let all = solution
        .projects
        .iter()
        .filter(|p| ctx.is_active(&p.name))
        .map(|p| p.name.as_str());
    w.line(format!("Alias('All') {{ .Targets = {} }}", string_array(all)));
    w.finish()
}
