//! Shared toolchain configuration for the solution descriptor.
//!
//! This is static data: the compiler definitions and the base option
//! structs that every per-configuration target pulls in with `Using( ... )`.
//! Only the installation base paths vary, and they come from
//! `[toolchain]` in the configuration.

use crate::generator::writer::{escape, BffWriter};
use crate::util::config::ToolchainSettings;

const X86_COMPILER_FILES: &[&str] = &[
    r"$Root$\c1.dll",
    r"$Root$\c1ast.dll",
    r"$Root$\c1xx.dll",
    r"$Root$\c1xxast.dll",
    r"$Root$\c2.dll",
    r"$Root$\mspft80.dll",
    r"$Root$\pgodb100.dll",
    r"$Root$\pgort100.dll",
    r"$Root$\1033\clui.dll",
    r"$VSBasePath$\VC\redist\x86\Microsoft.VC100.CRT\msvcp100.dll",
    r"$VSBasePath$\VC\redist\x86\Microsoft.VC100.CRT\msvcr100.dll",
    r"$VSBasePath$\VC\redist\x86\Microsoft.VC100.MFC\mfc100.dll",
    r"$VSBasePath$\VC\redist\x86\Microsoft.VC100.MFC\mfc100u.dll",
    r"$VSBasePath$\VC\redist\x86\Microsoft.VC100.MFC\mfcm100.dll",
    r"$VSBasePath$\VC\redist\x86\Microsoft.VC100.MFC\mfcm100u.dll",
];

const X64_COMPILER_FILES: &[&str] = &[
    r"$Root$\c1.dll",
    r"$Root$\c1xx.dll",
    r"$Root$\c2.dll",
    r"$Root$\pgodb100.dll",
    r"$Root$\pgort100.dll",
    r"$Root$\mspdb100.dll",
    r"$Root$\msobj100.dll",
    r"$Root$\mspdbcore.dll",
    r"$Root$\1033\clui.dll",
    r"$VSBasePath$\Common7\IDE\mspdbsrv.exe",
    r"$VSBasePath$\VC\redist\x64\Microsoft.VC100.CRT\msvcp100.dll",
    r"$VSBasePath$\VC\redist\x64\Microsoft.VC100.CRT\msvcr100.dll",
    r"$VSBasePath$\VC\redist\x64\Microsoft.VC100.MFC\mfc100.dll",
    r"$VSBasePath$\VC\redist\x64\Microsoft.VC100.MFC\mfc100u.dll",
    r"$VSBasePath$\VC\redist\x64\Microsoft.VC100.MFC\mfcm100.dll",
    r"$VSBasePath$\VC\redist\x64\Microsoft.VC100.MFC\mfcm100u.dll",
];

/// Name of the native base config (`.<name>BaseConfig`) for a platform.
///
/// `Win32` is Visual Studio's name for x86.
pub fn native_base_config(platform: &str) -> String {
    match platform.to_ascii_lowercase().as_str() {
        "win32" | "x86" => "x86".to_string(),
        "x64" | "amd64" => "x64".to_string(),
        _ => platform
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect(),
    }
}

/// Name of the managed base config (`.cs<name>BaseConfig`) for a platform.
///
/// Everything except x64 builds with the 32-bit framework compiler.
pub fn managed_base_config(platform: &str) -> &'static str {
    match platform.to_ascii_lowercase().as_str() {
        "x64" | "amd64" => "x64",
        _ => "x86",
    }
}

/// Write the toolchain section of the solution descriptor.
pub fn write_toolchain(w: &mut BffWriter, settings: &ToolchainSettings) {
    w.line(format!(
        ".VSBasePath         = '{}'",
        escape(settings.vs_base_path())
    ));
    w.line(format!(
        ".CSBasePath         = '{}'",
        escape(settings.cs_base_path())
    ));
    w.line(format!(
        ".WindowsSDKBasePath = '{}'",
        escape(settings.windows_sdk_base_path())
    ));
    w.blank();

    w.lines([
        "Settings",
        "{",
        "  .Environment = {",
        r"     'PATH=$VSBasePath$\Common7\IDE;$VSBasePath$\VC\bin;$VSBasePath$\VC\bin\amd64\'",
        r"     'TMP=C:\Windows\Temp'",
        r"     'SystemRoot=C:\Windows'",
        "  }",
        "}",
        "",
    ]);

    write_managed_compilers(w);
    write_native_compiler(w, "Compiler-x86", r"$VSBasePath$\VC\bin", X86_COMPILER_FILES);
    write_native_compiler(w, "Compiler-x64", r"$VSBasePath$\VC\bin\amd64", X64_COMPILER_FILES);
    write_native_configs(w);
}

fn write_managed_compilers(w: &mut BffWriter) {
    w.lines([
        "// CSharp Compiler",
        ".MSCSBaseConfig =",
        "[",
        r#"  .CompilerOptions = ' /out:"%2"'"#,
        r#"                   + ' /reference:"%3"'"#,
        "]",
        "",
        ".csx86BaseConfig =",
        "[",
        "  Using( .MSCSBaseConfig )",
        r"  .Compiler = '$CSBasePath$\Framework\v4.0.30319\csc.exe'",
        "]",
        "",
        ".csx64BaseConfig =",
        "[",
        "  Using( .MSCSBaseConfig )",
        r"  .Compiler = '$CSBasePath$\Framework64\v4.0.30319\csc.exe'",
        "]",
        "",
    ]);
}

fn write_native_compiler(w: &mut BffWriter, name: &str, root: &str, files: &[&str]) {
    if name.ends_with("x86") {
        w.comment("Compilers");
    }
    w.line(format!("Compiler('{}')", name));
    w.line("{");
    w.line(format!("  .Root       = '{}'", root));
    w.line(r"  .Executable = '$Root$\cl.exe'");
    for (i, file) in files.iter().enumerate() {
        if i == 0 {
            w.line(format!("  .ExtraFiles = {{ '{}'", file));
        } else {
            w.line(format!("                  '{}'", file));
        }
    }
    w.line("                }");
    w.line("}");
    w.blank();
}

fn write_native_configs(w: &mut BffWriter) {
    w.lines([
        "// Configurations",
        ".MSVCBaseConfig =",
        "[",
        r#"  .CompilerOptions  = '"%1"'"#,
        r#"                    + ' /Fo"%2"'"#,
        r#"                    + ' /I"$VSBasePath$/VC/include"'"#,
        r#"                    + ' /I"$VSBasePath$/VC/atlmfc/include"'"#,
        r#"                    + ' /I"$WindowsSDKBasePath$/Include"'"#,
        "",
        r#"  .LinkerOptions    = ' /OUT:"%2"'"#,
        r#"                    + ' "%1"'"#,
        "",
        r#"  .LibrarianOptions = '"%1"'"#,
        r#"                    + ' /OUT:"%2"'"#,
        "                    + ' /nologo'",
        "]",
        "",
        ".x86BaseConfig =",
        "[",
        "  Using( .MSVCBaseConfig )",
        r"  .ToolsBasePath   = '$VSBasePath$\VC\bin'",
        "  .Compiler        = 'Compiler-x86'",
        r"  .Librarian       = '$ToolsBasePath$\lib.exe'",
        r"  .Linker          = '$ToolsBasePath$\link.exe'",
        r#"  .LinkerOptions   + ' /LIBPATH:"$VSBasePath$\VC\lib"'"#,
        r#"                   + ' /LIBPATH:"$VSBasePath$\VC\atlmfc\lib"'"#,
        r#"                   + ' /LIBPATH:"$WindowsSDKBasePath$\Lib"'"#,
        "]",
        "",
        ".x64BaseConfig =",
        "[",
        "  Using( .MSVCBaseConfig )",
        r"  .ToolsBasePath   = '$VSBasePath$\VC\bin\amd64'",
        "  .Compiler        = 'Compiler-x64'",
        r"  .Librarian       = '$ToolsBasePath$\lib.exe'",
        r"  .Linker          = '$ToolsBasePath$\link.exe'",
        r#"  .LinkerOptions   + ' /LIBPATH:"$VSBasePath$\VC\lib\amd64"'"#,
        r#"                   + ' /LIBPATH:"$VSBasePath$\VC\lib"'"#,
        r#"                   + ' /LIBPATH:"$VSBasePath$\VC\atlmfc\lib\amd64"'"#,
        r#"                   + ' /LIBPATH:"$WindowsSDKBasePath$\Lib\x64"'"#,
        "]",
        "",
    ]);
}
