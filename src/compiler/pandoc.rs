//! Pandoc (or any compiler with pandoc's `<input> -o <output>` calling
//! convention).

use super::{CompileReport, DocumentCompiler, OutputSpec};
use crate::log;
use crate::utils::exec::{Cmd, format_error, output_lines};
use std::path::{Path, PathBuf};

/// External compiler invocation.
#[derive(Debug, Clone)]
pub struct Pandoc {
    program: String,
    output: OutputSpec,
    /// Forwarded verbatim after the output path.
    extra_args: Vec<String>,
}

impl Pandoc {
    pub fn new(program: impl Into<String>, output: OutputSpec, extra_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            output,
            extra_args,
        }
    }

    /// Command line for one compile.
    fn command(&self, source: &Path, output: &Path) -> Cmd {
        Cmd::new(&self.program)
            .arg(source)
            .arg("-o")
            .arg(output)
            .args(&self.extra_args)
    }
}

impl DocumentCompiler for Pandoc {
    fn output_for(&self, source: &Path) -> PathBuf {
        self.output.resolve(source)
    }

    fn compile(&self, source: &Path) -> CompileReport {
        let output = self.output_for(source);

        if which::which(&self.program).is_err() {
            return CompileReport::failed(
                output,
                format!("`{}` not found in PATH", self.program),
            );
        }

        let result = match self.command(source, &output).output() {
            Ok(result) => result,
            Err(e) => return CompileReport::failed(output, format!("{e:#}")),
        };

        if !result.status.success() {
            let msg = format_error(&self.program, &result);
            return CompileReport::failed(output, msg);
        }

        // warnings from a successful run
        let stderr = String::from_utf8_lossy(&result.stderr);
        let lines = output_lines(&stderr);
        if !lines.is_empty() {
            log!("pandoc"; "{}", lines.join("\n"));
        }

        CompileReport::ok(output)
    }
}
