//! The top-level error type `main` matches on to pick a process exit code.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every way a build can fail, aggregated from the pipeline crates' own
/// error boundaries plus the CLI's own output-I/O failures.
#[derive(Debug, Error)]
pub enum BundlerError {
    #[error(transparent)]
    Graph(#[from] bundler_graph::GraphError),

    #[error(transparent)]
    Codegen(#[from] bundler_codegen::CodegenError),

    #[error("failed to write {path}: {source}")]
    OutputIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BundlerError {
    /// The process exit code this error maps to, per the bundler's published
    /// exit-code table: usage=2, entry-missing=3, unresolved-module/bare-specifier=4,
    /// lex/parse=5, I/O=6, internal=70.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Graph(bundler_graph::GraphError::EntryNotFound(_)) => 3,
            Self::Graph(bundler_graph::GraphError::Resolve(_)) => 4,
            Self::Graph(bundler_graph::GraphError::Parse { .. }) => 5,
            Self::Graph(bundler_graph::GraphError::Io { .. }) | Self::OutputIo { .. } => 6,
            Self::Graph(
                bundler_graph::GraphError::PathOutsideRoot { .. }
                | bundler_graph::GraphError::ModuleIdCollision { .. },
            )
            | Self::Codegen(_) => 70,
        }
    }
}
