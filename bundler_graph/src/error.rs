//! The graph builder's error boundary.

use std::io;
use std::path::PathBuf;

use bundler_parser::ParseError;
use bundler_resolver::ResolveError;
use thiserror::Error;

/// Everything that can make graph construction fail.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The entry path does not exist or is not readable.
    #[error("entry file not found: {0}")]
    EntryNotFound(PathBuf),

    /// Reading a module's source text failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A module's source failed to parse.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: ParseError,
    },

    /// An import or dynamic-import specifier failed to resolve.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A reached module's path falls outside the computed project root (a
    /// bundler invariant violation: the root is derived as the common
    /// ancestor of every path the BFS actually reached, so every one of them
    /// must strip against it).
    #[error("internal error: {path} is not under the project root {root}")]
    PathOutsideRoot {
        /// The path that failed to strip against `root`.
        path: PathBuf,
        /// The computed project root.
        root: PathBuf,
    },

    /// Two distinct absolute paths produced the same module id (a bundler
    /// invariant violation, not a user error).
    #[error("internal error: module id `{module_id}` was derived for both {first_path} and {second_path}")]
    ModuleIdCollision {
        /// The colliding module id.
        module_id: Box<str>,
        /// The path that first claimed this id.
        first_path: PathBuf,
        /// The distinct path that derived the same id.
        second_path: PathBuf,
    },
}
