use thiserror::Error;

/// Codegen's own error boundary. Transform errors propagate through it
/// unchanged; the only error codegen can add itself is a chunk-group map
/// that somehow fails to serialize, which `plan_chunks`'s output can't
/// actually produce, but is worth a typed failure over a panic.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error(transparent)]
    Transform(#[from] bundler_transform::TransformError),

    #[error("failed to serialize the chunk-group map: {0}")]
    Serialize(#[from] serde_json::Error),
}
