use knot_emit::EmitError;
use knot_graph::GraphError;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid tree shape: {0}")]
    InvalidShape(String),

    #[error("too many trees: {0} exceeds the u32 tag space")]
    TooManyTrees(usize),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

pub type SeedResult<T> = Result<T, SeedError>;
