use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph6 input is empty")]
    EmptyInput,

    /// A byte outside the printable graph6 range `63..=126`.
    #[error("invalid graph6 byte {byte:#04x} at position {position}")]
    InvalidByte { position: usize, byte: u8 },

    #[error("graph order {0} exceeds the graph6 limit")]
    OrderTooLarge(u64),

    #[error("graph6 body has {found} bytes, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("vertex {vertex} does not exist in a graph of order {order}")]
    VertexOutOfRange { vertex: usize, order: usize },

    #[error("self-loop on vertex {0} is not allowed")]
    SelfLoop(usize),

    #[error("invalid adjacency: {0}")]
    InvalidAdjacency(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
