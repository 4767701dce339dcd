use thiserror::Error;

#[derive(Debug, Error)]
pub enum NeuralError {
    #[error("cannot read actor weights: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot decode actor weights: {0}")]
    Record(String),

    #[error("{layer}: expected shape {expected:?}, found {actual:?}")]
    Shape {
        layer: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("{0} head produced no value")]
    Output(&'static str),
}
