use thiserror::Error;

use crate::game::lane::LaneKind;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid config JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("no free tile left for {kind:?} lane: placed {placed} of {wanted}")]
    GenerationExhausted {
        kind: LaneKind,
        placed: usize,
        wanted: usize,
    },
}
