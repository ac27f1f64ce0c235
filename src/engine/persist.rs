use super::position::Position;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored position is malformed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("stored position is not finite: ({x}, {y})")]
    NonFinite { x: f32, y: f32 },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Load-at-start / save-on-change persistence of the last pad position.
pub trait PositionStore {
    fn load(&self) -> Result<Option<Position>, StoreError>;
    fn save(&self, position: Position) -> Result<(), StoreError>;
}

pub fn encode_position(position: Position) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&position.clamped())?)
}

/// Decode a stored `{"x":..,"y":..}` pair, clamped into the pad range.
pub fn decode_position(raw: &str) -> Result<Position, StoreError> {
    let p: Position = serde_json::from_str(raw)?;
    if !p.x.is_finite() || !p.y.is_finite() {
        return Err(StoreError::NonFinite { x: p.x, y: p.y });
    }
    Ok(p.clamped())
}

/// Restore the last position, falling back to the pad center on any error.
pub fn restore_or_center<S: PositionStore + ?Sized>(store: &S) -> Position {
    match store.load() {
        Ok(Some(p)) => {
            log::info!("[store] restored position ({:.1},{:.1})", p.x, p.y);
            p
        }
        Ok(None) => Position::CENTER,
        Err(e) => {
            log::warn!("[store] ignoring stored position: {}", e);
            Position::CENTER
        }
    }
}
