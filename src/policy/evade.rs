//! Threat evasion.
//!
//! Survival overrides economy: if the nearest enemy Knight is inside the
//! danger radius, the Queen runs straight away from it and nothing else is
//! considered this turn.

use tracing::debug;

use crate::board::Snapshot;
use crate::protocol::QueenCommand;

/// Returns a retreat order, or `None` to defer to the build policy.
///
/// The `MOVE` carries the raw vector from the threat to the Queen; the
/// referee clamps how far she actually travels.
pub fn decide(snapshot: &Snapshot, danger_radius: f64) -> Option<QueenCommand> {
    let knight = snapshot.nearest_enemy_knight()?;
    if knight.distance >= danger_radius {
        return None;
    }
    let away = snapshot.player.position.away_from(knight.position);
    debug!(
        distance = knight.distance,
        knight = ?knight.position,
        "evading enemy knight"
    );
    Some(QueenCommand::Move(away))
}
