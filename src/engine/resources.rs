//! The resource ledger.
//!
//! Costs are paid from two pools: floating resources left over from
//! earlier payments this turn, then pitch value from caller-chosen hand
//! cards. Floating is fungible and spent first; pitched cards move to the
//! pitched-this-turn zone and any excess pitch value over the remaining
//! cost becomes new floating resource (overpitch).
//!
//! The caller chooses *which* cards to pitch; the ledger only requires
//! that their total value covers what floating does not.

use crate::cards::CardId;
use crate::core::{CardSelection, GameState, PlayerId};
use crate::zones::Zone;

use super::error::EngineError;

/// Receipt for one paid cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PitchReceipt {
    /// Total pitch value of the cards pitched.
    pub pitch_sum: i64,

    /// How much of the cost floating resources covered.
    pub from_floating: i64,
}

/// Pay `cost` for `payer`, spending floating first and pitching
/// `selection` from hand for the remainder.
///
/// Fails with `InsufficientResources` when floating plus the selection's
/// pitch value cannot cover the cost, and with `IllegalAction` when a
/// selected card is not in the payer's hand. On failure nothing moves.
pub fn consume(
    state: &mut GameState,
    payer: PlayerId,
    selection: &CardSelection,
    cost: i64,
) -> Result<PitchReceipt, EngineError> {
    let mut pitch_sum = 0;
    for &id in selection {
        if !state.player(payer).zones.hand.contains(&id) {
            return Err(EngineError::illegal(format!("pitch card {id} is not in hand")));
        }
        pitch_sum += pitch_value(state, id)?;
    }

    let floating = state.player(payer).floating;
    let available = floating + pitch_sum;
    if available < cost {
        return Err(EngineError::InsufficientResources { needed: cost, available });
    }

    let from_floating = floating.min(cost);
    let remaining = cost - from_floating;

    let player = state.player_mut(payer);
    for &id in selection {
        player.zones.transfer(id, Zone::Hand, Zone::Pitched);
    }
    player.floating = floating - from_floating + (pitch_sum - remaining);

    Ok(PitchReceipt { pitch_sum, from_floating })
}

fn pitch_value(state: &GameState, id: CardId) -> Result<i64, EngineError> {
    state
        .card(id)
        .map(|c| c.pitch)
        .ok_or_else(|| EngineError::invariant(format!("card {id} in a zone but missing from the card table")))
}
