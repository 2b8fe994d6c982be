//! Replays recorded placement events through a session.

use ghoststack::pallet::PlacementEvent;
use ghoststack::{PlanningSession, Result};

/// Feeds `events` to `session` in order, each confirming the next pending
/// entry. Events left over once the plan is complete are ignored.
///
/// Returns the number of events applied.
pub fn replay_events(session: &mut PlanningSession, events: &[PlacementEvent]) -> Result<usize> {
    let mut applied = 0;
    for event in events {
        match session.confirm_next(*event)? {
            Some(index) => {
                log::debug!("Entry {} confirmed with {:?}", index, event);
                applied += 1;
            }
            None => {
                log::warn!(
                    "Plan complete; ignoring {} remaining events",
                    events.len() - applied
                );
                break;
            }
        }
    }
    Ok(applied)
}
