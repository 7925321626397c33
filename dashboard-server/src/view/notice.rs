//! Notices shown in place of an empty departure list.

use crate::snapshot::DeparturesResponse;

/// Shown when a board has no trains and no disruption message.
pub const NO_SCHEDULED_TRAINS: &str = "No scheduled trains";

/// The notice for a board with nothing to list.
///
/// Disruption messages end with a long pointer to the National Rail
/// website, so only the text before the first full stop is kept.
pub fn board_notice(board: &DeparturesResponse) -> String {
    board
        .first_message()
        .map(|message| message.split('.').next().unwrap_or(message).trim())
        .filter(|headline| !headline.is_empty())
        .unwrap_or(NO_SCHEDULED_TRAINS)
        .to_string()
}
