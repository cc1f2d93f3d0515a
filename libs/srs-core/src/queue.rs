//! Due-card selection.

use chrono::NaiveDate;

use crate::types::CardSchedule;

/// Ids of the cards whose next review date has arrived.
///
/// Pure filter: keeps every card with `next_review <= as_of`, in input
/// order. An empty result is a valid answer, not an error.
pub fn due_cards<Id, I>(cards: I, as_of: NaiveDate) -> Vec<Id>
where
    I: IntoIterator<Item = (Id, CardSchedule)>,
{
    cards
        .into_iter()
        .filter(|(_, schedule)| schedule.is_due(as_of))
        .map(|(id, _)| id)
        .collect()
}
