use super::*;

/// Picks cards out of `hand` by 0-based index, in the order given. The hand itself is
/// left as is.
pub(super) fn select_cards(hand: &[Card], indices: &[usize]) -> Result<Vec<Card>, GameError> {
    if indices.is_empty() {
        return Err(GameError::InputMalformed("no cards selected".to_string()));
    }
    let mut seen = Vec::with_capacity(indices.len());
    let mut picked = Vec::with_capacity(indices.len());
    for &idx in indices {
        let Some(card) = hand.get(idx) else {
            return Err(GameError::InputMalformed(format!(
                "card {} is not in your hand",
                idx + 1
            )));
        };
        if seen.contains(&idx) {
            return Err(GameError::InputMalformed(format!(
                "card {} selected twice",
                idx + 1
            )));
        }
        seen.push(idx);
        picked.push(*card);
    }
    Ok(picked)
}

pub(super) fn describe(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.name())
        .collect::<Vec<_>>()
        .join(", ")
}
