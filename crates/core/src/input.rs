use crate::GameError;

/// Parses 1-based hand positions such as `"1 3"`, `"2,4"` or `"1-3"` into 0-based
/// indices, keeping the typed order.
pub fn parse_indices(input: &str, hand_len: usize) -> Result<Vec<usize>, GameError> {
    let mut indices = Vec::new();
    for part in input.split(|c: char| c.is_whitespace() || c == ',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some((start, end)) = part.split_once('-') {
            let start = parse_position(start, hand_len)?;
            let end = parse_position(end, hand_len)?;
            if start > end {
                return Err(GameError::InputMalformed(format!(
                    "range '{part}' runs backwards"
                )));
            }
            indices.extend(start..=end);
        } else {
            indices.push(parse_position(part, hand_len)?);
        }
    }
    if indices.is_empty() {
        return Err(GameError::InputMalformed("no cards selected".to_string()));
    }
    Ok(indices)
}

fn parse_position(token: &str, hand_len: usize) -> Result<usize, GameError> {
    let token = token.trim();
    let position = token
        .parse::<usize>()
        .map_err(|_| GameError::InputMalformed(format!("'{token}' is not a card number")))?;
    if position == 0 || position > hand_len {
        return Err(GameError::InputMalformed(format!(
            "card {position} is not in your hand (1-{hand_len})"
        )));
    }
    Ok(position - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_separators_in_order() {
        assert_eq!(parse_indices("3 1,2", 5).unwrap(), vec![2, 0, 1]);
    }

    #[test]
    fn expands_ranges() {
        assert_eq!(parse_indices("2-4", 5).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn rejects_bad_tokens() {
        assert!(matches!(
            parse_indices("1 x", 5),
            Err(GameError::InputMalformed(_))
        ));
        assert!(matches!(
            parse_indices("0", 5),
            Err(GameError::InputMalformed(_))
        ));
        assert!(matches!(
            parse_indices("6", 5),
            Err(GameError::InputMalformed(_))
        ));
        assert!(matches!(
            parse_indices("4-2", 5),
            Err(GameError::InputMalformed(_))
        ));
        assert!(matches!(
            parse_indices("  ", 5),
            Err(GameError::InputMalformed(_))
        ));
    }
}
