use super::*;

const LIST_NUMBER_MAX: u32 = 99;
const LIST_NUMBER_MAX_STEP: u32 = 10;

pub fn assess_numbering(
    detected_number: &str,
    level_type: LevelType,
    previous: Option<&ContentBlock>,
) -> Plausibility {
    let previous_number = previous
        .filter(|block| block.level_type == level_type)
        .and_then(|block| block.number.as_deref());

    match level_type {
        LevelType::Item => assess_item_letter(detected_number, previous_number),
        LevelType::List => assess_list_number(detected_number, previous_number),
        _ => Plausibility::Unknown,
    }
}

fn assess_item_letter(detected: &str, previous: Option<&str>) -> Plausibility {
    let Some(ordinal) = letter_ordinal(detected) else {
        return Plausibility::Implausible;
    };

    match previous.and_then(letter_ordinal) {
        Some(previous_ordinal) if ordinal > previous_ordinal => Plausibility::Confirmed,
        Some(_) => Plausibility::Implausible,
        None if ordinal == 1 => Plausibility::Confirmed,
        None => Plausibility::Unknown,
    }
}

fn assess_list_number(detected: &str, previous: Option<&str>) -> Plausibility {
    let Ok(number) = detected.parse::<u32>() else {
        return Plausibility::Implausible;
    };
    if !(1..=LIST_NUMBER_MAX).contains(&number) {
        return Plausibility::Implausible;
    }

    match previous.and_then(|value| value.parse::<u32>().ok()) {
        Some(previous_number)
            if number > previous_number && number <= previous_number + LIST_NUMBER_MAX_STEP =>
        {
            Plausibility::Confirmed
        }
        Some(_) => Plausibility::Implausible,
        None if number == 1 => Plausibility::Confirmed,
        None => Plausibility::Unknown,
    }
}

fn letter_ordinal(value: &str) -> Option<u32> {
    let mut chars = value.chars();
    let ch = chars.next()?;
    if chars.next().is_some() || !ch.is_ascii_uppercase() {
        return None;
    }
    Some(u32::from(ch) - u32::from('A') + 1)
}
