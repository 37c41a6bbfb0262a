use super::*;

pub fn correct_level_type(
    level_type: LevelType,
    numbering_id: Option<&str>,
    numbering_level: Option<u32>,
) -> LevelType {
    if level_type != LevelType::Content || numbering_id.is_none() {
        return level_type;
    }

    match numbering_level {
        Some(1) => LevelType::SubList,
        _ => LevelType::List,
    }
}
