use super::*;

const TWIPS_PER_POINT: f64 = 20.0;

pub const PART_LABEL: &str = "BWA-PART";
pub const SUBSECTION_LABEL: &str = "BWA-SUBSECTION";
pub const ITEM_LABEL: &str = "BWA-Item";
pub const LIST_LABEL: &str = "BWA-List";
pub const SUB_LIST_LABEL: &str = "BWA-SubList";

pub fn canonical_depth(level_type: LevelType) -> Option<u32> {
    match level_type {
        LevelType::Part | LevelType::PartTitle => Some(0),
        LevelType::Subsection | LevelType::SubsectionTitle => Some(1),
        LevelType::Item => Some(2),
        LevelType::List => Some(3),
        LevelType::SubList => Some(4),
        _ => None,
    }
}

pub fn style_label(level_type: LevelType) -> Option<&'static str> {
    match level_type {
        LevelType::Part | LevelType::PartTitle => Some(PART_LABEL),
        LevelType::Subsection | LevelType::SubsectionTitle => Some(SUBSECTION_LABEL),
        LevelType::Item => Some(ITEM_LABEL),
        LevelType::List => Some(LIST_LABEL),
        LevelType::SubList => Some(SUB_LIST_LABEL),
        _ => None,
    }
}

pub fn map_level(level_type: LevelType) -> (Option<u32>, Option<&'static str>) {
    match (canonical_depth(level_type), style_label(level_type)) {
        (Some(depth), Some(label)) => (Some(depth), Some(label)),
        _ => (None, None),
    }
}

pub fn list_position(label: &str, template: Option<&TemplateLevels>) -> ListPosition {
    let Some(level) = template.and_then(|template| template.levels.get(label)) else {
        return ListPosition::default();
    };

    ListPosition {
        number_alignment: level.justification.clone(),
        aligned_at: level.indent_left_twips.map(twips_to_points),
        text_indent_at: level.indent_first_line_twips.map(twips_to_points),
        follow_number_with: level.suffix.clone(),
        add_tab_stop_at: level.tab_stop_twips.map(twips_to_points),
        link_level_to_style: level.style_name.clone(),
    }
}

fn twips_to_points(value: f64) -> f64 {
    value / TWIPS_PER_POINT
}
