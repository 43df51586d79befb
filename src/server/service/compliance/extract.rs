//! Regex extractors over OCR'd plan text.
//!
//! Each extractor is isolated: it either finds typed measurements or returns
//! an empty result, never an error, so one malformed category cannot abort
//! the whole rule-based pass. Values are normalized to metres and filtered
//! through per-kind plausibility windows to drop OCR noise.

use std::sync::LazyLock;

use regex::Regex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DimensionKind {
    LintelLevel,
    WallPlateLevel,
    MaxRoofHeight,
    CeilingHeight,
    ClearHeight,
    FloorToCeiling,
    GeneralHeight,
}

/// One measurement found in the text, in metres.
#[derive(Clone, Debug, PartialEq)]
pub struct Dimension {
    pub value: f64,
    pub kind: DimensionKind,
}

impl Dimension {
    /// Whether this dimension describes a room height
    pub fn is_room_height(&self) -> bool {
        matches!(
            self.kind,
            DimensionKind::CeilingHeight
                | DimensionKind::ClearHeight
                | DimensionKind::FloorToCeiling
                | DimensionKind::GeneralHeight
        )
    }
}

struct DimensionPattern {
    regex: &'static LazyLock<Regex>,
    kind: DimensionKind,
    min: f64,
    max: f64,
}

static LINTEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:lintel(?:\s*(?:level|height))?|LL|L\.L\.)\b[^\d]*(\d+(?:[.,]\d+)?)\s*(mm|m)?\b")
        .unwrap()
});

static WALL_PLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:wall\s*plate(?:\s*(?:level|height))?|WP|W\.P\.)\b[^\d]*(\d+(?:[.,]\d+)?)\s*(mm|m)?\b")
        .unwrap()
});

static MAX_ROOF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:max(?:imum)?\s*(?:roof\s*)?height|roof\s*height|MRH|M\.R\.H\.)\b[^\d]*(\d+(?:[.,]\d+)?)\s*(mm|m)?\b")
        .unwrap()
});

static CEILING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bceiling\s*(?:height)?\s*(?:of|is|:|=|-)?\s*(\d+(?:[.,]\d+)?)\s*(mm|m|meters?|metres?)\b")
        .unwrap()
});

static CLEAR_HEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bclear\s*height\s*(?:of|is|:|=|-)?\s*(\d+(?:[.,]\d+)?)\s*(mm|m|meters?|metres?)\b")
        .unwrap()
});

static FLOOR_TO_CEILING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfloor\s*(?:to|-)\s*ceiling\s*(?:height)?\s*(?:of|is|:|=|-)?\s*(\d+(?:[.,]\d+)?)\s*(mm|m|meters?|metres?)\b")
        .unwrap()
});

static GENERAL_HEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bheight\s*(?:of|is|:|=)?\s*(\d+(?:[.,]\d+)?)\s*(mm|m|meters?|metres?)\b")
        .unwrap()
});

static TRAILING_HEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+(?:[.,]\d+)?)\s*(mm|m|meters?|metres?)\s*(?:height|tall|high)\b")
        .unwrap()
});

static PATTERNS: &[DimensionPattern] = &[
    DimensionPattern {
        regex: &LINTEL,
        kind: DimensionKind::LintelLevel,
        min: 1.5,
        max: 3.0,
    },
    DimensionPattern {
        regex: &WALL_PLATE,
        kind: DimensionKind::WallPlateLevel,
        min: 2.0,
        max: 4.0,
    },
    DimensionPattern {
        regex: &MAX_ROOF,
        kind: DimensionKind::MaxRoofHeight,
        min: 2.5,
        max: 10.0,
    },
    DimensionPattern {
        regex: &CEILING,
        kind: DimensionKind::CeilingHeight,
        min: 2.0,
        max: 5.0,
    },
    DimensionPattern {
        regex: &CLEAR_HEIGHT,
        kind: DimensionKind::ClearHeight,
        min: 2.0,
        max: 5.0,
    },
    DimensionPattern {
        regex: &FLOOR_TO_CEILING,
        kind: DimensionKind::FloorToCeiling,
        min: 2.0,
        max: 5.0,
    },
    DimensionPattern {
        regex: &GENERAL_HEIGHT,
        kind: DimensionKind::GeneralHeight,
        min: 0.1,
        max: 10.0,
    },
    DimensionPattern {
        regex: &TRAILING_HEIGHT,
        kind: DimensionKind::GeneralHeight,
        min: 0.1,
        max: 10.0,
    },
];

fn parse_value(raw: &str, unit: Option<&str>) -> Option<f64> {
    let value: f64 = raw.replace(',', ".").parse().ok()?;

    match unit {
        Some(unit) if unit.eq_ignore_ascii_case("mm") => Some(value / 1000.0),
        _ => Some(value),
    }
}

/// Extracts typed height measurements from the text
pub fn extract_dimensions(text: &str) -> Vec<Dimension> {
    let mut dimensions = Vec::new();

    for pattern in PATTERNS {
        for captures in pattern.regex.captures_iter(text) {
            let raw = match captures.get(1) {
                Some(m) => m.as_str(),
                None => continue,
            };
            let unit = captures.get(2).map(|m| m.as_str());

            if let Some(value) = parse_value(raw, unit) {
                if value >= pattern.min && value <= pattern.max {
                    dimensions.push(Dimension {
                        value,
                        kind: pattern.kind,
                    });
                }
            }
        }
    }

    dimensions
}

static AREA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:sq\.?\s*m\b|square\s+met(?:er|re)s?|m2\b|m²)").unwrap()
});

/// Extracts floor areas in square metres
pub fn extract_areas(text: &str) -> Vec<f64> {
    AREA.captures_iter(text)
        .filter_map(|captures| captures.get(1)?.as_str().parse().ok())
        .collect()
}

static STOREY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:building|structure)\s+with\s+(\d+)\s+(?:floor|storey|story|level)s?",
        r"(?i)(\d+)[\s-](?:floor|storey|story|level)\s+(?:building|structure)",
        r"(?i)(\d+)[\s-]store(?:y|ys|ies)\b",
        r"(?i)(?:floor|storey|story|level)s?:\s*(\d+)",
        r"(?i)(?:number\s+of|total)\s+(?:floor|storey|story|level)s?:\s*(\d+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Extracts storey counts
pub fn extract_storey_counts(text: &str) -> Vec<u32> {
    let mut storeys = Vec::new();

    for pattern in STOREY_PATTERNS.iter() {
        for captures in pattern.captures_iter(text) {
            if let Some(value) = captures.get(1).and_then(|m| m.as_str().parse().ok()) {
                storeys.push(value);
            }
        }
    }

    storeys
}

/// Structural heights read off elevation/section drawings. The wall plate
/// level doubles as the ceiling height in standard construction; without it
/// the lintel level plus 0.3 m is a conservative estimate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructuralHeights {
    pub lintel_level: Option<f64>,
    pub wall_plate_level: Option<f64>,
    pub max_roof_height: Option<f64>,
}

impl StructuralHeights {
    pub fn has_any(&self) -> bool {
        self.lintel_level.is_some()
            || self.wall_plate_level.is_some()
            || self.max_roof_height.is_some()
    }

    pub fn implied_room_height(&self) -> Option<f64> {
        match (self.wall_plate_level, self.lintel_level) {
            (Some(wall_plate), _) => Some(wall_plate),
            (None, Some(lintel)) => Some(lintel + 0.3),
            (None, None) => None,
        }
    }
}

/// Extracts lintel level, wall plate level and maximum roof height
pub fn extract_structural_heights(text: &str) -> StructuralHeights {
    let dimensions = extract_dimensions(text);

    let first_of = |kind: DimensionKind| {
        dimensions
            .iter()
            .find(|d| d.kind == kind)
            .map(|d| d.value)
    };

    StructuralHeights {
        lintel_level: first_of(DimensionKind::LintelLevel),
        wall_plate_level: first_of(DimensionKind::WallPlateLevel),
        max_roof_height: first_of(DimensionKind::MaxRoofHeight),
    }
}

/// One window or door entry in a schedule table.
#[derive(Clone, Debug)]
pub struct ScheduleItem {
    pub id: String,
    pub has_dimensions: bool,
    pub material: Option<String>,
    pub fire_rating: Option<String>,
    pub has_ventilation_details: bool,
    pub has_natural_light_details: bool,
}

/// Window and door schedule information extracted from the text.
#[derive(Clone, Debug, Default)]
pub struct ScheduleInfo {
    pub has_window_schedule: bool,
    pub has_door_schedule: bool,
    pub windows: Vec<ScheduleItem>,
    pub doors: Vec<ScheduleItem>,
    pub has_ventilation_info: bool,
    pub has_natural_light_info: bool,
}

impl ScheduleInfo {
    pub fn has_schedule(&self) -> bool {
        self.has_window_schedule || self.has_door_schedule
    }

    pub fn ventilation_requirements_met(&self) -> bool {
        self.has_ventilation_info || self.windows.iter().any(|w| w.has_ventilation_details)
    }

    pub fn natural_light_requirements_met(&self) -> bool {
        self.has_natural_light_info || self.windows.iter().any(|w| w.has_natural_light_details)
    }
}

static WINDOW_SCHEDULE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:window|fenestration)\s*(?:schedule|specification|details|list|table)\b|\bschedule\s+of\s+(?:windows|glazing)\b",
    )
    .unwrap()
});

static DOOR_SCHEDULE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bdoor\s*(?:schedule|specification|details|list|table)\b|\bschedule\s+of\s+doors\b")
        .unwrap()
});

static WINDOW_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b((?:WINDOW|WO|W)\s*-?\s*\d+)\b([^,;\n]*)").unwrap());

static DOOR_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b((?:DOOR|DO|D)\s*-?\s*\d+)\b([^,;\n]*)").unwrap());

static ITEM_DIMENSIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:width|height|\bw\b|\bh\b|\bht\b)\s*[=:]*\s*\d+|(?:\d+(?:\.\d+)?)\s*(?:x|×|by)\s*(?:\d+(?:\.\d+)?)")
        .unwrap()
});

static VENTILATION_INFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:ventilation|air\s*flow|air\s*circulation|opening\s*area|opening\s*percentage|openable(?:\s*area)?)\b")
        .unwrap()
});

static NATURAL_LIGHT_INFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:natural\s*light|daylight|light\s*transmission|glazing(?:\s*area)?|window\s*to\s*floor\s*ratio)\b")
        .unwrap()
});

static FIRE_RATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfire[\s-]*(?:rated|resistance|resistant)\b").unwrap()
});

fn material_in(details: &str, kinds: &[&str]) -> Option<String> {
    let lower = details.to_lowercase();
    kinds
        .iter()
        .find(|kind| lower.contains(*kind))
        .map(|kind| kind.to_string())
}

fn fire_rating_in(details: &str) -> Option<String> {
    let lower = details.to_lowercase();

    for minutes in ["30", "60", "90"] {
        if lower.contains(&format!("fr{}", minutes))
            || lower.contains(&format!("fr {}", minutes))
            || lower.contains(&format!("{} min", minutes))
            || lower.contains(&format!("{}min", minutes))
        {
            return Some(format!("FR{}", minutes));
        }
    }

    if FIRE_RATED.is_match(details) {
        return Some("Fire Rated (unspecified)".to_string());
    }

    None
}

fn collect_items(regex: &Regex, text: &str, materials: &[&str], doors: bool) -> Vec<ScheduleItem> {
    let mut items = Vec::new();
    let mut seen = Vec::new();

    for captures in regex.captures_iter(text) {
        let id = match captures.get(1) {
            Some(m) => m.as_str().to_uppercase(),
            None => continue,
        };
        let details = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

        if seen.contains(&id) {
            continue;
        }
        seen.push(id.clone());

        items.push(ScheduleItem {
            id,
            has_dimensions: ITEM_DIMENSIONS.is_match(details),
            material: material_in(details, materials),
            fire_rating: if doors { fire_rating_in(details) } else { None },
            has_ventilation_details: VENTILATION_INFO.is_match(details),
            has_natural_light_details: NATURAL_LIGHT_INFO.is_match(details),
        });
    }

    items
}

/// Extracts window/door schedule structure. A schedule without a header but
/// with identifiable entries still counts as present.
pub fn extract_schedule_info(text: &str) -> ScheduleInfo {
    let windows = collect_items(
        &WINDOW_ITEM,
        text,
        &["aluminum", "aluminium", "timber", "wood", "upvc", "pvc", "steel"],
        false,
    );
    let doors = collect_items(
        &DOOR_ITEM,
        text,
        &["timber", "wood", "steel", "aluminum", "aluminium", "glass", "upvc", "pvc"],
        true,
    );

    ScheduleInfo {
        has_window_schedule: WINDOW_SCHEDULE_HEADER.is_match(text) || !windows.is_empty(),
        has_door_schedule: DOOR_SCHEDULE_HEADER.is_match(text) || !doors.is_empty(),
        windows,
        doors,
        has_ventilation_info: VENTILATION_INFO.is_match(text),
        has_natural_light_info: NATURAL_LIGHT_INFO.is_match(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect typed heights with mm values normalized to metres
    #[test]
    fn extracts_typed_dimensions() {
        let text = "Ceiling height of 2.5m throughout. LINTEL LEVEL 2100mm, wall plate level 2.4m.";
        let dimensions = extract_dimensions(text);

        assert!(dimensions
            .iter()
            .any(|d| d.kind == DimensionKind::CeilingHeight && (d.value - 2.5).abs() < 1e-9));
        assert!(dimensions
            .iter()
            .any(|d| d.kind == DimensionKind::LintelLevel && (d.value - 2.1).abs() < 1e-9));
        assert!(dimensions
            .iter()
            .any(|d| d.kind == DimensionKind::WallPlateLevel && (d.value - 2.4).abs() < 1e-9));
    }

    /// Expect implausible values for a kind to be dropped
    #[test]
    fn drops_implausible_values() {
        let dimensions = extract_dimensions("lintel level 9.5m");

        assert!(dimensions
            .iter()
            .all(|d| d.kind != DimensionKind::LintelLevel));
    }

    /// Expect no matches on irrelevant text
    #[test]
    fn empty_on_no_measurements() {
        assert!(extract_dimensions("a short note about paperwork").is_empty());
        assert!(extract_areas("nothing here").is_empty());
        assert!(extract_storey_counts("nothing here").is_empty());
    }

    #[test]
    fn extracts_areas() {
        let areas = extract_areas("Bedroom 1: 12.5 sq m, Bedroom 2: 9 m2, lounge 20 m²");

        assert_eq!(areas, vec![12.5, 9.0, 20.0]);
    }

    #[test]
    fn extracts_storey_counts() {
        let storeys = extract_storey_counts("A double storey building. Structure with 2 floors.");

        assert!(storeys.contains(&2));
    }

    /// Expect wall plate level to imply the room height, with the lintel
    /// estimate as fallback
    #[test]
    fn structural_heights_imply_room_height() {
        let with_wall_plate = extract_structural_heights("wall plate level 2.4m, LINTEL 2.1m");
        assert_eq!(with_wall_plate.implied_room_height(), Some(2.4));

        let lintel_only = extract_structural_heights("LINTEL LEVEL 2.1m");
        assert!(lintel_only.has_any());
        let implied = lintel_only.implied_room_height().unwrap();
        assert!((implied - 2.4).abs() < 1e-9);
    }

    /// Expect schedule detection from entries alone, without a header
    #[test]
    fn schedule_from_entries_without_header() {
        let info = extract_schedule_info("WO1 900 x 1200 aluminium kitchen, DO1 813 x 2032 timber");

        assert!(info.has_schedule());
        assert_eq!(info.windows.len(), 1);
        assert_eq!(info.doors.len(), 1);
        assert!(info.windows[0].has_dimensions);
        assert_eq!(info.windows[0].material.as_deref(), Some("aluminium"));
        assert_eq!(info.doors[0].material.as_deref(), Some("timber"));
    }

    /// Expect door fire ratings to be picked up from schedule details
    #[test]
    fn door_fire_ratings() {
        let info = extract_schedule_info("DOOR SCHEDULE: DO1 steel FR30 entrance");

        assert_eq!(info.doors[0].fire_rating.as_deref(), Some("FR30"));
    }

    /// Expect ventilation/natural light mentions to satisfy the schedule
    /// requirements
    #[test]
    fn ventilation_and_light_requirements() {
        let info = extract_schedule_info(
            "WINDOW SCHEDULE: WO1 900x1200 openable area 40%, glazing area 15% of floor",
        );

        assert!(info.ventilation_requirements_met());
        assert!(info.natural_light_requirements_met());
    }
}
