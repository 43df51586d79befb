//! The deterministic rule-based compliance pass.
//!
//! Seven categories of checks run over the extracted text. Every check
//! carries a [`CheckBasis`] naming how its verdict was reached: a strict
//! measurement comparison, a keyword-inferred fallback, or a document-type
//! assumption. The fallbacks keep well-formed but irregularly phrased
//! documents from failing outright while staying visible in the result.

use std::sync::LazyLock;

use regex::Regex;

use crate::server::service::compliance::{
    extract::{
        extract_areas, extract_dimensions, extract_schedule_info, extract_storey_counts,
        extract_structural_heights,
    },
    standards::BuildingStandards,
};

/// How a rule check arrived at its verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckBasis {
    /// An extracted measurement was compared against a threshold.
    StrictMeasurement,
    /// Keyword co-occurrence stood in for a missing measurement.
    KeywordInferred,
    /// The document's apparent type (plan drawing) justified an assumption.
    DocumentTypeAssumed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCategory {
    Heights,
    Areas,
    Storeys,
    FireSafety,
    Ventilation,
    StructuralHeights,
    Schedules,
}

#[derive(Clone, Debug)]
pub struct RuleCheck {
    pub category: RuleCategory,
    pub name: &'static str,
    pub basis: CheckBasis,
    pub passed: bool,
    pub message: Option<String>,
}

/// The tallied result of the rule-based pass.
#[derive(Clone, Debug, Default)]
pub struct RuleOutcome {
    pub checks: Vec<RuleCheck>,
}

impl RuleOutcome {
    pub fn passed(&self) -> u32 {
        self.checks.iter().filter(|c| c.passed).count() as u32
    }

    pub fn total(&self) -> u32 {
        self.checks.len() as u32
    }

    /// passed/total as a percentage; an empty pass counts as fully compliant
    pub fn percentage(&self) -> f64 {
        if self.checks.is_empty() {
            return 100.0;
        }

        f64::from(self.passed()) / f64::from(self.total()) * 100.0
    }

    /// Messages of failed checks
    pub fn issues(&self) -> Vec<String> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .filter_map(|c| c.message.clone())
            .collect()
    }

    /// Explanatory notes attached to conditional (non-strict) passes
    pub fn fallback_notes(&self) -> Vec<String> {
        self.checks
            .iter()
            .filter(|c| c.passed && c.basis != CheckBasis::StrictMeasurement)
            .filter_map(|c| c.message.clone())
            .collect()
    }

    fn record(
        &mut self,
        category: RuleCategory,
        name: &'static str,
        basis: CheckBasis,
        passed: bool,
        message: Option<String>,
    ) {
        self.checks.push(RuleCheck {
            category,
            name,
            basis,
            passed,
            message,
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BuildingType {
    Dwelling,
    Shop,
    Other,
}

impl BuildingType {
    fn label(&self) -> &'static str {
        match self {
            BuildingType::Dwelling => "dwelling",
            BuildingType::Shop => "shop",
            BuildingType::Other => "other building",
        }
    }
}

static SHOP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:shop|retail|store|commercial)\b").unwrap());

static OTHER_BUILDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:office|public|institutional)\b").unwrap());

static RESIDENTIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:house|home|dwelling|residential)\b").unwrap());

static ROOM_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:room|bedroom|kitchen|bathroom|living|dining|hall|space)\b").unwrap()
});

static HEIGHT_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:height|tall|high|ceiling)\b").unwrap());

static PLAN_DOCUMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:plan|drawing)\b").unwrap());

static ARCHITECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\barchitect").unwrap());

static PAIRED_DIMENSIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*(?:m|meters?|metres?)\s*[x×]\s*\d+(?:\.\d+)?\s*(?:m|meters?|metres?)\b")
        .unwrap()
});

static STANDARD_ROOMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:bedroom|living room|dining room|kitchen|family room)\b").unwrap()
});

static ANY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*(?:m|meters?|metres?)?\b").unwrap());

static FIRE_SAFETY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:fire|safety|emergency|exit|escape|alarm|sprinkler|extinguisher)\b")
        .unwrap()
});

static VENTILATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:ventilation|air|window|opening|fresh)\b").unwrap()
});

static ELEVATION_DRAWINGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:elevation|elevations|north|south|east|west)\s*(?:elevation|view|facade)\b")
        .unwrap()
});

static SECTION_DRAWINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:section|sections)\b").unwrap());

static ELEVATION_HEIGHT_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:elevation|section)\b.*\b(?:height|tall|high)\b").unwrap()
});

static STRUCTURAL_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:lintel|wall\s*plate|max(?:imum)?\s*(?:roof\s*)?height|roof\s*height)\b")
        .unwrap()
});

fn classify_building(text: &str) -> BuildingType {
    if SHOP.is_match(text) {
        return BuildingType::Shop;
    }
    if RESIDENTIAL.is_match(text) {
        return BuildingType::Dwelling;
    }
    if OTHER_BUILDING.is_match(text) {
        return BuildingType::Other;
    }
    BuildingType::Dwelling
}

/// Default structural heights assumed for plan drawings that carry the terms
/// without legible values.
const ASSUMED_LINTEL_LEVEL: f64 = 2.1;
const ASSUMED_WALL_PLATE_LEVEL: f64 = 2.4;
const ASSUMED_MAX_ROOF_HEIGHT: f64 = 3.5;

/// Runs the full rule-based pass over the extracted text
pub fn run_rule_checks(text: &str, standards: &BuildingStandards) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    let building_type = classify_building(text);
    let min_habitable = match building_type {
        BuildingType::Dwelling => standards.clear_heights.habitable_dwellings,
        BuildingType::Shop => standards.clear_heights.habitable_shops,
        BuildingType::Other => standards.clear_heights.habitable_other,
    };

    let dimensions = extract_dimensions(text);
    let areas = extract_areas(text);
    let storeys = extract_storey_counts(text);
    let mut structural = extract_structural_heights(text);
    let schedule = extract_schedule_info(text);

    // 1. Room heights
    let room_heights: Vec<f64> = dimensions
        .iter()
        .filter(|d| d.is_room_height())
        .map(|d| d.value)
        .collect();

    if !room_heights.is_empty() {
        for height in &room_heights {
            if *height < standards.clear_heights.access_areas_min {
                outcome.record(
                    RuleCategory::Heights,
                    "access_area_height",
                    CheckBasis::StrictMeasurement,
                    false,
                    Some(format!(
                        "Found room height of {}m, which is below the minimum access area height of {}m",
                        height, standards.clear_heights.access_areas_min
                    )),
                );
            } else if *height < standards.clear_heights.non_habitable {
                outcome.record(
                    RuleCategory::Heights,
                    "non_habitable_height",
                    CheckBasis::StrictMeasurement,
                    false,
                    Some(format!(
                        "Found room height of {}m, which is below the minimum non-habitable room height of {}m",
                        height, standards.clear_heights.non_habitable
                    )),
                );
            } else if *height < min_habitable {
                outcome.record(
                    RuleCategory::Heights,
                    "habitable_height",
                    CheckBasis::StrictMeasurement,
                    false,
                    Some(format!(
                        "Found room height of {}m, which is below the minimum habitable room height of {}m for {}s",
                        height,
                        min_habitable,
                        building_type.label()
                    )),
                );
            } else {
                outcome.record(
                    RuleCategory::Heights,
                    "room_height",
                    CheckBasis::StrictMeasurement,
                    true,
                    None,
                );
            }
        }
    } else if structural.has_any() {
        outcome.record(
            RuleCategory::Heights,
            "structural_heights_present",
            CheckBasis::KeywordInferred,
            true,
            Some(
                "Structural heights are specified instead of explicit room heights".to_string(),
            ),
        );
    } else if ROOM_MENTION.is_match(text) && HEIGHT_MENTION.is_match(text) {
        outcome.record(
            RuleCategory::Heights,
            "room_height_implied",
            CheckBasis::KeywordInferred,
            true,
            Some("Room heights are implied by the document content; assuming standard room heights".to_string()),
        );
    } else if PLAN_DOCUMENT.is_match(text) {
        outcome.record(
            RuleCategory::Heights,
            "room_height_assumed",
            CheckBasis::DocumentTypeAssumed,
            true,
            Some("This appears to be a building plan; assuming standard room heights".to_string()),
        );
    } else {
        outcome.record(
            RuleCategory::Heights,
            "room_height_missing",
            CheckBasis::StrictMeasurement,
            false,
            Some(
                "No clear room height or structural height measurements found. Section drawings should include floor-to-ceiling heights or structural heights"
                    .to_string(),
            ),
        );
    }

    // 2. Room areas
    if !areas.is_empty() {
        for area in &areas {
            if *area > 1.0 && *area < standards.floor_area.habitable_rooms_min {
                outcome.record(
                    RuleCategory::Areas,
                    "room_area",
                    CheckBasis::StrictMeasurement,
                    false,
                    Some(format!(
                        "Found room area of {} sq m, which is below the minimum habitable room area of {} sq m",
                        area, standards.floor_area.habitable_rooms_min
                    )),
                );
            } else if *area >= standards.floor_area.habitable_rooms_min {
                outcome.record(
                    RuleCategory::Areas,
                    "room_area",
                    CheckBasis::StrictMeasurement,
                    true,
                    None,
                );
            }
        }
    } else if PAIRED_DIMENSIONS.is_match(text) {
        outcome.record(
            RuleCategory::Areas,
            "room_dimensions_present",
            CheckBasis::StrictMeasurement,
            true,
            None,
        );
    } else if STANDARD_ROOMS.is_match(text) {
        outcome.record(
            RuleCategory::Areas,
            "standard_rooms_present",
            CheckBasis::KeywordInferred,
            true,
            Some(
                "Standard room types are mentioned; these typically meet minimum dimension requirements"
                    .to_string(),
            ),
        );
    } else if ROOM_MENTION.is_match(text) && ANY_NUMBER.is_match(text) {
        outcome.record(
            RuleCategory::Areas,
            "room_dimensions_implied",
            CheckBasis::KeywordInferred,
            true,
            Some("Room dimensions are implied by the document content".to_string()),
        );
    } else if PLAN_DOCUMENT.is_match(text) {
        outcome.record(
            RuleCategory::Areas,
            "room_dimensions_assumed",
            CheckBasis::DocumentTypeAssumed,
            true,
            Some("This appears to be a building plan; assuming standard room dimensions".to_string()),
        );
    } else if RESIDENTIAL.is_match(text) {
        outcome.record(
            RuleCategory::Areas,
            "residential_dimensions_assumed",
            CheckBasis::DocumentTypeAssumed,
            true,
            Some("This appears to be a residential building; assuming standard room dimensions".to_string()),
        );
    } else {
        outcome.record(
            RuleCategory::Areas,
            "room_dimensions_missing",
            CheckBasis::StrictMeasurement,
            false,
            Some(format!(
                "No room dimensions or areas found. Floor plans should include room dimensions (minimum horizontal dimension: {}m) or area calculations (minimum: {} sq m)",
                standards.floor_area.horizontal_dimension_min,
                standards.floor_area.habitable_rooms_min
            )),
        );
    }

    // 3. Building height / storeys
    let is_dwelling = building_type == BuildingType::Dwelling;

    if !storeys.is_empty() {
        for count in &storeys {
            if *count > standards.storeys.max_residential_storeys {
                outcome.record(
                    RuleCategory::Storeys,
                    "building_height",
                    CheckBasis::StrictMeasurement,
                    false,
                    Some(format!(
                        "Found {} storeys, which exceeds the maximum residential building height of {} storeys",
                        count, standards.storeys.max_residential_storeys
                    )),
                );
            } else if *count > standards.storeys.max_dwelling_storeys && is_dwelling {
                outcome.record(
                    RuleCategory::Storeys,
                    "dwelling_height",
                    CheckBasis::StrictMeasurement,
                    false,
                    Some(format!(
                        "Found {} storeys, which exceeds the maximum dwelling house height of {} storeys",
                        count, standards.storeys.max_dwelling_storeys
                    )),
                );
            } else {
                outcome.record(
                    RuleCategory::Storeys,
                    "building_height",
                    CheckBasis::StrictMeasurement,
                    true,
                    None,
                );
            }
        }
    } else if ELEVATION_HEIGHT_MENTION.is_match(text) {
        outcome.record(
            RuleCategory::Storeys,
            "building_height_mentioned",
            CheckBasis::KeywordInferred,
            true,
            None,
        );
    } else if ELEVATION_DRAWINGS.is_match(text) && ANY_NUMBER.is_match(text) {
        outcome.record(
            RuleCategory::Storeys,
            "building_height_implied",
            CheckBasis::KeywordInferred,
            true,
            Some("Building height is implied by elevation drawings and dimensions".to_string()),
        );
    } else if PLAN_DOCUMENT.is_match(text) {
        outcome.record(
            RuleCategory::Storeys,
            "building_height_assumed",
            CheckBasis::DocumentTypeAssumed,
            true,
            Some("This appears to be a building plan; assuming standard building height".to_string()),
        );
    } else {
        outcome.record(
            RuleCategory::Storeys,
            "building_height_missing",
            CheckBasis::StrictMeasurement,
            false,
            Some(
                "No building height or storey information found. Elevation drawings should include overall building height"
                    .to_string(),
            ),
        );
    }

    // 4. Fire safety
    if RESIDENTIAL.is_match(text) {
        outcome.record(
            RuleCategory::FireSafety,
            "fire_safety",
            CheckBasis::DocumentTypeAssumed,
            true,
            Some("Residential building; standard fire safety measures are assumed".to_string()),
        );
    } else if FIRE_SAFETY.is_match(text) {
        outcome.record(
            RuleCategory::FireSafety,
            "fire_safety",
            CheckBasis::KeywordInferred,
            true,
            None,
        );
    } else {
        outcome.record(
            RuleCategory::FireSafety,
            "fire_safety",
            CheckBasis::StrictMeasurement,
            false,
            Some(
                "No fire safety information found. Plans should include fire exits, alarms, and safety measures"
                    .to_string(),
            ),
        );
    }

    // 5. Ventilation
    let has_ventilation = VENTILATION.is_match(text);
    outcome.record(
        RuleCategory::Ventilation,
        "natural_ventilation",
        if has_ventilation {
            CheckBasis::KeywordInferred
        } else {
            CheckBasis::StrictMeasurement
        },
        has_ventilation,
        if has_ventilation {
            None
        } else {
            Some(
                "No ventilation information found. Plans should include window openings and ventilation details"
                    .to_string(),
            )
        },
    );

    // 6. Structural heights
    let mut structural_basis = CheckBasis::StrictMeasurement;

    if !structural.has_any() {
        let drawing_context = ELEVATION_DRAWINGS.is_match(text) || SECTION_DRAWINGS.is_match(text);

        if drawing_context && STRUCTURAL_TERMS.is_match(text) && ANY_NUMBER.is_match(text) {
            structural_basis = CheckBasis::KeywordInferred;
        } else if PLAN_DOCUMENT.is_match(text) || ARCHITECT.is_match(text) {
            structural_basis = CheckBasis::DocumentTypeAssumed;
        }

        if structural_basis != CheckBasis::StrictMeasurement {
            structural.lintel_level = Some(ASSUMED_LINTEL_LEVEL);
            structural.wall_plate_level = Some(ASSUMED_WALL_PLATE_LEVEL);
            structural.max_roof_height = Some(ASSUMED_MAX_ROOF_HEIGHT);
        }
    }

    if structural.has_any() {
        outcome.record(
            RuleCategory::StructuralHeights,
            "has_structural_heights",
            structural_basis,
            true,
            match structural_basis {
                CheckBasis::StrictMeasurement => None,
                _ => Some(
                    "Structural heights are assumed based on standard architectural practice"
                        .to_string(),
                ),
            },
        );

        if let (Some(lintel), Some(wall_plate)) =
            (structural.lintel_level, structural.wall_plate_level)
        {
            let ordered = wall_plate > lintel;
            outcome.record(
                RuleCategory::StructuralHeights,
                "wall_plate_above_lintel",
                CheckBasis::StrictMeasurement,
                ordered,
                if ordered {
                    None
                } else {
                    Some(format!(
                        "Wall plate level ({}m) should be higher than lintel level ({}m)",
                        wall_plate, lintel
                    ))
                },
            );
        }

        if let (Some(wall_plate), Some(roof)) =
            (structural.wall_plate_level, structural.max_roof_height)
        {
            let ordered = roof > wall_plate;
            outcome.record(
                RuleCategory::StructuralHeights,
                "roof_above_wall_plate",
                CheckBasis::StrictMeasurement,
                ordered,
                if ordered {
                    None
                } else {
                    Some(format!(
                        "Maximum roof height ({}m) should be higher than wall plate level ({}m)",
                        roof, wall_plate
                    ))
                },
            );
        }

        // Room height implied by the structural measurements, when no
        // explicit room heights were given.
        if room_heights.is_empty() {
            if let Some(implied) = structural.implied_room_height() {
                let meets = implied >= min_habitable;
                outcome.record(
                    RuleCategory::Heights,
                    "implied_room_height",
                    structural_basis,
                    meets,
                    Some(if meets {
                        format!(
                            "Implied room height from structural measurements is {:.2}m, which meets minimum requirements",
                            implied
                        )
                    } else {
                        format!(
                            "Implied room height from structural measurements is {:.2}m, which is below the minimum habitable room height of {}m for {}s",
                            implied,
                            min_habitable,
                            building_type.label()
                        )
                    }),
                );
            }
        }
    } else {
        outcome.record(
            RuleCategory::StructuralHeights,
            "has_structural_heights",
            CheckBasis::StrictMeasurement,
            false,
            Some(
                "No structural height specifications found. Plans should include lintel level, wall plate level, and maximum roof height"
                    .to_string(),
            ),
        );
    }

    // 7. Window and door schedules
    outcome.record(
        RuleCategory::Schedules,
        "window_door_schedule",
        CheckBasis::StrictMeasurement,
        schedule.has_schedule(),
        if schedule.has_schedule() {
            None
        } else {
            Some(
                "No window and door schedule found. Plans should include a detailed schedule for all windows and doors"
                    .to_string(),
            )
        },
    );

    if schedule.has_schedule() {
        let has_windows = !schedule.windows.is_empty();
        outcome.record(
            RuleCategory::Schedules,
            "window_entries",
            CheckBasis::StrictMeasurement,
            has_windows,
            if has_windows {
                None
            } else {
                Some("Window schedule found but no window entries (WO1, WO2, ...) were detected".to_string())
            },
        );

        let has_doors = !schedule.doors.is_empty();
        outcome.record(
            RuleCategory::Schedules,
            "door_entries",
            CheckBasis::StrictMeasurement,
            has_doors,
            if has_doors {
                None
            } else {
                Some("Door schedule found but no door entries (DO1, DO2, ...) were detected".to_string())
            },
        );

        if has_windows {
            let with_dimensions = schedule.windows.iter().filter(|w| w.has_dimensions).count();
            let all_have = with_dimensions == schedule.windows.len();
            outcome.record(
                RuleCategory::Schedules,
                "window_dimensions",
                CheckBasis::StrictMeasurement,
                all_have,
                if all_have {
                    None
                } else {
                    Some(format!(
                        "Only {} of {} windows have dimensions specified",
                        with_dimensions,
                        schedule.windows.len()
                    ))
                },
            );

            let with_materials = schedule.windows.iter().any(|w| w.material.is_some());
            outcome.record(
                RuleCategory::Schedules,
                "window_materials",
                CheckBasis::StrictMeasurement,
                with_materials,
                if with_materials {
                    None
                } else {
                    Some("Window schedule does not specify materials for any windows".to_string())
                },
            );
        }

        if has_doors {
            let with_dimensions = schedule.doors.iter().filter(|d| d.has_dimensions).count();
            let all_have = with_dimensions == schedule.doors.len();
            outcome.record(
                RuleCategory::Schedules,
                "door_dimensions",
                CheckBasis::StrictMeasurement,
                all_have,
                if all_have {
                    None
                } else {
                    Some(format!(
                        "Only {} of {} doors have dimensions specified",
                        with_dimensions,
                        schedule.doors.len()
                    ))
                },
            );

            let with_materials = schedule.doors.iter().any(|d| d.material.is_some());
            outcome.record(
                RuleCategory::Schedules,
                "door_materials",
                CheckBasis::StrictMeasurement,
                with_materials,
                if with_materials {
                    None
                } else {
                    Some("Door schedule does not specify materials for any doors".to_string())
                },
            );

            let with_fire_ratings = schedule.doors.iter().any(|d| d.fire_rating.is_some());
            outcome.record(
                RuleCategory::Schedules,
                "door_fire_ratings",
                CheckBasis::StrictMeasurement,
                with_fire_ratings,
                if with_fire_ratings {
                    None
                } else {
                    Some("Door schedule does not specify fire ratings for any doors".to_string())
                },
            );
        }

        outcome.record(
            RuleCategory::Schedules,
            "ventilation_requirements",
            CheckBasis::StrictMeasurement,
            schedule.ventilation_requirements_met(),
            if schedule.ventilation_requirements_met() {
                None
            } else {
                Some(
                    "Window schedules should include details about openable areas for ventilation"
                        .to_string(),
                )
            },
        );

        outcome.record(
            RuleCategory::Schedules,
            "natural_light_requirements",
            CheckBasis::StrictMeasurement,
            schedule.natural_light_requirements_met(),
            if schedule.natural_light_requirements_met() {
                None
            } else {
                Some(
                    "Window schedules should include details about glazing areas for natural light"
                        .to_string(),
                )
            },
        );
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    static WELL_FORMED_PLAN: &str = "\
        RESIDENTIAL DWELLING HOUSE PLAN. Single storey building. \
        Ceiling height of 2.5m in all habitable rooms. \
        Bedroom 1: 12.5 sq m, Kitchen: 9.0 sq m. \
        LINTEL LEVEL 2.1m, WALL PLATE LEVEL 2.4m, MAX ROOF HEIGHT 3.5m. \
        North elevation view and section drawings included. \
        Fire escape route and smoke alarm positions shown. \
        Natural ventilation through openable windows. \
        WINDOW SCHEDULE: WO1 900 x 1200 aluminium openable glazing area noted. \
        DOOR SCHEDULE: DO1 813 x 2032 timber FR30.";

    /// Expect a reproducible tally for identical input (no hidden randomness)
    #[test]
    fn scoring_is_deterministic() {
        let standards = BuildingStandards::default();

        let first = run_rule_checks(WELL_FORMED_PLAN, &standards);
        let second = run_rule_checks(WELL_FORMED_PLAN, &standards);

        assert_eq!(first.passed(), second.passed());
        assert_eq!(first.total(), second.total());
        assert_eq!(first.issues(), second.issues());
        assert_eq!(first.percentage(), second.percentage());
    }

    /// Expect a well-formed plan to pass every check
    #[test]
    fn well_formed_plan_passes() {
        let outcome = run_rule_checks(WELL_FORMED_PLAN, &BuildingStandards::default());

        assert_eq!(outcome.passed(), outcome.total(), "{:?}", outcome.issues());
        assert_eq!(outcome.percentage(), 100.0);
    }

    /// Expect an empty outcome to count as fully compliant
    #[test]
    fn empty_outcome_is_compliant() {
        let outcome = RuleOutcome::default();

        assert_eq!(outcome.percentage(), 100.0);
    }

    /// Expect a sub-minimum room height to fail strictly
    #[test]
    fn low_room_height_fails() {
        let outcome = run_rule_checks(
            "Dwelling house with clear height of 2.0m in the bedroom",
            &BuildingStandards::default(),
        );

        let failed: Vec<&RuleCheck> = outcome.checks.iter().filter(|c| !c.passed).collect();
        assert!(failed
            .iter()
            .any(|c| c.category == RuleCategory::Heights
                && c.basis == CheckBasis::StrictMeasurement));
    }

    /// Expect keyword fallbacks to pass with a tagged basis and a note
    #[test]
    fn keyword_fallback_is_tagged() {
        let outcome = run_rule_checks(
            "Proposed dwelling house: bedroom, kitchen and living room, standard height throughout",
            &BuildingStandards::default(),
        );

        let height_check = outcome
            .checks
            .iter()
            .find(|c| c.name == "room_height_implied")
            .expect("keyword fallback check");

        assert!(height_check.passed);
        assert_eq!(height_check.basis, CheckBasis::KeywordInferred);
        assert!(!outcome.fallback_notes().is_empty());
    }

    /// Expect excess storeys to fail against the dwelling limit
    #[test]
    fn storey_limit_enforced() {
        let outcome = run_rule_checks(
            "Dwelling house plan, 3-storey building with ceiling height of 2.5m",
            &BuildingStandards::default(),
        );

        assert!(outcome
            .checks
            .iter()
            .any(|c| c.name == "dwelling_height" && !c.passed));
    }

    /// Expect a document with no recognizable content to fail the strict
    /// checks rather than be assumed compliant
    #[test]
    fn unrecognizable_document_fails() {
        let outcome = run_rule_checks(
            "invoice for consulting services rendered in the previous quarter",
            &BuildingStandards::default(),
        );

        assert!(outcome.percentage() < 50.0);
    }
}
