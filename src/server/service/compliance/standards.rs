//! Numeric building-code thresholds the rule-based pass checks extracted
//! measurements against. Values follow the municipal model building by-laws:
//! clear heights per building type, minimum habitable floor area, and storey
//! limits.

/// Minimum clear heights in metres, by room and building classification.
#[derive(Clone, Debug)]
pub struct ClearHeights {
    pub habitable_dwellings: f64,
    pub habitable_shops: f64,
    pub habitable_other: f64,
    pub non_habitable: f64,
    /// Areas leading to doors/windows or within 1.5 m of walls.
    pub access_areas_min: f64,
}

/// Minimum habitable floor areas in square metres.
#[derive(Clone, Debug)]
pub struct FloorArea {
    pub habitable_rooms_min: f64,
    pub horizontal_dimension_min: f64,
}

/// Storey limits by building classification.
#[derive(Clone, Debug)]
pub struct StoreyLimits {
    pub max_dwelling_storeys: u32,
    pub max_residential_storeys: u32,
}

#[derive(Clone, Debug)]
pub struct BuildingStandards {
    pub clear_heights: ClearHeights,
    pub floor_area: FloorArea,
    pub storeys: StoreyLimits,
}

impl Default for BuildingStandards {
    fn default() -> Self {
        Self {
            clear_heights: ClearHeights {
                habitable_dwellings: 2.4,
                habitable_shops: 2.9,
                habitable_other: 2.6,
                non_habitable: 2.1,
                access_areas_min: 2.1,
            },
            floor_area: FloorArea {
                habitable_rooms_min: 7.0,
                horizontal_dimension_min: 2.1,
            },
            storeys: StoreyLimits {
                max_dwelling_storeys: 2,
                max_residential_storeys: 4,
            },
        }
    }
}
