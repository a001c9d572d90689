//! Static hatch catalog.
//!
//! Reference data for the major trout-stream hatches: water temperature
//! windows, peak months, and the conditions each insect favors. Loaded
//! once, never mutated. Temperature windows follow the commonly published
//! emergence ranges; they are heuristics, not laws.

/// Sky condition an insect favors for emergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyPreference {
    /// Hatches best under heavy cloud (e.g. Blue-Winged Olives).
    Overcast,
    /// Hatches best in bright sun (e.g. Tricos, terrestrials).
    Sunny,
    /// No strong preference.
    Any,
}

/// Part of the day an insect typically emerges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDayPreference {
    /// Roughly 05:00–11:00 local.
    Morning,
    /// Roughly 12:00–17:00 local.
    Afternoon,
    /// Roughly 17:00–21:00 local.
    Evening,
    Any,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct HatchDefinition {
    pub id: &'static str,
    pub name: &'static str,
    /// Lower bound of the active water-temperature window, °F.
    pub min_temp_f: f64,
    /// Upper bound of the active water-temperature window, °F.
    pub max_temp_f: f64,
    /// Calendar months (1–12) of peak emergence.
    pub peak_months: &'static [u32],
    pub sky: SkyPreference,
    pub time_of_day: TimeOfDayPreference,
}

static CATALOG: [HatchDefinition; 14] = [
    HatchDefinition {
        id: "blue-winged-olive",
        name: "Blue-Winged Olive",
        min_temp_f: 42.0,
        max_temp_f: 56.0,
        peak_months: &[3, 4, 5, 9, 10],
        sky: SkyPreference::Overcast,
        time_of_day: TimeOfDayPreference::Afternoon,
    },
    HatchDefinition {
        id: "hendrickson",
        name: "Hendrickson",
        min_temp_f: 50.0,
        max_temp_f: 58.0,
        peak_months: &[4, 5],
        sky: SkyPreference::Overcast,
        time_of_day: TimeOfDayPreference::Afternoon,
    },
    HatchDefinition {
        id: "march-brown",
        name: "March Brown",
        min_temp_f: 48.0,
        max_temp_f: 58.0,
        peak_months: &[4, 5],
        sky: SkyPreference::Any,
        time_of_day: TimeOfDayPreference::Afternoon,
    },
    HatchDefinition {
        id: "grannom-caddis",
        name: "Grannom Caddis",
        min_temp_f: 50.0,
        max_temp_f: 60.0,
        peak_months: &[4, 5],
        sky: SkyPreference::Any,
        time_of_day: TimeOfDayPreference::Afternoon,
    },
    HatchDefinition {
        id: "sulphur",
        name: "Sulphur",
        min_temp_f: 55.0,
        max_temp_f: 65.0,
        peak_months: &[5, 6],
        sky: SkyPreference::Any,
        time_of_day: TimeOfDayPreference::Evening,
    },
    HatchDefinition {
        id: "tan-caddis",
        name: "Tan Caddis",
        min_temp_f: 54.0,
        max_temp_f: 64.0,
        peak_months: &[5, 6, 7],
        sky: SkyPreference::Any,
        time_of_day: TimeOfDayPreference::Evening,
    },
    HatchDefinition {
        id: "green-drake",
        name: "Green Drake",
        min_temp_f: 54.0,
        max_temp_f: 62.0,
        peak_months: &[6, 7],
        sky: SkyPreference::Overcast,
        time_of_day: TimeOfDayPreference::Evening,
    },
    HatchDefinition {
        id: "pale-morning-dun",
        name: "Pale Morning Dun",
        min_temp_f: 54.0,
        max_temp_f: 64.0,
        peak_months: &[6, 7],
        sky: SkyPreference::Any,
        time_of_day: TimeOfDayPreference::Morning,
    },
    HatchDefinition {
        id: "salmonfly",
        name: "Salmonfly",
        min_temp_f: 50.0,
        max_temp_f: 58.0,
        peak_months: &[6],
        sky: SkyPreference::Any,
        time_of_day: TimeOfDayPreference::Afternoon,
    },
    HatchDefinition {
        id: "golden-stone",
        name: "Golden Stone",
        min_temp_f: 54.0,
        max_temp_f: 62.0,
        peak_months: &[6, 7],
        sky: SkyPreference::Any,
        time_of_day: TimeOfDayPreference::Evening,
    },
    HatchDefinition {
        id: "trico",
        name: "Trico",
        min_temp_f: 58.0,
        max_temp_f: 68.0,
        peak_months: &[7, 8, 9],
        sky: SkyPreference::Sunny,
        time_of_day: TimeOfDayPreference::Morning,
    },
    HatchDefinition {
        id: "grasshopper",
        name: "Grasshopper",
        min_temp_f: 58.0,
        max_temp_f: 70.0,
        peak_months: &[7, 8, 9],
        sky: SkyPreference::Sunny,
        time_of_day: TimeOfDayPreference::Afternoon,
    },
    HatchDefinition {
        id: "october-caddis",
        name: "October Caddis",
        min_temp_f: 44.0,
        max_temp_f: 54.0,
        peak_months: &[9, 10],
        sky: SkyPreference::Overcast,
        time_of_day: TimeOfDayPreference::Afternoon,
    },
    HatchDefinition {
        id: "midge",
        name: "Midge",
        min_temp_f: 34.0,
        max_temp_f: 48.0,
        peak_months: &[1, 2, 3, 11, 12],
        sky: SkyPreference::Any,
        time_of_day: TimeOfDayPreference::Afternoon,
    },
];

/// The full hatch catalog.
pub fn catalog() -> &'static [HatchDefinition] {
    &CATALOG
}
