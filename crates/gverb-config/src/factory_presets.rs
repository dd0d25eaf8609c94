//! Factory presets bundled with the library.
//!
//! These are compiled in and always available, from a tight room that only
//! thickens the dry signal to a church heard from the back.

use crate::ReverbPreset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "default",
    "quick_fix",
    "bright_small_hall",
    "nice_hall",
    "singing_in_the_sewer",
    "last_row_of_the_church",
];

/// TOML content for factory presets.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PRESET),
    ("quick_fix", QUICK_FIX_PRESET),
    ("bright_small_hall", BRIGHT_SMALL_HALL_PRESET),
    ("nice_hall", NICE_HALL_PRESET),
    ("singing_in_the_sewer", SEWER_PRESET),
    ("last_row_of_the_church", CHURCH_PRESET),
];

const DEFAULT_PRESET: &str = r#"
name = "Default"
description = "Large dark room with a long tail, dry signal in front"
sample_rate = 48000

[parameters]
roomsize = 75.0
revtime = 11.0
damping = 0.7
bandwidth = 0.5
spread = 23.0
dry = 1.0
early = 0.25
tail = 0.25
"#;

const QUICK_FIX_PRESET: &str = r#"
name = "Quick Fix"
description = "Short, damped ambience that thickens a dry recording"
sample_rate = 48000

[parameters]
roomsize = 40.0
revtime = 4.0
damping = 0.9
bandwidth = 0.75
spread = 15.0
dry = 1.0
early = 0.1
tail = 0.05
"#;

const BRIGHT_SMALL_HALL_PRESET: &str = r#"
name = "Bright Small Hall"
description = "Small hall with little damping and an open top end"
sample_rate = 48000

[parameters]
roomsize = 50.0
revtime = 1.5
damping = 0.1
bandwidth = 0.75
spread = 23.0
dry = 1.0
early = 0.3
tail = 0.2
"#;

const NICE_HALL_PRESET: &str = r#"
name = "Nice Hall"
description = "Concert hall with a smooth, very long decay"
sample_rate = 48000

[parameters]
roomsize = 40.0
revtime = 20.0
damping = 0.5
bandwidth = 0.75
spread = 23.0
dry = 1.0
early = 0.25
tail = 0.2
"#;

const SEWER_PRESET: &str = r#"
name = "Singing in the Sewer"
description = "Narrow tunnel: muffled input, dense ringing tail"
sample_rate = 48000

[parameters]
roomsize = 6.0
revtime = 15.0
damping = 0.9
bandwidth = 0.1
spread = 10.0
dry = 1.0
early = 0.3
tail = 0.5
"#;

const CHURCH_PRESET: &str = r#"
name = "Last Row of the Church"
description = "Huge stone room heard from far away, mostly tail"
sample_rate = 48000

[parameters]
roomsize = 200.0
revtime = 9.0
damping = 0.6
bandwidth = 0.9
spread = 60.0
dry = 0.3
early = 0.1
tail = 0.5
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use gverb_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {:?}", preset.name, preset.description);
/// }
/// ```
pub fn factory_presets() -> Vec<ReverbPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| ReverbPreset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by internal name or display name, ignoring case.
///
/// # Example
///
/// ```rust
/// use gverb_config::get_factory_preset;
///
/// let hall = get_factory_preset("nice_hall").unwrap();
/// assert_eq!(hall.name, "Nice Hall");
/// assert!(get_factory_preset("Nice Hall").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<ReverbPreset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return ReverbPreset::from_toml(toml).ok();
        }
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Get the internal names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a preset name is a factory preset (case-insensitive).
///
/// ```rust
/// use gverb_config::is_factory_preset;
///
/// assert!(is_factory_preset("quick_fix"));
/// assert!(is_factory_preset("Quick Fix"));
/// assert!(!is_factory_preset("my_custom_room"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
