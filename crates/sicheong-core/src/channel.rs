use unicode_normalization::UnicodeNormalization;

use crate::models::{Source, Tier};

/// General-programming cable broadcasters reported apart from plain cable.
pub const SEMI_CABLE_CHANNELS: &[&str] = &["JTBC", "MBN", "TV조선", "채널A"];

/// Channel name for comparison: NFKC, whitespace removed, uppercased.
pub fn normalize_channel(channel: &str) -> String {
    channel
        .nfkc()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Tier for a channel listed in the combined cable table.
///
/// Names are matched by substring so decorated listings such as
/// "TV조선 (위성)" or "JTBC2" still resolve.
pub fn classify(channel: &str) -> Tier {
    let name = normalize_channel(channel);
    let semi_cable = SEMI_CABLE_CHANNELS
        .iter()
        .any(|known| name.contains(known.to_uppercase().as_str()));
    if semi_cable {
        Tier::SemiCable
    } else {
        Tier::Cable
    }
}

/// Tier for a row given the table it came from. Terrestrial tables are
/// never reclassified by channel name.
pub fn tier_for(source: Source, channel: &str) -> Tier {
    match source {
        Source::Terrestrial => Tier::Terrestrial,
        Source::Cable => classify(channel),
    }
}
