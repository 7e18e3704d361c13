//! HUD presentation — banner-framed text blocks for in-world display.
//!
//! Pure formatting over profiles; scores are never re-derived here. The
//! viewer renders plain text, so everything is line-oriented with a fixed
//! banner width.

use crate::profile::AvatarProfile;

const BANNER: &str = "━━━━━━━━━━━━━━━━━━━━";

/// How many nearby avatars the HUD lists.
const NEARBY_LIMIT: usize = 5;

/// The viewer's own profile card.
pub fn profile_card(profile: Option<&AvatarProfile>) -> String {
    let Some(p) = profile else {
        return "👤 You:\nNo data yet.".to_string();
    };

    format!(
        "{banner}\n👤 YOU\n{banner}\nName: {}\nConfidence: {}%\n\n{}\n{banner}",
        p.name,
        p.confidence,
        p.summary,
        banner = BANNER,
    )
}

/// A card for someone else, addressed by name.
pub fn lookup_card(p: &AvatarProfile) -> String {
    format!(
        "{banner}\n📊 {}\n{banner}\nConfidence: {}%\nRecent messages: {}\n\n{}\n{banner}",
        p.name,
        p.confidence,
        p.recent,
        p.summary,
        banner = BANNER,
    )
}

/// Short list of nearby avatars, strongest-data first as given.
pub fn nearby_list(profiles: &[&AvatarProfile]) -> String {
    if profiles.is_empty() {
        return "👥 Nearby:\nNo one detected.".to_string();
    }

    let mut lines = vec![BANNER.to_string(), "👥 NEARBY".to_string(), BANNER.to_string()];
    for p in profiles.iter().take(NEARBY_LIMIT) {
        lines.push(format!("• {} ({}%)", p.name, p.confidence));
    }
    lines.push(BANNER.to_string());
    lines.join("\n")
}

/// Room-level energy read from recent activity.
pub fn room_vibe(profiles: &[&AvatarProfile]) -> String {
    if profiles.is_empty() {
        return "🧠 Room Vibe:\nQuiet".to_string();
    }

    let active = profiles.iter().filter(|p| p.recent > 0).count();
    let vibe = if active >= 5 {
        "Active"
    } else if active >= 2 {
        "Warming up"
    } else {
        "Calm"
    };

    format!(
        "{banner}\n🧠 ROOM VIBE\n{banner}\nLive energy: {}\n{banner}",
        vibe,
        banner = BANNER,
    )
}
