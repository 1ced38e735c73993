//! Text formatting helpers used to build display strings for library items.

/// Separator placed between the two halves of a composite description.
pub const DESCRIPTOR_SEPARATOR: &str = "  •  ";

/// Join two descriptors with [`DESCRIPTOR_SEPARATOR`], skipping empty halves.
///
/// ```
/// use sostenuto::format::join_descriptors;
/// assert_eq!(join_descriptors("Artist", "12 songs"), "Artist  •  12 songs");
/// assert_eq!(join_descriptors("", "12 songs"), "12 songs");
/// ```
pub fn join_descriptors(a: &str, b: &str) -> String {
    if a.is_empty() {
        return b.to_string();
    }
    if b.is_empty() {
        return a.to_string();
    }
    format!("{a}{DESCRIPTOR_SEPARATOR}{b}")
}

/// Format a duration in milliseconds as `M:SS`, or `H:MM:SS` from one hour up.
pub fn format_duration(millis: u64) -> String {
    let total_secs = millis / 1000;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    if minutes < 60 {
        format!("{minutes}:{seconds:02}")
    } else {
        let hours = minutes / 60;
        let minutes = minutes % 60;
        format!("{hours}:{minutes:02}:{seconds:02}")
    }
}

/// Strip a disc prefix from a track number.
///
/// Some taggers store disc and track together as `DTTT` (3011 is track 11 of
/// disc 3). The disc part is discarded.
pub fn normalize_track_number(raw: u32) -> u32 {
    raw % 1000
}

/// Alphabetical bucket for a title, ignoring a leading "the " or "a ".
pub fn section_key(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let rest = if let Some(r) = lowered.strip_prefix("the ") {
        r
    } else if let Some(r) = lowered.strip_prefix("a ") {
        r
    } else {
        lowered.as_str()
    };

    match rest.chars().next() {
        Some(c) => c.to_uppercase().collect(),
        None => String::new(),
    }
}

/// `"-"` for an unknown (zero) year.
pub fn year_string(year: u32) -> String {
    if year > 0 {
        year.to_string()
    } else {
        "-".to_string()
    }
}

pub fn song_count_string(count: usize) -> String {
    count_string(count, "song", "songs")
}

pub fn album_count_string(count: usize) -> String {
    count_string(count, "album", "albums")
}

fn count_string(count: usize, one: &str, many: &str) -> String {
    let noun = if count == 1 { one } else { many };
    format!("{count} {noun}")
}
