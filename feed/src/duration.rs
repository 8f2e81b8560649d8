//! Clock-style rendering of ISO 8601 video durations.

/// What [`format_duration`] returns for a missing or unparseable duration.
pub const UNKNOWN_DURATION: &str = "unknown";

/// The duration YouTube reports for zero-length (and still-processing) videos.
pub const ZERO_DURATION: &str = "PT0S";

/// Renders a `PT[nH][nM][nS]` duration the way a player clock shows it.
///
/// - with hours: `H:MM:SS`
/// - with minutes but no hours: `M:SS`
/// - seconds only: `0:SS`
///
/// ```
/// use youtube_shorts_feed::format_duration;
///
/// assert_eq!(format_duration(Some("PT4M13S")), "4:13");
/// assert_eq!(format_duration(Some("PT1H2M3S")), "1:02:03");
/// assert_eq!(format_duration(Some("PT45S")), "0:45");
/// assert_eq!(format_duration(None), "unknown");
/// ```
pub fn format_duration(token: Option<&str>) -> String {
    let Some((hours, minutes, seconds)) = token.and_then(parse_components) else {
        return UNKNOWN_DURATION.to_string();
    };

    let seconds = seconds.unwrap_or("0");
    match (hours, minutes) {
        (Some(hours), minutes) => {
            format!("{hours}:{:0>2}:{seconds:0>2}", minutes.unwrap_or("0"))
        }
        (None, Some(minutes)) => format!("{minutes}:{seconds:0>2}"),
        (None, None) => format!("0:{seconds:0>2}"),
    }
}

type Components<'a> = (Option<&'a str>, Option<&'a str>, Option<&'a str>);

/// Finds the first `PT` in `token` and reads the optional hour, minute, and second fields that
/// follow it, in that order. Anything after the last recognised field is ignored.
fn parse_components(token: &str) -> Option<Components<'_>> {
    let start = token.find("PT")?;
    let mut rest = &token[start + 2..];

    let hours = take_field(&mut rest, 'H');
    let minutes = take_field(&mut rest, 'M');
    let seconds = take_field(&mut rest, 'S');
    Some((hours, minutes, seconds))
}

/// Consumes `<digits><unit>` from the front of `rest`, returning the digits.
fn take_field<'a>(rest: &mut &'a str, unit: char) -> Option<&'a str> {
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || !rest[digits..].starts_with(unit) {
        return None;
    }
    let (value, tail) = rest.split_at(digits);
    *rest = &tail[unit.len_utf8()..];
    Some(value)
}
