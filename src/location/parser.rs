//! Free-form geographic coordinate parser.
//!
//! A coordinate string goes through three stages:
//!
//! 1. **normalisation**: Unicode primes and degree look-alikes are mapped to ASCII
//!    `'`, `"` and `°`, and the text is trimmed;
//! 2. **hemisphere and sign extraction**: a leading or trailing hemisphere letter or word
//!    (`N`, `S`, `E`, `W`, `North`, …) and a leading `+`/`-` are removed;
//! 3. **notation matching**: the remaining unsigned body is offered to an ordered list of
//!    [`NotationMatcher`]s, one per notation family. The first matcher that accepts the
//!    body decides its magnitude.
//!
//! The hemisphere is applied afterwards (`S` and `W` negate), and the value is checked
//! against the geographic range of its axis. Adding a notation means adding a matcher to
//! [`MATCHERS`]; no existing matcher has to change.

use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::{
    constants::{Degree, DEG_PER_HOUR},
    skymath_errors::{Result, SkyMathError},
};

/// Geographic axis a coordinate string refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateAxis {
    Latitude,
    Longitude,
}

impl CoordinateAxis {
    /// Largest admissible absolute value, in degrees.
    pub fn limit(&self) -> Degree {
        match self {
            CoordinateAxis::Latitude => 90.0,
            CoordinateAxis::Longitude => 180.0,
        }
    }
}

impl fmt::Display for CoordinateAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateAxis::Latitude => write!(f, "latitude"),
            CoordinateAxis::Longitude => write!(f, "longitude"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    fn axis(&self) -> CoordinateAxis {
        match self {
            Hemisphere::North | Hemisphere::South => CoordinateAxis::Latitude,
            Hemisphere::East | Hemisphere::West => CoordinateAxis::Longitude,
        }
    }

    fn is_negative(&self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

/// One notation family of the coordinate grammar.
///
/// A matcher receives the unsigned body of the coordinate (hemisphere and sign already
/// removed) and returns its magnitude in degrees, or `None` when the text is not written
/// in its notation. Matchers never fail hard; rejection just passes the text on to the
/// next matcher.
pub trait NotationMatcher {
    /// Short identifier, used in logs.
    fn name(&self) -> &'static str;

    fn try_match(&self, body: &str, axis: CoordinateAxis) -> Option<Degree>;
}

/// Notation families, in the order they are tried.
pub const MATCHERS: [&dyn NotationMatcher; 5] = [
    &CompactDms,
    &DecimalDegrees,
    &SymbolDms,
    &SeparatedDms,
    &HourNotation,
];

const NUMBER: &str = r"(\d+(?:\.\d+)?)";

static COMPACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2,3})(\d{2})(\d{2}(?:\.\d+)?)$").unwrap());

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d*)?|\.\d+)\s*°?$").unwrap());

static SYMBOL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?i)^{NUMBER}\s*(?:°|deg(?:rees?)?|d)\s*(?:{NUMBER}\s*(?:'|min(?:utes?)?|m)\s*(?:{NUMBER}\s*(?:"|sec(?:onds?)?|s)?)?)?$"#
    ))
    .unwrap()
});

static SEPARATED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"^{NUMBER}°?[\s:,;]+{NUMBER}'?(?:[\s:,;]+{NUMBER}"?)?$"#
    ))
    .unwrap()
});

static HOUR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?i)^{NUMBER}\s*h\s*(?:{NUMBER}\s*(?:m|')\s*(?:{NUMBER}\s*(?:s|")?)?)?$"#
    ))
    .unwrap()
});

static HEMISPHERE_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(north|south|east|west)\b\s*(.*)$|^(.*?)\s*\b(north|south|east|west)$")
        .unwrap()
});

/// Combine degree, minute and second fields into decimal degrees.
///
/// A field followed by a smaller one must be an integer, and minutes and seconds must be
/// below 60; otherwise the notation is rejected.
fn combine_dms(degrees: &str, minutes: Option<&str>, seconds: Option<&str>) -> Option<Degree> {
    let d: f64 = degrees.parse().ok()?;
    let m: f64 = minutes.map(str::parse::<f64>).transpose().ok()?.unwrap_or(0.0);
    let s: f64 = seconds.map(str::parse::<f64>).transpose().ok()?.unwrap_or(0.0);

    if minutes.is_some() && d.fract() != 0.0 {
        return None;
    }
    if seconds.is_some() && m.fract() != 0.0 {
        return None;
    }
    if m >= 60.0 || s >= 60.0 {
        return None;
    }

    Some(d + m / 60.0 + s / 3600.0)
}

/// Packed `DDMMSS[.s]` (latitude) or `DDDMMSS[.s]` (longitude), e.g. `404246`.
pub struct CompactDms;

impl NotationMatcher for CompactDms {
    fn name(&self) -> &'static str {
        "compact"
    }

    fn try_match(&self, body: &str, axis: CoordinateAxis) -> Option<Degree> {
        let caps = COMPACT_RE.captures(body)?;
        let degrees = caps.get(1)?.as_str();
        // three degree digits only make sense for longitudes
        if degrees.len() == 3 && axis == CoordinateAxis::Latitude {
            return None;
        }
        combine_dms(
            degrees,
            Some(caps.get(2)?.as_str()),
            Some(caps.get(3)?.as_str()),
        )
    }
}

/// Plain decimal degrees, optionally followed by `°`: `40.7128`, `74.006°`.
pub struct DecimalDegrees;

impl NotationMatcher for DecimalDegrees {
    fn name(&self) -> &'static str {
        "decimal"
    }

    fn try_match(&self, body: &str, _axis: CoordinateAxis) -> Option<Degree> {
        let caps = DECIMAL_RE.captures(body)?;
        caps.get(1)?.as_str().parse().ok()
    }
}

/// Degrees, minutes and seconds marked with symbols or unit letters:
/// `40°42'46"`, `40d 42m 46.1s`, `40 deg 42.767 min`.
pub struct SymbolDms;

impl NotationMatcher for SymbolDms {
    fn name(&self) -> &'static str {
        "symbol-dms"
    }

    fn try_match(&self, body: &str, _axis: CoordinateAxis) -> Option<Degree> {
        let caps = SYMBOL_RE.captures(body)?;
        combine_dms(
            caps.get(1)?.as_str(),
            caps.get(2).map(|m| m.as_str()),
            caps.get(3).map(|m| m.as_str()),
        )
    }
}

/// Degrees, minutes and optional seconds separated by spaces, colons, commas or
/// semicolons: `40 42 46`, `40:42:46.5`, `40 42.767`.
pub struct SeparatedDms;

impl NotationMatcher for SeparatedDms {
    fn name(&self) -> &'static str {
        "separated-dms"
    }

    fn try_match(&self, body: &str, _axis: CoordinateAxis) -> Option<Degree> {
        let caps = SEPARATED_RE.captures(body)?;
        combine_dms(
            caps.get(1)?.as_str(),
            caps.get(2).map(|m| m.as_str()),
            caps.get(3).map(|m| m.as_str()),
        )
    }
}

/// Longitude written as a time: `4h56m27s`, `4h 56m 27.3s` (1h = 15°).
pub struct HourNotation;

impl NotationMatcher for HourNotation {
    fn name(&self) -> &'static str {
        "hours"
    }

    fn try_match(&self, body: &str, axis: CoordinateAxis) -> Option<Degree> {
        if axis != CoordinateAxis::Longitude {
            return None;
        }
        let caps = HOUR_RE.captures(body)?;
        let hours = combine_dms(
            caps.get(1)?.as_str(),
            caps.get(2).map(|m| m.as_str()),
            caps.get(3).map(|m| m.as_str()),
        )?;
        Some(hours * DEG_PER_HOUR)
    }
}

/// Map Unicode look-alikes to the ASCII symbols the matchers understand.
fn normalize(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| match c {
            '′' | '’' | '‘' | '´' | '`' => '\'',
            '″' | '“' | '”' => '"',
            'º' | '˚' => '°',
            '−' | '–' => '-',
            _ => c,
        })
        .collect::<String>()
        .replace("''", "\"")
}

/// Remove a hemisphere word or letter from either end of the text.
///
/// A trailing lowercase `s` glued to a digit is a seconds marker (`46s`), not South.
fn split_hemisphere(text: &str) -> (String, Option<Hemisphere>) {
    if let Some(caps) = HEMISPHERE_WORD_RE.captures(text) {
        let (word, rest) = match (caps.get(1), caps.get(2), caps.get(3), caps.get(4)) {
            (Some(word), Some(rest), _, _) => (word.as_str(), rest.as_str()),
            (_, _, Some(rest), Some(word)) => (word.as_str(), rest.as_str()),
            _ => ("", text),
        };
        if let Some(hemisphere) = word.chars().next().and_then(Hemisphere::from_letter) {
            return (rest.trim().to_string(), Some(hemisphere));
        }
    }

    // a single letter, not part of a unit word such as "deg" or "degrees"
    let mut chars = text.chars();
    if let (Some(first), next) = (chars.next(), chars.clone().next()) {
        let isolated = !next.is_some_and(|c| c.is_ascii_alphabetic());
        if first.is_ascii_alphabetic() && isolated {
            if let Some(hemisphere) = Hemisphere::from_letter(first) {
                return (chars.as_str().trim().to_string(), Some(hemisphere));
            }
        }
    }

    let mut rev = text.chars().rev();
    if let (Some(last), before) = (rev.next(), rev.next()) {
        let isolated = !before.is_some_and(|c| c.is_ascii_alphabetic());
        let seconds_marker = last == 's' && before.is_some_and(|c| c.is_ascii_digit());
        if last.is_ascii_alphabetic() && isolated && !seconds_marker {
            if let Some(hemisphere) = Hemisphere::from_letter(last) {
                let rest = &text[..text.len() - last.len_utf8()];
                return (rest.trim().to_string(), Some(hemisphere));
            }
        }
    }

    (text.to_string(), None)
}

/// Name of the first matcher accepting the text, if any.
///
/// The text goes through the same normalisation as [`parse_angle`], but the hemisphere
/// and range checks are not applied.
pub fn detect_notation(text: &str, axis: CoordinateAxis) -> Option<&'static str> {
    let (body, _) = split_hemisphere(&normalize(text));
    let body = body.trim_start_matches(['+', '-']).trim();
    MATCHERS
        .iter()
        .find(|matcher| matcher.try_match(body, axis).is_some())
        .map(|matcher| matcher.name())
}

/// Parse a latitude or longitude written in any supported notation.
///
/// Arguments
/// ---------
/// * `text`: the coordinate as written by a human, e.g. `40°42'46"N`, `-74.006`,
///   `W 74 00 21.6`, `4h56m27s W`.
/// * `axis`: whether the text is a latitude or a longitude.
///
/// Return
/// ----------
/// * The signed value in degrees (North and East positive), or
///   [`SkyMathError::Parse`] when no notation matches, when a hemisphere letter belongs
///   to the other axis, or when the value is outside ±90° (latitude) / ±180° (longitude).
pub fn parse_angle(text: &str, axis: CoordinateAxis) -> Result<Degree> {
    let normalized = normalize(text);
    let (body, hemisphere) = split_hemisphere(&normalized);

    let (negative, body) = match body.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, body.strip_prefix('+').unwrap_or(body.as_str()).trim_start()),
    };
    if body.is_empty() {
        log::debug!("rejecting empty {axis} '{text}'");
        return Err(SkyMathError::parse(text, "empty coordinate"));
    }

    let Some((name, magnitude)) = MATCHERS
        .iter()
        .find_map(|matcher| Some((matcher.name(), matcher.try_match(body, axis)?)))
    else {
        log::debug!("no notation matched {axis} '{text}'");
        return Err(SkyMathError::parse(text, "no recognised notation pattern matched"));
    };
    log::trace!("{axis} '{text}' parsed by the {name} matcher");

    let mut value = if negative { -magnitude } else { magnitude };
    if let Some(hemisphere) = hemisphere {
        if hemisphere.axis() != axis {
            log::debug!("hemisphere {hemisphere:?} does not apply to {axis} '{text}'");
            return Err(SkyMathError::parse(
                text,
                format!("hemisphere {hemisphere:?} is not valid for a {axis}"),
            ));
        }
        if hemisphere.is_negative() {
            value = -value.abs();
        }
    }

    if value.abs() > axis.limit() {
        log::debug!("{axis} '{text}' decodes to {value}, out of range");
        return Err(SkyMathError::parse(
            text,
            format!("{value} is outside the {axis} range ±{}", axis.limit()),
        ));
    }
    Ok(value)
}

/// [`parse_angle`] for a latitude.
pub fn parse_latitude(text: &str) -> Result<Degree> {
    parse_angle(text, CoordinateAxis::Latitude)
}

/// [`parse_angle`] for a longitude.
pub fn parse_longitude(text: &str) -> Result<Degree> {
    parse_angle(text, CoordinateAxis::Longitude)
}

#[cfg(test)]
mod parser_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    const NYC_LAT: f64 = 40.0 + 42.0 / 60.0 + 46.0 / 3600.0;
    const NYC_LON: f64 = -(74.0 + 21.6 / 3600.0);

    #[test]
    fn test_combine_dms() {
        assert_eq!(combine_dms("40", Some("30"), None), Some(40.5));
        assert_eq!(combine_dms("40", Some("60"), None), None);
        assert_eq!(combine_dms("40", Some("10"), Some("60")), None);
        assert_eq!(combine_dms("40.5", Some("10"), None), None);
        assert_eq!(combine_dms("40", Some("10.5"), Some("3")), None);
        assert_eq!(combine_dms("12.25", None, None), Some(12.25));
    }

    #[test]
    fn test_matchers_in_isolation() {
        let lat = CoordinateAxis::Latitude;
        let lon = CoordinateAxis::Longitude;
        assert_eq!(DecimalDegrees.try_match("40.7128", lat), Some(40.7128));
        assert_eq!(DecimalDegrees.try_match("40 42", lat), None);
        assert_eq!(CompactDms.try_match("403000", lat), Some(40.5));
        assert_eq!(CompactDms.try_match("0743000", lat), None);
        assert_eq!(CompactDms.try_match("0743000", lon), Some(74.5));
        assert_eq!(SymbolDms.try_match("40°30'", lat), Some(40.5));
        assert_eq!(SymbolDms.try_match("40 30", lat), None);
        assert_eq!(SeparatedDms.try_match("40:30", lat), Some(40.5));
        assert_eq!(HourNotation.try_match("1h30m", lon), Some(22.5));
        assert_eq!(HourNotation.try_match("1h30m", lat), None);
    }

    #[test]
    fn test_nyc_symbols() {
        assert_abs_diff_eq!(parse_latitude("40°42'46\"N").unwrap(), NYC_LAT, epsilon = 1e-12);
        assert_abs_diff_eq!(parse_longitude("74°0'21.6\"W").unwrap(), NYC_LON, epsilon = 1e-12);
        assert_abs_diff_eq!(parse_latitude("40° 42′ 46″ N").unwrap(), NYC_LAT, epsilon = 1e-12);
        assert_abs_diff_eq!(parse_longitude("74d 0m 21.6s W").unwrap(), NYC_LON, epsilon = 1e-12);
    }

    #[test]
    fn test_hemisphere_handling() {
        assert_eq!(parse_latitude("S 33.5").unwrap(), -33.5);
        assert_eq!(parse_latitude("33.5 s").unwrap(), -33.5);
        assert_eq!(parse_latitude("-33.5S").unwrap(), -33.5);
        assert_eq!(parse_longitude("151.2 East").unwrap(), 151.2);
        assert_eq!(parse_longitude("west 0.5").unwrap(), -0.5);
        // "46s" is seconds, not South
        assert_abs_diff_eq!(parse_latitude("40d42m46s").unwrap(), NYC_LAT, epsilon = 1e-12);

        assert!(parse_latitude("40 E").is_err());
        assert!(parse_longitude("74 N").is_err());
    }

    #[test]
    fn test_sign_applies_to_whole_angle() {
        assert_eq!(parse_latitude("-0 30 00").unwrap(), -0.5);
        assert_eq!(parse_latitude("+12:30").unwrap(), 12.5);
        assert_eq!(parse_latitude("−12.5").unwrap(), -12.5);
    }

    #[test]
    fn test_range_errors() {
        assert!(parse_latitude("90").is_ok());
        assert!(parse_latitude("90.0001").is_err());
        assert!(parse_longitude("-180").is_ok());
        assert!(parse_longitude("181").is_err());
        assert!(parse_longitude("13h").is_err());
    }

    #[test]
    fn test_malformed_inputs() {
        for text in ["", "   ", "abc", "40°61'", "12..5", "4 5 6 7", "N", "--5"] {
            let err = parse_latitude(text).unwrap_err();
            assert!(matches!(err, SkyMathError::Parse { .. }), "{text}");
        }
        let err = parse_latitude("hello").unwrap_err();
        assert_eq!(
            err,
            SkyMathError::Parse {
                input: "hello".into(),
                reason: "no recognised notation pattern matched".into()
            }
        );
    }

    #[test]
    fn test_detect_notation() {
        let lat = CoordinateAxis::Latitude;
        let lon = CoordinateAxis::Longitude;
        assert_eq!(detect_notation("-74.0060", lon), Some("decimal"));
        assert_eq!(detect_notation("404246", lat), Some("compact"));
        assert_eq!(detect_notation("40°42'46\"N", lat), Some("symbol-dms"));
        assert_eq!(detect_notation("40:42:46", lat), Some("separated-dms"));
        assert_eq!(detect_notation("4h56m27s", lon), Some("hours"));
        assert_eq!(detect_notation("four", lon), None);
    }
}
