use regex::Regex;
use std::sync::OnceLock;

macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new($re).expect("static regex"))
    }};
}

/// Format milliseconds as `HH:MM:SS<sep>mmm` (`,` for SRT, `.` for WebVTT)
pub fn format_timestamp(ms: i64, sep: char) -> String {
    if ms < 0 {
        return format!("00:00:00{}000", sep);
    }

    let millis = ms % 1000;
    let total_seconds = ms / 1000;
    let secs = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let minutes = total_minutes % 60;
    let hours = total_minutes / 60;

    format!("{:02}:{:02}:{:02}{}{:03}", hours, minutes, secs, sep, millis)
}

/// Parse a clock stamp into milliseconds.
///
/// Accepts every delimiter variant used by the supported formats:
/// `HH:MM:SS,mmm` (SRT), `[HH:]MM:SS.mmm` (WebVTT) and `H:MM:SS.cc` (ASS).
/// The fractional part is scaled by its digit count, so `.5`, `.50` and `.500`
/// all mean 500 ms. Stamps too large for an `i64` of milliseconds are rejected.
pub fn parse_timestamp(stamp: &str) -> Option<i64> {
    let caps = regex!(r"^(?:(\d+):)?(\d{1,2}):(\d{1,2})(?:[,.](\d{1,3}))?$").captures(stamp.trim())?;

    let hours: i64 = match caps.get(1) {
        Some(h) => h.as_str().parse().ok()?,
        None => 0,
    };
    let minutes: i64 = caps[2].parse().ok()?;
    let seconds: i64 = caps[3].parse().ok()?;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    let millis = match caps.get(4) {
        Some(frac) => {
            let digits = frac.as_str();
            let value: i64 = digits.parse().ok()?;
            value * 10_i64.pow(3 - digits.len() as u32)
        }
        None => 0,
    };

    hours
        .checked_mul(3_600_000)?
        .checked_add((minutes * 60 + seconds) * 1000 + millis)
}

/// Parse a `start --> end` timing line. Anything after the end stamp
/// (WebVTT cue settings, SRT display coordinates) is ignored.
pub fn parse_timing_line(line: &str) -> Option<(i64, i64)> {
    let (left, right) = line.split_once("-->")?;
    let start = parse_timestamp(left)?;
    let end = parse_timestamp(right.split_whitespace().next()?)?;
    Some((start, end))
}

/// Strip a UTF-8 BOM and normalize CRLF/CR line endings
pub fn normalize_line_endings(content: &str) -> String {
    content
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Convert ASS dialogue text into display text.
///
/// `\N`, `\n` become line breaks and `\h` a space. Bold, italic and underline
/// override tags become `<b>`, `<i>`, `<u>`; every other override block is dropped.
pub(crate) fn convert_ass_text(raw: &str) -> String {
    let text = regex!(r"\{([^}]*)\}").replace_all(raw, |caps: &regex::Captures<'_>| {
        let mut out = String::new();
        for tag in caps[1].split('\\').map(str::trim) {
            match tag {
                "b1" | "i1" | "u1" => out.push_str(&format!("<{}>", &tag[..1])),
                "b0" | "i0" | "u0" => out.push_str(&format!("</{}>", &tag[..1])),
                _ => {}
            }
        }
        out
    });

    text.replace("\\N", "\n")
        .replace("\\n", "\n")
        .replace("\\h", " ")
        .trim()
        .to_string()
}
