//! Regex-based filename classifier.
//!
//! Extracts media metadata from file names only; no file contents are read.
//! The approach is marker-driven: scan the stem for structural tokens
//! (season/episode, air date, year, part, codec, resolution, ...), take the
//! text before the earliest marker as the title, and fill in the rest from
//! the individual matches.
//!
//! Kind decision:
//! 1. Season/episode pattern (`S01E02` or `1x02`) -> episode
//! 2. Air date (`2020-01-01`, `2020.01.01`) -> episode
//! 3. Part number without a year -> episode (part-numbered specials)
//! 4. Anything else with a title -> movie
//! 5. No title -> other

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Classifier, ClassifierError, MediaKind, MediaRecord, VideoHint};

// ---------- Regex patterns ----------

static SEASON_EP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bs(\d{1,2})[\s._-]*e(\d{1,3})\b").unwrap());

static SEASON_X: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2})x(\d{1,3})\b").unwrap());

static DATE_ISO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})[-.](\d{1,2})[-.](\d{1,2})\b").unwrap());

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").unwrap());

static PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:part|pt)[\s._-]*(\d{1,2})\b").unwrap());

static CD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bcd[\s._-]*(\d{1,2})\b").unwrap());

static TRAILER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btrailer\b").unwrap());

static CODEC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(x26[45]|h[._ -]?26[45]|hevc|xvid|divx|av1|vp9)\b").unwrap());

static RESOLUTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(\d{3,4}p|4k)\b").unwrap());

// Uppercase-only on purpose: lowercase "us"/"it" are ordinary words.
static COUNTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(US|UK|GB|AU|CA|NZ|FR|DE|ES|IT|JP|KR)\b").unwrap());

static EDITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(extended|unrated|remastered|theatrical|uncut|directors?[\s._-]?cut|special[\s._-]?edition)\b",
    )
    .unwrap()
});

static ALT_TITLE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+aka\s+").unwrap());

/// Extensions that map to a `video/*` mimetype.
///
/// `m4v` and `ts` are not mapped here; the engine's container allow-list
/// picks those up instead.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "avi", "mp4", "mov", "wmv", "mpg", "mpeg", "webm", "flv", "3gp", "ogv", "vob", "mts",
    "m2ts", "divx", "asf", "m2v",
];

/// Default filename-based classifier.
#[derive(Debug, Default, Clone)]
pub struct FilenameClassifier;

impl FilenameClassifier {
    /// Create a new classifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for FilenameClassifier {
    fn classify_path(&self, path: &Path) -> Result<Option<MediaRecord>, ClassifierError> {
        let Some(name_os) = path.file_name() else {
            return Err(ClassifierError::NoFileName(path.to_path_buf()));
        };
        let Some(name) = name_os.to_str() else {
            // Non-UTF-8 names are not parsable; report as unclassifiable.
            return Ok(None);
        };

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let stem = match extension {
            Some(ref ext) => &name[..name.len() - ext.len() - 1],
            None => name,
        };
        if stem.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(parse_stem(stem, extension)))
    }
}

/// Parse a file stem into a [`MediaRecord`].
fn parse_stem(stem: &str, extension: Option<String>) -> MediaRecord {
    let mimetype_video = extension
        .as_deref()
        .is_some_and(|e| VIDEO_EXTENSIONS.contains(&e));
    let codec_present = CODEC.is_match(stem);
    let video_hint = VideoHint {
        mimetype_or_codec: mimetype_video || codec_present,
        container: extension,
    };

    let season_ep = find_season_episode(stem);
    let date = DATE_ISO.find(stem);
    let part = PART.captures(stem);
    let cd = CD.captures(stem);
    let trailer = TRAILER.is_match(stem);
    let country = COUNTRY.captures(stem);
    let edition = EDITION.captures(stem);

    // A year match inside the air date span is the date, not a year.
    let year_match = YEAR
        .find_iter(stem)
        .find(|m| date.is_none_or(|d| m.start() < d.start() || m.end() > d.end()));
    let year: Option<i32> = year_match.and_then(|m| m.as_str().parse().ok());

    // Title is everything before the earliest structural marker.
    let mut boundary = stem.len();
    let candidates = [
        season_ep.as_ref().map(|(s, _, _)| *s),
        date.map(|m| m.start()),
        year_match.map(|m| m.start()),
        part.as_ref().map(|c| c.get(0).unwrap().start()),
        cd.as_ref().map(|c| c.get(0).unwrap().start()),
        country.as_ref().map(|c| c.get(0).unwrap().start()),
        edition.as_ref().map(|c| c.get(0).unwrap().start()),
        CODEC.find(stem).map(|m| m.start()),
        RESOLUTION.find(stem).map(|m| m.start()),
        TRAILER.find(stem).map(|m| m.start()),
    ];
    for start in candidates.into_iter().flatten() {
        boundary = boundary.min(start);
    }

    let (title, alternative_title) = split_title(&stem[..boundary]);
    if title.is_empty() {
        return MediaRecord {
            video_hint,
            kind: MediaKind::Other,
        };
    }

    let date_value = date.map(|m| normalize_date(m.as_str()));
    let part_value = part.map(|c| c[1].to_string());
    let is_episode = season_ep.is_some() || date_value.is_some() || (part_value.is_some() && year.is_none());

    let kind = if is_episode {
        MediaKind::Episode {
            title,
            alternative_title,
            season: season_ep.map(|(_, s, _)| s),
            episode: season_ep.map(|(_, _, e)| e),
            date: date_value,
            part: part_value,
            country: country.map(|c| c[1].to_string()),
            year,
            edition: edition.map(|c| canonical_edition(&c[1])),
        }
    } else {
        MediaKind::Movie {
            title,
            year,
            cd: cd.and_then(|c| c[1].parse().ok()),
            other: trailer.then(|| "Trailer".to_string()),
        }
    };

    MediaRecord { video_hint, kind }
}

/// Locate a season/episode marker, returning (match start, season, episode).
fn find_season_episode(stem: &str) -> Option<(usize, u32, u32)> {
    for re in [&*SEASON_EP, &*SEASON_X] {
        if let Some(caps) = re.captures(stem) {
            let m = caps.get(0).unwrap();
            let season = caps[1].parse().ok()?;
            let episode = caps[2].parse().ok()?;
            return Some((m.start(), season, episode));
        }
    }
    None
}

/// Clean separator noise out of a raw title slice and split off an
/// alternative title on an `AKA` marker.
fn split_title(raw: &str) -> (String, Option<String>) {
    let cleaned = raw
        .replace(['.', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let cleaned =
        cleaned.trim_matches(|c: char| matches!(c, '-' | '(' | ')' | '[' | ']') || c.is_whitespace());

    let mut parts = ALT_TITLE_SPLIT.splitn(cleaned, 2);
    let title = parts.next().unwrap_or("").trim().to_string();
    let alt = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    (title, alt)
}

/// Normalize an air date match to `YYYY-MM-DD`.
fn normalize_date(raw: &str) -> String {
    let caps = DATE_ISO.captures(raw).expect("caller matched DATE_ISO");
    format!(
        "{}-{:02}-{:02}",
        &caps[1],
        caps[2].parse::<u32>().unwrap_or(0),
        caps[3].parse::<u32>().unwrap_or(0)
    )
}

/// Map an edition match to its canonical printed form.
fn canonical_edition(raw: &str) -> String {
    let folded: String = raw
        .to_ascii_lowercase()
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect();
    match folded.as_str() {
        "extended" => "Extended",
        "unrated" => "Unrated",
        "remastered" => "Remastered",
        "theatrical" => "Theatrical",
        "uncut" => "Uncut",
        "directorcut" | "directorscut" => "Director's Cut",
        "specialedition" => "Special Edition",
        _ => return raw.to_string(),
    }
    .to_string()
}
