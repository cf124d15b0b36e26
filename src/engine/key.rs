//! Canonical key derivation.
//!
//! A [`CanonicalKey`] is the deterministic string identity of a video:
//! two files that derive the same key are the same content, however they
//! are named, encoded, or located. Derivation is a pure function of the
//! [`MediaRecord`]; it performs no I/O.
//!
//! # Key shape
//!
//! - **Episode**: `lower(title)` + `lower(alternative_title)?` + exactly one
//!   disambiguator (`{season}x{episode}` > date > part), then `country?`,
//!   `year?`, `edition?` in that fixed order. An episode with no usable
//!   disambiguator cannot be identified and is rejected.
//! - **Movie**: `title` (case preserved) + `year?` + `cd?`. Trailers are
//!   rejected outright so they never match the main title.
//!
//! Optional components are appended only when present, so presence or
//! absence of metadata is itself part of the identity.

use serde::Serialize;

use crate::classifier::{MediaKind, MediaRecord};

/// Container extensions admitted by the video gate even without mimetype or
/// codec evidence. These are real video containers the filename classifier
/// cannot map to a `video/*` mimetype.
pub const CONTAINER_ALLOWLIST: &[&str] = &["m4v", "ts"];

/// Deterministic string identity derived from parsed metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// View the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a record could not produce a canonical key.
///
/// Every variant is recovered locally: the file is recorded as unprocessed
/// and the scan continues.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rejection {
    /// The external classifier returned nothing or faulted.
    #[error("classifier could not parse the file")]
    ClassifierFailure,

    /// The episode has neither season/episode, nor date, nor part.
    #[error("episode lacks a usable disambiguator")]
    AmbiguousEpisode,

    /// Movie flagged as a trailer; never deduplicated against the main title.
    #[error("trailers are excluded")]
    Trailer,

    /// The classifier returned a kind the engine does not model.
    #[error("unrecognized media kind")]
    UnknownKind,
}

/// Check whether a record is treated as video content at all.
///
/// Applies before kind dispatch: mimetype/codec evidence wins, otherwise the
/// container must be on [`CONTAINER_ALLOWLIST`]. Records failing the gate
/// are skipped, not rejected.
#[must_use]
pub fn passes_video_gate(record: &MediaRecord) -> bool {
    record.video_hint.mimetype_or_codec
        || record
            .video_hint
            .container
            .as_deref()
            .is_some_and(|c| CONTAINER_ALLOWLIST.contains(&c))
}

/// Derive the canonical key for a record.
pub fn derive(record: &MediaRecord) -> Result<CanonicalKey, Rejection> {
    match &record.kind {
        MediaKind::Episode {
            title,
            alternative_title,
            season,
            episode,
            date,
            part,
            country,
            year,
            edition,
        } => {
            let mut key = title.to_lowercase();
            if let Some(alt) = alternative_title {
                key.push_str(&alt.to_lowercase());
            }

            // Exactly one disambiguator, in priority order.
            if let (Some(season), Some(episode)) = (season, episode) {
                key.push_str(&format!("{season}x{episode}"));
            } else if let Some(date) = date {
                key.push_str(date);
            } else if let Some(part) = part {
                key.push_str(part);
            } else {
                return Err(Rejection::AmbiguousEpisode);
            }

            if let Some(country) = country {
                key.push_str(country);
            }
            if let Some(year) = year {
                key.push_str(&year.to_string());
            }
            if let Some(edition) = edition {
                key.push_str(edition);
            }
            Ok(CanonicalKey(key))
        }
        MediaKind::Movie {
            title,
            year,
            cd,
            other,
        } => {
            if other.as_deref() == Some("Trailer") {
                return Err(Rejection::Trailer);
            }

            // Movie titles keep their case. Episodes fold; movies do not.
            let mut key = title.clone();
            if let Some(year) = year {
                key.push_str(&year.to_string());
            }
            if let Some(cd) = cd {
                key.push_str(&cd.to_string());
            }
            Ok(CanonicalKey(key))
        }
        MediaKind::Other => Err(Rejection::UnknownKind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::VideoHint;

    fn episode(title: &str) -> MediaKind {
        MediaKind::Episode {
            title: title.to_string(),
            alternative_title: None,
            season: None,
            episode: None,
            date: None,
            part: None,
            country: None,
            year: None,
            edition: None,
        }
    }

    fn video_record(kind: MediaKind) -> MediaRecord {
        MediaRecord {
            video_hint: VideoHint {
                mimetype_or_codec: true,
                container: Some("mkv".to_string()),
            },
            kind,
        }
    }

    #[test]
    fn test_episode_season_episode_key() {
        let kind = MediaKind::Episode {
            title: "Show".to_string(),
            alternative_title: None,
            season: Some(1),
            episode: Some(2),
            date: None,
            part: None,
            country: None,
            year: None,
            edition: None,
        };
        let key = derive(&video_record(kind)).unwrap();
        assert_eq!(key.as_str(), "show1x2");
    }

    #[test]
    fn test_episode_disambiguator_priority() {
        // Season/episode beats date even when both are present.
        let kind = MediaKind::Episode {
            title: "show".to_string(),
            alternative_title: None,
            season: Some(1),
            episode: Some(2),
            date: Some("2020-01-01".to_string()),
            part: None,
            country: None,
            year: None,
            edition: None,
        };
        let key = derive(&video_record(kind)).unwrap();
        assert_eq!(key.as_str(), "show1x2");
    }

    #[test]
    fn test_episode_date_beats_part() {
        let kind = MediaKind::Episode {
            title: "show".to_string(),
            alternative_title: None,
            season: None,
            episode: None,
            date: Some("2020-01-01".to_string()),
            part: Some("3".to_string()),
            country: None,
            year: None,
            edition: None,
        };
        let key = derive(&video_record(kind)).unwrap();
        assert_eq!(key.as_str(), "show2020-01-01");
    }

    #[test]
    fn test_episode_ambiguous_rejected() {
        let key = derive(&video_record(episode("Show")));
        assert_eq!(key.unwrap_err(), Rejection::AmbiguousEpisode);
    }

    #[test]
    fn test_episode_season_only_is_ambiguous() {
        let kind = MediaKind::Episode {
            title: "show".to_string(),
            alternative_title: None,
            season: Some(1),
            episode: None,
            date: None,
            part: None,
            country: None,
            year: None,
            edition: None,
        };
        assert_eq!(
            derive(&video_record(kind)).unwrap_err(),
            Rejection::AmbiguousEpisode
        );
    }

    #[test]
    fn test_episode_optional_suffix_order() {
        let kind = MediaKind::Episode {
            title: "Show".to_string(),
            alternative_title: Some("Alt".to_string()),
            season: Some(2),
            episode: Some(10),
            date: None,
            part: None,
            country: Some("US".to_string()),
            year: Some(2005),
            edition: Some("Extended".to_string()),
        };
        let key = derive(&video_record(kind)).unwrap();
        assert_eq!(key.as_str(), "showalt2x10US2005Extended");
    }

    #[test]
    fn test_movie_key() {
        let kind = MediaKind::Movie {
            title: "Foo".to_string(),
            year: Some(2020),
            cd: Some(1),
            other: None,
        };
        let key = derive(&video_record(kind)).unwrap();
        assert_eq!(key.as_str(), "Foo20201");
    }

    #[test]
    fn test_trailer_rejected() {
        let kind = MediaKind::Movie {
            title: "Foo".to_string(),
            year: Some(2020),
            cd: None,
            other: Some("Trailer".to_string()),
        };
        assert_eq!(derive(&video_record(kind)).unwrap_err(), Rejection::Trailer);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert_eq!(
            derive(&video_record(MediaKind::Other)).unwrap_err(),
            Rejection::UnknownKind
        );
    }

    #[test]
    fn test_case_fold_asymmetry() {
        // Episodes fold case; movies keep it. Documented behavior, asserted
        // here so a future change is deliberate.
        let ep_upper = MediaKind::Episode {
            title: "Show".to_string(),
            alternative_title: None,
            season: Some(1),
            episode: Some(2),
            date: None,
            part: None,
            country: None,
            year: None,
            edition: None,
        };
        let ep_lower = MediaKind::Episode {
            title: "show".to_string(),
            alternative_title: None,
            season: Some(1),
            episode: Some(2),
            date: None,
            part: None,
            country: None,
            year: None,
            edition: None,
        };
        assert_eq!(
            derive(&video_record(ep_upper)).unwrap(),
            derive(&video_record(ep_lower)).unwrap()
        );

        let movie_upper = MediaKind::Movie {
            title: "Show".to_string(),
            year: None,
            cd: None,
            other: None,
        };
        let movie_lower = MediaKind::Movie {
            title: "show".to_string(),
            year: None,
            cd: None,
            other: None,
        };
        assert_ne!(
            derive(&video_record(movie_upper)).unwrap(),
            derive(&video_record(movie_lower)).unwrap()
        );
    }

    #[test]
    fn test_video_gate_allowlist() {
        let gated = MediaRecord {
            video_hint: VideoHint {
                mimetype_or_codec: false,
                container: Some("ts".to_string()),
            },
            kind: MediaKind::Other,
        };
        assert!(passes_video_gate(&gated));

        let skipped = MediaRecord {
            video_hint: VideoHint {
                mimetype_or_codec: false,
                container: Some("mkv".to_string()),
            },
            kind: MediaKind::Other,
        };
        assert!(!passes_video_gate(&skipped));

        let no_container = MediaRecord {
            video_hint: VideoHint {
                mimetype_or_codec: false,
                container: None,
            },
            kind: MediaKind::Other,
        };
        assert!(!passes_video_gate(&no_container));
    }

    #[test]
    fn test_presence_is_part_of_identity() {
        // Same show, one record carries a year the other lacks: different keys.
        let with_year = MediaKind::Episode {
            title: "show".to_string(),
            alternative_title: None,
            season: Some(1),
            episode: Some(2),
            date: None,
            part: None,
            country: None,
            year: Some(2005),
            edition: None,
        };
        let without_year = MediaKind::Episode {
            title: "show".to_string(),
            alternative_title: None,
            season: Some(1),
            episode: Some(2),
            date: None,
            part: None,
            country: None,
            year: None,
            edition: None,
        };
        assert_ne!(
            derive(&video_record(with_year)).unwrap(),
            derive(&video_record(without_year)).unwrap()
        );
    }
}
