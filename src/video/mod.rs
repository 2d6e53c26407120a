//! Video link resolution.
//!
//! Turns a pasted YouTube or Google Drive link (or a bare video ID) into a
//! normalized [`VideoReference`]: the hosting platform, the platform video ID
//! and a default thumbnail URL. Resolution is total: input that cannot be
//! recognized resolves to [`VideoSource::None`] with empty fields instead of
//! failing, so a malformed link never blocks the surrounding project write.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Length of a YouTube video ID.
const YOUTUBE_ID_LEN: usize = 11;

/// YouTube URL forms that carry the ID in the path or `v` query parameter.
static YOUTUBE_URL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)([a-zA-Z0-9_-]{11})",
    )
    .unwrap()
});

/// A bare YouTube ID pasted on its own.
static YOUTUBE_BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9_-]{11})$").unwrap());

/// Google Drive ID patterns, tried in order.
static DRIVE_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // https://drive.google.com/file/d/FILE_ID/view
        Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").unwrap(),
        // https://drive.google.com/open?id=FILE_ID
        Regex::new(r"id=([a-zA-Z0-9_-]+)").unwrap(),
        // https://drive.google.com/a/domain/d/FILE_ID
        Regex::new(r"/d/([a-zA-Z0-9_-]+)").unwrap(),
    ]
});

/// Hosting platform of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoSource {
    /// Not recognized as a supported video link.
    #[default]
    None,
    /// YouTube (youtube.com or youtu.be).
    YouTube,
    /// Google Drive file.
    Drive,
}

impl VideoSource {
    /// Lowercase name as stored in project records, `None` for unrecognized links.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            VideoSource::None => None,
            VideoSource::YouTube => Some("youtube"),
            VideoSource::Drive => Some("drive"),
        }
    }

    /// Whether this is a real hosting platform.
    pub fn is_some(&self) -> bool {
        !matches!(self, VideoSource::None)
    }
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("none"))
    }
}

/// Result of resolving a video link.
///
/// `thumbnail_url` is non-empty exactly when `source` is a platform and
/// `video_id` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoReference {
    pub raw_input: String,
    pub source: VideoSource,
    pub video_id: String,
    pub thumbnail_url: String,
}

impl VideoReference {
    fn new(raw_input: &str, source: VideoSource, video_id: String) -> Self {
        // An unrecognized source never carries an ID.
        let video_id = if source.is_some() {
            video_id
        } else {
            String::new()
        };
        let thumbnail_url = thumbnail_url(&video_id, source);
        Self {
            raw_input: raw_input.to_string(),
            source,
            video_id,
            thumbnail_url,
        }
    }

    /// Whether a video was recognized.
    pub fn has_video(&self) -> bool {
        self.source.is_some() && !self.video_id.is_empty()
    }

    /// Source as stored on a project record (`None` when unrecognized).
    pub fn stored_source(&self) -> Option<VideoSource> {
        self.source.is_some().then_some(self.source)
    }

    /// Playback URL for the display layer.
    pub fn embed_url(&self) -> String {
        embed_url(&self.video_id, self.source)
    }
}

/// Resolve a free-form link or bare ID.
pub fn resolve(link: &str) -> VideoReference {
    let source = classify(link);
    let video_id = match source {
        VideoSource::YouTube => extract_youtube_id(link),
        VideoSource::Drive => extract_drive_id(link),
        VideoSource::None => String::new(),
    };
    VideoReference::new(link, source, video_id)
}

/// Resolve input that arrived through a Drive-only field.
///
/// Any non-empty input is treated as a Drive link or bare Drive file ID, which
/// is the only way a bare Drive ID gets recognized.
pub fn resolve_drive(link: &str) -> VideoReference {
    if link.is_empty() {
        return VideoReference::new(link, VideoSource::None, String::new());
    }
    VideoReference::new(link, VideoSource::Drive, extract_drive_id(link))
}

/// Classify the hosting platform of a link.
///
/// YouTube wins over Drive. A bare 11-character token is taken as a YouTube
/// ID; bare Drive IDs are indistinguishable from arbitrary text and stay
/// unrecognized.
pub fn classify(link: &str) -> VideoSource {
    if link.is_empty() {
        VideoSource::None
    } else if link.contains("youtube.com") || link.contains("youtu.be") {
        VideoSource::YouTube
    } else if link.contains("drive.google.com") {
        VideoSource::Drive
    } else if is_bare_youtube_id(link) {
        VideoSource::YouTube
    } else {
        VideoSource::None
    }
}

fn is_bare_youtube_id(link: &str) -> bool {
    link.len() == YOUTUBE_ID_LEN && YOUTUBE_BARE_ID.is_match(link)
}

/// Extract a YouTube video ID, or an empty string if none is present.
pub fn extract_youtube_id(link: &str) -> String {
    [&*YOUTUBE_URL_ID, &*YOUTUBE_BARE_ID]
        .into_iter()
        .find_map(|re| re.captures(link).map(|c| c[1].to_string()))
        .unwrap_or_default()
}

/// Extract a Google Drive file ID.
///
/// Input without `/` or `?` is already an ID. Unmatched URLs pass through
/// unchanged.
pub fn extract_drive_id(link: &str) -> String {
    if link.is_empty() {
        return String::new();
    }
    if !link.contains('/') && !link.contains('?') {
        return link.to_string();
    }
    DRIVE_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(link).map(|c| c[1].to_string()))
        .unwrap_or_else(|| link.to_string())
}

/// Default thumbnail for a video, empty when there is no video.
pub fn thumbnail_url(video_id: &str, source: VideoSource) -> String {
    if video_id.is_empty() {
        return String::new();
    }
    match source {
        VideoSource::YouTube => format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video_id),
        VideoSource::Drive => format!("https://drive.google.com/thumbnail?id={}&sz=w800", video_id),
        VideoSource::None => String::new(),
    }
}

/// Embeddable player URL, empty when there is no video.
pub fn embed_url(video_id: &str, source: VideoSource) -> String {
    if video_id.is_empty() {
        return String::new();
    }
    match source {
        VideoSource::YouTube => format!(
            "https://www.youtube.com/embed/{}?autoplay=1&rel=0",
            video_id
        ),
        VideoSource::Drive => format!("https://drive.google.com/file/d/{}/preview", video_id),
        VideoSource::None => String::new(),
    }
}
