//! Video Link Resolution Tests
//!
//! Exercises the public resolver API with the link shapes editors actually
//! paste into the admin panel.

use vidfolio::video::{self, VideoSource};

const RICK: &str = "dQw4w9WgXcQ";

#[test]
fn youtube_link_shapes_resolve_to_same_id() {
    let links = [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
        "https://youtu.be/dQw4w9WgXcQ",
        "https://youtu.be/dQw4w9WgXcQ?si=abcdef",
        "https://www.youtube.com/embed/dQw4w9WgXcQ",
        "https://www.youtube.com/v/dQw4w9WgXcQ",
        "  https://youtu.be/dQw4w9WgXcQ  ",
        RICK,
    ];

    for link in links {
        let resolved = video::resolve(link);
        assert_eq!(resolved.source, VideoSource::YouTube, "{}", link);
        assert_eq!(resolved.video_id, RICK, "{}", link);
        assert_eq!(
            resolved.thumbnail_url,
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
    }
}

#[test]
fn drive_link_shapes() {
    let links = [
        "https://drive.google.com/file/d/1A2B3C4D5E/view?usp=sharing",
        "https://drive.google.com/open?id=1A2B3C4D5E",
        "https://drive.google.com/uc?export=download&id=1A2B3C4D5E",
    ];

    for link in links {
        let resolved = video::resolve(link);
        assert_eq!(resolved.source, VideoSource::Drive, "{}", link);
        assert_eq!(resolved.video_id, "1A2B3C4D5E", "{}", link);
        assert_eq!(
            resolved.thumbnail_url,
            "https://drive.google.com/thumbnail?id=1A2B3C4D5E&sz=w800"
        );
    }
}

#[test]
fn unrecognized_input_is_empty() {
    for link in ["", "   ", "https://example.com/video", "https://vimeo.com/12345"] {
        let resolved = video::resolve(link);
        assert_eq!(resolved.source, VideoSource::None, "{}", link);
        assert!(resolved.video_id.is_empty());
        assert!(resolved.thumbnail_url.is_empty());
        assert!(!resolved.has_video());
    }
}

#[test]
fn bare_drive_id_needs_drive_path() {
    assert_eq!(video::resolve("1A2B3C4D5E").source, VideoSource::None);

    let resolved = video::resolve_drive("1A2B3C4D5E");
    assert_eq!(resolved.source, VideoSource::Drive);
    assert_eq!(resolved.video_id, "1A2B3C4D5E");
}

#[test]
fn extracted_youtube_id_resolves_to_itself() {
    let first = video::resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    let again = video::resolve(&first.video_id);
    assert_eq!(again.source, VideoSource::YouTube);
    assert_eq!(again.video_id, first.video_id);
}

#[test]
fn serialized_reference_uses_lowercase_source() {
    let value = serde_json::to_value(video::resolve(RICK)).unwrap();
    assert_eq!(value["source"], "youtube");
    assert_eq!(value["videoId"], RICK);
    assert_eq!(value["rawInput"], RICK);
}
