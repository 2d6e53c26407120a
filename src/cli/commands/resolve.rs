//! Video link resolution command.

use console::style;

use crate::cli::icons::{dim_arrow, success, warn};
use crate::video;

/// Resolve a link and print the result.
pub fn cmd_resolve(link: &str, drive: bool, json: bool) -> anyhow::Result<()> {
    let video = if drive {
        video::resolve_drive(link)
    } else {
        video::resolve(link)
    };

    if json {
        let mut value = serde_json::to_value(&video)?;
        value["embedUrl"] = serde_json::Value::String(video.embed_url());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if !video.has_video() {
        println!("{} Not a recognized YouTube or Google Drive link", warn());
        if !drive && !link.trim().is_empty() && !link.contains('/') {
            println!(
                "  {} Bare Google Drive IDs need {}",
                dim_arrow(),
                style("--drive").bold()
            );
        }
        return Ok(());
    }

    println!("{} {} video {}", success(), video.source, style(&video.video_id).bold());
    println!("  {} Thumbnail: {}", dim_arrow(), video.thumbnail_url);
    println!("  {} Embed:     {}", dim_arrow(), video.embed_url());
    Ok(())
}
