//! Project gallery inspection.

use console::style;

use crate::cli::icons::{dim_arrow, info};
use crate::config::Settings;
use crate::models::ProjectKind;
use crate::repository::ContentRepository;

/// Print the stored project gallery.
pub async fn cmd_projects_list(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let repo = ContentRepository::new(settings.blob_store(false)?);
    let data = repo.read_projects().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    if data.is_empty() {
        println!("{} No projects yet", info());
        return Ok(());
    }

    for kind in ProjectKind::ALL {
        let projects = data.list(kind);
        println!(
            "{} {} ({})",
            info(),
            style(kind.as_str()).bold(),
            projects.len()
        );
        for project in projects {
            let video = match (project.video_source, project.current_video_id()) {
                (Some(source), Some(id)) => format!("{} {}", source, id),
                _ => "no video".to_string(),
            };
            println!(
                "  {} {} {} [{}, {}] {}",
                dim_arrow(),
                style(&project.id).dim(),
                project.title,
                project.category,
                project.year,
                style(video).dim()
            );
        }
    }
    Ok(())
}
