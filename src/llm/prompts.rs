//! Prompt templates for brief generation.

/// Render the creative brief prompt for a request.
pub fn brief_prompt(client_name: &str, project_type: &str, description: &str) -> String {
    format!(
        r#"You are an experienced video production consultant working alongside a professional video editor.

A prospective client named "{client_name}" is asking about a "{project_type}" project.

Their description of the project: "{description}"

Write a preliminary creative brief the editor can review before replying. Based on the request, provide:
1. summary: a short professional summary of the project vision.
2. moodBoardSuggestions: visual mood and style keywords for a mood board.
3. estimatedTimeline: a rough production timeline matching the complexity (for example "2-3 weeks" or "2 months").
4. technicalRequirements: likely technical needs (for example "Drone footage", "Motion graphics", "Color grading").

Respond with a single JSON object using exactly those four keys."#
    )
}
