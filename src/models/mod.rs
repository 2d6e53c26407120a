//! Data models for vidfolio.

mod brief;
mod project;
mod site_content;

pub use brief::{BriefRequest, CreativeBrief};
pub use project::{Project, ProjectKind, ProjectsData};
pub use site_content::{
    AboutSection, ContactSection, HeroSection, SectionError, ServiceItem, SiteContent,
    SocialLinks,
};
