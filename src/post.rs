use crate::config::ReleaseInfo;

/// Last line of every announcement body.
pub const ATTRIBUTION_FOOTER: &str =
    "*This post was automatically generated from the GitHub release*";

/// Title and body of an announcement, derived from a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    pub title: String,
    pub body: String,
}

impl PostContent {
    pub fn from_release(release: &ReleaseInfo) -> Self {
        Self {
            title: title(release),
            body: body(release),
        }
    }
}

/// `"{name} ({tag})"` when the release has its own name, otherwise the
/// generic announcement title.
pub fn title(release: &ReleaseInfo) -> String {
    if !release.name.is_empty() && release.name != release.tag {
        format!("{} ({})", release.name, release.tag)
    } else {
        format!("Today RSS Reader {} Released!", release.tag)
    }
}

/// Release notes, a link back to the release page, and the footer.
///
/// An empty release URL still produces the link line.
pub fn body(release: &ReleaseInfo) -> String {
    format!(
        "{}\n\n[View Release on GitHub]({})\n\n---\n{}",
        release.body, release.url, ATTRIBUTION_FOOTER
    )
}
