//! # Data model — wire records and domain projections
//!
//! The backend stores projects in the same table as plain mods and marks
//! them by prefixing the `filename` column with `project:`. That convention
//! stays on the wire ([`ModRecord`]), but the client decides the variant
//! once, when a response is mapped into [`Mod`]: the `kind` field is an
//! explicit [`ModKind`] and the prefix never leaks into view code. Writing
//! back goes through [`ProjectUpdate::for_project`], which re-encodes the
//! prefix so the wire format is preserved exactly.

use serde::{Deserialize, Serialize};

/// Filename prefix the backend uses to mark a record as a project.
pub const PROJECT_PREFIX: &str = "project:";

/// An authenticated or displayed user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// `POST /auth/token` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// Registration payload for `POST /users/`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Profile fields for `PUT /users/me`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
}

/// A mod row exactly as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub filename: String,
    #[serde(default)]
    pub downloads: i64,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub uploader: Option<User>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub project_visibility: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub external_links: Option<Vec<ExternalLink>>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Who can see a published project.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Unlisted,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Visibility::Public, Visibility::Private, Visibility::Unlisted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Unlisted => "unlisted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
            Visibility::Unlisted => "Unlisted",
        }
    }

    pub fn parse(s: &str) -> Visibility {
        match s {
            "private" => Visibility::Private,
            "unlisted" => Visibility::Unlisted,
            _ => Visibility::Public,
        }
    }
}

/// Whether a record is a plain downloadable mod or a published project.
#[derive(Debug, Clone, PartialEq)]
pub enum ModKind {
    /// A plain mod: `filename` is the stored file key.
    Mod { file: String },
    /// A project: the backend encodes its public URL behind [`PROJECT_PREFIX`].
    Project { url: String, visibility: Visibility },
}

/// A mod or project with the wire conventions already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Mod {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub kind: ModKind,
    pub downloads: i64,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub user_id: i64,
    pub uploader: Option<User>,
    pub summary: Option<String>,
    pub license: Option<String>,
    pub icon_url: Option<String>,
    pub external_links: Vec<ExternalLink>,
    pub status: Option<String>,
}

impl Mod {
    pub fn is_project(&self) -> bool {
        matches!(self.kind, ModKind::Project { .. })
    }

    /// The project's public URL, if this is a project.
    pub fn project_url(&self) -> Option<&str> {
        match &self.kind {
            ModKind::Project { url, .. } => Some(url),
            ModKind::Mod { .. } => None,
        }
    }
}

impl From<ModRecord> for Mod {
    fn from(record: ModRecord) -> Self {
        let kind = match record.filename.strip_prefix(PROJECT_PREFIX) {
            Some(url) => ModKind::Project {
                url: url.to_string(),
                visibility: record
                    .project_visibility
                    .as_deref()
                    .map(Visibility::parse)
                    .unwrap_or_default(),
            },
            None => ModKind::Mod {
                file: record.filename,
            },
        };
        Mod {
            id: record.id,
            title: record.title,
            description: record.description,
            kind,
            downloads: record.downloads,
            created_at: record.created_at,
            updated_at: record.updated_at,
            user_id: record.user_id,
            uploader: record.uploader,
            summary: record.summary,
            license: record.license,
            icon_url: record.icon_url,
            external_links: record.external_links.unwrap_or_default(),
            status: record.status,
        }
    }
}

/// Payload for `POST /mods/project`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub url: String,
    pub visibility: Visibility,
    pub summary: String,
}

impl NewProject {
    /// Required-field check, run before any request is issued. A failed
    /// check never leaves the form that raised it.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty()
            || self.url.trim().is_empty()
            || self.summary.trim().is_empty()
        {
            return Err("Please fill in all required fields");
        }
        Ok(())
    }
}

/// Payload for `PUT /mods/{id}`.
///
/// The `filename` field carries the backend's `project:<url>` convention;
/// build through [`ProjectUpdate::for_project`] so the prefix is always
/// re-encoded correctly.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectUpdate {
    pub title: String,
    pub description: String,
    pub filename: String,
    pub project_visibility: Visibility,
    pub summary: String,
    pub license: String,
    pub external_links: Vec<ExternalLink>,
}

impl ProjectUpdate {
    pub fn for_project(
        title: String,
        description: String,
        url: &str,
        visibility: Visibility,
        summary: String,
        license: String,
        external_links: Vec<ExternalLink>,
    ) -> Self {
        Self {
            title,
            description,
            filename: format!("{PROJECT_PREFIX}{url}"),
            project_visibility: visibility,
            summary,
            license,
            external_links,
        }
    }
}

/// An uploaded release of a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Version {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub mod_id: Option<i64>,
    pub version_number: String,
    #[serde(default)]
    pub changelog: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `POST /mods/{id}/versions` response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VersionReceipt {
    pub success: bool,
    pub version: Version,
}

/// One image in a project's gallery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryImage {
    pub id: i64,
    #[serde(default)]
    pub mod_id: Option<i64>,
    pub url: String,
}

/// Where an external link points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Website,
    Github,
    Discord,
    Documentation,
}

impl LinkKind {
    pub const ALL: [LinkKind; 4] = [
        LinkKind::Website,
        LinkKind::Github,
        LinkKind::Discord,
        LinkKind::Documentation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Website => "website",
            LinkKind::Github => "github",
            LinkKind::Discord => "discord",
            LinkKind::Documentation => "documentation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LinkKind::Website => "Website",
            LinkKind::Github => "GitHub",
            LinkKind::Discord => "Discord",
            LinkKind::Documentation => "Documentation",
        }
    }

    pub fn parse(s: &str) -> LinkKind {
        match s {
            "github" => LinkKind::Github,
            "discord" => LinkKind::Discord,
            "documentation" => LinkKind::Documentation,
            _ => LinkKind::Website,
        }
    }
}

/// An off-site link attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalLink {
    #[serde(rename = "type")]
    pub kind: LinkKind,
    pub url: String,
}

/// `GET /mods/{id}/download` response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DownloadUrl {
    pub download_url: String,
}

/// A file picked by the user, ready for a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePayload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn size_kb(&self) -> usize {
        self.bytes.len() / 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str) -> ModRecord {
        ModRecord {
            id: 1,
            title: "Gravity Gun".to_string(),
            description: "Pick things up".to_string(),
            filename: filename.to_string(),
            downloads: 7,
            created_at: "2025-01-01T00:00:00".to_string(),
            updated_at: None,
            user_id: 42,
            uploader: None,
            summary: None,
            license: None,
            project_visibility: Some("unlisted".to_string()),
            icon_url: None,
            external_links: None,
            status: None,
        }
    }

    #[test]
    fn plain_filename_maps_to_mod_kind() {
        let mod_ = Mod::from(record("mods/1/gravity-gun.zip"));
        assert!(!mod_.is_project());
        assert_eq!(
            mod_.kind,
            ModKind::Mod {
                file: "mods/1/gravity-gun.zip".to_string()
            }
        );
        assert_eq!(mod_.project_url(), None);
    }

    #[test]
    fn project_prefix_maps_to_project_kind() {
        let mod_ = Mod::from(record("project:gravity-gun"));
        assert!(mod_.is_project());
        assert_eq!(mod_.project_url(), Some("gravity-gun"));
        assert_eq!(
            mod_.kind,
            ModKind::Project {
                url: "gravity-gun".to_string(),
                visibility: Visibility::Unlisted,
            }
        );
    }

    #[test]
    fn project_update_re_encodes_prefix() {
        let update = ProjectUpdate::for_project(
            "Gravity Gun".to_string(),
            "Pick things up".to_string(),
            "gravity-gun",
            Visibility::Public,
            "A gun for gravity".to_string(),
            "MIT".to_string(),
            Vec::new(),
        );
        assert_eq!(update.filename, "project:gravity-gun");
    }

    #[test]
    fn link_kind_serializes_lowercase() {
        let link = ExternalLink {
            kind: LinkKind::Github,
            url: "https://github.com/example/gravity-gun".to_string(),
        };
        let json = serde_json::to_string(&link).unwrap();
        assert!(json.contains("\"type\":\"github\""));

        let back: ExternalLink = serde_json::from_str(&json).unwrap();
        assert_eq!(back, link);
    }

    #[test]
    fn unknown_visibility_defaults_to_public() {
        assert_eq!(Visibility::parse("friends-only"), Visibility::Public);
    }

    #[test]
    fn new_project_requires_name_url_and_summary() {
        let project = NewProject {
            name: "Gravity Gun".to_string(),
            url: "gravity-gun".to_string(),
            visibility: Visibility::Public,
            summary: "A gun for gravity".to_string(),
        };
        assert!(project.validate().is_ok());

        for blank in ["name", "url", "summary"] {
            let mut incomplete = project.clone();
            match blank {
                "name" => incomplete.name = "  ".to_string(),
                "url" => incomplete.url = String::new(),
                _ => incomplete.summary = String::new(),
            }
            assert!(incomplete.validate().is_err());
        }
    }

    #[test]
    fn mod_record_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": 3,
            "title": "Lamp",
            "description": "A lamp",
            "filename": "mods/3/lamp.zip",
            "downloads": 0,
            "created_at": "2025-02-02T10:00:00",
            "user_id": 9
        }"#;
        let record: ModRecord = serde_json::from_str(json).unwrap();
        let mod_ = Mod::from(record);
        assert!(mod_.external_links.is_empty());
        assert_eq!(mod_.summary, None);
    }
}
