//! Mod and project operations against `/mods`.
//!
//! Listing accepts either a free-text search term or a raw `key=value`
//! filter string; the filter form is passed through to the backend
//! unmodified (the profile view relies on `user_id=<id>` arriving
//! verbatim). Upload endpoints are multipart, and their field names
//! (`file`, `version_number`, `changelog`, `icon`, `image`) are a wire
//! contract with the backend.

use reqwest::multipart::{Form, Part};

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{
    DownloadUrl, ExternalLink, FilePayload, GalleryImage, Mod, ModRecord, NewProject,
    ProjectUpdate, Version, VersionReceipt,
};
use serde::Serialize;

/// Query parameters for [`list`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModQuery {
    term: Option<String>,
    filter: Option<String>,
    skip: Option<u32>,
    limit: Option<u32>,
}

impl ModQuery {
    /// Everything, backend default order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Free-text search. An empty term sends no `search` parameter at all.
    pub fn search(term: impl Into<String>) -> Self {
        let term = term.into();
        Self {
            term: (!term.is_empty()).then_some(term),
            ..Self::default()
        }
    }

    /// A raw `key=value` filter, passed through unmodified.
    pub fn filter(raw: impl Into<String>) -> Self {
        Self {
            filter: Some(raw.into()),
            ..Self::default()
        }
    }

    /// Only mods owned by the given user.
    pub fn by_user(user_id: i64) -> Self {
        Self::filter(format!("user_id={user_id}"))
    }

    pub fn skip(mut self, n: u32) -> Self {
        self.skip = Some(n);
        self
    }

    pub fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// The query-string suffix for `/mods/`, including the leading `?`,
    /// or an empty string when there is nothing to send.
    pub fn query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(term) = &self.term {
            params.push(format!("search={}", urlencoding::encode(term)));
        }
        if let Some(raw) = &self.filter {
            params.push(raw.clone());
        }
        if let Some(skip) = self.skip {
            params.push(format!("skip={skip}"));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={limit}"));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// `GET /mods/` with optional search/filter/paging.
pub async fn list(client: &ApiClient, query: &ModQuery) -> Result<Vec<Mod>> {
    let records: Vec<ModRecord> = client
        .get_json(&format!("/mods/{}", query.query_string()))
        .await?;
    Ok(records.into_iter().map(Mod::from).collect())
}

/// `GET /mods/{id}`.
pub async fn get(client: &ApiClient, id: i64) -> Result<Mod> {
    let record: ModRecord = client.get_json(&format!("/mods/{id}")).await?;
    Ok(record.into())
}

/// `POST /mods/` — upload a new mod with its file.
pub async fn create(
    client: &ApiClient,
    title: &str,
    description: &str,
    file: FilePayload,
) -> Result<Mod> {
    let form = Form::new()
        .text("title", title.to_string())
        .text("description", description.to_string())
        .part("file", Part::bytes(file.bytes).file_name(file.name));
    let record: ModRecord = client.post_multipart("/mods/", form).await?;
    Ok(record.into())
}

/// `POST /mods/project` — create a project (a mod without a file).
pub async fn create_project(client: &ApiClient, project: &NewProject) -> Result<Mod> {
    let record: ModRecord = client.post_json("/mods/project", project).await?;
    Ok(record.into())
}

/// `PUT /mods/{id}` — update a project's fields.
pub async fn update(client: &ApiClient, id: i64, update: &ProjectUpdate) -> Result<Mod> {
    let record: ModRecord = client.put_json(&format!("/mods/{id}"), update).await?;
    Ok(record.into())
}

/// `DELETE /mods/{id}`.
pub async fn delete(client: &ApiClient, id: i64) -> Result<()> {
    client.delete(&format!("/mods/{id}")).await
}

/// `GET /mods/{id}/download` — resolve a short-lived download URL.
pub async fn download(client: &ApiClient, id: i64) -> Result<String> {
    let url: DownloadUrl = client.get_json(&format!("/mods/{id}/download")).await?;
    Ok(url.download_url)
}

/// `POST /mods/{id}/versions` — upload a release file.
pub async fn upload_version(
    client: &ApiClient,
    id: i64,
    version_number: &str,
    changelog: &str,
    file: FilePayload,
) -> Result<VersionReceipt> {
    let form = Form::new()
        .part("file", Part::bytes(file.bytes).file_name(file.name))
        .text("version_number", version_number.to_string())
        .text("changelog", changelog.to_string());
    client
        .post_multipart(&format!("/mods/{id}/versions"), form)
        .await
}

/// `GET /mods/{id}/versions`.
pub async fn versions(client: &ApiClient, id: i64) -> Result<Vec<Version>> {
    client.get_json(&format!("/mods/{id}/versions")).await
}

/// `POST /mods/{id}/icon` — upload the project icon.
pub async fn upload_icon(client: &ApiClient, id: i64, icon: FilePayload) -> Result<Mod> {
    let form = Form::new().part("icon", Part::bytes(icon.bytes).file_name(icon.name));
    let record: ModRecord = client
        .post_multipart(&format!("/mods/{id}/icon"), form)
        .await?;
    Ok(record.into())
}

/// `POST /mods/{id}/gallery` — add a gallery image.
pub async fn upload_gallery_image(
    client: &ApiClient,
    id: i64,
    image: FilePayload,
) -> Result<GalleryImage> {
    let form = Form::new().part("image", Part::bytes(image.bytes).file_name(image.name));
    client
        .post_multipart(&format!("/mods/{id}/gallery"), form)
        .await
}

/// `GET /mods/{id}/gallery`.
pub async fn gallery(client: &ApiClient, id: i64) -> Result<Vec<GalleryImage>> {
    client.get_json(&format!("/mods/{id}/gallery")).await
}

/// `DELETE /mods/{id}/gallery/{image_id}`.
pub async fn delete_gallery_image(client: &ApiClient, id: i64, image_id: i64) -> Result<()> {
    client
        .delete(&format!("/mods/{id}/gallery/{image_id}"))
        .await
}

#[derive(Serialize)]
struct LinksBody<'a> {
    links: &'a [ExternalLink],
}

/// `PUT /mods/{id}/links` — replace the project's external links.
pub async fn update_links(client: &ApiClient, id: i64, links: &[ExternalLink]) -> Result<Mod> {
    let record: ModRecord = client
        .put_json(&format!("/mods/{id}/links"), &LinksBody { links })
        .await?;
    Ok(record.into())
}

/// `POST /mods/{id}/submit-review` — hand the project to moderation.
pub async fn submit_for_review(client: &ApiClient, id: i64) -> Result<Mod> {
    let record: ModRecord = client
        .post_json(&format!("/mods/{id}/submit-review"), &serde_json::json!({}))
        .await?;
    Ok(record.into())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use store::MemoryTokens;
    use wiremock::matchers::{
        body_string_contains, method, path, query_param, query_param_is_missing,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::models::{LinkKind, ModKind, Visibility};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(server.uri(), Arc::new(MemoryTokens::new()))
    }

    fn mod_json(id: i64, filename: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": "Gravity Gun",
            "description": "Pick things up",
            "filename": filename,
            "downloads": 3,
            "created_at": "2025-01-01T00:00:00",
            "user_id": 42
        })
    }

    #[test]
    fn search_term_becomes_single_search_param() {
        assert_eq!(ModQuery::search("gravity").query_string(), "?search=gravity");
        assert_eq!(
            ModQuery::search("gravity gun").query_string(),
            "?search=gravity%20gun"
        );
    }

    #[test]
    fn empty_search_sends_no_parameters() {
        assert_eq!(ModQuery::search("").query_string(), "");
        assert_eq!(ModQuery::all().query_string(), "");
    }

    #[test]
    fn filter_string_passes_through_unmodified() {
        assert_eq!(ModQuery::filter("user_id=42").query_string(), "?user_id=42");
        assert_eq!(ModQuery::by_user(42).query_string(), "?user_id=42");
    }

    #[test]
    fn paging_parameters_are_appended() {
        assert_eq!(
            ModQuery::search("lamp").skip(20).limit(10).query_string(),
            "?search=lamp&skip=20&limit=10"
        );
    }

    #[tokio::test]
    async fn list_sends_search_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mods/"))
            .and(query_param("search", "gravity"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([mod_json(1, "a.zip")])))
            .expect(1)
            .mount(&server)
            .await;

        let mods = list(&client_for(&server), &ModQuery::search("gravity"))
            .await
            .unwrap();
        assert_eq!(mods.len(), 1);
    }

    #[tokio::test]
    async fn list_without_search_omits_the_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mods/"))
            .and(query_param_is_missing("search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mods = list(&client_for(&server), &ModQuery::search(""))
            .await
            .unwrap();
        assert!(mods.is_empty());
    }

    #[tokio::test]
    async fn list_passes_filter_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mods/"))
            .and(query_param("user_id", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        list(&client_for(&server), &ModQuery::by_user(42))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn list_decodes_project_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mods/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([mod_json(7, "project:gravity-gun")])),
            )
            .mount(&server)
            .await;

        let mods = list(&client_for(&server), &ModQuery::all()).await.unwrap();
        assert_eq!(
            mods[0].kind,
            ModKind::Project {
                url: "gravity-gun".to_string(),
                visibility: Visibility::Public,
            }
        );
    }

    #[tokio::test]
    async fn update_then_get_round_trips_fields() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let saved = json!({
            "id": 7,
            "title": "Gravity Gun II",
            "description": "Pick more things up",
            "filename": "project:gravity-gun",
            "downloads": 3,
            "created_at": "2025-01-01T00:00:00",
            "user_id": 42,
            "summary": "Now with plasma",
            "license": "MIT"
        });

        Mock::given(method("PUT"))
            .and(path("/mods/7"))
            .and(body_string_contains("Gravity Gun II"))
            .respond_with(ResponseTemplate::new(200).set_body_json(saved.clone()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/mods/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(saved))
            .mount(&server)
            .await;

        let payload = ProjectUpdate::for_project(
            "Gravity Gun II".to_string(),
            "Pick more things up".to_string(),
            "gravity-gun",
            Visibility::Public,
            "Now with plasma".to_string(),
            "MIT".to_string(),
            Vec::new(),
        );
        let updated = update(&client, 7, &payload).await.unwrap();
        let fetched = get(&client, 7).await.unwrap();

        assert_eq!(updated, fetched);
        assert_eq!(fetched.title, "Gravity Gun II");
        assert_eq!(fetched.summary.as_deref(), Some("Now with plasma"));
    }

    #[tokio::test]
    async fn version_upload_uses_contract_field_names() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mods/7/versions"))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("name=\"version_number\""))
            .and(body_string_contains("name=\"changelog\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "version": {
                    "version_number": "1.0.0",
                    "changelog": "Initial release",
                    "file_path": "versions/7/1.0.0/gun.zip",
                    "created_at": "2025-01-02T00:00:00"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = upload_version(
            &client_for(&server),
            7,
            "1.0.0",
            "Initial release",
            FilePayload {
                name: "gun.zip".to_string(),
                bytes: vec![0x50, 0x4b],
            },
        )
        .await
        .unwrap();
        assert!(receipt.success);
        assert_eq!(receipt.version.version_number, "1.0.0");
    }

    #[tokio::test]
    async fn icon_and_gallery_uploads_use_contract_field_names() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mods/7/icon"))
            .and(body_string_contains("name=\"icon\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(mod_json(7, "project:g")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/mods/7/gallery"))
            .and(body_string_contains("name=\"image\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 1, "mod_id": 7, "url": "https://cdn.example.com/g1.png"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let file = FilePayload {
            name: "icon.png".to_string(),
            bytes: vec![0x89],
        };
        upload_icon(&client, 7, file.clone()).await.unwrap();
        let image = upload_gallery_image(&client, 7, file).await.unwrap();
        assert_eq!(image.url, "https://cdn.example.com/g1.png");
    }

    #[tokio::test]
    async fn links_update_wraps_payload_in_links_key() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/mods/7/links"))
            .and(body_string_contains("\"links\""))
            .and(body_string_contains("\"type\":\"discord\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(mod_json(7, "project:g")))
            .expect(1)
            .mount(&server)
            .await;

        let links = vec![ExternalLink {
            kind: LinkKind::Discord,
            url: "https://discord.gg/example".to_string(),
        }];
        update_links(&client_for(&server), 7, &links).await.unwrap();
    }

    #[tokio::test]
    async fn download_unwraps_the_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mods/7/download"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "download_url": "https://cdn.example.com/signed/gun.zip"
            })))
            .mount(&server)
            .await;

        let url = download(&client_for(&server), 7).await.unwrap();
        assert_eq!(url, "https://cdn.example.com/signed/gun.zip");
    }
}
