use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

use crate::error::{Result, SlackmojiError};
use crate::models::EmojiName;
use crate::parsers::{extract_crumb, extract_emoji_names, interpret_upload_response, UploadOutcome};
use crate::utils::http::{create_client, fetch_page};

const CUSTOMIZE_URL: &str = "https://{team}.slack.com/customize/emoji";

// Workspace subdomains: letters, digits and hyphens only
static TEAM_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$")
        .expect("Invalid team name regex")
});

/// Authenticated session against one workspace's custom emoji page.
pub struct EmojiRegistry {
    client: Client,
    url: String,
}

impl EmojiRegistry {
    pub fn for_team(team: &str, cookie: &str) -> Result<Self> {
        let invalid = || SlackmojiError::InvalidTeamName(team.to_string());
        let subdomain = team.to_lowercase();
        if !TEAM_NAME_REGEX.is_match(&subdomain) {
            return Err(invalid());
        }

        // The cookie must only ever reach the workspace's own host
        let url = CUSTOMIZE_URL.replace("{team}", &subdomain);
        let parsed = Url::parse(&url).map_err(|_| invalid())?;
        if parsed.host_str() != Some(format!("{}.slack.com", subdomain).as_str()) {
            return Err(invalid());
        }

        Self::with_url(url, cookie)
    }

    pub fn with_url(url: impl Into<String>, cookie: &str) -> Result<Self> {
        Ok(Self {
            client: create_client(cookie)?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn existing_emoji(&self) -> Result<HashSet<String>> {
        let html = fetch_page(&self.client, &self.url).await?;
        let names: HashSet<String> = extract_emoji_names(&html).into_iter().collect();
        info!("Found {} existing emoji", names.len());
        Ok(names)
    }

    /// Fetches a fresh crumb, then submits the image under `name`.
    pub async fn upload(&self, name: &EmojiName, image: &Path) -> Result<UploadOutcome> {
        let page = fetch_page(&self.client, &self.url).await?;
        let crumb = extract_crumb(&page)
            .ok_or_else(|| SlackmojiError::CrumbNotFound(self.url.clone()))?;

        let bytes = tokio::fs::read(image).await?;
        let file_name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.file_name());
        let img = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("image/png")?;

        let form = Form::new()
            .text("add", "1")
            .text("crumb", crumb)
            .text("name", name.as_str().to_string())
            .text("mode", "data")
            .part("img", img);

        debug!("Posting emoji form for {}", name);
        let response = self.client.post(&self.url).multipart(form).send().await?;
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(SlackmojiError::HttpStatus {
                status,
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        Ok(interpret_upload_response(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<form><input type="hidden" name="crumb" value="crumb-42"></form>
        <span data-emoji-name="ok"></span><span data-emoji-name="shipit"></span>"#;

    async fn registry_with_page(server: &MockServer) -> EmojiRegistry {
        Mock::given(method("GET"))
            .and(path("/customize/emoji"))
            .and(header("cookie", "d=token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(server)
            .await;
        EmojiRegistry::with_url(format!("{}/customize/emoji", server.uri()), "d=token").unwrap()
    }

    fn write_png(dir: &Path) -> std::path::PathBuf {
        let image = dir.join("cool.png");
        std::fs::write(&image, b"PNG fake image").unwrap();
        image
    }

    #[test]
    fn team_url_is_built_from_team_name() {
        let registry = EmojiRegistry::for_team("acme", "d=token").unwrap();
        assert_eq!(registry.url(), "https://acme.slack.com/customize/emoji");
    }

    #[test]
    fn team_name_is_lowercased_into_the_host() {
        let registry = EmojiRegistry::for_team("Acme-Corp", "d=token").unwrap();
        assert_eq!(registry.url(), "https://acme-corp.slack.com/customize/emoji");
    }

    #[test]
    fn team_name_cannot_redirect_the_cookie_to_another_host() {
        let teams = [
            "evil.example/x",
            "evil.example?",
            "evil.example#",
            "a.b",
            "user@evil",
            "",
            "-acme",
        ];
        for team in teams {
            assert!(
                matches!(
                    EmojiRegistry::for_team(team, "d=token"),
                    Err(SlackmojiError::InvalidTeamName(_))
                ),
                "{:?} should be rejected",
                team
            );
        }
    }

    #[tokio::test]
    async fn reads_existing_emoji_names() {
        let server = MockServer::start().await;
        let registry = registry_with_page(&server).await;

        let names = registry.existing_emoji().await.unwrap();
        let expected: HashSet<String> = ["ok", "shipit"].iter().map(|s| s.to_string()).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn failed_registry_read_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let url = format!("{}/customize/emoji", server.uri());
        let registry = EmojiRegistry::with_url(url, "d=token").unwrap();

        assert!(matches!(
            registry.existing_emoji().await,
            Err(SlackmojiError::HttpStatus { .. })
        ));
    }

    #[tokio::test]
    async fn upload_posts_crumb_name_and_image() {
        let server = MockServer::start().await;
        let registry = registry_with_page(&server).await;
        Mock::given(method("POST"))
            .and(path("/customize/emoji"))
            .and(header("cookie", "d=token"))
            .and(body_string_contains("crumb-42"))
            .and(body_string_contains("name=\"name\""))
            .and(body_string_contains("name=\"img\"; filename=\"cool.png\""))
            .and(body_string_contains("name=\"mode\""))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>saved</p>"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let image = write_png(dir.path());
        let name = EmojiName::parse("cool").unwrap();

        let outcome = registry.upload(&name, &image).await.unwrap();
        assert_eq!(outcome, UploadOutcome::Accepted);
    }

    #[tokio::test]
    async fn upload_reports_error_marker() {
        let server = MockServer::start().await;
        let registry = registry_with_page(&server).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<p class="alert_error">That name is already taken.</p>"#,
            ))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let image = write_png(dir.path());
        let name = EmojiName::parse("cool").unwrap();

        let outcome = registry.upload(&name, &image).await.unwrap();
        assert_eq!(
            outcome,
            UploadOutcome::Rejected("That name is already taken.".to_string())
        );
    }

    #[tokio::test]
    async fn upload_without_crumb_fails_before_posting() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let url = format!("{}/customize/emoji", server.uri());
        let registry = EmojiRegistry::with_url(url, "d=token").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let image = write_png(dir.path());
        let name = EmojiName::parse("cool").unwrap();

        assert!(matches!(
            registry.upload(&name, &image).await,
            Err(SlackmojiError::CrumbNotFound(_))
        ));
    }
}
