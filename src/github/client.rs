//! REST client for forking the community repository and opening pull requests.
//!
//! Every call is a single round trip with no retry. A failed step is reported
//! with its name so a half-finished submission can be diagnosed from the
//! error message alone.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{GitHubEndpoint, RepositoryClient};
use crate::config::PullRequestConfig;
use crate::error::{RemoteApiError, Result};
use crate::manifest::ManifestSet;
use crate::template;

const ACCEPT_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const USER_AGENT: &str = concat!("kodegen-bundler-winget/", env!("CARGO_PKG_VERSION"));

/// Longest response body quoted in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Body of every pull request opened by this tool.
pub const PR_BODY: &str = "This PR was automatically created by kodegen.";

#[derive(Debug, Deserialize)]
struct User {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    html_url: String,
}

#[derive(Debug, Serialize)]
struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    reference: &'a str,
    sha: &'a str,
}

#[derive(Debug, Serialize)]
struct PutContentRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
}

#[derive(Debug, Serialize)]
struct CreatePullRequest<'a> {
    title: &'a str,
    head: &'a str,
    base: &'a str,
    body: &'a str,
}

/// Branch a release is pushed to: `winget/<Org-App>/<version>`.
pub fn branch_name(manifests: &ManifestSet) -> String {
    format!(
        "winget/{}/{}",
        manifests.identifier().branch_segment(),
        manifests.package_version()
    )
}

/// Commit message used for every manifest file.
pub fn commit_message(manifests: &ManifestSet) -> String {
    format!(
        "New version: {} version {}",
        manifests.identifier(),
        manifests.package_version()
    )
}

/// Client for the hosting REST API.
///
/// Holds the credential, an optional fork owner override and the endpoint.
/// Nothing else is retained between calls.
#[derive(Clone)]
pub struct GitHubClient {
    token: String,
    fork_owner: Option<String>,
    endpoint: GitHubEndpoint,
    client: Client,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("token", &"<redacted>")
            .field("fork_owner", &self.fork_owner)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Creates a client.
    ///
    /// An empty `fork_owner` is the same as none.
    pub fn new(
        token: impl Into<String>,
        fork_owner: Option<String>,
        endpoint: GitHubEndpoint,
    ) -> std::result::Result<Self, RemoteApiError> {
        let client = Client::builder()
            .timeout(endpoint.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| RemoteApiError::Client { source })?;

        Ok(Self {
            token: token.into(),
            fork_owner: fork_owner.filter(|owner| !owner.is_empty()),
            endpoint,
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.endpoint.url(path))
            .bearer_auth(&self.token)
            .header(ACCEPT, ACCEPT_JSON)
            .header(API_VERSION_HEADER, &self.endpoint.api_version)
    }

    async fn send(
        &self,
        step: &str,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> std::result::Result<Response, RemoteApiError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RemoteApiError::Cancelled { step: step.to_string() }),
            sent = request.send() => sent.map_err(|source| RemoteApiError::Transport {
                step: step.to_string(),
                source,
            }),
        }
    }

    /// Sends `request` and fails unless the status is one of `accepted`,
    /// or any 2xx when `accepted` is empty.
    async fn send_expecting(
        &self,
        step: &str,
        request: RequestBuilder,
        accepted: &[StatusCode],
        cancel: &CancellationToken,
    ) -> std::result::Result<Response, RemoteApiError> {
        let response = self.send(step, request, cancel).await?;
        let status = response.status();
        let ok = if accepted.is_empty() {
            status.is_success()
        } else {
            accepted.contains(&status)
        };
        if ok {
            Ok(response)
        } else {
            Err(status_error(step, response, cancel).await)
        }
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        step: &str,
        response: Response,
        cancel: &CancellationToken,
    ) -> std::result::Result<T, RemoteApiError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RemoteApiError::Cancelled { step: step.to_string() }),
            decoded = response.json::<T>() => decoded.map_err(|source| RemoteApiError::Decode {
                step: step.to_string(),
                source,
            }),
        }
    }

    /// Login of the user the token belongs to.
    pub async fn current_user(
        &self,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, RemoteApiError> {
        const STEP: &str = "resolve identity";
        let response = self
            .send_expecting(STEP, self.request(Method::GET, "/user"), &[], cancel)
            .await?;
        let user: User = self.decode(STEP, response, cancel).await?;
        Ok(user.login)
    }

    /// Whether `owner` already has a copy of the upstream repository.
    ///
    /// 2xx means yes and 404 means no. Anything else is an error rather than
    /// a guess.
    pub async fn fork_exists(
        &self,
        owner: &str,
        cancel: &CancellationToken,
    ) -> std::result::Result<bool, RemoteApiError> {
        const STEP: &str = "check fork";
        let path = self.endpoint.fork_path(owner, "");
        let response = self
            .send(STEP, self.request(Method::GET, &path), cancel)
            .await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(status_error(STEP, response, cancel).await),
        }
    }

    async fn create_fork(&self, cancel: &CancellationToken) -> std::result::Result<(), RemoteApiError> {
        let path = self.endpoint.upstream_path("/forks");
        self.send_expecting(
            "create fork",
            self.request(Method::POST, &path),
            &[StatusCode::OK, StatusCode::ACCEPTED],
            cancel,
        )
        .await?;
        Ok(())
    }

    async fn wait_for_fork(&self, cancel: &CancellationToken) -> std::result::Result<(), RemoteApiError> {
        let delay = self.endpoint.fork_settle_delay;
        if delay.is_zero() {
            return Ok(());
        }
        log::debug!("Waiting {:?} for fork to become available", delay);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RemoteApiError::Cancelled { step: "create fork".to_string() }),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }

    async fn base_sha(
        &self,
        branch: &str,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, RemoteApiError> {
        const STEP: &str = "get base branch";
        let path = self
            .endpoint
            .upstream_path(&format!("/git/ref/heads/{branch}"));
        let response = self
            .send_expecting(STEP, self.request(Method::GET, &path), &[], cancel)
            .await?;
        let git_ref: GitRef = self.decode(STEP, response, cancel).await?;
        Ok(git_ref.object.sha)
    }

    async fn create_branch(
        &self,
        owner: &str,
        branch: &str,
        sha: &str,
        cancel: &CancellationToken,
    ) -> std::result::Result<(), RemoteApiError> {
        let path = self.endpoint.fork_path(owner, "/git/refs");
        let reference = format!("refs/heads/{branch}");
        let request = self.request(Method::POST, &path).json(&CreateRefRequest {
            reference: &reference,
            sha,
        });
        self.send_expecting("create branch", request, &[StatusCode::CREATED], cancel)
            .await?;
        Ok(())
    }

    async fn commit_file(
        &self,
        owner: &str,
        branch: &str,
        file: &str,
        content: &str,
        message: &str,
        cancel: &CancellationToken,
    ) -> std::result::Result<(), RemoteApiError> {
        let path = self.endpoint.fork_path(owner, &format!("/contents/{file}"));
        let request = self.request(Method::PUT, &path).json(&PutContentRequest {
            message,
            content: STANDARD.encode(content),
            branch,
        });
        self.send_expecting(
            &format!("commit {file}"),
            request,
            &[StatusCode::OK, StatusCode::CREATED],
            cancel,
        )
        .await?;
        Ok(())
    }

    async fn open_pull_request(
        &self,
        body: &CreatePullRequest<'_>,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, RemoteApiError> {
        const STEP: &str = "create pull request";
        let path = self.endpoint.upstream_path("/pulls");
        let request = self.request(Method::POST, &path).json(body);
        let response = self.send_expecting(STEP, request, &[], cancel).await?;
        let pr: PullRequest = self.decode(STEP, response, cancel).await?;
        Ok(pr.html_url)
    }

    async fn effective_owner(
        &self,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, RemoteApiError> {
        match &self.fork_owner {
            Some(owner) => Ok(owner.clone()),
            None => self.current_user(cancel).await,
        }
    }
}

impl RepositoryClient for GitHubClient {
    async fn resolve_identity(&self, cancel: &CancellationToken) -> Result<String> {
        Ok(self.current_user(cancel).await?)
    }

    async fn ensure_fork(&self, cancel: &CancellationToken) -> Result<String> {
        if let Some(owner) = &self.fork_owner {
            log::debug!("Using configured fork owner {}", owner);
            return Ok(owner.clone());
        }

        let user = self.current_user(cancel).await?;
        if self.fork_exists(&user, cancel).await? {
            log::debug!("Fork of {} exists for {}", self.endpoint.upstream_repo, user);
            return Ok(user);
        }

        log::info!(
            "Forking {}/{} for {}",
            self.endpoint.upstream_owner,
            self.endpoint.upstream_repo,
            user
        );
        self.create_fork(cancel).await?;
        self.wait_for_fork(cancel).await?;
        Ok(user)
    }

    async fn create_pull_request(
        &self,
        manifests: &ManifestSet,
        pr: &PullRequestConfig,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let owner = self.effective_owner(cancel).await?;
        let sha = self.base_sha(&pr.base_branch, cancel).await?;

        let branch = branch_name(manifests);
        log::info!("Creating branch {} in {}/{}", branch, owner, self.endpoint.upstream_repo);
        self.create_branch(&owner, &branch, &sha, cancel).await?;

        // Files are committed one request at a time; a failure leaves the
        // earlier commits on the branch.
        let files = manifests.files()?;
        let message = commit_message(manifests);
        for (path, content) in &files {
            log::debug!("Committing {}", path);
            self.commit_file(&owner, &branch, path, content, &message, cancel)
                .await?;
        }

        let id = manifests.identifier().as_str();
        let title = template::render(
            &pr.title,
            &[("PackageId", id), ("Version", manifests.package_version())],
        );
        let head = format!("{owner}:{branch}");
        let url = self
            .open_pull_request(
                &CreatePullRequest {
                    title: &title,
                    head: &head,
                    base: &pr.base_branch,
                    body: PR_BODY,
                },
                cancel,
            )
            .await?;

        log::info!("Opened pull request {}", url);
        Ok(url)
    }
}

async fn status_error(
    step: &str,
    response: Response,
    cancel: &CancellationToken,
) -> RemoteApiError {
    let status = response.status().as_u16();
    let body = tokio::select! {
        biased;
        _ = cancel.cancelled() => return RemoteApiError::Cancelled { step: step.to_string() },
        text = response.text() => text.unwrap_or_default(),
    };
    RemoteApiError::Status {
        step: step.to_string(),
        status,
        body: truncate(body.trim(), MAX_ERROR_BODY),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::config::{InstallerConfig, MetadataConfig, WingetConfig};
    use crate::error::Error;
    use crate::manifest::{Installer, ManifestSettings, compile};

    const TOKEN: &str = "ghp_test";

    fn client(server: &MockServer, fork_owner: Option<&str>) -> GitHubClient {
        GitHubClient::new(
            TOKEN,
            fork_owner.map(str::to_string),
            GitHubEndpoint::with_api_base(server.base_url()),
        )
        .unwrap()
    }

    fn manifests() -> ManifestSet {
        let config = WingetConfig {
            package_id: "MyOrg.MyApp".into(),
            metadata: MetadataConfig {
                publisher: "My Organization".into(),
                name: "My Application".into(),
                short_description: "A useful application".into(),
                license: "MIT".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let spec = InstallerConfig {
            url: "https://example.com/app.msi".into(),
            architecture: "x64".into(),
            kind: "msi".into(),
            ..Default::default()
        };
        let installer = Installer::resolve(&spec, spec.url.clone(), "AB12".into());
        compile(&config, "1.0.0", vec![installer], &ManifestSettings::default()).unwrap()
    }

    #[test]
    fn branch_and_commit_naming() {
        let set = manifests();
        assert_eq!(branch_name(&set), "winget/MyOrg-MyApp/1.0.0");
        assert_eq!(commit_message(&set), "New version: MyOrg.MyApp version 1.0.0");
    }

    #[test]
    fn debug_output_hides_token() {
        let client = GitHubClient::new("ghp_secret", None, GitHubEndpoint::default()).unwrap();
        assert!(!format!("{client:?}").contains("ghp_secret"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }

    #[tokio::test]
    async fn cancellation_while_reading_error_body_wins() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/user");
                then.status(500).body("upstream exploded");
            })
            .await;

        let client = client(&server, None);
        let response = client
            .send(
                "resolve identity",
                client.request(Method::GET, "/user"),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = status_error("resolve identity", response, &cancel).await;
        assert!(
            matches!(err, RemoteApiError::Cancelled { ref step } if step == "resolve identity"),
            "{err}"
        );
    }

    #[tokio::test]
    async fn requests_carry_auth_and_version_headers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/user")
                    .header("authorization", "Bearer ghp_test")
                    .header("accept", "application/vnd.github+json")
                    .header("x-github-api-version", "2022-11-28");
                then.status(200).json_body(json!({ "login": "octocat" }));
            })
            .await;

        let login = client(&server, None)
            .resolve_identity(&CancellationToken::new())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(login, "octocat");
    }

    #[tokio::test]
    async fn configured_fork_owner_skips_network() {
        let server = MockServer::start_async().await;
        let user = server
            .mock_async(|when, then| {
                when.method(GET).path("/user");
                then.status(200).json_body(json!({ "login": "octocat" }));
            })
            .await;

        let owner = client(&server, Some("release-bot"))
            .ensure_fork(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(owner, "release-bot");
        assert_eq!(user.calls_async().await, 0);
    }

    #[tokio::test]
    async fn existing_fork_is_reused() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/user");
                then.status(200).json_body(json!({ "login": "octocat" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octocat/winget-pkgs");
                then.status(200).json_body(json!({ "full_name": "octocat/winget-pkgs" }));
            })
            .await;
        let fork = server
            .mock_async(|when, then| {
                when.method(POST).path("/repos/microsoft/winget-pkgs/forks");
                then.status(202);
            })
            .await;

        let owner = client(&server, None)
            .ensure_fork(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(owner, "octocat");
        assert_eq!(fork.calls_async().await, 0);
    }

    #[tokio::test]
    async fn missing_fork_is_created() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/user");
                then.status(200).json_body(json!({ "login": "octocat" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octocat/winget-pkgs");
                then.status(404).json_body(json!({ "message": "Not Found" }));
            })
            .await;
        let fork = server
            .mock_async(|when, then| {
                when.method(POST).path("/repos/microsoft/winget-pkgs/forks");
                then.status(202).json_body(json!({ "full_name": "octocat/winget-pkgs" }));
            })
            .await;

        let owner = client(&server, None)
            .ensure_fork(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(owner, "octocat");
        fork.assert_async().await;
    }

    #[tokio::test]
    async fn unexpected_fork_check_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/user");
                then.status(200).json_body(json!({ "login": "octocat" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octocat/winget-pkgs");
                then.status(500).body("boom");
            })
            .await;

        let err = client(&server, None)
            .ensure_fork(&CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            Error::RemoteApi(RemoteApiError::Status { step, status, body }) => {
                assert_eq!(step, "check fork");
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn fork_creation_failure_is_terminal() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/user");
                then.status(200).json_body(json!({ "login": "octocat" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octocat/winget-pkgs");
                then.status(404);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/repos/microsoft/winget-pkgs/forks");
                then.status(403).body("forbidden");
            })
            .await;

        let err = client(&server, None)
            .ensure_fork(&CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("create fork: API error 403"));
    }

    #[tokio::test]
    async fn settle_delay_is_cancellable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/user");
                then.status(200).json_body(json!({ "login": "octocat" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octocat/winget-pkgs");
                then.status(404);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/repos/microsoft/winget-pkgs/forks");
                then.status(202);
            })
            .await;

        let endpoint = GitHubEndpoint {
            fork_settle_delay: Duration::from_secs(60),
            ..GitHubEndpoint::with_api_base(server.base_url())
        };
        let client = GitHubClient::new(TOKEN, None, endpoint).unwrap();
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let err = tokio::time::timeout(Duration::from_secs(10), client.ensure_fork(&cancel))
            .await
            .expect("cancellation should end the wait")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::RemoteApi(RemoteApiError::Cancelled { .. })
        ));
    }

    #[tokio::test]
    async fn creates_branch_commits_files_and_opens_pull_request() {
        let server = MockServer::start_async().await;
        let user = server
            .mock_async(|when, then| {
                when.method(GET).path("/user");
                then.status(200).json_body(json!({ "login": "octocat" }));
            })
            .await;
        let base = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/repos/microsoft/winget-pkgs/git/ref/heads/master");
                then.status(200)
                    .json_body(json!({ "ref": "refs/heads/master", "object": { "sha": "abc123" } }));
            })
            .await;
        let branch = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/repos/octocat/winget-pkgs/git/refs")
                    .json_body(json!({
                        "ref": "refs/heads/winget/MyOrg-MyApp/1.0.0",
                        "sha": "abc123"
                    }));
                then.status(201).json_body(json!({ "ref": "refs/heads/winget/MyOrg-MyApp/1.0.0" }));
            })
            .await;

        let prefix = "/repos/octocat/winget-pkgs/contents/manifests/m/MyOrg.MyApp/1.0.0";
        let mut commits = Vec::new();
        for (file, status) in [
            ("MyOrg.MyApp.yaml", 201),
            ("MyOrg.MyApp.installer.yaml", 201),
            ("MyOrg.MyApp.locale.en-US.yaml", 200),
        ] {
            let path = format!("{prefix}/{file}");
            commits.push(
                server
                    .mock_async(move |when, then| {
                        when.method(PUT).path(path);
                        then.status(status).json_body(json!({}));
                    })
                    .await,
            );
        }

        let pulls = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/repos/microsoft/winget-pkgs/pulls")
                    .json_body(json!({
                        "title": "New version: MyOrg.MyApp version 1.0.0",
                        "head": "octocat:winget/MyOrg-MyApp/1.0.0",
                        "base": "master",
                        "body": PR_BODY
                    }));
                then.status(201).json_body(json!({
                    "html_url": "https://github.com/microsoft/winget-pkgs/pull/1"
                }));
            })
            .await;

        let url = client(&server, None)
            .create_pull_request(
                &manifests(),
                &PullRequestConfig::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(url, "https://github.com/microsoft/winget-pkgs/pull/1");
        user.assert_async().await;
        base.assert_async().await;
        branch.assert_async().await;
        for commit in &commits {
            commit.assert_async().await;
        }
        pulls.assert_async().await;
    }

    #[tokio::test]
    async fn failed_commit_stops_before_pull_request() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/repos/microsoft/winget-pkgs/git/ref/heads/main");
                then.status(200).json_body(json!({ "object": { "sha": "abc123" } }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/repos/release-bot/winget-pkgs/git/refs");
                then.status(201);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(PUT);
                then.status(409).body("conflict");
            })
            .await;
        let pulls = server
            .mock_async(|when, then| {
                when.method(POST).path("/repos/microsoft/winget-pkgs/pulls");
                then.status(201).json_body(json!({ "html_url": "https://example.com/pr/1" }));
            })
            .await;

        let pr = PullRequestConfig {
            fork_owner: "release-bot".into(),
            base_branch: "main".into(),
            ..Default::default()
        };
        let err = client(&server, Some("release-bot"))
            .create_pull_request(&manifests(), &pr, &CancellationToken::new())
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.starts_with("commit manifests/m/MyOrg.MyApp/1.0.0/"), "{msg}");
        assert!(msg.contains("409"));
        assert_eq!(pulls.calls_async().await, 0);
    }

    #[tokio::test]
    async fn existing_branch_is_reported_with_step() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/repos/microsoft/winget-pkgs/git/ref/heads/master");
                then.status(200).json_body(json!({ "object": { "sha": "abc123" } }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/repos/release-bot/winget-pkgs/git/refs");
                then.status(422).body("Reference already exists");
            })
            .await;

        let err = client(&server, Some("release-bot"))
            .create_pull_request(
                &manifests(),
                &PullRequestConfig::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "create branch: API error 422: Reference already exists"
        );
    }

    #[tokio::test]
    async fn undecodable_identity_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/user");
                then.status(200).body("not json");
            })
            .await;

        let err = client(&server, None)
            .resolve_identity(&CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::RemoteApi(RemoteApiError::Decode { .. })
        ));
    }
}
