//! The Contentful client and its resource services.

use crate::clients::{HttpClient, HttpError, RetryPolicy};
use crate::config::{AccessToken, ApiKind, BaseUrl, ContentfulConfig, EnvironmentId};
use crate::rest::build_path;
use crate::rest::resources::{
    AccessTokenService, AppDefinitionService, AppInstallationService, AssetService,
    ContentTypeService, EditorInterfaceService, EntryService, EntryTaskService,
    EnvironmentAliasService, EnvironmentService, ExtensionService, LocaleService,
    OrganizationService, RoleService, ScheduledActionService, SnapshotService, SpaceService,
    UploadService, UsageService, UserService, WebhookService,
};

/// A client for one Contentful REST API.
///
/// `Client` pairs an [`HttpClient`] with the environment used for
/// environment-scoped paths. Resource services borrow it:
///
/// ```rust,ignore
/// use contentful::{AccessToken, Client, Context};
///
/// let client = Client::management(AccessToken::new("CFPAT-...")?)?;
/// let ctx = Context::background();
///
/// let spaces = client.spaces().list(&ctx, None).await?;
/// let entry = client.entries().get(&ctx, "space-id", "entry-id").await?;
/// ```
///
/// # Thread Safety
///
/// `Client` is `Clone`, `Send` and `Sync`. Clones share the connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    http: HttpClient,
    environment: EnvironmentId,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a client from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &ContentfulConfig) -> Result<Self, HttpError> {
        if !config.environment().is_master() {
            tracing::debug!(environment = %config.environment(), "using non-default environment");
        }
        Ok(Self {
            http: HttpClient::new(config)?,
            environment: config.environment().clone(),
        })
    }

    fn for_api(token: AccessToken, api: ApiKind) -> Result<Self, HttpError> {
        let config = ContentfulConfig::builder()
            .access_token(token)
            .api(api)
            .build()?;
        Self::new(&config)
    }

    /// Creates a Content Management API client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn management(token: AccessToken) -> Result<Self, HttpError> {
        Self::for_api(token, ApiKind::Management)
    }

    /// Creates a Content Delivery API client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn delivery(token: AccessToken) -> Result<Self, HttpError> {
        Self::for_api(token, ApiKind::Delivery)
    }

    /// Creates a Content Preview API client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn preview(token: AccessToken) -> Result<Self, HttpError> {
        Self::for_api(token, ApiKind::Preview)
    }

    /// Creates an Upload API client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn upload(token: AccessToken) -> Result<Self, HttpError> {
        Self::for_api(token, ApiKind::Upload)
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the environment used for environment-scoped paths.
    #[must_use]
    pub const fn environment(&self) -> &EnvironmentId {
        &self.environment
    }

    /// Points the client at another base URL.
    pub fn set_base_url(&mut self, base_url: BaseUrl) {
        self.http.set_base_url(base_url);
    }

    /// Switches the environment used for environment-scoped paths.
    pub fn set_environment(&mut self, environment: EnvironmentId) {
        tracing::debug!(%environment, "switching environment");
        self.environment = environment;
    }

    /// Sets or clears the `X-Contentful-Organization` header.
    pub fn set_organization(&mut self, organization: Option<String>) {
        self.http.set_organization(organization);
    }

    /// Replaces the rate-limit retry policy.
    pub fn set_retry_policy(&mut self, policy: RetryPolicy) {
        self.http.set_retry_policy(policy);
    }

    /// `/spaces/{space_id}`
    pub(crate) fn space_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(build_path("/spaces/{space_id}", &[("space_id", space_id)])?)
    }

    /// `/organizations/{organization_id}`
    pub(crate) fn organization_path(&self, organization_id: &str) -> Result<String, HttpError> {
        Ok(build_path(
            "/organizations/{organization_id}",
            &[("organization_id", organization_id)],
        )?)
    }

    /// `/spaces/{space_id}/environments/{environment}`
    pub(crate) fn environment_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(build_path(
            "/spaces/{space_id}/environments/{environment}",
            &[
                ("space_id", space_id),
                ("environment", self.environment.as_ref()),
            ],
        )?)
    }

    /// Spaces.
    #[must_use]
    pub const fn spaces(&self) -> SpaceService<'_> {
        SpaceService::new(self)
    }

    /// Environments of a space.
    #[must_use]
    pub const fn environments(&self) -> EnvironmentService<'_> {
        EnvironmentService::new(self)
    }

    /// Entries in the client's environment.
    #[must_use]
    pub const fn entries(&self) -> EntryService<'_> {
        EntryService::new(self)
    }

    /// Assets in the client's environment.
    #[must_use]
    pub const fn assets(&self) -> AssetService<'_> {
        AssetService::new(self)
    }

    /// Content types in the client's environment.
    #[must_use]
    pub const fn content_types(&self) -> ContentTypeService<'_> {
        ContentTypeService::new(self)
    }

    /// Locales in the client's environment.
    #[must_use]
    pub const fn locales(&self) -> LocaleService<'_> {
        LocaleService::new(self)
    }

    /// Roles of a space.
    #[must_use]
    pub const fn roles(&self) -> RoleService<'_> {
        RoleService::new(self)
    }

    /// Webhook definitions of a space.
    #[must_use]
    pub const fn webhooks(&self) -> WebhookService<'_> {
        WebhookService::new(self)
    }

    /// Uploads, served by the Upload API.
    #[must_use]
    pub const fn uploads(&self) -> UploadService<'_> {
        UploadService::new(self)
    }

    /// Environment aliases of a space.
    #[must_use]
    pub const fn environment_aliases(&self) -> EnvironmentAliasService<'_> {
        EnvironmentAliasService::new(self)
    }

    /// Editor interfaces in the client's environment.
    #[must_use]
    pub const fn editor_interfaces(&self) -> EditorInterfaceService<'_> {
        EditorInterfaceService::new(self)
    }

    /// Tasks on entries in the client's environment.
    #[must_use]
    pub const fn entry_tasks(&self) -> EntryTaskService<'_> {
        EntryTaskService::new(self)
    }

    /// UI extensions in the client's environment.
    #[must_use]
    pub const fn extensions(&self) -> ExtensionService<'_> {
        ExtensionService::new(self)
    }

    /// Snapshots of entries and content types in the client's environment.
    #[must_use]
    pub const fn snapshots(&self) -> SnapshotService<'_> {
        SnapshotService::new(self)
    }

    /// Scheduled actions in the client's environment.
    #[must_use]
    pub const fn scheduled_actions(&self) -> ScheduledActionService<'_> {
        ScheduledActionService::new(self)
    }

    /// Apps installed in the client's environment.
    #[must_use]
    pub const fn app_installations(&self) -> AppInstallationService<'_> {
        AppInstallationService::new(self)
    }

    /// App definitions of an organization.
    #[must_use]
    pub const fn app_definitions(&self) -> AppDefinitionService<'_> {
        AppDefinitionService::new(self)
    }

    /// Organizations.
    #[must_use]
    pub const fn organizations(&self) -> OrganizationService<'_> {
        OrganizationService::new(self)
    }

    /// Usage reports of an organization.
    #[must_use]
    pub const fn usages(&self) -> UsageService<'_> {
        UsageService::new(self)
    }

    /// The authenticated user.
    #[must_use]
    pub const fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    /// Personal access tokens of the authenticated user.
    #[must_use]
    pub const fn access_tokens(&self) -> AccessTokenService<'_> {
        AccessTokenService::new(self)
    }
}
