use std::path::Path;

use reqwest::Response;

use super::dispatch::Dispatcher;
use super::errors::ClientError;
use super::package::{save_package, PackageSaved};
use super::request::RequestOptions;

/// Admin endpoints, `admin/v1/...`. Require a profile with curator permissions.
#[derive(Debug, Clone)]
pub struct Admin {
    dispatcher: Dispatcher,
}

impl Admin {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Download the package of an app.
    pub async fn get_package(&self, app_id: &str) -> Result<Response, ClientError> {
        self.dispatcher
            .get(&format!("admin/v1/{}/package", app_id), RequestOptions::new())
            .await
    }

    /// Download the package of an app and unpack it into `save_path`, which must be an existing directory.
    pub async fn get_package_and_save(
        &self,
        app_id: &str,
        save_path: &Path,
    ) -> Result<PackageSaved, ClientError> {
        save_package(
            &self.dispatcher,
            &format!("admin/v1/{}/package", app_id),
            save_path,
        )
        .await
    }

    /// Find users.
    pub async fn get_users(&self, options: RequestOptions) -> Result<Response, ClientError> {
        self.dispatcher.get("admin/v1/users", options).await
    }

    /// Find schedules.
    pub async fn get_schedules(&self, options: RequestOptions) -> Result<Response, ClientError> {
        self.dispatcher.get("admin/v1/schedules", options).await
    }

    /// Find collections.
    pub async fn get_collections(&self, options: RequestOptions) -> Result<Response, ClientError> {
        self.dispatcher.get("admin/v1/collections", options).await
    }

    /// Find subscriptions.
    pub async fn get_subscriptions(
        &self,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.dispatcher.get("admin/v1/subscriptions", options).await
    }

    /// Data connections created in a private Gallery.
    pub async fn get_server_data_connections(
        &self,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.dispatcher
            .get("admin/v1/serverdataconnections", options)
            .await
    }

    /// System data connections created on the machine running the server.
    pub async fn get_system_data_connections(
        &self,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.dispatcher
            .get("admin/v1/systemdataconnections", options)
            .await
    }

    /// Find insights.
    pub async fn get_insights(&self, options: RequestOptions) -> Result<Response, ClientError> {
        self.dispatcher.get("admin/v1/insights", options).await
    }

    /// Workflows of a subscription that are marked ready for migration.
    pub async fn get_migratable_workflows(
        &self,
        subscription_id: &str,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.dispatcher
            .get(
                "admin/v1/workflows/migratable",
                options.param("subscriptionId", subscription_id),
            )
            .await
    }

    /// Audit log entries for an entity type, one page at a time.
    pub async fn get_audit_log(
        &self,
        entity: &str,
        page: u32,
        page_size: u32,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        let options = options
            .param("entity", entity)
            .param("page", page)
            .param("pageSize", page_size);

        self.dispatcher.get("admin/v1/auditlog", options).await
    }

    /// Last run job and its current state for every workflow.
    pub async fn get_workflow_jobs(
        &self,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.dispatcher.get("admin/v1/workflows/jobs", options).await
    }

    /// All workflows, optionally filtered by date through query parameters.
    pub async fn get_all_workflows(
        &self,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.dispatcher.get("admin/v1/workflows/all", options).await
    }

    /// Find workflows.
    pub async fn get_workflows(&self, options: RequestOptions) -> Result<Response, ClientError> {
        self.dispatcher.get("admin/v1/workflows", options).await
    }

    /// Publish a YXZP package. Not supported, always fails without sending anything.
    pub async fn post_workflows(&self, _options: RequestOptions) -> Result<Response, ClientError> {
        Err(ClientError::Unimplemented("publishing a workflow package"))
    }

    /// Update an app's ready for migration flag. Not supported, always fails without sending anything.
    pub async fn put_migration_flag(
        &self,
        _options: RequestOptions,
    ) -> Result<Response, ClientError> {
        Err(ClientError::Unimplemented("updating the migration flag"))
    }
}
