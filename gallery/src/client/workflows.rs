use std::path::Path;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Response;
use serde_json::{json, Value};

use super::dispatch::Dispatcher;
use super::errors::ClientError;
use super::package::{save_package, PackageSaved};
use super::request::{Method, RequestOptions};

/// Build the body Gallery expects when queueing a job: `{"questions": [{"name": .., "value": ..}]}`
/// in the order the answers are given, or `{}` when there are none.
///
/// Answers keep their JSON type, so numbers and booleans are sent as scalars.
pub fn build_questions_body<I, K, V>(questions: I) -> Value
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let questions: Vec<Value> = questions
        .into_iter()
        .map(|(name, value)| {
            let name: String = name.into();
            let value: Value = value.into();
            json!({ "name": name, "value": value })
        })
        .collect();

    if questions.is_empty() {
        return json!({});
    }

    json!({ "questions": questions })
}

/// Workflow endpoints, `v1/workflows/...`.
#[derive(Debug, Clone)]
pub struct Workflows {
    dispatcher: Dispatcher,
}

impl Workflows {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Find workflows in the subscription of the authenticated profile.
    pub async fn get_subscription(
        &self,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.dispatcher
            .get("v1/workflows/subscription", options)
            .await
    }

    /// Queue a job for a workflow with the given answers to its questions.
    pub async fn post_jobs<I, K, V>(
        &self,
        app_id: &str,
        questions: I,
        options: RequestOptions,
    ) -> Result<Response, ClientError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let body = build_questions_body(questions).to_string();
        let options = options.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        self.dispatcher
            .send(
                Method::Post,
                &format!("v1/workflows/{}/jobs", app_id),
                options,
                Some(body.into_bytes()),
            )
            .await
    }

    /// Jobs of a workflow.
    pub async fn get_jobs(
        &self,
        app_id: &str,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.dispatcher
            .get(&format!("v1/workflows/{}/jobs", app_id), options)
            .await
    }

    /// Questions of a workflow.
    pub async fn get_questions(
        &self,
        app_id: &str,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.dispatcher
            .get(&format!("v1/workflows/{}/questions", app_id), options)
            .await
    }

    /// Download the package of a workflow.
    pub async fn get_package(&self, app_id: &str) -> Result<Response, ClientError> {
        self.dispatcher
            .get(
                &format!("v1/workflows/{}/package", app_id),
                RequestOptions::new(),
            )
            .await
    }

    /// Download the package of a workflow and unpack it into `save_path`, which must be an existing directory.
    pub async fn get_package_and_save(
        &self,
        app_id: &str,
        save_path: &Path,
    ) -> Result<PackageSaved, ClientError> {
        save_package(
            &self.dispatcher,
            &format!("v1/workflows/{}/package", app_id),
            save_path,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::dispatch::tests::test_dispatcher;
    use crate::client::package::tests::build_test_package;

    #[test]
    fn test_build_questions_body() {
        let body = build_questions_body([("Q1", "5"), ("Q2", "text")]);

        assert_eq!(
            body,
            json!({
                "questions": [
                    {"name": "Q1", "value": "5"},
                    {"name": "Q2", "value": "text"},
                ]
            })
        );

        let parsed: Value = serde_json::from_str(&body.to_string()).unwrap();
        assert_eq!(parsed, body);
    }

    #[test]
    fn test_build_questions_body_keeps_scalar_types() {
        let body = build_questions_body([
            ("Count", json!(5)),
            ("Enabled", json!(true)),
            ("Region", json!("EMEA")),
        ]);

        assert_eq!(
            body,
            json!({
                "questions": [
                    {"name": "Count", "value": 5},
                    {"name": "Enabled", "value": true},
                    {"name": "Region", "value": "EMEA"},
                ]
            })
        );
    }

    #[test]
    fn test_build_questions_body_empty() {
        let body = build_questions_body(BTreeMap::<String, String>::new());

        assert_eq!(body, json!({}));
        assert_eq!(body.to_string(), "{}");
    }

    #[tokio::test]
    async fn test_post_jobs() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webapi/v1/workflows/app-1/jobs"))
            .and(header("authorization", "Bearer static"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "questions": [
                    {"name": "Q1", "value": "5"},
                    {"name": "Q2", "value": "text"},
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "job-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let workflows = Workflows::new(test_dispatcher(&server));

        let response = workflows
            .post_jobs(
                "app-1",
                vec![("Q1".to_owned(), "5".to_owned()), ("Q2".to_owned(), "text".to_owned())],
                RequestOptions::new(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_read_endpoints() {
        let server = MockServer::start().await;

        for endpoint in [
            "/webapi/v1/workflows/subscription",
            "/webapi/v1/workflows/app-1/jobs",
            "/webapi/v1/workflows/app-1/questions",
        ] {
            Mock::given(method("GET"))
                .and(path(endpoint))
                .respond_with(ResponseTemplate::new(200).set_body_string(endpoint))
                .expect(1)
                .mount(&server)
                .await;
        }

        let workflows = Workflows::new(test_dispatcher(&server));

        let subscription = workflows.get_subscription(RequestOptions::new()).await;
        let jobs = workflows.get_jobs("app-1", RequestOptions::new()).await;
        let questions = workflows.get_questions("app-1", RequestOptions::new()).await;

        assert!(subscription.unwrap().text().await.unwrap().ends_with("subscription"));
        assert!(jobs.unwrap().text().await.unwrap().ends_with("jobs"));
        assert!(questions.unwrap().text().await.unwrap().ends_with("questions"));
    }

    #[tokio::test]
    async fn test_get_package_and_save() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/webapi/v1/workflows/app-1/package"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(build_test_package()))
            .expect(1)
            .mount(&server)
            .await;

        let dest = tempfile::tempdir().unwrap();
        let workflows = Workflows::new(test_dispatcher(&server));

        workflows
            .get_package_and_save("app-1", dest.path())
            .await
            .unwrap();

        assert!(dest.path().join("data/input.csv").is_file());
    }

    #[tokio::test]
    async fn test_get_package_and_save_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/webapi/v1/workflows/app-1/package"))
            .respond_with(ResponseTemplate::new(404).set_body_string("app not found"))
            .mount(&server)
            .await;

        let dest = tempfile::tempdir().unwrap();
        let workflows = Workflows::new(test_dispatcher(&server));

        match workflows
            .get_package_and_save("app-1", dest.path())
            .await
            .unwrap_err()
        {
            ClientError::ResponseNotOk(status, body) => {
                assert_eq!(status, 404);
                assert_eq!(body, "app not found");
            }
            error => panic!("unexpected error {:?}", error),
        }
    }
}
