use reqwest::Response;

use super::dispatch::Dispatcher;
use super::errors::ClientError;
use super::request::RequestOptions;

/// Job endpoints, `v1/jobs/...`.
#[derive(Debug, Clone)]
pub struct Jobs {
    dispatcher: Dispatcher,
}

impl Jobs {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get a job and its current state.
    pub async fn get_job(
        &self,
        job_id: &str,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.dispatcher
            .get(&format!("v1/jobs/{}", job_id), options)
            .await
    }

    /// Get one output of a job. Pass the wanted `format` as a query parameter in `options`.
    /// Writing the raw content somewhere is left to the caller.
    pub async fn get_job_output(
        &self,
        job_id: &str,
        output_id: &str,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.dispatcher
            .get(&format!("v1/jobs/{}/output/{}", job_id, output_id), options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::dispatch::tests::test_dispatcher;

    #[tokio::test]
    async fn test_get_job() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/webapi/v1/jobs/job-7"))
            .and(header("authorization", "Bearer static"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": "job-7", "status": "Completed"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let jobs = Jobs::new(test_dispatcher(&server));

        let job: serde_json::Value = jobs
            .get_job("job-7", RequestOptions::new())
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(job["status"], "Completed");
    }

    #[tokio::test]
    async fn test_get_job_output() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/webapi/v1/jobs/job-7/output/out-1"))
            .and(query_param("format", "Csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n1,2\n"))
            .expect(1)
            .mount(&server)
            .await;

        let jobs = Jobs::new(test_dispatcher(&server));

        let response = jobs
            .get_job_output("job-7", "out-1", RequestOptions::new().param("format", "Csv"))
            .await
            .unwrap();

        assert_eq!(response.text().await.unwrap(), "a,b\n1,2\n");
    }
}
