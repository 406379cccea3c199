use std::fmt::Display;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use getset::Getters;
use reqwest::Response;
use tracing_subscriber::EnvFilter;

use crate::auth::OAuth2;
use crate::client::dispatch::check_status;
use crate::client::{ClientError, Gallery, RequestOptions};
use crate::config::GalleryConfig;

use super::args::{self, AdminCommand, AdminResource, WorkflowCommand};

/// Body of a successful response.
#[derive(Getters, Debug)]
pub struct ResponseText {
    #[getset(get = "pub")]
    text: String,
}

/// Number of bytes written to a local file.
#[derive(Getters, Debug)]
pub struct BytesDownloaded {
    #[getset(get = "pub")]
    num_bytes: u64,
}

fn report<T: Display>(result: Result<T, ClientError>) -> ExitCode {
    match result {
        Ok(resp) => {
            println!("{}", resp);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}

async fn response_text(
    response: Result<Response, ClientError>,
) -> Result<ResponseText, ClientError> {
    let response = check_status(response?).await?;

    Ok(ResponseText {
        text: response.text().await?,
    })
}

async fn download_to_file(
    response: Result<Response, ClientError>,
    file_path: &str,
) -> Result<BytesDownloaded, ClientError> {
    let response = check_status(response?).await?;
    let content = response.bytes().await?;

    tokio::fs::write(file_path, &content).await?;

    Ok(BytesDownloaded {
        num_bytes: content.len() as u64,
    })
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Result<String, String> {
    match value {
        serde_yaml::Value::String(string) => Ok(string.clone()),
        serde_yaml::Value::Number(number) => Ok(number.to_string()),
        serde_yaml::Value::Bool(boolean) => Ok(boolean.to_string()),
        other => Err(format!("expected a string, number or boolean, got {:?}", other)),
    }
}

/// Parse a flat yaml mapping of question names to answers, keeping the order of the file.
fn parse_answers(contents: &str) -> Result<Vec<(String, String)>, String> {
    let mapping: serde_yaml::Mapping =
        serde_yaml::from_str(contents).map_err(|error| error.to_string())?;

    mapping
        .iter()
        .map(|(name, value)| Ok((yaml_scalar_to_string(name)?, yaml_scalar_to_string(value)?)))
        .collect()
}

async fn get_answers_from_file(
    file_path: Option<String>,
) -> Result<Vec<(String, String)>, ExitCode> {
    let Some(file_path) = file_path else {
        return Ok(vec![]);
    };

    let contents = match tokio::fs::read_to_string(file_path).await {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("unable to open file: {}", err);
            return Err(ExitCode::FAILURE);
        }
    };

    match parse_answers(&contents) {
        Ok(answers) => Ok(answers),
        Err(err) => {
            eprintln!("invalid answers: {}", err);
            Err(ExitCode::FAILURE)
        }
    }
}

async fn run_admin(gallery: &Gallery, command: AdminCommand) -> ExitCode {
    let admin = gallery.admin();

    match command {
        AdminCommand::List(list_opts) => {
            let options = RequestOptions::new();

            let response = match list_opts.resource {
                AdminResource::Users => admin.get_users(options).await,
                AdminResource::Schedules => admin.get_schedules(options).await,
                AdminResource::Collections => admin.get_collections(options).await,
                AdminResource::Subscriptions => admin.get_subscriptions(options).await,
                AdminResource::Insights => admin.get_insights(options).await,
                AdminResource::Workflows => admin.get_workflows(options).await,
                AdminResource::AllWorkflows => admin.get_all_workflows(options).await,
                AdminResource::WorkflowJobs => admin.get_workflow_jobs(options).await,
                AdminResource::ServerConnections => {
                    admin.get_server_data_connections(options).await
                }
                AdminResource::SystemConnections => {
                    admin.get_system_data_connections(options).await
                }
            };

            report(response_text(response).await)
        }
        AdminCommand::Migratable(migratable_opts) => report(
            response_text(
                admin
                    .get_migratable_workflows(
                        &migratable_opts.subscription_id,
                        RequestOptions::new(),
                    )
                    .await,
            )
            .await,
        ),
        AdminCommand::AuditLog(audit_opts) => report(
            response_text(
                admin
                    .get_audit_log(
                        &audit_opts.entity,
                        audit_opts.page,
                        audit_opts.page_size,
                        RequestOptions::new(),
                    )
                    .await,
            )
            .await,
        ),
        AdminCommand::Package(package_opts) => report(
            admin
                .get_package_and_save(
                    &package_opts.app_id,
                    Path::new(&package_opts.local_dir_path),
                )
                .await,
        ),
    }
}

async fn run_workflow(gallery: &Gallery, command: WorkflowCommand) -> ExitCode {
    let workflows = gallery.workflows();

    match command {
        WorkflowCommand::Subscription(_) => report(
            response_text(workflows.get_subscription(RequestOptions::new()).await).await,
        ),
        WorkflowCommand::Jobs(jobs_opts) => report(
            response_text(
                workflows
                    .get_jobs(&jobs_opts.app_id, RequestOptions::new())
                    .await,
            )
            .await,
        ),
        WorkflowCommand::Questions(questions_opts) => report(
            response_text(
                workflows
                    .get_questions(&questions_opts.app_id, RequestOptions::new())
                    .await,
            )
            .await,
        ),
        WorkflowCommand::Package(package_opts) => report(
            workflows
                .get_package_and_save(
                    &package_opts.app_id,
                    Path::new(&package_opts.local_dir_path),
                )
                .await,
        ),
        WorkflowCommand::Run(run_opts) => {
            let answers = match get_answers_from_file(run_opts.answers).await {
                Err(exit_code) => return exit_code,
                Ok(answers) => answers,
            };

            report(
                response_text(
                    workflows
                        .post_jobs(&run_opts.app_id, answers, RequestOptions::new())
                        .await,
                )
                .await,
            )
        }
    }
}

/// Parse CLI arguments and environment variables and run `galleryctl`.
pub async fn run() -> ExitCode {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Cannot initialize logger");
        return ExitCode::FAILURE;
    }

    let args: args::GalleryCtlOptions = argh::from_env();

    let mut config = match GalleryConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "Invalid env config for galleryctl");
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    if let Some(url) = args.url {
        config.base_url = url;
    }

    let oauth = Arc::new(OAuth2::new(config.credentials()));
    let gallery = Gallery::new(config.base_url.clone(), oauth.clone());

    match args.command {
        args::Command::Token(_) => match oauth.bearer_token().await {
            Ok(_) => {
                println!("{}", oauth);
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("{}", error);
                ExitCode::FAILURE
            }
        },
        args::Command::Admin(admin_opts) => run_admin(&gallery, admin_opts.command).await,
        args::Command::Job(job_opts) => report(
            response_text(
                gallery
                    .jobs()
                    .get_job(&job_opts.job_id, RequestOptions::new())
                    .await,
            )
            .await,
        ),
        args::Command::Output(output_opts) => {
            let mut options = RequestOptions::new();

            if let Some(format) = output_opts.format {
                options = options.param("format", format);
            }

            report(
                download_to_file(
                    gallery
                        .jobs()
                        .get_job_output(&output_opts.job_id, &output_opts.output_id, options)
                        .await,
                    &output_opts.file_path,
                )
                .await,
            )
        }
        args::Command::Workflow(workflow_opts) => {
            run_workflow(&gallery, workflow_opts.command).await
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::dispatch::tests::test_dispatcher;
    use crate::client::Jobs;

    #[test]
    fn test_parse_answers() {
        let answers = parse_answers(
            r#"
            Q2: "text"
            Q1: 5
            Enabled: true
            "#,
        )
        .unwrap();

        assert_eq!(
            answers,
            vec![
                ("Q2".to_owned(), "text".to_owned()),
                ("Q1".to_owned(), "5".to_owned()),
                ("Enabled".to_owned(), "true".to_owned()),
            ]
        );

        assert!(parse_answers("Q1: [1, 2]").is_err());
        assert!(parse_answers("- just\n- a list").is_err());
    }

    #[tokio::test]
    async fn test_download_to_file() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/webapi/v1/jobs/job-1/output/out-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n1,2\n"))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/webapi/v1/jobs/job-1/output/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no output"))
            .mount(&server)
            .await;

        let jobs = Jobs::new(test_dispatcher(&server));
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("output.csv");
        let file_path = file_path.to_str().unwrap();

        let downloaded = download_to_file(
            jobs.get_job_output("job-1", "out-1", RequestOptions::new())
                .await,
            file_path,
        )
        .await
        .unwrap();

        assert_eq!(*downloaded.num_bytes(), 8);
        assert_eq!(downloaded.to_string(), "Downloaded 8 bytes");
        assert_eq!(std::fs::read_to_string(file_path).unwrap(), "a,b\n1,2\n");

        let error = download_to_file(
            jobs.get_job_output("job-1", "gone", RequestOptions::new())
                .await,
            file_path,
        )
        .await
        .unwrap_err();

        assert!(matches!(error, ClientError::ResponseNotOk(404, _)));
    }
}
