use std::str::FromStr;

use argh::FromArgs;

#[derive(FromArgs, PartialEq, Debug)]
/// galleryctl, CLI tool for interacting with the Gallery API, credentials are read from
/// GALLERY_BASE_URL, GALLERY_AUTH_URL, GALLERY_CLIENT_ID and GALLERY_CLIENT_SECRET
pub struct GalleryCtlOptions {
    #[argh(option)]
    /// gallery API root url, overrides GALLERY_BASE_URL
    pub url: Option<String>,

    #[argh(subcommand)]
    pub command: Command,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub enum Command {
    Token(TokenOpts),
    Admin(AdminOpts),
    Job(JobOpts),
    Output(OutputOpts),
    Workflow(WorkflowOpts),
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "token")]
/// mint a bearer token and print the authenticator state
pub struct TokenOpts {}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "admin")]
/// query admin endpoints
pub struct AdminOpts {
    #[argh(subcommand)]
    pub command: AdminCommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub enum AdminCommand {
    List(AdminListOpts),
    Migratable(MigratableOpts),
    AuditLog(AuditLogOpts),
    Package(PackageOpts),
}

/// Admin collections that can be listed without arguments.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum AdminResource {
    Users,
    Schedules,
    Collections,
    Subscriptions,
    Insights,
    Workflows,
    AllWorkflows,
    WorkflowJobs,
    ServerConnections,
    SystemConnections,
}

impl FromStr for AdminResource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(AdminResource::Users),
            "schedules" => Ok(AdminResource::Schedules),
            "collections" => Ok(AdminResource::Collections),
            "subscriptions" => Ok(AdminResource::Subscriptions),
            "insights" => Ok(AdminResource::Insights),
            "workflows" => Ok(AdminResource::Workflows),
            "all-workflows" => Ok(AdminResource::AllWorkflows),
            "workflow-jobs" => Ok(AdminResource::WorkflowJobs),
            "server-connections" => Ok(AdminResource::ServerConnections),
            "system-connections" => Ok(AdminResource::SystemConnections),
            other => Err(format!("unknown admin resource {}", other)),
        }
    }
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "list")]
/// list an admin collection: users, schedules, collections, subscriptions, insights,
/// workflows, all-workflows, workflow-jobs, server-connections or system-connections
pub struct AdminListOpts {
    #[argh(positional)]
    /// collection to list
    pub resource: AdminResource,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "migratable")]
/// list workflows of a subscription that are ready for migration
pub struct MigratableOpts {
    #[argh(positional)]
    /// id of the subscription
    pub subscription_id: String,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "audit-log")]
/// list audit log entries for an entity type
pub struct AuditLogOpts {
    #[argh(positional)]
    /// entity type, e.g. users
    pub entity: String,

    #[argh(option, default = "1")]
    /// page number
    pub page: u32,

    #[argh(option, default = "100")]
    /// number of entries per page
    pub page_size: u32,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "package")]
/// download a package and unpack it into a directory
pub struct PackageOpts {
    #[argh(positional)]
    /// id of the app
    pub app_id: String,

    #[argh(positional)]
    /// existing local directory to unpack the package into
    pub local_dir_path: String,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "job")]
/// describe a job and its current state
pub struct JobOpts {
    #[argh(positional)]
    /// id of the job
    pub job_id: String,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "output")]
/// download an output of a job to a file
pub struct OutputOpts {
    #[argh(positional)]
    /// id of the job
    pub job_id: String,

    #[argh(positional)]
    /// id of the output
    pub output_id: String,

    #[argh(positional)]
    /// local file path to write the output to
    pub file_path: String,

    #[argh(option)]
    /// output format, e.g. Csv or Raw
    pub format: Option<String>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "workflow")]
/// query and run workflows
pub struct WorkflowOpts {
    #[argh(subcommand)]
    pub command: WorkflowCommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub enum WorkflowCommand {
    Subscription(SubscriptionOpts),
    Jobs(WorkflowJobsOpts),
    Questions(QuestionsOpts),
    Package(PackageOpts),
    Run(RunOpts),
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "subscription")]
/// list workflows in the subscription
pub struct SubscriptionOpts {}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "jobs")]
/// list jobs of a workflow
pub struct WorkflowJobsOpts {
    #[argh(positional)]
    /// id of the workflow
    pub app_id: String,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "questions")]
/// list questions of a workflow
pub struct QuestionsOpts {
    #[argh(positional)]
    /// id of the workflow
    pub app_id: String,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "run")]
/// queue a job for a workflow
pub struct RunOpts {
    #[argh(positional)]
    /// id of the workflow
    pub app_id: String,

    #[argh(option)]
    /// path to a yaml file mapping question names to answers
    pub answers: Option<String>,
}
