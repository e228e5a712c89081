//! The commands of the `sakila` binary.
//!
//! Every command returns what it would print, so the binary stays a thin shell around [`run`].

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Subcommand;

use query_engine_execution::query::pretty_print;
use sakila_configuration::environment::Environment;
use sakila_configuration::ParsedConfiguration;
use sakila_connector::entity::{Entity, Relationship};
use sakila_connector::state::{self, State};

/// What to select and how to filter it.
#[derive(Debug, Clone, clap::Args)]
pub struct Request {
    /// The entity to select from: film, actor, category or language.
    #[arg(long)]
    pub entity: Entity,
    /// A filter over the entity, as JSON.
    #[arg(long, value_name = "JSON")]
    pub filter: Option<String>,
    /// The fields to select. Every column is selected when none are given.
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

impl Request {
    fn filter(&self) -> anyhow::Result<Option<serde_json::Value>> {
        self.filter
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .context("the filter is not valid JSON")
    }
}

/// The various contextual bits and bobs we need to run.
pub struct Context<Env: Environment> {
    pub context_path: PathBuf,
    pub environment: Env,
}

/// The command invoked by the user.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write a fresh configuration into the context directory.
    Initialize,
    /// Print the SQL a request translates to, along with its parameters.
    Translate {
        #[command(flatten)]
        request: Request,
        /// Lay the SQL out over several lines.
        #[arg(long)]
        pretty: bool,
    },
    /// Ask the database how it would run a request.
    Explain {
        #[command(flatten)]
        request: Request,
    },
    /// Run a request and print the rows as JSON.
    Query {
        #[command(flatten)]
        request: Request,
        /// Related rows to attach to every row, such as actors,language for films.
        #[arg(long, value_delimiter = ',')]
        include: Vec<Relationship>,
    },
    /// Print the JSON schema of the configuration file.
    PrintSchema,
}

/// Run a command in a given context, returning its output.
pub async fn run(command: Command, context: Context<impl Environment>) -> anyhow::Result<String> {
    match command {
        Command::Initialize => initialize(&context).await,
        Command::Translate { request, pretty } => translate(&request, pretty),
        Command::Explain { request } => explain(&request, &context).await,
        Command::Query { request, include } => query(&request, &include, &context).await,
        Command::PrintSchema => print_schema(),
    }
}

async fn initialize(context: &Context<impl Environment>) -> anyhow::Result<String> {
    sakila_configuration::write_parsed_configuration(
        ParsedConfiguration::initial(),
        &context.context_path,
    )
    .await?;
    Ok(format!(
        "wrote {} to {}",
        sakila_configuration::CONFIGURATION_FILENAME,
        context.context_path.display()
    ))
}

fn translate(request: &Request, pretty: bool) -> anyhow::Result<String> {
    let plan = request.entity.plan(request.fields.as_slice(), request.filter()?)?;
    let sql = plan.query_sql();

    let mut output = if pretty {
        pretty_print(&sql.sql)
    } else {
        sql.sql
    };
    for (index, param) in sql.params.iter().enumerate() {
        write!(output, "\n${} = {:?}", index + 1, param)?;
    }
    Ok(output)
}

async fn explain(request: &Request, context: &Context<impl Environment>) -> anyhow::Result<String> {
    let filter = request.filter()?;
    let state = connect(context).await?;
    let details = request
        .entity
        .explain(&state, request.fields.as_slice(), filter)
        .await?;

    let mut output = String::new();
    for (heading, body) in details {
        writeln!(output, "{heading}:\n{body}\n")?;
    }
    Ok(output.trim_end().to_string())
}

async fn query(
    request: &Request,
    include: &[Relationship],
    context: &Context<impl Environment>,
) -> anyhow::Result<String> {
    let filter = request.filter()?;
    request.entity.check_include(include)?;
    let state = connect(context).await?;
    let rows = request
        .entity
        .query(&state, request.fields.as_slice(), filter, include)
        .await?;
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn print_schema() -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(
        &sakila_configuration::generate_schema(),
    )?)
}

/// Read the configuration from the context directory and connect to the database it names.
async fn connect(context: &Context<impl Environment>) -> anyhow::Result<State> {
    let parsed = sakila_configuration::parse_configuration(&context.context_path).await?;
    let configuration =
        sakila_configuration::make_runtime_configuration(parsed, &context.environment)?;
    tracing::info!(
        max_connections = configuration.pool_settings.max_connections,
        "connecting"
    );

    let mut registry = prometheus::Registry::new();
    Ok(state::create_state(&configuration, &mut registry).await?)
}
