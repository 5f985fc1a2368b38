/// Reqflow command line entry point
///
/// Reports on the projects and workflow diagrams stored in a requirements API.
/// Configuration comes from REQFLOW_* environment variables; `--api-url` overrides
/// the base URL.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqflow::{
    api::{HttpApiClient, RequirementsApi},
    config::Config,
    project::{EntityId, ProjectEntities},
    workflow::{codec, FlowGraph},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reqflow", about = "Inspect requirements projects and their workflow diagrams")]
struct Cli {
    /// Base URL of the requirements API
    #[arg(long, env = "REQFLOW_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every project
    Projects,
    /// Summarize the workflows of one project
    Summary {
        project_id: EntityId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let mut config = Config::default();
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let api = HttpApiClient::new(&config.api).context("failed to build API client")?;

    match cli.command {
        Command::Projects => list_projects(&api).await,
        Command::Summary { project_id } => summarize(&api, &config, project_id).await,
    }
}

async fn list_projects(api: &dyn RequirementsApi) -> Result<()> {
    let projects = api.list_projects().await.context("failed to list projects")?;
    for project in projects {
        println!(
            "{:>6}  {}{}",
            project.id,
            project.name,
            project.description.map(|d| format!(" - {d}")).unwrap_or_default()
        );
    }
    Ok(())
}

async fn summarize(api: &dyn RequirementsApi, config: &Config, project_id: EntityId) -> Result<()> {
    let project = api
        .get_project(project_id)
        .await
        .with_context(|| format!("failed to load project {project_id}"))?;
    let workflows = api
        .list_workflows(project_id)
        .await
        .with_context(|| format!("failed to list workflows of project {project_id}"))?;

    let report = ProjectEntities::load(api, project_id, config.api.fetch_concurrency).await;
    if let Some(failure) = &report.failure {
        eprintln!("warning: entity lists are incomplete ({failure}); dangling references not checked");
    }
    let entities = &report.entities;

    println!("{} ({} workflows)", project.name, workflows.len());
    println!(
        "  {} users, {} pages, {} functionalities",
        entities.users.len(),
        entities.pages.len(),
        entities.functionalities.len()
    );

    for workflow in &workflows {
        let flowchart = match codec::decode(workflow.flowchart_data.as_ref()) {
            Ok(flowchart) => flowchart,
            Err(e) => {
                println!("  [{}] {}: unreadable flowchart ({e})", workflow.id, workflow.name);
                continue;
            }
        };

        let analysis = FlowGraph::build(&flowchart);
        let dangling_refs = if report.is_complete() {
            flowchart
                .nodes
                .iter()
                .filter_map(|n| n.data.entity())
                .filter(|&(entity_type, id)| entities.name_of(entity_type, id).is_none())
                .count()
        } else {
            0
        };

        println!(
            "  [{}] {}: {} nodes, {} edges, {} dangling edges, {} dangling entity references, {} isolated nodes",
            workflow.id,
            workflow.name,
            flowchart.nodes.len(),
            flowchart.edges.len(),
            analysis.dangling_edges().len(),
            dangling_refs,
            analysis.isolated_nodes().len()
        );
    }

    Ok(())
}
