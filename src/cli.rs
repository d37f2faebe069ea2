use crate::config::AppConfig;
use crate::error::AppError;
use crate::profiles::{NotionClient, ProfilePage, ProfileService};
use crate::server;
use chrono::{Datelike, Local};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "Kandidaten-Profile",
    about = "Serve and inspect confidential candidate profile pages",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Fetch one profile from the store and print it as text
    Show(ShowArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    /// Record id, share token, or profile id to resolve
    #[arg(long)]
    id: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Show(args) => run_show(args).await,
    }
}

async fn run_show(args: ShowArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = Arc::new(NotionClient::new(&config.store));
    let service = ProfileService::new(store, config.expiry_policy, config.agency.clone());

    match service.page(&args.id).await {
        ProfilePage::NotFound => {
            println!("Profil nicht gefunden: {}", args.id);
        }
        ProfilePage::Expired => {
            println!("Profil abgelaufen und archiviert: {}", args.id);
        }
        ProfilePage::Ready {
            profile,
            content,
            employments,
        } => {
            let year = Local::now().year();
            println!("{}", profile.resolved_display_id(year));
            println!("Position:       {}", profile.position);
            println!("Standort:       {}", profile.location);
            println!("Verfügbarkeit:  {}", profile.availability);
            println!("Gehaltsrahmen:  {}", profile.compensation_range);
            println!("Pipeline:       {}", profile.pipeline_status);
            println!("Views:          {}", profile.view_count);

            if !profile.industries.is_empty() {
                println!("\nBranchenerfahrung");
                for industry in &profile.industries {
                    println!("- {industry}");
                }
            }

            if !profile.tech_stack.is_empty() {
                println!("\nTech Stack: {}", profile.tech_stack.join(" · "));
            }

            if !employments.is_empty() {
                println!("\nStationen (anonymisiert)");
                for hint in &employments {
                    println!("- {} — {}", hint.role, hint.industry);
                }
            }

            println!("\nExecutive Summary\n{}", profile.resolved_summary());

            if !content.is_empty() {
                println!("\n{content}");
            }
        }
    }

    Ok(())
}
