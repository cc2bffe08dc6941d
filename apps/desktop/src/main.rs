use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    catalog::{parse_min_rating, CategoryFilter},
    Dashboard, DashboardView, FormFields, HttpRegistrationApi, RegistrationForm,
    RegistrationScreen, Scheduler, SubmitOutcome, TermsPolicy,
};
use shared::domain::Role;
use tracing_subscriber::EnvFilter;

mod bridge;
mod settings;

const UI_QUEUE_CAPACITY: usize = 64;

#[derive(Parser, Debug)]
#[command(name = "originhash", about = "OriginHash onboarding client")]
struct Cli {
    /// Overrides the configured registration API base url.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit the registration form once.
    Register(RegisterArgs),
    /// Show the course dashboard.
    Courses(CoursesArgs),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    password: String,
    /// One of admin, corporate, individual.
    #[arg(long)]
    role: Option<Role>,
    #[arg(long)]
    accept_terms: bool,
    /// Refuse to submit unless --accept-terms is given.
    #[arg(long)]
    require_terms: bool,
    /// Query string the screen is opened with, e.g. `error=not_registered`.
    #[arg(long, default_value = "")]
    entry_query: String,
}

#[derive(Args, Debug)]
struct CoursesArgs {
    #[arg(long, default_value = "all")]
    category: CategoryFilter,
    #[arg(long, default_value = "0", value_parser = min_rating_arg)]
    min_rating: f32,
}

fn min_rating_arg(raw: &str) -> Result<f32, String> {
    parse_min_rating(raw).map_err(|err| format!("not a rating: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let mut settings = settings::load_settings();
    if let Some(url) = cli.server_url {
        settings.api_base_url = url;
    }
    settings.validate()?;

    match cli.command {
        Command::Register(args) => register(&settings, args).await,
        Command::Courses(args) => courses(args).await,
    }
}

async fn register(settings: &settings::Settings, args: RegisterArgs) -> Result<()> {
    let (ui, ui_rx) = bridge::channel(UI_QUEUE_CAPACITY);
    let renderer = bridge::spawn_renderer(ui_rx);
    let ui = Arc::new(ui);

    let api = HttpRegistrationApi::new(&settings.api_base_url)
        .with_context(|| format!("cannot reach api at '{}'", settings.api_base_url))?;
    let mut config = settings.form_config();
    if args.require_terms {
        config.terms = TermsPolicy::Required;
    }
    let form = RegistrationForm::with_config(
        Arc::new(api),
        ui.clone(),
        ui.clone(),
        Scheduler::from_current()?,
        config,
    );
    let mut screen = RegistrationScreen::mount(form.clone(), &args.entry_query);

    form.set_fields(FormFields {
        name: args.name,
        email: args.email,
        password: args.password,
        role: args.role,
        terms_accepted: args.accept_terms,
    })
    .await;
    println!("{}", form.submit_label().await);
    let outcome = screen.submit().await;

    screen.settle().await;
    screen.teardown().await;
    ui.close();
    renderer
        .join()
        .map_err(|_| anyhow!("ui renderer thread panicked"))?;

    match outcome {
        SubmitOutcome::Succeeded => Ok(()),
        SubmitOutcome::Invalid(err) => Err(anyhow!("registration rejected locally: {err}")),
        SubmitOutcome::Failed(err) => Err(anyhow!(
            "registration failed: {}",
            err.user_message()
        )),
        SubmitOutcome::Busy | SubmitOutcome::Closed => {
            Err(anyhow!("registration was not submitted"))
        }
    }
}

async fn courses(args: CoursesArgs) -> Result<()> {
    let mut dashboard = Dashboard::mount(&Scheduler::from_current()?);
    dashboard.set_category(args.category);
    dashboard.set_min_rating(args.min_rating);

    println!("Explore Our Courses");
    println!("Browse, filter, and find your next skill!");
    if let DashboardView::Loading { placeholders } = dashboard.view() {
        println!("loading {placeholders} courses...");
    }

    if !dashboard.loaded().await {
        anyhow::bail!("course loading was cancelled");
    }

    match dashboard.view() {
        DashboardView::Courses(cards) => {
            for card in cards {
                println!(
                    "{:<22} {:<9} {:<14} {} {}",
                    card.title, card.category, card.creator, card.stars, card.reviews
                );
            }
        }
        DashboardView::Empty(message) => println!("{message}"),
        DashboardView::Loading { .. } => println!("still loading"),
    }
    Ok(())
}
