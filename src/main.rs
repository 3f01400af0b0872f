use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use uniadmin::api::{ApiClient, RecordSource, RestResource};
use uniadmin::cli::{Cli, Commands};
use uniadmin::config::Config;
use uniadmin::listview::ListView;
use uniadmin::models::{
    Address, Course, Department, Enrollment, Fee, Resource, ResourceKind, Student,
};

/// Dispatch a generic async function over the resource type named at runtime
macro_rules! with_resource {
    ($kind:expr, $fn:ident ( $($args:expr),* )) => {
        match $kind {
            ResourceKind::Students => $fn::<Student>($($args),*).await,
            ResourceKind::Departments => $fn::<Department>($($args),*).await,
            ResourceKind::Courses => $fn::<Course>($($args),*).await,
            ResourceKind::Addresses => $fn::<Address>($($args),*).await,
            ResourceKind::Enrollments => $fn::<Enrollment>($($args),*).await,
            ResourceKind::Fees => $fn::<Fee>($($args),*).await,
        }
    };
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "uniadmin=info");
    }

    // Initialize logging to both console and file
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let file_appender = tracing_appender::rolling::never(".", "uniadmin.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env()),
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    config.validate()?;

    match &cli.command {
        Commands::List {
            resource,
            search,
            page,
            all,
        } => {
            let kind = Commands::parse_resource(resource)?;
            let client = ApiClient::new(&config)?;
            let search = search.clone().unwrap_or_default();

            match with_resource!(kind, run_list(&client, &search, *page, *all)) {
                Ok(()) => {}
                Err(e) => error!("List failed: {}", e),
            }
        }

        Commands::Get { resource, id } => {
            let kind = Commands::parse_resource(resource)?;
            let client = ApiClient::new(&config)?;

            match with_resource!(kind, run_get(&client, *id)) {
                Ok(()) => {}
                Err(e) => error!("Get failed: {}", e),
            }
        }

        Commands::Create { resource, data } => {
            let kind = Commands::parse_resource(resource)?;
            let client = ApiClient::new(&config)?;

            match with_resource!(kind, run_create(&client, data)) {
                Ok(()) => {}
                Err(e) => error!("Create failed: {}", e),
            }
        }

        Commands::Update { resource, id, data } => {
            let kind = Commands::parse_resource(resource)?;
            let client = ApiClient::new(&config)?;

            match with_resource!(kind, run_update(&client, *id, data)) {
                Ok(()) => {}
                Err(e) => error!("Update failed: {}", e),
            }
        }

        Commands::Delete { resource, id, yes } => {
            let kind = Commands::parse_resource(resource)?;
            let client = ApiClient::new(&config)?;

            match with_resource!(kind, run_delete(&client, *id, *yes)) {
                Ok(()) => {}
                Err(e) => error!("Delete failed: {}", e),
            }
        }

        Commands::Tui => {
            info!("Launching TUI interface");

            match uniadmin::tui::run_tui(config).await {
                Ok(_) => info!("TUI exited successfully"),
                Err(e) => error!("TUI failed: {}", e),
            }
        }
    }

    Ok(())
}

/// List records through the same controller the TUI uses, so search and
/// pagination behave identically in both frontends
async fn run_list<R: Resource>(
    client: &ApiClient,
    search: &str,
    page: usize,
    all: bool,
) -> Result<()> {
    let mut list: ListView<R> = ListView::new(Box::new(RestResource::<R>::new(client.clone())));
    list.load().await;
    if let Some(err) = list.error() {
        anyhow::bail!("{}", err);
    }

    list.set_search_term(search);
    list.set_page(page);

    let (filtered_count, total_pages) = {
        let view = list.view();
        (view.filtered_count, view.total_pages)
    };

    if all {
        println!("{} matching {} record(s):", filtered_count, R::TITLE);
        for current in 1..=total_pages {
            list.set_page(current);
            for record in list.view().page_items {
                println!("{}", record.summary());
            }
        }
        return Ok(());
    }

    let view = list.view();
    if view.page != page {
        info!("Page {} is out of range, showing page 1", page);
    }
    println!(
        "Page {}/{} ({} matching {} record(s)):",
        view.page,
        view.total_pages,
        view.filtered_count,
        R::TITLE
    );
    for record in view.page_items {
        println!("{}", record.summary());
    }

    Ok(())
}

async fn run_get<R: Resource>(client: &ApiClient, id: i64) -> Result<()> {
    let source = RestResource::<R>::new(client.clone());
    let record = source.get_one(id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn run_create<R: Resource>(client: &ApiClient, data: &str) -> Result<()> {
    let body = read_body(data)?;
    let record: R = serde_json::from_str(&body)?;

    let source = RestResource::<R>::new(client.clone());
    let created = source.create(&record).await?;
    info!(
        "Created {} (id {})",
        R::TITLE,
        created.id().unwrap_or_default()
    );
    println!("{}", created.summary());
    Ok(())
}

async fn run_update<R: Resource>(client: &ApiClient, id: i64, data: &str) -> Result<()> {
    let body = read_body(data)?;
    let record: R = serde_json::from_str(&body)?;

    let source = RestResource::<R>::new(client.clone());
    let updated = source.update(id, &record).await?;
    info!("Updated {} {}", R::TITLE, id);
    println!("{}", updated.summary());
    Ok(())
}

async fn run_delete<R: Resource>(client: &ApiClient, id: i64, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete {} {}? [y/N] ", R::TITLE, id))? {
        println!("Cancelled");
        return Ok(());
    }

    let source = RestResource::<R>::new(client.clone());
    source.delete(id).await?;
    info!("Deleted {} {}", R::TITLE, id);
    println!("Deleted {} {}", R::TITLE, id);
    Ok(())
}

/// Read the request body argument; '@path' loads the file at path
fn read_body(data: &str) -> Result<String> {
    if let Some(path) = data.strip_prefix('@') {
        Ok(std::fs::read_to_string(path)?)
    } else {
        Ok(data.to_string())
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    use std::io::Write;

    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
