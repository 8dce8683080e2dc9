//! Fetch one page of users through the pipeline and print it.
//!
//! Small end-to-end exercise of the core against a live upstream; useful for
//! eyeballing enrichment and endpoint selection without a UI.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::error;
use tracing_subscriber::EnvFilter;

use dashboard::DashboardConfig;
use dashboard::domain::{FilterState, Role, RoleFilter, fetch_user_page};
use dashboard::outbound::users::HttpUserPageSource;
use pagination::Pager;

/// Dump one page of normalized users from the upstream API.
#[derive(Debug, Parser)]
struct Args {
    /// Base URL of the upstream users API.
    #[arg(long, default_value = "https://dummyjson.com")]
    base_url: url::Url,
    /// Free-text search term.
    #[arg(long, default_value = "")]
    search: String,
    /// Role filter: admin, editor, or viewer.
    #[arg(long)]
    role: Option<String>,
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Page size.
    #[arg(long, default_value_t = 20)]
    per_page: u32,
}

fn role_filter(arg: Option<&str>) -> RoleFilter {
    match arg.map(str::to_lowercase).as_deref() {
        Some("admin") => RoleFilter::Only(Role::Admin),
        Some("editor") => RoleFilter::Only(Role::Editor),
        Some("viewer") => RoleFilter::Only(Role::Viewer),
        _ => RoleFilter::All,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = DashboardConfig::new(args.base_url);
    config.items_per_page = args.per_page;

    let source = match HttpUserPageSource::from_config(&config) {
        Ok(source) => Arc::new(source),
        Err(err) => {
            error!(%err, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let mut pager = match Pager::new(config.items_per_page) {
        Ok(pager) => pager,
        Err(err) => {
            error!(%err, "invalid page size");
            return ExitCode::FAILURE;
        }
    };
    pager.go_to_page(args.page);

    let filters = FilterState {
        search_term: args.search,
        role: role_filter(args.role.as_deref()),
    };

    match fetch_user_page(
        source.as_ref(),
        &filters,
        pager.window(),
        CancellationToken::new(),
    )
    .await
    {
        Ok(page) => {
            println!(
                "showing {}-{} of {}",
                page.display_start(),
                page.display_end(),
                page.total
            );
            for user in &page.items {
                println!(
                    "{:>5}  {:<24} {:<8?} {:<8?} {}",
                    user.id, user.name, user.role, user.status, user.email
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "fetch failed");
            ExitCode::FAILURE
        }
    }
}
