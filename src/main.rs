use async_trait::async_trait;
use clap::Parser;
use creationary::config::cli::Command;
use creationary::core::pagination::{page_items, render_strip};
use creationary::core::QueryNavigator;
use creationary::utils::error::ErrorCategory;
use creationary::utils::{logger, validation::Validate};
use creationary::domain::model::Category;
use creationary::{AppConfig, CheckoutSummary, CliConfig, CreationaryError, ExploreQuery, SearchController};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

/// Prints each settled search URL instead of routing to it.
struct StdoutNavigator {
    completed: watch::Sender<u64>,
}

#[async_trait]
impl QueryNavigator for StdoutNavigator {
    async fn replace(&self, href: String) -> creationary::Result<()> {
        println!("{}", href);
        self.completed.send_modify(|n| *n += 1);
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    logger::init_logger(config.log_format(), &config.logging.level, cli.verbose);
    tracing::debug!("Loaded config: {:?}", config);

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("❌ Command failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.category() {
            ErrorCategory::Input => 2,
            ErrorCategory::Configuration => 1,
            ErrorCategory::Runtime | ErrorCategory::External => 3,
        };
        std::process::exit(exit_code);
    }
}

fn load_config(cli: &CliConfig) -> creationary::Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

async fn run(command: Command, config: &AppConfig) -> creationary::Result<()> {
    match command {
        Command::Currency { op, a, b } => {
            println!("{}", op.apply(a, b));
        }
        Command::Pages {
            current,
            total,
            total_items,
            max_visible,
        } => {
            let total = match (total, total_items) {
                (Some(total), _) => total,
                (None, Some(items)) => config.pagination.total_pages_for(items),
                (None, None) => 0,
            };
            let max_visible = max_visible.unwrap_or(config.pagination.max_visible_pages);
            let items = page_items(current, total, max_visible);
            if items.is_empty() {
                tracing::info!("Only {} page(s), nothing to paginate", total);
            } else {
                println!("{}", render_strip(&items));
            }
        }
        Command::Checkout {
            price,
            original_price,
            json,
        } => {
            let summary = CheckoutSummary::new(price, original_price)
                .with_currency_code(config.checkout.currency_code.clone());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Price:    {} {}", summary.price, summary.currency_code);
                if let Some(original) = summary.original_price {
                    println!("Original: {} {}", original, summary.currency_code);
                }
                println!("Savings:  {} {}", summary.savings, summary.currency_code);
                match summary.amount_minor {
                    Some(minor) => println!("Charge:   {} (minor units)", minor),
                    None => tracing::warn!("Price {} has no minor-unit representation", price),
                }
                println!("Ref:      {}", summary.reference);
            }
        }
        Command::Categories => {
            for category in Category::ALL {
                println!("{}", category.as_str());
            }
        }
        Command::Search { delay_ms, path } => {
            let delay = delay_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.search_delay());
            let path = path.unwrap_or_else(|| config.search.path.clone());
            run_search(delay, path).await?;
        }
    }
    Ok(())
}

async fn run_search(delay: Duration, path: String) -> creationary::Result<()> {
    let (completed, mut completed_rx) = watch::channel(0u64);
    let controller = SearchController::new(
        Arc::new(StdoutNavigator { completed }),
        path,
        ExploreQuery::default(),
        delay,
    )?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.map_err(CreationaryError::IoError)? {
        tracing::debug!("Keystroke: {:?}", line);
        controller.input(line);
    }

    // stdin 結束後等最後一次搜尋送出並印出
    while controller.is_pending() {
        tokio::time::sleep(delay).await;
    }
    let dispatched = controller.dispatched();
    completed_rx
        .wait_for(|done| *done >= dispatched)
        .await
        .map_err(|e| CreationaryError::NavigationError {
            message: e.to_string(),
        })?;
    Ok(())
}
