//! Rakumane CLI
//!
//! Command-line front-end for the Rakumane backend:
//! - Generate listing candidates
//! - Generate product content and save it
//! - Show the sales dashboard
//! - Save dashboard settings

use clap::{Parser, Subcommand};
use rakumane::catalog::Category;
use rakumane::client::{ClientError, RakumaneClient, DEFAULT_API_URL};
use rakumane::generate::{
    GenerateContentRequest, GenerateRequest, GenerateResponse, GUMROAD_NEW_PRODUCT_URL,
};
use rakumane::sales::{
    format_yen, DashboardSummary, SalesSettings, SettingsView, DEFAULT_MONTHLY_GOAL,
};
use std::path::PathBuf;

/// Products shown in the dashboard ranking
const RANKING_SIZE: usize = 5;

#[derive(Parser)]
#[command(name = "rakumane")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Digital-product listing generator and sales dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate listing candidates
    Generate {
        /// Product category (prompt, notion, canva, ebook, ...)
        #[arg(short, long)]
        category: Category,
        /// Target audience
        #[arg(short, long)]
        target: String,
        /// Additional requests for the copy
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Generate a listing, then the full content for one candidate
    Content {
        #[arg(short, long)]
        category: Category,
        #[arg(short, long)]
        target: String,
        #[arg(short, long)]
        notes: Option<String>,
        /// Candidate name to use (must be one of the generated names)
        #[arg(long, conflicts_with = "pick")]
        name: Option<String>,
        /// Candidate number to use
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
        pick: Option<u8>,
        /// Output file (default: the suggested filename in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the marketplace summary and link
        #[arg(long)]
        publish: bool,
    },

    /// Show the sales dashboard
    Dashboard,

    /// Save the Gumroad token and monthly goal, or show the saved ones
    Settings {
        /// Print the saved settings (token masked) instead of saving
        #[arg(long, conflicts_with_all = ["token", "goal"])]
        show: bool,
        /// Gumroad access token
        #[arg(long, default_value = "")]
        token: String,
        /// Monthly revenue goal (JPY)
        #[arg(long, default_value_t = DEFAULT_MONTHLY_GOAL)]
        goal: i64,
    },

    /// Show backend health
    Health,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = RakumaneClient::new(&cli.api_url)?;
    let json = cli.format == "json";

    match cli.command {
        Commands::Generate {
            category,
            target,
            notes,
        } => {
            let req = listing_request(category, target, notes);
            let listing = run(&client, client.generate(&req).await);

            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                print_listing(&listing);
            }
        }

        Commands::Content {
            category,
            target,
            notes,
            name,
            pick,
            output,
            publish,
        } => {
            let req = listing_request(category, target, notes);
            let listing = run(&client, client.generate(&req).await);

            let selected = match select_name(&listing, name.as_deref(), pick) {
                Ok(selected) => selected,
                Err(message) => {
                    eprintln!("{}", message);
                    print_listing(&listing);
                    std::process::exit(1);
                }
            };

            println!("Generating content for 「{}」...", selected);
            let content = run(
                &client,
                client
                    .generate_content(&GenerateContentRequest {
                        category: req.category,
                        product_name: selected.clone(),
                        target: req.target.clone(),
                        additional_notes: req.additional_notes.clone(),
                    })
                    .await,
            );

            let path = output.unwrap_or_else(|| PathBuf::from(&content.filename));
            std::fs::write(&path, &content.content)?;
            println!("Content written to {:?}", path);

            if publish {
                println!();
                println!("{}", listing.publish_summary(&selected));
                println!();
                println!("Paste the above into: {}", GUMROAD_NEW_PRODUCT_URL);
            }
        }

        Commands::Dashboard => match client.sales().await {
            Ok(summary) if json => {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Ok(summary) => print_dashboard(Some(&summary)),
            Err(e) => {
                eprintln!("Could not load sales data: {}", e);
                eprintln!("Configure your Gumroad token with:");
                eprintln!("  rakumane-cli settings --token <TOKEN> --goal <YEN>");
                eprintln!();
                print_dashboard(None);
            }
        },

        Commands::Settings { show: true, .. } => {
            let view = run(&client, client.settings().await);

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_settings(&view);
            }
        }

        Commands::Settings { token, goal, .. } => {
            if goal <= 0 {
                eprintln!("Monthly goal must be greater than 0");
                std::process::exit(1);
            }

            run(
                &client,
                client
                    .save_settings(&SalesSettings {
                        gumroad_token: token,
                        monthly_goal: goal,
                    })
                    .await,
            );
            println!("Settings saved (goal {})", format_yen(goal));
        }

        Commands::Health => {
            let health = run(&client, client.health().await);

            println!("Rakumane v{}", health.version);
            println!();
            println!("API Status: {}", health.status);
            println!(
                "Listing provider: {}",
                if health.anthropic_configured { "Claude" } else { "template" }
            );
            println!(
                "Content provider: {}",
                if health.gemini_configured { "Gemini" } else { "template" }
            );
            println!();
            println!("Uptime: {}", format_duration(health.uptime_seconds));
        }

        Commands::Config { output } => {
            let config = rakumane::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Build a listing request, exiting on a blank target before any call is made
fn listing_request(category: Category, target: String, notes: Option<String>) -> GenerateRequest {
    if target.trim().is_empty() {
        eprintln!("Target audience must not be blank");
        std::process::exit(1);
    }

    GenerateRequest {
        category,
        target,
        additional_notes: notes,
    }
}

/// Unwrap a backend result, exiting with a readable message on failure
fn print_settings(view: &SettingsView) {
    let token = if view.gumroad_token.is_empty() {
        "(not set)"
    } else {
        view.gumroad_token.as_str()
    };
    println!("Gumroad token: {}", token);
    println!("Monthly goal:  {}", format_yen(view.monthly_goal));
}

fn run<T>(client: &RakumaneClient, result: Result<T, ClientError>) -> T {
    match result {
        Ok(value) => value,
        Err(ClientError::Unavailable) => {
            eprintln!("Cannot connect to Rakumane API at {}", client.base_url());
            eprintln!();
            eprintln!("Make sure the Rakumane API server is running:");
            eprintln!("  cargo run --bin rakumane");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn select_name(
    listing: &GenerateResponse,
    name: Option<&str>,
    pick: Option<u8>,
) -> Result<String, String> {
    if let Some(name) = name {
        return listing
            .product_names
            .iter()
            .find(|candidate| candidate.as_str() == name)
            .cloned()
            .ok_or_else(|| format!("「{}」 is not one of the generated names", name));
    }

    let index = usize::from(pick.unwrap_or(1)) - 1;
    listing
        .product_names
        .get(index)
        .cloned()
        .ok_or_else(|| "No product name to generate content for".to_string())
}

fn print_listing(listing: &GenerateResponse) {
    println!("Product names:");
    for (i, name) in listing.product_names.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }
    println!();
    println!("Description:");
    for line in listing.description.lines() {
        println!("  {}", line);
    }
    println!();
    println!("Suggested price: {}", format_yen(i64::from(listing.suggested_price)));
    println!("Tags: {}", listing.tags_text());
}

fn print_dashboard(summary: Option<&DashboardSummary>) {
    let revenue = summary.map_or(0, |s| s.total_revenue);
    let count = summary.map_or(0, |s| s.total_sales);
    let rate = summary.map_or(0.0, |s| s.achievement_rate());
    let goal = summary.map_or(0, |s| s.monthly_goal);

    println!("{:<16} {}", "Revenue", format_yen(revenue));
    println!("{:<16} {}", "Sales", count);
    println!("{:<16} {:.1}%", "Achievement", rate);
    println!("{:<16} {}", "Monthly goal", format_yen(goal));

    let Some(summary) = summary else {
        return;
    };

    println!();
    println!("Top products:");
    let top = summary.top_products(RANKING_SIZE);
    if top.is_empty() {
        println!("  No sales yet");
    }
    for (i, product) in top.iter().enumerate() {
        let marker = if i < 3 { "*" } else { " " };
        println!(
            " {}{}. {:<30} {:>4} sold  {}",
            marker,
            i + 1,
            product.product_name,
            product.count,
            format_yen(product.revenue)
        );
    }

    println!();
    println!("Daily revenue:");
    for day in &summary.daily_sales {
        println!("  {}  {}", day.date, format_yen(day.revenue));
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> GenerateResponse {
        GenerateResponse {
            product_names: vec!["A".into(), "B".into(), "C".into()],
            description: "d".into(),
            suggested_price: 980,
            tags: vec![],
        }
    }

    #[test]
    fn test_select_name_defaults_to_first() {
        assert_eq!(select_name(&listing(), None, None).unwrap(), "A");
        assert_eq!(select_name(&listing(), None, Some(3)).unwrap(), "C");
    }

    #[test]
    fn test_select_name_must_be_a_candidate() {
        assert_eq!(select_name(&listing(), Some("B"), None).unwrap(), "B");
        assert!(select_name(&listing(), Some("Z"), None).is_err());
    }

    #[test]
    fn test_select_name_without_candidates() {
        let mut empty = listing();
        empty.product_names.clear();
        assert!(select_name(&empty, None, None).is_err());
    }

    #[test]
    fn test_cli_parses_category() {
        let cli = Cli::try_parse_from([
            "rakumane", "generate", "--category", "Notion", "--target", "主婦",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate { category, .. } => assert_eq!(category, Category::Notion),
            _ => panic!("expected generate"),
        }
        assert_eq!(cli.api_url, DEFAULT_API_URL);

        assert!(Cli::try_parse_from([
            "rakumane", "generate", "--category", "podcast", "--target", "x",
        ])
        .is_err());
    }

    #[test]
    fn test_settings_show_flag() {
        let cli = Cli::try_parse_from(["rakumane", "settings", "--show"]).unwrap();
        assert!(matches!(cli.command, Commands::Settings { show: true, .. }));

        let cli = Cli::try_parse_from(["rakumane", "settings", "--token", "t", "--goal", "5000"]).unwrap();
        match cli.command {
            Commands::Settings { show, token, goal } => {
                assert!(!show);
                assert_eq!(token, "t");
                assert_eq!(goal, 5000);
            }
            _ => panic!("expected settings"),
        }

        assert!(Cli::try_parse_from(["rakumane", "settings", "--show", "--token", "t"]).is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(3_700), "1h 1m");
    }
}
