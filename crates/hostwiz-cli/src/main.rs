//! HostWiz CLI - Command-line interface for hosting recommendations

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hostwiz_ai::{build_prompt, Backend};
use hostwiz_core::{
    validate_requirements, Budget, ExpectedTraffic, ProviderCatalog, RecommendationResult,
    Requirements, SupportLevel, TechnicalLevel, WebsiteType, FEATURE_OPTIONS,
};
use hostwiz_recommender::RecommenderConfig;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "hostwiz")]
#[command(about = "Hosting Wizard - Find the right hosting provider for your website")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Questionnaire answers
#[derive(Args, Debug)]
struct RequirementArgs {
    /// blog, business, ecommerce, app or enterprise
    #[arg(long)]
    website_type: WebsiteType,

    /// low, medium, high or very-high
    #[arg(long)]
    traffic: ExpectedTraffic,

    /// budget, standard, premium or enterprise
    #[arg(long)]
    budget: Budget,

    /// beginner, intermediate or advanced
    #[arg(long)]
    technical_level: TechnicalLevel,

    /// basic, standard or priority
    #[arg(long, default_value = "basic")]
    support_level: SupportLevel,

    /// Extra feature to require (repeatable, see `hostwiz options`)
    #[arg(long = "feature")]
    features: Vec<String>,
}

impl RequirementArgs {
    fn into_requirements(self) -> Result<Requirements> {
        let requirements = Requirements::new(
            self.website_type,
            self.traffic,
            self.budget,
            self.technical_level,
            self.support_level,
        )
        .with_features(self.features);

        if let Err(errors) = validate_requirements(&requirements) {
            eprintln!("Invalid requirements:");
            for error in &errors {
                eprintln!("  - {}", error);
            }
            anyhow::bail!("Validation failed with {} errors", errors.len());
        }

        Ok(requirements)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend hosting providers (uses an LLM when an API key is available)
    Recommend {
        #[command(flatten)]
        requirements: RequirementArgs,

        /// LLM backend: openai or anthropic
        #[arg(long, env = "HOSTWIZ_BACKEND")]
        backend: Option<Backend>,

        /// LLM API key; without one the scoring algorithm is used
        #[arg(long, env = "HOSTWIZ_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Provider catalog JSON file (defaults to the built-in catalog)
        #[arg(long, env = "HOSTWIZ_CATALOG")]
        catalog: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List providers in the catalog
    Providers {
        /// Provider catalog JSON file
        #[arg(long, env = "HOSTWIZ_CATALOG")]
        catalog: Option<PathBuf>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every accepted questionnaire value
    Options,

    /// Print the LLM prompt for a set of requirements
    Prompt {
        #[command(flatten)]
        requirements: RequirementArgs,

        /// Provider catalog JSON file
        #[arg(long, env = "HOSTWIZ_CATALOG")]
        catalog: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging; stdout is reserved for results
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Recommend {
            requirements,
            backend,
            api_key,
            catalog,
            json,
        } => {
            let requirements = requirements.into_requirements()?;
            let mut config = RecommenderConfig::from_env()?;
            if let Some(backend) = backend {
                config.backend = backend;
            }
            if let Some(key) = api_key {
                config.api_key = Some(key).filter(|k| !k.trim().is_empty());
            }
            if catalog.is_some() {
                config.catalog_path = catalog;
            }
            recommend(&config, &requirements, json).await?;
        }
        Commands::Providers { catalog, json } => {
            list_providers(&load_catalog(catalog)?, json)?;
        }
        Commands::Options => {
            list_options();
        }
        Commands::Prompt {
            requirements,
            catalog,
        } => {
            let requirements = requirements.into_requirements()?;
            println!("{}", build_prompt(&requirements, &load_catalog(catalog)?));
        }
    }

    Ok(())
}

fn load_catalog(path: Option<PathBuf>) -> Result<ProviderCatalog> {
    let config = RecommenderConfig {
        catalog_path: path,
        ..RecommenderConfig::default()
    };
    config.load_catalog()
}

async fn recommend(
    config: &RecommenderConfig,
    requirements: &Requirements,
    json: bool,
) -> Result<()> {
    let recommender = config.build_recommender()?;

    if config.api_key.is_some() {
        info!("Requesting AI recommendations via {}", config.backend);
    }
    let result = recommender
        .recommend(requirements, config.api_key.as_deref(), config.backend)
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(())
}

fn print_result(result: &RecommendationResult) {
    println!("\n=== Hosting Recommendations ===");
    println!("Source: {}", result.source);

    for (rank, scored) in result.recommendations.iter().enumerate() {
        let p = &scored.provider;
        println!();
        println!(
            "{}. {} {} [{}] match {}/100",
            rank + 1,
            p.logo,
            p.name,
            scored.tier,
            scored.match_score
        );
        println!("   Price: {}  Rating: {}/5", p.price_range, p.rating);
        println!("   {}", p.description);
        println!("   Pros: {}", p.pros.join(", "));
        println!("   Cons: {}", p.cons.join(", "));
        println!("   Best for: {}", p.best_for.join(", "));
        if let Some(reason) = &scored.ai_recommendation_reason {
            println!("   Why: {}", reason);
        }
    }

    if !result.reasoning.is_empty() {
        println!("\nReasoning: {}", result.reasoning);
    }
}

fn list_providers(catalog: &ProviderCatalog, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(catalog.providers())?);
        return Ok(());
    }

    println!("\n=== Provider Catalog ({} providers) ===", catalog.len());
    for p in catalog.iter() {
        println!(
            "  {} {:<28} {:<14} {:<20} {}/5",
            p.logo, p.name, p.id, p.price_range, p.rating
        );
    }

    Ok(())
}

fn list_options() {
    fn section<'a>(title: &str, values: impl Iterator<Item = (&'a str, &'a str)>) {
        println!("\n{}:", title);
        for (value, label) in values {
            println!("  {:<14} {}", value, label);
        }
    }

    section(
        "--website-type",
        WebsiteType::ALL.iter().map(|v| (v.as_str(), v.label())),
    );
    section(
        "--traffic",
        ExpectedTraffic::ALL.iter().map(|v| (v.as_str(), v.label())),
    );
    section("--budget", Budget::ALL.iter().map(|v| (v.as_str(), v.label())));
    section(
        "--technical-level",
        TechnicalLevel::ALL.iter().map(|v| (v.as_str(), v.label())),
    );
    section(
        "--support-level",
        SupportLevel::ALL.iter().map(|v| (v.as_str(), v.label())),
    );
    section(
        "--backend",
        Backend::ALL.iter().map(|b| (b.as_str(), "")),
    );

    println!("\n--feature:");
    for feature in FEATURE_OPTIONS {
        println!("  \"{}\"", feature);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::try_parse_from([
            "hostwiz",
            "recommend",
            "--website-type",
            "blog",
            "--traffic",
            "very-high",
            "--budget",
            "budget",
            "--technical-level",
            "beginner",
            "--feature",
            "SSL Certificate",
            "--feature",
            "Daily Backups",
            "--backend",
            "anthropic",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Recommend {
                requirements,
                backend,
                json,
                ..
            } => {
                assert_eq!(backend, Some(Backend::Anthropic));
                assert!(json);
                let req = requirements.into_requirements().unwrap();
                assert_eq!(req.expected_traffic, ExpectedTraffic::VeryHigh);
                assert_eq!(req.support_level, SupportLevel::Basic);
                assert_eq!(req.features.len(), 2);
            }
            _ => panic!("Expected recommend command"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_choice() {
        let result = Cli::try_parse_from([
            "hostwiz",
            "prompt",
            "--website-type",
            "forum",
            "--traffic",
            "low",
            "--budget",
            "budget",
            "--technical-level",
            "beginner",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_feature_rejected() {
        let cli = Cli::try_parse_from([
            "hostwiz",
            "prompt",
            "--website-type",
            "app",
            "--traffic",
            "low",
            "--budget",
            "standard",
            "--technical-level",
            "advanced",
            "--feature",
            "Quantum Hosting",
        ])
        .unwrap();

        match cli.command {
            Commands::Prompt { requirements, .. } => {
                assert!(requirements.into_requirements().is_err());
            }
            _ => panic!("Expected prompt command"),
        }
    }
}
