use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use pharos_content::{http::build_backend, ContentResolver, RelatedQuery};
use pharos_core::config;
use pharos_i18n::{Language, Router};
use serde_json::json;

#[derive(Parser)]
#[command(
    name = "pharos",
    version,
    about = "Pharos — content resolution and localized routing for the editorial site"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, newest first.
    Posts {
        /// Maximum number of posts (defaults to content.list_limit).
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Latest posts visible under a language.
    Latest {
        /// Language code (en, de, fr, es, zh-CN, ar).
        #[arg(short = 'L', long, default_value = "en")]
        lang: String,
        /// Number of posts, 1 to 6 (defaults to content.latest_limit).
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show a single post with its detail payload.
    Post {
        slug: String,
    },
    /// Related posts and prev/next neighbours for a post.
    Related {
        slug: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        country: Option<String>,
        /// Tag to match; repeat for several.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// RFC 3339 publish time of the post. Looked up when omitted.
        #[arg(long)]
        date: Option<String>,
    },
    /// Check that the content backend answers.
    Probe,
    /// Canonical URL for a request path.
    Canonical {
        path: String,
    },
    /// hreflang alternates for a request path.
    Hreflang {
        path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.site.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Posts { limit } => {
            let resolver = ContentResolver::with_bundled_fallback(build_backend(&cfg.backend));
            let items = resolver
                .list(limit.unwrap_or(cfg.content.list_limit))
                .await;
            print_json(&items)?;
        }
        Commands::Latest { lang, limit } => {
            let Some(language) = Language::from_code(&lang) else {
                anyhow::bail!("unsupported language: {lang}");
            };
            let resolver = ContentResolver::with_bundled_fallback(build_backend(&cfg.backend));
            let items = resolver
                .latest_by_language(language.code(), limit.unwrap_or(cfg.content.latest_limit))
                .await;
            print_json(&items)?;
        }
        Commands::Post { slug } => {
            let resolver = ContentResolver::with_bundled_fallback(build_backend(&cfg.backend));
            match resolver.get_by_slug(&slug).await {
                Some(item) => print_json(&item)?,
                None => anyhow::bail!("post not found: {slug}"),
            }
        }
        Commands::Related {
            slug,
            category,
            country,
            tags,
            date,
        } => {
            let resolver = ContentResolver::with_bundled_fallback(build_backend(&cfg.backend));
            let mut query = match resolver.get_by_slug(&slug).await {
                Some(item) => RelatedQuery::for_item(&item),
                None => RelatedQuery::new(slug.clone(), Utc::now()),
            };
            if let Some(date) = date {
                query.date = DateTime::parse_from_rfc3339(&date)
                    .map_err(|e| anyhow::anyhow!("invalid --date '{date}': {e}"))?
                    .with_timezone(&Utc);
            }
            if category.is_some() {
                query.category = category;
            }
            if country.is_some() {
                query.country = country;
            }
            if !tags.is_empty() {
                query.tags = tags;
            }
            print_json(&resolver.related(&query).await)?;
        }
        Commands::Probe => {
            let resolver = ContentResolver::with_bundled_fallback(build_backend(&cfg.backend));
            let report = resolver.probe().await;
            let ok = report.ok;
            print_json(&json!({
                "backend": resolver.backend_name(),
                "report": report,
            }))?;
            if !ok {
                anyhow::bail!("content backend is not reachable");
            }
        }
        Commands::Canonical { path } => {
            let router = Router::with_default_table(&cfg.site.base_url);
            print_json(&json!({
                "path": router.canonical_path(&path),
                "url": router.canonical_url(&path),
            }))?;
        }
        Commands::Hreflang { path } => {
            let router = Router::with_default_table(&cfg.site.base_url);
            print_json(&router.hreflang_links(&path))?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
