pub mod articles;
pub mod sitemap;

use anyhow::Result;

use crate::cli::{sitemap_settings, site_origin, Cli, Commands};

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let content = cli.content.settings();
    match cli.command {
        Commands::Sitemap {
            out_dir,
            site_url,
            static_paths,
            excludes,
            no_robots,
        } => {
            let settings = sitemap_settings(static_paths, excludes, no_robots);
            sitemap::run(&content, &settings, &site_origin(&site_url), &out_dir)
                .await
                .map(|_| ())
        },
        Commands::Articles { page } => articles::list(&content, page).await,
        Commands::Show { slug, site_url } => {
            articles::show(&content, &slug, &site_origin(&site_url)).await
        },
    }
}
