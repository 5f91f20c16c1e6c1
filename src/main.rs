use anyhow::{Context, Result};
use schemadoc::cli::Cli;
use schemadoc::provider::{CatalogProvider, SqliteProvider};
use schemadoc::render_diagram;
use schemadoc::site::SiteGenerator;
use std::fs;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let provider = SqliteProvider;
    let database = cli.database.to_string_lossy().into_owned();

    println!("Reading catalog from {} ({})...", database, provider.name());
    let metadata = provider
        .load(&database)
        .context("failed to read database catalog")?;
    println!(
        "Found {} tables, {} views",
        metadata.base_tables().count(),
        metadata.views().count()
    );

    if let Some(path) = cli.diagram {
        let diagram = render_diagram(&metadata);
        fs::write(&path, diagram.svg)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!(
            "Wrote ER diagram ({}x{}) to {}",
            diagram.width,
            diagram.height,
            path.display()
        );
        return Ok(());
    }

    let site = SiteGenerator::new(&cli.output);
    site.generate(&metadata).context("failed to assemble site")?;
    println!("Site written to {}", cli.output.display());
    println!("Open {}/index.html in a browser", cli.output.display());

    Ok(())
}
