//! Write a starter configuration and example chart.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing pfj...");

    let base = config_path.parent().unwrap_or_else(|| Path::new(""));
    write_file(config_path, DEFAULT_CONFIG, yes)?;

    let charts_dir = base.join("charts");
    fs::create_dir_all(&charts_dir).context("Failed to create charts directory")?;
    write_file(&charts_dir.join("example.html"), EXAMPLE_CHARTS, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'pfj render charts/example.html' to see the render passes.");

    Ok(())
}

fn write_file(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# pfj configuration

[render]
# "batched" collapses bursts of changes into one render, "synchronous"
# renders on every change
delivery = "batched"

# Pretty-print render output
pretty = true

[catalogs]
# JSON files or directories of JSON files
# icons = "catalogs/icons.json"
# tokens = "catalogs/tokens.json"
# snippets = "catalogs/snippets"
"#;

const EXAMPLE_CHARTS: &str = r#"<!-- Example charts -->
<pfj-chart-donut
    title="Pets"
    sub-title="Total"
    legend-position="right"
    data='[{"x":"Cats","y":35},{"x":"Dogs","y":55},{"x":"Birds","y":10}]'
    legend-data='[{"name":"Cats: 35"},{"name":"Dogs: 55"},{"name":"Birds: 10"}]'
    width="350"
    height="230"></pfj-chart-donut>

<pfj-chart-bullet
    title="Text label"
    primary-segmented-measure-data='[{"name":"Measure","y":60}]'
    comparative-warning-measure-data='[{"name":"Warning","y":88}]'
    qualitative-range-data='[{"name":"Range","y":50},{"name":"Range","y":75}]'
    max-domain="100"
    width="600"
    height="150"></pfj-chart-bullet>

<pfj-chart-donut-threshold data='[{"x":"Warning at 60%","y":60},{"x":"Danger at 90%","y":90}]'>
    <pfj-chart-donut-utilization
        title="45%"
        sub-title="of 100 GBps"
        data='{"x":"Storage capacity","y":45}'
        thresholds='[{"value":60},{"value":90}]'></pfj-chart-donut-utilization>
</pfj-chart-donut-threshold>
"#;
