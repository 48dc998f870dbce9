//! Render a markup file through the bridge.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use pfj_charts::{parse_markup, Delivery, Document, RecordingHost, RenderEvent};

use crate::config::ConfigFile;

/// Run the render command.
pub fn run(file: &Path, config: &ConfigFile, sync: bool, compact: bool) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let delivery = if sync {
        Delivery::Synchronous
    } else {
        config.render.delivery
    };

    let events = render_markup(&source, delivery)
        .with_context(|| format!("Failed to render {}", file.display()))?;

    let json = if compact || !config.render.pretty {
        serde_json::to_string(&events)?
    } else {
        serde_json::to_string_pretty(&events)?
    };
    println!("{json}");

    Ok(())
}

/// Build every top-level element, attach it to a fresh document and return
/// what the renderer was asked to do.
pub fn render_markup(source: &str, delivery: Delivery) -> Result<Vec<RenderEvent>> {
    let nodes = parse_markup(source)?;

    let host = RecordingHost::new();
    let doc = Document::with_delivery(Rc::new(host.clone()), delivery);

    for node in &nodes {
        let element = doc.build(node)?;
        doc.append(&element)?;
    }
    let flushed = doc.flush();

    let events = host.events();
    tracing::info!(
        "Rendered {} elements: {} render passes, {} queued notifications",
        nodes.len(),
        events
            .iter()
            .filter(|e| matches!(e, RenderEvent::Rendered { .. }))
            .count(),
        flushed
    );

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_top_level_charts_only() {
        let events = render_markup(
            r#"<section>
                 <pfj-chart-donut title="Pets" width="300"></pfj-chart-donut>
                 <pfj-chart-donut-threshold>
                   <pfj-chart-donut-utilization title="45%"></pfj-chart-donut-utilization>
                 </pfj-chart-donut-threshold>
               </section>"#,
            Delivery::Batched,
        )
        .unwrap();

        let tags: Vec<&str> = events.iter().map(RenderEvent::tag).collect();
        assert_eq!(
            tags,
            vec![
                "pfj-chart-donut",
                "pfj-chart-donut",
                "pfj-chart-donut-threshold",
                "pfj-chart-donut-threshold",
            ]
        );

        let json = serde_json::to_value(&events).unwrap();
        assert_eq!(json[1]["event"], "rendered");
        assert_eq!(json[1]["node"]["params"], json!({ "title": "Pets", "width": 300 }));
        assert_eq!(
            json[3]["node"]["children"][0]["component"],
            "ChartDonutUtilization"
        );
    }

    #[test]
    fn unclosed_markup_fails() {
        let err = render_markup("<pfj-chart-donut>", Delivery::Batched).unwrap_err();

        assert!(err.to_string().contains("never closed"));
    }

    #[test]
    fn missing_file_fails_with_context() {
        let err = run(
            Path::new("does/not/exist.html"),
            &ConfigFile::default(),
            false,
            true,
        )
        .unwrap_err();

        assert!(err.to_string().contains("Failed to read"));
    }
}
