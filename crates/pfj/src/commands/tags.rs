//! List chart tags.

use anyhow::Result;
use pfj_charts::{to_pascal_case, ElementRegistry};

/// Run the tags command.
pub fn run() -> Result<()> {
    for (tag, component) in describe(&ElementRegistry::with_charts())? {
        println!("{tag:<32} {component}");
    }
    Ok(())
}

fn describe(registry: &ElementRegistry) -> Result<Vec<(String, String)>> {
    registry
        .tags()
        .into_iter()
        .map(|tag| -> Result<(String, String)> {
            let component = registry.component(tag)?;
            tracing::debug!("<{}> is {}", tag, to_pascal_case(tag));
            Ok((tag.to_string(), component.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn describes_builtin_charts() {
        let rows = describe(&ElementRegistry::with_charts()).unwrap();

        assert_eq!(
            rows,
            vec![
                ("pfj-chart-bullet".to_string(), "ChartBullet".to_string()),
                ("pfj-chart-donut".to_string(), "ChartDonut".to_string()),
                (
                    "pfj-chart-donut-threshold".to_string(),
                    "ChartDonutThreshold".to_string()
                ),
                (
                    "pfj-chart-donut-utilization".to_string(),
                    "ChartDonutUtilization".to_string()
                ),
            ]
        );
    }
}
