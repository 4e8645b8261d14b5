//! Example: Building a chart stage by stage
//!
//! This example builds rows in code, runs each pipeline stage separately
//! and prints where every person ends up.

use orgchart::{ChartBuilder, config::AppConfig, row::RawRow};

fn row(handle: &str, name: &str, reports_to: &str) -> RawRow {
    RawRow::new()
        .with("Handle", handle)
        .with("Name", name)
        .with("ReportsTo", reports_to)
        .with("Image", format!("img/{handle}.png"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rows = vec![
        row("ceo", "Chief Executive", ""),
        row("cto", "Chief Technology", "ceo").with("Tags", "Engineering, Leadership"),
        row("dev", "Developer", "cto"),
        row("ops", "Operations", "cto"),
        row("cfo", "Chief Financial", "ceo"),
        row("board", "Board Liaison", ""),
    ];

    let builder = ChartBuilder::new(AppConfig::default())?;

    let people = builder.normalize(&rows)?;
    let hierarchy = builder.build_hierarchy(&people)?;
    println!(
        "{} people, {} root(s), max depth {:?}",
        hierarchy.len(),
        hierarchy.roots().len(),
        hierarchy.max_depth()
    );

    let layout = builder.layout(&hierarchy);
    for node in layout.iter() {
        println!(
            "{:>6} depth={} x={:>6.1} y={:>6.1}",
            node.id().to_string(),
            node.depth(),
            node.x(),
            node.y()
        );
    }

    if let Some(reports) = hierarchy.descendant_count("ceo") {
        println!("ceo has {reports} direct and indirect reports");
    }

    let chart = builder.export(&hierarchy, &layout);
    println!("\n{}", builder.render_json(&chart)?);

    Ok(())
}
