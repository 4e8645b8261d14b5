//! Integration tests for the ChartBuilder API
//!
//! These tests drive the whole pipeline from raw rows to exported charts.

use orgchart::{
    ChartBuilder, HierarchyError, OrgChartError, ValidationError,
    config::{AppConfig, DanglingManagerPolicy, HierarchyConfig, LayoutConfig},
    identifier::Id,
    row::{CellValue, RawRow},
};

fn row(handle: &str, name: &str, reports_to: &str) -> RawRow {
    RawRow::new()
        .with("Handle", handle)
        .with("Name", name)
        .with("ReportsTo", reports_to)
        .with("Image", format!("img/{handle}.png"))
}

fn company() -> Vec<RawRow> {
    vec![
        row("ceo", "Grace", ""),
        row("cto", "Linus", "ceo").with("Tags", "Engineering, Leadership"),
        row("dev1", "Ken", "cto"),
        row("dev2", "Barbara", "cto"),
        row("cfo", "Warren", "ceo"),
        RawRow::new()
            .with("Handle", "advisor")
            .with("Name", "Ada")
            .with("ReportsTo", CellValue::Missing),
    ]
}

fn x(chart: &orgchart::export::Chart, id: &str) -> f32 {
    chart.node(id).expect("node exists").x()
}

#[test]
fn test_builder_api_exists() {
    let _builder = ChartBuilder::default();
}

#[test]
fn test_build_company_chart() {
    let chart = ChartBuilder::default()
        .build(&company())
        .expect("Failed to build chart");

    assert_eq!(chart.nodes().len(), 6);
    assert_eq!(chart.edges().len(), 4);

    let cto = chart.node("cto").unwrap();
    assert_eq!(cto.depth(), 1);
    assert_eq!(cto.label(), "Linus\n(cto)");
    assert_eq!(cto.image_ref(), "img/cto.png");
    assert!(cto.tags().contains("leadership"));

    assert_eq!(x(&chart, "cto"), (x(&chart, "dev1") + x(&chart, "dev2")) / 2.0);
}

#[test]
fn test_output_ids_match_input_ids() {
    let rows = company();
    let chart = ChartBuilder::default().build(&rows).unwrap();

    let mut input: Vec<String> = rows
        .iter()
        .filter_map(|row| row.text("Handle"))
        .collect();
    let mut output: Vec<String> = chart.nodes().iter().map(|n| n.id().to_string()).collect();
    input.sort();
    output.sort();
    assert_eq!(input, output);
}

#[test]
fn test_depth_is_parent_depth_plus_one() {
    let chart = ChartBuilder::default().build(&company()).unwrap();

    for edge in chart.edges() {
        let manager = chart.node(edge.from().as_str()).unwrap();
        let report = chart.node(edge.to().as_str()).unwrap();
        assert_eq!(report.depth(), manager.depth() + 1);
    }
    for root in ["ceo", "advisor"] {
        assert_eq!(chart.node(root).unwrap().depth(), 0);
    }
}

#[test]
fn test_repeated_builds_are_bit_identical() {
    let builder = ChartBuilder::default();
    let first = builder.build(&company()).unwrap();
    let second = builder.build(&company()).unwrap();

    assert_eq!(first, second);
    for (a, b) in first.nodes().iter().zip(second.nodes()) {
        assert_eq!(a.x().to_bits(), b.x().to_bits());
        assert_eq!(a.y().to_bits(), b.y().to_bits());
    }
}

#[test]
fn test_forest_layout() {
    let rows = vec![
        row("R1", "Root One", ""),
        row("A", "A", "R1"),
        row("B", "B", "R1"),
        row("R2", "Root Two", ""),
    ];
    let builder = ChartBuilder::default();
    let people = builder.normalize(&rows).unwrap();
    let hierarchy = builder.build_hierarchy(&people).unwrap();
    let layout = builder.layout(&hierarchy);

    let trees = layout.tree_bounds();
    assert_eq!(trees.len(), 2);
    assert!(!trees[0].overlaps_horizontally(&trees[1]));

    let chart = builder.export(&hierarchy, &layout);
    assert_eq!(x(&chart, "R1"), (x(&chart, "A") + x(&chart, "B")) / 2.0);
}

#[test]
fn test_three_cycle_fails() {
    let rows = vec![row("A", "A", "C"), row("B", "B", "A"), row("C", "C", "B")];
    let err = ChartBuilder::default().build(&rows).unwrap_err();

    let OrgChartError::Hierarchy(HierarchyError::CycleDetected { members }) = &err else {
        panic!("expected a cycle error, got {err:?}");
    };
    let mut members: Vec<String> = members.iter().map(Id::to_string).collect();
    members.sort();
    assert_eq!(members, vec!["A", "B", "C"]);
}

#[test]
fn test_self_report_fails() {
    let rows = vec![row("X", "X", "X")];
    let err = ChartBuilder::default().build(&rows).unwrap_err();

    assert!(matches!(
        err,
        OrgChartError::Hierarchy(HierarchyError::CycleDetected { ref members }) if members.len() == 1
    ));
}

#[test]
fn test_dangling_manager_fails() {
    let rows = vec![row("root", "Root", ""), row("eve", "Eve", "ghost")];
    let err = ChartBuilder::default().build(&rows).unwrap_err();

    assert!(matches!(
        err,
        OrgChartError::Hierarchy(HierarchyError::DanglingManager { .. })
    ));
}

#[test]
fn test_dangling_manager_demoted_by_config() {
    let config = AppConfig::default()
        .with_hierarchy(HierarchyConfig::new(DanglingManagerPolicy::Demote));
    let rows = vec![row("root", "Root", ""), row("eve", "Eve", "ghost")];

    let chart = ChartBuilder::new(config).unwrap().build(&rows).unwrap();
    assert_eq!(chart.node("eve").unwrap().depth(), 0);
    assert!(chart.edges().is_empty());
}

#[test]
fn test_duplicate_id_fails_regardless_of_fields() {
    let rows = vec![row("X", "First", ""), row("X", "", "nobody")];
    let err = ChartBuilder::default().build(&rows).unwrap_err();

    assert!(matches!(
        err,
        OrgChartError::Validation(ValidationError::DuplicateId { row: 1, .. })
    ));
}

#[test]
fn test_rows_without_manager_or_image_columns() {
    let rows = vec![
        RawRow::new().with("Handle", "ceo").with("Name", "CEO"),
        RawRow::new().with("Handle", "cto").with("Name", "CTO"),
    ];
    let chart = ChartBuilder::default().build(&rows).unwrap();

    assert_eq!(chart.nodes().len(), 2);
    assert!(chart.edges().is_empty());
    assert_eq!(chart.node("cto").unwrap().image_ref(), "");
    assert_eq!(chart.node("cto").unwrap().depth(), 0);
}

#[test]
fn test_duplicate_id_without_manager_or_image_columns() {
    let rows = vec![
        RawRow::new().with("Handle", "X").with("Name", "a"),
        RawRow::new().with("Handle", "X").with("Name", "b"),
    ];
    let err = ChartBuilder::default().build(&rows).unwrap_err();

    assert!(matches!(
        err,
        OrgChartError::Validation(ValidationError::DuplicateId { row: 1, first_row: 0, .. })
    ));
}

#[test]
fn test_chart_owns_its_ids() {
    let chart = {
        let rows = vec![row("solo", "Solo", "")];
        let builder = ChartBuilder::default();
        builder.build(&rows).unwrap()
    };
    assert_eq!(chart.node("solo").map(|node| node.id().as_str()), Some("solo"));

    for i in 0..100 {
        let id = format!("run{i}");
        let chart = ChartBuilder::default()
            .build(&[row(&id, "Temp", "")])
            .unwrap();
        assert_eq!(chart.nodes().len(), 1);
        assert!(chart.node(&id).is_some());
        assert!(chart.node("solo").is_none());
    }
}

#[test]
fn test_invalid_config_rejected() {
    let config = AppConfig::default().with_layout(LayoutConfig::new(0.0, 120.0, 200.0));
    assert!(ChartBuilder::new(config).is_err());
}

#[test]
fn test_render_json() {
    let builder = ChartBuilder::default();
    let chart = builder.build(&company()).unwrap();
    let json = builder.render_json(&chart).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(6));
    assert_eq!(value["nodes"][0]["id"], "ceo");
    assert_eq!(value["nodes"][0]["imageRef"], "img/ceo.png");
    assert_eq!(value["edges"][0]["from"], "ceo");
    assert_eq!(value["edges"][0]["to"], "cto");
}

#[test]
fn test_empty_rows_give_empty_chart() {
    let chart = ChartBuilder::default().build(&[]).unwrap();
    assert!(chart.is_empty());
    assert_eq!(chart.width(), 0.0);
    assert_eq!(chart.height(), 0.0);
}
