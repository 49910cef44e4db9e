//! Full visualizer runs over small GraphRAG-style output folders.

use kgassist_viz::{visualize, VizError, VisualizeOptions, IMAGE_FILE, SUMMARY_FILE};
use std::fs;
use std::path::Path;

fn write_fixture(dir: &Path) {
    fs::write(
        dir.join("create_final_entities.csv"),
        "\
id,title,type,description
0,NTPC,organization,Generating company
1,PEAK ENERGY,concept,Energy supplied during peak hours
2,INVOICE,document,Monthly bill
3,RSOPL,organization,Trader
4,ORPHAN,concept,Not connected to anything
",
    )
    .unwrap();
    fs::write(
        dir.join("create_final_relationships.csv"),
        "\
source,target,description,weight
NTPC,PEAK ENERGY,supplies,2.0
PEAK ENERGY,INVOICE,billed on,1.0
RSOPL,INVOICE,receives,1.5
NTPC,INVOICE,issues,1.0
NTPC,UNKNOWN PLANT,owns,1.0
",
    )
    .unwrap();
}

#[test]
fn writes_image_and_summary_next_to_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let report = visualize(&VisualizeOptions::new(dir.path())).unwrap();

    assert_eq!(report.entity_count, 5);
    assert_eq!(report.relationship_count, 5);
    assert_eq!(report.stats.nodes, 5);
    // The edge to UNKNOWN PLANT is dropped: its endpoint is not an entity
    assert_eq!(report.stats.edges, 4);
    assert_eq!(report.stats.components, 2);
    assert!((report.stats.density - 0.4).abs() < 1e-12);
    assert_eq!(report.type_counts[0], ("organization".to_string(), 2));
    assert_eq!(report.type_counts[1], ("concept".to_string(), 2));

    assert_eq!(report.image_path, dir.path().join(IMAGE_FILE));
    let svg = fs::read_to_string(&report.image_path).unwrap();
    assert!(svg.contains("5 Entities | 4 Relationships"));
    assert!(svg.contains(">ORGANIZATION</text>"));

    // The summary counts raw relationship endpoints, dropped edge included
    let summary = fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
    let mut lines = summary.lines();
    assert_eq!(lines.next(), Some("Entity,Connections"));
    assert_eq!(lines.next(), Some("NTPC,3"));
    assert_eq!(lines.next(), Some("INVOICE,3"));
    assert!(summary.contains("UNKNOWN PLANT,1"));
    assert_eq!(report.top_entities.len(), 5);
}

#[test]
fn separate_output_dir_is_created() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let out = dir.path().join("rendered/graphs");

    let mut options = VisualizeOptions::new(dir.path());
    options.output_dir = Some(out.clone());
    options.render.title = "Invoice Schedule".to_string();
    options.top_n = 2;

    let report = visualize(&options).unwrap();
    assert_eq!(report.image_path, out.join(IMAGE_FILE));
    assert!(fs::read_to_string(out.join(IMAGE_FILE))
        .unwrap()
        .contains("Knowledge Graph - Invoice Schedule"));
    assert_eq!(
        fs::read_to_string(out.join(SUMMARY_FILE)).unwrap().lines().count(),
        3
    );
}

#[test]
fn rerunning_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let options = VisualizeOptions::new(dir.path());

    visualize(&options).unwrap();
    let first = fs::read_to_string(dir.path().join(IMAGE_FILE)).unwrap();
    visualize(&options).unwrap();
    let second = fs::read_to_string(dir.path().join(IMAGE_FILE)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_tables_are_reported_with_what_was_found() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("entities.parquet"), b"PAR1").unwrap();

    match visualize(&VisualizeOptions::new(dir.path())) {
        Err(VizError::EntitiesNotFound { found, .. }) => {
            assert_eq!(found, vec!["entities.parquet".to_string()]);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn half_blank_relationship_counts_but_adds_no_edge() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("entities.csv"), "title,type\nA,org\nB,org\n").unwrap();
    fs::write(dir.path().join("relationships.csv"), "source,target\nA,B\nA,\n").unwrap();

    let report = visualize(&VisualizeOptions::new(dir.path())).unwrap();
    assert_eq!(report.relationship_count, 2);
    assert_eq!(report.stats.edges, 1);

    let summary = fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
    assert_eq!(summary, "Entity,Connections\nA,2\nB,1\n");
}
