use revpref_core::dataset::Dataset;
use revpref_core::hash::dataset_hash;
use revpref_core::io::{
    dataset_from_csv, dataset_from_json, dataset_to_csv, dataset_to_json, load_dataset,
    save_dataset,
};
use tempfile::tempdir;

fn sample() -> Dataset {
    Dataset::from_rows(
        &[vec![1.0, 0.0], vec![0.0, 1.0], vec![0.25, 0.5]],
        &[vec![1.0, 2.0], vec![2.0, 1.0], vec![2.0, 1.0]],
    )
    .unwrap()
}

#[test]
fn json_uses_row_major_layout() {
    let json = r#"{"prices": [[1.0, 0.0], [0.0, 1.0]], "bundles": [[1.0, 2.0], [2.0, 1.0]]}"#;
    let dataset = dataset_from_json(json).unwrap();
    assert_eq!(dataset.observations(), 2);
    assert_eq!(dataset.bundles()[(0, 1)], 2.0);

    let encoded = dataset_to_json(&dataset).unwrap();
    assert_eq!(dataset_from_json(&encoded).unwrap(), dataset);
}

#[test]
fn json_shape_errors_surface() {
    let json = r#"{"prices": [[1.0, 0.0]], "bundles": [[1.0, 2.0], [2.0, 1.0]]}"#;
    assert_eq!(dataset_from_json(json).unwrap_err().code(), "shape-mismatch");
    assert_eq!(
        dataset_from_json("{\"prices\": 3}").unwrap_err().code(),
        "dataset-deserialize"
    );
}

#[test]
fn csv_header_lists_prices_then_bundles() {
    let csv = "p1,p2,x1,x2\n1,0,1,2\n0,1,2,1\n";
    let dataset = dataset_from_csv(csv.as_bytes()).unwrap();
    assert_eq!(dataset.prices()[(1, 1)], 1.0);
    assert_eq!(dataset.bundles()[(1, 0)], 2.0);

    let written = dataset_to_csv(&sample()).unwrap();
    assert!(written.starts_with("p1,p2,x1,x2\n"));
    assert_eq!(dataset_from_csv(written.as_bytes()).unwrap(), sample());
}

#[test]
fn csv_errors_are_coded() {
    let cases = [
        ("p1,x1,x2\n1,1,1\n", "csv-header"),
        ("p1,q2,x1,x2\n1,1,1,1\n", "csv-header"),
        ("p1,x1\n1,abc\n", "csv-number"),
        ("p1,x1\n", "empty-dataset"),
    ];
    for (csv, code) in cases {
        assert_eq!(dataset_from_csv(csv.as_bytes()).unwrap_err().code(), code, "{csv}");
    }
}

#[test]
fn files_pick_format_by_extension() {
    let dir = tempdir().unwrap();
    let dataset = sample();
    for name in ["panel.json", "panel.CSV"] {
        let path = dir.path().join(name);
        save_dataset(&dataset, &path).unwrap();
        assert_eq!(load_dataset(&path).unwrap(), dataset);
    }
    let csv = std::fs::read_to_string(dir.path().join("panel.CSV")).unwrap();
    assert!(csv.starts_with("p1,p2"));

    let err = load_dataset(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.code(), "dataset-read");
}

#[test]
fn dataset_hash_tracks_content() {
    let dataset = sample();
    assert_eq!(dataset_hash(&dataset).unwrap(), dataset_hash(&sample()).unwrap());
    let repriced = dataset
        .with_prices(nalgebra::DMatrix::from_element(3, 2, 0.5))
        .unwrap();
    assert_ne!(dataset_hash(&dataset).unwrap(), dataset_hash(&repriced).unwrap());
}
