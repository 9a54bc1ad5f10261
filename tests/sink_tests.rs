mod common;

use common::mixed_events;
use slad_ambe::driver::Driver;
use slad_ambe::selector::AmBeSelector;
use slad_ambe::sink::{load_results, JsonSink, ResultSink};
use slad_ambe::SladError;
use tempfile::tempdir;

#[test]
fn test_json_round_trip() {
    let dir = tempdir().unwrap();
    let results = Driver::new(2, 3)
        .run(&AmBeSelector::default(), &mixed_events(60))
        .unwrap();

    for pretty in [false, true] {
        let path = dir.path().join(format!("results_{}.json", pretty));
        let mut sink = JsonSink::new(&path).pretty(pretty);
        assert_eq!(sink.path(), path.as_path());
        sink.write(&results).unwrap();

        let back = load_results(&path).unwrap();
        assert_eq!(back.tally, results.tally);
        assert_eq!(back.hists, results.hists);
        assert_eq!(back.livetime.labels, results.livetime.labels);
        for (a, b) in back.livetime.surviving.iter().zip(&results.livetime.surviving) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}

#[test]
fn test_document_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("r.json");
    let results = Driver::sequential()
        .run(&AmBeSelector::default(), &mixed_events(5))
        .unwrap();
    JsonSink::new(&path).write(&results).unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(doc["total_livetime"].is_number());
    assert_eq!(doc["livetime"]["labels"][0], "No cuts");
    assert_eq!(doc["tally"]["processed"], 5);
    assert_eq!(doc["hists"]["h_s1"]["axis"]["bins"], 500);
    assert_eq!(doc["hists"]["h_rvsene"]["name"], "h_rvsene");
}

#[test]
fn test_load_garbage_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(matches!(load_results(&path), Err(SladError::Json(_))));
    assert!(matches!(
        load_results(dir.path().join("none.json")),
        Err(SladError::Io(_))
    ));
}

/// Real results with one field of the JSON document replaced.
fn write_edited(
    dir: &std::path::Path,
    edit: impl FnOnce(&mut serde_json::Value),
) -> std::path::PathBuf {
    let results = Driver::sequential()
        .run(&AmBeSelector::default(), &mixed_events(10))
        .unwrap();
    let mut doc = serde_json::to_value(&results).unwrap();
    edit(&mut doc);
    let path = dir.join("edited.json");
    std::fs::write(&path, doc.to_string()).unwrap();
    path
}

#[test]
fn test_truncated_livetime_is_rejected() {
    let dir = tempdir().unwrap();
    let path = write_edited(dir.path(), |doc| {
        doc["livetime"]["surviving"] = serde_json::json!([1.0]);
    });
    assert!(matches!(load_results(&path), Err(SladError::Binning(_))));
}

#[test]
fn test_truncated_histogram_is_rejected() {
    let dir = tempdir().unwrap();
    let path = write_edited(dir.path(), |doc| {
        doc["hists"]["h_s1"]["sumw"] = serde_json::json!([0.0, 1.0]);
    });
    assert!(matches!(load_results(&path), Err(SladError::Binning(_))));

    let path = write_edited(dir.path(), |doc| {
        doc["hists"]["h_rvsene"]["sumw2"] = serde_json::json!([]);
    });
    assert!(matches!(load_results(&path), Err(SladError::Binning(_))));

    let path = write_edited(dir.path(), |doc| {
        doc["hists"]["h_ene"]["axis"]["bins"] = serde_json::json!(0);
    });
    assert!(matches!(load_results(&path), Err(SladError::Binning(_))));
}

#[test]
fn test_truncated_tally_is_rejected() {
    let dir = tempdir().unwrap();
    let path = write_edited(dir.path(), |doc| {
        doc["tally"]["passed"] = serde_json::json!([1, 2]);
    });
    assert!(matches!(load_results(&path), Err(SladError::Binning(_))));
}
