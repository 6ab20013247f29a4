use std::fs;

use antifraud::{Config, Error, Feature};
use tempfile::TempDir;

const BATCH: &str = "\
time, id1, id2, amount, message
2016-11-01 17:38:25, 1, 2, 23.74, 🍞
2016-11-01 17:38:25, 2, 3, 1.00, rent
broken line
2016-11-01 17:38:25, 3, 4, 5.00, uber, lyft
";

const STREAM: &str = "\
time, id1, id2, amount, message
2016-11-02 09:49:29, 1, 3, 25.32, Spam
2016-11-02 09:49:29, 1, 5, 19.45, Food
2016-11-02 09:49:29, 4, 1, 1.00, hi
2016-11-02 09:49:29, 1, 5, 3.00, again
2016-11-02 09:49:29, oops, 5, 3.00, bad
";

fn setup() -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let batch = dir.path().join("batch_payment.csv");
    let stream = dir.path().join("stream_payment.csv");
    fs::write(&batch, BATCH).unwrap();
    fs::write(&stream, STREAM).unwrap();
    let outputs = ["output1.txt", "output2.txt", "output3.txt"].map(|f| dir.path().join(f));
    let config = Config::new(batch, stream, outputs);
    (dir, config)
}

fn read_lines(config: &Config, feature: Feature) -> Vec<String> {
    let path = config.output_for(feature).unwrap();
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn writes_one_verdict_file_per_feature() {
    let (_dir, config) = setup();
    let summary = antifraud::run(&config).unwrap();

    assert_eq!(summary.batch.records, 3);
    assert_eq!(summary.batch.skipped, 1);
    assert_eq!(summary.stream.records, 4);
    assert_eq!(summary.stream.skipped, 1);
    assert_eq!(summary.seed.node_count, 4);

    assert_eq!(
        read_lines(&config, Feature::One),
        ["unverified", "unverified", "unverified", "trusted"]
    );
    assert_eq!(
        read_lines(&config, Feature::Two),
        ["trusted", "unverified", "trusted", "trusted"]
    );
    assert_eq!(
        read_lines(&config, Feature::Three),
        ["trusted", "unverified", "trusted", "trusted"]
    );

    let trusted: Vec<usize> = summary.features.iter().map(|f| f.trusted).collect();
    assert_eq!(trusted, vec![1, 3, 3]);
}

#[test]
fn serial_and_parallel_runs_write_identical_files() {
    let (_dir, mut config) = setup();
    antifraud::run(&config).unwrap();
    let parallel: Vec<_> = Feature::ALL.iter().map(|&f| read_lines(&config, f)).collect();

    config.parallel = false;
    antifraud::run(&config).unwrap();
    let serial: Vec<_> = Feature::ALL.iter().map(|&f| read_lines(&config, f)).collect();

    assert_eq!(parallel, serial);
}

#[test]
fn missing_input_reports_the_path() {
    let (dir, mut config) = setup();
    config.batch = dir.path().join("nope.csv");
    match antifraud::run(&config) {
        Err(Error::Io { path, .. }) => assert_eq!(path, config.batch),
        other => panic!("expected i/o error, got {other:?}"),
    }
}

#[test]
fn json_configuration_round_trip() {
    let (dir, config) = setup();
    let path = dir.path().join("run.json");
    fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(Config::from_json_file(&path).unwrap(), config);

    fs::write(&path, r#"{"batch": "b", "stream": "s", "outputs": ["only-one"]}"#).unwrap();
    assert!(matches!(
        Config::from_json_file(&path),
        Err(Error::OutputCount { expected: 3, found: 1 })
    ));
}
