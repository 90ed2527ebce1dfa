use breathscope::chart::ChartConfig;
use breathscope::{ReplayOptions, replay};
use std::fs::File;
use std::io::{BufReader, Write};

fn session(readings: usize) -> String {
    let mut out = String::new();
    for i in 0..readings {
        let ambient = 24.0 + (i % 5) as f64 * 0.1;
        let object = 33.0 + (i % 7) as f64 * 0.2;
        out.push_str(&format!(
            "{{\"ambient_temp\":{ambient},\"object_temp\":{object},\"sampling_interval\":250}}\n"
        ));
    }
    out
}

#[test]
fn test_replay_from_files_with_custom_config() {
    let dir = tempfile::tempdir().unwrap();

    let config_path = dir.path().join("chart.json");
    std::fs::write(&config_path, r#"{"maxDataPoints": 10, "updateInterval": 100}"#).unwrap();
    let config = ChartConfig::from_json_file(&config_path).unwrap();
    assert_eq!(config.max_data_points, 10);

    let input_path = dir.path().join("session.jsonl");
    let mut input = File::create(&input_path).unwrap();
    input.write_all(session(25).as_bytes()).unwrap();
    drop(input);

    let options = ReplayOptions {
        config,
        ..ReplayOptions::default()
    };
    let report = replay(BufReader::new(File::open(&input_path).unwrap()), options).unwrap();

    assert_eq!(report.accepted, 25);
    assert_eq!(report.window_len, 10);
    assert!(report.svg.starts_with("<svg"));
    assert_eq!(report.readouts[2], ("samplingRate".to_string(), "240".to_string()));
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("chart.json");
    std::fs::write(&config_path, r#"{"maxDataPoints": 1}"#).unwrap();

    assert!(ChartConfig::from_json_file(&config_path).is_err());
}
