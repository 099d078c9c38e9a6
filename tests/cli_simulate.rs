use clap::Parser;
use lattice_q::cli::commands::{
    inspect::{self, InspectArgs},
    simulate::{self, SimulateArgs},
};
use tempfile::tempdir;

const RUN_CONFIG: &str = r#"{
    "learner": {
        "agents": 3,
        "time_horizon": 20,
        "velocity_horizon": 1000000000.0,
        "persist_threshold": 3
    },
    "simulation": { "steps": 200 }
}"#;

#[test]
fn simulate_writes_snapshots_summary_and_checkpoint() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("run.json");
    std::fs::write(&config, RUN_CONFIG).unwrap();
    let snapshot = tmp.path().join("Data").join("data_Q.json");
    let summary = tmp.path().join("out").join("summary.json");
    let observations = tmp.path().join("epochs.jsonl");
    let checkpoint = tmp.path().join("learner.msgpack");

    let args = SimulateArgs::parse_from([
        "simulate",
        "--config",
        config.to_str().unwrap(),
        "--seed",
        "5",
        "--snapshot",
        snapshot.to_str().unwrap(),
        "--summary",
        summary.to_str().unwrap(),
        "--observations",
        observations.to_str().unwrap(),
        "--output",
        checkpoint.to_str().unwrap(),
    ]);
    simulate::execute(args).expect("simulation should succeed");

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(parsed["simulation"]["epochs"], 10);
    // updates 4 and 8 exceed the threshold; the last two go out at shutdown
    assert_eq!(parsed["simulation"]["flushes"], 3);
    assert_eq!(parsed["learner"]["agents"], 3);
    assert_eq!(parsed["mode"], "global");

    let lines = std::fs::read_to_string(&observations).unwrap();
    assert_eq!(lines.lines().count(), 10);

    assert!(snapshot.exists());
    assert!(checkpoint.exists());

    let args = InspectArgs::parse_from(["inspect", snapshot.to_str().unwrap(), "--all"]);
    inspect::execute(args).expect("inspect should read the snapshot");
}

#[test]
fn resume_rejects_a_checkpoint_for_another_swarm() {
    let tmp = tempdir().unwrap();
    let snapshot = tmp.path().join("data_Q.json");
    let checkpoint = tmp.path().join("learner.msgpack");

    let args = SimulateArgs::parse_from([
        "simulate",
        "--agents",
        "3",
        "--steps",
        "10",
        "--seed",
        "1",
        "--snapshot",
        snapshot.to_str().unwrap(),
        "--output",
        checkpoint.to_str().unwrap(),
    ]);
    simulate::execute(args).unwrap();

    let args = SimulateArgs::parse_from([
        "simulate",
        "--agents",
        "4",
        "--steps",
        "10",
        "--snapshot",
        snapshot.to_str().unwrap(),
        "--resume",
        checkpoint.to_str().unwrap(),
    ]);
    assert!(simulate::execute(args).is_err());
}

#[test]
fn inspect_reports_missing_entry() {
    let tmp = tempdir().unwrap();
    let snapshot = tmp.path().join("data_Q.json");
    std::fs::write(&snapshot, "{}").unwrap();

    let args = InspectArgs::parse_from(["inspect", snapshot.to_str().unwrap()]);
    assert!(inspect::execute(args).is_err());
}

#[test]
fn resume_applies_tuning_flags_over_the_checkpoint() {
    let tmp = tempdir().unwrap();
    let snapshot = tmp.path().join("data_Q.json");
    let checkpoint = tmp.path().join("learner.msgpack");
    let summary = tmp.path().join("resumed.json");

    let args = SimulateArgs::parse_from([
        "simulate",
        "--agents",
        "3",
        "--steps",
        "10",
        "--seed",
        "1",
        "--snapshot",
        snapshot.to_str().unwrap(),
        "--output",
        checkpoint.to_str().unwrap(),
    ]);
    simulate::execute(args).unwrap();

    let args = SimulateArgs::parse_from([
        "simulate",
        "--steps",
        "10",
        "--resume",
        checkpoint.to_str().unwrap(),
        "--explore-rate",
        "0",
        "--persist-threshold",
        "2",
        "--time-horizon",
        "50",
        "--snapshot",
        snapshot.to_str().unwrap(),
        "--summary",
        summary.to_str().unwrap(),
    ]);
    simulate::execute(args).expect("resumed run should succeed");

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(parsed["learner"]["agents"], 3);
    assert_eq!(parsed["learner"]["explore_rate"], 0.0);
    assert_eq!(parsed["learner"]["persist_threshold"], 2);
    assert_eq!(parsed["learner"]["time_horizon"], 50);
    assert_eq!(parsed["learner"]["seed"], 1);
}

#[test]
fn background_write_failures_are_reported() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("run.json");
    std::fs::write(&config, RUN_CONFIG).unwrap();
    // a directory cannot be opened as the snapshot file
    let snapshot = tmp.path().join("blocked");
    std::fs::create_dir(&snapshot).unwrap();
    let summary = tmp.path().join("summary.json");

    for background in [false, true] {
        let mut argv = vec![
            "simulate".to_string(),
            "--config".to_string(),
            config.display().to_string(),
            "--seed".to_string(),
            "5".to_string(),
            "--snapshot".to_string(),
            snapshot.display().to_string(),
            "--summary".to_string(),
            summary.display().to_string(),
        ];
        if background {
            argv.push("--background".to_string());
        }
        simulate::execute(SimulateArgs::parse_from(argv)).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
        assert_eq!(parsed["simulation"]["flushes"], 0, "background = {background}");
        assert_eq!(
            parsed["simulation"]["failed_flushes"], 3,
            "background = {background}"
        );
    }
}
