//! Experiment Schema Tests
//!
//! Record layout, store addressing (directory vs file) and reload fidelity.

use c2s_train::data::RecordingEntry;
use c2s_train::experiment::{
    ExperimentRecord, ExperimentStore, OutputTarget, DEFAULT_FILENAME, FORMAT_VERSION,
};
use c2s_train::partition::TrainingSubset;
use c2s_train::registry::CellIds;
use c2s_train::rng::ExperimentRng;
use c2s_train::trainer::RateModel;
use c2s_train::ExperimentConfig;
use chrono::{TimeZone, Utc};

fn subset(cells: &[i64], num_train: i64) -> TrainingSubset {
    let entries: Vec<RecordingEntry> = cells
        .iter()
        .map(|&c| RecordingEntry::new().with_cell_num(c))
        .collect();
    let ids = CellIds::collect(&entries).unwrap();
    TrainingSubset::select(num_train, &ids, &mut ExperimentRng::seeded(7)).unwrap()
}

fn config(output: OutputTarget) -> ExperimentConfig {
    ExperimentConfig::builder(output)
        .dataset("data/a.json")
        .dataset("data/b.json")
        .num_train(2)
        .seed(7)
        .build()
}

// =============================================================================
// ExperimentRecord Tests
// =============================================================================

#[test]
fn test_experiment_record_creation() {
    let args = config(OutputTarget::File("exp.xpck".into()));
    let record = ExperimentRecord::new(args.clone(), subset(&[1, 2, 3], 2), &[0.5_f64]).unwrap();

    assert_eq!(record.format_version(), FORMAT_VERSION);
    assert_eq!(record.args(), &args);
    assert_eq!(record.training_cells().len(), 2);
    assert_eq!(record.models().len(), 1);
    assert!(record.created_at().is_none());
}

#[test]
fn test_experiment_record_echoes_config_verbatim() {
    let args = config(OutputTarget::Directory("runs".into()));
    let record = ExperimentRecord::new(args, subset(&[0], 0), &[1_u8]).unwrap();

    let json = serde_json::to_value(&record).expect("serialization failed");
    assert_eq!(json["args"]["datasets"], serde_json::json!(["data/a.json", "data/b.json"]));
    assert_eq!(json["args"]["num_train"], 2);
    assert_eq!(json["args"]["seed"], 7);
    assert_eq!(json["args"]["output"]["kind"], "directory");
    assert_eq!(json["training_cells"]["cells"], serde_json::json!([0]));
}

#[test]
fn test_experiment_record_serialization() {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let record = ExperimentRecord::builder(config(OutputTarget::File("x".into())), subset(&[4, 8], 0))
        .models(&["model-a", "model-b"])
        .unwrap()
        .created_at(created)
        .build();

    let json = serde_json::to_string(&record).expect("serialization failed");
    let deserialized: ExperimentRecord =
        serde_json::from_str(&json).expect("deserialization failed");

    assert_eq!(deserialized, record);
    assert_eq!(deserialized.created_at(), Some(created));
}

// =============================================================================
// ExperimentStore Tests
// =============================================================================

#[test]
fn test_store_directory_target_uses_default_filename() {
    let dir = tempfile::tempdir().unwrap();
    let target = OutputTarget::resolve(dir.path());
    let record = ExperimentRecord::new(config(target.clone()), subset(&[0, 1], 0), &[0_u8]).unwrap();

    let path = ExperimentStore::new().save(&target, &record).unwrap();
    assert_eq!(path, dir.path().join(DEFAULT_FILENAME));
    assert!(path.is_file());
}

#[test]
fn test_store_file_target_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("custom.xpck");
    std::fs::write(&file, b"previous contents").unwrap();

    let target = OutputTarget::resolve(&file);
    assert_eq!(target, OutputTarget::File(file.clone()));

    let record = ExperimentRecord::new(config(target.clone()), subset(&[0, 1], 1), &[3_u8]).unwrap();
    let store = ExperimentStore::new();
    let path = store.save(&target, &record).unwrap();

    assert_eq!(path, file);
    assert_eq!(store.load(&file).unwrap(), record);
}

#[test]
fn test_store_reload_decodes_models() {
    let dir = tempfile::tempdir().unwrap();
    let target = OutputTarget::Directory(dir.path().to_path_buf());
    let args = config(target.clone());
    let params = args.training_params();
    let models = vec![RateModel {
        rate: 0.125,
        loss: 0.3,
        finetuned: false,
        model_parameters: params.model_parameters,
        window_length: params.window_length,
        var_explained: params.var_explained,
    }];
    let record = ExperimentRecord::new(args, subset(&[0, 1, 2], 2), &models).unwrap();

    let store = ExperimentStore::new();
    let path = store.save(&target, &record).unwrap();
    let loaded = store.load(&path).unwrap();

    assert_eq!(loaded.models_as::<RateModel>().unwrap(), models);
    assert_eq!(loaded.training_cells(), record.training_cells());
}

#[test]
fn test_store_load_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join(DEFAULT_FILENAME);
    std::fs::write(&file, b"not json").unwrap();

    let err = ExperimentStore::new().load(&file).unwrap_err();
    assert_eq!(err.kind(), c2s_train::ErrorKind::IoFailure);
}
