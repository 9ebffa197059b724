//! Saving and loading registries through the persistence adapters.

use std::fs;

use bindkit_core::Error;
use bindkit_input::{PersistenceAdapter, Registry, ALL_STATE};
use bindkit_persist::{JsonAdapter, RonAdapter};
use bindkit_test::{init_logging, temp_path, Recorder};

#[test]
fn save_then_load_into_fresh_registry() {
    init_logging();
    let path = temp_path("bindings.json");
    let recorder = Recorder::new();

    let mut original = Registry::new();
    original
        .bind("space", "gameplay", "jump")
        .on_press(recorder.button("jump"));
    original.save(&path, &JsonAdapter::default()).unwrap();

    let mut loaded = Registry::new();
    loaded.load(&path, &JsonAdapter::default()).unwrap();
    fs::remove_file(&path).unwrap();

    let jump = loaded.get_binding("gameplay", "jump").unwrap();
    assert_eq!(jump.keys().iter().collect::<Vec<_>>(), ["space"]);
    assert_eq!(jump.press_callback_count(), 0);
    assert_eq!(jump.release_callback_count(), 0);

    loaded.set_active_state("gameplay");
    assert_eq!(loaded.handle_key_press("space", false), 0);
}

#[test]
fn round_trip_preserves_names_and_keys() {
    let mut controls = Registry::new();
    controls.bind_many(["w", "up"], "gameplay", "forward").on_press(|_, _| {});
    controls.bind("escape", "menu", "back").on_release(|_, _| {});
    controls.binding("menu", "unbound");
    controls.mouse().left().bind("lctrl").on_press(|_, _| {});

    for adapter in [&JsonAdapter::compact() as &dyn PersistenceAdapter, &RonAdapter] {
        let text = adapter.serialize(&controls.snapshot()).unwrap();
        let tree = adapter.deserialize(&text).unwrap();
        assert_eq!(tree, controls.snapshot());

        let mut restored = Registry::new();
        restored.restore(tree);
        assert_eq!(restored.snapshot(), controls.snapshot());
        for state in ["gameplay", "menu", ALL_STATE] {
            for (_, binding) in restored.bindings_in(state) {
                assert_eq!(binding.press_callback_count(), 0);
                assert_eq!(binding.release_callback_count(), 0);
            }
        }
    }
}

#[test]
fn callbacks_can_be_registered_again_after_load() {
    let path = temp_path("bindings.ron");
    Registry::builder()
        .bind("space", "gameplay", "jump")
        .build()
        .save(&path, &RonAdapter)
        .unwrap();

    let recorder = Recorder::new();
    let mut controls = Registry::builder().with_active_state("gameplay").build();
    controls.load(&path, &RonAdapter).unwrap();
    fs::remove_file(&path).unwrap();

    controls.binding("gameplay", "jump").on_press(recorder.button("jump"));
    controls.handle_key_press("space", false);
    assert_eq!(recorder.count("jump"), 1);
}

#[test]
fn malformed_file_leaves_registry_untouched() {
    let path = temp_path("broken.json");
    fs::write(&path, r#"{"gameplay": {"jump": {"keys": "space"}}"#).unwrap();

    let mut controls = Registry::new();
    controls.bind("q", "menu", "quit");
    let before = controls.snapshot();

    let err = controls.load(&path, &JsonAdapter::default()).unwrap_err();
    fs::remove_file(&path).unwrap();
    assert!(matches!(err, Error::Serialization(_)));
    assert_eq!(controls.snapshot(), before);
}

#[test]
fn empty_names_are_rejected() {
    let path = temp_path("empty.json");
    fs::write(&path, r#"{"gameplay": {"": {"keys": ["space"]}}}"#).unwrap();

    let mut controls = Registry::new();
    let err = controls.load(&path, &JsonAdapter::default()).unwrap_err();
    fs::remove_file(&path).unwrap();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn missing_file_is_io_error() {
    let mut controls = Registry::new();
    let err = controls
        .load(temp_path("does-not-exist.json"), &JsonAdapter::default())
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn whitespace_names_survive_save_and_load() {
    let path = temp_path("space.json");
    let mut controls = Registry::new();
    controls.bind(" ", "gameplay", "jump");
    controls.bind("space", " ", " ");
    controls.save(&path, &JsonAdapter::default()).unwrap();

    let mut loaded = Registry::new();
    loaded.load(&path, &JsonAdapter::default()).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(loaded.get_binding("gameplay", "jump").unwrap().is_bound_to(" "));
    assert!(loaded.get_binding(" ", " ").unwrap().is_bound_to("space"));
    assert_eq!(loaded.snapshot(), controls.snapshot());
}

#[test]
fn unloadable_names_are_not_saved() {
    let path = temp_path("empty-key.json");
    let mut controls = Registry::new();
    controls.bind("", "gameplay", "jump");

    let err = controls.save(&path, &JsonAdapter::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
    assert!(!path.exists());
}
