use bubble_pointing::data::layout_gen::{generate_uniform, LayoutBounds};
use bubble_pointing::data::setup::SetupFile;
use bubble_pointing::{BubbleSelector, ExperimentError, TechniqueKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn generated_setup_survives_disk_and_drives_selector() {
    let setup = generate_uniform(&mut StdRng::seed_from_u64(42), LayoutBounds::default(), 9, 25.0).unwrap();
    let path = std::env::temp_dir().join(format!("setup-{}.json", std::process::id()));
    setup.save(&path).unwrap();
    let loaded = SetupFile::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, setup);

    let targets = loaded.to_targets().unwrap();
    let mut sel = BubbleSelector::new(targets.clone(), loaded.base_radius().unwrap()).unwrap();
    let c = targets[4].center;
    sel.on_pointer_moved(c.x + 3.0, c.y - 2.0);
    assert_eq!(sel.selected_index(), Some(4));
    assert!(sel.render_parameters().bubble.is_some());
}

#[test]
fn both_techniques_build_from_setup() {
    let setup = SetupFile::from_json(
        r#"{"numberOfCircles": 3, "circleRadius": 30, "coordinates": "(100,100);(400,300);(700,500)"}"#,
    )
    .unwrap();
    for kind in TechniqueKind::all() {
        let mut t = kind
            .build(setup.to_targets().unwrap(), setup.base_radius().unwrap(), 10.0)
            .unwrap();
        t.on_pointer_moved(120.0, 110.0);
        assert_eq!(t.selected_index(), Some(0), "{kind}");
    }
}

#[test]
fn zero_radius_setup_is_rejected() {
    let setup = SetupFile::from_json(r#"{"numberOfCircles": 1, "circleRadius": 0, "coordinates": "(1,1)"}"#).unwrap();
    assert!(matches!(
        setup.to_targets(),
        Err(ExperimentError::InvalidConfiguration(_))
    ));
}

#[test]
fn invalid_json_is_a_json_error() {
    assert!(matches!(
        SetupFile::from_json("{not json"),
        Err(ExperimentError::Json(_))
    ));
}
