//! Per-transition behavior against the layer store

use strata_editor::{
    BrushLine, Dispatcher, DrawableObject, EntityIdentifier, EntityStore, EraserLine, IdGenerator,
    ImageObject, ImageSource, LayerEntity, LayerOverrides, Point, Rect, RectShape, Rgba,
    Transition,
};

fn dispatcher_with_layers(count: usize) -> (Dispatcher, Vec<String>) {
    let mut dispatcher = Dispatcher::with_generator(IdGenerator::from_seed("test"));
    let ids = (0..count).map(|_| dispatcher.add_layer(None)).collect();
    (dispatcher, ids)
}

fn fill_cache(dispatcher: &mut Dispatcher) {
    dispatcher.dispatch(Transition::SetImageCache {
        image: Some(ImageSource::new("composite.png", 256, 256)),
    });
    assert!(!dispatcher.store().is_cache_dirty());
}

fn brush_line(id: &str) -> BrushLine {
    BrushLine {
        id: id.to_string(),
        stroke_width: 4.0,
        points: vec![0.0, 0.0, 5.0, 5.0, 10.0, 0.0],
        color: Rgba::new(255, 0, 0, 1.0),
        clip: None,
    }
}

fn image_object(id: &str) -> ImageObject {
    ImageObject::from_source(id, &ImageSource::new("raster.png", 32, 32))
}

#[test]
fn test_add_on_empty_store() {
    let mut dispatcher = Dispatcher::new();
    let id = dispatcher.add_layer(None);
    let store = dispatcher.store();

    assert_eq!(store.len(), 1);
    let layer = store.expect_layer(&id);
    assert!(layer.is_enabled);
    assert!(layer.objects.is_empty());
    assert_eq!(layer.opacity, 1.0);
    assert_eq!(layer.position, Point::ORIGIN);
    assert_eq!(store.selected(), Some(&EntityIdentifier::layer(id.as_str())));
    assert!(store.is_cache_dirty());
}

#[test]
fn test_add_applies_overrides_and_goes_to_front() {
    let (mut dispatcher, ids) = dispatcher_with_layers(2);
    let overrides = LayerOverrides::default()
        .with_enabled(false)
        .with_opacity(0.4)
        .with_y(30.0);

    let id = dispatcher.add_layer(Some(overrides));
    let store = dispatcher.store();

    assert_eq!(store.layer_ids(), vec![ids[0].as_str(), ids[1].as_str(), id.as_str()]);
    let layer = store.expect_layer(&id);
    assert!(!layer.is_enabled);
    assert_eq!(layer.opacity, 0.4);
    assert_eq!(layer.position, Point::new(0.0, 30.0));
}

#[test]
fn test_add_always_yields_fresh_id() {
    let (mut dispatcher, mut ids) = dispatcher_with_layers(3);
    dispatcher.dispatch(Transition::Delete { id: ids[2].clone() });

    let id = dispatcher.add_layer(None);
    assert!(!ids.contains(&id));

    ids.push(id);
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_recall_appends_verbatim() {
    let (mut dispatcher, _) = dispatcher_with_layers(1);
    fill_cache(&mut dispatcher);

    let mut data = LayerEntity::new("restored");
    data.opacity = 0.3;
    data.position = Point::new(5.0, 6.0);
    data.objects.push(DrawableObject::from(brush_line("brush_1")));

    dispatcher.dispatch(Transition::Recall { data: data.clone() });
    let store = dispatcher.store();

    assert_eq!(store.layers().last(), Some(&data));
    assert_eq!(store.selected(), Some(&EntityIdentifier::layer("restored")));
    assert!(store.is_cache_dirty());
}

#[test]
fn test_translate_and_opacity() {
    let (mut dispatcher, ids) = dispatcher_with_layers(1);
    let id = ids[0].clone();

    fill_cache(&mut dispatcher);
    dispatcher.dispatch(Transition::Translate {
        id: id.clone(),
        position: Point::new(-12.5, 40.0),
    });
    assert_eq!(dispatcher.store().expect_layer(&id).position, Point::new(-12.5, 40.0));
    assert!(dispatcher.store().is_cache_dirty());

    fill_cache(&mut dispatcher);
    dispatcher.dispatch(Transition::SetOpacity {
        id: id.clone(),
        opacity: 0.75,
    });
    assert_eq!(dispatcher.store().expect_layer(&id).opacity, 0.75);
    assert!(dispatcher.store().is_cache_dirty());
}

#[test]
fn test_opacity_is_not_range_checked() {
    let (mut dispatcher, ids) = dispatcher_with_layers(1);
    dispatcher.dispatch(Transition::SetOpacity {
        id: ids[0].clone(),
        opacity: 3.0,
    });
    assert_eq!(dispatcher.store().expect_layer(&ids[0]).opacity, 3.0);
}

#[test]
fn test_reset_restores_defaults_but_keeps_opacity() {
    let (mut dispatcher, ids) = dispatcher_with_layers(1);
    let id = ids[0].clone();

    dispatcher.replay(vec![
        Transition::ToggleEnabled { id: id.clone() },
        Transition::SetOpacity {
            id: id.clone(),
            opacity: 0.2,
        },
        Transition::Translate {
            id: id.clone(),
            position: Point::new(3.0, 3.0),
        },
        Transition::AppendBrushLine {
            id: id.clone(),
            brush_line: brush_line("brush_1"),
        },
    ]);
    fill_cache(&mut dispatcher);

    dispatcher.dispatch(Transition::Reset { id: id.clone() });
    let layer = dispatcher.store().expect_layer(&id);

    assert!(layer.is_enabled);
    assert!(layer.objects.is_empty());
    assert_eq!(layer.position, Point::ORIGIN);
    assert_eq!(layer.opacity, 0.2);
    assert!(dispatcher.store().is_cache_dirty());
}

#[test]
fn test_append_objects_in_paint_order() {
    let (mut dispatcher, ids) = dispatcher_with_layers(1);
    let id = ids[0].clone();

    dispatcher.dispatch(Transition::AppendBrushLine {
        id: id.clone(),
        brush_line: brush_line("brush_1"),
    });
    dispatcher.dispatch(Transition::AppendEraserLine {
        id: id.clone(),
        eraser_line: EraserLine {
            id: "eraser_1".to_string(),
            stroke_width: 10.0,
            points: vec![1.0, 1.0, 2.0, 2.0],
            clip: Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
        },
    });
    dispatcher.dispatch(Transition::AppendRect {
        id: id.clone(),
        rect: RectShape {
            id: "rect_1".to_string(),
            rect: Rect::new(10.0, 10.0, 20.0, 20.0),
            color: Rgba::BLACK,
        },
    });
    let image = dispatcher.prepare_append_image(&id, ImageSource::new("photo.png", 64, 48), None);
    dispatcher.dispatch(image);

    let object_ids: Vec<&str> = dispatcher
        .store()
        .expect_layer(&id)
        .objects
        .iter()
        .map(|object| object.id())
        .collect();
    assert_eq!(object_ids, vec!["brush_1", "eraser_1", "rect_1", "image_test-1"]);
    assert!(dispatcher.store().is_cache_dirty());
}

#[test]
fn test_rasterize_collapses_objects() {
    let (mut dispatcher, ids) = dispatcher_with_layers(1);
    let id = ids[0].clone();

    for n in 0..5 {
        dispatcher.dispatch(Transition::AppendBrushLine {
            id: id.clone(),
            brush_line: brush_line(&format!("brush_{}", n)),
        });
    }
    fill_cache(&mut dispatcher);

    let raster = image_object("image_raster");
    dispatcher.dispatch(Transition::Rasterize {
        id: id.clone(),
        image_object: raster.clone(),
        position: Point::new(8.0, -4.0),
    });

    let layer = dispatcher.store().expect_layer(&id);
    assert_eq!(layer.objects, vec![DrawableObject::Image(raster)]);
    assert_eq!(layer.position, Point::new(8.0, -4.0));
    assert!(dispatcher.store().is_cache_dirty());
}

#[test]
fn test_delete_and_delete_all() {
    let (mut dispatcher, ids) = dispatcher_with_layers(3);

    dispatcher.dispatch(Transition::Delete { id: ids[1].clone() });
    assert_eq!(
        dispatcher.store().layer_ids(),
        vec![ids[0].as_str(), ids[2].as_str()]
    );

    fill_cache(&mut dispatcher);
    dispatcher.dispatch(Transition::DeleteAll);
    assert!(dispatcher.store().is_empty());
    assert!(dispatcher.store().is_cache_dirty());
}

#[test]
fn test_delete_all_on_three_layers_regardless_of_selection() {
    let (mut dispatcher, _) = dispatcher_with_layers(3);
    assert!(dispatcher.store().selected().is_some());

    dispatcher.dispatch(Transition::DeleteAll);
    assert!(dispatcher.store().layers().is_empty());
    assert!(dispatcher.store().image_cache().is_none());
}

#[test]
fn test_set_image_cache_populates_and_clears() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.dispatch(Transition::SetImageCache {
        image: Some(ImageSource::new("composite.png", 800, 600)),
    });

    let cache = dispatcher.store().image_cache().unwrap();
    assert_eq!((cache.width, cache.height), (800, 600));

    dispatcher.dispatch(Transition::SetImageCache { image: None });
    assert!(dispatcher.store().is_cache_dirty());
}

#[test]
fn test_every_targeted_transition_on_missing_id_is_noop() {
    let (mut dispatcher, _) = dispatcher_with_layers(2);
    fill_cache(&mut dispatcher);
    let before: EntityStore = dispatcher.store().clone();
    let ghost = "layer_ghost".to_string();

    let transitions = vec![
        Transition::ToggleEnabled { id: ghost.clone() },
        Transition::Translate {
            id: ghost.clone(),
            position: Point::new(1.0, 1.0),
        },
        Transition::ChangeBbox {
            id: ghost.clone(),
            bbox: None,
        },
        Transition::Reset { id: ghost.clone() },
        Transition::SetOpacity {
            id: ghost.clone(),
            opacity: 0.1,
        },
        Transition::MoveOneForward { id: ghost.clone() },
        Transition::MoveOneBackward { id: ghost.clone() },
        Transition::MoveToFront { id: ghost.clone() },
        Transition::MoveToBack { id: ghost.clone() },
        Transition::AppendBrushLine {
            id: ghost.clone(),
            brush_line: brush_line("brush_1"),
        },
        Transition::AppendEraserLine {
            id: ghost.clone(),
            eraser_line: EraserLine {
                id: "eraser_1".to_string(),
                stroke_width: 2.0,
                points: vec![0.0, 0.0, 1.0, 1.0],
                clip: None,
            },
        },
        Transition::AppendRect {
            id: ghost.clone(),
            rect: RectShape {
                id: "rect_1".to_string(),
                rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                color: Rgba::BLACK,
            },
        },
        Transition::AppendImage {
            id: ghost.clone(),
            object_id: "image_1".to_string(),
            image: ImageSource::new("photo.png", 1, 1),
            position: None,
        },
        Transition::Rasterize {
            id: ghost.clone(),
            image_object: image_object("image_2"),
            position: Point::ORIGIN,
        },
    ];

    for transition in transitions {
        let name = transition.name();
        let result = dispatcher.dispatch(transition);
        assert!(!result.outcome.is_applied(), "{} should be a no-op", name);
        assert_eq!(dispatcher.store(), &before, "{} changed the store", name);
    }
}

#[test]
fn test_transition_log_from_json() {
    let log = r#"[
        { "type": "add", "id": "layer_a" },
        { "type": "add", "id": "layer_b", "overrides": { "opacity": 0.5 } },
        { "type": "moveToBack", "id": "layer_b" },
        { "type": "appendImage", "id": "layer_a", "objectId": "image_1",
          "image": { "imageName": "cat.png", "width": 10, "height": 20 },
          "position": { "x": 1, "y": 2 } },
        { "type": "setImageCache", "image": { "imageName": "c.png", "width": 5, "height": 5 } }
    ]"#;

    let transitions = strata_editor::parse_log(log).unwrap();
    let mut store = EntityStore::new();
    strata_editor::replay(&mut store, &transitions);

    assert_eq!(store.layer_ids(), vec!["layer_b", "layer_a"]);
    assert_eq!(store.expect_layer("layer_b").opacity, 0.5);
    assert_eq!(store.expect_layer("layer_a").objects.len(), 1);
    assert_eq!(store.image_cache().unwrap().image_name, "c.png");
}

#[test]
fn test_read_log_from_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");

    let log = vec![
        Transition::Add {
            id: "layer_1".to_string(),
            overrides: None,
        },
        Transition::ToggleEnabled {
            id: "layer_1".to_string(),
        },
    ];
    std::fs::write(&path, serde_json::to_string_pretty(&log)?)?;

    let loaded = strata_editor::read_log(&path)?;
    assert_eq!(loaded, log);

    let mut dispatcher = Dispatcher::new();
    let summary = dispatcher.replay(loaded);
    assert_eq!(summary.applied, 2);
    assert!(!dispatcher.store().expect_layer("layer_1").is_enabled);
    Ok(())
}
