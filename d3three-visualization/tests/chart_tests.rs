//! Integration tests for d3three-visualization
//!
//! Charts are rendered into a headless scene seen from the default camera.
//! With an 800x600 viewport the pointer at (400, 300) looks straight at
//! the world origin.

use d3three_core::{DataPoint, Orientation, Value};
use d3three_scale::{AxisScale, LinearScale};
use d3three_visualization::*;

const CENTER: PointerEvent = PointerEvent {
    client_x: 400.0,
    client_y: 300.0,
};

// one pixel right of center: about 1.3 scene units from the origin
const NEAR_CENTER: PointerEvent = PointerEvent {
    client_x: 401.0,
    client_y: 300.0,
};

const CORNER: PointerEvent = PointerEvent {
    client_x: 0.0,
    client_y: 0.0,
};

/// Scene whose axes map [0, 2] onto [0, 100]; centering shifts are 50
fn scene() -> Scene<HeadlessRenderer> {
    let mut scene = Scene::new(HeadlessRenderer::new(), Viewport::new(800.0, 600.0));
    for o in Orientation::ALL {
        let axis = AxisScale::new(o).with_scale(LinearScale::new().with_domain([0.0, 2.0]).with_range([0.0, 100.0]));
        let axis = if o == Orientation::X {
            axis.with_tick_format(|v: &Value| format!("<{v}>"))
        } else {
            axis
        };
        scene.context_mut().register_axis(axis);
    }
    scene
}

/// Flat 3x3 grid, rows along data-y; data (1, 1, 0) lands on the origin
fn grid_data() -> Vec<DataPoint> {
    (0..3)
        .flat_map(|y| (0..3).map(move |x| DataPoint::new(x, y, 0)))
        .collect()
}

fn opacity(scene: &Scene<HeadlessRenderer>, id: ObjectId) -> f64 {
    scene.context().renderer().object(id).unwrap().material.opacity
}

fn visible(scene: &Scene<HeadlessRenderer>, id: ObjectId) -> bool {
    scene.context().renderer().object(id).unwrap().visible
}

#[test]
fn test_scatter_pick_highlights_only_hit_marker() {
    let mut scene = scene();
    let mut chart = ScatterChart::new();
    let data = vec![DataPoint::new(1, 1, 0), DataPoint::new(0, 0, 2)];
    chart.render(scene.context_mut(), &data).unwrap();
    let markers = chart.markers().to_vec();

    let mut tooltip = TooltipState::new();
    let outcome = chart.on_pointer_move(scene.context_mut(), &CENTER, &mut tooltip);

    assert_eq!(outcome, PickOutcome::Hit(markers[0]));
    assert_eq!(chart.hovered(), Some(markers[0]));
    assert_eq!(opacity(&scene, markers[0]), 0.5);
    assert_eq!(opacity(&scene, markers[1]), 1.0);

    let payload = tooltip.current();
    assert!(payload.visible);
    assert_eq!((payload.x, payload.y), (410.0, 310.0));
    assert_eq!(
        payload.html,
        "<div class=\"tooltip_kv\"><span>x: <1></span><br><span>y: 1</span><br><span>z: 0</span><br></div>"
    );
}

#[test]
fn test_scatter_miss_resets_everything() {
    let mut scene = scene();
    let mut chart = ScatterChart::new();
    chart.render(scene.context_mut(), &[DataPoint::new(1, 1, 0)]).unwrap();
    let marker = chart.markers()[0];

    let mut tooltip = TooltipState::new();
    chart.on_pointer_move(scene.context_mut(), &CENTER, &mut tooltip);
    assert_eq!(opacity(&scene, marker), 0.5);

    let outcome = chart.on_pointer_move(scene.context_mut(), &CORNER, &mut tooltip);
    assert_eq!(outcome, PickOutcome::Miss);
    assert_eq!(chart.hovered(), None);
    assert_eq!(opacity(&scene, marker), 1.0);
    assert!(!tooltip.is_visible());
}

#[test]
fn test_surface_markers_start_hidden() {
    let mut scene = scene();
    let mut chart = SurfaceChart::new();
    chart.render(scene.context_mut(), &grid_data()).unwrap();

    assert_eq!(chart.markers().len(), 9);
    assert!(chart.markers().iter().all(|&id| !visible(&scene, id)));

    let surface = scene.context().renderer().object(chart.surface().unwrap()).unwrap();
    match &surface.geometry {
        Geometry::Surface { mesh } => {
            assert_eq!(mesh.vertex_count(), 9);
            assert_eq!(mesh.face_count(), 8);
        }
        other => panic!("expected a surface, got {other:?}"),
    }
    assert_eq!(surface.material.color, Color::STEEL_BLUE);

    let marker = scene.context().renderer().object(chart.markers()[0]).unwrap();
    assert_eq!(marker.material.color, Color::ORANGE);
    assert_eq!(marker.geometry, Geometry::Sphere { radius: 2.0 });
}

#[test]
fn test_surface_pick_reveals_markers_and_highlights() {
    let mut scene = scene();
    let mut chart = SurfaceChart::new();
    chart.render(scene.context_mut(), &grid_data()).unwrap();
    let markers = chart.markers().to_vec();

    let mut tooltip = TooltipState::new();
    let outcome = chart.on_pointer_move(scene.context_mut(), &NEAR_CENTER, &mut tooltip);

    assert_eq!(outcome, PickOutcome::Hit(markers[4]));
    assert!(markers.iter().all(|&id| visible(&scene, id)));
    for (i, &id) in markers.iter().enumerate() {
        let expected = if i == 4 { 0.5 } else { 1.0 };
        assert_eq!(opacity(&scene, id), expected, "marker {i}");
    }
    assert!(tooltip.current().html.contains("<span>x: <1></span>"));
}

#[test]
fn test_surface_miss_hides_every_marker() {
    let mut scene = scene();
    let mut chart = SurfaceChart::new();
    chart.render(scene.context_mut(), &grid_data()).unwrap();
    let markers = chart.markers().to_vec();

    let mut tooltip = TooltipState::new();
    chart.on_pointer_move(scene.context_mut(), &NEAR_CENTER, &mut tooltip);
    assert!(tooltip.is_visible());

    let outcome = chart.on_pointer_move(scene.context_mut(), &CORNER, &mut tooltip);
    assert_eq!(outcome, PickOutcome::SurfaceMiss);
    assert!(markers.iter().all(|&id| !visible(&scene, id)));
    assert!(!tooltip.is_visible());
    assert_eq!(chart.hovered(), None);
}

#[test]
fn test_rerender_replaces_geometry() {
    let mut scene = scene();
    let mut chart = SurfaceChart::new();
    chart.render(scene.context_mut(), &grid_data()).unwrap();
    let first_surface = chart.surface().unwrap();

    let smaller: Vec<DataPoint> = grid_data().into_iter().take(4).collect();
    chart.render(scene.context_mut(), &smaller).unwrap();

    let renderer = scene.context().renderer();
    assert!(renderer.object(first_surface).is_none());
    assert_eq!(chart.markers().len(), 4);
    // 4 markers and one surface
    assert_eq!(renderer.object_count(), 5);
}

#[test]
fn test_rerender_after_marker_released_leaves_no_orphans() {
    let mut scene = scene();
    let mut chart = ScatterChart::new();
    let data = vec![DataPoint::new(0, 0, 0), DataPoint::new(1, 1, 1), DataPoint::new(2, 2, 2)];
    chart.render(scene.context_mut(), &data).unwrap();
    let markers = chart.markers().to_vec();
    scene.context_mut().renderer_mut().remove_from_scene(markers[2]).unwrap();

    chart.render(scene.context_mut(), &data[..1]).unwrap();

    assert_eq!(chart.markers(), &markers[..1]);
    let renderer = scene.context().renderer();
    assert_eq!(renderer.object_count(), 1);
    assert_eq!(renderer.scene_objects().count(), 1);
}

#[test]
fn test_configure_applies_on_next_render() {
    let mut scene = scene();
    let mut chart = ScatterChart::new();
    chart.configure(ChartConfigUpdate {
        color: Some(Color(0x123456)),
        ..Default::default()
    });
    chart.render(scene.context_mut(), &[DataPoint::new(1, 1, 1)]).unwrap();

    assert_eq!(chart.config().point_radius, 5.0);
    let marker = scene.context().renderer().object(chart.markers()[0]).unwrap();
    assert_eq!(marker.material.color, Color(0x123456));
    assert_eq!(marker.geometry, Geometry::Sphere { radius: 5.0 });
}

#[test]
fn test_unmappable_data_is_skipped() {
    let mut scene = scene();
    let mut chart = ScatterChart::new();
    let data = vec![DataPoint::new(1, 1, 1), DataPoint::new("n/a", 1, 1)];
    chart.render(scene.context_mut(), &data).unwrap();
    assert_eq!(chart.markers().len(), 1);
}

#[test]
fn test_missing_value_markers_never_win_a_pick() {
    let mut scene = scene();
    let mut chart = ScatterChart::new();
    let data = vec![DataPoint::new("NaN", 1, 1), DataPoint::new(1, 1, 0)];
    chart.render(scene.context_mut(), &data).unwrap();
    assert_eq!(chart.markers().len(), 1);

    let mut tooltip = TooltipState::new();
    let outcome = chart.on_pointer_move(scene.context_mut(), &CORNER, &mut tooltip);
    assert_eq!(outcome, PickOutcome::Miss);
    assert!(!tooltip.is_visible());
}

#[test]
fn test_symmetric_points_about_origin() {
    let mut scene = Scene::new(HeadlessRenderer::new(), Viewport::default());
    for o in Orientation::ALL {
        scene.context_mut().register_axis(AxisScale::new(o));
    }
    let mut chart = ScatterChart::new();
    chart
        .render(scene.context_mut(), &[DataPoint::new(0, 0, 0), DataPoint::new(1, 1, 1)])
        .unwrap();

    let renderer = scene.context().renderer();
    let a = renderer.object(chart.markers()[0]).unwrap().position;
    let b = renderer.object(chart.markers()[1]).unwrap().position;
    assert_eq!(a.x, -b.x);
    assert_eq!(a.z, -b.z);
}

#[test]
fn test_scene_dispatches_pointer_to_all_charts() {
    let mut scene = scene();
    let scatter = scene.add_chart(ScatterChart::new());
    let surface = scene.add_chart(SurfaceChart::new());
    scene.render_chart(scatter, &[DataPoint::new(1, 1, 0)]).unwrap();
    scene.render_chart(surface, &grid_data()).unwrap();
    scene.context_mut().render_axes().unwrap();

    let mut tooltip = TooltipState::new();
    let outcomes = scene.pointer_move(&CORNER, &mut tooltip);
    assert_eq!(outcomes, vec![PickOutcome::Miss, PickOutcome::SurfaceMiss]);
    assert_eq!(tooltip.update_count(), 2);

    let mut manager = SceneManager::new();
    let id = manager.add_scene(scene);
    manager.tick().unwrap();
    assert_eq!(manager.scene(id).unwrap().context().renderer().frame_count(), 1);
}

#[test]
fn test_missing_axis_fails_render() {
    let mut scene = Scene::new(HeadlessRenderer::new(), Viewport::default());
    scene.context_mut().register_axis(AxisScale::new(Orientation::X));
    let mut chart = ScatterChart::new();
    assert!(chart.render(scene.context_mut(), &[DataPoint::new(0, 0, 0)]).is_err());
}
