use tracefinity_core::model::{Cutout, CutoutPreset, CutoutShape, Outline, Point};
use tracefinity_designer::{
    editor_bounds, Key, Modifiers, PointerButton, Selection, ToolEditor, ToolMode, ToolTarget,
};

fn square_with_hole() -> Outline {
    let mut outline = Outline::new(vec![
        Point::new(0.0, 0.0),
        Point::new(40.0, 0.0),
        Point::new(40.0, 40.0),
        Point::new(0.0, 40.0),
    ]);
    let mut hole = CutoutPreset::CIRCLE.instantiate(Point::new(20.0, 20.0));
    hole.id = "c1".into();
    outline.cutouts.push(hole);
    outline
}

fn at(ed: &ToolEditor, x: f64, y: f64) -> Point {
    ed.viewport().model_to_client(Point::new(x, y))
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
}

fn cutout<'a>(ed: &'a ToolEditor, id: &str) -> &'a Cutout {
    ed.outline()
        .cutouts
        .iter()
        .find(|c| c.id == id)
        .expect("cutout present")
}

#[test]
fn test_vertex_drag_snaps_vertex() {
    let mut ed = ToolEditor::new(square_with_hole());
    let down = at(&ed, 40.0, 0.0);
    assert!(ed.pointer_down(&ToolTarget::Vertex(1), down, PointerButton::Primary));
    assert_eq!(ed.selection(), Some(&Selection::Vertex(1)));

    let to = at(&ed, 43.0, -1.0);
    ed.pointer_move(to);
    assert_eq!(ed.outline().points[1], Point::new(45.0, 0.0));
    assert_eq!(ed.committed().points[1], Point::new(40.0, 0.0));

    assert!(ed.pointer_up());
    assert_eq!(ed.committed().points[1], Point::new(45.0, 0.0));
    assert_eq!(ed.revision(), 1);
}

#[test]
fn test_delete_vertex_mode_stops_at_three() {
    let mut ed = ToolEditor::new(square_with_hole());
    ed.set_mode(ToolMode::DeleteVertex);
    let p = at(&ed, 0.0, 0.0);
    assert!(!ed.pointer_down(&ToolTarget::Vertex(0), p, PointerButton::Primary));
    assert_eq!(ed.outline().points.len(), 3);
    assert_eq!(ed.outline().points[0], Point::new(40.0, 0.0));

    let p = at(&ed, 40.0, 0.0);
    ed.pointer_down(&ToolTarget::Vertex(0), p, PointerButton::Primary);
    assert_eq!(ed.outline().points.len(), 3);
    assert_eq!(ed.revision(), 1);
}

#[test]
fn test_add_vertex_on_edge_click() {
    let mut ed = ToolEditor::new(square_with_hole());
    ed.set_mode(ToolMode::AddVertex);
    let p = at(&ed, 21.0, 0.0);
    ed.click(&ToolTarget::Edge(0), p);
    let points = &ed.outline().points;
    assert_eq!(points.len(), 5);
    // inserted raw, not snapped
    assert!(close(points[1], Point::new(21.0, 0.0)));
    assert_eq!(points[2], Point::new(40.0, 0.0));
}

#[test]
fn test_insert_before_selected_vertex_keeps_selection_on_it() {
    let mut ed = ToolEditor::new(square_with_hole());
    let p = at(&ed, 40.0, 40.0);
    ed.pointer_down(&ToolTarget::Vertex(2), p, PointerButton::Primary);
    assert!(!ed.pointer_up());
    assert_eq!(ed.selection(), Some(&Selection::Vertex(2)));

    ed.set_mode(ToolMode::AddVertex);
    let p = at(&ed, 20.0, 0.0);
    ed.click(&ToolTarget::Edge(0), p);
    assert_eq!(ed.selection(), Some(&Selection::Vertex(3)));
    assert_eq!(ed.outline().points[3], Point::new(40.0, 40.0));

    ed.set_mode(ToolMode::Select);
    assert!(ed.delete_selected());
    let points = &ed.outline().points;
    assert_eq!(points.len(), 4);
    assert!(!points.contains(&Point::new(40.0, 40.0)));
    assert!(points.contains(&Point::new(40.0, 0.0)));
}

#[test]
fn test_edge_click_outside_add_mode_does_nothing() {
    let mut ed = ToolEditor::new(square_with_hole());
    let p = at(&ed, 20.0, 0.0);
    ed.click(&ToolTarget::Edge(0), p);
    assert_eq!(ed.outline().points.len(), 4);
}

#[test]
fn test_preset_mode_places_snapped_cutout_on_background() {
    let mut ed = ToolEditor::new(square_with_hole());
    ed.set_mode(ToolMode::Rectangle);
    let p = at(&ed, 11.0, 32.0);
    ed.click(&ToolTarget::Background, p);

    let placed = &ed.outline().cutouts[1];
    assert_eq!(placed.center(), Point::new(10.0, 30.0));
    assert_eq!(placed.shape, CutoutShape::Rectangle);
    assert_eq!(placed.width, Some(30.0));
    assert_eq!(placed.height, Some(20.0));
    assert!(placed.id.starts_with("fh-"));
}

#[test]
fn test_preset_mode_on_existing_cutout_places_unsnapped() {
    let mut ed = ToolEditor::new(square_with_hole());
    ed.set_mode(ToolMode::FingerHole);
    let p = at(&ed, 21.0, 22.0);
    assert!(!ed.pointer_down(&ToolTarget::Cutout("c1".into()), p, PointerButton::Primary));
    let cutouts = &ed.outline().cutouts;
    assert_eq!(cutouts.len(), 2);
    assert_eq!(cutouts[1].radius, 15.0);
    assert!(close(cutouts[1].center(), Point::new(21.0, 22.0)));
    assert_eq!(cutouts[0].center(), Point::new(20.0, 20.0));
}

#[test]
fn test_move_resize_rotate_cutout() {
    let mut ed = ToolEditor::new(square_with_hole());

    let p = at(&ed, 20.0, 20.0);
    ed.pointer_down(&ToolTarget::Cutout("c1".into()), p, PointerButton::Primary);
    let p = at(&ed, 27.0, 19.0);
    ed.pointer_move(p);
    assert!(ed.pointer_up());
    assert_eq!(cutout(&ed, "c1").center(), Point::new(25.0, 20.0));
    assert_eq!(ed.selection(), Some(&Selection::Cutout("c1".into())));

    let p = at(&ed, 35.0, 20.0);
    ed.pointer_down(&ToolTarget::CutoutResizeHandle("c1".into()), p, PointerButton::Primary);
    let p = at(&ed, 26.0, 20.0);
    ed.pointer_move(p);
    assert!(ed.pointer_up());
    assert_eq!(cutout(&ed, "c1").radius, 5.0);

    let p = at(&ed, 30.0, 20.0);
    ed.pointer_down(&ToolTarget::CutoutRotateHandle("c1".into()), p, PointerButton::Primary);
    let p = at(&ed, 25.0, 25.0);
    ed.pointer_move(p);
    assert!(ed.pointer_up());
    assert!((cutout(&ed, "c1").rotation - 90.0).abs() < 1e-6);
    assert_eq!(cutout(&ed, "c1").id, "c1");
}

#[test]
fn test_outline_rotation_spins_cutouts() {
    let mut ed = ToolEditor::new(square_with_hole());
    let p = at(&ed, 30.0, 20.0);
    assert!(ed.pointer_down(&ToolTarget::OutlineRotateHandle, p, PointerButton::Primary));
    let p = at(&ed, 20.0, 30.0);
    ed.pointer_move(p);
    assert!(ed.pointer_up());

    let outline = ed.committed();
    assert!(close(outline.points[0], Point::new(40.0, 0.0)));
    assert!((outline.cutouts[0].rotation - 90.0).abs() < 1e-6);
    assert!(close(outline.cutouts[0].center(), Point::new(20.0, 20.0)));
}

#[test]
fn test_rotate_all_and_undo() {
    let mut ed = ToolEditor::new(square_with_hole());
    assert!(ed.rotate_all(-90.0));
    assert!(close(ed.outline().points[0], Point::new(0.0, 40.0)));
    assert_eq!(ed.outline().cutouts[0].rotation, -90.0);

    let undo = Modifiers {
        meta: true,
        ..Modifiers::default()
    };
    assert!(ed.key_down(&Key::Character('z'), undo));
    assert_eq!(ed.outline(), &square_with_hole());
}

#[test]
fn test_delete_selected_cutout() {
    let mut ed = ToolEditor::new(square_with_hole());
    assert!(!ed.delete_selected());
    ed.select(Some(Selection::Cutout("c1".into())));
    assert!(ed.key_down(&Key::Backspace, Modifiers::default()));
    assert!(ed.outline().cutouts.is_empty());
    assert!(ed.selection().is_none());
}

#[test]
fn test_background_double_click_resets_view() {
    let mut ed = ToolEditor::new(square_with_hole());
    let p = at(&ed, 10.0, 10.0);
    ed.wheel(p, -1.0);
    ed.wheel(p, -1.0);
    assert!(ed.viewport().zoom() > 1.0);
    ed.double_click(&ToolTarget::Background);
    assert_eq!(ed.viewport().zoom(), 1.0);
    assert_eq!(ed.viewport().pan(), Point::ORIGIN);
}

#[test]
fn test_pan_click_does_not_place_cutout() {
    let mut ed = ToolEditor::new(square_with_hole());
    ed.set_mode(ToolMode::Circle);
    let start = at(&ed, 10.0, 10.0);
    assert!(ed.pointer_down(&ToolTarget::Background, start, PointerButton::Middle));
    ed.pointer_move(Point::new(start.x + 30.0, start.y));
    ed.pointer_up();
    ed.click(&ToolTarget::Background, Point::new(start.x + 30.0, start.y));
    assert_eq!(ed.outline().cutouts.len(), 1);
}

#[test]
fn test_view_refits_to_cutout_reach() {
    let mut outline = square_with_hole();
    let mut wide = CutoutPreset::RECTANGLE.instantiate(Point::new(100.0, 20.0));
    wide.width = Some(60.0);
    wide.height = Some(10.0);
    outline.cutouts.push(wide);

    let bounds = editor_bounds(&outline).expect("bounds");
    assert_eq!(bounds.max_x, 130.0);
    assert_eq!(bounds.min_y, -10.0);
    assert_eq!(bounds.max_y, 50.0);

    let mut ed = ToolEditor::new(square_with_hole());
    let before = ed.viewport().base_view_box();
    ed.load(outline);
    let after = ed.viewport().base_view_box();
    assert!(after.width > before.width);
    assert_eq!(after.width, (130.0 + 40.0) * 8.0);
}

#[test]
fn test_cutout_presets_per_mode() {
    assert_eq!(ToolMode::Select.cutout_preset(), None);
    assert_eq!(ToolMode::AddVertex.cutout_preset(), None);
    assert_eq!(ToolMode::FingerHole.cutout_preset(), Some(CutoutPreset::FINGER_HOLE));
    assert_eq!(ToolMode::Square.cutout_preset().map(|p| p.radius), Some(10.0));
}
