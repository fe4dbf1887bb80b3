use tracefinity_core::model::{BinConfig, Point};
use tracefinity_designer::viewport::{bin_view_box, ClientRect, ViewBox, Viewport};

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn test_bin_view_box_has_handle_margin() {
    let vb = bin_view_box(&BinConfig::default());
    assert_eq!(vb, ViewBox::new(-10.0, -10.0, 406.0, 366.0));
}

#[test]
fn test_bin_origin_maps_past_margin() {
    let vp = Viewport::for_bin(&BinConfig::default());
    assert!(close(vp.client_to_model(Point::new(10.0, 10.0)), Point::ORIGIN));
    assert!(close(vp.model_to_client(Point::new(84.0, 84.0)), Point::new(346.0, 346.0)));
}

#[test]
fn test_cover_scale_centres_overflow() {
    let mut vp = Viewport::new(ViewBox::new(0.0, 0.0, 100.0, 50.0), 1.0);
    vp.set_client_rect(ClientRect::new(10.0, 20.0, 200.0, 200.0));
    assert_eq!(vp.units_per_pixel(), 0.5);
    // rect centre is the view box centre
    assert!(close(vp.client_to_model(Point::new(110.0, 120.0)), Point::new(50.0, 25.0)));
    assert!(close(vp.client_to_model(Point::new(10.0, 120.0)), Point::new(0.0, 25.0)));
}

#[test]
fn test_zoom_shrinks_around_centre() {
    let mut vp = Viewport::new(ViewBox::new(0.0, 0.0, 100.0, 50.0), 1.0);
    vp.set_client_rect(ClientRect::new(10.0, 20.0, 200.0, 200.0));
    vp.set_zoom(2.0);
    assert_eq!(vp.view_box(), ViewBox::new(25.0, 12.5, 50.0, 25.0));
    assert!(close(vp.client_to_model(Point::new(110.0, 120.0)), Point::new(50.0, 25.0)));
}

#[test]
fn test_zoom_clamps() {
    let mut vp = Viewport::default();
    vp.set_zoom(100.0);
    assert_eq!(vp.zoom(), 20.0);
    assert!(!vp.zoom_at(Point::new(50.0, 50.0), -1.0));
    vp.set_zoom(0.1);
    assert_eq!(vp.zoom(), 0.5);
    assert!(!vp.zoom_at(Point::new(50.0, 50.0), 1.0));
}

#[test]
fn test_pan_is_in_display_units() {
    let mut vp = Viewport::for_bin(&BinConfig::default());
    let before = vp.client_to_model(Point::new(100.0, 100.0));
    vp.set_pan(Point::new(40.0, -20.0));
    let after = vp.client_to_model(Point::new(100.0, 100.0));
    assert!(close(after - before, Point::new(10.0, -5.0)));
}

#[test]
fn test_round_trip_with_zoom_and_pan() {
    let mut vp = Viewport::for_bin(&BinConfig::default());
    vp.set_client_rect(ClientRect::new(37.0, 12.0, 800.0, 500.0));
    vp.zoom_at(Point::new(300.0, 200.0), -1.0);
    vp.zoom_at(Point::new(300.0, 200.0), -1.0);
    vp.set_pan(vp.pan() + Point::new(13.0, -7.0));
    let model = Point::new(17.5, 61.25);
    let back = vp.client_to_model(vp.model_to_client(model));
    assert!(close(back, model));
}

#[test]
fn test_reset() {
    let mut vp = Viewport::default();
    vp.zoom_at(Point::new(100.0, 100.0), -1.0);
    vp.reset();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan(), Point::ORIGIN);
}
