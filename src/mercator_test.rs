#[cfg(test)]
mod tests {
    use crate::cluster::{GeoRect, Location, PixelPoint, ViewportProvider, expanded_bounds};
    use crate::mercator::*;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_world_projection() {
        let origin = location_to_world(&Location::new(0.0, 0.0), 0);
        assert_eq!(origin, PixelPoint::new(128.0, 128.0));

        let corner = location_to_world(&Location::new(LATITUDE_MAX, -180.0), 0);
        assert!(close(corner.x, 0.0, 1e-9));
        assert!(close(corner.y, 0.0, 1e-6));

        let berlin = Location::new(52.52, 13.405);
        let back = world_to_location(&location_to_world(&berlin, 12), 12).expect("inside map");
        assert!(close(back.latitude, berlin.latitude, 1e-9));
        assert!(close(back.longitude, berlin.longitude, 1e-9));

        assert_eq!(world_to_location(&PixelPoint::new(10.0, -1.0), 0), None);
        assert_eq!(world_to_location(&PixelPoint::new(10.0, 257.0), 0), None);
    }

    #[test]
    fn test_meters_per_pixel() {
        let equator = MercatorViewport::new(Location::new(0.0, 0.0), 1, 512.0, 512.0);
        assert!(close(equator.meters_per_pixel(), 78_271.516_964, 1e-3));

        let north = MercatorViewport::new(Location::new(60.0, 0.0), 1, 512.0, 512.0);
        assert!(close(north.meters_per_pixel(), 78_271.516_964 / 2.0, 1e-3));
    }

    #[test]
    fn test_pixel_round_trip() {
        let vp = MercatorViewport::new(Location::new(52.52, 13.405), 12, 1024.0, 768.0);
        let center = vp.project_to_pixel(&vp.center()).expect("ready");
        assert!(close(center.x, 512.0, 1e-6));
        assert!(close(center.y, 384.0, 1e-6));

        let corner = vp.project_to_location(&PixelPoint::new(0.0, 0.0)).expect("inside map");
        let bounds = vp.bounds();
        assert!(close(bounds.north, corner.latitude, 1e-9));
        assert!(close(bounds.west, corner.longitude, 1e-9));
        assert!(bounds.contains(&vp.center()));
    }

    #[test]
    fn test_not_ready_without_size() {
        let mut vp = MercatorViewport::new(Location::new(0.0, 0.0), 5, 0.0, 0.0);
        assert!(!vp.is_ready());
        assert_eq!(vp.project_to_pixel(&Location::new(0.0, 0.0)), None);
        assert_eq!(vp.project_to_location(&PixelPoint::new(0.0, 0.0)), None);

        vp.resize(640.0, 480.0);
        assert!(vp.is_ready());
        assert_eq!(vp.size(), (640.0, 480.0));
    }

    #[test]
    fn test_bounds_pinned_at_low_zoom() {
        // The window is taller than the whole map
        let vp = MercatorViewport::new(Location::new(0.0, 0.0), 1, 512.0, 2048.0);
        let bounds = vp.bounds();
        assert!(close(bounds.north, LATITUDE_MAX, 1e-6));
        assert!(close(bounds.south, -LATITUDE_MAX, 1e-6));
    }

    #[test]
    fn test_zoom_clamped() {
        let mut vp = MercatorViewport::new(Location::new(0.0, 0.0), 0, 100.0, 100.0);
        assert_eq!(vp.zoom(), MIN_ZOOM_LEVEL);
        vp.set_view(Location::new(89.0, 0.0), 40);
        assert_eq!(vp.zoom(), MAX_ZOOM_LEVEL);
        assert_eq!(vp.center().latitude, LATITUDE_MAX);
    }

    #[test]
    fn test_subscribers_notified() {
        let mut vp = MercatorViewport::new(Location::new(0.0, 0.0), 5, 100.0, 100.0);
        let first = vp.subscribe();
        let second = vp.subscribe();
        drop(second);

        vp.set_view(Location::new(1.0, 1.0), 6);
        vp.resize(200.0, 200.0);
        let changes: Vec<_> = first.try_iter().collect();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].zoom, 6);
    }

    #[test]
    fn test_expanded_bounds() {
        let vp = MercatorViewport::new(Location::new(0.0, 0.0), 5, 1024.0, 768.0);
        let visible = vp.bounds();
        // 360 degrees over 8192 px at zoom 5
        let degrees_per_px = 360.0 / 8192.0;

        let wide = expanded_bounds(&vp, visible, 60.0, 2.0);
        assert!(close(visible.west - wide.west, 120.0 * degrees_per_px, 1e-9));
        assert!(close(wide.east - visible.east, 120.0 * degrees_per_px, 1e-9));
        assert!(wide.north > visible.north && wide.south < visible.south);

        let half_grid = expanded_bounds(&vp, visible, 60.0, 0.0);
        assert!(close(visible.west - half_grid.west, 30.0 * degrees_per_px, 1e-9));

        // A margin past the poles cannot be projected back
        let whole = GeoRect::from_corners(
            Location::new(LATITUDE_MAX, -10.0),
            Location::new(-LATITUDE_MAX, 10.0),
        );
        assert_eq!(expanded_bounds(&vp, whole, 60.0, 2.0), whole);
    }
}
