mod core;
mod direction;
mod geometry;

pub use self::core::*;
pub use direction::*;
pub use geometry::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_clone_and_equality() {
        let r = Rect::new(10.0, 20.0, 800.0, 600.0);
        let r2 = r;
        assert_eq!(r, r2);
    }

    #[test]
    fn rect_serialization() {
        let r = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let json = serde_json::to_string(&r).unwrap();
        let deserialized: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, deserialized);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(99.9, 50.0)));
        assert!(!r.contains(Point::new(100.0, 50.0)));
        assert!(!r.contains(Point::new(-1.0, 50.0)));
    }

    #[test]
    fn grow_to_fit_never_shrinks() {
        let mut s = Size::new(300.0, 200.0);
        s.grow_to_fit(Size::new(100.0, 400.0));
        assert_eq!(s, Size::new(300.0, 400.0));
        s.grow_to_fit(Size::default());
        assert_eq!(s, Size::new(300.0, 400.0));
    }

    #[test]
    fn direction_from_point_quadrants() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0);

        let top_left = r.direction_from_point(Point::new(10.0, 10.0));
        assert!(top_left.contains(Direction::UP));
        assert!(!top_left.contains(Direction::RIGHT));

        let bottom_right = r.direction_from_point(Point::new(190.0, 90.0));
        assert!(!bottom_right.contains(Direction::UP));
        assert!(bottom_right.contains(Direction::RIGHT));
    }

    #[test]
    fn direction_from_point_primary_axis_is_normalised() {
        let r = Rect::new(0.0, 0.0, 400.0, 100.0);
        // 60px right of centre is 0.15 of the width; 30px above is 0.3 of the height.
        let d = r.direction_from_point(Point::new(260.0, 20.0));
        assert!(d.is_vertical());
        assert_eq!(d.to_string(), "up");

        // 150px right is 0.375 of the width; 10px below is 0.1 of the height.
        let d = r.direction_from_point(Point::new(350.0, 60.0));
        assert!(!d.is_vertical());
        assert_eq!(d.to_string(), "right");
    }

    #[test]
    fn direction_parse_and_display() {
        for name in ["up", "down", "left", "right"] {
            let d: Direction = name.parse().unwrap();
            assert_eq!(d.to_string(), name);
        }
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn direction_points_to_start() {
        assert!(Direction::up().points_to_start());
        assert!(Direction::left().points_to_start());
        assert!(!Direction::down().points_to_start());
        assert!(!Direction::right().points_to_start());
    }

    #[test]
    fn direction_transpose_swaps_axes() {
        assert_eq!(Direction::up().transposed().to_string(), "left");
        assert_eq!(Direction::left().transposed().to_string(), "up");
        assert_eq!(Direction::down().transposed().to_string(), "right");
        assert_eq!(Direction::right().transposed().to_string(), "down");
        for d in [
            Direction::up(),
            Direction::down(),
            Direction::left(),
            Direction::right(),
        ] {
            assert_eq!(d.transposed().transposed(), d);
        }
    }

    #[test]
    fn client_id_display() {
        assert_eq!(ClientId(42).to_string(), "client-42");
    }

    #[test]
    fn client_id_hash_and_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ClientId(1));
        set.insert(ClientId(2));
        set.insert(ClientId(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn desktop_key_string_roundtrip() {
        let key = DesktopKey::new(1, "9f2c-activity", "desktop-2");
        let s = key.to_string();
        assert_eq!(s, "1|9f2c-activity|desktop-2");
        let parsed: DesktopKey = s.parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn desktop_key_equality_needs_all_parts() {
        let a = DesktopKey::new(0, "act", "d1");
        assert_ne!(a, DesktopKey::new(1, "act", "d1"));
        assert_ne!(a, DesktopKey::new(0, "other", "d1"));
        assert_ne!(a, DesktopKey::new(0, "act", "d2"));
        assert_eq!(a, DesktopKey::new(0, "act", "d1"));
    }

    #[test]
    fn desktop_key_rejects_malformed() {
        assert!("0|only-two".parse::<DesktopKey>().is_err());
        assert!("x|act|desk".parse::<DesktopKey>().is_err());
    }
}
