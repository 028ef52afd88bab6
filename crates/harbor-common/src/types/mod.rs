mod core;

pub use self::core::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10, 20, 800, 600);
        assert_eq!(r.right(), 810);
        assert_eq!(r.bottom(), 620);
    }

    #[test]
    fn rect_serialization() {
        let r = Rect::new(0, 50, 1920, 1030);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"x":0,"y":50,"width":1920,"height":1030}"#);
        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }

    #[test]
    fn size_default_is_zero() {
        assert_eq!(Size::default(), Size::new(0, 0));
    }

    #[test]
    fn id_display() {
        assert_eq!(ViewId(42).to_string(), "view-42");
        assert_eq!(WindowId(1).to_string(), "window-1");
        assert_eq!(DialogId(7).to_string(), "dialog-7");
    }

    #[test]
    fn view_id_serializes_transparently() {
        let json = serde_json::to_string(&ViewId(9)).unwrap();
        assert_eq!(json, "9");
        let back: ViewId = serde_json::from_str("9").unwrap();
        assert_eq!(back, ViewId(9));
    }

    #[test]
    fn ids_hash_and_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ViewId(1));
        set.insert(ViewId(2));
        set.insert(ViewId(1));
        assert_eq!(set.len(), 2);
    }
}
