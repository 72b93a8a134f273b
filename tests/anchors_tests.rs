use docupright::document::{BoundingBox, PageSize, Rotation, TextSpan};
use docupright::orientation::transform::{display_size, to_display};
use docupright::orientation::AnchorExtractor;

fn span(text: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> TextSpan {
    TextSpan::new(text, BoundingBox::new(x0, y0, x1, y1))
}

#[test]
fn test_short_fragments_are_discarded() {
    let page = PageSize::new(100.0, 100.0);
    let spans = vec![
        span("ab", 0.0, 0.0, 10.0, 10.0),
        span("  x  ", 0.0, 0.0, 10.0, 10.0),
        span("   ", 0.0, 0.0, 10.0, 10.0),
        span(" abc ", 10.0, 10.0, 30.0, 20.0),
    ];

    let observation = AnchorExtractor::default().extract(&spans, page, None, 0);

    assert_eq!(observation.len(), 1);
    assert_eq!(observation.anchors()[0].text, "abc");
}

#[test]
fn test_length_counts_characters_not_bytes() {
    let page = PageSize::new(100.0, 100.0);
    // Two CJK characters are six bytes but still noise.
    let spans = vec![
        span("日本", 0.0, 0.0, 10.0, 10.0),
        span("日本語", 0.0, 0.0, 10.0, 10.0),
    ];

    let observation = AnchorExtractor::default().extract(&spans, page, None, 0);

    assert_eq!(observation.len(), 1);
    assert_eq!(observation.anchors()[0].text, "日本語");
}

#[test]
fn test_custom_minimum_length() {
    let page = PageSize::new(100.0, 100.0);
    let spans = vec![span("abc", 0.0, 0.0, 10.0, 10.0)];

    assert!(AnchorExtractor::new(4)
        .extract(&spans, page, None, 0)
        .is_empty());
    assert_eq!(AnchorExtractor::new(1).extract(&spans, page, None, 0).len(), 1);
}

#[test]
fn test_normalized_centroid_upright() {
    let page = PageSize::new(200.0, 400.0);
    let spans = vec![span("Heading", 20.0, 40.0, 60.0, 80.0)];

    let observation = AnchorExtractor::default().extract(&spans, page, None, 0);
    let anchor = &observation.anchors()[0];

    assert!((anchor.normalized_x - 0.2).abs() < 1e-9);
    assert!((anchor.normalized_y - 0.15).abs() < 1e-9);
    assert_eq!(anchor.native_bounds, BoundingBox::new(20.0, 40.0, 60.0, 80.0));
}

#[test]
fn test_normalization_uses_native_space_for_every_rotation() {
    let native = PageSize::new(600.0, 800.0);
    let native_bounds = BoundingBox::new(60.0, 80.0, 180.0, 120.0);

    for rotation in Rotation::ALL {
        let display = display_size(native, rotation);
        let spans = vec![TextSpan::new(
            "Invoice",
            to_display(native_bounds, native, rotation),
        )];

        let observation =
            AnchorExtractor::default().extract(&spans, display, Some(native), rotation.degrees());
        let anchor = &observation.anchors()[0];

        assert!((anchor.normalized_x - 0.2).abs() < 1e-9, "x at {rotation}");
        assert!((anchor.normalized_y - 0.125).abs() < 1e-9, "y at {rotation}");
        assert!(anchor.native_bounds.approx_eq(&native_bounds, 1e-9));
    }
}

#[test]
fn test_native_size_falls_back_to_display() {
    let display = PageSize::new(100.0, 50.0);
    let spans = vec![span("text", 40.0, 20.0, 60.0, 30.0)];

    let observation = AnchorExtractor::default().extract(&spans, display, None, 0);
    let anchor = &observation.anchors()[0];

    assert!((anchor.normalized_x - 0.5).abs() < 1e-9);
    assert!((anchor.normalized_y - 0.5).abs() < 1e-9);
}

#[test]
fn test_normalized_range_for_spans_within_page() {
    let native = PageSize::new(612.0, 792.0);
    let spans: Vec<TextSpan> = (0..20)
        .map(|i| {
            let x = (i as f64) * 30.0;
            let y = (i as f64) * 39.0;
            span("fragment", x, y, x + 12.0, y + 12.0)
        })
        .collect();

    let observation = AnchorExtractor::default().extract(&spans, native, Some(native), 0);

    assert_eq!(observation.len(), 20);
    for anchor in observation.anchors() {
        assert!((0.0..=1.0).contains(&anchor.normalized_x));
        assert!((0.0..=1.0).contains(&anchor.normalized_y));
    }
}

#[test]
fn test_empty_and_degenerate_pages_give_empty_observation() {
    let extractor = AnchorExtractor::default();

    assert!(extractor
        .extract(&[], PageSize::new(100.0, 100.0), None, 0)
        .is_empty());

    let spans = vec![span("text", 0.0, 0.0, 1.0, 1.0)];
    assert!(extractor
        .extract(&spans, PageSize::new(0.0, 100.0), None, 0)
        .is_empty());
}

#[test]
fn test_anchor_order_follows_span_order() {
    let page = PageSize::new(100.0, 100.0);
    let spans = vec![
        span("third", 80.0, 80.0, 90.0, 90.0),
        span("first", 0.0, 0.0, 10.0, 10.0),
        span("second", 40.0, 40.0, 50.0, 50.0),
    ];

    let observation = AnchorExtractor::default().extract(&spans, page, None, 0);
    let texts: Vec<&str> = observation
        .anchors()
        .iter()
        .map(|anchor| anchor.text.as_str())
        .collect();

    assert_eq!(texts, vec!["third", "first", "second"]);
}
