use std::path::Path;

use docupright::document::{
    BoundingBox, DocumentError, DocumentStore, MemoryDocument, MemoryPage, MemoryStore,
    PageDocument, PageSize, Rotation,
};

#[test]
fn test_rotation_from_degrees() {
    assert_eq!(Rotation::from_degrees(0), Some(Rotation::Rotated0));
    assert_eq!(Rotation::from_degrees(90), Some(Rotation::Rotated90));
    assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Rotated270));
    assert_eq!(Rotation::from_degrees(540), Some(Rotation::Rotated180));
    assert_eq!(Rotation::from_degrees(45), None);
    assert_eq!(Rotation::Rotated270.degrees(), 270);
    assert!(Rotation::Rotated90.is_quarter_turn());
    assert!(!Rotation::Rotated180.is_quarter_turn());
    assert_eq!(Rotation::Rotated90.to_string(), "90°");
}

#[test]
fn test_bounding_box_geometry() {
    let bounds = BoundingBox::new(10.0, 20.0, 50.0, 40.0);

    assert_eq!(bounds.width(), 40.0);
    assert_eq!(bounds.height(), 20.0);
    let center = bounds.centroid();
    assert_eq!((center.x, center.y), (30.0, 30.0));
    assert!(bounds.is_within(PageSize::new(50.0, 40.0)));
    assert!(!bounds.is_within(PageSize::new(49.0, 40.0)));
}

#[test]
fn test_bounding_box_serializes_as_array() {
    let bounds = BoundingBox::new(72.0, 90.5, 210.0, 102.5);

    let json = serde_json::to_string(&bounds).unwrap();
    assert_eq!(json, "[72.0,90.5,210.0,102.5]");

    let parsed: BoundingBox = serde_json::from_str("[1, 2, 3, 4]").unwrap();
    assert_eq!(parsed, BoundingBox::new(1.0, 2.0, 3.0, 4.0));

    let error = serde_json::from_str::<BoundingBox>("[1, 2, 3]").unwrap_err();
    assert!(error.to_string().contains("Expected 4 coordinates, got 3"));
}

#[test]
fn test_page_size_transposed() {
    let size = PageSize::new(595.0, 842.0);

    assert_eq!(size.transposed(), PageSize::new(842.0, 595.0));
    assert!(size.is_valid());
    assert!(!PageSize::new(0.0, 842.0).is_valid());
    assert!(!PageSize::new(f64::NAN, 842.0).is_valid());
}

#[test]
fn test_memory_document_from_json() {
    let json = r#"{
        "pages": [
            {
                "size": { "width": 595.0, "height": 842.0 },
                "rotation": 90,
                "spans": [{ "text": "Quarterly report", "bounds": [60.0, 70.0, 260.0, 90.0] }]
            },
            {
                "size": { "width": 595.0, "height": 842.0 },
                "spans": null,
                "locked": true
            }
        ]
    }"#;

    let document = MemoryDocument::from_json(json).unwrap();

    assert_eq!(document.pages.len(), 2);
    assert!(!document.read_only);
    assert_eq!(document.pages[0].rotation, 90);
    assert_eq!(document.pages[0].spans.as_ref().unwrap()[0].text, "Quarterly report");
    assert_eq!(document.pages[1].rotation, 0);
    assert!(document.pages[1].spans.is_none());
    assert!(document.pages[1].locked);
}

#[test]
fn test_memory_store_open_missing_document() {
    let store = MemoryStore::new();

    let result = store.open(Path::new("absent.pdf"));

    assert!(matches!(
        result,
        Err(DocumentError::DocumentNotFound { .. })
    ));
}

#[test]
fn test_memory_spans_are_reported_in_display_space() {
    let store = MemoryStore::new();
    let native = BoundingBox::new(60.0, 80.0, 180.0, 120.0);
    store.insert(
        "page.pdf",
        MemoryDocument::new(vec![MemoryPage::new(600.0, 800.0)
            .with_rotation(90)
            .with_span("Invoice", native)]),
    );

    let document = store.open(Path::new("page.pdf")).unwrap();

    assert_eq!(document.page_count(), 1);
    assert_eq!(document.page_rotation(0).unwrap(), 90);
    assert_eq!(document.display_size(0).unwrap(), PageSize::new(800.0, 600.0));
    assert_eq!(
        document.native_size(0).unwrap(),
        Some(PageSize::new(600.0, 800.0))
    );

    let spans = document.text_spans(0).unwrap();
    // 90°: (Hn - y1, x0, Hn - y0, x1)
    assert!(spans[0]
        .bounds
        .approx_eq(&BoundingBox::new(680.0, 60.0, 720.0, 180.0), 1e-9));
}

#[test]
fn test_memory_page_errors() {
    let store = MemoryStore::new();
    store.insert(
        "broken.pdf",
        MemoryDocument::new(vec![
            MemoryPage::new(100.0, 100.0).without_text_layer(),
            MemoryPage::new(100.0, 100.0).locked(),
        ]),
    );
    let mut document = store.open(Path::new("broken.pdf")).unwrap();

    assert!(matches!(
        document.text_spans(0),
        Err(DocumentError::TextLayerUnavailable { page: 0 })
    ));
    assert!(matches!(
        document.set_page_rotation(1, Rotation::Rotated90),
        Err(DocumentError::RotationLocked { page: 1 })
    ));
    assert!(matches!(
        document.page_rotation(2),
        Err(DocumentError::PageOutOfRange {
            page: 2,
            page_count: 2
        })
    ));
}

#[test]
fn test_memory_save_keeps_input_unchanged() {
    let store = MemoryStore::new();
    store.insert(
        "input.pdf",
        MemoryDocument::new(vec![MemoryPage::new(100.0, 100.0)]),
    );

    let mut document = store.open(Path::new("input.pdf")).unwrap();
    document.set_page_rotation(0, Rotation::Rotated180).unwrap();
    document.save(Path::new("output.pdf")).unwrap();

    assert_eq!(store.saved("output.pdf").unwrap().pages[0].rotation, 180);
    assert_eq!(store.saved_count(), 1);

    let reopened = store.open(Path::new("input.pdf")).unwrap();
    assert_eq!(reopened.page_rotation(0).unwrap(), 0);
}

#[test]
fn test_read_only_document_cannot_be_saved() {
    let store = MemoryStore::new();
    let mut read_only = MemoryDocument::new(vec![MemoryPage::new(100.0, 100.0)]);
    read_only.read_only = true;
    store.insert("input.pdf", read_only);

    let mut document = store.open(Path::new("input.pdf")).unwrap();

    assert!(matches!(
        document.save(Path::new("output.pdf")),
        Err(DocumentError::ReadOnly { .. })
    ));
    assert_eq!(store.saved_count(), 0);
}
