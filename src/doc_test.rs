#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn text_pin(body: &str, x: f64, y: f64) -> Pin {
    Pin::new(Point::new(x, y), PinContent::Text { body: body.to_owned() }, None)
}

// =============================================================
// Tags
// =============================================================

#[test]
fn tags_parse_trims_and_drops_empties() {
    let tags = Tags::parse(" work ,  , urgent,").unwrap();
    assert_eq!(tags.as_slice(), ["work", "urgent"]);
}

#[test]
fn tags_parse_collapses_duplicates_keeping_first_order() {
    let tags = Tags::parse("b, a, b, c, a").unwrap();
    assert_eq!(tags.as_slice(), ["b", "a", "c"]);
}

#[test]
fn tags_parse_blank_is_none() {
    assert!(Tags::parse("").is_none());
    assert!(Tags::parse(" , ,").is_none());
}

#[test]
fn tags_deserialize_normalizes() {
    let tags: Tags = serde_json::from_value(json!(["x", " x ", "", "y"])).unwrap();
    assert_eq!(tags.as_slice(), ["x", "y"]);
}

// =============================================================
// ImageSource
// =============================================================

#[test]
fn image_source_inline_builds_data_url() {
    let src = ImageSource::inline("image/png", b"hi");
    assert_eq!(src.as_str(), "data:image/png;base64,aGk=");
    assert!(src.is_inline());
}

#[test]
fn image_source_url_is_not_inline() {
    let src = ImageSource::url("https://example.com/cat.png");
    assert!(!src.is_inline());
    assert!(!src.is_empty());
    assert!(ImageSource::url("  ").is_empty());
}

// =============================================================
// Pin serde layout
// =============================================================

#[test]
fn text_pin_serializes_flat() {
    let mut pin = text_pin("Hello", 1.5, -2.0);
    pin.tags = Tags::parse("a");
    let value = serde_json::to_value(&pin).unwrap();
    assert_eq!(value["type"], "text");
    assert_eq!(value["text"], "Hello");
    assert_eq!(value["x"], 1.5);
    assert_eq!(value["tags"], json!(["a"]));
    assert!(value.get("groupId").is_none());
}

#[test]
fn image_pin_uses_image_src_key() {
    let pin = Pin::new(Point::default(), PinContent::Image { source: ImageSource::url("u") }, None);
    let value = serde_json::to_value(&pin).unwrap();
    assert_eq!(value["type"], "image");
    assert_eq!(value["imageSrc"], "u");
}

#[test]
fn legacy_list_record_deserializes() {
    let id = Uuid::new_v4();
    let group = Uuid::new_v4();
    let pin: Pin = serde_json::from_value(json!({
        "id": id,
        "x": 10,
        "y": 20.5,
        "type": "list",
        "items": ["milk", "eggs"],
        "tags": [],
        "groupId": group,
    }))
    .unwrap();
    assert_eq!(pin.id, id);
    assert_eq!(pin.position(), Point::new(10.0, 20.5));
    assert_eq!(pin.content, PinContent::List { items: vec!["milk".into(), "eggs".into()] });
    assert!(pin.tags.is_none());
    assert_eq!(pin.group_id, Some(group));
}

#[test]
fn unknown_pin_type_is_rejected() {
    let result: Result<Pin, _> = serde_json::from_value(json!({
        "id": Uuid::new_v4(),
        "x": 0,
        "y": 0,
        "type": "video",
    }));
    assert!(result.is_err());
}

#[test]
fn content_kind_names() {
    assert_eq!(PinContent::Text { body: String::new() }.kind(), "text");
    assert_eq!(PinContent::List { items: vec![] }.kind(), "list");
}

// =============================================================
// Snapshot
// =============================================================

#[test]
fn snapshot_serializes_as_bare_array() {
    let snap = Snapshot::new(vec![text_pin("a", 0.0, 0.0)]);
    let value = serde_json::to_value(&snap).unwrap();
    assert!(value.is_array());
    assert_eq!(value.as_array().unwrap().len(), 1);
}

#[test]
fn snapshot_with_pin_appends_and_drops_retired_marker() {
    let group = Group { id: Uuid::new_v4(), name: "g".into() };
    let snap = Snapshot::default().retiring(RetiredGroup { index: 0, group });
    let next = snap.with_pin(text_pin("a", 0.0, 0.0));
    assert_eq!(next.len(), 1);
    assert!(next.retired().is_none());
}

#[test]
fn snapshot_without_pin_missing_is_none() {
    let snap = Snapshot::new(vec![text_pin("a", 0.0, 0.0)]);
    assert!(snap.without_pin(&Uuid::new_v4()).is_none());
}

#[test]
fn snapshot_without_pin_removes_only_that_pin() {
    let a = text_pin("a", 0.0, 0.0);
    let b = text_pin("b", 0.0, 0.0);
    let snap = Snapshot::new(vec![a.clone(), b.clone()]);
    let next = snap.without_pin(&a.id).unwrap();
    assert_eq!(next.pins(), [b]);
    assert_eq!(snap.len(), 2);
}

#[test]
fn snapshot_with_edited_leaves_original_untouched() {
    let a = text_pin("a", 0.0, 0.0);
    let snap = Snapshot::new(vec![a.clone()]);
    let next = snap
        .with_edited(&a.id, |p| {
            p.x = 9.0;
            Ok::<(), ()>(())
        })
        .unwrap()
        .unwrap();
    assert_eq!(next.pin(&a.id).unwrap().x, 9.0);
    assert_eq!(snap.pin(&a.id).unwrap().x, 0.0);
}

#[test]
fn snapshot_without_group_clears_matching_refs_only() {
    let g1 = Uuid::new_v4();
    let g2 = Uuid::new_v4();
    let mut a = text_pin("a", 0.0, 0.0);
    a.group_id = Some(g1);
    let mut b = text_pin("b", 0.0, 0.0);
    b.group_id = Some(g2);
    let next = Snapshot::new(vec![a.clone(), b.clone()]).without_group(&g1);
    assert_eq!(next.pin(&a.id).unwrap().group_id, None);
    assert_eq!(next.pin(&b.id).unwrap().group_id, Some(g2));
}

#[test]
fn clear_dangling_groups_counts_cleared() {
    let known = Uuid::new_v4();
    let mut a = text_pin("a", 0.0, 0.0);
    a.group_id = Some(known);
    let mut b = text_pin("b", 0.0, 0.0);
    b.group_id = Some(Uuid::new_v4());
    let mut snap = Snapshot::new(vec![a, b]);
    assert_eq!(snap.clear_dangling_groups(|g| *g == known), 1);
    assert_eq!(snap.clear_dangling_groups(|g| *g == known), 0);
}
