//! Document model: pins, their content variants, groups, and board snapshots.
//!
//! The serde layout mirrors the persisted records: a pin is one flat JSON
//! object whose `type` field selects the content variant, so boards written
//! by earlier builds load unchanged. Tags are normalized on the way in.
//!
//! `Snapshot` is the unit the history stores. Besides its pins it may carry
//! the group that the commit producing it removed from the registry; that
//! marker is runtime-only and never serialized.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::camera::Point;

/// Unique identifier for a pin.
pub type PinId = Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// Reference to an image: a remote URL or an inline `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSource(String);

impl ImageSource {
    /// Wrap a URL (remote or `data:`) as given by the host.
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Encode raw file bytes as an inline base64 `data:` URL.
    #[must_use]
    pub fn inline(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the image bytes live inside the reference itself.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.0.starts_with("data:")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Ordered tag set: trimmed, non-empty, duplicates collapsed, first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Parse comma-separated tag input. Returns `None` when no tag survives.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        Self::normalized(input.split(','))
    }

    /// Build a tag set from individual tags. Returns `None` when no tag survives.
    #[must_use]
    pub fn normalized<I, S>(tags: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() || out.iter().any(|t| t == tag) {
                continue;
            }
            out.push(tag.to_owned());
        }
        if out.is_empty() { None } else { Some(Self(out)) }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::normalized(raw).unwrap_or_default())
    }
}

/// Per-variant content of a pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PinContent {
    /// Free text note.
    Text {
        #[serde(rename = "text", default)]
        body: String,
    },
    /// Image note.
    Image {
        #[serde(rename = "imageSrc")]
        source: ImageSource,
    },
    /// Checklist-style list of items.
    List {
        #[serde(default)]
        items: Vec<String>,
    },
}

impl PinContent {
    /// Short lowercase name of the variant, as persisted in `type`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::List { .. } => "list",
        }
    }
}

/// A note placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    /// Unique identifier, fixed at creation.
    pub id: PinId,
    /// Board-space x of the pin's anchor.
    pub x: f64,
    /// Board-space y of the pin's anchor.
    pub y: f64,
    #[serde(flatten)]
    pub content: PinContent,
    /// Display tags, absent when the pin has none.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_tags")]
    pub tags: Option<Tags>,
    /// Weak reference into the group registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Option<Tags>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = Option::<Tags>::deserialize(deserializer)?;
    Ok(tags.filter(|t| !t.is_empty()))
}

impl Pin {
    /// Create a pin with a fresh id at `position`.
    #[must_use]
    pub fn new(position: Point, content: PinContent, tags: Option<Tags>) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: position.x,
            y: position.y,
            content,
            tags,
            group_id: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }
}

/// A named label pins may reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

/// A group removed from the registry by the commit that produced a snapshot,
/// with the registry position it occupied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetiredGroup {
    pub index: usize,
    pub group: Group,
}

/// The full ordered set of pins at one point in history.
///
/// Serializes as a bare pin array. The retired-group marker travels
/// separately in the history record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pins: Vec<Pin>,
    retired: Option<RetiredGroup>,
}

impl Snapshot {
    #[must_use]
    pub fn new(pins: Vec<Pin>) -> Self {
        Self { pins, retired: None }
    }

    /// Attach the group the producing commit removed from the registry.
    #[must_use]
    pub fn retiring(mut self, retired: RetiredGroup) -> Self {
        self.retired = Some(retired);
        self
    }

    #[must_use]
    pub fn retired(&self) -> Option<&RetiredGroup> {
        self.retired.as_ref()
    }

    #[must_use]
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    #[must_use]
    pub fn pin(&self, id: &PinId) -> Option<&Pin> {
        self.pins.iter().find(|p| p.id == *id)
    }

    pub fn pin_mut(&mut self, id: &PinId) -> Option<&mut Pin> {
        self.pins.iter_mut().find(|p| p.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &PinId) -> bool {
        self.pin(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Copy of these pins with `pin` appended. The retired marker is not carried.
    #[must_use]
    pub fn with_pin(&self, pin: Pin) -> Self {
        let mut pins = self.pins.clone();
        pins.push(pin);
        Self::new(pins)
    }

    /// Copy of these pins without `id`. Returns `None` if no such pin exists.
    #[must_use]
    pub fn without_pin(&self, id: &PinId) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }
        Some(Self::new(self.pins.iter().filter(|p| p.id != *id).cloned().collect()))
    }

    /// Copy of these pins with `edit` applied to pin `id`.
    ///
    /// Returns `None` if the pin does not exist, otherwise whatever `edit` returns.
    pub fn with_edited<E, F>(&self, id: &PinId, edit: F) -> Option<Result<Self, E>>
    where
        F: FnOnce(&mut Pin) -> Result<(), E>,
    {
        let mut next = Self::new(self.pins.clone());
        let pin = next.pin_mut(id)?;
        Some(edit(pin).map(|()| next))
    }

    /// Copy of these pins where every pin referencing `group` has its reference cleared.
    #[must_use]
    pub fn without_group(&self, group: &GroupId) -> Self {
        let pins = self
            .pins
            .iter()
            .cloned()
            .map(|mut p| {
                if p.group_id.as_ref() == Some(group) {
                    p.group_id = None;
                }
                p
            })
            .collect();
        Self::new(pins)
    }

    /// Clear every group reference for which `known` returns false. Returns the number cleared.
    pub fn clear_dangling_groups<F>(&mut self, known: F) -> usize
    where
        F: Fn(&GroupId) -> bool,
    {
        let mut cleared = 0;
        for pin in &mut self.pins {
            if pin.group_id.as_ref().is_some_and(|g| !known(g)) {
                pin.group_id = None;
                cleared += 1;
            }
        }
        cleared
    }
}

impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.pins.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::new(Vec::<Pin>::deserialize(deserializer)?))
    }
}

impl From<Vec<Pin>> for Snapshot {
    fn from(pins: Vec<Pin>) -> Self {
        Self::new(pins)
    }
}
