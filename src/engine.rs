use tracing::debug;

use crate::camera::{Point, Size, Viewport};
use crate::config::BoardConfig;
use crate::consts::DEFAULT_TEXT_BODY;
use crate::doc::{Group, GroupId, ImageSource, Pin, PinContent, PinId, Snapshot, Tags};
use crate::error::EditError;
use crate::groups::GroupRegistry;
use crate::history::History;
use crate::input::{InputState, Key, Modifiers, PointerTarget, Shortcut, WheelDelta};
use crate::persistence::{self, SaveOutcome, Storage};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The board or viewport changed and should be redrawn.
    RenderNeeded,
    /// A history step was committed, undone or redone.
    HistoryChanged,
    /// The group registry changed.
    GroupsChanged,
    /// A pin was created with this id.
    PinCreated(PinId),
    /// A group was created with this id.
    GroupCreated(GroupId),
    /// The host must cancel its own handling of the current wheel event (page zoom).
    SuppressHostZoom,
    /// Non-blocking message about persistence capacity.
    StorageWarning(String),
}

/// Core engine state: history, groups, viewport and the active gesture.
///
/// Separated from `Engine` so it can be tested without a storage backend.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub history: History,
    pub groups: GroupRegistry,
    pub viewport: Viewport,
    pub input: InputState,
    pub viewport_size: Size,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from loaded state, clearing in every snapshot any pin
    /// reference that neither the registry nor a retired-group marker resolves.
    #[must_use]
    pub fn from_parts(mut history: History, groups: GroupRegistry) -> Self {
        let retired: Vec<GroupId> = history.snapshots().filter_map(Snapshot::retired).map(|r| r.group.id).collect();
        let mut cleared = 0;
        for snapshot in history.snapshots_mut() {
            cleared += snapshot.clear_dangling_groups(|id| groups.contains(id) || retired.contains(id));
        }
        if cleared > 0 {
            debug!(cleared, "cleared dangling group references");
        }
        Self { history, groups, ..Self::default() }
    }

    // --- Viewport ---

    /// Update the visible viewport size in screen pixels.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width.max(0.0), height.max(0.0));
    }

    /// Board-space point at the visual center of the viewport; where new pins go.
    #[must_use]
    pub fn center_in_board_space(&self) -> Point {
        self.viewport.center_in_board_space(self.viewport_size)
    }

    /// Step the zoom in, keeping the viewport center fixed.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        let anchor = self.viewport_size.center();
        self.zoom_with(|v| v.zoom_in(anchor))
    }

    /// Step the zoom out, keeping the viewport center fixed.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        let anchor = self.viewport_size.center();
        self.zoom_with(|v| v.zoom_out(anchor))
    }

    /// Apply a zoom and keep an in-progress pan consistent with the new offset.
    fn zoom_with<F>(&mut self, zoom: F) -> Vec<Action>
    where
        F: FnOnce(&mut Viewport),
    {
        let before = self.viewport.offset;
        zoom(&mut self.viewport);
        if let InputState::Panning { anchor, .. } = &mut self.input {
            *anchor = *anchor - (self.viewport.offset - before);
        }
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    /// Start a drag (on a pin) or a pan (on empty canvas). Ignored while a gesture is active.
    pub fn on_pointer_down(&mut self, screen: Point, target: PointerTarget) -> Vec<Action> {
        if !self.input.is_idle() {
            debug!(?target, "pointer-down ignored: gesture already active");
            return Vec::new();
        }
        match target {
            PointerTarget::Pin(id) => {
                let Some(pin) = self.history.present().pin(&id) else {
                    debug!(%id, "pointer-down on unknown pin");
                    return Vec::new();
                };
                let origin = pin.position();
                let grab_offset = self.viewport.screen_to_board(screen) - origin;
                self.input = InputState::DraggingPin { id, grab_offset, origin };
            }
            PointerTarget::Canvas => {
                let origin_offset = self.viewport.offset;
                self.input = InputState::Panning { anchor: screen - origin_offset, origin_offset };
            }
        }
        Vec::new()
    }

    /// Advance the active gesture. Drag updates are applied to the present
    /// board without recording history.
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::DraggingPin { id, grab_offset, .. } => {
                let position = self.viewport.screen_to_board(screen) - grab_offset;
                let Some(pin) = self.history.present_mut().pin_mut(&id) else {
                    return Vec::new();
                };
                pin.set_position(position);
                vec![Action::RenderNeeded]
            }
            InputState::Panning { anchor, .. } => {
                self.viewport.offset = screen - anchor;
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Finish the active gesture. A drag is committed as exactly one history step.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => {
                debug!("pointer-up with no active gesture");
                Vec::new()
            }
            InputState::Panning { .. } => Vec::new(),
            InputState::DraggingPin { id, origin, .. } => {
                let moved = Snapshot::new(self.history.present().pins().to_vec());
                let Some(pin) = self.history.present_mut().pin_mut(&id) else {
                    debug!(%id, "dragged pin vanished before release");
                    return Vec::new();
                };
                pin.set_position(origin);
                self.commit(moved)
            }
        }
    }

    /// Ctrl/Meta + wheel zooms around the pointer; plain wheel is left to the host.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.command() {
            return Vec::new();
        }
        if !delta.dy.is_finite() {
            debug!(dy = delta.dy, "non-finite wheel delta ignored");
            return vec![Action::SuppressHostZoom];
        }
        let mut actions = vec![Action::SuppressHostZoom];
        actions.extend(self.zoom_with(|v| v.zoom_by_wheel(delta.dy, screen)));
        actions
    }

    /// Keyboard shortcuts: undo, redo, and Escape to cancel a gesture.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        match Shortcut::from_key(key, modifiers) {
            Some(Shortcut::Undo) => self.undo(),
            Some(Shortcut::Redo) => self.redo(),
            Some(Shortcut::Cancel) => self.cancel_gesture(),
            None => Vec::new(),
        }
    }

    /// Abandon the active gesture: a drag puts the pin back, a pan restores the offset.
    /// Nothing is committed.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        if self.abort_gesture() { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    fn abort_gesture(&mut self) -> bool {
        match std::mem::take(&mut self.input) {
            InputState::Idle => false,
            InputState::DraggingPin { id, origin, .. } => {
                if let Some(pin) = self.history.present_mut().pin_mut(&id) {
                    pin.set_position(origin);
                }
                true
            }
            InputState::Panning { origin_offset, .. } => {
                self.viewport.offset = origin_offset;
                true
            }
        }
    }

    // --- History ---

    fn commit(&mut self, next: Snapshot) -> Vec<Action> {
        self.history.commit(next);
        vec![Action::HistoryChanged, Action::RenderNeeded]
    }

    /// Step back one history entry, reinstating a group the undone commit deleted.
    pub fn undo(&mut self) -> Vec<Action> {
        self.abort_gesture();
        let retired = self.history.present().retired().cloned();
        if !self.history.undo() {
            debug!("undo with empty history");
            return Vec::new();
        }
        let mut actions = vec![Action::HistoryChanged, Action::RenderNeeded];
        if let Some(retired) = retired {
            self.groups.restore(&retired);
            actions.push(Action::GroupsChanged);
        }
        actions
    }

    /// Step forward one history entry, deleting again a group the redone commit deleted.
    ///
    /// The marker is refreshed from the registry entry being removed, so a
    /// rename made in between survives the next undo.
    pub fn redo(&mut self) -> Vec<Action> {
        self.abort_gesture();
        if !self.history.redo() {
            debug!("redo with empty future");
            return Vec::new();
        }
        let mut actions = vec![Action::HistoryChanged, Action::RenderNeeded];
        let retired_id = self.history.present().retired().map(|r| r.group.id);
        if let Some(current) = retired_id.and_then(|id| self.groups.remove(&id)) {
            let present = self.history.present_mut();
            *present = std::mem::take(present).retiring(current);
            actions.push(Action::GroupsChanged);
        }
        actions
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Pins ---

    fn add_pin(&mut self, content: PinContent, tags: Option<Tags>) -> Vec<Action> {
        self.abort_gesture();
        let pin = Pin::new(self.center_in_board_space(), content, tags);
        let id = pin.id;
        let next = self.history.present().with_pin(pin);
        let mut actions = self.commit(next);
        actions.push(Action::PinCreated(id));
        actions
    }

    /// Add a text pin at the viewport center. Blank text becomes the default body.
    pub fn add_text_pin(&mut self, text: &str, tags: Option<Tags>) -> Vec<Action> {
        let body = match text.trim() {
            "" => DEFAULT_TEXT_BODY.to_owned(),
            trimmed => trimmed.to_owned(),
        };
        self.add_pin(PinContent::Text { body }, tags)
    }

    /// Add an image pin at the viewport center.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::EmptyImageSource`] for a blank source.
    pub fn add_image_pin(&mut self, source: ImageSource, tags: Option<Tags>) -> Result<Vec<Action>, EditError> {
        if source.is_empty() {
            return Err(EditError::EmptyImageSource);
        }
        Ok(self.add_pin(PinContent::Image { source }, tags))
    }

    /// Add a list pin seeded with `first_item`, or empty when it is blank.
    pub fn add_list_pin(&mut self, first_item: &str, tags: Option<Tags>) -> Vec<Action> {
        let items = match first_item.trim() {
            "" => Vec::new(),
            trimmed => vec![trimmed.to_owned()],
        };
        self.add_pin(PinContent::List { items }, tags)
    }

    /// Remove a pin.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::PinNotFound`].
    pub fn delete_pin(&mut self, id: &PinId) -> Result<Vec<Action>, EditError> {
        self.abort_gesture();
        let next = self.history.present().without_pin(id).ok_or(EditError::PinNotFound(*id))?;
        Ok(self.commit(next))
    }

    fn edit_pin<F>(&mut self, id: &PinId, edit: F) -> Result<Vec<Action>, EditError>
    where
        F: FnOnce(&mut Pin) -> Result<(), EditError>,
    {
        self.abort_gesture();
        let next = self
            .history
            .present()
            .with_edited(id, edit)
            .ok_or(EditError::PinNotFound(*id))??;
        Ok(self.commit(next))
    }

    /// Replace a text pin's body.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::PinNotFound`] or [`EditError::WrongPinKind`].
    pub fn edit_text(&mut self, id: &PinId, body: &str) -> Result<Vec<Action>, EditError> {
        self.edit_pin(id, |pin| match &mut pin.content {
            PinContent::Text { body: current } => {
                body.clone_into(current);
                Ok(())
            }
            other => Err(EditError::WrongPinKind { edit: "text", kind: other.kind() }),
        })
    }

    /// Replace an image pin's source.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::EmptyImageSource`], [`EditError::PinNotFound`] or
    /// [`EditError::WrongPinKind`].
    pub fn edit_image(&mut self, id: &PinId, source: ImageSource) -> Result<Vec<Action>, EditError> {
        if source.is_empty() {
            return Err(EditError::EmptyImageSource);
        }
        self.edit_pin(id, |pin| match &mut pin.content {
            PinContent::Image { source: current } => {
                *current = source;
                Ok(())
            }
            other => Err(EditError::WrongPinKind { edit: "image", kind: other.kind() }),
        })
    }

    /// Replace a list pin's items. Items are trimmed and blanks dropped.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::PinNotFound`] or [`EditError::WrongPinKind`].
    pub fn edit_list<S>(&mut self, id: &PinId, lines: &[S]) -> Result<Vec<Action>, EditError>
    where
        S: AsRef<str>,
    {
        let cleaned: Vec<String> = lines
            .iter()
            .map(|l| l.as_ref().trim())
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect();
        self.edit_pin(id, |pin| {
            *list_items(pin, "list")? = cleaned;
            Ok(())
        })
    }

    /// Replace a pin's tags (`None` clears them).
    ///
    /// # Errors
    ///
    /// Returns [`EditError::PinNotFound`].
    pub fn set_tags(&mut self, id: &PinId, tags: Option<Tags>) -> Result<Vec<Action>, EditError> {
        self.edit_pin(id, |pin| {
            pin.tags = tags;
            Ok(())
        })
    }

    /// Append a trimmed item to a list pin.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::EmptyListItem`], [`EditError::PinNotFound`] or
    /// [`EditError::WrongPinKind`].
    pub fn add_list_item(&mut self, id: &PinId, item: &str) -> Result<Vec<Action>, EditError> {
        let item = item.trim();
        if item.is_empty() {
            return Err(EditError::EmptyListItem);
        }
        self.edit_pin(id, |pin| {
            list_items(pin, "list item")?.push(item.to_owned());
            Ok(())
        })
    }

    /// Replace item `index` of a list pin with a trimmed value.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::EmptyListItem`], [`EditError::ListItemOutOfRange`],
    /// [`EditError::PinNotFound`] or [`EditError::WrongPinKind`].
    pub fn edit_list_item(&mut self, id: &PinId, index: usize, item: &str) -> Result<Vec<Action>, EditError> {
        let item = item.trim();
        if item.is_empty() {
            return Err(EditError::EmptyListItem);
        }
        self.edit_pin(id, |pin| {
            let items = list_items(pin, "list item")?;
            let len = items.len();
            let slot = items.get_mut(index).ok_or(EditError::ListItemOutOfRange { index, len })?;
            item.clone_into(slot);
            Ok(())
        })
    }

    /// Remove item `index` from a list pin.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::ListItemOutOfRange`], [`EditError::PinNotFound`] or
    /// [`EditError::WrongPinKind`].
    pub fn delete_list_item(&mut self, id: &PinId, index: usize) -> Result<Vec<Action>, EditError> {
        self.edit_pin(id, |pin| {
            let items = list_items(pin, "list item")?;
            if index >= items.len() {
                return Err(EditError::ListItemOutOfRange { index, len: items.len() });
            }
            items.remove(index);
            Ok(())
        })
    }

    // --- Groups ---

    /// Register a new group.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::EmptyGroupName`] or [`EditError::DuplicateGroupName`].
    pub fn create_group(&mut self, name: &str) -> Result<Vec<Action>, EditError> {
        let id = self.groups.create(name)?.id;
        Ok(vec![Action::GroupsChanged, Action::GroupCreated(id), Action::RenderNeeded])
    }

    /// Rename a group. Pins keep referencing it by id.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::GroupNotFound`], [`EditError::EmptyGroupName`] or
    /// [`EditError::DuplicateGroupName`].
    pub fn rename_group(&mut self, id: &GroupId, name: &str) -> Result<Vec<Action>, EditError> {
        self.groups.rename(id, name)?;
        Ok(vec![Action::GroupsChanged, Action::RenderNeeded])
    }

    /// Delete a group and clear it from every pin, as one undoable step.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::GroupNotFound`].
    pub fn delete_group(&mut self, id: &GroupId) -> Result<Vec<Action>, EditError> {
        self.abort_gesture();
        let retired = self.groups.remove(id).ok_or(EditError::GroupNotFound(*id))?;
        let next = self.history.present().without_group(id).retiring(retired);
        let mut actions = self.commit(next);
        actions.push(Action::GroupsChanged);
        Ok(actions)
    }

    /// Point a pin at a group. An unknown group is ignored without error.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::PinNotFound`].
    pub fn assign_group(&mut self, pin_id: &PinId, group_id: &GroupId) -> Result<Vec<Action>, EditError> {
        if !self.groups.contains(group_id) {
            debug!(%group_id, "assignment to unknown group ignored");
            return Ok(Vec::new());
        }
        let group_id = *group_id;
        self.edit_pin(pin_id, |pin| {
            pin.group_id = Some(group_id);
            Ok(())
        })
    }

    /// Clear a pin's group reference without touching the registry.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::PinNotFound`].
    pub fn unassign_group(&mut self, pin_id: &PinId) -> Result<Vec<Action>, EditError> {
        self.edit_pin(pin_id, |pin| {
            pin.group_id = None;
            Ok(())
        })
    }

    // --- Queries ---

    /// Pins of the present board, in insertion order.
    #[must_use]
    pub fn pins(&self) -> &[Pin] {
        self.history.present().pins()
    }

    #[must_use]
    pub fn pin(&self, id: &PinId) -> Option<&Pin> {
        self.history.present().pin(id)
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        self.groups.groups()
    }

    /// The group a pin belongs to, if its reference resolves.
    #[must_use]
    pub fn group_of(&self, pin_id: &PinId) -> Option<&Group> {
        let group_id = self.pin(pin_id)?.group_id?;
        self.groups.get(&group_id)
    }

    /// The current viewport state.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

fn list_items<'a>(pin: &'a mut Pin, edit: &'static str) -> Result<&'a mut Vec<String>, EditError> {
    match &mut pin.content {
        PinContent::List { items } => Ok(items),
        other => Err(EditError::WrongPinKind { edit, kind: other.kind() }),
    }
}

/// The full board engine. Wraps `EngineCore` and persists every committed change.
pub struct Engine<S: Storage> {
    storage: S,
    config: BoardConfig,
    last_history_save: SaveOutcome,
    last_groups_save: SaveOutcome,
    pub core: EngineCore,
}

impl<S: Storage> Engine<S> {
    /// Restore the board from `storage`. Missing or malformed records start empty.
    #[must_use]
    pub fn open(storage: S, config: BoardConfig) -> Self {
        let history = persistence::load_history(&storage, &config);
        let groups = persistence::load_groups(&storage, &config);
        Self {
            storage,
            config,
            last_history_save: SaveOutcome::Full,
            last_groups_save: SaveOutcome::Full,
            core: EngineCore::from_parts(history, groups),
        }
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the storage backend back, dropping the in-memory board.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Write both records now, regardless of pending changes.
    pub fn flush(&mut self) -> Vec<Action> {
        self.persist(vec![Action::HistoryChanged, Action::GroupsChanged])
    }

    /// Save whatever `actions` report as changed and append capacity warnings.
    ///
    /// A warning is emitted only when a save outcome changes, so a board stuck
    /// in degraded mode does not warn on every edit.
    fn persist(&mut self, mut actions: Vec<Action>) -> Vec<Action> {
        if actions.contains(&Action::HistoryChanged) {
            let outcome = persistence::save_history(&mut self.storage, &self.core.history, &self.config);
            if outcome != self.last_history_save {
                if let Some(message) = outcome.warning() {
                    actions.push(Action::StorageWarning(message.to_owned()));
                }
            }
            self.last_history_save = outcome;
        }
        if actions.contains(&Action::GroupsChanged) {
            let outcome = persistence::save_groups(&mut self.storage, &self.core.groups, &self.config);
            if outcome != self.last_groups_save {
                if let Some(message) = outcome.warning() {
                    actions.push(Action::StorageWarning(message.to_owned()));
                }
            }
            self.last_groups_save = outcome;
        }
        actions
    }

    fn persist_result(&mut self, result: Result<Vec<Action>, EditError>) -> Result<Vec<Action>, EditError> {
        result.map(|actions| self.persist(actions))
    }

    // --- Viewport ---

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.core.set_viewport_size(width, height);
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.core.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.core.zoom_out()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, target: PointerTarget) -> Vec<Action> {
        self.core.on_pointer_down(screen, target)
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_up();
        self.persist(actions)
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_key_down(key, modifiers);
        self.persist(actions)
    }

    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        self.core.cancel_gesture()
    }

    // --- History ---

    pub fn undo(&mut self) -> Vec<Action> {
        let actions = self.core.undo();
        self.persist(actions)
    }

    pub fn redo(&mut self) -> Vec<Action> {
        let actions = self.core.redo();
        self.persist(actions)
    }

    // --- Delegated edits ---

    pub fn add_text_pin(&mut self, text: &str, tags: Option<Tags>) -> Vec<Action> {
        let actions = self.core.add_text_pin(text, tags);
        self.persist(actions)
    }

    /// # Errors
    ///
    /// See [`EngineCore::add_image_pin`].
    pub fn add_image_pin(&mut self, source: ImageSource, tags: Option<Tags>) -> Result<Vec<Action>, EditError> {
        let result = self.core.add_image_pin(source, tags);
        self.persist_result(result)
    }

    pub fn add_list_pin(&mut self, first_item: &str, tags: Option<Tags>) -> Vec<Action> {
        let actions = self.core.add_list_pin(first_item, tags);
        self.persist(actions)
    }

    /// # Errors
    ///
    /// See [`EngineCore::delete_pin`].
    pub fn delete_pin(&mut self, id: &PinId) -> Result<Vec<Action>, EditError> {
        let result = self.core.delete_pin(id);
        self.persist_result(result)
    }

    /// # Errors
    ///
    /// See [`EngineCore::edit_text`].
    pub fn edit_text(&mut self, id: &PinId, body: &str) -> Result<Vec<Action>, EditError> {
        let result = self.core.edit_text(id, body);
        self.persist_result(result)
    }

    /// # Errors
    ///
    /// See [`EngineCore::edit_image`].
    pub fn edit_image(&mut self, id: &PinId, source: ImageSource) -> Result<Vec<Action>, EditError> {
        let result = self.core.edit_image(id, source);
        self.persist_result(result)
    }

    /// # Errors
    ///
    /// See [`EngineCore::edit_list`].
    pub fn edit_list<T: AsRef<str>>(&mut self, id: &PinId, lines: &[T]) -> Result<Vec<Action>, EditError> {
        let result = self.core.edit_list(id, lines);
        self.persist_result(result)
    }

    /// # Errors
    ///
    /// See [`EngineCore::set_tags`].
    pub fn set_tags(&mut self, id: &PinId, tags: Option<Tags>) -> Result<Vec<Action>, EditError> {
        let result = self.core.set_tags(id, tags);
        self.persist_result(result)
    }

    /// # Errors
    ///
    /// See [`EngineCore::add_list_item`].
    pub fn add_list_item(&mut self, id: &PinId, item: &str) -> Result<Vec<Action>, EditError> {
        let result = self.core.add_list_item(id, item);
        self.persist_result(result)
    }

    /// # Errors
    ///
    /// See [`EngineCore::edit_list_item`].
    pub fn edit_list_item(&mut self, id: &PinId, index: usize, item: &str) -> Result<Vec<Action>, EditError> {
        let result = self.core.edit_list_item(id, index, item);
        self.persist_result(result)
    }

    /// # Errors
    ///
    /// See [`EngineCore::delete_list_item`].
    pub fn delete_list_item(&mut self, id: &PinId, index: usize) -> Result<Vec<Action>, EditError> {
        let result = self.core.delete_list_item(id, index);
        self.persist_result(result)
    }

    /// # Errors
    ///
    /// See [`EngineCore::create_group`].
    pub fn create_group(&mut self, name: &str) -> Result<Vec<Action>, EditError> {
        let result = self.core.create_group(name);
        self.persist_result(result)
    }

    /// # Errors
    ///
    /// See [`EngineCore::rename_group`].
    pub fn rename_group(&mut self, id: &GroupId, name: &str) -> Result<Vec<Action>, EditError> {
        let result = self.core.rename_group(id, name);
        self.persist_result(result)
    }

    /// # Errors
    ///
    /// See [`EngineCore::delete_group`].
    pub fn delete_group(&mut self, id: &GroupId) -> Result<Vec<Action>, EditError> {
        let result = self.core.delete_group(id);
        self.persist_result(result)
    }

    /// # Errors
    ///
    /// See [`EngineCore::assign_group`].
    pub fn assign_group(&mut self, pin_id: &PinId, group_id: &GroupId) -> Result<Vec<Action>, EditError> {
        let result = self.core.assign_group(pin_id, group_id);
        self.persist_result(result)
    }

    /// # Errors
    ///
    /// See [`EngineCore::unassign_group`].
    pub fn unassign_group(&mut self, pin_id: &PinId) -> Result<Vec<Action>, EditError> {
        let result = self.core.unassign_group(pin_id);
        self.persist_result(result)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn pins(&self) -> &[Pin] {
        self.core.pins()
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        self.core.groups()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.core.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.core.can_redo()
    }
}
