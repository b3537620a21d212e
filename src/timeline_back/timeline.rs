use super::{
    color::Color,
    config::{Config, Mode},
    entity::{DragContext, DragMode, Entity},
    geometry::{Point, Rect},
    id::{EntityId, IdSource},
    interaction::{CursorIcon, DragSession, Interaction, Key, PointerEvent},
    media::Media,
    needle::Needle,
    scale::Scale,
    surface::Surface,
    time_axis::TimeAxis,
    track::Track,
    TimelineError,
};
use log::{debug, info, trace, warn};
use std::{mem::take, rc::Rc};

/// periods and markers on a set of tracks, following a media element
///
/// pointer positions are relative to the top left corner of the surface
#[derive(Debug)]
pub struct Timeline<M> {
    config: Config,
    /// set once the media duration is known
    axis: Option<TimeAxis>,
    media: Option<M>,
    /// ordered by track order, starting at 1
    tracks: Vec<Track>,
    ids: Rc<IdSource>,
    /// position of the needle, in seconds
    current_time: f64,
    selected: Option<EntityId>,
    selected_track: Option<usize>,
    hovered: Option<EntityId>,
    interaction: Interaction,
    cursor: CursorIcon,
}

impl<M: Media> Timeline<M> {
    pub fn new(config: Config) -> Result<Self, TimelineError> {
        config.validate()?;

        Ok(Self {
            config,
            axis: None,
            media: None,
            tracks: Vec::new(),
            ids: Rc::default(),
            current_time: 0.0,
            selected: None,
            selected_track: None,
            hovered: None,
            interaction: Interaction::Idle,
            cursor: CursorIcon::Default,
        })
    }

    /// starts following `media`, whose length is `duration` seconds
    pub fn ready(&mut self, duration: f64, media: M) -> Result<(), TimelineError> {
        self.axis = Some(TimeAxis::new(duration, self.config.inner_width())?);
        self.ensure_tracks(self.config.number_of_tracks);
        self.current_time = media.current_time();
        self.media = Some(media);

        info!(
            "timeline ready: {duration}s on {} tracks",
            self.config.number_of_tracks
        );

        Ok(())
    }

    /// starts following `media` once it reports its length
    pub fn attach(&mut self, media: M) -> Result<(), TimelineError> {
        let duration = media.duration().ok_or(TimelineError::UnknownDuration)?;
        self.ready(duration, media)
    }

    pub fn is_ready(&self) -> bool {
        self.axis.is_some()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn axis(&self) -> Option<&TimeAxis> {
        self.axis.as_ref()
    }

    pub fn media(&self) -> Option<&M> {
        self.media.as_ref()
    }

    pub fn media_mut(&mut self) -> Option<&mut M> {
        self.media.as_mut()
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.config.mode = mode;
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        self.cursor
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn selected_track(&self) -> Option<usize> {
        self.selected_track
    }

    pub fn hovered(&self) -> Option<EntityId> {
        self.hovered
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, order: usize) -> Option<&Track> {
        order.checked_sub(1).and_then(|index| self.tracks.get(index))
    }

    fn track_mut(&mut self, order: usize) -> Option<&mut Track> {
        order.checked_sub(1).and_then(|index| self.tracks.get_mut(index))
    }

    fn ensure_tracks(&mut self, count: usize) {
        while self.tracks.len() < count {
            self.tracks.push(Track::new(
                self.tracks.len() + 1,
                self.config.min_duration,
                self.ids.clone(),
            ));
        }
    }

    /// the track of `order`, created along with the ones above it if needed
    fn track_or_create(&mut self, order: usize) -> Result<&mut Track, TimelineError> {
        if order == 0 || order > self.config.number_of_tracks {
            return Err(TimelineError::UnknownTrack {
                order,
                count: self.config.number_of_tracks,
            });
        }

        self.ensure_tracks(order);
        Ok(&mut self.tracks[order - 1])
    }

    /// bounds are truncated to whole seconds
    pub fn add_period(
        &mut self,
        time_in: f64,
        time_out: f64,
        color: Color,
        track: usize,
        label: Option<&str>,
    ) -> Result<EntityId, TimelineError> {
        let id = self
            .track_or_create(track)?
            .add_period(time_in, time_out, color, label.map(str::to_owned));
        debug!("added period {id} on track {track}");
        Ok(id)
    }

    /// the time is truncated to whole seconds
    pub fn add_marker(
        &mut self,
        time: f64,
        color: Color,
        track: usize,
        label: Option<&str>,
    ) -> Result<EntityId, TimelineError> {
        let id = self
            .track_or_create(track)?
            .add_marker(time, color, label.map(str::to_owned));
        debug!("added marker {id} on track {track}");
        Ok(id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.tracks.iter().find_map(|track| track.entity(id))
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.tracks.iter_mut().find_map(|track| track.entity_mut(id))
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let order = self.entity(id)?.track();
        let entity = self.track_mut(order)?.take(id)?;

        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if matches!(self.interaction, Interaction::DraggingEntity(session) if session.entity == id) {
            self.interaction = Interaction::Idle;
            self.deselect_track();
        }

        debug!("removed {id} from track {order}");
        Some(entity)
    }

    /// moves an entity to the top of another track
    pub fn switch_track(&mut self, id: EntityId, to: usize) -> bool {
        let Some(from) = self.entity(id).map(Entity::track) else {
            return false;
        };
        if from == to {
            return true;
        }
        if self.track(to).is_none() {
            return false;
        }

        let Some(entity) = self.track_mut(from).and_then(|track| track.take(id)) else {
            return false;
        };
        if let Some(track) = self.track_mut(to) {
            track.adopt(entity);
        }

        debug!("moved {id} from track {from} to track {to}");
        true
    }

    /// focuses an entity and brings it to the front, unfocusing the previous one
    pub fn select(&mut self, id: EntityId) -> bool {
        let Some(order) = self.entity(id).map(Entity::track) else {
            return false;
        };

        self.deselect();

        let Some(track) = self.track_mut(order) else {
            return false;
        };
        track.move_to_front(id);
        if let Some(entity) = track.entity_mut(id) {
            entity.focus();
        }
        self.selected = Some(id);

        true
    }

    pub fn deselect(&mut self) {
        if let Some(entity) = self.selected.take().and_then(|id| self.entity_mut(id)) {
            entity.unfocus();
        }
    }

    fn select_track(&mut self, order: usize) {
        self.deselect_track();

        if let Some(track) = self.track_mut(order) {
            track.focus();
            self.selected_track = Some(order);
        }
    }

    fn deselect_track(&mut self) {
        if let Some(track) = self
            .selected_track
            .take()
            .and_then(|order| self.track_mut(order))
        {
            track.unfocus();
        }
    }

    /// the surface width changed
    pub fn resize(&mut self, width: f64) {
        self.config.width = width;

        if let Some(axis) = &mut self.axis {
            axis.set_inner_width(self.config.inner_width());
            info!("timeline resized to {width}px");
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if let Some(axis) = &mut self.axis {
            axis.set_zoom(zoom, self.config.max_scale_factor);
        }
    }

    pub fn set_scroll(&mut self, scroll: f64) {
        if let Some(axis) = &mut self.axis {
            axis.set_scroll(scroll);
        }
    }

    /// picks up the playback position of the media
    pub fn on_time_update(&mut self) {
        if let Some(media) = &self.media {
            self.current_time = media.current_time();
        }
    }

    fn seek(&mut self, time: f64) {
        let Some(axis) = &self.axis else {
            return;
        };
        let time = time.clamp(0.0, axis.duration());

        if let Some(media) = &mut self.media {
            trace!("seeking to {time}s");
            media.seek(time);
        }
        self.on_time_update();
    }

    /// horizontal position relative to the left padding
    fn axis_x(&self, x: f64) -> f64 {
        x - self.config.padding_left
    }

    fn in_body(&self, y: f64) -> bool {
        self.config.scale_height < y && y < self.config.height
    }

    /// zero-based index of the track under `y`, clamped to the existing ones
    pub fn y_to_track_index(&self, y: f64) -> usize {
        let track_height = (self.config.height - self.config.scale_height)
            / self.config.number_of_tracks as f64;
        let index = ((y - self.config.scale_height) / track_height).floor().max(0.0) as usize;

        index.min(self.config.number_of_tracks - 1)
    }

    pub fn y_to_track(&self, y: f64) -> usize {
        self.y_to_track_index(y) + 1
    }

    fn hit_test(&self, position: Point, axis: &TimeAxis) -> Option<EntityId> {
        self.track(self.y_to_track(position.y))
            .and_then(|track| track.hit_test(self.axis_x(position.x), axis, &self.config))
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(position) => self.pointer_down(position),
            PointerEvent::Move(position) => self.pointer_move(position),
            PointerEvent::Up(position) => self.pointer_up(position),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    pub fn pointer_down(&mut self, position: Point) {
        if self.axis.is_some() && self.interaction.is_idle() {
            self.interaction = Interaction::Pressed {
                origin: position,
                moved: false,
            };
        }
    }

    pub fn pointer_move(&mut self, position: Point) {
        let Some(axis) = self.axis else {
            return;
        };

        match self.interaction {
            Interaction::Idle => self.hover(position, &axis),
            Interaction::Pressed {
                origin,
                moved: false,
            } if origin != position => self.start_drag(origin, position, &axis),
            Interaction::Pressed { .. } => {}
            Interaction::DraggingNeedle => self.seek(axis.x_to_time(self.axis_x(position.x))),
            Interaction::DraggingEntity(session) => self.continue_drag(session, position, &axis),
            Interaction::Creating { origin, .. } => {
                self.interaction = Interaction::Creating {
                    origin,
                    current: position,
                };
            }
        }
    }

    pub fn pointer_up(&mut self, position: Point) {
        let Some(axis) = self.axis else {
            return;
        };

        match take(&mut self.interaction) {
            Interaction::Idle | Interaction::DraggingNeedle => {}
            Interaction::Pressed { .. } => self.click(position, &axis),
            Interaction::DraggingEntity(session) => self.end_drag(session),
            Interaction::Creating { origin, .. } => self.create_period(origin, position, &axis),
        }

        self.hover(position, &axis);
    }

    pub fn pointer_leave(&mut self) {
        if self.interaction.is_idle() {
            self.set_hovered(None);
            self.cursor = CursorIcon::Default;
        }
    }

    pub fn key_press(&mut self, key: Key) {
        if !self.interaction.is_idle() {
            return;
        }

        match key {
            Key::Delete if self.config.mode.allows_editing() => {
                if let Some(id) = self.selected {
                    self.remove(id);
                }
            }
            Key::Delete => {}
            Key::Escape => self.deselect(),
        }
    }

    fn set_hovered(&mut self, hovered: Option<EntityId>) {
        if hovered == self.hovered {
            return;
        }

        if let Some(entity) = self.hovered.take().and_then(|id| self.entity_mut(id)) {
            entity.set_hovered(false);
        }
        if let Some(entity) = hovered.and_then(|id| self.entity_mut(id)) {
            entity.set_hovered(true);
        }
        self.hovered = hovered;
    }

    /// shows the handles of the entity under the pointer and picks the cursor
    fn hover(&mut self, position: Point, axis: &TimeAxis) {
        let hit = (self.in_body(position.y) && self.config.mode.allows_editing())
            .then(|| self.hit_test(position, axis))
            .flatten();
        self.set_hovered(hit);

        let x = self.axis_x(position.x);
        let drag_mode = hit
            .and_then(|id| self.entity(id))
            .map(|entity| entity.hover_mode(x, axis, &self.config));

        if let Some((id, drag_mode)) = hit.zip(drag_mode) {
            if let Some(entity) = self.entity_mut(id) {
                entity.set_drag_mode(drag_mode);
            }
        }

        self.cursor = match drag_mode {
            Some(drag_mode) => cursor_for(drag_mode),
            None if Scale::contains_y(position.y, &self.config) => CursorIcon::Seek,
            None => CursorIcon::Default,
        };
    }

    /// the first move after a press decides when a drag starts
    ///
    /// what gets grabbed is resolved at the press position, not at the moved one,
    /// so a fast first move can't skip past the entity under the press
    fn start_drag(&mut self, origin: Point, position: Point, axis: &TimeAxis) {
        if Scale::contains_y(origin.y, &self.config) {
            debug!("dragging the needle");
            self.interaction = Interaction::DraggingNeedle;
            self.cursor = CursorIcon::Seek;
            self.seek(axis.x_to_time(self.axis_x(position.x)));
            return;
        }

        let hit = self.hit_test(origin, axis);
        match hit {
            Some(id) if self.config.mode.allows_editing() => {
                let x = self.axis_x(origin.x);
                let drag_mode = self
                    .entity(id)
                    .map_or(DragMode::Move, |entity| entity.hover_mode(x, axis, &self.config));

                self.select(id);

                let Some(entity) = self.entity_mut(id) else {
                    return;
                };
                entity.set_drag_mode(drag_mode);
                let anchor = entity.begin_drag(origin, axis.x_to_time(x));

                debug!("dragging {id} ({drag_mode:?})");
                self.cursor = cursor_for(drag_mode);
                self.continue_drag(
                    DragSession {
                        entity: id,
                        anchor,
                        pending_track: None,
                    },
                    position,
                    axis,
                );
            }
            None if self.config.mode == Mode::Create && self.in_body(origin.y) => {
                self.deselect();
                self.interaction = Interaction::Creating {
                    origin,
                    current: position,
                };
            }
            _ => {
                self.interaction = Interaction::Pressed {
                    origin,
                    moved: true,
                };
            }
        }
    }

    fn continue_drag(&mut self, mut session: DragSession, position: Point, axis: &TimeAxis) {
        let Some(order) = self.entity(session.entity).map(Entity::track) else {
            self.interaction = Interaction::Idle;
            return;
        };

        let ctx = DragContext {
            duration: axis.duration(),
            min_duration: self.config.min_duration,
            band: Track::layout_band(
                order,
                self.config.number_of_tracks,
                self.config.height,
                self.config.scale_height,
            ),
            body: self.config.body(),
        };
        let mouse_time = axis.x_to_time(self.axis_x(position.x));

        let Some(entity) = self.entity_mut(session.entity) else {
            return;
        };
        entity.continue_drag(&session.anchor, position, mouse_time, &ctx);

        if entity.drag_mode() == DragMode::Move {
            let candidate = self.y_to_track(position.y);
            if self.selected_track != Some(candidate) {
                self.select_track(candidate);
            }
            session.pending_track = Some(candidate);
        }

        self.interaction = Interaction::DraggingEntity(session);
    }

    fn end_drag(&mut self, session: DragSession) {
        let id = session.entity;

        if let Some(to) = session.pending_track {
            self.switch_track(id, to);
        }
        self.deselect_track();

        if let Some(entity) = self.entity_mut(id) {
            entity.end_drag();
            debug!(
                "dropped {id} at {}s..{}s on track {}",
                entity.time_in(),
                entity.time_out(),
                entity.track()
            );
        }
    }

    fn click(&mut self, position: Point, axis: &TimeAxis) {
        if Scale::contains_y(position.y, &self.config) {
            self.seek(axis.x_to_time(self.axis_x(position.x)));
            return;
        }
        if !self.in_body(position.y) {
            return;
        }

        match self.hit_test(position, axis) {
            Some(id) if self.config.mode == Mode::Delete => {
                self.remove(id);
            }
            Some(id) => {
                self.select(id);
                if let Some(time_in) = self.entity(id).map(Entity::time_in) {
                    self.seek(time_in);
                }
            }
            None => {
                self.deselect();

                if self.config.mode == Mode::Create {
                    let time = axis.x_to_time(self.axis_x(position.x));
                    let order = self.y_to_track(position.y);
                    if let Err(err) =
                        self.add_marker(time, self.config.new_period_color, order, None)
                    {
                        warn!("{err}");
                    }
                }
            }
        }
    }

    fn create_period(&mut self, origin: Point, position: Point, axis: &TimeAxis) {
        let [start, end] = [origin, position]
            .map(|point| axis.x_to_time(self.axis_x(point.x)).clamp(0.0, axis.duration()).trunc());
        let (time_in, time_out) = (start.min(end), start.max(end));

        if time_out - time_in < self.config.min_duration {
            return;
        }

        let order = self.y_to_track(position.y);
        if let Err(err) =
            self.add_period(time_in, time_out, self.config.new_period_color, order, None)
        {
            warn!("{err}");
        }
    }

    /// draws the whole timeline, back to front
    pub fn render(&self, surface: &mut dyn Surface) -> Result<(), TimelineError> {
        let axis = self.axis.as_ref().ok_or(TimelineError::NotReady)?;
        let config = &self.config;

        surface.rect(
            Rect::new(0.0, 0.0, config.width, config.height),
            Some(config.background_color),
            None,
        );

        Scale::draw(surface, axis, config);

        // deeper tracks first, so shallower bubbles stay on top
        for track in self.tracks.iter().rev() {
            track.draw(surface, axis, config, self.current_time);
        }

        match self.interaction {
            Interaction::DraggingEntity(session) => {
                if let Some(entity) = self.entity(session.entity) {
                    let band = Track::layout_band(
                        entity.track(),
                        config.number_of_tracks,
                        config.height,
                        config.scale_height,
                    );
                    entity.draw(surface, axis, config, self.current_time, band);
                }
            }
            Interaction::Creating { origin, current } => {
                let band = Track::layout_band(
                    self.y_to_track(current.y),
                    config.number_of_tracks,
                    config.height,
                    config.scale_height,
                );
                let Color { r, g, b, .. } = config.new_period_color;

                surface.rect(
                    Rect::new(
                        origin.x.min(current.x),
                        band.top + 1.0,
                        (current.x - origin.x).abs(),
                        band.height() - 1.0,
                    ),
                    Some(Color::from_rgba(r, g, b, 0.5)),
                    None,
                );
            }
            _ => {}
        }

        Needle::draw(surface, axis, config, self.current_time);

        Ok(())
    }
}

fn cursor_for(drag_mode: DragMode) -> CursorIcon {
    match drag_mode {
        DragMode::None => CursorIcon::Default,
        DragMode::Move => CursorIcon::Move,
        DragMode::ResizeLeft => CursorIcon::ResizeLeft,
        DragMode::ResizeRight => CursorIcon::ResizeRight,
    }
}
