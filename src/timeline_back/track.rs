use super::{
    color::Color,
    config::Config,
    entity::{Entity, EntityKind},
    geometry::{dashed_line, Band, Rect},
    id::{EntityId, IdSource},
    surface::{StrokeStyle, Surface},
    time_axis::TimeAxis,
};
use itertools::Itertools as _;
use std::rc::Rc;

/// a horizontal lane of periods and markers
///
/// list order is drawing order, the last entity is on top
#[derive(Debug)]
pub struct Track {
    /// position of the lane, starting at 1 for the topmost one
    order: usize,
    periods: Vec<Entity>,
    markers: Vec<Entity>,
    focused: bool,
    /// span given to every new marker, in seconds
    marker_span: f64,
    ids: Rc<IdSource>,
}

impl Track {
    pub fn new(order: usize, marker_span: f64, ids: Rc<IdSource>) -> Self {
        Self {
            order,
            periods: Vec::new(),
            markers: Vec::new(),
            focused: false,
            marker_span,
            ids,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn periods(&self) -> &[Entity] {
        &self.periods
    }

    pub fn markers(&self) -> &[Entity] {
        &self.markers
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.periods.iter().chain(&self.markers)
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn unfocus(&mut self) {
        self.focused = false;
    }

    /// bounds are truncated to whole seconds
    pub fn add_period(
        &mut self,
        time_in: f64,
        time_out: f64,
        color: Color,
        label: Option<String>,
    ) -> EntityId {
        let id = self.ids.unique();
        self.periods.push(Entity::period(
            id,
            time_in.trunc(),
            time_out.trunc(),
            color,
            label,
            self.order,
        ));
        id
    }

    /// the time is truncated to whole seconds
    pub fn add_marker(&mut self, time: f64, color: Color, label: Option<String>) -> EntityId {
        let id = self.ids.unique();
        self.markers.push(Entity::marker(
            id,
            time.trunc(),
            self.marker_span,
            color,
            label,
            self.order,
        ));
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities().find(|entity| entity.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.periods
            .iter_mut()
            .chain(&mut self.markers)
            .find(|entity| entity.id() == id)
    }

    /// the topmost entity at `x`, periods before markers
    pub fn hit_test(&self, x: f64, axis: &TimeAxis, config: &Config) -> Option<EntityId> {
        self.periods
            .iter()
            .rev()
            .chain(self.markers.iter().rev())
            .find(|entity| entity.hit_test(x, axis, config))
            .map(Entity::id)
    }

    fn list_mut(&mut self, kind: EntityKind) -> &mut Vec<Entity> {
        match kind {
            EntityKind::Period => &mut self.periods,
            EntityKind::Marker => &mut self.markers,
        }
    }

    /// detaches an entity from this track
    pub fn take(&mut self, id: EntityId) -> Option<Entity> {
        [EntityKind::Period, EntityKind::Marker]
            .into_iter()
            .find_map(|kind| {
                let list = self.list_mut(kind);
                list.iter()
                    .find_position(|entity| entity.id() == id)
                    .map(|(index, _)| index)
                    .map(|index| list.remove(index))
            })
    }

    /// attaches an entity on top of the others of its kind
    pub fn adopt(&mut self, mut entity: Entity) {
        entity.set_track(self.order);
        self.list_mut(entity.kind()).push(entity);
    }

    pub fn move_to_front(&mut self, id: EntityId) -> bool {
        self.take(id).map(|entity| self.adopt(entity)).is_some()
    }

    pub fn layout_band(
        order: usize,
        number_of_tracks: usize,
        total_height: f64,
        scale_height: f64,
    ) -> Band {
        let height = (total_height - scale_height) / number_of_tracks as f64;

        Band {
            top: (order as f64 - 1.0).mul_add(height, scale_height),
            bottom: (order as f64).mul_add(height, scale_height),
        }
    }

    pub fn band(&self, config: &Config) -> Band {
        Self::layout_band(
            self.order,
            config.number_of_tracks,
            config.height,
            config.scale_height,
        )
    }

    pub fn draw(&self, surface: &mut dyn Surface, axis: &TimeAxis, config: &Config, current_time: f64) {
        let band = self.band(config);
        let (x, width) = if config.tracks_padding {
            (config.padding_left, axis.inner_width())
        } else {
            (0.0, config.width)
        };

        if let Some(color) = config.track_separator_color {
            surface.path(
                &dashed_line(x, x + width, band.bottom, config.track_separator_dotted_width),
                None,
                Some(StrokeStyle::new(color, 1.0)),
            );
        }

        if let Some(fill) = config.highlight_track_fill.filter(|_| self.focused) {
            surface.rect(
                Rect::new(x, band.top + 1.0, width, band.height() - 2.0),
                Some(fill),
                None,
            );
        }

        self.entities()
            .filter(|entity| !entity.is_dragging())
            .for_each(|entity| entity.draw(surface, axis, config, current_time, band));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn axis() -> TimeAxis {
        TimeAxis::new(30.0, 710.0).unwrap()
    }

    fn track() -> Track {
        Track::new(1, 0.05, Rc::default())
    }

    #[test]
    fn times_are_truncated_to_whole_seconds() {
        let mut track = track();
        let period = track.add_period(5.7, 12.2, Color::BLACK, None);
        let marker = track.add_marker(3.9, Color::BLACK, None);

        let period = track.entity(period).unwrap();
        assert!((period.time_in() - 5.0).abs() < EPSILON);
        assert!((period.time_out() - 12.0).abs() < EPSILON);

        let marker = track.entity(marker).unwrap();
        assert_eq!(marker.kind(), EntityKind::Marker);
        assert!((marker.time_in() - 3.0).abs() < EPSILON);
        assert!((marker.span() - 0.05).abs() < EPSILON);
    }

    #[test]
    fn the_last_added_period_wins_the_hit_test() {
        let axis = axis();
        let config = Config::default();
        let mut track = track();
        let first = track.add_period(5.0, 12.0, Color::BLACK, None);
        let second = track.add_period(7.0, 13.0, Color::WHITE, None);
        let x = axis.time_to_x(10.0);

        assert_eq!(track.hit_test(x, &axis, &config), Some(second));

        assert!(track.move_to_front(first));
        assert_eq!(track.hit_test(x, &axis, &config), Some(first));
        assert_eq!(track.periods().last().map(Entity::id), Some(first));
    }

    #[test]
    fn periods_are_hit_before_markers() {
        let axis = axis();
        let config = Config::default();
        let mut track = track();
        let marker = track.add_marker(8.0, Color::BLACK, None);
        let period = track.add_period(5.0, 12.0, Color::BLACK, None);

        assert_eq!(track.hit_test(axis.time_to_x(8.0) + 1.0, &axis, &config), Some(period));
        assert_eq!(track.hit_test(axis.time_to_x(20.0), &axis, &config), None);

        track.take(period);
        assert_eq!(track.hit_test(axis.time_to_x(8.0) + 1.0, &axis, &config), Some(marker));
    }

    #[test]
    fn adopting_rewrites_the_owning_track() {
        let ids = Rc::new(IdSource::default());
        let mut first = Track::new(1, 0.05, ids.clone());
        let mut second = Track::new(2, 0.05, ids);
        let id = first.add_period(5.0, 12.0, Color::BLACK, None);

        let entity = first.take(id).unwrap();
        second.adopt(entity);

        assert!(first.entity(id).is_none());
        assert_eq!(second.entity(id).map(Entity::track), Some(2));
        assert!(second.take(id).is_some());
        assert!(second.take(id).is_none());
    }

    #[test]
    fn bands_split_the_body_evenly() {
        let first = Track::layout_band(1, 4, 160.0, 30.0);
        let second = Track::layout_band(2, 4, 160.0, 30.0);

        assert!((first.top - 30.0).abs() < EPSILON);
        assert!((first.bottom - 62.5).abs() < EPSILON);
        assert!((second.top - first.bottom).abs() < EPSILON);
        assert!((Track::layout_band(4, 4, 160.0, 30.0).bottom - 160.0).abs() < EPSILON);
    }
}
