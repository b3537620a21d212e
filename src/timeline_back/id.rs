use std::{
    cell::Cell,
    fmt::{Display, Formatter},
};

/// opaque identifier of a period or marker, unique within one timeline
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EntityId(u32);

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

/// hands out entity ids for a single timeline
///
/// shared between the tracks of that timeline, never between timelines
#[derive(Debug, Default)]
pub struct IdSource {
    next: Cell<u32>,
}

impl IdSource {
    pub fn unique(&self) -> EntityId {
        let id = self.next.get();
        self.next.set(id.wrapping_add(1));
        EntityId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_per_source() {
        let ids = IdSource::default();
        let a = ids.unique();
        let b = ids.unique();

        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn ids_render_as_hex() {
        let ids = IdSource::default();
        for _ in 0..26 {
            ids.unique();
        }

        assert_eq!(ids.unique().to_string(), "001a");
    }

    #[test]
    fn sources_are_independent() {
        let first = IdSource::default();
        let second = IdSource::default();

        assert_eq!(first.unique(), second.unique());
    }
}
