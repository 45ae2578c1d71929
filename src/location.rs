use crate::locale::Locale;

const CITY: &str = "Tokyo";

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: &'static str,
    pub display_name: &'static str,
    pub localized_name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Header lines for the location: the localized name (Japanese only)
    /// followed by `"{display_name}, Tokyo"`.
    pub fn title(&self, locale: Locale) -> (Option<&'static str>, String) {
        let localized = match locale {
            Locale::Japanese => Some(self.localized_name),
            Locale::English => None,
        };
        (localized, format!("{}, {CITY}", self.display_name))
    }
}

static TOKYO_DISTRICTS: [Location; 6] = [
    Location {
        id: "shibuya",
        display_name: "Shibuya",
        localized_name: "渋谷",
        latitude: 35.6595,
        longitude: 139.7004,
    },
    Location {
        id: "shinjuku",
        display_name: "Shinjuku",
        localized_name: "新宿",
        latitude: 35.6938,
        longitude: 139.7036,
    },
    Location {
        id: "ginza",
        display_name: "Ginza",
        localized_name: "銀座",
        latitude: 35.6717,
        longitude: 139.7649,
    },
    Location {
        id: "harajuku",
        display_name: "Harajuku",
        localized_name: "原宿",
        latitude: 35.6702,
        longitude: 139.7026,
    },
    Location {
        id: "akihabara",
        display_name: "Akihabara",
        localized_name: "秋葉原",
        latitude: 35.6984,
        longitude: 139.7731,
    },
    Location {
        id: "roppongi",
        display_name: "Roppongi",
        localized_name: "六本木",
        latitude: 35.6627,
        longitude: 139.7298,
    },
];

/// Ordered, wrap-around registry of selectable locations.
#[derive(Debug, Clone, Copy)]
pub struct LocationCycle {
    locations: &'static [Location],
}

impl LocationCycle {
    pub fn tokyo() -> Self {
        Self {
            locations: &TOKYO_DISTRICTS,
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn first(&self) -> &'static Location {
        &self.locations[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Location> {
        self.locations.iter()
    }

    pub fn find(&self, id: &str) -> Option<&'static Location> {
        self.locations
            .iter()
            .find(|l| l.id.eq_ignore_ascii_case(id))
    }

    pub fn index(&self, current: &Location) -> Option<usize> {
        self.locations.iter().position(|l| l.id == current.id)
    }

    /// The location after `current`, wrapping past the end. A location
    /// that is not registered restarts the cycle at the first entry.
    pub fn next(&self, current: &Location) -> &'static Location {
        match self.index(current) {
            Some(i) => &self.locations[(i + 1) % self.locations.len()],
            None => self.first(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry() {
        let cycle = LocationCycle::tokyo();
        assert_eq!(cycle.len(), 6);
        assert_eq!(cycle.first().id, "shibuya");
        assert_eq!(cycle.find("Ginza").map(|l| l.localized_name), Some("銀座"));
        assert!(cycle.find("osaka").is_none());
    }

    #[test]
    fn test_next_wraps() {
        let cycle = LocationCycle::tokyo();
        let last = cycle.find("roppongi").unwrap();
        assert_eq!(cycle.next(last).id, "shibuya");
        assert_eq!(cycle.next(cycle.first()).id, "shinjuku");
    }

    #[test]
    fn test_six_steps_return_to_start() {
        let cycle = LocationCycle::tokyo();
        for start in cycle.iter() {
            let mut current = start;
            for _ in 0..6 {
                current = cycle.next(current);
                assert!(cycle.index(current).is_some());
            }
            assert_eq!(current, start);
        }
    }

    #[test]
    fn test_unregistered_location_restarts_cycle() {
        let cycle = LocationCycle::tokyo();
        let stranger = Location {
            id: "osaka",
            display_name: "Osaka",
            localized_name: "大阪",
            latitude: 34.69,
            longitude: 135.50,
        };
        assert_eq!(cycle.index(&stranger), None);
        assert_eq!(cycle.next(&stranger).id, "shibuya");
    }

    #[test]
    fn test_title() {
        let ginza = LocationCycle::tokyo().find("ginza").unwrap();
        assert_eq!(
            ginza.title(Locale::Japanese),
            (Some("銀座"), "Ginza, Tokyo".to_string())
        );
        assert_eq!(ginza.title(Locale::English).0, None);
    }
}
