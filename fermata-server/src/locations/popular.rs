//! Predefined popular routes between well-known places.

use serde::Serialize;

use crate::domain::NamedPoint;

/// A predefined route with rough estimates for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularRoute {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub origin: NamedPoint,
    pub destination: NamedPoint,
    /// Rough travel time in minutes.
    pub estimated_minutes: u32,
    /// Rough distance in kilometres.
    pub estimated_km: f64,
}

/// (name, lat, lng)
type Endpoint = (&'static str, f64, f64);

struct RouteRow {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    origin: Endpoint,
    destination: Endpoint,
    minutes: u32,
    km: f64,
}

const ROUTES: &[RouteRow] = &[
    RouteRow {
        id: "mexico_to_ayertena",
        name: "Mexico → Ayertena",
        description: "Popular route from Mexico area to Ayertena",
        origin: ("Mexico", 8.989022, 38.79036),
        destination: ("Ayertena", 9.03045, 38.76530),
        minutes: 15,
        km: 8.5,
    },
    RouteRow {
        id: "megenagna_to_torhailoch",
        name: "Megenagna → Torhailoch",
        description: "Route from Megenagna to Torhailoch area",
        origin: ("Megenagna", 9.0123, 38.7567),
        destination: ("Torhailoch", 9.0456, 38.7890),
        minutes: 12,
        km: 6.2,
    },
    RouteRow {
        id: "bole_to_kazanchis",
        name: "Bole → Kazanchis",
        description: "Route from Bole Airport area to Kazanchis",
        origin: ("Bole", 8.9806, 38.7578),
        destination: ("Kazanchis", 9.0123, 38.7567),
        minutes: 18,
        km: 9.8,
    },
    RouteRow {
        id: "addis_ababa_university_to_merkato",
        name: "AAU → Merkato",
        description: "Route from Addis Ababa University to Merkato",
        origin: ("Addis Ababa University", 9.0456, 38.7890),
        destination: ("Merkato", 9.0123, 38.7567),
        minutes: 20,
        km: 11.5,
    },
    RouteRow {
        id: "kirkos_to_arada",
        name: "Kirkos → Arada",
        description: "Route from Kirkos to Arada district",
        origin: ("Kirkos", 9.03045, 38.76530),
        destination: ("Arada", 9.0123, 38.7567),
        minutes: 14,
        km: 7.3,
    },
];

impl RouteRow {
    fn build(&self) -> PopularRoute {
        let (origin_name, origin_lat, origin_lng) = self.origin;
        let (dest_name, dest_lat, dest_lng) = self.destination;
        PopularRoute {
            id: self.id,
            name: self.name,
            description: self.description,
            origin: NamedPoint::from_static(origin_name, origin_lat, origin_lng),
            destination: NamedPoint::from_static(dest_name, dest_lat, dest_lng),
            estimated_minutes: self.minutes,
            estimated_km: self.km,
        }
    }
}

/// All popular routes in table order.
pub fn popular_routes() -> Vec<PopularRoute> {
    ROUTES.iter().map(RouteRow::build).collect()
}

/// Look up a popular route by id.
pub fn popular_route(id: &str) -> Option<PopularRoute> {
    ROUTES.iter().find(|r| r.id == id).map(RouteRow::build)
}

/// Distinct endpoints of all popular routes, sorted by name.
pub fn popular_endpoints() -> Vec<NamedPoint> {
    let mut points: Vec<NamedPoint> = popular_routes()
        .into_iter()
        .flat_map(|r| [r.origin, r.destination])
        .collect();
    points.sort_by(|a, b| {
        a.name()
            .cmp(b.name())
            .then(a.latitude().total_cmp(&b.latitude()))
            .then(a.longitude().total_cmp(&b.longitude()))
    });
    points.dedup();
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_routes_in_order() {
        let routes = popular_routes();
        assert_eq!(routes.len(), 5);
        assert_eq!(routes[0].id, "mexico_to_ayertena");
        assert_eq!(routes[0].origin.name(), "Mexico");
    }

    #[test]
    fn lookup_by_id() {
        let route = popular_route("bole_to_kazanchis").unwrap();
        assert_eq!(route.destination.name(), "Kazanchis");
        assert_eq!(route.estimated_minutes, 18);
        assert!(popular_route("nowhere").is_none());
    }

    #[test]
    fn endpoints_are_sorted_and_distinct() {
        let names: Vec<_> = popular_endpoints()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "Addis Ababa University",
                "Arada",
                "Ayertena",
                "Bole",
                "Kazanchis",
                "Kirkos",
                "Megenagna",
                "Merkato",
                "Mexico",
                "Torhailoch",
            ]
        );
    }
}
