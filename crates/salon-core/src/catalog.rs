//! # Service Catalog
//!
//! The static, read-only set of sellable services.
//!
//! The catalog is seed data: exactly nine entries, never created or deleted
//! by users, and shipped with the bookings slice's default state. A freshly
//! hydrated store that has no persisted bookings blob starts with this set.

use crate::types::Service;

/// Number of entries in the seeded catalog.
pub const SERVICE_COUNT: usize = 9;

/// Builds the seeded service catalog.
///
/// Ids and titles are stable: booking records reference services by title,
/// and the presentation layer resolves images through `url`.
pub fn default_services() -> Vec<Service> {
    fn service(id: i64, url: &str, title: &str) -> Service {
        Service {
            id,
            url: url.to_string(),
            title: title.to_string(),
        }
    }

    vec![
        service(1, "/MENI&PEDI.jpg", "Manicures Pedicures"),
        service(2, "/FACIAL.jpg", "Facial Treatments"),
        service(3, "/hairstyle.jpg", "Hair Care"),
        service(4, "/bridalmakeup2.jpg", "Bridal Makeup"),
        service(5, "/makeup.jpg", "Party Makeup"),
        service(6, "/mehndi.jpeg", "Mehndi"),
        service(7, "/nailart3.jpg", "Nail Art"),
        service(8, "/wax.jpg", "Waxing"),
        service(9, "/threading.jpg", "Threading"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_nine_unique_entries() {
        let services = default_services();
        assert_eq!(services.len(), SERVICE_COUNT);

        let mut ids: Vec<i64> = services.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SERVICE_COUNT);
    }

    #[test]
    fn test_catalog_titles() {
        let services = default_services();
        assert_eq!(services[0].title, "Manicures Pedicures");
        assert_eq!(services[8].title, "Threading");
    }
}
