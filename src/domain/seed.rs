//! Built-in seed data: eight curated New York City points of interest.
//!
//! Used whenever no `locations_file` is configured. The map starts centered on
//! [`DEFAULT_CENTER`] until the user's position is known.

use super::location::{Category, Coordinate, Location, LocationId};

/// Fallback map center (New York City).
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(40.7128, -74.0060);

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    name: &str,
    category: Category,
    lat: f64,
    lng: f64,
    description: &str,
    rating: f64,
    reviews: u32,
    icon: &str,
    details: &str,
) -> Location {
    Location {
        id: LocationId::new(id),
        name: name.to_string(),
        category,
        coordinate: Coordinate::new(lat, lng),
        description: description.to_string(),
        rating,
        reviews,
        icon: icon.to_string(),
        details: details.to_string(),
    }
}

/// Returns the seed locations in their canonical order.
#[must_use]
pub fn seed_locations() -> Vec<Location> {
    vec![
        seed(
            "1",
            "Central Park",
            Category::Park,
            40.7829,
            -73.9654,
            "A magnificent urban oasis in the heart of Manhattan, offering 843 acres of green space, lakes, and recreational activities.",
            4.8,
            12543,
            "🌳",
            "Open 6:00 AM - 1:00 AM daily",
        ),
        seed(
            "2",
            "Metropolitan Museum of Art",
            Category::Museum,
            40.7794,
            -73.9632,
            "One of the world's largest and most prestigious art museums, housing over 2 million works spanning 5,000 years.",
            4.7,
            8765,
            "🏛️",
            "Open 10:00 AM - 5:00 PM, closed Mondays",
        ),
        seed(
            "3",
            "Brooklyn Bridge",
            Category::Landmark,
            40.7061,
            -73.9969,
            "An iconic suspension bridge connecting Manhattan and Brooklyn, offering stunning views of the NYC skyline.",
            4.6,
            15432,
            "🌉",
            "Open 24/7, pedestrian walkway available",
        ),
        seed(
            "4",
            "Le Bernardin",
            Category::Restaurant,
            40.7614,
            -73.9776,
            "A world-renowned French seafood restaurant with three Michelin stars, offering exquisite fine dining.",
            4.9,
            2341,
            "🍽️",
            "Reservations required, $$",
        ),
        seed(
            "5",
            "High Line Park",
            Category::Park,
            40.7480,
            -74.0048,
            "A unique elevated park built on a former railway line, featuring gardens, art installations, and city views.",
            4.5,
            9876,
            "🌿",
            "Open 7:00 AM - 7:00 PM (seasonal hours)",
        ),
        seed(
            "6",
            "Times Square",
            Category::Landmark,
            40.7580,
            -73.9855,
            "The bustling commercial intersection known as 'The Crossroads of the World', famous for its bright lights and energy.",
            4.2,
            23456,
            "🌟",
            "Open 24/7, busiest area in NYC",
        ),
        seed(
            "7",
            "SoHo Shopping District",
            Category::Shopping,
            40.7230,
            -74.0030,
            "A trendy neighborhood known for high-end boutiques, art galleries, and cast-iron architecture.",
            4.4,
            5678,
            "🛍️",
            "Most shops open 10:00 AM - 8:00 PM",
        ),
        seed(
            "8",
            "9/11 Memorial & Museum",
            Category::Museum,
            40.7115,
            -74.0134,
            "A moving tribute to the victims of September 11th, featuring twin reflecting pools and a comprehensive museum.",
            4.8,
            11234,
            "🕊️",
            "Open 9:00 AM - 8:00 PM, timed entry tickets",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_eight_valid_locations() {
        let locations = seed_locations();
        assert_eq!(locations.len(), 8);
        for location in &locations {
            assert!(location.validate().is_ok(), "{} should be valid", location.name);
        }
    }

    #[test]
    fn test_seed_category_distribution() {
        let locations = seed_locations();
        let count = |category| locations.iter().filter(|l| l.category == category).count();

        assert_eq!(count(Category::Park), 2);
        assert_eq!(count(Category::Museum), 2);
        assert_eq!(count(Category::Landmark), 2);
        assert_eq!(count(Category::Restaurant), 1);
        assert_eq!(count(Category::Shopping), 1);
    }
}
