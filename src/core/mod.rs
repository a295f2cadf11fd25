// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod locator;

pub use distance::{calculate_bounding_box, haversine_miles, is_within_bounding_box, EARTH_RADIUS_MILES};
pub use filters::matches_filters;
pub use locator::{find_nearby, NearbyLocator, SearchOutcome};
