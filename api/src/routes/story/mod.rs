pub mod extract_route;
pub mod fallback_route;
pub mod generate_route;
pub mod story_request;
pub mod story_response;
pub mod validate_route;
