pub mod match_location;
pub mod search_request;
