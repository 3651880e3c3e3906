pub mod json_body;
pub mod limits;
