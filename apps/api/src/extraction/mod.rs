// Extraction Gateway: multipart upload → staged file → remote parser → paged text.

pub mod handlers;
pub mod pages;
pub mod parser;
pub mod staging;
