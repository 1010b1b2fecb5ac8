// Summarization Gateway: extracted texts + subject/language config → prompt → generated resume.
// All generation calls go through llm_client.

pub mod handlers;
pub mod profiles;
pub mod prompts;
