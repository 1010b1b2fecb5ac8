// Prompt constants and prompt assembly for the Summarization Gateway.
// Templates stop right before the notes; `build_prompt` appends them, so
// placeholder text inside a document is never substituted.

use crate::summarize::profiles::GenerationProfile;

/// Placed between consecutive documents in the assembled prompt.
pub const DOCUMENT_SEPARATOR: &str = "\n\n=== Next Document ===\n\n";

/// Stands in for the subject list when the request names none.
const ALL_SUBJECTS: &str = "all topics covered in the notes";

pub const CLASSIC_SYSTEM: &str = "You are a helpful assistant that creates well-structured, \
    comprehensive resumes from lecture notes. Your output should be clear, organized, \
    and focused on the requested subjects.";

/// Replace `{subjects}`, `{source_language}` and `{target_language}` before sending.
pub const CLASSIC_TEMPLATE: &str = "Please analyze the following lecture notes and create a comprehensive resume. 
Focus on these subjects: {subjects}.
Source language: {source_language}
Target language: {target_language}

The resume should:
1. Identify and summarize key concepts
2. Highlight important definitions and explanations
3. Note any significant examples or case studies
4. Organize the information in a clear, structured format

Here are the lecture notes:

";

pub const STRUCTURED_SYSTEM: &str = "You are an expert teaching assistant who turns lecture notes \
    into study resumes. Write in a neutral, academic tone. Use Markdown headings and bullet \
    points only; no introductions, no closing remarks, no text outside the resume. \
    Never invent material that is not in the notes.";

/// Replace `{subjects}`, `{source_language}` and `{target_language}` before sending.
pub const STRUCTURED_TEMPLATE: &str = "Create a structured resume of the lecture notes below.
Subjects to focus on: {subjects}.
The notes are written in {source_language}. Write the resume in {target_language}.

Structure the resume as follows:
- One section per subject, titled with a level-2 heading (##) naming the subject
- Inside each section, the key concepts as bullet points, with supporting details as nested bullets
- A \"Definitions\" subsection (###) listing important terms and what they mean
- An \"Examples\" subsection (###) for significant examples or case studies
- A final \"## Key Takeaways\" section with the most important points across all subjects

Here are the lecture notes:

";

/// Concatenates documents with `DOCUMENT_SEPARATOR`.
pub fn combine_texts<S: AsRef<str>>(texts: &[S]) -> String {
    texts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR)
}

/// Fills the profile's template and appends the combined notes.
pub fn build_prompt<S: AsRef<str>>(
    profile: GenerationProfile,
    texts: &[S],
    subjects: &[S],
    source_language: &str,
    target_language: &str,
) -> String {
    let subjects = if subjects.is_empty() {
        ALL_SUBJECTS.to_string()
    } else {
        subjects
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut prompt = profile
        .template()
        .replace("{subjects}", &subjects)
        .replace("{source_language}", source_language)
        .replace("{target_language}", target_language);
    prompt.push_str(&combine_texts(texts));
    prompt
}
