//! Prompt assembly for per-chunk generation calls.

use std::fmt::Write;

/// Render one chunk of policy text and the question list into a single instruction.
///
/// The instruction pins the response format to a bare numbered list and gives the model
/// an explicit escape hatch for questions this chunk cannot answer, so the parser and
/// aggregator downstream can rely on line shape alone. Deterministic given its inputs.
pub fn build_prompt(chunk_text: &str, questions: &[String]) -> String {
    let mut prompt = String::with_capacity(chunk_text.len() + 512);
    prompt.push_str(
        "You are an expert insurance policy analyst.\n\
         \n\
         Your task is to answer each of the following questions based on the provided \
         insurance policy text. Include clause numbers or exact phrases from the document \
         as supporting evidence.\n\
         \n\
         Instructions:\n\
         - Only return a numbered list of answers.\n\
         - Each answer should be concise but clearly reference specific clauses or definitions.\n\
         - Do not include any introduction, summary, or extra commentary.\n\
         - If this section of the text does not contain the information needed for a question, \
         answer exactly: No information found in this section.\n\
         \n\
         Policy Text:\n\
         \"\"\"\n",
    );
    prompt.push_str(chunk_text);
    prompt.push_str("\n\"\"\"\n\nQuestions:\n");
    for (position, question) in questions.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", position + 1, question);
    }
    prompt
}
