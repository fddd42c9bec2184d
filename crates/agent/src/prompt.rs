//! Prompt composition for a single agent turn.

use boardroom_core::document::Document;

/// Closing block appended to every turn's prompt.
pub const CLOSING_INSTRUCTION: &str = "Please provide a detailed, thoughtful response based on your role, \
the knowledge provided, and the previous agent's reasoning. Build on their points, add your own insights, \
and use diagrams or pseudocode as appropriate. Do not repeat or echo the message above; respond with your \
own analysis.";

/// Header of the injected knowledge block.
pub const KNOWLEDGE_HEADER: &str = "Relevant knowledge from your knowledge base:";

/// Build the full prompt for one turn.
///
/// Blocks, in order: system prompt, the incoming message framed by its
/// sender (or as a user request), one bullet per knowledge document, and
/// [`CLOSING_INSTRUCTION`]. The knowledge block is omitted when `knowledge`
/// is empty.
pub fn compose_prompt(
    system_prompt: &str,
    message: &str,
    from: Option<&str>,
    knowledge: &[Document],
) -> String {
    let mut prompt = String::with_capacity(
        system_prompt.len() + message.len() + CLOSING_INSTRUCTION.len() + 64,
    );

    prompt.push_str(system_prompt);
    prompt.push_str("\n\n");

    match from {
        Some(sender) => prompt.push_str(&format!("Message from {sender}:\n{message}\n\n")),
        None => prompt.push_str(&format!("User request:\n{message}\n\n")),
    }

    if !knowledge.is_empty() {
        prompt.push_str(KNOWLEDGE_HEADER);
        prompt.push('\n');
        for doc in knowledge {
            prompt.push_str("- ");
            prompt.push_str(&doc.content);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str(CLOSING_INSTRUCTION);
    prompt
}
