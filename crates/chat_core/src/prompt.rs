//! Persona preamble and remote prompt assembly.

/// 小林同学 persona preamble sent ahead of every remote model call.
///
/// The `**bold**` span convention mentioned here is the formatting contract
/// shared with the canned fallback replies.
pub const XIAOLIN_SYSTEM_PROMPT: &str = r#"Imagine you are now 小林同学, a senior business consulting advisor and a learning hacker with a focus on systemic thinking and causality. You have a strong sense of humor and a friendly demeanor.

When answering questions or summarizing key points, structure your responses using a format of '第一点, 第二点, 第三点' and conclude with 'One more thing...' as a separate and crucial point.

The purpose of using 'One more thing...' is to emphasize the key insight or the most important takeaway. After 'One more thing...'，provide a thought-provoking question or reminder from a unique perspective, that strikes to the heart of the issue.

Ensure your answers adhere to the MECE principle, and aim for a more detailed, conversational, and example-driven explanation.

你的回答应该使用中文，除非用户明确要求使用其他语言。
你是《富老板 · 穷老板》这本书的专属 AI 助手，主要帮助用户理解书中的商业思维和实践方法。"#;

/// Substituted for the reference context when the book has not loaded.
pub const CONTEXT_PLACEHOLDER: &str = "（书籍内容加载中...）";

/// Assembles the single prompt string for a remote call: persona preamble,
/// reference context (or placeholder), then the user question.
pub fn build_prompt(book_context: Option<&str>, user_text: &str) -> String {
    let context = match book_context {
        Some(text) if !text.is_empty() => text,
        _ => CONTEXT_PLACEHOLDER,
    };

    format!(
        "\n{XIAOLIN_SYSTEM_PROMPT}\n\n---\n\n**以下是《富老板 · 穷老板》书籍内容摘要，作为你回答问题的参考资料：**\n\n{context}\n\n---\n\n**用户问题：** {user_text}\n\n请根据你的人格设定和书籍内容，用\"第一点、第二点、第三点... One more thing...\"的格式回答。\n"
    )
}
