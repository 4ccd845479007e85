use crate::levels::LevelNames;

/// Instruction prompt for a three-level learning path.
///
/// The Markdown skeleton at the end is what `parser::extract` expects back.
pub fn build(skill: &str, levels: &LevelNames) -> String {
    let (basic, intermediate, advanced) = (levels.basic(), levels.intermediate(), levels.advanced());

    let mut prompt = format!(
        r#"Create a highly structured and detailed learning path for the skill: '{skill}'. Organize the path into three distinct levels: {basic}, {intermediate}, and {advanced}.

For each level, include:

1.  **Comprehensive Explanation**:
    *   **{basic}**: A basic paragraph (5-7 sentences)
    *   **{intermediate}**: A detailed paragraph (15-20 sentences)
    *   **{advanced}**: A comprehensive explanation (20-40 sentences)

2.  **Curated Resources**:
    *   Provide 4-6 *best* online resources. Prioritize *free* resources.
    *   Include variety:
        *   ▶️ **YouTube Videos/Courses**
        *   📝 **Blogs/Articles**
        *   📚 **Documentation/Tutorials**
        *   💻 **Practice Exercises/Projects**
        *   📖 **Books (Free/Paid)**
        *   🧪 **Interactive Tools**
    *   **Format EXACTLY as**: `[Emoji] [Type]: [Name] ([URL]) - [1-2 sentence description]`
        *   Ensure all URLs are **valid, complete and working**

3. **Estimated Time Commitment**:
    *   Provide specific time ranges
    *   Break down time between theory and practice

**Markdown Formatting**:
"#
    );

    for level in levels.iter() {
        prompt.push_str(&format!(
            r#"### {level}
- **Explanation:** [Extended detailed explanation]
- **Estimated Time:** [Specific time range with weekly commitment]
- **Resources:**
    [Emoji] [Type]: [Name] ([URL]) - [Description]

"#
        ));
    }

    prompt.push_str(&levels.prompt_suffix());
    prompt
}
