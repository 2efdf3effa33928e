//! # Prompts
//!
//! Prompt templates sent to the summarization service and the renderer that fills them in.

/// A builder for rendering prompts with context.
pub struct PromptRenderer<'a> {
    template: &'a str,
    replacements: Vec<(&'a str, String)>,
}

impl<'a> PromptRenderer<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            template,
            replacements: Vec::new(),
        }
    }

    pub fn set(mut self, key: &'a str, value: impl Into<String>) -> Self {
        self.replacements.push((key, value.into()));
        self
    }

    pub fn render(self) -> String {
        let mut result = self.template.to_string();
        for (key, value) in self.replacements {
            result = result.replace(key, &value);
        }

        if let Some(start) = result.find("{{")
            && let Some(end) = result[start..].find("}}")
        {
            let placeholder = &result[start..start + end + 2];
            tracing::error!(
                "Summabies: [PROMPT RENDER ERROR] Unreplaced placeholder found in output: {}",
                placeholder
            );
        }

        result
    }
}

pub const SUMMARY_TEMPLATE: &str = include_str!("../../prompts/summary.md");

/// Builds the summarization prompt for one project.
/// `messages` is the already formatted, newline separated backlog.
pub fn summary_prompt(project: &str, messages: &str) -> String {
    // MESSAGES goes last so placeholder-looking text inside chat messages stays untouched.
    PromptRenderer::new(SUMMARY_TEMPLATE)
        .set("{{PROJECT}}", project)
        .set("{{MESSAGES}}", messages)
        .render()
}
