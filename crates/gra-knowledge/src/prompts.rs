//! Prompt templates for answering queries over retrieved context.
//!
//! `generate_response` returns a canned reply per template. When an external
//! LLM is configured, the gateway sends [`PromptManager::build_prompt`] to it
//! instead.

use std::fmt::Write as _;

use crate::document::RetrievedContext;

/// Available response templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Default,
    Analytical,
    Creative,
    Technical,
    Summarization,
}

impl Template {
    pub const ALL: [Template; 5] = [
        Template::Default,
        Template::Analytical,
        Template::Creative,
        Template::Technical,
        Template::Summarization,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Template::Default => "default",
            Template::Analytical => "analytical",
            Template::Creative => "creative",
            Template::Technical => "technical",
            Template::Summarization => "summarization",
        }
    }

    /// Parse a template name; unknown names fall back to `Default`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .unwrap_or(Template::Default)
    }

    fn header(self) -> &'static str {
        match self {
            Template::Default => {
                "Based on the following context, please answer the user's question accurately and helpfully."
            }
            Template::Analytical => {
                "Analyze the following information and provide a structured, data-driven response to the user's question."
            }
            Template::Creative => {
                "Using the provided context as inspiration, generate creative and innovative responses to the user's request."
            }
            Template::Technical => {
                "Provide a detailed technical response based on the following documentation and context."
            }
            Template::Summarization => {
                "Summarize the following information in response to the user's request."
            }
        }
    }

    fn context_label(self) -> &'static str {
        match self {
            Template::Default => "Context",
            Template::Analytical => "Context for Analysis",
            Template::Creative => "Inspirational Context",
            Template::Technical => "Technical Documentation",
            Template::Summarization => "Information to Summarize",
        }
    }

    fn query_label(self) -> &'static str {
        match self {
            Template::Default => "User Question",
            Template::Analytical => "Question to Analyze",
            Template::Creative => "Creative Challenge",
            Template::Technical => "Technical Query",
            Template::Summarization => "Summarization Request",
        }
    }

    fn instructions(self) -> &'static str {
        match self {
            Template::Default => {
                "Please provide a clear, accurate response based on the available context. If the context doesn't contain enough information to fully answer the question, please indicate what information is missing."
            }
            Template::Analytical => {
                "Please provide:\n1. Key findings from the available data\n2. Relevant patterns or trends\n3. Limitations of the current information\n4. Actionable insights or recommendations"
            }
            Template::Creative => {
                "Please provide multiple creative approaches, considering:\n- Novel combinations of existing ideas\n- Alternative perspectives\n- Innovative solutions\n- Creative applications"
            }
            Template::Technical => {
                "Please include:\n- Step-by-step implementation details\n- Code examples where applicable\n- Best practices and considerations\n- Potential challenges and solutions\n- Performance implications"
            }
            Template::Summarization => {
                "Please provide:\n- Key points and main themes\n- Important details and facts\n- Concise overview\n- Relevant conclusions"
            }
        }
    }

    fn simulated_reply(self) -> &'static str {
        match self {
            Template::Default => {
                "Based on the provided context, I can help answer your question. This is a simulated response that would normally be generated by a language model using the formatted prompt and context."
            }
            Template::Analytical => {
                "Analysis shows several key patterns in the data. The main findings indicate... [This would be a detailed analytical response based on the context]"
            }
            Template::Creative => {
                "Here are several creative approaches to consider: 1) Novel combination approach... 2) Alternative perspective... 3) Innovative solution... [Creative ideas would be generated here]"
            }
            Template::Technical => {
                "Technical implementation details: Step 1: Initialize the system... Step 2: Configure parameters... [Detailed technical guidance would be provided]"
            }
            Template::Summarization => {
                "Summary of key points: • Main theme 1... • Important detail 2... • Conclusion... [Concise summary would be generated]"
            }
        }
    }
}

/// Builds prompts from retrieved context and produces templated replies.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptManager;

impl PromptManager {
    pub fn new() -> Self {
        Self
    }

    pub fn available_templates(&self) -> Vec<&'static str> {
        Template::ALL.iter().map(|t| t.name()).collect()
    }

    /// Render context as `[Context i] (Source: s)` blocks.
    pub fn format_context(&self, context: &[RetrievedContext]) -> String {
        if context.is_empty() {
            return "No relevant context found.".to_string();
        }
        context
            .iter()
            .enumerate()
            .map(|(i, doc)| format!("[Context {}] (Source: {})\n{}", i + 1, doc.source(), doc.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Full prompt text for a template.
    pub fn build_prompt(
        &self,
        template: Template,
        query: &str,
        context: &[RetrievedContext],
        additional_context: Option<&str>,
    ) -> String {
        let mut prompt = String::new();
        let _ = writeln!(prompt, "{}\n", template.header());
        let _ = writeln!(prompt, "{}:\n{}\n", template.context_label(), self.format_context(context));
        match additional_context {
            Some(extra) if !extra.is_empty() => {
                let _ = writeln!(prompt, "Additional Context: {extra}\n");
            }
            _ => prompt.push('\n'),
        }
        let _ = writeln!(prompt, "{}: {}\n", template.query_label(), query);
        prompt.push_str(template.instructions());
        prompt
    }

    /// Templated reply for `query`. The prompt is built so the log shows what
    /// an LLM would have been sent.
    pub fn generate_response(
        &self,
        template: Template,
        query: &str,
        context: &[RetrievedContext],
        additional_context: Option<&str>,
    ) -> String {
        let prompt = self.build_prompt(template, query, context, additional_context);
        tracing::debug!(template = template.name(), prompt_len = prompt.len(), "built prompt");
        template.simulated_reply().to_string()
    }
}
