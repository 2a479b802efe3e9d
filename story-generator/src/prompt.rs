//! Fixed chat messages for generation and correction.
//!
//! Kept deliberately small: the validator, not the prompt, is what makes the
//! output loadable.

use ai_llm_service::ChatMessage;
use story_validator::{ComponentInventory, Framework};

/// Upper bound on component names spelled out in the system message.
pub const MAX_PROMPT_COMPONENTS: usize = 200;

/// System message: framework, import path and the real component names.
pub fn system_message(framework: Framework, primary_import_path: &str, inventory: &ComponentInventory) -> ChatMessage {
    let mut s = String::new();
    s.push_str(&format!(
        "You write Storybook stories for {framework} using CSF 3 (`{}`).\n",
        framework.storybook_package()
    ));
    s.push_str("Reply with exactly one ```tsx code block containing the complete story file.\n");
    s.push_str("The file must have a default export (meta) and at least one named story export.\n");
    if framework.uses_jsx() {
        s.push_str("Import React from 'react'.\n");
    }

    let names: Vec<&str> = inventory.names().take(MAX_PROMPT_COMPONENTS).collect();
    if names.is_empty() {
        s.push_str(&format!("Import UI components only from `{primary_import_path}`.\n"));
    } else {
        s.push_str(&format!(
            "Import UI components only from `{primary_import_path}`. Available components: {}.\n",
            names.join(", ")
        ));
        s.push_str("Do not import any other name from that path.\n");
    }
    ChatMessage::system(s)
}

/// Follow-up user message after a reply failed validation.
pub fn corrective_message(errors: &[String]) -> ChatMessage {
    let mut s = String::from("The story you returned is invalid:\n");
    for e in errors {
        s.push_str("- ");
        s.push_str(e);
        s.push('\n');
    }
    s.push_str("Fix these problems and reply with the complete corrected story in one ```tsx code block.");
    ChatMessage::user(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::ChatRole;

    #[test]
    fn system_message_lists_components() {
        let inv = ComponentInventory::from_names("@mantine/core", ["Button", "Card"]);
        let m = system_message(Framework::React, "@mantine/core", &inv);
        assert_eq!(m.role, ChatRole::System);
        assert!(m.content.contains("Available components: Button, Card."));
        assert!(m.content.contains("@storybook/react"));
        assert!(m.content.contains("Import React from 'react'."));
    }

    #[test]
    fn system_message_without_inventory() {
        let m = system_message(Framework::Vue, "@acme/ui", &ComponentInventory::default());
        assert!(m.content.contains("only from `@acme/ui`."));
        assert!(!m.content.contains("Available components"));
        assert!(!m.content.contains("React"));
    }

    #[test]
    fn corrective_message_lists_errors() {
        let m = corrective_message(&["Line 2:10: `Heading` is not available".into()]);
        assert_eq!(m.role, ChatRole::User);
        assert!(m.content.contains("- Line 2:10: `Heading` is not available\n"));
    }
}
