//! Public entry for the story generation pipeline.
//!
//! Single high-level function, [`generate_story`], turns a natural-language
//! prompt into a loadable story module:
//!
//! 1) **Step 1 - Prompt**
//!    - System message naming the framework, the design-system import path
//!      and the components available from the inventory
//!    - User message carrying the request prompt
//!
//! 2) **Step 2 - Completion + extraction**
//!    - Call the configured LLM (`ai-llm-service`)
//!    - Pull the code block out of the reply (`story_validator::extract_code_block`)
//!
//! 3) **Step 3 - Validation**
//!    - Syntax check, bounded auto-repair and import check (`story_validator::Validator`)
//!    - On failure: append the reply and a corrective message, go back to step 2
//!
//! 4) **Step 4 - Fallback**
//!    - When every attempt fails, synthesize a placeholder story so the caller
//!      always gets something Storybook can load
//!
//! Like the rest of the workspace the driver is generic over the chat
//! capability (plain `async fn` in traits, no `Box<dyn ...>`), so tests swap
//! in a scripted fake.

pub mod config;
pub mod driver;
pub mod errors;
pub mod prompt;
pub mod title;

pub use config::GeneratorConfig;
pub use driver::{GeneratedStory, GenerationRequest, generate_story};
pub use errors::{GeneratorError, Result};
pub use title::derive_title;
