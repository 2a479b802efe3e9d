//! Validation and auto-repair pipeline for LLM-generated Storybook stories.
//!
//! The crate takes raw model output (usually a fenced TSX block, often
//! truncated or using components that do not exist) and coerces it into a
//! loadable story module:
//!
//! - [`extract_code_block`] pulls the code region out of a chat reply;
//! - [`validate_syntax`] parses it with tree-sitter and reports located
//!   [`Diagnostic`]s (plus "JSX without runtime import");
//! - [`repair`] runs the ordered text repair passes gated on those diagnostics;
//! - [`validate_imports`] checks named imports from the design-system path
//!   against a borrowed [`ComponentInventory`];
//! - [`Validator::validate`] ties everything into one [`ValidationVerdict`];
//! - [`synthesize_fallback`] renders a placeholder story when nothing else works.
//!
//! Everything here is synchronous and free of I/O apart from the optional
//! inventory file loader. Failures are reported through verdicts and
//! diagnostics, never through panics.
//!
//! # Example
//! ```
//! use story_validator::{ComponentInventory, validate};
//!
//! let inventory = ComponentInventory::from_names("@mantine/core", ["Button", "Card"]);
//! let verdict = validate("<Button>Click</Button>", &inventory, "@mantine/core", 1);
//! assert!(verdict.is_valid);
//! assert!(verdict.fixed_code.unwrap().starts_with("import React from 'react';"));
//! ```

pub mod config;
pub mod errors;
pub mod extract;
pub mod fallback;
pub mod imports;
pub mod inventory;
pub mod orchestrator;
pub mod repair;
pub mod syntax;
pub mod types;

pub use config::{BlacklistConfig, RuntimeImport, SuggestionAlias, ValidatorConfig};
pub use errors::{Result, ValidatorError};
pub use extract::extract_code_block;
pub use fallback::{Framework, synthesize_fallback};
pub use imports::validate_imports;
pub use inventory::{ComponentInfo, ComponentInventory};
pub use orchestrator::{Validator, validate};
pub use repair::{RepairEngine, RepairReport, repair};
pub use syntax::validate_syntax;
pub use types::{Diagnostic, FileKind, Severity, ValidationVerdict};
