//! # cw-generator
//!
//! LLM-backed crossword clue generation.
//!
//! Turns a [`cw_core::Query`] into one Gemini `generateContent` call and the
//! reply into a [`cw_core::GenerationResult`], or into one of a fixed set of
//! user-facing failures.
//!
//! # Usage
//!
//! ```bash
//! # One-shot
//! GEMINI_API_KEY=... cargo run -p cw-generator -- --word بحر --count 5 --difficulty hard
//!
//! # Interactive
//! GEMINI_API_KEY=... cargo run -p cw-generator
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Query     │ ──> │   Prompt    │ ──> │   Gemini    │
//! │             │     │  + Schema   │     │     API     │
//! └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                │
//!                     ┌──────────────────────────┘
//!                     ▼
//!              ┌─────────────┐
//!              │  Response   │ ── parse ──> GenerationResult
//!              │  Handler    │ ── classify ──> GenerationError
//!              └─────────────┘
//! ```

pub mod client;
pub mod clipboard;
pub mod credentials;
pub mod generator;
pub mod handler;
pub mod input;
pub mod prompt;
pub mod render;
pub mod session;

pub use client::{ClientError, GeminiClient, GeminiConfig};
pub use clipboard::{Clipboard, ClipboardCommand, ClipboardError, CommandClipboard, MemoryClipboard};
pub use credentials::{CredentialSource, EnvCredentials, StaticCredentials, API_KEY_ENV};
pub use generator::ClueGenerator;
pub use handler::{classify_transport_error, parse_payload};
pub use input::{parse_line, Input, InputError};
pub use prompt::{PromptBuilder, RESULT_FIELDS};
pub use render::{render, render_form};
pub use session::Session;
