//! Google Gemini REST client library.
//!
//! Wraps the generative-language HTTP API (text generation and text
//! embedding) using [`reqwest`], with per-request timeouts and a small
//! retry budget for transient failures.

pub mod client;

pub use client::{GeminiClient, GeminiError};
