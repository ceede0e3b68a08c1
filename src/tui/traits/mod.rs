//! Component trait system for TUI panels
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                        App                           │
//! │  (routes keys, owns focus, modal, toast, the Desk)   │
//! └──────────────────────────────────────────────────────┘
//!                            │
//!            ┌───────────────┼───────────────┐
//!            ▼               ▼               ▼
//!      ┌──────────┐   ┌───────────┐   ┌──────────┐
//!      │  Lookup  │   │ Directory │   │   Logs   │
//!      │  Panel   │   │   Panel   │   │  Panel   │
//!      └──────────┘   └───────────┘   └──────────┘
//! ```
//!
//! Every panel implements [`Component`]: an identity for focus checks and a
//! render that reads everything from a [`RenderContext`].

mod component;

pub use component::{Component, ComponentId, RenderContext};
