//! ARMOS Editor Buffers
//!
//! Backing store for "create app" editing sessions:
//! - A bounded, append-only content buffer carved from the kernel arena
//! - An editor window wrapping it with a title and display geometry
//! - Saving a window into the application registry
//!
//! Rendering the window is left to the console layer; this crate only keeps
//! the bytes.
//!
//! # Example
//!
//! ```rust,ignore
//! use armos_editor::EditorWindow;
//!
//! let mut window = EditorWindow::create(&mut arena, b"NewApp")?;
//! window.append(&mut arena, b"print('Hello World')")?;
//! let id = window.save(&mut arena, &mut apps, b"Hello")?;
//! ```

#![no_std]

extern crate alloc;

mod buffer;
mod error;
mod window;

pub use buffer::{AppendStatus, ContentBuffer, OverflowPolicy, DEFAULT_CONTENT_CAPACITY};
pub use error::{EditorError, EditorResult};
pub use window::{EditorConfig, EditorWindow, Geometry};
