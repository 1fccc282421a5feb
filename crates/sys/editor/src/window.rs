//! Editor windows
//!
//! One window per editing session: a title, cosmetic geometry and a content
//! buffer. Saving copies the content into a new application record; the
//! window keeps its text and is simply dropped when the session ends.

use armos_apps::{AppId, AppRegistry, BoundedName, RegistryResult, TruncatePolicy};
use armos_mem::Arena;

use crate::buffer::{AppendStatus, ContentBuffer, OverflowPolicy, DEFAULT_CONTENT_CAPACITY};
use crate::error::EditorResult;

/// Window position and size (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry { x: 10, y: 10, width: 800, height: 600 }
    }
}

/// Editor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Content capacity, terminator included
    pub content_capacity: usize,
    /// Handling of titles longer than 63 bytes
    pub title_policy: TruncatePolicy,
    /// Handling of appends that do not fit
    pub overflow: OverflowPolicy,
    /// Initial window geometry
    pub geometry: Geometry,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            content_capacity: DEFAULT_CONTENT_CAPACITY,
            title_policy: TruncatePolicy::Silent,
            overflow: OverflowPolicy::RejectWhole,
            geometry: Geometry::default(),
        }
    }
}

/// An editing session
#[derive(Debug)]
pub struct EditorWindow {
    title: BoundedName,
    geometry: Geometry,
    content: ContentBuffer,
}

impl EditorWindow {
    /// Open a window with the default configuration
    pub fn create(arena: &mut Arena, title: &[u8]) -> EditorResult<Self> {
        Self::with_config(arena, title, &EditorConfig::default())
    }

    /// Open a window
    ///
    /// Fails without building a window when the content store cannot be
    /// allocated.
    pub fn with_config(arena: &mut Arena, title: &[u8], config: &EditorConfig) -> EditorResult<Self> {
        let title = BoundedName::new(title, config.title_policy)?;
        let content = ContentBuffer::new(arena, config.content_capacity, config.overflow)?;
        log::debug!("editor: opened {} ({} bytes)", title, config.content_capacity);

        Ok(EditorWindow {
            title,
            geometry: config.geometry,
            content,
        })
    }

    pub fn title(&self) -> &BoundedName {
        &self.title
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    /// The content buffer
    pub fn buffer(&self) -> &ContentBuffer {
        &self.content
    }

    /// Content length in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Append text to the content
    pub fn append(&mut self, arena: &mut Arena, text: &[u8]) -> EditorResult<AppendStatus> {
        self.content.append(arena, text)
    }

    /// Current content, terminator excluded
    pub fn text<'a>(&self, arena: &'a Arena) -> &'a [u8] {
        self.content.content(arena)
    }

    /// Empty the content
    pub fn clear(&mut self, arena: &mut Arena) {
        self.content.clear(arena);
    }

    /// Install the content as a new application
    ///
    /// Returns whatever the registry returns. The window is left unchanged.
    pub fn save(
        &self,
        arena: &mut Arena,
        registry: &mut AppRegistry,
        app_name: &[u8],
    ) -> RegistryResult<AppId> {
        registry.create_from_blob(arena, app_name, self.content.blob(), self.content.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;
    use armos_apps::{NameError, RegistryError};
    use armos_mem::AllocError;

    #[test]
    fn test_create_defaults() {
        let mut arena = Arena::new(8192);
        let window = EditorWindow::create(&mut arena, b"W").unwrap();
        assert_eq!(window.title().as_bytes(), b"W");
        assert_eq!(window.geometry(), Geometry { x: 10, y: 10, width: 800, height: 600 });
        assert_eq!(window.buffer().capacity(), DEFAULT_CONTENT_CAPACITY);
        assert!(window.is_empty());
        assert_eq!(arena.watermark(), DEFAULT_CONTENT_CAPACITY);
    }

    #[test]
    fn test_append_hello() {
        let mut arena = Arena::new(8192);
        let mut window = EditorWindow::create(&mut arena, b"W").unwrap();
        window.append(&mut arena, b"hello").unwrap();
        assert_eq!(window.len(), 5);
        assert_eq!(window.text(&arena), b"hello");
    }

    #[test]
    fn test_title_truncated() {
        let mut arena = Arena::new(8192);
        let window = EditorWindow::create(&mut arena, &[b'T'; 80]).unwrap();
        assert_eq!(window.title().len(), 63);
    }

    #[test]
    fn test_title_rejected_before_allocation() {
        let mut arena = Arena::new(8192);
        let config = EditorConfig { title_policy: TruncatePolicy::Reject, ..EditorConfig::default() };
        let err = EditorWindow::with_config(&mut arena, &[b'T'; 80], &config).unwrap_err();
        assert_eq!(err, EditorError::Title(NameError::TooLong { len: 80, max: 63 }));
        assert_eq!(arena.watermark(), 0);
    }

    #[test]
    fn test_out_of_memory_returns_no_window() {
        let mut arena = Arena::new(1024);
        let err = EditorWindow::create(&mut arena, b"W").unwrap_err();
        assert_eq!(
            err,
            EditorError::OutOfMemory(AllocError::OutOfMemory { requested: 4096, available: 1024 })
        );
    }

    #[test]
    fn test_save_round_trip() {
        let mut arena = Arena::new(8192);
        let mut apps = AppRegistry::new();
        let mut window = EditorWindow::create(&mut arena, b"Editor").unwrap();

        let code = b"import sys\nprint('saved')";
        window.append(&mut arena, code).unwrap();
        let id = window.save(&mut arena, &mut apps, b"Saved").unwrap();

        let record = apps.get(id).unwrap();
        assert_eq!(record.name().as_bytes(), b"Saved");
        assert_eq!(record.code_len(), code.len());
        assert_eq!(apps.code(&arena, id).unwrap(), &code[..]);

        // Buffer untouched by save
        assert_eq!(window.text(&arena), &code[..]);
    }

    #[test]
    fn test_save_twice_makes_two_records() {
        let mut arena = Arena::new(8192);
        let mut apps = AppRegistry::new();
        let mut window = EditorWindow::create(&mut arena, b"Editor").unwrap();
        window.append(&mut arena, b"x = 1").unwrap();

        let first = window.save(&mut arena, &mut apps, b"one").unwrap();
        window.append(&mut arena, b"\ny = 2").unwrap();
        let second = window.save(&mut arena, &mut apps, b"two").unwrap();

        assert_eq!(apps.code(&arena, first).unwrap(), b"x = 1");
        assert_eq!(apps.code(&arena, second).unwrap(), b"x = 1\ny = 2");
    }

    #[test]
    fn test_save_propagates_registry_error() {
        let mut arena = Arena::new(4096 + 4);
        let mut apps = AppRegistry::new();
        let mut window = EditorWindow::create(&mut arena, b"Editor").unwrap();
        window.append(&mut arena, b"too long").unwrap();

        let err = window.save(&mut arena, &mut apps, b"app").unwrap_err();
        assert_eq!(
            err,
            RegistryError::OutOfMemory(AllocError::OutOfMemory { requested: 9, available: 4 })
        );
        assert!(apps.is_empty());
    }
}
