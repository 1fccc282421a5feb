//! Kernel facade
//!
//! Owns the arena and the application registry and hands out editor
//! windows. The console and GUI layers drive the core through this type
//! only, so every arena borrow stays inside one `&mut Kernel` call.

use armos_apps::{AppId, AppRecord, AppRegistry, Apps, RegistryResult};
use armos_editor::{AppendStatus, EditorResult, EditorWindow};
use armos_mem::{AllocResult, Arena, ArenaStats, Blob};

use crate::config::KernelConfig;
use crate::error::KernelResult;

/// Name of the application installed at boot
pub const HELLO_APP_NAME: &str = "HelloApp";

/// Code of the application installed at boot
pub const HELLO_APP_CODE: &str = "import sys\nprint('Hello from ARM64 OS!')";

/// Title of a "create app" editor session
pub const NEW_APP_TITLE: &str = "NewApp";

/// Initial content of a "create app" editor session
pub const NEW_APP_TEMPLATE: &str = "# Your Python code here\nprint('Hello World')";

pub struct Kernel {
    arena: Arena,
    apps: AppRegistry,
    config: KernelConfig,
}

impl Kernel {
    /// Build an empty kernel
    ///
    /// The configuration is validated before the arena is reserved.
    pub fn new(config: KernelConfig) -> KernelResult<Self> {
        config.validate()?;
        let arena = Arena::try_new(config.arena_capacity)?;

        Ok(Kernel {
            arena,
            apps: AppRegistry::with_config(config.registry),
            config,
        })
    }

    /// Build a kernel and install the default applications
    pub fn boot(config: KernelConfig) -> KernelResult<Self> {
        let mut kernel = Self::new(config)?;
        if config.seed_default_apps {
            kernel.install_default_apps()?;
        }

        #[cfg(feature = "debug-kernel")]
        log::debug!(
            "boot: arena {} bytes, registry capacity {}",
            kernel.arena.capacity(),
            kernel.apps.capacity()
        );
        log::info!("kernel loaded, {} apps installed", kernel.apps.len());
        Ok(kernel)
    }

    /// Install `HelloApp`
    pub fn install_default_apps(&mut self) -> RegistryResult<AppId> {
        self.create_app(HELLO_APP_NAME, HELLO_APP_CODE)
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.apps
    }

    /// Arena usage
    pub fn memory(&self) -> ArenaStats {
        self.arena.stats()
    }

    // ========== Arena ==========

    pub fn allocate(&mut self, size: usize) -> AllocResult<Blob> {
        self.arena.allocate(size)
    }

    /// Give a blob back; the space is not reused
    pub fn release(&mut self, blob: Blob) {
        self.arena.release(blob);
    }

    /// Bytes of a blob carved from the kernel arena
    pub fn bytes(&self, blob: &Blob) -> AllocResult<&[u8]> {
        self.arena.try_bytes(blob)
    }

    /// Fails with `ForeignBlob` for a blob from any other arena
    pub fn bytes_mut(&mut self, blob: &mut Blob) -> AllocResult<&mut [u8]> {
        self.arena.try_bytes_mut(blob)
    }

    // ========== Applications ==========

    pub fn create_app(
        &mut self,
        name: impl AsRef<[u8]>,
        code: impl AsRef<[u8]>,
    ) -> RegistryResult<AppId> {
        self.apps.create(&mut self.arena, name.as_ref(), code.as_ref())
    }

    /// Installed applications in insertion order
    pub fn apps(&self) -> Apps<'_> {
        self.apps.list()
    }

    pub fn app(&self, id: AppId) -> Option<&AppRecord> {
        self.apps.get(id)
    }

    /// First application named `name`
    pub fn find_app(&self, name: impl AsRef<[u8]>) -> Option<AppId> {
        self.apps.find(name.as_ref())
    }

    /// Code of an application, terminator excluded
    pub fn app_code(&self, id: AppId) -> Option<&[u8]> {
        self.apps.code(&self.arena, id)
    }

    // ========== Editor ==========

    /// Open an editor window with the configured capacity and policies
    pub fn open_editor(&mut self, title: impl AsRef<[u8]>) -> EditorResult<EditorWindow> {
        EditorWindow::with_config(&mut self.arena, title.as_ref(), &self.config.editor)
    }

    /// Open a "create app" session pre-filled with the code template
    ///
    /// A template that does not fit a small buffer is dropped under the
    /// default overflow policy; the window is returned empty.
    pub fn open_new_app_editor(&mut self) -> EditorResult<EditorWindow> {
        let mut window = self.open_editor(NEW_APP_TITLE)?;
        window.append(&mut self.arena, NEW_APP_TEMPLATE.as_bytes())?;
        Ok(window)
    }

    pub fn append(
        &mut self,
        window: &mut EditorWindow,
        text: impl AsRef<[u8]>,
    ) -> EditorResult<AppendStatus> {
        window.append(&mut self.arena, text.as_ref())
    }

    /// Current content of a window
    pub fn editor_text(&self, window: &EditorWindow) -> &[u8] {
        window.text(&self.arena)
    }

    pub fn clear_editor(&mut self, window: &mut EditorWindow) {
        window.clear(&mut self.arena);
    }

    /// Install the window's content as a new application
    pub fn save(
        &mut self,
        window: &EditorWindow,
        app_name: impl AsRef<[u8]>,
    ) -> RegistryResult<AppId> {
        window.save(&mut self.arena, &mut self.apps, app_name.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KernelError;
    use armos_apps::RegistryError;
    use armos_editor::EditorError;
    use armos_mem::AllocError;

    fn small() -> KernelConfig {
        KernelConfig::default().with_arena_capacity(16 * 1024)
    }

    #[test]
    fn test_boot_seeds_hello_app() {
        let kernel = Kernel::boot(small()).unwrap();
        assert_eq!(kernel.apps().len(), 1);

        let id = kernel.find_app(HELLO_APP_NAME).unwrap();
        assert_eq!(id.index(), 0);
        assert_eq!(kernel.app_code(id).unwrap(), HELLO_APP_CODE.as_bytes());
        assert_eq!(kernel.memory().used, HELLO_APP_CODE.len() + 1);
    }

    #[test]
    fn test_boot_without_default_apps() {
        let kernel = Kernel::boot(small().without_default_apps()).unwrap();
        assert!(kernel.registry().is_empty());
        assert_eq!(kernel.arena().watermark(), 0);
    }

    #[test]
    fn test_invalid_config_allocates_nothing() {
        let err = Kernel::new(small().with_max_apps(0)).err().unwrap();
        assert!(matches!(err, KernelError::InvalidConfig(_)));
    }

    #[test]
    fn test_boot_fails_when_seed_does_not_fit() {
        let err = Kernel::boot(KernelConfig::default().with_arena_capacity(8)).err().unwrap();
        assert_eq!(
            err,
            KernelError::Registry(RegistryError::OutOfMemory(AllocError::OutOfMemory {
                requested: HELLO_APP_CODE.len() + 1,
                available: 8,
            }))
        );
    }

    #[test]
    fn test_new_app_editor_template() {
        let mut kernel = Kernel::boot(small()).unwrap();
        let window = kernel.open_new_app_editor().unwrap();
        assert_eq!(window.title().as_bytes(), NEW_APP_TITLE.as_bytes());
        assert_eq!(kernel.editor_text(&window), NEW_APP_TEMPLATE.as_bytes());
    }

    #[test]
    fn test_new_app_editor_strict_overflow() {
        let config = small()
            .with_content_capacity(16)
            .with_overflow_policy(armos_editor::OverflowPolicy::Error);
        let mut kernel = Kernel::boot(config).unwrap();
        let err = kernel.open_new_app_editor().unwrap_err();
        assert_eq!(
            err,
            EditorError::ContentOverflow { needed: NEW_APP_TEMPLATE.len(), capacity: 16 }
        );
    }

    #[test]
    fn test_edit_and_save() {
        let mut kernel = Kernel::boot(small()).unwrap();
        let mut window = kernel.open_editor("Editor").unwrap();
        kernel.append(&mut window, "x = 1").unwrap();
        kernel.append(&mut window, "\nprint(x)").unwrap();

        let id = kernel.save(&window, "Counter").unwrap();
        assert_eq!(id.index(), 1);
        assert_eq!(kernel.app(id).unwrap().name().as_bytes(), b"Counter");
        assert_eq!(kernel.app_code(id).unwrap(), b"x = 1\nprint(x)");

        kernel.clear_editor(&mut window);
        assert!(kernel.editor_text(&window).is_empty());
        assert_eq!(kernel.app_code(id).unwrap(), b"x = 1\nprint(x)");
    }

    #[test]
    fn test_raw_allocation() {
        let mut kernel = Kernel::new(small()).unwrap();
        let mut blob = kernel.allocate(4).unwrap();
        kernel.bytes_mut(&mut blob).unwrap().copy_from_slice(b"abc\0");
        assert_eq!(kernel.bytes(&blob).unwrap(), b"abc\0");

        let before = kernel.memory();
        kernel.release(blob);
        assert_eq!(kernel.memory(), before);
    }

    #[test]
    fn test_foreign_blob_cannot_touch_apps() {
        let mut kernel = Kernel::boot(small()).unwrap();
        let mut other = Arena::new(64);
        let mut foreign = other.allocate(6).unwrap();

        let err = kernel.bytes_mut(&mut foreign).unwrap_err();
        assert_eq!(err, AllocError::ForeignBlob { owner: other.id(), arena: kernel.arena().id() });
        assert!(kernel.bytes(&foreign).is_err());

        let id = kernel.find_app(HELLO_APP_NAME).unwrap();
        assert_eq!(kernel.app_code(id).unwrap(), HELLO_APP_CODE.as_bytes());

        let err = KernelError::from(err);
        assert_eq!(err.to_errno(), -14);
    }
}
