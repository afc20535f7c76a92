// src/file/picker.rs
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use rfd::FileDialog;

use crate::config::PickerSettings;
use crate::error::{panic_message, PickerError};
use crate::file::FileFilter;

/// Host capability for choosing a single file.
///
/// `Ok(None)` means the user dismissed the dialog.
pub trait FilePicker {
    fn pick_file(&self, filter: &FileFilter) -> Result<Option<PathBuf>, PickerError>;

    fn is_available(&self) -> bool {
        true
    }
}

/// Native dialog backed by `rfd`.
#[derive(Debug, Clone)]
pub struct NativePicker {
    title: String,
}

impl NativePicker {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl FilePicker for NativePicker {
    fn pick_file(&self, filter: &FileFilter) -> Result<Option<PathBuf>, PickerError> {
        let dialog = FileDialog::new()
            .set_title(&self.title)
            .add_filter(filter.name.as_str(), filter.extensions.as_slice());

        guard_dialog(move || dialog.pick_file())
    }
}

/// Runs a dialog call, reporting a panic as `PickerError::Invocation`.
/// rfd has no error channel; a failing platform backend shows up as a panic.
fn guard_dialog<F>(show: F) -> Result<Option<PathBuf>, PickerError>
where
    F: FnOnce() -> Option<PathBuf>,
{
    panic::catch_unwind(AssertUnwindSafe(show))
        .map_err(|payload| PickerError::Invocation(panic_message(payload.as_ref())))
}

/// Null object used when no dialog can be shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailablePicker;

impl FilePicker for UnavailablePicker {
    fn pick_file(&self, _filter: &FileFilter) -> Result<Option<PathBuf>, PickerError> {
        Err(PickerError::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Chooses the picker implementation once at startup.
pub fn detect_picker(settings: &PickerSettings) -> Box<dyn FilePicker> {
    if !settings.enabled {
        tracing::warn!("file dialog disabled by settings, only manual input is available");
        return Box::new(UnavailablePicker);
    }

    if !display_available() {
        tracing::warn!("no display server found, file dialog unavailable");
        return Box::new(UnavailablePicker);
    }

    Box::new(NativePicker::new(settings.title.clone()))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn display_available() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|value| !value.is_empty()))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn display_available() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_picker_reports_unavailable() {
        let picker = UnavailablePicker;
        let filter = PickerSettings::default().filter();
        assert_eq!(picker.pick_file(&filter), Err(PickerError::Unavailable));
        assert!(!picker.is_available());
    }

    #[test]
    fn dialog_panic_becomes_invocation_error() {
        let outcome = guard_dialog(|| panic!("xdg portal not running"));
        assert_eq!(
            outcome,
            Err(PickerError::Invocation("xdg portal not running".to_string()))
        );
    }

    #[test]
    fn dialog_result_passes_through() {
        assert_eq!(
            guard_dialog(|| Some(PathBuf::from("/tmp/jan.csv"))),
            Ok(Some(PathBuf::from("/tmp/jan.csv")))
        );
        assert_eq!(guard_dialog(|| None), Ok(None));
    }

    #[test]
    fn disabled_settings_yield_null_picker() {
        let settings = PickerSettings {
            enabled: false,
            ..PickerSettings::default()
        };
        assert!(!detect_picker(&settings).is_available());
    }
}
