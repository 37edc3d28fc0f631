// file_dialogs.rs
use rfd::FileDialog;
use std::path::{Path, PathBuf};

pub const SOURCE_FILE_TITLE: &str = "Choose a CR3 image to Convert to DNG";
pub const SOURCE_FOLDER_TITLE: &str = "Choose a Source Folder of CR3 Images to Transfer";
pub const DEST_FOLDER_TITLE: &str = "Please choose a folder";

/// Modal path pickers. `None` means the dialog was cancelled.
pub trait PathPicker {
    fn pick_source_file(&mut self, start_dir: Option<&Path>) -> Option<PathBuf>;
    fn pick_source_folder(&mut self, start_dir: Option<&Path>) -> Option<PathBuf>;
    fn pick_destination_folder(&mut self, start_dir: Option<&Path>) -> Option<PathBuf>;
}

/// Native dialogs through `rfd`.
pub struct NativePicker;

impl PathPicker for NativePicker {
    fn pick_source_file(&mut self, start_dir: Option<&Path>) -> Option<PathBuf> {
        with_start_dir(FileDialog::new(), start_dir)
            .set_title(SOURCE_FILE_TITLE)
            .add_filter("CR3", &["CR3", "cr3"])
            .add_filter("Any files", &["*"])
            .pick_file()
    }

    fn pick_source_folder(&mut self, start_dir: Option<&Path>) -> Option<PathBuf> {
        with_start_dir(FileDialog::new(), start_dir)
            .set_title(SOURCE_FOLDER_TITLE)
            .pick_folder()
    }

    fn pick_destination_folder(&mut self, start_dir: Option<&Path>) -> Option<PathBuf> {
        with_start_dir(FileDialog::new(), start_dir)
            .set_title(DEST_FOLDER_TITLE)
            .pick_folder()
    }
}

fn with_start_dir(dialog: FileDialog, start_dir: Option<&Path>) -> FileDialog {
    match start_dir {
        Some(dir) if dir.is_dir() => dialog.set_directory(dir),
        _ => dialog,
    }
}
