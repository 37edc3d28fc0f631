// app.rs
pub mod conversion;
pub mod file_dialogs;
pub mod gui;
pub mod launcher;

use crate::config::{self, Settings};
use crate::utils::ActivityLog;
use conversion::{ConversionCommand, Source};
use eframe::egui;
use eframe::App as EframeApp;
use file_dialogs::{NativePicker, PathPicker};
use launcher::{LaunchError, LaunchUpdate, ProcessLauncher, TerminalLauncher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

/// What the user has picked so far. Only the dialog handlers on [`App`] mutate it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub source_file: Option<PathBuf>,
    pub source_folder: Option<PathBuf>,
    /// Selects which of the two source fields is current; the other may be stale.
    pub convert_single_file: bool,
    pub dest_folder: PathBuf,
}

impl Selection {
    pub fn new(dest_folder: PathBuf) -> Self {
        Self {
            source_file: None,
            source_folder: None,
            convert_single_file: false,
            dest_folder,
        }
    }

    pub fn current_source(&self) -> Option<Source> {
        if self.convert_single_file {
            self.source_file.clone().map(Source::File)
        } else {
            self.source_folder.clone().map(Source::Folder)
        }
    }
}

/// Text of the named labels in the window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels {
    pub source: String,
    pub dest: String,
    pub command_output: String,
}

pub struct App {
    pub selection: Selection,
    pub labels: Labels,
    /// Turned on by either source handler and never turned off again.
    pub convert_enabled: bool,
    pub settings: Settings,
    pub log: ActivityLog,
    picker: Box<dyn PathPicker>,
    launcher: Box<dyn ProcessLauncher>,
    launch_receiver: Receiver<LaunchUpdate>,
    running_launches: usize,
}

impl App {
    pub fn new(settings: Settings, warnings: Vec<String>) -> Self {
        let (launcher, receiver) = TerminalLauncher::new(&settings);
        let app = Self::with_parts(settings, Box::new(NativePicker), Box::new(launcher), receiver);
        for warning in warnings {
            app.log.warn(warning);
        }
        app
    }

    pub fn with_parts(
        settings: Settings,
        picker: Box<dyn PathPicker>,
        launcher: Box<dyn ProcessLauncher>,
        launch_receiver: Receiver<LaunchUpdate>,
    ) -> Self {
        let selection = Selection::new(settings.initial_destination());
        let labels = Labels {
            source: String::from("No source selected"),
            dest: selection.dest_folder.display().to_string(),
            command_output: String::new(),
        };
        Self {
            selection,
            labels,
            convert_enabled: false,
            settings,
            log: ActivityLog::new(),
            picker,
            launcher,
            launch_receiver,
            running_launches: 0,
        }
    }

    pub fn choose_source_file(&mut self) {
        let start = self.source_start_dir();
        let Some(path) = self.picker.pick_source_file(start.as_deref()) else {
            return;
        };
        self.labels.source = format!("Source: {}", path.display());
        self.log.info(format!("Source file selected: {}", path.display()));
        self.selection.source_file = Some(path);
        self.selection.convert_single_file = true;
        self.convert_enabled = true;
    }

    pub fn choose_source_folder(&mut self) {
        let start = self.source_start_dir();
        let Some(path) = self.picker.pick_source_folder(start.as_deref()) else {
            return;
        };
        self.labels.source = path.display().to_string();
        self.log.info(format!("Source folder selected: {}", path.display()));
        self.selection.source_folder = Some(path);
        self.selection.convert_single_file = false;
        self.convert_enabled = true;
    }

    pub fn choose_destination_folder(&mut self) {
        let start = self.selection.dest_folder.clone();
        let Some(path) = self.picker.pick_destination_folder(Some(&start)) else {
            return;
        };
        self.labels.dest = path.display().to_string();
        self.log.info(format!("Folder selected: {}", path.display()));
        self.selection.dest_folder = path;
    }

    /// Builds the converter command from the current selection and hands it
    /// to the launcher. Success means the terminal started, not that the
    /// conversion worked.
    pub fn convert(&mut self) -> Result<u64, LaunchError> {
        let result = self.try_convert();
        if let Err(e) = &result {
            self.log.error(format!("Conversion not started: {}", e));
        }
        result
    }

    fn try_convert(&mut self) -> Result<u64, LaunchError> {
        if !self.convert_enabled {
            return Err(LaunchError::NoSource);
        }
        let source = self.selection.current_source().ok_or(LaunchError::NoSource)?;
        let command = ConversionCommand::build(
            &self.settings.converter,
            &source,
            &self.selection.dest_folder,
            &self.settings.options,
        )?;

        let line = command.display_line();
        self.labels.command_output = line.clone();
        let id = self.launcher.launch(&command)?;
        self.running_launches += 1;
        self.log.info(format!("[#{}] Launched: {}", id, line));
        Ok(id)
    }

    /// Drains exit reports from watcher threads. Returns true if any arrived.
    pub fn poll_launches(&mut self) -> bool {
        let mut received = false;
        while let Ok(update) = self.launch_receiver.try_recv() {
            received = true;
            self.running_launches = self.running_launches.saturating_sub(1);
            match update {
                LaunchUpdate::Exited { id, status } if status.success() => {
                    self.log.info(format!("[#{}] Terminal exited: {}", id, status));
                }
                LaunchUpdate::Exited { id, status } => {
                    self.log.warn(format!("[#{}] Terminal exited: {}", id, status));
                }
                LaunchUpdate::WaitFailed { id, error } => {
                    self.log.error(format!("[#{}] Lost track of terminal: {}", id, error));
                }
            }
        }
        received
    }

    pub fn running_launches(&self) -> usize {
        self.running_launches
    }

    pub fn save_settings(&mut self) {
        match config::save_settings(&self.settings) {
            Ok(path) => self.log.info(format!("Settings saved to {}", path.display())),
            Err(e) => self.log.error(format!("Saving settings failed: {}", e)),
        }
    }

    fn source_start_dir(&self) -> Option<PathBuf> {
        let source = match self.selection.current_source()? {
            Source::File(file) => file,
            Source::Folder(folder) => folder,
        };
        source.parent().map(Path::to_path_buf)
    }
}

impl EframeApp for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let needs_redraw = self.poll_launches();

        gui::render(self, ctx);

        if needs_redraw {
            ctx.request_repaint();
        }
        if self.running_launches > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }
    }
}
