mod state;
mod ui;

use crate::config::AppConfig;
use crate::convert::{ConversionBackend, ConversionClient, SelectedFile};
use crate::error::{ConvertError, Result};
use crate::suggest::SuggestionClient;
use crate::workflow::Workflow;
use eframe::{egui, App};
pub use state::{Route, SuggestionBatch, UiState};
use std::path::PathBuf;
use std::sync::mpsc::{self as std_mpsc, TryRecvError};
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub struct FileConverter {
    config: AppConfig,
    workflow: Workflow,
    client: ConversionClient,
    suggester: SuggestionClient,
    state: UiState,
}

impl FileConverter {
    pub fn from_config(config: AppConfig) -> Result<Self> {
        info!("Initializing IntelliConvert against {}", config.server_url);
        Ok(Self {
            workflow: Workflow::from_config(&config),
            client: ConversionClient::new(&config)?,
            suggester: SuggestionClient::new(&config.suggestions),
            state: UiState::default(),
            config,
        })
    }

    pub fn select_path(&mut self, path: PathBuf) {
        self.state.notice = None;
        let file = match SelectedFile::from_path(&path) {
            Ok(file) => file,
            Err(e) => {
                warn!("Cannot use {}: {}", path.display(), e);
                self.state.notice = Some(e.to_string());
                return;
            }
        };

        match self.workflow.select(Some(file)) {
            Ok(generation) => self.request_suggestions(generation),
            Err(e) => debug!("Ignoring selection: {}", e),
        }
    }

    pub fn remove_file(&mut self) {
        self.state.notice = None;
        if let Err(e) = self.workflow.select(None) {
            debug!("Ignoring removal: {}", e);
        }
        self.state.suggestions = None;
    }

    pub fn choose_format(&mut self, format: &str) {
        if let Err(e) = self.workflow.set_output_format(format) {
            warn!("Format change rejected: {}", e);
        }
    }

    pub fn start_conversion(&mut self) {
        let submission = match self.workflow.begin_convert() {
            Ok(submission) => submission,
            Err(e) => {
                debug!("Conversion not started: {}", e);
                return;
            }
        };

        let (sender, receiver) = std_mpsc::channel();
        self.state.conversion = Some((submission.generation, receiver));
        let client = self.client.clone();

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(
                    client.submit(&submission.file, &submission.output_format),
                ),
                Err(e) => Err(ConvertError::Worker(e)),
            };
            sender.send(outcome).unwrap_or_default();
        });
    }

    fn request_suggestions(&mut self, generation: u64) {
        self.state.suggestions = None;
        if !self.suggester.is_available() {
            return;
        }
        let Some(selection) = self.workflow.selection() else {
            return;
        };

        let mime_type = selection.file().mime_type().to_string();
        let extension = selection.file().input_type().to_string();
        let suggester = self.suggester.clone();
        let (sender, receiver) = std_mpsc::channel();
        self.state.suggestions = Some(receiver);

        std::thread::spawn(move || {
            let formats = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(suggester.suggest(&mime_type, &extension)),
                Err(e) => {
                    error!("Could not start suggestion worker: {}", e);
                    Vec::new()
                }
            };
            sender
                .send(SuggestionBatch {
                    generation,
                    formats,
                })
                .unwrap_or_default();
        });
    }

    pub fn open_download(&mut self) {
        let Some(link) = self.workflow.download_url() else {
            return;
        };
        let url = match self.config.resolve(&link) {
            Ok(url) => url,
            Err(e) => {
                error!("Bad download link {}: {}", link, e);
                self.state.notice = Some(e.to_string());
                return;
            }
        };
        info!("Opening {}", url);
        if let Err(e) = open::that(url.as_str()) {
            error!("Could not open download link {}: {}", url, e);
            self.state.notice = Some(format!("Could not open the download link: {}", url));
        }
    }

    pub fn send_contact_message(&mut self) {
        let url = match self.state.contact.mailto(&self.config.contact_email) {
            Ok(url) => url,
            Err(e) => {
                error!("{}", e);
                self.state.notice = Some(e.to_string());
                return;
            }
        };
        if let Err(e) = open::that(url.as_str()) {
            error!("Could not open mail client: {}", e);
            self.state.notice = Some("Could not open your email client.".to_string());
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if let Some((generation, receiver)) = &self.state.conversion {
            let generation = *generation;
            match receiver.try_recv() {
                Ok(outcome) => {
                    self.workflow.finish(generation, outcome);
                    self.state.conversion = None;
                    ctx.request_repaint();
                }
                Err(TryRecvError::Disconnected) => {
                    warn!("Conversion worker exited without an outcome");
                    self.workflow.finish(generation, Err(ConvertError::WorkerLost));
                    self.state.conversion = None;
                }
                Err(TryRecvError::Empty) => {}
            }
        }

        if let Some(receiver) = &self.state.suggestions {
            match receiver.try_recv() {
                Ok(batch) => {
                    let added = self
                        .workflow
                        .apply_suggestions(batch.generation, &batch.formats);
                    if added > 0 {
                        info!("Added {} suggested format(s)", added);
                    }
                    self.state.suggestions = None;
                    ctx.request_repaint();
                }
                Err(TryRecvError::Disconnected) => self.state.suggestions = None,
                Err(TryRecvError::Empty) => {}
            }
        }

        if self.state.conversion.is_some() || self.state.suggestions.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if self.state.route == Route::Home && !self.workflow.status().is_uploading() {
            if let Some(path) = dropped.into_iter().find_map(|f| f.path) {
                self.select_path(path);
            }
        }
    }
}

impl App for FileConverter {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
