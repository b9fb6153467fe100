//! Intake directory watching and event dispatch.
//!
//! One `FolderWatcher` owns the known-file registry and the notify
//! subscription. Raw events are funneled into a tokio channel and handled one
//! at a time on the dispatch task; each accepted file gets its own spawned
//! processing task, so a slow print or move never blocks dispatch.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use notify::{Event, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::archive::Archiver;
use crate::config::Config;
use crate::extract::ContentExtractor;
use crate::pipeline;
use crate::printer::PrintService;

pub struct FolderWatcher {
    config: Arc<Config>,
    extractor: Arc<ContentExtractor>,
    printer: Arc<PrintService>,
    archiver: Arc<Archiver>,
    /// Filenames already seen in the watch directory. Names are never
    /// removed, so a file re-created under a processed name is ignored for
    /// the rest of the process lifetime.
    known_files: HashSet<String>,
    initialized: bool,
    /// Channel receiver for raw file events.
    event_rx: mpsc::Receiver<notify::Result<Event>>,
    /// The actual file watcher (kept alive by storing it).
    watcher: notify::RecommendedWatcher,
}

impl FolderWatcher {
    pub fn new(config: Config) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel(100);

        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.blocking_send(res);
        })?;

        let config = Arc::new(config);
        Ok(Self {
            extractor: Arc::new(ContentExtractor::new()),
            printer: Arc::new(PrintService::new(
                config.printing.printer.clone(),
                config.timing.spool_grace(),
            )),
            archiver: Arc::new(Archiver::new(config.intake.archive_dir.clone())),
            known_files: HashSet::new(),
            initialized: false,
            event_rx: rx,
            watcher,
            config,
        })
    }

    /// Seed the known-file registry from the current directory contents,
    /// creating the watch directory when missing. Subdirectories are not
    /// recorded. Until this succeeds, every incoming event is discarded.
    pub fn initialize(&mut self) -> std::io::Result<()> {
        let watch_dir = &self.config.intake.watch_dir;
        fs::create_dir_all(watch_dir)?;

        for entry in fs::read_dir(watch_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    self.known_files.insert(name);
                }
            }
        }

        self.initialized = true;
        info!(
            "Watching {} ({} existing files recorded)",
            watch_dir.display(),
            self.known_files.len()
        );
        Ok(())
    }

    /// Run the dispatch loop until interrupted. In-flight pipelines are not
    /// awaited on shutdown.
    pub async fn run(&mut self) -> Result<(), notify::Error> {
        self.watcher
            .watch(&self.config.intake.watch_dir, RecursiveMode::NonRecursive)?;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                Some(res) = self.event_rx.recv() => match res {
                    Ok(event) => self.handle_event(event),
                    Err(e) => error!("Watch error: {e}"),
                },
                _ = &mut ctrl_c => {
                    info!("Interrupt received, shutting down");
                    break;
                }
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        for path in event.paths {
            self.consider(path);
        }
    }

    /// Gate one notification path into the processing pipeline. Returns the
    /// spawned task for an accepted file, `None` for everything filtered out.
    fn consider(&mut self, path: PathBuf) -> Option<JoinHandle<()>> {
        if !self.initialized {
            return None;
        }

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return None,
        };

        // The entry may already be gone by the time the notification lands.
        let Ok(metadata) = fs::metadata(&path) else {
            return None;
        };
        if !metadata.is_file() {
            return None;
        }

        if self.known_files.contains(&file_name) {
            debug!("{file_name} already known, skipping");
            return None;
        }

        // Recorded before the pipeline starts, so further notifications for
        // the same name cannot enter the pipeline again.
        self.known_files.insert(file_name.clone());
        info!("New file detected: {file_name}");

        let config = Arc::clone(&self.config);
        let extractor = Arc::clone(&self.extractor);
        let printer = Arc::clone(&self.printer);
        let archiver = Arc::clone(&self.archiver);
        Some(tokio::spawn(async move {
            pipeline::process_file(&config, &extractor, &printer, &archiver, &path, &file_name)
                .await;
        }))
    }
}
