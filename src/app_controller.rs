use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::export::Exporter;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::{LlmClient, Provider};
use crate::session::{Session, SubtitleState};
use crate::transcript::model::Transcript;
use crate::transcript::source::{TrackList, TranscriptSource};
use crate::transcript::video_id::VideoReference;
use crate::transcript::youtube::YouTubeTranscripts;
use crate::transcript::resolver::SubtitleResolver;
use crate::transform::prompts::{PromptVariant, TransformKind};
use crate::transform::transformer::{ContentTransformer, TransformOutcome};

// @module: Application controller wiring resolver, transformer, export and session

/// Main application controller
#[derive(Debug)]
pub struct Controller<S: TranscriptSource = YouTubeTranscripts> {
    // @field: App configuration
    config: Config,
    // @field: Fallback-chain resolver over the transcript source
    resolver: SubtitleResolver<S>,
    // @field: Export target
    exporter: Exporter,
}

impl Controller<YouTubeTranscripts> {
    // @method: Create a controller backed by the YouTube client
    pub fn with_config(config: Config, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<Self> {
        let source = YouTubeTranscripts::new(Duration::from_secs(config.transcript_timeout_secs));
        Ok(Self::with_source(config, source, output_dir, force_overwrite))
    }
}

impl<S: TranscriptSource> Controller<S> {
    /// Create a controller over any transcript source
    pub fn with_source(config: Config, source: S, output_dir: Option<PathBuf>, force_overwrite: bool) -> Self {
        let output_dir = output_dir.unwrap_or_else(|| PathBuf::from(&config.output_dir));
        let resolver = SubtitleResolver::with_options(source, config.resolver.clone());
        Self {
            config,
            resolver,
            exporter: Exporter::new(output_dir, force_overwrite),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> &SubtitleResolver<S> {
        &self.resolver
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// Build the transformer for the configured provider.
    ///
    /// Fails before any request is made when the provider's API key is missing.
    pub fn build_transformer(&self, keep_jargon: bool) -> Result<ContentTransformer<LlmClient>> {
        let client = LlmClient::from_config(&self.config.llm)?;
        let variant = if keep_jargon {
            PromptVariant::KeepJargon
        } else {
            self.config.prompt_variant
        };

        info!(
            "Using {} model {} ({:?} prompts)",
            self.config.llm.provider.display_name(),
            self.config.llm.get_model(),
            variant
        );
        Ok(ContentTransformer::new(client, self.config.llm.get_model())
            .with_variant(variant)
            .with_max_tokens(self.config.llm.max_tokens))
    }

    /// Send a minimal request to the provider once, logging the result
    pub async fn check_provider<P: Provider>(&self, transformer: &ContentTransformer<P>) -> bool {
        match transformer.provider().test_connection(transformer.model()).await {
            Ok(()) => {
                debug!("Provider connection OK ({})", transformer.model());
                true
            }
            Err(e) => {
                warn!("Provider check failed, transformations may not work: {}", e);
                false
            }
        }
    }

    /// Resolve a URL, print its text and optionally export TXT and CSV
    pub async fn fetch(&self, url: &str, export: bool) -> Result<Transcript> {
        let video = VideoReference::parse(url).map_err(|e| anyhow!(e.user_message()))?;
        let transcript = self.resolve(&video).await?;

        println!("{}", transcript.text());

        if export {
            self.export_transcript(video.video_id(), &transcript)?;
        }
        Ok(transcript)
    }

    /// Resolve a URL and run each requested kind once.
    ///
    /// # Returns
    /// * `Result<Vec<(TransformKind, TransformOutcome)>>` - one outcome per kind in
    ///   request order; `Err` only when the subtitles could not be resolved
    pub async fn transform<P: Provider>(
        &self,
        transformer: &ContentTransformer<P>,
        url: &str,
        kinds: &[TransformKind],
        export: bool,
    ) -> Result<Vec<(TransformKind, TransformOutcome)>> {
        let video = VideoReference::parse(url).map_err(|e| anyhow!(e.user_message()))?;
        let transcript = self.resolve(&video).await?;
        let text = transcript.text();

        let mut outcomes = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let outcome = self.run_kind(transformer, &text, *kind).await;
            Self::print_outcome(*kind, &outcome);

            if export && outcome.is_success() {
                self.exporter.export_markdown(video.video_id(), *kind, outcome.text())?;
            }
            outcomes.push((*kind, outcome));
        }

        Ok(outcomes)
    }

    /// List and print every track of a video
    pub async fn tracks(&self, url: &str) -> Result<TrackList> {
        let tracks = self.resolver.list_tracks(url).await.map_err(|e| {
            error!("{}", e.user_message());
            anyhow!(e)
        })?;

        if tracks.is_empty() {
            warn!("No subtitle tracks found for {}", tracks.video_id);
            return Ok(tracks);
        }

        println!("Tracks for {}:", tracks.video_id);
        for track in tracks.iter() {
            let name = language_utils::get_language_name(&track.language_code)
                .unwrap_or_else(|_| track.language.clone());
            let kind = if track.is_generated { "generated" } else { "manual" };
            let translatable = if track.is_translatable() { "translatable" } else { "-" };
            println!("  {:<8} {:<10} {:<28} {}", track.language_code, kind, name, translatable);
        }
        Ok(tracks)
    }

    /// Run the interactive session loop until `q` or end of input.
    ///
    /// Transformations are disabled when no transformer is available; the rest
    /// of the session keeps working.
    pub async fn interactive<P: Provider, R: BufRead>(
        &self,
        transformer: Option<&ContentTransformer<P>>,
        mut input: R,
    ) -> Result<Session> {
        let mut session = Session::new();
        let mut awaiting_url = true;

        loop {
            if awaiting_url {
                let Some(line) = Self::prompt(&mut input, "YouTube URL (q to quit): ")? else { break };
                if line == "q" {
                    break;
                }
                if line.is_empty() {
                    continue;
                }

                let video = match VideoReference::parse(line.as_str()) {
                    Ok(video) => video,
                    Err(e) => {
                        error!("{}", e.user_message());
                        continue;
                    }
                };
                awaiting_url = false;

                session.set_video(video.clone());
                if session.transcript().is_none() {
                    match self.resolve(&video).await {
                        Ok(transcript) => session.set_transcript(transcript),
                        Err(e) => session.set_resolve_error(e.to_string()),
                    }
                }
                Self::show_session(&session);
                continue;
            }

            let Some(line) = Self::prompt(&mut input, "[s] 요약  [o] 정리  [t] 번역  [e] 내보내기  [u] 새 URL  [q] 종료: ")? else { break };
            match line.as_str() {
                "q" => break,
                "u" => awaiting_url = true,
                "e" => self.export_session(&session)?,
                "" => {}
                action => match action.parse::<TransformKind>() {
                    Ok(kind) => {
                        self.transform_in_session(&mut session, transformer, kind).await;
                        Self::show_session(&session);
                    }
                    Err(_) => warn!("Unknown action '{}'", action),
                },
            }
        }

        info!("Session closed");
        Ok(session)
    }

    async fn transform_in_session<P: Provider>(
        &self,
        session: &mut Session,
        transformer: Option<&ContentTransformer<P>>,
        kind: TransformKind,
    ) {
        let Some(transformer) = transformer else {
            error!("Transformations are unavailable: the LLM provider is not configured");
            return;
        };
        let Some(text) = session.transcript().map(|t| t.text()) else {
            warn!("No subtitles loaded, enter a URL first");
            return;
        };

        let outcome = self.run_kind(transformer, &text, kind).await;
        session.set_result(kind, outcome);
    }

    fn export_session(&self, session: &Session) -> Result<()> {
        let (Some(video), Some(transcript)) = (session.video(), session.transcript()) else {
            warn!("Nothing to export yet");
            return Ok(());
        };

        self.export_transcript(video.video_id(), transcript)?;
        for (kind, outcome) in session.shown_results() {
            if outcome.is_success() {
                self.exporter.export_markdown(video.video_id(), kind, outcome.text())?;
            }
        }
        Ok(())
    }

    async fn resolve(&self, video: &VideoReference) -> Result<Transcript> {
        let spinner = Self::spinner(format!("Fetching subtitles for {}", video));
        let result = self.resolver.resolve_id(video.video_id()).await;
        spinner.finish_and_clear();

        let transcript = result.map_err(|e| {
            error!("{}", e.user_message());
            anyhow!(e.user_message())
        })?;
        info!(
            "Loaded {} caption entries ({}, {})",
            transcript.len(),
            transcript.origin(),
            Self::format_duration(Duration::from_secs_f64(transcript.duration().max(0.0)))
        );
        Ok(transcript)
    }

    async fn run_kind<P: Provider>(&self, transformer: &ContentTransformer<P>, text: &str, kind: TransformKind) -> TransformOutcome {
        let spinner = Self::spinner(format!("Generating {}", kind.title()));
        let start = Instant::now();
        let outcome = transformer.transform_for_display(text, kind).await;
        spinner.finish_and_clear();
        debug!("'{}' finished in {}", kind, Self::format_duration(start.elapsed()));
        outcome
    }

    fn export_transcript(&self, video_id: &str, transcript: &Transcript) -> Result<()> {
        FileManager::ensure_dir(self.exporter.output_dir())
            .context("Failed to prepare output directory")?;
        self.exporter.export_text(video_id, transcript)?;
        self.exporter.export_csv(video_id, transcript)?;
        Ok(())
    }

    fn show_session(session: &Session) {
        match session.subtitles() {
            SubtitleState::Empty => {}
            SubtitleState::Loaded(transcript) => {
                println!("\n== 자막 ==\n{}\n", transcript.text());
            }
            SubtitleState::Failed(message) => println!("\n== 자막 ==\n{}\n", message),
        }
        for (kind, outcome) in session.shown_results() {
            Self::print_outcome(kind, outcome);
        }
    }

    fn print_outcome(kind: TransformKind, outcome: &TransformOutcome) {
        match outcome {
            TransformOutcome::Generated(text) => println!("\n== {} ==\n{}\n", kind.title(), text),
            TransformOutcome::Failed(message) => {
                error!("{} failed", kind.title());
                println!("\n== {} ==\n✗ {}\n", kind.title(), message);
            }
        }
    }

    fn prompt<R: BufRead>(input: &mut R, label: &str) -> Result<Option<String>> {
        print!("{}", label);
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn spinner(message: String) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    // @returns: Human readable duration
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
