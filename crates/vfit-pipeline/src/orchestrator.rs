//! Pipeline orchestrator.
//!
//! Drives one analysis run through the state machine: probe, concurrent
//! audio/scene extraction, frame sampling, emotion classification, the
//! four pure scorers, platform fit and suggestions. All intermediate
//! artifacts live in a [`RunWorkspace`] owned by the run; its `Drop`
//! removes them on every exit path, including the fatal ones.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use vfit_engine::{
    aggregate_fit, derive_stats, score_emotion, score_hook, score_pacing, score_structure,
    EngineConfig, FitInputs, PlatformClass,
};
use vfit_media::{detect_scenes, extract_audio, probe_video, sample_frames, FaceEngine, RunWorkspace};
use vfit_models::{
    ActionSuggestions, AnalysisReport, AudioStats, AudioTranscript, EmotionFrame, EmotionScore,
    EmotionSummary, HookScore, MediaInfo, PacingScore, PlatformFit, StructureScore,
};
use vfit_services::{FeatureSummary, SuggestionService, TranscriptionService};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::logging::RunLogger;
use crate::state::PipelineState;

/// One-run analysis pipeline.
///
/// Service implementations are chosen at construction time; the run
/// logic never branches on live versus fixture.
pub struct Pipeline {
    config: PipelineConfig,
    engine: EngineConfig,
    face_engine: FaceEngine,
    transcription: Box<dyn TranscriptionService>,
    suggestions: Box<dyn SuggestionService>,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        face_engine: FaceEngine,
        transcription: Box<dyn TranscriptionService>,
        suggestions: Box<dyn SuggestionService>,
    ) -> Self {
        Self {
            config,
            engine: EngineConfig::default(),
            face_engine,
            transcription,
            suggestions,
        }
    }

    /// Override the scoring constants.
    pub fn with_engine_config(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Analyze one video file and produce the full report.
    ///
    /// Fails only when the video is unreadable or frame sampling
    /// produces nothing; every other modality failure is recorded in
    /// `degraded_signals` and the run completes.
    pub async fn analyze(&self, video: &Path) -> PipelineResult<AnalysisReport> {
        let logger = RunLogger::new(&new_run_id());
        logger.log_start(&format!("analyzing {}", video.display()));

        let mut state = PipelineState::Init;
        let mut degraded: Vec<String> = Vec::new();

        // Fatal: with no probe there is no duration to plan against.
        let media = match probe_video(video).await {
            Ok(info) => info,
            Err(e) => {
                advance(&mut state, PipelineState::Failed, &logger);
                logger.log_error(&format!("probe failed: {e}"));
                return Err(e.into());
            }
        };
        logger.log_stage(
            state.as_str(),
            &format!(
                "probed {:.1}s {}x{} @ {:.1}fps",
                media.duration_seconds, media.width, media.height, media.fps
            ),
        );

        let workspace = RunWorkspace::create()?;
        advance(&mut state, PipelineState::Sampling, &logger);

        // Audio and scene detection have no dependency on each other.
        let audio_branch = async {
            let audio_path = workspace.audio_path();
            if let Err(e) = extract_audio(video, &audio_path, self.config.ffmpeg_timeout_secs).await
            {
                return (
                    AudioTranscript::empty_with_error(e.to_string()),
                    Some(format!("audio extraction failed: {e}")),
                );
            }
            transcribe_or_default(self.transcription.as_ref(), &audio_path).await
        };
        let scene_branch = detect_scenes(
            video,
            media.duration_seconds,
            self.config.scene_threshold,
            self.config.ffmpeg_timeout_secs,
        );
        let ((transcript, audio_note), scene_result) = tokio::join!(audio_branch, scene_branch);

        if let Some(note) = audio_note {
            logger.log_degraded(&note);
            degraded.push(note);
        }
        let boundaries = match scene_result {
            Ok(b) => b,
            Err(e) => {
                let note = format!("scene detection failed: {e}");
                logger.log_degraded(&note);
                degraded.push(note);
                Vec::new()
            }
        };

        // Fatal: no frames means no visual signal at all.
        let frames_dir = workspace.frames_dir()?;
        let frames = match sample_frames(
            video,
            self.config.frame_interval_seconds,
            &frames_dir,
            self.config.ffmpeg_timeout_secs,
        )
        .await
        {
            Ok(frames) => frames,
            Err(e) => {
                advance(&mut state, PipelineState::Failed, &logger);
                logger.log_error(&format!("frame sampling failed: {e}"));
                return Err(e.into());
            }
        };
        logger.log_stage(state.as_str(), &format!("sampled {} frames", frames.len()));

        advance(&mut state, PipelineState::Scoring, &logger);

        let emotion_frames = self
            .face_engine
            .classify_frames(&frames, self.config.classify_delay)
            .await;
        let emotion_summary = self.face_engine.summarize(&emotion_frames);
        if let Some(note) = &emotion_summary.note {
            let note = format!("face classification degraded: {note}");
            logger.log_degraded(&note);
            degraded.push(note);
        }

        let signals = score_signals(
            &self.engine,
            &media,
            &transcript,
            &boundaries,
            &emotion_frames,
            &emotion_summary,
        );

        advance(&mut state, PipelineState::Fusing, &logger);
        logger.log_stage(
            state.as_str(),
            &format!(
                "hook {} pacing {} emotion {} structure {}, best {}",
                signals.hook.score,
                signals.pacing.score,
                signals.emotion.score,
                signals.structure.score,
                signals.platform_fit.best()
            ),
        );

        advance(&mut state, PipelineState::Suggesting, &logger);
        let summary_input = feature_summary(&media, &transcript, &signals);
        let suggestions = resolve_suggestions(
            self.suggestions.as_ref(),
            &summary_input,
            &logger,
            &mut degraded,
        )
        .await;

        advance(&mut state, PipelineState::Done, &logger);
        let report = assemble_report(
            media,
            &transcript,
            &emotion_summary,
            signals,
            suggestions,
            degraded,
        );

        if let Err(e) = workspace.close() {
            logger.log_degraded(&format!("workspace cleanup reported: {e}"));
        }
        logger.log_completion(&format!(
            "report ready, {} degraded signals",
            report.degraded_signals.len()
        ));
        Ok(report)
    }
}

fn new_run_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("run-{millis}")
}

fn advance(state: &mut PipelineState, next: PipelineState, logger: &RunLogger) {
    debug_assert!(
        state.can_transition(next),
        "illegal transition {state} -> {next}"
    );
    *state = next;
    logger.log_stage(next.as_str(), "entered stage");
}

/// Map a transcription failure to the empty-transcript default.
async fn transcribe_or_default(
    service: &dyn TranscriptionService,
    audio_path: &Path,
) -> (AudioTranscript, Option<String>) {
    match service.transcribe(audio_path).await {
        Ok(t) => (t, None),
        Err(e) => (
            AudioTranscript::empty_with_error(e.to_string()),
            Some(format!("transcription failed: {e}")),
        ),
    }
}

/// Outputs of the four scorers plus the fused platform fit.
struct ScoredSignals {
    stats: AudioStats,
    hook: HookScore,
    pacing: PacingScore,
    emotion: EmotionScore,
    structure: StructureScore,
    platform_fit: PlatformFit,
}

/// Run the pure scorers and the aggregator over the extracted signals.
fn score_signals(
    engine: &EngineConfig,
    media: &MediaInfo,
    transcript: &AudioTranscript,
    boundaries: &[f64],
    emotion_frames: &[EmotionFrame],
    emotion_summary: &EmotionSummary,
) -> ScoredSignals {
    let duration = media.duration_seconds;
    let stats = derive_stats(transcript, duration);
    let hook = score_hook(
        &engine.hook,
        transcript,
        &stats,
        emotion_frames,
        boundaries,
        duration,
    );
    let pacing = score_pacing(
        &engine.pacing,
        boundaries,
        duration,
        PlatformClass::for_duration(duration),
    );
    let emotion = score_emotion(&engine.emotion, emotion_summary);
    let structure = score_structure(&engine.structure, transcript, duration);

    let platform_fit = aggregate_fit(
        &engine.platform_fit,
        &FitInputs {
            duration_seconds: duration,
            hook_score: hook.score,
            pacing_score: pacing.score,
            emotion_score: emotion.score,
            dominant_emotion: emotion.dominant_emotion,
            has_cta: structure.has_cta,
        },
    );

    ScoredSignals {
        stats,
        hook,
        pacing,
        emotion,
        structure,
        platform_fit,
    }
}

fn feature_summary(
    media: &MediaInfo,
    transcript: &AudioTranscript,
    signals: &ScoredSignals,
) -> FeatureSummary {
    FeatureSummary {
        transcript_excerpt: FeatureSummary::excerpt_of(&transcript.text),
        language: transcript.language.clone(),
        duration_seconds: media.duration_seconds,
        hook: signals.hook.clone(),
        pacing: signals.pacing.clone(),
        emotion: signals.emotion.clone(),
        structure: signals.structure.clone(),
        platform_fit: signals.platform_fit,
    }
}

/// Ask the generative service, falling back to the fixed default.
///
/// This stage never fails the pipeline.
async fn resolve_suggestions(
    service: &dyn SuggestionService,
    summary: &FeatureSummary,
    logger: &RunLogger,
    degraded: &mut Vec<String>,
) -> ActionSuggestions {
    match service.suggest(summary).await {
        Ok(s) => s,
        Err(e) => {
            let note = format!("suggestions fell back to defaults: {e}");
            logger.log_degraded(&note);
            degraded.push(note);
            ActionSuggestions::fallback()
        }
    }
}

fn assemble_report(
    media: MediaInfo,
    transcript: &AudioTranscript,
    emotion_summary: &EmotionSummary,
    signals: ScoredSignals,
    suggestions: ActionSuggestions,
    degraded_signals: Vec<String>,
) -> AnalysisReport {
    let best_platform = signals.platform_fit.best();
    AnalysisReport {
        media,
        transcript: transcript.text.clone(),
        language: transcript.language.clone(),
        audio: signals.stats,
        frames_analyzed: emotion_summary.frames_analyzed,
        emotion_summary: emotion_summary.clone(),
        hook: signals.hook,
        pacing: signals.pacing,
        emotion: signals.emotion,
        structure: signals.structure,
        platform_fit: signals.platform_fit,
        best_platform,
        suggestions,
        degraded_signals,
    }
}
