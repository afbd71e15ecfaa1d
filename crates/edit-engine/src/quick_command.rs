//! Quick commands: deterministic rules that turn a few canonical requests
//! into edit decisions straight from analysis annotations.
//!
//! Rules are tried in a fixed priority order and the first whose trigger
//! phrase appears in the command (case-insensitive) wins:
//!
//! 1. remove silence
//! 2. cut fillers
//! 3. keep talking only
//! 4. remove pauses over N seconds (only matches when N parses)
//!
//! No match means the command should go to the external interpreter.

use cutline_common::config::QuickCommandConfig;
use cutline_edit_model::analysis::{Annotation, AnnotationType, TranscriptSegment};
use cutline_edit_model::command::CommandResult;
use cutline_edit_model::decision::EditDecision;
use cutline_edit_model::range::TimeRange;

use crate::interval::{merge_overlapping, subtract_from_duration};

const REMOVE_SILENCE_TRIGGERS: &[&str] = &[
    "remove silence",
    "remove all silence",
    "remove the silence",
    "remove silent parts",
    "cut silence",
    "cut all silence",
    "cut the silence",
    "cut silent parts",
    "delete silence",
    "delete all silence",
    "trim silence",
];

const CUT_FILLERS_TRIGGERS: &[&str] = &[
    "cut filler",
    "cut all filler",
    "cut the filler",
    "cut ums",
    "cut the ums",
    "remove filler",
    "remove all filler",
    "remove the filler",
    "remove ums",
    "remove the ums",
    "delete filler",
    "delete all filler",
];

const KEEP_TALKING_TRIGGERS: &[&str] = &[
    "keep talking only",
    "keep only talking",
    "keep only the talking",
    "only keep talking",
    "only keep the talking",
    "keep speech only",
    "keep only speech",
    "keep only the speech",
    "remove everything except talking",
    "cut everything except talking",
    "remove non-talking",
    "cut non-talking",
];

const REMOVE_PAUSES_TRIGGERS: &[&str] = &[
    "remove pause",
    "remove all pause",
    "remove any pause",
    "remove long pause",
    "cut pause",
    "cut all pause",
    "cut any pause",
    "cut long pause",
    "delete pause",
    "trim pause",
];

/// A recognized quick command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuickRule {
    RemoveSilence,
    CutFillers,
    /// Cut everything outside talking annotations.
    ///
    /// With no usable talking annotations this cuts nothing rather than the
    /// whole media, and still reports success.
    KeepTalkingOnly,
    RemovePauses { threshold_secs: f64 },
}

impl QuickRule {
    /// Label attached to the decisions this rule emits.
    pub fn label(&self) -> &'static str {
        match self {
            QuickRule::RemoveSilence => "silence",
            QuickRule::CutFillers => "filler",
            QuickRule::KeepTalkingOnly => "non-talking",
            QuickRule::RemovePauses { .. } => "pause",
        }
    }
}

/// Analysis data a quick command operates on.
#[derive(Debug, Clone, Copy)]
pub struct QuickCommandContext<'a> {
    /// Media duration in seconds.
    pub duration: f64,
    pub annotations: &'a [Annotation],
    pub transcript: &'a [TranscriptSegment],
}

/// Rule-based matcher for canonical editing commands.
#[derive(Debug, Clone, Default)]
pub struct QuickCommandMatcher {
    config: QuickCommandConfig,
}

impl QuickCommandMatcher {
    pub fn new(config: QuickCommandConfig) -> Self {
        Self { config }
    }

    /// Identify which rule, if any, `text` triggers.
    pub fn classify(&self, text: &str) -> Option<QuickRule> {
        let normalized = normalize(text);
        let triggered = |phrases: &[&str]| phrases.iter().any(|p| normalized.contains(p));

        if triggered(REMOVE_SILENCE_TRIGGERS) {
            return Some(QuickRule::RemoveSilence);
        }
        if triggered(CUT_FILLERS_TRIGGERS) {
            return Some(QuickRule::CutFillers);
        }
        if triggered(KEEP_TALKING_TRIGGERS) {
            return Some(QuickRule::KeepTalkingOnly);
        }
        if triggered(REMOVE_PAUSES_TRIGGERS) {
            return parse_threshold_secs(&normalized)
                .map(|threshold_secs| QuickRule::RemovePauses { threshold_secs });
        }
        None
    }

    /// Run the matching rule against the analysis data.
    ///
    /// Returns `None` when no rule fires, signaling that the command should
    /// be delegated to an external interpreter.
    pub fn try_match(&self, text: &str, ctx: &QuickCommandContext<'_>) -> Option<CommandResult> {
        let rule = self.classify(text)?;
        let annotations: Vec<&Annotation> = ctx
            .annotations
            .iter()
            .filter(|a| a.confidence >= self.config.min_confidence)
            .collect();

        let (ranges, interpretation) = match rule {
            QuickRule::RemoveSilence => {
                let ranges = ranges_of(&annotations, AnnotationType::Silence);
                let summary = format!("Remove {} silent section(s)", ranges.len());
                (ranges, summary)
            }
            QuickRule::CutFillers => {
                let mut ranges = ranges_of(&annotations, AnnotationType::Filler);
                ranges.extend(
                    ctx.transcript
                        .iter()
                        .filter(|s| self.is_filler_segment(s))
                        .map(TranscriptSegment::range),
                );
                let merged = merge_overlapping(&ranges);
                let summary = format!("Cut {} filler section(s)", merged.len());
                (merged, summary)
            }
            QuickRule::KeepTalkingOnly => {
                let talking = ranges_of(&annotations, AnnotationType::Talking);
                if talking.is_empty() {
                    (vec![], "Keep talking only: no talking detected, nothing cut".to_string())
                } else {
                    let gaps = subtract_from_duration(ctx.duration, &talking);
                    let summary =
                        format!("Keep talking only: cut {} non-talking section(s)", gaps.len());
                    (gaps, summary)
                }
            }
            QuickRule::RemovePauses { threshold_secs } => {
                let mut ranges: Vec<TimeRange> = ranges_of(&annotations, AnnotationType::Silence)
                    .into_iter()
                    .filter(|r| r.duration() > threshold_secs)
                    .collect();
                ranges.extend(transcript_gaps(ctx.transcript, threshold_secs));
                let merged = merge_overlapping(&ranges);
                let summary = format!(
                    "Remove {} pause(s) longer than {threshold_secs}s",
                    merged.len()
                );
                (merged, summary)
            }
        };

        let edits: Vec<EditDecision> = ranges
            .into_iter()
            .filter_map(|range| match EditDecision::cut(range) {
                Ok(decision) => Some(decision.with_origin(text).with_label(rule.label())),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unusable annotation range");
                    None
                }
            })
            .collect();

        tracing::info!(?rule, edits = edits.len(), "Quick command matched");
        Some(CommandResult::applied(interpretation, edits))
    }

    /// A segment is filler when pre-flagged or when any of its words (or
    /// multi-word phrases) is a configured filler.
    pub fn is_filler_segment(&self, segment: &TranscriptSegment) -> bool {
        if segment.is_filler {
            return true;
        }
        let tokens: Vec<String> = segment
            .tokens()
            .into_iter()
            .map(normalize_token)
            .filter(|t| !t.is_empty())
            .collect();

        self.config.filler_words.iter().any(|filler| {
            let phrase: Vec<String> = filler.split_whitespace().map(normalize_token).collect();
            !phrase.is_empty() && tokens.windows(phrase.len()).any(|w| w == phrase.as_slice())
        })
    }
}

fn ranges_of(annotations: &[&Annotation], kind: AnnotationType) -> Vec<TimeRange> {
    annotations
        .iter()
        .filter(|a| a.kind == kind)
        .map(|a| a.range())
        .collect()
}

/// Gaps between consecutive transcript segments longer than `threshold`.
fn transcript_gaps(transcript: &[TranscriptSegment], threshold: f64) -> Vec<TimeRange> {
    let spoken = merge_overlapping(
        &transcript
            .iter()
            .map(TranscriptSegment::range)
            .collect::<Vec<_>>(),
    );
    spoken
        .windows(2)
        .map(|pair| TimeRange::from_bounds(pair[0].end, pair[1].start))
        .filter(|gap| gap.duration() > threshold)
        .collect()
}

/// Lowercase and collapse whitespace.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Find the first number in `text`, in seconds. A `ms`/`millisecond`
/// unit directly after the number converts from milliseconds.
fn parse_threshold_secs(text: &str) -> Option<f64> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    for (i, token) in tokens.iter().enumerate() {
        let trimmed = token.trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.');
        let numeric_len = trimmed
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(trimmed.len());
        let (number, suffix) = trimmed.split_at(numeric_len);
        let Ok(value) = number.parse::<f64>() else {
            continue;
        };
        if !value.is_finite() || value < 0.0 {
            continue;
        }

        let unit = if suffix.is_empty() {
            tokens.get(i + 1).copied().unwrap_or("")
        } else {
            suffix
        };
        let is_millis = unit.starts_with("ms") || unit.starts_with("millisecond");
        return Some(if is_millis { value / 1000.0 } else { value });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn silence(id: &str, start: f64, end: f64) -> Annotation {
        Annotation::new(id, AnnotationType::Silence, start, end)
    }

    fn ctx<'a>(
        duration: f64,
        annotations: &'a [Annotation],
        transcript: &'a [TranscriptSegment],
    ) -> QuickCommandContext<'a> {
        QuickCommandContext {
            duration,
            annotations,
            transcript,
        }
    }

    #[test]
    fn test_remove_all_silence() {
        let annotations = vec![silence("s1", 10.0, 12.0), silence("s2", 30.0, 33.0)];
        let matcher = QuickCommandMatcher::default();

        let result = matcher
            .try_match("Remove ALL silence", &ctx(60.0, &annotations, &[]))
            .unwrap();

        assert!(result.success);
        assert_eq!(result.edits.len(), 2);
        assert!(result.edits.iter().all(|e| e.is_cut()));
        assert!(result
            .edits
            .iter()
            .all(|e| e.label.as_deref() == Some("silence")));
        assert_eq!(
            result.affected_time_ranges,
            vec![
                TimeRange::from_bounds(10.0, 12.0),
                TimeRange::from_bounds(30.0, 33.0)
            ]
        );
        assert_eq!(result.edits[0].origin.as_deref(), Some("Remove ALL silence"));
    }

    #[test]
    fn test_no_match_returns_none() {
        let matcher = QuickCommandMatcher::default();
        assert!(matcher
            .try_match("make the intro punchier", &ctx(60.0, &[], &[]))
            .is_none());
    }

    #[test]
    fn test_priority_silence_before_pauses() {
        let matcher = QuickCommandMatcher::default();
        assert_eq!(
            matcher.classify("remove silence and cut pauses over 2s"),
            Some(QuickRule::RemoveSilence)
        );
    }

    #[test]
    fn test_pauses_without_number_falls_through() {
        let matcher = QuickCommandMatcher::default();
        assert_eq!(matcher.classify("remove long pauses"), None);
        assert_eq!(
            matcher.classify("remove pauses over 1.5 seconds"),
            Some(QuickRule::RemovePauses {
                threshold_secs: 1.5
            })
        );
        assert_eq!(
            matcher.classify("cut pauses longer than 800ms"),
            Some(QuickRule::RemovePauses {
                threshold_secs: 0.8
            })
        );
        assert_eq!(
            matcher.classify("cut pauses over 500 milliseconds"),
            Some(QuickRule::RemovePauses {
                threshold_secs: 0.5
            })
        );
    }

    #[test]
    fn test_cut_fillers_merges_sources() {
        let annotations = vec![Annotation::new("f1", AnnotationType::Filler, 5.0, 6.0)];
        let mut flagged = TranscriptSegment::new("t1", 5.5, 6.5, "hmm");
        flagged.is_filler = true;
        let transcript = vec![
            flagged,
            TranscriptSegment::new("t2", 20.0, 22.0, "Um, so today we start"),
            TranscriptSegment::new("t3", 30.0, 32.0, "The umbrella is red"),
        ];
        let matcher = QuickCommandMatcher::default();

        let result = matcher
            .try_match("cut fillers", &ctx(60.0, &annotations, &transcript))
            .unwrap();
        assert_eq!(
            result.affected_time_ranges,
            vec![
                TimeRange::from_bounds(5.0, 6.5),
                TimeRange::from_bounds(20.0, 22.0)
            ]
        );
        assert!(result
            .edits
            .iter()
            .all(|e| e.label.as_deref() == Some("filler")));
    }

    #[test]
    fn test_multi_word_filler_phrase() {
        let matcher = QuickCommandMatcher::new(QuickCommandConfig {
            filler_words: vec!["you know".to_string()],
            min_confidence: 0.0,
        });
        let segment = TranscriptSegment::new("t", 0.0, 1.0, "and, you know, it");
        assert!(matcher.is_filler_segment(&segment));
        assert!(!matcher.is_filler_segment(&TranscriptSegment::new("t", 0.0, 1.0, "you knew it")));
    }

    #[test]
    fn test_keep_talking_only_inverts() {
        let annotations = vec![
            Annotation::new("t1", AnnotationType::Talking, 5.0, 20.0),
            Annotation::new("t2", AnnotationType::Talking, 30.0, 50.0),
        ];
        let matcher = QuickCommandMatcher::default();
        let result = matcher
            .try_match("keep only talking", &ctx(60.0, &annotations, &[]))
            .unwrap();
        assert_eq!(
            result.affected_time_ranges,
            vec![
                TimeRange::from_bounds(0.0, 5.0),
                TimeRange::from_bounds(20.0, 30.0),
                TimeRange::from_bounds(50.0, 60.0)
            ]
        );
    }

    #[test]
    fn test_keep_talking_without_talking_cuts_nothing() {
        let matcher = QuickCommandMatcher::default();
        let result = matcher
            .try_match("keep talking only", &ctx(60.0, &[], &[]))
            .unwrap();
        assert!(result.success);
        assert!(result.edits.is_empty());
    }

    #[test]
    fn test_remove_pauses_uses_silence_and_transcript_gaps() {
        let annotations = vec![silence("s1", 10.0, 11.0), silence("s2", 40.0, 43.0)];
        let transcript = vec![
            TranscriptSegment::new("t1", 0.0, 10.0, "intro"),
            TranscriptSegment::new("t2", 11.0, 20.0, "middle"),
            TranscriptSegment::new("t3", 25.0, 40.0, "end"),
        ];
        let matcher = QuickCommandMatcher::default();
        let result = matcher
            .try_match(
                "remove pauses over 2 seconds",
                &ctx(60.0, &annotations, &transcript),
            )
            .unwrap();
        assert_eq!(
            result.affected_time_ranges,
            vec![
                TimeRange::from_bounds(20.0, 25.0),
                TimeRange::from_bounds(40.0, 43.0)
            ]
        );
        assert!(result
            .edits
            .iter()
            .all(|e| e.label.as_deref() == Some("pause")));
    }

    #[test]
    fn test_low_confidence_annotations_ignored() {
        let mut weak = silence("s1", 1.0, 2.0);
        weak.confidence = 0.2;
        let annotations = vec![weak, silence("s2", 5.0, 6.0)];
        let matcher = QuickCommandMatcher::new(QuickCommandConfig {
            min_confidence: 0.5,
            ..Default::default()
        });
        let result = matcher
            .try_match("cut silence", &ctx(10.0, &annotations, &[]))
            .unwrap();
        assert_eq!(result.edits.len(), 1);
        assert_eq!(result.edits[0].range, TimeRange::from_bounds(5.0, 6.0));
    }

    #[test]
    fn test_invalid_annotation_ranges_are_skipped() {
        let annotations = vec![silence("bad", 5.0, 5.0), silence("ok", 7.0, 8.0)];
        let matcher = QuickCommandMatcher::default();
        let result = matcher
            .try_match("remove silence", &ctx(10.0, &annotations, &[]))
            .unwrap();
        assert_eq!(result.edits.len(), 1);
    }
}
