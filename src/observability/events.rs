//! Structured event stream for `fencecall`.
//!
//! Typed events emitted while a phrase is being refereed. Events are
//! serialized as newline-delimited JSON (JSONL) with a monotonically
//! increasing sequence number, so a session can be replayed or audited
//! after the fact.

use std::io::{BufWriter, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::phrase::Fencer;
use crate::protocol::{EngineState, Transition};

// ---------------------------------------------------------------------------
// Event variants
// ---------------------------------------------------------------------------

/// A discrete event in the life of a phrase.
///
/// Tagged with `"type"` when serialized so consumers can dispatch on it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A fresh phrase was opened (first start or after a reset).
    PhraseStarted {
        /// When the phrase was opened.
        timestamp: DateTime<Utc>,
        /// One-based phrase counter within the session.
        phrase: u64,
    },

    /// A choice was accepted and applied.
    ChoiceSubmitted {
        /// When the choice was applied.
        timestamp: DateTime<Utc>,
        /// Choice id.
        choice: String,
        /// State before the choice.
        from: EngineState,
        /// State after the choice.
        to: EngineState,
        /// Right-of-way holder after the choice.
        #[serde(skip_serializing_if = "Option::is_none")]
        priority: Option<Fencer>,
        /// Call rendered after the choice.
        call: String,
    },

    /// A choice was refused; the engine was not changed.
    ChoiceRejected {
        /// When the choice was refused.
        timestamp: DateTime<Utc>,
        /// Submitted input.
        choice: String,
        /// State the engine stayed in.
        state: EngineState,
        /// Closest legal id, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
    },

    /// The phrase reached a verdict.
    PhraseCompleted {
        /// When the phrase completed.
        timestamp: DateTime<Utc>,
        /// Final rendered call.
        call: String,
        /// Fencer awarded the touch, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        touch: Option<Fencer>,
    },

    /// The phrase turned out to be malformed.
    PhraseMalformed {
        /// When the phrase was rejected.
        timestamp: DateTime<Utc>,
        /// Call rendered from the actions recorded so far.
        call: String,
    },
}

impl Event {
    /// Builds a [`Event::ChoiceSubmitted`] from an engine transition.
    #[must_use]
    pub fn submitted(transition: &Transition) -> Self {
        Self::ChoiceSubmitted {
            timestamp: Utc::now(),
            choice: transition.choice.id().to_string(),
            from: transition.from,
            to: transition.to,
            priority: transition.priority,
            call: transition.call.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope (adds sequence number via serde flatten)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct EventEnvelope {
    sequence: u64,
    #[serde(flatten)]
    event: Event,
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Buffered JSONL event writer.
///
/// Each [`emit`](Self::emit) takes the next sequence number, writes the
/// event as one JSON line and flushes. Serialization or I/O failures are
/// dropped: an event sink must never interrupt a call.
pub struct EventEmitter {
    writer: Mutex<BufWriter<Box<dyn Write + Send>>>,
    sequence: AtomicU64,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl EventEmitter {
    /// Creates an emitter that writes to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
            sequence: AtomicU64::new(0),
        }
    }

    /// Creates an emitter that writes to stderr, leaving stdout to the
    /// interactive prompts.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates an emitter that discards everything.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(Box::new(std::io::sink()))
    }

    /// Emits an event as a single JSONL line.
    pub fn emit(&self, event: Event) {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let envelope = EventEnvelope {
            sequence: seq,
            event,
        };

        if let Ok(mut w) = self.writer.lock()
            && let Ok(line) = serde_json::to_string(&envelope)
        {
            let _ = writeln!(w, "{line}");
            let _ = w.flush();
        }
    }

    /// Returns the number of events emitted so far.
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex as StdMutex};

    use super::*;
    use crate::protocol::PhraseEngine;

    #[derive(Clone)]
    struct TestWriter(Arc<StdMutex<Vec<u8>>>);

    impl TestWriter {
        fn new() -> Self {
            Self(Arc::new(StdMutex::new(Vec::new())))
        }

        fn lines(&self) -> Vec<serde_json::Value> {
            let buf = self.0.lock().unwrap();
            String::from_utf8_lossy(&buf)
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect()
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn submitted_event_carries_transition() {
        let mut engine = PhraseEngine::new();
        let transition = engine.submit_choice("attack-left").unwrap();

        let json = serde_json::to_value(Event::submitted(&transition)).unwrap();
        assert_eq!(json["type"], "ChoiceSubmitted");
        assert_eq!(json["choice"], "attack-left");
        assert_eq!(json["from"], "start");
        assert_eq!(json["to"], "attack-outcome");
        assert_eq!(json["priority"], "left");
        assert_eq!(json["call"], "Attack left");
    }

    #[test]
    fn emitter_writes_sequenced_jsonl() {
        let tw = TestWriter::new();
        let emitter = EventEmitter::new(Box::new(tw.clone()));
        emitter.emit(Event::PhraseStarted {
            timestamp: Utc::now(),
            phrase: 1,
        });
        emitter.emit(Event::PhraseCompleted {
            timestamp: Utc::now(),
            call: "Simultaneous. No touch.".to_string(),
            touch: None,
        });

        assert_eq!(emitter.event_count(), 2);
        let lines = tw.lines();
        assert_eq!(lines[0]["sequence"], 0);
        assert_eq!(lines[0]["type"], "PhraseStarted");
        assert_eq!(lines[1]["sequence"], 1);
        assert_eq!(lines[1]["type"], "PhraseCompleted");
        assert!(lines[1].get("touch").is_none());
    }

    #[test]
    fn rejected_event_omits_missing_suggestion() {
        let json = serde_json::to_value(Event::ChoiceRejected {
            timestamp: Utc::now(),
            choice: "lunge".to_string(),
            state: EngineState::Start,
            suggestion: None,
        })
        .unwrap();
        assert_eq!(json["state"], "start");
        assert!(json.get("suggestion").is_none());
    }

    #[test]
    fn noop_emitter_counts_events() {
        let emitter = EventEmitter::noop();
        emitter.emit(Event::PhraseMalformed {
            timestamp: Utc::now(),
            call: "Attack left is parried, no riposte".to_string(),
        });
        assert_eq!(emitter.event_count(), 1);
    }
}
