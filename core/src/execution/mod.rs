//! Instrumented execution: step recording, lazy traces and replay history
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod history;
pub mod recorder;
pub mod trace;

pub use self::history::Replay;
pub use self::recorder::{SearchResult, SearchStep, StepRecorder};
pub use self::trace::{SearchRun, Trace};
