//! Invocation layer: one scoring request in, one callback out.
//! The orchestrator owns the request lifecycle; extraction and callback
//! delivery are the only I/O, each behind its own trait.

pub mod callback;
pub mod extraction;
pub mod orchestrator;
