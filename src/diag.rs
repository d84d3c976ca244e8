use std::fmt;

/// A structured trace event emitted by the core while it works.
#[derive(Clone, Copy, Debug)]
pub enum Event<'a> {
    RuleParsed { lhs: &'a str, rhs: &'a str },
    DeclarationFound { relation: &'a str },
    Rename { relation: &'a str, ctor: &'a str, from: &'a str, to: &'a str },
    RuleApplied { head: &'a str, output: &'a str },
}

impl<'a> fmt::Display for Event<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Event::RuleParsed { lhs, rhs } => write!(f, "rewrite rule {} => {}", lhs, rhs),
            Event::DeclarationFound { relation } => write!(f, "found Inductive {}", relation),
            Event::Rename { relation, ctor, from, to } => {
                write!(f, "rename {}.{}: {} => {}", relation, ctor, from, to)
            }
            Event::RuleApplied { head, output } => {
                write!(f, "rule for {} produced {}", head, output)
            }
        }
    }
}

/// Where trace events go. Injected by the caller; the core never talks to a
/// global logger itself.
pub trait DiagnosticSink {
    fn emit(&mut self, event: Event);
}

/// Discards every event.
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _event: Event) {}
}

/// Forwards events to the `log` facade at debug level.
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, event: Event) {
        log::debug!("{}", event);
    }
}
