//! Pattern compilation for the match engine.
//!
//! Rules arrive as configuration (`PatternRule`) and are turned into compiled
//! regular expressions here, once per distinct rule set. Everything that scans
//! text takes the compiled form, never raw pattern strings.

pub mod compiler;
