pub mod language;
pub mod narration;
pub mod script;
