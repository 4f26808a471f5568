pub mod dialogue;
pub mod editor_in_chief;
pub mod intake;
pub mod specialist;
pub mod types;

pub use dialogue::DialogueTask;
pub use editor_in_chief::EditorInChiefTask;
pub use intake::ArticleIntakeTask;
pub use specialist::SpecialistTask;
pub use types::session_keys;
