mod ids;
mod pattern;
mod section;
mod studied;
mod view_state;

pub use ids::{ParseIdError, PatternId};
pub use pattern::{ParseCategoryError, Pattern, PatternCategory, PatternDraft, PatternError};
pub use section::{ParseSectionError, Section, SectionGroup};
pub use studied::StudiedSet;
pub use view_state::ViewState;
