use serde::{Deserialize, Serialize};

use crate::model::section::Section;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PrimaryTabs {
    description: bool,
    pros_and_cons: bool,
    case: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct CaseTabs {
    code: bool,
    task: bool,
    result: bool,
}

/// Which sections of one pattern's detail view have been opened at least once.
///
/// Flags only ever go from `false` to `true`. The case sub-tabs are tracked
/// independently of the case tab itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
    tabs: PrimaryTabs,
    sub_tabs: CaseTabs,
}

impl ViewState {
    /// A state with nothing viewed yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn flag_mut(&mut self, section: Section) -> &mut bool {
        match section {
            Section::Description => &mut self.tabs.description,
            Section::ProsAndCons => &mut self.tabs.pros_and_cons,
            Section::Case => &mut self.tabs.case,
            Section::Code => &mut self.sub_tabs.code,
            Section::Task => &mut self.sub_tabs.task,
            Section::Result => &mut self.sub_tabs.result,
        }
    }

    /// Mark a section as opened.
    ///
    /// Returns `true` only when the flag was previously unset.
    pub fn mark(&mut self, section: Section) -> bool {
        let flag = self.flag_mut(section);
        let changed = !*flag;
        *flag = true;
        changed
    }

    #[must_use]
    pub fn is_viewed(&self, section: Section) -> bool {
        match section {
            Section::Description => self.tabs.description,
            Section::ProsAndCons => self.tabs.pros_and_cons,
            Section::Case => self.tabs.case,
            Section::Code => self.sub_tabs.code,
            Section::Task => self.sub_tabs.task,
            Section::Result => self.sub_tabs.result,
        }
    }

    /// True once every tracked section in both groups has been opened.
    #[must_use]
    pub fn is_fully_viewed(&self) -> bool {
        Section::ALL.iter().all(|section| self.is_viewed(*section))
    }

    #[must_use]
    pub fn viewed_count(&self) -> usize {
        Section::ALL
            .iter()
            .filter(|section| self.is_viewed(**section))
            .count()
    }

    /// Sections still unopened, in tab order.
    #[must_use]
    pub fn missing(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| !self.is_viewed(*section))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_viewed_needs_every_section() {
        let mut state = ViewState::new();
        for section in [
            Section::Description,
            Section::ProsAndCons,
            Section::Code,
            Section::Task,
        ] {
            assert!(state.mark(section));
        }
        assert!(!state.is_fully_viewed());
        assert_eq!(state.missing(), vec![Section::Case, Section::Result]);

        state.mark(Section::Case);
        state.mark(Section::Result);
        assert!(state.is_fully_viewed());
        assert!(state.missing().is_empty());
    }

    #[test]
    fn marking_is_idempotent_and_order_free() {
        let mut forward = ViewState::new();
        let mut backward = ViewState::new();
        for section in Section::ALL {
            forward.mark(section);
            forward.mark(section);
        }
        for section in Section::ALL.into_iter().rev() {
            backward.mark(section);
        }
        assert_eq!(forward, backward);
        assert!(!forward.mark(Section::Code));
        assert_eq!(forward.viewed_count(), 6);
    }

    #[test]
    fn persisted_layout_groups_tabs() {
        let mut state = ViewState::new();
        state.mark(Section::ProsAndCons);
        state.mark(Section::Result);
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["tabs"]["prosAndCons"], true);
        assert_eq!(json["tabs"]["case"], false);
        assert_eq!(json["subTabs"]["result"], true);
    }

    #[test]
    fn missing_fields_default_to_unviewed() {
        let state: ViewState =
            serde_json::from_str(r#"{"tabs":{"description":true}}"#).unwrap();
        assert!(state.is_viewed(Section::Description));
        assert!(!state.is_viewed(Section::Code));
        assert_eq!(state.viewed_count(), 1);

        let empty: ViewState = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ViewState::new());
    }
}
