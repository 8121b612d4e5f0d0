use std::error::Error;
use std::io::Write;

use pattern_core::CategoryFilter;
use pattern_core::model::{Pattern, PatternId, Section, ViewState};
use services::{AppServices, MarkOutcome};

type CommandResult = Result<(), Box<dyn Error>>;

pub async fn list(
    services: &AppServices,
    filter: CategoryFilter,
    out: &mut impl Write,
) -> CommandResult {
    let catalogue = services.catalogue();
    let registry = services.registry();

    let mut current_category = None;
    for pattern in catalogue.filter(filter) {
        if current_category != Some(pattern.category()) {
            current_category = Some(pattern.category());
            writeln!(out, "{}", pattern.category().label())?;
        }
        let marker = if registry.is_studied(pattern.id()).await {
            "x"
        } else {
            " "
        };
        writeln!(out, "  [{marker}] {:>2}  {}", pattern.id().value(), pattern.title())?;
    }
    Ok(())
}

pub async fn show(
    services: &AppServices,
    id: PatternId,
    section: Section,
    out: &mut impl Write,
) -> CommandResult {
    let mut tracker = services.open_pattern(id).await?;

    let pattern = tracker.pattern();
    writeln!(out, "{} / {}", pattern.pre_title(), pattern.title())?;
    writeln!(out, "== {} ==", section_heading(section))?;
    writeln!(out, "{}", section_text(pattern, section))?;

    let outcome = tracker.mark_section_opened(section).await;
    if outcome == MarkOutcome::Completed {
        writeln!(out)?;
        writeln!(out, "All sections viewed, {} is now studied.", tracker.pattern().title())?;
    }
    Ok(())
}

pub async fn open(
    services: &AppServices,
    id: PatternId,
    sections: &[Section],
    out: &mut impl Write,
) -> CommandResult {
    let mut tracker = services.open_pattern(id).await?;
    let mut completed = false;
    for &section in sections {
        completed |= tracker.mark_section_opened(section).await == MarkOutcome::Completed;
    }

    writeln!(out, "{}", tracker.pattern().title())?;
    write_view_state(tracker.view_state(), out)?;
    if completed {
        writeln!(out, "Pattern studied.")?;
    } else if tracker.is_fully_viewed() {
        writeln!(out, "Already studied.")?;
    }
    Ok(())
}

pub async fn progress(services: &AppServices, out: &mut impl Write) -> CommandResult {
    let progress = services.progress();
    let summary = progress.summary().await;

    writeln!(
        out,
        "Studied {} of {} patterns ({}%)",
        summary.studied,
        summary.total,
        summary.percent()
    )?;
    for category in &summary.by_category {
        writeln!(
            out,
            "  {:<20} {}/{}",
            category.category.label(),
            category.studied,
            category.total
        )?;
    }

    let studied = progress.studied().await;
    if !studied.is_empty() {
        writeln!(out)?;
        writeln!(out, "Studied:")?;
        for (index, pattern) in studied.iter().enumerate() {
            writeln!(out, "  {}. {}", index + 1, pattern.title())?;
        }
    }
    Ok(())
}

fn write_view_state(state: &ViewState, out: &mut impl Write) -> std::io::Result<()> {
    for section in Section::ALL {
        let marker = if state.is_viewed(section) { "x" } else { " " };
        writeln!(out, "  [{marker}] {}", section.key())?;
    }
    writeln!(out, "  {}/{} viewed", state.viewed_count(), Section::ALL.len())
}

fn section_heading(section: Section) -> &'static str {
    match section {
        Section::Description => "Description",
        Section::ProsAndCons => "Pros & Cons",
        Section::Case => "Case",
        Section::Code => "Case: Code",
        Section::Task => "Case: Task",
        Section::Result => "Case: Result",
    }
}

fn section_text(pattern: &Pattern, section: Section) -> &str {
    match section {
        Section::Description => pattern.description(),
        Section::ProsAndCons => pattern.pros_cons(),
        // The case tab opens on its task.
        Section::Case | Section::Task => pattern.task(),
        Section::Code => pattern.code(),
        Section::Result => pattern.result(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn list_marks_studied_patterns() {
        let services = AppServices::in_memory().await;
        let mut sink = Vec::new();
        open(&services, PatternId::new(1), &Section::ALL, &mut sink)
            .await
            .unwrap();

        let mut buf = Vec::new();
        list(&services, "creational".parse().unwrap(), &mut buf)
            .await
            .unwrap();
        let text = render(buf);
        assert!(text.starts_with("Creational patterns\n"));
        assert!(text.contains("[x]  1  Abstract factory"));
        assert!(text.contains("[ ]  2  Builder"));
        assert!(!text.contains("Adapter"));
    }

    #[tokio::test]
    async fn show_records_the_section() {
        let services = AppServices::in_memory().await;
        let mut buf = Vec::new();
        show(&services, PatternId::new(7), Section::Code, &mut buf)
            .await
            .unwrap();
        assert!(render(buf).contains("== Case: Code =="));

        let tracker = services.open_pattern(PatternId::new(7)).await.unwrap();
        assert!(tracker.view_state().is_viewed(Section::Code));
        assert_eq!(tracker.view_state().viewed_count(), 1);
    }

    #[tokio::test]
    async fn open_reports_completion_once() {
        let services = AppServices::in_memory().await;

        let mut first = Vec::new();
        open(&services, PatternId::new(7), &Section::ALL, &mut first)
            .await
            .unwrap();
        let first = render(first);
        assert!(first.contains("6/6 viewed"));
        assert!(first.contains("Pattern studied."));

        let mut second = Vec::new();
        open(&services, PatternId::new(7), &[Section::Code], &mut second)
            .await
            .unwrap();
        assert!(render(second).contains("Already studied."));
    }

    #[tokio::test]
    async fn unknown_pattern_is_an_error() {
        let services = AppServices::in_memory().await;
        let mut buf = Vec::new();
        let err = show(&services, PatternId::new(99), Section::Description, &mut buf)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("99"));
    }

    #[tokio::test]
    async fn progress_lists_studied_in_order() {
        let services = AppServices::in_memory().await;
        let mut sink = Vec::new();
        for id in [19, 5] {
            open(&services, PatternId::new(id), &Section::ALL, &mut sink)
                .await
                .unwrap();
        }

        let mut buf = Vec::new();
        progress(&services, &mut buf).await.unwrap();
        let text = render(buf);
        assert!(text.starts_with("Studied 2 of 23 patterns (8%)"));
        assert!(text.contains("1. Observer\n  2. Singleton"));
    }
}
