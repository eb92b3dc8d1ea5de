//! Plain-text rendering of the session state.

use cw_core::{Clock, Controller, Difficulty, GenerationResult, Locale, RequestState};

struct Labels {
    loading: &'static str,
    synonyms: &'static str,
    antonyms: &'static str,
    clues: &'static str,
    copied: &'static str,
}

fn labels(locale: Locale) -> Labels {
    match locale {
        Locale::Ar => Labels {
            loading: "جاري التوليد بسرعة...",
            synonyms: "مرادفات",
            antonyms: "أضداد",
            clues: "التلميحات المقترحة",
            copied: "تم النسخ",
        },
        Locale::En => Labels {
            loading: "Generating...",
            synonyms: "Synonyms",
            antonyms: "Antonyms",
            clues: "Suggested clues",
            copied: "copied",
        },
    }
}

fn difficulty_label(locale: Locale, difficulty: Difficulty) -> &'static str {
    match locale {
        Locale::Ar => difficulty.label(),
        Locale::En => difficulty.keyword(),
    }
}

/// One-line summary of the form: word, count, difficulty, and `⏎` when a
/// submit would start a request.
#[must_use]
pub fn render_form<C: Clock>(controller: &Controller<C>) -> String {
    let form = controller.form();
    let word = form.word.trim();
    format!(
        "[{} | {} | {}]{}\n",
        if word.is_empty() { "-" } else { word },
        form.hint_count,
        difficulty_label(controller.locale(), form.difficulty),
        if controller.can_submit() { " ⏎" } else { "" }
    )
}

/// Render the visible part of the state. Idle renders nothing.
#[must_use]
pub fn render<C: Clock>(controller: &Controller<C>) -> String {
    let labels = labels(controller.locale());

    match controller.state() {
        RequestState::Idle => String::new(),
        RequestState::Loading { .. } => format!(
            "… {} ({} × {})\n",
            labels.loading,
            controller.form().hint_count,
            difficulty_label(controller.locale(), controller.form().difficulty)
        ),
        RequestState::Failed(failure) => format!("! {}\n", failure.message),
        RequestState::Success(result) => render_result(result, controller.copied_index(), &labels),
    }
}

fn render_result(result: &GenerationResult, copied: Option<usize>, labels: &Labels) -> String {
    // Nothing is shown when the model returned no clues.
    if result.clues.is_empty() {
        return String::new();
    }

    let mut out = String::new();

    if !result.synonyms.is_empty() {
        out.push_str(&format!("{}: {}\n", labels.synonyms, result.synonyms.join("، ")));
    }
    if !result.antonyms.is_empty() {
        out.push_str(&format!("{}: {}\n", labels.antonyms, result.antonyms.join("، ")));
    }

    out.push_str(&format!("{}:\n", labels.clues));
    for (index, clue) in result.clues.iter().enumerate() {
        let marker = if copied == Some(index) {
            format!("  ✓ {}", labels.copied)
        } else {
            String::new()
        };
        out.push_str(&format!("  {:>2}. {}{}\n", index + 1, clue, marker));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_core::{Event, GenerationError};
    use cw_dst::SimClock;
    use std::sync::Arc;

    fn success(controller: &mut Controller<Arc<SimClock>>, result: GenerationResult) {
        controller.handle(Event::WordChanged("word".into()));
        controller.handle(Event::Submit);
        controller.handle(Event::Resolved {
            request: 1,
            outcome: Ok(result),
        });
    }

    #[test]
    fn test_idle_and_loading() {
        let mut controller = Controller::new(Arc::new(SimClock::new()), Locale::En);
        assert_eq!(render(&controller), "");

        controller.handle(Event::WordChanged("word".into()));
        controller.handle(Event::Submit);
        assert_eq!(render(&controller), "… Generating... (3 × medium)\n");
    }

    #[test]
    fn test_loading_line_uses_arabic_label() {
        let mut controller = Controller::new(Arc::new(SimClock::new()), Locale::Ar);
        controller.handle(Event::DifficultySelected(Difficulty::Riddle));
        controller.handle(Event::WordChanged("بحر".into()));
        controller.handle(Event::Submit);
        assert_eq!(render(&controller), "… جاري التوليد بسرعة... (3 × لغز)\n");
    }

    #[test]
    fn test_form_line_marks_submittable_state() {
        let mut controller = Controller::new(Arc::new(SimClock::new()), Locale::En);
        assert_eq!(render_form(&controller), "[- | 3 | medium]\n");

        controller.handle(Event::WordChanged("  sea ".into()));
        assert_eq!(render_form(&controller), "[sea | 3 | medium] ⏎\n");

        // No marker while a request is in flight.
        controller.handle(Event::Submit);
        assert_eq!(render_form(&controller), "[sea | 3 | medium]\n");
    }

    #[test]
    fn test_success_with_copied_marker() {
        let clock = Arc::new(SimClock::new());
        let mut controller = Controller::new(Arc::clone(&clock), Locale::En);
        success(
            &mut controller,
            GenerationResult {
                clues: vec!["wet".into(), "salty".into()],
                synonyms: vec!["ocean".into()],
                antonyms: vec![],
            },
        );
        controller.handle(Event::CopyClue(0));

        let rendered = render(&controller);
        assert_eq!(
            rendered,
            "Synonyms: ocean\nSuggested clues:\n   1. wet  ✓ copied\n   2. salty\n"
        );

        clock.advance_ms(2_000);
        assert!(!render(&controller).contains("copied"));
    }

    #[test]
    fn test_success_without_clues_renders_nothing() {
        let mut controller = Controller::new(Arc::new(SimClock::new()), Locale::En);
        success(
            &mut controller,
            GenerationResult {
                synonyms: vec!["x".into()],
                ..Default::default()
            },
        );
        assert_eq!(render(&controller), "");
    }

    #[test]
    fn test_failure_shows_message() {
        let mut controller = Controller::new(Arc::new(SimClock::new()), Locale::Ar);
        controller.handle(Event::WordChanged("word".into()));
        controller.handle(Event::Submit);
        controller.handle(Event::Resolved {
            request: 1,
            outcome: Err(GenerationError::Region),
        });
        assert_eq!(
            render(&controller),
            "! خدمة Gemini غير متوفرة في منطقتك الحالية حالياً.\n"
        );
    }
}
