use super::*;

fn style10() -> TextStyle {
    // 6px per display column with the deterministic measurer.
    TextStyle::with_font_size(10.0)
}

fn texts(lines: &[WrappedLine]) -> Vec<&str> {
    lines.iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn deterministic_width_counts_display_columns() {
    let m = DeterministicTextMeasurer::default();
    assert_eq!(m.measure_width("abcde", &style10()), 30.0);
    assert_eq!(m.measure_width("漢字", &style10()), 24.0);
    let metrics = m.measure("ab\nabcd", &style10());
    assert_eq!(metrics.width, 24.0);
    assert_eq!(metrics.line_count, 2);
}

#[test]
fn greedy_wrap_rolls_back_the_overflowing_word() {
    let m = DeterministicTextMeasurer::default();
    let lines = wrap_label_to_cell("alpha beta gamma", &m, &style10(), 60.0, 100.0, 11.0);
    assert_eq!(texts(&lines), ["alpha beta", "gamma"]);
    assert_eq!(lines[0].offset, 0.0);
    assert_eq!(lines[1].offset, 11.0);
}

#[test]
fn wrapped_lines_are_a_prefix_of_the_words() {
    let m = DeterministicTextMeasurer::default();
    let labels = [
        "Exploit Public-Facing Application",
        "  Command   and\tScripting\nInterpreter ",
        "Drive-by Compromise",
        "a b c d e f g h i j k l m n o p",
    ];
    for label in labels {
        let words: Vec<&str> = label.split_whitespace().collect();
        for width in [1.0, 30.0, 60.0, 120.0, 1000.0] {
            for height in [0.0, 12.0, 40.0, 1000.0] {
                let lines = wrap_label_to_cell(label, &m, &style10(), width, height, 11.0);
                let joined = texts(&lines).join(" ");
                let emitted: Vec<&str> = joined.split_whitespace().collect();
                assert!(
                    words.starts_with(&emitted),
                    "{label:?} at {width}x{height} produced {lines:?}"
                );
            }
        }
    }
}

#[test]
fn lines_never_start_below_the_cell() {
    let m = DeterministicTextMeasurer::default();
    let lines = wrap_label_to_cell("aa bb cc dd", &m, &style10(), 12.0, 15.0, 10.0);
    assert_eq!(texts(&lines), ["aa", "bb"]);
    for line in &lines {
        assert!(line.offset <= 15.0);
    }

    let exact = wrap_label_to_cell("aa bb cc dd", &m, &style10(), 12.0, 20.0, 10.0);
    assert_eq!(texts(&exact), ["aa", "bb", "cc"]);
}

#[test]
fn over_wide_word_is_still_placed() {
    let m = DeterministicTextMeasurer::default();
    let lines = wrap_label_to_cell("supercalifragilistic x", &m, &style10(), 6.0, 100.0, 10.0);
    assert_eq!(texts(&lines), ["supercalifragilistic", "x"]);
}

#[test]
fn empty_label_yields_one_empty_line() {
    let m = DeterministicTextMeasurer::default();
    for label in ["", "   \t\n"] {
        let lines = wrap_label_to_cell(label, &m, &style10(), 50.0, 50.0, 10.0);
        assert_eq!(
            lines,
            vec![WrappedLine {
                text: String::new(),
                offset: 0.0
            }]
        );
    }
}

#[test]
fn wrapping_only_depends_on_the_injected_measurer() {
    struct BytesMeasurer;
    impl TextMeasurer for BytesMeasurer {
        fn measure(&self, text: &str, _style: &TextStyle) -> TextMetrics {
            TextMetrics {
                width: text.len() as f64,
                height: 1.0,
                line_count: 1,
            }
        }
    }

    let lines = wrap_label_to_cell("ab cd ef", &BytesMeasurer, &style10(), 5.0, 100.0, 1.0);
    assert_eq!(texts(&lines), ["ab cd", "ef"]);
}
