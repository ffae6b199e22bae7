//! End-to-end scoring scenarios against the built-in rubric and canonical
//! classifier, driven through the public API only.

use metacog_patterns::domain::classification::{Pattern, RuleClassifier};
use metacog_patterns::domain::scoring::{Dimension, RubricScorer, ScoreVector};
use metacog_patterns::domain::transcript::{MessageExtractor, RawRecord};
use metacog_patterns::ports::PatternModel;

fn scorer() -> &'static RubricScorer {
    RubricScorer::aligned()
}

#[test]
fn empty_messages_score_zero_and_classify_passive() {
    let scores = scorer().score(&[]);
    assert_eq!(scores, ScoreVector::zero());
    assert_eq!(scores.total(), 0);

    let c = RuleClassifier::default().classify(&scores).unwrap();
    assert_eq!(c.pattern, Pattern::F);
    assert!((c.confidence - 0.9).abs() < f64::EPSILON);
}

#[test]
fn expert_role_prompt_defines_role() {
    let scores = scorer().score(&["你是一个资深Python专家，请检查代码质量"]);
    assert!(scores.get(Dimension::P4).value() >= 2);
}

#[test]
fn reasoned_multi_criteria_evaluation_tops_e1() {
    let scores = scorer().score(&[
        "因为数据不全所以结论不可靠",
        "准确性和完整性都要考虑",
        "好的",
        "好的",
        "好的",
    ]);
    assert_eq!(scores.get(Dimension::E1).value(), 3);
}

#[test]
fn strategic_profile_wins_over_critical_evaluation() {
    // p_avg = 3, e_avg = 2.67 satisfies both A and D
    let scores = ScoreVector::from_values([3, 3, 3, 3, 1, 1, 1, 3, 3, 2, 1, 1]);
    let c = RuleClassifier::default().classify(&scores).unwrap();
    assert_eq!(c.pattern, Pattern::A);
}

#[test]
fn low_total_and_weak_evaluation_is_passive_regardless_of_monitoring() {
    let scores = ScoreVector::from_values([0, 0, 1, 0, 3, 3, 2, 1, 0, 0, 2, 0]);
    assert_eq!(scores.total(), 12);
    assert!(scores.e_avg() <= 1.0);
    let c = RuleClassifier::default().classify(&scores).unwrap();
    assert_eq!(c.pattern, Pattern::F);
}

#[test]
fn long_session_reporting_progress_tops_m1() {
    let messages: Vec<&str> = std::iter::repeat("完成了").take(21).collect();
    let scores = scorer().score(&messages);
    assert_eq!(scores.get(Dimension::M1).value(), 3);
}

#[test]
fn assistant_turns_and_blank_messages_do_not_score() {
    let records = vec![
        RawRecord::new("u1", "c1", "assistant", "你是一个资深Python专家"),
        RawRecord::new("u1", "c1", "user", "   "),
        RawRecord::new("u1", "c1", "user", "你是一个资深Python专家，请检查代码质量"),
    ];
    let extraction = MessageExtractor::new().extract(&records);
    let texts = extraction.transcripts[0].human_texts();
    assert_eq!(texts, vec!["你是一个资深Python专家，请检查代码质量"]);

    let with_noise = scorer().score(&texts);
    let clean = scorer().score(&["你是一个资深Python专家，请检查代码质量"]);
    assert_eq!(with_noise, clean);
}
