use super::common::*;
use crate::assessments::domain::{EngagementLevel, Gift, Question, ResponseSet};
use crate::assessments::scoring::{
    calculate_profile, score_assessment, InvalidInputReason, ProfileTier, ScoringError,
};

#[test]
fn repeated_scoring_is_byte_identical() {
    let questions = questions_for(&FIVE_GIFTS, 3);
    let responses = responses(&[
        ("leadership-1", 5),
        ("leadership-2", 3),
        ("teaching-1", 4),
        ("mercy-2", 2),
        ("service-3", 5),
        ("giving-1", 1),
    ]);

    let first = calculate_profile(&questions, &responses).expect("profile scores");
    let second = calculate_profile(&questions, &responses).expect("profile scores");

    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn top_gifts_are_capped_at_answered_gift_count() {
    let questions = questions_for(&FIVE_GIFTS, 2);

    let two_gifts = responses(&[("leadership-1", 4), ("mercy-1", 3)]);
    let profile = calculate_profile(&questions, &two_gifts).expect("profile scores");
    assert_eq!(profile.top_gifts, vec![Gift::Leadership, Gift::Mercy]);

    let all = answer_all(&questions, 3);
    let profile = calculate_profile(&questions, &all).expect("profile scores");
    assert_eq!(profile.top_gifts.len(), 3);
}

#[test]
fn top_gifts_rank_by_average_then_question_order() {
    let questions = questions_for(&FIVE_GIFTS, 2);
    let responses = responses(&[
        ("leadership-1", 2),
        ("leadership-2", 2),
        ("teaching-1", 4),
        ("teaching-2", 3),
        ("mercy-1", 5),
        ("mercy-2", 5),
        ("service-1", 3),
        ("service-2", 4),
        ("giving-1", 1),
        ("giving-2", 1),
    ]);

    let profile = calculate_profile(&questions, &responses).expect("profile scores");

    // Teaching and Service tie at 3.5; Teaching appears first in the question set.
    assert_eq!(
        profile.top_gifts,
        vec![Gift::Mercy, Gift::Teaching, Gift::Service]
    );
}

#[test]
fn ties_follow_first_appearance_even_when_interleaved() {
    let questions = vec![
        Question::new("q1", Gift::Giving, ""),
        Question::new("q2", Gift::Faith, ""),
        Question::new("q3", Gift::Giving, ""),
        Question::new("q4", Gift::Administration, ""),
        Question::new("q5", Gift::Wisdom, ""),
    ];
    let responses = answer_all(&questions, 3);

    let profile = calculate_profile(&questions, &responses).expect("profile scores");

    assert_eq!(
        profile.top_gifts,
        vec![Gift::Giving, Gift::Faith, Gift::Administration]
    );
}

#[test]
fn classification_boundaries_are_inclusive() {
    assert_eq!(ProfileTier::classify(5.0), ProfileTier::KingdomChampion);
    assert_eq!(ProfileTier::classify(4.5), ProfileTier::KingdomChampion);
    assert_eq!(ProfileTier::classify(4.4999), ProfileTier::FaithfulServant);
    assert_eq!(ProfileTier::classify(4.0), ProfileTier::FaithfulServant);
    assert_eq!(ProfileTier::classify(3.9999), ProfileTier::GrowingDisciple);
    assert_eq!(ProfileTier::classify(3.5), ProfileTier::GrowingDisciple);
    assert_eq!(ProfileTier::classify(3.4999), ProfileTier::WillingHelper);
    assert_eq!(ProfileTier::classify(2.5), ProfileTier::WillingHelper);
    assert_eq!(ProfileTier::classify(2.4999), ProfileTier::HumbleServant);
    assert_eq!(ProfileTier::classify(1.0), ProfileTier::HumbleServant);
}

#[test]
fn engagement_levels_follow_tier_boundaries() {
    assert_eq!(
        ProfileTier::classify(3.5).engagement_level(),
        EngagementLevel::High
    );
    assert_eq!(
        ProfileTier::classify(3.4999).engagement_level(),
        EngagementLevel::Moderate
    );
    assert_eq!(
        ProfileTier::classify(2.5).engagement_level(),
        EngagementLevel::Moderate
    );
    assert_eq!(
        ProfileTier::classify(2.4999).engagement_level(),
        EngagementLevel::Supportive
    );
}

#[test]
fn computed_average_on_boundary_uses_inclusive_label() {
    let questions = questions_for(&[Gift::Leadership], 2);
    let responses = responses(&[("leadership-1", 4), ("leadership-2", 5)]);

    let profile = calculate_profile(&questions, &responses).expect("profile scores");

    assert_eq!(profile.average_score, 4.5);
    assert_eq!(profile.profile_label, "Kingdom Champion");

    let responses = super::common::responses(&[("leadership-1", 2), ("leadership-2", 3)]);
    let profile = calculate_profile(&questions, &responses).expect("profile scores");
    assert_eq!(profile.profile_label, "Willing Helper");
    assert_eq!(profile.engagement_level, EngagementLevel::Moderate);
}

#[test]
fn single_question_scores_as_kingdom_champion() {
    let questions = vec![Question::new("only", Gift::Hospitality, "I love guests")];
    let responses = responses(&[("only", 5)]);

    let profile = calculate_profile(&questions, &responses).expect("profile scores");

    assert_eq!(profile.top_gifts, vec![Gift::Hospitality]);
    assert_eq!(profile.average_score, 5.0);
    assert_eq!(profile.profile_label, "Kingdom Champion");
    assert_eq!(profile.engagement_level, EngagementLevel::High);
}

#[test]
fn empty_question_set_is_invalid_input() {
    let err = calculate_profile(&[], &responses(&[("q1", 3)])).expect_err("no questions");

    assert_eq!(
        err,
        ScoringError::InvalidInput {
            reason: InvalidInputReason::NoQuestions
        }
    );
    assert_eq!(err.to_string(), "invalid input: no questions provided");
}

#[test]
fn empty_response_set_is_invalid_input() {
    let questions = questions_for(&FIVE_GIFTS, 1);

    let err = calculate_profile(&questions, &ResponseSet::new()).expect_err("no responses");

    assert_eq!(
        err,
        ScoringError::InvalidInput {
            reason: InvalidInputReason::NoResponses
        }
    );
    assert_eq!(err.to_string(), "invalid input: no responses provided");
}

#[test]
fn responses_outside_the_question_set_do_not_count() {
    let questions = questions_for(&[Gift::Mercy], 1);

    let err = calculate_profile(&questions, &responses(&[("unrelated", 5)]))
        .expect_err("nothing answered");
    assert!(matches!(
        err,
        ScoringError::InvalidInput {
            reason: InvalidInputReason::NoResponses
        }
    ));

    let profile = calculate_profile(
        &questions,
        &responses(&[("mercy-1", 2), ("unrelated", 5)]),
    )
    .expect("profile scores");
    assert_eq!(profile.average_score, 2.0);
}

#[test]
fn duplicate_question_ids_are_rejected() {
    let questions = vec![
        Question::new("q1", Gift::Mercy, ""),
        Question::new("q1", Gift::Giving, ""),
    ];

    let err = calculate_profile(&questions, &responses(&[("q1", 3)])).expect_err("duplicate");

    assert!(err.to_string().contains("duplicate question id 'q1'"));
}

#[test]
fn fifteen_questions_all_fours_scores_faithful_servant() {
    let questions = questions_for(&FIVE_GIFTS, 3);
    assert_eq!(questions.len(), 15);
    let responses = answer_all(&questions, 4);

    let outcome = score_assessment(&questions, &responses).expect("profile scores");

    assert!(outcome
        .gift_scores
        .iter()
        .all(|gift| gift.average_score == 4.0 && gift.question_count == 3));
    assert_eq!(outcome.overall_average, 4.0);
    assert_eq!(outcome.profile.average_score, 4.0);
    assert_eq!(outcome.profile.profile_label, "Faithful Servant");
    assert_eq!(
        outcome.profile.top_gifts,
        vec![Gift::Leadership, Gift::Teaching, Gift::Mercy]
    );
}

#[test]
fn unanswered_questions_are_excluded_from_gift_average() {
    let questions = questions_for(&[Gift::Teaching, Gift::Giving], 3);
    let responses = responses(&[
        ("teaching-1", 5),
        ("giving-1", 4),
        ("giving-2", 4),
        ("giving-3", 5),
    ]);

    let outcome = score_assessment(&questions, &responses).expect("profile scores");

    let teaching = outcome
        .gift_scores
        .iter()
        .find(|score| score.gift == Gift::Teaching)
        .expect("teaching scored");
    assert_eq!(teaching.total_score, 5);
    assert_eq!(teaching.question_count, 1);
    assert_eq!(teaching.average_score, 5.0);
    assert_eq!(outcome.answered, 4);
    assert_eq!(outcome.unanswered, 2);
    assert_eq!(outcome.profile.top_gifts, vec![Gift::Teaching, Gift::Giving]);
}

#[test]
fn gifts_without_answers_are_left_out_of_the_breakdown() {
    let questions = questions_for(&FIVE_GIFTS, 1);
    let responses = responses(&[("mercy-1", 3), ("giving-1", 4)]);

    let outcome = score_assessment(&questions, &responses).expect("profile scores");

    let gifts: Vec<Gift> = outcome.gift_scores.iter().map(|score| score.gift).collect();
    assert_eq!(gifts, vec![Gift::Mercy, Gift::Giving]);
}

#[test]
fn overall_average_is_flat_mean_of_answers() {
    let questions = questions_for(&[Gift::Leadership, Gift::Teaching], 3);
    let responses = responses(&[
        ("leadership-1", 5),
        ("leadership-2", 5),
        ("leadership-3", 5),
        ("teaching-1", 1),
    ]);

    let outcome = score_assessment(&questions, &responses).expect("profile scores");

    // Mean of the per-gift averages would be 3.0 (Willing Helper).
    assert_eq!(outcome.overall_average, 4.0);
    assert_eq!(outcome.profile.profile_label, "Faithful Servant");
}

#[test]
fn average_score_is_rounded_to_one_decimal() {
    let questions = questions_for(&[Gift::Wisdom], 3);
    let responses = responses(&[("wisdom-1", 4), ("wisdom-2", 5), ("wisdom-3", 4)]);

    let outcome = score_assessment(&questions, &responses).expect("profile scores");

    assert_eq!(outcome.profile.average_score, 4.3);
    assert!(outcome.overall_average > 4.33 && outcome.overall_average < 4.34);
    assert_eq!(outcome.profile.profile_label, "Faithful Servant");
}

#[test]
fn profile_text_matches_label() {
    let questions = questions_for(&[Gift::Service], 1);
    let profile =
        calculate_profile(&questions, &responses(&[("service-1", 1)])).expect("profile scores");

    assert_eq!(profile.profile_label, ProfileTier::HumbleServant.label());
    assert_eq!(
        profile.profile_description,
        ProfileTier::HumbleServant.description()
    );
    assert_eq!(
        profile.serving_style,
        ProfileTier::HumbleServant.serving_style()
    );
    assert_eq!(profile.engagement_level, EngagementLevel::Supportive);
}

#[test]
fn profile_serializes_with_camel_case_keys() {
    let questions = questions_for(&[Gift::Evangelism], 1);
    let profile =
        calculate_profile(&questions, &responses(&[("evangelism-1", 3)])).expect("profile scores");

    let json = serde_json::to_value(&profile).expect("serializes");

    assert_eq!(json["topGifts"], serde_json::json!(["Evangelism"]));
    assert_eq!(json["profileLabel"], "Willing Helper");
    assert_eq!(json["averageScore"], 3.0);
    assert_eq!(json["engagementLevel"], "Moderate");
    assert!(json.get("servingStyle").is_some());
    assert!(json.get("profileDescription").is_some());
}
