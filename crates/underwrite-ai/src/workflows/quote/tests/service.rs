use super::common::*;
use crate::workflows::quote::repository::SessionRepository;
use crate::workflows::quote::{
    AnswerBatch, AnswerValue, ProductType, QuoteServiceError, SessionId, SessionStatus,
};

#[test]
fn created_session_is_persisted_with_default_product() {
    let (service, store) = build_service();

    let session = service
        .create_session(Some("client-42".to_string()))
        .expect("session created");

    assert!(session.id.0.starts_with("qs-"));
    assert_eq!(session.status, SessionStatus::Created);
    assert_eq!(session.product_type, ProductType::Auto);
    assert_eq!(session.step_count, 8);
    assert_eq!(session.subject_id.as_deref(), Some("client-42"));
    assert_eq!(store.get(&session.id).expect("store readable"), Some(session));
}

#[test]
fn save_then_get_round_trips() {
    let (service, _) = build_service();
    let mut session = service.create_session(None).expect("session created");

    session.answers = answers(&complete_auto_answers());
    session.current_step = 3;
    session.eligibility = Some(service.analyze_eligibility(&session));
    session.recommendations = service.generate_ai_recommendations(&session);

    service.save_session(&session).expect("session saved");
    let loaded = service.get_session(&session.id).expect("session loaded");

    assert_eq!(loaded, session);
}

#[test]
fn unknown_session_is_reported_not_found() {
    let (service, _) = build_service();

    let error = service
        .get_session(&SessionId::from("qs-missing"))
        .expect_err("missing session");

    assert!(matches!(error, QuoteServiceError::NotFound(id) if id.0 == "qs-missing"));
}

#[test]
fn product_switch_reassembles_questionnaire() {
    let (service, _) = build_service();
    let session = service.create_session(None).expect("session created");

    let outcome = service
        .submit_answers(&session.id, batch(&[("product_type", text("home"))], false))
        .expect("answers accepted");

    assert!(outcome.persisted);
    assert!(outcome.issues.is_empty());
    assert_eq!(outcome.session.product_type, ProductType::Home);
    assert_eq!(outcome.session.step_count, 7);
    assert_eq!(outcome.session.status, SessionStatus::InProgress);
    assert!(outcome.session.eligibility.is_some());

    let steps = service.get_adaptive_questionnaire(ProductType::Home, &outcome.session);
    assert_eq!(steps[4].id, "property");
}

#[test]
fn invalid_answers_do_not_block_valid_ones() {
    let (service, _) = build_service();
    let session = service.create_session(None).expect("session created");

    let outcome = service
        .submit_answers(
            &session.id,
            batch(
                &[
                    ("postal_code", text("12")),
                    ("city", text("Lyon")),
                    ("monthly_budget", number(900.0)),
                ],
                false,
            ),
        )
        .expect("answers accepted");

    let rejected: Vec<&str> = outcome
        .issues
        .iter()
        .map(|issue| issue.question_id.as_str())
        .collect();
    assert_eq!(rejected, vec!["monthly_budget", "postal_code"]);

    let stored = service.get_session(&session.id).expect("session stored");
    assert_eq!(stored.answer("city"), Some(&text("Lyon")));
    assert!(stored.answer("postal_code").is_none());
    assert!(stored.answer("monthly_budget").is_none());
}

#[test]
fn blank_answer_clears_previous_value() {
    let (service, _) = build_service();
    let session = service.create_session(None).expect("session created");
    service
        .submit_answers(&session.id, batch(&[("city", text("Lyon"))], false))
        .expect("answers accepted");

    let outcome = service
        .submit_answers(&session.id, batch(&[("city", text("  "))], false))
        .expect("answers accepted");

    assert!(outcome.session.answer("city").is_none());
}

#[test]
fn advance_requires_a_valid_current_step() {
    let (service, _) = build_service();
    let session = service.create_session(None).expect("session created");

    let outcome = service
        .submit_answers(&session.id, batch(&[("product_type", text("auto"))], true))
        .expect("answers accepted");
    assert_eq!(outcome.session.current_step, 1);

    let blocked = service
        .submit_answers(&session.id, batch(&[("first_name", text("Camille"))], true))
        .expect("answers accepted");
    assert_eq!(blocked.session.current_step, 1);
    assert_eq!(blocked.issues.len(), 3);

    let rejected = service
        .submit_answers(
            &session.id,
            batch(
                &[
                    ("last_name", text("Durand")),
                    ("email", text("camille@")),
                    ("birth_date", text("1986-04-12")),
                ],
                true,
            ),
        )
        .expect("answers accepted");
    assert_eq!(rejected.session.current_step, 1);
    assert_eq!(rejected.issues.len(), 1);
    assert_eq!(rejected.issues[0].question_id, "email");
}

#[test]
fn storage_failure_is_reported_and_previous_record_kept() {
    let (service, store) = build_flaky_service();
    let session = service.create_session(None).expect("session created");
    service
        .submit_answers(&session.id, batch(&[("driver_age", number(40.0))], false))
        .expect("answers accepted");

    store.fail_writes(true);
    let outcome = service
        .submit_answers(&session.id, batch(&[("claims_last_5_years", number(0.0))], false))
        .expect("failure is swallowed");

    assert!(!outcome.persisted);
    assert_eq!(
        outcome.session.answer("claims_last_5_years"),
        Some(&number(0.0))
    );

    let stored = service.get_session(&session.id).expect("previous record readable");
    assert_eq!(stored.answer("driver_age"), Some(&number(40.0)));
    assert!(stored.answer("claims_last_5_years").is_none());

    let explicit = service.save_session(&outcome.session);
    assert!(matches!(explicit, Err(QuoteServiceError::Repository(_))));
}

#[test]
fn closed_sessions_reject_answers() {
    let (service, _) = build_service();
    let session = service.create_session(None).expect("session created");

    let abandoned = service.abandon(&session.id).expect("session abandoned");
    assert_eq!(abandoned.status, SessionStatus::Abandoned);

    let error = service
        .submit_answers(&session.id, AnswerBatch::default())
        .expect_err("closed session");
    assert!(matches!(
        error,
        QuoteServiceError::Closed { status: "abandoned", .. }
    ));
    assert!(service.abandon(&session.id).is_err());
}

#[test]
fn completion_requires_every_required_answer() {
    let (service, _) = build_service();
    let session = service.create_session(None).expect("session created");

    match service.complete(&session.id) {
        Err(QuoteServiceError::Incomplete { issues, .. }) => {
            assert!(issues.iter().any(|issue| issue.question_id == "product_type"));
        }
        other => panic!("expected incomplete questionnaire, got {other:?}"),
    }

    let outcome = service
        .submit_answers(&session.id, batch(&complete_auto_answers(), false))
        .expect("answers accepted");
    assert!(outcome.issues.is_empty(), "{:?}", outcome.issues);

    let completed = service.complete(&session.id).expect("session completed");
    assert_eq!(completed.status, SessionStatus::Completed);
    let eligibility = completed.eligibility.expect("eligibility computed");
    assert_eq!(eligibility.score, 100);
    assert!(completed
        .recommendations
        .iter()
        .any(|hint| hint.id == "home_bundle"));
}

#[test]
fn rendering_reuses_the_cached_questionnaire() {
    let (service, _) = build_service();
    let session = service.create_session(None).expect("session created");
    let assembled = service.questionnaire_cache().assemblies();

    let first = service.render_questionnaire(&session.id).expect("rendered");
    let second = service.render_questionnaire(&session.id).expect("rendered");

    assert_eq!(service.questionnaire_cache().assemblies(), assembled);
    assert_eq!(first.step_count, second.step_count);
    let first_ids: Vec<&str> = first.steps.iter().map(|step| step.id).collect();
    let second_ids: Vec<&str> = second.steps.iter().map(|step| step.id).collect();
    assert_eq!(first_ids, second_ids);
}

#[test]
fn questionnaire_for_another_product_is_assembled_once() {
    let (service, _) = build_service();
    let session = service.create_session(None).expect("session created");
    assert_eq!(session.product_type, ProductType::Auto);
    let assembled = service.questionnaire_cache().assemblies();

    for _ in 0..5 {
        let steps = service.get_adaptive_questionnaire(ProductType::Home, &session);
        assert_eq!(steps.len(), 7);
    }

    assert_eq!(service.questionnaire_cache().assemblies(), assembled + 1);
}

#[test]
fn rendering_corrects_a_stale_step_count_once() {
    let (service, store) = build_service();
    let mut session = service.create_session(None).expect("session created");
    session.product_type = ProductType::Home;
    session.step_count = 3;
    service.save_session(&session).expect("session saved");
    let assembled = service.questionnaire_cache().assemblies();

    for _ in 0..5 {
        let view = service.render_questionnaire(&session.id).expect("rendered");
        assert_eq!(view.step_count, 7);
    }

    assert_eq!(service.questionnaire_cache().assemblies(), assembled + 1);
    let stored = store
        .get(&session.id)
        .expect("store readable")
        .expect("session stored");
    assert_eq!(stored.step_count, 7);
}

#[test]
fn rendering_survives_an_unwritable_store() {
    let (service, store) = build_flaky_service();
    let mut session = service.create_session(None).expect("session created");
    session.step_count = 0;
    service.save_session(&session).expect("session saved");

    store.fail_writes(true);
    let view = service.render_questionnaire(&session.id).expect("rendered");

    assert_eq!(view.step_count, 8);
    assert_eq!(
        store.get(&session.id).expect("store readable").map(|s| s.step_count),
        Some(0)
    );
}

#[test]
fn recommendations_follow_stored_eligibility() {
    let (service, _) = build_service();
    let mut session = service.create_session(None).expect("session created");
    session.answers = answers(&[("monthly_budget", number(30.0))]);

    let ids: Vec<String> = service
        .generate_ai_recommendations(&session)
        .into_iter()
        .map(|hint| hint.id)
        .collect();
    assert_eq!(ids, vec!["higher_deductible"]);

    session.eligibility = Some(crate::workflows::quote::EligibilityAnalysis {
        score: 95,
        factors: Vec::new(),
        recommendations: Vec::new(),
        warnings: Vec::new(),
        improvements: Vec::new(),
    });
    let ids: Vec<String> = service
        .generate_ai_recommendations(&session)
        .into_iter()
        .map(|hint| hint.id)
        .collect();
    assert_eq!(ids, vec!["higher_deductible", "premium_tier"]);
}

#[test]
fn deleted_sessions_are_gone() {
    let (service, _) = build_service();
    let session = service.create_session(None).expect("session created");
    assert_eq!(service.list_sessions().expect("listable").len(), 1);

    service.delete_session(&session.id).expect("deleted");

    assert!(service.list_sessions().expect("listable").is_empty());
    assert!(matches!(
        service.delete_session(&session.id),
        Err(QuoteServiceError::NotFound(_))
    ));
}

#[test]
fn free_form_answers_are_kept() {
    let (service, _) = build_service();
    let session = service.create_session(None).expect("session created");

    let outcome = service
        .submit_answers(
            &session.id,
            batch(&[("referral_code", AnswerValue::text("SPRING24"))], false),
        )
        .expect("answers accepted");

    assert_eq!(outcome.session.answer("referral_code"), Some(&text("SPRING24")));
}
