mod support;

use mock_interview::{
    can_enter, grant_permission, validate_resume, FocusSignal, FocusState, InterviewPhase,
    InterviewSession, PermissionKind, PreconditionFailure, QuestionStep, Route, SessionStore,
    Visibility, WizardController, WizardStep,
};
use support::{two_megabyte_pdf, HostCall, NavigatorSpy, ScriptedCapture};

/// Runs the wizard up to the interview with camera and microphone granted.
fn ready_store() -> SessionStore {
    let mut store = SessionStore::in_memory();
    let meta = validate_resume(&two_megabyte_pdf()).expect("pdf should be accepted");
    store.record_resume(&meta).expect("resume should persist");

    let mut capture =
        ScriptedCapture::allowing(&[PermissionKind::Camera, PermissionKind::Microphone]);
    for kind in [PermissionKind::Camera, PermissionKind::Microphone] {
        grant_permission(&mut store, &mut capture, kind).expect("grant should succeed");
    }
    store
}

#[test]
fn advance_never_moves_without_precondition() {
    let mut store = SessionStore::in_memory();
    let mut wizard = WizardController::new();
    let mut host = NavigatorSpy::default();

    let failure = wizard
        .advance(&store.read_session(), &mut host)
        .expect_err("no resume yet");
    assert_eq!(failure, PreconditionFailure::ResumeRequired);
    assert_eq!(wizard.current(), WizardStep::UploadResume);
    assert_eq!(host.notice_titles(), vec!["Resume Required".to_string()]);
    assert!(host.routes().is_empty());

    let meta = validate_resume(&two_megabyte_pdf()).expect("pdf should be accepted");
    store.record_resume(&meta).expect("resume should persist");
    assert_eq!(
        wizard.advance(&store.read_session(), &mut host),
        Ok(WizardStep::GrantPermissions)
    );

    store
        .set_permission(PermissionKind::ScreenShare, true)
        .expect("flag should persist");
    assert!(matches!(
        wizard.advance(&store.read_session(), &mut host),
        Err(PreconditionFailure::PermissionsRequired { .. })
    ));
    assert_eq!(wizard.current(), WizardStep::GrantPermissions);
    assert_eq!(host.routes(), vec![Route::GrantPermissions]);
}

#[test]
fn go_back_is_unconditional() {
    let store = ready_store();
    let mut wizard = WizardController::starting_at(WizardStep::Interview);
    let mut host = NavigatorSpy::default();

    assert_eq!(wizard.go_back(&mut host), WizardStep::GrantPermissions);
    assert_eq!(wizard.go_back(&mut host), WizardStep::UploadResume);
    assert_eq!(wizard.go_back(&mut host), WizardStep::UploadResume);
    assert_eq!(
        host.routes(),
        vec![Route::GrantPermissions, Route::UploadResume]
    );

    assert_eq!(
        wizard.advance(&store.read_session(), &mut host),
        Ok(WizardStep::GrantPermissions)
    );
}

#[test]
fn removing_resume_closes_permission_step_again() {
    let mut store = ready_store();
    store.clear_resume().expect("first clear");
    let once = store.read_session();
    store.clear_resume().expect("second clear");

    assert_eq!(store.read_session(), once);
    assert!(!can_enter(WizardStep::GrantPermissions, &once));
}

#[test]
fn denied_microphone_blocks_interview_until_retry_succeeds() {
    let mut store = SessionStore::in_memory();
    let mut capture = ScriptedCapture::allowing(&[PermissionKind::Camera]);

    grant_permission(&mut store, &mut capture, PermissionKind::Camera).expect("camera granted");
    assert!(grant_permission(&mut store, &mut capture, PermissionKind::Microphone).is_err());
    assert!(!can_enter(WizardStep::Interview, &store.read_session()));

    capture.allowed.push(PermissionKind::Microphone);
    grant_permission(&mut store, &mut capture, PermissionKind::Microphone)
        .expect("retry should succeed");
    assert!(can_enter(WizardStep::Interview, &store.read_session()));
    assert_eq!(
        capture.requests,
        vec![
            PermissionKind::Camera,
            PermissionKind::Microphone,
            PermissionKind::Microphone
        ]
    );
}

#[test]
fn scenario_two_focus_losses_keep_session_active() {
    let store = ready_store();
    let record = store.read_session();
    assert!(can_enter(WizardStep::GrantPermissions, &record));
    assert!(can_enter(WizardStep::Interview, &record));

    let mut wizard = WizardController::starting_at(WizardStep::GrantPermissions);
    let mut host = NavigatorSpy::default();
    assert_eq!(
        wizard.advance(&record, &mut host),
        Ok(WizardStep::Interview)
    );

    let mut session = InterviewSession::default();
    session.begin(&record, &mut host).expect("interview should begin");

    let signals: Vec<_> = (0..2)
        .map(|_| session.on_visibility_change(Visibility::Hidden, &mut host))
        .collect();

    assert_eq!(
        signals,
        vec![Some(FocusSignal::Warning), Some(FocusSignal::FinalWarning)]
    );
    assert_eq!(session.phase(), InterviewPhase::Active);
    assert_eq!(session.violations_label(), "2/3");
    assert_eq!(host.routes(), vec![Route::Interview]);
}

#[test]
fn scenario_third_focus_loss_terminates_and_navigates_away() {
    let store = ready_store();
    let mut host = NavigatorSpy::default();
    let mut session = InterviewSession::default();
    session
        .begin(&store.read_session(), &mut host)
        .expect("interview should begin");

    for _ in 0..2 {
        session.on_visibility_change(Visibility::Hidden, &mut host);
        session.on_visibility_change(Visibility::Visible, &mut host);
    }
    let signal = session.on_visibility_change(Visibility::Hidden, &mut host);

    assert_eq!(signal, Some(FocusSignal::Terminated));
    assert_eq!(session.phase(), InterviewPhase::Terminated);
    assert_eq!(session.focus().state(), FocusState::Terminated { count: 3 });
    assert!(!session.is_recording());
    assert_eq!(
        host.calls.last(),
        Some(&HostCall::Navigate(Route::Dashboard))
    );

    assert_eq!(
        session.on_visibility_change(Visibility::Hidden, &mut host),
        None
    );
    assert_eq!(session.focus().count(), 3);
    assert_eq!(session.next_question(&mut host), QuestionStep::NotActive);
}

#[test]
fn scenario_six_questions_complete_on_sixth_advance() {
    let store = ready_store();
    let mut host = NavigatorSpy::default();
    let mut session = InterviewSession::default();
    session
        .begin(&store.read_session(), &mut host)
        .expect("interview should begin");
    assert_eq!(session.questions().index(), 0);

    let steps: Vec<_> = (0..6).map(|_| session.next_question(&mut host)).collect();

    assert_eq!(
        steps,
        vec![
            QuestionStep::Next { index: 1 },
            QuestionStep::Next { index: 2 },
            QuestionStep::Next { index: 3 },
            QuestionStep::Next { index: 4 },
            QuestionStep::Next { index: 5 },
            QuestionStep::Completed,
        ]
    );
    assert_eq!(session.questions().index(), 5);
    assert_eq!(session.phase(), InterviewPhase::Completed);
    assert!(!session.focus().is_active());

    let tail: Vec<_> = host.calls.iter().rev().take(2).cloned().collect();
    assert_eq!(tail[0], HostCall::Navigate(Route::Dashboard));
    assert!(matches!(&tail[1], HostCall::Notify(notice) if notice.title == "Interview Completed"));

    session.on_visibility_change(Visibility::Hidden, &mut host);
    assert_eq!(session.focus().count(), 0);
}

#[test]
fn begin_without_microphone_reports_and_stays_in_setup() {
    let mut store = SessionStore::in_memory();
    store
        .set_permission(PermissionKind::Camera, true)
        .expect("flag should persist");
    let mut host = NavigatorSpy::default();
    let mut session = InterviewSession::default();

    assert!(session.begin(&store.read_session(), &mut host).is_err());
    assert_eq!(session.phase(), InterviewPhase::Setup);
    assert_eq!(host.notice_titles(), vec!["Permissions Required".to_string()]);
    assert_eq!(
        session.on_visibility_change(Visibility::Hidden, &mut host),
        None
    );
}

#[test]
fn leaving_stops_monitor_before_navigation() {
    let store = ready_store();
    let mut host = NavigatorSpy::default();
    let mut session = InterviewSession::default();
    session
        .begin(&store.read_session(), &mut host)
        .expect("interview should begin");
    session.on_visibility_change(Visibility::Hidden, &mut host);

    session.leave(&mut host);

    assert!(!session.focus().is_active());
    assert_eq!(host.routes(), vec![Route::Dashboard]);
    assert_eq!(
        session.on_visibility_change(Visibility::Hidden, &mut host),
        None
    );
}

#[test]
fn restarting_resets_violations_and_cursor() {
    let store = ready_store();
    let record = store.read_session();
    let mut host = NavigatorSpy::default();
    let mut session = InterviewSession::default();

    session.begin(&record, &mut host).expect("first begin");
    session.on_visibility_change(Visibility::Hidden, &mut host);
    session.next_question(&mut host);
    session.leave(&mut host);

    session.begin(&record, &mut host).expect("second begin");
    assert_eq!(session.violations_label(), "0/3");
    assert_eq!(session.questions().index(), 0);
    assert_eq!(session.progress_percent(), 17);
}
