use vizij_button::{
    ButtonConfig, ButtonEvent, Callbacks, Content, Palette, Phase, PhaseController, Pulse,
    Transform,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn events_for(c: &mut PhaseController, dt: f32, frames: usize) -> Vec<ButtonEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(c.update(dt).events.iter().cloned());
    }
    events
}

/// it should pulse the scale up to the factor and back to exactly 1
#[test]
fn success_scale_pulse() {
    let mut c = PhaseController::new(
        ButtonConfig {
            scale_on_success: true,
            scale_factor: 1.2,
            ..ButtonConfig::default()
        },
        Callbacks::new(),
    );
    c.succeed();
    assert!(c.micro().is_animating());

    let mut peak = 1.0f32;
    let mut events = Vec::new();
    for _ in 0..200 {
        events.extend(c.update(0.001).events.iter().cloned());
        match c.presentation().transform {
            Transform::Scale(s) => peak = peak.max(s),
            other => panic!("success must scale, got {other:?}"),
        }
    }
    approx(peak, 1.2, 1e-3);
    assert_eq!(c.micro().value(), 0.0);
    assert_eq!(c.presentation().transform, Transform::Scale(1.0));
    assert!(events.contains(&ButtonEvent::PulseStarted { pulse: Pulse::Scale }));
    assert!(events.contains(&ButtonEvent::PulseFinished { pulse: Pulse::Scale }));
}

/// it should reach the midpoint of the first pulse half at half its duration
#[test]
fn scale_pulse_follows_ease_in_out() {
    let mut c = PhaseController::new(
        ButtonConfig {
            scale_on_success: true,
            ..ButtonConfig::default()
        },
        Callbacks::new(),
    );
    c.succeed();
    c.update(0.040);
    approx(c.micro().value(), 0.5, 1e-3);
    approx(c.signals().scale, 1.05, 1e-3);
}

/// it should shake through both extremes and come back to rest
#[test]
fn error_shake() {
    let mut c = PhaseController::new(
        ButtonConfig {
            shake_on_error: true,
            shake_offset: 8.0,
            ..ButtonConfig::default()
        },
        Callbacks::new(),
    );
    c.fail();
    let (mut lo, mut hi) = (0.0f32, 0.0f32);
    for _ in 0..200 {
        c.update(0.001);
        match c.presentation().transform {
            Transform::TranslateX(x) => {
                lo = lo.min(x);
                hi = hi.max(x);
            }
            other => panic!("error must translate, got {other:?}"),
        }
    }
    // +offset is crossed mid-swing; -offset is where the swing turns
    assert!(hi > 7.5 && hi <= 8.0 + 1e-3, "hi={hi}");
    approx(lo, -8.0, 1e-3);
    assert_eq!(c.micro().value(), 0.0);
    assert!(!c.micro().is_animating());
}

#[test]
fn pulses_are_opt_in() {
    let mut c = PhaseController::new(ButtonConfig::default(), Callbacks::new());
    c.fail();
    assert!(!c.micro().is_animating());
    c.succeed();
    assert!(!c.micro().is_animating());
    let events = events_for(&mut c, 1.0 / 60.0, 180);
    assert!(!events
        .iter()
        .any(|e| matches!(e, ButtonEvent::PulseStarted { .. })));
}

#[test]
fn new_pulse_interrupts_the_running_one() {
    let mut c = PhaseController::new(
        ButtonConfig {
            scale_on_success: true,
            shake_on_error: true,
            ..ButtonConfig::default()
        },
        Callbacks::new(),
    );
    c.succeed();
    c.update(0.03);
    c.fail();
    let events = events_for(&mut c, 0.01, 50);
    assert!(events.contains(&ButtonEvent::PulseInterrupted { pulse: Pulse::Scale }));
    assert!(events.contains(&ButtonEvent::PulseFinished { pulse: Pulse::Shake }));
    assert!(!events.contains(&ButtonEvent::PulseFinished { pulse: Pulse::Scale }));
}

/// it should finish a running scale pulse as a scale when the outcome flips
#[test]
fn failing_mid_scale_pulse_keeps_scaling() {
    let mut c = PhaseController::new(
        ButtonConfig {
            scale_on_success: true,
            scale_factor: 1.2,
            shake_on_error: false,
            ..ButtonConfig::default()
        },
        Callbacks::new(),
    );
    c.succeed();
    c.update(0.04);
    c.fail();
    assert!(c.micro().is_animating());
    match c.presentation().transform {
        Transform::Scale(s) => assert!(s > 1.0, "scale={s}"),
        other => panic!("running scale pulse must scale, got {other:?}"),
    }

    let events = events_for(&mut c, 0.01, 30);
    assert!(events.contains(&ButtonEvent::PulseFinished { pulse: Pulse::Scale }));
    assert!(!c.micro().is_animating());
    assert_eq!(c.presentation().transform, Transform::TranslateX(0.0));
}

/// it should ease between the resting phases over the disable duration
#[test]
fn disable_uses_timed_transition() {
    let mut c = PhaseController::new(ButtonConfig::default(), Callbacks::new());
    c.set_disabled(true);
    assert_eq!(c.phase(), Phase::Idle);
    assert!(!c.primary().is_spring());
    assert_eq!(c.primary().target(), Some(0.0));

    c.update(0.125);
    approx(c.primary().value(), 0.5, 1e-3);
    let events = events_for(&mut c, 0.025, 6);
    assert_eq!(c.primary().value(), 0.0);
    assert!(!c.is_animating());
    assert!(!events
        .iter()
        .any(|e| matches!(e, ButtonEvent::Callback { .. })));

    let p = c.presentation();
    assert!(p.disabled);
    assert!(!p.touch.enabled);
    assert_eq!(p.background, Palette::ios().gray);
    assert_eq!(p.foreground, Palette::ios().white);

    c.set_disabled(false);
    assert_eq!(c.phase(), Phase::Loading);
    events_for(&mut c, 0.05, 6);
    assert_eq!(c.primary().value(), 1.0);
    assert_eq!(c.presentation().background, Palette::ios().white);
}

#[test]
fn disable_duration_is_configurable() {
    let mut c = PhaseController::from_json(
        r#"{ "animation": { "disableDurationMs": 100, "disableEasing": { "type": "linear" } } }"#,
        Callbacks::new(),
    )
    .expect("config");
    c.set_disabled(true);
    c.update(0.025);
    approx(c.primary().value(), 0.75, 1e-3);
    c.update(0.1);
    assert_eq!(c.primary().value(), 0.0);
}

#[test]
fn repeated_disable_is_a_no_op() {
    let mut c = PhaseController::new(ButtonConfig::default(), Callbacks::new());
    c.set_disabled(true);
    let id = c.current_transition();
    c.set_disabled(true);
    assert_eq!(c.current_transition(), id);
    let out = c.update(0.01);
    let changes = out
        .events
        .iter()
        .filter(|e| matches!(e, ButtonEvent::DisabledChanged { .. }))
        .count();
    assert_eq!(changes, 1);
}

#[test]
fn content_follows_the_phase() {
    let mut c = PhaseController::new(
        ButtonConfig {
            label: Some("Submit".into()),
            error_icon_name: Some("alert".into()),
            ..ButtonConfig::default()
        },
        Callbacks::new(),
    );
    assert_eq!(
        c.presentation().content,
        Content::Label {
            text: Some("Submit".into()),
            icon: None,
        }
    );
    c.load();
    assert_eq!(c.presentation().content, Content::Indicator);
    c.fail();
    match c.presentation().content {
        Content::Icon { name, .. } => assert_eq!(name.as_deref(), Some("alert")),
        other => panic!("expected outcome icon, got {other:?}"),
    }
}
