use podabot::access::{check, Action, AdminSet, GateDecision};

#[test]
fn test_gated_actions() {
    assert!(Action::Lookup.requires_phone_verification());
    assert!(Action::AddCattle.requires_phone_verification());
    assert!(Action::DeleteCattle.requires_phone_verification());

    assert!(!Action::Start.requires_phone_verification());
    assert!(!Action::ChooseLanguage.requires_phone_verification());
    assert!(!Action::ShareContact.requires_phone_verification());

    assert!(Action::AddCattle.requires_admin());
    assert!(Action::DeleteCattle.requires_admin());
    assert!(!Action::Lookup.requires_admin());
}

/// An unverified user attempting an admin command is asked for the phone
/// first; only after sharing a contact does the admin check apply.
#[test]
fn test_phone_prompt_precedes_authorization_refusal() {
    let admins = AdminSet::new([1]);

    assert_eq!(
        check(&admins, Action::AddCattle, 2, false),
        GateDecision::NeedsPhone
    );
    assert_eq!(
        check(&admins, Action::AddCattle, 2, true),
        GateDecision::NotAuthorized
    );
    assert_eq!(
        check(&admins, Action::AddCattle, 1, true),
        GateDecision::Allowed
    );
}

#[test]
fn test_lookup_needs_phone_but_not_admin() {
    let admins = AdminSet::new([1]);

    assert_eq!(
        check(&admins, Action::Lookup, 2, false),
        GateDecision::NeedsPhone
    );
    assert_eq!(
        check(&admins, Action::Lookup, 2, true),
        GateDecision::Allowed
    );
}

#[test]
fn test_onboarding_actions_never_gated() {
    let admins = AdminSet::default();

    for action in [Action::Start, Action::ChooseLanguage, Action::ShareContact] {
        assert_eq!(check(&admins, action, 2, false), GateDecision::Allowed);
    }
}

#[test]
fn test_admin_set_membership() {
    let admins: AdminSet = "10,20".parse().unwrap();
    assert!(admins.is_admin(10));
    assert!(admins.is_admin(20));
    assert!(!admins.is_admin(30));
}
