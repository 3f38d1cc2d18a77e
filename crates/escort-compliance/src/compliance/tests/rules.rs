use super::common::*;
use crate::compliance::rules::standard_rules;
use crate::compliance::{
    EscortConfigStrategy, EscortRole, JurisdictionRuleTable, NotesPolicy, RuleTableError,
};

#[test]
fn standard_rules_pass_table_validation() {
    let table = JurisdictionRuleTable::from_rules(standard_rules()).expect("standard rules valid");
    assert_eq!(table.len(), 21);
    assert_eq!(&table, standard_table().as_ref());
}

#[test]
fn lookup_returns_rule_or_none() {
    let table = standard_table();

    let texas = table.lookup("TX").expect("TX modeled");
    assert_eq!(texas.display_name, "Texas");
    assert_eq!(texas.police_width_threshold_ft, 18.0);
    assert!(texas.night_width_threshold_ft.is_none());

    let louisiana = table.lookup("LA").expect("LA modeled");
    assert_eq!(louisiana.night_width_threshold_ft, Some(14.0));

    assert!(table.lookup("ZZ").is_none());
    assert!(!table.contains("tx"));
}

#[test]
fn police_threshold_never_below_escort_threshold() {
    for rule in standard_table().rules() {
        assert!(
            rule.police_width_threshold_ft >= rule.escort_width_threshold_ft,
            "{} police threshold below escort threshold",
            rule.jurisdiction_code
        );
    }
}

#[test]
fn from_rules_rejects_duplicate_codes() {
    let result = JurisdictionRuleTable::from_rules(vec![sample_rule("AA"), sample_rule("AA")]);
    assert_eq!(result, Err(RuleTableError::DuplicateCode("AA".to_string())));
}

#[test]
fn from_rules_rejects_police_below_escort() {
    let mut rule = sample_rule("AA");
    rule.police_width_threshold_ft = 10.0;

    match JurisdictionRuleTable::from_rules(vec![rule]) {
        Err(RuleTableError::PoliceBelowEscort { code, police, escort }) => {
            assert_eq!(code, "AA");
            assert_eq!(police, 10.0);
            assert_eq!(escort, 12.0);
        }
        other => panic!("expected police/escort violation, got {other:?}"),
    }
}

#[test]
fn from_rules_rejects_malformed_codes_and_thresholds() {
    let lowercase = sample_rule("aa");
    assert!(matches!(
        JurisdictionRuleTable::from_rules(vec![lowercase]),
        Err(RuleTableError::MalformedCode(_))
    ));

    let mut night = sample_rule("BB");
    night.night_width_threshold_ft = Some(0.0);
    match JurisdictionRuleTable::from_rules(vec![night]) {
        Err(RuleTableError::InvalidThreshold { field, .. }) => {
            assert_eq!(field, "nightWidthThresholdFt")
        }
        other => panic!("expected threshold violation, got {other:?}"),
    }
}

#[test]
fn strategies_are_width_banded() {
    let tiered = EscortConfigStrategy::WidthTiered2x2 { band_ft: 18.0 };
    assert_eq!(tiered.roles_for_width(17.9).len(), 2);
    assert_eq!(
        tiered.roles_for_width(18.0),
        vec![
            EscortRole::Front,
            EscortRole::Front,
            EscortRole::Rear,
            EscortRole::Rear
        ]
    );

    let survey = EscortConfigStrategy::FrontWithSurvey { band_ft: 16.0 };
    assert_eq!(survey.roles_for_width(15.0), vec![EscortRole::Front]);
    assert_eq!(
        survey.roles_for_width(16.0),
        vec![EscortRole::Front, EscortRole::Rear, EscortRole::RouteSurvey]
    );

    assert_eq!(EscortConfigStrategy::FrontRear.name(), "flat-1-1");
}

#[test]
fn notes_policy_switches_at_band() {
    let policy = NotesPolicy::WidthBanded {
        band_ft: 16.0,
        wide: "wide",
        standard: "standard",
    };
    assert_eq!(policy.notes_for(&dims(15.9, 13.0)), "standard");
    assert_eq!(policy.notes_for(&dims(16.0, 13.0)), "wide");
}

#[test]
fn rules_serialize_as_named_strategies() {
    let table = standard_table();
    let texas = table.lookup("TX").expect("TX modeled");
    let value = serde_json::to_value(texas).expect("rule serializes");

    assert_eq!(value["jurisdictionCode"], "TX");
    assert_eq!(value["escortConfig"]["strategy"], "width-tiered-2x2");
    assert_eq!(value["escortConfig"]["bandFt"], 18.0);
    assert_eq!(value["notesPolicy"]["policy"], "width-banded");
    assert!(value["nightWidthThresholdFt"].is_null());
}
